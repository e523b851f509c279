//! Circular countdown indicator for iced
//!
//! - [`features::countdown`]: toolkit-independent widget state, timeline,
//!   sizing and painting
//! - [`ui`]: the iced canvas adapter and font metrics
//! - [`app`]: a small demo host

pub mod app;
pub mod features;
pub mod ui;
