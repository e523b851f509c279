//! UI module for the countdown ring
//!
//! # Architecture
//!
//! - **Primitives** (`primitives`): canvas programs
//! - **Text metrics** (`text_metrics`): font measurement for label centering
//! - **Theme** (`theme`): demo palette and widget styles

pub mod primitives;
pub mod text_metrics;
pub mod theme;
