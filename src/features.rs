//! Feature modules - widget logic separated from UI
//!
//! Features should not depend on UI components directly.

pub mod countdown;
pub mod settings;

pub use countdown::{Countdown, CountdownConfig};
pub use settings::Settings;
