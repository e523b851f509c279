//! Countdown Ring - demo host for the circular countdown widget
//! Built with iced

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use countdown_ring::app::App;

fn main() -> iced::Result {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    iced::application(App::new, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .subscription(App::subscription)
        .window_size(iced::Size::new(360.0, 420.0))
        .antialiasing(true)
        .run()
}
