pub mod config;

pub use config::{WindowConfig, WindowMode};

use winit::dpi::PhysicalSize;
use winit::window::{Fullscreen, Window, WindowAttributes};

/// Creation attributes for a window matching `config`.
pub fn window_attributes(title: &str, config: &WindowConfig) -> WindowAttributes {
    let attrs = Window::default_attributes()
        .with_title(title)
        .with_inner_size(PhysicalSize::new(config.physical_width, config.physical_height))
        .with_resizable(false);
    match config.mode {
        WindowMode::Windowed => attrs,
        WindowMode::Borderless => attrs.with_fullscreen(Some(Fullscreen::Borderless(None))),
    }
}
