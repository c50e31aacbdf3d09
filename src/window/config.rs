// ── WindowMode ────────────────────────────────────────────────────────────────

/// Controls how the OS window is presented.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum WindowMode {
    /// Decorated window sized to an integer multiple of the frame.
    #[default]
    Windowed,
    /// Borderless window covering the current monitor.
    Borderless,
}

// ── WindowConfig ──────────────────────────────────────────────────────────────

/// Window configuration snapshot.
///
/// - **physical** dimensions are the actual pixel size of the OS window.
/// - **logical** dimensions are the software frame the game renders into
///   (620 × 400 by default), upscaled to the window when presented.
#[derive(Clone, Debug, PartialEq)]
pub struct WindowConfig {
    pub physical_width: u32,
    pub physical_height: u32,
    pub logical_width: u32,
    pub logical_height: u32,
    pub mode: WindowMode,
}

impl WindowConfig {
    /// A window showing a `width × height` frame at `scale` × magnification.
    /// A scale of zero is treated as one.
    pub fn for_frame(width: u32, height: u32, scale: u32, mode: WindowMode) -> Self {
        let scale = scale.max(1);
        Self {
            physical_width: width * scale,
            physical_height: height * scale,
            logical_width: width,
            logical_height: height,
            mode,
        }
    }

    /// The same frame in a window of a different physical size.
    pub fn with_physical(&self, width: u32, height: u32) -> Self {
        Self { physical_width: width, physical_height: height, ..self.clone() }
    }

    /// Aspect ratio of the logical frame.  Zero when the height is zero.
    pub fn aspect_ratio(&self) -> f32 {
        if self.logical_height == 0 {
            return 0.0;
        }
        self.logical_width as f32 / self.logical_height as f32
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::for_frame(620, 400, 2, WindowMode::Windowed)
    }
}
