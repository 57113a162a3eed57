use rgb::RGB8;

use crate::limits::Limits;

/// Viewer settings.
#[derive(Clone, Debug)]
pub struct ViewerConfig {
    /// Window title while no image is shown.
    pub title: String,
    /// Window size while no image is shown.
    pub default_width: u32,
    pub default_height: u32,
    /// Fill color while no image is shown.
    pub fallback_color: RGB8,
    /// Limits applied to every decode.
    pub limits: Limits,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "imgv".into(),
            default_width: 500,
            default_height: 500,
            fallback_color: RGB8::new(0, 0, 255),
            limits: Limits::viewer(),
        }
    }
}

impl ViewerConfig {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_default_size(mut self, width: u32, height: u32) -> Self {
        self.default_width = width;
        self.default_height = height;
        self
    }

    pub fn with_fallback_color(mut self, color: RGB8) -> Self {
        self.fallback_color = color;
        self
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }
}
