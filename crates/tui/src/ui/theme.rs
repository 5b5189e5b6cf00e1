use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub surface: Color,
    pub surface_bright: Color,
    pub text: Color,
    pub text_muted: Color,
    pub dim: Color,
    pub accent: Color,
    pub border: Color,
    pub border_focused: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub error: Color,
    /// Bar colours for the category chart, reused in order.
    pub palette: [Color; 4],
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            surface: Color::Rgb(8, 12, 16),
            surface_bright: Color::Rgb(20, 26, 32),
            text: Color::Rgb(220, 220, 220),
            text_muted: Color::Rgb(160, 160, 160),
            dim: Color::Rgb(110, 110, 110),
            accent: Color::Rgb(80, 160, 160),
            border: Color::Rgb(60, 70, 80),
            border_focused: Color::Rgb(80, 160, 160),
            positive: Color::Rgb(90, 180, 110),
            negative: Color::Rgb(220, 110, 90),
            warning: Color::Rgb(220, 180, 80),
            error: Color::Rgb(200, 80, 80),
            palette: [
                Color::Rgb(0, 196, 159),
                Color::Rgb(255, 187, 40),
                Color::Rgb(255, 128, 66),
                Color::Rgb(0, 136, 254),
            ],
        }
    }
}

impl Theme {
    pub fn series(&self, index: usize) -> Color {
        self.palette[index % self.palette.len()]
    }
}
