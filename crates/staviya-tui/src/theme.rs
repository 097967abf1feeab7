use ratatui::style::Color;

/// Site palette
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub background: Color,
    pub surface: Color,

    // Foreground colors
    pub foreground: Color,
    pub muted: Color,

    // Accent colors
    pub primary: Color,
    pub secondary: Color,
    pub magenta: Color,

    // Semantic colors
    pub error: Color,
    pub success: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::Rgb(0x0a, 0x19, 0x2f),
            surface: Color::Rgb(0x1e, 0x2a, 0x3a),
            foreground: Color::Rgb(0xcc, 0xd6, 0xf6),
            muted: Color::Rgb(0x8b, 0x95, 0xb0),
            primary: Color::Rgb(0x64, 0xff, 0xda),
            secondary: Color::Rgb(0xff, 0xd7, 0x00),
            magenta: Color::Rgb(0xff, 0x00, 0xff),
            error: Color::Rgb(0xff, 0x6b, 0x6b),
            success: Color::Rgb(0x64, 0xff, 0xda),
        }
    }
}

impl Theme {
    /// Terminals have no alpha: blend `color` towards the page background
    pub fn fade(&self, color: Color, opacity: f64) -> Color {
        blend(self.background, color, opacity)
    }
}

/// Mix `to` over `from` by `t` in [0, 1]. Non-RGB colors switch at the midpoint.
pub fn blend(from: Color, to: Color, t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    match (from, to) {
        (Color::Rgb(r0, g0, b0), Color::Rgb(r1, g1, b1)) => {
            let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
            Color::Rgb(mix(r0, r1), mix(g0, g1), mix(b0, b1))
        }
        _ if t < 0.5 => from,
        _ => to,
    }
}
