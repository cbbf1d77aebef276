use ratatui::style::Color;
use ratatui::widgets::BorderType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSupport {
    Auto,
    Truecolor,
    Color256,
    Mono,
}

impl ColorSupport {
    pub fn from_config_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "truecolor" | "24bit" => ColorSupport::Truecolor,
            "256" | "256color" => ColorSupport::Color256,
            "mono" | "monochrome" => ColorSupport::Mono,
            _ => ColorSupport::Auto,
        }
    }
}

pub fn detect_color_support() -> ColorSupport {
    let colorterm = std::env::var("COLORTERM")
        .unwrap_or_default()
        .to_lowercase();
    if colorterm.contains("truecolor") || colorterm.contains("24bit") {
        return ColorSupport::Truecolor;
    }
    ColorSupport::Color256
}

pub fn resolve_color_support(config: &str) -> ColorSupport {
    let parsed = ColorSupport::from_config_str(config);
    if parsed == ColorSupport::Auto {
        detect_color_support()
    } else {
        parsed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderStyle {
    Rounded,
    Thin,
}

impl BorderStyle {
    pub fn from_config_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "thin" | "plain" => BorderStyle::Thin,
            _ => BorderStyle::Rounded,
        }
    }

    pub fn border_type(self) -> BorderType {
        match self {
            BorderStyle::Rounded => BorderType::Rounded,
            BorderStyle::Thin => BorderType::Plain,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    pub title_accent_bg: Color,
    pub title_accent_fg: Color,
    pub statusbar_bg: Color,
    pub block_border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub pill_key_bg: Color,
    pub pill_key_fg: Color,
    pub pill_desc_fg: Color,
    pub surface_bg: Color,
    pub gauge_filled: Color,
    pub gauge_unfilled: Color,
    pub gauge_busy: Color,
}

impl Theme {
    pub fn from_config(theme_name: &str, support: ColorSupport) -> Self {
        let mut theme = match theme_name.to_lowercase().as_str() {
            "light" => Self::light(),
            "colorblind" => Self::colorblind(),
            "mono" | "monochrome" => Self::mono(),
            _ => Self::dark(),
        };

        if support == ColorSupport::Mono {
            theme = Self::mono();
        }

        theme.apply_color_support(support);
        theme
    }

    /// Gauge fill color for a percentage; switches above 90%.
    pub fn gauge_color(&self, percent: f32) -> Color {
        if percent > 90.0 {
            self.gauge_busy
        } else {
            self.gauge_filled
        }
    }

    fn apply_color_support(&mut self, support: ColorSupport) {
        let map = |c: Color| adapt_color(c, support);

        self.title_accent_bg = map(self.title_accent_bg);
        self.title_accent_fg = map(self.title_accent_fg);
        self.statusbar_bg = map(self.statusbar_bg);
        self.block_border = map(self.block_border);
        self.text_primary = map(self.text_primary);
        self.text_secondary = map(self.text_secondary);
        self.pill_key_bg = map(self.pill_key_bg);
        self.pill_key_fg = map(self.pill_key_fg);
        self.pill_desc_fg = map(self.pill_desc_fg);
        self.surface_bg = map(self.surface_bg);
        self.gauge_filled = map(self.gauge_filled);
        self.gauge_unfilled = map(self.gauge_unfilled);
        self.gauge_busy = map(self.gauge_busy);
    }

    pub fn dark() -> Self {
        Theme {
            name: "dark",
            title_accent_bg: Color::Green,
            title_accent_fg: Color::Black,
            statusbar_bg: Color::DarkGray,
            block_border: Color::DarkGray,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            pill_key_bg: Color::Yellow,
            pill_key_fg: Color::Black,
            pill_desc_fg: Color::White,
            surface_bg: Color::DarkGray,
            gauge_filled: Color::Rgb(103, 232, 249),
            gauge_unfilled: Color::DarkGray,
            gauge_busy: Color::Rgb(239, 68, 68),
        }
    }

    pub fn light() -> Self {
        Theme {
            name: "light",
            title_accent_bg: Color::Blue,
            title_accent_fg: Color::White,
            statusbar_bg: Color::Rgb(220, 220, 220),
            block_border: Color::Rgb(150, 150, 150),
            text_primary: Color::Black,
            text_secondary: Color::DarkGray,
            pill_key_bg: Color::Blue,
            pill_key_fg: Color::White,
            pill_desc_fg: Color::Black,
            surface_bg: Color::Rgb(200, 200, 200),
            gauge_filled: Color::Rgb(70, 130, 180),
            gauge_unfilled: Color::Rgb(200, 200, 200),
            gauge_busy: Color::Rgb(200, 60, 60),
        }
    }

    pub fn colorblind() -> Self {
        Theme {
            name: "colorblind",
            title_accent_bg: Color::Rgb(0, 114, 178),
            title_accent_fg: Color::White,
            statusbar_bg: Color::DarkGray,
            block_border: Color::Rgb(86, 180, 233),
            text_primary: Color::White,
            text_secondary: Color::Gray,
            pill_key_bg: Color::Rgb(230, 159, 0),
            pill_key_fg: Color::Black,
            pill_desc_fg: Color::White,
            surface_bg: Color::DarkGray,
            gauge_filled: Color::Rgb(86, 180, 233),
            gauge_unfilled: Color::DarkGray,
            gauge_busy: Color::Rgb(213, 94, 0),
        }
    }

    pub fn mono() -> Self {
        Theme {
            name: "mono",
            title_accent_bg: Color::White,
            title_accent_fg: Color::Black,
            statusbar_bg: Color::Black,
            block_border: Color::White,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            pill_key_bg: Color::White,
            pill_key_fg: Color::Black,
            pill_desc_fg: Color::White,
            surface_bg: Color::Black,
            gauge_filled: Color::White,
            gauge_unfilled: Color::Black,
            gauge_busy: Color::White,
        }
    }
}

fn adapt_color(color: Color, support: ColorSupport) -> Color {
    match support {
        ColorSupport::Truecolor | ColorSupport::Auto => color,
        ColorSupport::Color256 => match color {
            Color::Rgb(r, g, b) => Color::Indexed(rgb_to_ansi256(r, g, b)),
            _ => color,
        },
        ColorSupport::Mono => match color {
            Color::Rgb(r, g, b) => {
                let luminance = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
                if luminance > 128.0 {
                    Color::White
                } else {
                    Color::Black
                }
            }
            Color::White | Color::Black | Color::Gray | Color::DarkGray => color,
            _ => Color::White,
        },
    }
}

fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    let r = (r as f32 / 255.0 * 5.0).round() as u8;
    let g = (g as f32 / 255.0 * 5.0).round() as u8;
    let b = (b as f32 / 255.0 * 5.0).round() as u8;
    16 + 36 * r + 6 * g + b
}
