use serde::{Deserialize, Serialize};

/// A fill or stroke colour, expressed in the RGB or grey colour spaces
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Colour {
    /// DeviceRGB colour; r, g, b, range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0.0 to 1.0
    pub const fn new_rgb(r: f32, g: f32, b: f32) -> Colour {
        Colour::RGB { r, g, b }
    }

    /// Create a new colour in the Gray space, g ranges from 0.0 to 1.0
    pub const fn new_grey(g: f32) -> Colour {
        Colour::Grey { g }
    }
}

/// The workbook colour scheme. Every template draws with these five colours only.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Cover background
    pub beige: Colour,
    /// Bands, banners, dividers and ruled lines
    pub pink: Colour,
    /// Subtitles and bullets
    pub dark_pink: Colour,
    /// Body text
    pub text: Colour,
    /// Secondary labels and footers
    pub light_text: Colour,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            beige: Colour::new_rgb(0.96, 0.93, 0.88),
            pink: Colour::new_rgb(0.95, 0.82, 0.86),
            dark_pink: Colour::new_rgb(0.85, 0.60, 0.70),
            text: Colour::new_rgb(0.2, 0.2, 0.2),
            light_text: Colour::new_rgb(0.4, 0.4, 0.4),
        }
    }
}
