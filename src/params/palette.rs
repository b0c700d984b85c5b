//! Fixed particle palette, one color per sample slot.

/// An sRGB color with a human-readable name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub name: &'static str,
    pub rgb: [u8; 3],
}

impl Color {
    pub const fn new(name: &'static str, rgb: [u8; 3]) -> Self {
        Self { name, rgb }
    }

    /// `#rrggbb` form, as used in SVG `fill` attributes
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.rgb[0], self.rgb[1], self.rgb[2])
    }

    /// Linear-light components for an sRGB render target
    pub fn to_linear(&self) -> [f32; 3] {
        self.rgb.map(srgb_to_linear)
    }
}

fn srgb_to_linear(channel: u8) -> f32 {
    let c = channel as f32 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Window background (neutral-900)
pub const BACKGROUND: Color = Color::new("neutral-900", [0x17, 0x17, 0x17]);

/// Slot colors, indexed by the sample slot that spawned the particle.
/// Ordered warm to cool around the hue wheel, all at the 700 shade.
pub const PALETTE: [Color; 16] = [
    Color::new("red-700", [0xb9, 0x1c, 0x1c]),
    Color::new("orange-700", [0xc2, 0x41, 0x0c]),
    Color::new("amber-700", [0xb4, 0x53, 0x09]),
    Color::new("yellow-700", [0xa1, 0x62, 0x07]),
    Color::new("lime-700", [0x4d, 0x7c, 0x0f]),
    Color::new("green-700", [0x15, 0x80, 0x3d]),
    Color::new("emerald-700", [0x04, 0x78, 0x57]),
    Color::new("teal-700", [0x0f, 0x76, 0x6e]),
    Color::new("cyan-700", [0x0e, 0x74, 0x90]),
    Color::new("light-blue-700", [0x03, 0x69, 0xa1]),
    Color::new("blue-700", [0x1d, 0x4e, 0xd8]),
    Color::new("indigo-700", [0x43, 0x38, 0xca]),
    Color::new("violet-700", [0x6d, 0x28, 0xd9]),
    Color::new("purple-700", [0x7e, 0x22, 0xce]),
    Color::new("fuchsia-700", [0xa2, 0x1c, 0xaf]),
    Color::new("pink-700", [0xbe, 0x18, 0x5d]),
];

/// Color for sample slot `index`; wraps for buffers wider than the palette
pub fn palette_color(index: usize) -> Color {
    PALETTE[index % PALETTE.len()]
}
