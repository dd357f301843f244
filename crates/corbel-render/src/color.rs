/// A 24-bit colour as handed to drawing services.
///
/// ```
/// use corbel_render::Color;
///
/// let orange = Color::from_hex(0xFF8800);
/// assert_eq!(orange, Color::rgb(0xFF, 0x88, 0x00));
/// assert_eq!(orange.to_palette_word(), 0x0088FF00);
/// ```
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const RED: Color = Color::rgb(0xFF, 0x00, 0x00);
    pub const GREEN: Color = Color::rgb(0x00, 0xFF, 0x00);
    pub const BLUE: Color = Color::rgb(0x00, 0x00, 0xFF);
    /// Standard dialogue background.
    pub const LIGHT_GREY: Color = Color::grey(0xDD);
    pub const MID_GREY: Color = Color::grey(0x99);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn grey(level: u8) -> Self {
        Self::rgb(level, level, level)
    }

    /// From `0xRRGGBB`.
    pub const fn from_hex(hex: u32) -> Self {
        Self::rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// Palette word in `0xBBGGRR00` layout.
    pub const fn to_palette_word(self) -> u32 {
        ((self.b as u32) << 24) | ((self.g as u32) << 16) | ((self.r as u32) << 8)
    }
}
