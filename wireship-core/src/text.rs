/// Text-to-bitmap capability used by the overlay
use crate::render::Color;

/// Font request; backends pick the closest face they have
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    /// Nominal size in pixels
    pub size: f32,
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }
}

/// One cell of a bitmap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Texel {
    pub glyph: char,
    /// 0 is fully transparent, 255 fully opaque
    pub alpha: u8,
}

impl Texel {
    pub const TRANSPARENT: Texel = Texel { glyph: ' ', alpha: 0 };

    pub fn opaque(glyph: char) -> Self {
        Self { glyph, alpha: u8::MAX }
    }
}

/// A tinted grid of texels, stored row-major from the top row down
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    pub width: usize,
    pub height: usize,
    pub texels: Vec<Texel>,
    pub color: Color,
}

impl Bitmap {
    pub fn new(width: usize, height: usize, color: Color) -> Self {
        Self {
            width,
            height,
            texels: vec![Texel::TRANSPARENT; width * height],
            color,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Texel> {
        if x < self.width && y < self.height {
            self.texels.get(y * self.width + x).copied()
        } else {
            None
        }
    }

    pub fn set(&mut self, x: usize, y: usize, texel: Texel) {
        if x < self.width && y < self.height {
            self.texels[y * self.width + x] = texel;
        }
    }
}

/// Renders strings into bitmaps with an alpha channel
pub trait TextRenderer {
    fn render_text(&self, text: &str, font: &FontSpec, color: Color) -> Bitmap;
}
