/// Text rendering with the terminal's own font
use wireship_core::{Bitmap, Color, FontSpec, Texel, TextRenderer};

/// One cell per character on a single row.
///
/// The terminal decides the actual face and size, so the requested font is
/// only a hint. Spaces are transparent, which lets text overlap the scene
/// the way an alpha-blended glyph image would.
#[derive(Debug, Default, Clone, Copy)]
pub struct CellFont;

impl TextRenderer for CellFont {
    fn render_text(&self, text: &str, _font: &FontSpec, color: Color) -> Bitmap {
        let glyphs: Vec<char> = text.chars().filter(|c| !c.is_control()).collect();
        let mut bitmap = Bitmap::new(glyphs.len(), 1, color);
        for (x, glyph) in glyphs.into_iter().enumerate() {
            if glyph != ' ' {
                bitmap.set(x, 0, Texel::opaque(glyph));
            }
        }
        bitmap
    }
}
