use crate::error::{Error, Result};
use rusttype::Font;
use std::path::Path;

/// A parsed TrueType/OpenType font.
#[derive(Clone)]
pub struct FontData {
    name: String,
    font: Font<'static>,
}

impl FontData {
    /// Parses font bytes; `name` only shows up in logs and errors.
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let name = name.into();
        let font = Font::try_from_vec(bytes).ok_or_else(|| Error::InvalidFont {
            path: name.clone().into(),
        })?;

        Ok(FontData { name, font })
    }

    /// Where the font came from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parsed font.
    pub fn font(&self) -> &Font<'static> {
        &self.font
    }
}

impl std::fmt::Debug for FontData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontData")
            .field("name", &self.name)
            .field("glyphs", &self.font.glyph_count())
            .finish()
    }
}

/// Reads and parses a font file.
pub fn load_font(path: impl AsRef<Path>) -> Result<FontData> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let font = FontData::from_bytes(path.display().to_string(), bytes)?;
    log::info!("loaded font {:?} ({} glyphs)", path, font.font.glyph_count());
    Ok(font)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_font_bytes() {
        let err = FontData::from_bytes("notes.txt", b"hello".to_vec()).unwrap_err();
        assert!(matches!(err, Error::InvalidFont { .. }));
    }

    #[test]
    fn missing_file_is_io() {
        let err = load_font("no/such/font.ttf").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
