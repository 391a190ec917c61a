//! Colour palettes for indexed LCW images
//!
//! Decoded LCW graphics are 8-bit colour indices. This module loads the
//! 256-entry palettes used to turn them into RGB from three common formats:
//! JASC-PAL text (`.pal`), Adobe Color Table (`.act`) and GIMP palettes
//! (`.gpl`).

use crate::{LcwError, Result};
use std::fs;
use std::path::Path;

/// Number of entries in a palette
pub const PALETTE_SIZE: usize = 256;

/// Largest number of bytes read from an ACT file
pub const ACT_FILE_SIZE: usize = PALETTE_SIZE * 3;

/// An RGB triplet
pub type Rgb = [u8; 3];

/// Supported palette file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteFormat {
    /// JASC-PAL text palette (`.pal`)
    JascPal,
    /// Adobe Color Table (`.act`)
    Act,
    /// GIMP palette (`.gpl`)
    Gpl,
}

impl PaletteFormat {
    /// Select a format from a file extension, ignoring case
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pal" => Ok(PaletteFormat::JascPal),
            "act" => Ok(PaletteFormat::Act),
            "gpl" => Ok(PaletteFormat::Gpl),
            other => Err(LcwError::UnsupportedPaletteFormat(format!(".{other}"))),
        }
    }

    /// Select a format from a path's extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| LcwError::UnsupportedPaletteFormat(path.display().to_string()))?;
        Self::from_extension(ext)
    }
}

/// A 256-entry RGB palette
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Build a palette, padding with black or dropping entries past 256
    pub fn from_colors<I: IntoIterator<Item = Rgb>>(colors: I) -> Self {
        let mut colors: Vec<Rgb> = colors.into_iter().take(PALETTE_SIZE).collect();
        colors.resize(PALETTE_SIZE, [0, 0, 0]);
        Self { colors }
    }

    /// Load a palette file, choosing the parser by extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = PaletteFormat::from_path(path)?;
        log::debug!("Loading {:?} palette from {}", format, path.display());

        match format {
            PaletteFormat::JascPal => Self::from_jasc(&fs::read_to_string(path)?),
            PaletteFormat::Act => Ok(Self::from_act(&fs::read(path)?)),
            PaletteFormat::Gpl => Self::from_gpl(&fs::read_to_string(path)?),
        }
    }

    /// Parse a JASC-PAL text palette
    pub fn from_jasc(text: &str) -> Result<Self> {
        let lines: Vec<&str> = text.lines().collect();
        if lines.len() < 3 || lines[0].trim() != "JASC-PAL" {
            return Err(LcwError::InvalidPalette(
                "Invalid JASC-PAL file format".to_string(),
            ));
        }

        let count: usize = lines[2].trim().parse().map_err(|_| {
            LcwError::InvalidPalette(format!("Invalid JASC-PAL colour count: {}", lines[2]))
        })?;

        let end = lines.len().min(3usize.saturating_add(count));
        let mut colors = Vec::with_capacity(end - 3);
        for line in &lines[3..end] {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 3 {
                continue;
            }
            colors.push(parse_rgb(&fields).ok_or_else(|| {
                LcwError::InvalidPalette(format!("Invalid JASC-PAL colour: {}", line.trim()))
            })?);
        }

        Ok(Self::from_colors(colors))
    }

    /// Parse an Adobe Color Table
    ///
    /// Only whole triplets within the first 768 bytes are used.
    pub fn from_act(data: &[u8]) -> Self {
        let data = &data[..data.len().min(ACT_FILE_SIZE)];
        Self::from_colors(data.chunks_exact(3).map(|c| [c[0], c[1], c[2]]))
    }

    /// Parse a GIMP palette
    ///
    /// Lines that do not start with three colour components are skipped.
    pub fn from_gpl(text: &str) -> Result<Self> {
        let mut lines = text.lines();
        if !lines
            .next()
            .is_some_and(|header| header.starts_with("GIMP Palette"))
        {
            return Err(LcwError::InvalidPalette(
                "Invalid GIMP Palette file format".to_string(),
            ));
        }

        let colors = lines
            .map(str::trim)
            .filter(|line| {
                !line.is_empty()
                    && !line.starts_with('#')
                    && !line.starts_with("Name:")
                    && !line.starts_with("Columns:")
            })
            .filter_map(|line| {
                let fields: Vec<&str> = line.split_whitespace().collect();
                if fields.len() < 3 {
                    return None;
                }
                parse_rgb(&fields)
            });

        Ok(Self::from_colors(colors))
    }

    /// All 256 entries
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Colour for a pixel index
    pub fn get(&self, index: u8) -> Rgb {
        self.colors[index as usize]
    }

    /// Flat `RGBRGB...` representation (768 bytes)
    pub fn to_bytes(&self) -> Vec<u8> {
        self.colors.iter().flatten().copied().collect()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_colors(std::iter::empty())
    }
}

fn parse_rgb(fields: &[&str]) -> Option<Rgb> {
    Some([
        fields[0].parse().ok()?,
        fields[1].parse().ok()?,
        fields[2].parse().ok()?,
    ])
}
