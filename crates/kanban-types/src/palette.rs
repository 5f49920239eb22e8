//! The fixed set of color tags a card may reference by id.
//!
//! Loaded once at startup and shared read-only afterwards. Ids are assigned
//! `1..=N` in configuration order and must fit in a card's 64-bit color mask.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Largest palette id a card's color mask can hold.
pub const MAX_COLOR_ID: u8 = 63;

/// Environment variable holding a comma-separated list of color names.
pub const PALETTE_ENV: &str = "KANBAN_PALETTE";

const DEFAULT_COLORS: [&str; 6] = ["green", "yellow", "orange", "red", "purple", "blue"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteEntry {
    pub id: u8,
    pub color: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaletteError {
    #[error("palette has no entries")]
    Empty,
    #[error("palette entry {index} is blank")]
    BlankEntry { index: usize },
    #[error("palette has {count} entries, at most {max} are supported", max = MAX_COLOR_ID)]
    TooLarge { count: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Palette {
    pub fn new<I, S>(colors: I) -> Result<Self, PaletteError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries = Vec::new();
        for (index, color) in colors.into_iter().enumerate() {
            let color = color.as_ref().trim();
            if color.is_empty() {
                return Err(PaletteError::BlankEntry { index });
            }
            if index >= MAX_COLOR_ID as usize {
                return Err(PaletteError::TooLarge { count: index + 1 });
            }
            entries.push(PaletteEntry {
                id: index as u8 + 1,
                color: color.to_string(),
            });
        }

        if entries.is_empty() {
            return Err(PaletteError::Empty);
        }
        Ok(Self { entries })
    }

    /// Parse a comma-separated palette, e.g. `"green,yellow,red"`.
    pub fn parse(spec: &str) -> Result<Self, PaletteError> {
        Self::new(spec.split(','))
    }

    /// Read `KANBAN_PALETTE`, falling back to the default palette when unset.
    pub fn from_env() -> Result<Self, PaletteError> {
        let palette = match std::env::var(PALETTE_ENV) {
            Ok(spec) => Self::parse(&spec)?,
            Err(_) => Self::default(),
        };
        info!("Color palette loaded with {} entries", palette.len());
        Ok(palette)
    }

    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn contains(&self, id: u8) -> bool {
        id >= 1 && (id as usize) <= self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            entries: DEFAULT_COLORS
                .iter()
                .enumerate()
                .map(|(i, color)| PaletteEntry {
                    id: i as u8 + 1,
                    color: color.to_string(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette_ids_are_sequential() {
        let palette = Palette::default();
        let ids: Vec<u8> = palette.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(palette.entries()[0].color, "green");
    }

    #[test]
    fn test_parse_trims_entries() {
        let palette = Palette::parse(" pink , teal").unwrap();
        assert_eq!(palette.len(), 2);
        assert_eq!(palette.entries()[1], PaletteEntry { id: 2, color: "teal".into() });
    }

    #[test]
    fn test_parse_rejects_blank_entry() {
        assert_eq!(Palette::parse("red,,blue"), Err(PaletteError::BlankEntry { index: 1 }));
        assert_eq!(Palette::parse(""), Err(PaletteError::BlankEntry { index: 0 }));
    }

    #[test]
    fn test_rejects_oversized_palette() {
        let colors: Vec<String> = (0..64).map(|i| format!("c{i}")).collect();
        assert_eq!(Palette::new(&colors), Err(PaletteError::TooLarge { count: 64 }));
        assert!(Palette::new(&colors[..63]).is_ok());
    }

    #[test]
    fn test_contains_bounds() {
        let palette = Palette::default();
        assert!(!palette.contains(0));
        assert!(palette.contains(1));
        assert!(palette.contains(6));
        assert!(!palette.contains(7));
    }
}
