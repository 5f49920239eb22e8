//! Per-card color tags.
//!
//! A card stores only the palette ids it has chosen, packed into the single
//! `cards.colors` INTEGER column: bit `n` set means palette id `n` is active.
//! The palette itself is expanded against that mask only when read.

use kanban_types::models::ColorEntry;
use kanban_types::palette::MAX_COLOR_ID;
use kanban_types::{Palette, ValidationErrors};
use rusqlite::params;
use tracing::debug;

use crate::error::{DbError, Result};
use crate::filter;
use crate::Database;

/// Set of palette ids, one bit per id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorSet(u64);

impl ColorSet {
    pub fn new() -> Self {
        Self(0)
    }

    /// Reinterpret a stored column value.
    pub fn from_bits(bits: i64) -> Self {
        Self(bits as u64)
    }

    pub fn bits(self) -> i64 {
        self.0 as i64
    }

    /// Mask with only `id` set, or None if the id cannot be encoded.
    fn mask(id: u8) -> Option<u64> {
        (id <= MAX_COLOR_ID).then(|| 1u64 << id)
    }

    /// Add a color. Returns true if it was newly added.
    pub fn insert(&mut self, id: u8) -> bool {
        let Some(mask) = Self::mask(id) else {
            return false;
        };
        if self.0 & mask != 0 {
            return false;
        }
        self.0 |= mask;
        true
    }

    /// Remove a color. Returns true if it was present.
    pub fn remove(&mut self, id: u8) -> bool {
        let Some(mask) = Self::mask(id) else {
            return false;
        };
        let present = self.0 & mask != 0;
        self.0 &= !mask;
        present
    }

    pub fn contains(self, id: u8) -> bool {
        Self::mask(id).is_some_and(|mask| self.0 & mask != 0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Ids in ascending order.
    pub fn iter(self) -> impl Iterator<Item = u8> {
        (0..=MAX_COLOR_ID).filter(move |&id| self.contains(id))
    }

    /// Every palette entry, marked active when this set holds its id.
    pub fn expand(self, palette: &Palette) -> Vec<ColorEntry> {
        palette
            .entries()
            .iter()
            .map(|entry| ColorEntry {
                id: entry.id,
                color: entry.color.clone(),
                active: self.contains(entry.id),
            })
            .collect()
    }
}

impl FromIterator<u8> for ColorSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = Self::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

fn encodable(color_id: u8) -> Result<u64> {
    ColorSet::mask(color_id).ok_or_else(|| {
        let mut errors = ValidationErrors::new();
        errors.push("color", format!("{color_id} exceeds the largest storable id {MAX_COLOR_ID}"));
        DbError::Validation(errors)
    })
}

impl Database {
    pub fn get_colors(&self, card_id: &str) -> Result<Vec<ColorEntry>> {
        let card = self.with_conn(|conn| filter::live_card(conn, card_id))?;
        Ok(ColorSet::from_bits(card.colors).expand(self.palette()))
    }

    /// Idempotent: adding a present color leaves the set unchanged.
    /// Palette membership of `color_id` is the caller's concern.
    pub fn add_color(&self, card_id: &str, color_id: u8) -> Result<()> {
        let mask = encodable(color_id)?;
        self.with_conn(|conn| {
            let affected = conn.execute(
                "UPDATE cards SET colors = colors | ?2 WHERE id = ?1 AND deleted IS NULL",
                params![card_id, mask as i64],
            )?;
            if affected == 0 {
                return Err(DbError::not_found("card", card_id));
            }
            debug!("Added color {} to card {}", color_id, card_id);
            Ok(())
        })
    }

    /// Idempotent: removing an absent color is a no-op.
    pub fn remove_color(&self, card_id: &str, color_id: u8) -> Result<()> {
        let mask = encodable(color_id)?;
        self.with_conn(|conn| {
            let affected = conn.execute(
                "UPDATE cards SET colors = colors & ~?2 WHERE id = ?1 AND deleted IS NULL",
                params![card_id, mask as i64],
            )?;
            if affected == 0 {
                return Err(DbError::not_found("card", card_id));
            }
            debug!("Removed color {} from card {}", color_id, card_id);
            Ok(())
        })
    }
}
