//! Input shape checks, run before any storage call.
//!
//! Every check collects all of its field errors instead of stopping at the
//! first one, so callers can report them together.

use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

use crate::api::{CreateCardRequest, CreateCommentRequest, UpdateCardRequest};
use crate::models::ListOrder;
use crate::palette::Palette;

/// Longest card or comment text accepted, in characters.
pub const MAX_TEXT_LEN: usize = 2048;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[error("invalid input: {}", summary(.errors))]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

fn summary(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{} {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

fn check_text(errors: &mut ValidationErrors, field: &str, text: &str) {
    if text.trim().is_empty() {
        errors.push(field, "must not be empty");
    } else if text.chars().count() > MAX_TEXT_LEN {
        errors.push(field, format!("must be at most {MAX_TEXT_LEN} characters"));
    }
}

pub fn create_card(req: &CreateCardRequest) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check_text(&mut errors, "text", &req.text);
    errors.into_result()
}

pub fn update_card(req: &UpdateCardRequest) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if let Some(text) = &req.text {
        check_text(&mut errors, "text", text);
    }
    errors.into_result()
}

pub fn create_comment(req: &CreateCommentRequest) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if req.user_id.trim().is_empty() {
        errors.push("user_id", "must not be empty");
    }
    check_text(&mut errors, "text", &req.text);
    errors.into_result()
}

/// Color ids are checked against the palette here, not in storage.
pub fn color_id(palette: &Palette, id: u8) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if !palette.contains(id) {
        errors.push("color", format!("{id} is not a palette id (1..={})", palette.len()));
    }
    errors.into_result()
}

/// A move must name every card at most once across the lists it rewrites.
pub fn move_cards(source: &ListOrder, target: &ListOrder) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if source.id.trim().is_empty() {
        errors.push("sourceList.id", "must not be empty");
    }
    if target.id.trim().is_empty() {
        errors.push("targetList.id", "must not be empty");
    }

    let source_ids = check_unique(&mut errors, "sourceList.cards", &source.cards);
    check_unique(&mut errors, "targetList.cards", &target.cards);

    if source.id != target.id {
        for id in &target.cards {
            if source_ids.contains(id.as_str()) {
                errors.push("targetList.cards", format!("card {id} is also in the source list"));
            }
        }
    }

    errors.into_result()
}

fn check_unique<'a>(
    errors: &mut ValidationErrors,
    field: &str,
    cards: &'a [String],
) -> HashSet<&'a str> {
    let mut seen = HashSet::with_capacity(cards.len());
    for id in cards {
        if !seen.insert(id.as_str()) {
            errors.push(field, format!("card {id} appears more than once"));
        }
    }
    seen
}
