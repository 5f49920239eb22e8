use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    pub id: String,
    pub board_id: String,
    pub title: String,
}

/// A card as returned from `create`. `link` is the board-scoped path of the card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub text: String,
    pub link: String,
}

/// The aggregate view of a card: the card itself, the board it lives on,
/// and its live comments in creation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDetail {
    pub id: String,
    pub text: String,
    pub link: String,
    pub board_id: String,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub user: Author,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    pub username: String,
}

/// Result of a partial update: the id plus only the fields that were applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPatch {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Returned by soft-delete operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dropped {
    pub id: String,
}

/// One palette entry as seen from a particular card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorEntry {
    pub id: u8,
    pub color: String,
    pub active: bool,
}

/// The complete ordering of one list, first card first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOrder {
    pub id: String,
    pub cards: Vec<String>,
}

impl ListOrder {
    pub fn new(id: impl Into<String>, cards: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            id: id.into(),
            cards: cards.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_patch_omits_unapplied_fields() {
        let patch = CardPatch { id: "c1".into(), text: None };
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({ "id": "c1" }));

        let patch = CardPatch { id: "c1".into(), text: Some("New".into()) };
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({ "id": "c1", "text": "New" }));
    }

    #[test]
    fn test_move_request_uses_camel_case() {
        let req: crate::api::MoveCardsRequest = serde_json::from_value(json!({
            "sourceList": { "id": "1", "cards": ["1"] },
            "targetList": { "id": "2", "cards": ["3", "2"] },
        }))
        .unwrap();
        assert_eq!(req.source_list, ListOrder::new("1", ["1"]));
        assert_eq!(req.target_list.cards, vec!["3", "2"]);
    }

    #[test]
    fn test_update_request_ignores_unknown_fields() {
        let req: crate::api::UpdateCardRequest =
            serde_json::from_value(json!({ "text": "x", "colors": [1] })).unwrap();
        assert_eq!(req.text.as_deref(), Some("x"));
    }
}
