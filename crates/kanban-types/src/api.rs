use serde::{Deserialize, Serialize};

use crate::models::ListOrder;

// -- Cards --

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CreateCardRequest {
    pub text: String,
}

/// Partial update. Unrecognized fields are ignored rather than rejected.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateCardRequest {
    #[serde(default)]
    pub text: Option<String>,
}

// -- Ordering --

/// Full-replace reorder: the final ordering of both lists involved in a move.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MoveCardsRequest {
    pub source_list: ListOrder,
    pub target_list: ListOrder,
}

// -- Comments --

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CreateCommentRequest {
    pub user_id: String,
    pub text: String,
}
