use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;
use crate::{cards, colors, comments};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/lists/{list_id}/cards", get(cards::list_cards).post(cards::create_card))
        .route("/cards/move", post(cards::move_cards))
        .route(
            "/cards/{card_id}",
            get(cards::get_card).patch(cards::update_card).delete(cards::drop_card),
        )
        .route("/cards/{card_id}/colors", get(colors::get_colors))
        .route(
            "/cards/{card_id}/colors/{color_id}",
            put(colors::add_color).delete(colors::remove_color),
        )
        .route("/cards/{card_id}/comments", post(comments::create_comment))
        .route("/comments/{comment_id}", delete(comments::drop_comment))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use kanban_db::Database;
    use kanban_types::Palette;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::state::AppStateInner;

    struct Harness {
        state: AppState,
        board_id: String,
        list_id: String,
        other_id: String,
        user_id: String,
    }

    fn harness() -> Harness {
        let db = Database::open_in_memory(Arc::new(Palette::default())).unwrap();
        let board = db.create_board("Sprint").unwrap();
        let list = db.create_list(&board.id, "Todo").unwrap();
        let other = db.create_list(&board.id, "Doing").unwrap();
        let user = db.create_user("lin").unwrap();
        Harness {
            state: Arc::new(AppStateInner { db }),
            board_id: board.id,
            list_id: list.id,
            other_id: other.id,
            user_id: user.id,
        }
    }

    async fn send(h: &Harness, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = router(h.state.clone())
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn create(h: &Harness, list_id: &str, text: &str) -> String {
        let (status, body) = send(
            h,
            "POST",
            &format!("/lists/{list_id}/cards"),
            Some(json!({ "text": text })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_card_lifecycle() {
        let h = harness();
        let id = create(&h, &h.list_id, "Write tests").await;

        let (status, body) = send(&h, "PATCH", &format!("/cards/{id}"), Some(json!({ "text": "Tests written" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "id": id, "text": "Tests written" }));

        let (status, body) = send(&h, "GET", &format!("/cards/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["text"], "Tests written");
        assert_eq!(body["comments"], json!([]));

        let (status, body) = send(&h, "DELETE", &format!("/cards/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "id": id }));

        let (status, body) = send(&h, "GET", &format!("/cards/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn test_create_validation_error_lists_fields() {
        let h = harness();
        let (status, body) = send(
            &h,
            "POST",
            &format!("/lists/{}/cards", h.list_id),
            Some(json!({ "text": "" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["fields"][0]["field"], "text");
    }

    #[tokio::test]
    async fn test_move_route() {
        let h = harness();
        let a = create(&h, &h.list_id, "A").await;
        let b = create(&h, &h.list_id, "B").await;
        let c = create(&h, &h.other_id, "C").await;

        let request = json!({
            "sourceList": { "id": h.list_id, "cards": [a] },
            "targetList": { "id": h.other_id, "cards": [c, b] },
        });
        let (status, body) = send(&h, "POST", "/cards/move", Some(request.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([request["sourceList"], request["targetList"]]));

        let (_, body) = send(&h, "GET", &format!("/lists/{}/cards", h.other_id), None).await;
        assert_eq!(body["cards"], json!([c, b]));
    }

    #[tokio::test]
    async fn test_move_of_card_from_another_list_is_unprocessable() {
        let h = harness();
        let third = h.state.db.create_list(&h.board_id, "Later").unwrap();
        let a = create(&h, &h.list_id, "A").await;
        let z = create(&h, &third.id, "Z").await;

        let request = json!({
            "sourceList": { "id": h.list_id, "cards": [a] },
            "targetList": { "id": h.other_id, "cards": [z] },
        });
        let (status, body) = send(&h, "POST", "/cards/move", Some(request)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["fields"][0]["field"], "cards");

        let (_, body) = send(&h, "GET", &format!("/lists/{}/cards", third.id), None).await;
        assert_eq!(body["cards"], json!([z]));
    }

    #[tokio::test]
    async fn test_color_routes() {
        let h = harness();
        let id = create(&h, &h.list_id, "Tagged").await;

        let (status, _) = send(&h, "PUT", &format!("/cards/{id}/colors/2"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&h, "PUT", &format!("/cards/{id}/colors/9"), None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (_, body) = send(&h, "GET", &format!("/cards/{id}/colors"), None).await;
        let entries = body.as_array().unwrap();
        assert_eq!(entries.len(), 6);
        assert_eq!(entries[1], json!({ "id": 2, "color": "yellow", "active": true }));

        let (status, _) = send(&h, "DELETE", &format!("/cards/{id}/colors/2"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (_, body) = send(&h, "GET", &format!("/cards/{id}/colors"), None).await;
        assert_eq!(body[1]["active"], false);
    }

    #[tokio::test]
    async fn test_comment_routes() {
        let h = harness();
        let id = create(&h, &h.list_id, "Discuss").await;

        let (status, body) = send(
            &h,
            "POST",
            &format!("/cards/{id}/comments"),
            Some(json!({ "user_id": h.user_id, "text": "Ship it" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["user"]["username"], "lin");
        let comment_id = body["id"].as_str().unwrap().to_string();

        let (_, body) = send(&h, "GET", &format!("/cards/{id}"), None).await;
        assert_eq!(body["comments"][0]["text"], "Ship it");

        let (status, _) = send(&h, "DELETE", &format!("/comments/{comment_id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        let (_, body) = send(&h, "GET", &format!("/cards/{id}"), None).await;
        assert_eq!(body["comments"], json!([]));
    }
}
