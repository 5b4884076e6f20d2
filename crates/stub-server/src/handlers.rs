//! Route handlers for the stub service.
//!
//! # Routes
//!
//! - `GET /posts`, `GET /posts/` - all posts
//! - `GET /posts/{id}` - one post
//! - `GET /posts/{id}/comments` - comments of a post
//! - `GET /comments?postId={id}` - comments, optionally filtered
//! - `POST /posts`, `POST /posts/` - create (echoed, not stored)
//! - `PUT /posts/{id}` - replace (echoed, not stored)
//! - `PATCH /posts/{id}` - merge (echoed, not stored)
//! - `DELETE /posts/{id}` - delete (always `{}`)

use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::db::{Db, Record};

/// Content type of every stub response.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Builds the stub router over a seed.
pub fn router(db: Db) -> Router {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/", get(list_posts).post(create_post))
        .route(
            "/posts/{id}",
            get(get_post)
                .put(replace_post)
                .patch(merge_post)
                .delete(delete_post),
        )
        .route("/posts/{id}/comments", get(post_comments))
        .route("/comments", get(list_comments))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(db))
}

#[derive(Debug, Deserialize)]
struct CommentsQuery {
    #[serde(rename = "postId")]
    post_id: Option<String>,
}

fn json(status: StatusCode, value: &Value) -> Response {
    match serde_json::to_string_pretty(value) {
        Ok(body) => (status, [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)], body).into_response(),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

fn empty_object(status: StatusCode) -> Response {
    json(status, &Value::Object(Map::new()))
}

fn records(items: impl IntoIterator<Item = Record>) -> Value {
    Value::Array(items.into_iter().map(Value::Object).collect())
}

/// Parses a request body as a JSON object; an empty body is an empty object.
fn parse_object(body: &Bytes) -> Result<Record, Response> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(empty_object(StatusCode::BAD_REQUEST)),
    }
}

async fn list_posts(State(db): State<Arc<Db>>) -> Response {
    json(StatusCode::OK, &records(db.posts().iter().cloned()))
}

async fn get_post(State(db): State<Arc<Db>>, Path(id): Path<String>) -> Response {
    match id.parse().ok().and_then(|id| db.post(id)) {
        Some(post) => json(StatusCode::OK, &Value::Object(post.clone())),
        None => empty_object(StatusCode::NOT_FOUND),
    }
}

async fn post_comments(State(db): State<Arc<Db>>, Path(id): Path<String>) -> Response {
    json(StatusCode::OK, &records(db.comments_for(&id).cloned()))
}

async fn list_comments(
    State(db): State<Arc<Db>>,
    Query(query): Query<CommentsQuery>,
) -> Response {
    let comments = match query.post_id.as_deref() {
        Some(post_id) => records(db.comments_for(post_id).cloned()),
        None => records(db.comments().iter().cloned()),
    };
    json(StatusCode::OK, &comments)
}

async fn create_post(State(db): State<Arc<Db>>, body: Bytes) -> Response {
    let mut post = match parse_object(&body) {
        Ok(post) => post,
        Err(rejection) => return rejection,
    };
    let id = db.next_post_id();
    post.insert("id".to_string(), Value::from(id));
    debug!(id, "post created");
    json(StatusCode::CREATED, &Value::Object(post))
}

async fn replace_post(
    State(db): State<Arc<Db>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Response {
    let Some(id) = id.parse::<u64>().ok().filter(|id| db.post(*id).is_some()) else {
        return empty_object(StatusCode::INTERNAL_SERVER_ERROR);
    };
    let mut post = match parse_object(&body) {
        Ok(post) => post,
        Err(rejection) => return rejection,
    };
    post.insert("id".to_string(), Value::from(id));
    debug!(id, "post replaced");
    json(StatusCode::OK, &Value::Object(post))
}

async fn merge_post(
    State(db): State<Arc<Db>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Response {
    let Some(stored) = id.parse().ok().and_then(|id| db.post(id)) else {
        return empty_object(StatusCode::NOT_FOUND);
    };
    let changes = match parse_object(&body) {
        Ok(changes) => changes,
        Err(rejection) => return rejection,
    };
    let mut post = stored.clone();
    for (key, value) in changes {
        if key != "id" {
            post.insert(key, value);
        }
    }
    debug!(id = %id, "post merged");
    json(StatusCode::OK, &Value::Object(post))
}

async fn delete_post(Path(id): Path<String>) -> Response {
    debug!(id = %id, "post deleted");
    empty_object(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request};
    use http_body_util::BodyExt;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tower::ServiceExt;

    fn seed() -> Db {
        Db::from_json_str(
            &json!({
                "posts": [
                    {"userId": 1, "id": 1, "title": "first", "body": "one"},
                    {"userId": 10, "id": 2, "title": "second", "body": "two"}
                ],
                "comments": [
                    {"postId": 1, "id": 1, "name": "a", "email": "a@x.io", "body": "c1"},
                    {"postId": 2, "id": 2, "name": "b", "email": "b@x.io", "body": "c2"}
                ]
            })
            .to_string(),
        )
        .unwrap()
    }

    async fn send(method: Method, uri: &str, body: Option<Value>) -> (StatusCode, String, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
            .unwrap();

        let response = router(seed()).oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap();
        (status, content_type, value)
    }

    #[tokio::test]
    async fn test_list_posts_with_and_without_slash() {
        let (status, content_type, body) = send(Method::GET, "/posts/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type, JSON_CONTENT_TYPE);
        assert_eq!(body.as_array().map(Vec::len), Some(2));

        let (status, _, _) = send(Method::GET, "/posts", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_post() {
        let (status, _, body) = send(Method::GET, "/posts/2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"userId": 10, "id": 2, "title": "second", "body": "two"}));
    }

    #[tokio::test]
    async fn test_get_missing_post() {
        let (status, _, body) = send(Method::GET, "/posts/404", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({}));

        let (status, _, _) = send(Method::GET, "/posts/abc", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_comments_by_path_and_query() {
        let (_, _, nested) = send(Method::GET, "/posts/1/comments", None).await;
        let (_, _, filtered) = send(Method::GET, "/comments?postId=1", None).await;
        assert_eq!(nested, filtered);
        assert_eq!(nested.as_array().map(Vec::len), Some(1));

        let (_, _, all) = send(Method::GET, "/comments", None).await;
        assert_eq!(all.as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn test_create_post() {
        let (status, _, body) = send(
            Method::POST,
            "/posts/",
            Some(json!({"userId": 1, "title": "t", "body": "b"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, json!({"userId": 1, "title": "t", "body": "b", "id": 3}));
    }

    #[tokio::test]
    async fn test_replace_post() {
        let (status, _, body) = send(
            Method::PUT,
            "/posts/1",
            Some(json!({"userId": 7, "title": "t", "body": "b"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"userId": 7, "title": "t", "body": "b", "id": 1}));

        let (status, _, _) = send(Method::PUT, "/posts/404", Some(json!({}))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_merge_post() {
        let (status, _, body) =
            send(Method::PATCH, "/posts/2", Some(json!({"title": "new"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"userId": 10, "id": 2, "title": "new", "body": "two"}));

        let (status, _, _) = send(Method::PATCH, "/posts/404", Some(json!({}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_post() {
        let (status, _, body) = send(Method::DELETE, "/posts/2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({}));
    }

    #[tokio::test]
    async fn test_writes_are_not_persisted() {
        let db = Arc::new(seed());
        let before = db.posts().to_vec();
        let _ = create_post(State(Arc::clone(&db)), Bytes::from_static(b"{\"title\":\"x\"}")).await;
        let _ = merge_post(
            State(Arc::clone(&db)),
            Path("1".to_string()),
            Bytes::from_static(b"{\"title\":\"x\"}"),
        )
        .await;
        assert_eq!(db.posts(), before.as_slice());
    }

    #[tokio::test]
    async fn test_malformed_body_rejected() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/posts")
            .body(Body::from("not json"))
            .unwrap();
        let response = router(seed()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
