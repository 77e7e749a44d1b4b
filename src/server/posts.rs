//! `/api/posts` — a static post listing with optional simulated latency,
//! plus a validated create operation.

use axum::Json;
use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{bad_request, non_empty_str, parse_delay, timestamp};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u32,
    pub title: String,
    pub content: String,
    pub author: String,
    pub created_at: String,
    pub tags: Vec<String>,
}

#[derive(Serialize)]
pub struct PostList {
    posts: Vec<Post>,
    total: usize,
    timestamp: String,
    delay: String,
}

#[derive(Serialize)]
pub struct CreatedPost {
    message: String,
    post: Post,
}

fn sample_posts() -> Vec<Post> {
    let post = |id, title: &str, content: &str, author: &str, created_at: &str, tags: &[&str]| Post {
        id,
        title: title.to_string(),
        content: content.to_string(),
        author: author.to_string(),
        created_at: created_at.to_string(),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
    };

    vec![
        post(
            1,
            "Rendering strategies compared",
            "Static generation, incremental regeneration, and server rendering each trade freshness for speed...",
            "Alice",
            "2024-01-15T10:00:00Z",
            &["rendering", "performance", "tutorial"],
        ),
        post(
            2,
            "Testing APIs from the terminal",
            "A request inspector only needs a method, a URL, and a little patience...",
            "Bob",
            "2024-01-14T15:30:00Z",
            &["http", "tooling"],
        ),
        post(
            3,
            "Mock endpoints that lie convincingly",
            "Good mock APIs validate their input and simulate latency on request...",
            "Carol",
            "2024-01-13T09:15:00Z",
            &["http", "testing", "mocking"],
        ),
    ]
}

#[derive(Deserialize)]
pub struct ListQuery {
    delay: Option<String>,
}

pub async fn list(Query(query): Query<ListQuery>) -> Json<PostList> {
    if let Some(duration) = parse_delay(query.delay.as_deref()) {
        tokio::time::sleep(duration).await;
    }

    let posts = sample_posts();
    // The requested delay is echoed back even when it was out of range and
    // therefore not honored.
    let delay = query
        .delay
        .as_deref()
        .map_or_else(|| "none".to_string(), |raw| format!("{raw}ms"));

    Json(PostList {
        total: posts.len(),
        posts,
        timestamp: timestamp(),
        delay,
    })
}

pub async fn create(body: String) -> Response {
    let Ok(input) = serde_json::from_str::<Value>(&body) else {
        return bad_request("Invalid JSON in request body").into_response();
    };

    let (Some(title), Some(content)) = (
        non_empty_str(&input, "title"),
        non_empty_str(&input, "content"),
    ) else {
        return bad_request("Title and content are required").into_response();
    };

    let post = Post {
        id: rand::rng().random_range(100..1100),
        title: title.to_string(),
        content: content.to_string(),
        author: non_empty_str(&input, "author").unwrap_or("Anonymous").to_string(),
        created_at: timestamp(),
        tags: input
            .get("tags")
            .and_then(Value::as_array)
            .map(|tags| {
                tags.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
    };

    (
        StatusCode::CREATED,
        Json(CreatedPost {
            message: "Post created successfully".to_string(),
            post,
        }),
    )
        .into_response()
}
