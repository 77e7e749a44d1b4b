//! `/api/users` — a static user directory with role/limit filters, plus a
//! validated create operation.

use axum::Json;
use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{bad_request, non_empty_str, timestamp};

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(Serialize)]
pub struct UserList {
    users: Vec<User>,
    total: usize,
    timestamp: String,
    filters: Filters,
}

#[derive(Serialize)]
pub struct Filters {
    role: Option<String>,
    limit: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    id: u32,
    name: String,
    email: String,
    role: String,
    created_at: String,
}

#[derive(Serialize)]
pub struct CreatedUser {
    message: String,
    user: NewUser,
}

fn sample_users() -> Vec<User> {
    let user = |id, name: &str, email: &str, role: &str| User {
        id,
        name: name.to_string(),
        email: email.to_string(),
        role: role.to_string(),
    };

    vec![
        user(1, "Alice", "alice@example.com", "admin"),
        user(2, "Bob", "bob@example.com", "user"),
        user(3, "Carol", "carol@example.com", "user"),
        user(4, "Dave", "dave@example.com", "moderator"),
    ]
}

#[derive(Deserialize)]
pub struct ListQuery {
    role: Option<String>,
    limit: Option<String>,
}

pub async fn list(Query(query): Query<ListQuery>) -> Json<UserList> {
    let mut users = sample_users();

    if let Some(role) = &query.role {
        users.retain(|user| &user.role == role);
    }

    // A limit that does not parse as a number is silently ignored.
    if let Some(limit) = query.limit.as_deref().and_then(|raw| raw.parse::<usize>().ok()) {
        users.truncate(limit);
    }

    Json(UserList {
        total: users.len(),
        users,
        timestamp: timestamp(),
        filters: Filters {
            role: query.role,
            limit: query.limit,
        },
    })
}

pub async fn create(body: String) -> Response {
    let Ok(input) = serde_json::from_str::<Value>(&body) else {
        return bad_request("Invalid JSON in request body").into_response();
    };

    let (Some(name), Some(email)) = (
        non_empty_str(&input, "name"),
        non_empty_str(&input, "email"),
    ) else {
        return bad_request("Name and email are required").into_response();
    };

    let user = NewUser {
        id: rand::rng().random_range(100..1100),
        name: name.to_string(),
        email: email.to_string(),
        role: non_empty_str(&input, "role").unwrap_or("user").to_string(),
        created_at: timestamp(),
    };

    (
        StatusCode::CREATED,
        Json(CreatedUser {
            message: "User created successfully".to_string(),
            user,
        }),
    )
        .into_response()
}
