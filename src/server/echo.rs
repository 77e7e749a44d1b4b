//! `/api/test` — a request playground that greets, echoes JSON bodies back,
//! and reports what it saw (method, user agent, caller address).

use axum::Json;
use axum::extract::Query;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::{Value, json};

use super::{bad_request, client_ip, timestamp, user_agent};

#[derive(Deserialize)]
pub struct GreetQuery {
    name: Option<String>,
}

pub async fn greet(Query(query): Query<GreetQuery>, headers: HeaderMap) -> Json<Value> {
    let name = query.name.unwrap_or_else(|| "World".to_string());

    Json(json!({
        "message": format!("Hello, {name}!"),
        "timestamp": timestamp(),
        "method": "GET",
        "userAgent": user_agent(&headers),
        "ip": client_ip(&headers),
    }))
}

pub async fn receive(headers: HeaderMap, body: String) -> Response {
    let Ok(data) = serde_json::from_str::<Value>(&body) else {
        return bad_request("Invalid JSON in request body").into_response();
    };

    Json(json!({
        "message": "Data received successfully",
        "receivedData": data,
        "timestamp": timestamp(),
        "method": "POST",
        "userAgent": user_agent(&headers),
        "ip": client_ip(&headers),
    }))
    .into_response()
}

pub async fn update(headers: HeaderMap, body: String) -> Response {
    let Ok(data) = serde_json::from_str::<Value>(&body) else {
        return bad_request("Invalid JSON in request body").into_response();
    };

    Json(json!({
        "message": "Data updated successfully",
        "updatedData": data,
        "timestamp": timestamp(),
        "method": "PUT",
        "userAgent": user_agent(&headers),
        "ip": client_ip(&headers),
    }))
    .into_response()
}

#[derive(Deserialize)]
pub struct RemoveQuery {
    id: Option<String>,
}

pub async fn remove(Query(query): Query<RemoveQuery>, headers: HeaderMap) -> Json<Value> {
    let message = match query.id {
        Some(id) => format!("Resource with ID {id} deleted successfully"),
        None => "Resource deleted successfully".to_string(),
    };

    Json(json!({
        "message": message,
        "timestamp": timestamp(),
        "method": "DELETE",
        "userAgent": user_agent(&headers),
        "ip": client_ip(&headers),
    }))
}
