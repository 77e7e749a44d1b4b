mod echo;
mod posts;
mod users;

use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::get;
use serde_json::{Value, json};
use tokio::net::TcpListener;

pub fn app() -> Router {
    Router::new()
        .route(
            "/api/test",
            get(echo::greet)
                .post(echo::receive)
                .put(echo::update)
                .delete(echo::remove),
        )
        .route("/api/posts", get(posts::list).post(posts::create))
        .route("/api/users", get(users::list).post(users::create))
}

/// Run the mock API on 127.0.0.1:`PORT` (default 3000) until interrupted.
/// Logging is initialized here and nowhere else, so the TUI mode never
/// writes to the terminal it is drawing on.
pub fn serve() -> anyhow::Result<()> {
    env_logger::init();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run())
}

async fn run() -> anyhow::Result<()> {
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    log::info!("mock API listening on http://{addr}");
    axum::serve(listener, app()).await?;
    Ok(())
}

fn timestamp() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_default()
}

fn user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

/// Client address as reported by `x-forwarded-for`, or the literal
/// "unknown". Always a string, never an absent field.
fn client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

/// Parse the `delay` query parameter. Only values in (0, 5000] milliseconds
/// are honored; non-numeric or out-of-range input is silently ignored.
fn parse_delay(raw: Option<&str>) -> Option<Duration> {
    let ms: u64 = raw?.parse().ok()?;
    if ms > 0 && ms <= 5000 {
        Some(Duration::from_millis(ms))
    } else {
        None
    }
}

/// A write field counts as present only when it is a non-empty JSON string.
fn non_empty_str<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}

fn bad_request(message: &str) -> (StatusCode, Json<Value>) {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{self, Request};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get_request(uri: &str) -> Request<String> {
        Request::builder().uri(uri).body(String::new()).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(body.to_string())
            .unwrap()
    }

    // --- helpers ---

    #[test]
    fn delay_honors_only_the_documented_range() {
        assert_eq!(parse_delay(None), None);
        assert_eq!(parse_delay(Some("abc")), None);
        assert_eq!(parse_delay(Some("0")), None);
        assert_eq!(parse_delay(Some("-5")), None);
        assert_eq!(parse_delay(Some("5001")), None);
        assert_eq!(parse_delay(Some("1")), Some(Duration::from_millis(1)));
        assert_eq!(parse_delay(Some("250")), Some(Duration::from_millis(250)));
        assert_eq!(parse_delay(Some("5000")), Some(Duration::from_millis(5000)));
    }

    #[test]
    fn write_fields_must_be_non_empty_strings() {
        let body = json!({"title": "x", "empty": "", "number": 3, "null": null});
        assert_eq!(non_empty_str(&body, "title"), Some("x"));
        assert_eq!(non_empty_str(&body, "empty"), None);
        assert_eq!(non_empty_str(&body, "number"), None);
        assert_eq!(non_empty_str(&body, "null"), None);
        assert_eq!(non_empty_str(&body, "missing"), None);
    }

    // --- /api/test ---

    #[tokio::test]
    async fn greet_defaults_to_world() {
        let resp = app().oneshot(get_request("/api/test")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert_eq!(body["message"], "Hello, World!");
        assert_eq!(body["method"], "GET");
    }

    #[tokio::test]
    async fn greet_uses_name_parameter() {
        let resp = app().oneshot(get_request("/api/test?name=Ada")).await.unwrap();
        let body = body_json(resp).await;
        assert_eq!(body["message"], "Hello, Ada!");
    }

    #[tokio::test]
    async fn greet_reports_unknown_ip_without_forwarding_header() {
        let resp = app().oneshot(get_request("/api/test")).await.unwrap();
        let body = body_json(resp).await;
        assert_eq!(body["ip"], "unknown");
        assert_eq!(body["userAgent"], Value::Null);
    }

    #[tokio::test]
    async fn greet_honors_x_forwarded_for() {
        let request = Request::builder()
            .uri("/api/test")
            .header("x-forwarded-for", "203.0.113.9")
            .header(http::header::USER_AGENT, "apiprobe/0.1.0")
            .body(String::new())
            .unwrap();

        let body = body_json(app().oneshot(request).await.unwrap()).await;
        assert_eq!(body["ip"], "203.0.113.9");
        assert_eq!(body["userAgent"], "apiprobe/0.1.0");
    }

    #[tokio::test]
    async fn echo_returns_received_data() {
        let resp = app()
            .oneshot(json_request("POST", "/api/test", r#"{"a":{"b":[1,2]}}"#))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert_eq!(body["message"], "Data received successfully");
        assert_eq!(body["receivedData"], json!({"a": {"b": [1, 2]}}));
        assert_eq!(body["method"], "POST");
    }

    #[tokio::test]
    async fn echo_rejects_malformed_json() {
        let resp = app()
            .oneshot(json_request("POST", "/api/test", "{broken"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["error"], "Invalid JSON in request body");
    }

    #[tokio::test]
    async fn update_returns_updated_data() {
        let resp = app()
            .oneshot(json_request("PUT", "/api/test", r#"{"k":"v"}"#))
            .await
            .unwrap();

        let body = body_json(resp).await;
        assert_eq!(body["message"], "Data updated successfully");
        assert_eq!(body["updatedData"], json!({"k": "v"}));
        assert_eq!(body["method"], "PUT");
    }

    #[tokio::test]
    async fn delete_mentions_the_id_when_given() {
        let request = Request::builder()
            .method("DELETE")
            .uri("/api/test?id=42")
            .body(String::new())
            .unwrap();

        let body = body_json(app().oneshot(request).await.unwrap()).await;
        assert_eq!(body["message"], "Resource with ID 42 deleted successfully");
    }

    // --- /api/posts ---

    #[tokio::test]
    async fn posts_list_returns_samples() {
        let resp = app().oneshot(get_request("/api/posts")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let content_type = resp.headers()[http::header::CONTENT_TYPE].to_str().unwrap();
        assert_eq!(content_type, "application/json");

        let body = body_json(resp).await;
        assert_eq!(body["total"], 3);
        assert_eq!(body["posts"].as_array().unwrap().len(), 3);
        assert_eq!(body["delay"], "none");
    }

    #[tokio::test]
    async fn posts_list_reports_requested_delay() {
        let resp = app().oneshot(get_request("/api/posts?delay=100")).await.unwrap();
        assert_eq!(body_json(resp).await["delay"], "100ms");
    }

    #[tokio::test]
    async fn create_post_requires_title_and_content() {
        for body in [r#"{"content":"x"}"#, r#"{"title":"","content":"x"}"#, "{}"] {
            let resp = app()
                .oneshot(json_request("POST", "/api/posts", body))
                .await
                .unwrap();
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            assert_eq!(
                body_json(resp).await["error"],
                "Title and content are required"
            );
        }
    }

    #[tokio::test]
    async fn create_post_returns_201_with_assigned_id() {
        let resp = app()
            .oneshot(json_request(
                "POST",
                "/api/posts",
                r#"{"title":"Hello","content":"Body text","tags":["one"]}"#,
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body = body_json(resp).await;
        assert_eq!(body["message"], "Post created successfully");
        assert_eq!(body["post"]["title"], "Hello");
        assert_eq!(body["post"]["author"], "Anonymous");
        assert_eq!(body["post"]["tags"], json!(["one"]));

        let id = body["post"]["id"].as_u64().unwrap();
        assert!((100..1100).contains(&id), "id out of range: {id}");
        assert!(body["post"]["createdAt"].is_string());
    }

    #[tokio::test]
    async fn create_post_rejects_malformed_json() {
        let resp = app()
            .oneshot(json_request("POST", "/api/posts", "not json"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["error"], "Invalid JSON in request body");
    }

    // --- /api/users ---

    #[tokio::test]
    async fn users_list_returns_everyone() {
        let body = body_json(app().oneshot(get_request("/api/users")).await.unwrap()).await;
        assert_eq!(body["total"], 4);
        assert_eq!(body["filters"], json!({"role": null, "limit": null}));
    }

    #[tokio::test]
    async fn users_list_filters_by_role() {
        let body =
            body_json(app().oneshot(get_request("/api/users?role=admin")).await.unwrap()).await;
        assert_eq!(body["total"], 1);
        assert_eq!(body["users"][0]["role"], "admin");
    }

    #[tokio::test]
    async fn users_list_applies_limit() {
        let body =
            body_json(app().oneshot(get_request("/api/users?limit=2")).await.unwrap()).await;
        assert_eq!(body["total"], 2);
    }

    #[tokio::test]
    async fn users_list_ignores_non_numeric_limit() {
        let body =
            body_json(app().oneshot(get_request("/api/users?limit=abc")).await.unwrap()).await;
        assert_eq!(body["total"], 4);
    }

    #[tokio::test]
    async fn create_user_requires_name_and_email() {
        let resp = app()
            .oneshot(json_request("POST", "/api/users", r#"{"name":"Ada"}"#))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["error"], "Name and email are required");
    }

    #[tokio::test]
    async fn create_user_defaults_role() {
        let resp = app()
            .oneshot(json_request(
                "POST",
                "/api/users",
                r#"{"name":"Ada","email":"ada@example.com"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body = body_json(resp).await;
        assert_eq!(body["message"], "User created successfully");
        assert_eq!(body["user"]["role"], "user");
        assert_eq!(body["user"]["email"], "ada@example.com");
        assert!(body["user"]["id"].is_u64());
    }
}
