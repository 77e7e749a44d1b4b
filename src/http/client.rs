use std::time::Instant;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tokio::sync::mpsc;

use crate::models::{RequestSpec, ResponseBody, ResponseData};

#[derive(Debug)]
pub enum HttpResult {
    Success(ResponseData),
    Error(String),
}

/// Run one request to completion and hand the outcome back over `tx`.
/// The receiving side is the event loop, which polls between redraws.
pub async fn send_request(spec: RequestSpec, tx: mpsc::UnboundedSender<HttpResult>) {
    let result = execute_request(spec).await;
    let _ = tx.send(result);
}

async fn execute_request(spec: RequestSpec) -> HttpResult {
    if spec.url.is_empty() {
        return HttpResult::Error("URL required".to_string());
    }

    let client = match super::build_client() {
        Ok(c) => c,
        Err(e) => return HttpResult::Error(format!("Failed to create client: {}", e)),
    };

    let url = match reqwest::Url::parse(&spec.url) {
        Ok(u) => u,
        Err(e) => return HttpResult::Error(format!("Invalid URL: {}", e)),
    };

    let header_map = match build_header_map(&spec) {
        Ok(h) => h,
        Err(e) => return HttpResult::Error(e),
    };

    let mut request = client
        .request(spec.method.into(), url)
        .headers(header_map);

    if let Some(body) = spec.body_payload() {
        request = request.body(body);
    }

    // The clock covers only the network call, not request assembly or
    // body decoding.
    let start = Instant::now();

    let response = match request.send().await {
        Ok(r) => r,
        Err(e) => {
            let error_msg = if e.is_timeout() {
                "Request timed out".to_string()
            } else if e.is_connect() {
                format!("Connection failed: {}", e)
            } else if e.is_request() {
                format!("Invalid request: {}", e)
            } else {
                format!("Request failed: {}", e)
            };
            return HttpResult::Error(error_msg);
        }
    };

    let elapsed = start.elapsed();

    let status = response.status().as_u16();
    let ok = response.status().is_success();
    let status_text = response
        .status()
        .canonical_reason()
        .unwrap_or("Unknown")
        .to_string();
    let final_url = response.url().to_string();

    let headers: Vec<(String, String)> = response
        .headers()
        .iter()
        .map(|(k, v)| {
            (
                k.as_str().to_string(),
                v.to_str().unwrap_or("<binary>").to_string(),
            )
        })
        .collect();

    let content_type = headers
        .iter()
        .find(|(name, _)| name == "content-type")
        .map(|(_, value)| value.clone());

    let text = match response.text().await {
        Ok(text) => text,
        Err(e) => return HttpResult::Error(format!("Failed to read response body: {}", e)),
    };

    let size_bytes = text.len();
    let body = ResponseBody::decode(content_type.as_deref(), text);

    HttpResult::Success(ResponseData {
        status,
        status_text,
        headers,
        body,
        elapsed,
        final_url,
        ok,
        size_bytes,
    })
}

fn build_header_map(spec: &RequestSpec) -> Result<HeaderMap, String> {
    let mut map = HeaderMap::new();

    for (key, value) in spec.effective_headers() {
        let name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|e| format!("Invalid header name `{}`: {}", key, e))?;
        let value = HeaderValue::from_str(&value)
            .map_err(|e| format!("Invalid header value for `{}`: {}", key, e))?;
        map.insert(name, value);
    }

    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HeaderField, HttpMethod};
    use serde_json::json;

    async fn spawn_mock_api() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, crate::server::app()).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn json_spec(method: HttpMethod, url: String, body: &str) -> RequestSpec {
        RequestSpec {
            method,
            url,
            headers: vec![HeaderField::new("Content-Type", "application/json")],
            body: body.to_string(),
        }
    }

    fn expect_response(result: HttpResult) -> ResponseData {
        match result {
            HttpResult::Success(resp) => resp,
            HttpResult::Error(e) => panic!("request failed: {e}"),
        }
    }

    fn expect_json(resp: &ResponseData) -> &serde_json::Value {
        match &resp.body {
            ResponseBody::Json(value) => value,
            ResponseBody::Text(text) => panic!("expected parsed JSON, got text: {text}"),
        }
    }

    #[tokio::test]
    async fn empty_url_fails_without_any_network_call() {
        let result = execute_request(RequestSpec::default()).await;
        match result {
            HttpResult::Error(msg) => assert_eq!(msg, "URL required"),
            HttpResult::Success(_) => panic!("empty URL must not produce a response"),
        }
    }

    #[tokio::test]
    async fn malformed_url_is_a_transport_error() {
        let spec = RequestSpec::new(HttpMethod::Get, "not a url");
        match execute_request(spec).await {
            HttpResult::Error(msg) => assert!(msg.starts_with("Invalid URL:"), "{msg}"),
            HttpResult::Success(_) => panic!("malformed URL must not produce a response"),
        }
    }

    #[tokio::test]
    async fn invalid_header_name_is_reported() {
        let mut spec = RequestSpec::new(HttpMethod::Get, "http://example.com");
        spec.headers.push(HeaderField::new("bad header", "x"));
        match execute_request(spec).await {
            HttpResult::Error(msg) => assert!(msg.contains("Invalid header name"), "{msg}"),
            HttpResult::Success(_) => panic!("invalid header must not be sent"),
        }
    }

    #[tokio::test]
    async fn connection_refused_is_a_transport_error() {
        // Bind to grab a free port, then drop the listener before connecting.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let spec = RequestSpec::new(HttpMethod::Get, format!("http://{}", addr));
        assert!(matches!(execute_request(spec).await, HttpResult::Error(_)));
    }

    #[tokio::test]
    async fn get_test_endpoint_yields_parsed_json() {
        let base = spawn_mock_api().await;
        let spec = RequestSpec::new(HttpMethod::Get, format!("{base}/api/test?name=Ada"));

        let resp = expect_response(execute_request(spec).await);
        assert_eq!(resp.status, 200);
        assert!(resp.ok);
        assert_eq!(expect_json(&resp)["message"], "Hello, Ada!");
    }

    #[tokio::test]
    async fn json_body_round_trips_through_echo() {
        let base = spawn_mock_api().await;
        let payload = json!({"title": "foo", "nested": {"count": 3, "tags": ["a", "b"]}});
        let spec = json_spec(
            HttpMethod::Post,
            format!("{base}/api/test"),
            &payload.to_string(),
        );

        let resp = expect_response(execute_request(spec).await);
        assert_eq!(resp.status, 200);
        assert_eq!(expect_json(&resp)["receivedData"], payload);
    }

    #[tokio::test]
    async fn rejected_write_is_a_response_not_an_error() {
        let base = spawn_mock_api().await;
        let spec = json_spec(
            HttpMethod::Post,
            format!("{base}/api/posts"),
            r#"{"title":"","content":"x"}"#,
        );

        let resp = expect_response(execute_request(spec).await);
        assert_eq!(resp.status, 400);
        assert!(!resp.ok);
        assert_eq!(
            expect_json(&resp)["error"],
            "Title and content are required"
        );
    }

    #[tokio::test]
    async fn over_cap_delay_is_ignored() {
        let base = spawn_mock_api().await;
        let spec = RequestSpec::new(HttpMethod::Get, format!("{base}/api/posts?delay=6000"));

        let resp = expect_response(execute_request(spec).await);
        assert_eq!(resp.status, 200);
        assert!(resp.elapsed_ms() < 5000, "delay above the cap must not be honored");
        assert_eq!(expect_json(&resp)["delay"], "6000ms");
    }

    #[tokio::test]
    async fn missing_route_is_a_normal_404() {
        let base = spawn_mock_api().await;
        let spec = RequestSpec::new(HttpMethod::Get, format!("{base}/api/nope"));

        let resp = expect_response(execute_request(spec).await);
        assert_eq!(resp.status, 404);
        assert!(!resp.ok);
    }

    #[tokio::test]
    async fn identical_specs_yield_identical_results() {
        let base = spawn_mock_api().await;
        let spec = RequestSpec::new(HttpMethod::Get, format!("{base}/api/users?role=admin"));

        let first = expect_response(execute_request(spec.clone()).await);
        let second = expect_response(execute_request(spec).await);
        assert_eq!(first.status, second.status);
        assert_eq!(
            expect_json(&first)["users"],
            expect_json(&second)["users"]
        );
    }

    #[tokio::test]
    async fn response_headers_are_lower_cased_and_final_url_recorded() {
        let base = spawn_mock_api().await;
        let url = format!("{base}/api/users");
        let spec = RequestSpec::new(HttpMethod::Get, url.clone());

        let resp = expect_response(execute_request(spec).await);
        assert_eq!(resp.final_url, url);
        let content_type = resp
            .headers
            .iter()
            .find(|(name, _)| name == "content-type")
            .map(|(_, value)| value.as_str());
        assert_eq!(content_type, Some("application/json"));
    }
}
