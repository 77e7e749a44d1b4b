use std::time::Duration;

/// A response body after content-type-driven decoding.
///
/// The decode is a two-step affair: check the declared content type, then
/// try-parse. A body that claims to be JSON but fails to parse silently
/// degrades to text rather than raising a second error.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(serde_json::Value),
    Text(String),
}

impl ResponseBody {
    pub fn decode(content_type: Option<&str>, text: String) -> Self {
        let declared_json = content_type
            .map(|ct| ct.to_ascii_lowercase().contains("application/json"))
            .unwrap_or(false);

        if declared_json {
            match serde_json::from_str(&text) {
                Ok(value) => ResponseBody::Json(value),
                Err(_) => ResponseBody::Text(text),
            }
        } else {
            ResponseBody::Text(text)
        }
    }

    /// Render for display: pretty-printed JSON for structured values, the
    /// raw string otherwise.
    pub fn display(&self) -> String {
        match self {
            ResponseBody::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            ResponseBody::Text(text) => text.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResponseData {
    pub status: u16,
    pub status_text: String,
    /// Response headers in iteration order, names lower-cased by the
    /// transport. Duplicates are kept as encountered.
    pub headers: Vec<(String, String)>,
    pub body: ResponseBody,
    pub elapsed: Duration,
    /// URL the response came from, after redirects.
    pub final_url: String,
    pub ok: bool,
    pub size_bytes: usize,
}

impl ResponseData {
    pub fn elapsed_ms(&self) -> u128 {
        self.elapsed.as_millis()
    }

    /// Elapsed time as "123ms" below a second, "1.2s" above
    pub fn elapsed_display(&self) -> String {
        let ms = self.elapsed_ms();
        if ms < 1000 {
            format!("{}ms", ms)
        } else {
            format!("{:.1}s", self.elapsed.as_secs_f64())
        }
    }

    /// Body size as "512 B" / "1.2 KB" / "3.4 MB"
    pub fn size_display(&self) -> String {
        let bytes = self.size_bytes;
        if bytes < 1024 {
            format!("{} B", bytes)
        } else if bytes < 1024 * 1024 {
            format!("{:.1} KB", bytes as f64 / 1024.0)
        } else {
            format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
        }
    }
}

#[derive(Debug, Clone)]
pub enum RequestState {
    /// Nothing sent yet
    Idle,
    /// A request is in flight; further sends are gated until it settles
    Loading,
    /// Request completed with a response, any status code included
    Success(ResponseData),
    /// Request failed before a response arrived
    Error(String),
}

impl Default for RequestState {
    fn default() -> Self {
        Self::Idle
    }
}
