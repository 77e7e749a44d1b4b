#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }

    /// Whether a request body may be attached. GET and HEAD never carry one.
    pub fn allows_body(&self) -> bool {
        !matches!(self, HttpMethod::Get | HttpMethod::Head)
    }

    pub fn next(self) -> Self {
        match self {
            HttpMethod::Get => HttpMethod::Post,
            HttpMethod::Post => HttpMethod::Put,
            HttpMethod::Put => HttpMethod::Patch,
            HttpMethod::Patch => HttpMethod::Delete,
            HttpMethod::Delete => HttpMethod::Head,
            HttpMethod::Head => HttpMethod::Options,
            HttpMethod::Options => HttpMethod::Get,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            HttpMethod::Get => HttpMethod::Options,
            HttpMethod::Post => HttpMethod::Get,
            HttpMethod::Put => HttpMethod::Post,
            HttpMethod::Patch => HttpMethod::Put,
            HttpMethod::Delete => HttpMethod::Patch,
            HttpMethod::Head => HttpMethod::Delete,
            HttpMethod::Options => HttpMethod::Head,
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Head => reqwest::Method::HEAD,
            HttpMethod::Options => reqwest::Method::OPTIONS,
        }
    }
}

/// One editable header row. Rows with an empty key or value stay in the form
/// but are excluded from the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderField {
    pub key: String,
    pub value: String,
}

impl HeaderField {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Everything needed to issue one request, captured from the form at the
/// moment of sending. Not persisted anywhere.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<HeaderField>,
    pub body: String,
}

impl RequestSpec {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: vec![],
            body: String::new(),
        }
    }

    /// The headers that actually go on the wire: rows with an empty key or
    /// value are skipped, and a later row with an already-seen key replaces
    /// the earlier value (first-seen order is kept).
    pub fn effective_headers(&self) -> Vec<(String, String)> {
        let mut headers: Vec<(String, String)> = Vec::new();

        for field in &self.headers {
            if field.key.is_empty() || field.value.is_empty() {
                continue;
            }

            match headers.iter_mut().find(|(key, _)| *key == field.key) {
                Some((_, value)) => *value = field.value.clone(),
                None => headers.push((field.key.clone(), field.value.clone())),
            }
        }

        headers
    }

    /// The body that actually goes on the wire, unmodified. `None` for
    /// GET/HEAD and for an empty body string; never an empty payload.
    pub fn body_payload(&self) -> Option<String> {
        if self.method.allows_body() && !self.body.is_empty() {
            Some(self.body.clone())
        } else {
            None
        }
    }
}

impl Default for RequestSpec {
    fn default() -> Self {
        Self::new(HttpMethod::Get, "")
    }
}
