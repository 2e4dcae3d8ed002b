use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use std::sync::Arc;
use std::time::Duration;

pub const REFERER_HEADER: &str = "HTTP-Referer";
pub const TITLE_HEADER: &str = "X-Title";
pub const APP_REFERER: &str = "https://github.com/alexpolus/IngredientIQ";
pub const APP_TITLE: &str = "IngredientIQ";

/// Outbound send path used by the chat client.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: reqwest::Request) -> Result<reqwest::Response, reqwest::Error>;
}

/// Plain reqwest client, optionally with a request deadline.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: reqwest::Request) -> Result<reqwest::Response, reqwest::Error> {
        self.client.execute(request).await
    }
}

/// Adds the OpenRouter attribution headers to every request before handing it
/// to the wrapped transport.
pub struct AttributionTransport {
    inner: Arc<dyn Transport>,
}

impl AttributionTransport {
    /// Wraps `inner`, or a default [`HttpTransport`] when none is given.
    pub fn new(inner: Option<Arc<dyn Transport>>) -> Self {
        let inner = inner.unwrap_or_else(|| Arc::new(HttpTransport::default()));
        Self { inner }
    }

    /// Sets the JSON content type when absent and overwrites both attribution
    /// headers. Nothing else on the request is touched.
    pub fn decorate(request: &mut reqwest::Request) {
        Self::apply_headers(request.headers_mut());
    }

    fn apply_headers(headers: &mut HeaderMap) {
        if !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        headers.insert(REFERER_HEADER, HeaderValue::from_static(APP_REFERER));
        headers.insert(TITLE_HEADER, HeaderValue::from_static(APP_TITLE));
    }
}

#[async_trait::async_trait]
impl Transport for AttributionTransport {
    async fn send(&self, mut request: reqwest::Request) -> Result<reqwest::Response, reqwest::Error> {
        Self::decorate(&mut request);
        log::debug!("📤 {} {} ({} headers)", request.method(), request.url(), request.headers().len());
        self.inner.send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> reqwest::Request {
        reqwest::Client::new()
            .post("https://example.com/api/v1/chat/completions")
            .header("Authorization", "Bearer test_key")
            .header("X-Custom", "keep-me")
            .body("{\"model\":\"m\"}")
            .build()
            .unwrap()
    }

    #[test]
    fn test_decorate_adds_attribution_and_content_type() {
        let mut request = sample_request();
        AttributionTransport::decorate(&mut request);

        let headers = request.headers();
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert_eq!(headers[REFERER_HEADER], APP_REFERER);
        assert_eq!(headers[TITLE_HEADER], APP_TITLE);
        assert_eq!(headers["Authorization"], "Bearer test_key");
        assert_eq!(headers["X-Custom"], "keep-me");
    }

    #[test]
    fn test_decorate_keeps_existing_content_type() {
        let mut request = reqwest::Client::new()
            .post("https://example.com/")
            .header(CONTENT_TYPE, "application/json; charset=utf-8")
            .build()
            .unwrap();
        AttributionTransport::decorate(&mut request);

        assert_eq!(request.headers()[CONTENT_TYPE], "application/json; charset=utf-8");
        assert_eq!(request.headers().get_all(CONTENT_TYPE).iter().count(), 1);
    }

    #[test]
    fn test_decorate_leaves_method_url_and_body_alone() {
        let mut request = sample_request();
        AttributionTransport::decorate(&mut request);

        assert_eq!(request.method(), reqwest::Method::POST);
        assert_eq!(request.url().as_str(), "https://example.com/api/v1/chat/completions");
        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        assert_eq!(body, b"{\"model\":\"m\"}");
    }

    #[test]
    fn test_decorate_is_idempotent() {
        let mut once = sample_request();
        AttributionTransport::decorate(&mut once);

        let mut twice = sample_request();
        AttributionTransport::decorate(&mut twice);
        AttributionTransport::decorate(&mut twice);

        assert_eq!(once.headers(), twice.headers());
        assert_eq!(twice.headers().get_all(REFERER_HEADER).iter().count(), 1);
        assert_eq!(twice.headers().get_all(TITLE_HEADER).iter().count(), 1);
    }

    #[test]
    fn test_decorate_overwrites_stale_attribution() {
        let mut request = reqwest::Client::new()
            .get("https://example.com/")
            .header(TITLE_HEADER, "Someone Else")
            .build()
            .unwrap();
        AttributionTransport::decorate(&mut request);

        let titles: Vec<_> = request.headers().get_all(TITLE_HEADER).iter().collect();
        assert_eq!(titles, vec![APP_TITLE]);
    }
}
