//! HTTP implementation of the analysis backend.

use super::{AnalysisBackend, RequestError};
use crate::models::{AnalysisKind, AnalysisRequest, AnalysisResult, HealthStatus};
use tracing::{debug, info};

/// Client for the AI backend's REST API.
///
/// The base URL is fixed at construction and never changes afterwards.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpBackend {
    /// Create a client for the backend at `base_url`.
    pub fn new(base_url: &str) -> Result<Self, RequestError> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("journal-lens/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    /// The base URL all endpoints are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of the endpoint bound to `kind`.
    pub fn endpoint(&self, kind: AnalysisKind) -> String {
        format!("{}{}", self.base_url, kind.endpoint_path())
    }

    /// Send one analysis request.
    pub async fn send(&self, request: AnalysisRequest) -> Result<AnalysisResult, RequestError> {
        let url = self.endpoint(request.kind);
        debug!("POST {} ({} chars)", url, request.text.len());

        let response = self
            .http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RequestError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        let result = parse_result(&body)?;
        info!(
            "{} analysis complete ({}% confidence, model {})",
            request.kind,
            result.confidence_percent(),
            result.metadata.model
        );

        Ok(result)
    }

    /// Query the backend's health endpoint.
    pub async fn check_health(&self) -> Result<HealthStatus, RequestError> {
        let url = format!("{}/health", self.base_url);
        debug!("GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RequestError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    fn classify(&self, e: reqwest::Error) -> RequestError {
        if e.is_connect() {
            RequestError::Connect {
                url: self.base_url.clone(),
                source: e,
            }
        } else {
            RequestError::Transport(e)
        }
    }
}

impl AnalysisBackend for HttpBackend {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResult, RequestError> {
        self.send(request).await
    }

    async fn health(&self) -> Result<HealthStatus, RequestError> {
        self.check_health().await
    }
}

/// Parse and check a success response body.
pub fn parse_result(body: &[u8]) -> Result<AnalysisResult, RequestError> {
    let result: AnalysisResult = serde_json::from_slice(body)?;

    if !(0.0..=1.0).contains(&result.confidence) {
        return Err(RequestError::Invalid(format!(
            "confidence {} is outside [0, 1]",
            result.confidence
        )));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sentiment;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Serve exactly one HTTP exchange with a canned response and hand back
    /// the raw request that was received.
    async fn serve_once(status_line: &str, body: &str) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];

            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
                if request_complete(&raw) {
                    break;
                }
            }

            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            let _ = tx.send(String::from_utf8_lossy(&raw).into_owned());
        });

        (format!("http://{}", addr), rx)
    }

    fn request_complete(raw: &[u8]) -> bool {
        let text = String::from_utf8_lossy(raw);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..header_end]
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        raw.len() >= header_end + 4 + content_length
    }

    fn request(kind: AnalysisKind) -> AnalysisRequest {
        AnalysisRequest {
            text: "I had a wonderful day at the park.".to_string(),
            kind,
        }
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let backend = HttpBackend::new("http://localhost:8000/").unwrap();
        assert_eq!(backend.base_url(), "http://localhost:8000");
        assert_eq!(
            backend.endpoint(AnalysisKind::Summarize),
            "http://localhost:8000/api/ai/summarize"
        );
    }

    #[test]
    fn test_parse_result_rejects_out_of_range_confidence() {
        let body = br#"{"result":"r","confidence":1.5,"metadata":{"word_count":1,"model":"m"}}"#;
        assert!(matches!(parse_result(body), Err(RequestError::Invalid(_))));
    }

    #[test]
    fn test_parse_result_accepts_summary_metadata() {
        let body = br#"{"result":"A day at the park.","task_type":"summarize","confidence":0.85,"metadata":{"original_length":8,"summary_length":2,"model":"groq-llama3-8b","timestamp":"2025-06-01T10:00:00"}}"#;
        let result = parse_result(body).unwrap();
        assert_eq!(result.confidence, 0.85);
        assert_eq!(result.metadata.original_length, Some(8));
        assert_eq!(result.metadata.word_count, None);
    }

    #[test]
    fn test_parse_result_rejects_garbage() {
        assert!(matches!(
            parse_result(b"<html>oops</html>"),
            Err(RequestError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_send_posts_json_to_kind_endpoint() {
        let body = r#"{"result":"positive reflection","confidence":0.92,"metadata":{"word_count":8,"sentiment":"positive","model":"demo-v1"}}"#;
        let (base, received) = serve_once("200 OK", body).await;
        let backend = HttpBackend::new(&base).unwrap();

        let result = backend.send(request(AnalysisKind::Sentiment)).await.unwrap();
        assert_eq!(result.confidence, 0.92);
        assert_eq!(result.sentiment(), Some(Sentiment::Positive));

        let raw = received.await.unwrap();
        assert!(raw.starts_with("POST /api/ai/sentiment HTTP/1.1"));
        assert!(raw.to_lowercase().contains("content-type: application/json"));
        let json_start = raw.find("\r\n\r\n").unwrap() + 4;
        let sent: serde_json::Value = serde_json::from_str(&raw[json_start..]).unwrap();
        assert_eq!(sent["text"], "I had a wonderful day at the park.");
        assert_eq!(sent["task_type"], "sentiment");
    }

    #[tokio::test]
    async fn test_send_maps_error_status() {
        let (base, _received) =
            serve_once("500 Internal Server Error", r#"{"detail":"boom"}"#).await;
        let backend = HttpBackend::new(&base).unwrap();

        let err = backend
            .send(request(AnalysisKind::Insights))
            .await
            .unwrap_err();
        match err {
            RequestError::Status { status, body } => {
                assert_eq!(status, 500);
                assert!(body.contains("boom"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_send_maps_malformed_body() {
        let (base, _received) = serve_once("200 OK", r#"{"result":"no metadata"}"#).await;
        let backend = HttpBackend::new(&base).unwrap();

        let err = backend
            .send(request(AnalysisKind::Summarize))
            .await
            .unwrap_err();
        assert!(matches!(err, RequestError::Decode(_)));
        assert_eq!(err.user_message(), "Failed to process text");
    }

    #[tokio::test]
    async fn test_send_unreachable_backend() {
        // Bind then drop to get a port nothing listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let backend = HttpBackend::new(&format!("http://{}", addr)).unwrap();
        let err = backend
            .send(request(AnalysisKind::Summarize))
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Error connecting to AI service");
    }

    #[tokio::test]
    async fn test_health() {
        let (base, received) = serve_once(
            "200 OK",
            r#"{"status":"healthy","service":"ai-journal-summarizer-api","platform":"railway"}"#,
        )
        .await;
        let backend = HttpBackend::new(&base).unwrap();

        let health = backend.check_health().await.unwrap();
        assert!(health.is_healthy());
        assert_eq!(health.service.as_deref(), Some("ai-journal-summarizer-api"));
        assert!(received.await.unwrap().starts_with("GET /health HTTP/1.1"));
    }
}
