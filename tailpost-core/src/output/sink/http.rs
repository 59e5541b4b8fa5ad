use crate::output::sink::{ContentSink, SinkError};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Header carrying the path of the file a chunk was read from.
pub const SOURCE_HEADER: &str = "x-tailpost-source";

/// POSTs every chunk, as raw bytes, to a collector URL.
pub struct HttpSink {
    client: reqwest::Client,
    destination: Url,
}

impl HttpSink {
    pub fn new(destination: Url, timeout: Duration) -> Result<Self, SinkError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SinkError::fatal(format!("failed to build http client: {e}")))?;

        Ok(Self {
            client,
            destination,
        })
    }

    pub fn destination(&self) -> &Url {
        &self.destination
    }
}

#[async_trait]
impl ContentSink for HttpSink {
    async fn send(&self, source: &Path, bytes: Bytes) -> Result<(), SinkError> {
        let mut request = self
            .client
            .post(self.destination.clone())
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(bytes);

        // Paths that are not valid header values are simply not labelled.
        if let Ok(value) = HeaderValue::from_str(&source.to_string_lossy()) {
            request = request.header(SOURCE_HEADER, value);
        }

        let response = request.send().await.map_err(classify_error)?;
        classify_status(response.status())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

fn classify_error(err: reqwest::Error) -> SinkError {
    if err.is_builder() {
        SinkError::fatal(format!("invalid request: {err}"))
    } else {
        SinkError::transient(err.to_string())
    }
}

/// 2xx is delivered. A destination that does not exist (404, 410) will never
/// accept content; anything else may recover.
fn classify_status(status: StatusCode) -> Result<(), SinkError> {
    if status.is_success() {
        return Ok(());
    }
    match status {
        StatusCode::NOT_FOUND | StatusCode::GONE => {
            Err(SinkError::fatal(format!("collector responded {status}")))
        }
        _ => Err(SinkError::transient(format!("collector responded {status}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_statuses_are_delivered() {
        assert!(classify_status(StatusCode::OK).is_ok());
        assert!(classify_status(StatusCode::NO_CONTENT).is_ok());
    }

    #[test]
    fn missing_destination_is_fatal() {
        assert!(matches!(
            classify_status(StatusCode::NOT_FOUND),
            Err(SinkError::Fatal { .. })
        ));
        assert!(matches!(
            classify_status(StatusCode::GONE),
            Err(SinkError::Fatal { .. })
        ));
    }

    #[test]
    fn other_failures_are_transient() {
        for status in [
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::SERVICE_UNAVAILABLE,
            StatusCode::TOO_MANY_REQUESTS,
        ] {
            assert!(
                matches!(classify_status(status), Err(SinkError::Transient { .. })),
                "{status}"
            );
        }
    }
}
