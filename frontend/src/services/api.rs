use futures::future::{select, Either};
use gloo::net::http::Request;
use gloo::timers::future::TimeoutFuture;
use serde::Deserialize;
use shared::{CreateBillRequest, CreateBillResponse};

/// Bounded wait applied to the bill-generation call; expiry is reported
/// like any other transport failure.
const REQUEST_TIMEOUT_MS: u32 = 30_000;

/// API client for communicating with the bill-generation service
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a client talking to the origin the page was served from.
    pub fn new() -> Self {
        Self {
            base_url: String::new(),
        }
    }

    /// Create a client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self { base_url }
    }

    /// Submit a validated bill request. Error strings come back
    /// pre-formatted for the result area: collaborator rejections as
    /// "Error: …", transport problems and the timeout as
    /// "Network error: …".
    pub async fn generate_bill(
        &self,
        request: &CreateBillRequest,
    ) -> Result<CreateBillResponse, String> {
        let url = format!("{}/api/generate-bill", self.base_url);

        let call = Box::pin(send_bill_request(url, request));
        let timeout = Box::pin(TimeoutFuture::new(REQUEST_TIMEOUT_MS));
        match select(call, timeout).await {
            Either::Left((result, _)) => result,
            Either::Right(_) => Err("Network error: request timed out".to_string()),
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

async fn send_bill_request(
    url: String,
    request: &CreateBillRequest,
) -> Result<CreateBillResponse, String> {
    match Request::post(&url)
        .json(request)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
    {
        Ok(response) => {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            gloo::console::log!(format!(
                "API /api/generate-bill response: {} {}",
                status, body
            ));

            if response.ok() {
                serde_json::from_str::<CreateBillResponse>(&body)
                    .map_err(|e| format!("Network error: {}", e))
            } else {
                Err(format!("Error: {}", error_detail(&body)))
            }
        }
        Err(e) => Err(format!("Network error: {}", e)),
    }
}

/// Failure body shape used by the collaborator; `detail` is optional.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// Pull the collaborator's `detail` string out of a failure body,
/// falling back to the raw body text.
fn error_detail(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.detail)
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_detail_prefers_detail_field() {
        assert_eq!(
            error_detail(r#"{"detail":"Insufficient stock"}"#),
            "Insufficient stock"
        );
    }

    #[test]
    fn test_error_detail_falls_back_to_raw_body() {
        assert_eq!(error_detail(r#"{"code":42}"#), r#"{"code":42}"#);
        assert_eq!(error_detail("not json"), "not json");
    }
}
