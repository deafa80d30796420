use crate::error::{ChartError, ChartResult};

use super::{ConvertRequest, DocumentConverter};

/// Blocking HTTP client for the document-conversion service.
///
/// One request per export attempt; failures are terminal for the attempt
/// and surfaced to the caller.
#[derive(Debug)]
pub struct HttpDocumentConverter {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpDocumentConverter {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            agent: ureq::Agent::new_with_defaults(),
        }
    }
}

impl DocumentConverter for HttpDocumentConverter {
    fn convert(&self, request: &ConvertRequest) -> ChartResult<Vec<u8>> {
        let url = format!(
            "{}/uploads/{}/download/pdf",
            self.base_url, request.upload_id
        );
        let body = serde_json::to_string(request).map_err(|error| ChartError::Conversion {
            detail: format!("failed to serialize request: {error}"),
        })?;

        let response = self
            .agent
            .post(&url)
            .content_type("application/json")
            .send(body.as_bytes())
            .map_err(|error| ChartError::Conversion {
                detail: error.to_string(),
            })?;

        response
            .into_body()
            .read_to_vec()
            .map_err(|error| ChartError::Conversion {
                detail: format!("failed to read document payload: {error}"),
            })
    }
}
