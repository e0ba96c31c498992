use crate::config::VerifierConfig;
use crate::errors::{AppError, ResultExt};
use crate::extract::verify_collected_text;
use crate::html_text::{collect_container_text, parse_page, ACTIONS_LIST};
use crate::models::License;
use serde::Serialize;

/// Form fields posted to the DCA license search.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchForm<'a> {
    pub board_code: String,
    pub license_type: String,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub license_number: String,
}

impl<'a> From<&'a License> for SearchForm<'a> {
    fn from(license: &'a License) -> Self {
        Self {
            board_code: license.license_desc.board_code.to_string(),
            license_type: license.license_desc.license_code.to_string(),
            first_name: &license.first_name,
            last_name: &license.last_name,
            license_number: license.number.to_string(),
        }
    }
}

/// Client for the DCA license search.
///
/// Each verification performs exactly one POST; connection reuse is left to
/// the underlying `reqwest::Client` pool.
#[derive(Clone)]
pub struct DcaVerifier {
    client: reqwest::Client,
    search_url: String,
}

impl DcaVerifier {
    /// Creates a new `DcaVerifier` with the configured timeouts.
    pub fn new(config: &VerifierConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.read_timeout)
            .build()
            .map_err(|e| AppError::Transport(format!("Failed to create DCA client: {}", e)))?;

        Ok(Self {
            client,
            search_url: config.search_url.clone(),
        })
    }

    /// Submits the search form for `license` and returns the raw results page.
    pub async fn fetch_results_page(&self, license: &License) -> Result<String, AppError> {
        tracing::debug!(
            "Searching DCA for license {} (board {}, type {}): {}",
            license.number,
            license.license_desc.board_code,
            license.license_desc.license_code,
            self.search_url
        );

        let response = self
            .client
            .post(&self.search_url)
            .form(&SearchForm::from(license))
            .send()
            .await
            .map_err(AppError::from)
            .context("DCA request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Transport(format!(
                "DCA returned {}: {}",
                status, error_text
            )));
        }

        response
            .text()
            .await
            .map_err(AppError::from)
            .context("Failed to read DCA response")
    }

    /// Verifies `license` against the registry, updating it in place.
    ///
    /// Transport and page-structure failures leave the license untouched;
    /// extraction failures follow [`verify_collected_text`].
    pub async fn verify(&self, license: &mut License) -> Result<(), AppError> {
        let body = self
            .fetch_results_page(license)
            .await
            .context("Failed to verify")?;

        let collected = collected_text(&body).context("Failed to verify")?;
        verify_collected_text(&collected, license).context("Failed to verify")
    }
}

/// Parses the results page and returns the non-empty text of the results list.
fn collected_text(body: &str) -> Result<String, AppError> {
    let document = parse_page(body);
    match collect_container_text(&document, &ACTIONS_LIST) {
        None => {
            tracing::warn!("Results page has no {} container", ACTIONS_LIST.tag);
            Err(AppError::MalformedPage(format!(
                "no <{} {}=\"{}\"> element",
                ACTIONS_LIST.tag, ACTIONS_LIST.attr_key, ACTIONS_LIST.attr_value
            )))
        }
        Some(text) if text.is_empty() => {
            tracing::warn!("Results list on page is empty");
            Err(AppError::MalformedPage("results list has no text".to_string()))
        }
        Some(text) => Ok(text),
    }
}
