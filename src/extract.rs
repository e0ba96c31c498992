//! Matching and fact extraction over the collected results-page text.
//!
//! The page carries no field markup, so facts are pulled out positionally:
//! the identity block must appear in order, the status is the remainder of
//! the `License Status:` line, and the expiration is the first
//! `Month DD, YYYY` date anywhere in the text.

use crate::errors::AppError;
use crate::models::License;
use regex::Regex;
use std::sync::OnceLock;

fn status_line_regex() -> &'static Regex {
    static STATUS_LINE: OnceLock<Regex> = OnceLock::new();
    STATUS_LINE.get_or_init(|| {
        Regex::new(r"[\n\r].*License Status:[ \t]*([^\n\r]*)").expect("status line pattern is valid")
    })
}

fn expiration_regex() -> &'static Regex {
    static EXPIRATION: OnceLock<Regex> = OnceLock::new();
    EXPIRATION
        .get_or_init(|| Regex::new(r"\w+\s\d{2},\s\d{4}").expect("expiration pattern is valid"))
}

/// Builds the pattern asserting that name, number and license type appear
/// together, in that order, separated by the registry's labels.
///
/// Identity fields are escaped so names or license types containing regex
/// metacharacters match literally.
pub fn identity_pattern(license: &License) -> Result<Regex, AppError> {
    let expression = format!(
        r"{}\s+License Number:\s+{}\s+License Type:\s+{}",
        regex::escape(&license.registry_name()),
        license.number,
        regex::escape(&license.license_desc.name),
    );
    Regex::new(&expression).map_err(|e| {
        AppError::BadRequest(format!("License identity is not matchable: {}", e))
    })
}

/// Returns the trimmed status from the first `License Status:` line.
///
/// The status is whatever follows the last `:` on the matched fragment.
/// Returns `None` when no such line exists or the value is blank.
pub fn extract_status(text: &str) -> Option<String> {
    let fragment = status_line_regex().find(text)?.as_str();
    let status = fragment.rsplit(':').next().unwrap_or_default().trim();
    if status.is_empty() {
        None
    } else {
        Some(status.to_string())
    }
}

/// Returns the first `Month DD, YYYY` shaped date in the text.
pub fn extract_expiration(text: &str) -> Option<&str> {
    expiration_regex().find(text).map(|m| m.as_str())
}

/// Confirms `license` against the collected page text and records the facts.
///
/// On success `verify` is true and `status`/`expiration` are filled in. Every
/// failure leaves `verify` false:
///
/// - identity not found: [`AppError::NoMatch`], `status`/`expiration` untouched
/// - no usable status line: [`AppError::MalformedStatus`], `status` untouched
/// - no expiration date: [`AppError::ExpirationNotFound`], `status` kept
pub fn verify_collected_text(text: &str, license: &mut License) -> Result<(), AppError> {
    license.verify = false;

    if !identity_pattern(license)?.is_match(text) {
        tracing::warn!(
            "No registry match for {} license {}",
            license.registry_name(),
            license.number
        );
        return Err(AppError::NoMatch(format!(
            "{} license {} ({}) not found on results page",
            license.registry_name(),
            license.number,
            license.license_desc.name
        )));
    }

    let Some(status) = extract_status(text) else {
        return Err(AppError::MalformedStatus(format!(
            "no License Status line for license {}",
            license.number
        )));
    };
    license.status = status;

    let Some(expiration) = extract_expiration(text) else {
        return Err(AppError::ExpirationNotFound(format!(
            "no expiration date for license {}",
            license.number
        )));
    };
    license.expiration = expiration.to_string();
    license.verify = true;

    tracing::info!("Verified license: {}", license.number);
    Ok(())
}
