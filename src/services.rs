use crate::errors::{AppError, ResultExt};
use crate::models::License;
use crate::repository::LicenseRepository;
use crate::verifier::DcaVerifier;
use std::sync::Arc;

/// Store/update/verify operations over license records.
///
/// Holds no per-license state: every call works on the caller's record.
#[derive(Clone)]
pub struct LicenseService {
    licenses: Arc<dyn LicenseRepository>,
    verifier: DcaVerifier,
}

impl LicenseService {
    pub fn new(licenses: Arc<dyn LicenseRepository>, verifier: DcaVerifier) -> Self {
        Self { licenses, verifier }
    }

    /// Persists `license` and hands it back.
    pub async fn store_license(&self, license: License) -> Result<License, AppError> {
        self.licenses
            .store(&license)
            .await
            .context("Failed to store license")?;
        Ok(license)
    }

    /// Alias of [`store_license`](Self::store_license) for callers that keep
    /// ownership of the record. The write is the same upsert.
    pub async fn update_license(&self, license: &License) -> Result<(), AppError> {
        self.licenses
            .store(license)
            .await
            .context("Failed to update license")
    }

    /// Checks `license` against the registry, recording the outcome on it.
    pub async fn verify_license(&self, license: &mut License) -> Result<(), AppError> {
        self.verifier.verify(license).await
    }
}
