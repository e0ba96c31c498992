//! Persistence for license records.
//!
//! The service only ever writes; reads exist on the in-memory store for
//! inspection.

use crate::errors::{AppError, ResultExt};
use crate::models::{License, LicenseKey};
use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Mutex;

/// Write side of license storage.
#[async_trait]
pub trait LicenseRepository: Send + Sync {
    /// Inserts or replaces the record identified by [`License::key`].
    async fn store(&self, license: &License) -> Result<(), AppError>;
}

/// PostgreSQL-backed license storage.
pub struct PgLicenseRepository {
    pool: PgPool,
}

impl PgLicenseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the `licenses` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), AppError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS licenses (
                board_code       INTEGER     NOT NULL,
                license_code     INTEGER     NOT NULL,
                license_number   BIGINT      NOT NULL,
                license_name     TEXT        NOT NULL,
                first_name       TEXT        NOT NULL,
                last_name        TEXT        NOT NULL,
                verified         BOOLEAN     NOT NULL DEFAULT FALSE,
                status           TEXT        NOT NULL DEFAULT '',
                expiration       TEXT        NOT NULL DEFAULT '',
                expiration_date  DATE,
                updated_at       TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                PRIMARY KEY (board_code, license_code, license_number)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create licenses table")?;

        Ok(())
    }
}

#[async_trait]
impl LicenseRepository for PgLicenseRepository {
    async fn store(&self, license: &License) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO licenses (
                board_code, license_code, license_number, license_name,
                first_name, last_name, verified, status, expiration, expiration_date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (board_code, license_code, license_number) DO UPDATE SET
                license_name = EXCLUDED.license_name,
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                verified = EXCLUDED.verified,
                status = EXCLUDED.status,
                expiration = EXCLUDED.expiration,
                expiration_date = EXCLUDED.expiration_date,
                updated_at = NOW()
            "#,
        )
        .bind(license.license_desc.board_code)
        .bind(license.license_desc.license_code)
        .bind(license.number)
        .bind(&license.license_desc.name)
        .bind(&license.first_name)
        .bind(&license.last_name)
        .bind(license.verify)
        .bind(&license.status)
        .bind(&license.expiration)
        .bind(license.expiration_date())
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to store license {}", license.number))?;

        tracing::debug!("Stored license {}", license.number);
        Ok(())
    }
}

/// Process-local license storage.
#[derive(Default)]
pub struct InMemoryLicenseRepository {
    licenses: Mutex<HashMap<LicenseKey, License>>,
}

impl InMemoryLicenseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &LicenseKey) -> Option<License> {
        self.licenses.lock().ok()?.get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.licenses.lock().map(|l| l.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl LicenseRepository for InMemoryLicenseRepository {
    async fn store(&self, license: &License) -> Result<(), AppError> {
        let mut licenses = self
            .licenses
            .lock()
            .map_err(|_| AppError::Repository("license store lock poisoned".to_string()))?;
        licenses.insert(license.key(), license.clone());
        Ok(())
    }
}
