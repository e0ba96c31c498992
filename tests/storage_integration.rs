use std::env;

use dca_license_verify::db::Database;
use dca_license_verify::models::{License, LicenseDesc};
use dca_license_verify::repository::{LicenseRepository, PgLicenseRepository};

/// Integration smoke test for license storage against PostgreSQL.
/// Marked ignored to avoid running against production by accident; set TEST_DATABASE_URL to run.
#[tokio::test]
#[ignore]
async fn store_license_smoke_test() -> anyhow::Result<()> {
    let db_url = env::var("TEST_DATABASE_URL")
        .or_else(|_| env::var("DATABASE_URL"))
        .map_err(|_| anyhow::anyhow!("Set TEST_DATABASE_URL or DATABASE_URL to run this test"))?;

    let db = Database::new(&db_url).await?;
    let repository = PgLicenseRepository::new(db.pool.clone());
    repository.ensure_schema().await?;

    // Unique number so repeated runs do not collide with real rows.
    let number = 900_000_000 + (chrono::Utc::now().timestamp_subsec_nanos() as i64 % 1_000_000);
    let mut license = License {
        number,
        first_name: "TEST".to_string(),
        last_name: "SMOKE".to_string(),
        license_desc: LicenseDesc {
            board_code: 0,
            license_code: 224,
            name: "Registered Nurse".to_string(),
        },
        ..Default::default()
    };

    repository.store(&license).await?;

    // Second write upserts the same row
    license.verify = true;
    license.status = "ACTIVE".to_string();
    license.expiration = "January 01, 2030".to_string();
    repository.store(&license).await?;

    let (verified, status, expiration_date): (bool, String, Option<chrono::NaiveDate>) =
        sqlx::query_as(
            "SELECT verified, status, expiration_date FROM licenses
             WHERE board_code = $1 AND license_code = $2 AND license_number = $3",
        )
        .bind(0i32)
        .bind(224i32)
        .bind(number)
        .fetch_one(&db.pool)
        .await?;

    assert!(verified);
    assert_eq!(status, "ACTIVE");
    assert_eq!(expiration_date, chrono::NaiveDate::from_ymd_opt(2030, 1, 1));

    sqlx::query("DELETE FROM licenses WHERE license_number = $1")
        .bind(number)
        .execute(&db.pool)
        .await?;
    Ok(())
}
