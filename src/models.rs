use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date layout used by the registry for expiration dates ("January 01, 2030").
pub const EXPIRATION_DATE_FORMAT: &str = "%B %d, %Y";

/// Describes which registry and license category a license belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LicenseDesc {
    /// Board selecting the professional registry (0 searches all boards).
    pub board_code: i32,
    /// Numeric license category within the board.
    pub license_code: i32,
    /// Human-readable license type, matched against the results page.
    pub name: String,
}

/// A professional license and the outcome of its last verification.
///
/// Identity fields drive both the search request and the match against the
/// results page. `verify`, `status` and `expiration` are only written by
/// verification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct License {
    pub number: i64,
    pub first_name: String,
    pub last_name: String,
    pub license_desc: LicenseDesc,
    #[serde(default)]
    pub verify: bool,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub expiration: String,
}

/// Key identifying one stored license: `(board_code, license_code, number)`.
pub type LicenseKey = (i32, i32, i64);

impl License {
    /// Name as printed by the registry: `LAST, FIRST` in upper case.
    pub fn registry_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name).to_uppercase()
    }

    pub fn key(&self) -> LicenseKey {
        (
            self.license_desc.board_code,
            self.license_desc.license_code,
            self.number,
        )
    }

    /// Parses `expiration` into a calendar date, if it holds one.
    pub fn expiration_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.expiration.trim(), EXPIRATION_DATE_FORMAT).ok()
    }
}
