//! DCA License Verification Library
//!
//! Verifies professional license records against the California Department
//! of Consumer Affairs license search by posting the search form and scraping
//! the results page.
//!
//! # Modules
//!
//! - `html_text`: Collects the text of the results list from a parsed page.
//! - `extract`: Matches the license identity and extracts status and expiration.
//! - `verifier`: DCA search client tying the request, collector and extractor together.
//! - `services`: Store/update/verify facade.
//! - `repository`: License persistence (PostgreSQL and in-memory).
//! - `handlers`: HTTP API over the facade.
//! - `config`: Configuration management.
//! - `db`: Database connection and pool management.
//! - `errors`: Error handling types.
//! - `models`: License data model.

pub mod config;
pub mod db;
pub mod errors;
pub mod extract;
pub mod handlers;
pub mod html_text;
pub mod models;
pub mod repository;
pub mod services;
pub mod verifier;
