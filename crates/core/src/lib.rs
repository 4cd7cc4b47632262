//! Domain logic shared by the ladle backend crates.
//!
//! This crate has no database dependency: the db crate implements the
//! [`readiness::DatabaseProbe`] trait against Postgres, and the api crate
//! maps [`error::CoreError`] onto HTTP responses.

pub mod error;
pub mod readiness;
pub mod types;
