//! CRUD access to a table of AI-generated summaries of publication objects.

pub mod config;
pub mod db;
pub mod demo;
pub mod error;
pub mod models;

pub use db::SummaryRepository;
pub use error::{AppError, DbErrorKind, Result};
