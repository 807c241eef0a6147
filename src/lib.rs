// src/lib.rs
//! Ingestion helpers for the ECMA-376 standard: PDF to markdown extraction
//! with a section index, and page-number repair for embedded chunks.

pub mod config;
pub mod convert;
pub mod extractors;
pub mod models;
pub mod pipeline;
pub mod repair;
pub mod storage;
pub mod utils;

pub use utils::AppError;
