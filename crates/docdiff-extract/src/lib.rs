//! Document loading for docdiff.
//!
//! Detects a document's kind from its name, extracts its lines through a
//! registry of pluggable [`LineExtractor`]s, and feeds them to the line
//! comparison engine.
//!
//! # Key Types
//!
//! - [`Document`] / [`DocumentKind`] -- named bytes and their format
//! - [`LineExtractor`] / [`PlainTextExtractor`] -- the extraction contract
//! - [`ExtractorRegistry`] -- kind to extractor mapping, injected by callers
//! - [`compare_documents`] -- same-kind check, extraction, comparison

pub mod compare;
pub mod document;
pub mod error;
pub mod extractor;
pub mod registry;

pub use compare::{compare_documents, try_compare_documents};
pub use document::{Document, DocumentKind};
pub use error::{ExtractError, ExtractResult};
pub use extractor::{split_lines, LineExtractor, PlainTextExtractor};
pub use registry::ExtractorRegistry;
