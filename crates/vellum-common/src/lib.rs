//! Common utilities for vellum.
//!
//! This crate provides shared infrastructure used by the converter:
//! - **Warning System** - deduplicated warnings for tolerated but unsupported input
//! - **Net** - async resource fetching and `data:` URL encoding/decoding
//! - **URL** - resolving relative references against a base URL

pub mod net;
pub mod url;
pub mod warning;
