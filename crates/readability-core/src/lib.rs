//! Core library for readability-api.
//!
//! Pure text analysis plus the configuration shared by the CLI and the HTTP
//! service. Nothing in the analysis path keeps state between calls, so every
//! function here is safe to call from any number of requests at once.
//!
//! # Modules
//!
//! - [`text`] - Sentence and word tokenization
//! - [`syllables`] - Vowel-group syllable estimation
//! - [`readability`] - Word count, Flesch-Kincaid Grade Level, Flesch Reading Ease
//! - [`request`] - Request body validation for transports
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use readability_core::readability::analyze_text;
//!
//! let report = analyze_text("The cat sat on the mat. The dog ran fast.");
//! assert_eq!(report.words, 10);
//! assert_eq!(report.sentences, 2);
//! println!("grade {} / ease {}", report.fkgl(), report.fres());
//! ```
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod readability;
pub mod request;
pub mod syllables;
pub mod text;

pub use config::{Config, ConfigLoader, ConfigSources, DEFAULT_MAX_INPUT_BYTES, LogLevel};
pub use error::{ConfigError, ConfigResult, RequestError, RequestResult};
pub use readability::{AnalysisReport, Metric, TextSummary, analyze_text};
