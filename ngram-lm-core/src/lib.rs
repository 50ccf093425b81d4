//! Word-level n-gram language models.
//!
//! This crate provides:
//! - Tokenization with sentence boundary sentinels
//! - MLE and Add-One smoothed n-gram models of any order
//! - Linear interpolation and Stupid Backoff trigram models
//! - Perplexity evaluation shared by every model
//! - Grid search of interpolation weights and backoff factor
//! - Seeded random text generation from any trained model

/// N-gram models, evaluation and generation.
pub mod model;

/// Hyperparameter grid search over a development set.
pub mod search;

/// Corpus loading (file reading, path helpers).
pub mod io;

/// Error types.
pub mod error;

pub use error::{LmError, LmResult};
pub use model::{LanguageModel, Scorable};
