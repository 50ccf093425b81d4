//! Error types.

/// Errors raised by model construction and corpus loading.
///
/// Zero-probability evaluation is not an error: it surfaces as an
/// infinite perplexity instead.
#[derive(Debug, thiserror::Error)]
pub enum LmError {
	/// Model order must be at least 1.
	#[error("n must be >= 1, got {n}")]
	InvalidOrder {
		/// The rejected order.
		n: usize,
	},

	/// Interpolation weights must be finite, non-negative and have a positive sum.
	#[error("invalid interpolation weights ({unigram}, {bigram}, {trigram})")]
	InvalidWeights {
		/// Unigram weight.
		unigram: f64,
		/// Bigram weight.
		bigram: f64,
		/// Trigram weight.
		trigram: f64,
	},

	/// Backoff scaling factor must lie in `(0, 1]`.
	#[error("alpha must be in (0.0, 1.0], got {0}")]
	InvalidAlpha(f64),

	/// I/O error.
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

/// Result type for language model operations.
pub type LmResult<T> = Result<T, LmError>;
