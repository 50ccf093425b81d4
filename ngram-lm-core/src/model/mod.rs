//! Top-level module for the n-gram language models.
//!
//! This module provides:
//! - Tokenization with sentence boundaries (`tokenizer`)
//! - Fixed-order n-gram models with pluggable smoothing (`NGramModel`)
//! - Composite trigram models (`LinearInterpolationModel`, `StupidBackoffModel`)
//! - A shared perplexity evaluator (`perplexity`)
//! - A sampling text generator (`TextGenerator`)

use std::collections::BTreeSet;

/// Turns raw text into tokens framed by sentence sentinels.
pub mod tokenizer;

/// N-gram and context counts owned by one model.
pub mod counts;

/// Probability estimators (MLE, Add-One).
pub mod smoothing;

/// Fixed-order n-gram model (`n >= 1`).
///
/// Handles training from raw text and probability lookups through
/// its estimator.
pub mod ngram_model;

/// Three MLE sub-models of orders 1 to 3, shared by the composite models.
pub mod composite;

/// Weighted mix of unigram, bigram and trigram estimates.
pub mod interpolation;

/// Stupid Backoff over trigram, bigram and unigram estimates.
pub mod backoff;

/// Perplexity evaluation shared by every model.
pub mod perplexity;

/// Generation parameters and their defaults.
pub mod generation_config;

/// Weighted random text generation from any trained model.
pub mod generator;

/// Anything that can assign a probability to a fixed-width window of tokens.
///
/// This is all the perplexity evaluator needs.
pub trait Scorable {
	/// Width of the windows this model scores.
	fn order(&self) -> usize;

	/// Order used to tokenize evaluation text, i.e. how many start
	/// sentinels open each sentence. Defaults to [`Scorable::order`].
	fn tokenization_order(&self) -> usize {
		self.order()
	}

	/// Probability of the last token of `ngram` given the tokens before it.
	///
	/// Never negative. Expected to be called after training.
	fn probability(&self, ngram: &[&str]) -> f64;
}

/// A trainable model with a vocabulary.
pub trait LanguageModel: Scorable {
	/// Tokens observed in training, sentinels included.
	fn vocab(&self) -> &BTreeSet<String>;

	/// Adds the n-grams of `text` to the model.
	///
	/// Training is additive: calling it twice accumulates both texts.
	fn train(&mut self, text: &str);

	/// Perplexity of the model on `text`; `f64::INFINITY` if any window
	/// is impossible or the text is too short.
	fn perplexity(&self, text: &str) -> f64 {
		perplexity::perplexity(self, text)
	}
}
