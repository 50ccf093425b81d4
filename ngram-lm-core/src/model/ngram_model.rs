use std::collections::BTreeSet;

use super::counts::CountStore;
use super::smoothing::{AddOne, Estimator, Mle};
use super::tokenizer::preprocess;
use super::{LanguageModel, Scorable};
use crate::error::{LmError, LmResult};

/// Represents a word-level n-gram model of fixed order `n`.
///
/// Counts every window of `n` tokens seen during training and delegates the
/// probability estimate to its [`Estimator`].
///
/// # Invariants
/// - `n` is always >= 1
/// - The vocabulary only grows while training
#[derive(Clone, Debug)]
pub struct NGramModel<E> {
	/// The order of the model (number of tokens in the n-gram)
	n: usize,

	/// Every token observed in training, sentinels included.
	vocab: BTreeSet<String>,

	counts: CountStore,

	estimator: E,
}

/// Unsmoothed n-gram model.
pub type MleModel = NGramModel<Mle>;

/// Laplace-smoothed n-gram model.
pub type AddOneModel = NGramModel<AddOne>;

impl<E: Estimator + Default> NGramModel<E> {
	/// Creates a new, untrained model of order `n`.
	///
	/// # Errors
	/// Returns an error if `n < 1`.
	pub fn new(n: usize) -> LmResult<Self> {
		Self::with_estimator(n, E::default())
	}
}

impl<E: Estimator> NGramModel<E> {
	/// Creates a new, untrained model of order `n` using the given estimator.
	///
	/// # Errors
	/// Returns an error if `n < 1`.
	pub fn with_estimator(n: usize, estimator: E) -> LmResult<Self> {
		if n < 1 {
			return Err(LmError::InvalidOrder { n });
		}
		Ok(Self { n, vocab: BTreeSet::new(), counts: CountStore::new(), estimator })
	}

	/// Counts every `n`-token window of an already tokenized sequence.
	///
	/// Sequences shorter than `n` only contribute to the vocabulary.
	pub fn train_tokens(&mut self, tokens: &[String]) {
		self.vocab.extend(tokens.iter().cloned());

		let tokens: Vec<&str> = tokens.iter().map(String::as_str).collect();
		for window in tokens.windows(self.n) {
			self.counts.add(window);
		}
	}

	/// Read-only access to the trained counts.
	pub fn counts(&self) -> &CountStore {
		&self.counts
	}
}

impl<E: Estimator> Scorable for NGramModel<E> {
	fn order(&self) -> usize {
		self.n
	}

	fn probability(&self, ngram: &[&str]) -> f64 {
		self.estimator.probability(&self.counts, self.vocab.len(), ngram)
	}
}

impl<E: Estimator> LanguageModel for NGramModel<E> {
	fn vocab(&self) -> &BTreeSet<String> {
		&self.vocab
	}

	/// Tokenizes `text` for this order and counts it.
	///
	/// Calling it again adds to the existing counts; nothing is reset.
	fn train(&mut self, text: &str) {
		let tokens = preprocess(text, self.n);
		self.train_tokens(&tokens);
		log::debug!(
			"trained {}-gram model on {} tokens: {} distinct n-grams, vocabulary of {}",
			self.n,
			tokens.len(),
			self.counts.len(),
			self.vocab.len()
		);
	}
}
