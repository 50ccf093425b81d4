use std::collections::BTreeSet;

use super::ngram_model::MleModel;
use super::{LanguageModel, Scorable};

/// Width of the windows scored by composite models.
pub const TRIGRAM: usize = 3;

/// Unigram, bigram and trigram MLE models trained side by side.
///
/// The sub-models never share counts: each one tokenizes the training text
/// at its own order.
#[derive(Clone, Debug)]
pub struct MleStack {
	unigram: MleModel,
	bigram: MleModel,
	trigram: MleModel,
}

/// Per-order MLE estimates of one trigram.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrderEstimates {
	/// `P(w3)`
	pub unigram: f64,
	/// `P(w3 | w2)`
	pub bigram: f64,
	/// `P(w3 | w1 w2)`
	pub trigram: f64,
}

impl MleStack {
	/// Creates three untrained sub-models.
	pub fn new() -> Self {
		// Orders 1 to 3 are always valid.
		Self {
			unigram: MleModel::new(1).expect("order 1 is valid"),
			bigram: MleModel::new(2).expect("order 2 is valid"),
			trigram: MleModel::new(3).expect("order 3 is valid"),
		}
	}

	/// Trains every sub-model on the same text.
	pub fn train(&mut self, text: &str) {
		self.unigram.train(text);
		self.bigram.train(text);
		self.trigram.train(text);
	}

	/// Vocabulary of the trigram sub-model.
	pub fn vocab(&self) -> &BTreeSet<String> {
		self.trigram.vocab()
	}

	/// Estimates of each order for the last token of `trigram`.
	///
	/// Returns `None` unless `trigram` has exactly three tokens.
	pub fn estimates(&self, trigram: &[&str]) -> Option<OrderEstimates> {
		if trigram.len() != TRIGRAM {
			return None;
		}
		Some(OrderEstimates {
			unigram: self.unigram.probability(&trigram[2..]),
			bigram: self.bigram.probability(&trigram[1..]),
			trigram: self.trigram.probability(trigram),
		})
	}

	/// Read-only access to the sub-models, lowest order first.
	pub fn models(&self) -> [&MleModel; 3] {
		[&self.unigram, &self.bigram, &self.trigram]
	}
}

impl Default for MleStack {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_relative_eq;

	#[test]
	fn test_sub_models_are_trained_independently() {
		let mut stack = MleStack::new();
		stack.train("a b c. a b d.");

		let [unigram, bigram, trigram] = stack.models();
		assert_eq!(unigram.order(), 1);
		assert_eq!(bigram.order(), 2);
		assert_eq!(trigram.order(), 3);
		// Only higher orders see start sentinels.
		assert!(!unigram.vocab().contains("<s>"));
		assert!(trigram.vocab().contains("<s>"));
		assert_eq!(stack.vocab(), trigram.vocab());
	}

	#[test]
	fn test_estimates() {
		let mut stack = MleStack::new();
		stack.train("a b c. a b d.");

		let estimates = stack.estimates(&["a", "b", "c"]).unwrap();
		// a b c </s> a b d </s>
		assert_relative_eq!(estimates.unigram, 1.0 / 8.0);
		assert_relative_eq!(estimates.bigram, 0.5);
		assert_relative_eq!(estimates.trigram, 0.5);

		assert_eq!(stack.estimates(&["a", "b"]), None);
		assert_eq!(stack.estimates(&["a", "b", "c", "d"]), None);
	}
}
