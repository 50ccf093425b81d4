use std::collections::BTreeSet;

use super::composite::{MleStack, TRIGRAM};
use super::{LanguageModel, Scorable};
use crate::error::{LmError, LmResult};

/// Default backoff scaling factor.
pub const DEFAULT_ALPHA: f64 = 0.4;

/// Stupid Backoff: trigram, then bigram, then unigram, scaling each step
/// down by `alpha`.
///
/// - `P(w1 w2 w3)` if the trigram was seen
/// - `alpha * P(w3 | w2)` if the bigram was seen
/// - `alpha² * P(w3)` otherwise (`0.0` for an unseen token)
///
/// Scores are not normalized: they may sum to more than 1 over the
/// vocabulary.
#[derive(Clone, Debug)]
pub struct StupidBackoffModel {
	alpha: f64,
	models: MleStack,
}

impl StupidBackoffModel {
	/// Creates an untrained model with the given scaling factor.
	///
	/// # Errors
	/// Returns an error if `alpha` is not in `(0.0, 1.0]`.
	pub fn new(alpha: f64) -> LmResult<Self> {
		if !(alpha > 0.0 && alpha <= 1.0) {
			return Err(LmError::InvalidAlpha(alpha));
		}
		Ok(Self { alpha, models: MleStack::new() })
	}

	/// The backoff scaling factor.
	pub fn alpha(&self) -> f64 {
		self.alpha
	}
}

impl Default for StupidBackoffModel {
	fn default() -> Self {
		Self { alpha: DEFAULT_ALPHA, models: MleStack::new() }
	}
}

impl Scorable for StupidBackoffModel {
	fn order(&self) -> usize {
		TRIGRAM
	}

	fn probability(&self, ngram: &[&str]) -> f64 {
		let Some(p) = self.models.estimates(ngram) else {
			return 0.0;
		};
		if p.trigram > 0.0 {
			p.trigram
		} else if p.bigram > 0.0 {
			self.alpha * p.bigram
		} else {
			self.alpha * self.alpha * p.unigram
		}
	}
}

impl LanguageModel for StupidBackoffModel {
	fn vocab(&self) -> &BTreeSet<String> {
		self.models.vocab()
	}

	fn train(&mut self, text: &str) {
		self.models.train(text);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::ngram_model::MleModel;
	use approx::assert_relative_eq;

	const TEXT: &str = "the cat sat. the cat ran. a dog sat.";

	fn trained(alpha: f64) -> StupidBackoffModel {
		let mut model = StupidBackoffModel::new(alpha).unwrap();
		model.train(TEXT);
		model
	}

	#[test]
	fn test_invalid_alpha() {
		assert!(matches!(StupidBackoffModel::new(0.0), Err(LmError::InvalidAlpha(_))));
		assert!(StupidBackoffModel::new(1.5).is_err());
		assert!(StupidBackoffModel::new(f64::NAN).is_err());
		assert!(StupidBackoffModel::new(1.0).is_ok());
		assert_eq!(StupidBackoffModel::default().alpha(), DEFAULT_ALPHA);
	}

	#[test]
	fn test_seen_trigram_is_unscaled() {
		let model = trained(0.4);
		let mut trigram = MleModel::new(3).unwrap();
		trigram.train(TEXT);
		for ngram in [["the", "cat", "sat"], ["<s>", "<s>", "the"], ["a", "dog", "sat"]] {
			let mle = trigram.probability(&ngram);
			assert!(mle > 0.0);
			assert_eq!(model.probability(&ngram), mle);
		}
	}

	#[test]
	fn test_backs_off_to_bigram() {
		let model = trained(0.4);
		// "a cat" never seen as a trigram context, but "cat sat" is half of "cat".
		assert_relative_eq!(model.probability(&["a", "cat", "sat"]), 0.4 * 0.5);
	}

	#[test]
	fn test_backs_off_to_unigram() {
		let model = trained(0.5);
		// "dog ran" never seen; "ran" is 1 of 12 unigram tokens.
		assert_relative_eq!(model.probability(&["a", "dog", "ran"]), 0.25 / 12.0);
	}

	#[test]
	fn test_unseen_token_is_zero() {
		let model = trained(0.4);
		assert_eq!(model.probability(&["the", "cat", "flew"]), 0.0);
		assert_eq!(model.probability(&["cat", "sat"]), 0.0);
	}

	#[test]
	fn test_never_negative() {
		let model = trained(0.9);
		let vocab: Vec<&str> = model.vocab().iter().map(String::as_str).collect();
		for &a in &vocab {
			for &b in &vocab {
				for &c in &vocab {
					assert!(model.probability(&[a, b, c]) >= 0.0);
				}
			}
		}
	}

	#[test]
	fn test_perplexity_on_training_text_is_finite() {
		let perplexity = trained(0.4).perplexity(TEXT);
		assert!(perplexity.is_finite());
		assert!(perplexity >= 1.0);
	}
}
