use std::collections::BTreeSet;

use serde::Serialize;

use super::composite::{MleStack, TRIGRAM};
use super::{LanguageModel, Scorable};
use crate::error::{LmError, LmResult};

/// Interpolation weights (λ1, λ2, λ3) for the unigram, bigram and trigram
/// estimates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Lambdas {
	/// λ1, weight of `P(w3)`.
	pub unigram: f64,
	/// λ2, weight of `P(w3 | w2)`.
	pub bigram: f64,
	/// λ3, weight of `P(w3 | w1 w2)`.
	pub trigram: f64,
}

/// Weights used when no candidate could be scored.
pub const DEFAULT_LAMBDAS: Lambdas = Lambdas::new(0.33, 0.33, 0.34);

impl Lambdas {
	/// Creates weights as given, without normalizing them.
	pub const fn new(unigram: f64, bigram: f64, trigram: f64) -> Self {
		Self { unigram, bigram, trigram }
	}

	/// Returns the weights scaled to sum to 1.
	///
	/// # Errors
	/// Returns an error if a weight is negative or not finite, or if they
	/// sum to zero.
	pub fn normalized(self) -> LmResult<Self> {
		let weights = [self.unigram, self.bigram, self.trigram];
		let sum: f64 = weights.iter().sum();
		if weights.iter().any(|w| !w.is_finite() || *w < 0.0) || !(sum > 0.0) {
			return Err(LmError::InvalidWeights {
				unigram: self.unigram,
				bigram: self.bigram,
				trigram: self.trigram,
			});
		}
		Ok(Self::new(self.unigram / sum, self.bigram / sum, self.trigram / sum))
	}
}

impl From<(f64, f64, f64)> for Lambdas {
	fn from((unigram, bigram, trigram): (f64, f64, f64)) -> Self {
		Self::new(unigram, bigram, trigram)
	}
}

/// Linear interpolation of unigram, bigram and trigram MLE estimates:
///
/// `P(w3 | w1 w2) = λ3 * P(w3 | w1 w2) + λ2 * P(w3 | w2) + λ1 * P(w3)`
///
/// Only trigrams can be scored; any other window gets `0.0`.
///
/// Evaluation text is tokenized without start sentinels (as for the unigram
/// sub-model) and scored in trigram windows.
#[derive(Clone, Debug)]
pub struct LinearInterpolationModel {
	lambdas: Lambdas,
	models: MleStack,
}

impl LinearInterpolationModel {
	/// Creates an untrained model. Weights are normalized to sum to 1.
	///
	/// # Errors
	/// Returns an error if the weights are negative, not finite, or sum to zero.
	pub fn new(lambdas: impl Into<Lambdas>) -> LmResult<Self> {
		let lambdas = lambdas.into().normalized()?;
		Ok(Self { lambdas, models: MleStack::new() })
	}

	/// The normalized weights.
	pub fn lambdas(&self) -> Lambdas {
		self.lambdas
	}
}

impl Scorable for LinearInterpolationModel {
	fn order(&self) -> usize {
		TRIGRAM
	}

	fn tokenization_order(&self) -> usize {
		1
	}

	fn probability(&self, ngram: &[&str]) -> f64 {
		let Some(p) = self.models.estimates(ngram) else {
			return 0.0;
		};
		self.lambdas.trigram * p.trigram + self.lambdas.bigram * p.bigram + self.lambdas.unigram * p.unigram
	}
}

impl LanguageModel for LinearInterpolationModel {
	fn vocab(&self) -> &BTreeSet<String> {
		self.models.vocab()
	}

	fn train(&mut self, text: &str) {
		self.models.train(text);
	}
}
