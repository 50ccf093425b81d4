use super::counts::CountStore;

/// Probability estimate of an n-gram from trained counts.
///
/// This is the polymorphism point of [`NGramModel`](super::ngram_model::NGramModel):
/// a model cannot exist without one.
pub trait Estimator {
	/// Returns the probability of `ngram` given its own context
	/// (`ngram[..len - 1]`, empty for unigrams).
	fn probability(&self, counts: &CountStore, vocab_size: usize, ngram: &[&str]) -> f64;
}

/// Maximum likelihood estimate: `count(ngram) / count(context)`.
///
/// Unseen contexts get `0.0`, which makes perplexity infinite.
#[derive(Clone, Copy, Debug, Default)]
pub struct Mle;

impl Estimator for Mle {
	fn probability(&self, counts: &CountStore, _vocab_size: usize, ngram: &[&str]) -> f64 {
		let Some((_, context)) = ngram.split_last() else {
			return 0.0;
		};
		let context_count = counts.context_count(context);
		if context_count == 0 {
			return 0.0;
		}
		counts.ngram_count(ngram) as f64 / context_count as f64
	}
}

/// Laplace smoothing: `(count(ngram) + 1) / (count(context) + |V|)`.
///
/// Strictly positive as soon as the vocabulary is not empty.
#[derive(Clone, Copy, Debug, Default)]
pub struct AddOne;

impl Estimator for AddOne {
	fn probability(&self, counts: &CountStore, vocab_size: usize, ngram: &[&str]) -> f64 {
		let Some((_, context)) = ngram.split_last() else {
			return 0.0;
		};
		let denominator = counts.context_count(context) + vocab_size;
		if denominator == 0 {
			return 0.0;
		}
		(counts.ngram_count(ngram) + 1) as f64 / denominator as f64
	}
}
