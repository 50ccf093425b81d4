use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::LanguageModel;
use super::generation_config::GenerationConfig;
use super::tokenizer::{END_TOKEN, START_TOKEN};

/// Generates text by sampling a trained model token by token.
///
/// # Responsibilities
/// - Score every vocabulary word as the continuation of the current context
/// - Draw the next word proportionally to these scores
/// - Stop on the end sentinel, on an empty candidate list, or after
///   `max_length` draws
///
/// Scores are used as relative weights and never normalized, so
/// unnormalized models (Stupid Backoff) are sampled as-is.
///
/// The random source is explicit: [`TextGenerator::new`] seeds a `StdRng`
/// from the config, [`TextGenerator::with_rng`] takes any `Rng`.
pub struct TextGenerator<'m, M: ?Sized, R = StdRng> {
	model: &'m M,
	config: GenerationConfig,
	rng: R,
}

impl<'m, M: LanguageModel + ?Sized> TextGenerator<'m, M, StdRng> {
	/// Creates a generator seeded from `config.seed`, or from the OS if unset.
	pub fn new(model: &'m M, config: GenerationConfig) -> Self {
		let rng = match config.seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_os_rng(),
		};
		Self::with_rng(model, config, rng)
	}
}

impl<'m, M: LanguageModel + ?Sized, R: Rng> TextGenerator<'m, M, R> {
	/// Creates a generator drawing from `rng`.
	pub fn with_rng(model: &'m M, config: GenerationConfig, rng: R) -> Self {
		Self { model, config, rng }
	}

	pub fn config(&self) -> &GenerationConfig {
		&self.config
	}

	/// Generates one text with the configured length and start tokens.
	pub fn generate(&mut self) -> String {
		let start = self.config.initial_tokens();
		self.generate_from(self.config.max_length, &start)
	}

	/// Generates one text of at most `max_length` drawn tokens after `start_tokens`.
	///
	/// Sentinels are stripped from the returned, space-separated text.
	pub fn generate_from(&mut self, max_length: usize, start_tokens: &[String]) -> String {
		let model = self.model;
		let context_size = self.config.context_size;
		let mut generated: Vec<String> = start_tokens.to_vec();

		for _ in 0..max_length {
			let mut ngram: Vec<&str> = if generated.len() >= context_size {
				generated[generated.len() - context_size..].iter().map(String::as_str).collect()
			} else {
				Vec::new()
			};

			let mut candidates: Vec<(&str, f64)> = Vec::new();
			for word in model.vocab().iter().map(String::as_str) {
				if word == START_TOKEN {
					continue;
				}
				ngram.push(word);
				let p = model.probability(&ngram);
				ngram.pop();
				if p > 0.0 {
					candidates.push((word, p));
				}
			}

			let Some(next) = Self::sample(&mut self.rng, &candidates) else {
				break;
			};
			let next = next.to_owned();
			let done = next == END_TOKEN;
			generated.push(next);
			if done {
				break;
			}
		}

		generated
			.iter()
			.filter(|token| !token.contains(START_TOKEN) && !token.contains(END_TOKEN))
			.map(String::as_str)
			.collect::<Vec<_>>()
			.join(" ")
	}

	/// Draws a candidate with probability proportional to its weight.
	///
	/// This method performs:
	/// - an O(n) scan over the candidates
	/// - a cumulative subtraction to select a bucket
	///
	/// Returns `None` if there is no candidate.
	fn sample<'w>(rng: &mut R, candidates: &[(&'w str, f64)]) -> Option<&'w str> {
		let total: f64 = candidates.iter().map(|(_, weight)| weight).sum();
		if !(total > 0.0 && total.is_finite()) {
			return None;
		}

		let mut r = rng.random_range(0.0..total);

		let mut fallback = None;
		for &(word, weight) in candidates {
			if r < weight {
				return Some(word);
			}
			r -= weight;
			fallback = Some(word);
		}

		// Rounding can leave `r` just above the last bucket.
		fallback
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::backoff::StupidBackoffModel;
	use crate::model::generation_config::StartTokens;
	use crate::model::ngram_model::MleModel;

	fn mle_trigram(text: &str) -> MleModel {
		let mut model = MleModel::new(3).unwrap();
		model.train(text);
		model
	}

	#[test]
	fn test_single_continuation_is_deterministic() {
		let model = mle_trigram("a b c.");
		for seed in 0..20 {
			let mut generator = TextGenerator::new(&model, GenerationConfig::default().with_seed(seed));
			assert_eq!(generator.generate(), "a b c");
		}
	}

	#[test]
	fn test_zero_length_is_empty() {
		let model = mle_trigram("a b c. d e f.");
		let mut generator = TextGenerator::new(&model, GenerationConfig::default().with_max_length(0));
		assert_eq!(generator.generate(), "");
	}

	#[test]
	fn test_max_length_bounds_output() {
		let model = mle_trigram("a b c d e f g h.");
		let mut generator = TextGenerator::new(&model, GenerationConfig::default().with_max_length(3).with_seed(1));
		assert_eq!(generator.generate(), "a b c");
	}

	#[test]
	fn test_stops_without_candidates() {
		let model = mle_trigram("a b c.");
		let config = GenerationConfig::default().with_start_tokens(["x", "y"]).with_seed(3);
		let mut generator = TextGenerator::new(&model, config);
		assert_eq!(generator.generate(), "x y");
	}

	#[test]
	fn test_output_has_no_sentinels() {
		let mut model = StupidBackoffModel::new(0.4).unwrap();
		model.train("the cat sat. the dog ran! a bird flew? the cat ran.");
		let mut generator = TextGenerator::new(&model, GenerationConfig::default().with_max_length(22).with_seed(42));
		for _ in 0..50 {
			let text = generator.generate();
			assert!(!text.contains("<s>"));
			assert!(!text.contains("</s>"));
			assert!(text.split_whitespace().count() <= 22);
		}
	}

	#[test]
	fn test_same_seed_same_texts() {
		let mut model = StupidBackoffModel::new(0.4).unwrap();
		model.train("the cat sat. the dog ran! a bird flew? the cat ran.");
		let config = GenerationConfig::default().with_seed(9);
		let mut first = TextGenerator::new(&model, config.clone());
		let mut second = TextGenerator::new(&model, config);
		for _ in 0..10 {
			assert_eq!(first.generate(), second.generate());
		}
	}

	#[test]
	fn test_short_context_scores_single_tokens() {
		// With fewer tokens than the context size, candidates are scored alone.
		let mut model = MleModel::new(1).unwrap();
		model.train("z z z.");
		let config = GenerationConfig {
			max_length: 1,
			start_tokens: StartTokens::Custom(Vec::new()),
			seed: Some(5),
			..Default::default()
		};
		let mut generator = TextGenerator::new(&model, config);
		let text = generator.generate();
		assert!(text == "z" || text.is_empty());
	}

	#[test]
	fn test_sample_follows_weights() {
		let mut rng = StdRng::seed_from_u64(11);
		let candidates = [("rare", 1.0), ("common", 9.0)];
		let mut common = 0;
		for _ in 0..1000 {
			if TextGenerator::<MleModel, StdRng>::sample(&mut rng, &candidates) == Some("common") {
				common += 1;
			}
		}
		assert!((850..=950).contains(&common), "{common}");
		assert_eq!(TextGenerator::<MleModel, StdRng>::sample(&mut rng, &[]), None);
	}
}
