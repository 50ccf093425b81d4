use ngram_lm_core::LanguageModel;
use ngram_lm_core::model::backoff::StupidBackoffModel;
use ngram_lm_core::model::generation_config::GenerationConfig;
use ngram_lm_core::model::generator::TextGenerator;
use ngram_lm_core::model::interpolation::LinearInterpolationModel;
use ngram_lm_core::model::ngram_model::{AddOneModel, MleModel};
use ngram_lm_core::search::{SearchConfig, search_alpha, search_lambdas};

const TRAIN: &str = "The quick brown fox jumps over the lazy dog. The lazy dog sleeps in the sun. \
	A quick red fox runs over the hill! Does the brown dog sleep? The fox sleeps in the den.";
const DEV: &str = "The lazy fox sleeps in the sun. A brown dog runs over the hill.";
const TEST: &str = "The quick dog sleeps over the hill. The red fox jumps!";

#[test]
fn mle_models_of_every_order() {
	for n in 1..=4 {
		let mut model = MleModel::new(n).unwrap();
		model.train(TRAIN);
		let perplexity = model.perplexity(TEST);
		assert!(perplexity.is_infinite() || perplexity >= 1.0, "order {n}: {perplexity}");
	}

	// Unigrams only fail on unseen words, and every test word was seen.
	let mut unigram = MleModel::new(1).unwrap();
	unigram.train(TRAIN);
	assert!(unigram.perplexity(TEST).is_finite());

	// "quick dog" never occurs in training.
	let mut bigram = MleModel::new(2).unwrap();
	bigram.train(TRAIN);
	assert_eq!(bigram.perplexity(TEST), f64::INFINITY);
}

#[test]
fn add_one_scores_unseen_text() {
	let mut model = AddOneModel::new(3).unwrap();
	model.train(TRAIN);
	assert!(model.perplexity(TEST).is_finite());

	let own = model.perplexity(TRAIN);
	assert!(own.is_finite());
	assert!(own >= 1.0);
}

#[test]
fn tuned_composites_and_generation() {
	let config = SearchConfig { threads: 2 };

	let lambdas = search_lambdas(TRAIN, DEV, &config).unwrap();
	let mut interpolation = LinearInterpolationModel::new(lambdas.best).unwrap();
	interpolation.train(TRAIN);
	assert!(interpolation.perplexity(TEST).is_finite());

	let alpha = search_alpha(TRAIN, DEV, &config).unwrap();
	let mut backoff = StupidBackoffModel::new(alpha.best).unwrap();
	backoff.train(TRAIN);
	assert!(backoff.perplexity(TEST).is_finite());

	let mut generator = TextGenerator::new(&backoff, GenerationConfig::default().with_max_length(22).with_seed(2024));
	for _ in 0..5 {
		let sentence = generator.generate();
		assert!(!sentence.contains("<s>") && !sentence.contains("</s>"));
		for word in sentence.split_whitespace() {
			assert!(backoff.vocab().contains(word), "{word} not in vocabulary");
		}
	}
}
