use super::Scorable;
use super::tokenizer::preprocess;

/// Computes the perplexity of `model` on `text`.
///
/// `text` is tokenized at `model.tokenization_order()` and scored in windows
/// of `model.order()` tokens: `exp(-mean(ln p))`.
///
/// # Returns
/// - `f64::INFINITY` as soon as one window has probability `0.0`
/// - `f64::INFINITY` if the text yields no window at all
pub fn perplexity<M: Scorable + ?Sized>(model: &M, text: &str) -> f64 {
	let order = model.order();
	let tokens = preprocess(text, model.tokenization_order());
	let tokens: Vec<&str> = tokens.iter().map(String::as_str).collect();

	let mut log_prob_sum = 0.0;
	let mut windows = 0usize;
	for window in tokens.windows(order.max(1)) {
		let p = model.probability(window);
		if p <= 0.0 {
			log::debug!("zero probability for {:?}, perplexity is infinite", window);
			return f64::INFINITY;
		}
		log_prob_sum += p.ln();
		windows += 1;
	}

	if windows == 0 {
		return f64::INFINITY;
	}
	(-log_prob_sum / windows as f64).exp()
}
