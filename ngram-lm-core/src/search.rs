//! Grid search of composite model hyperparameters over a held-out set.
//!
//! Each candidate gets a fresh model trained on the training split and is
//! scored by its perplexity on the development split. The lowest perplexity
//! wins; ties keep the earliest candidate.

use std::sync::mpsc;
use std::thread;

use serde::Serialize;

use crate::error::LmResult;
use crate::model::LanguageModel;
use crate::model::backoff::{DEFAULT_ALPHA, StupidBackoffModel};
use crate::model::interpolation::{DEFAULT_LAMBDAS, Lambdas, LinearInterpolationModel};

/// Interpolation weights tried by [`find_optimal_lambdas`], in order.
pub const LAMBDA_GRID: [Lambdas; 21] = [
	Lambdas::new(0.1, 0.1, 0.8),
	Lambdas::new(0.1, 0.2, 0.7),
	Lambdas::new(0.1, 0.3, 0.6),
	Lambdas::new(0.2, 0.2, 0.6),
	Lambdas::new(0.2, 0.3, 0.5),
	Lambdas::new(0.2, 0.4, 0.4),
	Lambdas::new(0.3, 0.3, 0.4),
	Lambdas::new(0.3, 0.4, 0.3),
	Lambdas::new(0.4, 0.4, 0.2),
	Lambdas::new(0.33, 0.33, 0.34),
	Lambdas::new(0.25, 0.25, 0.5),
	Lambdas::new(0.5, 0.25, 0.25),
	Lambdas::new(0.15, 0.25, 0.6),
	Lambdas::new(0.25, 0.15, 0.6),
	Lambdas::new(0.35, 0.25, 0.4),
	Lambdas::new(0.2, 0.5, 0.3),
	Lambdas::new(0.4, 0.3, 0.3),
	Lambdas::new(0.45, 0.25, 0.3),
	Lambdas::new(0.3, 0.5, 0.2),
	Lambdas::new(0.5, 0.3, 0.2),
	Lambdas::new(0.6, 0.2, 0.2),
];

/// Backoff factors tried by [`find_optimal_alpha`], in order.
pub const ALPHA_GRID: [f64; 9] = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9];

/// Search parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchConfig {
	/// Number of candidates scored concurrently; `<= 1` runs sequentially.
	pub threads: usize,
}

impl Default for SearchConfig {
	fn default() -> Self {
		Self { threads: num_cpus::get() }
	}
}

/// One scored candidate.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Trial<P> {
	/// Candidate setting.
	pub params: P,
	/// Its development perplexity.
	pub perplexity: f64,
}

/// Result of a grid search.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SearchOutcome<P> {
	/// Winning candidate, or the default if no candidate had a finite perplexity.
	pub best: P,
	/// Development perplexity of `best` (infinite when the default was kept).
	pub perplexity: f64,
	/// Every candidate, in grid order.
	pub trials: Vec<Trial<P>>,
}

/// Picks the interpolation weights with the lowest development perplexity.
pub fn find_optimal_lambdas(train_text: &str, dev_text: &str) -> LmResult<Lambdas> {
	Ok(search_lambdas(train_text, dev_text, &SearchConfig::default())?.best)
}

/// Picks the backoff factor with the lowest development perplexity.
pub fn find_optimal_alpha(train_text: &str, dev_text: &str) -> LmResult<f64> {
	Ok(search_alpha(train_text, dev_text, &SearchConfig::default())?.best)
}

/// Scores every weight triple of [`LAMBDA_GRID`].
pub fn search_lambdas(train_text: &str, dev_text: &str, config: &SearchConfig) -> LmResult<SearchOutcome<Lambdas>> {
	grid_search(&LAMBDA_GRID, DEFAULT_LAMBDAS, config, |lambdas| {
		let mut model = LinearInterpolationModel::new(*lambdas)?;
		model.train(train_text);
		Ok(model.perplexity(dev_text))
	})
}

/// Scores every factor of [`ALPHA_GRID`].
pub fn search_alpha(train_text: &str, dev_text: &str, config: &SearchConfig) -> LmResult<SearchOutcome<f64>> {
	grid_search(&ALPHA_GRID, DEFAULT_ALPHA, config, |alpha| {
		let mut model = StupidBackoffModel::new(*alpha)?;
		model.train(train_text);
		Ok(model.perplexity(dev_text))
	})
}

/// Scores `candidates` and keeps the first one with the lowest score.
///
/// # Behavior
/// - Splits the candidates into `config.threads` chunks scored on scoped threads.
/// - Results are collected through an MPSC channel, tagged by candidate index.
/// - The reduction walks the candidates in their original order, so the
///   outcome does not depend on which thread finishes first.
///
/// # Errors
/// Returns the first error (in candidate order) raised while scoring.
fn grid_search<P, F>(candidates: &[P], default: P, config: &SearchConfig, score: F) -> LmResult<SearchOutcome<P>>
where
	P: Copy + Send + Sync + std::fmt::Debug,
	F: Fn(&P) -> LmResult<f64> + Sync,
{
	let mut scores: Vec<Option<LmResult<f64>>> = (0..candidates.len()).map(|_| None).collect();

	if config.threads <= 1 || candidates.len() <= 1 {
		for (index, params) in candidates.iter().enumerate() {
			scores[index] = Some(score(params));
		}
	} else {
		let chunk_size = candidates.len().div_ceil(config.threads.min(candidates.len()));
		let (tx, rx) = mpsc::channel();
		thread::scope(|scope| {
			for (chunk_index, chunk) in candidates.chunks(chunk_size).enumerate() {
				let tx = tx.clone();
				let score = &score;
				scope.spawn(move || {
					for (offset, params) in chunk.iter().enumerate() {
						// The receiver outlives the scope.
						let _ = tx.send((chunk_index * chunk_size + offset, score(params)));
					}
				});
			}
		});
		drop(tx);

		for (index, result) in rx.iter() {
			scores[index] = Some(result);
		}
	}

	let mut outcome = SearchOutcome { best: default, perplexity: f64::INFINITY, trials: Vec::with_capacity(candidates.len()) };
	for (params, result) in candidates.iter().zip(scores) {
		// Every index is filled once all workers have joined.
		let perplexity = result.unwrap_or(Ok(f64::INFINITY))?;
		log::info!("{:?}: dev perplexity {}", params, perplexity);
		if perplexity < outcome.perplexity {
			outcome.best = *params;
			outcome.perplexity = perplexity;
		}
		outcome.trials.push(Trial { params: *params, perplexity });
	}

	log::info!("selected {:?} (dev perplexity {})", outcome.best, outcome.perplexity);
	Ok(outcome)
}
