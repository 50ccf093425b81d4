use std::collections::HashMap;

/// Owned lookup key of a context. The empty context (unigrams) is `[]`.
fn key(tokens: &[&str]) -> Vec<String> {
	tokens.iter().map(|token| (*token).to_owned()).collect()
}

/// Observed continuations of a single context.
///
/// Conceptually a node of a Markov chain: outgoing edges are the tokens seen
/// after the context, weighted by how often they were observed.
///
/// ## Invariants
/// - `total` equals the sum of all transition counts
/// - Each transition count is strictly positive
#[derive(Clone, Debug, Default)]
struct ContextState {
	/// Next token => occurrences. Example: { "bark" => 42, "meow" => 3 }
	transitions: HashMap<String, usize>,
	total: usize,
}

impl ContextState {
	/// Records one occurrence of `next` after this context.
	fn add_transition(&mut self, next: &str) {
		*self.transitions.entry(next.to_owned()).or_insert(0) += 1;
		self.total += 1;
	}
}

/// N-gram and context counts of one model instance.
///
/// N-grams are stored grouped by their context (all tokens but the last),
/// so the context count is always the sum of the counts of the n-grams
/// sharing it.
#[derive(Clone, Debug, Default)]
pub struct CountStore {
	contexts: HashMap<Vec<String>, ContextState>,
	distinct: usize,
}

impl CountStore {
	/// Creates an empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Counts one occurrence of `ngram` (and therefore of its context).
	///
	/// Empty n-grams are ignored.
	pub fn add(&mut self, ngram: &[&str]) {
		let Some((last, context)) = ngram.split_last() else {
			return;
		};

		let state = self.contexts.entry(key(context)).or_default();
		if !state.transitions.contains_key(*last) {
			self.distinct += 1;
		}
		state.add_transition(last);
	}

	/// Number of times `ngram` was observed.
	pub fn ngram_count(&self, ngram: &[&str]) -> usize {
		let Some((last, context)) = ngram.split_last() else {
			return 0;
		};
		self.contexts
			.get(&key(context))
			.and_then(|state| state.transitions.get(*last))
			.copied()
			.unwrap_or(0)
	}

	/// Number of n-grams observed with the given context.
	pub fn context_count(&self, context: &[&str]) -> usize {
		self.contexts.get(&key(context)).map_or(0, |state| state.total)
	}

	/// Iterates over the tokens observed after `context` with their counts.
	pub fn continuations<'a>(&'a self, context: &[&str]) -> impl Iterator<Item = (&'a str, usize)> + use<'a> {
		self.contexts
			.get(&key(context))
			.into_iter()
			.flat_map(|state| state.transitions.iter().map(|(token, count)| (token.as_str(), *count)))
	}

	/// Number of distinct n-grams.
	pub fn len(&self) -> usize {
		self.distinct
	}

	/// Returns `true` if nothing was counted yet.
	pub fn is_empty(&self) -> bool {
		self.distinct == 0
	}
}
