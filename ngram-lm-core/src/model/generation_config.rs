use super::tokenizer::START_TOKEN;

/// Default maximum number of tokens drawn per generated text.
pub const DEFAULT_MAX_LENGTH: usize = 30;

/// Default number of trailing tokens used as context (trigram models).
pub const DEFAULT_CONTEXT_SIZE: usize = 2;

/// Tokens a generation starts from.
///
/// # Variants
/// - `Sentinels`: `context_size` start sentinels, i.e. a fresh sentence.
/// - `Custom(tokens)`: continue from the given tokens.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum StartTokens {
	#[default]
	Sentinels,
	Custom(Vec<String>),
}

/// Parameters of [`TextGenerator`](super::generator::TextGenerator).
///
/// # Invariants
/// - With `seed: Some(_)`, a generator over the same trained model always
///   produces the same texts in the same order.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationConfig {
	/// Maximum number of tokens drawn per text.
	pub max_length: usize,

	/// Number of trailing tokens forming the context of the next draw.
	pub context_size: usize,

	/// Where generation starts.
	pub start_tokens: StartTokens,

	/// Seed of the random source; `None` draws one from the OS.
	pub seed: Option<u64>,
}

impl Default for GenerationConfig {
	fn default() -> Self {
		Self {
			max_length: DEFAULT_MAX_LENGTH,
			context_size: DEFAULT_CONTEXT_SIZE,
			start_tokens: StartTokens::Sentinels,
			seed: None,
		}
	}
}

impl GenerationConfig {
	/// Sets the maximum number of tokens drawn per text.
	pub fn with_max_length(mut self, max_length: usize) -> Self {
		self.max_length = max_length;
		self
	}

	/// Makes generation reproducible.
	pub fn with_seed(mut self, seed: u64) -> Self {
		self.seed = Some(seed);
		self
	}

	/// Starts every generation from `tokens`.
	pub fn with_start_tokens<I, S>(mut self, tokens: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.start_tokens = StartTokens::Custom(tokens.into_iter().map(Into::into).collect());
		self
	}

	/// Resolves the start tokens.
	pub fn initial_tokens(&self) -> Vec<String> {
		match &self.start_tokens {
			StartTokens::Sentinels => vec![START_TOKEN.to_owned(); self.context_size],
			StartTokens::Custom(tokens) => tokens.clone(),
		}
	}
}
