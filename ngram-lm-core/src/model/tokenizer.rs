use regex::Regex;
use std::sync::LazyLock;

/// Sentinel marking the start of a sentence.
pub const START_TOKEN: &str = "<s>";

/// Sentinel marking the end of a sentence.
pub const END_TOKEN: &str = "</s>";

static SENTENCE_END: LazyLock<Regex> = LazyLock::new(|| {
	// Constant pattern, cannot fail to compile.
	Regex::new(r"([.!?])").expect("valid sentence-end pattern")
});

/// Returns `true` for either sentence sentinel.
pub fn is_sentinel(token: &str) -> bool {
	token == START_TOKEN || token == END_TOKEN
}

/// Turns raw text into a token sequence with sentence boundaries for an
/// order-`n` model.
///
/// - `.`, `!` and `?` are split off and replaced by [`END_TOKEN`]
/// - Every other whitespace-separated token is lowercased
/// - Each sentence is opened with `n - 1` [`START_TOKEN`]s
/// - A trailing sentence without terminal punctuation is still closed
///
/// ```
/// use ngram_lm_core::model::tokenizer::preprocess;
///
/// assert_eq!(
/// 	preprocess("Dogs bark. Cats meow!", 3),
/// 	["<s>", "<s>", "dogs", "bark", "</s>", "<s>", "<s>", "cats", "meow", "</s>"],
/// );
/// ```
pub fn preprocess(text: &str, n: usize) -> Vec<String> {
	let spaced = SENTENCE_END.replace_all(text, " $1 ");
	let start_count = n.saturating_sub(1);

	let mut tokens = Vec::new();
	let mut in_sentence = false;
	for raw in spaced.split_whitespace() {
		if matches!(raw, "." | "!" | "?") {
			// Every terminal mark closes a sentence, even an empty one ("...").
			tokens.push(END_TOKEN.to_owned());
			in_sentence = false;
			continue;
		}

		if !in_sentence {
			tokens.extend(std::iter::repeat_n(START_TOKEN.to_owned(), start_count));
			in_sentence = true;
		}
		tokens.push(raw.to_lowercase());
	}

	if in_sentence {
		tokens.push(END_TOKEN.to_owned());
	}

	tokens
}
