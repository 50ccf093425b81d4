use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::{env, io};

use crate::error::LmResult;

/// Reads a whole text file into memory.
pub fn read_text<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents)
}

/// Normalize a folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub fn normalize_folder(input: &str) -> PathBuf {
	if input == "." || input == "./" {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		PathBuf::from(input)
	}
}

/// File names of the three corpus splits inside a data directory.
#[derive(Clone, Debug, PartialEq)]
pub struct CorpusFiles {
	pub train: String,
	pub dev: String,
	pub test: String,
}

impl Default for CorpusFiles {
	/// Penn Treebank layout.
	fn default() -> Self {
		Self {
			train: "ptb.train.txt".to_owned(),
			dev: "ptb.valid.txt".to_owned(),
			test: "ptb.test.txt".to_owned(),
		}
	}
}

/// Raw text of the training, development and test splits.
#[derive(Clone, Debug, Default)]
pub struct Corpus {
	pub train: String,
	pub dev: String,
	pub test: String,
}

impl Corpus {
	/// Loads the three splits from `dir`.
	///
	/// # Errors
	/// Returns an error if any split cannot be read.
	pub fn load<P: AsRef<Path>>(dir: P, files: &CorpusFiles) -> LmResult<Self> {
		let dir = dir.as_ref();
		let corpus = Self {
			train: read_text(dir.join(&files.train))?,
			dev: read_text(dir.join(&files.dev))?,
			test: read_text(dir.join(&files.test))?,
		};
		log::info!(
			"loaded corpus from {}: {} / {} / {} bytes",
			dir.display(),
			corpus.train.len(),
			corpus.dev.len(),
			corpus.test.len()
		);
		Ok(corpus)
	}
}
