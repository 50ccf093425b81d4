use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;

use ngram_lm_core::LanguageModel;
use ngram_lm_core::io::{Corpus, CorpusFiles, normalize_folder};
use ngram_lm_core::model::backoff::StupidBackoffModel;
use ngram_lm_core::model::generation_config::GenerationConfig;
use ngram_lm_core::model::generator::TextGenerator;
use ngram_lm_core::model::interpolation::{Lambdas, LinearInterpolationModel};
use ngram_lm_core::model::ngram_model::{AddOneModel, MleModel};
use ngram_lm_core::search::{SearchConfig, SearchOutcome, search_alpha, search_lambdas};

/// Trains and evaluates n-gram language models, then generates text.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Directory holding the corpus splits ("." for the working directory).
    #[arg(long, default_value = "data")]
    data_dir: String,

    #[arg(long, default_value = "ptb.train.txt")]
    train: String,

    #[arg(long, default_value = "ptb.valid.txt")]
    dev: String,

    #[arg(long, default_value = "ptb.test.txt")]
    test: String,

    /// Number of sentences to generate.
    #[arg(long, default_value_t = 5)]
    sentences: usize,

    /// Maximum number of tokens per generated sentence.
    #[arg(long, default_value_t = 22)]
    max_length: usize,

    /// Seed for text generation (random if omitted).
    #[arg(long)]
    seed: Option<u64>,

    /// Worker threads for the hyperparameter searches (defaults to the CPU count).
    #[arg(long)]
    threads: Option<usize>,

    /// Print a JSON report instead of plain text.
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report {
    mle: Vec<(usize, f64)>,
    add_one: f64,
    lambdas: SearchOutcome<Lambdas>,
    interpolation: f64,
    alpha: SearchOutcome<f64>,
    backoff: f64,
    sentences: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let data_dir: PathBuf = normalize_folder(&args.data_dir);
    let files = CorpusFiles { train: args.train.clone(), dev: args.dev.clone(), test: args.test.clone() };
    let corpus = Corpus::load(&data_dir, &files)
        .with_context(|| format!("failed to load corpus from {}", data_dir.display()))?;

    let mut search_config = SearchConfig::default();
    if let Some(threads) = args.threads {
        search_config.threads = threads;
    }

    // Maximum likelihood models (N = 1, 2, 3, 4).
    // Higher orders usually score INF: unseen n-grams in the test split get zero probability.
    log::info!("training MLE models");
    let mut mle = Vec::new();
    for n in 1..=4 {
        let mut model = MleModel::new(n)?;
        model.train(&corpus.train);
        mle.push((n, model.perplexity(&corpus.test)));
    }

    log::info!("training Add-1 smoothed trigram model");
    let mut add_one_model = AddOneModel::new(3)?;
    add_one_model.train(&corpus.train);
    let add_one = add_one_model.perplexity(&corpus.test);

    log::info!("searching interpolation weights");
    let lambdas = search_lambdas(&corpus.train, &corpus.dev, &search_config)?;
    let mut interpolation_model = LinearInterpolationModel::new(lambdas.best)?;
    interpolation_model.train(&corpus.train);
    let interpolation = interpolation_model.perplexity(&corpus.test);

    log::info!("searching backoff factor");
    let alpha = search_alpha(&corpus.train, &corpus.dev, &search_config)?;
    let mut backoff_model = StupidBackoffModel::new(alpha.best)?;
    backoff_model.train(&corpus.train);
    let backoff = backoff_model.perplexity(&corpus.test);

    let mut generation_config = GenerationConfig::default().with_max_length(args.max_length);
    generation_config.seed = args.seed;
    let mut generator = TextGenerator::new(&backoff_model, generation_config);
    let sentences: Vec<String> = (0..args.sentences).map(|_| generator.generate()).collect();

    let report = Report { mle, add_one, lambdas, interpolation, alpha, backoff, sentences };
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &Report) {
    println!("\n1. MLE models");
    for (n, perplexity) in &report.mle {
        println!("MLE {}-gram perplexity: {}", n, perplexity);
    }

    println!("\n2. Add-1 smoothed trigram model");
    println!("Add-1 smoothed trigram perplexity: {}", report.add_one);

    println!("\n3. Linear interpolation model");
    println!(
        "Optimal lambdas: ({}, {}, {})",
        report.lambdas.best.unigram, report.lambdas.best.bigram, report.lambdas.best.trigram
    );
    println!("Linear interpolation perplexity: {}", report.interpolation);

    println!("\n4. Stupid backoff model");
    println!("Optimal alpha: {}", report.alpha.best);
    println!("Stupid backoff perplexity: {}", report.backoff);

    println!("\n5. Generated sentences");
    for (i, sentence) in report.sentences.iter().enumerate() {
        println!("{}. {}", i + 1, sentence);
    }
}
