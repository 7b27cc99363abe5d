//! Ethvanity CLI
//!
//! Ethereum vanity wallet address generator.

use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use ethvanity_core::{
    format_difficulty, CancelToken, Pattern, PatternKind, SearchConfig, SearchOutcome,
    VanitySearch,
};

#[derive(Parser)]
#[command(name = "ethvanity")]
#[command(version = "0.1.0")]
#[command(about = "Ethereum vanity wallet address generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for a vanity address
    Generate {
        /// Pattern to search for (hex characters); repeat for an OR of patterns
        #[arg(short, long, required = true)]
        pattern: Vec<String>,

        /// Where the pattern must appear in the address
        #[arg(short = 'k', long, default_value = "suffix")]
        kind: PatternKindArg,

        /// Number of worker threads (0 = auto)
        #[arg(long, default_value = "0")]
        threads: usize,

        /// Draws per worker between cancellation checks
        #[arg(long, default_value = "1000")]
        batch_size: usize,

        /// Maximum total attempts (0 = unlimited)
        #[arg(long, default_value = "0")]
        max_attempts: u64,

        /// Maximum time in seconds (0 = unlimited)
        #[arg(long, default_value = "0")]
        max_time: u64,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Suppress the banner and live stats line
        #[arg(short, long)]
        quiet: bool,
    },

    /// Measure key generation throughput
    Benchmark {
        /// Duration in seconds
        #[arg(short, long, default_value = "5")]
        duration: u64,

        /// Number of worker threads (0 = auto)
        #[arg(long, default_value = "0")]
        threads: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PatternKindArg {
    Suffix,
    Prefix,
    Contains,
}

impl From<PatternKindArg> for PatternKind {
    fn from(arg: PatternKindArg) -> Self {
        match arg {
            PatternKindArg::Suffix => PatternKind::Suffix,
            PatternKindArg::Prefix => PatternKind::Prefix,
            PatternKindArg::Contains => PatternKind::Contains,
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            pattern,
            kind,
            threads,
            batch_size,
            max_attempts,
            max_time,
            json,
            quiet,
        } => cmd_generate(
            &pattern,
            kind.into(),
            threads,
            batch_size,
            max_attempts,
            max_time,
            json,
            quiet,
        ),
        Commands::Benchmark { duration, threads } => cmd_benchmark(duration, threads),
    }
}

fn cmd_generate(
    pattern_strings: &[String],
    kind: PatternKind,
    threads: usize,
    batch_size: usize,
    max_attempts: u64,
    max_time: u64,
    json_output: bool,
    quiet: bool,
) -> Result<()> {
    let patterns = pattern_strings
        .iter()
        .map(|p| Pattern::new(kind, p))
        .collect::<Result<Vec<_>, _>>()?;

    let config = SearchConfig {
        threads,
        batch_size,
        max_attempts,
        max_time_secs: max_time,
    };
    let search = VanitySearch::new(patterns, config)?;
    let difficulty = search.difficulty();

    // Ctrl-C cancels the token; workers finish their current draw and stop.
    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    ctrlc::set_handler(move || {
        eprintln!("\nstopping...");
        handler_token.cancel();
    })
    .ok();

    if !json_output && !quiet {
        eprintln!("ethvanity v0.1.0");
        eprintln!(
            "Pattern: {} ({:?}, case-insensitive)",
            pattern_strings.join(", "),
            kind
        );
        eprintln!(
            "Threads: {}",
            if threads == 0 { num_cpus::get() } else { threads }
        );
        eprintln!("Difficulty: {}", format_difficulty(difficulty));
        eprintln!();
    }

    let started = Instant::now();
    let outcome = if quiet || json_output {
        search.run(&cancel)?
    } else {
        let outcome = search.run_with_progress(&cancel, |stats| {
            eprint!("\r{}", stats.format(difficulty));
        })?;
        eprintln!();
        outcome
    };
    let elapsed = started.elapsed().as_secs_f64();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&outcome, elapsed);
    }

    if !outcome.is_matched() {
        std::process::exit(1);
    }
    Ok(())
}

fn cmd_benchmark(duration_secs: u64, threads: usize) -> Result<()> {
    eprintln!("Benchmarking key generation for {duration_secs} seconds...");
    eprintln!(
        "Threads: {}",
        if threads == 0 { num_cpus::get() } else { threads }
    );
    eprintln!();

    // A full-length pattern will not match within any realistic run, so the
    // search runs until the time limit.
    let pattern = Pattern::suffix(&"f".repeat(40))?;
    let config = SearchConfig {
        threads,
        max_time_secs: duration_secs,
        ..Default::default()
    };
    let search = VanitySearch::new(vec![pattern], config)?;
    let difficulty = search.difficulty();

    let outcome = search.run_with_progress(&CancelToken::new(), |stats| {
        eprint!("\r{}", stats.format(difficulty));
    })?;
    eprintln!();

    let attempts = outcome.attempts();
    eprintln!(
        "\nBenchmark complete: {} keys in {}s ({:.2} Mkey/s)",
        attempts,
        duration_secs,
        attempts as f64 / duration_secs.max(1) as f64 / 1_000_000.0
    );

    Ok(())
}

fn print_outcome(outcome: &SearchOutcome, elapsed: f64) {
    match outcome {
        SearchOutcome::Matched { wallet, attempts } => {
            println!();
            println!("MATCH FOUND!");
            println!("{:-<60}", "");
            println!("Address:     {}", wallet.address);
            println!("Private Key: {}", wallet.private_key);
            println!("Public Key:  {}", wallet.public_key);
            println!("{:-<60}", "");
            println!("Attempts:    {attempts}");
            println!("Time:        {elapsed:.2}s");
            println!(
                "Speed:       {:.2} Mkey/s",
                *attempts as f64 / elapsed.max(f64::EPSILON) / 1_000_000.0
            );
        }
        SearchOutcome::Cancelled { attempts } => {
            eprintln!("Search cancelled after {attempts} attempts.");
        }
        SearchOutcome::AttemptsExhausted { attempts } => {
            eprintln!("No match within the attempt limit ({attempts} attempts).");
        }
        SearchOutcome::TimedOut { attempts } => {
            eprintln!("No match within the time limit ({attempts} attempts).");
        }
    }
}
