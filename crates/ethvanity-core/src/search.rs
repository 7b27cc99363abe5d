//! Vanity search engine

use std::fmt;
use std::panic;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, Sender};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use ethvanity_crypto::{hex, KeyError};
use ethvanity_pattern::{combined_difficulty, Pattern, PatternError, PatternMatcher};

use crate::cancel::CancelToken;
use crate::source::{Candidate, KeypairSource, OsKeypairSource};
use crate::stats::SearchStats;

/// Search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Number of worker threads (0 = one per logical core)
    pub threads: usize,
    /// Draws per worker between limit checks and cooperative yields
    pub batch_size: usize,
    /// Maximum total attempts (0 = unlimited)
    pub max_attempts: u64,
    /// Maximum time in seconds (0 = unlimited)
    pub max_time_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threads: 0, // Auto-detect
            batch_size: 1000,
            max_attempts: 0,
            max_time_secs: 0,
        }
    }
}

/// The matched account, in canonical display encodings.
///
/// The only place key material crosses the engine boundary.
#[derive(Clone, Serialize)]
pub struct VanityWallet {
    /// EIP-55 checksummed address
    pub address: String,
    /// Private key as 0x-prefixed hex
    pub private_key: String,
    /// Uncompressed public key as 0x-prefixed hex
    pub public_key: String,
}

impl VanityWallet {
    fn from_candidate(candidate: &Candidate) -> Self {
        Self {
            address: candidate.address.to_checksummed(),
            private_key: format!("0x{}", hex::encode(candidate.keypair.private_key_bytes())),
            public_key: format!(
                "0x{}",
                hex::encode(candidate.keypair.public_key_uncompressed())
            ),
        }
    }
}

// A wallet that ends up in a debug log must not spill the key.
impl fmt::Debug for VanityWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VanityWallet")
            .field("address", &self.address)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Terminal result of one search. Once produced, the run is over.
#[derive(Debug, Clone, Serialize)]
pub enum SearchOutcome {
    /// The first published match, with the total attempts across workers
    Matched { wallet: VanityWallet, attempts: u64 },
    /// The caller's token was observed before any match
    Cancelled { attempts: u64 },
    /// `max_attempts` was reached without a match
    AttemptsExhausted { attempts: u64 },
    /// `max_time_secs` elapsed without a match
    TimedOut { attempts: u64 },
}

impl SearchOutcome {
    /// Attempts performed over the life of the search
    pub fn attempts(&self) -> u64 {
        match self {
            Self::Matched { attempts, .. }
            | Self::Cancelled { attempts }
            | Self::AttemptsExhausted { attempts }
            | Self::TimedOut { attempts } => *attempts,
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, Self::Matched { .. })
    }
}

#[derive(Error, Debug)]
pub enum SearchError {
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error(transparent)]
    Key(#[from] KeyError),
}

fn os_source() -> OsKeypairSource {
    OsKeypairSource
}

/// Vanity search engine.
///
/// Fans the generate-derive-test loop out over a fixed pool of workers
/// sharing one immutable predicate, one attempt counter, and one
/// cancellation signal. The first worker to match publishes exactly once;
/// everyone else observes the stop flag within an iteration.
pub struct VanitySearch<F = fn() -> OsKeypairSource> {
    matcher: PatternMatcher,
    config: SearchConfig,
    difficulty: f64,
    source_factory: F,
}

impl VanitySearch {
    /// Create a search over the OS entropy source.
    ///
    /// Fails before any keypair is drawn if the patterns are invalid.
    pub fn new(patterns: Vec<Pattern>, config: SearchConfig) -> Result<Self, SearchError> {
        Self::with_source(patterns, config, os_source as fn() -> OsKeypairSource)
    }
}

impl<F, S> VanitySearch<F>
where
    F: Fn() -> S + Sync,
    S: KeypairSource,
{
    /// Create a search over a custom keypair source. The factory runs once
    /// per worker, so draws never share state between workers.
    pub fn with_source(
        patterns: Vec<Pattern>,
        config: SearchConfig,
        source_factory: F,
    ) -> Result<Self, SearchError> {
        let difficulty = combined_difficulty(&patterns);
        let matcher = PatternMatcher::new(patterns)?;
        Ok(Self {
            matcher,
            config,
            difficulty,
            source_factory,
        })
    }

    /// Expected attempts until a match for the configured patterns
    pub fn difficulty(&self) -> f64 {
        self.difficulty
    }

    pub fn matcher(&self) -> &PatternMatcher {
        &self.matcher
    }

    /// Run to a terminal outcome, observing `cancel` cooperatively.
    pub fn run(&self, cancel: &CancelToken) -> Result<SearchOutcome, SearchError> {
        let stats = SearchStats::new();
        self.run_inner(cancel, &stats)
    }

    /// Run while reporting progress at a bounded rate.
    ///
    /// The search itself runs on a background thread; `callback` is invoked
    /// from the calling thread roughly every 100ms and once more with the
    /// settled attempt count after termination.
    pub fn run_with_progress<C>(
        &self,
        cancel: &CancelToken,
        mut callback: C,
    ) -> Result<SearchOutcome, SearchError>
    where
        C: FnMut(&SearchStats),
    {
        let stats = SearchStats::new();

        let result = thread::scope(|scope| {
            let handle = scope.spawn(|| self.run_inner(cancel, &stats));

            while stats.is_running() && !handle.is_finished() {
                callback(&stats);
                thread::sleep(Duration::from_millis(100));
            }

            match handle.join() {
                Ok(result) => result,
                Err(payload) => panic::resume_unwind(payload),
            }
        });

        callback(&stats);
        result
    }

    fn run_inner(
        &self,
        cancel: &CancelToken,
        stats: &SearchStats,
    ) -> Result<SearchOutcome, SearchError> {
        let threads = if self.config.threads == 0 {
            num_cpus::get()
        } else {
            self.config.threads
        };
        debug!(
            threads,
            batch_size = self.config.batch_size,
            difficulty = self.difficulty,
            "starting vanity search"
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .expect("failed to build search thread pool");

        // Single-writer completion channel: first publisher wins.
        let (tx, rx): (Sender<Candidate>, Receiver<Candidate>) = bounded(1);
        let fatal: Mutex<Option<KeyError>> = Mutex::new(None);

        pool.install(|| {
            (0..threads).into_par_iter().for_each(|_| {
                let mut source = (self.source_factory)();
                if let Err(err) = self.worker_loop(&mut source, stats, cancel, &tx) {
                    let mut slot = fatal.lock().unwrap_or_else(|e| e.into_inner());
                    slot.get_or_insert(err);
                }
            });
        });

        let attempts = stats.attempts();

        if let Ok(candidate) = rx.try_recv() {
            debug!(attempts, "match found");
            return Ok(SearchOutcome::Matched {
                wallet: VanityWallet::from_candidate(&candidate),
                attempts,
            });
        }
        if let Some(err) = fatal.into_inner().unwrap_or_else(|e| e.into_inner()) {
            return Err(err.into());
        }
        if cancel.is_cancelled() {
            return Ok(SearchOutcome::Cancelled { attempts });
        }
        if self.config.max_time_secs > 0
            && stats.elapsed().as_secs() >= self.config.max_time_secs
        {
            return Ok(SearchOutcome::TimedOut { attempts });
        }
        Ok(SearchOutcome::AttemptsExhausted { attempts })
    }

    fn worker_loop(
        &self,
        source: &mut S,
        stats: &SearchStats,
        cancel: &CancelToken,
        tx: &Sender<Candidate>,
    ) -> Result<(), KeyError> {
        let max_attempts = self.config.max_attempts;
        let max_time = self.config.max_time_secs;

        while stats.is_running() {
            if cancel.is_cancelled() {
                stats.stop();
                break;
            }
            if max_time > 0 && stats.elapsed().as_secs() >= max_time {
                stats.stop();
                break;
            }

            // Size the batch against the attempts cap so the total lands on it.
            let batch = if max_attempts > 0 {
                let done = stats.attempts();
                if done >= max_attempts {
                    stats.stop();
                    break;
                }
                self.config.batch_size.min((max_attempts - done) as usize)
            } else {
                self.config.batch_size
            };

            let mut drawn = 0u64;
            let mut matched = None;
            for _ in 0..batch {
                // Two relaxed loads per draw; negligible next to the EC
                // scalar-mul behind `draw`.
                if !stats.is_running() || cancel.is_cancelled() {
                    break;
                }
                let candidate = match source.draw() {
                    Ok(candidate) => candidate,
                    Err(err) => {
                        stats.add_attempts(drawn);
                        stats.stop();
                        return Err(err);
                    }
                };
                drawn += 1;
                if self.matcher.matches(&candidate.address.to_hex()).is_some() {
                    matched = Some(candidate);
                    break;
                }
            }
            stats.add_attempts(drawn);

            if let Some(candidate) = matched {
                // First publisher wins; a simultaneous second match is
                // dropped here and never surfaces.
                let _ = tx.try_send(candidate);
                stats.mark_found();
                break;
            }

            // Let other work scheduled on this core run between batches.
            thread::yield_now();
        }

        Ok(())
    }
}
