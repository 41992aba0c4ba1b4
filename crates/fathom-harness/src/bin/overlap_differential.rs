// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Overlap Differential Runner
//!
//! Command-line entry point for the differential validation of the
//! overlap estimator.
//!
//! Running with no arguments performs the canonical acceptance run:
//! `1e8` trials from seed `(0, 0)`, sequential, progress every `1e7`
//! trials. Positional overrides, all optional and in order:
//!
//! ```text
//! overlap-differential [TRIALS] [SEED_WORD] [SEED_STREAM] [SHARDS]
//! ```
//!
//! Exit status: `0` when every trial stayed within its budget, `1` after
//! a tolerance violation (diagnostic line on stdout), `2` on a malformed
//! command line (message and usage on stderr).

use fathom_harness::monitor::StdoutMonitor;
use fathom_harness::outcome::RunOutcome;
use fathom_harness::run::{RunConfig, run_sequential, run_sharded};
use std::num::NonZeroUsize;
use std::process::ExitCode;

#[derive(Debug)]
enum UsageError {
    TooManyArguments(usize),
    InvalidNumber {
        position: &'static str,
        value: String,
        source: std::num::ParseIntError,
    },
}

impl std::fmt::Display for UsageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UsageError::TooManyArguments(count) => {
                write!(f, "expected at most 4 positional arguments, got {}", count)
            }
            UsageError::InvalidNumber {
                position,
                value,
                source,
            } => {
                write!(f, "invalid {} '{}': {}", position, value, source)
            }
        }
    }
}

impl std::error::Error for UsageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UsageError::TooManyArguments(_) => None,
            UsageError::InvalidNumber { source, .. } => Some(source),
        }
    }
}

fn parse_field<T>(position: &'static str, value: &str) -> Result<T, UsageError>
where
    T: std::str::FromStr<Err = std::num::ParseIntError>,
{
    value.parse().map_err(|source| UsageError::InvalidNumber {
        position,
        value: value.to_owned(),
        source,
    })
}

fn parse_config(args: &[String]) -> Result<RunConfig, UsageError> {
    if args.len() > 4 {
        return Err(UsageError::TooManyArguments(args.len()));
    }

    let mut config = RunConfig::default();
    if let Some(value) = args.first() {
        config = config.with_trials(parse_field("trial count", value)?);
    }

    let seed_word = match args.get(1) {
        Some(value) => parse_field("seed word", value)?,
        None => 0,
    };
    let seed_stream = match args.get(2) {
        Some(value) => parse_field("stream selector", value)?,
        None => 0,
    };
    config = config.with_seed(seed_word, seed_stream);

    if let Some(value) = args.get(3) {
        let shards: NonZeroUsize = parse_field("shard count", value)?;
        config = config.with_shards(shards);
    }

    Ok(config)
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match parse_config(&args) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("error: {}", error);
            eprintln!("usage: overlap-differential [TRIALS] [SEED_WORD] [SEED_STREAM] [SHARDS]");
            return ExitCode::from(2);
        }
    };

    let outcome = if config.shards().get() > 1 {
        run_sharded(&config)
    } else {
        run_sequential(&config, &mut StdoutMonitor)
    };

    match outcome {
        RunOutcome::Pass(stats) => {
            println!("{}", stats);
            ExitCode::SUCCESS
        }
        RunOutcome::Fail(violation) => {
            println!("{}", violation);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_no_arguments_is_the_canonical_run() {
        let config = parse_config(&[]).unwrap();
        assert_eq!(config, RunConfig::default());
    }

    #[test]
    fn test_trial_count_override() {
        let config = parse_config(&args(&["5000"])).unwrap();
        assert_eq!(config.trials(), 5000);
        assert_eq!(config.seed_word(), 0);
        assert_eq!(config.seed_stream(), 0);
        assert_eq!(config.shards().get(), 1);
    }

    #[test]
    fn test_all_overrides() {
        let config = parse_config(&args(&["1000", "7", "3", "4"])).unwrap();
        assert_eq!(config.trials(), 1000);
        assert_eq!(config.seed_word(), 7);
        assert_eq!(config.seed_stream(), 3);
        assert_eq!(config.shards().get(), 4);
    }

    #[test]
    fn test_malformed_trial_count() {
        let error = parse_config(&args(&["many"])).unwrap_err();
        assert!(matches!(
            error,
            UsageError::InvalidNumber {
                position: "trial count",
                ..
            }
        ));
        assert!(error.to_string().starts_with("invalid trial count 'many'"));
    }

    #[test]
    fn test_zero_shards_rejected() {
        let error = parse_config(&args(&["1000", "0", "0", "0"])).unwrap_err();
        assert!(matches!(
            error,
            UsageError::InvalidNumber {
                position: "shard count",
                ..
            }
        ));
    }

    #[test]
    fn test_too_many_arguments() {
        let error = parse_config(&args(&["1", "2", "3", "4", "5"])).unwrap_err();
        assert!(matches!(error, UsageError::TooManyArguments(5)));
        assert_eq!(
            error.to_string(),
            "expected at most 4 positional arguments, got 5"
        );
    }

    #[test]
    fn test_negative_seed_rejected() {
        let error = parse_config(&args(&["1000", "-3"])).unwrap_err();
        assert!(matches!(
            error,
            UsageError::InvalidNumber {
                position: "seed word",
                ..
            }
        ));
    }
}
