//! Sleep sort driver
//!
//! Generates a random input, runs the sorter, checks the result against a
//! reference sort and renders the report:
//!
//! ```text
//! Sorted Array: [0, 3, 3, 7, 9]
//! Time: 0.0012
//! Sorted: True
//! ```

use std::ffi::OsString;
use std::fmt;
use std::time::Duration;

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use sleepsort_core::SortError;
use sleepsort_engine::{Backend, SleepSorter, SortOutcome, SorterConfig, TieBreak};

/// Sort a random array by sleeping on each element
#[derive(Parser, Debug, Clone)]
#[command(name = "sleepsort", version, about)]
pub struct Args {
    /// Number of elements to generate
    pub size: usize,

    /// Inclusive upper bound for each element (lower bound is 0)
    #[arg(value_parser = clap::value_parser!(i64).range(0..))]
    pub maximum: i64,

    /// Seed for reproducible input
    #[arg(long)]
    pub seed: Option<u64>,

    /// Task backend: cooperative or threads
    #[arg(long, default_value_t = Backend::Cooperative)]
    pub backend: Backend,

    /// Ordering of equal values: input-order or arrival
    #[arg(long, default_value_t = TieBreak::InputOrder)]
    pub tie_break: TieBreak,

    /// Abort the sort after this long (e.g. "500ms", "2s")
    #[arg(long, value_parser = humantime::parse_duration)]
    pub timeout: Option<Duration>,
}

impl Args {
    pub fn sorter_config(&self) -> SorterConfig {
        SorterConfig {
            backend: self.backend,
            tie_break: self.tie_break,
            timeout: self.timeout,
        }
    }
}

/// Driver errors
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Argument(#[from] clap::Error),

    #[error(transparent)]
    Sort(#[from] SortError),
}

/// Parse command-line arguments without exiting the process
pub fn parse_args<I, T>(args: I) -> Result<Args, CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Ok(Args::try_parse_from(args)?)
}

/// `size` values drawn uniformly from `0..=maximum`
pub fn generate_input<R: Rng>(size: usize, maximum: i64, rng: &mut R) -> Vec<i64> {
    (0..size).map(|_| rng.gen_range(0..=maximum)).collect()
}

/// Reference ordering the sorter's output is checked against
pub fn reference_sort(values: &[i64]) -> Vec<i64> {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    sorted
}

/// Outcome of one driver run
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    pub outcome: SortOutcome,
    /// Output matches the reference sort position for position
    pub sorted: bool,
}

impl Report {
    pub fn new(outcome: SortOutcome, reference: &[i64]) -> Self {
        let sorted = outcome.values == reference;
        Report { outcome, sorted }
    }

    /// Everything written to stdout for a successful run: the results
    /// banner followed by the report
    pub fn stdout_text(&self) -> String {
        format!("\nResults:\n\n{self}\n")
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sorted Array: {:?}", self.outcome.values)?;
        writeln!(f, "Time: {:.4}", self.outcome.elapsed_secs())?;
        write!(f, "Sorted: {}", if self.sorted { "True" } else { "False" })
    }
}

/// Generate, sort and check one input
pub async fn run(args: &Args) -> Result<Report, CliError> {
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let input = generate_input(args.size, args.maximum, &mut rng);
    tracing::info!(
        size = args.size,
        maximum = args.maximum,
        backend = %args.backend,
        "generated input"
    );

    let sorter = SleepSorter::new(args.sorter_config());
    let outcome = sorter.sort_async(&input).await?;

    let reference = reference_sort(&input);
    let report = Report::new(outcome, &reference);
    tracing::info!(elapsed = ?report.outcome.elapsed, sorted = report.sorted, "sort finished");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positional() {
        let args = parse_args(["sleepsort", "10", "99"]).unwrap();
        assert_eq!(args.size, 10);
        assert_eq!(args.maximum, 99);
        assert_eq!(args.backend, Backend::Cooperative);
        assert_eq!(args.tie_break, TieBreak::InputOrder);
        assert!(args.seed.is_none());
        assert!(args.timeout.is_none());
    }

    #[test]
    fn test_parse_options() {
        let args = parse_args([
            "sleepsort",
            "3",
            "7",
            "--seed",
            "42",
            "--backend",
            "threads",
            "--tie-break",
            "arrival",
            "--timeout",
            "250ms",
        ])
        .unwrap();

        let config = args.sorter_config();
        assert_eq!(args.seed, Some(42));
        assert_eq!(config.backend, Backend::Threads);
        assert_eq!(config.tie_break, TieBreak::Arrival);
        assert_eq!(config.timeout, Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_parse_rejects_bad_arguments() {
        assert!(matches!(
            parse_args(["sleepsort", "10"]),
            Err(CliError::Argument(_))
        ));
        assert!(matches!(
            parse_args(["sleepsort", "ten", "5"]),
            Err(CliError::Argument(_))
        ));
        assert!(matches!(
            parse_args(["sleepsort", "10", "-5"]),
            Err(CliError::Argument(_))
        ));
        assert!(matches!(
            parse_args(["sleepsort", "10", "5", "--backend", "fibers"]),
            Err(CliError::Argument(_))
        ));
    }

    #[test]
    fn test_generate_input_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let values = generate_input(500, 9, &mut rng);

        assert_eq!(values.len(), 500);
        assert!(values.iter().all(|v| (0..=9).contains(v)));
    }

    #[test]
    fn test_generate_input_reproducible() {
        let a = generate_input(20, 1_000, &mut StdRng::seed_from_u64(42));
        let b = generate_input(20, 1_000, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);

        let zeros = generate_input(5, 0, &mut StdRng::seed_from_u64(1));
        assert_eq!(zeros, vec![0; 5]);
    }

    #[test]
    fn test_report_format() {
        let outcome = SortOutcome {
            values: vec![0, 3, 3, 7, 9],
            elapsed: Duration::from_micros(1_234),
        };
        let report = Report::new(outcome, &[0, 3, 3, 7, 9]);

        assert_eq!(
            report.to_string(),
            "Sorted Array: [0, 3, 3, 7, 9]\nTime: 0.0012\nSorted: True"
        );
    }

    #[test]
    fn test_report_detects_mismatch() {
        let outcome = SortOutcome {
            values: vec![2, 1],
            elapsed: Duration::ZERO,
        };
        let report = Report::new(outcome, &reference_sort(&[2, 1]));

        assert!(!report.sorted);
        assert!(report.to_string().ends_with("Sorted: False"));
        assert!(report.to_string().contains("Time: 0.0000"));
    }

    #[test]
    fn test_report_empty() {
        let outcome = SortOutcome {
            values: vec![],
            elapsed: Duration::ZERO,
        };
        let report = Report::new(outcome, &[]);
        assert!(report.to_string().starts_with("Sorted Array: []\n"));
        assert!(report.sorted);
    }

    #[test]
    fn test_stdout_text_carries_banner() {
        let outcome = SortOutcome {
            values: vec![1, 2],
            elapsed: Duration::ZERO,
        };
        let report = Report::new(outcome, &[1, 2]);

        assert_eq!(
            report.stdout_text(),
            "\nResults:\n\nSorted Array: [1, 2]\nTime: 0.0000\nSorted: True\n"
        );
    }

    #[tokio::test]
    async fn test_run_seeded() {
        let args = parse_args(["sleepsort", "16", "50000", "--seed", "3"]).unwrap();
        let report = run(&args).await.unwrap();

        let expected = reference_sort(&generate_input(16, 50_000, &mut StdRng::seed_from_u64(3)));
        assert_eq!(reference_sort(&report.outcome.values), expected);
        assert_eq!(report.sorted, report.outcome.values == expected);
    }

    #[tokio::test]
    async fn test_run_sub_millisecond_values_report_sorted() {
        for backend in ["cooperative", "threads"] {
            let args =
                parse_args(["sleepsort", "24", "900000", "--seed", "5", "--backend", backend]).unwrap();
            let report = run(&args).await.unwrap();

            assert!(report.sorted, "{backend}: {:?}", report.outcome.values);
            assert!(report.to_string().ends_with("Sorted: True"));
        }
    }

    #[tokio::test]
    async fn test_run_timeout_is_reported() {
        let args = parse_args([
            "sleepsort",
            "4",
            "5000000000",
            "--seed",
            "11",
            "--timeout",
            "20ms",
        ])
        .unwrap();

        match run(&args).await {
            Err(CliError::Sort(SortError::Timeout { total, .. })) => assert_eq!(total, 4),
            Ok(report) => assert!(report.outcome.elapsed < Duration::from_millis(20)),
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
}
