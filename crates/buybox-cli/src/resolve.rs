//! `resolve` and `validate` command handlers.

use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use buybox_core::{collect_product_ids, AppConfig, BatchSummary, ClassificationStatus};
use buybox_scraper::{Resolver, ResolverConfig};
use clap::{Args, ValueEnum};

use crate::render::{ordered_records, render_json, render_table};

/// Where identifiers come from. With neither positional identifiers nor
/// `--file`, stdin is read.
#[derive(Debug, Args)]
pub struct InputArgs {
    /// Identifiers, separated by spaces, commas or newlines
    pub ids: Vec<String>,

    /// Read identifiers from a file
    #[arg(long, short)]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Only print rows with these statuses (repeatable)
    #[arg(long = "status", value_enum)]
    pub statuses: Vec<StatusFilter>,

    /// Worker pool size
    #[arg(long)]
    pub workers: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Immediate retries inside each fetch cycle
    #[arg(long)]
    pub retries: Option<u32>,

    /// Highest recovery cycle index before giving up
    #[arg(long)]
    pub cycles: Option<u32>,

    /// Base of the exponential backoff between cycles
    #[arg(long)]
    pub backoff_base: Option<f64>,

    /// Marketplace origin, e.g. https://www.amazon.com.br
    #[arg(long)]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusFilter {
    OperatorFulfilled,
    ThirdParty,
    NoOffer,
    Reprocess,
}

impl From<StatusFilter> for ClassificationStatus {
    fn from(filter: StatusFilter) -> Self {
        match filter {
            StatusFilter::OperatorFulfilled => ClassificationStatus::OperatorFulfilled,
            StatusFilter::ThirdParty => ClassificationStatus::ThirdPartyOffer,
            StatusFilter::NoOffer => ClassificationStatus::NoOffer,
            StatusFilter::Reprocess => ClassificationStatus::NeedsReprocess,
        }
    }
}

/// Applies per-invocation overrides on top of the environment config.
///
/// # Errors
///
/// Returns an error if an override is out of range.
pub(crate) fn apply_overrides(
    mut config: AppConfig,
    args: &ResolveArgs,
) -> anyhow::Result<AppConfig> {
    if let Some(workers) = args.workers {
        anyhow::ensure!(workers > 0, "--workers must be at least 1");
        config.max_workers = workers;
    }
    if let Some(timeout) = args.timeout_secs {
        anyhow::ensure!(timeout > 0, "--timeout-secs must be at least 1");
        config.request_timeout_secs = timeout;
    }
    if let Some(retries) = args.retries {
        config.retries_per_cycle = retries;
    }
    if let Some(cycles) = args.cycles {
        config.max_blocked_cycles = cycles;
    }
    if let Some(base) = args.backoff_base {
        anyhow::ensure!(
            base.is_finite() && base > 0.0,
            "--backoff-base must be a finite number greater than 0"
        );
        config.blocked_backoff_base = base;
    }
    if let Some(base_url) = &args.base_url {
        config.marketplace_base_url = base_url.trim_end_matches('/').to_owned();
    }
    Ok(config)
}

/// Gathers raw input text from positional identifiers, `--file`, or stdin.
fn read_raw_input(input: &InputArgs) -> anyhow::Result<Vec<String>> {
    let mut raw = input.ids.clone();
    if let Some(path) = &input.file {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read identifiers from {}", path.display()))?;
        raw.push(content);
    }
    if raw.is_empty() {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("failed to read identifiers from stdin")?;
        raw.push(content);
    }
    Ok(raw)
}

pub(crate) fn run_validate(input: &InputArgs) -> anyhow::Result<()> {
    let ids = collect_product_ids(read_raw_input(input)?);
    for id in &ids {
        println!("{id}");
    }
    tracing::info!(valid = ids.len(), "validated identifiers");
    Ok(())
}

pub(crate) async fn run_resolve(config: AppConfig, args: &ResolveArgs) -> anyhow::Result<()> {
    let config = apply_overrides(config, args)?;
    let ids = collect_product_ids(read_raw_input(&args.input)?);
    if ids.is_empty() {
        println!("no valid identifiers found; nothing to resolve");
        return Ok(());
    }

    let resolver = Resolver::new(ResolverConfig::from_app_config(&config))?;
    let started = Instant::now();
    let results = resolver.resolve_all(&ids).await;
    let summary = BatchSummary::from_records(results.values(), started.elapsed());

    let filter: Vec<ClassificationStatus> =
        args.statuses.iter().copied().map(Into::into).collect();
    let rows = ordered_records(&ids, &results, &filter);

    match args.format {
        OutputFormat::Table => print!("{}", render_table(&rows, &summary)),
        OutputFormat::Json => println!("{}", render_json(&rows, &summary)?),
    }
    Ok(())
}
