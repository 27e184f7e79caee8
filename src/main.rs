use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use crate::workflow::{
    render, search_or_empty, Candidate, DisplayRecord, Escaping, Overrides, PackageIndex,
    PrefixMatcher, ResultSet, Workflow, DEFAULT_CAPACITY, DEFAULT_ENDPOINT,
};

mod workflow;

const NO_PACKAGES_TITLE: &str = "No packages found";

/// Searches the Swift Package Index and prints the results as launcher feedback.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The search term
    #[arg(allow_hyphen_values = true)]
    query: String,

    /// Base URL of the package index
    #[arg(long, env = "PACKAGE_INDEX_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Maximum number of rows to show
    #[arg(long, env = "PACKAGE_INDEX_MAX_RESULTS", default_value_t = DEFAULT_CAPACITY)]
    max_results: NonZeroUsize,

    /// HTTP timeout for the search request, in seconds
    #[arg(
        long,
        env = "PACKAGE_INDEX_TIMEOUT_SECS",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout_secs: u64,

    /// Only show packages whose URL starts with the query
    #[arg(long)]
    filter: bool,

    /// Escape reserved markup characters in the output
    #[arg(long)]
    escape_markup: bool,

    /// Workflow bundle id, read from info.plist if not set
    #[arg(long, env = "alfred_workflow_bundleid")]
    bundle_id: Option<String>,

    #[arg(long, env = "alfred_workflow_cache")]
    cache_dir: Option<PathBuf>,

    #[arg(long, env = "alfred_workflow_data")]
    data_dir: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            bundle_id: self.bundle_id.clone(),
            cache: self.cache_dir.clone(),
            data: self.data_dir.clone(),
        }
    }

    fn escaping(&self) -> Escaping {
        if self.escape_markup {
            Escaping::Markup
        } else {
            Escaping::Verbatim
        }
    }
}

fn record_for(index: usize, candidate: Candidate) -> DisplayRecord {
    DisplayRecord {
        uid: format!("package_{index}"),
        arg: candidate.url.clone(),
        title: candidate.url,
        subtitle: candidate.summary,
        icon: "icon.png".into(),
        valid: true,
        autocomplete: String::new(),
        kind: String::new(),
    }
}

fn collect_results(
    query: &str,
    filter: bool,
    capacity: NonZeroUsize,
    candidates: Vec<Candidate>,
) -> ResultSet {
    let mut results = ResultSet::with_capacity(capacity);
    let matcher = PrefixMatcher::default();

    if candidates.is_empty() {
        results.set_default_title(NO_PACKAGES_TITLE);
        return results;
    }

    for (index, candidate) in candidates.into_iter().enumerate() {
        let record = record_for(index, candidate);

        if filter {
            results.add_matching(&matcher, query, record);
        } else {
            results.add(record);
        }
    }

    results
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    let workflow = Workflow::from_env(args.overrides())
        .context("failed to resolve the workflow environment")?;

    log::debug!(
        "workflow {} at {} (home {}, cache {}, data {})",
        workflow.bundle_id(),
        workflow.path().display(),
        workflow.home().display(),
        workflow.cache().display(),
        workflow.data().display(),
    );

    let provider =
        PackageIndex::new_with_endpoint(&args.endpoint, Duration::from_secs(args.timeout_secs));

    let candidates = search_or_empty(&provider, &args.query);
    let results = collect_results(&args.query, args.filter, args.max_results, candidates);

    log::debug!("showing {} of at most {} results", results.count(), results.capacity());

    println!("{}", render(&results, args.escaping()));

    Ok(())
}
