mod logging;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use srcdex::output;
use srcdex::utils::progress::Spinner;
use srcdex::{ContentMatch, IndexConfig, SearchIndex};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "srcdex")]
#[command(about = "In-memory full-text and filename search over a source tree")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Root directory to index
    #[arg(short, long, default_value = ".", global = true)]
    path: PathBuf,

    /// JSON file overriding the default index settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank files by how well their content matches the query
    Search {
        /// Query words
        #[arg(required = true, trailing_var_arg = true)]
        query: Vec<String>,

        /// Maximum number of results
        #[arg(short = 'n', long, default_value_t = 20)]
        max_results: usize,
    },
    /// Fuzzy-match file names
    Files {
        /// Characters that must appear in order in the file name
        query: String,

        /// Maximum number of results
        #[arg(short = 'n', long, default_value_t = 20)]
        max_results: usize,
    },
    /// Show index statistics
    Stats,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose)?;

    let config = match &cli.config {
        Some(path) => IndexConfig::load(path)?,
        None => IndexConfig::default(),
    };
    let root = cli
        .path
        .canonicalize()
        .with_context(|| format!("Invalid path: {}", cli.path.display()))?;

    let index = SearchIndex::with_config(config);
    let spinner = Spinner::start(&format!("Indexing {}", root.display()));
    index.build_index(&root);
    spinner.finish(format!("Indexed {} files", index.indexed_file_count()));

    let color = !cli.no_color;
    match cli.command {
        Commands::Search { query, max_results } => {
            let matches: Vec<ContentMatch> = index
                .search_content(&query.join(" "), max_results)
                .into_iter()
                .map(|m| ContentMatch {
                    path: relative_to(&m.path, &root),
                    score: m.score,
                })
                .collect();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&matches)?);
            } else {
                output::print_content_matches(&matches, color)?;
            }
        }
        Commands::Files { query, max_results } => {
            let paths: Vec<PathBuf> = index
                .search_file_name(&query, max_results)
                .iter()
                .map(|p| relative_to(p, &root))
                .collect();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&paths)?);
            } else {
                output::print_file_matches(&paths, color)?;
            }
        }
        Commands::Stats => {
            let report = index.last_build();
            let stats = index.stats();
            if cli.json {
                let value = serde_json::json!({ "build": report, "index": stats });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                output::print_stats(report.as_ref(), &stats, color)?;
            }
        }
    }

    Ok(())
}

fn relative_to(path: &Path, root: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}
