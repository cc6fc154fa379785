use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use wydatki_core::{
    exclude, filter_by_category, sort_transactions, PreferenceStore, SortColumn, SortDirection,
    Transaction, TransactionFilter,
};
use wydatki_ingest::{ingest_file, validate::is_valid_csv_path};
use wydatki_stats::{breakdown, StatsProvider};

mod config;
mod prefs_store;
mod remote;
mod report;
mod state;

use config::Config;
use prefs_store::JsonFileStore;
use remote::RemoteStats;

#[derive(Parser, Debug)]
#[command(
    name = "wydatki",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("WYDATKI_BUILD_SHA"), ")"),
    about = "Ledger CSV ingestion and spending statistics"
)]
struct Cli {
    /// More log output on stderr (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse ledger exports and list the accepted transactions
    Ingest {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Only this category
        #[arg(long)]
        category: Option<String>,

        /// amount, category, source, description, paid, cash or date
        #[arg(long)]
        sort: Option<SortColumn>,

        /// Sort descending
        #[arg(long, requires = "sort")]
        desc: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Payment summary plus category and source breakdowns
    Summary {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Exclude a category (repeatable; added to stored preferences)
        #[arg(long = "exclude-category")]
        exclude_categories: Vec<String>,

        /// Exclude a source (repeatable; added to stored preferences)
        #[arg(long = "exclude-source")]
        exclude_sources: Vec<String>,

        /// Ignore stored exclusions
        #[arg(long)]
        no_prefs: bool,

        /// Entries per breakdown (default: report.top_n)
        #[arg(long)]
        top: Option<usize>,

        #[arg(long)]
        json: bool,
    },

    /// Stored preferences (exclusions, file selection)
    Prefs {
        #[command(subcommand)]
        command: PrefsCommand,
    },

    /// Query the remote statistics service
    Remote {
        /// Service URL (default: remote.base_url / WYDATKI_API_URL)
        #[arg(long)]
        url: Option<String>,

        #[command(subcommand)]
        command: RemoteCommand,
    },

    /// Configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum PrefsCommand {
    Show,
    /// Reset to defaults
    Clear,
    ExcludeCategory { name: String },
    IncludeCategory { name: String },
    ExcludeSource { name: String },
    IncludeSource { name: String },
    /// Replace the remote file selection
    SelectFiles { ids: Vec<String> },
}

#[derive(Subcommand, Debug)]
enum RemoteCommand {
    Files,
    File { id: String },
    DeleteFile { id: String },
    Transactions(FilterArgs),
    Summary(FilterArgs),
    /// Largest categories, `report.top_n` of them
    Categories(FilterArgs),
    /// Largest sources, `report.top_n` of them
    Sources(FilterArgs),
    TopCategory(FilterArgs),
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    Show,
}

#[derive(Args, Debug, Default)]
struct FilterArgs {
    #[arg(long = "file-id")]
    file_ids: Vec<String>,

    #[arg(long = "exclude-category")]
    exclude_categories: Vec<String>,

    #[arg(long = "exclude-source")]
    exclude_sources: Vec<String>,

    /// Only paid (true) or unpaid (false) transactions
    #[arg(long)]
    paid: Option<bool>,

    /// Inclusive lower bound, YYYY-MM-DD
    #[arg(long)]
    from: Option<String>,

    /// Inclusive upper bound, YYYY-MM-DD
    #[arg(long)]
    to: Option<String>,

    /// Ignore stored file selection and exclusions
    #[arg(long)]
    no_prefs: bool,
}

impl FilterArgs {
    fn into_filter(self, store: &dyn PreferenceStore) -> Result<TransactionFilter> {
        let mut filter = if self.no_prefs {
            TransactionFilter::default()
        } else {
            store.load().context("load preferences")?.to_filter()
        };
        if !self.file_ids.is_empty() {
            filter.file_ids = self.file_ids;
        }
        filter.exclude_categories.extend(self.exclude_categories);
        filter.exclude_sources.extend(self.exclude_sources);
        filter.is_paid = self.paid;
        filter.date_from = self.from;
        filter.date_to = self.to;
        Ok(filter)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cfg = config::load_config()?;
    let store = JsonFileStore::new(state::prefs_path()?);

    match cli.command {
        Command::Ingest {
            files,
            category,
            sort,
            desc,
            json,
        } => {
            let mut txns = filter_by_category(&ingest_all(&cfg, &files)?, category.as_deref());
            if let Some(column) = sort {
                let direction = if desc { SortDirection::Desc } else { SortDirection::Asc };
                txns = sort_transactions(&txns, column, direction);
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&txns)?);
            } else {
                print!("{}", report::render_transactions(&txns));
            }
        }

        Command::Summary {
            files,
            exclude_categories,
            exclude_sources,
            no_prefs,
            top,
            json,
        } => {
            let txns = ingest_all(&cfg, &files)?;

            let (mut cats, mut srcs) = if no_prefs {
                (HashSet::new(), HashSet::new())
            } else {
                let prefs = store.load().context("load preferences")?;
                (prefs.excluded_category_set(), prefs.excluded_source_set())
            };
            cats.extend(exclude_categories);
            srcs.extend(exclude_sources);

            let kept = exclude(&txns, &cats, &srcs);
            let b = breakdown(&kept, &cfg.report.unknown_source_label);
            if json {
                println!("{}", serde_json::to_string_pretty(&b)?);
            } else {
                if kept.len() != txns.len() {
                    println!("Excluded {} of {} transactions\n", txns.len() - kept.len(), txns.len());
                }
                print!("{}", report::render_breakdown(&b, top.unwrap_or(cfg.report.top_n)));
            }
        }

        Command::Prefs { command } => run_prefs(&store, command)?,

        Command::Remote { url, command } => {
            let base_url = url.unwrap_or_else(|| cfg.remote.base_url.clone());
            let mut remote = RemoteStats::new(&base_url, Duration::from_secs(cfg.remote.timeout_secs))?;
            run_remote(&mut remote, &store, command, cfg.report.top_n)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Ingest every file and concatenate the results in argument order.
fn ingest_all(cfg: &Config, files: &[PathBuf]) -> Result<Vec<Transaction>> {
    let mut all = Vec::new();
    for path in files {
        if !path.exists() {
            bail!("CSV not found: {}", path.display());
        }
        if !is_valid_csv_path(path) {
            bail!("not a .csv file: {}", path.display());
        }
        let (record, txns) = ingest_file(path, &cfg.csv)
            .with_context(|| format!("ingesting {}", path.display()))?;
        tracing::info!(file = %record.name, id = %record.id, count = txns.len(), "file ingested");
        all.extend(txns);
    }
    Ok(all)
}

fn run_prefs(store: &dyn PreferenceStore, command: PrefsCommand) -> Result<()> {
    if let PrefsCommand::Clear = command {
        store.clear().context("clear preferences")?;
        println!("Preferences reset");
        return Ok(());
    }

    let mut prefs = store.load().context("load preferences")?;
    match command {
        PrefsCommand::Show | PrefsCommand::Clear => {}
        PrefsCommand::ExcludeCategory { name } => add_unique(&mut prefs.excluded_categories, name),
        PrefsCommand::IncludeCategory { name } => prefs.excluded_categories.retain(|c| *c != name),
        PrefsCommand::ExcludeSource { name } => add_unique(&mut prefs.excluded_sources, name),
        PrefsCommand::IncludeSource { name } => prefs.excluded_sources.retain(|s| *s != name),
        PrefsCommand::SelectFiles { ids } => prefs.selected_file_ids = ids,
    }
    store.save(&prefs).context("save preferences")?;

    println!("{}", serde_json::to_string_pretty(&prefs)?);
    if prefs.has_active_filters() {
        println!("\n(exclusions active)");
    }
    Ok(())
}

fn add_unique(list: &mut Vec<String>, value: String) {
    if !list.contains(&value) {
        list.push(value);
    }
}

fn run_remote(
    remote: &mut RemoteStats,
    store: &dyn PreferenceStore,
    command: RemoteCommand,
    top_n: usize,
) -> Result<()> {
    match command {
        RemoteCommand::Files => {
            for f in remote.files()? {
                println!(
                    "{}  {}  uploaded_at={}  transactions={}",
                    f.id,
                    f.name,
                    f.uploaded_at,
                    f.transaction_count.map(|c| c.to_string()).unwrap_or_else(|| "-".into())
                );
            }
        }
        RemoteCommand::File { id } => match remote.file(&id)? {
            Some(f) => println!("{}", serde_json::to_string_pretty(&f)?),
            None => bail!("file not found: {id}"),
        },
        RemoteCommand::DeleteFile { id } => {
            remote.delete_file(&id)?;
            println!("Deleted {id}");
        }
        RemoteCommand::Transactions(args) => {
            let txns = remote.transactions(&args.into_filter(store)?)?;
            print!("{}", report::render_transactions(&txns));
        }
        RemoteCommand::Summary(args) => {
            let s = remote.summary(&args.into_filter(store)?)?;
            print!("{}", report::render_summary(&s));
        }
        RemoteCommand::Categories(args) => {
            let groups = remote.category_totals(&args.into_filter(store)?)?;
            print!("{}", report::render_groups("Categories", &groups, top_n));
        }
        RemoteCommand::Sources(args) => {
            let groups = remote.source_totals(&args.into_filter(store)?)?;
            print!("{}", report::render_groups("Sources", &groups, top_n));
        }
        RemoteCommand::TopCategory(args) => match remote.top_category(&args.into_filter(store)?)? {
            Some(top) => println!("{} {:.1}% ({} transactions)", top.key, top.percentage, top.count),
            None => println!("No data"),
        },
    }
    Ok(())
}
