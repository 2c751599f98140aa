//! Command line entry point: collect the UFC roster, resolve fighters on
//! Sherdog, and write the results as CSV or JSON.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Mutex;

use clap::{Parser, Subcommand, ValueEnum};
use sherdog_scraper::config::{DEFAULT_MAX_CONCURRENCY, DEFAULT_SHERDOG_URL, DEFAULT_UFC_URL};
use sherdog_scraper::export::{self, CsvEncoding};
use sherdog_scraper::{
    BatchReport, CrawlOptions, Fighter, FighterQuery, Gender, Result, ScraperConfig, SherdogClient,
};
use tracing::{error, info};
use tracing_subscriber::{filter::LevelFilter, fmt};

/// Scrape MMA fighter records from Sherdog and the UFC roster.
#[derive(Parser)]
#[command(name = "sherdog")]
#[command(about = "Scrape MMA fighter records from Sherdog and the UFC roster")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Write logs to this file instead of stderr.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Sherdog site root.
    #[arg(long, global = true, default_value = DEFAULT_SHERDOG_URL)]
    sherdog_url: String,

    /// UFC site root.
    #[arg(long, global = true, default_value = DEFAULT_UFC_URL)]
    ufc_url: String,

    /// Maximum number of fighters resolved at the same time.
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    max_concurrency: usize,

    /// `User-Agent` header sent with every request.
    #[arg(long, global = true)]
    user_agent: Option<String>,

    /// Encoding of CSV output and of `fighters --input` (`latin1` or `utf8`).
    #[arg(long, global = true, default_value = "latin1")]
    encoding: CsvEncoding,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect the active UFC roster.
    Roster {
        /// Save the roster in this format; prints JSON to stdout when omitted.
        #[arg(long, value_enum, requires = "output")]
        format: Option<OutputFormat>,
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Resolve and scrape every fighter listed in a roster CSV.
    Fighters {
        /// CSV with a header row, then name, division and nickname columns.
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value = ";", value_parser = parse_delimiter)]
        delimiter: u8,
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
        #[arg(long)]
        output: PathBuf,
    },

    /// Collect the UFC roster, then resolve and scrape every fighter on it.
    Ufc {
        /// Only scrape one gender partition (`men` or `women`).
        #[arg(long)]
        gender: Option<Gender>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
        #[arg(long)]
        output: PathBuf,
    },

    /// Resolve a single fighter and print the record as JSON.
    Search {
        name: String,
        #[arg(long, default_value = "NA")]
        weight_class: String,
        #[arg(long, default_value = "NA")]
        nickname: String,
    },

    /// Walk Sherdog profile ids upward until too many in a row are empty.
    Crawl {
        #[arg(long, default_value_t = 0)]
        start: u64,
        #[arg(long, default_value_t = 10)]
        max_misses: u32,
        /// `json` merges `{name: [fights]}` entries into an existing file.
        #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,
        #[arg(long)]
        output: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

fn parse_delimiter(text: &str) -> std::result::Result<u8, String> {
    match text.as_bytes() {
        [byte] => Ok(*byte),
        _ => Err(format!("delimiter must be a single ASCII character, got {text:?}")),
    }
}

fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn init_tracing(level: LevelFilter, log_file: Option<&Path>) -> io::Result<()> {
    let result = match log_file {
        Some(path) => {
            let file = File::options().create(true).append(true).open(path)?;
            let subscriber = fmt()
                .with_max_level(level)
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .finish();
            tracing::subscriber::set_global_default(subscriber)
        }
        None => {
            let subscriber = fmt()
                .with_max_level(level)
                .with_target(false)
                .with_writer(io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)
        }
    };
    if result.is_err() {
        tracing::warn!("Tracing subscriber already set; skipping re-initialization.");
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(level_for(cli.verbose), cli.log_file.as_deref()) {
        eprintln!("error: cannot open log file: {e}");
        process::exit(1);
    }

    if let Err(e) = run(cli).await {
        error!(error = %e, "command failed");
        eprintln!("error: {e}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = ScraperConfig::default()
        .with_sherdog_base_url(&cli.sherdog_url)
        .with_ufc_base_url(&cli.ufc_url)
        .with_max_concurrency(cli.max_concurrency);
    if let Some(user_agent) = &cli.user_agent {
        config = config.with_user_agent(user_agent);
    }
    let client = SherdogClient::from_config(config)?;
    let encoding = cli.encoding;

    match cli.command {
        Commands::Roster { format, output } => {
            let roster = client.get_roster().await?;
            println!(
                "Found {} men and {} women on the UFC roster",
                roster.men.len(),
                roster.women.len()
            );
            match (format, output) {
                (Some(OutputFormat::Csv), Some(path)) => {
                    let summary = export::write_roster_csv(create(&path)?, &roster, encoding)?;
                    info!(path = %path.display(), written = summary.written, dropped = summary.dropped, "saved roster csv");
                }
                (Some(OutputFormat::Json), Some(path)) => {
                    let mut writer = create(&path)?;
                    export::write_roster_json(&mut writer, &roster)?;
                    writer.flush()?;
                    info!(path = %path.display(), "saved roster json");
                }
                _ => print_json(&export::roster_document(&roster))?,
            }
        }
        Commands::Fighters {
            input,
            delimiter,
            format,
            output,
        } => {
            let queries = export::read_queries_csv(&input, delimiter, encoding)?;
            info!(path = %input.display(), queries = queries.len(), "loaded queries");
            let report = client.scrape_fighters(queries).await;
            print_summary(&report);
            save_fighters(&report.fighters, format, &output, encoding)?;
        }
        Commands::Ufc {
            gender,
            format,
            output,
        } => {
            let roster = client.get_roster().await?;
            let queries = match gender {
                Some(gender) => roster.into_partition_queries(gender),
                None => roster.into_queries(),
            };
            let report = client.scrape_fighters(queries).await;
            print_summary(&report);
            save_fighters(&report.fighters, format, &output, encoding)?;
        }
        Commands::Search {
            name,
            weight_class,
            nickname,
        } => {
            let query = FighterQuery::new(&name, &weight_class, &nickname);
            match client.find_fighter(&query).await? {
                Some(fighter) => print_json(&export::fighters_document(&[fighter])?)?,
                None => println!("No unique Sherdog profile found for {query}"),
            }
        }
        Commands::Crawl {
            start,
            max_misses,
            format,
            output,
        } => {
            let fighters = client.crawl(CrawlOptions { start, max_misses }).await;
            println!("Crawled {} fighters", fighters.len());
            match format {
                OutputFormat::Csv => save_fighters(&fighters, format, &output, encoding)?,
                OutputFormat::Json => export::merge_fight_history_json(&output, &fighters)?,
            }
        }
    }
    Ok(())
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    Ok(BufWriter::new(File::create(path)?))
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

fn print_summary(report: &BatchReport) {
    println!(
        "Scraped {} of {} fighters ({} unresolved, {} failed, {} unvalidated)",
        report.fighters.len(),
        report.requested,
        report.unresolved.len(),
        report.failed,
        report.unvalidated()
    );
    for query in &report.unresolved {
        println!("  unresolved: {query}");
    }
}

fn save_fighters(
    fighters: &[Fighter],
    format: OutputFormat,
    path: &Path,
    encoding: CsvEncoding,
) -> Result<()> {
    match format {
        OutputFormat::Csv => {
            let summary = export::write_fighters_csv(create(path)?, fighters, encoding)?;
            info!(
                path = %path.display(),
                written = summary.written,
                dropped = summary.dropped,
                "saved fighters csv"
            );
        }
        OutputFormat::Json => {
            let mut writer = create(path)?;
            export::write_fighters_json(&mut writer, fighters)?;
            writer.flush()?;
            info!(path = %path.display(), fighters = fighters.len(), "saved fighters json");
        }
    }
    Ok(())
}
