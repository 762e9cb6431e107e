//! # vigha CLI
//!
//! Converts land areas between metric and Gujarat units, keeps a short
//! history of settled conversions, evaluates calculator expressions, and asks
//! a language model about district-specific standards.
//!
//! ```bash
//! vigha convert 2.5 --unit hectare
//! vigha seven-twelve --hectare 1 --are 20 --sqm 5
//! vigha calc "10+5*2"
//! vigha keys 5 0 % 5 =
//! vigha history --page home --clear
//! vigha suggest --area "2.5 hectare" --location Anand
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use vigha::{
    calc::{
        eval::{evaluate, format_result},
        keypad::{Calculator, ERROR_DISPLAY, Key},
    },
    config::{self, Config},
    core::{
        convert::{ConversionInput, ConversionResult, convert_area},
        history::RecordOutcome,
    },
    entry::{CompositeInput, HistoryDraft},
    persist::{HistoryRepository, KvHistoryRepository, memory::MemoryKvStore, sqlite::SqliteKvStore},
    runtime::handle::{HistoryHandle, spawn_history},
    suggest::{SuggestionRequest, SuggestionService, openai::OpenAiCompatibleService},
    types::{AreaUnit, SourcePage},
    view::{
        display::{entry_title, format_area},
        input::{is_bounded_numeric_text, is_numeric_text, parse_positive},
    },
};

#[derive(Parser)]
#[command(name = "vigha", version, about = "Gujarat land-area converter and calculator")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert one value into every unit.
    Convert {
        /// Digits with at most one decimal point.
        value: String,
        /// hectare (ha), are or sqm (m2).
        #[arg(long, default_value = "hectare", value_parser = parse_unit)]
        unit: AreaUnit,
        /// Do not add the conversion to history.
        #[arg(long)]
        no_record: bool,
    },
    /// Convert hectare/are/sqm fields from a 7/12 extract.
    SevenTwelve {
        #[arg(long, default_value = "")]
        hectare: String,
        #[arg(long, default_value = "")]
        are: String,
        #[arg(long, default_value = "")]
        sqm: String,
        #[arg(long)]
        no_record: bool,
    },
    /// Evaluate an arithmetic expression.
    Calc {
        #[arg(allow_hyphen_values = true, num_args = 1..)]
        expression: Vec<String>,
    },
    /// Press calculator keys in order and show the display.
    Keys {
        /// Key labels: 0-9, 00, ., + - * /, %, C, DEL, =.
        #[arg(allow_hyphen_values = true, num_args = 1..)]
        keys: Vec<String>,
    },
    /// List or clear stored history.
    History {
        #[arg(long, value_enum)]
        page: Option<PageArg>,
        /// Remove the entries of `--page`.
        #[arg(long, requires = "page")]
        clear: bool,
    },
    /// Ask for the land-measurement standards of a district.
    Suggest {
        #[arg(long)]
        area: String,
        #[arg(long)]
        location: String,
    },
}

fn parse_unit(raw: &str) -> Result<AreaUnit, String> {
    match AreaUnit::from_tag(raw) {
        AreaUnit::Other => Err(format!("unknown unit `{raw}`")),
        unit => Ok(unit),
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum PageArg {
    Home,
    SevenTwelve,
}

impl From<PageArg> for SourcePage {
    fn from(value: PageArg) -> Self {
        match value {
            PageArg::Home => SourcePage::Home,
            PageArg::SevenTwelve => SourcePage::SevenTwelve,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = config::load_or_default(cli.config.as_deref());

    match cli.command {
        Commands::Convert { value, unit, no_record } => {
            let Some(input) = home_input(&value, unit) else {
                tracing::debug!(%value, "no result for input");
                return Ok(());
            };
            print_result(&convert_area(input));
            if !no_record {
                record(&cfg, HistoryDraft::home(input)).await?;
            }
        }
        Commands::SevenTwelve { hectare, are, sqm, no_record } => {
            let raw = CompositeInput { hectare, are, sqm };
            if !composite_accepted(&raw, cfg.input.max_integer_digits) {
                tracing::debug!(?raw, "no result for input");
                return Ok(());
            }
            print_result(&convert_area(ConversionInput::new(raw.total_sqm(), AreaUnit::Sqm)));
            if !no_record {
                record(&cfg, HistoryDraft::seven_twelve(raw)).await?;
            }
        }
        Commands::Calc { expression } => {
            let expr = expression.join("");
            match evaluate(&expr) {
                Ok(value) => println!("{}", format_result(value)),
                Err(err) => {
                    tracing::debug!("{expr}: {err}");
                    println!("{ERROR_DISPLAY}");
                }
            }
        }
        Commands::Keys { keys } => {
            let mut calc = Calculator::new();
            for label in &keys {
                let key = Key::from_label(label).with_context(|| format!("unknown key `{label}`"))?;
                calc.press(key);
            }
            if calc.result().is_empty() {
                println!("{}", calc.input());
            } else {
                println!("{}", calc.result());
            }
        }
        Commands::History { page, clear } => {
            let handle = open_history(&cfg).await?;
            if let (true, Some(page)) = (clear, page) {
                let removed = handle.clear(page.into()).await?;
                println!("removed {removed} entries");
            } else {
                let items = match page {
                    Some(page) => handle.for_page(page.into()).await?,
                    None => handle.snapshot().await?,
                };
                for item in &items {
                    println!(
                        "{}  [{}]  {}  =>  {} vigha",
                        item.id,
                        item.page(),
                        entry_title(item),
                        format_area(item.result.vigha)
                    );
                }
            }
            handle.shutdown().await?;
        }
        Commands::Suggest { area, location } => {
            let req = SuggestionRequest::new(area, location)?;
            let service = OpenAiCompatibleService::from_config(&cfg.suggest)?;
            match service.suggest(&req).await {
                Ok(out) => println!("{}", out.suggestion),
                Err(err) => {
                    tracing::warn!("suggestion failed: {err}");
                    eprintln!("Could not fetch suggestion. Please try again.");
                }
            }
        }
    }

    Ok(())
}

/// Rejected or non-positive text yields no input, as in the converter view.
fn home_input(value: &str, unit: AreaUnit) -> Option<ConversionInput> {
    if !is_numeric_text(value) {
        return None;
    }
    parse_positive(value).map(|v| ConversionInput::new(v, unit))
}

fn composite_accepted(raw: &CompositeInput, max_integer_digits: usize) -> bool {
    [&raw.hectare, &raw.are, &raw.sqm]
        .into_iter()
        .all(|field| is_bounded_numeric_text(field, max_integer_digits))
        && raw.total_sqm() > 0.0
}

fn print_result(r: &ConversionResult) {
    let rows = [
        ("vigha", r.vigha),
        ("guntha", r.guntha),
        ("acre", r.acre),
        ("hectare", r.hectare),
        ("are", r.are),
        ("sqm", r.sqm),
        ("sqft", r.sqft),
    ];
    for (label, value) in rows {
        println!("{label:>8}  {}", format_area(value));
    }
}

async fn open_history(cfg: &Config) -> anyhow::Result<HistoryHandle> {
    let repo: Box<dyn HistoryRepository> = if cfg.history.is_in_memory() {
        Box::new(KvHistoryRepository::new(MemoryKvStore::new()))
    } else {
        let store = SqliteKvStore::open(&cfg.history.db_path)
            .with_context(|| format!("opening {}", cfg.history.db_path.display()))?;
        Box::new(KvHistoryRepository::new(store))
    };
    Ok(spawn_history(repo, cfg.runtime()).await)
}

async fn record(cfg: &Config, draft: HistoryDraft) -> anyhow::Result<()> {
    let handle = open_history(cfg).await?;
    if let RecordOutcome::Recorded(id) = handle.record(draft).await? {
        tracing::debug!(%id, "recorded");
    }
    handle.shutdown().await?;
    Ok(())
}
