use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use nf_core::{Locale, Result, SortKey, SourceFilter};
use nf_loader::{create_source, logging, DataLoader};
use nf_web::{Session, SessionOptions, UiEvent, ViewMode};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about = "Render a collected news feed as a filterable page", long_about = None)]
pub struct Cli {
    /// Site root holding data/index.json: a directory or an http(s) URL
    #[arg(long, env = "NF_DATA", default_value = ".")]
    data: String,
    #[arg(long, env = "NF_LOCALE", default_value = "ko", help = "UI language: ko (default) or en")]
    locale: Locale,
    /// Date treated as today, YYYY-MM-DD (defaults to the local date)
    #[arg(long)]
    today: Option<NaiveDate>,
    #[arg(long, env = "NF_LOG", default_value = "info")]
    log_level: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a single page for the given selection
    Render(RenderArgs),
    /// List the sources known to the index
    Sources,
    /// Read UI events from stdin (one per line) and re-render after each
    Shell {
        /// Write each rendered page here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Source name, or "all"
    #[arg(long, default_value = "all")]
    source: String,
    #[arg(long, default_value = "")]
    query: String,
    #[arg(long, default_value = "date-desc")]
    sort: SortKey,
    #[arg(long, default_value = "list")]
    view: ViewMode,
    /// Show the week this many weeks before the current one (at most 5200)
    #[arg(
        long,
        default_value_t = 0,
        conflicts_with = "all_weeks",
        value_parser = clap::value_parser!(u32).range(0..=5200)
    )]
    weeks_back: u32,
    /// Disable the week window entirely
    #[arg(long)]
    all_weeks: bool,
    #[arg(long)]
    out: Option<PathBuf>,
}

async fn emit(html: &str, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => {
            tokio::fs::write(path, html).await?;
            info!("💾 Wrote {} bytes to {}", html.len(), path.display());
        }
        None => println!("{}", html),
    }
    Ok(())
}

async fn open_session(cli: &Cli, week_filter: bool) -> Result<Session> {
    let source = create_source(&cli.data)?;
    info!("📂 Reading feed from {} ({})", cli.data, source.name());
    let options = SessionOptions {
        today: cli.today.unwrap_or_else(|| Local::now().date_naive()),
        locale: cli.locale,
        week_filter,
    };
    Ok(Session::open(DataLoader::new(source), options).await)
}

async fn render(cli: &Cli, args: &RenderArgs) -> Result<()> {
    let mut session = open_session(cli, !args.all_weeks).await?;

    let mut events = Vec::new();
    if args.weeks_back > 0 {
        events.push(UiEvent::NavigateWeek(-i64::from(args.weeks_back)));
    }
    events.push(UiEvent::SelectSource(SourceFilter::from(args.source.as_str())));
    events.push(UiEvent::Search(args.query.clone()));
    events.push(UiEvent::Sort(args.sort));
    events.push(UiEvent::SetView(args.view));

    for event in events {
        session.dispatch(event).await;
    }
    info!("📰 {} articles visible", session.visible().len());
    emit(&session.render(), args.out.as_deref()).await
}

async fn list_sources(cli: &Cli) -> Result<()> {
    let mut loader = DataLoader::new(create_source(&cli.data)?);
    loader.load_index().await?;

    println!("Updated: {}", loader.updated_at().unwrap_or("unknown"));
    for source in loader.sources() {
        println!(
            "  - {} ({} articles, {} in preview) -> {}",
            source.name,
            source.total_articles,
            loader.store().count_for(&source.name),
            source.file
        );
    }
    Ok(())
}

async fn shell(cli: &Cli, out: Option<&Path>) -> Result<()> {
    let mut session = open_session(cli, true).await?;
    emit(&session.render(), out).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }

        match line.parse::<UiEvent>() {
            Ok(event) => {
                let html = session.dispatch(event).await;
                emit(&html, out).await?;
            }
            Err(e) => warn!("⚠️ {}", e),
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level);

    match &cli.command {
        Commands::Render(args) => render(&cli, args).await,
        Commands::Sources => list_sources(&cli).await,
        Commands::Shell { out } => shell(&cli, out.as_deref()).await,
    }
}
