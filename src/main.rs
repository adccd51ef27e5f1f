use clap::{Parser, Subcommand};
use imdb_scraper::browser::{BrowserManager, Session, SnapshotSession};
use imdb_scraper::config::{Config, Timings};
use imdb_scraper::persist::CsvSink;
use imdb_scraper::pipelines::{self, Pipeline};
use imdb_scraper::{db, server};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "imdb-scraper", about = "Scrape charts, filmographies and reviews into CSV tables")]
struct Cli {
    /// Config file (defaults to ./config.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Extract from a saved HTML page instead of launching Chrome
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    /// Show the browser window and load images
    #[arg(long, global = true)]
    headful: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scrape the ranked top list
    Top {
        #[arg(long)]
        url: Option<String>,
    },
    /// Scrape one person's credits into a single wide row
    Filmography {
        #[arg(long)]
        url: Option<String>,
    },
    /// Scrape user reviews of one title
    Reviews {
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        max: Option<usize>,
    },
    /// Run every pipeline on one browser session
    All,
    /// Load the CSV tables into the SQLite database
    Load,
    /// Serve the loaded tables over HTTP
    Serve {
        #[arg(long)]
        bind: Option<String>,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let mut config = match config {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    if cli.headful {
        config.browser = config.browser.clone().debug_mode();
    }

    match run(cli, &mut config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every requested step succeeded
fn run(cli: Cli, config: &mut Config) -> Result<bool, Box<dyn std::error::Error>> {
    match cli.command {
        Command::Load => {
            let mut conn = db::open(&config.database_path)?;
            let outcomes = db::load_all(&mut conn, &config.output_dir);
            log::info!("Load finished into {}", config.database_path.display());
            Ok(outcomes.iter().all(|(_, outcome)| outcome.is_ok()))
        }
        Command::Serve { bind } => {
            let conn = db::open(&config.database_path)?;
            let addr = bind.unwrap_or_else(|| config.bind_addr.clone());
            actix_web::rt::System::new().block_on(server::run(conn, &addr))?;
            Ok(true)
        }
        command => {
            let session: Box<dyn Session> = match &cli.snapshot {
                Some(path) => {
                    config.timings = Timings::instant();
                    Box::new(SnapshotSession::from_file(path)?)
                }
                None => Box::new(BrowserManager::new(config.browser.clone())?.open_session()?),
            };
            let ok = scrape(command, session.as_ref(), config);
            if let Err(e) = session.close() {
                log::warn!("Failed to close session: {}", e);
            }
            Ok(ok)
        }
    }
}

fn scrape(command: Command, session: &dyn Session, config: &mut Config) -> bool {
    let mut sink = CsvSink::new(&config.output_dir);

    let pipeline = match command {
        Command::Top { url } => {
            if let Some(url) = url {
                config.targets.top_list_url = url;
            }
            Pipeline::TopList
        }
        Command::Filmography { url } => {
            if let Some(url) = url {
                config.targets.filmography_url = url;
            }
            Pipeline::Filmography
        }
        Command::Reviews { url, max } => {
            if let Some(url) = url {
                config.targets.reviews_url = url;
            }
            if let Some(max) = max {
                config.targets.max_reviews = max;
            }
            Pipeline::Reviews
        }
        _ => {
            let outcomes = pipelines::run_all(session, config, &mut sink);
            return outcomes.iter().all(|(_, outcome)| outcome.is_ok());
        }
    };

    match pipelines::run(pipeline, session, config, &mut sink) {
        Ok(rows) => {
            log::info!("{} pipeline wrote {} rows", pipeline, rows);
            true
        }
        Err(e) => {
            log::error!("{} pipeline failed: {}", pipeline, e);
            false
        }
    }
}
