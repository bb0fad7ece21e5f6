use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tally_core::{Composer, Interpretation, Interpreter, Lexicon, RandomPicker, ZonedClock};
use tally_ledger::Bookkeeper;
use tracing::info;

mod config;
mod ledger;
mod telegram;
mod webhook;

use config::{Config, load_config};
use telegram::TelegramClient;
use webhook::{AppState, create_router};

#[derive(Parser, Debug)]
#[command(name = "tally", version, about = "Chat-driven household ledger bot")]
struct Cli {
    /// Path to the config file (missing file = defaults)
    #[arg(short, long, global = true, default_value = "tally.toml")]
    config: PathBuf,

    /// Log as JSON lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the Telegram webhook server
    Serve,

    /// Write a default config file
    InitConfig,

    /// Show how a message would be understood, without touching the ledger
    Interpret {
        /// The chat message
        text: String,
    },
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tally=info,tower_http=info".into());
    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn load(path: &Path) -> Result<Config> {
    let mut cfg = load_config(path)?;
    cfg.apply_env(|key| std::env::var(key).ok())?;
    Ok(cfg)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json);

    match cli.command {
        Command::Serve => {
            let cfg = load(&cli.config)?;
            serve(cfg).await?;
        }

        Command::InitConfig => {
            config::init_config(&cli.config)?;
        }

        Command::Interpret { text } => {
            let cfg = load(&cli.config)?;
            interpret(&cfg, &text)?;
        }
    }

    Ok(())
}

async fn serve(cfg: Config) -> Result<()> {
    cfg.validate_for_serve()?;

    let clock = ZonedClock::from_name(&cfg.locale.timezone)?;
    let lexicon = Lexicon::for_language(cfg.locale.language);
    let store = ledger::open_store(&cfg.ledger)
        .await
        .context("opening ledger")?;

    let bookkeeper = Bookkeeper::new(
        Interpreter::new(lexicon, Arc::new(clock)),
        Composer::new(cfg.locale.language, RandomPicker),
        store,
    );
    let state = AppState {
        bookkeeper: Arc::new(bookkeeper),
        messenger: Arc::new(TelegramClient::new(&cfg.telegram.api_base, &cfg.telegram.token)),
        secret: cfg.webhook_secret().map(Arc::from),
    };

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", cfg.server.host, cfg.server.port))?;
    info!(
        %addr,
        backend = ?cfg.ledger.backend,
        language = %cfg.locale.language,
        timezone = %clock.timezone(),
        build = env!("TALLY_BUILD_SHA"),
        "starting tally"
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    axum::serve(listener, create_router(state)).await?;

    Ok(())
}

fn interpret(cfg: &Config, text: &str) -> Result<()> {
    let clock = ZonedClock::from_name(&cfg.locale.timezone)?;
    let lexicon = Lexicon::for_language(cfg.locale.language);
    let interpreter = Interpreter::new(lexicon, Arc::new(clock));

    match interpreter.interpret(text) {
        Interpretation::Record(draft) => {
            println!("record");
            println!("  date:     {}", draft.date);
            println!("  type:     {}", lexicon.kind_label(draft.kind));
            println!("  amount:   {}", draft.amount);
            println!("  category: {}", lexicon.category_label(draft.category));
        }
        Interpretation::MissingAmount => {
            println!("record, but no amount found");
        }
        Interpretation::Query(summary) => {
            println!("query");
            println!("  from:     {}", summary.range.start);
            println!("  to:       {}", summary.range.end);
            match summary.category {
                Some(c) => println!("  category: {}", lexicon.category_label(c)),
                None => println!("  category: (all)"),
            }
        }
        Interpretation::Unrecognized => {
            println!("unrecognized");
        }
    }

    Ok(())
}
