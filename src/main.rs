use std::path::PathBuf;

use clap::{Parser, Subcommand};
use riddle_me_this::play::{Flow, PlayLoop};
use riddle_me_this::{logger, web, AppConfig, Backends, GameSession, Language, Level, SessionSettings};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, Parser)]
#[command(name = "riddle-me-this")]
#[command(about = "A riddle game for kids, in the terminal or as a JSON API")]
struct Cli {
    /// TOML config file; built-in defaults when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    verbose: bool,

    #[arg(long, global = true, help = "Log as JSON lines")]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Play in the terminal.
    Play {
        #[arg(long, default_value = "easy")]
        level: String,

        /// Language code or name, e.g. "es" or "Spanish".
        #[arg(long)]
        language: Option<String>,

        #[arg(long)]
        seed: Option<u64>,
    },
    /// Serve the JSON API.
    Serve {
        #[arg(long)]
        bind: Option<String>,

        #[arg(long)]
        max_sessions: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    let mut config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Play { level, language, seed } => {
            if let Some(language) = language {
                config.game.default_language = language;
            }
            if seed.is_some() {
                config.game.rng_seed = seed;
            }
            config.validate()?;
            let level: Level = level.parse()?;
            play(&config, level).await
        }
        Command::Serve { bind, max_sessions } => {
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            if let Some(max) = max_sessions {
                config.server.max_sessions = max;
            }
            config.validate()?;
            let backends = Backends::from_config(&config)?;
            web::serve(&config, backends).await?;
            Ok(())
        }
    }
}

async fn play(config: &AppConfig, level: Level) -> anyhow::Result<()> {
    let backends = match Backends::from_config(config) {
        Ok(backends) => backends,
        Err(e) => {
            tracing::warn!(error = %e, "hosted backend unavailable, playing offline");
            eprintln!("⚠️  {}", e.user_message());
            Backends::local()
        }
    };
    let settings = SessionSettings::from_config(config)?;
    let language: Language = settings.language;
    tracing::info!(
        %level,
        %language,
        companion = backends.companion.name(),
        "starting terminal game"
    );
    let mut game = PlayLoop::new(GameSession::new(settings), backends, level);
    for line in game.welcome() {
        println!("{line}");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match game.handle_line(&line).await? {
            Flow::Continue(out) => out.iter().for_each(|l| println!("{l}")),
            Flow::Quit(out) => {
                out.iter().for_each(|l| println!("{l}"));
                return Ok(());
            }
        }
    }
    println!("Thanks for playing! Final {}", game.session().progress());
    Ok(())
}
