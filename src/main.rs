use std::sync::Arc;

use clap::{
    ArgGroup, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spymcli::{
    cli, config, error,
    types::{AuthSession, Service},
};
use tokio::sync::Mutex;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify and YouTube
    Auth(AuthOptions),

    /// List Spotify playlists
    Playlists,

    /// Migrate playlists to YouTube Music
    Migrate(MigrateOptions),

    /// Show migrated playlists and their match counts
    Info,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct AuthOptions {
    /// Service to authorize; both when omitted
    #[clap(value_enum)]
    service: Option<ServiceArg>,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy)]
pub enum ServiceArg {
    Spotify,
    Youtube,
}

#[derive(Parser, Debug, Clone)]
#[command(group(ArgGroup::new("target").required(true).args(["playlist_id", "all"])))]
pub struct MigrateOptions {
    /// Spotify playlist ID to migrate
    #[clap(long)]
    playlist_id: Option<String>,

    /// Migrate all playlists
    #[clap(long)]
    all: bool,

    /// Skip playlists that were already migrated
    #[clap(long)]
    no_update: bool,

    /// Allow re-matching an already matched track to a different video
    #[clap(long)]
    allow_rematch: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth(opt) => {
            let oauth_result: Arc<Mutex<Option<AuthSession>>> = Arc::new(Mutex::new(None));
            let service = opt.service.map(|s| match s {
                ServiceArg::Spotify => Service::Spotify,
                ServiceArg::Youtube => Service::Youtube,
            });
            cli::auth(service, Arc::clone(&oauth_result)).await;
        }
        Command::Playlists => cli::playlists().await,
        Command::Migrate(opt) => {
            cli::migrate(opt.playlist_id, opt.all, opt.no_update, opt.allow_rematch).await
        }
        Command::Info => cli::info().await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
