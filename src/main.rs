use std::sync::Mutex;

use clap::parser::MatchesError;
use clap::{Arg, Command};
use env_logger::Env;
use tokio::runtime::Runtime;

use moodit::actions::show_tracks::{show_tracks, TrackFilter};
use moodit::config::{parse_server, MoodItConfig};
use moodit::endpoints::Endpoints;
use moodit::render::RemoteListRenderer;
use moodit::source::HttpSource;
use moodit::ui;
use moodit::view::TrackListView;

enum Action {
    Mood(String),
    Liked,
    Login,
    Browse,
}

struct Args {
    config_path: String,
    server: Option<String>,
    action: Action,
}

fn parse_cli_args() -> Result<Args, MatchesError> {
    let cmd = Command::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .global(true)
                .default_value("moodit.config"),
        )
        .arg(
            Arg::new("server")
                .long("server")
                .global(true)
                .help("Base URL of the Mood It server"),
        )
        .subcommand(
            Command::new("mood")
                .about("List liked tracks matching a mood")
                .arg(Arg::new("mood").required(true)),
        )
        .subcommand(Command::new("liked").about("List all liked tracks"))
        .subcommand(Command::new("login").about("Print the login URL"))
        .subcommand(Command::new("tui").about("Browse tracks interactively (default)"))
        .get_matches();

    let action = match cmd.subcommand() {
        Some(("mood", sub)) => Action::Mood(
            sub.try_get_one::<String>("mood")?
                .cloned()
                .unwrap_or_default(),
        ),
        Some(("liked", _)) => Action::Liked,
        Some(("login", _)) => Action::Login,
        _ => Action::Browse,
    };
    let args = Args {
        config_path: cmd
            .try_get_one::<String>("config")?
            .cloned()
            .unwrap_or_else(|| "moodit.config".to_string()),
        server: cmd.try_get_one::<String>("server")?.cloned(),
        action,
    };
    Ok(args)
}

fn print_tracks(runtime: &Runtime, endpoints: &Endpoints, filter: TrackFilter) {
    let renderer = RemoteListRenderer::new(HttpSource::new());
    let view = Mutex::new(TrackListView::default());
    runtime.block_on(show_tracks(&renderer, endpoints, &filter, &view));
    let view = view.into_inner().unwrap_or_else(|err| err.into_inner());
    for row in view.rows() {
        println!("{row}");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = parse_cli_args()?;
    let mut config = MoodItConfig::load(&args.config_path)?;
    if let Some(server) = &args.server {
        config.server = parse_server(server)?;
    }
    let endpoints = config.endpoints();
    let runtime = Runtime::new()?;

    match args.action {
        Action::Login => println!("Open {} in your browser to log in.", endpoints.login()),
        Action::Mood(mood) => print_tracks(&runtime, &endpoints, TrackFilter::Mood(mood)),
        Action::Liked => print_tracks(&runtime, &endpoints, TrackFilter::Liked),
        Action::Browse => ui::run(&config, runtime.handle().clone())?,
    }
    Ok(())
}
