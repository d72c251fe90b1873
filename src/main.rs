use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use log::error;

use crate::host::{ConsoleHost, HostBridge, ShutdownMonitor};
use crate::model::config::Config;
use crate::routes::{dispatch, Context, Route, RouteRequest, RouteResult};
use crate::utils::file_utils;

mod api;
mod host;
mod model;
mod processing;
mod repository;
mod routes;
mod scheduler;
mod sportcast_error;
mod utils;

#[derive(Parser)]
#[command(name = "sportcast", version, about = "Sports streaming catalog add-on core for media centers")]
struct Args {
    /// The config file
    #[arg(short, long)]
    config: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Dispatch a single plugin url and print the resulting listing
    Dispatch { url: String },
    /// Run the periodic alert checker loop
    Service,
    /// Export the channels panel as an M3U playlist
    Playlist {
        /// Output filename, defaults to playlist.m3u8 in the working dir
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Prompt for credentials and log in
    Login,
    /// Drop the stored session
    Logout,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config_file = args.config.unwrap_or_else(file_utils::get_default_config_path);
    let config = Config::load(&config_file);
    let host = ConsoleHost;

    match args.command {
        Command::Dispatch { url } => match RouteRequest::parse(&url) {
            Ok(request) => run_dispatch(&config, &host, &request),
            Err(err) => {
                error!("{err}");
                std::process::exit(1);
            }
        },
        Command::Service => run_service(&config, &host),
        Command::Playlist { output } => {
            let mut request = RouteRequest::new(Route::Playlist);
            if let Some(output) = output {
                request = request.with_param("output", &output);
            }
            run_dispatch(&config, &host, &request);
        }
        Command::Login => run_dispatch(&config, &host, &RouteRequest::new(Route::Login)),
        Command::Logout => run_dispatch(&config, &host, &RouteRequest::new(Route::Logout)),
    }
}

/// One host dispatch cycle: fresh context, one handler, result rendered at
/// the boundary. Errors surface as a modal message and a non-zero exit.
fn run_dispatch(config: &Config, host: &ConsoleHost, request: &RouteRequest) {
    let mut ctx = Context::new(config, host);
    match dispatch(&mut ctx, request) {
        Ok(RouteResult::Folder(folder)) => print_folder(config, &folder),
        Ok(RouteResult::Playable(item)) => host.play(&item),
        Ok(RouteResult::None) => {}
        Err(err) => {
            error!("{err}");
            host.show_message(err.message());
            std::process::exit(1);
        }
    }
}

fn print_folder(config: &Config, folder: &crate::model::menu::Folder) {
    if !folder.title.is_empty() {
        println!("== {} ==", folder.title);
    }
    for item in &folder.items {
        let marker = if item.is_folder { "[D]" } else if item.playable { "[P]" } else { "[A]" };
        match &item.path {
            Some(path) => println!("{marker} {}  {}", item.label, path.to_url(&config.plugin_id)),
            None => println!("{marker} {}", item.label),
        }
        for (label, action) in &item.context {
            println!("      {label}: {}", action.render(&config.plugin_id));
        }
    }
}

fn run_service(config: &Config, host: &ConsoleHost) {
    let monitor = Arc::new(ShutdownMonitor::new());
    let interval = Duration::from_secs(config.service_interval_secs);
    scheduler::run_service(&monitor, interval, || {
        let mut ctx = Context::new(config, host);
        if let Err(err) = dispatch(&mut ctx, &RouteRequest::new(Route::Service)) {
            error!("service tick failed: {err}");
        }
    });
}
