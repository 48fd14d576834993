pub mod cli;
pub mod constants;
pub mod format;
pub mod listing;
pub mod naming;
pub mod transfer;

use chrono::Utc;
use clap::Parser;
use cli::{Cli, Commands};
use constants::NO_REMOTE_FILES;
use format::{format_bytes, format_time_ago, format_time_ago_since};
use listing::{find_latest, list_objects};
use naming::{path_concat, RemoteKind};
use transfer::{fetch_latest, send_file};
use tracing::Level;

#[derive(Debug)]
pub enum AppError {
    Listing(listing::ListingError),
    Transfer(transfer::TransferError),
    NoRemoteFiles,
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Listing(err) => write!(f, "{err}"),
            AppError::Transfer(err) => write!(f, "{err}"),
            AppError::NoRemoteFiles => f.write_str(NO_REMOTE_FILES),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Listing(err) => Some(err),
            AppError::Transfer(err) => Some(err),
            AppError::NoRemoteFiles => None,
        }
    }
}

pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Size(args) => {
            println!("{}", format_bytes(args.bytes));
            Ok(())
        }
        Commands::Ago(args) => {
            println!("{}", format_time_ago(&args.timestamp));
            Ok(())
        }
        Commands::Join(args) => {
            println!("{}", path_concat(&args.parent, &args.file));
            Ok(())
        }
        Commands::Classify(args) => {
            for name in &args.names {
                println!("{name}\t{}", RemoteKind::classify(name));
            }
            Ok(())
        }
        Commands::List(args) => {
            let objects = list_objects(&args.dir).map_err(AppError::Listing)?;
            let now = Utc::now();
            for object in &objects {
                println!(
                    "{}\t{}\t{}\t{}",
                    object.key,
                    RemoteKind::classify(&object.key),
                    format_bytes(Some(object.size as f64)),
                    format_time_ago_since(object.last_modified, now),
                );
            }
            Ok(())
        }
        Commands::Latest(args) => {
            let objects = list_objects(&args.dir).map_err(AppError::Listing)?;
            let latest = find_latest(&objects).ok_or(AppError::NoRemoteFiles)?;
            println!("{}", path_concat(&args.dir.to_string_lossy(), &latest.key));
            Ok(())
        }
        Commands::Send(args) => {
            let outcome = send_file(&args.file, &args.dir, log_progress)
                .map_err(AppError::Transfer)?;
            println!(
                "Sent {} ({}) in {:.2}s",
                outcome.destination.display(),
                format_bytes(Some(outcome.bytes as f64)),
                outcome.elapsed.as_secs_f32(),
            );
            Ok(())
        }
        Commands::Fetch(args) => {
            let (_, outcome) = fetch_latest(&args.dir, &args.target, log_progress)
                .map_err(AppError::Transfer)?;
            println!(
                "Fetched {} ({}) in {:.2}s",
                outcome.destination.display(),
                format_bytes(Some(outcome.bytes as f64)),
                outcome.elapsed.as_secs_f32(),
            );
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    // No-op when a global subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

fn log_progress(bytes: u64) {
    tracing::debug!(bytes, "transferred");
}
