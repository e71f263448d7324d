#![forbid(unsafe_code)]

mod app_error;
mod app_server;
mod app_state;
mod debug;
mod error;
mod handlers;
mod logging;
mod name_hash;
mod profile_image;
mod response;
mod secrets;
mod settings;
mod sizes;
mod storage;
mod types;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use crate::app_server::AppServer;
use crate::app_state::AppState;
use crate::profile_image::ProfileImages;
use crate::secrets::Secrets;
use crate::settings::ProfileImageSettings;
use crate::types::User;

#[derive(Parser)]
struct Cli {
    #[arg(long)]
    settings_file: PathBuf,
    #[arg(long)]
    secrets_file: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the storage filename of each profile image size for a user
    Names { username: String },
    /// Print the URL of each profile image size for a user
    Urls { username: String },
    /// Print the URLs of the shared default profile image
    DefaultUrls,
    /// Print account profile image metadata, checking storage for an upload
    Metadata { username: String },
    /// Delete every stored profile image size for a user
    Remove { username: String },
    /// Serve the profile image API over HTTP
    Serve {
        #[arg(long)]
        address: SocketAddr,
    },
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    logging::init_logging();

    let settings = ProfileImageSettings::load(&args.settings_file)
        .with_context(|| "failed to load settings")?;
    let secrets = Secrets::load(&args.secrets_file).with_context(|| "failed to load secrets")?;
    let profile_images = ProfileImages::new(&settings, &secrets)
        .with_context(|| "failed to configure profile image storage")?;

    match args.command {
        Command::Names { username } => {
            print_json(&profile_images.get_profile_image_names(&username))?;
        }
        Command::Urls { username } => {
            print_json(&profile_images.get_profile_image_urls(&User::new(username)))?;
        }
        Command::DefaultUrls => {
            print_json(&profile_images.get_default_profile_image_urls())?;
        }
        Command::Metadata { username } => {
            let has_image = profile_images
                .has_profile_image(&username)
                .with_context(|| "failed to check profile image storage")?;
            print_json(&profile_images.get_profile_image(&User::new(username), has_image))?;
        }
        Command::Remove { username } => {
            profile_images
                .remove_profile_images(&username)
                .with_context(|| format!("failed to remove profile images for {username}"))?;
        }
        Command::Serve { address } => {
            let state = Arc::new(AppState { profile_images });
            let server =
                AppServer::new(&address, state).with_context(|| "failed to start server")?;
            server.run().await.with_context(|| "server failed")?;
        }
    }

    tracing::info!("exited");
    Ok(())
}
