// GeoCam - photo collection browser for the DENR GeoCam field app
// Entry point and CLI

use anyhow::Context;
use clap::{Parser, Subcommand};
use geocam::commands;
use geocam::database::NewPhoto;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "geocam", version, about = "Browse GeoCam photo collections")]
struct Cli {
    /// App data directory holding the local store and settings
    #[arg(long, env = "GEOCAM_DATA_DIR", default_value = "geocam-data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List photo folders, newest first
    Folders,
    /// Show photos captured on a day (YYYY-MM-DD), oldest first
    Day { day: String },
    /// Show photos in a folder from the folder list
    Folder { id: String },
    /// Show the locally signed-in user
    Whoami,
    /// Append photos from a JSON array file; entries keep their `createdAt` when given
    Import { file: PathBuf },
    /// Print version and configuration
    Info,
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geocam=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    tracing::info!("Starting GeoCam");

    let state = geocam::app::setup(cli.data_dir)
        .await
        .context("failed to open app data directory")?;

    match cli.command {
        Command::Folders => print_json(&commands::list_collections(&state).await?)?,
        Command::Day { day } => print_json(&commands::collection_detail(&state, &day).await?)?,
        Command::Folder { id } => print_json(&commands::folder_photos(&state, &id).await?)?,
        Command::Whoami => print_json(&commands::home(&state).await?)?,
        Command::Import { file } => {
            let content = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("failed to read {}", file.display()))?;
            let photos: Vec<NewPhoto> =
                serde_json::from_str(&content).context("import file must be a JSON array")?;

            let service = state.photos();
            let mut imported = Vec::with_capacity(photos.len());
            for photo in photos {
                imported.push(service.record_photo(photo).await?);
            }

            tracing::info!("Imported {} photos", imported.len());
            print_json(&imported)?;
        }
        Command::Info => print_json(&commands::get_app_info(&state))?,
    }

    Ok(())
}
