use anyhow::{anyhow, Result};
use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use transcribe_uploader::controller::SubmitOutcome;
use transcribe_uploader::discovery::collect_candidates;
use transcribe_uploader::{Config, HttpTranscriptionClient, TerminalView, UploadController};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Command::new("Transcribe Uploader")
        .version(env!("CARGO_PKG_VERSION"))
        .author("TigreRoll")
        .about("Upload videos to a Whisper transcription server and fetch the transcripts")
        .arg(
            Arg::new("paths")
                .value_name("PATH")
                .help("Video files or directories to upload")
                .num_args(1..)
                .required(true),
        )
        .arg(
            Arg::new("server")
                .short('s')
                .long("server")
                .value_name("URL")
                .help("Base URL of the transcription server"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Path to a TOML configuration file"),
        )
        .arg(
            Arg::new("download-dir")
                .short('o')
                .long("download-dir")
                .value_name("DIR")
                .help("Download every returned artifact into this directory"),
        )
        .arg(
            Arg::new("recursive")
                .short('r')
                .long("recursive")
                .help("Search directories recursively")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let verbose = matches.get_flag("verbose");
    let default_filter = if verbose {
        "transcribe_uploader=debug,info"
    } else {
        "transcribe_uploader=info,warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let mut config = match matches.get_one::<String>("config") {
        Some(path) => Config::from_file(&PathBuf::from(path))?,
        None => Config::load().unwrap_or_else(|e| {
            warn!("Failed to load config, using defaults: {}", e);
            Config::default()
        }),
    };

    if let Some(server) = matches.get_one::<String>("server") {
        config.server.base_url = server.clone();
    }
    if matches.get_flag("recursive") {
        config.upload.recursive = true;
    }
    config.validate()?;

    if verbose {
        info!("{}", config.summary());
    }

    let paths: Vec<PathBuf> = matches
        .get_many::<String>("paths")
        .map(|values| values.map(PathBuf::from).collect())
        .unwrap_or_default();
    let download_dir = matches.get_one::<String>("download-dir").map(PathBuf::from);

    let client = HttpTranscriptionClient::new(config.server.clone())?;
    let mut controller = UploadController::new(&config, client, TerminalView::new());

    let candidates = collect_candidates(&paths, config.upload.recursive).await?;
    let offered = candidates.len();
    let accepted = controller.add_files(candidates);
    if accepted < offered {
        info!("⏭️  Skipped {} non-video file(s)", offered - accepted);
    }

    let start_time = std::time::Instant::now();
    match controller.submit().await? {
        SubmitOutcome::Skipped => {
            return Err(anyhow!("No video files selected"));
        }
        SubmitOutcome::Completed { results } => {
            info!(
                "⏱️  {} result(s) in {:.1}s",
                results,
                start_time.elapsed().as_secs_f64()
            );
        }
    }

    if let Some(dir) = download_dir {
        let artifacts: Vec<_> = controller
            .results()
            .iter()
            .flat_map(|result| result.artifacts())
            .collect();

        for artifact in artifacts {
            if let Err(e) = controller.backend().download(&artifact.id, &dir).await {
                warn!("Failed to download {}: {}", artifact.id, e);
            }
        }
    }

    Ok(())
}
