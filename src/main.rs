use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use hive_player::backends::StreamHiveApi;
use hive_player::config::Config;
use hive_player::player::{
    HeadlessFullscreen, ManualOrientation, Orientation, PlaybackRate, PlayerController,
    PlayerServices, PlayerState, SimulatedElement,
};
use hive_player::services::ContentService;
use hive_player::storage::{KeyValueStore, SqliteStore, StoredCredentials};
use hive_player::utils::format_time;

#[derive(Parser, Debug)]
#[command(name = "hive-player", version, about = "Headless StreamHive playback session")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a content item on a simulated element, resuming where it left off
    Play {
        content_id: String,
        url: String,
        /// Length of the simulated stream in seconds
        #[arg(long, default_value_t = 60.0)]
        duration: f64,
        /// Playback rate (0.5, 0.75, 1, 1.25, 1.5 or 2)
        #[arg(long, default_value_t = 1.0)]
        speed: f64,
        /// Stop after this many seconds of wall time
        #[arg(long)]
        stop_after: Option<u64>,
        /// Skip by this many seconds once the stream is ready (negative rewinds)
        #[arg(long, allow_hyphen_values = true)]
        skip: Option<f64>,
    },
    /// List the catalog for a subcategory, or one category of it
    Catalog {
        #[arg(long, default_value = "Filme")]
        subcategory: String,
        #[arg(long)]
        category: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hive_player=debug".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let store: Arc<dyn KeyValueStore> =
        Arc::new(SqliteStore::open(&config.database_path()?).await?);
    let credentials = Arc::new(StoredCredentials::new(store.clone()));
    let api = Arc::new(StreamHiveApi::from_config(&config.api)?);

    match cli.command {
        Command::Play {
            content_id,
            url,
            duration,
            speed,
            stop_after,
            skip,
        } => {
            let rate = PlaybackRate::try_from(speed)?;
            let (element, media_events) =
                SimulatedElement::new(duration, Duration::from_millis(250));
            let services = PlayerServices {
                store,
                watch_api: api,
                credentials,
                fullscreen: Arc::new(HeadlessFullscreen::new()),
                orientation: Arc::new(ManualOrientation::new(Orientation::Portrait)),
            };

            let (handle, controller) = PlayerController::new(
                content_id,
                Box::new(element),
                media_events,
                services,
                config.player_settings(),
            );
            let player = tokio::spawn(controller.run());

            handle.load(&url).await.context("Failed to load media")?;
            handle.set_playback_rate(rate)?;

            let mut snapshots = handle.subscribe();
            let deadline = stop_after.map(|secs| tokio::time::Instant::now() + Duration::from_secs(secs));
            let mut last_second = -1i64;
            let mut pending_skip = skip;
            loop {
                let changed = match deadline {
                    Some(deadline) => {
                        tokio::time::timeout_at(deadline, snapshots.changed()).await
                    }
                    None => Ok(snapshots.changed().await),
                };
                match changed {
                    Ok(Ok(())) => {}
                    Ok(Err(_)) => break,
                    Err(_) => {
                        info!("Stopping after {}s", stop_after.unwrap_or_default());
                        break;
                    }
                }

                let snapshot = snapshots.borrow_and_update().clone();
                if snapshot.session.duration > 0.0 {
                    if let Some(delta) = pending_skip.take() {
                        handle.skip_by(delta).await?;
                        continue;
                    }
                }

                let second = snapshot.session.current_time.floor() as i64;
                if second != last_second {
                    last_second = second;
                    let indicator = snapshot
                        .skip_indicator
                        .as_ref()
                        .map(|i| format!("  {} {}", i.direction.glyph(), i.label()))
                        .unwrap_or_default();
                    println!(
                        "[{}] {} / {}{}",
                        snapshot.state.as_str(),
                        format_time(snapshot.session.current_time),
                        format_time(snapshot.session.duration),
                        indicator
                    );
                }
                if let Some(error) = &snapshot.last_error {
                    warn!("Player error: {}", error);
                }
                if snapshot.state == PlayerState::Ended {
                    break;
                }
            }

            handle.close().await?;
            player.await?;
        }
        Command::Catalog {
            subcategory,
            category,
        } => match category {
            Some(category) => {
                let items = ContentService::fetch_category(
                    api.as_ref(),
                    credentials.as_ref(),
                    &category,
                    &subcategory,
                )
                .await?;
                for item in items {
                    println!("{}\t{}", item.id, item.title);
                }
            }
            None => {
                let catalog =
                    ContentService::fetch_catalog(api.as_ref(), credentials.as_ref(), &subcategory)
                        .await?;
                for category in &catalog.categories {
                    let count = catalog.by_category.get(category).map_or(0, Vec::len);
                    println!("{} ({} items)", category, count);
                }
                for item in &catalog.featured {
                    println!("featured: {}\t{}", item.id, item.title);
                }
            }
        },
    }

    Ok(())
}
