/// Subcommand implementations
use crate::config::AppConfig;
use anyhow::{bail, Context, Result};
use melody_catalog::{CatalogPager, FetchOutcome};
use melody_core::{CatalogService, Song, SongId};
use melody_playback::{PlaybackConfig, PlaybackController};
use melody_subsonic::{SubsonicClient, SubsonicConfig};
use std::sync::Arc;
use tracing::{debug, info};

/// Build a client for the configured server and log in.
pub async fn connect(config: &AppConfig) -> Result<Arc<SubsonicClient>> {
    let server = &config.server;
    let client = SubsonicClient::new(SubsonicConfig {
        client_name: server.client_name.clone(),
        timeout: server.timeout(),
        ..SubsonicConfig::new(server.url.clone())
    })?;

    client
        .login(&server.username, &server.password)
        .await
        .with_context(|| format!("login to {} failed", server.url))?;

    Ok(Arc::new(client))
}

pub async fn ping(config: &AppConfig) -> Result<()> {
    let client = connect(config).await?;
    client.ping().await?;
    println!(
        "{} is reachable as {}",
        client.url(),
        config.server.username
    );
    Ok(())
}

/// List the catalog, `pages` pages deep.
pub async fn songs(config: &AppConfig, pages: u32) -> Result<()> {
    let client = connect(config).await?;
    let pager = CatalogPager::new(client, config.pager.clone());

    check(pager.refresh().await)?;
    for _ in 1..pages {
        if !pager.has_more() {
            break;
        }
        check(pager.load_more().await)?;
    }

    info!(
        songs = pager.len(),
        pages = pager.current_page(),
        has_more = pager.has_more(),
        "Catalog listing complete"
    );

    pager.with_songs(|songs| {
        for (index, song) in songs.iter().enumerate() {
            println!("{:>4}  {}", index + 1, describe(song));
        }
    });
    if pager.has_more() {
        println!("      ... more available (use --pages)");
    }

    Ok(())
}

/// Start playback of `song_id` with the loaded catalog as the queue.
pub async fn play(config: &AppConfig, song_id: &str, skip: u32) -> Result<()> {
    let client = connect(config).await?;
    let pager = CatalogPager::new(Arc::clone(&client), config.pager.clone());
    let song = find_song(&pager, &SongId::new(song_id)).await?;

    let controller = start_playback(&config.playback, song, pager.songs(), skip);

    let current = controller
        .current_song()
        .cloned()
        .context("no song is current after starting playback")?;
    let reference = client.resolve_stream_reference(&current.id).await?;

    info!(
        song_id = %current.id,
        index = ?controller.current_index(),
        queue = controller.queue_len(),
        mode = ?controller.mode(),
        "Playback started"
    );

    println!("Now playing: {}", describe(&current));
    println!("Stream: {}", reference);
    println!("{}", serde_json::to_string_pretty(&controller.snapshot())?);

    Ok(())
}

/// Play `song` with `queue` around it, then advance `skip` times.
fn start_playback(
    config: &PlaybackConfig,
    song: Song,
    queue: Vec<Song>,
    skip: u32,
) -> PlaybackController {
    let mut controller = PlaybackController::new(config.clone());
    controller.play_song(song, Some(queue));
    for _ in 0..skip {
        controller.next();
    }

    for event in controller.drain_events() {
        debug!(?event, "Playback event");
    }
    controller
}

/// Page through the catalog until `id` is loaded or the catalog ends.
async fn find_song<S: CatalogService>(pager: &CatalogPager<S>, id: &SongId) -> Result<Song> {
    check(pager.refresh().await)?;

    loop {
        let found = pager.with_songs(|songs| songs.iter().find(|s| &s.id == id).cloned());
        if let Some(song) = found {
            return Ok(song);
        }
        if !pager.has_more() {
            bail!("song {} not found in catalog", id);
        }
        check(pager.load_more().await)?;
    }
}

fn check(outcome: FetchOutcome) -> Result<()> {
    match outcome {
        FetchOutcome::Failed(e) if e.is_transient() => {
            Err(e).context("catalog fetch failed, try again later")
        }
        FetchOutcome::Failed(e) => Err(e).context("catalog fetch failed"),
        FetchOutcome::Loaded { .. } | FetchOutcome::Skipped => Ok(()),
    }
}

fn describe(song: &Song) -> String {
    let secs = song.duration_secs;
    format!(
        "{} - {} [{}:{:02}] ({})",
        song.artist,
        song.title,
        secs / 60,
        secs % 60,
        song.id
    )
}
