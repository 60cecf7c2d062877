use chrono::Utc;
use tabled::Table;

use crate::{
    discovery::{self, NOTHING_FOUND_MESSAGE},
    error, info,
    management::TokenManager,
    success,
    types::{RunOutcome, Track, TrackTableRow},
};

pub async fn generate(dry_run: bool) {
    let mut token_mgr = match TokenManager::load().await {
        Ok(manager) => manager,
        Err(e) => {
            error!(
                "Failed to load token. Please run weekly-discoveries auth\n Error: {}",
                e
            );
        }
    };

    let credential = token_mgr.credential().await;
    let (client, options) = super::client_and_options();

    if dry_run {
        match discovery::discover(&client, &credential, &options, Utc::now()).await {
            Ok(tracks) if tracks.is_empty() => info!("{}", NOTHING_FOUND_MESSAGE),
            Ok(tracks) => {
                print_tracks(&tracks);
                success!("{} tracks would be added.", tracks.len());
            }
            Err(e) => error!("Failed to discover releases: {}", e),
        }
        return;
    }

    match discovery::run(&client, &credential, &options).await {
        Ok(RunOutcome::Created(summary)) => {
            print_tracks(&summary.preview);
            if summary.tracks_added > summary.preview.len() {
                info!(
                    "... and {} more.",
                    summary.tracks_added - summary.preview.len()
                );
            }
            success!(
                "Created {} with {} tracks: {}",
                summary.playlist_name,
                summary.tracks_added,
                summary.playlist_url
            );
        }
        Ok(RunOutcome::NothingFound) => info!("{}", NOTHING_FOUND_MESSAGE),
        Err(e) => error!("Failed to generate playlist: {}", e),
    }
}

fn print_tracks(tracks: &[Track]) {
    let rows: Vec<TrackTableRow> = tracks.iter().map(TrackTableRow::from).collect();
    println!("{}", Table::new(rows));
}
