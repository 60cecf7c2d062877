use crate::{
    error::Result,
    spotify::{self, SpotifyClient},
    types::{Artist, Credential},
    warning,
};

/// Largest page the followed-artists endpoint serves.
pub const FOLLOWED_PAGE_SIZE: u32 = 50;

/// Walks the followed-artists listing to the end and returns every artist in
/// the order the service lists them.
///
/// A rejected credential stops the walk and returns what was collected so far.
/// The walk also stops if the service hands back a cursor it already gave us.
pub async fn collect_followed_artists(
    client: &SpotifyClient,
    credential: &Credential,
) -> Result<Vec<Artist>> {
    let mut artists: Vec<Artist> = Vec::new();
    let mut after: Option<String> = None;

    loop {
        let page = spotify::artists::get_followed_artists(
            client,
            credential,
            FOLLOWED_PAGE_SIZE,
            after.as_deref(),
        )
        .await?;

        let Some(page) = page else {
            warning!(
                "Credential rejected while listing followed artists; keeping {} collected so far.",
                artists.len()
            );
            break;
        };

        artists.extend(page.items);

        if page.next.is_none() {
            break;
        }

        match page.cursors.and_then(|c| c.after) {
            Some(cursor) if after.as_deref() != Some(cursor.as_str()) => after = Some(cursor),
            _ => break,
        }
    }

    Ok(artists)
}
