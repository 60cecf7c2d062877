use std::collections::HashSet;

use crate::{
    discovery::{DiscoveryOptions, fan_out},
    error::Result,
    info,
    spotify::{self, SpotifyClient},
    types::{Artist, Credential},
    warning,
};

/// Insertion-ordered set of artist IDs.
///
/// Iteration order is insertion order, which makes truncation to the artist
/// cap deterministic.
#[derive(Debug, Clone, Default)]
pub struct ArtistSet {
    order: Vec<String>,
    members: HashSet<String>,
}

impl ArtistSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `id` unless already present. Returns whether it was added.
    pub fn insert(&mut self, id: &str) -> bool {
        if id.is_empty() || !self.members.insert(id.to_string()) {
            return false;
        }
        self.order.push(id.to_string());
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.members.contains(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// The first `cap` members in insertion order.
    pub fn capped(&self, cap: usize) -> Vec<String> {
        self.order.iter().take(cap).cloned().collect()
    }
}

/// Builds the artist set from the followed artists and their related artists.
///
/// Every seed goes in first, in listing order. Then, seed by seed, the first
/// `per_seed_cap` related artists in the service's ranking are added. The
/// expansion always runs over every seed; the artist cap is applied later by
/// the release filter.
pub async fn expand(
    client: &SpotifyClient,
    credential: &Credential,
    seeds: &[Artist],
    options: &DiscoveryOptions,
) -> Result<ArtistSet> {
    let mut set = ArtistSet::new();
    for seed in seeds {
        set.insert(&seed.id);
    }

    let seed_ids: Vec<String> = seeds.iter().map(|a| a.id.clone()).collect();
    let per_seed_cap = options.per_seed_cap;

    let related = fan_out(&seed_ids, options.concurrency, |artist_id| {
        let client = client.clone();
        let credential = credential.clone();
        async move {
            match spotify::artists::get_related_artists(&client, &credential, &artist_id).await? {
                Some(artists) => Ok(artists.into_iter().take(per_seed_cap).collect::<Vec<_>>()),
                None => {
                    warning!(
                        "Credential rejected while fetching related artists of {}; skipping.",
                        artist_id
                    );
                    Ok(Vec::new())
                }
            }
        }
    })
    .await?;

    for artist in related.iter().flatten() {
        set.insert(&artist.id);
    }

    info!(
        "Expanded {} followed artists to {} artists.",
        seeds.len(),
        set.len()
    );

    Ok(set)
}
