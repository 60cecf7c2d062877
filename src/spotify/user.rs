use crate::{
    error::Result,
    spotify::SpotifyClient,
    types::{Credential, UserProfile},
};

/// Profile of the user the credential belongs to.
pub async fn get_current_user(
    client: &SpotifyClient,
    credential: &Credential,
) -> Result<Option<UserProfile>> {
    client.get(credential, "/me", &[]).await
}
