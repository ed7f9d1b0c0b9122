//! Spotify Web API adapter.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::{
    check_response, CreatedPlaylist, NewPlaylist, Platform, PlatformClient, PlatformError,
    PlaylistRef, Track,
};
use crate::config::SpotifyConfig;

/// Spotify accepts at most this many URIs per add-tracks request.
const ADD_TRACKS_BATCH: usize = 100;

/// Spotify Web API client.
pub struct SpotifyClient {
    client: Client,
    api_base: String,
    access_token: String,
    user_id: String,
    allow_empty_playlist: bool,
}

impl SpotifyClient {
    /// Create a new Spotify client.
    pub fn new(config: SpotifyConfig) -> Result<Self, PlatformError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            access_token: config.access_token,
            user_id: config.user_id,
            allow_empty_playlist: config.allow_empty_playlist,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        what: &str,
    ) -> Result<T, PlatformError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .query(query)
            .send()
            .await?;
        let response = check_response(Platform::Spotify, response, what).await?;

        response
            .json()
            .await
            .map_err(|e| PlatformError::ParseError(format!("Spotify {}: {}", what, e)))
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        url: &str,
        body: &serde_json::Value,
        what: &str,
    ) -> Result<T, PlatformError> {
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.access_token)
            .json(body)
            .send()
            .await?;
        let response = check_response(Platform::Spotify, response, what).await?;

        response
            .json()
            .await
            .map_err(|e| PlatformError::ParseError(format!("Spotify {}: {}", what, e)))
    }

    fn create_playlist_url(&self) -> String {
        if self.user_id.is_empty() {
            format!("{}/me/playlists", self.api_base)
        } else {
            format!(
                "{}/users/{}/playlists",
                self.api_base,
                urlencoding::encode(&self.user_id)
            )
        }
    }
}

#[async_trait]
impl PlatformClient for SpotifyClient {
    fn platform(&self) -> Platform {
        Platform::Spotify
    }

    fn allows_empty_playlist(&self) -> bool {
        self.allow_empty_playlist
    }

    async fn read_playlist_tracks(
        &self,
        playlist: &PlaylistRef,
    ) -> Result<Vec<Track>, PlatformError> {
        let mut url = format!(
            "{}/playlists/{}/tracks",
            self.api_base,
            urlencoding::encode(&playlist.id)
        );
        let mut query: &[(&str, &str)] = &[
            ("limit", "100"),
            ("fields", "items(track(id,name,artists(name))),next"),
        ];

        let mut tracks = Vec::new();
        loop {
            let page: SpPlaylistPage = self.get_json(&url, query, &playlist.id).await?;
            debug!(
                playlist = %playlist.id,
                items = page.items.len(),
                "Read Spotify playlist page"
            );

            tracks.extend(
                page.items
                    .into_iter()
                    .filter_map(|item| item.track)
                    .filter_map(SpTrack::into_track),
            );

            match page.next {
                // `next` already carries the paging query string.
                Some(next) => {
                    url = next;
                    query = &[];
                }
                None => break,
            }
        }

        Ok(tracks)
    }

    async fn search_top_track(&self, query: &str) -> Result<Option<Track>, PlatformError> {
        let url = format!("{}/search", self.api_base);
        let result: SpSearchResponse = self
            .get_json(&url, &[("q", query), ("type", "track"), ("limit", "1")], query)
            .await?;

        Ok(result
            .tracks
            .items
            .into_iter()
            .next()
            .and_then(SpTrack::into_track))
    }

    async fn create_playlist(
        &self,
        request: &NewPlaylist,
    ) -> Result<CreatedPlaylist, PlatformError> {
        let body = json!({
            "name": request.name,
            "description": request.description,
            "public": true,
        });
        let created: SpCreatedPlaylist = self
            .post_json(&self.create_playlist_url(), &body, &request.name)
            .await?;

        let add_url = format!(
            "{}/playlists/{}/tracks",
            self.api_base,
            urlencoding::encode(&created.id)
        );
        for batch in request.track_ids.chunks(ADD_TRACKS_BATCH) {
            let uris: Vec<String> = batch.iter().map(|id| track_uri(id)).collect();
            let _: SpSnapshot = self
                .post_json(&add_url, &json!({ "uris": uris }), &created.id)
                .await?;
        }

        debug!(
            playlist = %created.id,
            tracks = request.track_ids.len(),
            "Created Spotify playlist"
        );

        let url = created
            .external_urls
            .and_then(|u| u.spotify)
            .unwrap_or_else(|| format!("https://open.spotify.com/playlist/{}", created.id));

        Ok(CreatedPlaylist {
            id: created.id,
            url,
        })
    }
}

/// Spotify wants URIs when adding; the rest of the crate deals in bare ids.
fn track_uri(id: &str) -> String {
    if id.starts_with("spotify:") {
        id.to_string()
    } else {
        format!("spotify:track:{}", id)
    }
}

// ============================================================================
// Spotify API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct SpPlaylistPage {
    #[serde(default)]
    items: Vec<SpPlaylistItem>,
    #[serde(default)]
    next: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SpPlaylistItem {
    /// Null for removed or unavailable tracks.
    #[serde(default)]
    track: Option<SpTrack>,
}

#[derive(Debug, Deserialize)]
struct SpTrack {
    /// Null for local files.
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    artists: Vec<SpArtist>,
}

#[derive(Debug, Deserialize)]
struct SpArtist {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct SpSearchResponse {
    tracks: SpTrackPage,
}

#[derive(Debug, Deserialize)]
struct SpTrackPage {
    #[serde(default)]
    items: Vec<SpTrack>,
}

#[derive(Debug, Deserialize)]
struct SpCreatedPlaylist {
    id: String,
    #[serde(default)]
    external_urls: Option<SpExternalUrls>,
}

#[derive(Debug, Deserialize)]
struct SpExternalUrls {
    #[serde(default)]
    spotify: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SpSnapshot {
    #[allow(dead_code)]
    #[serde(default)]
    snapshot_id: Option<String>,
}

impl SpTrack {
    fn into_track(self) -> Option<Track> {
        if self.name.is_empty() {
            return None;
        }
        let artist = self
            .artists
            .into_iter()
            .next()
            .map(|a| a.name)
            .unwrap_or_default();

        Some(Track::new(self.name, artist, self.id, Platform::Spotify))
    }
}
