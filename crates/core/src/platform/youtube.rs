//! YouTube Music adapter over the YouTube Data API v3.

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
use crate::config::YouTubeConfig;

/// The "Music" video category.
const MUSIC_CATEGORY_ID: &str = "10";

/// Auto-generated artist channels are named "<Artist> - Topic".
const TOPIC_SUFFIX: &str = " - Topic";

/// YouTube Data API client.
pub struct YouTubeClient {
    client: Client,
    api_base: String,
    access_token: String,
    allow_empty_playlist: bool,
}

impl YouTubeClient {
    /// Create a new YouTube client.
    pub fn new(config: YouTubeConfig) -> Result<Self, PlatformError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            access_token: config.access_token,
            allow_empty_playlist: config.allow_empty_playlist,
        })
    }

    /// Canonical YouTube Music URL for a playlist id.
    pub fn playlist_url(id: &str) -> String {
        format!("https://music.youtube.com/playlist?list={}", id)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        what: &str,
    ) -> Result<T, PlatformError> {
        let response = self
            .client
            .get(format!("{}/{}", self.api_base, path))
            .bearer_auth(&self.access_token)
            .query(query)
            .send()
            .await?;
        let response = check_response(Platform::YouTube, response, what).await?;

        response
            .json()
            .await
            .map_err(|e| PlatformError::ParseError(format!("YouTube {}: {}", what, e)))
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        part: &str,
        body: &serde_json::Value,
        what: &str,
    ) -> Result<T, PlatformError> {
        let response = self
            .client
            .post(format!("{}/{}", self.api_base, path))
            .bearer_auth(&self.access_token)
            .query(&[("part", part)])
            .json(body)
            .send()
            .await?;
        let response = check_response(Platform::YouTube, response, what).await?;

        response
            .json()
            .await
            .map_err(|e| PlatformError::ParseError(format!("YouTube {}: {}", what, e)))
    }
}

#[async_trait]
impl PlatformClient for YouTubeClient {
    fn platform(&self) -> Platform {
        Platform::YouTube
    }

    fn allows_empty_playlist(&self) -> bool {
        self.allow_empty_playlist
    }

    async fn read_playlist_tracks(
        &self,
        playlist: &PlaylistRef,
    ) -> Result<Vec<Track>, PlatformError> {
        let mut tracks = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query = vec![
                ("part", "snippet"),
                ("maxResults", "50"),
                ("playlistId", playlist.id.as_str()),
            ];
            if let Some(token) = page_token.as_deref() {
                query.push(("pageToken", token));
            }

            let page: YtPlaylistItemsPage = self
                .get_json("playlistItems", &query, &playlist.id)
                .await?;
            debug!(
                playlist = %playlist.id,
                items = page.items.len(),
                "Read YouTube playlist page"
            );

            tracks.extend(page.items.into_iter().filter_map(YtPlaylistItem::into_track));

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(tracks)
    }

    async fn search_top_track(&self, query: &str) -> Result<Option<Track>, PlatformError> {
        let result: YtSearchResponse = self
            .get_json(
                "search",
                &[
                    ("part", "snippet"),
                    ("type", "video"),
                    ("videoCategoryId", MUSIC_CATEGORY_ID),
                    ("maxResults", "1"),
                    ("q", query),
                ],
                query,
            )
            .await?;

        Ok(result
            .items
            .into_iter()
            .next()
            .and_then(YtSearchItem::into_track))
    }

    async fn create_playlist(
        &self,
        request: &NewPlaylist,
    ) -> Result<CreatedPlaylist, PlatformError> {
        let body = json!({
            "snippet": {
                "title": request.name,
                "description": request.description,
            },
            "status": { "privacyStatus": "public" },
        });
        let created: YtResource = self
            .post_json("playlists", "snippet,status", &body, &request.name)
            .await?;

        // The Data API has no bulk insert; one item per call, in order.
        for video_id in &request.track_ids {
            let body = json!({
                "snippet": {
                    "playlistId": created.id,
                    "resourceId": { "kind": "youtube#video", "videoId": video_id },
                },
            });
            let _: YtResource = self
                .post_json("playlistItems", "snippet", &body, video_id)
                .await?;
        }

        debug!(
            playlist = %created.id,
            tracks = request.track_ids.len(),
            "Created YouTube playlist"
        );

        Ok(CreatedPlaylist {
            url: Self::playlist_url(&created.id),
            id: created.id,
        })
    }
}

/// Strip the " - Topic" suffix from auto-generated artist channels.
fn artist_from_channel(channel: &str) -> String {
    channel
        .strip_suffix(TOPIC_SUFFIX)
        .unwrap_or(channel)
        .trim()
        .to_string()
}

// ============================================================================
// YouTube API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YtPlaylistItemsPage {
    #[serde(default)]
    items: Vec<YtPlaylistItem>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct YtPlaylistItem {
    snippet: YtPlaylistItemSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YtPlaylistItemSnippet {
    #[serde(default)]
    title: String,
    /// Missing for deleted and private videos.
    #[serde(default)]
    video_owner_channel_title: Option<String>,
    resource_id: YtResourceId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YtResourceId {
    #[serde(default)]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct YtSearchResponse {
    #[serde(default)]
    items: Vec<YtSearchItem>,
}

#[derive(Debug, Deserialize)]
struct YtSearchItem {
    id: YtResourceId,
    snippet: YtSearchSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YtSearchSnippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    channel_title: String,
}

#[derive(Debug, Deserialize)]
struct YtResource {
    id: String,
}

impl YtPlaylistItem {
    fn into_track(self) -> Option<Track> {
        let snippet = self.snippet;
        let channel = snippet.video_owner_channel_title?;
        let video_id = snippet.resource_id.video_id?;

        Some(Track::new(
            snippet.title,
            artist_from_channel(&channel),
            Some(video_id),
            Platform::YouTube,
        ))
    }
}

impl YtSearchItem {
    fn into_track(self) -> Option<Track> {
        let video_id = self.id.video_id?;
        Some(Track::new(
            self.snippet.title,
            artist_from_channel(&self.snippet.channel_title),
            Some(video_id),
            Platform::YouTube,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artist_from_topic_channel() {
        assert_eq!(artist_from_channel("Daft Punk - Topic"), "Daft Punk");
        assert_eq!(artist_from_channel("DaftPunkVEVO"), "DaftPunkVEVO");
    }

    #[test]
    fn test_playlist_items_skip_unavailable_videos() {
        let page: YtPlaylistItemsPage = serde_json::from_value(json!({
            "items": [
                { "snippet": {
                    "title": "One More Time",
                    "videoOwnerChannelTitle": "Daft Punk - Topic",
                    "resourceId": { "kind": "youtube#video", "videoId": "vid1" }
                } },
                { "snippet": {
                    "title": "Deleted video",
                    "resourceId": { "kind": "youtube#video", "videoId": "vid2" }
                } }
            ],
            "nextPageToken": "CAUQAA"
        }))
        .unwrap();

        assert_eq!(page.next_page_token.as_deref(), Some("CAUQAA"));
        let tracks: Vec<Track> = page
            .items
            .into_iter()
            .filter_map(YtPlaylistItem::into_track)
            .collect();

        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].title, "One More Time");
        assert_eq!(tracks[0].primary_artist, "Daft Punk");
        assert_eq!(tracks[0].native_id.as_deref(), Some("vid1"));
        assert_eq!(tracks[0].platform, Platform::YouTube);
    }

    #[test]
    fn test_search_item_parsing() {
        let resp: YtSearchResponse = serde_json::from_value(json!({
            "items": [{
                "id": { "kind": "youtube#video", "videoId": "abc" },
                "snippet": { "title": "Around the World", "channelTitle": "Daft Punk - Topic" }
            }]
        }))
        .unwrap();

        let track = resp.items.into_iter().next().and_then(YtSearchItem::into_track).unwrap();
        assert_eq!(track.native_id.as_deref(), Some("abc"));
        assert_eq!(track.primary_artist, "Daft Punk");
    }

    #[test]
    fn test_playlist_url() {
        assert_eq!(
            YouTubeClient::playlist_url("PL123"),
            "https://music.youtube.com/playlist?list=PL123"
        );
    }
}
