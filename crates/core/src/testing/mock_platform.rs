//! Mock platform client for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::platform::{
    CreatedPlaylist, NewPlaylist, Platform, PlatformClient, PlatformError, PlaylistRef, Track,
};

/// A recorded platform call for test assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedPlatformCall {
    ReadPlaylist { id: String },
    Search { query: String },
    CreatePlaylist { name: String, track_ids: Vec<String> },
}

/// A playlist created through the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedPlaylist {
    pub id: String,
    pub url: String,
    pub name: String,
    pub description: String,
    pub track_ids: Vec<String>,
}

/// Mock implementation of the PlatformClient trait.
///
/// Provides controllable behavior for testing:
/// - Serve configured playlists (and playlists created through the mock)
/// - Return configured search hits, keyed by exact query
/// - Inject per-query search failures and one-shot read/create failures
/// - Record every call for assertions
///
/// Spotify mocks accept empty playlists and YouTube mocks refuse them,
/// matching the real adapters' defaults.
///
/// # Example
///
/// ```rust,ignore
/// use moodtune_core::testing::{fixtures, MockPlatform};
///
/// let youtube = MockPlatform::new(Platform::YouTube);
/// youtube
///     .add_search_hit("Heroes David Bowie", fixtures::track("Heroes", "David Bowie", "v1", Platform::YouTube))
///     .await;
///
/// // ... run a conversion ...
///
/// let created = youtube.created_playlists().await;
/// assert_eq!(created[0].track_ids, vec!["v1"]);
/// ```
#[derive(Debug, Clone)]
pub struct MockPlatform {
    platform: Platform,
    allow_empty_playlist: bool,
    /// Playlist tracks by playlist id.
    playlists: Arc<RwLock<HashMap<String, Vec<Track>>>>,
    /// Every track the mock knows, by native id.
    known_tracks: Arc<RwLock<HashMap<String, Track>>>,
    /// Search hits by exact query.
    search_hits: Arc<RwLock<HashMap<String, Track>>>,
    /// Search failures by exact query.
    search_failures: Arc<RwLock<HashMap<String, PlatformError>>>,
    /// If set, the next read will fail with this error.
    next_read_error: Arc<RwLock<Option<PlatformError>>>,
    /// If set, the next create will fail with this error.
    next_create_error: Arc<RwLock<Option<PlatformError>>>,
    created: Arc<RwLock<Vec<RecordedPlaylist>>>,
    calls: Arc<RwLock<Vec<RecordedPlatformCall>>>,
}

impl MockPlatform {
    /// Create a new empty mock for the given platform.
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            allow_empty_playlist: platform == Platform::Spotify,
            playlists: Arc::new(RwLock::new(HashMap::new())),
            known_tracks: Arc::new(RwLock::new(HashMap::new())),
            search_hits: Arc::new(RwLock::new(HashMap::new())),
            search_failures: Arc::new(RwLock::new(HashMap::new())),
            next_read_error: Arc::new(RwLock::new(None)),
            next_create_error: Arc::new(RwLock::new(None)),
            created: Arc::new(RwLock::new(Vec::new())),
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Override the empty-playlist policy.
    pub fn with_allow_empty_playlist(mut self, allow: bool) -> Self {
        self.allow_empty_playlist = allow;
        self
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Serve `tracks` for playlist `id`.
    pub async fn add_playlist(&self, id: &str, tracks: Vec<Track>) {
        self.remember(&tracks).await;
        self.playlists.write().await.insert(id.to_string(), tracks);
    }

    /// Answer `query` with `track`.
    pub async fn add_search_hit(&self, query: &str, track: Track) {
        self.remember(std::slice::from_ref(&track)).await;
        self.search_hits
            .write()
            .await
            .insert(query.to_string(), track);
    }

    /// Fail the next search for `query` with `error`.
    pub async fn fail_search(&self, query: &str, error: PlatformError) {
        self.search_failures
            .write()
            .await
            .insert(query.to_string(), error);
    }

    /// Configure the next read to fail with the given error.
    pub async fn set_next_read_error(&self, error: PlatformError) {
        *self.next_read_error.write().await = Some(error);
    }

    /// Configure the next create to fail with the given error.
    pub async fn set_next_create_error(&self, error: PlatformError) {
        *self.next_create_error.write().await = Some(error);
    }

    async fn remember(&self, tracks: &[Track]) {
        let mut known = self.known_tracks.write().await;
        for track in tracks {
            if let Some(id) = &track.native_id {
                known.insert(id.clone(), track.clone());
            }
        }
    }

    // =========================================================================
    // Recording
    // =========================================================================

    /// Get all recorded calls.
    pub async fn recorded_calls(&self) -> Vec<RecordedPlatformCall> {
        self.calls.read().await.clone()
    }

    /// Search queries issued, in order.
    pub async fn search_queries(&self) -> Vec<String> {
        self.calls
            .read()
            .await
            .iter()
            .filter_map(|c| match c {
                RecordedPlatformCall::Search { query } => Some(query.clone()),
                _ => None,
            })
            .collect()
    }

    /// Playlists created through this mock.
    pub async fn created_playlists(&self) -> Vec<RecordedPlaylist> {
        self.created.read().await.clone()
    }

    fn playlist_url(&self, id: &str) -> String {
        match self.platform {
            Platform::Spotify => format!("https://open.spotify.com/playlist/{}", id),
            Platform::YouTube => format!("https://music.youtube.com/playlist?list={}", id),
        }
    }
}

#[async_trait]
impl PlatformClient for MockPlatform {
    fn platform(&self) -> Platform {
        self.platform
    }

    fn allows_empty_playlist(&self) -> bool {
        self.allow_empty_playlist
    }

    async fn read_playlist_tracks(
        &self,
        playlist: &PlaylistRef,
    ) -> Result<Vec<Track>, PlatformError> {
        self.calls.write().await.push(RecordedPlatformCall::ReadPlaylist {
            id: playlist.id.clone(),
        });

        if let Some(error) = self.next_read_error.write().await.take() {
            return Err(error);
        }

        self.playlists
            .read()
            .await
            .get(&playlist.id)
            .cloned()
            .ok_or_else(|| PlatformError::NotFound(playlist.id.clone()))
    }

    async fn search_top_track(&self, query: &str) -> Result<Option<Track>, PlatformError> {
        self.calls.write().await.push(RecordedPlatformCall::Search {
            query: query.to_string(),
        });

        if let Some(error) = self.search_failures.write().await.remove(query) {
            return Err(error);
        }

        Ok(self.search_hits.read().await.get(query).cloned())
    }

    async fn create_playlist(
        &self,
        request: &NewPlaylist,
    ) -> Result<CreatedPlaylist, PlatformError> {
        self.calls.write().await.push(RecordedPlatformCall::CreatePlaylist {
            name: request.name.clone(),
            track_ids: request.track_ids.clone(),
        });

        if let Some(error) = self.next_create_error.write().await.take() {
            return Err(error);
        }

        let mut created = self.created.write().await;
        // Alphanumeric so the URL parses back for either platform.
        let id = format!("{}created{}", self.platform, created.len() + 1);
        let url = self.playlist_url(&id);

        // Make the new playlist readable, as the real platforms do.
        let tracks = {
            let known = self.known_tracks.read().await;
            request
                .track_ids
                .iter()
                .map(|tid| {
                    known.get(tid).cloned().unwrap_or_else(|| {
                        Track::new(tid.clone(), "", Some(tid.clone()), self.platform)
                    })
                })
                .collect()
        };
        self.playlists.write().await.insert(id.clone(), tracks);

        created.push(RecordedPlaylist {
            id: id.clone(),
            url: url.clone(),
            name: request.name.clone(),
            description: request.description.clone(),
            track_ids: request.track_ids.clone(),
        });

        Ok(CreatedPlaylist { id, url })
    }
}
