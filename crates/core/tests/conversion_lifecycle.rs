//! Conversion lifecycle integration tests.
//!
//! These tests drive the conversion pipeline against mock platforms:
//! - Reference recognition and early failures
//! - Partial matching with order preservation
//! - Per-platform empty-playlist policy
//! - Round trips between the two platforms

use std::sync::Arc;

use moodtune_core::{
    testing::{fixtures, MockPlatform, RecordedPlatformCall},
    ConversionPipeline, MissReason, Platform, PipelineError, PlatformError,
};

struct TestHarness {
    pipeline: ConversionPipeline,
    spotify: MockPlatform,
    youtube: MockPlatform,
}

impl TestHarness {
    fn new() -> Self {
        Self::with_platforms(
            MockPlatform::new(Platform::Spotify),
            MockPlatform::new(Platform::YouTube),
        )
    }

    fn with_platforms(spotify: MockPlatform, youtube: MockPlatform) -> Self {
        let pipeline = ConversionPipeline::new(Arc::new(spotify.clone()), Arc::new(youtube.clone()))
            .with_default_name("Converted Playlist");
        Self {
            pipeline,
            spotify,
            youtube,
        }
    }

    /// A three-track Spotify playlist where only the first and last tracks
    /// exist on YouTube Music.
    async fn seed_partial(&self) {
        self.spotify
            .add_playlist(
                "37i9dQZF1DX",
                vec![
                    fixtures::track("Heroes", "David Bowie", "s1", Platform::Spotify),
                    fixtures::track("Obscure B-Side", "Nobody", "s2", Platform::Spotify),
                    fixtures::track("Atlantis", "Donovan", "s3", Platform::Spotify),
                ],
            )
            .await;
        self.youtube
            .add_search_hit(
                "Heroes David Bowie",
                fixtures::track("Heroes", "David Bowie", "yt1", Platform::YouTube),
            )
            .await;
        self.youtube
            .add_search_hit(
                "Atlantis Donovan",
                fixtures::track("Atlantis", "Donovan", "yt3", Platform::YouTube),
            )
            .await;
    }
}

#[tokio::test]
async fn test_unrecognized_reference_touches_nothing() {
    let h = TestHarness::new();

    for reference in [
        "https://soundcloud.com/someone/sets/mix",
        "https://open.spotify.com/album/1A2B3C",
        "not a url",
        "",
    ] {
        let result = h.pipeline.convert(reference, Platform::YouTube).await;
        assert!(
            matches!(result, Err(PipelineError::UnrecognizedReference(_))),
            "{:?} should be unrecognized",
            reference
        );
    }

    assert!(h.spotify.recorded_calls().await.is_empty());
    assert!(h.youtube.recorded_calls().await.is_empty());
}

#[tokio::test]
async fn test_empty_playlist_before_any_search() {
    let h = TestHarness::new();
    h.youtube.add_playlist("PLempty", vec![]).await;

    let result = h
        .pipeline
        .convert(&fixtures::youtube_url("PLempty"), Platform::Spotify)
        .await;

    assert!(matches!(result, Err(PipelineError::EmptyPlaylist(_))));
    assert!(h.spotify.recorded_calls().await.is_empty());
}

#[tokio::test]
async fn test_partial_matches_preserve_order() {
    let h = TestHarness::new();
    h.seed_partial().await;

    let outcome = h
        .pipeline
        .convert_named(&fixtures::spotify_url("37i9dQZF1DX"), Platform::YouTube, None)
        .await
        .unwrap();

    assert_eq!(outcome.source, Platform::Spotify);
    assert_eq!(outcome.target, Platform::YouTube);
    assert_eq!(outcome.result.matched_count(), 2);
    assert_eq!(outcome.result.matched_ids(), vec!["yt1", "yt3"]);

    let unmatched: Vec<_> = outcome.result.unmatched().collect();
    assert_eq!(unmatched.len(), 1);
    assert_eq!(unmatched[0].source_track.title, "Obscure B-Side");
    assert_eq!(outcome.result.diagnostics[0].reason, MissReason::NoResult);

    // Searches go out one per track, in source order.
    assert_eq!(
        h.youtube.search_queries().await,
        vec![
            "Heroes David Bowie",
            "Obscure B-Side Nobody",
            "Atlantis Donovan"
        ]
    );

    let created = h.youtube.created_playlists().await;
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].track_ids, vec!["yt1", "yt3"]);
    assert_eq!(created[0].description, "Converted from Spotify");
    assert_eq!(outcome.url, created[0].url);
}

#[tokio::test]
async fn test_search_errors_are_misses() {
    let h = TestHarness::new();
    h.seed_partial().await;
    h.youtube
        .fail_search("Heroes David Bowie", PlatformError::RateLimited(Platform::YouTube))
        .await;

    let outcome = h
        .pipeline
        .convert_named(&fixtures::spotify_url("37i9dQZF1DX"), Platform::YouTube, None)
        .await
        .unwrap();

    assert_eq!(outcome.result.matched_ids(), vec!["yt3"]);
    assert!(matches!(
        outcome.result.diagnostics[0].reason,
        MissReason::SearchFailed(_)
    ));
    assert_eq!(outcome.result.diagnostics[1].reason, MissReason::NoResult);
}

#[tokio::test]
async fn test_youtube_refuses_empty_result() {
    let h = TestHarness::new();
    h.spotify
        .add_playlist(
            "nothing",
            vec![fixtures::track("Unknown", "Artist", "s1", Platform::Spotify)],
        )
        .await;

    let result = h
        .pipeline
        .convert(&fixtures::spotify_url("nothing"), Platform::YouTube)
        .await;

    assert!(matches!(
        result,
        Err(PipelineError::NoMatchesFound {
            target: Platform::YouTube,
            attempted: 1
        })
    ));
    let calls = h.youtube.recorded_calls().await;
    assert!(!calls
        .iter()
        .any(|c| matches!(c, RecordedPlatformCall::CreatePlaylist { .. })));
}

#[tokio::test]
async fn test_youtube_policy_can_allow_empty() {
    let h = TestHarness::with_platforms(
        MockPlatform::new(Platform::Spotify),
        MockPlatform::new(Platform::YouTube).with_allow_empty_playlist(true),
    );
    h.spotify
        .add_playlist(
            "nothing",
            vec![fixtures::track("Unknown", "Artist", "s1", Platform::Spotify)],
        )
        .await;

    let url = h
        .pipeline
        .convert(&fixtures::spotify_url("nothing"), Platform::YouTube)
        .await
        .unwrap();

    let created = h.youtube.created_playlists().await;
    assert!(created[0].track_ids.is_empty());
    assert_eq!(url, created[0].url);
}

#[tokio::test]
async fn test_round_trip() {
    let h = TestHarness::new();
    h.seed_partial().await;
    h.spotify
        .add_search_hit(
            "Heroes David Bowie",
            fixtures::track("Heroes", "David Bowie", "s1", Platform::Spotify),
        )
        .await;
    h.spotify
        .add_search_hit(
            "Atlantis Donovan",
            fixtures::track("Atlantis", "Donovan", "s3", Platform::Spotify),
        )
        .await;

    let youtube_url = h
        .pipeline
        .convert(&fixtures::spotify_url("37i9dQZF1DX"), Platform::YouTube)
        .await
        .unwrap();
    let spotify_url = h
        .pipeline
        .convert(&youtube_url, Platform::Spotify)
        .await
        .unwrap();

    let created = h.spotify.created_playlists().await;
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].track_ids, vec!["s1", "s3"]);
    assert_eq!(created[0].description, "Converted from YouTube Music");
    assert_eq!(spotify_url, created[0].url);
}

#[tokio::test]
async fn test_create_failure_propagates() {
    let h = TestHarness::new();
    h.seed_partial().await;
    h.youtube
        .set_next_create_error(PlatformError::ApiError {
            status: 403,
            message: "quotaExceeded".to_string(),
        })
        .await;

    let result = h
        .pipeline
        .convert(&fixtures::spotify_url("37i9dQZF1DX"), Platform::YouTube)
        .await;

    assert!(matches!(
        result,
        Err(PipelineError::Platform(PlatformError::ApiError { status: 403, .. }))
    ));
}
