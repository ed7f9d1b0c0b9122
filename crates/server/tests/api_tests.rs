//! API tests driving the router with mock platforms.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{fixtures, TestFixture};
use moodtune_core::{load_config_from_str, Platform};

// ============================================================================
// Health and config
// ============================================================================

#[tokio::test]
async fn test_health() {
    let fixture = TestFixture::new();

    let response = fixture.get("/api/v1/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_config_redacts_tokens() {
    let config = load_config_from_str(
        r#"
        [spotify]
        access_token = "secret-spotify-token"
        user_id = "me"

        [youtube]
        access_token = "secret-youtube-token"
        "#,
    )
    .unwrap();
    let fixture = TestFixture::with_config(config);

    let response = fixture.get("/api/v1/config").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["spotify"]["access_token_configured"], true);
    assert_eq!(response.body["spotify"]["user_id"], "me");
    assert_eq!(response.body["youtube"]["access_token_configured"], true);
    let text = response.body.to_string();
    assert!(!text.contains("secret-spotify-token"));
    assert!(!text.contains("secret-youtube-token"));
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let fixture = TestFixture::new();
    fixture.get("/api/v1/health").await;

    let (status, text) = fixture.get_text("/metrics").await;

    assert_eq!(status, StatusCode::OK);
    assert!(text.contains("moodtune_http_requests_total"));
}

// ============================================================================
// Convert
// ============================================================================

#[tokio::test]
async fn test_convert_spotify_to_youtube() {
    let fixture = TestFixture::new();
    fixture
        .spotify
        .add_playlist(
            "p1",
            vec![
                fixtures::track("Heroes", "David Bowie", "s1", Platform::Spotify),
                fixtures::track("Nope", "Nobody", "s2", Platform::Spotify),
            ],
        )
        .await;
    fixture
        .youtube
        .add_search_hit(
            "Heroes David Bowie",
            fixtures::track("Heroes", "David Bowie", "v1", Platform::YouTube),
        )
        .await;

    let response = fixture
        .post(
            "/api/v1/convert",
            json!({
                "playlist_url": fixtures::spotify_url("p1"),
                "target_platform": "youtube",
                "playlist_name": "Copied"
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let created = fixture.youtube.created_playlists().await;
    assert_eq!(created[0].name, "Copied");
    assert_eq!(response.body["url"], created[0].url.as_str());
    assert_eq!(response.body["matched"], 1);
    assert_eq!(response.body["unmatched"][0]["track"], "Nobody - Nope");
}

#[tokio::test]
async fn test_convert_unrecognized_reference() {
    let fixture = TestFixture::new();

    let response = fixture
        .post(
            "/api/v1/convert",
            json!({
                "playlist_url": "https://example.com/playlist/1",
                "target_platform": "spotify"
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["error"]
        .as_str()
        .unwrap()
        .contains("Unrecognized playlist reference"));
}

#[tokio::test]
async fn test_convert_unsupported_target() {
    let fixture = TestFixture::new();

    let response = fixture
        .post(
            "/api/v1/convert",
            json!({
                "playlist_url": fixtures::spotify_url("p1"),
                "target_platform": "deezer"
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(fixture.spotify.recorded_calls().await.is_empty());
}

#[tokio::test]
async fn test_convert_empty_playlist() {
    let fixture = TestFixture::new();
    fixture.spotify.add_playlist("empty", vec![]).await;

    let response = fixture
        .post(
            "/api/v1/convert",
            json!({
                "playlist_url": fixtures::spotify_url("empty"),
                "target_platform": "youtube"
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_convert_no_matches_on_youtube() {
    let fixture = TestFixture::new();
    fixture
        .spotify
        .add_playlist("p1", vec![fixtures::track("Nope", "Nobody", "s1", Platform::Spotify)])
        .await;

    let response = fixture
        .post(
            "/api/v1/convert",
            json!({
                "playlist_url": fixtures::spotify_url("p1"),
                "target_platform": "youtube"
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(fixture.youtube.created_playlists().await.is_empty());
}

#[tokio::test]
async fn test_convert_platform_failure_is_bad_gateway() {
    let fixture = TestFixture::new();
    fixture
        .spotify
        .set_next_read_error(moodtune_core::PlatformError::Unauthorized(Platform::Spotify))
        .await;

    let response = fixture
        .post(
            "/api/v1/convert",
            json!({
                "playlist_url": fixtures::spotify_url("p1"),
                "target_platform": "youtube"
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
}

// ============================================================================
// Generate
// ============================================================================

async fn seed_generation(fixture: &TestFixture) {
    fixture
        .spotify
        .add_playlist(
            "seed",
            vec![
                fixtures::track("A", "X", "a", Platform::Spotify),
                fixtures::track("B", "Y", "b", Platform::Spotify),
            ],
        )
        .await;
    fixture
        .features
        .add("a", fixtures::features(0.8, 0.6, 0.7, -5.0))
        .await;
    fixture
        .features
        .add("b", fixtures::features(0.2, 0.9, 0.3, -12.0))
        .await;
}

#[tokio::test]
async fn test_generate_on_spotify() {
    let fixture = TestFixture::new();
    seed_generation(&fixture).await;

    let response = fixture
        .post(
            "/api/v1/generate",
            json!({
                "seed_playlist_url": fixtures::spotify_url("seed"),
                "seed_platform": "spotify",
                "target_platform": "spotify",
                "target_energy": 0.8,
                "target_valence": 0.5,
                "activity": "working out",
                "environment": "gym",
                "amount": 1
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let created = fixture.spotify.created_playlists().await;
    assert_eq!(created[0].name, "Generated Playlist");
    assert_eq!(created[0].track_ids, vec!["a"]);
    assert_eq!(response.body["url"], created[0].url.as_str());
    assert_eq!(response.body["tracks"][0]["track"]["title"], "A");
}

#[tokio::test]
async fn test_generate_unknown_mood_words_use_defaults() {
    let fixture = TestFixture::new();
    seed_generation(&fixture).await;

    let response = fixture
        .post(
            "/api/v1/generate",
            json!({
                "seed_playlist_url": fixtures::spotify_url("seed"),
                "seed_platform": "spotify",
                "target_platform": "spotify",
                "target_energy": 0.5,
                "target_valence": 0.5,
                "activity": "commuting",
                "environment": "office",
                "amount": 2
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["tracks"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_generate_invalid_amount() {
    let fixture = TestFixture::new();
    seed_generation(&fixture).await;

    let response = fixture
        .post(
            "/api/v1/generate",
            json!({
                "seed_playlist_url": fixtures::spotify_url("seed"),
                "seed_platform": "spotify",
                "target_platform": "youtube",
                "target_energy": 0.5,
                "target_valence": 0.5,
                "activity": "relaxing",
                "environment": "home",
                "amount": 0
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_generate_no_scorable_tracks() {
    let fixture = TestFixture::new();
    fixture
        .spotify
        .add_playlist("seed", vec![fixtures::track("Z", "Q", "z", Platform::Spotify)])
        .await;

    let response = fixture
        .post(
            "/api/v1/generate",
            json!({
                "seed_playlist_url": fixtures::spotify_url("seed"),
                "seed_platform": "spotify",
                "target_platform": "spotify",
                "target_energy": 0.5,
                "target_valence": 0.5,
                "activity": "studying",
                "environment": "car",
                "amount": 3
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body["error"]
        .as_str()
        .unwrap()
        .contains("known audio features"));
}
