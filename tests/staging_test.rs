use std::collections::HashSet;

use klaksvik::domain::{StagedAudio, StagingToken};
use klaksvik::infrastructure::staging::StagingArea;

#[test]
fn given_many_minted_tokens_when_compared_then_all_are_distinct() {
    let tokens: HashSet<String> = (0..100)
        .map(|_| StagingToken::mint().as_str().to_string())
        .collect();

    assert_eq!(tokens.len(), 100);
}

#[test]
fn given_token_when_displayed_then_matches_as_str() {
    let token = StagingToken::mint();

    assert_eq!(format!("{}", token), token.as_str());
}

#[test]
fn given_label_and_extension_when_building_path_then_format_is_label_token_extension() {
    let dir = tempfile::TempDir::new().unwrap();
    let staging = StagingArea::new(dir.path().to_path_buf()).unwrap();
    let token = StagingToken::mint();

    let path = staging.path_for("audio", &token, "ogg");

    let expected = dir.path().join(format!("audio_{}.ogg", token));
    assert_eq!(path, expected);
}

#[tokio::test]
async fn given_payload_when_writing_then_file_is_persisted_under_base() {
    let dir = tempfile::TempDir::new().unwrap();
    let staging = StagingArea::new(dir.path().to_path_buf()).unwrap();
    let token = StagingToken::mint();
    let path = staging.path_for("audio", &token, "mp3");

    staging.write(&path, b"audio payload").await.unwrap();

    let stored = std::fs::read(&path).unwrap();
    assert_eq!(stored, b"audio payload");
    assert!(path.starts_with(staging.base()));
}

#[test]
fn given_missing_base_directory_when_creating_staging_area_then_it_is_created() {
    let dir = tempfile::TempDir::new().unwrap();
    let nested = dir.path().join("staging").join("audio");

    let staging = StagingArea::new(nested.clone()).unwrap();

    assert!(nested.is_dir());
    assert_eq!(staging.base(), nested);
}

#[test]
fn given_staged_audio_when_reading_accessors_then_they_match_construction() {
    let artifact = StagedAudio::new("/tmp/audio_1_abc.ogg".into(), "ogg");

    assert_eq!(artifact.path().to_str().unwrap(), "/tmp/audio_1_abc.ogg");
    assert_eq!(artifact.media_subtype(), "ogg");
    assert_eq!(
        artifact.clone().into_path().to_str().unwrap(),
        "/tmp/audio_1_abc.ogg"
    );
}
