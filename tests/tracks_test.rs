mod common;

use common::{APP, artwork, audio_file, raw, raws, session, track, user, RecordingFetcher};
use matterdl::{
    MatterError,
    matter::{IncludedIndex, tracks},
    types::Format,
};
use serde_json::json;

fn index() -> IncludedIndex {
    IncludedIndex::build(
        Some(&raws(&[
            user("1842", "yandere", "yandere"),
            audio_file("f1"),
            artwork("a1"),
        ])),
        None,
    )
}

#[test]
fn test_materialize_copies_track_and_author_fields() {
    let resource = raw(track("3079", "dream of you", "1842", "f1", "a1"));

    let record = tracks::materialize(&resource, &index(), APP).unwrap();

    assert_eq!(record.id, "3079");
    assert_eq!(record.title, "dream of you");
    assert_eq!(record.description.as_deref(), Some("ft miku"));
    assert_eq!(record.uploader, "yandere");
    assert_eq!(record.uploader_id, "1842");
    assert!(record.uploader_url.ends_with("/artists/@yandere"));
    assert_eq!(record.view_count, Some(1000));
    assert_eq!(record.like_count, Some(12));
    assert_eq!(record.comment_count, Some(3));
    assert_eq!(record.timestamp, Some(1575338869));
    assert_eq!(record.release_date.as_deref(), Some("20191202"));
    assert_eq!(record.duration, Some(10.5));
}

#[test]
fn test_formats_skip_preview_and_end_with_original() {
    let resource = raw(track("3079", "dream of you", "1842", "f1", "a1"));

    let record = tracks::materialize(&resource, &index(), APP).unwrap();

    assert_eq!(
        record.formats,
        vec![
            Format {
                format_id: "high".to_string(),
                ext: "mp3".to_string(),
                url: "https://cdn.example/f1/high.mp3".to_string(),
                vcodec: "none".to_string(),
                abr: Some(320),
                filesize: None,
            },
            Format {
                format_id: "original".to_string(),
                ext: "wav".to_string(),
                url: "https://cdn.example/f1/original.wav".to_string(),
                vcodec: "none".to_string(),
                abr: None,
                filesize: Some(123),
            },
        ]
    );
}

#[test]
fn test_unknown_variant_has_no_bitrate() {
    let file = json!({
        "id": "f2",
        "type": "files",
        "attributes": {
            "file_uri": "https://cdn.example/f2/original.flac",
            "variants": { "medium": "https://cdn.example/f2/medium.mp3" },
            "metadata": { "format_name": "flac" }
        }
    });
    let index = IncludedIndex::build(
        Some(&raws(&[user("1842", "yandere", "yandere"), file, artwork("a1")])),
        None,
    );
    let resource = raw(track("1", "t", "1842", "f2", "a1"));

    let record = tracks::materialize(&resource, &index, APP).unwrap();

    assert_eq!(record.formats.len(), 2);
    assert_eq!(record.formats[0].format_id, "medium");
    assert_eq!(record.formats[0].abr, None);
    assert_eq!(record.formats[1].ext, "flac");
    assert_eq!(record.formats[1].filesize, None);
    assert_eq!(record.duration, None);
}

#[test]
fn test_original_format_present_without_variants() {
    let file = json!({
        "id": "f3",
        "type": "files",
        "attributes": {
            "file_uri": "https://cdn.example/f3/original.wav",
            "variants": { "preview": "https://cdn.example/f3/preview.mp3" },
            "metadata": { "format_name": "wav", "size": 1, "duration": 1.0 }
        }
    });
    let index = IncludedIndex::build(
        Some(&raws(&[user("1842", "yandere", "yandere"), file, artwork("a1")])),
        None,
    );
    let resource = raw(track("1", "t", "1842", "f3", "a1"));

    let record = tracks::materialize(&resource, &index, APP).unwrap();

    assert_eq!(record.formats.len(), 1);
    assert_eq!(record.formats[0].format_id, "original");
    assert!(record.formats.iter().all(|f| f.format_id != "preview"));
}

#[test]
fn test_original_thumbnail_is_last_with_highest_preference() {
    let resource = raw(track("3079", "dream of you", "1842", "f1", "a1"));

    let record = tracks::materialize(&resource, &index(), APP).unwrap();

    let ids: Vec<&str> = record.thumbnails.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["small", "large", "original"]);

    let original = record.thumbnails.last().unwrap();
    assert_eq!(original.url, "https://cdn.example/a1/art.png");
    assert_eq!(original.preference, Some(10));
    assert!(record.thumbnails[..2].iter().all(|t| t.preference.is_none()));
}

#[test]
fn test_missing_author_fails_the_track() {
    let index = IncludedIndex::build(Some(&raws(&[audio_file("f1"), artwork("a1")])), None);
    let resource = raw(track("3079", "dream of you", "1842", "f1", "a1"));

    let err = tracks::materialize(&resource, &index, APP).unwrap_err();

    assert!(matches!(err, MatterError::OrphanedReference { ref id, .. } if id == "1842"));
}

#[test]
fn test_missing_relationship_fails_the_track() {
    let resource = raw(json!({
        "id": "3079",
        "type": "tracks",
        "attributes": { "title": "dream of you" },
        "relationships": {
            "author": { "data": { "id": "1842", "type": "users" } },
            "file": { "data": { "id": "f1", "type": "files" } }
        }
    }));

    let err = tracks::materialize(&resource, &index(), APP).unwrap_err();

    assert!(matches!(
        err,
        MatterError::MissingRelationship { ref relationship, .. } if relationship == "artwork"
    ));
}

#[test]
fn test_file_without_metadata_is_malformed() {
    let file = json!({
        "id": "f4",
        "type": "files",
        "attributes": { "file_uri": "https://cdn.example/f4", "variants": {} }
    });
    let index = IncludedIndex::build(
        Some(&raws(&[user("1842", "yandere", "yandere"), file, artwork("a1")])),
        None,
    );
    let resource = raw(track("1", "t", "1842", "f4", "a1"));

    let err = tracks::materialize(&resource, &index, APP).unwrap_err();

    assert!(matches!(err, MatterError::MalformedResource { ref id, .. } if id == "f4"));
}

#[tokio::test]
async fn test_extract_track_uses_unfiltered_index() {
    // artwork served with a type outside the playlist filter still resolves
    let mut art = artwork("a1");
    art["type"] = json!("artworks");
    let fetcher = RecordingFetcher::new().respond(
        "tracks/3079",
        json!({
            "data": track("3079", "dream of you", "1842", "f1", "a1"),
            "included": [user("1842", "yandere", "yandere"), audio_file("f1"), art]
        }),
    );
    let session = session(fetcher);

    let record = tracks::extract_track(&session, "3079").await.unwrap();

    assert_eq!(record.title, "dream of you");
    assert_eq!(record.thumbnails.len(), 3);

    let calls = session.fetcher().calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].url, "https://api.matter.online/api/v1/tracks/3079");
    assert_eq!(calls[0].bearer.as_deref(), Some("test-token"));
}
