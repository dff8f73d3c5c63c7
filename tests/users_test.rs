mod common;

use common::{RecordingFetcher, session, track_bundle, user};
use matterdl::{
    matter::users::{self, CollectionKind, CollectionTarget},
    types::{Entry, ExtractorKey},
};
use serde_json::{Value, json};

fn tracks_listing() -> Value {
    let first = track_bundle(1, "newest");
    let second = track_bundle(2, "older");
    json!({
        "data": [first[0], second[0]],
        "included": [
            user("1842", "yandere", "yandere"),
            first[1], first[2], second[1], second[2],
            { "id": "c1", "type": "comments" }
        ]
    })
}

fn albums_listing() -> Value {
    json!({
        "data": [
            { "id": 296, "type": "albums", "attributes": { "title": "A.777", "tracks_count": 5 } },
            { "id": 12, "type": "albums", "attributes": { "title": "Early", "tracks_count": 2 } }
        ]
    })
}

#[test]
fn test_listing_path_sorts_and_caps() {
    assert_eq!(
        CollectionTarget::Artist("2270".to_string()).listing_path(CollectionKind::Albums),
        "users/2270/albums?sort=release_date&dir=desc&limit=9999"
    );
    assert_eq!(
        CollectionTarget::Library.listing_path(CollectionKind::Tracks),
        "library/tracks?sort=release_date&dir=desc&limit=9999"
    );
}

#[test]
fn test_collection_kind_titles_and_parsing() {
    assert_eq!(CollectionKind::default(), CollectionKind::Tracks);
    assert_eq!(CollectionKind::Playlists.title(), "Playlists");
    assert_eq!("albums".parse::<CollectionKind>().unwrap(), CollectionKind::Albums);
    assert!("videos".parse::<CollectionKind>().is_err());
}

#[tokio::test]
async fn test_artist_tracks_are_materialized_inline() {
    let fetcher = RecordingFetcher::new()
        .respond(
            "users/@harmful_logic",
            json!({ "data": user("2270", "Harmful Logic", "harmful_logic") }),
        )
        .respond(
            "users/2270/tracks?sort=release_date&dir=desc&limit=9999",
            tracks_listing(),
        );
    let session = session(fetcher);

    let record = users::extract_artist(&session, "harmful_logic", CollectionKind::Tracks)
        .await
        .unwrap();

    assert_eq!(record.id.as_deref(), Some("2270"));
    assert_eq!(record.uploader.as_deref(), Some("Harmful Logic"));
    assert_eq!(record.uploader_id.as_deref(), Some("2270"));
    assert_eq!(record.title, "Harmful Logic - Tracks");

    let titles: Vec<&str> = record
        .entries
        .iter()
        .map(|e| match e {
            Entry::Track(t) => t.title.as_str(),
            Entry::Reference(_) => panic!("tracks are materialized"),
        })
        .collect();
    assert_eq!(titles, vec!["newest", "older"]);

    let urls: Vec<String> = session.fetcher().calls().into_iter().map(|c| c.url).collect();
    assert_eq!(
        urls,
        vec![
            "https://api.matter.online/api/v1/users/@harmful_logic".to_string(),
            "https://api.matter.online/api/v1/users/2270/tracks?sort=release_date&dir=desc&limit=9999"
                .to_string(),
        ]
    );
}

#[tokio::test]
async fn test_artist_albums_become_lazy_references() {
    let fetcher = RecordingFetcher::new()
        .respond(
            "users/@acounta",
            json!({ "data": user("1818", "acounta", "acounta") }),
        )
        .respond(
            "users/1818/albums?sort=release_date&dir=desc&limit=9999",
            albums_listing(),
        );
    let session = session(fetcher);

    let record = users::extract_artist(&session, "acounta", CollectionKind::Albums)
        .await
        .unwrap();

    assert_eq!(record.title, "acounta - Albums");
    assert_eq!(record.entries.len(), 2);
    match &record.entries[0] {
        Entry::Reference(reference) => {
            assert_eq!(reference.id, "296");
            assert_eq!(reference.title, "A.777");
            assert_eq!(reference.delegate_to, ExtractorKey::Playlist);
            assert_eq!(reference.url, "https://app.matter.online/albums/296");
        }
        Entry::Track(_) => panic!("albums are not materialized"),
    }

    // nested albums are not fetched
    assert_eq!(session.fetcher().calls().len(), 2);
}

#[tokio::test]
async fn test_library_playlists() {
    let fetcher = RecordingFetcher::new().respond(
        "library/playlists?sort=release_date&dir=desc&limit=9999",
        json!({
            "data": [
                { "id": "77", "type": "playlists", "attributes": { "title": "night drive" } }
            ],
            "included": null
        }),
    );
    let session = session(fetcher);

    let record = users::extract_library(&session, CollectionKind::Playlists)
        .await
        .unwrap();

    assert_eq!(record.id, None);
    assert_eq!(record.uploader, None);
    assert_eq!(record.title, "Library - Playlists");
    assert!(matches!(
        &record.entries[..],
        [Entry::Reference(r)] if r.url == "https://app.matter.online/playlists/77"
    ));
}

#[tokio::test]
async fn test_empty_library() {
    let fetcher = RecordingFetcher::new().respond(
        "library/tracks?sort=release_date&dir=desc&limit=9999",
        json!({ "data": [] }),
    );
    let session = session(fetcher);

    let record = users::extract_library(&session, CollectionKind::Tracks)
        .await
        .unwrap();

    assert_eq!(record.title, "Library - Tracks");
    assert!(record.entries.is_empty());
}

#[tokio::test]
async fn test_failed_listing_request_propagates() {
    let fetcher = RecordingFetcher::new().respond(
        "users/@ghost",
        json!({ "data": user("9", "ghost", "ghost") }),
    );
    let session = session(fetcher);

    let err = users::extract_artist(&session, "ghost", CollectionKind::Tracks)
        .await
        .unwrap_err();

    assert!(matches!(err, matterdl::MatterError::Status { status: 404, .. }));
}
