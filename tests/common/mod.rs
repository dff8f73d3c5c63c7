#![allow(dead_code)]

use std::{collections::HashMap, sync::Mutex};

use matterdl::{
    MatterError, Res,
    config::Endpoints,
    matter::{FetchRequest, JsonFetcher, Session},
    types::RawResource,
};
use serde_json::{Value, json};

pub const API: &str = "https://api.matter.online/api/v1/";
pub const APP: &str = "https://app.matter.online/";

/// Answers requests from a fixed url -> body table and records every request.
#[derive(Default, Debug)]
pub struct RecordingFetcher {
    responses: HashMap<String, Value>,
    calls: Mutex<Vec<FetchRequest>>,
}

impl RecordingFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, path: &str, body: Value) -> Self {
        self.responses.insert(format!("{}{}", API, path), body);
        self
    }

    pub fn calls(&self) -> Vec<FetchRequest> {
        self.calls.lock().unwrap().clone()
    }
}

impl JsonFetcher for RecordingFetcher {
    async fn fetch_json(&self, request: &FetchRequest) -> Res<Value> {
        self.calls.lock().unwrap().push(request.clone());
        self.responses
            .get(&request.url)
            .cloned()
            .ok_or_else(|| MatterError::from_status(&request.url, 404, "not found"))
    }
}

pub fn session(fetcher: RecordingFetcher) -> Session<RecordingFetcher> {
    Session::with_token(fetcher, "test-token", Endpoints::default())
}

pub fn raw(value: Value) -> RawResource {
    serde_json::from_value(value).unwrap()
}

pub fn raws(values: &[Value]) -> Vec<RawResource> {
    values.iter().cloned().map(raw).collect()
}

pub fn track(id: &str, title: &str, author_id: &str, file_id: &str, artwork_id: &str) -> Value {
    json!({
        "id": id,
        "type": "tracks",
        "attributes": {
            "title": title,
            "description": "ft miku",
            "created_at": "2019-12-03T02:07:49.000Z",
            "release_date": "2019-12-02",
            "streams_count": 1000,
            "likes_count": 12,
            "comments_count": 3
        },
        "relationships": {
            "author": { "data": { "id": author_id, "type": "users" } },
            "file": { "data": { "id": file_id, "type": "files" } },
            "artwork": { "data": { "id": artwork_id, "type": "files" } }
        }
    })
}

pub fn user(id: &str, display_name: &str, login: &str) -> Value {
    json!({
        "id": id,
        "type": "users",
        "attributes": { "display_name": display_name, "login": login }
    })
}

pub fn audio_file(id: &str) -> Value {
    json!({
        "id": id,
        "type": "files",
        "attributes": {
            "file_uri": format!("https://cdn.example/{}/original.wav", id),
            "variants": {
                "high": format!("https://cdn.example/{}/high.mp3", id),
                "preview": format!("https://cdn.example/{}/preview.mp3", id)
            },
            "metadata": { "format_name": "wav", "size": 123, "duration": 10.5 }
        }
    })
}

pub fn artwork(id: &str) -> Value {
    json!({
        "id": id,
        "type": "files",
        "attributes": {
            "file_uri": format!("https://cdn.example/{}/art.png", id),
            "variants": {
                "small": format!("https://cdn.example/{}/small.jpg", id),
                "large": format!("https://cdn.example/{}/large.jpg", id)
            }
        }
    })
}

pub fn tracklist_entry(id: &str, position: usize, track_id: &str) -> Value {
    json!({
        "id": id,
        "type": "tracklists_tracks",
        "attributes": { "position": position },
        "relationships": {
            "track": { "data": { "id": track_id, "type": "tracks" } }
        }
    })
}

/// A complete track with its author, file and artwork, ids derived from `n`.
pub fn track_bundle(n: u32, title: &str) -> Vec<Value> {
    let id = format!("{}", 100 + n);
    let file = format!("f{}", n);
    let art = format!("a{}", n);
    vec![
        track(&id, title, "1842", &file, &art),
        audio_file(&file),
        artwork(&art),
    ]
}

pub fn playlist(id: &str, kind: &str, title: &str, tracks_count: usize, entry_ids: &[&str]) -> Value {
    let entries: Vec<Value> = entry_ids
        .iter()
        .map(|e| json!({ "id": e, "type": "tracklists_tracks" }))
        .collect();
    json!({
        "id": id,
        "type": kind,
        "attributes": { "title": title, "tracks_count": tracks_count },
        "relationships": {
            "author": { "data": { "id": "1818", "type": "users" } },
            "tracklists_tracks": { "data": entries }
        }
    })
}
