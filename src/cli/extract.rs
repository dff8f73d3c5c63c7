use tabled::Table;

use crate::{
    config::Credentials,
    error,
    matter::{self, MatterUrl},
    types::{Entry, EntryTableRow, Extraction, TrackRecord},
    utils, warning,
};

use super::open_session;

pub async fn extract(url: String, table: bool, credentials: Option<Credentials>) {
    // reject unknown pages before logging in
    let target = match MatterUrl::parse(&url) {
        Ok(target) => target,
        Err(e) => error!("{}", e),
    };

    let session = match open_session(credentials).await {
        Ok(session) => session,
        Err(e) => error!("{}", e),
    };

    let extraction = match matter::extract_parsed(&session, &target).await {
        Ok(extraction) => extraction,
        Err(e) => error!("[{}] {}: {}", target.extractor().as_str(), url, e),
    };

    if table {
        println!("{}", Table::new(table_rows(&extraction)));
        return;
    }

    match serde_json::to_string_pretty(&extraction) {
        Ok(json) => println!("{}", json),
        Err(e) => error!("Cannot serialize extraction. Err: {}", e),
    }
}

fn table_rows(extraction: &Extraction) -> Vec<EntryTableRow> {
    match extraction {
        Extraction::Track(track) => vec![track_row(1, track)],
        Extraction::Playlist(playlist) => {
            if playlist.entries.is_empty() {
                warning!("{} has no entries", playlist.title);
            }
            playlist
                .entries
                .iter()
                .enumerate()
                .map(|(i, entry)| match entry {
                    Entry::Track(track) => track_row(i + 1, track),
                    Entry::Reference(reference) => EntryTableRow {
                        index: i + 1,
                        kind: "playlist".to_string(),
                        title: reference.title.clone(),
                        uploader: String::new(),
                        duration: String::new(),
                        formats: reference.url.clone(),
                    },
                })
                .collect()
        }
    }
}

fn track_row(index: usize, track: &TrackRecord) -> EntryTableRow {
    EntryTableRow {
        index,
        kind: "track".to_string(),
        title: track.title.clone(),
        uploader: track.uploader.clone(),
        duration: track
            .duration
            .map(utils::format_duration)
            .unwrap_or_default(),
        formats: track
            .formats
            .iter()
            .map(|f| f.format_id.as_str())
            .collect::<Vec<_>>()
            .join(","),
    }
}
