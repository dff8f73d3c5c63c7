use std::fmt;

use crate::{
    MatterError, Res, info,
    matter::{auth::Session, fetch::JsonFetcher, resolver::IncludedIndex, tracks},
    types::{
        Document, Entry, PlaylistAttributes, PlaylistRecord, RawResource, TrackRecord,
        TracklistEntryAttributes, UserAttributes,
    },
};

/// The two kinds of explicit, ordered track lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistKind {
    Albums,
    Playlists,
}

impl PlaylistKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaylistKind::Albums => "albums",
            PlaylistKind::Playlists => "playlists",
        }
    }
}

impl fmt::Display for PlaylistKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fetches `<albums|playlists>/<id>` and assembles its tracks in playback order.
pub async fn extract_playlist<F: JsonFetcher>(
    session: &Session<F>,
    kind: PlaylistKind,
    playlist_id: &str,
) -> Res<PlaylistRecord> {
    info!("{}: Downloading info JSON", playlist_id);
    let document: Document<RawResource> = session
        .get(&format!("{}/{}", kind, playlist_id))
        .await?;

    let index = IncludedIndex::filtered(document.included.as_deref());
    let playlist = &document.data;
    let attributes: PlaylistAttributes = playlist.attributes()?;

    let author_ref = playlist.to_one("author")?;
    let author: UserAttributes = index.resolve(author_ref, "author")?.attributes()?;

    let tracks = assemble(playlist, &index, &session.endpoints().app_base)?;

    Ok(PlaylistRecord {
        id: Some(playlist_id.to_string()),
        uploader: Some(author.display_name),
        uploader_id: Some(author_ref.id.clone()),
        title: attributes.title,
        entries: tracks.into_iter().map(Entry::Track).collect(),
    })
}

/// Places every track of `playlist` at the position given by its tracklist
/// entry.
///
/// The `tracklists_tracks` relationship is not in playback order, so each
/// entry's `position` (zero-based) decides the slot. The result has exactly
/// `tracks_count` tracks; a position outside that range, a position used twice
/// or a slot left empty is an error.
pub fn assemble(
    playlist: &RawResource,
    index: &IncludedIndex,
    app_base: &str,
) -> Res<Vec<TrackRecord>> {
    let attributes: PlaylistAttributes = playlist.attributes()?;
    let tracks_count = attributes.tracks_count;

    let mut slots: Vec<Option<TrackRecord>> = vec![None; tracks_count];

    for entry_ref in playlist.to_many("tracklists_tracks")? {
        let entry = index.resolve(entry_ref, "tracklists_tracks")?;
        let position = entry.attributes::<TracklistEntryAttributes>()?.position;

        let slot = slots
            .get_mut(position)
            .ok_or_else(|| MatterError::PositionOutOfRange {
                playlist_id: playlist.id.clone(),
                position,
                tracks_count,
            })?;
        if slot.is_some() {
            return Err(MatterError::DuplicatePosition {
                playlist_id: playlist.id.clone(),
                position,
            });
        }

        let track = index.related(entry, "track")?;
        *slot = Some(tracks::materialize(track, index, app_base)?);
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(position, slot)| {
            slot.ok_or_else(|| MatterError::TracklistGap {
                playlist_id: playlist.id.clone(),
                position,
            })
        })
        .collect()
}
