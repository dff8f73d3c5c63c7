//! # Page URL Dispatch
//!
//! Recognizes the app.matter.online pages the extractors handle:
//!
//! - `tracks/{id}` - a single track
//! - `albums/{id}`, `playlists/{id}` - an explicit playlist
//! - `artists/@{login}[/tracks|albums|playlists]` - an artist's catalog
//! - `library[/tracks|albums|playlists]` - the logged-in user's library
//!
//! Anything else is rejected with [`MatterError::UnsupportedUrl`].

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    MatterError, Res,
    matter::{playlists::PlaylistKind, users::CollectionKind},
    types::ExtractorKey,
};

static TRACK_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://app\.matter\.online/tracks/(?P<track_id>\w+)").expect("valid regex")
});

static PLAYLIST_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://app\.matter\.online/(?P<kind>albums|playlists)/(?P<playlist_id>\w+)")
        .expect("valid regex")
});

static ARTIST_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^https?://app\.matter\.online/artists/@(?P<username>\w+)(?:/(?P<resource>albums|playlists|tracks))?",
    )
    .expect("valid regex")
});

static LIBRARY_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://app\.matter\.online/library(?:/(?P<resource>albums|playlists|tracks)?)?")
        .expect("valid regex")
});

/// A recognized matter.online page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatterUrl {
    Track { id: String },
    Playlist { kind: PlaylistKind, id: String },
    Artist { username: String, kind: CollectionKind },
    Library { kind: CollectionKind },
}

impl MatterUrl {
    /// Matches `url` against the supported page shapes.
    ///
    /// Artist and library pages without a sub-resource default to tracks.
    ///
    /// # Errors
    ///
    /// [`MatterError::UnsupportedUrl`] when no shape matches.
    ///
    /// # Example
    ///
    /// ```
    /// let url = MatterUrl::parse("https://app.matter.online/artists/@yandere/albums")?;
    /// assert_eq!(url.extractor(), ExtractorKey::Artist);
    /// ```
    pub fn parse(url: &str) -> Res<Self> {
        let url = url.trim();

        if let Some(caps) = TRACK_URL.captures(url) {
            return Ok(MatterUrl::Track {
                id: caps["track_id"].to_string(),
            });
        }

        if let Some(caps) = PLAYLIST_URL.captures(url) {
            let kind = match &caps["kind"] {
                "albums" => PlaylistKind::Albums,
                _ => PlaylistKind::Playlists,
            };
            return Ok(MatterUrl::Playlist {
                kind,
                id: caps["playlist_id"].to_string(),
            });
        }

        if let Some(caps) = ARTIST_URL.captures(url) {
            return Ok(MatterUrl::Artist {
                username: caps["username"].to_string(),
                kind: collection_kind(caps.name("resource").map(|m| m.as_str()))?,
            });
        }

        if let Some(caps) = LIBRARY_URL.captures(url) {
            return Ok(MatterUrl::Library {
                kind: collection_kind(caps.name("resource").map(|m| m.as_str()))?,
            });
        }

        Err(MatterError::UnsupportedUrl(url.to_string()))
    }

    /// Key of the extractor that handles this page.
    pub fn extractor(&self) -> ExtractorKey {
        match self {
            MatterUrl::Track { .. } => ExtractorKey::Track,
            MatterUrl::Playlist { .. } => ExtractorKey::Playlist,
            MatterUrl::Artist { .. } => ExtractorKey::Artist,
            MatterUrl::Library { .. } => ExtractorKey::Library,
        }
    }
}

fn collection_kind(resource: Option<&str>) -> Res<CollectionKind> {
    match resource {
        Some(resource) if !resource.is_empty() => resource.parse(),
        _ => Ok(CollectionKind::default()),
    }
}
