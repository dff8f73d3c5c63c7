use std::{fmt, str::FromStr};

use crate::{
    MatterError, Res, info,
    matter::{auth::Session, fetch::JsonFetcher, resolver::IncludedIndex, tracks},
    types::{
        Document, Entry, ExtractorKey, ListingAttributes, PlaylistRecord, PlaylistReference,
        RawResource, UserAttributes,
    },
    utils,
};

/// Listings are requested in one page of at most this many items.
pub const LISTING_LIMIT: u32 = 9999;

/// What a user-scoped listing contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollectionKind {
    #[default]
    Tracks,
    Albums,
    Playlists,
}

impl CollectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKind::Tracks => "tracks",
            CollectionKind::Albums => "albums",
            CollectionKind::Playlists => "playlists",
        }
    }

    /// `Tracks`, `Albums` or `Playlists`, as used in collection titles.
    pub fn title(&self) -> String {
        utils::capitalize(self.as_str())
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollectionKind {
    type Err = MatterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tracks" => Ok(CollectionKind::Tracks),
            "albums" => Ok(CollectionKind::Albums),
            "playlists" => Ok(CollectionKind::Playlists),
            other => Err(MatterError::UnsupportedUrl(format!(
                "unknown collection '{}'",
                other
            ))),
        }
    }
}

/// Whose listing to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionTarget {
    /// An artist, by numeric id.
    Artist(String),
    /// The logged-in account's library.
    Library,
}

impl CollectionTarget {
    /// API path of the listing, sorted by release date, newest first.
    pub fn listing_path(&self, kind: CollectionKind) -> String {
        let base = match self {
            CollectionTarget::Artist(id) => format!("users/{}/{}", id, kind),
            CollectionTarget::Library => format!("library/{}", kind),
        };
        format!("{}?sort=release_date&dir=desc&limit={}", base, LISTING_LIMIT)
    }
}

/// Fetches a user-scoped listing and turns each item into an entry.
///
/// Tracks are materialized inline. Albums and playlists become
/// [`PlaylistReference`]s that the playlist extractor resolves only when asked.
/// Listings longer than [`LISTING_LIMIT`] are cut by the API.
pub async fn collect_entries<F: JsonFetcher>(
    session: &Session<F>,
    target: &CollectionTarget,
    kind: CollectionKind,
) -> Res<Vec<Entry>> {
    let label = match target {
        CollectionTarget::Artist(id) => id.as_str(),
        CollectionTarget::Library => "library",
    };
    info!("{}: Downloading {} listing", label, kind);

    let document: Document<Vec<RawResource>> = session.get(&target.listing_path(kind)).await?;
    listing_entries(&document, kind, &session.endpoints().app_base)
}

/// Converts a listing response into entries, keeping the API order.
pub fn listing_entries(
    document: &Document<Vec<RawResource>>,
    kind: CollectionKind,
    app_base: &str,
) -> Res<Vec<Entry>> {
    let index = IncludedIndex::filtered(document.included.as_deref());

    document
        .data
        .iter()
        .map(|item| match kind {
            CollectionKind::Tracks => tracks::materialize(item, &index, app_base).map(Entry::Track),
            CollectionKind::Albums | CollectionKind::Playlists => {
                playlist_reference(item, app_base).map(Entry::Reference)
            }
        })
        .collect()
}

fn playlist_reference(item: &RawResource, app_base: &str) -> Res<PlaylistReference> {
    let attributes: ListingAttributes = item.attributes()?;
    Ok(PlaylistReference {
        id: item.id.clone(),
        title: attributes.title,
        delegate_to: ExtractorKey::Playlist,
        url: format!("{}{}/{}", app_base, item.kind, item.id),
    })
}

/// Resolves `@username` to the artist and extracts one of their listings.
///
/// The record is titled `<display name> - <Kind>`.
pub async fn extract_artist<F: JsonFetcher>(
    session: &Session<F>,
    username: &str,
    kind: CollectionKind,
) -> Res<PlaylistRecord> {
    info!("{}: Downloading info JSON", username);
    let document: Document<RawResource> = session.get(&format!("users/@{}", username)).await?;

    let artist_id = document.data.id.clone();
    let artist: UserAttributes = document.data.attributes()?;

    let entries =
        collect_entries(session, &CollectionTarget::Artist(artist_id.clone()), kind).await?;

    Ok(PlaylistRecord {
        id: Some(artist_id.clone()),
        title: format!("{} - {}", artist.display_name, kind.title()),
        uploader: Some(artist.display_name),
        uploader_id: Some(artist_id),
        entries,
    })
}

/// Extracts one listing of the logged-in account's library.
pub async fn extract_library<F: JsonFetcher>(
    session: &Session<F>,
    kind: CollectionKind,
) -> Res<PlaylistRecord> {
    let entries = collect_entries(session, &CollectionTarget::Library, kind).await?;

    Ok(PlaylistRecord {
        id: None,
        uploader: None,
        uploader_id: None,
        title: format!("Library - {}", kind.title()),
        entries,
    })
}
