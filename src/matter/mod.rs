//! # matter.online Integration Module
//!
//! This module implements the client side of the matter.online JSON API and the
//! extractors built on top of it. The API answers every request with a primary
//! resource (or list of resources) plus an `included` array of side-loaded
//! resources referenced by id. The extractors rebuild tracks from those
//! references and flatten them into records a media downloader understands.
//!
//! ## Architecture
//!
//! ```text
//! URL dispatch (urls)
//!          ↓
//! Extractors
//!     ├── Single track (tracks)
//!     ├── Album / playlist (playlists)
//!     └── Artist / library listings (users)
//!          ↓
//! Resource index (resolver)
//!          ↓
//! Session with bearer token (auth)
//!          ↓
//! JSON fetch capability (fetch, reqwest)
//! ```
//!
//! ## Core Modules
//!
//! - [`auth`] - Logs in once with email and password and keeps the bearer token
//!   for every later request of the run.
//! - [`resolver`] - Builds the id → resource table of one response.
//! - [`tracks`] - Resolves a track's artwork, author and file and produces its
//!   thumbnails and formats.
//! - [`playlists`] - Orders album and playlist tracks by tracklist position.
//! - [`users`] - Artist catalogs and the logged-in library; tracks inline,
//!   albums and playlists as lazy references.
//! - [`urls`] - Recognizes the supported page URLs.
//!
//! ## Request Model
//!
//! Requests are issued one after another; nothing is cached, retried or run in
//! parallel. A failed request fails the extraction it belongs to.
//!
//! ## API Coverage
//!
//! - `POST authentication/login`
//! - `GET tracks/{id}`
//! - `GET albums/{id}`, `GET playlists/{id}`
//! - `GET users/@{login}`
//! - `GET users/{id}/{tracks|albums|playlists}`
//! - `GET library/{tracks|albums|playlists}`

pub mod auth;
pub mod fetch;
pub mod playlists;
pub mod resolver;
pub mod tracks;
pub mod urls;
pub mod users;

pub use auth::Session;
pub use fetch::{FetchRequest, HttpFetcher, JsonFetcher, Method};
pub use resolver::IncludedIndex;
pub use urls::MatterUrl;

use crate::{Res, types::Extraction};

/// Extracts whatever `url` points at.
///
/// # Errors
///
/// [`crate::MatterError::UnsupportedUrl`] for pages this extractor does not
/// handle, otherwise whatever the selected extractor reports.
pub async fn extract<F: JsonFetcher>(session: &Session<F>, url: &str) -> Res<Extraction> {
    extract_parsed(session, &MatterUrl::parse(url)?).await
}

/// Runs the extractor selected by an already parsed URL.
pub async fn extract_parsed<F: JsonFetcher>(
    session: &Session<F>,
    url: &MatterUrl,
) -> Res<Extraction> {
    match url {
        MatterUrl::Track { id } => tracks::extract_track(session, id)
            .await
            .map(Extraction::Track),
        MatterUrl::Playlist { kind, id } => playlists::extract_playlist(session, *kind, id)
            .await
            .map(Extraction::Playlist),
        MatterUrl::Artist { username, kind } => users::extract_artist(session, username, *kind)
            .await
            .map(Extraction::Playlist),
        MatterUrl::Library { kind } => users::extract_library(session, *kind)
            .await
            .map(Extraction::Playlist),
    }
}
