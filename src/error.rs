//! Error type shared by every extraction step.
//!
//! Nothing here is retried. A failed login aborts the run, a failed request
//! aborts the extraction unit (track, playlist or listing) it belongs to, and a
//! dangling reference inside a response is reported as a data defect instead of
//! producing a partial record.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatterError {
    /// No credentials were configured for matter.online.
    #[error(
        "This extractor needs an account: set MATTER_EMAIL and MATTER_PASSWORD or pass --username and --password"
    )]
    LoginRequired,

    /// The login endpoint rejected the credentials or returned no token.
    #[error("Login failed: {0}")]
    AuthFailed(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request to {url} failed with status {status}: {message}")]
    Status {
        url: String,
        status: u16,
        message: String,
    },

    #[error("Unable to parse response from {url}: {source}")]
    MalformedResponse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// A resource is present but lacks attributes the materializer depends on.
    #[error("Resource {kind}/{id} has unexpected attributes: {source}")]
    MalformedResource {
        id: String,
        kind: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Resource {resource_id} has no '{relationship}' relationship")]
    MissingRelationship {
        resource_id: String,
        relationship: String,
    },

    /// A relationship points at an id that is not part of the response.
    #[error("Relationship '{relationship}' references {id}, which is not included in the response")]
    OrphanedReference { id: String, relationship: String },

    #[error("Playlist {playlist_id}: position {position} is outside of {tracks_count} tracks")]
    PositionOutOfRange {
        playlist_id: String,
        position: usize,
        tracks_count: usize,
    },

    #[error("Playlist {playlist_id}: position {position} is used by more than one track")]
    DuplicatePosition { playlist_id: String, position: usize },

    #[error("Playlist {playlist_id}: no track at position {position}")]
    TracklistGap { playlist_id: String, position: usize },

    #[error("Unsupported URL: {0}")]
    UnsupportedUrl(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl MatterError {
    /// Builds the error for a non-2xx response.
    pub fn from_status(url: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            url: url.into(),
            status,
            message: message.into(),
        }
    }

    /// Whether the error means the account could not be used.
    pub fn is_auth_error(&self) -> bool {
        match self {
            MatterError::LoginRequired | MatterError::AuthFailed(_) => true,
            MatterError::Status { status, .. } => matches!(status, 401 | 403),
            _ => false,
        }
    }
}
