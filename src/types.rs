use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use tabled::Tabled;

use crate::{MatterError, Res};

/// Accepts ids sent either as JSON strings or as numbers.
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(Error::custom("id must be a string or a number")),
    }
}

// ---------------------------------------------------------------------------
// Raw API documents
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResourceRef {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Linkage {
    One(ResourceRef),
    Many(Vec<ResourceRef>),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Relationship {
    #[serde(default)]
    pub data: Option<Linkage>,
}

/// One entity of a response: track, file, artwork, user or tracklist entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawResource {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub attributes: Map<String, Value>,
    #[serde(default)]
    pub relationships: HashMap<String, Relationship>,
}

impl RawResource {
    /// Deserializes the attribute map into the shape expected for this kind.
    pub fn attributes<T: DeserializeOwned>(&self) -> Res<T> {
        serde_json::from_value(Value::Object(self.attributes.clone())).map_err(|source| {
            MatterError::MalformedResource {
                id: self.id.clone(),
                kind: self.kind.clone(),
                source,
            }
        })
    }

    /// Returns the single resource linked under `name`.
    pub fn to_one(&self, name: &str) -> Res<&ResourceRef> {
        match self.relationships.get(name).and_then(|r| r.data.as_ref()) {
            Some(Linkage::One(reference)) => Ok(reference),
            _ => Err(self.missing_relationship(name)),
        }
    }

    /// Returns the resources linked under `name`, in the order the API sent them.
    pub fn to_many(&self, name: &str) -> Res<&[ResourceRef]> {
        match self.relationships.get(name).and_then(|r| r.data.as_ref()) {
            Some(Linkage::Many(references)) => Ok(references.as_slice()),
            _ => Err(self.missing_relationship(name)),
        }
    }

    fn missing_relationship(&self, name: &str) -> MatterError {
        MatterError::MissingRelationship {
            resource_id: self.id.clone(),
            relationship: name.to_string(),
        }
    }
}

/// Top-level response envelope: a primary resource (or list) plus side-loaded
/// resources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document<D> {
    pub data: D,
    #[serde(default)]
    pub included: Option<Vec<RawResource>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "jwtToken", default)]
    pub jwt_token: Option<String>,
}

// ---------------------------------------------------------------------------
// Attribute shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct TrackAttributes {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub streams_count: Option<u64>,
    #[serde(default)]
    pub likes_count: Option<u64>,
    #[serde(default)]
    pub comments_count: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtworkAttributes {
    pub file_uri: String,
    #[serde(default)]
    pub variants: IndexMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileAttributes {
    pub file_uri: String,
    #[serde(default)]
    pub variants: IndexMap<String, String>,
    pub metadata: FileMetadata,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileMetadata {
    pub format_name: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub duration: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserAttributes {
    pub display_name: String,
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TracklistEntryAttributes {
    pub position: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistAttributes {
    pub title: String,
    pub tracks_count: usize,
}

/// Only the title is needed to describe an album or playlist in a listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingAttributes {
    pub title: String,
}

// ---------------------------------------------------------------------------
// Extracted records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Thumbnail {
    pub id: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preference: Option<i32>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Format {
    pub format_id: String,
    pub ext: String,
    pub url: String,
    pub vcodec: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abr: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filesize: Option<u64>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrackRecord {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub uploader: String,
    pub uploader_id: String,
    pub uploader_url: String,
    pub timestamp: Option<i64>,
    pub release_date: Option<String>,
    pub duration: Option<f64>,
    pub view_count: Option<u64>,
    pub like_count: Option<u64>,
    pub comment_count: Option<u64>,
    pub thumbnails: Vec<Thumbnail>,
    pub formats: Vec<Format>,
}

/// Which extractor knows how to resolve a URL.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum ExtractorKey {
    #[serde(rename = "matter.online")]
    Track,
    #[serde(rename = "matter.online:playlist")]
    Playlist,
    #[serde(rename = "matter.online:artist")]
    Artist,
    #[serde(rename = "matter.online:library")]
    Library,
}

impl ExtractorKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractorKey::Track => "matter.online",
            ExtractorKey::Playlist => "matter.online:playlist",
            ExtractorKey::Artist => "matter.online:artist",
            ExtractorKey::Library => "matter.online:library",
        }
    }
}

/// An album or playlist listed inside a collection, resolved only on demand.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlaylistReference {
    pub id: String,
    pub title: String,
    #[serde(rename = "ie_key")]
    pub delegate_to: ExtractorKey,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "_type")]
pub enum Entry {
    #[serde(rename = "video")]
    Track(TrackRecord),
    #[serde(rename = "url")]
    Reference(PlaylistReference),
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlaylistRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploader: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploader_id: Option<String>,
    pub title: String,
    pub entries: Vec<Entry>,
}

/// Result of extracting one URL.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "_type")]
pub enum Extraction {
    #[serde(rename = "video")]
    Track(TrackRecord),
    #[serde(rename = "playlist")]
    Playlist(PlaylistRecord),
}

#[derive(Tabled)]
pub struct EntryTableRow {
    #[tabled(rename = "#")]
    pub index: usize,
    pub kind: String,
    pub title: String,
    pub uploader: String,
    pub duration: String,
    pub formats: String,
}
