//! # Side-loaded Resource Index
//!
//! matter.online responses reference related resources (authors, files,
//! artwork, tracklist entries) by `{id, type}` and ship the resources
//! themselves in a top-level `included` array. [`IncludedIndex`] turns that
//! array into an id lookup table so the extractors can follow relationships.
//!
//! The single-track extractor indexes everything it receives. Playlist and
//! collection extractors use [`IncludedIndex::filtered`], which keeps only
//! [`INCLUDE_TYPES`].

use std::collections::HashMap;

use crate::{
    MatterError, Res,
    types::{RawResource, ResourceRef},
};

/// Side-loaded resource types kept when building a filtered index.
pub const INCLUDE_TYPES: &[&str] = &["files", "users", "tags", "tracklists_tracks", "tracks"];

/// Lookup table from resource id to the side-loaded resource of one response.
///
/// Scoped to a single response; duplicate ids keep the last occurrence.
#[derive(Debug, Clone, Default)]
pub struct IncludedIndex {
    resources: HashMap<String, RawResource>,
}

impl IncludedIndex {
    /// Indexes `included`, keeping only resources whose type is listed in
    /// `filter_types` when given.
    pub fn build(included: Option<&[RawResource]>, filter_types: Option<&[&str]>) -> Self {
        let resources = included
            .unwrap_or_default()
            .iter()
            .filter(|r| filter_types.is_none_or(|types| types.contains(&r.kind.as_str())))
            .map(|r| (r.id.clone(), r.clone()))
            .collect();

        Self { resources }
    }

    /// Index used by the playlist and collection extractors.
    pub fn filtered(included: Option<&[RawResource]>) -> Self {
        Self::build(included, Some(INCLUDE_TYPES))
    }

    /// Returns the resource with `id`, if the response included it.
    pub fn get(&self, id: &str) -> Option<&RawResource> {
        self.resources.get(id)
    }

    /// Looks up the resource behind `reference`.
    ///
    /// # Arguments
    ///
    /// * `reference` - The `{id, type}` linkage taken from a relationship
    /// * `relationship` - Name of that relationship, used in the error message
    ///
    /// # Errors
    ///
    /// [`MatterError::OrphanedReference`] when no included resource has the id.
    ///
    /// # Example
    ///
    /// ```
    /// let index = IncludedIndex::build(document.included.as_deref(), None);
    /// let author = index.resolve(track.to_one("author")?, "author")?;
    /// ```
    pub fn resolve(&self, reference: &ResourceRef, relationship: &str) -> Res<&RawResource> {
        self.get(&reference.id)
            .ok_or_else(|| MatterError::OrphanedReference {
                id: reference.id.clone(),
                relationship: relationship.to_string(),
            })
    }

    /// Follows the to-one relationship `name` of `resource`.
    pub fn related(&self, resource: &RawResource, name: &str) -> Res<&RawResource> {
        self.resolve(resource.to_one(name)?, name)
    }

    /// Number of indexed resources after filtering.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Whether a resource with `id` survived filtering.
    pub fn contains(&self, id: &str) -> bool {
        self.resources.contains_key(id)
    }
}
