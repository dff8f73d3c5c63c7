use crate::{
    Res, info,
    matter::{auth::Session, fetch::JsonFetcher, resolver::IncludedIndex},
    types::{
        ArtworkAttributes, Document, FileAttributes, Format, RawResource, Thumbnail,
        TrackAttributes, TrackRecord, UserAttributes,
    },
    utils,
};

/// Variant that is never offered as a format.
const PREVIEW_VARIANT: &str = "preview";

/// Selection preference of the original artwork and audio file.
const ORIGINAL_PREFERENCE: i32 = 10;

/// Bitrate (kbps) of the named transcoded variants.
pub fn format_bitrate(variant: &str) -> Option<u32> {
    match variant {
        "high" => Some(320),
        _ => None,
    }
}

/// Fetches `tracks/<id>` and materializes it.
///
/// The single-track response is indexed without type filtering.
pub async fn extract_track<F: JsonFetcher>(session: &Session<F>, track_id: &str) -> Res<TrackRecord> {
    info!("{}: Downloading info JSON", track_id);
    let document: Document<RawResource> = session.get(&format!("tracks/{}", track_id)).await?;

    let index = IncludedIndex::build(document.included.as_deref(), None);
    materialize(&document.data, &index, &session.endpoints().app_base)
}

/// Builds a complete [`TrackRecord`] from a track resource.
///
/// The `artwork`, `author` and `file` relationships must all resolve through
/// `index`; any missing link or attribute fails the whole track.
pub fn materialize(track: &RawResource, index: &IncludedIndex, app_base: &str) -> Res<TrackRecord> {
    let artwork_ref = track.to_one("artwork")?;
    let author_ref = track.to_one("author")?;
    let file_ref = track.to_one("file")?;

    let artwork: ArtworkAttributes = index.resolve(artwork_ref, "artwork")?.attributes()?;
    let author: UserAttributes = index.resolve(author_ref, "author")?.attributes()?;
    let file: FileAttributes = index.resolve(file_ref, "file")?.attributes()?;
    let attributes: TrackAttributes = track.attributes()?;

    let duration = file.metadata.duration;

    Ok(TrackRecord {
        id: track.id.clone(),
        title: attributes.title,
        description: attributes.description,
        uploader: author.display_name,
        uploader_id: author_ref.id.clone(),
        uploader_url: format!("{}artists/@{}", app_base, author.login),
        timestamp: attributes
            .created_at
            .as_deref()
            .and_then(utils::unified_timestamp),
        release_date: attributes
            .release_date
            .as_deref()
            .and_then(utils::unified_strdate),
        duration,
        view_count: attributes.streams_count,
        like_count: attributes.likes_count,
        comment_count: attributes.comments_count,
        thumbnails: thumbnails(artwork),
        formats: formats(file),
    })
}

/// Platform variants in API order, then the original artwork.
fn thumbnails(artwork: ArtworkAttributes) -> Vec<Thumbnail> {
    let mut thumbnails: Vec<Thumbnail> = artwork
        .variants
        .into_iter()
        .map(|(id, url)| Thumbnail {
            id,
            url,
            preference: None,
        })
        .collect();

    thumbnails.push(Thumbnail {
        id: "original".to_string(),
        url: artwork.file_uri,
        preference: Some(ORIGINAL_PREFERENCE),
    });

    thumbnails
}

/// Transcoded mp3 variants (minus the preview), then the original upload.
fn formats(file: FileAttributes) -> Vec<Format> {
    let mut formats: Vec<Format> = file
        .variants
        .into_iter()
        .filter(|(variant, _)| variant != PREVIEW_VARIANT)
        .map(|(variant, url)| Format {
            abr: format_bitrate(&variant),
            format_id: variant,
            ext: "mp3".to_string(),
            url,
            vcodec: "none".to_string(),
            filesize: None,
        })
        .collect();

    formats.push(Format {
        format_id: "original".to_string(),
        ext: file.metadata.format_name,
        url: file.file_uri,
        vcodec: "none".to_string(),
        abr: None,
        filesize: file.metadata.size,
    });

    formats
}
