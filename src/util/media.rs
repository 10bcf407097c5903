//! Media URL resolution for stored relative paths.

#[cfg(test)]
#[path = "media_test.rs"]
mod media_test;

/// Placeholder shown when an entity has no image.
pub const PLACEHOLDER_IMAGE: &str = "/sample.png";

/// Resolve a stored media path against the media host.
///
/// Empty or missing paths resolve to [`PLACEHOLDER_IMAGE`].
#[must_use]
pub fn media_url(media_base_url: &str, path: Option<&str>) -> String {
    match path.map(str::trim) {
        Some(path) if !path.is_empty() => format!("{}/{path}", media_base_url.trim_end_matches('/')),
        _ => PLACEHOLDER_IMAGE.to_owned(),
    }
}
