//! File attachments and multipart payload assembly.
//!
//! DESIGN
//! ======
//! Forms build a `MultipartPayload` (an ordered list of text and file parts)
//! rather than a `reqwest::multipart::Form` directly, so the exact fields a
//! submit would send can be inspected in tests before any request exists.

#[cfg(test)]
#[path = "multipart_test.rs"]
mod multipart_test;

use std::path::Path;

/// Upper bound the upload forms enforce on image size.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// An in-memory file selected for upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    #[must_use]
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { file_name: file_name.into(), mime_type: mime_type.into(), bytes }
    }

    /// Read a file from disk, inferring its MIME type from the extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map_or_else(|| "upload".to_owned(), |name| name.to_string_lossy().into_owned());
        let mime_type = mime_for_extension(path.extension().and_then(|e| e.to_str())).to_owned();
        Ok(Self { file_name, mime_type, bytes })
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    /// Size in megabytes with two decimals, as shown next to a selected file.
    #[must_use]
    pub fn size_label(&self) -> String {
        #[allow(clippy::cast_precision_loss)]
        let mb = self.size() as f64 / 1024.0 / 1024.0;
        format!("{mb:.2} MB")
    }
}

fn mime_for_extension(ext: Option<&str>) -> &'static str {
    match ext.map(str::to_ascii_lowercase).as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("svg") => "image/svg+xml",
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Check an upload is an image under [`MAX_IMAGE_BYTES`].
///
/// # Errors
///
/// Returns `too_large` or `not_image` as the user-facing message.
pub fn validate_image(file: &Attachment, too_large: &str, not_image: &str) -> Result<(), String> {
    if file.size() > MAX_IMAGE_BYTES {
        return Err(too_large.to_owned());
    }
    if !file.is_image() {
        return Err(not_image.to_owned());
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormPart {
    Text { name: String, value: String },
    File { name: String, file: Attachment },
}

/// Ordered multipart body; repeated names are sent as repeated parts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MultipartPayload {
    parts: Vec<FormPart>,
}

impl MultipartPayload {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.parts.push(FormPart::Text { name: name.to_owned(), value: value.into() });
        self
    }

    #[must_use]
    pub fn file(mut self, name: &str, file: Attachment) -> Self {
        self.parts.push(FormPart::File { name: name.to_owned(), file });
        self
    }

    #[must_use]
    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    /// First text value sent under `name`.
    #[must_use]
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|part| match part {
            FormPart::Text { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    /// All files sent under `name`, in order.
    #[must_use]
    pub fn files(&self, name: &str) -> Vec<&Attachment> {
        self.parts
            .iter()
            .filter_map(|part| match part {
                FormPart::File { name: n, file } if n == name => Some(file),
                _ => None,
            })
            .collect()
    }

    /// Convert into a `reqwest` form for sending.
    ///
    /// # Errors
    ///
    /// Returns the offending MIME string if a file part's type is invalid.
    pub fn into_form(self) -> Result<reqwest::multipart::Form, String> {
        let mut form = reqwest::multipart::Form::new();
        for part in self.parts {
            form = match part {
                FormPart::Text { name, value } => form.text(name, value),
                FormPart::File { name, file } => {
                    let body = reqwest::multipart::Part::bytes(file.bytes)
                        .file_name(file.file_name)
                        .mime_str(&file.mime_type)
                        .map_err(|_| file.mime_type.clone())?;
                    form.part(name, body)
                }
            };
        }
        Ok(form)
    }
}
