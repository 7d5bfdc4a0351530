//! Client-side staging area for product images.
//!
//! Files picked in the form (or restored from the server's stored buffers)
//! are held here until they are uploaded in one batch or discarded. The
//! set is owned by the form view-model; nothing global. Entries are
//! addressed by index, and indices stay contiguous across removals.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use contracts::domain::products::{ImageUpload, ProductImage};
use thiserror::Error;

/// One staged image: decoded bytes plus the metadata needed for previews
/// and upload records.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingImage {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl PendingImage {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Self-describing data URL, used both for previews and as the upload
    /// payload.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, BASE64.encode(&self.bytes))
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ImageRejection {
    #[error("File \"{0}\" is not an image and will be skipped.")]
    NotAnImage(String),
    #[error("File \"{0}\" is already selected.")]
    Duplicate(String),
}

/// Ordered set of pending images, unique by (name, size).
#[derive(Debug, Clone, Default)]
pub struct PendingImageSet {
    entries: Vec<PendingImage>,
}

impl PendingImageSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingImage> {
        self.entries.iter()
    }

    /// Append a file. Non-images and (name, size) duplicates are rejected;
    /// the caller surfaces the rejection to the user. Returns the new
    /// entry's index.
    pub fn add(&mut self, image: PendingImage) -> Result<usize, ImageRejection> {
        if !image.mime.starts_with("image/") {
            return Err(ImageRejection::NotAnImage(image.name));
        }
        let size = image.size();
        if self
            .entries
            .iter()
            .any(|existing| existing.name == image.name && existing.size() == size)
        {
            return Err(ImageRejection::Duplicate(image.name));
        }
        self.entries.push(image);
        Ok(self.entries.len() - 1)
    }

    /// Remove the entry at `index`; later entries shift down by one, so
    /// every remaining index stays valid for the preview UI.
    pub fn remove(&mut self, index: usize) -> Option<PendingImage> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Re-stage the images the server already holds, for the edit flow.
    ///
    /// Each stored buffer must UTF-8 decode to a `data:image/...` URL;
    /// anything else is logged and skipped without failing the batch.
    /// Decoded files go through [`add`](Self::add), so deduplication and
    /// the preview pipeline apply exactly as for fresh picks. Returns how
    /// many entries were added.
    pub fn restore_from_buffers(&mut self, buffers: &[ProductImage]) -> usize {
        let mut added = 0;
        for (index, record) in buffers.iter().enumerate() {
            match decode_stored_buffer(&record.image_url.data, index) {
                Ok(image) => match self.add(image) {
                    Ok(_) => added += 1,
                    Err(rejection) => log::warn!("Skipping stored image: {}", rejection),
                },
                Err(reason) => {
                    log::warn!("Skipping stored image at index {}: {}", index, reason);
                }
            }
        }
        added
    }

    /// Build the ordered upload batch. The first entry is always flagged
    /// primary, whatever the server said about the images it used to hold.
    pub fn to_upload_records(&self) -> Vec<ImageUpload> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, image)| ImageUpload {
                image_url: image.data_url(),
                alt_text: image.name.clone(),
                is_primary: index == 0,
                sort_order: (index + 1) as i32,
            })
            .collect()
    }
}

/// Decode one stored buffer into a pending image. The buffer's bytes are
/// the UTF-8 text of a data URL; the synthesized filename keeps restored
/// entries distinguishable in previews and dedup checks.
fn decode_stored_buffer(bytes: &[u8], index: usize) -> Result<PendingImage, String> {
    let data_url = std::str::from_utf8(bytes).map_err(|_| "buffer is not UTF-8".to_string())?;
    if !data_url.starts_with("data:image/") {
        return Err("buffer is not an image data URL".to_string());
    }
    let (header, payload) = data_url
        .split_once(',')
        .ok_or_else(|| "malformed data URL".to_string())?;
    let mime = header
        .strip_prefix("data:")
        .and_then(|rest| rest.split(';').next())
        .filter(|mime| !mime.is_empty())
        .ok_or_else(|| "missing mime type".to_string())?;
    let extension = mime.split('/').nth(1).unwrap_or("bin");
    let decoded = BASE64
        .decode(payload.trim())
        .map_err(|e| format!("base64 decode failed: {}", e))?;

    Ok(PendingImage {
        name: format!("existing_image_{}.{}", index + 1, extension),
        mime: mime.to_string(),
        bytes: decoded,
    })
}

/// Interpret a stored buffer as the data URL it carries, for direct use as
/// an `<img>` source. `None` when the buffer holds anything else.
pub fn buffer_to_data_url(bytes: &[u8]) -> Option<String> {
    let text = std::str::from_utf8(bytes).ok()?;
    if text.starts_with("data:image/") {
        Some(text.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::products::ImageBuffer;

    fn png(name: &str, bytes: &[u8]) -> PendingImage {
        PendingImage {
            name: name.to_string(),
            mime: "image/png".to_string(),
            bytes: bytes.to_vec(),
        }
    }

    fn stored(data_url: &str) -> ProductImage {
        ProductImage {
            image_url: ImageBuffer {
                data: data_url.as_bytes().to_vec(),
            },
            alt_text: None,
            is_primary: false,
            sort_order: 0,
        }
    }

    #[test]
    fn test_add_rejects_non_image() {
        let mut set = PendingImageSet::new();
        let result = set.add(PendingImage {
            name: "notes.txt".into(),
            mime: "text/plain".into(),
            bytes: b"hello".to_vec(),
        });
        assert_eq!(
            result,
            Err(ImageRejection::NotAnImage("notes.txt".to_string()))
        );
        assert!(set.is_empty());
    }

    #[test]
    fn test_add_rejects_name_and_size_duplicate() {
        let mut set = PendingImageSet::new();
        set.add(png("a.png", b"12345")).unwrap();
        assert_eq!(
            set.add(png("a.png", b"54321")),
            Err(ImageRejection::Duplicate("a.png".to_string()))
        );
        // Same name, different size: not a duplicate.
        set.add(png("a.png", b"123456")).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_remove_shifts_later_entries_down() {
        let mut set = PendingImageSet::new();
        set.add(png("a.png", b"1")).unwrap();
        set.add(png("b.png", b"22")).unwrap();
        set.add(png("c.png", b"333")).unwrap();

        let removed = set.remove(1).unwrap();
        assert_eq!(removed.name, "b.png");
        assert_eq!(set.len(), 2);

        let names: Vec<&str> = set.iter().map(|img| img.name.as_str()).collect();
        assert_eq!(names, vec!["a.png", "c.png"]);

        // Records rebuilt after removal use the new contiguous indices.
        let records = set.to_upload_records();
        assert_eq!(records[0].sort_order, 1);
        assert_eq!(records[1].sort_order, 2);
        assert_eq!(records[1].alt_text, "c.png");
    }

    #[test]
    fn test_remove_out_of_range_is_none() {
        let mut set = PendingImageSet::new();
        set.add(png("a.png", b"1")).unwrap();
        assert!(set.remove(5).is_none());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut set = PendingImageSet::new();
        set.add(png("a.png", b"1")).unwrap();
        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn test_restore_empty_is_noop() {
        let mut set = PendingImageSet::new();
        set.add(png("a.png", b"1")).unwrap();
        assert_eq!(set.restore_from_buffers(&[]), 0);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_restore_decodes_and_names_entries() {
        let mut set = PendingImageSet::new();
        let url = format!("data:image/png;base64,{}", BASE64.encode(b"pixels"));
        let added = set.restore_from_buffers(&[stored(&url)]);
        assert_eq!(added, 1);

        let image = set.iter().next().unwrap();
        assert_eq!(image.name, "existing_image_1.png");
        assert_eq!(image.mime, "image/png");
        assert_eq!(image.bytes, b"pixels");
        // Round-trips back to the same data URL.
        assert_eq!(image.data_url(), url);
    }

    #[test]
    fn test_restore_skips_bad_buffers_in_isolation() {
        let mut set = PendingImageSet::new();
        let good = format!("data:image/jpeg;base64,{}", BASE64.encode(b"jpeg-bytes"));
        let records = vec![
            stored("data:text/plain;base64,aGk="), // not an image
            ProductImage {
                image_url: ImageBuffer {
                    data: vec![0xff, 0xfe, 0x00], // not UTF-8
                },
                alt_text: None,
                is_primary: false,
                sort_order: 0,
            },
            stored("data:image/png;base64,%%%"), // bad base64
            stored(&good),
        ];
        assert_eq!(set.restore_from_buffers(&records), 1);
        assert_eq!(set.iter().next().unwrap().name, "existing_image_4.jpeg");
    }

    #[test]
    fn test_restore_goes_through_dedup() {
        let mut set = PendingImageSet::new();
        let url = format!("data:image/png;base64,{}", BASE64.encode(b"same"));
        let records = vec![stored(&url), stored(&url)];
        // Synthesized names differ by index, so both survive one restore.
        assert_eq!(set.restore_from_buffers(&records), 2);

        // Restoring the same batch again reproduces the same names and
        // sizes, and the add-path dedup drops every entry.
        assert_eq!(set.restore_from_buffers(&records), 0);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_upload_records_first_is_primary() {
        let mut set = PendingImageSet::new();
        set.add(png("a.png", b"1")).unwrap();
        set.add(png("b.png", b"22")).unwrap();

        let records = set.to_upload_records();
        assert_eq!(records.len(), 2);
        assert!(records[0].is_primary);
        assert!(!records[1].is_primary);
        assert_eq!(records[0].sort_order, 1);
        assert_eq!(records[1].sort_order, 2);
        assert!(records[0].image_url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_buffer_to_data_url() {
        assert_eq!(
            buffer_to_data_url(b"data:image/png;base64,AAAA"),
            Some("data:image/png;base64,AAAA".to_string())
        );
        assert_eq!(buffer_to_data_url(b"<html>"), None);
        assert_eq!(buffer_to_data_url(&[0xff, 0xfe]), None);
    }
}
