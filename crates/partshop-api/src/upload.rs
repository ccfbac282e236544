// File payloads for multipart endpoints (product images, CSV import, OCR).

use std::path::Path;

use reqwest::multipart::{Form, Part};

use crate::error::Error;

/// An in-memory file ready to be sent as one multipart part.
#[derive(Clone)]
pub struct Upload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for Upload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Upload")
            .field("file_name", &self.file_name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl Upload {
    pub fn new(file_name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// Read a file from disk, guessing the MIME type from its extension.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map_or_else(|| "upload".to_owned(), |n| n.to_string_lossy().into_owned());
        Ok(Self {
            mime: mime_guess::from_path(path)
                .first_or_octet_stream()
                .essence_str()
                .to_owned(),
            file_name,
            bytes,
        })
    }

    /// Wrap into a single-part form under `field`.
    pub(crate) fn into_form(self, field: &'static str) -> Result<Form, Error> {
        let part = Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.mime)?;
        Ok(Form::new().part(field, part))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn from_path_reads_bytes_and_guesses_mime() {
        let mut file = tempfile::Builder::new().suffix(".CSV").tempfile().unwrap();
        file.write_all(b"sku,name\nA-1,Brake pad\n").unwrap();

        let upload = Upload::from_path(file.path()).unwrap();
        assert_eq!(upload.mime, "text/csv");
        assert!(upload.file_name.to_lowercase().ends_with(".csv"));
        assert_eq!(upload.bytes.len(), 23);
    }

    fn mime_of(suffix: &str) -> String {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(b"\x00\x01").unwrap();
        Upload::from_path(file.path()).unwrap().mime
    }

    #[test]
    fn image_formats_get_their_own_mime() {
        assert_eq!(mime_of(".avif"), "image/avif");
        assert_eq!(mime_of(".tif"), "image/tiff");
        assert_eq!(mime_of(".svg"), "image/svg+xml");
        assert_eq!(mime_of(".bmp"), "image/bmp");
        assert_eq!(mime_of(".JPEG"), "image/jpeg");
        assert_eq!(mime_of(".tsv"), "text/tab-separated-values");
    }

    #[test]
    fn unknown_extension_is_octet_stream() {
        assert_eq!(mime_of(".partshop-unknown"), "application/octet-stream");
        assert_eq!(mime_of(""), "application/octet-stream");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Upload::from_path(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.status(), 0);
    }
}
