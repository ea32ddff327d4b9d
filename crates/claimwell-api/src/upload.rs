//! Upload batch validation
//!
//! Every rule runs before any processing begins, and every rejection
//! names the offending file. A batch either passes completely or the
//! request stops here.

use thiserror::Error;

/// Maximum size of one uploaded file
pub const MAX_FILE_SIZE: usize = 25 * 1024 * 1024;

/// One uploaded file: the name it was uploaded under and its raw bytes
pub type UploadedFile = (String, Vec<u8>);

/// Rejections for an invalid upload batch.
///
/// Non-retryable: the caller must fix the input.
#[derive(Debug, Error, PartialEq)]
pub enum UploadError {
    /// The batch contained no files
    #[error("At least one PDF file required")]
    NoFiles,

    /// A file arrived without a filename
    #[error("Invalid filename")]
    MissingFilename,

    /// A file does not carry a .pdf extension
    #[error("'{0}' is not a PDF")]
    NotAPdf(String),

    /// A file exceeds the size limit
    #[error("'{filename}' exceeds 25MB ({size_mb:.2}MB)")]
    TooLarge {
        /// The offending file
        filename: String,
        /// Its size in mebibytes
        size_mb: f64,
    },

    /// A file contained no bytes
    #[error("'{0}' is empty")]
    Empty(String),
}

/// Validate an upload batch before any processing begins.
///
/// Checks, in order: at least one file; every file has a name ending in
/// `.pdf` (case-insensitive); no file exceeds [`MAX_FILE_SIZE`]; no file
/// is empty. The first violation wins.
pub fn validate_upload_batch(files: &[UploadedFile]) -> Result<(), UploadError> {
    if files.is_empty() {
        return Err(UploadError::NoFiles);
    }

    for (filename, content) in files {
        if filename.is_empty() {
            return Err(UploadError::MissingFilename);
        }
        if !filename.to_lowercase().ends_with(".pdf") {
            return Err(UploadError::NotAPdf(filename.clone()));
        }
        if content.len() > MAX_FILE_SIZE {
            return Err(UploadError::TooLarge {
                filename: filename.clone(),
                size_mb: content.len() as f64 / (1024.0 * 1024.0),
            });
        }
        if content.is_empty() {
            return Err(UploadError::Empty(filename.clone()));
        }
    }

    Ok(())
}
