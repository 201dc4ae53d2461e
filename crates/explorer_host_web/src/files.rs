//! Reading user-selected files (browse or drop) into memory.

use explorer_host::FileUpload;

use crate::bridge;

/// Reads a selected file into a [`FileUpload`] ready for `POST /upload`.
///
/// # Errors
///
/// Returns an error when the browser fails to read the file.
pub async fn read_file_upload(file: &web_sys::File) -> Result<FileUpload, String> {
    bridge::read_file_upload(file).await
}

/// Reads a selected file as UTF-8 text (raw JSON widget).
///
/// # Errors
///
/// Returns an error when the browser fails to read or decode the file.
pub async fn read_file_text(file: &web_sys::File) -> Result<String, String> {
    bridge::read_file_text(file).await
}
