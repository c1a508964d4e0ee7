//! Conversion from browser file lists to upload candidates.

use bpc_uploader::CandidateFile;
use web_sys::{DragEvent, File, FileList, HtmlInputElement};

/// Candidate wrapping a browser `File`.
pub type BrowserFile = CandidateFile<File>;

/// Read name, type and size from a browser `File`.
pub fn candidate_from_file(file: File) -> BrowserFile {
    let name = file.name();
    let mime_type = file.type_();
    // Blob sizes are integral doubles
    let size = file.size().max(0.0) as u64;
    CandidateFile::with_handle(name, mime_type, size, file)
}

/// All files of a `FileList`, in order.
pub fn candidates_from_list(list: &FileList) -> Vec<BrowserFile> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(candidate_from_file)
        .collect()
}

/// Files chosen through an `<input type="file">`.
///
/// The input is cleared so picking the same file again fires `change`.
pub fn candidates_from_input(input: &HtmlInputElement) -> Vec<BrowserFile> {
    let files = input
        .files()
        .map(|list| candidates_from_list(&list))
        .unwrap_or_default();
    input.set_value("");
    files
}

/// Files dropped on a drop zone.
pub fn candidates_from_drop(event: &DragEvent) -> Vec<BrowserFile> {
    event
        .data_transfer()
        .and_then(|transfer| transfer.files())
        .map(|list| candidates_from_list(&list))
        .unwrap_or_default()
}
