//! Syllabus upload hook.
//!
//! Takes an uploaded file presumed to be a PDF, stores the original
//! blob, runs the heuristic text extraction, and hands the text to the
//! remote AI-parsing function. An image-scanned PDF with no text layer
//! fails the extraction floor and is surfaced as a distinct
//! "could not read" condition directing the user to manual entry — the
//! caller must not retry that path.

use std::sync::{Arc, Mutex};

use tracing::{debug, error, warn};

use forward_core::defaults::EXTRACTED_TEXT_FLOOR_CHARS;
use forward_core::{
    BlobStore, Error, Notification, Notifier, ParseSyllabusRequest, ParsedSyllabus, Result,
    SyllabusParser,
};

use crate::extract::{clip_for_parse, extract_syllabus_text};

/// The syllabus upload hook.
pub struct SyllabusUpload {
    parser: Arc<dyn SyllabusParser>,
    blobs: Arc<dyn BlobStore>,
    notifier: Arc<dyn Notifier>,
    is_parsing: Mutex<bool>,
}

impl SyllabusUpload {
    pub fn new(
        parser: Arc<dyn SyllabusParser>,
        blobs: Arc<dyn BlobStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            parser,
            blobs,
            notifier,
            is_parsing: Mutex::new(false),
        }
    }

    /// Whether a parse is in flight.
    pub fn is_parsing(&self) -> bool {
        *self.is_parsing.lock().expect("flag lock poisoned")
    }

    /// Upload a syllabus file and parse it into class details.
    pub async fn upload_and_parse(
        &self,
        owner_id: &str,
        file_name: &str,
        data: &[u8],
    ) -> Result<ParsedSyllabus> {
        *self.is_parsing.lock().expect("flag lock poisoned") = true;
        let result = self.run(owner_id, file_name, data).await;
        *self.is_parsing.lock().expect("flag lock poisoned") = false;
        result
    }

    async fn run(&self, owner_id: &str, file_name: &str, data: &[u8]) -> Result<ParsedSyllabus> {
        let path = format!("syllabi/{owner_id}/{file_name}");
        if let Err(e) = self
            .blobs
            .upload(&path, data.to_vec(), "application/pdf")
            .await
        {
            error!(path = %path, error = %e, "syllabus upload failed");
            self.notifier
                .notify(Notification::error("Failed to upload syllabus"));
            return Err(e);
        }

        let text = extract_syllabus_text(data);
        if text.trim().len() < EXTRACTED_TEXT_FLOOR_CHARS {
            warn!(
                file_name,
                extracted_len = text.trim().len(),
                "no extractable text layer"
            );
            self.notifier.notify(Notification::error(
                "Couldn't read this syllabus — it may be a scanned image. Please enter the class details manually.",
            ));
            return Err(Error::UnreadableDocument(file_name.to_string()));
        }

        let clipped = clip_for_parse(&text);
        debug!(
            file_name,
            payload_len = clipped.len(),
            "invoking remote syllabus parse"
        );
        let response = match self
            .parser
            .parse(ParseSyllabusRequest {
                text: clipped.to_string(),
                file_name: file_name.to_string(),
            })
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!(file_name, error = %e, "syllabus parse call failed");
                self.notifier
                    .notify(Notification::error("Failed to parse syllabus"));
                return Err(e);
            }
        };

        match (response.success, response.data) {
            (true, Some(parsed)) => {
                self.notifier
                    .notify(Notification::success("Syllabus parsed"));
                Ok(parsed)
            }
            _ => {
                let reason = response
                    .error
                    .unwrap_or_else(|| "parse function returned no data".to_string());
                error!(file_name, error = %reason, "syllabus parse rejected");
                self.notifier
                    .notify(Notification::error("Failed to parse syllabus"));
                Err(Error::Remote(reason))
            }
        }
    }
}
