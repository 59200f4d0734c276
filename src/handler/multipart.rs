//! Upload descriptor extraction
//!
//! Pulls the `file` field out of a `multipart/form-data` body and records how the
//! transfer went, the way classic form-upload handling reports a per-file status.

use http_body_util::BodyExt;
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderMap, CONTENT_LENGTH, CONTENT_TYPE};
use multer::{Constraints, Multipart, SizeLimit};

/// Multipart field carrying the upload
pub const UPLOAD_FIELD: &str = "file";

/// Transfer status of an uploaded file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    Ok,
    /// Payload or request body exceeded the configured limit
    SizeExceeded,
    /// The multipart stream ended early or was malformed mid-field
    Partial,
    /// The field was sent without a filename
    NoFile,
}

/// A file received through the `file` multipart field
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Filename claimed by the client, unsanitized
    pub name: String,
    /// Raw payload; empty unless `status` is `Ok`
    pub data: Bytes,
    pub status: UploadStatus,
}

impl UploadedFile {
    fn failed(name: String, status: UploadStatus) -> Self {
        Self {
            name,
            data: Bytes::new(),
            status,
        }
    }
}

/// Size limits applied while reading the body
#[derive(Debug, Clone, Copy)]
pub struct UploadLimits {
    pub max_file_size: u64,
    pub max_body_size: u64,
}

/// Read the upload descriptor from a request body.
///
/// Returns `None` when the request is not `multipart/form-data` or carries no
/// `file` field with a filename. When several `file` parts are sent the last
/// one wins, matching how form handlers overwrite repeated field names.
/// Transfer problems are reported through [`UploadStatus`] instead of an error
/// so the caller can treat them uniformly.
pub async fn extract_upload<B>(
    headers: &HeaderMap,
    body: B,
    limits: UploadLimits,
) -> Option<UploadedFile>
where
    B: Body<Data = Bytes> + Send + 'static,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let content_type = headers.get(CONTENT_TYPE)?.to_str().ok()?;
    let boundary = multer::parse_boundary(content_type).ok()?;

    if declared_length(headers).is_some_and(|len| len > limits.max_body_size) {
        crate::logger::log_debug("Upload body larger than max_body_size, not reading it");
        return Some(UploadedFile::failed(String::new(), UploadStatus::SizeExceeded));
    }

    let constraints = Constraints::new().size_limit(
        SizeLimit::new()
            .whole_stream(limits.max_body_size)
            .per_field(limits.max_file_size),
    );
    let mut multipart =
        Multipart::with_constraints(body.into_data_stream(), boundary, constraints);
    let mut latest = None;

    loop {
        let mut field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return latest,
            Err(e) => {
                crate::logger::log_debug(&format!("Multipart stream error: {e}"));
                return latest;
            }
        };

        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        // A `file` field without a filename is a plain form value, not an upload
        let Some(name) = field.file_name().map(ToString::to_string) else {
            continue;
        };
        if name.is_empty() {
            latest = Some(UploadedFile::failed(name, UploadStatus::NoFile));
            continue;
        }

        let mut data = Vec::new();
        loop {
            match field.chunk().await {
                Ok(Some(chunk)) => data.extend_from_slice(&chunk),
                Ok(None) => break,
                Err(e) => {
                    // The stream cannot be resumed past a failed field
                    crate::logger::log_debug(&format!("Upload of '{name}' failed: {e}"));
                    return Some(UploadedFile::failed(name, status_for(&e)));
                }
            }
        }

        latest = Some(UploadedFile {
            name,
            data: Bytes::from(data),
            status: UploadStatus::Ok,
        });
    }
}

fn declared_length(headers: &HeaderMap) -> Option<u64> {
    headers.get(CONTENT_LENGTH)?.to_str().ok()?.parse().ok()
}

const fn status_for(err: &multer::Error) -> UploadStatus {
    match err {
        multer::Error::FieldSizeExceeded { .. } | multer::Error::StreamSizeExceeded { .. } => {
            UploadStatus::SizeExceeded
        }
        _ => UploadStatus::Partial,
    }
}
