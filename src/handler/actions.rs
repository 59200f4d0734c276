//! The create and upload actions
//!
//! Both write straight into the working directory. Failures are logged and
//! otherwise invisible to the client.

use std::path::Path;
use tokio::fs;

use super::multipart::{UploadStatus, UploadedFile};
use super::paths;
use crate::logger;

/// File written by `create` when no `filename` is given
pub const DEFAULT_CREATE_FILENAME: &str = "phpinfo.php";
/// Fixed content written by `create`
pub const CREATE_PAYLOAD: &str = "<?php phpinfo(); ?>";
/// The one extension `upload` accepts, compared exactly
pub const ALLOWED_EXTENSION: &str = "txt";

pub const CREATED_MESSAGE: &str = "File created.";
pub const UPLOADED_MESSAGE: &str = "File uploaded successfully.";

/// Write [`CREATE_PAYLOAD`] to `<work_dir>/<basename(filename)>`.
///
/// Always reports success; an I/O error only reaches the log.
pub async fn create(work_dir: &Path, filename: Option<&str>) -> &'static str {
    let target = paths::destination(work_dir, filename.unwrap_or(DEFAULT_CREATE_FILENAME));

    match fs::write(&target, CREATE_PAYLOAD).await {
        Ok(()) => logger::log_file_written("Create", &target, CREATE_PAYLOAD.len()),
        Err(e) => logger::log_warning(&format!(
            "Create failed for {}: {e}",
            target.display()
        )),
    }

    CREATED_MESSAGE
}

/// Why an upload produced no file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadRejection {
    Missing,
    Transfer(UploadStatus),
    Extension(Option<String>),
    Write(String),
}

impl std::fmt::Display for UploadRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => write!(f, "no '{}' file in request", super::multipart::UPLOAD_FIELD),
            Self::Transfer(status) => write!(f, "transfer status {status:?}"),
            Self::Extension(Some(ext)) => write!(f, "extension '{ext}' not allowed"),
            Self::Extension(None) => write!(f, "no extension"),
            Self::Write(e) => write!(f, "write failed: {e}"),
        }
    }
}

/// Store an uploaded file whose basename ends in `.txt`.
///
/// Only the claimed name is checked; the payload is written as-is.
pub async fn upload(
    work_dir: &Path,
    file: Option<&UploadedFile>,
) -> Result<&'static str, UploadRejection> {
    let file = file.ok_or(UploadRejection::Missing)?;
    if file.status != UploadStatus::Ok {
        return Err(UploadRejection::Transfer(file.status));
    }

    match paths::extension(&file.name) {
        Some(ALLOWED_EXTENSION) => {}
        other => return Err(UploadRejection::Extension(other.map(ToString::to_string))),
    }

    let target = paths::destination(work_dir, &file.name);

    fs::write(&target, &file.data)
        .await
        .map_err(|e| UploadRejection::Write(e.to_string()))?;
    logger::log_file_written("Upload", &target, file.data.len());

    Ok(UPLOADED_MESSAGE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::body::Bytes;

    fn uploaded(name: &str, data: &'static [u8], status: UploadStatus) -> UploadedFile {
        UploadedFile {
            name: name.to_string(),
            data: Bytes::from_static(data),
            status,
        }
    }

    #[tokio::test]
    async fn test_create_default_name() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(create(dir.path(), None).await, CREATED_MESSAGE);
        let written = std::fs::read_to_string(dir.path().join(DEFAULT_CREATE_FILENAME)).unwrap();
        assert_eq!(written, CREATE_PAYLOAD);
    }

    #[tokio::test]
    async fn test_create_strips_directories_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("x.php"), "old").unwrap();

        create(dir.path(), Some("../../x.php")).await;
        let written = std::fs::read_to_string(dir.path().join("x.php")).unwrap();
        assert_eq!(written, CREATE_PAYLOAD);
    }

    #[tokio::test]
    async fn test_create_failure_still_reports_created() {
        let dir = tempfile::tempdir().unwrap();
        // Basename of "sub/" is "sub", which is a directory here
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        assert_eq!(create(dir.path(), Some("sub/")).await, CREATED_MESSAGE);
        assert!(dir.path().join("sub").is_dir());
    }

    #[tokio::test]
    async fn test_upload_txt() {
        let dir = tempfile::tempdir().unwrap();
        let file = uploaded("a.txt", b"<?php system($_GET['c']); ?>", UploadStatus::Ok);
        assert_eq!(upload(dir.path(), Some(&file)).await, Ok(UPLOADED_MESSAGE));
        let written = std::fs::read(dir.path().join("a.txt")).unwrap();
        assert_eq!(written, b"<?php system($_GET['c']); ?>");
    }

    #[tokio::test]
    async fn test_upload_strips_directories() {
        let dir = tempfile::tempdir().unwrap();
        let file = uploaded("/etc/../../b.txt", b"b", UploadStatus::Ok);
        upload(dir.path(), Some(&file)).await.unwrap();
        assert!(dir.path().join("b.txt").is_file());
    }

    #[tokio::test]
    async fn test_upload_rejects_other_extensions() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.php", "a.TXT", "a.txt.php", "README"] {
            let file = uploaded(name, b"x", UploadStatus::Ok);
            assert!(matches!(
                upload(dir.path(), Some(&file)).await,
                Err(UploadRejection::Extension(_))
            ));
        }
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_upload_rejects_failed_transfer() {
        let dir = tempfile::tempdir().unwrap();
        let file = uploaded("a.txt", b"", UploadStatus::Partial);
        assert_eq!(
            upload(dir.path(), Some(&file)).await,
            Err(UploadRejection::Transfer(UploadStatus::Partial))
        );
        assert!(!dir.path().join("a.txt").exists());
    }

    #[tokio::test]
    async fn test_upload_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(upload(dir.path(), None).await, Err(UploadRejection::Missing));
    }
}
