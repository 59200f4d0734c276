//! Typed request data
//!
//! Every inbound request is turned into an [`ActionRequest`] before anything
//! touches the filesystem.

use hyper::body::{Body, Bytes};
use hyper::Request;

use super::multipart::{self, UploadLimits, UploadedFile};
use crate::http::query;

/// Raw query parameters recognised by the endpoint
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ActionQuery {
    pub action: Option<String>,
    pub filename: Option<String>,
}

impl ActionQuery {
    /// Decode the query string; a repeated key keeps its last value
    pub fn parse(raw: Option<&str>) -> Self {
        let pairs = query::pairs(raw);
        Self {
            action: query::last_value(&pairs, "action"),
            filename: query::last_value(&pairs, "filename"),
        }
    }
}

/// Action selected by the `action` query parameter, with its inputs
#[derive(Debug)]
pub enum ActionRequest {
    /// `action=create`; `filename` is `None` when the parameter is absent
    Create { filename: Option<String> },
    /// `action=upload`; `file` is `None` when no upload descriptor was sent
    Upload { file: Option<UploadedFile> },
    /// Any other action, including none at all
    ShowSource,
}

impl ActionRequest {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Upload { .. } => "upload",
            Self::ShowSource => "source",
        }
    }

    /// Build the typed request, reading the body only for uploads
    pub async fn from_request<B>(req: Request<B>, limits: UploadLimits) -> Self
    where
        B: Body<Data = Bytes> + Send + 'static,
        B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let params = ActionQuery::parse(req.uri().query());

        // Exact, case-sensitive match
        match params.action.as_deref() {
            Some("create") => Self::Create {
                filename: params.filename,
            },
            Some("upload") => {
                let (parts, body) = req.into_parts();
                Self::Upload {
                    file: multipart::extract_upload(&parts.headers, body, limits).await,
                }
            }
            _ => Self::ShowSource,
        }
    }
}
