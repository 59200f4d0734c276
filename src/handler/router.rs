//! Request dispatch module
//!
//! Entry point for HTTP request processing: method check, action dispatch,
//! plain-text response. Unknown or missing actions print the handler source.

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

use super::actions;
use super::multipart::UploadLimits;
use super::request::ActionRequest;
use crate::config::AppState;
use crate::http;
use crate::logger;

/// Source text served by the default action: every file of the handler module
pub const HANDLER_SOURCE: &str = concat!(
    "// handler/router.rs\n",
    include_str!("router.rs"),
    "\n// handler/request.rs\n",
    include_str!("request.rs"),
    "\n// handler/multipart.rs\n",
    include_str!("multipart.rs"),
    "\n// handler/paths.rs\n",
    include_str!("paths.rs"),
    "\n// handler/actions.rs\n",
    include_str!("actions.rs"),
);

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body<Data = Bytes> + Send + 'static,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let is_head = *req.method() == Method::HEAD;
    if let Some(resp) = check_http_method(req.method(), state.config.http.enable_cors) {
        return Ok(resp);
    }

    let limits = UploadLimits {
        max_file_size: state.config.upload.max_file_size,
        max_body_size: state.config.http.max_body_size,
    };
    let action = ActionRequest::from_request(req, limits).await;
    logger::log_debug(&format!("Dispatching action: {}", action.name()));

    let body = dispatch(action, &state).await;
    Ok(http::build_text_response(body, &state.config.http, is_head))
}

fn check_http_method(method: &Method, enable_cors: bool) -> Option<Response<Full<Bytes>>> {
    match method {
        &Method::GET | &Method::HEAD | &Method::POST => None,
        &Method::OPTIONS => Some(http::build_options_response(enable_cors)),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

async fn dispatch(action: ActionRequest, state: &AppState) -> &'static str {
    match action {
        ActionRequest::Create { filename } => {
            actions::create(&state.work_dir, filename.as_deref()).await
        }
        ActionRequest::Upload { file } => {
            match actions::upload(&state.work_dir, file.as_ref()).await {
                Ok(message) => message,
                Err(rejection) => {
                    let name = file.as_ref().map_or("-", |f| f.name.as_str());
                    logger::log_warning(&format!("Upload of '{name}' rejected: {rejection}"));
                    ""
                }
            }
        }
        ActionRequest::ShowSource => HANDLER_SOURCE,
    }
}
