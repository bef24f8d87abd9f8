//! Turns a failed call into an app-status error.
//!
//! Both handlers are terminal: they write the message, set the app status to
//! `Failed`, and nothing else. No retry, no distinction by HTTP status.

use tracing::warn;

use crate::action::{Action, Dispatch};
use crate::domain::RequestStatus;
use crate::error::ApiError;

pub const GENERIC_BUSINESS_ERROR: &str = "Some error occurred";
pub const GENERIC_NETWORK_ERROR: &str = "Network error";

/// A valid envelope with a non-success result code.
pub fn handle_server_app_error(messages: &[String], dispatch: &mut impl Dispatch) {
    let message = messages
        .first()
        .cloned()
        .unwrap_or_else(|| GENERIC_BUSINESS_ERROR.to_string());
    warn!(%message, "server rejected request");
    dispatch.dispatch(Action::SetAppError(Some(message)));
    dispatch.dispatch(Action::SetAppStatus(RequestStatus::Failed));
}

/// No usable response arrived.
pub fn handle_server_network_error(error: &ApiError, dispatch: &mut impl Dispatch) {
    let message = error.to_string();
    let message = if message.is_empty() {
        GENERIC_NETWORK_ERROR.to_string()
    } else {
        message
    };
    warn!(%message, "request failed");
    dispatch.dispatch(Action::SetAppError(Some(message)));
    dispatch.dispatch(Action::SetAppStatus(RequestStatus::Failed));
}

/// Route `error` to the matching handler.
pub fn handle_error(error: &ApiError, dispatch: &mut impl Dispatch) {
    match error {
        ApiError::Business { messages, .. } => handle_server_app_error(messages, dispatch),
        other => handle_server_network_error(other, dispatch),
    }
}
