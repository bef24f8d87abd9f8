//! App-wide request status, error message and initialization flag.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::action::Action;
use crate::domain::{Operation, RequestStatus};

/// `status` and `error` are last-write-wins across all operations;
/// `operations` keeps the latest status of each logical operation on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppStatusStore {
    pub status: RequestStatus,
    pub error: Option<String>,
    pub is_initialized: bool,
    operations: BTreeMap<Operation, RequestStatus>,
}

impl AppStatusStore {
    pub fn set_status(&mut self, status: RequestStatus) {
        self.status = status;
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    pub fn set_initialized(&mut self, value: bool) {
        self.is_initialized = value;
    }

    pub fn set_operation_status(&mut self, operation: Operation, status: RequestStatus) {
        self.operations.insert(operation, status);
    }

    /// `Idle` for operations that never ran.
    pub fn operation_status(&self, operation: Operation) -> RequestStatus {
        self.operations.get(&operation).copied().unwrap_or_default()
    }

    pub fn reduce(&mut self, action: &Action) {
        match action {
            Action::SetAppStatus(status) => self.set_status(*status),
            Action::SetAppError(error) => self.set_error(error.clone()),
            Action::SetAppInitialized(value) => self.set_initialized(*value),
            Action::SetOperationStatus(op, status) => self.set_operation_status(*op, *status),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle_and_uninitialized() {
        let store = AppStatusStore::default();
        assert_eq!(store.status, RequestStatus::Idle);
        assert!(store.error.is_none());
        assert!(!store.is_initialized);
        assert_eq!(store.operation_status(Operation::FetchTasks), RequestStatus::Idle);
    }

    #[test]
    fn operation_status_is_scoped() {
        let mut store = AppStatusStore::default();
        store.reduce(&Action::SetOperationStatus(Operation::AddTask, RequestStatus::Failed));
        store.reduce(&Action::SetOperationStatus(Operation::FetchTasks, RequestStatus::Succeeded));
        store.reduce(&Action::SetAppStatus(RequestStatus::Succeeded));
        assert_eq!(store.operation_status(Operation::AddTask), RequestStatus::Failed);
        assert_eq!(store.status, RequestStatus::Succeeded);
    }

    #[test]
    fn error_can_be_cleared() {
        let mut store = AppStatusStore::default();
        store.reduce(&Action::SetAppError(Some("boom".into())));
        store.reduce(&Action::SetAppError(None));
        assert!(store.error.is_none());
    }
}
