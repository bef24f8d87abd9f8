//! State transitions broadcast to every store.
//!
//! A store's `reduce` ignores the actions it does not own. Cross-store effects
//! (a new todolist gets an empty task bucket, a removed one loses it) are the
//! task store reacting to todolist actions, not one store reaching into
//! another.

use serde::Serialize;

use crate::domain::{FilterValue, Operation, RequestStatus};
use crate::types::{Task, Todolist, UpdateDomainTaskModel};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Action {
    SetAppStatus(RequestStatus),
    SetAppError(Option<String>),
    SetAppInitialized(bool),
    SetOperationStatus(Operation, RequestStatus),
    SetIsLoggedIn(bool),
    TodolistsFetched(Vec<Todolist>),
    TodolistAdded(Todolist),
    TodolistRemoved {
        id: String,
    },
    TodolistTitleChanged {
        id: String,
        title: String,
    },
    TodolistFilterChanged {
        id: String,
        filter: FilterValue,
    },
    TodolistEntityStatusChanged {
        id: String,
        status: RequestStatus,
    },
    TasksFetched {
        todolist_id: String,
        tasks: Vec<Task>,
    },
    TaskAdded(Task),
    TaskRemoved {
        todolist_id: String,
        task_id: String,
    },
    TaskUpdated {
        todolist_id: String,
        task_id: String,
        model: UpdateDomainTaskModel,
    },
    ClearTasksAndTodolists,
}

/// Anything that accepts actions: the service, a bare [`State`], or a plain
/// `Vec` that records them.
///
/// [`State`]: crate::store::State
pub trait Dispatch {
    fn dispatch(&mut self, action: Action);
}

impl Dispatch for crate::store::State {
    fn dispatch(&mut self, action: Action) {
        self.apply(&action);
    }
}

impl Dispatch for Vec<Action> {
    fn dispatch(&mut self, action: Action) {
        self.push(action);
    }
}
