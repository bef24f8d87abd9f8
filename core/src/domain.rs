//! Client-only view types layered on top of the wire DTOs.

use serde::{Deserialize, Serialize};

use crate::types::Todolist;

/// Which tasks a todolist shows.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FilterValue {
    #[default]
    All,
    Active,
    Completed,
}

/// Lifecycle of a request, used both app-wide and per todolist.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// A todolist as held by the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TodolistDomain {
    #[serde(flatten)]
    pub todolist: Todolist,
    pub filter: FilterValue,
    pub entity_status: RequestStatus,
}

impl From<Todolist> for TodolistDomain {
    fn from(todolist: Todolist) -> Self {
        Self {
            todolist,
            filter: FilterValue::All,
            entity_status: RequestStatus::Idle,
        }
    }
}

impl TodolistDomain {
    pub fn id(&self) -> &str {
        &self.todolist.id
    }
}

/// Logical operations whose outcome is tracked separately from the shared
/// app status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    InitializeApp,
    Login,
    Logout,
    FetchTodolists,
    AddTodolist,
    RemoveTodolist,
    ChangeTodolistTitle,
    FetchTasks,
    AddTask,
    RemoveTask,
    UpdateTask,
}
