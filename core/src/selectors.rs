//! Read-side helpers for the view layer.

use crate::domain::FilterValue;
use crate::store::State;
use crate::types::{Task, TaskStatus};

/// Tasks of `todolist_id` that pass the todolist's filter, in store order.
/// Empty when the todolist is not held.
pub fn tasks_for_todolist<'a>(state: &'a State, todolist_id: &str) -> Vec<&'a Task> {
    let Some(todolist) = state.todolists.get(todolist_id) else {
        return Vec::new();
    };
    let tasks = state.tasks.tasks(todolist_id).unwrap_or_default();
    tasks
        .iter()
        .filter(|task| match todolist.filter {
            FilterValue::All => true,
            FilterValue::Active => task.status == TaskStatus::New,
            FilterValue::Completed => task.status == TaskStatus::Completed,
        })
        .collect()
}
