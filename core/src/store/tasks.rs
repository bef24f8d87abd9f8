//! Tasks grouped by the todolist that owns them.
//!
//! Every key is a todolist the client currently holds. Keys appear when a
//! todolist is created or fetched and disappear when it is removed; task
//! mutations aimed at a missing key are dropped with a warning instead of
//! creating an orphan bucket.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;

use crate::action::Action;
use crate::types::{Task, UpdateDomainTaskModel};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TaskStore {
    by_todolist: BTreeMap<String, Vec<Task>>,
}

impl TaskStore {
    pub fn tasks(&self, todolist_id: &str) -> Option<&[Task]> {
        self.by_todolist.get(todolist_id).map(Vec::as_slice)
    }

    pub fn find(&self, todolist_id: &str, task_id: &str) -> Option<&Task> {
        self.tasks(todolist_id)?.iter().find(|t| t.id == task_id)
    }

    pub fn contains_key(&self, todolist_id: &str) -> bool {
        self.by_todolist.contains_key(todolist_id)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.by_todolist.keys().map(String::as_str)
    }

    pub fn ensure_key(&mut self, todolist_id: &str) {
        self.by_todolist.entry(todolist_id.to_string()).or_default();
    }

    pub fn drop_key(&mut self, todolist_id: &str) {
        self.by_todolist.remove(todolist_id);
    }

    /// Replace every key with an empty bucket for each of `todolist_ids`.
    pub fn reset_keys<'a>(&mut self, todolist_ids: impl IntoIterator<Item = &'a str>) {
        self.by_todolist = todolist_ids
            .into_iter()
            .map(|id| (id.to_string(), Vec::new()))
            .collect();
    }

    pub fn set_for_key(&mut self, todolist_id: &str, tasks: Vec<Task>) {
        match self.by_todolist.get_mut(todolist_id) {
            Some(bucket) => *bucket = tasks,
            None => warn!(todolist_id, "tasks fetched for a todolist that is not held"),
        }
    }

    pub fn prepend(&mut self, todolist_id: &str, task: Task) {
        match self.by_todolist.get_mut(todolist_id) {
            Some(bucket) => bucket.insert(0, task),
            None => warn!(todolist_id, "task added to a todolist that is not held"),
        }
    }

    pub fn remove(&mut self, todolist_id: &str, task_id: &str) {
        if let Some(bucket) = self.by_todolist.get_mut(todolist_id) {
            if let Some(index) = bucket.iter().position(|t| t.id == task_id) {
                bucket.remove(index);
            }
        }
    }

    /// Merge `model`'s present fields onto the task. Unknown task: no-op.
    pub fn patch(&mut self, todolist_id: &str, task_id: &str, model: &UpdateDomainTaskModel) {
        let task = self
            .by_todolist
            .get_mut(todolist_id)
            .and_then(|bucket| bucket.iter_mut().find(|t| t.id == task_id));
        match task {
            Some(task) => model.apply_to(task),
            None => warn!(todolist_id, task_id, "patch target not found"),
        }
    }

    pub fn clear(&mut self) {
        self.by_todolist.clear();
    }

    pub fn reduce(&mut self, action: &Action) {
        match action {
            Action::TodolistsFetched(todolists) => {
                self.reset_keys(todolists.iter().map(|tl| tl.id.as_str()))
            }
            Action::TodolistAdded(todolist) => self.ensure_key(&todolist.id),
            Action::TodolistRemoved { id } => self.drop_key(id),
            Action::TasksFetched { todolist_id, tasks } => self.set_for_key(todolist_id, tasks.clone()),
            Action::TaskAdded(task) => self.prepend(&task.todo_list_id, task.clone()),
            Action::TaskRemoved { todolist_id, task_id } => self.remove(todolist_id, task_id),
            Action::TaskUpdated {
                todolist_id,
                task_id,
                model,
            } => self.patch(todolist_id, task_id, model),
            Action::ClearTasksAndTodolists => self.clear(),
            _ => {}
        }
    }
}
