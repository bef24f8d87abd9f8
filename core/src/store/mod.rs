//! The four state containers and the snapshot that groups them.

pub mod app;
pub mod auth;
pub mod tasks;
pub mod todolists;

use serde::Serialize;

use crate::action::Action;

pub use app::AppStatusStore;
pub use auth::AuthStore;
pub use tasks::TaskStore;
pub use todolists::TodolistStore;

/// Everything the view layer reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct State {
    pub app: AppStatusStore,
    pub auth: AuthStore,
    pub todolists: TodolistStore,
    pub tasks: TaskStore,
}

impl State {
    /// Hand `action` to every store.
    pub fn apply(&mut self, action: &Action) {
        self.app.reduce(action);
        self.auth.reduce(action);
        self.todolists.reduce(action);
        self.tasks.reduce(action);
    }

    /// Every todolist has a task bucket and every bucket has a todolist.
    pub fn is_consistent(&self) -> bool {
        self.todolists.len() == self.tasks.keys().count()
            && self
                .todolists
                .items()
                .iter()
                .all(|tl| self.tasks.contains_key(tl.id()))
    }
}
