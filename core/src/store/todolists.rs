//! Ordered collection of the todolists the client holds.
//!
//! Lookups are by `id`. Mutations that name an unknown id leave the store
//! untouched.

use serde::Serialize;

use crate::action::Action;
use crate::domain::{FilterValue, RequestStatus, TodolistDomain};
use crate::types::Todolist;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TodolistStore {
    items: Vec<TodolistDomain>,
}

impl TodolistStore {
    pub fn items(&self) -> &[TodolistDomain] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&TodolistDomain> {
        self.items.iter().find(|tl| tl.id() == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut TodolistDomain> {
        self.items.iter_mut().find(|tl| tl.id() == id)
    }

    /// Newly created todolists go first.
    pub fn append_front(&mut self, todolist: Todolist) {
        self.items.insert(0, todolist.into());
    }

    pub fn remove(&mut self, id: &str) {
        if let Some(index) = self.items.iter().position(|tl| tl.id() == id) {
            self.items.remove(index);
        }
    }

    /// Clear, then repopulate in the order the server returned.
    pub fn replace_all(&mut self, todolists: Vec<Todolist>) {
        self.items = todolists.into_iter().map(TodolistDomain::from).collect();
    }

    pub fn set_title(&mut self, id: &str, title: &str) {
        if let Some(tl) = self.get_mut(id) {
            tl.todolist.title = title.to_string();
        }
    }

    pub fn set_filter(&mut self, id: &str, filter: FilterValue) {
        if let Some(tl) = self.get_mut(id) {
            tl.filter = filter;
        }
    }

    pub fn set_entity_status(&mut self, id: &str, status: RequestStatus) {
        if let Some(tl) = self.get_mut(id) {
            tl.entity_status = status;
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn reduce(&mut self, action: &Action) {
        match action {
            Action::TodolistsFetched(todolists) => self.replace_all(todolists.clone()),
            Action::TodolistAdded(todolist) => self.append_front(todolist.clone()),
            Action::TodolistRemoved { id } => self.remove(id),
            Action::TodolistTitleChanged { id, title } => self.set_title(id, title),
            Action::TodolistFilterChanged { id, filter } => self.set_filter(id, *filter),
            Action::TodolistEntityStatusChanged { id, status } => self.set_entity_status(id, *status),
            Action::ClearTasksAndTodolists => self.clear(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todolist(id: &str, title: &str) -> Todolist {
        Todolist {
            id: id.into(),
            title: title.into(),
            added_date: "2024-01-01T00:00:00".into(),
            order: 0,
        }
    }

    fn store() -> TodolistStore {
        let mut store = TodolistStore::default();
        store.replace_all(vec![todolist("1", "What to learn"), todolist("2", "What to buy")]);
        store
    }

    #[test]
    fn append_front_puts_record_first_with_defaults() {
        let mut store = store();
        store.append_front(todolist("3", "New"));
        assert_eq!(store.len(), 3);
        let first = &store.items()[0];
        assert_eq!(first.id(), "3");
        assert_eq!(first.filter, FilterValue::All);
        assert_eq!(first.entity_status, RequestStatus::Idle);
        assert_eq!(store.items().iter().filter(|tl| tl.id() == "3").count(), 1);
    }

    #[test]
    fn remove_unknown_id_is_noop() {
        let mut store = store();
        let before = store.clone();
        store.remove("missing");
        assert_eq!(store, before);
    }

    #[test]
    fn remove_known_id() {
        let mut store = store();
        store.remove("1");
        assert_eq!(store.len(), 1);
        assert!(store.get("1").is_none());
    }

    #[test]
    fn replace_all_resets_rather_than_appends() {
        let mut store = store();
        store.set_filter("1", FilterValue::Completed);
        store.replace_all(vec![todolist("2", "What to buy"), todolist("1", "What to learn")]);
        let ids: Vec<&str> = store.items().iter().map(|tl| tl.id()).collect();
        assert_eq!(ids, vec!["2", "1"]);
        assert_eq!(store.get("1").unwrap().filter, FilterValue::All);
    }

    #[test]
    fn setters_touch_only_the_matching_record() {
        let mut store = store();
        store.set_title("2", "Shopping");
        store.set_filter("2", FilterValue::Active);
        store.set_entity_status("2", RequestStatus::Loading);
        let tl = store.get("2").unwrap();
        assert_eq!(tl.todolist.title, "Shopping");
        assert_eq!(tl.filter, FilterValue::Active);
        assert_eq!(tl.entity_status, RequestStatus::Loading);
        assert_eq!(store.get("1").unwrap().todolist.title, "What to learn");
    }

    #[test]
    fn setters_on_unknown_id_are_noops() {
        let mut store = store();
        let before = store.clone();
        store.set_title("x", "nope");
        store.set_filter("x", FilterValue::Active);
        store.set_entity_status("x", RequestStatus::Failed);
        assert_eq!(store, before);
    }
}
