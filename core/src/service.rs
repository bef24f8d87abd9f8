//! Coordinating service: runs the synchronized operations against the remote
//! service and commits their outcomes to the stores.
//!
//! # Design
//! Every remote operation follows the same shape: mark `Loading`, call, then
//! either commit the result and mark `Succeeded`, or classify the error and
//! mark `Failed`. Nothing is applied optimistically. Errors never escape; the
//! caller gets a [`Completion`] and reads details from the app status store.
//!
//! Operations take `&mut self`, so two of them never interleave on the same
//! service. The shared app status is therefore the outcome of the most
//! recently completed operation; `AppStatusStore::operation_status` keeps each
//! operation's own outcome as well.

use std::collections::VecDeque;

use tracing::{debug, info, warn};

use crate::action::{Action, Dispatch};
use crate::auth::AuthApi;
use crate::classify;
use crate::client::TodolistApi;
use crate::domain::{FilterValue, Operation, RequestStatus};
use crate::error::ApiError;
use crate::store::State;
use crate::transport::Transport;
use crate::types::{LoginParams, UpdateDomainTaskModel};

const ACTION_LOG_CAPACITY: usize = 1024;

/// How a synchronized operation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Fulfilled,
    Rejected,
}

impl Completion {
    pub fn is_fulfilled(self) -> bool {
        self == Completion::Fulfilled
    }
}

pub struct TodoApp<T> {
    state: State,
    todolist_api: TodolistApi,
    auth_api: AuthApi,
    transport: T,
    actions: VecDeque<Action>,
}

#[cfg(feature = "ureq")]
impl TodoApp<crate::transport::UreqTransport> {
    /// Service talking to `config.base_url` over HTTP.
    pub fn connect(config: &crate::config::ClientConfig) -> Self {
        Self::new(&config.base_url, crate::transport::UreqTransport::new(config))
    }
}

impl<T: Transport> TodoApp<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            state: State::default(),
            todolist_api: TodolistApi::new(base_url),
            auth_api: AuthApi::new(base_url),
            transport,
            actions: VecDeque::new(),
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Drain the actions dispatched since the last call, oldest first. Only
    /// the most recent entries are retained.
    pub fn take_actions(&mut self) -> Vec<Action> {
        self.actions.drain(..).collect()
    }

    fn begin(&mut self, op: Operation) {
        debug!(?op, "operation started");
        self.dispatch(Action::SetAppStatus(RequestStatus::Loading));
        self.dispatch(Action::SetOperationStatus(op, RequestStatus::Loading));
    }

    fn succeed(&mut self, op: Operation) -> Completion {
        self.dispatch(Action::SetAppStatus(RequestStatus::Succeeded));
        self.dispatch(Action::SetOperationStatus(op, RequestStatus::Succeeded));
        Completion::Fulfilled
    }

    fn fail(&mut self, op: Operation, error: &ApiError) -> Completion {
        classify::handle_error(error, self);
        self.dispatch(Action::SetOperationStatus(op, RequestStatus::Failed));
        Completion::Rejected
    }

    // ---------------------------------------------------------------------
    // Session
    // ---------------------------------------------------------------------

    /// Probe the session. A rejected probe just means nobody is logged in;
    /// only a network-kind failure is reported. The app is marked initialized
    /// either way.
    pub fn initialize_app(&mut self) -> Completion {
        let op = Operation::InitializeApp;
        self.begin(op);
        let request = self.auth_api.build_me();
        let result = self
            .transport
            .execute(request)
            .and_then(|resp| self.auth_api.parse_me(resp));
        let completion = match result {
            Ok(me) => {
                info!(login = %me.login, "session restored");
                self.dispatch(Action::SetIsLoggedIn(true));
                self.succeed(op)
            }
            Err(ApiError::Business { .. }) => {
                debug!("no active session");
                self.dispatch(Action::SetIsLoggedIn(false));
                self.succeed(op)
            }
            Err(err) => self.fail(op, &err),
        };
        self.dispatch(Action::SetAppInitialized(true));
        completion
    }

    pub fn login(&mut self, params: &LoginParams) -> Completion {
        let op = Operation::Login;
        self.begin(op);
        let result = self
            .auth_api
            .build_login(params)
            .and_then(|req| self.transport.execute(req))
            .and_then(|resp| self.auth_api.parse_login(resp));
        match result {
            Ok(data) => {
                info!(user_id = data.user_id, "logged in");
                self.dispatch(Action::SetIsLoggedIn(true));
                self.succeed(op)
            }
            Err(err) => self.fail(op, &err),
        }
    }

    /// Ending the session also drops every todolist and task held locally.
    pub fn logout(&mut self) -> Completion {
        let op = Operation::Logout;
        self.begin(op);
        let request = self.auth_api.build_logout();
        let result = self
            .transport
            .execute(request)
            .and_then(|resp| self.auth_api.parse_logout(resp));
        match result {
            Ok(()) => {
                info!("logged out");
                self.dispatch(Action::SetIsLoggedIn(false));
                self.dispatch(Action::ClearTasksAndTodolists);
                self.succeed(op)
            }
            Err(err) => self.fail(op, &err),
        }
    }

    // ---------------------------------------------------------------------
    // Todolists
    // ---------------------------------------------------------------------

    pub fn fetch_todolists(&mut self) -> Completion {
        let op = Operation::FetchTodolists;
        self.begin(op);
        let request = self.todolist_api.build_get_todolists();
        let result = self
            .transport
            .execute(request)
            .and_then(|resp| self.todolist_api.parse_get_todolists(resp));
        match result {
            Ok(todolists) => {
                debug!(count = todolists.len(), "todolists fetched");
                self.dispatch(Action::TodolistsFetched(todolists));
                self.succeed(op)
            }
            Err(err) => self.fail(op, &err),
        }
    }

    pub fn add_todolist(&mut self, title: &str) -> Completion {
        let op = Operation::AddTodolist;
        self.begin(op);
        let result = self
            .todolist_api
            .build_create_todolist(title)
            .and_then(|req| self.transport.execute(req))
            .and_then(|resp| self.todolist_api.parse_create_todolist(resp));
        match result {
            Ok(todolist) => {
                self.dispatch(Action::TodolistAdded(todolist));
                self.succeed(op)
            }
            Err(err) => self.fail(op, &err),
        }
    }

    /// The todolist is marked `Loading` while the delete is in flight and
    /// `Failed` if it does not go through.
    pub fn remove_todolist(&mut self, id: &str) -> Completion {
        let op = Operation::RemoveTodolist;
        self.begin(op);
        self.dispatch(Action::TodolistEntityStatusChanged {
            id: id.to_string(),
            status: RequestStatus::Loading,
        });
        let request = self.todolist_api.build_delete_todolist(id);
        let result = self
            .transport
            .execute(request)
            .and_then(|resp| self.todolist_api.parse_delete_todolist(resp));
        match result {
            Ok(()) => {
                self.dispatch(Action::TodolistRemoved { id: id.to_string() });
                self.succeed(op)
            }
            Err(err) => {
                self.dispatch(Action::TodolistEntityStatusChanged {
                    id: id.to_string(),
                    status: RequestStatus::Failed,
                });
                self.fail(op, &err)
            }
        }
    }

    pub fn change_todolist_title(&mut self, id: &str, title: &str) -> Completion {
        let op = Operation::ChangeTodolistTitle;
        self.begin(op);
        let result = self
            .todolist_api
            .build_update_todolist(id, title)
            .and_then(|req| self.transport.execute(req))
            .and_then(|resp| self.todolist_api.parse_update_todolist(resp));
        match result {
            Ok(()) => {
                self.dispatch(Action::TodolistTitleChanged {
                    id: id.to_string(),
                    title: title.to_string(),
                });
                self.succeed(op)
            }
            Err(err) => self.fail(op, &err),
        }
    }

    /// Local only; the filter never reaches the server.
    pub fn change_todolist_filter(&mut self, id: &str, filter: FilterValue) {
        self.dispatch(Action::TodolistFilterChanged {
            id: id.to_string(),
            filter,
        });
    }

    // ---------------------------------------------------------------------
    // Tasks
    // ---------------------------------------------------------------------

    pub fn fetch_tasks(&mut self, todolist_id: &str) -> Completion {
        let op = Operation::FetchTasks;
        self.begin(op);
        let request = self.todolist_api.build_get_tasks(todolist_id);
        let result = self
            .transport
            .execute(request)
            .and_then(|resp| self.todolist_api.parse_get_tasks(resp));
        match result {
            Ok(response) => {
                self.dispatch(Action::TasksFetched {
                    todolist_id: todolist_id.to_string(),
                    tasks: response.items,
                });
                self.succeed(op)
            }
            Err(err) => self.fail(op, &err),
        }
    }

    pub fn add_task(&mut self, todolist_id: &str, title: &str) -> Completion {
        let op = Operation::AddTask;
        self.begin(op);
        let result = self
            .todolist_api
            .build_create_task(todolist_id, title)
            .and_then(|req| self.transport.execute(req))
            .and_then(|resp| self.todolist_api.parse_create_task(resp));
        match result {
            Ok(task) => {
                self.dispatch(Action::TaskAdded(task));
                self.succeed(op)
            }
            Err(err) => self.fail(op, &err),
        }
    }

    pub fn remove_task(&mut self, todolist_id: &str, task_id: &str) -> Completion {
        let op = Operation::RemoveTask;
        self.begin(op);
        let request = self.todolist_api.build_delete_task(todolist_id, task_id);
        let result = self
            .transport
            .execute(request)
            .and_then(|resp| self.todolist_api.parse_delete_task(resp));
        match result {
            Ok(()) => {
                self.dispatch(Action::TaskRemoved {
                    todolist_id: todolist_id.to_string(),
                    task_id: task_id.to_string(),
                });
                self.succeed(op)
            }
            Err(err) => self.fail(op, &err),
        }
    }

    /// Send the held task with `model` overlaid, then patch only `model`'s
    /// fields locally. A task that is not held aborts before any request and
    /// leaves every store untouched.
    pub fn update_task(
        &mut self,
        todolist_id: &str,
        task_id: &str,
        model: UpdateDomainTaskModel,
    ) -> Completion {
        let Some(task) = self.state.tasks.find(todolist_id, task_id) else {
            warn!(todolist_id, task_id, "task not found in the state");
            return Completion::Rejected;
        };
        let full_model = model.merge_into(task);

        let op = Operation::UpdateTask;
        self.begin(op);
        let result = self
            .todolist_api
            .build_update_task(todolist_id, task_id, &full_model)
            .and_then(|req| self.transport.execute(req))
            .and_then(|resp| self.todolist_api.parse_update_task_result(resp));
        match result {
            Ok(()) => {
                self.dispatch(Action::TaskUpdated {
                    todolist_id: todolist_id.to_string(),
                    task_id: task_id.to_string(),
                    model,
                });
                self.succeed(op)
            }
            Err(err) => self.fail(op, &err),
        }
    }
}

impl<T> Dispatch for TodoApp<T> {
    fn dispatch(&mut self, action: Action) {
        self.state.apply(&action);
        if self.actions.len() == ACTION_LOG_CAPACITY {
            self.actions.pop_front();
        }
        self.actions.push_back(action);
    }
}
