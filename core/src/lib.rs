//! Client-side state layer for the todolist service.
//!
//! # Overview
//! Holds todolists, tasks, session and request status on the client and keeps
//! them in step with the remote REST service. The UI dispatches intents into
//! [`TodoApp`] and reads back a [`State`] snapshot.
//!
//! # Design
//! - `TodolistApi` / `AuthApi` are stateless: `build_*` produces an
//!   `HttpRequest`, `parse_*` consumes an `HttpResponse`.
//! - A [`Transport`] executes requests; `UreqTransport` (default `ureq`
//!   feature) does it over HTTP, tests substitute a scripted fake.
//! - Stores only change through [`Action`]s. `TodoApp` broadcasts each action
//!   to every store, so the task buckets follow todolist creation and removal
//!   without the stores referencing each other.
//! - Failed calls never surface as `Err` from the service. They are
//!   classified into the app status store and the operation reports
//!   [`Completion::Rejected`].

pub mod action;
pub mod auth;
pub mod classify;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod http;
pub mod selectors;
pub mod service;
pub mod store;
pub mod transport;
pub mod types;

pub use action::{Action, Dispatch};
pub use auth::AuthApi;
pub use client::TodolistApi;
pub use config::ClientConfig;
pub use domain::{FilterValue, Operation, RequestStatus, TodolistDomain};
pub use error::{ApiError, ConfigError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use service::{Completion, TodoApp};
pub use store::State;
pub use transport::Transport;
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
pub use types::{
    Envelope, LoginParams, ResultCode, Task, TaskPriority, TaskStatus, Todolist,
    UpdateDomainTaskModel, UpdateTaskModel,
};
