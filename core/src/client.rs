//! Stateless request builder and response parser for the todolist API.
//!
//! # Design
//! `TodolistApi` holds only a `base_url`. Each remote operation is split into
//! a `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`. The caller executes the round-trip,
//! usually through a [`Transport`](crate::transport::Transport).
//!
//! Apart from the two list endpoints, every response is an [`Envelope`]; a
//! non-zero result code becomes [`ApiError::Business`].

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    Envelope, GetTasksResponse, ItemData, ResultCode, Task, TitleBody, Todolist, UpdateTaskModel,
};

/// Client for the `todo-lists` resource and its nested tasks.
#[derive(Debug, Clone)]
pub struct TodolistApi {
    base_url: String,
}

impl TodolistApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/todo-lists{path}", self.base_url)
    }

    pub fn build_get_todolists(&self) -> HttpRequest {
        HttpRequest::empty(HttpMethod::Get, self.url(""))
    }

    pub fn build_create_todolist(&self, title: &str) -> Result<HttpRequest, ApiError> {
        let body = to_json(&TitleBody { title: title.to_string() })?;
        Ok(HttpRequest::json(HttpMethod::Post, self.url(""), body))
    }

    pub fn build_update_todolist(&self, id: &str, title: &str) -> Result<HttpRequest, ApiError> {
        let body = to_json(&TitleBody { title: title.to_string() })?;
        Ok(HttpRequest::json(HttpMethod::Put, self.url(&format!("/{id}")), body))
    }

    pub fn build_delete_todolist(&self, id: &str) -> HttpRequest {
        HttpRequest::empty(HttpMethod::Delete, self.url(&format!("/{id}")))
    }

    pub fn build_get_tasks(&self, todolist_id: &str) -> HttpRequest {
        HttpRequest::empty(HttpMethod::Get, self.url(&format!("/{todolist_id}/tasks")))
    }

    pub fn build_create_task(&self, todolist_id: &str, title: &str) -> Result<HttpRequest, ApiError> {
        let body = to_json(&TitleBody { title: title.to_string() })?;
        Ok(HttpRequest::json(
            HttpMethod::Post,
            self.url(&format!("/{todolist_id}/tasks")),
            body,
        ))
    }

    pub fn build_update_task(
        &self,
        todolist_id: &str,
        task_id: &str,
        model: &UpdateTaskModel,
    ) -> Result<HttpRequest, ApiError> {
        let body = to_json(model)?;
        Ok(HttpRequest::json(
            HttpMethod::Put,
            self.url(&format!("/{todolist_id}/tasks/{task_id}")),
            body,
        ))
    }

    pub fn build_delete_task(&self, todolist_id: &str, task_id: &str) -> HttpRequest {
        HttpRequest::empty(
            HttpMethod::Delete,
            self.url(&format!("/{todolist_id}/tasks/{task_id}")),
        )
    }

    pub fn parse_get_todolists(&self, response: HttpResponse) -> Result<Vec<Todolist>, ApiError> {
        decode(response)
    }

    pub fn parse_create_todolist(&self, response: HttpResponse) -> Result<Todolist, ApiError> {
        let data: ItemData<Todolist> = parse_envelope(response)?.into_data()?;
        Ok(data.item)
    }

    pub fn parse_update_todolist(&self, response: HttpResponse) -> Result<(), ApiError> {
        parse_envelope(response)?.into_success().map(drop)
    }

    pub fn parse_delete_todolist(&self, response: HttpResponse) -> Result<(), ApiError> {
        parse_envelope(response)?.into_success().map(drop)
    }

    /// A non-null `error` field is reported as a business failure.
    pub fn parse_get_tasks(&self, response: HttpResponse) -> Result<GetTasksResponse, ApiError> {
        let tasks: GetTasksResponse = decode(response)?;
        match tasks.error {
            Some(message) => Err(ApiError::Business {
                result_code: ResultCode::Error,
                messages: vec![message],
            }),
            None => Ok(tasks),
        }
    }

    pub fn parse_create_task(&self, response: HttpResponse) -> Result<Task, ApiError> {
        let data: ItemData<Task> = parse_envelope(response)?.into_data()?;
        Ok(data.item)
    }

    pub fn parse_update_task(&self, response: HttpResponse) -> Result<Task, ApiError> {
        parse_envelope(response)?.into_data()
    }

    /// Check only the result code of an update. The shape of `data` varies
    /// between service versions and the client patches locally anyway.
    pub fn parse_update_task_result(&self, response: HttpResponse) -> Result<(), ApiError> {
        parse_envelope(response)?.into_success().map(drop)
    }

    pub fn parse_delete_task(&self, response: HttpResponse) -> Result<(), ApiError> {
        parse_envelope(response)?.into_success().map(drop)
    }
}

pub(crate) fn to_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::SerializationError(e.to_string()))
}

/// Reject non-2xx responses, then decode the body as `T`.
pub(crate) fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

pub(crate) fn parse_envelope(response: HttpResponse) -> Result<Envelope, ApiError> {
    decode(response)
}

fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
