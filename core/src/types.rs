//! Wire DTOs for the todolist REST service.
//!
//! # Design
//! Field names follow the service's camelCase JSON. Task status and priority
//! travel as integers. Timestamps stay opaque strings: the client only stores
//! and echoes them back, it never does arithmetic on them.
//!
//! The mock server defines its own copies of these shapes; integration tests
//! catch drift between the two crates.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

/// A todolist as returned by the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todolist {
    pub id: String,
    pub title: String,
    pub added_date: String,
    pub order: i64,
}

/// Unknown integers are kept as `Other` so one odd task does not fail a
/// whole fetch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "u8", into = "u8")]
pub enum TaskStatus {
    New,
    InProgress,
    Completed,
    Draft,
    Other(u8),
}

impl From<u8> for TaskStatus {
    fn from(value: u8) -> Self {
        match value {
            0 => TaskStatus::New,
            1 => TaskStatus::InProgress,
            2 => TaskStatus::Completed,
            3 => TaskStatus::Draft,
            other => TaskStatus::Other(other),
        }
    }
}

impl From<TaskStatus> for u8 {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::New => 0,
            TaskStatus::InProgress => 1,
            TaskStatus::Completed => 2,
            TaskStatus::Draft => 3,
            TaskStatus::Other(other) => other,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "u8", into = "u8")]
pub enum TaskPriority {
    Low,
    Middle,
    High,
    Urgent,
    Later,
    Other(u8),
}

impl From<u8> for TaskPriority {
    fn from(value: u8) -> Self {
        match value {
            0 => TaskPriority::Low,
            1 => TaskPriority::Middle,
            2 => TaskPriority::High,
            3 => TaskPriority::Urgent,
            4 => TaskPriority::Later,
            other => TaskPriority::Other(other),
        }
    }
}

impl From<TaskPriority> for u8 {
    fn from(priority: TaskPriority) -> Self {
        match priority {
            TaskPriority::Low => 0,
            TaskPriority::Middle => 1,
            TaskPriority::High => 2,
            TaskPriority::Urgent => 3,
            TaskPriority::Later => 4,
            TaskPriority::Other(other) => other,
        }
    }
}

/// A task as returned by the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub todo_list_id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub start_date: Option<String>,
    pub deadline: Option<String>,
    pub order: i64,
    pub added_date: String,
}

/// Full body of `PUT /todo-lists/{id}/tasks/{taskId}`. The service replaces
/// every field, so the client always sends all of them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskModel {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub start_date: Option<String>,
    pub deadline: Option<String>,
}

/// The subset of task fields a caller may change. Absent fields keep their
/// current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDomainTaskModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
}

impl UpdateDomainTaskModel {
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Overlay these fields onto `task`'s current values to form the full
    /// update body.
    pub fn merge_into(&self, task: &Task) -> UpdateTaskModel {
        UpdateTaskModel {
            title: self.title.clone().unwrap_or_else(|| task.title.clone()),
            description: self.description.clone().or_else(|| task.description.clone()),
            status: self.status.unwrap_or(task.status),
            priority: self.priority.unwrap_or(task.priority),
            start_date: self.start_date.clone().or_else(|| task.start_date.clone()),
            deadline: self.deadline.clone().or_else(|| task.deadline.clone()),
        }
    }

    /// Write only the present fields into `task`.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = Some(description.clone());
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(start_date) = &self.start_date {
            task.start_date = Some(start_date.clone());
        }
        if let Some(deadline) = &self.deadline {
            task.deadline = Some(deadline.clone());
        }
    }
}

/// Body for creating a todolist, creating a task, or renaming a todolist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TitleBody {
    pub title: String,
}

/// `data` payload of a create call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemData<T> {
    pub item: T,
}

/// Response of `GET /todo-lists/{id}/tasks`. Not wrapped in an envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GetTasksResponse {
    pub items: Vec<Task>,
    pub total_count: u64,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoginParams {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captcha: Option<String>,
}

/// `data` payload of `GET /auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MeData {
    pub id: i64,
    pub email: String,
    pub login: String,
}

/// `data` payload of `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub user_id: i64,
}

/// Result code carried by every envelope. Zero is success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum ResultCode {
    Success,
    Error,
    Captcha,
    Other(i32),
}

impl From<i32> for ResultCode {
    fn from(code: i32) -> Self {
        match code {
            0 => ResultCode::Success,
            1 => ResultCode::Error,
            10 => ResultCode::Captcha,
            other => ResultCode::Other(other),
        }
    }
}

impl From<ResultCode> for i32 {
    fn from(code: ResultCode) -> Self {
        match code {
            ResultCode::Success => 0,
            ResultCode::Error => 1,
            ResultCode::Captcha => 10,
            ResultCode::Other(other) => other,
        }
    }
}

/// The service's uniform response wrapper.
///
/// `data` is decoded lazily: failed envelopes usually carry `{}` there, which
/// would not deserialize into the success payload type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub result_code: ResultCode,
    #[serde(default)]
    pub messages: Vec<String>,
    #[serde(default)]
    pub data: Value,
}

impl Envelope {
    /// Turn a non-success result code into [`ApiError::Business`].
    pub fn into_success(self) -> Result<Value, ApiError> {
        match self.result_code {
            ResultCode::Success => Ok(self.data),
            result_code => Err(ApiError::Business {
                result_code,
                messages: self.messages,
            }),
        }
    }

    /// Decode `data` into `T` after checking the result code.
    pub fn into_data<T: serde::de::DeserializeOwned>(self) -> Result<T, ApiError> {
        let data = self.into_success()?;
        serde_json::from_value(data).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }
}
