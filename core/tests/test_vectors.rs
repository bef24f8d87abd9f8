//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results or errors. Comparing parsed JSON (not raw
//! strings) avoids false negatives from field-ordering differences.

use serde_json::Value;
use todolist_core::{
    ApiError, HttpMethod, HttpRequest, HttpResponse, Todolist, TodolistApi, Task, UpdateTaskModel,
};

const BASE_URL: &str = "http://localhost:3000";

fn client() -> TodolistApi {
    TodolistApi::new(BASE_URL)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn check_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.url, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: url");

    match expected.get("headers") {
        Some(headers) => {
            let expected_headers: Vec<(String, String)> = headers
                .as_array()
                .unwrap()
                .iter()
                .map(|h| {
                    let arr = h.as_array().unwrap();
                    (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
                })
                .collect();
            assert_eq!(req.headers, expected_headers, "{name}: headers");
        }
        None => assert!(req.headers.is_empty(), "{name}: headers should be empty"),
    }

    match expected.get("body") {
        Some(body) => {
            let req_body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&req_body, body, "{name}: body");
        }
        None => assert!(req.body.is_none(), "{name}: body should be None"),
    }
}

fn simulated(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

fn check_error(name: &str, err: ApiError, expected: &Value) {
    match expected["kind"].as_str().unwrap() {
        "Business" => assert!(matches!(err, ApiError::Business { .. }), "{name}: expected Business"),
        "Http" => assert!(matches!(err, ApiError::HttpError { .. }), "{name}: expected HttpError"),
        other => panic!("{name}: unknown expected_error kind: {other}"),
    }
    assert_eq!(err.to_string(), expected["message"].as_str().unwrap(), "{name}: message");
}

// ---------------------------------------------------------------------------
// Create todolist
// ---------------------------------------------------------------------------

#[test]
fn create_todolist_test_vectors() {
    let raw = include_str!("../../test-vectors/create_todolist.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let title = case["input"]["title"].as_str().unwrap();

        let req = c.build_create_todolist(title).unwrap();
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_create_todolist(simulated(case));
        if let Some(expected_error) = case.get("expected_error") {
            check_error(name, result.unwrap_err(), expected_error);
        } else {
            let expected: Todolist = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// List todolists
// ---------------------------------------------------------------------------

#[test]
fn get_todolists_test_vectors() {
    let raw = include_str!("../../test-vectors/get_todolists.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();

        let req = c.build_get_todolists();
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_get_todolists(simulated(case));
        if let Some(expected_error) = case.get("expected_error") {
            check_error(name, result.unwrap_err(), expected_error);
        } else {
            let expected: Vec<Todolist> =
                serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Update task
// ---------------------------------------------------------------------------

#[test]
fn update_task_test_vectors() {
    let raw = include_str!("../../test-vectors/update_task.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let todolist_id = case["todolist_id"].as_str().unwrap();
        let task_id = case["task_id"].as_str().unwrap();
        let input: UpdateTaskModel = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_update_task(todolist_id, task_id, &input).unwrap();
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_update_task(simulated(case));
        if let Some(expected_error) = case.get("expected_error") {
            check_error(name, result.unwrap_err(), expected_error);
        } else {
            let expected: Task = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_test_vectors() {
    let raw = include_str!("../../test-vectors/delete.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let todolist_id = case["todolist_id"].as_str().unwrap();

        let (req, result) = match case.get("task_id").and_then(Value::as_str) {
            Some(task_id) => {
                let req = c.build_delete_task(todolist_id, task_id);
                (req, c.parse_delete_task(simulated(case)))
            }
            None => {
                let req = c.build_delete_todolist(todolist_id);
                (req, c.parse_delete_todolist(simulated(case)))
            }
        };
        check_request(name, &req, &case["expected_request"]);

        if let Some(expected_error) = case.get("expected_error") {
            check_error(name, result.unwrap_err(), expected_error);
        } else {
            assert!(result.is_ok(), "{name}: expected success");
        }
    }
}
