//! Full session against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives every synchronized
//! operation of `TodoApp` over real HTTP through `UreqTransport`. Validates
//! request building, response parsing and store updates end to end.

use todolist_core::{
    ClientConfig, Completion, FilterValue, LoginParams, RequestStatus, TaskStatus, TodoApp,
    UpdateDomainTaskModel,
};

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

#[test]
fn full_session() {
    let base_url = start_server();
    let config = ClientConfig::new(&base_url).with_api_key("test-key");
    let mut app = TodoApp::connect(&config);

    // Step 1: no session yet.
    assert!(app.initialize_app().is_fulfilled());
    assert!(app.state().app.is_initialized);
    assert!(!app.state().auth.is_logged_in);

    // Step 2: log in.
    let params = LoginParams {
        email: mock_server::DEMO_EMAIL.to_string(),
        password: mock_server::DEMO_PASSWORD.to_string(),
        remember_me: true,
        captcha: None,
    };
    assert!(app.login(&params).is_fulfilled());
    assert!(app.state().auth.is_logged_in);

    // Step 3: empty server.
    assert!(app.fetch_todolists().is_fulfilled());
    assert!(app.state().todolists.is_empty());

    // Step 4: create a todolist.
    assert!(app.add_todolist("Groceries").is_fulfilled());
    let id = app.state().todolists.items()[0].id().to_string();
    assert_eq!(app.state().tasks.tasks(&id), Some(&[][..]));

    // Step 5: rejected title leaves the store alone.
    assert_eq!(app.add_todolist(&"x".repeat(101)), Completion::Rejected);
    assert_eq!(app.state().todolists.len(), 1);
    assert_eq!(app.state().app.status, RequestStatus::Failed);
    assert!(app.state().app.error.is_some());

    // Step 6: tasks.
    assert!(app.add_task(&id, "Milk").is_fulfilled());
    assert!(app.add_task(&id, "Bread").is_fulfilled());
    let task_id = app.state().tasks.tasks(&id).unwrap()[1].id.clone();
    assert!(app
        .update_task(&id, &task_id, UpdateDomainTaskModel::status(TaskStatus::Completed))
        .is_fulfilled());

    // Step 7: a fresh fetch agrees with what the client committed.
    assert!(app.fetch_todolists().is_fulfilled());
    assert!(app.fetch_tasks(&id).is_fulfilled());
    let tasks = app.state().tasks.tasks(&id).unwrap();
    let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Bread", "Milk"]);
    assert_eq!(tasks[1].status, TaskStatus::Completed);

    // Step 8: rename, filter, remove a task.
    assert!(app.change_todolist_title(&id, "Shopping").is_fulfilled());
    app.change_todolist_filter(&id, FilterValue::Completed);
    let visible = todolist_core::selectors::tasks_for_todolist(app.state(), &id);
    assert_eq!(visible.len(), 1);
    assert!(app.remove_task(&id, &task_id).is_fulfilled());
    assert_eq!(app.state().tasks.tasks(&id).unwrap().len(), 1);

    // Step 9: remove the todolist.
    assert!(app.remove_todolist(&id).is_fulfilled());
    assert!(app.state().todolists.is_empty());
    assert!(!app.state().tasks.contains_key(&id));

    // Step 10: session survives a new client, then logout clears everything.
    let mut other = TodoApp::connect(&config);
    assert!(other.initialize_app().is_fulfilled());
    assert!(other.state().auth.is_logged_in);

    assert!(app.add_todolist("Leftover").is_fulfilled());
    assert!(app.logout().is_fulfilled());
    assert!(!app.state().auth.is_logged_in);
    assert!(app.state().todolists.is_empty());
    assert!(app.state().is_consistent());
}

#[test]
fn unreachable_server_is_a_network_error() {
    // Bind then drop to get a port nothing listens on.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let mut app = TodoApp::connect(&ClientConfig::new(&format!("http://127.0.0.1:{port}")));

    assert_eq!(app.fetch_todolists(), Completion::Rejected);
    assert_eq!(app.state().app.status, RequestStatus::Failed);
    assert!(!app.state().app.error.as_deref().unwrap_or_default().is_empty());
}
