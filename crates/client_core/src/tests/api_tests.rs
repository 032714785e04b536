use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::json;
use shared::domain::{Priority, TaskId, TaskStatus};
use shared::protocol::{CreateTaskRequest, TaskPatch};

use crate::api::TaskManagerClient;

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind loopback listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn get_all_tasks_accepts_a_bare_array() {
    let router = Router::new().route(
        "/api/tasks",
        get(|| async {
            Json(json!([
                { "id": 1, "title": "first", "status": "IN_PROGRESS", "priority": "HIGH" },
                { "id": 2, "taskName": "second" }
            ]))
        }),
    );
    let url = serve(router).await;

    let client = TaskManagerClient::new(url);
    let tasks = client.get_all_tasks().await.unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].status, TaskStatus::InProgress);
    assert_eq!(tasks[0].priority, Priority::High);
    assert_eq!(tasks[1].title, "second");
    assert_eq!(tasks[1].status, TaskStatus::Pending);
}

#[tokio::test]
async fn get_all_tasks_accepts_a_content_envelope() {
    let router = Router::new().route(
        "/api/tasks",
        get(|| async {
            Json(json!({
                "content": [ { "id": 9, "title": "wrapped", "dueDate": "2026-01-02" } ],
                "totalElements": 1
            }))
        }),
    );
    let url = serve(router).await;

    let client = TaskManagerClient::new(url);
    let tasks = client.get_all_tasks().await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, TaskId(9));
    assert!(tasks[0].due_date.is_some());
}

#[tokio::test]
async fn login_stores_the_bearer_token_for_later_calls() {
    let router = Router::new()
        .route(
            "/api/auth/login",
            post(|| async {
                Json(json!({
                    "user": { "id": 5, "username": "alice" },
                    "token": "tok-123"
                }))
            }),
        )
        .route(
            "/api/tasks",
            get(|headers: HeaderMap| async move {
                match headers.get("authorization").and_then(|v| v.to_str().ok()) {
                    Some("Bearer tok-123") => (StatusCode::OK, Json(json!([]))),
                    _ => (StatusCode::UNAUTHORIZED, Json(json!({"message": "no token"}))),
                }
            }),
        );
    let url = serve(router).await;

    let mut client = TaskManagerClient::new(url);
    assert!(!client.has_session());
    let response = client.login("alice", "hunter2").await.unwrap();
    assert_eq!(response.user.username, "alice");
    assert!(client.has_session());

    assert!(client.get_all_tasks().await.is_ok());

    client.logout();
    assert!(!client.has_session());
    let err = client.get_all_tasks().await.unwrap_err();
    assert!(err.to_string().contains("no token"), "got: {err}");
}

#[tokio::test]
async fn rejected_login_surfaces_the_server_message() {
    let router = Router::new().route(
        "/api/auth/login",
        post(|| async {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "Invalid credentials" })),
            )
        }),
    );
    let url = serve(router).await;

    let mut client = TaskManagerClient::new(url);
    let err = client.login("alice", "wrong").await.unwrap_err();
    let text = err.to_string();
    assert!(text.contains("Invalid credentials"), "got: {text}");
    assert!(!client.has_session());
}

#[tokio::test]
async fn create_update_delete_round_trip() {
    let deletes = Arc::new(AtomicUsize::new(0));
    let deletes_probe = Arc::clone(&deletes);

    let router = Router::new()
        .route(
            "/api/tasks",
            post(|Json(body): Json<serde_json::Value>| async move {
                assert_eq!(body["title"], "New task");
                Json(json!({
                    "id": 31,
                    "title": "New task",
                    "status": "PENDING",
                    "priority": "MEDIUM"
                }))
            }),
        )
        .route(
            "/api/tasks/:id",
            put(
                |Path(id): Path<i64>, Json(body): Json<serde_json::Value>| async move {
                    assert_eq!(body["status"], "COMPLETED");
                    Json(json!({ "id": id, "title": "New task", "status": "COMPLETED" }))
                },
            )
            .delete(
                |State(count): State<Arc<AtomicUsize>>, Path(_id): Path<i64>| async move {
                    count.fetch_add(1, Ordering::SeqCst);
                    StatusCode::NO_CONTENT
                },
            ),
        )
        .with_state(deletes_probe);
    let url = serve(router).await;

    let client = TaskManagerClient::new(url);
    let created = client
        .create_task(&CreateTaskRequest {
            title: "New task".to_string(),
            description: None,
            status: TaskStatus::Pending,
            priority: Priority::Medium,
            due_date: None,
        })
        .await
        .unwrap();
    assert_eq!(created.id, TaskId(31));

    let updated = client
        .update_task(
            created.id,
            &TaskPatch {
                status: Some(TaskStatus::Completed),
                ..TaskPatch::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, TaskStatus::Completed);

    client.delete_task(created.id).await.unwrap();
    assert_eq!(deletes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn deleting_a_missing_task_maps_to_a_not_found_error() {
    let router = Router::new().route(
        "/api/tasks/:id",
        delete(|| async { (StatusCode::NOT_FOUND, "no such task") }),
    );
    let url = serve(router).await;

    let client = TaskManagerClient::new(url);
    let err = client.delete_task(TaskId(404)).await.unwrap_err();
    assert!(err.to_string().contains("no such task"));
}
