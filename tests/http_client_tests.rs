//! `HttpTodoApi` against a wiremock server and against the real router.

use serde_json::json;
use wiremock::{
    matchers::{body_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

use todos::client::{HttpTodoApi, TodoApi, TodoController};
use todos::todos::dto::{CreateTodoRequest, DeleteTodoRequest, ToggleTodoRequest, UpdateTodoRequest};
use todos::{app::build_app, state::AppState};

fn todo_json(id: i64, completed: bool) -> serde_json::Value {
    json!({
        "id": id,
        "title": "Buy milk",
        "description": null,
        "completed": completed,
        "created_at": "2024-06-01T12:00:00Z",
        "updated_at": "2024-06-01T12:00:00Z"
    })
}

#[tokio::test]
async fn get_todos_parses_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/rpc/getTodos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([todo_json(1, false)])))
        .mount(&server)
        .await;

    let api = HttpTodoApi::new(&server.uri());
    let todos = api.get_todos().await.unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].title, "Buy milk");
    assert_eq!(todos[0].description, None);
}

#[tokio::test]
async fn create_sends_null_description() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/rpc/createTodo"))
        .and(body_json(json!({"title": "Buy milk", "description": null})))
        .respond_with(ResponseTemplate::new(200).set_body_json(todo_json(1, false)))
        .expect(1)
        .mount(&server)
        .await;

    let api = HttpTodoApi::new(&server.uri());
    let todo = api
        .create_todo(CreateTodoRequest {
            title: "Buy milk".into(),
            description: None,
        })
        .await
        .unwrap();
    assert_eq!(todo.id, 1);
}

#[tokio::test]
async fn update_omits_unset_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/rpc/updateTodo"))
        .and(body_json(json!({"id": 1, "completed": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(todo_json(1, true)))
        .expect(1)
        .mount(&server)
        .await;

    let api = HttpTodoApi::new(&server.uri());
    let todo = api
        .update_todo(UpdateTodoRequest {
            id: 1,
            completed: Some(true),
            ..UpdateTodoRequest::default()
        })
        .await
        .unwrap();
    assert!(todo.completed);
}

#[tokio::test]
async fn not_found_error_body_is_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/rpc/toggleTodo"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"code": "NOT_FOUND", "message": "todo 9 not found"}
        })))
        .mount(&server)
        .await;

    let api = HttpTodoApi::new(&server.uri());
    let err = api
        .toggle_todo(ToggleTodoRequest {
            id: 9,
            completed: true,
        })
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("todo 9 not found"));
}

#[tokio::test]
async fn non_json_error_still_maps_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/rpc/deleteTodo"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let api = HttpTodoApi::new(&server.uri());
    let err = api.delete_todo(DeleteTodoRequest { id: 1 }).await.unwrap_err();
    assert!(matches!(
        err,
        todos::client::ClientError::Api { status: 502, .. }
    ));
}

#[tokio::test]
async fn unreachable_server_is_a_connectivity_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = HttpTodoApi::new(&format!("http://{addr}"));
    let err = api.get_todos().await.unwrap_err();
    assert!(matches!(err, todos::client::ClientError::Connectivity(_)));
}

#[tokio::test]
async fn controller_against_running_server() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = build_app(AppState::fake());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let mut ctrl = TodoController::new(HttpTodoApi::new(&format!("http://{addr}")));
    assert!(ctrl.refresh().await);
    assert!(ctrl.state().todos.is_empty());

    ctrl.set_form("Buy milk", "2 litres");
    assert!(ctrl.submit_create().await);
    let id = ctrl.state().todos[0].id;
    assert_eq!(ctrl.state().todos[0].description.as_deref(), Some("2 litres"));

    assert!(ctrl.toggle(id).await);
    assert!(ctrl.state().get(id).unwrap().completed);

    assert!(ctrl.delete(id).await);
    assert!(ctrl.state().todos.is_empty());

    assert!(ctrl.refresh().await);
    assert!(ctrl.state().todos.is_empty());
}
