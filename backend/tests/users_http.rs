//! End-to-end CRUD behaviour over HTTP with the in-memory user store.
//!
//! The app is assembled from the public library pieces the way the binary
//! wires them: CORS outermost, then the trace middleware, then the routes.

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web::{App, test, web};
use rstest::rstest;
use serde_json::{Value, json};
use user_service::Trace;
use user_service::domain::TRACE_ID_HEADER;
use user_service::inbound::http::state::HttpState;
use user_service::inbound::http::users::configure;
use user_service::outbound::memory::InMemoryUserRepository;

async fn app() -> impl Service<
    actix_http::Request,
    Response = ServiceResponse<impl MessageBody>,
    Error = actix_web::Error,
> {
    let state = HttpState::from_repository(Arc::new(InMemoryUserRepository::new()));
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure)
            .wrap(Trace)
            .wrap(Cors::permissive()),
    )
    .await
}

async fn send<S, B>(app: &S, request: test::TestRequest) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status();
    let body = test::read_body(response).await;
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, value)
}

fn create(name: &str, email: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/flask/users")
        .set_json(json!({ "name": name, "email": email }))
}

#[rstest]
#[actix_web::test]
async fn full_lifecycle() {
    let app = app().await;

    let (status, created) = send(&app, create("Ada", "ada@example.com")).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().expect("integer id");
    assert!(id > 0);

    let uri = format!("/api/flask/users/{id}");
    let (status, fetched) = send(&app, test::TestRequest::get().uri(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["user"], created);

    let (status, updated) = send(
        &app,
        test::TestRequest::put()
            .uri(&uri)
            .set_json(json!({ "name": "Ada L", "email": "lovelace@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated, json!({ "message": "User updated." }));

    let (_, fetched) = send(&app, test::TestRequest::get().uri(&uri)).await;
    assert_eq!(
        fetched["user"],
        json!({ "id": id, "name": "Ada L", "email": "lovelace@example.com" })
    );

    let (status, deleted) = send(&app, test::TestRequest::delete().uri(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!({ "message": "User deleted." }));

    let (status, missing) = send(&app, test::TestRequest::get().uri(&uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(missing["message"], "User not found!");

    let (status, _) = send(&app, test::TestRequest::delete().uri(&uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn list_returns_every_created_user() {
    let app = app().await;
    let mut expected = Vec::new();
    for n in 0..3 {
        let request = create(&format!("user{n}"), &format!("user{n}@example.com"));
        let (_, user) = send(&app, request).await;
        expected.push(user);
    }

    let (status, listed) = send(&app, test::TestRequest::get().uri("/api/flask/users")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, Value::Array(expected));
}

#[rstest]
#[case(json!({ "name": "Ada", "email": "second@example.com" }))]
#[case(json!({ "name": "Second", "email": "ada@example.com" }))]
#[actix_web::test]
async fn duplicates_are_rejected_with_conflict(#[case] duplicate: Value) {
    let app = app().await;
    send(&app, create("Ada", "ada@example.com")).await;

    let (status, body) = send(
        &app,
        test::TestRequest::post()
            .uri("/api/flask/users")
            .set_json(duplicate),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "conflict");
    let (_, listed) = send(&app, test::TestRequest::get().uri("/api/flask/users")).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
}

#[rstest]
#[actix_web::test]
async fn update_leaves_other_users_untouched() {
    let app = app().await;
    let (_, ada) = send(&app, create("Ada", "ada@example.com")).await;
    let (_, bob) = send(&app, create("Bob", "bob@example.com")).await;

    send(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/flask/users/{}", ada["id"]))
            .set_json(json!({ "name": "Ada L", "email": "ada@example.com" })),
    )
    .await;

    let (_, fetched) = send(
        &app,
        test::TestRequest::get().uri(&format!("/api/flask/users/{}", bob["id"])),
    )
    .await;
    assert_eq!(fetched["user"], bob);
}

#[rstest]
#[actix_web::test]
async fn update_of_unknown_user_is_not_found() {
    let app = app().await;

    let (status, body) = send(
        &app,
        test::TestRequest::put()
            .uri("/api/flask/users/99")
            .set_json(json!({ "name": "Ghost", "email": "ghost@example.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[rstest]
#[actix_web::test]
async fn error_bodies_echo_the_trace_header() {
    let app = app().await;

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/flask/users/abc")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let header_value = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace-id header");
    let body: Value = serde_json::from_slice(&test::read_body(response).await).expect("JSON");
    assert_eq!(body["traceId"], header_value.as_str());
}

#[rstest]
#[actix_web::test]
async fn any_origin_is_allowed() {
    let app = app().await;

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/test")
            .insert_header((header::ORIGIN, "http://localhost:3000"))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok()),
        Some("http://localhost:3000")
    );
}
