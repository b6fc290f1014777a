use actix_web::http::StatusCode;
use actix_web::{App, test};
use serde_json::Value;

use api_server::configure_app;
use api_server::observability::{REQUEST_ID_HEADER, RequestIdMiddleware};

use crate::helpers::{SEED_COUNT, TestApp};

#[actix_rt::test]
async fn health_check_reports_store_size() {
    let ctx = TestApp::spawn().await;
    let app = test::init_service(App::new().configure(configure_app(ctx.state()))).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["posts"], SEED_COUNT as u64);
}

#[actix_rt::test]
async fn request_id_is_echoed_or_generated() {
    let ctx = TestApp::spawn().await;
    let app = test::init_service(
        App::new()
            .wrap(RequestIdMiddleware)
            .configure(configure_app(ctx.state())),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/posts")
        .insert_header((REQUEST_ID_HEADER, "abc-123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.headers().get(REQUEST_ID_HEADER).unwrap(), "abc-123");

    let req = test::TestRequest::get().uri("/posts").to_request();
    let resp = test::call_service(&app, req).await;
    let generated = resp
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(uuid::Uuid::parse_str(generated).is_ok());
}

#[actix_rt::test]
async fn problem_bodies_carry_the_request_id() {
    let ctx = TestApp::spawn().await;
    let app = test::init_service(
        App::new()
            .wrap(RequestIdMiddleware)
            .configure(configure_app(ctx.state())),
    )
    .await;

    let unknown = format!("/posts/{}", uuid::Uuid::new_v4());
    for uri in [unknown.as_str(), "/posts/not-a-uuid"] {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header((REQUEST_ID_HEADER, "abc-123"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(resp.headers().get(REQUEST_ID_HEADER).unwrap(), "abc-123");

        let problem: Value = test::read_body_json(resp).await;
        assert_eq!(problem["status"], 404);
        assert_eq!(problem["request_id"], "abc-123");
        assert_eq!(problem["instance"], uri);
    }

    // Successful responses are left untouched.
    let req = test::TestRequest::get()
        .uri("/posts")
        .insert_header((REQUEST_ID_HEADER, "abc-123"))
        .to_request();
    let posts: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(posts.as_array().map(Vec::len), Some(SEED_COUNT));
}
