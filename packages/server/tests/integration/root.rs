use std::time::Duration;

use sea_orm::{ConnectOptions, Database};
use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn root_returns_hello_world() {
    let app = TestApp::spawn().await;

    let res = app.get(routes::ROOT).await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body, json!({"message": "Hello World"}));
}

#[tokio::test]
async fn root_is_stable_across_requests() {
    let app = TestApp::spawn().await;

    for _ in 0..5 {
        let res = app.get(routes::ROOT).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body, json!({"message": "Hello World"}));
    }
}

#[tokio::test]
async fn root_does_not_need_the_database() {
    let mut opts = ConnectOptions::new("mysql://genred@127.0.0.1:1/genred_english");
    opts.connect_lazy(true)
        .connect_timeout(Duration::from_secs(1))
        .acquire_timeout(Duration::from_secs(1));
    let db = Database::connect(opts)
        .await
        .expect("lazy connect should not touch the network");
    let app = TestApp::spawn_with_db(db).await;

    let res = app.get(routes::ROOT).await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body, json!({"message": "Hello World"}));
}

#[tokio::test]
async fn unknown_route_returns_json_not_found() {
    let app = TestApp::spawn().await;

    let res = app.get("/no-such-route").await;

    assert_eq!(res.status, 404);
    assert_eq!(res.body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn openapi_document_lists_both_routes() {
    let app = TestApp::spawn().await;

    let res = app.get(routes::OPENAPI).await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert!(res.body["paths"]["/"]["get"].is_object());
    assert!(res.body["paths"]["/problems"]["get"].is_object());
}
