//! One end-to-end pass over the HTTP surface.

use bazaar::server::router;
use serde_json::{Value, json};

use crate::helpers::{register, test_app};

/// Serves the app on an ephemeral port, returning its base URL.
async fn spawn_server() -> (String, crate::helpers::TestApp) {
    let app = test_app();
    let service = router(app.state.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, service).await.expect("server runs");
    });
    (format!("http://{addr}"), app)
}

#[tokio::test]
async fn health_reports_ok() {
    let (base, _app) = spawn_server().await;
    let body: Value = reqwest::get(format!("{base}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn login_and_fetch_me() {
    let (base, app) = spawn_server().await;
    register(&app, "http@example.com");

    let client = reqwest::Client::new();
    let session: Value = client
        .post(format!("{base}/api/auth/login"))
        .json(&json!({ "email": "http@example.com", "password": "correct horse" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let token = session["token"].as_str().expect("token issued");

    let me: Value = client
        .get(format!("{base}/api/users/me"))
        .bearer_auth(token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(me["email"], "http@example.com");
    assert_eq!(me["profile"]["firstName"], "Test");
}

#[tokio::test]
async fn wrong_password_maps_to_401() {
    let (base, app) = spawn_server().await;
    register(&app, "status@example.com");

    let client = reqwest::Client::new();
    let response = client
        .post(format!("{base}/api/auth/login"))
        .json(&json!({ "email": "status@example.com", "password": "nope" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["statusCode"], 401);
    assert_eq!(body["error"], "auth");
}

#[tokio::test]
async fn missing_bearer_token_maps_to_401() {
    let (base, _app) = spawn_server().await;
    let response = reqwest::get(format!("{base}/api/users/me")).await.unwrap();
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn unknown_product_maps_to_404() {
    let (base, _app) = spawn_server().await;
    let response = reqwest::get(format!("{base}/api/products/nope"))
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn category_update_merges_over_http() {
    let (base, app) = spawn_server().await;
    let admin = crate::helpers::register_admin(&app, "cat-admin@example.com");

    let client = reqwest::Client::new();
    let session: Value = client
        .post(format!("{base}/api/auth/login"))
        .json(&json!({ "email": "cat-admin@example.com", "password": "correct horse" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let token = session["token"].as_str().unwrap();

    let created: Value = client
        .post(format!("{base}/api/categories"))
        .bearer_auth(token)
        .json(&json!({
            "name": "Gadgets",
            "image": { "uri": "https://cdn.example/g.png", "mimetype": "image/png" }
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = created["_id"].as_str().unwrap();

    // Patch only the name; the image must survive the merge.
    let updated: Value = client
        .put(format!("{base}/api/categories/{id}"))
        .bearer_auth(token)
        .json(&json!({ "name": "Gizmos" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated["name"], "Gizmos");
    assert_eq!(updated["image"]["uri"], "https://cdn.example/g.png");
    assert_eq!(updated["uBy"], admin);
}
