use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};
use wiremock::{
    matchers::{any, body_json, method, path},
    Mock, ResponseTemplate,
};

use crate::helpers::{assert_cors_headers, TestApp, SUBSCRIPTIONS_PATH};

#[tokio::test]
async fn api_subscribe_ok() -> Result<()> {
    let app = TestApp::spawn_registrar(false).await?;

    Mock::given(path(SUBSCRIPTIONS_PATH))
        .and(method("POST"))
        .and(body_json(json!({"Protocol": "email", "Endpoint": "a@b.com"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.notifier_server)
        .await;

    let res = app.post_subscriptions(&json!({"email": "a@b.com"})).await?;

    assert_eq!(
        res.status(),
        StatusCode::OK,
        "Wrong response StatusCode: {}",
        res.status()
    );
    assert_cors_headers(&res);
    assert_eq!(
        json!({"message": "Subscription successful!"}),
        res.json::<Value>().await?
    );

    Ok(())
}

#[tokio::test]
async fn api_subscribe_missing_email_is_400() -> Result<()> {
    let app = TestApp::spawn_registrar(false).await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.notifier_server)
        .await;

    let tests = [
        (json!({"name": "John Doe"}), "Missing email"),
        (json!({"email": null}), "Null email"),
        (json!({"email": ""}), "Empty email"),
        (json!({}), "Empty json"),
    ];

    for (json_request, params) in tests {
        let res = app.post_subscriptions(&json_request).await?;
        assert_eq!(
            res.status(),
            StatusCode::BAD_REQUEST,
            "Wrong response: ({}), Expected: ({}); for request with: {params}",
            res.status(),
            StatusCode::BAD_REQUEST
        );
        assert_cors_headers(&res);
        assert_eq!(
            json!({"error": "Email not provided"}),
            res.json::<Value>().await?
        );
    }

    Ok(())
}

#[tokio::test]
async fn api_subscribe_preflight_skips_registration() -> Result<()> {
    let app = TestApp::spawn_registrar(false).await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.notifier_server)
        .await;

    let res = app.preflight("/api/subscribe").await?;

    assert_eq!(res.status(), StatusCode::OK);
    assert_cors_headers(&res);
    assert_eq!(json!({"message": "CORS preflight"}), res.json::<Value>().await?);

    Ok(())
}

#[tokio::test]
async fn api_subscribe_notifier_rejection_is_500() -> Result<()> {
    let app = TestApp::spawn_registrar(false).await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(400))
        .expect(1)
        .mount(&app.notifier_server)
        .await;

    let res = app.post_subscriptions(&json!({"email": "not-an-email"})).await?;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors_headers(&res);
    assert_eq!(json!({"error": "Internal server error"}), res.json::<Value>().await?);

    Ok(())
}
