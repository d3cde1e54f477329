use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};
use wiremock::{
    matchers::{any, body_json, header, method, path},
    Mock, ResponseTemplate,
};

use crate::helpers::{assert_cors_headers, TestApp, EVENTS_OBJECT_PATH, MESSAGES_PATH};

fn launch() -> Value {
    json!({"title": "Launch", "description": "Kickoff", "date": "2024-01-01"})
}

#[tokio::test]
async fn first_event_creates_log_and_publishes() -> Result<()> {
    let app = TestApp::spawn_announcer(false).await?;

    Mock::given(method("GET"))
        .and(path(EVENTS_OBJECT_PATH))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&app.store_server)
        .await;
    Mock::given(method("PUT"))
        .and(path(EVENTS_OBJECT_PATH))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!([launch()])))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.store_server)
        .await;
    Mock::given(method("POST"))
        .and(path(MESSAGES_PATH))
        .and(body_json(json!({
            "Subject": "New Event Announcement",
            "Message": "New Event Created: Launch\nDescription: Kickoff",
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.notifier_server)
        .await;

    let res = app.post_events(&launch()).await?;

    assert_eq!(
        res.status(),
        StatusCode::OK,
        "Wrong response StatusCode: {}",
        res.status()
    );
    assert_cors_headers(&res);
    assert_eq!(
        json!({"message": "Event created successfully!"}),
        res.json::<Value>().await?
    );

    Ok(())
}

#[tokio::test]
async fn event_is_appended_to_stored_log() -> Result<()> {
    let app = TestApp::spawn_announcer(false).await?;
    let earlier = json!({"title": "Kickoff", "description": "Day one", "date": "2023-12-01"});

    Mock::given(method("GET"))
        .and(path(EVENTS_OBJECT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([earlier])))
        .expect(1)
        .mount(&app.store_server)
        .await;
    Mock::given(method("PUT"))
        .and(path(EVENTS_OBJECT_PATH))
        .and(body_json(json!([earlier, launch()])))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.store_server)
        .await;
    Mock::given(path(MESSAGES_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.notifier_server)
        .await;

    let res = app.post_events(&launch()).await?;
    assert_eq!(res.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn event_with_missing_fields_is_400_and_touches_nothing() -> Result<()> {
    let app = TestApp::spawn_announcer(false).await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.store_server)
        .await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.notifier_server)
        .await;

    let cases = [
        (json!({"description": "Kickoff", "date": "2024-01-01"}), "Missing title"),
        (json!({"title": "Launch", "description": "", "date": "2024-01-01"}), "Empty description"),
        (json!({"title": "Launch", "description": "Kickoff", "date": null}), "Null date"),
        (json!({}), "Empty json"),
    ];

    for (body, description) in cases {
        let res = app.post_events(&body).await?;
        assert_eq!(
            400,
            res.status().as_u16(),
            "The API did not return a 400 BAD REQUEST the payload was {}.",
            description
        );
        assert_cors_headers(&res);
        assert_eq!(
            json!({"error": "Missing event title, date, or description"}),
            res.json::<Value>().await?
        );
    }

    Ok(())
}

#[tokio::test]
async fn preflight_returns_cors_headers_without_backend_calls() -> Result<()> {
    let app = TestApp::spawn_announcer(false).await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.store_server)
        .await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.notifier_server)
        .await;

    let res = app.preflight("/api/events").await?;

    assert_eq!(res.status(), StatusCode::OK);
    assert_cors_headers(&res);
    assert_eq!(json!({"message": "CORS preflight"}), res.json::<Value>().await?);

    Ok(())
}

#[tokio::test]
async fn publish_failure_is_500_after_the_log_was_written() -> Result<()> {
    let app = TestApp::spawn_announcer(false).await?;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&app.store_server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.store_server)
        .await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.notifier_server)
        .await;

    let res = app.post_events(&launch()).await?;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors_headers(&res);
    assert_eq!(json!({"error": "Internal server error"}), res.json::<Value>().await?);

    Ok(())
}

#[tokio::test]
async fn store_failure_detail_is_exposed_only_when_configured() -> Result<()> {
    let app = TestApp::spawn_announcer(true).await?;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&app.store_server)
        .await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.notifier_server)
        .await;

    let res = app.post_events(&launch()).await?;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = res.json::<Value>().await?;
    let error = body["error"].as_str().unwrap_or_default();
    assert!(
        error.starts_with("object store error:"),
        "unexpected error detail: {error}"
    );

    Ok(())
}

#[tokio::test]
async fn malformed_body_is_500() -> Result<()> {
    let app = TestApp::spawn_announcer(false).await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.store_server)
        .await;

    let res = app
        .http_client
        .post(format!("http://{}/api/events", app.addr))
        .header("Content-Type", "application/json")
        .body("{\"title\": ")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors_headers(&res);

    Ok(())
}

#[tokio::test]
async fn body_that_is_not_utf8_is_500_and_touches_nothing() -> Result<()> {
    let app = TestApp::spawn_announcer(false).await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.store_server)
        .await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.notifier_server)
        .await;

    let body = b"{\"title\": \"La\xffnch\", \"description\": \"Kickoff\", \"date\": \"2024-01-01\"}";
    let res = app
        .http_client
        .post(format!("http://{}/api/events", app.addr))
        .header("Content-Type", "application/json")
        .body(body.to_vec())
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors_headers(&res);
    assert_eq!(json!({"error": "Internal server error"}), res.json::<Value>().await?);

    Ok(())
}

#[tokio::test]
async fn stored_entries_are_rewritten_unchanged() -> Result<()> {
    let app = TestApp::spawn_announcer(false).await?;
    let earlier = json!({"title": "Old", "description": "d", "date": 20230101, "location": "Hall A"});

    Mock::given(method("GET"))
        .and(path(EVENTS_OBJECT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([earlier])))
        .expect(1)
        .mount(&app.store_server)
        .await;
    Mock::given(method("PUT"))
        .and(path(EVENTS_OBJECT_PATH))
        .and(body_json(json!([earlier, launch()])))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.store_server)
        .await;
    Mock::given(path(MESSAGES_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.notifier_server)
        .await;

    let res = app.post_events(&launch()).await?;
    assert_eq!(res.status(), StatusCode::OK);

    Ok(())
}
