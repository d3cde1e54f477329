//! Tests whether the 'health-check' route returns an appropriate status code

use anyhow::Result;
use reqwest::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn healthcheck_ok() -> Result<()> {
    for app in [
        TestApp::spawn_announcer(false).await?,
        TestApp::spawn_registrar(false).await?,
    ] {
        let res = app
            .http_client
            .get(format!("http://{}/health-check", app.addr))
            .send()
            .await?;

        assert!(res.status() == StatusCode::OK, "Healthcheck FAILED!");
    }

    Ok(())
}

#[tokio::test]
async fn invalid_path_404() -> Result<()> {
    let TestApp {
        addr, http_client, ..
    } = TestApp::spawn_registrar(false).await?;

    // The registrar does not serve the announcer's path.
    let res = http_client
        .post(format!("http://{addr}/api/events"))
        .send()
        .await?;

    assert!(
        res.status() == StatusCode::NOT_FOUND,
        "Invalid Path check FAILED!, expected: {}, got: {}",
        404,
        res.status().as_u16()
    );

    Ok(())
}

#[tokio::test]
async fn responses_carry_a_request_id() -> Result<()> {
    let app = TestApp::spawn_announcer(false).await?;

    let res = app.preflight("/api/events").await?;

    let request_id = res
        .headers()
        .get("x-request-id")
        .and_then(|id| id.to_str().ok())
        .map(uuid::Uuid::parse_str);
    assert!(matches!(request_id, Some(Ok(_))), "no valid x-request-id");

    Ok(())
}
