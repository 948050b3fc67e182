mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn root_describes_the_service() -> Result<()> {
    let server = common::spawn_offline().await?;

    let res = common::client().get(server.url("/")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["name"], "Jobly API");
    Ok(())
}

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = common::spawn_offline().await?;

    let res = common::client().get(server.url("/health")).send().await?;

    // OK with a database, SERVICE_UNAVAILABLE without one
    assert!(
        res.status() == StatusCode::OK || res.status() == StatusCode::SERVICE_UNAVAILABLE,
        "unexpected status: {}",
        res.status()
    );

    let body = res.json::<serde_json::Value>().await?;
    assert!(body["status"].is_string());
    Ok(())
}

#[tokio::test]
async fn unknown_route_is_json_404() -> Result<()> {
    let server = common::spawn_offline().await?;

    let res = common::client().get(server.url("/no-such-route")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"], true);
    assert_eq!(body["status"], 404);
    Ok(())
}

#[tokio::test]
async fn health_reports_unreachable_database() -> Result<()> {
    let server = common::spawn_with_dead_database().await?;

    let res = common::client().get(server.url("/health")).send().await?;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    Ok(())
}

#[tokio::test]
async fn unreachable_database_is_internal_error_on_resources() -> Result<()> {
    let server = common::spawn_with_dead_database().await?;

    for path in ["/jobs", "/companies"] {
        let res = common::client().get(server.url(path)).send().await?;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR, "{}", path);

        let body = res.json::<serde_json::Value>().await?;
        assert_eq!(body["code"], "INTERNAL_SERVER_ERROR");
        assert_eq!(body["message"], "Database error occurred");
    }
    Ok(())
}

#[test]
fn database_requirement_flag() {
    assert!(common::database_required(Some("1")));
    assert!(common::database_required(Some("true")));
    assert!(!common::database_required(Some("0")));
    assert!(!common::database_required(Some("")));
    assert!(!common::database_required(None));
}
