use anyhow::Result;
use axum::http::StatusCode;
use vibe_core::{format_local, FormatKind, Origin, PrettyConfig, ValidationError};
use vibe_observability::FormatMetrics;
use vibe_orchestrator::PrettyPrinter;
use vibe_remote::HttpTransport;
use vibe_tests::{unreachable_url, FakeEndpoint};

const MESSY_JSON: &str = r#"{"name":"John","age":30,"city":"New York"}"#;

fn printer_for(url: &str, env_credential: Option<&str>) -> PrettyPrinter<HttpTransport> {
    let mut config = PrettyConfig::default().with_endpoint(url);
    if let Some(credential) = env_credential {
        config = config.with_credential(credential);
    }
    PrettyPrinter::with_transport(config, HttpTransport::new(url), FormatMetrics::shared())
}

#[tokio::test]
async fn remote_completion_is_returned_trimmed() -> Result<()> {
    let endpoint = FakeEndpoint::replying("\n{\n    \"age\": 30\n}\n\n").await?;
    let printer = printer_for(&endpoint.url(), None);

    let result = printer.run(MESSY_JSON, "json", Some("sk-live")).await?;

    assert_eq!(result.origin, Origin::Remote);
    assert_eq!(result.kind, FormatKind::Json);
    assert_eq!(result.content, "{\n    \"age\": 30\n}");
    Ok(())
}

#[tokio::test]
async fn outgoing_request_has_chat_completion_shape() -> Result<()> {
    let endpoint = FakeEndpoint::replying("name: John").await?;
    let printer = printer_for(&endpoint.url(), Some("sk-env"));

    printer.run("name: John\nage: 30", "yaml", None).await?;

    let requests = endpoint.requests();
    assert_eq!(requests.len(), 1);

    let captured = &requests[0];
    assert_eq!(captured.authorization.as_deref(), Some("Bearer sk-env"));

    let body = &captured.body;
    assert_eq!(body["model"], "gpt-3.5-turbo");
    assert_eq!(body["max_tokens"], 2_000);
    let temperature = body["temperature"].as_f64().unwrap_or_default();
    assert!((temperature - 0.1).abs() < 1e-9);

    let messages = body["messages"].as_array().cloned().unwrap_or_default();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(messages[1]["role"], "user");
    let user = messages[1]["content"].as_str().unwrap_or_default();
    assert!(user.starts_with("Format this YAML"));
    assert!(user.ends_with("\n\nname: John\nage: 30"));
    Ok(())
}

#[tokio::test]
async fn server_error_falls_back_to_local() -> Result<()> {
    let endpoint = FakeEndpoint::start(StatusCode::INTERNAL_SERVER_ERROR, "boom").await?;
    let printer = printer_for(&endpoint.url(), None);

    let result = printer.run(MESSY_JSON, "json", Some("sk-live")).await?;

    assert_eq!(result.origin, Origin::Local);
    assert_eq!(result.content, format_local(MESSY_JSON, FormatKind::Json));
    assert_eq!(endpoint.requests().len(), 1);

    let snapshot = printer.orchestrator().metrics().snapshot();
    assert_eq!(snapshot.fallback_total, 1);
    assert_eq!(snapshot.remote_success_total, 0);
    Ok(())
}

#[tokio::test]
async fn malformed_body_falls_back_to_local() -> Result<()> {
    let endpoint = FakeEndpoint::start(StatusCode::OK, "this is not json").await?;
    let printer = printer_for(&endpoint.url(), None);

    let result = printer
        .run("<person><name>John</name></person>", "xml", Some("sk-live"))
        .await?;

    assert_eq!(result.origin, Origin::Local);
    assert_eq!(result.content, "<person>\n<name>John</name>\n</person>");
    Ok(())
}

#[tokio::test]
async fn empty_choices_fall_back_to_local() -> Result<()> {
    let endpoint = FakeEndpoint::start(StatusCode::OK, r#"{"choices": []}"#).await?;
    let printer = printer_for(&endpoint.url(), None);

    let result = printer.run("  hello world  ", "text", Some("sk-live")).await?;

    assert_eq!(result.origin, Origin::Local);
    assert_eq!(result.content, "hello world");
    Ok(())
}

#[tokio::test]
async fn unreachable_endpoint_falls_back_to_local() -> Result<()> {
    let url = unreachable_url().await?;
    let printer = printer_for(&url, Some("sk-env"));

    let result = printer.run("key: value\nlist:\n  - item1", "yaml", None).await?;

    assert_eq!(result.origin, Origin::Local);
    assert!(result.content.contains("key: value"));
    Ok(())
}

#[tokio::test]
async fn no_credential_means_no_request() -> Result<()> {
    let endpoint = FakeEndpoint::replying("should not be used").await?;
    let printer = printer_for(&endpoint.url(), None);

    let result = printer.run("  hello world  ", "text", None).await?;
    assert_eq!(result.origin, Origin::Local);
    assert_eq!(result.content, "hello world");

    let result = printer.run(MESSY_JSON, "json", Some("")).await?;
    assert_eq!(result.origin, Origin::Local);
    assert!(result.content.contains("\"city\""));

    assert!(endpoint.requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn validation_failures_reach_the_caller_without_remote_call() -> Result<()> {
    let endpoint = FakeEndpoint::replying("unused").await?;
    let printer = printer_for(&endpoint.url(), Some("sk-env"));

    let err = printer.run("invalid json", "json", None).await.unwrap_err();
    assert!(matches!(err, ValidationError::InvalidJson(_)));

    let err = printer.run("no tags", "xml", None).await.unwrap_err();
    assert_eq!(err, ValidationError::InvalidXml);

    let err = printer.run("test", "markdown", None).await.unwrap_err();
    assert!(err.to_string().contains("json, xml, yaml, text"));

    assert!(endpoint.requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn format_entry_point_surfaces_validation_errors() {
    let err = vibe_orchestrator::format("", "json", None).await.unwrap_err();
    assert_eq!(err, ValidationError::EmptyText);

    let err = vibe_orchestrator::format("test", "invalid", None).await.unwrap_err();
    assert!(matches!(err, ValidationError::UnknownKind { .. }));
}
