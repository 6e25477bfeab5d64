use gridport::builder::ExportBuilder;
use gridport::document::{InMemoryDocument, StaticToken};
use gridport::errors::ExportError;
use gridport::executor::fetch_export;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_document() -> InMemoryDocument {
    InMemoryDocument::new("1a2b3c")
}

#[tokio::test]
async fn successful_export_returns_named_artifact_bytes() {
    let doc = sample_document();
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/d/1a2b3c/export"))
        .and(query_param("format", "pdf"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.7 payload".to_vec()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut builder = ExportBuilder::new(&doc);
    builder
        .set_service_root(&mock_server.uri())
        .unwrap()
        .set_format("pdf")
        .unwrap()
        .set_file_name("Report")
        .unwrap();

    let client = reqwest::Client::new();
    let token = StaticToken("test-token".to_string());
    let artifact = fetch_export(&client, &builder, &token).await.unwrap();

    assert_eq!(artifact.file_name, "Report.pdf");
    assert_eq!(artifact.bytes, b"%PDF-1.7 payload".to_vec());
}

#[tokio::test]
async fn default_format_names_the_artifact_xlsx() {
    let doc = sample_document();
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/d/1a2b3c/export"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x50, 0x4b]))
        .mount(&mock_server)
        .await;

    let mut builder = ExportBuilder::new(&doc);
    builder.set_service_root(&mock_server.uri()).unwrap();

    let client = reqwest::Client::new();
    let token = StaticToken("test-token".to_string());
    let artifact = fetch_export(&client, &builder, &token).await.unwrap();

    assert_eq!(artifact.file_name, "export.xlsx");
}

#[tokio::test]
async fn non_success_status_surfaces_code_and_body() {
    let doc = sample_document();
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/d/1a2b3c/export"))
        .respond_with(ResponseTemplate::new(403).set_body_string("access denied"))
        .mount(&mock_server)
        .await;

    let mut builder = ExportBuilder::new(&doc);
    builder
        .set_service_root(&mock_server.uri())
        .unwrap()
        .set_format("csv")
        .unwrap();

    let client = reqwest::Client::new();
    let token = StaticToken("test-token".to_string());
    let err = fetch_export(&client, &builder, &token).await.unwrap_err();

    match err {
        ExportError::ExportFailed { status, message } => {
            assert_eq!(status, Some(403));
            assert!(message.contains("access denied"));
        }
        other => panic!("expected ExportFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn transport_fault_is_wrapped_without_status() {
    let doc = sample_document();

    // Nothing listens on this port; the connection attempt itself fails.
    let mut builder = ExportBuilder::new(&doc);
    builder
        .set_service_root("http://127.0.0.1:1")
        .unwrap()
        .set_format("csv")
        .unwrap();

    let client = reqwest::Client::new();
    let token = StaticToken("test-token".to_string());
    let err = fetch_export(&client, &builder, &token).await.unwrap_err();

    match err {
        ExportError::ExportFailed { status, .. } => assert_eq!(status, None),
        other => panic!("expected ExportFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn request_carries_the_configured_query_parameters() {
    let doc = sample_document();
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/d/1a2b3c/export"))
        .and(query_param("format", "pdf"))
        .and(query_param("gid", "0"))
        .and(query_param("portrait", "false"))
        .and(query_param("pagenum", "CENTER"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1, 2, 3]))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut builder = ExportBuilder::new(&doc);
    builder
        .set_service_root(&mock_server.uri())
        .unwrap()
        .set_format("pdf")
        .unwrap()
        .set_portrait(false)
        .set_page_numbers(true)
        .set_sheet_id(0);

    let client = reqwest::Client::new();
    let token = StaticToken("test-token".to_string());
    let artifact = fetch_export(&client, &builder, &token).await.unwrap();
    assert_eq!(artifact.bytes, vec![1, 2, 3]);
}
