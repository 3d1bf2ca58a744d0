//! End-to-end tests of the facade against a mock Okdesk account.

use okdesk::issues::{AddIssueCommentRequest, CreateIssueRequest};
use okdesk::{AttachmentUpload, ClientConfig, Error, Okdesk, UploadFile};
use serde_json::json;
use std::io::Write;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn okdesk_for(server: &MockServer) -> Okdesk {
    let config = ClientConfig::custom_endpoint(server.uri(), "secret").unwrap();
    Okdesk::new(config).unwrap()
}

#[tokio::test]
async fn create_issue_then_comment_with_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/issues/"))
        .and(query_param("api_token", "secret"))
        .and(body_json(json!({"issue": {"title": "Не печатает принтер"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 77})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/issues/77/comments"))
        .and(query_param("api_token", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5,
            "content": "Лог во вложении",
            "public": false,
            "attachments": [{"id": 9, "attachment_file_name": "printer.log"}]
        })))
        .mount(&server)
        .await;

    let mut log = tempfile::NamedTempFile::new().unwrap();
    writeln!(log, "paper jam").unwrap();

    let okdesk = okdesk_for(&server);
    let issue_id = okdesk
        .issues()
        .create_issue(&CreateIssueRequest::new("Не печатает принтер"))
        .await
        .unwrap();
    assert_eq!(issue_id, 77);

    let mut comment = AddIssueCommentRequest::new(issue_id, "Лог во вложении", 3);
    comment.attachments.push(AttachmentUpload::new(
        UploadFile::from_path(log.path()).unwrap(),
    ));
    let created = okdesk.issues().add_issue_comment(&comment).await.unwrap();
    assert_eq!(created.id, Some(5));

    let requests = server.received_requests().await.unwrap();
    let raw = String::from_utf8_lossy(&requests[1].body);
    assert!(raw.contains("name=\"comment[content]\""));
    assert!(raw.contains("name=\"comment[attachments_attributes][0][file]\""));
    assert!(raw.contains("paper jam"));
}

#[tokio::test]
async fn non_json_reply_is_a_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/companies/list"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let err = okdesk_for(&server)
        .companies()
        .list_companies(&Default::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}

#[tokio::test]
async fn generic_send_reaches_the_same_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/equipments/kinds/"))
        .and(query_param("search_string", "printer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "code": "printer", "name": "Принтер"}
        ])))
        .mount(&server)
        .await;

    let request = okdesk::references::ListEquipmentKindsRequest {
        search_string: Some("printer".into()),
        ..Default::default()
    };
    let kinds = okdesk_for(&server).send(&request).await.unwrap();
    assert_eq!(kinds[0].code.as_deref(), Some("printer"));
}
