use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;
use std::fs;
use tempfile::TempDir;
use vws_targets::api::{ApiClient, ClientConfig, Credentials};
use vws_targets::error::VwsError;

fn client_for(server: &ServerGuard) -> ApiClient {
    ApiClient::new(
        ClientConfig::with_base_url(server.url()),
        Credentials::new("access", "secret"),
    )
    .unwrap()
}

#[test]
fn list_targets_sends_signed_json_request() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/targets")
        .match_header("accept", "application/json")
        .match_header("content-type", "application/json")
        .match_header(
            "authorization",
            Matcher::Regex(r"^VWS access:[A-Za-z0-9+/]{27}=$".into()),
        )
        .match_header(
            "date",
            Matcher::Regex(r"^[A-Z][a-z]{2}, \d{2} [A-Z][a-z]{2} \d{4} \d{2}:\d{2}:\d{2} GMT$".into()),
        )
        .with_status(200)
        .with_body(
            json!({
                "result_code": "Success",
                "transaction_id": "e29a1c5d",
                "results": ["id1", "id2"]
            })
            .to_string(),
        )
        .create();

    let ids = client_for(&server).list_targets().unwrap();

    mock.assert();
    assert_eq!(ids, vec!["id1", "id2"]);
}

#[test]
fn list_targets_surfaces_body_on_error_status() {
    let mut server = Server::new();
    server
        .mock("GET", "/targets")
        .with_status(401)
        .with_body(r#"{"result_code":"AuthenticationFailure"}"#)
        .create();

    match client_for(&server).list_targets() {
        Err(VwsError::Remote { status, body }) => {
            assert_eq!(status, 401);
            assert!(body.contains("AuthenticationFailure"));
        }
        other => panic!("expected remote error, got {:?}", other),
    }
}

#[test]
fn list_targets_rejects_unexpected_json() {
    let mut server = Server::new();
    server
        .mock("GET", "/targets")
        .with_status(200)
        .with_body("not json")
        .create();

    assert!(matches!(
        client_for(&server).list_targets(),
        Err(VwsError::Response(_))
    ));
}

#[test]
fn delete_target_uses_target_path() {
    let mut server = Server::new();
    let mock = server
        .mock("DELETE", "/targets/abc123")
        .match_header("authorization", Matcher::Regex("^VWS access:".into()))
        .with_status(200)
        .with_body(r#"{"result_code":"Success"}"#)
        .create();

    let body = client_for(&server).delete_target("abc123").unwrap();

    mock.assert();
    assert_eq!(body, r#"{"result_code":"Success"}"#);
}

#[test]
fn delete_of_unknown_target_is_an_error() {
    let mut server = Server::new();
    server
        .mock("DELETE", "/targets/gone")
        .with_status(404)
        .with_body(r#"{"result_code":"UnknownTarget"}"#)
        .create();

    assert!(matches!(
        client_for(&server).delete_target("gone"),
        Err(VwsError::Remote { status: 404, .. })
    ));
}

#[test]
fn add_target_posts_name_width_and_image() {
    let dir = TempDir::new().unwrap();
    let image = dir.path().join("poster.jpg");
    fs::write(&image, [1u8, 2, 3]).unwrap();

    let mut server = Server::new();
    let mock = server
        .mock("POST", "/targets")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Exact(
            r#"{"name":"poster","width":100.0,"image":"AQID"}"#.into(),
        ))
        .with_status(201)
        .with_body(r#"{"result_code":"TargetCreated","target_id":"t1"}"#)
        .create();

    let res = client_for(&server).add_target(&image).unwrap();

    mock.assert();
    assert_eq!(res.status, 201);
    assert!(res.is_created());
    assert!(res.body.contains("t1"));
}

#[test]
fn add_target_returns_rejections_to_the_caller() {
    let dir = TempDir::new().unwrap();
    let image = dir.path().join("poster.jpg");
    fs::write(&image, b"jpeg").unwrap();

    let mut server = Server::new();
    server
        .mock("POST", "/targets")
        .with_status(403)
        .with_body(r#"{"result_code":"TargetNameExist"}"#)
        .create();

    let res = client_for(&server).add_target(&image).unwrap();
    assert_eq!(res.status, 403);
    assert!(!res.is_created());
}

#[test]
fn empty_image_is_never_sent() {
    let dir = TempDir::new().unwrap();
    let image = dir.path().join("empty.jpg");
    fs::write(&image, b"").unwrap();

    let mut server = Server::new();
    let mock = server.mock("POST", "/targets").expect(0).create();

    assert!(matches!(
        client_for(&server).add_target(&image),
        Err(VwsError::EmptyImage { .. })
    ));
    mock.assert();
}

#[test]
fn unreachable_host_is_a_network_error() {
    // nothing listens on port 9 on loopback
    let api = ApiClient::new(
        ClientConfig::with_base_url("http://127.0.0.1:9"),
        Credentials::new("access", "secret"),
    )
    .unwrap();
    let err = api.list_targets().unwrap_err();
    assert!(matches!(err, VwsError::Network(_)));
    assert_eq!(err.to_string(), "network error");
    assert_ne!(err.exit_code(), 0);
}
