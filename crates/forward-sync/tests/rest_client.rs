//! REST client tests against a local mock HTTP server.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use forward_core::{
    AssignmentStatus, BlobStore, Error, ParseSyllabusRequest, ProfileStore, SyllabusParser,
    TodoStore,
};
use forward_sync::{RemoteConfig, RestRemote};

async fn remote_for(server: &MockServer) -> RestRemote {
    RestRemote::new(&RemoteConfig::new(server.uri(), "test-key")).unwrap()
}

#[tokio::test]
async fn list_for_owner_sends_scoped_ordered_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/extracted_todos"))
        .and(query_param("owner_id", "eq.user-1"))
        .and(query_param("order", "created_at.desc"))
        .and(header("apikey", "test-key"))
        .and(header("Authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "t1",
                "owner_id": "user-1",
                "note_id": "n1",
                "title": "Read chapter 4",
                "due_date": "2026-09-01",
                "priority": "high",
                "status": "in-progress",
                "transferred": false,
                "created_at": "2026-08-20T12:00:00Z"
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let remote = remote_for(&server).await;
    let todos = remote.list_for_owner("user-1").await.unwrap();

    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].title, "Read chapter 4");
    assert_eq!(todos[0].status, AssignmentStatus::InProgress);
    assert_eq!(
        todos[0].due_date,
        Some(chrono::NaiveDate::from_ymd_opt(2026, 9, 1).unwrap())
    );
}

#[tokio::test]
async fn update_status_patches_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/extracted_todos"))
        .and(query_param("id", "eq.t1"))
        .and(body_json(json!({ "status": "completed" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let remote = remote_for(&server).await;
    remote
        .update_status("t1", AssignmentStatus::Completed)
        .await
        .unwrap();
}

#[tokio::test]
async fn mark_transferred_patches_flag() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/extracted_todos"))
        .and(query_param("id", "eq.t1"))
        .and(body_json(json!({ "transferred": true })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let remote = remote_for(&server).await;
    remote.mark_transferred("t1").await.unwrap();
}

#[tokio::test]
async fn delete_forbidden_maps_to_remote_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/extracted_todos"))
        .respond_with(ResponseTemplate::new(403).set_body_string("row policy violation"))
        .mount(&server)
        .await;

    let remote = remote_for(&server).await;
    let err = remote.delete("t1").await.unwrap_err();
    assert!(matches!(err, Error::Remote(ref msg) if msg.contains("permission denied")));
}

#[tokio::test]
async fn profile_fetch_empty_result_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/profiles"))
        .and(query_param("owner_id", "eq.user-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let remote = remote_for(&server).await;
    let err = remote.fetch("user-1").await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn profile_fetch_returns_first_row() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/profiles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "owner_id": "user-1",
                "plan": "pro",
                "storage_used_bytes": 1024,
                "storage_limit_bytes": 2048
            }
        ])))
        .mount(&server)
        .await;

    let remote = remote_for(&server).await;
    let profile = remote.fetch("user-1").await.unwrap();
    assert_eq!(profile.plan, "pro");
    assert_eq!(profile.storage_used_bytes, 1024);
}

#[tokio::test]
async fn blob_upload_posts_raw_body_with_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/storage/v1/object/syllabi/user-1/chem.pdf"))
        .and(header("Content-Type", "application/pdf"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let remote = remote_for(&server).await;
    remote
        .upload(
            "syllabi/user-1/chem.pdf",
            b"%PDF-1.4".to_vec(),
            "application/pdf",
        )
        .await
        .unwrap();
    assert_eq!(
        remote.public_url("syllabi/user-1/chem.pdf"),
        format!("{}/storage/v1/object/public/syllabi/user-1/chem.pdf", server.uri())
    );
}

#[tokio::test]
async fn parse_function_round_trips_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/functions/v1/parse-syllabus"))
        .and(body_json(json!({
            "text": "CS 225 Data Structures MWF 09:00",
            "file_name": "cs225.pdf"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "course_name": "Data Structures",
                "course_code": "CS 225",
                "schedule": [
                    { "day": 1, "start_time": "09:00", "end_time": "09:50" }
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let remote = remote_for(&server).await;
    let response = remote
        .parse(ParseSyllabusRequest {
            text: "CS 225 Data Structures MWF 09:00".to_string(),
            file_name: "cs225.pdf".to_string(),
        })
        .await
        .unwrap();

    assert!(response.success);
    let parsed = response.data.unwrap();
    assert_eq!(parsed.course_code, "CS 225");
    assert_eq!(parsed.schedule.len(), 1);
    assert_eq!(parsed.schedule[0].start_time, "09:00");
}

#[tokio::test]
async fn server_error_carries_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/extracted_todos"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database unavailable"))
        .mount(&server)
        .await;

    let remote = remote_for(&server).await;
    let err = remote.list_for_owner("user-1").await.unwrap_err();
    assert!(matches!(err, Error::Remote(ref msg) if msg.contains("database unavailable")));
}
