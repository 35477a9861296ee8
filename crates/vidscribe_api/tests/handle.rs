use std::time::Duration;

use serde_json::json;
use tokio::runtime::Runtime;
use vidscribe_api::{ApiEvent, ApiHandle, ApiSettings, ErrorKind, SessionContext};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

fn task_body(id: &str, url: &str) -> serde_json::Value {
    json!({
        "task_id": id,
        "video_url": url,
        "video_title": format!("Video {id}"),
        "transcription": "words",
        "summary": "short",
    })
}

fn handle_for(server: &MockServer) -> ApiHandle {
    ApiHandle::connect(
        ApiSettings {
            base_url: server.uri(),
        },
        SessionContext::default(),
    )
    .expect("handle")
}

// The handle is a sync facade; each test keeps a multi-thread runtime alive
// so the wiremock server stays serviced while the test thread blocks on
// `recv_timeout`.

#[test]
fn a_slow_submission_does_not_block_a_fast_one() {
    let runtime = Runtime::new().expect("tokio runtime");
    let server = runtime.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/transcribe"))
            .and(body_json(json!({ "youtube_url": "https://youtube.com/watch?v=slow" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_millis(400))
                    .set_body_json(task_body("1", "https://youtube.com/watch?v=slow")),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/transcribe"))
            .and(body_json(json!({ "youtube_url": "https://youtube.com/watch?v=fast" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(task_body("2", "https://youtube.com/watch?v=fast")),
            )
            .mount(&server)
            .await;
        server
    });

    let handle = handle_for(&server);
    handle.submit(1, "https://youtube.com/watch?v=slow");
    handle.submit(2, "https://youtube.com/watch?v=fast");

    // The fast submission settles first even though it was dispatched second.
    let first = handle.recv_timeout(RECV_TIMEOUT).expect("first event");
    match first {
        ApiEvent::SubmitSettled { request_id, .. } => assert_eq!(request_id, 2),
        other => panic!("unexpected event: {other:?}"),
    }

    let second = handle.recv_timeout(RECV_TIMEOUT).expect("second event");
    match second {
        ApiEvent::SubmitSettled {
            request_id, result, ..
        } => {
            assert_eq!(request_id, 1);
            assert_eq!(result.expect("slow submit ok").task_id, "1");
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn failures_settle_as_events_too() {
    let runtime = Runtime::new().expect("tokio runtime");
    let server = runtime.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/transcribe"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({ "detail": "download failed" })),
            )
            .mount(&server)
            .await;
        server
    });

    let handle = handle_for(&server);
    handle.submit(9, "https://youtube.com/watch?v=x");

    let event = handle.recv_timeout(RECV_TIMEOUT).expect("event");
    match event {
        ApiEvent::SubmitSettled {
            request_id,
            url,
            result,
        } => {
            assert_eq!(request_id, 9);
            assert_eq!(url, "https://youtube.com/watch?v=x");
            let err = result.unwrap_err();
            assert_eq!(err.kind, ErrorKind::Remote(500));
            assert_eq!(err.message, "download failed");
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn list_and_delete_report_their_own_events() {
    let runtime = Runtime::new().expect("tokio runtime");
    let server = runtime.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tasks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/tasks/3"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "message": "Task deleted successfully" })),
            )
            .mount(&server)
            .await;
        server
    });

    let handle = handle_for(&server);
    handle.list_tasks();
    handle.delete_task("3");

    let mut listed = false;
    let mut deleted = false;
    for _ in 0..2 {
        match handle.recv_timeout(RECV_TIMEOUT).expect("event") {
            ApiEvent::TasksListed { result } => {
                assert!(result.expect("list ok").is_empty());
                listed = true;
            }
            ApiEvent::DeleteSettled { task_id, result } => {
                assert_eq!(task_id, "3");
                assert_eq!(
                    result.expect("delete ok").message,
                    "Task deleted successfully"
                );
                deleted = true;
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
    assert!(listed);
    assert!(deleted);
}
