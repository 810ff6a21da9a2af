//! End-to-end submission tests against a mock plotting service.
//!
//! The app's event loop is synchronous and drains submission outcomes once
//! per tick; these tests stand in for the loop by calling
//! `App::drain_outcomes` until the expected number of outcomes arrived.

use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use plot_pilot::app::{App, MSG_FAILURE, MSG_MISSING_FILE, MSG_SUCCESS};
use plot_pilot::notice::NoticeLevel;
use plot_pilot::upload::PlotClient;
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_csv(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let file_path = dir.join(name);
    std::fs::write(&file_path, content).unwrap();
    file_path
}

fn client_for(uri: &str) -> PlotClient {
    let endpoint = format!("{}/plot", uri).parse().unwrap();
    PlotClient::new(endpoint, Duration::from_secs(5)).unwrap()
}

fn wait_for_outcomes(app: &mut App, expected: usize) {
    let deadline = Instant::now() + Duration::from_secs(10);
    let mut seen = 0;
    while seen < expected {
        seen += app.drain_outcomes();
        assert!(
            Instant::now() < deadline,
            "timed out waiting for {expected} submission outcome(s)"
        );
        std::thread::sleep(Duration::from_millis(10));
    }
}

fn body_contains(body: &[u8], needle: &[u8]) -> bool {
    body.windows(needle.len()).any(|window| window == needle)
}

#[test]
fn submit_without_file_never_hits_the_network() {
    let runtime = Runtime::new().unwrap();
    let server = runtime.block_on(MockServer::start());
    runtime.block_on(
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server),
    );

    let mut app = App::new(None, runtime.handle().clone(), client_for(&server.uri()));

    // Empty prompt
    app.submit();
    let notice = app.notice.clone().expect("missing-file notice");
    assert_eq!(notice.message, MSG_MISSING_FILE);
    assert_eq!(notice.level, NoticeLevel::Error);
    app.dismiss_notice();

    // Non-empty prompt changes nothing
    app.composer.set_text("plot revenue by region");
    app.submit();
    assert_eq!(app.notice.clone().unwrap().message, MSG_MISSING_FILE);
    assert_eq!(app.in_flight, 0);

    std::thread::sleep(Duration::from_millis(100));
    let requests = runtime.block_on(server.received_requests()).unwrap();
    assert!(requests.is_empty(), "no request may be issued without a file");
}

#[test]
fn submit_posts_one_multipart_request_with_prompt_and_file() {
    let runtime = Runtime::new().unwrap();
    let server = runtime.block_on(MockServer::start());
    runtime.block_on(
        Mock::given(method("POST"))
            .and(path("/plot"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"plotUrl": "x.png"})),
            )
            .expect(1)
            .mount(&server),
    );

    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(dir.path(), "sales.csv", b"region,revenue\nnorth,42\n");

    let mut app = App::new(
        Some(csv),
        runtime.handle().clone(),
        client_for(&server.uri()),
    );
    app.composer.set_text("plot revenue by region");
    app.submit();
    wait_for_outcomes(&mut app, 1);

    let notice = app.notice.clone().expect("success notice");
    assert_eq!(notice.message, MSG_SUCCESS);
    assert_eq!(notice.level, NoticeLevel::Info);

    // The selection is never cleared by a submission
    assert!(app.attachment.is_some());

    let requests = runtime.block_on(server.received_requests()).unwrap();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.url.path(), "/plot");

    assert!(body_contains(&request.body, b"name=\"prompt\""));
    assert!(body_contains(&request.body, b"plot revenue by region"));
    assert!(body_contains(&request.body, b"name=\"file\""));
    assert!(body_contains(&request.body, b"filename=\"sales.csv\""));
    assert!(body_contains(&request.body, b"text/csv"));
    assert!(body_contains(&request.body, b"region,revenue\nnorth,42\n"));
}

#[test]
fn server_error_surfaces_the_generic_failure_notice() {
    let runtime = Runtime::new().unwrap();
    let server = runtime.block_on(MockServer::start());
    runtime.block_on(
        Mock::given(method("POST"))
            .and(path("/plot"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&server),
    );

    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(dir.path(), "sales.csv", b"a,b\n1,2\n");

    let mut app = App::new(
        Some(csv),
        runtime.handle().clone(),
        client_for(&server.uri()),
    );
    app.submit();
    wait_for_outcomes(&mut app, 1);

    let notice = app.notice.clone().expect("failure notice");
    assert_eq!(notice.message, MSG_FAILURE);
    assert_eq!(notice.level, NoticeLevel::Error);
}

#[test]
fn non_json_success_body_surfaces_the_generic_failure_notice() {
    let runtime = Runtime::new().unwrap();
    let server = runtime.block_on(MockServer::start());
    runtime.block_on(
        Mock::given(method("POST"))
            .and(path("/plot"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>plot</html>"))
            .expect(1)
            .mount(&server),
    );

    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(dir.path(), "sales.csv", b"a,b\n1,2\n");

    let mut app = App::new(
        Some(csv),
        runtime.handle().clone(),
        client_for(&server.uri()),
    );
    app.submit();
    wait_for_outcomes(&mut app, 1);

    assert_eq!(app.notice.clone().unwrap().message, MSG_FAILURE);
}

#[test]
fn connection_refused_surfaces_the_generic_failure_notice() {
    let runtime = Runtime::new().unwrap();

    // Grab a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let endpoint = format!("http://127.0.0.1:{port}/plot").parse().unwrap();
    let client = PlotClient::new(endpoint, Duration::from_secs(2)).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(dir.path(), "sales.csv", b"a,b\n1,2\n");

    let mut app = App::new(Some(csv), runtime.handle().clone(), client);
    app.submit();
    wait_for_outcomes(&mut app, 1);

    assert_eq!(app.notice.clone().unwrap().message, MSG_FAILURE);
}

#[test]
fn a_new_selection_replaces_the_previous_one() {
    let runtime = Runtime::new().unwrap();
    let client = PlotClient::new(
        "http://localhost:5000/plot".parse().unwrap(),
        Duration::from_secs(5),
    )
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let first = write_csv(dir.path(), "first.csv", b"a\n1\n");
    let second = write_csv(dir.path(), "second.xlsx", b"fake xlsx bytes");

    let mut app = App::new(None, runtime.handle().clone(), client);
    app.select_file(&first);
    app.select_file(&second);

    let attachment = app.attachment.as_ref().expect("selection");
    assert_eq!(attachment.file_name, "second.xlsx");
    assert_eq!(
        attachment.content_type,
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert_eq!(attachment.bytes, b"fake xlsx bytes");
}

#[test]
fn clearing_the_selection_restores_the_missing_file_check() {
    let runtime = Runtime::new().unwrap();
    let server = runtime.block_on(MockServer::start());
    runtime.block_on(
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server),
    );

    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(dir.path(), "sales.csv", b"a,b\n1,2\n");

    let mut app = App::new(
        Some(csv),
        runtime.handle().clone(),
        client_for(&server.uri()),
    );
    app.clear_file();
    app.submit();

    assert_eq!(app.notice.clone().unwrap().message, MSG_MISSING_FILE);
    std::thread::sleep(Duration::from_millis(100));
    let requests = runtime.block_on(server.received_requests()).unwrap();
    assert!(requests.is_empty());
}

#[test]
fn rapid_double_submit_sends_two_independent_requests() {
    let runtime = Runtime::new().unwrap();
    let server = runtime.block_on(MockServer::start());
    runtime.block_on(
        Mock::given(method("POST"))
            .and(path("/plot"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"plotUrl": "x.png"}))
                    .set_delay(Duration::from_millis(300)),
            )
            .expect(2)
            .mount(&server),
    );

    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(dir.path(), "sales.csv", b"a,b\n1,2\n");

    let mut app = App::new(
        Some(csv),
        runtime.handle().clone(),
        client_for(&server.uri()),
    );
    app.composer.set_text("histogram of b");

    // Nothing guards against resubmitting while a request is in flight
    app.submit();
    app.submit();
    assert_eq!(app.in_flight, 2);

    wait_for_outcomes(&mut app, 2);
    assert_eq!(app.in_flight, 0);

    let requests = runtime.block_on(server.received_requests()).unwrap();
    assert_eq!(requests.len(), 2);
}
