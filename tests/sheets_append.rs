//! Behavioural tests for the remote sheet sink against a mock HTTP server.
//!
//! The sink uses a blocking client, so the mock server runs on its own
//! multi-threaded runtime while the test thread drives the sink directly.

use rstest::rstest;
use serde_json::json;
use tokio::runtime::Runtime;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cidview::sink::ReviewSink;
use cidview::{ReviewRecord, SheetsSink, SinkError};

const HEADER_RANGE_PATH: &str = "/v4/spreadsheets/sheet-1/values/Analises!A1:G1";
const APPEND_PATH: &str = "/v4/spreadsheets/sheet-1/values/Analises:append";
const BATCH_UPDATE_PATH: &str = "/v4/spreadsheets/sheet-1:batchUpdate";

fn sample_record() -> ReviewRecord {
    ReviewRecord {
        timestamp: "2026-03-14T09:26:53".to_owned(),
        note_id: 7,
        analyst_name: "Ana".to_owned(),
        note_preview: "Paciente com dor abdominal".to_owned(),
        review_text: "CID principal confirmado".to_owned(),
        models_shown: "Ouro, ModelA".to_owned(),
        items_shown_snapshot: r#"{"Ouro":["✅ K35"],"ModelA":["✅ K35"]}"#.to_owned(),
    }
}

fn start_server() -> (Runtime, MockServer) {
    let runtime = Runtime::new().expect("test runtime should start");
    let server = runtime.block_on(MockServer::start());
    (runtime, server)
}

fn sink_for(server: &MockServer) -> SheetsSink {
    SheetsSink::new(&server.uri(), "sheet-1", "Analises", "tok")
        .expect("sink should build from valid settings")
}

#[rstest]
fn append_posts_only_the_record_when_the_header_exists() {
    let (runtime, server) = start_server();
    runtime.block_on(async {
        Mock::given(method("GET"))
            .and(path(HEADER_RANGE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "values": [["timestamp", "note_id"]]
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(APPEND_PATH))
            .and(body_partial_json(json!({
                "values": [[
                    "2026-03-14T09:26:53",
                    "7",
                    "Ana",
                    "Paciente com dor abdominal",
                    "CID principal confirmado",
                    "Ouro, ModelA",
                    r#"{"Ouro":["✅ K35"],"ModelA":["✅ K35"]}"#
                ]]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;
    });

    let sink = sink_for(&server);
    sink.append(&sample_record()).expect("append should succeed");
    runtime.block_on(server.verify());
}

#[rstest]
fn append_bootstraps_the_header_when_the_tab_is_empty() {
    let (runtime, server) = start_server();
    runtime.block_on(async {
        Mock::given(method("GET"))
            .and(path(HEADER_RANGE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(APPEND_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(2)
            .mount(&server)
            .await;
    });

    let sink = sink_for(&server);
    sink.append(&sample_record()).expect("append should succeed");

    let requests = runtime
        .block_on(server.received_requests())
        .unwrap_or_default();
    let first_post = requests
        .iter()
        .find(|request| request.method.to_string() == "POST")
        .expect("a POST should have been made");
    let body: serde_json::Value =
        serde_json::from_slice(&first_post.body).expect("POST body should be JSON");
    assert_eq!(
        body,
        json!({
            "values": [[
                "timestamp",
                "note_id",
                "analyst_name",
                "note_preview",
                "review_text",
                "models_shown",
                "items_shown_snapshot"
            ]]
        })
    );
    runtime.block_on(server.verify());
}

#[rstest]
fn append_adds_the_tab_when_it_is_missing() {
    let (runtime, server) = start_server();
    runtime.block_on(async {
        Mock::given(method("GET"))
            .and(path(HEADER_RANGE_PATH))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {"code": 400, "message": "Unable to parse range: Analises!A1:G1"}
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(BATCH_UPDATE_PATH))
            .and(body_partial_json(json!({
                "requests": [{"addSheet": {"properties": {"title": "Analises"}}}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(APPEND_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(2)
            .mount(&server)
            .await;
    });

    let sink = sink_for(&server);
    sink.append(&sample_record()).expect("append should succeed");
    runtime.block_on(server.verify());
}

#[rstest]
fn append_reaches_a_tab_whose_name_needs_encoding() {
    let (runtime, server) = start_server();
    runtime.block_on(async {
        Mock::given(method("GET"))
            .and(path("/v4/spreadsheets/sheet-1/values/Notas%202026!A1:G1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "values": [["timestamp"]]
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v4/spreadsheets/sheet-1/values/Notas%202026:append"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;
    });

    let sink = SheetsSink::new(&server.uri(), "sheet-1", "Notas 2026", "tok")
        .expect("sink should build from valid settings");
    sink.append(&sample_record()).expect("append should succeed");
    runtime.block_on(server.verify());
}

#[rstest]
fn append_surfaces_the_service_error_message() {
    let (runtime, server) = start_server();
    runtime.block_on(async {
        Mock::given(method("GET"))
            .and(path(HEADER_RANGE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "values": [["timestamp"]]
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(APPEND_PATH))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": {"code": 403, "message": "The caller does not have permission"}
            })))
            .mount(&server)
            .await;
    });

    let sink = sink_for(&server);
    let error = sink
        .append(&sample_record())
        .expect_err("append should fail");
    assert_eq!(
        error,
        SinkError::Append {
            message: "The caller does not have permission".to_owned(),
        }
    );
    drop(runtime);
}
