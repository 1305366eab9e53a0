//! End-to-end test of the review workflow: load a table from disk, filter
//! it, build a record, and append it to the local CSV sink.

use camino::Utf8PathBuf;
use chrono::{Local, TimeZone};
use rstest::{fixture, rstest};

use cidview::sink::ReviewSink;
use cidview::{
    CidviewConfig, CsvFileSink, ViewParams, apply_view, build_review_record, load_table,
};

const TABLE_JSON: &str = r#"[
    {
        "note_id": 7,
        "note_text": "Paciente com dor abdominal",
        "Ouro": ["✅ K35"],
        "ModelA": ["❌ K36", "✅ K35"]
    },
    {
        "note_id": 8,
        "note_text": "Paciente com febre alta",
        "Ouro": ["✅ A90"],
        "ModelA": ""
    }
]"#;

struct Workspace {
    _dir: tempfile::TempDir,
    table_path: Utf8PathBuf,
    log_path: Utf8PathBuf,
}

#[fixture]
fn workspace() -> Workspace {
    let dir = tempfile::tempdir().expect("tempdir should create");
    let table_path = Utf8PathBuf::from_path_buf(dir.path().join("notes.json"))
        .expect("temp path should be UTF-8");
    let log_path = Utf8PathBuf::from_path_buf(dir.path().join("reviews.csv"))
        .expect("temp path should be UTF-8");
    std::fs::write(&table_path, TABLE_JSON).expect("table file should write");
    Workspace {
        _dir: dir,
        table_path,
        log_path,
    }
}

#[rstest]
fn filtered_review_lands_in_the_csv_log(workspace: Workspace) {
    let table = load_table(&workspace.table_path).expect("table should load");
    assert_eq!(table.len(), 2);

    let params = ViewParams {
        query: "dor".to_owned(),
        selected_models: vec!["Ouro".to_owned(), "ModelA".to_owned()],
        show_validated: true,
        show_unvalidated: false,
    };
    let applied = apply_view(&table, &params);
    assert_eq!(applied.view.rows.len(), 1);

    let row = applied.view.lookup(7).expect("note 7 should be visible");
    let now = Local
        .with_ymd_and_hms(2026, 3, 14, 9, 26, 53)
        .single()
        .expect("fixed timestamp should be unambiguous");
    let record = build_review_record(
        row,
        &applied.view.models,
        "Ana",
        "CID principal confirmado",
        now,
    );

    let sink = CsvFileSink::new(workspace.log_path.clone());
    sink.append(&record).expect("append should succeed");

    let contents = std::fs::read_to_string(&workspace.log_path).expect("log should read");
    let mut lines = contents.lines();
    assert_eq!(
        lines.next(),
        Some(
            "timestamp,note_id,analyst_name,note_preview,review_text,models_shown,items_shown_snapshot"
        )
    );
    let data = lines.next().expect("data row should exist");
    assert!(data.starts_with("2026-03-14T09:26:53,7,Ana,"));
    // The snapshot reflects the filtered view: ❌ K36 was hidden.
    assert!(data.contains("✅ K35"));
    assert!(!data.contains("❌ K36"));
}

#[rstest]
fn cli_run_saves_a_review_through_the_configured_sink(workspace: Workspace) {
    let config = CidviewConfig {
        table_path: Some(workspace.table_path.clone()),
        note: Some(7),
        analyst: Some("Ana".to_owned()),
        review: Some("parecer final".to_owned()),
        review_log: Some(workspace.log_path.clone()),
        ..CidviewConfig::default()
    };

    cidview::cli::run(&config).expect("save-review run should succeed");

    let contents = std::fs::read_to_string(&workspace.log_path).expect("log should read");
    assert_eq!(contents.lines().count(), 2);
    let data = contents.lines().nth(1).expect("data row should exist");
    assert!(data.contains(",7,Ana,"));
    assert!(data.contains("parecer final"));
    assert!(data.contains("Ouro, ModelA"));
}

#[rstest]
fn cli_run_reports_missing_note_as_information_not_error(workspace: Workspace) {
    let config = CidviewConfig {
        table_path: Some(workspace.table_path.clone()),
        query: Some("febre".to_owned()),
        note: Some(7),
        review: Some("parecer".to_owned()),
        review_log: Some(workspace.log_path.clone()),
        ..CidviewConfig::default()
    };

    // Note 7 is filtered out by the query, so nothing is saved and the run
    // still succeeds.
    cidview::cli::run(&config).expect("run should succeed without saving");
    assert!(!workspace.log_path.as_std_path().exists());
}

#[rstest]
fn cli_run_exports_the_filtered_view(workspace: Workspace) {
    let export_path = workspace
        .table_path
        .parent()
        .expect("table path should have a parent")
        .join("view.csv");

    let config = CidviewConfig {
        table_path: Some(workspace.table_path.clone()),
        export: Some(export_path.clone()),
        hide_unvalidated: true,
        ..CidviewConfig::default()
    };

    cidview::cli::run(&config).expect("export run should succeed");

    let contents = std::fs::read_to_string(&export_path).expect("export should read");
    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some("note_id,note_text,Ouro,ModelA"));
    assert_eq!(contents.lines().count(), 3);
    assert!(!contents.contains("❌ K36"));
}
