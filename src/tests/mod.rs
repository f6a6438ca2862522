use crate::board::{Board, BoardConfig, BoardError, LoadState};
use crate::config::ConfigFile;
use crate::output;
use crate::record::{color_for_count, RawRecord, Record, ValidationError, PALETTE};
use crate::runner::{Action, Options, Runner, RunnerError};
use crate::source::{DataSource, FetchError, StaticSource};

fn raw(id: u64) -> RawRecord {
    RawRecord {
        id: Some(id),
        title: Some(format!("title {id}")),
        body: Some(format!("body {id}")),
    }
}

fn records(n: u64) -> Vec<Record> {
    (1..=n)
        .map(|id| Record::from_raw(raw(id)).unwrap())
        .collect()
}

fn board_with(n: u64) -> Board {
    let mut board = Board::new(BoardConfig::default());
    board.ingest(Ok(records(n)));
    board
}

fn visible_ids(board: &Board) -> Vec<u64> {
    board.visible().iter().map(|r| r.id).collect()
}

#[test]
fn from_raw_rejects_missing_id() {
    let result = Record::from_raw(RawRecord {
        id: None,
        title: Some("t".to_string()),
        body: Some("b".to_string()),
    });
    assert_eq!(result.unwrap_err(), ValidationError::MissingId);
}

#[test]
fn from_raw_names_the_missing_field() {
    let result = Record::from_raw(RawRecord {
        id: Some(7),
        title: None,
        body: Some("b".to_string()),
    });
    assert_eq!(
        result.unwrap_err(),
        ValidationError::MissingField { id: 7, field: "title" }
    );

    let result = Record::from_raw(RawRecord {
        id: Some(7),
        title: Some("t".to_string()),
        body: None,
    });
    assert_eq!(
        result.unwrap_err(),
        ValidationError::MissingField { id: 7, field: "body" }
    );
}

#[test]
fn new_record_starts_at_palette_zero() {
    let record = Record::from_raw(raw(1)).unwrap();
    assert_eq!(record.interaction_count, 0);
    assert_eq!(record.display_color, PALETTE[0]);
}

#[test]
fn k_interactions_yield_count_k_and_indexed_color() {
    let mut record = Record::from_raw(raw(1)).unwrap();
    for _ in 0..3 {
        record = record.with_interaction();
    }
    assert_eq!(record.interaction_count, 3);
    assert_eq!(record.display_color, PALETTE[3]);
}

#[test]
fn color_clamps_to_last_palette_entry() {
    let mut record = Record::from_raw(raw(1)).unwrap();
    for _ in 0..20 {
        record = record.with_interaction();
    }
    assert_eq!(record.interaction_count, 20);
    assert_eq!(record.display_color, PALETTE[PALETTE.len() - 1]);
    assert_eq!(color_for_count(999), PALETTE[PALETTE.len() - 1]);
}

#[test]
fn ingest_splits_at_initial_page_size() {
    let board = board_with(8);
    assert_eq!(visible_ids(&board), vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(board.remainder_len(), 2);
    assert_eq!(*board.load_state(), LoadState::Ready);
}

#[test]
fn short_feed_is_fully_visible() {
    let board = board_with(3);
    assert_eq!(visible_ids(&board), vec![1, 2, 3]);
    assert_eq!(board.remainder_len(), 0);
}

#[test]
fn reveal_drains_and_is_a_noop_at_exhaustion() {
    let mut board = board_with(8);
    assert_eq!(board.reveal_more(), 2);
    assert_eq!(visible_ids(&board), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(board.remainder_len(), 0);

    assert_eq!(board.reveal_more(), 0);
    assert_eq!(visible_ids(&board), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(board.remainder_len(), 0);
}

#[test]
fn reveal_moves_one_page_increment() {
    let mut board = board_with(20);
    assert_eq!(board.visible().len(), 6);
    assert_eq!(board.remainder_len(), 14);

    assert_eq!(board.reveal_more(), 10);
    assert_eq!(board.visible().len(), 16);
    assert_eq!(board.remainder_len(), 4);
}

#[test]
fn no_record_is_created_or_lost_across_reveals() {
    let mut board = board_with(23);
    for _ in 0..5 {
        assert_eq!(board.total_len(), 23);
        board.reveal_more();
    }
    assert_eq!(board.total_len(), 23);
    assert_eq!(board.remainder_len(), 0);

    let mut ids = visible_ids(&board);
    ids.sort_unstable();
    assert_eq!(ids, (1..=23).collect::<Vec<_>>());
}

#[test]
fn select_sorts_visible_descending_by_count() {
    let mut board = board_with(8);
    board.select(4).unwrap();
    board.select(4).unwrap();
    board.select(2).unwrap();

    let counts: Vec<u32> = board.visible().iter().map(|r| r.interaction_count).collect();
    for pair in counts.windows(2) {
        assert!(pair[0] >= pair[1]);
    }
    assert_eq!(visible_ids(&board)[0], 4);
}

#[test]
fn double_select_ranks_the_record_first() {
    let mut board = board_with(8);
    board.select(3).unwrap();
    let selected = board.select(3).unwrap();
    assert_eq!(selected.interaction_count, 2);
    assert_eq!(selected.display_color, PALETTE[2]);
    assert_eq!(visible_ids(&board)[0], 3);
}

#[test]
fn ties_keep_their_prior_relative_order() {
    let mut board = board_with(6);
    board.select(5).unwrap();
    assert_eq!(visible_ids(&board), vec![5, 1, 2, 3, 4, 6]);
}

#[test]
fn select_opens_the_panel_and_tracks_the_record() {
    let mut board = board_with(8);
    assert!(!board.panel_open());
    board.select(2).unwrap();
    assert!(board.panel_open());
    assert_eq!(board.selected(), Some(2));
    assert_eq!(board.selected_record().unwrap().id, 2);

    board.deselect();
    assert!(!board.panel_open());
    assert_eq!(board.selected(), None);
    assert!(board.selected_record().is_none());
}

#[test]
fn selecting_an_unrevealed_or_unknown_record_fails() {
    let mut board = board_with(8);
    // id 7 exists but is still in the remainder buffer
    assert_eq!(board.select(7), Err(BoardError::NotVisible { id: 7 }));
    assert_eq!(board.select(99), Err(BoardError::NotVisible { id: 99 }));
    assert!(!board.panel_open());
}

#[test]
fn fetch_failure_leaves_an_empty_grid_with_observable_error() {
    let mut board = Board::new(BoardConfig::default());
    board.ingest(Err(FetchError::BadStatus { status: 503 }));
    assert!(board.visible().is_empty());
    assert_eq!(board.remainder_len(), 0);
    match board.load_state() {
        LoadState::Failed(e) => assert!(e.contains("503")),
        other => panic!("expected failed state, got {other:?}"),
    }
    assert_eq!(board.select(1), Err(BoardError::NotVisible { id: 1 }));
}

#[tokio::test]
async fn static_source_preserves_feed_order() {
    let source = StaticSource::from_raw((1..=4).map(raw).collect());
    let fetched = source.fetch_all().await.unwrap();
    let ids: Vec<u64> = fetched.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn static_source_surfaces_malformed_records() {
    let mut feed: Vec<RawRecord> = (1..=2).map(raw).collect();
    feed.push(RawRecord {
        id: Some(3),
        title: Some("t".to_string()),
        body: None,
    });
    let source = StaticSource::from_raw(feed);
    match source.fetch_all().await {
        Err(FetchError::Invalid(ValidationError::MissingField { id: 3, field: "body" })) => {}
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[tokio::test]
async fn runner_replays_the_scripted_session() {
    let options = Options {
        script: vec![
            Action::Reveal,
            Action::Select { id: 3 },
            Action::Select { id: 3 },
        ],
        ..Options::default()
    };
    let runner = Runner::new(options).unwrap();
    let source = StaticSource::from_raw((1..=8).map(raw).collect());
    let session = runner.run_with_source(&source).await.unwrap();

    assert_eq!(session.board.visible().len(), 8);
    assert_eq!(session.board.remainder_len(), 0);
    assert_eq!(session.board.selected(), Some(3));
    assert_eq!(session.board.selected_record().unwrap().interaction_count, 2);
    assert_eq!(visible_ids(&session.board)[0], 3);
}

#[tokio::test]
async fn runner_reports_a_failed_fetch_without_crashing() {
    let runner = Runner::new(Options::default()).unwrap();
    let source = StaticSource::failing(500);
    let session = runner.run_with_source(&source).await.unwrap();
    assert!(session.board.visible().is_empty());
    assert!(matches!(session.board.load_state(), LoadState::Failed(_)));
}

#[tokio::test]
async fn runner_script_fails_on_unknown_record() {
    let options = Options {
        script: vec![Action::Select { id: 42 }],
        ..Options::default()
    };
    let runner = Runner::new(options).unwrap();
    let source = StaticSource::from_raw((1..=8).map(raw).collect());
    match runner.run_with_source(&source).await {
        Err(RunnerError::Board(BoardError::NotVisible { id: 42 })) => {}
        other => panic!("expected board error, got {other:?}"),
    }
}

#[test]
fn runner_rejects_bad_options() {
    assert!(matches!(
        Runner::new(Options {
            endpoint: String::new(),
            ..Options::default()
        }),
        Err(RunnerError::EmptyEndpoint)
    ));
    assert!(matches!(
        Runner::new(Options {
            endpoint: "not a url".to_string(),
            ..Options::default()
        }),
        Err(RunnerError::InvalidEndpoint { .. })
    ));
    assert!(matches!(
        Runner::new(Options {
            initial_page_size: 0,
            ..Options::default()
        }),
        Err(RunnerError::ZeroPageSize)
    ));
    assert!(matches!(
        Runner::new(Options {
            page_increment: 0,
            ..Options::default()
        }),
        Err(RunnerError::ZeroPageIncrement)
    ));
}

#[test]
fn output_format_parsing() {
    assert_eq!(output::OutputFormat::parse("json"), Some(output::OutputFormat::Json));
    assert_eq!(output::OutputFormat::parse(" TEXT "), Some(output::OutputFormat::Text));
    assert_eq!(output::OutputFormat::parse("yaml"), None);

    assert_eq!(
        output::infer_format_from_path("./grid.json"),
        Some(output::OutputFormat::Json)
    );
    assert_eq!(
        output::infer_format_from_path("./grid.txt"),
        Some(output::OutputFormat::Text)
    );
    assert_eq!(output::infer_format_from_path("./grid.out"), None);
}

#[test]
fn snapshot_reflects_board_state() {
    let mut board = board_with(8);
    board.select(2).unwrap();
    let snapshot = output::build_snapshot(&board);

    assert_eq!(snapshot.status, "ready");
    assert_eq!(snapshot.visible.len(), 6);
    assert_eq!(snapshot.remainder, 2);
    assert!(snapshot.panel_open);
    assert_eq!(snapshot.panel.as_ref().unwrap().id, 2);
    assert_eq!(snapshot.visible.iter().filter(|t| t.selected).count(), 1);
}

#[test]
fn snapshot_serializes_to_json() {
    let snapshot = output::build_snapshot(&board_with(8));
    let rendered = output::render_json(&snapshot);
    let value: serde_json::Value = serde_json::from_slice(&rendered).unwrap();
    assert_eq!(value["status"], "ready");
    assert_eq!(value["visible"].as_array().unwrap().len(), 6);
    assert_eq!(value["remainder"], 2);
}

#[test]
fn failed_snapshot_renders_the_error() {
    let mut board = Board::new(BoardConfig::default());
    board.ingest(Err(FetchError::BadStatus { status: 404 }));
    let snapshot = output::build_snapshot(&board);
    assert_eq!(snapshot.status, "failed");
    let text = String::from_utf8(output::render_text(&snapshot, true)).unwrap();
    assert!(text.contains("404"));
}

#[test]
fn config_file_accepts_short_aliases() {
    let cfg: ConfigFile = serde_yaml::from_str(
        "endpoint: http://example.com/feed\ninitial: 4\nincrement: 7\n",
    )
    .unwrap();
    assert_eq!(cfg.endpoint.as_deref(), Some("http://example.com/feed"));
    assert_eq!(cfg.initial_page_size, Some(4));
    assert_eq!(cfg.page_increment, Some(7));
}

#[test]
fn raw_record_tolerates_extra_fields() {
    let feed: Vec<RawRecord> = serde_json::from_str(
        r#"[{"userId": 1, "id": 1, "title": "t", "body": "b"}]"#,
    )
    .unwrap();
    assert_eq!(feed.len(), 1);
    assert!(Record::from_raw(feed[0].clone()).is_ok());
}
