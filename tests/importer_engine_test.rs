// ==========================================
// KOL 导入系统 - 批量导入器集成测试
// ==========================================
// 覆盖: 行隔离 / 跳过与失败区分 / 进度 / 状态 / 取消 / 致命错误
// ==========================================


use kol_import::domain::{ImportState, KolType, RawRow};
use kol_import::importer::{
    CancellationFlag, ImportError, ImportProgressListener, InputFormat, KolImporter,
    KolImporterImpl,
};
use kol_import::ImportProgress;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use test_helpers::{
    importable_rows, instagram_row, MockConfigReader, MockKolRepository, ProgressRecorder,
};

fn create_importer(
    repo: MockKolRepository,
) -> KolImporterImpl<MockKolRepository, MockConfigReader> {
    KolImporterImpl::with_defaults(repo, MockConfigReader::default())
}

// ==========================================
// 行隔离
// ==========================================

#[tokio::test]
async fn test_fifth_row_failure_is_isolated() {
    kol_import::logging::init_test();
    let importer = create_importer(MockKolRepository::failing_on(&["kol5"]));

    let outcome = importer.import_rows("ten.csv", importable_rows(10)).await;

    assert_eq!(outcome.attempted, 10);
    assert_eq!(outcome.succeeded, 9);
    assert_eq!(outcome.failed, 1);
    assert_eq!(outcome.skipped, 0);
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].row_number, 5);

    // 第 6-10 行仍然被提交
    let names = importer.repository().submitted_names();
    assert_eq!(names.len(), 10);
    assert_eq!(names[5..], ["kol6", "kol7", "kol8", "kol9", "kol10"]);
}

#[tokio::test]
async fn test_unreachable_service_fails_every_row_without_aborting() {
    let importer = create_importer(MockKolRepository::unreachable());

    let outcome = importer.import_rows("down.csv", importable_rows(4)).await;

    assert_eq!(outcome.attempted, 4);
    assert_eq!(outcome.succeeded, 0);
    assert_eq!(outcome.failed, 4);
    assert!(outcome.failures.iter().all(|f| f.reason.contains("connection refused")));
}

// ==========================================
// 跳过 vs 失败
// ==========================================

#[tokio::test]
async fn test_name_without_platform_is_skipped_not_failed() {
    let importer = create_importer(MockKolRepository::default());
    let rows = vec![
        RawRow::from_pairs([("name", "No Links"), ("niches", "Food")]),
        RawRow::from_pairs([("instagram", "https://instagram.com/anon")]),
        instagram_row("Amy"),
    ];

    let outcome = importer.import_rows("mixed.csv", rows).await;

    assert_eq!(outcome.skipped, 2);
    assert_eq!(outcome.attempted, 1);
    assert_eq!(outcome.failed, 0);
    assert_eq!(importer.repository().submitted_names(), vec!["Amy"]);
}

#[tokio::test]
async fn test_end_to_end_two_line_scenario() {
    let importer = create_importer(MockKolRepository::default());
    let text = "Name,IG Link,Rate for IG\nJohn,https://instagram.com/john,RM2500\nJane,,";

    let outcome = importer
        .import_bytes("scenario.csv", text.as_bytes(), InputFormat::Delimited)
        .await
        .unwrap();

    assert_eq!(outcome.total_rows, 2);
    assert_eq!(outcome.attempted, 1);
    assert_eq!(outcome.succeeded, 1);
    assert_eq!(outcome.failed, 0);
    assert_eq!(outcome.skipped, 1);

    let records = importer.repository().submitted_records();
    assert_eq!(records[0].kol_type, KolType::Instagram);
    assert_eq!(records[0].instagram_rate, 2500.0);
    assert_eq!(records[0].rate, 2500.0);
}

#[tokio::test]
async fn test_classifier_precedence_through_pipeline() {
    let importer = create_importer(MockKolRepository::default());
    let rows = vec![
        RawRow::from_pairs([
            ("name", "Both"),
            ("instagram", "https://instagram.com/both"),
            ("blog", "https://both.blog"),
        ]),
        RawRow::from_pairs([("name", "Threads Only"), ("Threads", "https://threads.net/@t")]),
    ];

    importer.import_rows("types.csv", rows).await;

    let records = importer.repository().submitted_records();
    assert_eq!(records[0].kol_type, KolType::SocialMedia);
    assert_eq!(records[1].kol_type, KolType::TwitterThread);
}

// ==========================================
// 进度与状态
// ==========================================

#[tokio::test]
async fn test_progress_is_monotonic_and_reaches_100() {
    let recorder = Arc::new(ProgressRecorder::default());
    let importer = create_importer(MockKolRepository::failing_on(&["kol2"]))
        .with_listener(recorder.clone());

    let mut rows = importable_rows(3);
    rows.insert(1, RawRow::from_pairs([("name", "skip me")]));
    importer.import_rows("progress.csv", rows).await;

    let percents = recorder.percents();
    assert_eq!(percents, vec![25, 50, 75, 100]);
    assert!(percents.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(
        recorder.states(),
        vec![ImportState::Running, ImportState::Completed]
    );
}

#[tokio::test]
async fn test_empty_row_set_completes_immediately() {
    let recorder = Arc::new(ProgressRecorder::default());
    let importer = create_importer(MockKolRepository::default()).with_listener(recorder.clone());

    let outcome = importer.import_rows("empty.json", Vec::new()).await;

    assert_eq!(outcome.rows_processed(), 0);
    assert!(recorder.percents().is_empty());
    assert_eq!(
        recorder.states(),
        vec![ImportState::Running, ImportState::Completed]
    );
}

// ==========================================
// 取消
// ==========================================

/// 处理到第 n 行后触发取消
struct CancelAfter {
    rows: usize,
    flag: CancellationFlag,
}

impl ImportProgressListener for CancelAfter {
    fn on_progress(&self, progress: ImportProgress) {
        if progress.rows_processed >= self.rows {
            self.flag.cancel();
        }
    }
}

#[tokio::test]
async fn test_cancellation_stops_between_rows() {
    let flag = CancellationFlag::new();
    let importer = create_importer(MockKolRepository::default())
        .with_cancellation(flag.clone())
        .with_listener(Arc::new(CancelAfter {
            rows: 3,
            flag: flag.clone(),
        }));

    let outcome = importer.import_rows("cancel.csv", importable_rows(8)).await;

    assert!(outcome.cancelled);
    assert_eq!(outcome.succeeded, 3);
    assert_eq!(outcome.rows_processed(), 3);
    assert_eq!(outcome.total_rows, 8);
    assert!(outcome.finished_at.is_some());
    assert_eq!(importer.repository().submitted_names().len(), 3);
}

#[tokio::test]
async fn test_row_delay_does_not_change_counts() {
    let recorder = Arc::new(ProgressRecorder::default());
    let importer = create_importer(MockKolRepository::default())
        .with_row_delay(Duration::from_millis(1))
        .with_listener(recorder.clone());

    let outcome = importer.import_rows("slow.csv", importable_rows(3)).await;

    assert_eq!(outcome.succeeded, 3);
    assert_eq!(outcome.failed, 0);
    assert_eq!(recorder.percents(), vec![33, 67, 100]);
}

// ==========================================
// 文件输入
// ==========================================

#[tokio::test]
async fn test_import_json_file() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        file,
        r#"[
            {{"name": "Amy", "tiktok": "https://tiktok.com/@amy", "tiktokRate": "RM 800", "niches": ["Food", "Travel"]}},
            {{"name": "Ben"}}
        ]"#
    )
    .unwrap();

    let importer = create_importer(MockKolRepository::default());
    let outcome = importer.import_file(file.path()).await.unwrap();

    assert_eq!(outcome.succeeded, 1);
    assert_eq!(outcome.skipped, 1);

    let records = importer.repository().submitted_records();
    assert_eq!(records[0].kol_type, KolType::Tiktok);
    assert_eq!(records[0].tiktok_rate, 800.0);
    assert_eq!(records[0].niches, vec!["Food", "Travel"]);
}

#[tokio::test]
async fn test_unreadable_bytes_are_fatal() {
    let recorder = Arc::new(ProgressRecorder::default());
    let importer = create_importer(MockKolRepository::default()).with_listener(recorder.clone());

    let result = importer
        .import_bytes("binary.csv", &[0xff, 0xfe, 0xfd], InputFormat::Delimited)
        .await;

    assert!(matches!(result, Err(ImportError::Unreadable(_))));
    assert!(recorder.states().is_empty());
    assert!(importer.repository().submitted_names().is_empty());
}

#[tokio::test]
async fn test_missing_file_is_reported() {
    let importer = create_importer(MockKolRepository::default());

    let result = importer
        .import_file(std::path::Path::new("/definitely/not/here.csv"))
        .await;

    assert!(matches!(result, Err(ImportError::FileNotFound(_))));
}
