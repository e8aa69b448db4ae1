/*!
 * Full interactive sessions against real stores
 */

use std::sync::Arc;

use argstash::app_config::{Config, StorageBackend};
use argstash::database::open_repository;
use argstash::{Controller, RepositoryScope};

use crate::common::{create_temp_dir, open_all_backends, scripted_input, storage_config};

async fn run_script(controller: &mut Controller, lines: &[&str]) -> String {
    let mut input = scripted_input(lines);
    let mut output = Vec::new();
    controller.run(&mut input, &mut output).await.unwrap();
    String::from_utf8(output).unwrap()
}

#[tokio::test]
async fn test_session_onEveryBackend_shouldStoreListAndAdd() {
    let dir = create_temp_dir().unwrap();
    let config = Config::default();

    for (backend, repo) in open_all_backends(dir.path()).unwrap() {
        let mut controller = Controller::with_config(Arc::clone(&repo), &config);

        let text = run_script(
            &mut controller,
            &["s", "3 4", "a", "s", "foo bar", "a", "l", "q"],
        )
        .await;

        assert!(text.contains("Result: 7"), "backend {}", backend);
        assert!(text.contains("Result: foobar"), "backend {}", backend);
        assert!(text.contains("1) Arg1 = 3; Arg2 = 4"), "backend {}", backend);
        assert!(text.contains("2) Arg1 = foo; Arg2 = bar"), "backend {}", backend);
        assert!(text.ends_with(&format!("Goodbye!\n\n{}\n\n", "-".repeat(50))));

        repo.dispose().unwrap();
    }
}

#[tokio::test]
async fn test_session_withInvalidInput_shouldLeaveStoreUntouched() {
    let dir = create_temp_dir().unwrap();
    let repo = open_repository(&storage_config(StorageBackend::Sqlite, dir.path())).unwrap();
    let mut controller = Controller::with_config(Arc::clone(&repo), &Config::default());

    let long = "z".repeat(51);
    let text = run_script(
        &mut controller,
        &["s", "a b c", "s", &format!("ok {}", long), "a", "x", "q"],
    )
    .await;

    assert!(text.contains("Invalid input: there should be 2 arguments"));
    assert!(text.contains("Invalid input: argument length shouldn't exceed"));
    assert_eq!(text.matches("Wrong input. Try again").count(), 2);
    assert!(controller.current_arguments().is_none());
    assert!(repo.get_all().await.unwrap().is_empty());

    repo.dispose().unwrap();
}

#[tokio::test]
async fn test_session_withEmptyHistory_shouldSayNoRecords() {
    let dir = create_temp_dir().unwrap();
    let repo = open_repository(&storage_config(StorageBackend::Memory, dir.path())).unwrap();
    let mut controller = Controller::with_config(repo, &Config::default());

    let text = run_script(&mut controller, &["l", "q"]).await;

    assert!(text.starts_with("Welcome to argstash."));
    assert!(text.contains("No records stored yet."));
}

#[tokio::test]
async fn test_sessions_acrossRestarts_shouldContinueIds() {
    let dir = create_temp_dir().unwrap();
    let config = storage_config(StorageBackend::Json, dir.path());

    for line in ["1 2", "5 6"] {
        let scope = RepositoryScope::new(open_repository(&config).unwrap());
        let mut controller = Controller::with_config(scope.repository(), &Config::default());
        run_script(&mut controller, &["s", line]).await;
        scope.close().unwrap();
    }

    let scope = RepositoryScope::new(open_repository(&config).unwrap());
    let records = scope.repository().get_all().await.unwrap();
    scope.close().unwrap();

    let ids: Vec<i64> = records.iter().map(|r| r.id.value()).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(records[1].arg2, "6");
}

#[tokio::test]
async fn test_session_withNonUtf8Arguments_shouldKeepRunning() {
    let dir = create_temp_dir().unwrap();
    let repo = open_repository(&storage_config(StorageBackend::Sqlite, dir.path())).unwrap();
    let mut controller = Controller::with_config(Arc::clone(&repo), &Config::default());

    let mut input = std::io::Cursor::new(b"s\n\xff\xfe b\ns\n3 4\nq\n".to_vec());
    let mut output = Vec::new();
    controller.run(&mut input, &mut output).await.unwrap();

    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("Invalid input: input is not valid UTF-8 text."));
    assert!(text.contains("Goodbye!"));

    let records = repo.get_all().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].arg1, "3");

    repo.dispose().unwrap();
}
