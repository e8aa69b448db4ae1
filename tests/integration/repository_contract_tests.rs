/*!
 * Behaviour shared by every storage backend
 */

use std::sync::Arc;

use argstash::app_config::StorageBackend;
use argstash::database::{open_repository, NewArguments, RepositoryScope};
use argstash::StorageError;

use crate::common::{create_temp_dir, open_all_backends, storage_config};

#[tokio::test]
async fn test_getAll_onEmptyStore_shouldReturnEmptySequence() {
    let dir = create_temp_dir().unwrap();

    for (backend, repo) in open_all_backends(dir.path()).unwrap() {
        let records = repo.get_all().await.unwrap();
        assert!(records.is_empty(), "backend {}", backend);
        repo.dispose().unwrap();
    }
}

#[tokio::test]
async fn test_insertThenGetAll_shouldReturnThreeRecordsInOrder() {
    let dir = create_temp_dir().unwrap();

    for (backend, repo) in open_all_backends(dir.path()).unwrap() {
        for (a, b) in [("3", "4"), ("10", "20"), ("foo", "bar")] {
            repo.insert(NewArguments::new(a, b)).await.unwrap();
        }

        let records = repo.get_all().await.unwrap();
        let summary: Vec<(i64, &str, &str)> = records
            .iter()
            .map(|r| (r.id.value(), r.arg1.as_str(), r.arg2.as_str()))
            .collect();

        assert_eq!(
            summary,
            vec![(1, "3", "4"), (2, "10", "20"), (3, "foo", "bar")],
            "backend {}",
            backend
        );
        repo.dispose().unwrap();
    }
}

#[tokio::test]
async fn test_insert_manyTimes_shouldYieldStrictlyIncreasingIds() {
    let dir = create_temp_dir().unwrap();

    for (backend, repo) in open_all_backends(dir.path()).unwrap() {
        let mut ids = Vec::new();
        for i in 0..20 {
            let record = repo
                .insert(NewArguments::new(i.to_string(), "x"))
                .await
                .unwrap();
            ids.push(record.id);
        }

        assert!(
            ids.windows(2).all(|pair| pair[0] < pair[1]),
            "backend {} produced {:?}",
            backend,
            ids
        );
        repo.dispose().unwrap();
    }
}

#[tokio::test]
async fn test_insert_fromConcurrentTasks_shouldKeepIdsUnique() {
    let dir = create_temp_dir().unwrap();

    for (backend, repo) in open_all_backends(dir.path()).unwrap() {
        let mut handles = Vec::new();
        for i in 0..16 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.insert(NewArguments::new(format!("a{}", i), "b")).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let ids: Vec<i64> = repo
            .get_all()
            .await
            .unwrap()
            .iter()
            .map(|r| r.id.value())
            .collect();
        assert_eq!(ids, (1..=16).collect::<Vec<i64>>(), "backend {}", backend);
        repo.dispose().unwrap();
    }
}

#[tokio::test]
async fn test_dispose_twice_shouldSucceedAndBlockFurtherCalls() {
    let dir = create_temp_dir().unwrap();

    for (backend, repo) in open_all_backends(dir.path()).unwrap() {
        repo.dispose().unwrap();
        repo.dispose().unwrap();

        assert!(
            matches!(repo.get_all().await, Err(StorageError::Disposed)),
            "backend {}",
            backend
        );
        assert!(matches!(
            repo.insert(NewArguments::new("a", "b")).await,
            Err(StorageError::Disposed)
        ));
    }
}

#[tokio::test]
async fn test_reopen_fileBackends_shouldKeepHistory() {
    let dir = create_temp_dir().unwrap();

    for backend in [StorageBackend::Json, StorageBackend::Sqlite] {
        let config = storage_config(backend, dir.path());
        {
            let scope = RepositoryScope::new(open_repository(&config).unwrap());
            scope
                .repository()
                .insert(NewArguments::new("3", "4"))
                .await
                .unwrap();
            scope.close().unwrap();
        }

        let repo = open_repository(&config).unwrap();
        let next = repo.insert(NewArguments::new("5", "6")).await.unwrap();
        let all = repo.get_all().await.unwrap();

        assert_eq!(next.id.value(), 2, "backend {}", backend);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].arg1, "3");
        repo.dispose().unwrap();
    }
}

#[test]
fn test_scope_droppedOnEarlyReturn_shouldDispose() {
    let dir = create_temp_dir().unwrap();
    let config = storage_config(StorageBackend::Sqlite, dir.path());
    let repo = open_repository(&config).unwrap();

    fn fails_midway(scope: RepositoryScope<argstash::ArgumentsRecord>) -> Result<(), String> {
        let _repo = scope.repository();
        Err("operator aborted".to_string())
    }

    let outcome = fails_midway(RepositoryScope::new(Arc::clone(&repo)));
    assert!(outcome.is_err());

    let result = tokio_test::block_on(repo.get_all());
    assert!(matches!(result, Err(StorageError::Disposed)));
}

#[tokio::test]
async fn test_insert_fromTwoJsonHandles_shouldKeepIdsAscending() {
    let dir = create_temp_dir().unwrap();
    let config = storage_config(StorageBackend::Json, dir.path());
    let first = open_repository(&config).unwrap();
    let second = open_repository(&config).unwrap();

    first.insert(NewArguments::new("3", "4")).await.unwrap();
    let other = second.insert(NewArguments::new("10", "20")).await.unwrap();

    assert_eq!(other.id.value(), 2);
    assert_eq!(first.get_all().await.unwrap().len(), 2);

    first.dispose().unwrap();
    second.dispose().unwrap();
}
