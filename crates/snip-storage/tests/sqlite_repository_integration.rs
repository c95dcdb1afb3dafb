use std::sync::Arc;

use snip_core::{RecordKey, ShortCode, UrlRecord};
use snip_storage::{ReadRepository, Repository, SqliteRepository, StorageError};
use sqlx::sqlite::SqlitePoolOptions;

struct Fixture {
    repo: SqliteRepository,
}

impl Fixture {
    async fn start() -> Self {
        // every connection to `sqlite::memory:` is its own database, so the
        // pool must hold exactly one
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("open sqlite");

        let repo = SqliteRepository::new(pool);
        repo.init().await.expect("create schema");

        Self { repo }
    }
}

fn code(value: &str) -> ShortCode {
    ShortCode::new_unchecked(value)
}

fn record(url: &str) -> UrlRecord {
    UrlRecord::new(url)
}

#[tokio::test]
async fn insert_and_get_by_code() {
    let fixture = Fixture::start().await;
    let short_code = code("abc123");
    let stored = record("https://example.com/ünïcode?q=1#frag");

    fixture
        .repo
        .insert(&short_code, stored.clone())
        .await
        .unwrap();

    let got = fixture
        .repo
        .get(&RecordKey::Code(short_code))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(got.original_url, stored.original_url);
    assert_eq!(got.created_at.as_second(), stored.created_at.as_second());
}

#[tokio::test]
async fn insert_conflicts_when_code_already_exists() {
    let fixture = Fixture::start().await;
    let short_code = code("abc123");

    fixture
        .repo
        .insert(&short_code, record("https://one.example"))
        .await
        .unwrap();

    let err = fixture
        .repo
        .insert(&short_code, record("https://two.example"))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Conflict(_)));

    let got = fixture
        .repo
        .get(&RecordKey::Code(short_code))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(got.original_url, "https://one.example");
}

#[tokio::test]
async fn codes_are_case_sensitive() {
    let fixture = Fixture::start().await;

    fixture
        .repo
        .insert(&code("AbC"), record("https://upper.example"))
        .await
        .unwrap();
    fixture
        .repo
        .insert(&code("abc"), record("https://lower.example"))
        .await
        .unwrap();

    let got = fixture
        .repo
        .get(&RecordKey::Code(code("abc")))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(got.original_url, "https://lower.example");
}

#[tokio::test]
async fn assigned_ids_are_sequential() {
    let fixture = Fixture::start().await;

    let first = fixture
        .repo
        .insert_assigned(record("https://a.com"))
        .await
        .unwrap();
    let second = fixture
        .repo
        .insert_assigned(record("https://b.com"))
        .await
        .unwrap();
    assert_eq!(first, 1);
    assert_eq!(second, 2);

    let got = fixture
        .repo
        .get(&RecordKey::Id(first))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(got.original_url, "https://a.com");
}

#[tokio::test]
async fn missing_keys_return_none() {
    let fixture = Fixture::start().await;

    assert!(fixture
        .repo
        .get(&RecordKey::Code(code("never")))
        .await
        .unwrap()
        .is_none());
    assert!(fixture.repo.get(&RecordKey::Id(42)).await.unwrap().is_none());
}

#[tokio::test]
async fn ids_beyond_rowid_range_are_missing() {
    let fixture = Fixture::start().await;
    fixture
        .repo
        .insert_assigned(record("https://a.com"))
        .await
        .unwrap();

    for id in [i64::MAX as u64 + 1, u64::MAX] {
        assert!(fixture.repo.get(&RecordKey::Id(id)).await.unwrap().is_none());
    }
}

#[tokio::test]
async fn init_is_idempotent() {
    let fixture = Fixture::start().await;

    fixture
        .repo
        .insert(&code("keep"), record("https://example.com"))
        .await
        .unwrap();

    fixture.repo.init().await.unwrap();
    fixture.repo.init().await.unwrap();

    assert!(fixture
        .repo
        .get(&RecordKey::Code(code("keep")))
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn racing_inserts_of_one_code_have_one_winner() {
    let fixture = Fixture::start().await;
    let repo = Arc::new(fixture.repo);
    let mut handles = vec![];

    for i in 0..8 {
        let repo = Arc::clone(&repo);
        handles.push(tokio::spawn(async move {
            repo.insert(&code("shared"), record(&format!("https://example{i}.com")))
                .await
        }));
    }

    let mut winners = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => winners += 1,
            Err(StorageError::Conflict(_)) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert_eq!(winners, 1);
}

#[tokio::test]
async fn connect_creates_file_and_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("urls.db").display());

    let repo = SqliteRepository::connect(&url).await.unwrap();
    repo.insert(&code("persist"), record("https://example.com"))
        .await
        .unwrap();
    repo.close().await;

    let reopened = SqliteRepository::connect(&url).await.unwrap();
    let got = reopened
        .get(&RecordKey::Code(code("persist")))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(got.original_url, "https://example.com");
    reopened.close().await;
}
