use link_shortener::domain::entities::NewLink;
use link_shortener::domain::repositories::LinkRepository;
use link_shortener::infrastructure::persistence::PgLinkRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn new_link(code: &str, url: &str, expiration_time: i64) -> NewLink {
    NewLink::new(code.to_string(), url.to_string(), expiration_time)
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_insert_and_find(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let link = repo
        .insert(new_link("abc", "https://example.com", 0))
        .await
        .unwrap();
    assert_eq!(link.short_path, "abc");
    assert_eq!(link.url, "https://example.com");

    let found = repo.find_by_code("abc").await.unwrap().unwrap();
    assert_eq!(found, link);

    assert!(repo.find_by_code("ABC").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_duplicate_insert_is_already_exists(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.insert(new_link("dup", "https://first.example", 0))
        .await
        .unwrap();
    let err = repo
        .insert(new_link("dup", "https://second.example", 0))
        .await
        .unwrap_err();

    assert!(err.is_already_exists());
    assert_eq!(
        repo.find_by_code("dup").await.unwrap().unwrap().url,
        "https://first.example"
    );
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_negative_expiration_stored_as_sentinel(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let link = repo
        .insert(new_link("neg", "https://example.com", -500))
        .await
        .unwrap();

    assert_eq!(link.expiration_time, -1);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_delete(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.insert(new_link("del", "https://example.com", 0))
        .await
        .unwrap();

    assert!(repo.delete("del").await.unwrap());
    assert!(!repo.delete("del").await.unwrap());
    assert!(repo.find_by_code("del").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_list_and_count(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    for i in 0..33 {
        repo.insert(new_link(&format!("c{:02}", i), "https://example.com", 0))
            .await
            .unwrap();
    }

    assert_eq!(repo.count().await.unwrap(), 33);
    assert_eq!(repo.list(0, 32).await.unwrap().len(), 32);

    let tail = repo.list(32, 32).await.unwrap();
    assert_eq!(tail.len(), 1);

    assert!(repo.list(64, 32).await.unwrap().is_empty());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_delete_expired_only_removes_expired_rows(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.insert(new_link("old", "https://example.com", 1_000))
        .await
        .unwrap();
    repo.insert(new_link("live", "https://example.com", 0))
        .await
        .unwrap();
    repo.insert(new_link("edge", "https://example.com", 2_000))
        .await
        .unwrap();

    assert!(!repo.delete_expired("live", 2_000).await.unwrap());
    assert!(!repo.delete_expired("edge", 2_000).await.unwrap());
    assert!(!repo.delete_expired("missing", 2_000).await.unwrap());
    assert!(repo.delete_expired("old", 2_000).await.unwrap());

    assert!(repo.find_by_code("old").await.unwrap().is_none());
    assert!(repo.find_by_code("live").await.unwrap().is_some());
    assert!(repo.find_by_code("edge").await.unwrap().is_some());
}
