//! End-to-end coverage of the ledger and the popularity sweep on SQLite.
//!
//! Each test runs against an isolated database file with migrations applied,
//! so the unique constraints, cascades, and `BEGIN IMMEDIATE` transactions are
//! the real ones.

use std::sync::Arc;

use futures::future::join_all;
use tempfile::TempDir;
use tinderbox_core::{PersonRepository, PopularityNotifier, PreferenceLedger};
use tinderbox_domain::{NewPerson, NotifierConfig, PageRequest, TinderboxError};
use tinderbox_infra::database::{
    DbManager, SqlitePersonRepository, SqlitePreferenceRepository, SqliteUserRepository,
};
use tinderbox_infra::notification::LogMailChannel;

struct DbHarness {
    _temp_dir: TempDir,
    people: Arc<SqlitePersonRepository>,
    users: Arc<SqliteUserRepository>,
    ledger: Arc<PreferenceLedger>,
}

impl DbHarness {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("temporary directory should be created");
        let manager = DbManager::new(temp_dir.path().join("ledger.db"), 8)
            .expect("database manager should initialise");
        manager.run_migrations().expect("schema migrations should apply");
        let db = Arc::new(manager);

        let people = Arc::new(SqlitePersonRepository::new(Arc::clone(&db)));
        let users = Arc::new(SqliteUserRepository::new(Arc::clone(&db)));
        let preferences = Arc::new(SqlitePreferenceRepository::new(db));
        let ledger = Arc::new(PreferenceLedger::new(people.clone(), preferences, users.clone()));

        Self { _temp_dir: temp_dir, people, users, ledger }
    }

    async fn users(&self, n: usize) -> Vec<i64> {
        let mut ids = Vec::with_capacity(n);
        for i in 0..n {
            let user = self
                .users
                .create(&format!("User {i}"), &format!("user{i}@example.com"))
                .await
                .expect("user should be created");
            ids.push(user.id);
        }
        ids
    }

    async fn person(&self, name: &str) -> i64 {
        self.people
            .create(NewPerson::new(name, 29, vec!["https://picsum.photos/400/500".into()], "Austin, TX"))
            .await
            .expect("person should be created")
            .id
    }

    async fn like_count(&self, id: i64) -> i64 {
        self.people.find_by_id(id).await.unwrap().expect("person exists").like_count
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_duplicate_likes_count_once() {
    let harness = DbHarness::new();
    let user = harness.users(1).await[0];
    let target = harness.person("Emma Watson").await;

    let attempts = (0..8).map(|_| {
        let ledger = Arc::clone(&harness.ledger);
        tokio::spawn(async move { ledger.record_like(user, target).await })
    });
    let results: Vec<_> =
        join_all(attempts).await.into_iter().map(|joined| joined.expect("task joins")).collect();

    let successes = results.iter().filter(|r| r.is_ok()).count();
    let duplicates = results
        .iter()
        .filter(|r| matches!(r, Err(TinderboxError::DuplicateAction(_))))
        .count();
    assert_eq!(successes, 1);
    assert_eq!(duplicates, 7);
    assert_eq!(harness.like_count(target).await, 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_likes_from_distinct_users_all_count() {
    let harness = DbHarness::new();
    let users = harness.users(20).await;
    let target = harness.person("John Smith").await;

    let attempts = users.iter().copied().map(|user| {
        let ledger = Arc::clone(&harness.ledger);
        tokio::spawn(async move { ledger.record_like(user, target).await })
    });
    for joined in join_all(attempts).await {
        joined.expect("task joins").expect("like succeeds");
    }

    assert_eq!(harness.like_count(target).await, 20);
}

#[tokio::test(flavor = "multi_thread")]
async fn recommended_excludes_swiped_people_in_sql() {
    let harness = DbHarness::new();
    let user = harness.users(1).await[0];
    let liked = harness.person("Liked").await;
    let disliked = harness.person("Disliked").await;
    let fresh = harness.person("Fresh").await;

    harness.ledger.record_like(user, liked).await.unwrap();
    harness.ledger.record_dislike(user, disliked).await.unwrap();

    let page = harness.ledger.list_recommended(Some(user), PageRequest::default()).await.unwrap();
    assert_eq!(page.items.iter().map(|p| p.id).collect::<Vec<_>>(), vec![fresh]);
    assert_eq!(page.total, 1);

    let everyone = harness.ledger.list_recommended(None, PageRequest::default()).await.unwrap();
    assert_eq!(everyone.total, 3);
}

#[tokio::test(flavor = "multi_thread")]
async fn liked_list_reflects_reversals() {
    let harness = DbHarness::new();
    let user = harness.users(1).await[0];
    let first = harness.person("First").await;
    let second = harness.person("Second").await;

    harness.ledger.record_like(user, first).await.unwrap();
    harness.ledger.record_like(user, second).await.unwrap();
    harness.ledger.record_dislike(user, first).await.unwrap();

    let liked = harness.ledger.list_liked(user).await.unwrap();
    assert_eq!(liked.len(), 1);
    assert_eq!(liked[0].person.id, second);
    assert_eq!(liked[0].person.like_count, 1);
    assert_eq!(harness.like_count(first).await, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn fifty_one_likes_trigger_a_single_sweep_notification() {
    let harness = DbHarness::new();
    let users = harness.users(52).await;
    let target = harness.person("X").await;
    let notifier = PopularityNotifier::new(
        harness.people.clone(),
        Arc::new(LogMailChannel::new("noreply@tinderbox.local")),
        NotifierConfig::default(),
    );

    for user in &users[..51] {
        harness.ledger.record_like(*user, target).await.unwrap();
    }

    let report = notifier.sweep().await.unwrap();
    assert_eq!(report.notified, vec![target]);
    assert!(harness.people.find_by_id(target).await.unwrap().unwrap().admin_notified);

    harness.ledger.record_like(users[51], target).await.unwrap();
    let report = notifier.sweep().await.unwrap();
    assert_eq!(report.eligible, 0);
    assert_eq!(harness.like_count(target).await, 52);
}
