//! Behaviour of the in-memory store across its ports.

use super::*;
use crate::domain::{Address, ImageReference};
use rstest::{fixture, rstest};

#[fixture]
fn store() -> InMemoryStore {
    InMemoryStore::new()
}

fn external(id: &str) -> ExternalId {
    ExternalId::new(id).expect("valid id")
}

async fn register(store: &InMemoryStore, id: &str, alias: Option<&str>) -> User {
    let (user, _) = store
        .get_or_create(&NewUser::new(external(id), false))
        .await
        .expect("registration succeeds");
    match alias {
        Some(alias) => store
            .set_alias(&user.id(), &Alias::new(alias).expect("valid alias"))
            .await
            .expect("rename succeeds")
            .expect("user exists"),
        None => user,
    }
}

fn new_report(owner: UserId) -> NewReport {
    NewReport::new(
        owner,
        ImageReference::new("photo").expect("valid reference"),
        None,
        Address::parse("Musterstraße 12, Berlin").expect("valid address"),
        "1 Jahr",
    )
    .expect("valid report")
}

#[rstest]
#[tokio::test]
async fn get_or_create_is_idempotent(store: InMemoryStore) {
    let (first, created_first) = store
        .get_or_create(&NewUser::new(external("42"), false))
        .await
        .expect("first call succeeds");
    let (second, created_second) = store
        .get_or_create(&NewUser::new(external("42"), true))
        .await
        .expect("second call succeeds");

    assert!(created_first);
    assert!(!created_second);
    assert_eq!(first.id(), second.id());
    assert!(!second.is_admin());
}

#[rstest]
#[tokio::test]
async fn set_alias_on_unknown_user_returns_none(store: InMemoryStore) {
    let alias = Alias::new("Alex").expect("valid alias");
    let result = store
        .set_alias(&UserId::random(), &alias)
        .await
        .expect("lookup succeeds");
    assert!(result.is_none());
}

#[rstest]
#[tokio::test]
async fn insert_assigns_increasing_ids_and_credits_owner(store: InMemoryStore) {
    let owner = register(&store, "1", Some("Alex")).await;

    let first = store
        .insert_crediting_owner(&new_report(owner.id()), ScoringEvent::ReportSubmitted)
        .await
        .expect("insert succeeds");
    let second = store
        .insert_crediting_owner(&new_report(owner.id()), ScoringEvent::ReportSubmitted)
        .await
        .expect("insert succeeds");

    assert!(second.id() > first.id());
    assert_eq!(first.confirmation_count(), 0);
    let stored = store
        .find_by_external_id(&external("1"))
        .await
        .expect("lookup succeeds")
        .expect("user exists");
    assert_eq!(stored.points(), 10);
}

#[rstest]
#[tokio::test]
async fn insert_rejects_unknown_owner(store: InMemoryStore) {
    let result = store
        .insert_crediting_owner(&new_report(UserId::random()), ScoringEvent::ReportSubmitted)
        .await;
    assert!(matches!(result, Err(ReportRepositoryError::UnknownOwner { .. })));
    assert!(store.list_all().await.expect("list succeeds").is_empty());
}

#[rstest]
#[tokio::test]
async fn deleted_ids_are_not_reused(store: InMemoryStore) {
    let owner = register(&store, "1", None).await;
    let first = store
        .insert_crediting_owner(&new_report(owner.id()), ScoringEvent::ReportSubmitted)
        .await
        .expect("insert succeeds");
    store.delete(first.id()).await.expect("delete succeeds");

    let second = store
        .insert_crediting_owner(&new_report(owner.id()), ScoringEvent::ReportSubmitted)
        .await
        .expect("insert succeeds");

    assert_ne!(first.id(), second.id());
}

#[rstest]
#[tokio::test]
async fn confirm_increments_count_and_credits_owner(store: InMemoryStore) {
    let owner = register(&store, "1", Some("Alex")).await;
    let report = store
        .insert_crediting_owner(&new_report(owner.id()), ScoringEvent::ReportSubmitted)
        .await
        .expect("insert succeeds");

    let confirmed = store
        .confirm_crediting_owner(report.id(), ScoringEvent::ConfirmationReceived)
        .await
        .expect("confirm succeeds")
        .expect("report exists");

    assert_eq!(confirmed.confirmation_count, 1);
    assert_eq!(confirmed.owner, owner.id());
    let board = store.leaderboard(5).await.expect("leaderboard succeeds");
    assert_eq!(board.first().map(|entry| entry.points), Some(8));
}

#[rstest]
#[tokio::test]
async fn confirm_missing_report_returns_none(store: InMemoryStore) {
    let id = ReportId::new(99).expect("valid id");
    let result = store
        .confirm_crediting_owner(id, ScoringEvent::ConfirmationReceived)
        .await
        .expect("confirm succeeds");
    assert!(result.is_none());
}

#[rstest]
#[tokio::test]
async fn listings_are_newest_first_and_filtered_by_owner(store: InMemoryStore) {
    let alex = register(&store, "1", Some("Alex")).await;
    let kim = register(&store, "2", Some("Kim")).await;
    for owner in [alex.id(), kim.id(), alex.id()] {
        store
            .insert_crediting_owner(&new_report(owner), ScoringEvent::ReportSubmitted)
            .await
            .expect("insert succeeds");
    }

    let all = store.list_all().await.expect("list succeeds");
    let ids: Vec<i64> = all.iter().map(|report| report.id().get()).collect();
    assert_eq!(ids, vec![3, 2, 1]);

    let mine = store.list_by_owner(&alex.id()).await.expect("list succeeds");
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|report| report.owner() == alex.id()));
}

#[rstest]
#[tokio::test]
async fn leaderboard_skips_users_without_alias_and_limits(store: InMemoryStore) {
    let anonymous = register(&store, "0", None).await;
    store
        .credit(&anonymous.id(), ScoringEvent::ReportSubmitted)
        .await
        .expect("credit succeeds");
    for (id, alias) in [("1", "Alex"), ("2", "Kim"), ("3", "Sam")] {
        register(&store, id, Some(alias)).await;
    }
    let sam = store
        .find_by_external_id(&external("3"))
        .await
        .expect("lookup succeeds")
        .expect("user exists");
    store
        .credit(&sam.id(), ScoringEvent::ConfirmationReceived)
        .await
        .expect("credit succeeds");

    let board = store.leaderboard(2).await.expect("leaderboard succeeds");
    let aliases: Vec<&str> = board.iter().map(|entry| entry.alias.as_ref()).collect();

    assert_eq!(aliases, vec!["Sam", "Alex"]);
}

#[rstest]
#[tokio::test]
async fn leaderboard_caps_at_five_of_many_qualifying_users(store: InMemoryStore) {
    for id in ["a", "b"] {
        let anonymous = register(&store, id, None).await;
        for _ in 0..10 {
            store
                .credit(&anonymous.id(), ScoringEvent::ReportSubmitted)
                .await
                .expect("credit succeeds");
        }
    }
    for rank in 1..=7 {
        let user = register(&store, &rank.to_string(), Some(&format!("User{rank}"))).await;
        for _ in 0..rank {
            store
                .credit(&user.id(), ScoringEvent::ConfirmationReceived)
                .await
                .expect("credit succeeds");
        }
    }

    let board = store.leaderboard(5).await.expect("leaderboard succeeds");
    let ranking: Vec<(&str, u64)> = board
        .iter()
        .map(|entry| (entry.alias.as_ref(), entry.points))
        .collect();

    assert_eq!(
        ranking,
        vec![
            ("User7", 21),
            ("User6", 18),
            ("User5", 15),
            ("User4", 12),
            ("User3", 9),
        ]
    );
}

#[rstest]
#[tokio::test]
async fn credit_unknown_user_returns_none(store: InMemoryStore) {
    let balance = store
        .credit(&UserId::random(), ScoringEvent::ReportSubmitted)
        .await
        .expect("credit succeeds");
    assert!(balance.is_none());
}
