use contest_hub::domain::entities::{ContestPatch, ContestStatus, NewContest};
use contest_hub::domain::repositories::ContestRepository;
use contest_hub::infrastructure::persistence::PgContestRepository;
use serde_json::{Map, json};
use sqlx::PgPool;
use std::sync::Arc;

fn new_contest(name: &str, contest_type: &str) -> NewContest {
    let mut extra = Map::new();
    extra.insert("tags".to_string(), json!(["weekly"]));

    NewContest {
        creator_email: "maker@example.com".to_string(),
        creator_name: Some("Maker".to_string()),
        creator_image: None,
        name: name.to_string(),
        contest_type: contest_type.to_string(),
        image: None,
        description: Some("Make something".to_string()),
        task: None,
        price: 10.0,
        prize_money: 100.0,
        deadline: None,
        extra,
    }
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_create_and_find(pool: PgPool) {
    let repo = PgContestRepository::new(Arc::new(pool));

    let contest = repo.create(new_contest("Logo", "Design")).await.unwrap();

    assert_eq!(contest.status, ContestStatus::Pending);
    assert_eq!(contest.participate_count, 0);

    let found = repo.find_by_id(contest.id).await.unwrap().unwrap();
    assert_eq!(found.name, "Logo");
    assert_eq!(found.extra["tags"], json!(["weekly"]));
    assert!(repo.find_by_id(contest.id + 1000).await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_list_filters(pool: PgPool) {
    let repo = PgContestRepository::new(Arc::new(pool));
    let first = repo.create(new_contest("One", "Design")).await.unwrap();
    repo.create(new_contest("Two", "Design")).await.unwrap();
    repo.set_status(first.id, ContestStatus::Approved).await.unwrap();

    assert_eq!(repo.list(None).await.unwrap().len(), 2);

    let approved = repo.list(Some(ContestStatus::Approved)).await.unwrap();
    assert_eq!(approved.len(), 1);
    assert_eq!(approved[0].id, first.id);

    assert_eq!(repo.list_by_creator("maker@example.com").await.unwrap().len(), 2);
    assert!(repo.list_by_creator("other@example.com").await.unwrap().is_empty());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_update_unless_approved(pool: PgPool) {
    let repo = PgContestRepository::new(Arc::new(pool));
    let contest = repo.create(new_contest("One", "Design")).await.unwrap();

    let mut extra = Map::new();
    extra.insert("rules".to_string(), json!("none"));
    let patch = ContestPatch {
        name: Some("Renamed".to_string()),
        extra,
        ..Default::default()
    };

    let updated = repo
        .update_unless_approved(contest.id, patch.clone())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.contest_type, "Design");
    assert_eq!(updated.extra["rules"], "none");
    assert_eq!(updated.extra["tags"], json!(["weekly"]));

    repo.set_status(contest.id, ContestStatus::Approved).await.unwrap();
    assert!(
        repo.update_unless_approved(contest.id, patch)
            .await
            .unwrap()
            .is_none()
    );
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_delete_unless_approved(pool: PgPool) {
    let repo = PgContestRepository::new(Arc::new(pool));
    let pending = repo.create(new_contest("One", "Design")).await.unwrap();
    let approved = repo.create(new_contest("Two", "Design")).await.unwrap();
    repo.set_status(approved.id, ContestStatus::Approved).await.unwrap();

    assert!(repo.delete_unless_approved(pending.id).await.unwrap());
    assert!(!repo.delete_unless_approved(approved.id).await.unwrap());

    assert!(repo.delete(approved.id).await.unwrap());
    assert!(!repo.delete(approved.id).await.unwrap());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_set_status_missing(pool: PgPool) {
    let repo = PgContestRepository::new(Arc::new(pool));

    assert!(!repo.set_status(4242, ContestStatus::Approved).await.unwrap());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_top_and_search(pool: PgPool) {
    let repo = PgContestRepository::new(Arc::new(pool.clone()));
    let quiet = repo.create(new_contest("Quiet", "Writing")).await.unwrap();
    let busy = repo.create(new_contest("Busy", "Graphic Design")).await.unwrap();

    sqlx::query("UPDATE contests SET participate_count = 5 WHERE id = $1")
        .bind(busy.id)
        .execute(&pool)
        .await
        .unwrap();

    let top = repo.top_by_participation(1).await.unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].id, busy.id);

    let found = repo.search_by_type("design").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, busy.id);

    let writing = repo.search_by_type("WRIT").await.unwrap();
    assert_eq!(writing[0].id, quiet.id);
}
