//! Integration tests for `DieselUserRepository` against a live PostgreSQL.
//!
//! Set `TEST_DATABASE_URL` to a disposable database to run them; without it
//! every test prints a skip marker and returns. Migrations are applied once
//! per process. Names carry a random suffix so tests can share the table.

use std::sync::OnceLock;

use rstest::{fixture, rstest};
use user_service::domain::ports::{UserPersistenceError, UserRepository};
use user_service::domain::{UserDraft, UserId};
use user_service::outbound::persistence::{
    DbPool, DieselUserRepository, PoolConfig, run_migrations,
};
use uuid::Uuid;

const TEST_DATABASE_URL: &str = "TEST_DATABASE_URL";

fn database_url() -> Option<String> {
    std::env::var(TEST_DATABASE_URL)
        .ok()
        .filter(|url| !url.trim().is_empty())
}

fn migrate_once(url: &str) {
    static MIGRATED: OnceLock<Result<usize, String>> = OnceLock::new();
    let outcome = MIGRATED.get_or_init(|| run_migrations(url).map_err(|err| err.to_string()));
    if let Err(reason) = outcome {
        panic!("migrations failed: {reason}");
    }
}

async fn repository() -> Option<DieselUserRepository> {
    let Some(url) = database_url() else {
        eprintln!("SKIP-TEST-DATABASE: {TEST_DATABASE_URL} not set");
        return None;
    };
    let migrate_url = url.clone();
    tokio::task::spawn_blocking(move || migrate_once(&migrate_url))
        .await
        .expect("migration task completes");
    let config = PoolConfig::new(url).with_max_size(2).with_min_idle(Some(1));
    let pool = DbPool::new(config).await.expect("pool builds");
    Some(DieselUserRepository::new(pool))
}

struct Names {
    suffix: String,
}

impl Names {
    fn draft(&self, label: &str) -> UserDraft {
        UserDraft::try_from_strings(
            format!("{label}-{}", self.suffix),
            format!("{label}-{}@example.com", self.suffix),
        )
        .expect("valid draft")
    }
}

#[fixture]
fn names() -> Names {
    Names {
        suffix: Uuid::new_v4().simple().to_string(),
    }
}

#[rstest]
#[tokio::test]
async fn create_then_find_round_trips(names: Names) {
    let Some(repo) = repository().await else { return };
    let draft = names.draft("ada");

    let created = repo.create(&draft).await.expect("create succeeds");
    let fetched = repo
        .find_by_id(created.id())
        .await
        .expect("find succeeds")
        .expect("user exists");

    assert!(created.id().get() > 0);
    assert_eq!(fetched, created);
    assert_eq!(fetched.name(), draft.name());
    assert_eq!(fetched.email(), draft.email());
}

#[rstest]
#[tokio::test]
async fn duplicate_name_and_email_are_conflicts(names: Names) {
    let Some(repo) = repository().await else { return };
    let original = names.draft("bob");
    repo.create(&original).await.expect("seed");

    let same_name = UserDraft::new(original.name().clone(), names.draft("other").email().clone());
    let same_email = UserDraft::new(names.draft("other").name().clone(), original.email().clone());

    assert_eq!(
        repo.create(&same_name).await,
        Err(UserPersistenceError::conflict("name"))
    );
    assert_eq!(
        repo.create(&same_email).await,
        Err(UserPersistenceError::conflict("email"))
    );
}

#[rstest]
#[tokio::test]
async fn list_contains_created_users_in_id_order(names: Names) {
    let Some(repo) = repository().await else { return };
    let first = repo.create(&names.draft("first")).await.expect("first");
    let second = repo.create(&names.draft("second")).await.expect("second");

    let users = repo.list().await.expect("list succeeds");

    let ids: Vec<i32> = users.iter().map(|user| user.id().get()).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
    assert!(users.contains(&first));
    assert!(users.contains(&second));
}

#[rstest]
#[tokio::test]
async fn update_overwrites_only_the_target(names: Names) {
    let Some(repo) = repository().await else { return };
    let target = repo.create(&names.draft("target")).await.expect("target");
    let bystander = repo.create(&names.draft("bystander")).await.expect("bystander");
    let replacement = names.draft("renamed");

    let updated = repo
        .update(target.id(), &replacement)
        .await
        .expect("update succeeds");

    assert_eq!(updated.id(), target.id());
    assert_eq!(updated.name(), replacement.name());
    assert_eq!(
        repo.find_by_id(bystander.id()).await.expect("find"),
        Some(bystander)
    );
}

#[rstest]
#[tokio::test]
async fn update_into_taken_email_is_a_conflict(names: Names) {
    let Some(repo) = repository().await else { return };
    let first = repo.create(&names.draft("one")).await.expect("one");
    let second = repo.create(&names.draft("two")).await.expect("two");
    let clash = UserDraft::new(second.name().clone(), first.email().clone());

    assert_eq!(
        repo.update(second.id(), &clash).await,
        Err(UserPersistenceError::conflict("email"))
    );
}

#[rstest]
#[tokio::test]
async fn delete_removes_row_and_reports_missing_ids(names: Names) {
    let Some(repo) = repository().await else { return };
    let user = repo.create(&names.draft("gone")).await.expect("create");

    repo.delete(user.id()).await.expect("delete succeeds");

    assert_eq!(repo.find_by_id(user.id()).await.expect("find"), None);
    assert_eq!(
        repo.delete(user.id()).await,
        Err(UserPersistenceError::not_found(user.id().get()))
    );
}

#[rstest]
#[tokio::test]
async fn update_of_unknown_id_is_not_found(names: Names) {
    let Some(repo) = repository().await else { return };
    let missing = UserId::new(i32::MAX).expect("positive id");

    assert_eq!(
        repo.update(missing, &names.draft("nobody")).await,
        Err(UserPersistenceError::not_found(i32::MAX))
    );
}
