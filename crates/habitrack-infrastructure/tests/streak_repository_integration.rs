use std::sync::Arc;

use habitrack_domain::shared::{HabitId, UserId};
use habitrack_domain::streak::{StreakRecord, StreakRepository, StreakSnapshot};
use habitrack_infrastructure::persistence::repositories::SqliteStreakRepository;

mod test_helpers;
use test_helpers::d;

#[tokio::test]
async fn streak_repo_upsert_overwrites_pair() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteStreakRepository::new(Arc::new(pool));
    let user = UserId::new();
    let habit = HabitId::new();

    assert!(repo.find(&user, &habit).await.unwrap().is_none());

    let first = StreakRecord::new(
        user.clone(),
        habit.clone(),
        StreakSnapshot {
            current_streak: 2,
            best_streak: 5,
            last_completion_date: Some(d("2024-01-06")),
        },
    );
    repo.upsert(&first).await.expect("insert snapshot");

    // a fresh record for the same pair replaces the cached values
    let second = StreakRecord::new(user.clone(), habit.clone(), StreakSnapshot::empty());
    repo.upsert(&second).await.expect("overwrite snapshot");

    let found = repo.find(&user, &habit).await.unwrap().expect("snapshot");
    assert_eq!(found.id(), first.id());
    assert_eq!(found.snapshot(), &StreakSnapshot::empty());
}

#[tokio::test]
async fn streak_repo_is_keyed_by_user_and_habit() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteStreakRepository::new(Arc::new(pool));
    let alice = UserId::new();
    let bob = UserId::new();
    let habit = HabitId::new();

    let snapshot = StreakSnapshot {
        current_streak: 3,
        best_streak: 3,
        last_completion_date: Some(d("2024-01-07")),
    };
    repo.upsert(&StreakRecord::new(alice.clone(), habit.clone(), snapshot))
        .await
        .unwrap();

    assert!(repo.find(&bob, &habit).await.unwrap().is_none());
    let found = repo.find(&alice, &habit).await.unwrap().unwrap();
    assert_eq!(found.snapshot(), &snapshot);
}

#[tokio::test]
async fn streak_repo_delete_by_habit() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteStreakRepository::new(Arc::new(pool));
    let user = UserId::new();
    let doomed = HabitId::new();
    let kept = HabitId::new();

    for habit in [&doomed, &kept] {
        repo.upsert(&StreakRecord::new(
            user.clone(),
            habit.clone(),
            StreakSnapshot::empty(),
        ))
        .await
        .unwrap();
    }

    repo.delete_by_habit(&doomed).await.unwrap();

    assert!(repo.find(&user, &doomed).await.unwrap().is_none());
    assert!(repo.find(&user, &kept).await.unwrap().is_some());
}
