use std::sync::Arc;

use habitrack_domain::check_in::{CheckIn, CheckInFilter, CheckInRepository, CheckInStatus};
use habitrack_domain::shared::{DomainError, HabitId, UserId};
use habitrack_infrastructure::persistence::repositories::SqliteCheckInRepository;

mod test_helpers;
use test_helpers::d;

fn completed(user: &UserId, habit: &HabitId, date: &str) -> CheckIn {
    CheckIn::new(
        user.clone(),
        habit.clone(),
        d(date),
        CheckInStatus::completed(),
        None,
    )
}

#[tokio::test]
async fn check_in_repo_upserts_one_row_per_date() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteCheckInRepository::new(Arc::new(pool));
    let user = UserId::new();
    let habit = HabitId::new();

    let first = completed(&user, &habit, "2024-01-05");
    repo.save(&first).await.expect("save");

    // a second write for the same date replaces the outcome, not the row
    let second = CheckIn::new(
        user.clone(),
        habit.clone(),
        d("2024-01-05"),
        CheckInStatus::skipped(),
        Some(2.5),
    );
    repo.save(&second).await.expect("upsert");

    let all = repo
        .list(&user, &CheckInFilter::default())
        .await
        .expect("list");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id(), first.id());
    assert!(all[0].is_skipped());
    assert_eq!(all[0].value(), Some(2.5));

    let on_date = repo
        .find_on_date(&user, &habit, d("2024-01-05"))
        .await
        .unwrap()
        .expect("check-in on date");
    assert_eq!(on_date.id(), first.id());
}

#[tokio::test]
async fn check_in_repo_completions_exclude_skipped_and_future() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteCheckInRepository::new(Arc::new(pool));
    let user = UserId::new();
    let habit = HabitId::new();
    let other_habit = HabitId::new();

    for date in ["2024-01-03", "2024-01-04", "2024-01-06", "2024-01-09"] {
        repo.save(&completed(&user, &habit, date)).await.unwrap();
    }
    repo.save(&CheckIn::new(
        user.clone(),
        habit.clone(),
        d("2024-01-05"),
        CheckInStatus::skipped(),
        None,
    ))
    .await
    .unwrap();
    repo.save(&CheckIn::new(
        user.clone(),
        habit.clone(),
        d("2024-01-07"),
        CheckInStatus {
            completed: true,
            skipped: true,
        },
        None,
    ))
    .await
    .unwrap();
    repo.save(&completed(&user, &other_habit, "2024-01-05"))
        .await
        .unwrap();

    let dates = repo
        .fetch_completions(&user, &habit, d("2024-01-08"))
        .await
        .expect("completions");

    assert_eq!(
        dates.into_iter().collect::<Vec<_>>(),
        vec![d("2024-01-03"), d("2024-01-04"), d("2024-01-06")]
    );
}

#[tokio::test]
async fn check_in_repo_completions_keep_most_recent_within_limit() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteCheckInRepository::with_history_limit(Arc::new(pool), 2);
    let user = UserId::new();
    let habit = HabitId::new();

    for date in ["2024-01-01", "2024-01-02", "2024-01-03"] {
        repo.save(&completed(&user, &habit, date)).await.unwrap();
    }

    let dates = repo
        .fetch_completions(&user, &habit, d("2024-01-03"))
        .await
        .unwrap();
    assert_eq!(
        dates.into_iter().collect::<Vec<_>>(),
        vec![d("2024-01-02"), d("2024-01-03")]
    );
}

#[tokio::test]
async fn check_in_repo_list_filters_and_orders() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteCheckInRepository::new(Arc::new(pool));
    let user = UserId::new();
    let read = HabitId::new();
    let run = HabitId::new();

    for date in ["2024-01-01", "2024-01-03", "2024-01-05"] {
        repo.save(&completed(&user, &read, date)).await.unwrap();
    }
    repo.save(&completed(&user, &run, "2024-01-04")).await.unwrap();
    repo.save(&CheckIn::new(
        user.clone(),
        run.clone(),
        d("2024-01-02"),
        CheckInStatus::skipped(),
        None,
    ))
    .await
    .unwrap();
    repo.save(&completed(&UserId::new(), &read, "2024-01-02"))
        .await
        .unwrap();

    let all = repo.list(&user, &CheckInFilter::default()).await.unwrap();
    let dates: Vec<_> = all.iter().map(|c| c.date()).collect();
    assert_eq!(
        dates,
        vec![
            d("2024-01-05"),
            d("2024-01-04"),
            d("2024-01-03"),
            d("2024-01-02"),
            d("2024-01-01"),
        ]
    );

    let read_only = repo
        .list(
            &user,
            &CheckInFilter {
                habit_id: Some(read.clone()),
                start_date: Some(d("2024-01-02")),
                end_date: Some(d("2024-01-05")),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(
        read_only.iter().map(|c| c.date()).collect::<Vec<_>>(),
        vec![d("2024-01-05"), d("2024-01-03")]
    );

    let completed_only = repo
        .list(
            &user,
            &CheckInFilter {
                habit_id: Some(run.clone()),
                completed_only: true,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(completed_only.len(), 1);
    assert_eq!(completed_only[0].date(), d("2024-01-04"));

    let limited = repo
        .list(
            &user,
            &CheckInFilter {
                limit: Some(2),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(limited.len(), 2);
    assert_eq!(limited[0].date(), d("2024-01-05"));
}

#[tokio::test]
async fn check_in_repo_delete_is_scoped_to_owner() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteCheckInRepository::new(Arc::new(pool));
    let user = UserId::new();
    let habit = HabitId::new();

    let check_in = completed(&user, &habit, "2024-01-05");
    repo.save(&check_in).await.unwrap();

    repo.delete(&UserId::new(), check_in.id()).await.unwrap();
    assert!(repo.find_by_id(&user, check_in.id()).await.unwrap().is_some());

    repo.delete(&user, check_in.id()).await.unwrap();
    assert!(repo.find_by_id(&user, check_in.id()).await.unwrap().is_none());
}

#[tokio::test]
async fn check_in_repo_delete_by_habit_leaves_other_habits() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteCheckInRepository::new(Arc::new(pool));
    let user = UserId::new();
    let doomed = HabitId::new();
    let kept = HabitId::new();

    repo.save(&completed(&user, &doomed, "2024-01-01")).await.unwrap();
    repo.save(&completed(&user, &doomed, "2024-01-02")).await.unwrap();
    repo.save(&completed(&user, &kept, "2024-01-02")).await.unwrap();

    repo.delete_by_habit(&doomed).await.unwrap();

    let remaining = repo.list(&user, &CheckInFilter::default()).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].habit_id(), &kept);
}

#[tokio::test]
async fn check_in_repo_reports_duplicate_id_as_integrity_error() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteCheckInRepository::new(Arc::new(pool.clone()));
    let user = UserId::new();
    let habit = HabitId::new();

    let check_in = completed(&user, &habit, "2024-01-01");
    repo.save(&check_in).await.unwrap();

    // same primary key on a different date is not covered by the date upsert
    sqlx::query("UPDATE check_ins SET date = '2023-12-31' WHERE id = ?1")
        .bind(check_in.id().as_str())
        .execute(&pool)
        .await
        .unwrap();
    let err = repo.save(&check_in).await.unwrap_err();

    assert!(matches!(err, DomainError::DataIntegrity(_)), "got {err:?}");
}

#[tokio::test]
async fn check_in_repo_completed_filter_applies_before_limit() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteCheckInRepository::new(Arc::new(pool));
    let user = UserId::new();
    let habit = HabitId::new();

    repo.save(&completed(&user, &habit, "2024-01-01")).await.unwrap();
    repo.save(&CheckIn::new(
        user.clone(),
        habit.clone(),
        d("2024-01-02"),
        CheckInStatus {
            completed: true,
            skipped: true,
        },
        None,
    ))
    .await
    .unwrap();
    for date in ["2024-01-03", "2024-01-04", "2024-01-05"] {
        repo.save(&CheckIn::new(
            user.clone(),
            habit.clone(),
            d(date),
            CheckInStatus::skipped(),
            None,
        ))
        .await
        .unwrap();
    }

    let found = repo
        .list(
            &user,
            &CheckInFilter {
                completed_only: true,
                limit: Some(2),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // the skipped rows are newer but never reach the limit
    assert_eq!(
        found.iter().map(|c| c.date()).collect::<Vec<_>>(),
        vec![d("2024-01-02"), d("2024-01-01")]
    );
}
