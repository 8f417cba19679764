//! Concurrent writes racing on the same row or the same user's years.
//!
//! Every task waits on a barrier so the calls start together. Exactly one
//! must win; the rest see the committed state.

mod common;

use std::sync::Arc;

use chrono::NaiveDate;
use common::{connect, create_fund, date, register};
use futures::future::join_all;
use hearth_core::{
    DomainError, budget_year::NewBudgetYear, debt::NewDebt, fund::FundType, task::NewTask,
};
use hearth_db::{BudgetYearRepository, DebtRepository, FundRepository, RepoError, TaskRepository};
use rust_decimal_macros::dec;
use tokio::sync::Barrier;

const RACERS: usize = 8;

type Joined<T> = Result<Result<T, RepoError>, tokio::task::JoinError>;

/// Splits results into (successes, `AlreadyInState` failures), panicking on
/// anything else.
fn tally<T>(results: Vec<Joined<T>>) -> (usize, usize) {
    let mut won = 0;
    let mut already = 0;
    for result in results {
        match result.expect("task panicked") {
            Ok(_) => won += 1,
            Err(RepoError::Domain(DomainError::AlreadyInState(_))) => already += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
    (won, already)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore = "requires a running Postgres at DATABASE_URL"]
async fn test_concurrent_mark_paid_succeeds_once() {
    let db = connect().await;
    let (user_id, _) = register(&db).await;
    let repo = DebtRepository::new(db.clone());
    let debt = repo
        .create(
            user_id,
            NewDebt {
                name: "Washing machine".into(),
                creditor: None,
                amount: dec!(450),
                due_date: None,
                note: None,
            },
        )
        .await
        .unwrap();

    let barrier = Arc::new(Barrier::new(RACERS));
    let handles: Vec<_> = (0..RACERS)
        .map(|_| {
            let repo = repo.clone();
            let barrier = Arc::clone(&barrier);
            tokio::spawn(async move {
                barrier.wait().await;
                repo.mark_paid(user_id, debt.id).await
            })
        })
        .collect();

    let (won, already) = tally(join_all(handles).await);
    assert_eq!(won, 1);
    assert_eq!(already, RACERS - 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore = "requires a running Postgres at DATABASE_URL"]
async fn test_concurrent_task_completion_succeeds_once() {
    let db = connect().await;
    let (user_id, _) = register(&db).await;
    let repo = TaskRepository::new(db.clone());
    let task = repo
        .create(
            user_id,
            NewTask {
                title: "Bleed radiators".into(),
                description: None,
                due_date: None,
            },
        )
        .await
        .unwrap();

    let barrier = Arc::new(Barrier::new(RACERS));
    let handles: Vec<_> = (0..RACERS)
        .map(|_| {
            let repo = repo.clone();
            let barrier = Arc::clone(&barrier);
            tokio::spawn(async move {
                barrier.wait().await;
                repo.complete(user_id, task.id).await
            })
        })
        .collect();

    let (won, already) = tally(join_all(handles).await);
    assert_eq!(won, 1);
    assert_eq!(already, RACERS - 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore = "requires a running Postgres at DATABASE_URL"]
async fn test_concurrent_fund_deactivation_succeeds_once() {
    let db = connect().await;
    let (user_id, _) = register(&db).await;
    let fund = create_fund(&db, user_id, "Hobbies", FundType::Monthly, dec!(80)).await;
    let repo = FundRepository::new(db.clone());

    let barrier = Arc::new(Barrier::new(RACERS));
    let handles: Vec<_> = (0..RACERS)
        .map(|_| {
            let repo = repo.clone();
            let barrier = Arc::clone(&barrier);
            tokio::spawn(async move {
                barrier.wait().await;
                repo.set_active(user_id, fund.id, false).await
            })
        })
        .collect();

    let (won, already) = tally(join_all(handles).await);
    assert_eq!(won, 1);
    assert_eq!(already, RACERS - 1);
    assert!(!repo.get(user_id, fund.id).await.unwrap().is_active);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore = "requires a running Postgres at DATABASE_URL"]
async fn test_concurrent_overlapping_years_admit_one() {
    let db = connect().await;
    let (user_id, _) = register(&db).await;
    let repo = BudgetYearRepository::new(db.clone());

    // Every range covers 2025-06-30, so any two overlap.
    let starts: Vec<NaiveDate> = (0..RACERS)
        .map(|i| date(2025, 1 + u32::try_from(i).unwrap() % 6, 1))
        .collect();

    let barrier = Arc::new(Barrier::new(RACERS));
    let handles: Vec<_> = starts
        .into_iter()
        .enumerate()
        .map(|(i, start)| {
            let repo = repo.clone();
            let barrier = Arc::clone(&barrier);
            tokio::spawn(async move {
                barrier.wait().await;
                repo.create(
                    user_id,
                    NewBudgetYear {
                        name: format!("2025 draft {i}"),
                        start_date: start,
                        end_date: date(2025, 12, 31),
                    },
                )
                .await
            })
        })
        .collect();

    let mut created = 0;
    for result in join_all(handles).await {
        match result.expect("task panicked") {
            Ok(_) => created += 1,
            Err(RepoError::Domain(DomainError::OverlappingBudgetYear(_))) => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
    assert_eq!(created, 1);

    let years = repo.list(user_id).await.unwrap();
    assert_eq!(years.len(), 2);
    assert_eq!(years.iter().filter(|y| y.is_active).count(), 1);
}
