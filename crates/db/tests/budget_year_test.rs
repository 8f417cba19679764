//! Integration tests for budget years: overlap, activation and deletion.

mod common;

use common::{connect, create_category, create_fund, date, fund_budget, register};
use hearth_core::{
    DomainError, budget_year::NewBudgetYear, fund::FundType, ledger::NewExpense,
};
use hearth_db::{BudgetYearRepository, ExpenseRepository, RepoError};
use rust_decimal_macros::dec;

fn year(name: &str, start: chrono::NaiveDate, end: chrono::NaiveDate) -> NewBudgetYear {
    NewBudgetYear {
        name: name.to_string(),
        start_date: start,
        end_date: end,
    }
}

#[tokio::test]
#[ignore = "requires a running Postgres at DATABASE_URL"]
async fn test_overlapping_year_is_rejected() {
    let db = connect().await;
    let (user_id, _) = register(&db).await;
    let repo = BudgetYearRepository::new(db.clone());

    let result = repo
        .create(user_id, year("Mid 2024", date(2024, 6, 1), date(2025, 5, 31)))
        .await;

    assert!(matches!(
        result,
        Err(RepoError::Domain(DomainError::OverlappingBudgetYear(_)))
    ));
    assert_eq!(repo.list(user_id).await.unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "requires a running Postgres at DATABASE_URL"]
async fn test_reversed_range_is_rejected() {
    let db = connect().await;
    let (user_id, _) = register(&db).await;

    let result = BudgetYearRepository::new(db.clone())
        .create(user_id, year("Backwards", date(2026, 12, 31), date(2026, 1, 1)))
        .await;

    assert!(matches!(
        result,
        Err(RepoError::Domain(DomainError::Validation(_)))
    ));
}

#[tokio::test]
#[ignore = "requires a running Postgres at DATABASE_URL"]
async fn test_activation_is_exclusive() {
    let db = connect().await;
    let (user_id, y1) = register(&db).await;
    let repo = BudgetYearRepository::new(db.clone());

    let y2 = repo
        .create(user_id, year("2025", date(2025, 1, 1), date(2025, 12, 31)))
        .await
        .unwrap();
    assert!(!y2.is_active);

    let activated = repo.activate(user_id, y2.id).await.unwrap();
    assert!(activated.is_active);

    let years = repo.list(user_id).await.unwrap();
    assert_eq!(years.iter().filter(|y| y.is_active).count(), 1);
    assert!(!repo.get(user_id, y1.id).await.unwrap().is_active);
    assert_eq!(repo.active(user_id).await.unwrap().map(|y| y.id), Some(y2.id));
}

#[tokio::test]
#[ignore = "requires a running Postgres at DATABASE_URL"]
async fn test_new_year_seeds_fund_budgets_from_active_year() {
    let db = connect().await;
    let (user_id, _) = register(&db).await;
    let fund = create_fund(&db, user_id, "Holiday", FundType::Savings, dec!(1200)).await;

    let y2 = BudgetYearRepository::new(db.clone())
        .create(user_id, year("2025", date(2025, 1, 1), date(2025, 12, 31)))
        .await
        .unwrap();

    let seeded = fund_budget(&db, fund.id, y2.id).await;
    assert_eq!(seeded.amount, dec!(1200));
    assert_eq!(seeded.spent, dec!(0));
}

#[tokio::test]
#[ignore = "requires a running Postgres at DATABASE_URL"]
async fn test_year_with_expenses_cannot_be_deleted() {
    let db = connect().await;
    let (user_id, y1) = register(&db).await;
    let fund = create_fund(&db, user_id, "Car", FundType::Annual, dec!(900)).await;
    let category = create_category(&db, user_id, "Parking", fund.id).await;
    ExpenseRepository::new(db.clone())
        .create(
            user_id,
            NewExpense {
                category_id: category.id.into(),
                amount: dec!(15),
                date: date(2024, 9, 9),
                name: "Garage".into(),
                note: None,
            },
        )
        .await
        .unwrap();

    let result = BudgetYearRepository::new(db.clone())
        .delete(user_id, y1.id)
        .await;

    assert!(matches!(
        result,
        Err(RepoError::Domain(DomainError::HasDependentData { .. }))
    ));
}

#[tokio::test]
#[ignore = "requires a running Postgres at DATABASE_URL"]
async fn test_deleting_active_year_promotes_latest() {
    let db = connect().await;
    let (user_id, y1) = register(&db).await;
    let repo = BudgetYearRepository::new(db.clone());

    let y0 = repo
        .create(user_id, year("2023", date(2023, 1, 1), date(2023, 12, 31)))
        .await
        .unwrap();
    let y2 = repo
        .create(user_id, year("2025", date(2025, 1, 1), date(2025, 12, 31)))
        .await
        .unwrap();

    repo.delete(user_id, y1.id).await.unwrap();

    let active = repo.active(user_id).await.unwrap().unwrap();
    assert_eq!(active.id, y2.id);
    assert!(!repo.get(user_id, y0.id).await.unwrap().is_active);
}
