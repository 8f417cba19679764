//! Integration tests for the expense/income ledger against PostgreSQL.
//!
//! Run with `cargo test -p hearth-db -- --ignored` and a database at
//! `DATABASE_URL`.

mod common;

use common::{connect, create_category, create_fund, date, fund_budget, register};
use hearth_core::{
    DomainError,
    fund::FundType,
    ledger::{ExpensePatch, NewExpense, NewIncome},
};
use hearth_core::budget_year::NewBudgetYear;
use hearth_db::{
    BudgetYearRepository, ExpenseRepository, IncomeRepository, RepoError,
    entities::fund_budgets,
    repositories::ledger::adjust_fund_budget,
};
use rust_decimal_macros::dec;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

#[tokio::test]
#[ignore = "requires a running Postgres at DATABASE_URL"]
async fn test_expense_lifecycle_on_annual_fund() {
    let db = connect().await;
    let (user_id, year) = register(&db).await;
    let fund = create_fund(&db, user_id, "Car", FundType::Annual, dec!(50000)).await;
    let category = create_category(&db, user_id, "Car service", fund.id).await;
    let repo = ExpenseRepository::new(db.clone());

    let expense = repo
        .create(
            user_id,
            NewExpense {
                category_id: category.id.into(),
                amount: dec!(2000),
                date: date(2024, 3, 10),
                name: "Brakes".into(),
                note: None,
            },
        )
        .await
        .expect("Failed to create expense");
    assert_eq!(expense.fund_id, fund.id);
    assert_eq!(expense.budget_year_id, year.id);
    assert_eq!(fund_budget(&db, fund.id, year.id).await.spent, dec!(2000));

    repo.update(
        user_id,
        expense.id,
        ExpensePatch {
            amount: Some(dec!(500)),
            ..Default::default()
        },
    )
    .await
    .expect("Failed to update expense");
    assert_eq!(fund_budget(&db, fund.id, year.id).await.spent, dec!(500));

    repo.delete(user_id, expense.id)
        .await
        .expect("Failed to delete expense");
    assert_eq!(fund_budget(&db, fund.id, year.id).await.spent, dec!(0));
}

#[tokio::test]
#[ignore = "requires a running Postgres at DATABASE_URL"]
async fn test_recategorize_moves_amount_between_funds() {
    let db = connect().await;
    let (user_id, year) = register(&db).await;
    let car = create_fund(&db, user_id, "Car", FundType::Annual, dec!(5000)).await;
    let house = create_fund(&db, user_id, "House", FundType::Annual, dec!(8000)).await;
    let car_cat = create_category(&db, user_id, "Tyres", car.id).await;
    let house_cat = create_category(&db, user_id, "Paint", house.id).await;
    let repo = ExpenseRepository::new(db.clone());

    let expense = repo
        .create(
            user_id,
            NewExpense {
                category_id: car_cat.id.into(),
                amount: dec!(300),
                date: date(2024, 5, 1),
                name: "Winter tyres".into(),
                note: None,
            },
        )
        .await
        .unwrap();

    let moved = repo
        .update(
            user_id,
            expense.id,
            ExpensePatch {
                category_id: Some(house_cat.id.into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(moved.fund_id, house.id);
    let car_spent = fund_budget(&db, car.id, year.id).await.spent;
    let house_spent = fund_budget(&db, house.id, year.id).await.spent;
    assert_eq!(car_spent, dec!(0));
    assert_eq!(house_spent, dec!(300));
    assert_eq!(car_spent + house_spent, dec!(300));
}

#[tokio::test]
#[ignore = "requires a running Postgres at DATABASE_URL"]
async fn test_expense_outside_any_year_is_rejected() {
    let db = connect().await;
    let (user_id, year) = register(&db).await;
    let fund = create_fund(&db, user_id, "Food", FundType::Monthly, dec!(600)).await;
    let category = create_category(&db, user_id, "Groceries", fund.id).await;

    let result = ExpenseRepository::new(db.clone())
        .create(
            user_id,
            NewExpense {
                category_id: category.id.into(),
                amount: dec!(40),
                date: date(2023, 12, 31),
                name: "Milk".into(),
                note: None,
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(RepoError::Domain(DomainError::NoBudgetYearForDate(_)))
    ));
    assert_eq!(fund_budget(&db, fund.id, year.id).await.spent, dec!(0));
}

#[tokio::test]
#[ignore = "requires a running Postgres at DATABASE_URL"]
async fn test_income_needs_enclosing_year() {
    let db = connect().await;
    let (user_id, _year) = register(&db).await;

    let result = IncomeRepository::new(db.clone())
        .create(
            user_id,
            NewIncome {
                amount: dec!(3000),
                date: date(2025, 1, 1),
                source: "Salary".into(),
                note: None,
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(RepoError::Domain(DomainError::NoBudgetYearForDate(d))) if d == date(2025, 1, 1)
    ));
}

#[tokio::test]
#[ignore = "requires a running Postgres at DATABASE_URL"]
async fn test_income_leaves_fund_budgets_alone() {
    let db = connect().await;
    let (user_id, year) = register(&db).await;
    let fund = create_fund(&db, user_id, "Food", FundType::Monthly, dec!(600)).await;

    let income = IncomeRepository::new(db.clone())
        .create(
            user_id,
            NewIncome {
                amount: dec!(3000),
                date: date(2024, 7, 25),
                source: "Salary".into(),
                note: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(income.budget_year_id, year.id);
    assert_eq!(income.month, 7);
    assert_eq!(income.year, 2024);

    let budget = fund_budget(&db, fund.id, year.id).await;
    assert_eq!(budget.spent, dec!(0));
    assert_eq!(budget.amount_given, dec!(0));
}

#[tokio::test]
#[ignore = "requires a running Postgres at DATABASE_URL"]
async fn test_foreign_category_is_not_found() {
    let db = connect().await;
    let (owner, _) = register(&db).await;
    let (intruder, _) = register(&db).await;
    let fund = create_fund(&db, owner, "Car", FundType::Annual, dec!(100)).await;
    let category = create_category(&db, owner, "Fuel", fund.id).await;

    let result = ExpenseRepository::new(db.clone())
        .create(
            intruder,
            NewExpense {
                category_id: category.id.into(),
                amount: dec!(10),
                date: date(2024, 2, 2),
                name: "Fuel".into(),
                note: None,
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(RepoError::Domain(DomainError::NotFound { .. }))
    ));
}

#[tokio::test]
#[ignore = "requires a running Postgres at DATABASE_URL"]
async fn test_expense_without_fund_budget_still_commits() {
    let db = connect().await;
    let (user_id, year) = register(&db).await;
    let fund = create_fund(&db, user_id, "Gifts", FundType::Annual, dec!(400)).await;
    let category = create_category(&db, user_id, "Birthdays", fund.id).await;

    fund_budgets::Entity::delete_many()
        .filter(fund_budgets::Column::FundId.eq(fund.id))
        .exec(&db)
        .await
        .unwrap();

    let expense = ExpenseRepository::new(db.clone())
        .create(
            user_id,
            NewExpense {
                category_id: category.id.into(),
                amount: dec!(35),
                date: date(2024, 8, 14),
                name: "Card and flowers".into(),
                note: None,
            },
        )
        .await
        .expect("Expense should commit without a fund budget");

    assert_eq!(expense.fund_id, fund.id);
    assert_eq!(expense.budget_year_id, year.id);

    let rows = fund_budgets::Entity::find()
        .filter(fund_budgets::Column::FundId.eq(fund.id))
        .count(&db)
        .await
        .unwrap();
    assert_eq!(rows, 0);

    let touched = adjust_fund_budget(&db, fund.id, year.id, dec!(35)).await.unwrap();
    assert_eq!(touched, 0);
}

#[tokio::test]
#[ignore = "requires a running Postgres at DATABASE_URL"]
async fn test_redating_expense_moves_amount_between_years() {
    let db = connect().await;
    let (user_id, y1) = register(&db).await;
    let fund = create_fund(&db, user_id, "House", FundType::Annual, dec!(6000)).await;
    let category = create_category(&db, user_id, "Boiler", fund.id).await;

    let y2 = BudgetYearRepository::new(db.clone())
        .create(
            user_id,
            NewBudgetYear {
                name: "2025".into(),
                start_date: date(2025, 1, 1),
                end_date: date(2025, 12, 31),
            },
        )
        .await
        .unwrap();

    let repo = ExpenseRepository::new(db.clone());
    let expense = repo
        .create(
            user_id,
            NewExpense {
                category_id: category.id.into(),
                amount: dec!(120),
                date: date(2024, 4, 1),
                name: "Annual check".into(),
                note: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(fund_budget(&db, fund.id, y1.id).await.spent, dec!(120));

    let moved = repo
        .update(
            user_id,
            expense.id,
            ExpensePatch {
                date: Some(date(2025, 2, 1)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(moved.budget_year_id, y2.id);
    assert_eq!(moved.fund_id, fund.id);
    assert_eq!(fund_budget(&db, fund.id, y1.id).await.spent, dec!(0));
    assert_eq!(fund_budget(&db, fund.id, y2.id).await.spent, dec!(120));
}
