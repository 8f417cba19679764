//! Integration tests for the read-side rollups.

mod common;

use common::{connect, create_category, create_fund, date, register};
use hearth_core::{
    fund::FundType,
    ledger::{NewExpense, NewIncome},
    settings::SettingKey,
    tithe::NewTitheGiven,
};
use hearth_db::{
    DashboardRepository, ExpenseRepository, IncomeRepository, SettingsRepository,
    TitheRepository,
};
use rust_decimal_macros::dec;

#[tokio::test]
#[ignore = "requires a running Postgres at DATABASE_URL"]
async fn test_dashboard_tithe_matches_tithe_summary() {
    let db = connect().await;
    let (user_id, year) = register(&db).await;
    let fund = create_fund(&db, user_id, "Food", FundType::Monthly, dec!(100)).await;
    let category = create_category(&db, user_id, "Market", fund.id).await;

    SettingsRepository::new(db.clone())
        .put(user_id, SettingKey::TithePercentage, "12")
        .await
        .unwrap();
    IncomeRepository::new(db.clone())
        .create(
            user_id,
            NewIncome {
                amount: dec!(1000),
                date: date(2024, 3, 25),
                source: "Salary".into(),
                note: None,
            },
        )
        .await
        .unwrap();
    ExpenseRepository::new(db.clone())
        .create(
            user_id,
            NewExpense {
                category_id: category.id.into(),
                amount: dec!(200),
                date: date(2024, 3, 27),
                name: "Weekly shop".into(),
                note: None,
            },
        )
        .await
        .unwrap();
    TitheRepository::new(db.clone())
        .create_given(
            user_id,
            NewTitheGiven {
                amount: dec!(50),
                date: date(2024, 3, 31),
                recipient: None,
                note: None,
            },
        )
        .await
        .unwrap();

    let dashboard = DashboardRepository::new(db.clone())
        .summary(user_id, None)
        .await
        .unwrap();
    let tithe = TitheRepository::new(db.clone())
        .summary(user_id, Some(year.id))
        .await
        .unwrap();

    assert_eq!(dashboard.tithe, tithe.summary);
    assert_eq!(dashboard.total_income, dec!(1000));
    assert_eq!(dashboard.total_expenses, dec!(200));
    assert_eq!(dashboard.balance, dec!(800));
    assert_eq!(dashboard.tithe.required, dec!(120));
    assert_eq!(dashboard.tithe.remaining, dec!(70));
    assert_eq!(dashboard.total_budget, dec!(1200));
}
