//! Demo household seeder for Hearth development.
//!
//! Seeds one user with an active budget year for the current calendar year,
//! a handful of funds and categories, and some incomes and expenses so the
//! dashboard has something to show. Running it twice is a no-op.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::{Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use hearth_core::{
    asset::{AssetKind, NewAssetDetail, NewAssetSnapshot},
    auth::hash_password,
    debt::NewDebt,
    fund::{FundLevel, FundType},
    ledger::{NewExpense, NewIncome},
    settings::SettingKey,
    task::NewTask,
    tithe::NewTitheGiven,
};
use hearth_db::{
    AssetRepository, CategoryRepository, DebtRepository, ExpenseRepository, FundRepository,
    IncomeRepository, SettingsRepository, TaskRepository, TitheRepository, UserRepository,
    repositories::{CreateCategoryInput, CreateFundInput},
};
use sea_orm::DatabaseConnection;

const DEMO_EMAIL: &str = "demo@hearth.dev";
const DEMO_PASSWORD: &str = "hearth-demo";

/// (name, type, level, include in budget, amount)
const FUNDS: &[(&str, FundType, i16, bool, i64)] = &[
    ("Groceries", FundType::Monthly, 1, true, 600),
    ("Car", FundType::Annual, 2, true, 3000),
    ("House", FundType::Annual, 2, true, 5000),
    ("Emergency", FundType::Savings, 3, false, 2000),
];

/// (category, fund)
const CATEGORIES: &[(&str, &str)] = &[
    ("Supermarket", "Groceries"),
    ("Fuel", "Car"),
    ("Servicing", "Car"),
    ("Repairs", "House"),
];

/// (category, day offset into the year, amount, name)
const EXPENSES: &[(&str, i64, i64, &str)] = &[
    ("Supermarket", 3, 85, "Weekly shop"),
    ("Supermarket", 10, 92, "Weekly shop"),
    ("Fuel", 12, 60, "Tank refill"),
    ("Servicing", 40, 350, "Annual service"),
    ("Repairs", 55, 220, "Leaking tap"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hearth=info,seeder=info".into()),
        )
        .init();

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

    let db = hearth_db::connect(&database_url, 2, 1)
        .await
        .context("Failed to connect to database")?;

    let users = UserRepository::new(db.clone());
    if users.email_exists(DEMO_EMAIL).await? {
        info!(email = DEMO_EMAIL, "Demo user already exists, skipping");
        return Ok(());
    }

    let password_hash = hash_password(DEMO_PASSWORD)?;
    let (user, year) = users
        .register(DEMO_EMAIL, &password_hash, "Demo Household", Utc::now().date_naive())
        .await?;
    info!(user_id = %user.id, budget_year = %year.name, "Seeded demo user");

    seed_ledger(&db, user.id, year.start_date).await?;
    seed_extras(&db, user.id, year.start_date).await?;

    info!(email = DEMO_EMAIL, password = DEMO_PASSWORD, "Seeding complete");
    Ok(())
}

/// Funds, categories, incomes and expenses.
async fn seed_ledger(
    db: &DatabaseConnection,
    user_id: Uuid,
    year_start: NaiveDate,
) -> anyhow::Result<()> {
    let fund_repo = FundRepository::new(db.clone());
    let mut fund_ids = Vec::with_capacity(FUNDS.len());
    for &(name, fund_type, level, include_in_budget, amount) in FUNDS {
        let fund = fund_repo
            .create(
                user_id,
                CreateFundInput {
                    name: name.to_string(),
                    fund_type,
                    level: FundLevel::try_from(level)?,
                    include_in_budget,
                    display_order: i32::from(level),
                    amount: Some(Decimal::from(amount)),
                },
            )
            .await?;
        fund_ids.push((name, fund.id));
    }
    info!(count = fund_ids.len(), "Seeded funds");

    let category_repo = CategoryRepository::new(db.clone());
    let mut category_ids = Vec::with_capacity(CATEGORIES.len());
    for &(name, fund_name) in CATEGORIES {
        let fund_id = lookup(&fund_ids, fund_name)?;
        let category = category_repo
            .create(
                user_id,
                CreateCategoryInput {
                    name: name.to_string(),
                    fund_id,
                },
            )
            .await?;
        category_ids.push((name, category.id));
    }
    info!(count = category_ids.len(), "Seeded categories");

    let income_repo = IncomeRepository::new(db.clone());
    for month in 0..3 {
        income_repo
            .create(
                user_id,
                NewIncome {
                    amount: Decimal::from(3200),
                    date: year_start + Duration::days(24 + 30 * month),
                    source: "Salary".to_string(),
                    note: None,
                },
            )
            .await?;
    }

    let expense_repo = ExpenseRepository::new(db.clone());
    for &(category, offset, amount, name) in EXPENSES {
        expense_repo
            .create(
                user_id,
                NewExpense {
                    category_id: lookup(&category_ids, category)?.into(),
                    amount: Decimal::from(amount),
                    date: year_start + Duration::days(offset),
                    name: name.to_string(),
                    note: None,
                },
            )
            .await?;
    }
    info!(count = EXPENSES.len(), "Seeded expenses");

    Ok(())
}

/// Tithe, settings, a debt, a task and a net-worth snapshot.
async fn seed_extras(
    db: &DatabaseConnection,
    user_id: Uuid,
    year_start: NaiveDate,
) -> anyhow::Result<()> {
    SettingsRepository::new(db.clone())
        .put(user_id, SettingKey::TithePercentage, "10")
        .await?;

    TitheRepository::new(db.clone())
        .create_given(
            user_id,
            NewTitheGiven {
                amount: Decimal::from(320),
                date: year_start + Duration::days(25),
                recipient: Some("Local church".to_string()),
                note: None,
            },
        )
        .await?;

    DebtRepository::new(db.clone())
        .create(
            user_id,
            NewDebt {
                name: "Sofa".to_string(),
                creditor: Some("Furniture store".to_string()),
                amount: Decimal::from(900),
                due_date: Some(year_start + Duration::days(120)),
                note: None,
            },
        )
        .await?;

    TaskRepository::new(db.clone())
        .create(
            user_id,
            NewTask {
                title: "Renew car insurance".to_string(),
                description: None,
                due_date: Some(year_start + Duration::days(60)),
            },
        )
        .await?;

    AssetRepository::new(db.clone())
        .create(
            user_id,
            NewAssetSnapshot {
                name: "Start of year".to_string(),
                snapshot_date: year_start,
                note: None,
                details: vec![
                    NewAssetDetail {
                        label: "Current account".to_string(),
                        kind: AssetKind::Asset,
                        amount: Decimal::from(4200),
                    },
                    NewAssetDetail {
                        label: "Credit card".to_string(),
                        kind: AssetKind::Liability,
                        amount: Decimal::from(650),
                    },
                ],
            },
        )
        .await?;

    info!("Seeded tithe, settings, debt, task and asset snapshot");
    Ok(())
}

fn lookup(ids: &[(&str, Uuid)], name: &str) -> anyhow::Result<Uuid> {
    ids.iter()
        .find(|(n, _)| *n == name)
        .map(|(_, id)| *id)
        .with_context(|| format!("no seeded row named {name}"))
}
