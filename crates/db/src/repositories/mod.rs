//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.
//! Every call takes the owning user's id and never touches other users' rows.

pub mod asset;
pub mod budget_year;
pub mod category;
pub mod dashboard;
pub mod debt;
pub mod expense;
pub mod fund;
pub mod income;
pub mod ledger;
pub mod settings;
pub mod task;
pub mod tithe;
pub mod user;

pub use asset::{AssetRepository, SnapshotWithDetails};
pub use budget_year::{BudgetYearRepository, UpdateBudgetYearInput};
pub use category::{CategoryRepository, CreateCategoryInput, UpdateCategoryInput};
pub use dashboard::DashboardRepository;
pub use debt::DebtRepository;
pub use expense::{ExpenseFilter, ExpenseRepository};
pub use fund::{
    CreateFundInput, FundRepository, FundSummary, FundWithBudget, SetFundBudgetInput,
    UpdateFundInput,
};
pub use income::IncomeRepository;
pub use settings::SettingsRepository;
pub use task::TaskRepository;
pub use tithe::{TitheRepository, YearTithe};
pub use user::UserRepository;
