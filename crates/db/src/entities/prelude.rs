//! Entity re-exports.

pub use super::asset_details::Entity as AssetDetails;
pub use super::asset_snapshots::Entity as AssetSnapshots;
pub use super::budget_years::Entity as BudgetYears;
pub use super::categories::Entity as Categories;
pub use super::debts::Entity as Debts;
pub use super::expenses::Entity as Expenses;
pub use super::fund_budgets::Entity as FundBudgets;
pub use super::funds::Entity as Funds;
pub use super::incomes::Entity as Incomes;
pub use super::system_settings::Entity as SystemSettings;
pub use super::tasks::Entity as Tasks;
pub use super::tithe_given::Entity as TitheGiven;
pub use super::users::Entity as Users;
