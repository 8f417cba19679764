//! `SeaORM` entity definitions.

pub mod prelude;

pub mod asset_details;
pub mod asset_snapshots;
pub mod budget_years;
pub mod categories;
pub mod debts;
pub mod expenses;
pub mod fund_budgets;
pub mod funds;
pub mod incomes;
pub mod sea_orm_active_enums;
pub mod system_settings;
pub mod tasks;
pub mod tithe_given;
pub mod users;
