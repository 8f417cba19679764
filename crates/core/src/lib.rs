//! Core budgeting logic for Hearth.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here; the database
//! crate carries them out inside transactions.
//!
//! # Modules
//!
//! - `budget_year` - Date-range resolution, overlap guard, activation rules
//! - `fund` - Fund types, levels, remaining-balance and budget totals
//! - `ledger` - Revert/apply planning for fund budget `spent` totals
//! - `tithe` - Required and remaining tithe
//! - `dashboard` - Read-side rollups
//! - `debt`, `task`, `asset` - Household bookkeeping beside the ledger
//! - `settings` - Per-user setting keys and their validation

pub mod asset;
pub mod auth;
pub mod budget_year;
pub mod dashboard;
pub mod debt;
pub mod error;
pub mod fund;
pub mod ledger;
pub mod settings;
pub mod task;
pub mod tithe;

pub use error::DomainError;
