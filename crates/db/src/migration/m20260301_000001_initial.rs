//! Initial database migration.
//!
//! Creates the household ledger schema: users, budget years, funds and their
//! per-year budgets, categories, incomes, expenses, plus the side tables for
//! tithe, debts, tasks, net-worth snapshots and settings.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: USERS & BUDGET YEARS
        // ============================================================
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(BUDGET_YEARS_SQL).await?;

        // ============================================================
        // PART 3: FUNDS & CATEGORIES
        // ============================================================
        db.execute_unprepared(FUNDS_SQL).await?;
        db.execute_unprepared(FUND_BUDGETS_SQL).await?;
        db.execute_unprepared(CATEGORIES_SQL).await?;

        // ============================================================
        // PART 4: LEDGER
        // ============================================================
        db.execute_unprepared(INCOMES_SQL).await?;
        db.execute_unprepared(EXPENSES_SQL).await?;

        // ============================================================
        // PART 5: HOUSEHOLD BOOKKEEPING
        // ============================================================
        db.execute_unprepared(TITHE_GIVEN_SQL).await?;
        db.execute_unprepared(DEBTS_SQL).await?;
        db.execute_unprepared(TASKS_SQL).await?;
        db.execute_unprepared(ASSETS_SQL).await?;
        db.execute_unprepared(SYSTEM_SETTINGS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
CREATE TYPE fund_type AS ENUM ('monthly', 'annual', 'savings');

CREATE TYPE debt_status AS ENUM ('unpaid', 'paid');

CREATE TYPE asset_kind AS ENUM ('asset', 'liability');
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    email VARCHAR(255) NOT NULL UNIQUE,
    password_hash VARCHAR(255) NOT NULL,
    name VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const BUDGET_YEARS_SQL: &str = r"
CREATE TABLE budget_years (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    name VARCHAR(100) NOT NULL,
    start_date DATE NOT NULL,
    end_date DATE NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT false,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_budget_year_dates CHECK (start_date <= end_date)
);

CREATE INDEX idx_budget_years_user_dates ON budget_years(user_id, start_date, end_date);

-- At most one active year per user
CREATE UNIQUE INDEX idx_budget_years_one_active ON budget_years(user_id) WHERE is_active;
";

const FUNDS_SQL: &str = r"
CREATE TABLE funds (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    name VARCHAR(100) NOT NULL,
    fund_type fund_type NOT NULL,
    level SMALLINT NOT NULL DEFAULT 1,
    include_in_budget BOOLEAN NOT NULL DEFAULT true,
    display_order INTEGER NOT NULL DEFAULT 0,
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_funds_user_name UNIQUE (user_id, name),
    CONSTRAINT chk_fund_level CHECK (level BETWEEN 1 AND 3)
);
";

const FUND_BUDGETS_SQL: &str = r"
CREATE TABLE fund_budgets (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    fund_id UUID NOT NULL REFERENCES funds(id) ON DELETE CASCADE,
    budget_year_id UUID NOT NULL REFERENCES budget_years(id) ON DELETE CASCADE,
    amount NUMERIC(15, 2) NOT NULL DEFAULT 0,
    amount_given NUMERIC(15, 2) NOT NULL DEFAULT 0,
    spent NUMERIC(15, 2) NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_fund_budgets_fund_year UNIQUE (fund_id, budget_year_id)
);

CREATE INDEX idx_fund_budgets_year ON fund_budgets(budget_year_id);
";

// Deleting a fund or category that expenses still reference is refused.
const CATEGORIES_SQL: &str = r"
CREATE TABLE categories (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    fund_id UUID NOT NULL REFERENCES funds(id),
    name VARCHAR(100) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_categories_user_name UNIQUE (user_id, name)
);

CREATE INDEX idx_categories_fund ON categories(fund_id);
";

const INCOMES_SQL: &str = r"
CREATE TABLE incomes (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    budget_year_id UUID NOT NULL REFERENCES budget_years(id),
    amount NUMERIC(15, 2) NOT NULL,
    date DATE NOT NULL,
    month SMALLINT NOT NULL,
    year INTEGER NOT NULL,
    source VARCHAR(255) NOT NULL,
    note TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_income_amount CHECK (amount >= 0),
    CONSTRAINT chk_income_month CHECK (month BETWEEN 1 AND 12)
);

CREATE INDEX idx_incomes_user_year ON incomes(user_id, budget_year_id, date DESC);
";

const EXPENSES_SQL: &str = r"
CREATE TABLE expenses (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    budget_year_id UUID NOT NULL REFERENCES budget_years(id),
    category_id UUID NOT NULL REFERENCES categories(id),
    fund_id UUID NOT NULL REFERENCES funds(id),
    amount NUMERIC(15, 2) NOT NULL,
    date DATE NOT NULL,
    name VARCHAR(255) NOT NULL,
    note TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_expense_amount CHECK (amount >= 0)
);

CREATE INDEX idx_expenses_user_year ON expenses(user_id, budget_year_id, date DESC);
CREATE INDEX idx_expenses_fund_year ON expenses(fund_id, budget_year_id);
CREATE INDEX idx_expenses_category ON expenses(category_id);
";

const TITHE_GIVEN_SQL: &str = r"
CREATE TABLE tithe_given (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    budget_year_id UUID REFERENCES budget_years(id) ON DELETE SET NULL,
    amount NUMERIC(15, 2) NOT NULL,
    date DATE NOT NULL,
    recipient VARCHAR(255),
    note TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_tithe_amount CHECK (amount >= 0)
);

CREATE INDEX idx_tithe_given_user_year ON tithe_given(user_id, budget_year_id);
";

const DEBTS_SQL: &str = r"
CREATE TABLE debts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    name VARCHAR(255) NOT NULL,
    creditor VARCHAR(255),
    amount NUMERIC(15, 2) NOT NULL,
    due_date DATE,
    status debt_status NOT NULL DEFAULT 'unpaid',
    paid_at TIMESTAMPTZ,
    note TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_debt_amount CHECK (amount >= 0),
    CONSTRAINT chk_debt_paid_at CHECK ((status = 'paid') = (paid_at IS NOT NULL))
);

CREATE INDEX idx_debts_user_status ON debts(user_id, status);
";

const TASKS_SQL: &str = r"
CREATE TABLE tasks (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    title VARCHAR(255) NOT NULL,
    description TEXT,
    due_date DATE,
    is_completed BOOLEAN NOT NULL DEFAULT false,
    completed_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_tasks_user_open ON tasks(user_id, due_date) WHERE NOT is_completed;
";

const ASSETS_SQL: &str = r"
CREATE TABLE asset_snapshots (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    name VARCHAR(255) NOT NULL,
    snapshot_date DATE NOT NULL,
    note TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_asset_snapshots_user_date ON asset_snapshots(user_id, snapshot_date DESC);

CREATE TABLE asset_details (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    snapshot_id UUID NOT NULL REFERENCES asset_snapshots(id) ON DELETE CASCADE,
    label VARCHAR(255) NOT NULL,
    kind asset_kind NOT NULL,
    amount NUMERIC(15, 2) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_asset_amount CHECK (amount >= 0)
);

CREATE INDEX idx_asset_details_snapshot ON asset_details(snapshot_id);
";

const SYSTEM_SETTINGS_SQL: &str = r"
CREATE TABLE system_settings (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    key VARCHAR(100) NOT NULL,
    value TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_system_settings_user_key UNIQUE (user_id, key)
);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS system_settings CASCADE;
DROP TABLE IF EXISTS asset_details CASCADE;
DROP TABLE IF EXISTS asset_snapshots CASCADE;
DROP TABLE IF EXISTS tasks CASCADE;
DROP TABLE IF EXISTS debts CASCADE;
DROP TABLE IF EXISTS tithe_given CASCADE;
DROP TABLE IF EXISTS expenses CASCADE;
DROP TABLE IF EXISTS incomes CASCADE;
DROP TABLE IF EXISTS categories CASCADE;
DROP TABLE IF EXISTS fund_budgets CASCADE;
DROP TABLE IF EXISTS funds CASCADE;
DROP TABLE IF EXISTS budget_years CASCADE;
DROP TABLE IF EXISTS users CASCADE;

DROP TYPE IF EXISTS asset_kind;
DROP TYPE IF EXISTS debt_status;
DROP TYPE IF EXISTS fund_type;
";
