//! Initial database migration.
//!
//! Creates the reimbursement tables and seeds the three expense statuses.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: REFERENCE TABLES
        // ============================================================
        db.execute_unprepared(ROLES_SQL).await?;
        db.execute_unprepared(CATEGORIES_SQL).await?;
        db.execute_unprepared(EXPENSE_STATUSES_SQL).await?;

        // ============================================================
        // PART 2: EMPLOYEES & SPENDING LIMITS
        // ============================================================
        db.execute_unprepared(EMPLOYEES_SQL).await?;
        db.execute_unprepared(CATEGORY_PACKAGES_SQL).await?;
        db.execute_unprepared(ROLE_CATEGORY_PACKAGES_SQL).await?;

        // ============================================================
        // PART 3: EXPENSES
        // ============================================================
        db.execute_unprepared(EXPENSES_SQL).await?;

        // ============================================================
        // PART 4: SEED DATA
        // ============================================================
        db.execute_unprepared(SEED_EXPENSE_STATUSES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

const ROLES_SQL: &str = r"
CREATE TABLE roles (
    id SERIAL PRIMARY KEY,
    name VARCHAR(100) NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT true
);
";

const CATEGORIES_SQL: &str = r"
CREATE TABLE categories (
    id SERIAL PRIMARY KEY,
    name VARCHAR(100) NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT true
);
";

const EXPENSE_STATUSES_SQL: &str = r"
CREATE TABLE expense_statuses (
    id SERIAL PRIMARY KEY,
    name VARCHAR(50) NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT true
);

CREATE INDEX idx_expense_statuses_name ON expense_statuses(LOWER(name));
";

const EMPLOYEES_SQL: &str = r"
CREATE TABLE employees (
    id SERIAL PRIMARY KEY,
    name VARCHAR(200) NOT NULL,
    email VARCHAR(255) NOT NULL,
    role_id INTEGER NOT NULL REFERENCES roles(id)
);

CREATE INDEX idx_employees_role ON employees(role_id);
";

const CATEGORY_PACKAGES_SQL: &str = r"
CREATE TABLE category_packages (
    id SERIAL PRIMARY KEY,
    category_id INTEGER NOT NULL REFERENCES categories(id),
    package_name VARCHAR(100) NOT NULL,
    expense_limit BIGINT NOT NULL,
    CONSTRAINT chk_expense_limit_non_negative CHECK (expense_limit >= 0)
);
";

const ROLE_CATEGORY_PACKAGES_SQL: &str = r"
CREATE TABLE role_category_packages (
    id SERIAL PRIMARY KEY,
    role_id INTEGER NOT NULL REFERENCES roles(id),
    category_package_id INTEGER NOT NULL REFERENCES category_packages(id)
);

CREATE INDEX idx_role_category_packages_role ON role_category_packages(role_id);
";

const EXPENSES_SQL: &str = r"
CREATE TABLE expenses (
    id SERIAL PRIMARY KEY,
    employee_id INTEGER NOT NULL REFERENCES employees(id) ON DELETE CASCADE,
    category_id INTEGER NOT NULL REFERENCES categories(id),
    status_id INTEGER NOT NULL REFERENCES expense_statuses(id),
    amount BIGINT NOT NULL,
    submit_date TIMESTAMPTZ NOT NULL DEFAULT now(),
    approved_date TIMESTAMPTZ,
    CONSTRAINT chk_expense_amount CHECK (amount > 0),
    -- Only approved expenses carry an approval date
    CONSTRAINT chk_approved_date CHECK (approved_date IS NULL OR status_id = 2)
);

-- Per-employee listing and date range filter
CREATE INDEX idx_expenses_employee ON expenses(employee_id, submit_date);

-- Manager status filters, newest first
CREATE INDEX idx_expenses_status ON expenses(status_id, submit_date DESC);
";

const SEED_EXPENSE_STATUSES_SQL: &str = r"
INSERT INTO expense_statuses (id, name, is_active) VALUES
    (1, 'Pending', true),
    (2, 'Approved', true),
    (3, 'Rejected', true);

SELECT setval('expense_statuses_id_seq', (SELECT MAX(id) FROM expense_statuses));
";

const DROP_ALL_SQL: &str = r"
-- DROP ALL: Rollback migration
DROP TABLE IF EXISTS expenses CASCADE;
DROP TABLE IF EXISTS role_category_packages CASCADE;
DROP TABLE IF EXISTS category_packages CASCADE;
DROP TABLE IF EXISTS employees CASCADE;
DROP TABLE IF EXISTS expense_statuses CASCADE;
DROP TABLE IF EXISTS categories CASCADE;
DROP TABLE IF EXISTS roles CASCADE;
";
