//! Schema tool for the reimbursement database.
//!
//! Connects through `DATABASE_URL` (a `.env` file is honored) and hands the
//! subcommand to SeaORM's migration CLI:
//!   migrator up      applies the initial schema and status seed
//!   migrator down    reverts the last applied migration
//!   migrator status  lists applied and pending migrations
//!   migrator fresh   drops every table and rebuilds the schema

use reimburse_db::migration::Migrator;
use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    cli::run_cli(Migrator).await;
}
