//! Database seeder for development and testing.
//!
//! Seeds roles, categories, spending packages, role links and employees.
//! Does nothing if any role already exists.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use reimburse_db::{CategoryRepository, EmployeeRepository, PackageRepository, RoleRepository};
use reimburse_shared::types::{CategoryId, CategoryPackageId, RoleId};
use sea_orm::DatabaseConnection;

/// (name, active)
const ROLES: [(&str, bool); 3] = [("Engineer", true), ("Manager", true), ("Intern", false)];

const CATEGORIES: [&str; 4] = ["Travel", "Meals", "Lodging", "Equipment"];

/// (role, category, package, limit)
const PACKAGES: [(&str, &str, &str, i64); 6] = [
    ("Engineer", "Travel", "Engineer Travel", 1_500),
    ("Engineer", "Meals", "Engineer Meals", 300),
    ("Engineer", "Equipment", "Engineer Equipment", 2_000),
    ("Manager", "Travel", "Manager Travel", 5_000),
    ("Manager", "Meals", "Manager Meals", 800),
    ("Manager", "Lodging", "Manager Lodging", 3_000),
];

/// (name, email, role)
const EMPLOYEES: [(&str, &str, &str); 4] = [
    ("Ada Lovelace", "ada@example.com", "Engineer"),
    ("Alan Turing", "alan@example.com", "Engineer"),
    ("Grace Hopper", "grace@example.com", "Manager"),
    ("Ivy Intern", "ivy@example.com", "Intern"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

    println!("Connecting to database...");
    let db = reimburse_db::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    if !RoleRepository::new(db.clone()).list().await?.is_empty() {
        println!("Roles already exist, skipping...");
        return Ok(());
    }

    println!("Seeding roles...");
    let roles = seed_roles(&db).await?;

    println!("Seeding categories...");
    let categories = seed_categories(&db).await?;

    println!("Seeding packages...");
    seed_packages(&db, &roles, &categories).await?;

    println!("Seeding employees...");
    seed_employees(&db, &roles).await?;

    println!("Seeding complete!");
    Ok(())
}

fn lookup<T: Copy>(items: &[(&str, T)], name: &str) -> anyhow::Result<T> {
    items
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, id)| *id)
        .with_context(|| format!("unknown seed reference: {name}"))
}

async fn seed_roles(db: &DatabaseConnection) -> anyhow::Result<Vec<(&'static str, RoleId)>> {
    let repo = RoleRepository::new(db.clone());
    let mut seeded = Vec::with_capacity(ROLES.len());
    for (name, active) in ROLES {
        let role = repo.create(name, active).await?;
        println!("  Role {name} (id {})", role.id);
        seeded.push((name, RoleId(role.id)));
    }
    Ok(seeded)
}

async fn seed_categories(
    db: &DatabaseConnection,
) -> anyhow::Result<Vec<(&'static str, CategoryId)>> {
    let repo = CategoryRepository::new(db.clone());
    let mut seeded = Vec::with_capacity(CATEGORIES.len());
    for name in CATEGORIES {
        let category = repo.create(name).await?;
        println!("  Category {name} (id {})", category.id);
        seeded.push((name, CategoryId(category.id)));
    }
    Ok(seeded)
}

async fn seed_packages(
    db: &DatabaseConnection,
    roles: &[(&str, RoleId)],
    categories: &[(&str, CategoryId)],
) -> anyhow::Result<()> {
    let repo = PackageRepository::new(db.clone());
    for (role, category, package_name, limit) in PACKAGES {
        let package = repo
            .create_package(lookup(categories, category)?, package_name, limit)
            .await?;
        let link = repo
            .create_link(lookup(roles, role)?, CategoryPackageId(package.id))
            .await?;
        println!("  {package_name} = {limit} (link id {})", link.id);
    }
    Ok(())
}

async fn seed_employees(db: &DatabaseConnection, roles: &[(&str, RoleId)]) -> anyhow::Result<()> {
    let repo = EmployeeRepository::new(db.clone());
    for (name, email, role) in EMPLOYEES {
        let employee = repo.create(name, email, lookup(roles, role)?).await?;
        println!("  Employee {name} (id {})", employee.id);
    }
    Ok(())
}
