//! Database seeder for Sitebook development and testing.
//!
//! Seeds the chart of accounts, two cashboxes, two partners and one each of
//! client, supplier and project. Safe to run repeatedly: rows that already
//! exist are skipped.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use sitebook_db::{
    AccountRepository,
    entities::{cashboxes, clients, partners, projects, suppliers},
};
use sitebook_shared::AppConfig;

/// Accounts added on top of the system chart.
const EXTRA_ACCOUNTS: [(&str, &str); 4] = [
    ("1010", "Bank"),
    ("3100", "Partner Wallet - Amal"),
    ("3110", "Partner Wallet - Basil"),
    ("5200", "Site Overheads"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    println!("Connecting to database...");
    let db = sitebook_db::connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    println!("Seeding chart of accounts...");
    seed_accounts(&db).await?;

    println!("Seeding cashboxes...");
    seed_cashboxes(&db).await?;

    println!("Seeding partners...");
    seed_partners(&db).await?;

    println!("Seeding clients, suppliers and projects...");
    seed_master_data(&db).await?;

    println!("Seeding complete!");
    Ok(())
}

async fn account_id(accounts: &AccountRepository, code: &str) -> anyhow::Result<String> {
    accounts
        .find_by_code(code)
        .await?
        .map(|account| account.id)
        .with_context(|| format!("account {code} missing after seeding"))
}

async fn seed_accounts(db: &DatabaseConnection) -> anyhow::Result<()> {
    let accounts = AccountRepository::new(db.clone());

    let created = accounts.seed_system_accounts().await?;
    println!("  Created {} system accounts", created.len());

    for (code, name) in EXTRA_ACCOUNTS {
        if accounts.find_by_code(code).await?.is_some() {
            println!("  Account {code} already exists, skipping...");
            continue;
        }
        accounts.create(code, name).await?;
        println!("  Created account {code} {name}");
    }
    Ok(())
}

async fn seed_cashboxes(db: &DatabaseConnection) -> anyhow::Result<()> {
    let accounts = AccountRepository::new(db.clone());

    for (id, name, code) in [
        ("BOX-CASH", "Site Cash", "1000"),
        ("BOX-BANK", "Main Bank Account", "1010"),
    ] {
        if cashboxes::Entity::find_by_id(id).one(db).await?.is_some() {
            println!("  Cashbox {id} already exists, skipping...");
            continue;
        }
        cashboxes::ActiveModel {
            id: Set(id.to_string()),
            name: Set(name.to_string()),
            account_id: Set(account_id(&accounts, code).await?),
            created_at: Set(Utc::now().into()),
        }
        .insert(db)
        .await?;
        println!("  Created cashbox {id} -> {code}");
    }
    Ok(())
}

async fn seed_partners(db: &DatabaseConnection) -> anyhow::Result<()> {
    let accounts = AccountRepository::new(db.clone());

    for (id, name, code) in [("PTN-A", "Amal", "3100"), ("PTN-B", "Basil", "3110")] {
        if partners::Entity::find_by_id(id).one(db).await?.is_some() {
            println!("  Partner {id} already exists, skipping...");
            continue;
        }
        partners::ActiveModel {
            id: Set(id.to_string()),
            name: Set(name.to_string()),
            account_id: Set(account_id(&accounts, code).await?),
            created_at: Set(Utc::now().into()),
        }
        .insert(db)
        .await?;
        println!("  Created partner {id} -> {code}");
    }
    Ok(())
}

async fn seed_master_data(db: &DatabaseConnection) -> anyhow::Result<()> {
    let now = Utc::now();

    if clients::Entity::find_by_id("C1").one(db).await?.is_none() {
        clients::ActiveModel {
            id: Set("C1".to_string()),
            name: Set("Harbor Holdings".to_string()),
            created_at: Set(now.into()),
        }
        .insert(db)
        .await?;
        println!("  Created client C1");
    }

    if suppliers::Entity::find_by_id("S1").one(db).await?.is_none() {
        suppliers::ActiveModel {
            id: Set("S1".to_string()),
            name: Set("Northern Steel".to_string()),
            created_at: Set(now.into()),
        }
        .insert(db)
        .await?;
        println!("  Created supplier S1");
    }

    if projects::Entity::find_by_id("P1").one(db).await?.is_none() {
        projects::ActiveModel {
            id: Set("P1".to_string()),
            name: Set("Riverside Tower".to_string()),
            created_at: Set(now.into()),
        }
        .insert(db)
        .await?;
        println!("  Created project P1");
    }

    Ok(())
}
