//! Database seeder for CorpSpend development and testing.
//!
//! Seeds one account per role plus a handful of sample expenses so the
//! dashboard, team view, and reports have something to show.
//!
//! Usage: cargo run --bin seeder
//!
//! All seeded accounts use the password `password123`.

use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use corpspend_core::auth::hash_password;
use corpspend_db::entities::sea_orm_active_enums::{ExpenseCategory, UserRole};
use corpspend_db::repositories::{CreateExpenseInput, CreateUserInput};
use corpspend_db::{ExpenseRepository, UserRepository};

const SEED_PASSWORD: &str = "password123";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = corpspend_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    let users = UserRepository::new(db.clone());
    let expenses = ExpenseRepository::new(db.clone());

    println!("Seeding demo accounts...");
    let (alice, fresh) =
        seed_user(&users, "alice", "alice@corpspend.demo", "Sales", UserRole::Employee).await;
    let (bob, _) =
        seed_user(&users, "bob", "bob@corpspend.demo", "Engineering", UserRole::Employee).await;
    seed_user(&users, "priya", "priya@corpspend.demo", "Finance", UserRole::Manager).await;
    seed_user(&users, "root", "admin@corpspend.demo", "General", UserRole::Admin).await;

    if fresh {
        println!("Seeding sample expenses...");
        seed_expense(&expenses, alice, "Taxi to client site", dec!(500), ExpenseCategory::Travel)
            .await;
        seed_expense(&expenses, alice, "Team lunch", dec!(1250.50), ExpenseCategory::Food).await;
        seed_expense(&expenses, bob, "IDE license renewal", dec!(199), ExpenseCategory::Software)
            .await;
        seed_expense(&expenses, bob, "Mechanical keyboard", dec!(89.99), ExpenseCategory::Equipment)
            .await;
    } else {
        println!("Accounts already seeded, skipping sample expenses");
    }

    println!("Seeding complete!");
}

/// Creates a user unless the email is already registered.
///
/// Returns the user id and whether the account was created on this run.
async fn seed_user(
    repo: &UserRepository,
    username: &str,
    email: &str,
    department: &str,
    role: UserRole,
) -> (Uuid, bool) {
    if let Some(existing) = repo
        .find_by_email(email)
        .await
        .expect("Failed to query users")
    {
        println!("  {email} already exists, skipping");
        return (existing.id, false);
    }

    let password_hash = hash_password(SEED_PASSWORD).expect("Failed to hash seed password");
    let user = repo
        .create(CreateUserInput {
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
            department: department.to_string(),
            role,
        })
        .await
        .expect("Failed to create seed user");

    println!("  created {email}");
    (user.id, true)
}

async fn seed_expense(
    repo: &ExpenseRepository,
    requested_by: Uuid,
    title: &str,
    amount: Decimal,
    category: ExpenseCategory,
) {
    repo.create(CreateExpenseInput {
        title: title.to_string(),
        amount,
        category,
        expense_date: Utc::now().date_naive(),
        requested_by,
    })
    .await
    .expect("Failed to create seed expense");

    println!("  created expense \"{title}\"");
}
