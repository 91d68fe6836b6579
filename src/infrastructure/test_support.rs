//! Fixtures shared by service tests

use crate::domain::roster::RosterGenerator;
use crate::domain::rules::GameRules;
use crate::domain::user::NewUser;
use crate::domain::{Account, GameStore};

pub type SeededManager = Account;

/// Store a manager with a default roster, skipping password hashing
pub async fn seed_manager<S: GameStore + ?Sized>(
    store: &S,
    username: &str,
    budget: i64,
) -> SeededManager {
    let roster = RosterGenerator::with_seed(
        GameRules {
            starting_budget: budget,
            ..GameRules::default()
        },
        17,
    );

    store
        .create_account(NewUser::new(username, "not-a-real-hash"), &roster)
        .await
        .unwrap()
}
