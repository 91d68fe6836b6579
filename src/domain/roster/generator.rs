//! Starting team and squad generation

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::names::{COUNTRIES, FIRST_NAMES, SURNAMES};
use crate::domain::player::{NewPlayer, MAX_PLAYER_AGE, MIN_PLAYER_AGE};
use crate::domain::rules::GameRules;
use crate::domain::team::{NewTeam, Team};
use crate::domain::user::User;

const FALLBACK_COUNTRY: &str = "England";

/// Builds the team and squad every new account starts with
#[derive(Debug)]
pub struct RosterGenerator {
    rules: GameRules,
    rng: Mutex<StdRng>,
}

impl RosterGenerator {
    pub fn new(rules: GameRules) -> Self {
        Self {
            rules,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Generator with a fixed seed, for reproducible rosters in tests
    pub fn with_seed(rules: GameRules, seed: u64) -> Self {
        Self {
            rules,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn generate_team(&self, owner: &User) -> NewTeam {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);

        NewTeam {
            user_id: owner.id(),
            name: format!("Team of {}", owner.username()),
            country: pick(&mut *rng, COUNTRIES, FALLBACK_COUNTRY),
            budget: self.rules.starting_budget,
        }
    }

    /// One draft per roster slot, in role order
    pub fn generate_players(&self, team: &Team) -> Vec<NewPlayer> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let mut players = Vec::with_capacity(self.rules.roster.total() as usize);

        for (role, count) in self.rules.roster.entries() {
            for _ in 0..count {
                players.push(NewPlayer {
                    name: pick(&mut *rng, FIRST_NAMES, "Alex"),
                    surname: pick(&mut *rng, SURNAMES, "Smith"),
                    country: pick(&mut *rng, COUNTRIES, FALLBACK_COUNTRY),
                    role,
                    age: rng.gen_range(MIN_PLAYER_AGE..=MAX_PLAYER_AGE),
                    team_id: team.id(),
                    value: self.rules.initial_player_value,
                });
            }
        }

        players
    }
}

fn pick<R: Rng>(rng: &mut R, pool: &[&str], fallback: &str) -> String {
    pool.choose(rng).copied().unwrap_or(fallback).to_string()
}
