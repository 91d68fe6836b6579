//! Soccer Manager API
//!
//! Backend for a football management game:
//! - Manager registration with a generated team and squad
//! - Bearer token authentication
//! - Team and player edits restricted to their owner
//! - A transfer market with randomized value growth on every sale

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use rand::Rng;
use tracing::{info, warn};

use api::state::AppState;
use domain::{GameStore, MarkupPolicy, RosterGenerator};
use infrastructure::auth::{JwtConfig, JwtService, TokenService};
use infrastructure::market::MarketService;
use infrastructure::storage::StorageFactory;
use infrastructure::team::TeamService;
use infrastructure::user::{AccountService, Argon2Hasher, PasswordHasher};

/// Create application state with the provided configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    config.validate()?;

    let store = StorageFactory::create(&config.storage.to_storage_config()?).await?;
    let jwt_secret = resolve_jwt_secret(config);

    let state = assemble_app_state(store, Arc::new(Argon2Hasher::default()), config, jwt_secret, None);

    info!(
        starting_budget = config.game.starting_budget,
        roster_size = config.game.roster.total(),
        markup_min = config.game.markup.min,
        markup_max = config.game.markup.max,
        "Application state initialized"
    );

    Ok(state)
}

/// Wire services over an existing store.
///
/// A `seed` makes roster generation and markup draws reproducible.
pub fn assemble_app_state(
    store: Arc<dyn GameStore>,
    hasher: Arc<dyn PasswordHasher>,
    config: &AppConfig,
    jwt_secret: String,
    seed: Option<u64>,
) -> AppState {
    let rules = config.game.clone();
    let (roster, markup) = match seed {
        Some(seed) => (
            RosterGenerator::with_seed(rules.clone(), seed),
            MarkupPolicy::with_seed(rules.markup, seed.wrapping_add(1)),
        ),
        None => (RosterGenerator::new(rules.clone()), MarkupPolicy::new(rules.markup)),
    };

    let token_service: Arc<dyn TokenService> = Arc::new(JwtService::new(JwtConfig::new(
        jwt_secret,
        chrono::Duration::minutes(config.auth.default_token_minutes),
    )));

    AppState {
        account_service: Arc::new(AccountService::new(
            store.clone(),
            hasher,
            Arc::new(roster),
        )),
        team_service: Arc::new(TeamService::new(store.clone())),
        market_service: Arc::new(MarketService::new(store.clone(), Arc::new(markup))),
        token_service,
        store,
        login_token_validity: chrono::Duration::minutes(config.auth.login_token_minutes),
    }
}

fn resolve_jwt_secret(config: &AppConfig) -> String {
    match config.auth.jwt_secret.as_deref() {
        Some(secret) if !secret.is_empty() => secret.to_string(),
        _ => {
            warn!(
                "No auth.jwt_secret configured. Generating random secret. \
                Tokens will NOT survive a restart."
            );
            generate_random_secret()
        }
    }
}

/// Generate a random JWT secret
fn generate_random_secret() -> String {
    use rand::distributions::Alphanumeric;

    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}
