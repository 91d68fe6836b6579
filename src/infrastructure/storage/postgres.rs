//! PostgreSQL game store with connection pooling

use std::fmt::Debug;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::{Postgres, Row, Transaction};

use super::migrations::run_game_migrations;
use crate::domain::market::{Purchase, Trade, TradeRepository};
use crate::domain::player::{
    player_not_found, player_not_owned, MarketStatus, NewPlayer, Player, PlayerId, PlayerPatch,
    PlayerRepository, PlayerRole,
};
use crate::domain::roster::RosterGenerator;
use crate::domain::team::{NewTeam, Team, TeamId, TeamPatch, TeamRepository};
use crate::domain::user::{NewUser, User, UserId, UserRepository};
use crate::domain::{Account, DomainError, GameStore};

const USER_COLUMNS: &str = "id, username, password_hash, created_at";
const TEAM_COLUMNS: &str = "id, user_id, name, country, budget";
const PLAYER_COLUMNS: &str =
    "id, team_id, name, surname, country, role, age, value, on_market, requested_value";

/// PostgreSQL connection configuration
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/soccer_manager".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
        }
    }
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }
}

fn storage_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::storage(format!("{}: {}", context, e))
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db) if db.is_unique_violation())
}

fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
    let read = storage_error("Failed to read user row");

    let id: i64 = row.try_get("id").map_err(&read)?;
    let username: String = row.try_get("username").map_err(&read)?;
    let password_hash: String = row.try_get("password_hash").map_err(&read)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(&read)?;

    Ok(User::from_parts(UserId::new(id), username, password_hash, created_at))
}

fn row_to_team(row: &PgRow) -> Result<Team, DomainError> {
    let read = storage_error("Failed to read team row");

    let id: i64 = row.try_get("id").map_err(&read)?;
    let user_id: i64 = row.try_get("user_id").map_err(&read)?;
    let name: String = row.try_get("name").map_err(&read)?;
    let country: String = row.try_get("country").map_err(&read)?;
    let budget: i64 = row.try_get("budget").map_err(&read)?;

    Ok(Team::from_parts(
        TeamId::new(id),
        UserId::new(user_id),
        name,
        country,
        budget,
    ))
}

fn row_to_player(row: &PgRow) -> Result<Player, DomainError> {
    let read = storage_error("Failed to read player row");

    let id: i64 = row.try_get("id").map_err(&read)?;
    let team_id: i64 = row.try_get("team_id").map_err(&read)?;
    let name: String = row.try_get("name").map_err(&read)?;
    let surname: String = row.try_get("surname").map_err(&read)?;
    let country: String = row.try_get("country").map_err(&read)?;
    let role: String = row.try_get("role").map_err(&read)?;
    let age: i16 = row.try_get("age").map_err(&read)?;
    let value: i64 = row.try_get("value").map_err(&read)?;
    let on_market: bool = row.try_get("on_market").map_err(&read)?;
    let requested_value: Option<i64> = row.try_get("requested_value").map_err(&read)?;

    let role = PlayerRole::parse(&role)
        .ok_or_else(|| DomainError::storage(format!("Unknown player role '{}'", role)))?;
    let age = u8::try_from(age)
        .map_err(|_| DomainError::storage(format!("Player age {} out of range", age)))?;

    Ok(Player::from_parts(
        PlayerId::new(id),
        name,
        surname,
        country,
        role,
        age,
        TeamId::new(team_id),
        value,
        MarketStatus::from_columns(on_market, requested_value)?,
    ))
}

/// Users, teams and players in PostgreSQL
///
/// Purchases settle inside one transaction holding row locks on the player
/// and both teams.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl Debug for PostgresStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresStore")
            .field("pool_size", &self.pool.size())
            .finish()
    }
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(config: &PostgresConfig) -> Result<Self, DomainError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(std::time::Duration::from_secs(config.connect_timeout_secs))
            .connect(&config.url)
            .await
            .map_err(storage_error("Failed to connect to PostgreSQL"))?;

        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply pending schema migrations
    pub async fn migrate(&self) -> Result<Option<i64>, DomainError> {
        run_game_migrations(&self.pool).await
    }

    async fn begin(&self) -> Result<Transaction<'static, Postgres>, DomainError> {
        self.pool
            .begin()
            .await
            .map_err(storage_error("Failed to begin transaction"))
    }

    /// Tell a missing player apart from one owned by another team after a
    /// conditioned write matched no row
    async fn explain_missed_player_write(&self, id: PlayerId) -> DomainError {
        match self.get_player(id).await {
            Ok(Some(_)) => player_not_owned(),
            Ok(None) => player_not_found(),
            Err(e) => e,
        }
    }

    async fn lock_team(
        tx: &mut Transaction<'static, Postgres>,
        id: TeamId,
    ) -> Result<Team, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM teams WHERE id = $1 FOR UPDATE",
            TEAM_COLUMNS
        ))
        .bind(id.value())
        .fetch_optional(&mut **tx)
        .await
        .map_err(storage_error("Failed to lock team"))?
        .ok_or_else(|| DomainError::not_found(format!("Team {} not found", id)))?;

        row_to_team(&row)
    }

    async fn insert_user(
        tx: &mut Transaction<'static, Postgres>,
        user: &NewUser,
    ) -> Result<User, DomainError> {
        let row = sqlx::query(&format!(
            "INSERT INTO users (username, password_hash) VALUES ($1, $2) RETURNING {}",
            USER_COLUMNS
        ))
        .bind(&user.username)
        .bind(&user.password_hash)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::conflict("User already exists")
            } else {
                DomainError::storage(format!("Failed to create user: {}", e))
            }
        })?;

        row_to_user(&row)
    }

    async fn insert_team(
        tx: &mut Transaction<'static, Postgres>,
        team: &NewTeam,
    ) -> Result<Team, DomainError> {
        let row = sqlx::query(&format!(
            "INSERT INTO teams (user_id, name, country, budget) VALUES ($1, $2, $3, $4) RETURNING {}",
            TEAM_COLUMNS
        ))
        .bind(team.user_id.value())
        .bind(&team.name)
        .bind(&team.country)
        .bind(team.budget)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::conflict(format!("User {} already owns a team", team.user_id))
            } else {
                DomainError::storage(format!("Failed to create team: {}", e))
            }
        })?;

        row_to_team(&row)
    }

    async fn insert_players(
        tx: &mut Transaction<'static, Postgres>,
        players: Vec<NewPlayer>,
    ) -> Result<Vec<Player>, DomainError> {
        let mut created = Vec::with_capacity(players.len());

        for draft in players {
            let row = sqlx::query(&format!(
                "INSERT INTO players (team_id, name, surname, country, role, age, value) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}",
                PLAYER_COLUMNS
            ))
            .bind(draft.team_id.value())
            .bind(&draft.name)
            .bind(&draft.surname)
            .bind(&draft.country)
            .bind(draft.role.as_str())
            .bind(i16::from(draft.age))
            .bind(draft.value)
            .fetch_one(&mut **tx)
            .await
            .map_err(storage_error("Failed to create player"))?;

            created.push(row_to_player(&row)?);
        }

        Ok(created)
    }
}

#[async_trait]
impl UserRepository for PostgresStore {
    async fn get_user(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error("Failed to get user"))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users WHERE username = $1",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error("Failed to get user by username"))?;

        row.as_ref().map(row_to_user).transpose()
    }
}

#[async_trait]
impl TeamRepository for PostgresStore {
    async fn get_team(&self, id: TeamId) -> Result<Option<Team>, DomainError> {
        let row = sqlx::query(&format!("SELECT {} FROM teams WHERE id = $1", TEAM_COLUMNS))
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error("Failed to get team"))?;

        row.as_ref().map(row_to_team).transpose()
    }

    async fn get_team_by_user(&self, user_id: UserId) -> Result<Option<Team>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM teams WHERE user_id = $1",
            TEAM_COLUMNS
        ))
        .bind(user_id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error("Failed to get team by user"))?;

        row.as_ref().map(row_to_team).transpose()
    }

    async fn update_team_details(&self, id: TeamId, patch: &TeamPatch) -> Result<Team, DomainError> {
        let row = sqlx::query(&format!(
            "UPDATE teams SET name = COALESCE($2, name), country = COALESCE($3, country) \
             WHERE id = $1 RETURNING {}",
            TEAM_COLUMNS
        ))
        .bind(id.value())
        .bind(patch.name.as_deref())
        .bind(patch.country.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error("Failed to update team"))?
        .ok_or_else(|| DomainError::not_found(format!("Team {} not found", id)))?;

        row_to_team(&row)
    }
}

#[async_trait]
impl PlayerRepository for PostgresStore {
    async fn get_player(&self, id: PlayerId) -> Result<Option<Player>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM players WHERE id = $1",
            PLAYER_COLUMNS
        ))
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error("Failed to get player"))?;

        row.as_ref().map(row_to_player).transpose()
    }

    async fn list_players_by_team(&self, team_id: TeamId) -> Result<Vec<Player>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM players WHERE team_id = $1 ORDER BY id",
            PLAYER_COLUMNS
        ))
        .bind(team_id.value())
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error("Failed to list team players"))?;

        rows.iter().map(row_to_player).collect()
    }

    async fn list_players_on_market(&self) -> Result<Vec<Player>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM players WHERE on_market ORDER BY id",
            PLAYER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error("Failed to list market players"))?;

        rows.iter().map(row_to_player).collect()
    }

    async fn update_player_details(
        &self,
        id: PlayerId,
        owner: TeamId,
        patch: &PlayerPatch,
    ) -> Result<Player, DomainError> {
        let row = sqlx::query(&format!(
            "UPDATE players SET name = COALESCE($3, name), surname = COALESCE($4, surname), \
             country = COALESCE($5, country) WHERE id = $1 AND team_id = $2 RETURNING {}",
            PLAYER_COLUMNS
        ))
        .bind(id.value())
        .bind(owner.value())
        .bind(patch.name.as_deref())
        .bind(patch.surname.as_deref())
        .bind(patch.country.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error("Failed to update player"))?;

        match row {
            Some(row) => row_to_player(&row),
            None => Err(self.explain_missed_player_write(id).await),
        }
    }

    async fn set_market_status(
        &self,
        id: PlayerId,
        owner: TeamId,
        status: MarketStatus,
    ) -> Result<Player, DomainError> {
        let mut tx = self.begin().await?;

        let row = sqlx::query(&format!(
            "SELECT {} FROM players WHERE id = $1 FOR UPDATE",
            PLAYER_COLUMNS
        ))
        .bind(id.value())
        .fetch_optional(&mut *tx)
        .await
        .map_err(storage_error("Failed to lock player"))?
        .ok_or_else(player_not_found)?;

        let mut player = row_to_player(&row)?;
        if !player.is_owned_by(owner) {
            return Err(player_not_owned());
        }

        match status {
            MarketStatus::Listed { price } => {
                player.list_for_sale(price)?;
            }
            MarketStatus::OffMarket => player.withdraw()?,
        }

        let row = sqlx::query(&format!(
            "UPDATE players SET on_market = $2, requested_value = $3 WHERE id = $1 RETURNING {}",
            PLAYER_COLUMNS
        ))
        .bind(id.value())
        .bind(player.market().is_listed())
        .bind(player.market().asking_price())
        .fetch_one(&mut *tx)
        .await
        .map_err(storage_error("Failed to update listing"))?;

        tx.commit()
            .await
            .map_err(storage_error("Failed to commit listing"))?;

        row_to_player(&row)
    }
}

#[async_trait]
impl TradeRepository for PostgresStore {
    async fn settle_purchase(&self, purchase: &Purchase) -> Result<Trade, DomainError> {
        purchase.ensure_distinct_parties()?;

        let mut tx = self.begin().await?;

        let row = sqlx::query(&format!(
            "SELECT {} FROM players WHERE id = $1 FOR UPDATE",
            PLAYER_COLUMNS
        ))
        .bind(purchase.player_id.value())
        .fetch_optional(&mut *tx)
        .await
        .map_err(storage_error("Failed to lock player"))?
        .ok_or_else(player_not_found)?;
        let mut player = row_to_player(&row)?;

        // Teams are locked in id order so concurrent trades between the same
        // pair cannot deadlock
        let (first, second) = if purchase.buyer < purchase.seller {
            (purchase.buyer, purchase.seller)
        } else {
            (purchase.seller, purchase.buyer)
        };
        let first = Self::lock_team(&mut tx, first).await?;
        let second = Self::lock_team(&mut tx, second).await?;
        let (mut buyer, mut seller) = if first.id() == purchase.buyer {
            (first, second)
        } else {
            (second, first)
        };

        let previous_value = purchase.settle(&mut player, &mut buyer, &mut seller)?;

        for team in [&buyer, &seller] {
            sqlx::query("UPDATE teams SET budget = $2 WHERE id = $1")
                .bind(team.id().value())
                .bind(team.budget())
                .execute(&mut *tx)
                .await
                .map_err(storage_error("Failed to update budget"))?;
        }

        sqlx::query(
            "UPDATE players SET team_id = $2, value = $3, on_market = FALSE, \
             requested_value = NULL WHERE id = $1",
        )
        .bind(player.id().value())
        .bind(player.team_id().value())
        .bind(player.value())
        .execute(&mut *tx)
        .await
        .map_err(storage_error("Failed to transfer player"))?;

        tx.commit()
            .await
            .map_err(storage_error("Failed to commit purchase"))?;

        Ok(Trade {
            player,
            buyer,
            seller,
            price: purchase.price,
            previous_value,
        })
    }
}

#[async_trait]
impl GameStore for PostgresStore {
    async fn create_account(
        &self,
        user: NewUser,
        roster: &RosterGenerator,
    ) -> Result<Account, DomainError> {
        // Dropping the transaction on any error rolls every insert back
        let mut tx = self.begin().await?;

        let user = Self::insert_user(&mut tx, &user).await?;
        let team = Self::insert_team(&mut tx, &roster.generate_team(&user)).await?;
        let players = Self::insert_players(&mut tx, roster.generate_players(&team)).await?;

        tx.commit()
            .await
            .map_err(storage_error("Failed to commit account"))?;

        Ok(Account {
            user,
            team,
            players,
        })
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(storage_error("Database ping failed"))?;

        Ok(())
    }
}
