//! Database migrations infrastructure

use sqlx::postgres::PgPool;
use tracing::info;

use crate::domain::DomainError;

/// PostgreSQL migrator tracking applied versions in `_migrations`
#[derive(Debug)]
pub struct PostgresMigrator {
    pool: PgPool,
}

impl PostgresMigrator {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the migrations table if it doesn't exist
    async fn ensure_migrations_table(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS _migrations (
                version BIGINT PRIMARY KEY,
                description TEXT NOT NULL,
                installed_on TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create migrations table: {}", e)))?;

        Ok(())
    }

    /// Applies a single migration unless it is already recorded.
    ///
    /// Returns whether the migration ran.
    pub async fn run_migration(&self, migration: &Migration) -> Result<bool, DomainError> {
        self.ensure_migrations_table().await?;

        let applied: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM _migrations WHERE version = $1)")
                .bind(migration.version)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::storage(format!("Failed to check migration status: {}", e))
                })?;

        if applied {
            return Ok(false);
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;

        sqlx::raw_sql(migration.up)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::storage(format!(
                    "Failed to run migration {}: {}",
                    migration.version, e
                ))
            })?;

        sqlx::query("INSERT INTO _migrations (version, description) VALUES ($1, $2)")
            .bind(migration.version)
            .bind(migration.description)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::storage(format!(
                    "Failed to record migration {}: {}",
                    migration.version, e
                ))
            })?;

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit migration: {}", e)))?;

        info!(
            version = migration.version,
            description = migration.description,
            "Applied migration"
        );

        Ok(true)
    }

    /// Returns the latest applied migration version
    pub async fn current_version(&self) -> Result<Option<i64>, DomainError> {
        self.ensure_migrations_table().await?;

        sqlx::query_scalar("SELECT MAX(version) FROM _migrations")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get migration version: {}", e)))
    }
}

/// A versioned schema change
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub version: i64,
    pub description: &'static str,
    /// SQL applied in one transaction; may hold several statements
    pub up: &'static str,
}

/// Schema for users, teams and players, in apply order
pub fn game_migrations() -> Vec<Migration> {
    vec![
        Migration {
            version: 1,
            description: "Create users table",
            up: r#"
                CREATE TABLE users (
                    id BIGSERIAL PRIMARY KEY,
                    username TEXT NOT NULL UNIQUE,
                    password_hash TEXT NOT NULL,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );
            "#,
        },
        Migration {
            version: 2,
            description: "Create teams table",
            up: r#"
                CREATE TABLE teams (
                    id BIGSERIAL PRIMARY KEY,
                    user_id BIGINT NOT NULL UNIQUE REFERENCES users (id),
                    name TEXT NOT NULL,
                    country TEXT NOT NULL,
                    budget BIGINT NOT NULL CHECK (budget >= 0)
                );
            "#,
        },
        Migration {
            version: 3,
            description: "Create players table",
            up: r#"
                CREATE TABLE players (
                    id BIGSERIAL PRIMARY KEY,
                    team_id BIGINT NOT NULL REFERENCES teams (id),
                    name TEXT NOT NULL,
                    surname TEXT NOT NULL,
                    country TEXT NOT NULL,
                    role TEXT NOT NULL
                        CHECK (role IN ('goalkeeper', 'defender', 'midfielder', 'attacker')),
                    age SMALLINT NOT NULL CHECK (age BETWEEN 18 AND 40),
                    value BIGINT NOT NULL CHECK (value > 0),
                    on_market BOOLEAN NOT NULL DEFAULT FALSE,
                    requested_value BIGINT CHECK (requested_value > 0),
                    CONSTRAINT players_listing_has_price
                        CHECK (on_market = (requested_value IS NOT NULL))
                );
                CREATE INDEX players_team_id_idx ON players (team_id);
                CREATE INDEX players_on_market_idx ON players (id) WHERE on_market;
            "#,
        },
    ]
}

/// Applies every pending game migration and returns the resulting version
pub async fn run_game_migrations(pool: &PgPool) -> Result<Option<i64>, DomainError> {
    let migrator = PostgresMigrator::new(pool.clone());

    for migration in game_migrations() {
        migrator.run_migration(&migration).await?;
    }

    migrator.current_version().await
}
