//! Team entity and related types

use serde::{Deserialize, Serialize};

use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Team identifier assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(i64);

impl TeamId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A club owned by exactly one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    id: TeamId,
    /// Owning user; unique across teams
    user_id: UserId,
    name: String,
    country: String,
    /// Transfer budget in currency units
    budget: i64,
}

impl Team {
    pub fn from_parts(
        id: TeamId,
        user_id: UserId,
        name: impl Into<String>,
        country: impl Into<String>,
        budget: i64,
    ) -> Self {
        Self {
            id,
            user_id,
            name: name.into(),
            country: country.into(),
            budget,
        }
    }

    pub fn id(&self) -> TeamId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn budget(&self) -> i64 {
        self.budget
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }

    pub fn can_afford(&self, amount: i64) -> bool {
        amount <= self.budget
    }

    /// Apply the supplied fields of a patch, leaving the rest untouched
    pub fn apply(&mut self, patch: &TeamPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }

        if let Some(country) = &patch.country {
            self.country = country.clone();
        }
    }

    /// Take `amount` out of the budget; the budget never goes negative
    pub fn debit(&mut self, amount: i64) -> Result<(), DomainError> {
        if !self.can_afford(amount) {
            return Err(DomainError::business_rule(
                "user does not have enough money to buy player",
            ));
        }

        self.budget -= amount;
        Ok(())
    }

    pub fn credit(&mut self, amount: i64) {
        self.budget = self.budget.saturating_add(amount);
    }
}

/// Team draft handed to the store, which assigns the identifier
#[derive(Debug, Clone, PartialEq)]
pub struct NewTeam {
    pub user_id: UserId,
    pub name: String,
    pub country: String,
    pub budget: i64,
}

impl NewTeam {
    pub fn into_team(self, id: TeamId) -> Team {
        Team::from_parts(id, self.user_id, self.name, self.country, self.budget)
    }
}

/// Partial update of the owner-editable team fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamPatch {
    pub name: Option<String>,
    pub country: Option<String>,
}

impl TeamPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.country.is_none()
    }
}
