//! Actor - Who is performing an operation
//!
//! Events record their author, and a few operations (trade cancellation,
//! attack declarations) accept either a house or an admin.

use super::house::HouseId;

/// Unique identifier for a user account
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for UserId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Actor {
    /// Acting on behalf of a house
    House(HouseId),
    /// A logged-in player account
    User(UserId),
    /// The game master
    Admin(UserId),
}

impl Actor {
    pub fn is_admin(&self) -> bool {
        matches!(self, Actor::Admin(_))
    }

    /// The house this actor speaks for, if any
    pub fn house(&self) -> Option<&HouseId> {
        match self {
            Actor::House(id) => Some(id),
            Actor::User(_) | Actor::Admin(_) => None,
        }
    }

    /// Plain identifier, as stored in an event's `created_by`
    pub fn id_str(&self) -> &str {
        match self {
            Actor::House(id) => id.as_str(),
            Actor::User(id) | Actor::Admin(id) => id.as_str(),
        }
    }
}

impl core::fmt::Display for Actor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Actor::House(id) => write!(f, "house:{}", id),
            Actor::User(id) => write!(f, "user:{}", id),
            Actor::Admin(id) => write!(f, "admin:{}", id),
        }
    }
}
