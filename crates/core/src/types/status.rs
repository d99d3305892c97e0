//! Status enums for store entities.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// The admin timeline treats this as a forward-only progression
/// (`received → paid → completed`); the API itself accepts arbitrary
/// transitions, so [`OrderStatus::advance`] is a helper, not an invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order created from a cart; awaiting payment in chat.
    #[default]
    Received,
    /// Payment confirmed by the operator.
    Paid,
    /// Fulfilled and closed.
    Completed,
}

impl OrderStatus {
    /// The next status in the forward-only lifecycle, if any.
    #[must_use]
    pub const fn advance(self) -> Option<Self> {
        match self {
            Self::Received => Some(Self::Paid),
            Self::Paid => Some(Self::Completed),
            Self::Completed => None,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Received => write!(f, "received"),
            Self::Paid => write!(f, "paid"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "received" => Ok(Self::Received),
            "paid" => Ok(Self::Paid),
            "completed" => Ok(Self::Completed),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}
