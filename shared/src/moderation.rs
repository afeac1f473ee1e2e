//! Approve and disapprove actions, single or bulk, and the texts around them.

use serde::{Deserialize, Serialize};

use crate::model::TrendId;

/// A moderation verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModerationAction {
    /// `draft → confirmed`.
    Approve,
    /// `draft → deleted`.
    Disapprove,
}

impl ModerationAction {
    /// Destructive actions need an explicit confirmation first.
    pub const fn requires_confirmation(self) -> bool {
        matches!(self, ModerationAction::Disapprove)
    }

    /// Infinitive used in error messages.
    pub const fn verb(self) -> &'static str {
        match self {
            ModerationAction::Approve => "approve",
            ModerationAction::Disapprove => "disapprove",
        }
    }
}

/// What a moderation request targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModerationTarget {
    /// One trend, from the detail panel.
    Single(TrendId),
    /// The admin selection.
    Bulk(Vec<TrendId>),
}

impl ModerationTarget {
    /// Every affected id.
    pub fn ids(&self) -> Vec<TrendId> {
        match self {
            ModerationTarget::Single(id) => vec![*id],
            ModerationTarget::Bulk(ids) => ids.clone(),
        }
    }
}

/// A moderation request about to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Moderation {
    /// What to do.
    pub action: ModerationAction,
    /// To which trends.
    pub target: ModerationTarget,
}

impl Moderation {
    /// Confirmation prompt, when the action needs one.
    pub fn confirmation_prompt(&self) -> Option<String> {
        if !self.action.requires_confirmation() {
            return None;
        }
        Some(match &self.target {
            ModerationTarget::Single(_) => "Are you sure you want to delete this trend?".to_string(),
            ModerationTarget::Bulk(ids) => {
                format!("Are you sure you want to delete {} trend(s)?", ids.len())
            },
        })
    }

    /// Toast text after the server accepted the request.
    pub fn success_message(&self) -> String {
        match (&self.target, self.action) {
            (ModerationTarget::Single(_), ModerationAction::Approve) => "Trend approved successfully!".to_string(),
            (ModerationTarget::Single(_), ModerationAction::Disapprove) => "Trend deleted successfully!".to_string(),
            (ModerationTarget::Bulk(ids), ModerationAction::Approve) => {
                format!("Successfully approved {} trend(s)!", ids.len())
            },
            (ModerationTarget::Bulk(ids), ModerationAction::Disapprove) => {
                format!("Successfully deleted {} trend(s)!", ids.len())
            },
        }
    }

    /// Toast text after the request failed with `reason`.
    pub fn failure_message(&self, reason: &str) -> String {
        match self.target {
            ModerationTarget::Single(_) => format!("Failed to {} trend: {reason}", self.action.verb()),
            ModerationTarget::Bulk(_) => format!("Failed to {} trends: {reason}", self.action.verb()),
        }
    }
}

/// Body of the bulk endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkRequest {
    /// Affected ids.
    pub trend_ids: Vec<TrendId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_disapprove_asks_for_confirmation() {
        let approve = Moderation {
            action: ModerationAction::Approve,
            target: ModerationTarget::Bulk(vec![1, 2]),
        };
        assert_eq!(approve.confirmation_prompt(), None);

        let delete = Moderation {
            action: ModerationAction::Disapprove,
            target: ModerationTarget::Bulk(vec![1, 2]),
        };
        assert_eq!(
            delete.confirmation_prompt().as_deref(),
            Some("Are you sure you want to delete 2 trend(s)?")
        );
    }

    #[test]
    fn messages_match_target_shape() {
        let single = Moderation {
            action: ModerationAction::Approve,
            target: ModerationTarget::Single(42),
        };
        assert_eq!(single.success_message(), "Trend approved successfully!");

        let bulk = Moderation {
            action: ModerationAction::Disapprove,
            target: ModerationTarget::Bulk(vec![1, 2, 3]),
        };
        assert_eq!(bulk.success_message(), "Successfully deleted 3 trend(s)!");
        assert_eq!(bulk.failure_message("boom"), "Failed to disapprove trends: boom");
    }
}
