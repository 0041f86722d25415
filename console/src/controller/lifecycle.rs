//! Client-observed deployment lifecycle
//!
//! QUEUED -> DEPLOYING -> {READY, FAILED}. The client never drives these
//! transitions; it only classifies what the backend reports so that polling
//! can decide whether a refetch is due and flag reports that move backwards.

use crate::models::deployment::DeploymentStatus;

/// How a freshly polled status relates to the previously known one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Same status as before
    Unchanged,

    /// Forward move along the lifecycle
    Advanced {
        from: DeploymentStatus,
        to: DeploymentStatus,
    },

    /// Backwards or out-of-terminal move; applied anyway, server truth wins
    Regressed {
        from: DeploymentStatus,
        to: DeploymentStatus,
    },
}

impl Transition {
    /// Classify the move from `from` to `to`
    pub fn observe(from: DeploymentStatus, to: DeploymentStatus) -> Self {
        if from == to {
            Transition::Unchanged
        } else if from.can_transition_to(to) {
            Transition::Advanced { from, to }
        } else {
            Transition::Regressed { from, to }
        }
    }

    pub fn is_change(&self) -> bool {
        !matches!(self, Transition::Unchanged)
    }
}
