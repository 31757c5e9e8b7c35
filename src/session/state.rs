//! Tooltip state of a session.

use super::event::HoverPoint;
use crate::hover::TooltipPayload;

/// Where the session is in the hover cycle.
///
/// ```text
/// Idle ──hover(id)──▶ Resolving ──result──▶ Showing
///  ▲                     │  ▲                  │
///  └──────leave──────────┘  └────hover(id')────┘
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum HoverState {
    /// No tooltip and nothing in flight
    #[default]
    Idle,
    /// Waiting for the result of `request`
    Resolving { request: u64, hover: HoverPoint },
    /// Tooltip for `hover` is visible
    Showing {
        request: u64,
        hover: HoverPoint,
        payload: TooltipPayload,
    },
}

impl HoverState {
    /// The point being resolved or shown.
    pub fn point_id(&self) -> Option<usize> {
        match self {
            HoverState::Idle => None,
            HoverState::Resolving { hover, .. } | HoverState::Showing { hover, .. } => {
                Some(hover.id)
            }
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, HoverState::Idle)
    }

    pub fn is_resolving(&self) -> bool {
        matches!(self, HoverState::Resolving { .. })
    }

    /// The visible tooltip payload.
    pub fn payload(&self) -> Option<&TooltipPayload> {
        match self {
            HoverState::Showing { payload, .. } => Some(payload),
            _ => None,
        }
    }
}
