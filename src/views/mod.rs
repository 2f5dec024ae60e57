//! View state controllers, one per screen.
//!
//! Each controller owns its state and splits every backend call into a
//! `begin_*` half that issues a [`RequestToken`] and a `finish_*` half that
//! applies the result only while that token is still live. The async drivers
//! (`mount`, `apply_filters`, `delete`, `submit`) glue both halves around one
//! [`crate::api::LeadApi`] call.

use crate::routes::Route;

pub mod create;
pub mod detail;
pub mod list;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

/// Confirmation prompt shown before deleting a lead.
pub const DELETE_PROMPT: &str = "Delete this lead?";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Identifies one dispatched request of a controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Liveness bookkeeping for the requests of one controller instance.
///
/// Issuing a token supersedes every older one; `teardown` kills them all.
#[derive(Debug, Default)]
pub struct RequestTracker {
    generation: u64,
    torn_down: bool,
}

impl RequestTracker {
    pub fn issue(&mut self) -> RequestToken {
        self.generation += 1;
        RequestToken(self.generation)
    }

    pub fn is_live(&self, token: RequestToken) -> bool {
        !self.torn_down && token.0 == self.generation
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn teardown(&mut self) {
        self.torn_down = true;
    }
}

/// Lets a controller ask the navigation shell to switch screens.
pub trait Navigator {
    fn navigate(&self, route: Route);
}

/// Explicit yes/no gate in front of destructive actions.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}
