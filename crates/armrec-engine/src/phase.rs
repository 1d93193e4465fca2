//! Invocation phase tracking.
//!
//! Phases move strictly forward; a failure from any non-terminal phase ends
//! the invocation with no rollback. The current phase is recorded on the
//! invocation's tracing span and in failure logs.

/// Lifecycle of one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Init,
    Bound,
    Observed,
    Planned,
    Applied,
    Reported,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Bound => "bound",
            Self::Observed => "observed",
            Self::Planned => "planned",
            Self::Applied => "applied",
            Self::Reported => "reported",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
