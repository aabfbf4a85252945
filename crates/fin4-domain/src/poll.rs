use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const DUE_DATE_FORMAT: &str = "%-d.%-m.%Y, %H:%M:%S";

/// Voting period of a PLCR poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PollPeriod {
    CommitPeriod,
    RevealPeriod,
    Closed,
}

impl PollPeriod {
    pub fn label(&self) -> &'static str {
        match self {
            PollPeriod::CommitPeriod => "Commit Vote",
            PollPeriod::RevealPeriod => "Reveal",
            PollPeriod::Closed => "-",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PollPeriod::Closed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollStatus {
    pub period: PollPeriod,
    /// Upcoming period boundary, empty once the poll is closed.
    pub due_date: String,
}

/// Places `now` relative to the commit and reveal deadlines of a poll.
pub fn poll_status(
    commit_end: DateTime<Utc>,
    reveal_end: DateTime<Utc>,
    now: DateTime<Utc>,
) -> PollStatus {
    if now < commit_end {
        return PollStatus {
            period: PollPeriod::CommitPeriod,
            due_date: commit_end.format(DUE_DATE_FORMAT).to_string(),
        };
    }

    if now < reveal_end {
        return PollStatus {
            period: PollPeriod::RevealPeriod,
            due_date: reveal_end.format(DUE_DATE_FORMAT).to_string(),
        };
    }

    PollStatus {
        period: PollPeriod::Closed,
        due_date: String::new(),
    }
}
