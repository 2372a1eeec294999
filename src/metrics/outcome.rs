use std::error::Error;
use std::fmt;
use std::time::Duration;

use crate::error::RedirectBlocked;

/// A successfully classified response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseSample {
    pub bytes: u64,
    pub elapsed: Duration,
}

/// Why a request did not count as a success.
///
/// Transport-level variants carry the innermost error message so repeated
/// failures with the same root collapse into one breakdown entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FailureCause {
    Connect(String),
    Timeout,
    Transport(String),
    BodyRead(String),
    Status(u16),
    RedirectBlocked,
    EmptyResponse,
}

/// Outcome of one request as seen by the stats recorder.
pub type RequestOutcome = Result<ResponseSample, FailureCause>;

impl FailureCause {
    /// Classifies an error raised while building or sending a request.
    #[must_use]
    pub fn from_request_error(err: &reqwest::Error) -> Self {
        if is_redirect_blocked(err) {
            return Self::RedirectBlocked;
        }
        if err.is_timeout() {
            return Self::Timeout;
        }
        let root = root_cause(err);
        if err.is_connect() {
            Self::Connect(root)
        } else {
            Self::Transport(root)
        }
    }

    /// Classifies an error raised while draining a response body.
    #[must_use]
    pub fn from_body_error(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::Timeout;
        }
        Self::BodyRead(root_cause(err))
    }
}

impl fmt::Display for FailureCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connect(root) => write!(f, "connect: {root}"),
            Self::Timeout => f.write_str("request timed out"),
            Self::Transport(root) => write!(f, "transport: {root}"),
            Self::BodyRead(root) => write!(f, "body read: {root}"),
            Self::Status(code) => write!(f, "received status code {code}"),
            Self::RedirectBlocked => f.write_str("redirect blocked"),
            Self::EmptyResponse => f.write_str("empty response"),
        }
    }
}

pub(super) fn is_redirect_blocked(err: &(dyn Error + 'static)) -> bool {
    let mut current = err;
    loop {
        if current.is::<RedirectBlocked>() {
            return true;
        }
        match current.source() {
            Some(next) => current = next,
            None => return false,
        }
    }
}

fn root_cause(err: &(dyn Error + 'static)) -> String {
    let mut current = err;
    while let Some(next) = current.source() {
        current = next;
    }
    current.to_string()
}
