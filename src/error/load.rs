use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Worker count must be >= 1.")]
    NoWorkers,
    #[error("Results channel closed after {received} of {expected} sessions reported.")]
    ResultsChannelClosed { expected: usize, received: usize },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
