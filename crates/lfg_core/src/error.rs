use thiserror::Error;

use crate::params::ParameterSet;

/// Log target used for every warning the engine reports.
pub const LOG_TARGET: &str = "lfg";

/// Failure to rebuild a stream from a packed word image.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("no parameter set packs a stream into {0} words")]
    UnrecognizedSize(usize),
    #[error("parameter set {params} expects {expected} words, got {actual}")]
    SizeMismatch {
        params: ParameterSet,
        expected: usize,
        actual: usize,
    },
    #[error("history index {hidx} is outside the register of length {len}")]
    HistoryIndexOutOfRange { hidx: u32, len: usize },
    #[error("unknown parameter set {0:?}")]
    UnknownParameterSet(String),
}

/// Conditions that weaken the independence guarantees without stopping the
/// computation. They are logged, never raised.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Warning {
    #[error(
        "generator index {index} exceeds the maximum number of independent streams ({max}); \
         independence of streams cannot be guaranteed"
    )]
    TooManyStreams { index: u32, max: u32 },
    #[error(
        "generator has branched maximum number of times; \
         independence of generators no longer guaranteed"
    )]
    TooManyBranches,
    #[error(
        "changing global seed value from {previous} to {requested}; \
         independence of streams is not guaranteed"
    )]
    SeedChanged { previous: u32, requested: u32 },
}

impl Warning {
    pub fn code(&self) -> &'static str {
        match self {
            Warning::TooManyStreams { .. } => "too_many_streams",
            Warning::TooManyBranches => "too_many_branches",
            Warning::SeedChanged { .. } => "seed_changed",
        }
    }
}

/// Emit a non-fatal warning on the engine's log target.
pub fn report(warning: &Warning) {
    tracing::warn!(target: LOG_TARGET, code = warning.code(), "{}", warning);
}
