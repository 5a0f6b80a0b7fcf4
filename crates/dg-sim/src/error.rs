use dg_core::{ConfigError, StationId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{what} length {got} does not match station count {expected}")]
    StationCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("broadcast source {0} is not a mobile station")]
    UnknownSource(StationId),
}

pub type SimResult<T> = Result<T, SimError>;
