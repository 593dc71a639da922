use thiserror::Error;

use crate::adapter::HostError;

/// Reasons a validation pass aborts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Host(#[from] HostError),

    #[error("field is not inside a form")]
    NoEnclosingForm,
}

pub type EngineResult<T> = Result<T, EngineError>;
