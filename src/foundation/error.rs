/// Convenience result type used across flex3d.
pub type FlexResult<T> = Result<T, FlexError>;

/// Top-level error taxonomy used by layout APIs.
#[derive(thiserror::Error, Debug)]
pub enum FlexError {
    /// Unknown property names or values of the wrong kind.
    #[error("config error: {0}")]
    Config(String),

    /// Invalid numeric input rejected by the layout solver.
    #[error("solver error: {0}")]
    Solver(String),

    /// Inconsistent layout tree state (unknown boxes, double attach, stale layout).
    #[error("tree error: {0}")]
    Tree(String),

    /// Errors when serializing or deserializing documents.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FlexError {
    /// Build a [`FlexError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`FlexError::Solver`] value.
    pub fn solver(msg: impl Into<String>) -> Self {
        Self::Solver(msg.into())
    }

    /// Build a [`FlexError::Tree`] value.
    pub fn tree(msg: impl Into<String>) -> Self {
        Self::Tree(msg.into())
    }

    /// Build a [`FlexError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for FlexError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
