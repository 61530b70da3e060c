/// Convenience result type used across tilecomp.
pub type TilecompResult<T> = Result<T, TilecompError>;

/// Top-level error taxonomy.
#[derive(thiserror::Error, Debug)]
pub enum TilecompError {
    /// Invalid configuration values.
    #[error("validation error: {0}")]
    Validation(String),

    /// Misuse of the pixel-blend primitives (mismatched buffer shapes).
    #[error("composite error: {0}")]
    Composite(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TilecompError {
    /// Build a [`TilecompError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TilecompError::Composite`] value.
    pub fn composite(msg: impl Into<String>) -> Self {
        Self::Composite(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            TilecompError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            TilecompError::composite("x")
                .to_string()
                .contains("composite error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = TilecompError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
