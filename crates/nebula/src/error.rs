//! # Host Error Types
//!
//! Failures while starting a universe. Once a session runs, nothing fails.

use nebula_shared::ConfigError;
use thiserror::Error;

/// Errors that can occur while starting a session.
#[derive(Error, Debug)]
pub enum NebulaError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No seed was given and the OS provided no entropy.
    #[error("no entropy available to pick a seed: {0}")]
    Entropy(#[from] getrandom::Error),
}

/// Result type for host operations.
pub type NebulaResult<T> = Result<T, NebulaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_convert_with_question_mark() {
        fn entropy() -> NebulaResult<()> {
            Err::<(), _>(getrandom::Error::UNSUPPORTED)?;
            Ok(())
        }
        fn config() -> NebulaResult<()> {
            Err::<(), _>(ConfigError::Invalid("empty palette".into()))?;
            Ok(())
        }

        let error = entropy().unwrap_err();
        assert!(matches!(error, NebulaError::Entropy(_)));
        assert!(error.to_string().starts_with("no entropy available"));
        assert!(matches!(config().unwrap_err(), NebulaError::Config(ConfigError::Invalid(_))));
    }
}
