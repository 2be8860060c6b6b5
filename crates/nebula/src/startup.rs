//! Picking the configuration and the universe seed.

use std::fmt;
use std::path::Path;

use nebula_procedural::Seed;
use nebula_shared::NebulaConfig;
use tracing::info;

use crate::error::NebulaResult;

/// Where the universe seed came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedOrigin {
    /// Given as an integer by the caller.
    Explicit,
    /// Typed as seed text.
    Phrase,
    /// Read from `[universe] seed`.
    Config,
    /// Drawn from OS entropy.
    Random,
}

impl fmt::Display for SeedOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Explicit => "explicit",
            Self::Phrase => "phrase",
            Self::Config => "config",
            Self::Random => "random",
        };
        f.write_str(name)
    }
}

/// Loads `path`, or the defaults when no path is given.
///
/// # Errors
///
/// Returns [`crate::NebulaError::Config`] if the file cannot be read,
/// parsed or validated.
pub fn load_config(path: Option<&Path>) -> NebulaResult<NebulaConfig> {
    match path {
        Some(path) => {
            let config = NebulaConfig::load(path)?;
            info!(path = %path.display(), "configuration loaded");
            Ok(config)
        }
        None => Ok(NebulaConfig::default()),
    }
}

/// Resolves the universe seed.
///
/// Precedence: explicit integer, then non-blank phrase, then the configured
/// seed, then a random one.
///
/// # Errors
///
/// Returns [`crate::NebulaError::Entropy`] only when a random seed is
/// needed and the OS cannot supply one.
pub fn resolve_seed(
    explicit: Option<i64>,
    phrase: Option<&str>,
    config: &NebulaConfig,
) -> NebulaResult<(Seed, SeedOrigin)> {
    if let Some(value) = explicit {
        return Ok((Seed::from_signed(value), SeedOrigin::Explicit));
    }
    if let Some(seed) = phrase.and_then(Seed::from_phrase) {
        return Ok((seed, SeedOrigin::Phrase));
    }
    if let Some(value) = config.universe.seed {
        return Ok((Seed::from_signed(value), SeedOrigin::Config));
    }
    Ok((Seed::random()?, SeedOrigin::Random))
}
