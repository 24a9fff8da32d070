//! Error types emitted by the tourkit facade.
//!
//! Keep these small: most facade calls return `Result<_, EngineError>` and
//! the workspace enables `clippy::result_large_err`.

use std::io;

use camino::Utf8PathBuf;
use thiserror::Error;
use tourkit_core::SolveError;
use tourkit_core::tsplib::ParseError;
use tourkit_heuristics::ConfigError;

/// Errors returned by [`Engine`](crate::Engine).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// The algorithm name is not one the engine knows.
    #[error("unsupported algorithm `{0}`")]
    UnsupportedAlgorithm(String),
    /// A rate, method name, count, start city or supplied tour is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    /// The exact solver's backend failed or returned an invalid tour.
    #[error("exact solver failed: {0}")]
    Solve(#[from] SolveError),
    /// The requested algorithm requires a missing compile-time feature.
    #[error("{action} requires the `{feature}` feature to be enabled")]
    MissingFeature {
        /// Cargo feature that provides the algorithm.
        feature: &'static str,
        /// Algorithm that was requested.
        action: &'static str,
    },
}

/// Errors returned when reading or writing instance files.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The path does not name an existing regular file.
    #[error("instance path {path:?} does not exist or is not a file")]
    NotAFile {
        /// Path that was requested.
        path: Utf8PathBuf,
    },
    /// The file could not be read.
    #[error("failed to read instance {path:?}: {source}")]
    Read {
        /// Path that was requested.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The file is not a loadable TSPLIB instance.
    #[error("failed to parse instance {path:?}: {source}")]
    Parse {
        /// Path that was requested.
        path: Utf8PathBuf,
        /// Where and why parsing stopped.
        #[source]
        source: ParseError,
    },
    /// The instance could not be written.
    #[error("failed to write instance {path:?}: {source}")]
    Write {
        /// Destination path.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}
