use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for discmap.
#[derive(Debug, Error)]
pub enum DiscmapError {
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Mapfile(#[from] MapfileError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while inverting a monotonic function.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("function is not {expected} between t = {from} and t = {to} ({from_value} -> {to_value})")]
    PreconditionViolation {
        expected: &'static str,
        from: f64,
        to: f64,
        from_value: f64,
        to_value: f64,
    },

    #[error("search tolerance must be finite and positive, got {0}")]
    InvalidTolerance(f64),

    #[error("search needs a finite guess and target, got guess {guess} and target {want}")]
    NonFiniteInput { guess: f64, want: f64 },

    #[error("no bracket found for target {want} from guess {guess} after {steps} doublings")]
    BracketNotFound { guess: f64, want: f64, steps: u32 },

    #[error("bisection stalled in [{low}, {high}] with residual {residual} (tolerance {epsilon})")]
    NotConverged {
        low: f64,
        high: f64,
        residual: f64,
        epsilon: f64,
    },
}

/// Errors related to curve evaluation and sampling.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("curve speed is {speed} at t = {t}, cannot step by arc length")]
    DegenerateSampling { t: f64, speed: f64 },

    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors related to path descriptor emission.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("a smooth path needs at least 3 points, got {0}")]
    MalformedPathInput(usize),
}

/// Errors related to reading ddrescue mapfiles.
#[derive(Debug, Error)]
pub enum MapfileError {
    #[error("line {line_number}: unrecognized mapfile line {line:?}")]
    UnrecognizedLogLine { line_number: usize, line: String },

    #[error("mapfile has no status line")]
    MissingStatusLine,

    #[error("interval start {start} is past its end {end}")]
    InvalidInterval { start: u64, end: u64 },

    #[error("failed to read mapfile {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors related to configuration and the disk catalog.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unknown disk profile {0:?}")]
    UnknownProfile(String),

    #[error("invalid disk profile {name:?}: {reason}")]
    InvalidProfile { name: String, reason: String },
}

/// Convenience type alias for results using [`DiscmapError`].
pub type Result<T> = std::result::Result<T, DiscmapError>;
