//! Error types shared by the library and both binaries.

use thiserror::Error;

/// A physics input rejected at the parameter store boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    #[error("{field} must be a finite number (got {value})")]
    NotFinite { field: &'static str, value: f64 },

    #[error("angle must be within [0, 90] degrees (got {0})")]
    AngleOutOfRange(f64),

    #[error("initial speed must be greater than zero (got {0})")]
    NonPositiveSpeed(f64),

    #[error("initial height cannot be negative (got {0})")]
    NegativeHeight(f64),

    #[error("gravity must be within (0, {max}] m/s^2 (got {value})")]
    GravityOutOfRange { value: f64, max: f64 },

    #[error("mass must be greater than zero (got {0})")]
    NonPositiveMass(f64),
}

/// Failure of a narration request. The display string is what the user sees.
#[derive(Debug, Error)]
pub enum NarrationError {
    #[error("No API key configured (set NARRATION_API_KEY or GEMINI_API_KEY)")]
    MissingApiKey,

    #[error("Could not reach the explanation service: {0}")]
    Transport(String),

    #[error("Explanation service returned HTTP {status}")]
    Status { status: u16 },

    #[error("Explanation service sent an unreadable response: {0}")]
    Decode(String),

    #[error("Explanation service returned no text")]
    EmptyResponse,

    #[error("Explanation worker stopped before answering")]
    WorkerGone,
}

impl From<ureq::Error> for NarrationError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(status) => NarrationError::Status { status },
            other => NarrationError::Transport(other.to_string()),
        }
    }
}

/// Failure while exporting a trajectory chart.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("chart rendering failed: {0}")]
    Render(String),

    #[error("could not write chart to {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Param(#[from] ParamError),

    #[error(transparent)]
    Narration(#[from] NarrationError),

    #[error(transparent)]
    Plot(#[from] PlotError),

    #[error("{0}")]
    Usage(String),
}

pub type Result<T> = std::result::Result<T, Error>;
