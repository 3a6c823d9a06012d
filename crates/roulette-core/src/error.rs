use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid notch interval: {0} (must be finite and > 0)")]
    InvalidInterval(f64),

    #[error("Invalid motion: scroll {scroll}, velocity {velocity} (must be finite)")]
    InvalidMotion { scroll: f64, velocity: f64 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
