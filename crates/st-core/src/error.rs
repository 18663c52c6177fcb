use thiserror::Error;

pub type StResult<T> = Result<T, StError>;

#[derive(Error, Debug)]
pub enum StError {
    #[error("Invalid measurement: {what}")]
    InvalidMeasurement { what: &'static str },

    #[error("Negative {which} error magnitude: {value}")]
    NegativeError { which: &'static str, value: f64 },

    #[error("Format must be specified for values that have no error")]
    MissingFormat,

    #[error("Format '{fmt}' not understood")]
    UnsupportedFormat { fmt: String },
}
