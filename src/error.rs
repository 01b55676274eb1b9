use arrow::error::ArrowError;
use parquet::errors::ParquetError;
use thiserror::Error;

/// Errors produced while loading the dataset or computing figures.
#[derive(Debug, Error)]
pub enum Error {
    #[error("dataset is missing required column `{0}`")]
    MissingColumn(String),

    #[error("no rows matched: {0}")]
    EmptyFilterResult(String),

    #[error("zero denominator while computing {0}")]
    ZeroDenominator(&'static str),

    #[error("`{0}` is not a valid click target")]
    InvalidClickTarget(String),

    #[error("unsupported dataset format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to parse config: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Arrow(#[from] ArrowError),

    #[error(transparent)]
    Parquet(#[from] ParquetError),
}
