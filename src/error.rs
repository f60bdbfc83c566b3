use thiserror::Error;

pub type Result<T> = std::result::Result<T, FigureError>;

#[derive(Debug, Error)]
pub enum FigureError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid CSV header: {0}")]
    CsvHeader(String),

    #[error("Invalid CSV row {row}: expected at least {expected} columns, got {got}")]
    CsvRow {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("Invalid value in column '{column}' at row {row}: {value}")]
    FloatField {
        row: usize,
        column: String,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("Invalid count in column '{column}' at row {row}: {value}")]
    IntField {
        row: usize,
        column: String,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("GeoJSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid basemap: {0}")]
    Basemap(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Render error: {0}")]
    Render(String),
}
