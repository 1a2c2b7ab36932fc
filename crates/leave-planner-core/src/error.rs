use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    #[error("unknown report mode: {0}. Expected: calendar, compensation")]
    UnknownMode(String),

    #[error("unknown export format: {0}. Expected: txt, json, csv, brief")]
    UnknownFormat(String),

    #[error("unknown locale: {0}. Expected: pt-br, en")]
    UnknownLocale(String),
}
