/// Core error type for the bot.
///
/// Adapter crates should map their specific errors into this type. None of
/// these ever reach the webhook response: the handler always acknowledges.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("external error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;
