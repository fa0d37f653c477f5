/// Failures of an activity source. The engine never sees these; callers
/// fall back to an empty grid.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Error! Status: {status}. Message: {message}")]
    Api { status: u16, message: String },

    #[error("statistics for {target} are still being computed, try again shortly")]
    Pending { target: String },

    #[error("could not decode activity data: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("could not read activity file: {0}")]
    Io(#[from] std::io::Error),
}
