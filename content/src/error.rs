use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model returned an empty response")]
    EmptyResponse,

    #[error("image file error: {0}")]
    Io(#[from] std::io::Error),
}
