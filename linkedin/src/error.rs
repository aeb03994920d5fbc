use thiserror::Error;

#[derive(Debug, Error)]
pub enum LinkedInError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("linkedin api rejected the request ({status}): {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("userinfo response carried no subject id")]
    MissingUserId,

    #[error("post was created but the response carried no URN")]
    MissingPostUrn,

    #[error("image file error: {0}")]
    Image(#[from] std::io::Error),
}
