// ###################################
// ->   ERROR & RESULT
// ###################################
pub type StoreResult<T> = core::result::Result<T, StoreError>;
pub type NotifierResult<T> = core::result::Result<T, NotifierError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("url parsing error: {0}")]
    UrlParsing(String),
    #[error("object store unavailable: {0}")]
    Unavailable(String),

    #[error("reqwest error")]
    Reqwest(#[from] reqwest::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum NotifierError {
    #[error("url parsing error: {0}")]
    UrlParsing(String),
    #[error("notification service unavailable: {0}")]
    Unavailable(String),

    #[error("reqwest error")]
    Reqwest(#[from] reqwest::Error),
}
