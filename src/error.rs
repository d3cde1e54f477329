use crate::{backend, config, web};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error")]
    Config(#[from] config::ConfigError),
    #[error("web error")]
    Web(#[from] web::Error),
    #[error("object store error")]
    Store(#[from] backend::StoreError),
    #[error("notification service error")]
    Notifier(#[from] backend::NotifierError),

    #[error("io error")]
    Io(#[from] std::io::Error),
}

/// Joins an error with all of its sources, outermost first: `outer: inner: root`.
pub fn error_chain(er: &dyn std::error::Error) -> String {
    let mut chain = er.to_string();
    let mut source = er.source();
    while let Some(cause) = source {
        chain.push_str(": ");
        chain.push_str(&cause.to_string());
        source = cause.source();
    }
    chain
}
