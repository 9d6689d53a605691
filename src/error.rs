use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No view with id `{0}` in the layout")]
    MissingView(String),

    #[error("View `{0}` is not attached to a container")]
    NotAContainer(String),

    #[error("Event loop error: {0}")]
    EventLoop(#[from] calloop::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
