pub type SlideResult<T> = Result<T, SlideError>;

#[derive(thiserror::Error, Debug)]
pub enum SlideError {
    #[error("config error: {0}")]
    Config(String),

    #[error("asset error: {0}")]
    Asset(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("event source error: {0}")]
    Source(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SlideError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }
}
