use thiserror::Error;

/// Infrastructure failures surfaced by the event loop. The widget itself has
/// no domain errors: blank input is silently discarded upstream.
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("terminal i/o failure: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("input event channel closed")]
    ChannelClosed,
}

pub type WidgetResult<T> = Result<T, WidgetError>;
