use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    /// The price series is empty or one of its bars is malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The requested frame cannot hold the fixed margins plus a 1x1 plot.
    #[error(
        "terminal too small: {width}x{height} leaves no room for the chart \
         (need at least {min_width}x{min_height}); use a larger terminal or pass --width/--height"
    )]
    LayoutTooSmall {
        width: usize,
        height: usize,
        min_width: usize,
        min_height: usize,
    },

    /// The frame has more cells than can be addressed in memory.
    #[error("frame too large: {width}x{height} cells cannot be allocated")]
    LayoutTooLarge { width: usize, height: usize },

    #[error("unsupported {kind}: {value:?}")]
    UnsupportedSelector { kind: &'static str, value: String },

    #[error("failed to format timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
}
