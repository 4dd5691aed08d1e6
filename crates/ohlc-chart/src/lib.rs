//! Text-mode OHLC charts.
//!
//! [`render`] turns a validated price series into printable lines:
//! layout, price domain, coordinate mapping, painting (candles or dots),
//! frame and labels, then serialization with or without ANSI colours.

mod bar;
mod canvas;
mod domain;
mod error;
mod frame;
mod interval;
mod layout;
mod mapper;
mod options;
mod painter;

pub mod candle;
pub mod dot;
pub mod format;
pub mod glyphs;

pub use bar::{validate, Bar, Trend};
pub use canvas::{Canvas, Cell, ColorClass, PaintOp};
pub use domain::{raw_range, PriceDomain, EPSILON, PADDING_RATIO};
pub use error::RenderError;
pub use frame::{banner_text, legend_text, serialize, FrameAssembler};
pub use glyphs::GlyphSet;
pub use interval::Interval;
pub use layout::{
    compose, PlotArea, BOTTOM_MARGIN, LEFT_MARGIN, PRICE_LABEL_WIDTH, RIGHT_MARGIN, TOP_MARGIN,
};
pub use mapper::CoordinateMapper;
pub use options::{
    CapabilityProfile, ChartFormat, ChartOptions, CurrencyPair, Dimensions, DotValues,
};
pub use painter::Painter;

/// Paint bars, frame and labels onto a fresh canvas covering the whole frame.
pub fn draw(series: &[Bar], options: &ChartOptions) -> Result<Canvas, RenderError> {
    validate(series)?;
    let area = compose(options.dimensions)?;
    let domain = PriceDomain::from_series(series)?;
    let mapper = CoordinateMapper::new(area, domain);
    let glyphs = GlyphSet::for_profile(options.capabilities);

    tracing::debug!(
        bars = series.len(),
        cols = area.cols,
        rows = area.rows,
        min = domain.min(),
        max = domain.max(),
        format = %options.format,
        "drawing chart"
    );

    let mut canvas = Canvas::new(options.dimensions.height, options.dimensions.width);
    painter::for_format(options.format, options.dot_values, glyphs).paint(
        series,
        &mapper,
        &mut canvas,
    );
    FrameAssembler::new(options, &mapper, glyphs).decorate(&mut canvas, series)?;
    Ok(canvas)
}

/// Render one static frame. Any failure aborts the whole frame.
pub fn render(series: &[Bar], options: &ChartOptions) -> Result<Vec<String>, RenderError> {
    let canvas = draw(series, options)?;
    Ok(serialize(&canvas, options.capabilities.use_color))
}
