pub mod klines;

pub use klines::fetch_bars;
