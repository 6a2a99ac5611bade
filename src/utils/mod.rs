pub mod fmt;

pub use fmt::{format_percent, format_usd_price};
