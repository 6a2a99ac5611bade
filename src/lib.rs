pub mod config;
pub mod error;
pub mod fetch;
pub mod model;
pub mod proxy;
pub mod ui;
pub mod utils;
pub mod view;

pub use error::{AppError, Result};
