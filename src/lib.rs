pub mod algorithm;
pub mod cell;
pub mod common;
pub mod config;
pub mod error;
mod frontier;
pub mod map;
pub mod raster;
pub mod stat;

pub use error::{Error, Result};
