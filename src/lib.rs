#![doc = include_str!("../README.md")]
pub mod config;
pub mod error;
pub mod grid;
pub mod logger;
pub mod spiral;
pub mod trace;
pub mod util;
pub mod walker;
