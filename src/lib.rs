#![deny(rust_2018_idioms)]
#![deny(clippy::all)]

pub mod config;
pub mod diagnostics;
pub mod extract;
pub mod kind;
pub mod notebook;
pub mod render;

pub mod error {
    pub use anyhow::{Error, Result};
}
