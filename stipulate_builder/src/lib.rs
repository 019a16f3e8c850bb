//! Builder module for `stipulate`.
//! See [documentation root](https://docs.rs/stipulate/latest/stipulate/index.html) for full details.
#![deny(missing_docs)]
mod api;
mod constant;
mod constraint;
mod description;
mod document;
mod error;
mod matcher;
mod model;
mod parser;
#[allow(missing_docs)]
pub mod prelude;

pub use api::*;
pub use constraint::*;
pub use description::*;
#[cfg(any(test, feature = "unit_test"))]
pub use document::MemoryWriter;
pub use document::{DocumentWriter, TextWriter};
pub use error::*;
pub use model::*;
pub use parser::{GeneralParser, Matches};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
