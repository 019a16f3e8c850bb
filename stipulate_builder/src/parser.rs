mod base;
mod interface;
mod middleware;
mod printer;

pub(crate) use self::base::*;
pub(crate) use self::interface::*;
pub use self::middleware::{GeneralParser, Matches};
pub(crate) use self::printer::*;
