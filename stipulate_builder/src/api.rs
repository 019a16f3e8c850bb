mod command;
mod element;
mod parameter;

pub use command::*;
pub use element::*;
pub use parameter::{OptionArgument, Parameter};
