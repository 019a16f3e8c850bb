//! Traits which, typically, may be imported without concern: `use stipulate::prelude::*`.

// Needs to be imported in order to implement a custom `Constraint`, or to call its methods directly.
pub use crate::constraint::Constraint;
// Needs to be imported in order to implement a custom `DocumentWriter`, or to drive one directly.
pub use crate::document::DocumentWriter;
