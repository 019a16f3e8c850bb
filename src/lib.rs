//! `stipulate` is a declarative command line toolkit for Rust, built around *constraints*.
//!
//! A program declares its command line up front: the options, the positional arguments and the sub-commands, each with a typed value and any number of constraints on that value.
//! The declaration is checked as it is built, so a constraint which cannot apply to a value's type (or a default that violates a constraint) is a configuration error rather than a runtime surprise.
//! `stipulate` attempts to prioritize the following design concerns:
//! * *Declared, not coded, validation*:
//! The program should not validate/reject any domain invalid inputs by hand.
//! Constraints such as [`MinValue`], [`MaxLength`] or an [`Enumeration`] of accepted values/ranges express these instead.
//! * *Self documenting*:
//! Every constraint describes itself, so the help message always states precisely what is accepted.
//! * *Argument vs. option paradigm*:
//! Arguments are positional parameters; options are specified via `--..` or `-..` syntax.
//! * *Sub-command paradigm*:
//! A [`Command`] may contain sub-commands which act to collect multiple related programs into a single Cli.
//! * *Pluggable output*:
//! Documentation is written through the [`DocumentWriter`] trait; [`TextWriter`] renders plain text for the terminal.
//!
//! # Usage
//! ```no_run
#![doc = include_str!("../demos/demo_summer.rs")]
//! ```
//!
//! ```console
//! $ summer -h
//! usage: summer [-h] ITEM [...]
//! Sum the items.
//!
//! positional arguments:
//!   ITEM
//!     The items to sum.
//!     - Minimum value: 0.
//!
//! options:
//!   -h, --help
//!     Show this help message and exit.
//!
//! $ summer 1 2 3
//! Sum: 6
//!
//! $ summer
//! Parse error: Not enough tokens provided to parameter 'item'.
//!
//! ^
//!
//! $ summer 1 -2
//! Parse error: value for 'item' was '-2' but it must be at least 0.
//! 1 -2
//!   ^
//!
//! $ summer 1 blah
//! Parse error: value for 'item' was 'blah' but it cannot convert to integer.
//! 1 blah
//!   ^
//! ```
//!
//! # Builder Api
//! Configure `stipulate` by starting with a [`Command`] and `add`ing parameters.
//! There are two classes of parameters: [`Parameter::argument`] and [`Parameter::option`].
//!
//! Every value has a [`ValueType`]: `integer`, `decimal`, `text`, `character` or `boolean`.
//! An argument always has a value; an option only has a value when given an [`OptionArgument`] (otherwise it is a flag).
//!
//! Parameters are configured via chaining:
//! * `constraint`: attach a [`Constraint`](./prelude/trait.Constraint.html), evaluated in the order attached.
//! * `default`: the value to report when the parameter is not given.
//! An argument with a default is optional.
//! * `repeated`: allow an option to occur many times, or an argument to take all the remaining positional tokens.
//! * `alias`/`id`/`description`: alternative option names, the identifier under which values are reported, and the help text.
//!
//! `Command::add` seals the parameter: from this point on it cannot change.
//! Any configuration mistake (on the parameter, or between parameters of the same command) is reported as a [`ConfigError`] right there.
//!
//! ### Sub-commands
//! Add sub-commands via [`Command::command`].
//! The first positional token after the command's own arguments selects the sub-command, and the remaining tokens are parsed against it.
//! A command with sub-commands requires one to be selected.
//!
//! ```no_run
#![doc = include_str!("../demos/demo_sub_command.rs")]
//! ```
//!
//! ### Matches
//! A successful parse produces [`Matches`], keyed by parameter id.
//! Values are already converted and constrained; flags report `Value::Boolean(true)` per occurrence.
//!
//! # Constraints
//! ```console
//! Constraint    | Value types                         | Accepts
//! ----------------------------------------------------------------------------------------
//! MinValue      | orderable, compatible with the bound | bound <= value
//! MaxValue      | orderable, compatible with the bound | value <= bound
//! MinLength     | text                                | at least n characters
//! MaxLength     | text                                | at most n characters
//! ExactLength   | text                                | precisely n characters
//! Enumeration   | any (ranges need orderable values)  | listed values, else included & not excluded ranges
//! ```
//!
//! All bounds are inclusive, and an integer is acceptable wherever a decimal is.
//! An [`Enumeration`] resolves overlaps by precedence: an explicitly listed value is always accepted, then excluded ranges reject, then included ranges accept.
//!
//! Custom constraints implement the [`Constraint`](./prelude/trait.Constraint.html) trait.
//!
//! # Token Grammar
//! ```console
//! Syntax          | Meaning
//! -----------------------------------------------------------------
//! --NAME          | option (by primary or alternative name)
//! --NAME=VALUE    | option with its value
//! -S              | short option
//! -S=VALUE        | short option with its value
//! -ABC            | short flags combined; only the last may take a value
//! --              | every subsequent token is positional
//! -, -1, -2.5     | positional
//! ```
//!
//! An option with a value always takes the next token as its value, whatever it looks like.
//! For example, `-abc=123` is equivalent to `--apple --banana --carrot=123`.
//!
//! # Features
//! * `unit_test`: exposes [`MemoryWriter`](./struct.MemoryWriter.html), for unit testing documentation.
//! * `tracing_debug`: debug logging (via `tracing`) of the sealing, parsing and documenting decisions.
pub use stipulate_builder::*;
