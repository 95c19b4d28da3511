//! snowc-runtime — the string machine that generated Rust code links against
//!.
//!
//! Every `.sbl` source file `snowc` translates compiles down to a small Rust
//! module built out of calls into [`SnowString`]. The type carries exactly
//! the state a Snowball routine threads through its execution: the
//! working buffer, a cursor, a limit, and the direction the two move in.
//! Nothing here is specific to any one translated program — the fields a
//! `strings (...)`/`integers (...)`/`booleans (...)` block declares, and the
//! `left`/`right` slice anchors `[`/`]` set, live on the generated program
//! struct itself, not on this type.

mod error;
mod string;

pub use error::{RuntimeError, RuntimeResult};
pub use string::{Direction, SnowString, BACKWARD, FORWARD};
