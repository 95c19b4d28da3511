use thiserror::Error;

/// Errors a generated program's routines can raise against the string
/// machine. These are invariant violations in the generated code itself
/// (a `[`/`]`-bracketed command run before its anchor was set) rather than
/// anything a well-formed `.sbl` source file can trigger through normal
/// control flow — `snowc-gen` never emits a `<-`/`->`/`delete` call that
/// isn't preceded by the matching `SetLeft`/`SetRight` on every path, but the
/// check still has to live somewhere, and panicking inside a library a
/// translated program links against would be unfriendly.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("slice anchor '{which}' was read before being set by `[` or `]`")]
    SliceAnchorUnset { which: &'static str },
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;
