//! Generation context threaded through every codegen function.
//!
//! The reference `Environment` tracks the current direction, three separate
//! output buffers (module/class/init code), and a `debug` flag. This struct
//! carries the same four things, plus the live [`Session`] so templates can
//! mint fresh variables and among-table indices as they render.

use snowc_sess::Session;

pub const FORWARD: i8 = 1;
pub const BACKWARD: i8 = -1;

/// Mutable state threaded through codegen. One `Env` lives for the whole
/// translation; `direction` is saved/restored around `backwards (...)`
/// blocks, restored once the block's body has been lowered.
pub struct Env {
    session: Session,
    direction: i8,
    pub debug: bool,
    /// Module-level items emitted outside the `Program` impl: grouping
    /// char-set constants and the among-table statics.
    pub module_code: String,
    /// Routine method bodies, assembled into `impl Program`.
    pub class_code: String,
}

impl Env {
    pub fn new(session: Session, debug: bool) -> Self {
        Env {
            session,
            direction: FORWARD,
            debug,
            module_code: String::new(),
            class_code: String::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn into_session(self) -> Session {
        self.session
    }

    pub fn direction(&self) -> i8 {
        self.direction
    }

    pub fn is_forward(&self) -> bool {
        self.direction == FORWARD
    }

    pub fn fresh_var(&mut self) -> String {
        self.session.fresh_var()
    }

    /// Run `f` with direction flipped, then restore — mirrors the reference
    /// compiler's `self.forward = not self.forward` save/restore pairing
    /// around a `backwards (...)` block's child generation.
    pub fn with_flipped_direction<T>(&mut self, f: impl FnOnce(&mut Env) -> T) -> T {
        self.direction = -self.direction;
        let result = f(self);
        self.direction = -self.direction;
        result
    }
}
