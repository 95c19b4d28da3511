//! snowc-util — Core Utilities and Foundation Types
//!
//! Fundamental types shared by every stage of the Snowball-to-Rust compiler:
//! an interned `Symbol`, a typed `IndexVec`, and the small diagnostic
//! vocabulary (`Span`, `Diagnostic`, `Level`) that the parser and generator
//! use to report errors.
//!
//! # String interning
//!
//! `Symbol` is a 4-byte handle into a global string table. All occurrences
//! of the same text intern to the same `Symbol`, so comparison is an
//! integer comparison rather than a byte-by-byte one. Interning is
//! leak-on-intern: interned strings live for the process's lifetime, which
//! is acceptable because total unique identifier count in one translation
//! is bounded and small.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};
use std::sync::{Mutex, OnceLock};

pub mod error;
pub use error::{DiagnosticError, DiagnosticResult, SymbolError, SymbolResult};
pub use rustc_hash::{FxHashMap, FxHashSet};

/// An interned string identifier.
///
/// `Symbol` is `Copy`, 4 bytes, and compares in O(1). Use [`Symbol::intern`]
/// to obtain one and [`Symbol::as_str`] to recover the text.
///
/// ```
/// use snowc_util::Symbol;
///
/// let a = Symbol::intern("cursor");
/// let b = Symbol::intern("cursor");
/// let c = Symbol::intern("limit");
///
/// assert_eq!(a, b);
/// assert_ne!(a, c);
/// assert_eq!(a.as_str(), "cursor");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol {
    index: u32,
}

fn table() -> &'static Mutex<StringTable> {
    static TABLE: OnceLock<Mutex<StringTable>> = OnceLock::new();
    TABLE.get_or_init(|| Mutex::new(StringTable::new()))
}

impl Symbol {
    pub const MAX_INDEX: u32 = u32::MAX;

    /// Intern `string`, returning its symbol. Thread-safe.
    pub fn intern(string: &str) -> Self {
        table().lock().unwrap().intern(string)
    }

    /// Recover the interned text.
    ///
    /// # Panics
    ///
    /// Panics if `self` was built with [`Symbol::from_u32_unchecked`] and
    /// the index has no entry in the table.
    pub fn as_str(&self) -> &'static str {
        table()
            .lock()
            .unwrap()
            .get(*self)
            .expect("Symbol index has no entry in the string table")
    }

    pub fn as_u32(&self) -> u32 {
        self.index
    }

    /// Build a `Symbol` from a raw index without checking the table.
    ///
    /// # Safety
    ///
    /// The caller must ensure `index` names a slot already populated by a
    /// prior call to [`Symbol::intern`], or `as_str` will panic.
    pub unsafe fn from_u32_unchecked(index: u32) -> Self {
        Self { index }
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({:?})", self.as_str())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Backing store for [`Symbol`]. One process-wide instance behind a mutex;
/// strings are leaked to get `'static` text out of `as_str`.
struct StringTable {
    index: FxHashMap<u64, Vec<u32>>,
    strings: Vec<&'static str>,
}

impl StringTable {
    fn new() -> Self {
        Self {
            index: FxHashMap::default(),
            strings: Vec::new(),
        }
    }

    fn intern(&mut self, string: &str) -> Symbol {
        let hash = Self::hash_string(string);

        if let Some(candidates) = self.index.get(&hash) {
            for &idx in candidates {
                if self.strings[idx as usize] == string {
                    return Symbol { index: idx };
                }
            }
        }

        let interned: &'static str = Box::leak(string.to_string().into_boxed_str());
        let index = self.strings.len() as u32;
        self.strings.push(interned);
        self.index.entry(hash).or_default().push(index);

        Symbol { index }
    }

    fn get(&self, symbol: Symbol) -> Option<&'static str> {
        self.strings.get(symbol.index as usize).copied()
    }

    fn hash_string(string: &str) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        let mut hasher = DefaultHasher::new();
        string.hash(&mut hasher);
        hasher.finish()
    }
}

/// A `Vec<T>` indexed only by a specific newtype, so indices from different
/// spaces (e.g. an among-table index vs. a fresh-variable counter) cannot be
/// mixed up by accident.
///
/// ```
/// use snowc_util::{define_idx, IndexVec};
///
/// define_idx!(ArmId);
///
/// let mut arms: IndexVec<ArmId, &str> = IndexVec::new();
/// let id = arms.push("foo");
/// assert_eq!(arms[id], "foo");
/// ```
#[derive(Clone)]
pub struct IndexVec<I, T> {
    raw: Vec<T>,
    _marker: PhantomData<fn(&I)>,
}

impl<I, T> IndexVec<I, T> {
    pub fn new() -> Self {
        Self {
            raw: Vec::new(),
            _marker: PhantomData,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            raw: Vec::with_capacity(capacity),
            _marker: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.raw.iter()
    }
}

impl<I: Idx, T> IndexVec<I, T> {
    pub fn push(&mut self, value: T) -> I {
        let index = self.raw.len();
        self.raw.push(value);
        I::from_usize(index)
    }

    pub fn get(&self, index: I) -> Option<&T> {
        self.raw.get(index.index())
    }

    pub fn get_mut(&mut self, index: I) -> Option<&mut T> {
        self.raw.get_mut(index.index())
    }

    pub fn iter_enumerated(&self) -> impl Iterator<Item = (I, &T)> {
        self.raw
            .iter()
            .enumerate()
            .map(|(i, v)| (I::from_usize(i), v))
    }

    pub fn indices(&self) -> impl Iterator<Item = I> {
        (0..self.raw.len()).map(I::from_usize)
    }
}

impl<I: Idx, T> Index<I> for IndexVec<I, T> {
    type Output = T;

    fn index(&self, index: I) -> &T {
        &self.raw[index.index()]
    }
}

impl<I: Idx, T> IndexMut<I> for IndexVec<I, T> {
    fn index_mut(&mut self, index: I) -> &mut T {
        &mut self.raw[index.index()]
    }
}

impl<I, T> Default for IndexVec<I, T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Types usable as an [`IndexVec`] index.
pub trait Idx: Copy + Eq + PartialEq {
    fn from_usize(idx: usize) -> Self;
    fn index(self) -> usize;
}

/// Defines a newtype wrapping `u32` that implements [`Idx`].
#[macro_export]
macro_rules! define_idx {
    ($name:ident) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub u32);

        impl $crate::Idx for $name {
            fn from_usize(idx: usize) -> Self {
                assert!(idx <= u32::MAX as usize);
                $name(idx as u32)
            }

            fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

/// A diagnostic ready to be reported to the user.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }
}

/// Severity of a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Error,
    Warning,
    Note,
    Help,
}

/// Source span; the compiler reports errors by lexer/parser position rather
/// than a richer span model, so this is kept intentionally minimal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub line: u32,
    pub column: u32,
}

impl Span {
    pub const DUMMY: Span = Span { line: 0, column: 0 };

    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_roundtrips() {
        let sym = Symbol::intern("a_fairly_unique_test_identifier_42");
        assert_eq!(sym.as_str(), "a_fairly_unique_test_identifier_42");
    }

    #[test]
    fn intern_dedupes() {
        let a = Symbol::intern("dedupe_me");
        let b = Symbol::intern("dedupe_me");
        assert_eq!(a, b);
        assert_eq!(a.as_u32(), b.as_u32());
    }

    #[test]
    fn intern_distinguishes() {
        let a = Symbol::intern("distinct_one");
        let b = Symbol::intern("distinct_two");
        assert_ne!(a, b);
    }

    define_idx!(TestId);

    #[test]
    fn index_vec_push_and_index() {
        let mut v: IndexVec<TestId, &str> = IndexVec::new();
        let a = v.push("first");
        let b = v.push("second");
        assert_eq!(v[a], "first");
        assert_eq!(v[b], "second");
        assert_eq!(v.len(), 2);
    }

    #[test]
    fn index_vec_enumerated() {
        let mut v: IndexVec<TestId, i32> = IndexVec::new();
        v.push(10);
        v.push(20);
        let collected: Vec<_> = v.iter_enumerated().map(|(i, x)| (i.index(), *x)).collect();
        assert_eq!(collected, vec![(0, 10), (1, 20)]);
    }

    #[test]
    fn span_display() {
        let s = Span::new(3, 7);
        assert_eq!(s.to_string(), "3:7");
    }

    #[quickcheck_macros::quickcheck]
    fn intern_roundtrips_any_nonempty_ascii_alphanumeric(suffix: String) -> quickcheck::TestResult {
        if suffix.is_empty() || !suffix.chars().all(|c| c.is_ascii_alphanumeric()) {
            return quickcheck::TestResult::discard();
        }
        // prefixed so this property's inputs never collide with the fixed
        // literals the tests above intern into the same process-wide table
        let text = format!("qc_intern_{suffix}");
        let a = Symbol::intern(&text);
        let b = Symbol::intern(&text);
        quickcheck::TestResult::from_bool(a == b && a.as_str() == text)
    }
}
