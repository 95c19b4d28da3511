//! snowc-sess — parse-time session state.
//!
//! The Snowball grammar has terminals whose recognized vocabulary grows as
//! parsing proceeds: a `strings (a b c)` declaration makes `a`, `b`, `c`
//! resolvable as string references anywhere later in the program. The
//! reference Python implementation this compiler is modeled on keeps this
//! state in module-level globals (`threading.local()`); here it lives in one
//! `Session` value threaded explicitly through the lexer and parser, so two
//! translations never share state and both can run on separate threads at
//! once.
//!
//! `Session` also owns the two monotone counters code generation needs
//! (fresh local-variable names, `among` table indices) and the live
//! string-escape configuration the lexer consults on every string literal.

use indexmap::IndexSet;
use std::collections::HashMap;

/// Which symbol table a reference or declaration belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Strings,
    Integers,
    Booleans,
    Routines,
    Externals,
    Groupings,
}

impl TableKind {
    pub fn all() -> [TableKind; 6] {
        [
            TableKind::Strings,
            TableKind::Integers,
            TableKind::Booleans,
            TableKind::Routines,
            TableKind::Externals,
            TableKind::Groupings,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            TableKind::Strings => "string",
            TableKind::Integers => "integer",
            TableKind::Booleans => "boolean",
            TableKind::Routines => "routine",
            TableKind::Externals => "external",
            TableKind::Groupings => "grouping",
        }
    }
}

/// An insertion-ordered set of declared names.
///
/// Order matters twice over: the reference terminal's longest-match rule
/// breaks ties on declaration order, and `among`'s pattern table
/// tiebreaks the same way.
#[derive(Debug, Clone, Default)]
pub struct DeclTable {
    names: IndexSet<String>,
}

impl DeclTable {
    pub fn new() -> Self {
        Self {
            names: IndexSet::new(),
        }
    }

    /// Declare `name`. Returns `false` if it was already present (callers
    /// that must reject duplicates check this; spec treats duplicate
    /// declarations as optionally-acceptable, so callers may ignore it).
    pub fn declare(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn declaration_order(&self, name: &str) -> Option<usize> {
        self.names.get_index_of(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Live escape-marker state for string literals.
///
/// Starts with no markers set, meaning string literals contain no escapes
/// at all. A `stringescapes 'LR'` directive sets `left`/`right` to the two
/// characters of its argument; subsequent `stringdef` directives populate
/// `replacements`. Both `'` and `[` map to themselves once escapes are
/// active, matching the reference grammar's behavior so that `'<'>'` and
/// `'<[>'` can still express a literal quote/bracket inside an escaped
/// literal.
#[derive(Debug, Clone, Default)]
pub struct StringEscapes {
    pub left: Option<char>,
    pub right: Option<char>,
    pub replacements: HashMap<String, String>,
}

impl StringEscapes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.left.is_some() && self.right.is_some()
    }

    /// Set the escape marker pair, seeding the self-mapping entries for `'`
    /// and `[`.
    pub fn set_markers(&mut self, left: char, right: char) {
        self.left = Some(left);
        self.right = Some(right);
        self.replacements.insert("'".to_string(), "'".to_string());
        self.replacements.insert("[".to_string(), "[".to_string());
    }

    pub fn define(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.replacements.insert(key.into(), value.into());
    }

    pub fn resolve(&self, key: &str) -> Option<&str> {
        self.replacements.get(key).map(String::as_str)
    }
}

/// The full parse-time session: six declaration tables, string-escape
/// state, and the counters code generation draws fresh names from.
pub struct Session {
    pub strings: DeclTable,
    pub integers: DeclTable,
    pub booleans: DeclTable,
    pub routines: DeclTable,
    pub externals: DeclTable,
    pub groupings: DeclTable,
    pub string_escapes: StringEscapes,
    var_index: u32,
    among_index: u32,
}

impl Session {
    pub fn new() -> Self {
        Self {
            strings: DeclTable::new(),
            integers: DeclTable::new(),
            booleans: DeclTable::new(),
            routines: DeclTable::new(),
            externals: DeclTable::new(),
            groupings: DeclTable::new(),
            string_escapes: StringEscapes::new(),
            var_index: 0,
            among_index: 0,
        }
    }

    pub fn table(&self, kind: TableKind) -> &DeclTable {
        match kind {
            TableKind::Strings => &self.strings,
            TableKind::Integers => &self.integers,
            TableKind::Booleans => &self.booleans,
            TableKind::Routines => &self.routines,
            TableKind::Externals => &self.externals,
            TableKind::Groupings => &self.groupings,
        }
    }

    pub fn table_mut(&mut self, kind: TableKind) -> &mut DeclTable {
        match kind {
            TableKind::Strings => &mut self.strings,
            TableKind::Integers => &mut self.integers,
            TableKind::Booleans => &mut self.booleans,
            TableKind::Routines => &mut self.routines,
            TableKind::Externals => &mut self.externals,
            TableKind::Groupings => &mut self.groupings,
        }
    }

    /// Declare `name` in `kind`. Externals additionally register as
    /// routines: "externals imply routine-hood".
    pub fn declare(&mut self, kind: TableKind, name: impl Into<String>) {
        let name = name.into();
        if kind == TableKind::Externals {
            self.routines.declare(name.clone());
        }
        self.table_mut(kind).declare(name);
    }

    /// Resolve the longest declared name in `kind` that is a prefix of
    /// `text`, ties broken by declaration order. Returns the
    /// matched name.
    ///
    /// `snowc-parse`'s tokenizer already does maximal-munch on identifiers,
    /// so the parser itself never needs to call this — a declared name is
    /// always read to its full length before `table.contains` looks it up.
    /// Kept as a standalone, independently-tested operation for callers that
    /// only have an unbounded text run to resolve against, not a
    /// pre-tokenized identifier.
    pub fn resolve_longest<'a>(&self, kind: TableKind, text: &'a str) -> Option<&'a str> {
        let table = self.table(kind);
        let mut best: Option<(&str, usize)> = None;
        for name in table.iter() {
            if text.starts_with(name) {
                let order = table.declaration_order(name).unwrap_or(usize::MAX);
                match best {
                    Some((best_name, best_order))
                        if name.len() < best_name.len()
                            || (name.len() == best_name.len() && order >= best_order) => {}
                    _ => best = Some((name, order)),
                }
            }
        }
        best.map(|(name, _)| &text[..name.len()])
    }

    /// Claim a fresh local-variable name, e.g. `var0`, `var1`, ...
    pub fn fresh_var(&mut self) -> String {
        let name = format!("var{}", self.var_index);
        self.var_index += 1;
        name
    }

    /// Claim a fresh `among` table index.
    pub fn claim_among_index(&mut self) -> u32 {
        let index = self.among_index;
        self.among_index += 1;
        index
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
