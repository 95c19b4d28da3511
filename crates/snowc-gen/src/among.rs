//! Among-table compilation.
//!
//! Each compiled `among`/`substring` pair owns one module-level table of
//! `(pattern, guard, branch)` rows, walked by a loop that tries each row in
//! declaration order. A pattern match consumes input via
//! [`snowc_runtime::SnowString::starts_with`] even when the row's guard then
//! rejects it — a deliberate short-circuit, non-rolling-back behavior kept
//! as-is rather than "fixed" (see `DESIGN.md`).

use snowc_ast::AmongNode;

use crate::env::Env;
use crate::error::{CodeGenError, Result};
use crate::template;

fn table_name(table_index: u32) -> String {
    format!("AMONG_TABLE_{table_index}")
}

fn branch_var(table_index: u32) -> String {
    format!("a_{table_index}")
}

struct Row {
    pattern: String,
    guard: Option<String>,
    branch: usize,
}

/// Flattens every arm's patterns into one row list, sorted by decreasing
/// pattern length so the walk loop's first accepting row is always the
/// *longest* matching pattern (reference `grammar.py`'s `cmd_among_action`
/// sorts `strings` the same way, for the same reason — a `starts_with` scan
/// in declaration order would otherwise let a short prefix shadow a longer
/// one). The sort is stable, so rows of equal length keep their declaration
/// order, matching the original's stable sort.
fn flatten_rows(node: &AmongNode) -> Vec<Row> {
    let mut rows = Vec::new();
    for (branch, arm) in node.arms.iter().enumerate() {
        for (pattern, guard) in &arm.patterns {
            rows.push(Row { pattern: pattern.clone(), guard: guard.clone(), branch });
        }
    }
    rows.sort_by(|a, b| b.pattern.len().cmp(&a.pattern.len()));
    rows
}

/// The module-level static table backing one among/substring pair.
fn render_table(node: &AmongNode) -> String {
    let name = table_name(node.table_index);
    let mut lines = vec![format!(
        "static {name}: &[(&str, Option<fn(&mut Program, &mut SnowString) -> bool>, i32)] = &["
    )];
    for row in flatten_rows(node) {
        let pattern = format!("{:?}", row.pattern);
        let guard = match &row.guard {
            Some(routine) => format!("Some(Program::r_{routine})"),
            None => "None".to_string(),
        };
        lines.push(format!("    ({pattern}, {guard}, {}),", row.branch));
    }
    lines.push("];".to_string());
    lines.join("\n")
}

/// The shared walk loop: tries every row of `AMONG_TABLE_{table_index}` and
/// keeps the first whose pattern matches and whose guard (if any) accepts,
/// leaving the winning branch index in `a_{table_index}` and the match
/// outcome in `r`.
pub fn render_walk(table_index: u32, env: &mut Env) -> String {
    let name = table_name(table_index);
    let var = branch_var(table_index);
    let template = format!(
        "\nlet mut {var}: i32 = -1;\nr = false;\nfor &(pattern, guard, branch) in {name} {{\n  if s.starts_with(pattern) && guard.map_or(true, |g| g(self, s)) {{\n    {var} = branch;\n    r = true;\n    break;\n  }}\n}}\n"
    );
    template::render(&template, env, &[])
}

/// Nested `if r {{ ... }}` chaining with no cursor save — the plain
/// concatenation join (`_make_if_chain` with no `self_cursor` reset).
pub fn chain_on_r(blocks: &[String]) -> String {
    if blocks.len() == 1 {
        return blocks[0].clone();
    }
    let last = blocks.len() - 1;
    let mut body = blocks[last].clone();
    for idx in (1..last).rev() {
        let nested = template::prefix_lines(&body, "    ");
        body = format!("{}\nif r {{\n{nested}\n}}", blocks[idx]);
    }
    let nested_top = template::prefix_lines(&body, "    ");
    format!("{}\nif r {{\n{nested_top}\n}}", blocks[0])
}

/// Renders one `among(...)`, dispatching on its `table_index`'s branch
/// variable. When `node.owns_walk` is true (no preceding `substring` sibling
/// already ran the walk) this also emits the walk loop itself, `if r`-guarded
/// ahead of the dispatch — otherwise the walk was already run by the sibling
/// `Command::Substring` and the enclosing concatenation already supplies that
/// guard.
pub fn render_among(
    node: &AmongNode,
    env: &mut Env,
    render_command: impl Fn(&snowc_ast::Command, &mut Env) -> Result<String>,
) -> Result<String> {
    if node.arms.is_empty() {
        return Err(CodeGenError::EmptyAmong);
    }

    env.module_code.push_str(&render_table(node));
    env.module_code.push('\n');

    let var = branch_var(node.table_index);
    let mut arm_blocks = Vec::with_capacity(node.arms.len());
    for (idx, arm) in node.arms.iter().enumerate() {
        let body = match &arm.command {
            Some(cmd) => render_command(cmd, env)?,
            None => "r = true;".to_string(),
        };
        let indented = template::prefix_lines(&body, "    ");
        arm_blocks.push(format!("if {var} == {idx} {{\n{indented}\n}}"));
    }
    let dispatch = arm_blocks.join("\n");

    if node.owns_walk {
        let walk = render_walk(node.table_index, env);
        Ok(chain_on_r(&[walk, dispatch]))
    } else {
        Ok(dispatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snowc_ast::AmongArm;
    use snowc_sess::Session;

    fn env() -> Env {
        Env::new(Session::new(), false)
    }

    /// Spec scenario 5: `among('f' 'foo' 'fo')` must try `'foo'` before
    /// `'fo'` before `'f'`, so the longest prefix match wins regardless of
    /// declaration order.
    #[test]
    fn table_rows_are_sorted_longest_pattern_first() {
        let node = AmongNode {
            table_index: 0,
            owns_walk: true,
            arms: vec![AmongArm {
                patterns: vec![
                    ("f".to_string(), None),
                    ("foo".to_string(), None),
                    ("fo".to_string(), None),
                ],
                command: None,
            }],
        };
        let table = render_table(&node);
        let foo_pos = table.find("\"foo\"").unwrap();
        let fo_pos = table.find("\"fo\",").unwrap();
        let f_pos = table.find("\"f\",").unwrap();
        assert!(foo_pos < fo_pos, "{table}");
        assert!(fo_pos < f_pos, "{table}");
    }

    #[test]
    fn empty_among_is_rejected() {
        let mut e = env();
        let node = AmongNode { table_index: 0, owns_walk: true, arms: vec![] };
        let err = render_among(&node, &mut e, |_, _| unreachable!()).unwrap_err();
        assert_eq!(err, CodeGenError::EmptyAmong);
    }
}
