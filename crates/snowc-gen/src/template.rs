//! Pseudo-code template substitution.
//!
//! Each AST node lowers through exactly one template: a fixed string of
//! *target* pseudo-code containing two placeholder families —
//! `<v>`/`<v0>`/`<v1>`/... for fresh local names, and `<t0>`/`<t1>`/... for
//! the already-generated text of the node's children — which [`render`]
//! substitutes in one pass.
//!
//! Fresh names are drawn from [`crate::env::Env`]'s [`snowc_sess::Session`],
//! so `var0`, `var1`, ... count up across the whole translation, not just
//! one template.

use crate::env::Env;

/// Remove blank lines from a template literal (templates are written as
/// indented Rust string literals whose leading/trailing newlines would
/// otherwise survive).
fn remove_empty_lines(s: &str) -> String {
    s.lines().filter(|line| !line.is_empty()).collect::<Vec<_>>().join("\n")
}

/// Find every distinct `<v>`/`<v0>`/`<v1>`/... placeholder in `text`, in
/// first-occurrence order.
fn find_fresh_placeholders(text: &str) -> Vec<String> {
    let bytes = text.as_bytes();
    let mut found = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'<' && text[i + 1..].starts_with('v') {
            let mut j = i + 2;
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            if j < bytes.len() && bytes[j] == b'>' {
                let placeholder = text[i..=j].to_string();
                if !found.contains(&placeholder) {
                    found.push(placeholder);
                }
                i = j + 1;
                continue;
            }
        }
        i += 1;
    }
    found
}

/// Replace every `<tN>` appearing alone on a line (after indentation) with
/// `children[N]`, re-indented line by line; replace any other `<tN>`
/// occurrence with `children[N]` verbatim (the child is expected to be a
/// single-line expression in that position).
fn substitute_children(text: &str, children: &[&str]) -> String {
    let mut out = Vec::new();
    for line in text.lines() {
        let trimmed = line.trim_start();
        let indent = &line[..line.len() - trimmed.len()];
        if let Some(idx) = whole_line_child_index(trimmed) {
            let child = children.get(idx).copied().unwrap_or("");
            for child_line in child.lines() {
                out.push(format!("{indent}{child_line}"));
            }
            continue;
        }
        let mut rendered = line.to_string();
        for (idx, child) in children.iter().enumerate() {
            let token = format!("<t{idx}>");
            if rendered.contains(&token) {
                rendered = rendered.replace(&token, child);
            }
        }
        out.push(rendered);
    }
    out.join("\n")
}

fn whole_line_child_index(trimmed: &str) -> Option<usize> {
    trimmed.strip_prefix("<t")?.strip_suffix('>')?.parse::<usize>().ok()
}

/// Render one node's template: strip blank lines, mint fresh names for every
/// distinct `<v...>` placeholder, then splice in `children`'s generated text.
pub fn render(template: &str, env: &mut Env, children: &[&str]) -> String {
    let mut text = remove_empty_lines(template);
    for placeholder in find_fresh_placeholders(&text) {
        let fresh = env.fresh_var();
        text = text.replace(&placeholder, &fresh);
    }
    substitute_children(&text, children)
}

/// Indent every line of `s` by `prefix` (used when assembling chained
/// if-blocks for n-ary `and`/`or`/concatenation).
pub fn prefix_lines(s: &str, prefix: &str) -> String {
    s.lines().map(|line| format!("{prefix}{line}")).collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use snowc_sess::Session;

    fn env() -> Env {
        Env::new(Session::new(), false)
    }

    #[test]
    fn renders_fresh_var_and_single_child() {
        let mut e = env();
        let out = render(
            "\nlet <v> = s.cursor();\n<t0>\ns.set_cursor(<v>);\n",
            &mut e,
            &["r = true;"],
        );
        assert_eq!(out, "let var0 = s.cursor();\nr = true;\ns.set_cursor(var0);");
    }

    #[test]
    fn reindents_multiline_child_on_its_own_line() {
        let mut e = env();
        let out = render("for _ in 0i64..(<t0>) {\n  <t1>\n}", &mut e, &["3", "a();\nb();"]);
        assert_eq!(out, "for _ in 0i64..(3) {\n  a();\n  b();\n}");
    }

    #[test]
    fn repeated_placeholder_reuses_the_same_fresh_name() {
        let mut e = env();
        let out = render("<v0> + <v0>", &mut e, &[]);
        assert_eq!(out, "var0 + var0");
    }

    #[test]
    fn distinct_placeholders_get_distinct_names() {
        let mut e = env();
        let out = render("<v0> <v1>", &mut e, &[]);
        assert_eq!(out, "var0 var1");
    }
}
