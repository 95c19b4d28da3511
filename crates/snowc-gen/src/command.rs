//! Lowers [`Command`] into Rust statement text. Each command renders to a
//! fixed template of pseudo-code with explicit braces and method-call
//! cursor/limit access.
//!
//! Grouping checks are direction-agnostic here: forward indexes `s.cursor`,
//! backward effectively indexes one position earlier, but
//! [`snowc_runtime::SnowString::grouping`]/`non_grouping` already branch on
//! the string's own `direction` field, so one call site serves both — see
//! `DESIGN.md`.

use snowc_ast::{AmongNode, Command, IntegerAssignOp, IntegerCompareOp, StringExpr};

use crate::among;
use crate::env::Env;
use crate::error::{CodeGenError, Result};
use crate::expr::render_expr;
use crate::template;

fn render_string_expr(expr: &StringExpr) -> String {
    match expr {
        StringExpr::Literal(text) => format!("{text:?}"),
        // Neither the parser nor any surviving grammar path builds a bare
        // `StringRef`; declared-string operands always come through as
        // `CharsRef`. Both render identically: the string's current contents.
        StringExpr::StringRef(name) | StringExpr::CharsRef(name) => {
            format!("&self.s_{name}.to_string()")
        }
    }
}

/// Nested `if r {{ ... }}` chaining, no cursor save — the plain
/// concatenation join (`_make_if_chain`, no `<v>` reset).
fn chain_concat(blocks: &[String]) -> String {
    among::chain_on_r(blocks)
}

/// `and`/`or`'s chain: save the cursor once up front, and on every step
/// after the first, reset to it before trying the next child. `invert`
/// selects `or`'s "keep going while not r" polarity.
fn chain_and_or(items: &[Command], env: &mut Env, invert: bool) -> Result<String> {
    let v = env.fresh_var();
    let cond = if invert { "!r" } else { "r" };
    let mut rendered = Vec::with_capacity(items.len());
    for item in items {
        rendered.push(render_command(item, env)?);
    }
    if rendered.len() == 1 {
        return Ok(rendered.into_iter().next().unwrap());
    }

    let last = rendered.len() - 1;
    let mut body = format!("s.set_cursor({v});\n{}", rendered[last]);
    for idx in (1..last).rev() {
        let nested = template::prefix_lines(&body, "    ");
        body = format!("s.set_cursor({v});\n{}\nif {cond} {{\n{nested}\n}}", rendered[idx]);
    }
    let nested_top = template::prefix_lines(&body, "    ");
    Ok(format!(
        "let {v} = s.cursor();\n{}\nif {cond} {{\n{nested_top}\n}}",
        rendered[0]
    ))
}

fn render_among_node(node: &AmongNode, env: &mut Env) -> Result<String> {
    among::render_among(node, env, render_command)
}

/// Lowers one command into a block of Rust statements that read/assign `r`
/// (the command's success flag), operating on `self` (the generated
/// `Program`) and `s` (the active [`snowc_runtime::SnowString`]).
pub fn render_command(cmd: &Command, env: &mut Env) -> Result<String> {
    match cmd {
        Command::Not(inner) => {
            let child = render_command(inner, env)?;
            Ok(template::render(
                "\nlet <v> = s.cursor();\n<t0>\nif !r {\n  s.set_cursor(<v>);\n}\nr = !r;\n",
                env,
                &[&child],
            ))
        }
        Command::Test(inner) => {
            let child = render_command(inner, env)?;
            Ok(template::render(
                "\nlet <v> = s.cursor();\n<t0>\ns.set_cursor(<v>);\n",
                env,
                &[&child],
            ))
        }
        Command::Try(inner) => {
            let child = render_command(inner, env)?;
            Ok(template::render(
                "\nlet <v> = s.cursor();\n<t0>\nif !r {\n  r = true;\n  s.set_cursor(<v>);\n}\n",
                env,
                &[&child],
            ))
        }
        Command::Do(inner) => {
            let child = render_command(inner, env)?;
            Ok(template::render(
                "\nlet <v> = s.cursor();\n<t0>\ns.set_cursor(<v>);\nr = true;\n",
                env,
                &[&child],
            ))
        }
        Command::Fail(inner) => {
            let child = render_command(inner, env)?;
            Ok(template::render("\n<t0>\nr = false;\n", env, &[&child]))
        }
        Command::GoTo(inner) => {
            let child = render_command(inner, env)?;
            let step = if env.is_forward() { "+ 1" } else { "- 1" };
            let tmpl = format!(
                "\nloop {{\n  let <v> = s.cursor();\n  <t0>\n  if r || s.cursor() == s.limit() {{\n    s.set_cursor(<v>);\n    break;\n  }}\n  s.set_cursor(<v> {step});\n}}\n"
            );
            Ok(template::render(&tmpl, env, &[&child]))
        }
        Command::GoPast(inner) => {
            let child = render_command(inner, env)?;
            let step = if env.is_forward() { "+ 1" } else { "- 1" };
            let tmpl = format!(
                "\nloop {{\n  <t0>\n  if r || s.cursor() == s.limit() {{\n    break;\n  }}\n  s.set_cursor(s.cursor() {step});\n}}\n"
            );
            Ok(template::render(&tmpl, env, &[&child]))
        }
        Command::Repeat(inner) => {
            let child = render_command(inner, env)?;
            Ok(template::render(
                "\nloop {\n  let <v> = s.cursor();\n  <t0>\n  if !r {\n    s.set_cursor(<v>);\n    break;\n  }\n}\nr = true;\n",
                env,
                &[&child],
            ))
        }
        Command::Loop(count, body) => {
            let count_code = render_expr(count, env);
            let body_code = render_command(body, env)?;
            Ok(template::render(
                "\nfor _ in 0i64..(<t0>) {\n  <t1>\n}\n",
                env,
                &[&count_code, &body_code],
            ))
        }
        Command::AtLeast(count, body) => {
            let count_code = render_expr(count, env);
            let body_code = render_command(body, env)?;
            Ok(template::render(
                "\nfor _ in 0i64..(<t0>) {\n  <t1>\n}\nloop {\n  let <v> = s.cursor();\n  <t1>\n  if !r {\n    s.set_cursor(<v>);\n    break;\n  }\n}\nr = true;\n",
                env,
                &[&count_code, &body_code],
            ))
        }
        Command::Backwards(inner) => {
            let child = env.with_flipped_direction(|env| render_command(inner, env))?;
            Ok(template::render(
                "\nlet <v> = s.enter_backwards();\n<t0>\ns.exit_backwards(<v>);\n",
                env,
                &[&child],
            ))
        }
        Command::Reverse(_) => Err(CodeGenError::UnsupportedReverse),
        Command::Concat(items) => {
            let mut rendered = Vec::with_capacity(items.len());
            for item in items {
                rendered.push(render_command(item, env)?);
            }
            Ok(chain_concat(&rendered))
        }
        Command::And(items) => chain_and_or(items, env, false),
        Command::Or(items) => chain_and_or(items, env, true),

        Command::StartsWith(expr) => {
            Ok(format!("r = s.starts_with({});", render_string_expr(expr)))
        }
        Command::Insert(expr) => Ok(format!("r = s.insert({});", render_string_expr(expr))),
        Command::Attach(expr) => Ok(format!("r = s.attach({});", render_string_expr(expr))),
        Command::ReplaceSlice(expr) => {
            let text = render_string_expr(expr);
            Ok(format!(
                "r = if let (Some(left), Some(right)) = (self.left, self.right) {{\n    s.set_range(left, right, {text})\n}} else {{\n    false\n}};"
            ))
        }
        Command::ExportSlice(name) => Ok(format!(
            "r = if let (Some(left), Some(right)) = (self.left, self.right) {{\n    let text = s.get_range(left, right);\n    self.s_{name}.set_chars(&text);\n    true\n}} else {{\n    false\n}};"
        )),
        Command::Delete => Ok(
            "r = if let (Some(left), Some(right)) = (self.left, self.right) {\n    s.set_range(left, right, \"\")\n} else {\n    false\n};"
                .to_string(),
        ),
        Command::Hop(expr) => {
            let code = render_expr(expr, env);
            Ok(format!("r = s.hop({code});"))
        }
        Command::Next => Ok("r = s.next();".to_string()),
        Command::SetLeft => Ok("self.left = Some(s.cursor());\nr = true;".to_string()),
        Command::SetRight => Ok("self.right = Some(s.cursor());\nr = true;".to_string()),
        Command::SetMark(name) => {
            Ok(format!("self.i_{name} = s.cursor() as i64;\nr = true;"))
        }
        Command::ToMark(expr) => {
            let code = render_expr(expr, env);
            Ok(format!("r = s.to_mark(({code}) as usize);"))
        }
        Command::AtMark(expr) => {
            let code = render_expr(expr, env);
            Ok(format!("r = s.at_mark(({code}) as usize);"))
        }
        Command::ToLimit => Ok("r = s.to_limit();".to_string()),
        Command::AtLimit => Ok("r = s.at_limit();".to_string()),
        Command::Set(name) => Ok(format!("self.b_{name} = true;\nr = true;")),
        Command::Unset(name) => Ok(format!("self.b_{name} = false;\nr = true;")),
        Command::True => Ok("r = true;".to_string()),
        Command::False => Ok("r = false;".to_string()),
        Command::BooleanRef(name) => Ok(format!("r = self.b_{name};")),
        Command::Grouping(name) => Ok(format!("r = s.grouping(g_{name}());")),
        Command::NonGrouping(name) => Ok(format!("r = s.non_grouping(g_{name}());")),
        Command::RoutineCall(name) => Ok(format!("r = self.r_{name}(s);")),
        Command::Substring { table_index } => Ok(among::render_walk(*table_index, env)),
        Command::Among(node) => render_among_node(node, env),
        Command::SetLimit { limiting, body } => {
            let limiting_code = render_command(limiting, env)?;
            let body_code = render_command(body, env)?;
            if matches!(limiting.as_ref(), Command::Empty) {
                return Err(CodeGenError::MalformedSetLimit);
            }
            Ok(template::render(
                "\nlet <v0> = s.cursor();\nlet <v1> = s.len() - s.limit();\n<t0>\nif r {\n  s.set_limit(s.cursor());\n  s.set_cursor(<v0>);\n  <t1>\n  s.set_limit(s.len() - <v1>);\n}\n",
                env,
                &[&limiting_code, &body_code],
            ))
        }

        Command::IntegerAssign { name, op, value } => {
            let value_code = render_expr(value, env);
            let op_str = match op {
                IntegerAssignOp::Set => "=",
                IntegerAssignOp::Add => "+=",
                IntegerAssignOp::Sub => "-=",
                IntegerAssignOp::Mul => "*=",
                IntegerAssignOp::Div => "/=",
            };
            Ok(format!("self.i_{name} {op_str} {value_code};\nr = true;"))
        }
        Command::IntegerCompare { lhs, op, rhs } => {
            let lhs_code = render_expr(lhs, env);
            let rhs_code = render_expr(rhs, env);
            let op_str = match op {
                IntegerCompareOp::Eq => "==",
                IntegerCompareOp::NotEq => "!=",
                IntegerCompareOp::Gt => ">",
                IntegerCompareOp::Lt => "<",
                IntegerCompareOp::GtEq => ">=",
                IntegerCompareOp::LtEq => "<=",
            };
            Ok(format!("r = {lhs_code} {op_str} {rhs_code};"))
        }
        Command::Empty => Ok("r = true;".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snowc_ast::Expr;
    use snowc_sess::Session;

    fn env() -> Env {
        Env::new(Session::new(), false)
    }

    #[test]
    fn true_and_false_are_one_liners() {
        let mut e = env();
        assert_eq!(render_command(&Command::True, &mut e).unwrap(), "r = true;");
        assert_eq!(render_command(&Command::False, &mut e).unwrap(), "r = false;");
    }

    #[test]
    fn not_saves_and_restores_cursor_on_success() {
        let mut e = env();
        let out = render_command(&Command::Not(Box::new(Command::True)), &mut e).unwrap();
        assert!(out.contains("let var0 = s.cursor();"));
        assert!(out.contains("r = true;"));
        assert!(out.contains("if !r {"));
        assert!(out.contains("s.set_cursor(var0);"));
        assert!(out.trim_end().ends_with("r = !r;"));
    }

    #[test]
    fn concat_nests_if_r_without_cursor_save() {
        let mut e = env();
        let out =
            render_command(&Command::Concat(vec![Command::True, Command::False]), &mut e)
                .unwrap();
        assert_eq!(out, "r = true;\nif r {\n    r = false;\n}");
    }

    #[test]
    fn and_chain_saves_cursor_once_and_resets_between_children() {
        let mut e = env();
        let out = render_command(&Command::And(vec![Command::True, Command::False]), &mut e)
            .unwrap();
        assert!(out.starts_with("let var0 = s.cursor();"));
        assert!(out.contains("if r {"));
        assert!(out.contains("s.set_cursor(var0);"));
        assert!(out.contains("r = false;"));
    }

    #[test]
    fn or_chain_uses_inverted_guard() {
        let mut e = env();
        let out = render_command(&Command::Or(vec![Command::False, Command::True]), &mut e)
            .unwrap();
        assert!(out.contains("if !r {"));
    }

    #[test]
    fn hop_renders_the_integer_expression() {
        let mut e = env();
        let out = render_command(&Command::Hop(Expr::IntegerLiteral(3)), &mut e).unwrap();
        assert_eq!(out, "r = s.hop(3);");
    }

    #[test]
    fn integer_assign_set_and_compare() {
        let mut e = env();
        let assign = render_command(
            &Command::IntegerAssign {
                name: "n".into(),
                op: IntegerAssignOp::Set,
                value: Expr::IntegerLiteral(1),
            },
            &mut e,
        )
        .unwrap();
        assert_eq!(assign, "self.i_n = 1;\nr = true;");

        let compare = render_command(
            &Command::IntegerCompare {
                lhs: Expr::IntegerRef("n".into()),
                op: IntegerCompareOp::Gt,
                rhs: Expr::IntegerLiteral(0),
            },
            &mut e,
        )
        .unwrap();
        assert_eq!(compare, "r = self.i_n > 0;");
    }

    #[test]
    fn setlimit_rejects_an_empty_limiting_command() {
        let mut e = env();
        let err = render_command(
            &Command::SetLimit {
                limiting: Box::new(Command::Empty),
                body: Box::new(Command::True),
            },
            &mut e,
        )
        .unwrap_err();
        assert_eq!(err, CodeGenError::MalformedSetLimit);
    }

    #[test]
    fn reverse_is_rejected_at_codegen() {
        let mut e = env();
        let err = render_command(&Command::Reverse(Box::new(Command::True)), &mut e).unwrap_err();
        assert_eq!(err, CodeGenError::UnsupportedReverse);
    }

    #[test]
    fn grouping_and_non_grouping_call_the_runtime_directly() {
        let mut e = env();
        assert_eq!(
            render_command(&Command::Grouping("v".into()), &mut e).unwrap(),
            "r = s.grouping(g_v());"
        );
        assert_eq!(
            render_command(&Command::NonGrouping("v".into()), &mut e).unwrap(),
            "r = s.non_grouping(g_v());"
        );
    }
}
