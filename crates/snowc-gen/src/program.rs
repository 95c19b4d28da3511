//! Top-level assembly: walks a [`Program`]'s items and produces the final
//! Rust source text.
//!
//! Three buffers accumulate while walking declarations:
//! [`crate::env::Env::module_code`] (grouping/among statics), a `Vec` of
//! typed `Program` struct fields, and [`crate::env::Env::class_code`]
//! (routine methods) — assembled into one `Program` struct/impl.

use snowc_ast::{CharSetExpr, GroupingDef, Program, ProgramItem};

use crate::command::render_command;
use crate::env::Env;
use crate::error::Result;
use crate::template;

struct Field {
    decl: String,
    init: String,
}

/// Everything collected while walking `Program.items`, before final assembly.
#[derive(Default)]
struct Collected {
    fields: Vec<Field>,
    externals: Vec<String>,
}

fn render_charset_expr(expr: &CharSetExpr) -> String {
    match expr {
        CharSetExpr::Literal(text) => format!("{text:?}.chars().collect::<Vec<char>>()"),
        CharSetExpr::GroupingRef(name) => format!("g_{name}().to_vec()"),
        CharSetExpr::Union(lhs, rhs) => format!(
            "{{ let mut set = {}; set.extend({}); set }}",
            render_charset_expr(lhs),
            render_charset_expr(rhs)
        ),
        CharSetExpr::Difference(lhs, rhs) => format!(
            "{{ let exclude = {}; {}.into_iter().filter(|c| !exclude.contains(c)).collect::<Vec<char>>() }}",
            render_charset_expr(rhs),
            render_charset_expr(lhs)
        ),
    }
}

/// Emits the `OnceLock`-backed accessor for one `define NAME <charset>`.
/// Resolved once on first use, mirroring the reference's module-level
/// `_g_name = <charset>` computed once at import time — `OnceLock` gives
/// the same "compute once" guarantee without a new dependency or unsafe
/// global state (see `DESIGN.md`).
fn render_grouping_def(def: &GroupingDef) -> String {
    let name = &def.name;
    let expr_code = render_charset_expr(&def.expr);
    format!(
        "static G_{name}: std::sync::OnceLock<Vec<char>> = std::sync::OnceLock::new();\nfn g_{name}() -> &'static [char] {{\n    G_{name}.get_or_init(|| {expr_code})\n}}"
    )
}

fn render_routine_method(name: &str, body_code: &str) -> String {
    let indented = template::prefix_lines(body_code, "    ");
    format!("fn r_{name}(&mut self, s: &mut SnowString) -> bool {{\n    let mut r = true;\n{indented}\n    r\n}}")
}

fn render_external_fn(name: &str, debug: bool) -> String {
    if debug {
        format!(
            "pub fn {name}(input: &str) -> (String, Program) {{\n    let mut program = Program::new();\n    let mut s = SnowString::new(input);\n    program.r_{name}(&mut s);\n    (s.to_string(), program)\n}}"
        )
    } else {
        format!(
            "pub fn {name}(input: &str) -> String {{\n    let mut s = SnowString::new(input);\n    Program::new().r_{name}(&mut s);\n    s.to_string()\n}}"
        )
    }
}

fn walk_items(items: &[ProgramItem], env: &mut Env, collected: &mut Collected) -> Result<()> {
    for item in items {
        match item {
            ProgramItem::StringField(name) => collected.fields.push(Field {
                decl: format!("s_{name}: SnowString"),
                init: format!("s_{name}: SnowString::new(\"\")"),
            }),
            ProgramItem::IntegerField(name) => collected.fields.push(Field {
                decl: format!("i_{name}: i64"),
                init: format!("i_{name}: 0"),
            }),
            ProgramItem::BooleanField(name) => collected.fields.push(Field {
                decl: format!("b_{name}: bool"),
                // Declared booleans default to `false` (see `DESIGN.md`).
                init: format!("b_{name}: false"),
            }),
            ProgramItem::External(name) => collected.externals.push(name.clone()),
            ProgramItem::RoutineDef(def) => {
                let body_code = render_command(&def.body, env)?;
                let method = render_routine_method(&def.name, &body_code);
                if !env.class_code.is_empty() {
                    env.class_code.push_str("\n\n");
                }
                env.class_code.push_str(&method);
            }
            ProgramItem::GroupingDef(def) => {
                let code = render_grouping_def(def);
                env.module_code.push_str(&code);
                env.module_code.push('\n');
            }
            ProgramItem::BackwardModeSection(inner) => {
                env.with_flipped_direction(|env| walk_items(inner, env, collected))?;
            }
        }
    }
    Ok(())
}

/// Lowers a whole parsed [`Program`] into a complete, self-contained Rust
/// source string: one `Program` struct wrapping the declared string/integer/
/// boolean fields and slice anchors, one method per routine, module-level
/// grouping/among statics, and one public function per `externals (...)`
/// entry point.
pub fn generate_program(program: &Program, env: &mut Env) -> Result<String> {
    let mut collected = Collected::default();
    walk_items(&program.items, env, &mut collected)?;

    let field_decls = collected
        .fields
        .iter()
        .map(|f| format!("    {},", f.decl))
        .collect::<Vec<_>>()
        .join("\n");
    let field_inits = collected
        .fields
        .iter()
        .map(|f| format!("            {},", f.init))
        .collect::<Vec<_>>()
        .join("\n");
    let externals = collected
        .externals
        .iter()
        .map(|name| render_external_fn(name, env.debug))
        .collect::<Vec<_>>()
        .join("\n\n");

    let class_code = template::prefix_lines(&env.class_code, "    ");

    let mut out = String::new();
    out.push_str("use snowc_runtime::SnowString;\n\n");
    out.push_str(&env.module_code);
    out.push('\n');
    out.push_str("pub struct Program {\n");
    out.push_str(&field_decls);
    out.push('\n');
    out.push_str("    left: Option<usize>,\n    right: Option<usize>,\n}\n\n");
    out.push_str("impl Program {\n    pub fn new() -> Self {\n        Program {\n");
    out.push_str(&field_inits);
    out.push('\n');
    out.push_str("            left: None,\n            right: None,\n        }\n    }\n\n");
    out.push_str(&class_code);
    out.push_str("\n}\n\n");
    out.push_str("impl Default for Program {\n    fn default() -> Self {\n        Self::new()\n    }\n}\n\n");
    out.push_str(&externals);
    out.push('\n');
    Ok(out)
}
