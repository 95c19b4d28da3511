//! Lowers [`Expr`] into Rust expression text.

use snowc_ast::Expr;

use crate::env::Env;

/// Render `expr` as a single-line Rust expression evaluating to `i64`.
///
/// Multiplication/division render bare (`a * b`); addition/subtraction wrap
/// in parentheses so nested `a - b - c` keeps left-associative meaning once
/// re-parsed as Rust.
pub fn render_expr(expr: &Expr, env: &mut Env) -> String {
    match expr {
        Expr::IntegerLiteral(n) => n.to_string(),
        Expr::MaxInt => "i64::MAX".to_string(),
        Expr::MinInt => "i64::MIN".to_string(),
        Expr::Cursor => "(s.cursor() as i64)".to_string(),
        Expr::Limit => "(s.limit() as i64)".to_string(),
        Expr::Size => "(s.len() as i64)".to_string(),
        Expr::SizeOf(name) => format!("(self.s_{name}.len() as i64)"),
        Expr::IntegerRef(name) => format!("self.i_{name}"),
        Expr::Neg(inner) => format!("(-{})", render_expr(inner, env)),
        Expr::Mul(lhs, rhs) => format!("{} * {}", render_expr(lhs, env), render_expr(rhs, env)),
        Expr::Div(lhs, rhs) => format!("{} / {}", render_expr(lhs, env), render_expr(rhs, env)),
        Expr::Add(lhs, rhs) => {
            format!("({} + {})", render_expr(lhs, env), render_expr(rhs, env))
        }
        Expr::Sub(lhs, rhs) => {
            format!("({} - {})", render_expr(lhs, env), render_expr(rhs, env))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snowc_sess::Session;

    fn env() -> Env {
        Env::new(Session::new(), false)
    }

    #[test]
    fn literals_and_bounds() {
        let mut e = env();
        assert_eq!(render_expr(&Expr::IntegerLiteral(42), &mut e), "42");
        assert_eq!(render_expr(&Expr::MaxInt, &mut e), "i64::MAX");
        assert_eq!(render_expr(&Expr::MinInt, &mut e), "i64::MIN");
    }

    #[test]
    fn references() {
        let mut e = env();
        assert_eq!(render_expr(&Expr::IntegerRef("n".into()), &mut e), "self.i_n");
        assert_eq!(
            render_expr(&Expr::SizeOf("x".into()), &mut e),
            "(self.s_x.len() as i64)"
        );
    }

    #[test]
    fn mul_and_div_render_without_extra_brackets() {
        let mut e = env();
        let expr = Expr::Mul(
            Box::new(Expr::IntegerRef("a".into())),
            Box::new(Expr::IntegerRef("b".into())),
        );
        assert_eq!(render_expr(&expr, &mut e), "self.i_a * self.i_b");
    }

    #[test]
    fn add_and_sub_are_bracketed() {
        let mut e = env();
        let expr = Expr::Sub(
            Box::new(Expr::IntegerRef("a".into())),
            Box::new(Expr::IntegerLiteral(1)),
        );
        assert_eq!(render_expr(&expr, &mut e), "(self.i_a - 1)");
    }

    #[test]
    fn negation_wraps_its_operand() {
        let mut e = env();
        let expr = Expr::Neg(Box::new(Expr::IntegerRef("a".into())));
        assert_eq!(render_expr(&expr, &mut e), "(-self.i_a)");
    }
}
