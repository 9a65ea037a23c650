//! Case-insensitive `ILIKE` helpers that treat user input as literal text.
//!
//! Patterns travel as bound values; `%`, `_` and `\` inside the input are
//! escaped so they match themselves instead of acting as wildcards.

use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Condition, Expr, IntoColumnRef, LikeExpr, SimpleExpr};

const ESCAPE: char = '\\';

/// Escape LIKE metacharacters in `raw`.
pub fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '%' | '_' | ESCAPE) {
            out.push(ESCAPE);
        }
        out.push(ch);
    }
    out
}

/// `col ILIKE '%raw%'`
pub fn ilike_contains<C: IntoColumnRef>(col: C, raw: &str) -> SimpleExpr {
    Expr::col(col).ilike(LikeExpr::new(format!("%{}%", escape_like(raw))).escape(ESCAPE))
}

/// `col ILIKE 'raw%'`
pub fn ilike_prefix<C: IntoColumnRef>(col: C, raw: &str) -> SimpleExpr {
    Expr::col(col).ilike(LikeExpr::new(format!("{}%", escape_like(raw))).escape(ESCAPE))
}

/// `col ILIKE 'raw'`: case-insensitive equality.
pub fn ilike_equals<C: IntoColumnRef>(col: C, raw: &str) -> SimpleExpr {
    Expr::col(col).ilike(LikeExpr::new(escape_like(raw)).escape(ESCAPE))
}

/// `col1 ILIKE '%raw%' OR col2 ILIKE '%raw%' OR ...`
pub fn ilike_any<C, I>(cols: I, raw: &str) -> Condition
where
    C: IntoColumnRef,
    I: IntoIterator<Item = C>,
{
    cols.into_iter()
        .fold(Condition::any(), |cond, col| cond.add(ilike_contains(col, raw)))
}
