//! SQLite model implementation.

use sql_builder::{SqlBuilder, esc};

pub mod conn;
pub mod developer;
pub mod level;
pub mod user;

/// Appends a `(f1 LIKE '%mask%' OR f2 LIKE '%mask%' OR ...)` condition over the specified
/// fields. The mask is escaped so `%`, `_` and `\` match literally.
fn build_where_search<'a, T>(
    builder: &'a mut SqlBuilder,
    fields: &[&str],
    mask: T,
) -> &'a mut SqlBuilder
where
    T: ToString,
{
    let mut use_escape = false;
    let mask = mask.to_string();
    let like_str = mask
        .replace("\\", "\\\\")
        .replace("%", "\\%")
        .replace("_", "\\_");
    if like_str.len() > mask.len() {
        use_escape = true;
    }

    let mut cond = "(".to_string();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            cond.push_str(" OR ");
        }
        cond.push_str(field);
        cond.push_str(" LIKE '%");
        cond.push_str(&esc(like_str.as_str()));
        cond.push_str("%'");
        if use_escape {
            cond.push_str(" ESCAPE '\\'");
        }
    }
    cond.push(')');
    builder.and_where(&cond)
}
