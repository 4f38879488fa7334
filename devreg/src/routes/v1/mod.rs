//! `v1` API handlers and the list query parameters shared by all resources.

use serde::Deserialize;

use devreg_corelib::err::ErrResp;

pub mod developer;
pub mod level;
pub mod user;

/// Query parameters shared by the `/count` and `/list` APIs.
///
/// `take` and `skip` are accepted as raw strings. Values that cannot be parsed as (positive)
/// integers fall back to the defaults instead of rejecting the request.
#[derive(Clone, Deserialize)]
pub struct ListQuery {
    pub take: Option<String>,
    pub skip: Option<String>,
    pub sort: Option<String>,
    pub search: Option<String>,
}

pub const LIST_TAKE_DEFAULT: u64 = 10;
pub const LIST_SKIP_DEFAULT: u64 = 0;

/// The page size. Absent or not a positive integer means [`LIST_TAKE_DEFAULT`].
fn get_take(query: &ListQuery) -> u64 {
    match query.take.as_ref() {
        None => LIST_TAKE_DEFAULT,
        Some(take) => match take.parse::<u64>() {
            Err(_) => LIST_TAKE_DEFAULT,
            Ok(0) => LIST_TAKE_DEFAULT,
            Ok(take) => take,
        },
    }
}

/// The page offset. Absent or not a non-negative integer means [`LIST_SKIP_DEFAULT`].
fn get_skip(query: &ListQuery) -> u64 {
    match query.skip.as_ref() {
        None => LIST_SKIP_DEFAULT,
        Some(skip) => match skip.parse::<u64>() {
            Err(_) => LIST_SKIP_DEFAULT,
            Ok(skip) => skip,
        },
    }
}

/// The non-empty search word, if any.
fn get_search(query: &ListQuery) -> Option<&str> {
    match query.search.as_ref() {
        None => None,
        Some(search) => match search.len() {
            0 => None,
            _ => Some(search.as_str()),
        },
    }
}

/// Splits the `sort` argument into ordered `(field, asc)` pairs.
///
/// Pairs are comma-separated and each pair is a whitespace-separated `field direction` where the
/// direction is `asc`/`desc` (case-insensitive). Each resource maps the field names to its own
/// sort keys and rejects unknown ones.
fn get_sort_pairs(args: &str) -> Result<Vec<(&str, bool)>, ErrResp> {
    let mut pairs = vec![];
    for arg in args.split(",") {
        let mut tokens = arg.split_whitespace();
        let field = match tokens.next() {
            None => return Err(ErrResp::ErrParam(Some("wrong sort argument".to_string()))),
            Some(field) => field,
        };
        let asc = match tokens.next() {
            None => return Err(ErrResp::ErrParam(Some("wrong sort argument".to_string()))),
            Some(dir) => match dir.to_lowercase().as_str() {
                "asc" => true,
                "desc" => false,
                _ => {
                    return Err(ErrResp::ErrParam(Some(format!(
                        "invalid sort direction {}",
                        dir
                    ))));
                }
            },
        };
        if tokens.next().is_some() {
            return Err(ErrResp::ErrParam(Some(
                "invalid sort condition".to_string(),
            )));
        }
        pairs.push((field, asc));
    }
    Ok(pairs)
}
