//! Shared query-parameter types and parsing for list endpoints.
//!
//! The raw parameters arrive as strings (`tags=1,2`, `assigned_only=1`) and
//! are parsed here before anything reaches the repository layer. A
//! malformed value fails the request with 400; it is never silently
//! ignored.

use ladle_core::types::DbId;
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Query parameters for `GET /api/v1/recipes`.
#[derive(Debug, Default, Deserialize)]
pub struct RecipeListParams {
    /// Comma-separated tag IDs to filter by.
    pub tags: Option<String>,
    /// Comma-separated ingredient IDs to filter by.
    pub ingredients: Option<String>,
}

/// Query parameters for tag/ingredient list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct AttrListParams {
    /// Integer flag: restrict to attributes assigned to at least one recipe.
    /// Only `0` is falsy; any other integer is truthy.
    pub assigned_only: Option<String>,
}

/// Parse a comma-separated list of IDs (`"1,2,3"`).
///
/// Surrounding whitespace per token is tolerated; an empty or non-numeric
/// token is a 400.
pub fn parse_id_list(raw: &str) -> AppResult<Vec<DbId>> {
    raw.split(',')
        .map(|token| {
            token.trim().parse::<DbId>().map_err(|_| {
                AppError::BadRequest(format!("Invalid id '{}' in filter list", token.trim()))
            })
        })
        .collect()
}

/// Parse the `assigned_only` flag.
///
/// Absent means `false`. A present value must parse as an integer; `0` is
/// false and any other integer is true (matching the long-standing behavior
/// of the flag -- `assigned_only=2` is accepted and truthy).
pub fn parse_assigned_only(raw: Option<&str>) -> AppResult<bool> {
    match raw {
        None => Ok(false),
        Some(value) => {
            let n: i64 = value.trim().parse().map_err(|_| {
                AppError::BadRequest(format!("Invalid assigned_only value '{value}'"))
            })?;
            Ok(n != 0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_ids() {
        assert_eq!(parse_id_list("1,2,3").unwrap(), vec![1, 2, 3]);
        assert_eq!(parse_id_list("42").unwrap(), vec![42]);
        assert_eq!(parse_id_list(" 7 , 8 ").unwrap(), vec![7, 8]);
    }

    #[test]
    fn rejects_non_numeric_tokens() {
        assert!(parse_id_list("1,abc").is_err());
        assert!(parse_id_list("").is_err());
        assert!(parse_id_list("1,,2").is_err());
        assert!(parse_id_list("1.5").is_err());
    }

    #[test]
    fn assigned_only_absent_is_false() {
        assert!(!parse_assigned_only(None).unwrap());
    }

    #[test]
    fn assigned_only_zero_is_false() {
        assert!(!parse_assigned_only(Some("0")).unwrap());
    }

    #[test]
    fn assigned_only_any_nonzero_integer_is_true() {
        assert!(parse_assigned_only(Some("1")).unwrap());
        assert!(parse_assigned_only(Some("2")).unwrap());
        assert!(parse_assigned_only(Some("-1")).unwrap());
    }

    #[test]
    fn assigned_only_non_integer_is_rejected() {
        assert!(parse_assigned_only(Some("yes")).is_err());
        assert!(parse_assigned_only(Some("")).is_err());
    }
}
