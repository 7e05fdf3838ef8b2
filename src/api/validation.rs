use std::collections::BTreeSet;

use super::{ApiError, SearchParams};
use crate::domain::search::FuzzyQuery;
use crate::domain::{ColorCode, Page, Rarity, SearchQuery, SortKey, SortOrder};

const BINDER_NAME_MAX: usize = 64;
const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 32;
const PASSWORD_MIN: usize = 8;

/// Empty or whitespace-only strings count as absent.
fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

pub fn parse_page(raw: Option<&str>) -> Result<Page, ApiError> {
    let Some(raw) = non_empty(raw) else {
        return Ok(Page::FIRST);
    };

    let page: i64 = raw.parse().map_err(|_| {
        ApiError::validation(format!("Invalid page: {raw}. Page must be an integer"))
    })?;

    Ok(Page::new(page)?)
}

/// Parses a comma-separated color list such as `W,U`. Blank items are skipped.
pub fn parse_colors(raw: Option<&str>) -> Result<BTreeSet<ColorCode>, ApiError> {
    let Some(raw) = non_empty(raw) else {
        return Ok(BTreeSet::new());
    };

    raw.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(|c| c.parse::<ColorCode>().map_err(ApiError::from))
        .collect()
}

/// Turns raw search parameters into a [`SearchQuery`]. Unknown rarities,
/// colors, sort keys or directions and pages below 1 are rejected.
pub fn parse_search_params(params: &SearchParams) -> Result<SearchQuery, ApiError> {
    let rarity = non_empty(params.rarity.as_deref())
        .map(str::parse::<Rarity>)
        .transpose()?;

    let sort = non_empty(params.order_by.as_deref())
        .map(str::parse::<SortKey>)
        .transpose()?
        .unwrap_or_default();

    let order = non_empty(params.order_dir.as_deref())
        .map(str::parse::<SortOrder>)
        .transpose()?
        .unwrap_or_default();

    Ok(SearchQuery {
        text: non_empty(params.query.as_deref()).map(str::to_string),
        rarity,
        set_code: non_empty(params.set_code.as_deref()).map(str::to_lowercase),
        colors: parse_colors(params.colors.as_deref())?,
        sort,
        order,
        page: parse_page(params.page.as_deref())?,
    })
}

pub fn validate_fuzzy_query(raw: &str) -> Result<FuzzyQuery, ApiError> {
    Ok(FuzzyQuery::new(raw)?)
}

pub fn validate_id(id: i32, resource: &str) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid {resource} ID: {id}. ID must be a positive integer"
        )));
    }
    Ok(id)
}

pub fn validate_printing_id(id: &str) -> Result<&str, ApiError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("printing_id cannot be empty"));
    }
    Ok(trimmed)
}

pub fn validate_binder_name(name: &str) -> Result<String, ApiError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Binder name cannot be empty"));
    }

    if trimmed.chars().count() > BINDER_NAME_MAX {
        return Err(ApiError::validation(format!(
            "Binder name must be {BINDER_NAME_MAX} characters or less"
        )));
    }

    Ok(trimmed.to_string())
}

pub fn validate_quantity(quantity: i32, min: i32) -> Result<i32, ApiError> {
    if quantity < min {
        return Err(ApiError::validation(format!(
            "Invalid quantity: {quantity}. Quantity must be at least {min}"
        )));
    }
    Ok(quantity)
}

pub fn validate_price_cents(price_cents: i64) -> Result<i64, ApiError> {
    if price_cents <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid price: {price_cents}. Price must be greater than 0"
        )));
    }
    Ok(price_cents)
}

pub fn validate_username(username: &str) -> Result<&str, ApiError> {
    let len = username.chars().count();
    if !(USERNAME_MIN..=USERNAME_MAX).contains(&len) {
        return Err(ApiError::validation(format!(
            "Username must be between {USERNAME_MIN} and {USERNAME_MAX} characters"
        )));
    }

    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ApiError::validation(
            "Username can only contain letters, numbers, hyphens, and underscores",
        ));
    }

    Ok(username)
}

pub fn validate_password(password: &str) -> Result<&str, ApiError> {
    if password.chars().count() < PASSWORD_MIN {
        return Err(ApiError::validation(format!(
            "Password must be at least {PASSWORD_MIN} characters"
        )));
    }
    Ok(password)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> SearchParams {
        let mut params = SearchParams::default();
        for (key, value) in pairs {
            let value = Some((*value).to_string());
            match *key {
                "query" => params.query = value,
                "rarity" => params.rarity = value,
                "set_code" => params.set_code = value,
                "colors" => params.colors = value,
                "orderBy" => params.order_by = value,
                "orderDir" => params.order_dir = value,
                "page" => params.page = value,
                other => panic!("unknown param {other}"),
            }
        }
        params
    }

    #[test]
    fn test_defaults() {
        let query = parse_search_params(&SearchParams::default()).unwrap();
        assert_eq!(query, SearchQuery::default());
        assert_eq!(query.page, Page::FIRST);
        assert_eq!(query.sort, SortKey::Name);
        assert_eq!(query.order, SortOrder::Ascending);
    }

    #[test]
    fn test_full_params() {
        let query = parse_search_params(&params(&[
            ("query", " Bolt "),
            ("rarity", "mythic"),
            ("set_code", "LEA"),
            ("colors", "R, G"),
            ("orderBy", "price"),
            ("orderDir", "DESC"),
            ("page", "2"),
        ]))
        .unwrap();

        assert_eq!(query.text.as_deref(), Some("Bolt"));
        assert_eq!(query.rarity, Some(Rarity::Mythic));
        assert_eq!(query.set_code.as_deref(), Some("lea"));
        assert_eq!(
            query.colors,
            [ColorCode::Red, ColorCode::Green].into_iter().collect()
        );
        assert_eq!(query.sort, SortKey::Price);
        assert_eq!(query.order, SortOrder::Descending);
        assert_eq!(query.page.value(), 2);
    }

    #[test]
    fn test_empty_values_are_absent() {
        let query = parse_search_params(&params(&[
            ("query", "   "),
            ("rarity", ""),
            ("colors", ""),
            ("page", ""),
        ]))
        .unwrap();
        assert_eq!(query, SearchQuery::default());
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(parse_search_params(&params(&[("orderBy", "oracle_text")])).is_err());
        assert!(parse_search_params(&params(&[("orderDir", "up")])).is_err());
        assert!(parse_search_params(&params(&[("rarity", "legendary")])).is_err());
        assert!(parse_search_params(&params(&[("colors", "W,X")])).is_err());
        assert!(parse_search_params(&params(&[("page", "0")])).is_err());
        assert!(parse_search_params(&params(&[("page", "-1")])).is_err());
        assert!(parse_search_params(&params(&[("page", "two")])).is_err());
        assert!(parse_search_params(&params(&[("page", "9223372036854775807")])).is_err());
        assert!(parse_search_params(&params(&[("orderDir", "desc")])).is_err());
    }

    #[test]
    fn test_validate_fuzzy_query() {
        assert!(validate_fuzzy_query("bol").is_ok());
        assert!(validate_fuzzy_query("bo").is_err());
        assert!(validate_fuzzy_query("   ").is_err());
    }

    #[test]
    fn test_validate_binder_name() {
        assert_eq!(validate_binder_name("  Trade Binder ").unwrap(), "Trade Binder");
        assert!(validate_binder_name("").is_err());
        assert!(validate_binder_name(&"a".repeat(65)).is_err());
        assert!(validate_binder_name(&"a".repeat(64)).is_ok());
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("collector_01").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username(&"a".repeat(33)).is_err());
        assert!(validate_username("bad name").is_err());
    }

    #[test]
    fn test_validate_password_and_amounts() {
        assert!(validate_password("longenough").is_ok());
        assert!(validate_password("short").is_err());
        assert!(validate_quantity(1, 1).is_ok());
        assert!(validate_quantity(0, 1).is_err());
        assert!(validate_quantity(0, 0).is_ok());
        assert!(validate_price_cents(1).is_ok());
        assert!(validate_price_cents(0).is_err());
        assert!(validate_id(0, "binder").is_err());
    }
}
