//! Name normalization and table-driven classification

use crate::app::models::Region;
use crate::constants::{COUNTRY_ALIASES, COUNTRY_CODES, UNKNOWN_COUNTRY_CODE, regions};

/// Canonical name of a raw country label
///
/// Applies the alias table (ignoring ASCII case); labels without an alias are
/// used as-is (trimmed).
pub fn canonical_name(raw: &str) -> String {
    let trimmed = raw.trim();
    COUNTRY_ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(trimmed))
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

/// Code of a canonical name
///
/// Known countries use the fixed table; anything else falls back to its first
/// two letters uppercased, or `UN` when the name is shorter than that.
pub fn country_code(name: &str) -> String {
    if let Some((_, code)) = COUNTRY_CODES.iter().find(|(known, _)| *known == name) {
        return code.to_string();
    }

    let prefix: Vec<char> = name.chars().take(2).collect();
    if prefix.len() < 2 {
        return UNKNOWN_COUNTRY_CODE.to_string();
    }
    prefix.into_iter().flat_map(char::to_uppercase).collect()
}

/// Region of a canonical name, [`Region::Other`] when unlisted
pub fn classify_region(name: &str) -> Region {
    if regions::ASIA.contains(&name) {
        Region::Asia
    } else if regions::EUROPE.contains(&name) {
        Region::Europe
    } else if regions::AMERICAS.contains(&name) {
        Region::Americas
    } else if regions::AFRICA.contains(&name) {
        Region::Africa
    } else {
        Region::Other
    }
}
