//! Query-string mirror of the filter state.
//!
//! A shared link reproduces the same filtered view. The mode is part of the
//! route, not the query string, so it is supplied by the caller on decode.
//!
//! | key | value |
//! |---|---|
//! | `q` | percent-encoded free text |
//! | `types` | comma-separated type keys |
//! | `open_now` | `1` when set |

use crate::mode::MapMode;
use crate::provider::ProviderType;

use super::criteria::FilterSet;

const KEY_QUERY: &str = "q";
const KEY_TYPES: &str = "types";
const KEY_OPEN_NOW: &str = "open_now";

impl FilterSet {
    /// Encode the user-controlled filters as a query string (without `?`).
    ///
    /// Empty filters produce an empty string. Types are written in canonical
    /// order so equal filter sets always encode identically.
    ///
    /// ```
    /// use medmap::filter::FilterSet;
    /// use medmap::provider::ProviderType;
    ///
    /// let filters = FilterSet::default()
    ///     .with_query("dr. amine")
    ///     .with_types([ProviderType::Pharmacy, ProviderType::Doctor])
    ///     .with_open_now(true);
    /// assert_eq!(filters.to_query_string(), "q=dr.%20amine&types=doctor,pharmacy&open_now=1");
    /// ```
    pub fn to_query_string(&self) -> String {
        let mut pairs: Vec<String> = Vec::with_capacity(3);

        let query = self.query.trim();
        if !query.is_empty() {
            pairs.push(format!("{}={}", KEY_QUERY, urlencoding::encode(query)));
        }
        if !self.types.is_empty() {
            let types: Vec<&str> = self.types.iter().map(|t| t.as_str()).collect();
            pairs.push(format!("{}={}", KEY_TYPES, types.join(",")));
        }
        if self.open_now {
            pairs.push(format!("{}=1", KEY_OPEN_NOW));
        }

        pairs.join("&")
    }

    /// Decode filters from a query string for the given mode.
    ///
    /// Decoding is lenient: a leading `?` is accepted, unknown keys and
    /// unknown type names are skipped, and malformed escapes fall back to
    /// the raw text.
    pub fn from_query_string(mode: MapMode, query_string: &str) -> Self {
        let mut filters = FilterSet::new(mode);
        let trimmed = query_string.trim().trim_start_matches('?');

        for pair in trimmed.split('&').filter(|p| !p.is_empty()) {
            let (key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = decode_component(raw_value);

            match key {
                KEY_QUERY => filters.query = value.trim().to_string(),
                KEY_TYPES => {
                    for name in value.split(',').map(str::trim).filter(|n| !n.is_empty()) {
                        match name.parse::<ProviderType>() {
                            Ok(t) => {
                                filters.types.insert(t);
                            }
                            Err(_) => {
                                tracing::debug!(type_name = name, "Ignoring unknown provider type in query string");
                            }
                        }
                    }
                }
                KEY_OPEN_NOW => {
                    filters.open_now = matches!(value.as_str(), "1" | "true" | "yes");
                }
                other => {
                    tracing::debug!(key = other, "Ignoring unknown query string key");
                }
            }
        }

        filters
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}
