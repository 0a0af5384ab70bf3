//! Computation requests and input validation.
//!
//! A [`ComputationRequest`] is the de-duplicated set of at least two codes
//! that identifies one computation. [`validate_codes`] is the collaborator
//! that turns raw caller input into a request, resolving every code against
//! a [`GeoPointStore`] before the engine sees it.

use crate::geo::GeoPointStore;
use crate::pairs::total_pairs;
use std::collections::HashSet;
use thiserror::Error;

/// Default cap on the number of codes in one request.
pub const DEFAULT_MAX_CODES: usize = 250;

/// Input errors detected before a computation starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Fewer than two distinct codes
    #[error("At least 2 distinct location codes are required, got {count}")]
    TooFewCodes { count: usize },

    /// More codes than the configured maximum
    #[error("Too many location codes: {count} (maximum {max})")]
    TooManyCodes { count: usize, max: usize },

    /// Codes the store cannot resolve
    #[error("Unknown country code(s): {}", .0.join(", "))]
    UnknownCodes(Vec<String>),

    /// A blank code in the input
    #[error("Location codes must not be empty")]
    EmptyCode,
}

/// The canonical, de-duplicated code list for one computation.
///
/// Codes are trimmed and upper-cased; duplicates are dropped keeping the
/// first occurrence, so pair order follows the caller's order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputationRequest {
    codes: Vec<String>,
}

impl ComputationRequest {
    /// Normalize codes into a request without consulting a store.
    pub fn new<I, S>(codes: I) -> Result<Self, InputError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut normalized = Vec::new();

        for code in codes {
            let code = code.as_ref().trim().to_uppercase();
            if code.is_empty() {
                return Err(InputError::EmptyCode);
            }
            if seen.insert(code.clone()) {
                normalized.push(code);
            }
        }

        if normalized.len() < 2 {
            return Err(InputError::TooFewCodes {
                count: normalized.len(),
            });
        }

        Ok(Self { codes: normalized })
    }

    /// Codes in pair-generation order.
    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    /// Number of codes.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Always false; a request holds at least two codes.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Number of pairs this request produces.
    pub fn total_pairs(&self) -> usize {
        total_pairs(self.codes.len())
    }

    /// Codes sorted lexicographically, independent of input order.
    pub fn canonical_codes(&self) -> Vec<&str> {
        let mut sorted: Vec<&str> = self.codes.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        sorted
    }
}

/// Validate raw caller input against a store.
///
/// Checks, in order: blank codes, the two-code minimum, the `max_codes`
/// cap, then resolvability. Every unknown code is reported at once.
pub fn validate_codes<S: AsRef<str>>(
    store: &dyn GeoPointStore,
    codes: &[S],
    max_codes: usize,
) -> Result<ComputationRequest, InputError> {
    let request = ComputationRequest::new(codes)?;

    if request.len() > max_codes {
        return Err(InputError::TooManyCodes {
            count: request.len(),
            max: max_codes,
        });
    }

    let unknown: Vec<String> = request
        .codes()
        .iter()
        .filter(|code| !store.contains(code))
        .cloned()
        .collect();
    if !unknown.is_empty() {
        return Err(InputError::UnknownCodes(unknown));
    }

    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{GeoPoint, InMemoryPointStore};

    fn store() -> InMemoryPointStore {
        InMemoryPointStore::from_points(vec![
            GeoPoint::new("US", "United States", "Washington", 38.9072, -77.0369),
            GeoPoint::new("CA", "Canada", "Ottawa", 45.4215, -75.6972),
            GeoPoint::new("MX", "Mexico", "Mexico City", 19.4326, -99.1332),
        ])
        .unwrap()
    }

    #[test]
    fn test_normalizes_and_dedups() {
        let request = ComputationRequest::new(["us", " CA", "US", "mx"]).unwrap();
        assert_eq!(request.codes(), &["US", "CA", "MX"]);
        assert_eq!(request.total_pairs(), 3);
    }

    #[test]
    fn test_canonical_codes_are_sorted() {
        let request = ComputationRequest::new(["US", "CA", "MX"]).unwrap();
        assert_eq!(request.canonical_codes(), vec!["CA", "MX", "US"]);
    }

    #[test]
    fn test_too_few_after_dedup() {
        let err = ComputationRequest::new(["US", "us"]).unwrap_err();
        assert_eq!(err, InputError::TooFewCodes { count: 1 });
    }

    #[test]
    fn test_empty_code() {
        let err = ComputationRequest::new(["US", " "]).unwrap_err();
        assert_eq!(err, InputError::EmptyCode);
    }

    #[test]
    fn test_validate_ok() {
        let request = validate_codes(&store(), &["US", "CA", "MX"], 10).unwrap();
        assert_eq!(request.len(), 3);
    }

    #[test]
    fn test_validate_unknown_code() {
        let err = validate_codes(&store(), &["US", "ZZ"], 10).unwrap_err();
        assert_eq!(err, InputError::UnknownCodes(vec!["ZZ".to_string()]));
        assert!(err.to_string().contains("ZZ"));
    }

    #[test]
    fn test_validate_reports_all_unknown() {
        let err = validate_codes(&store(), &["QQ", "US", "ZZ"], 10).unwrap_err();
        assert_eq!(
            err,
            InputError::UnknownCodes(vec!["QQ".to_string(), "ZZ".to_string()])
        );
    }

    #[test]
    fn test_validate_too_many() {
        let err = validate_codes(&store(), &["US", "CA", "MX"], 2).unwrap_err();
        assert_eq!(err, InputError::TooManyCodes { count: 3, max: 2 });
    }
}
