//! Random identifier generation.
//!
//! Ids are short alphanumeric tokens. They are lookup keys, not secrets: the
//! generator makes no uniqueness or unpredictability promises, and inserts
//! retry on the rare collision instead.

use rand::{Rng, distr::Alphanumeric};

/// Length of user and url record ids.
pub const ID_LENGTH: usize = 6;

/// Length of visitor tracking ids.
pub const TRACKING_ID_LENGTH: usize = 16;

/// Generates an alphanumeric token of the given length.
pub fn generate_token(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Generates a record id for the `users` or `urls` collection.
///
/// # Examples
///
/// ```ignore
/// let id = generate_id();
/// assert_eq!(id.len(), 6);
/// assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_id() -> String {
    generate_token(ID_LENGTH)
}

/// Generates a visitor tracking id.
pub fn generate_tracking_id() -> String {
    generate_token(TRACKING_ID_LENGTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_id_has_correct_length() {
        assert_eq!(generate_id().len(), ID_LENGTH);
    }

    #[test]
    fn test_generate_id_is_alphanumeric() {
        for _ in 0..100 {
            assert!(generate_id().chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_generate_tracking_id_length() {
        assert_eq!(generate_tracking_id().len(), TRACKING_ID_LENGTH);
    }

    #[test]
    fn test_generate_tracking_id_mostly_unique() {
        let ids: HashSet<String> = (0..1000).map(|_| generate_tracking_id()).collect();
        assert_eq!(ids.len(), 1000);
    }
}
