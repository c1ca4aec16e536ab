//! HTTP request handlers organized by resource

pub mod genres;
pub mod movies;
pub mod system;

use std::str::FromStr;

use crate::errors::ValidationError;

/// Parses a path segment into an id; non-integers never reach the catalog.
pub(crate) fn parse_id<T: FromStr>(raw: &str) -> Result<T, ValidationError> {
    raw.parse().map_err(|_| ValidationError::InvalidId)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinedex_model::MovieID;

    #[test]
    fn ids_must_be_integers() {
        assert_eq!(parse_id::<MovieID>("5"), Ok(MovieID(5)));
        assert_eq!(
            parse_id::<MovieID>("five"),
            Err(ValidationError::InvalidId)
        );
        assert_eq!(
            parse_id::<MovieID>("99999999999"),
            Err(ValidationError::InvalidId)
        );
    }
}
