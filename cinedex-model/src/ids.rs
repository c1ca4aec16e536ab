use std::fmt;
use std::str::FromStr;

macro_rules! serial_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash,
        )]
        #[cfg_attr(
            feature = "serde",
            derive(serde::Serialize, serde::Deserialize)
        )]
        #[cfg_attr(feature = "sqlx", derive(sqlx::Type), sqlx(transparent))]
        pub struct $name(pub i32);

        impl $name {
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i32>().map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

serial_id!(
    /// Primary key of a row in `movies`.
    MovieID
);

serial_id!(
    /// Primary key of a row in `genres`.
    GenreID
);

serial_id!(
    /// Primary key of a row in the `movies_genres` association table.
    ///
    /// Only ever surfaces as the key of [`crate::Movie::genres`].
    MovieGenreID
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_parse_from_path_segments() {
        assert_eq!("42".parse::<MovieID>(), Ok(MovieID(42)));
        assert_eq!(" 7 ".parse::<GenreID>(), Ok(GenreID(7)));
        assert!("abc".parse::<MovieID>().is_err());
        assert!("4.2".parse::<GenreID>().is_err());
    }

    #[test]
    fn ids_display_as_bare_integers() {
        assert_eq!(MovieGenreID::new(13).to_string(), "13");
        assert_eq!(i32::from(GenreID::from(9)), 9);
    }

    #[test]
    fn default_ids_are_zero() {
        assert_eq!(MovieID::default().get(), 0);
        assert_eq!(GenreID::default(), GenreID(0));
        assert_eq!(MovieGenreID::default(), MovieGenreID(0));
        assert_eq!(crate::Movie::default().id, MovieID(0));
    }
}
