// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mapping from flag names to environment variable names.
//!
//! A mapper is a plain function value so it can be composed: a prefix wraps
//! whatever mapper is current at the time it is applied.

/// A function deriving an environment variable name from a flag name.
pub type Mapper<'a> = Box<dyn Fn(&str) -> String + 'a>;

/// Maps a flag name by uppercasing it and replacing dashes and periods with
/// underscores.
///
/// # Examples
///
/// ```
/// use envflag::domain::mapper::default_mapper;
///
/// assert_eq!(default_mapper("my-string"), "MY_STRING");
/// assert_eq!(default_mapper("my.flag"), "MY_FLAG");
/// ```
pub fn default_mapper(flag_name: &str) -> String {
    flag_name.to_uppercase().replace(&['-', '.'][..], "_")
}

/// Wraps `inner` so its output is preceded by `prefix`.
///
/// # Examples
///
/// ```
/// use envflag::domain::mapper::{default_mapper, prefixed};
///
/// let mapper = prefixed("PREFIX_", Box::new(default_mapper));
/// assert_eq!(mapper("my-string"), "PREFIX_MY_STRING");
/// ```
pub fn prefixed<'a>(prefix: impl Into<String>, inner: Mapper<'a>) -> Mapper<'a> {
    let prefix = prefix.into();
    Box::new(move |flag_name: &str| format!("{}{}", prefix, inner(flag_name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mapper_dashes() {
        assert_eq!(default_mapper("my-string"), "MY_STRING");
    }

    #[test]
    fn test_default_mapper_periods() {
        assert_eq!(default_mapper("my.flag"), "MY_FLAG");
    }

    #[test]
    fn test_default_mapper_mixed() {
        assert_eq!(
            default_mapper("test-flag-plz-ignore"),
            "TEST_FLAG_PLZ_IGNORE"
        );
        assert_eq!(default_mapper("db.max-conns"), "DB_MAX_CONNS");
    }

    #[test]
    fn test_default_mapper_keeps_underscores() {
        assert_eq!(default_mapper("already_snake"), "ALREADY_SNAKE");
    }

    #[test]
    fn test_prefixed() {
        let mapper = prefixed("PREFIX_", Box::new(default_mapper));
        assert_eq!(mapper("my-string"), "PREFIX_MY_STRING");
    }

    #[test]
    fn test_prefixed_nests_outermost_first() {
        let mapper = prefixed("OUTER_", prefixed("INNER_", Box::new(default_mapper)));
        assert_eq!(mapper("my-flag"), "OUTER_INNER_MY_FLAG");
    }

    #[test]
    fn test_prefixed_custom_inner() {
        let mapper = prefixed("APP_", Box::new(|name: &str| name.to_string()));
        assert_eq!(mapper("raw-name"), "APP_raw-name");
    }
}
