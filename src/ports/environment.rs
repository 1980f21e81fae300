// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment lookup trait definition.

/// Read-only lookup of environment variables by exact name.
///
/// Absence is not an error; it simply means no override applies.
///
/// # Examples
///
/// ```rust
/// use envflag::ports::Environment;
///
/// struct Fixed;
///
/// impl Environment for Fixed {
///     fn lookup(&self, name: &str) -> Option<String> {
///         (name == "MY_FLAG").then(|| "on".to_string())
///     }
/// }
///
/// assert_eq!(Fixed.lookup("MY_FLAG").as_deref(), Some("on"));
/// assert_eq!(Fixed.lookup("OTHER"), None);
/// ```
pub trait Environment {
    /// Returns the value of the variable called `name`, if it is set.
    fn lookup(&self, name: &str) -> Option<String>;
}

impl<E: Environment + ?Sized> Environment for &E {
    fn lookup(&self, name: &str) -> Option<String> {
        (**self).lookup(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Single(&'static str, &'static str);

    impl Environment for Single {
        fn lookup(&self, name: &str) -> Option<String> {
            (name == self.0).then(|| self.1.to_string())
        }
    }

    #[test]
    fn test_lookup_present() {
        let env = Single("A", "1");
        assert_eq!(env.lookup("A").as_deref(), Some("1"));
    }

    #[test]
    fn test_lookup_absent() {
        let env = Single("A", "1");
        assert_eq!(env.lookup("B"), None);
    }

    #[test]
    fn test_lookup_through_reference() {
        let env = Single("A", "1");
        let by_ref: &dyn Environment = &env;
        assert_eq!((&by_ref).lookup("A").as_deref(), Some("1"));
    }
}
