// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property-based tests using proptest.
//!
//! These tests check the variable-name mapping and value handling against
//! arbitrary flag names and values.

use envflag::adapters::{ErrorHandling, FlagSet, MapEnvironment};
use envflag::domain::{default_mapper, prefixed};
use envflag::{with_arguments, with_environment, with_flag_set};
use proptest::prelude::*;

// Test that mapped names never contain '-' or '.'
proptest! {
    #[test]
    fn test_mapper_removes_separators(name in "[a-z0-9.-]{1,32}") {
        let mapped = default_mapper(&name);
        prop_assert!(!mapped.contains('-'));
        prop_assert!(!mapped.contains('.'));
        prop_assert_eq!(mapped.len(), name.len());
    }
}

// Test that mapped ASCII names are uppercase
proptest! {
    #[test]
    fn test_mapper_uppercases(name in "[a-zA-Z_]{1,32}") {
        prop_assert_eq!(default_mapper(&name), name.to_uppercase());
    }
}

// Test that mapping is idempotent
proptest! {
    #[test]
    fn test_mapper_idempotent(name in "[ -~]{1,32}") {
        let once = default_mapper(&name);
        prop_assert_eq!(default_mapper(&once), once);
    }
}

// Test that a prefix is prepended to the inner mapping unchanged
proptest! {
    #[test]
    fn test_prefix_prepends(prefix in "[A-Z_]{0,8}", name in "[a-z-]{1,16}") {
        let mapper = prefixed(prefix.clone(), Box::new(default_mapper));
        prop_assert_eq!(mapper(&name), format!("{}{}", prefix, default_mapper(&name)));
    }
}

// Test that any string value reaches a string flag through the environment
proptest! {
    #[test]
    fn test_string_value_from_environment(value in "\\PC*") {
        let mut set = FlagSet::new("prop", ErrorHandling::ContinueOnError);
        set.set_output(std::io::sink());
        let flag = set.string("my-value", "default", "").unwrap();

        envflag::try_parse(vec![
            with_flag_set(&mut set),
            with_environment(MapEnvironment::from([("MY_VALUE", value.clone())])),
            with_arguments(Vec::<String>::new()),
        ])
        .unwrap();

        prop_assert_eq!(flag.get(), value);
    }
}

// Test that integers survive the environment unchanged
proptest! {
    #[test]
    fn test_int_value_from_environment(n in any::<i64>()) {
        let mut set = FlagSet::new("prop", ErrorHandling::ContinueOnError);
        set.set_output(std::io::sink());
        let flag = set.int("count", 0, "").unwrap();

        envflag::try_parse(vec![
            with_flag_set(&mut set),
            with_environment(MapEnvironment::from([("COUNT", n.to_string())])),
            with_arguments(Vec::<String>::new()),
        ])
        .unwrap();

        prop_assert_eq!(flag.get(), n);
    }
}
