// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for value precedence: defaults, then environment, then arguments.

mod common;

use common::{test_flag_set, EnvGuard};
use envflag::prelude::*;

#[test]
fn test_default_when_nothing_set() {
    let (mut set, _) = test_flag_set();
    let port = set.uint("port", 8080, "").unwrap();

    envflag::try_parse(vec![
        with_flag_set(&mut set),
        with_environment(MapEnvironment::new()),
        with_arguments(Vec::<String>::new()),
    ])
    .unwrap();

    assert_eq!(port.get(), 8080);
    assert!(!set.is_set("port"));
}

#[test]
fn test_environment_over_default() {
    let (mut set, _) = test_flag_set();
    let port = set.uint("port", 8080, "").unwrap();

    envflag::try_parse(vec![
        with_flag_set(&mut set),
        with_environment(MapEnvironment::from([("PORT", "9090")])),
        with_arguments(Vec::<String>::new()),
    ])
    .unwrap();

    assert_eq!(port.get(), 9090);
    assert!(set.is_set("port"));
}

#[test]
fn test_arguments_over_environment() {
    let (mut set, _) = test_flag_set();
    let port = set.uint("port", 8080, "").unwrap();

    envflag::try_parse(vec![
        with_flag_set(&mut set),
        with_environment(MapEnvironment::from([("PORT", "9090")])),
        with_arguments(["-port=7070"]),
    ])
    .unwrap();

    assert_eq!(port.get(), 7070);
}

#[test]
fn test_bool_argument_over_environment() {
    let (mut set, _) = test_flag_set();
    let debug = set.bool("debug", false, "").unwrap();

    envflag::try_parse(vec![
        with_flag_set(&mut set),
        with_environment(MapEnvironment::from([("DEBUG", "1")])),
        with_arguments(["-debug=false"]),
    ])
    .unwrap();

    assert!(!debug.get());
}

#[test]
fn test_empty_environment_value_is_applied() {
    let (mut set, _) = test_flag_set();
    let name = set.string("name", "default", "").unwrap();

    envflag::try_parse(vec![
        with_flag_set(&mut set),
        with_environment(MapEnvironment::from([("NAME", "")])),
        with_arguments(Vec::<String>::new()),
    ])
    .unwrap();

    assert_eq!(name.get(), "");
    assert!(set.is_set("name"));
}

#[test]
fn test_prefixed_variable_only() {
    let (mut set, _) = test_flag_set();
    let level = set.string("log-level", "info", "").unwrap();

    envflag::try_parse(vec![
        with_flag_set(&mut set),
        with_prefix("SVC_"),
        with_environment(MapEnvironment::from([("LOG_LEVEL", "trace")])),
        with_arguments(Vec::<String>::new()),
    ])
    .unwrap();

    assert_eq!(level.get(), "info");
}

#[test]
fn test_process_environment_precedence() {
    let mut guard = EnvGuard::new();
    guard.set("ENVFLAG_PRECEDENCE_TEST_HOST", "env-host");
    guard.set("ENVFLAG_PRECEDENCE_TEST_USER", "env-user");

    let (mut set, _) = test_flag_set();
    let host = set.string("host", "localhost", "").unwrap();
    let user = set.string("user", "nobody", "").unwrap();
    let group = set.string("group", "staff", "").unwrap();

    envflag::try_parse(vec![
        with_flag_set(&mut set),
        with_prefix("ENVFLAG_PRECEDENCE_TEST_"),
        with_arguments(["-user", "arg-user"]),
    ])
    .unwrap();

    assert_eq!(host.get(), "env-host");
    assert_eq!(user.get(), "arg-user");
    assert_eq!(group.get(), "staff");
}

#[test]
fn test_environment_int_base_prefixes() {
    let (mut set, _) = test_flag_set();
    let mask = set.uint("mask", 0, "").unwrap();
    let limit = set.int("limit", 0, "").unwrap();

    envflag::try_parse(vec![
        with_flag_set(&mut set),
        with_environment(MapEnvironment::from([("MASK", "0x10"), ("LIMIT", "1_000")])),
        with_arguments(["-limit=0o17"]),
    ])
    .unwrap();

    assert_eq!(mask.get(), 16);
    assert_eq!(limit.get(), 15);
}
