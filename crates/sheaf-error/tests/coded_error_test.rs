//! Integration tests for coded errors against explicit catalogs.

use anyhow::Result;
use proptest::prelude::*;
use sheaf_common::test_utils::init_test_logging;
use sheaf_error::{Argument, Catalog, CodedError, Locale, MessageDefect};
use sheaf_i18n::FormatDefect;
use std::error::Error as _;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

const TEMPLATES: &str = r#"
sheaf-404 = resource { $arg0 } not found
sheaf-500 = failed: { $arg0 } / { $arg1 }
sheaf-202 = The page size { NUMBER($arg0) } is not a power of two.
sheaf-700 = [{ $arg0 }] at { $arg1 }
sheaf-701 = <{ NUMBER($arg0) }> at { NUMBER($arg1) }
"#;

fn catalog() -> Catalog {
    Catalog::builder("sheaf")
        .add_source(Locale::English, TEMPLATES)
        .build()
        .expect("test catalog builds")
}

/// A stand-in for an underlying failure reported by the storage layer.
#[derive(Debug)]
struct RuntimeCause(&'static str);

impl fmt::Display for RuntimeCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for RuntimeCause {}

#[test]
fn test_resource_not_found() {
    init_test_logging();
    let message = CodedError::new(404).add("widget").message_with(&catalog());
    assert_eq!(message, "resource widget not found");
}

#[test]
fn test_code_without_template() {
    assert_eq!(CodedError::new(999).message_with(&catalog()), "999");
}

#[test]
fn test_too_few_arguments_is_a_defect() {
    let error = CodedError::new(500).add("read");
    let defect: MessageDefect = error.try_message_with(&catalog()).unwrap_err();

    assert_eq!(defect.key(), "500");
    assert!(matches!(
        defect.defect(),
        FormatDefect::MissingArgument { position: 1, supplied: 1, .. }
    ));
}

#[test]
fn test_too_few_arguments_panics_when_read() {
    let catalog = catalog();
    let payload = panic::catch_unwind(AssertUnwindSafe(|| {
        CodedError::new(500).add("read").message_with(&catalog)
    }))
    .expect_err("reading the message panics");

    let defect = payload
        .downcast::<MessageDefect>()
        .expect("panic payload is the message defect");
    assert_eq!(defect.key(), "500");
    assert!(matches!(defect.defect(), FormatDefect::MissingArgument { position: 1, .. }));
}

#[test]
fn test_large_integers_are_exact() {
    let message = CodedError::new(700)
        .add(9_007_199_254_740_993i64)
        .add(i64::MIN)
        .message_with(&catalog());
    assert_eq!(message, "[9007199254740993] at -9223372036854775808");

    let message = CodedError::new(701)
        .add(u64::MAX)
        .add(9_007_199_254_740_993i64)
        .message_with(&catalog());
    assert_eq!(message, "<18446744073709551615> at 9007199254740993");
}

#[test]
fn test_type_mismatch_is_a_defect() {
    let error = CodedError::new(202).add("huge");
    let defect = error.try_message_with(&catalog()).unwrap_err();
    assert!(matches!(
        defect.defect(),
        FormatDefect::TypeMismatch { position: 0, expected: "number", found: "string", .. }
    ));

    let error = CodedError::new(202).add(1000u32);
    assert_eq!(
        error.message_with(&catalog()),
        "The page size 1000 is not a power of two."
    );
}

#[test]
fn test_cause_survives_message_reads() {
    let error = CodedError::with_cause(1, RuntimeCause("disk full"));

    assert_eq!(error.message_with(&catalog()), "1");
    assert_eq!(error.message_with(&catalog()), "1");

    let source = error.source().expect("cause is chained");
    assert_eq!(source.to_string(), "disk full");
    assert!(source.downcast_ref::<RuntimeCause>().is_some());
}

#[test]
fn test_message_is_not_cached() -> Result<()> {
    let error = CodedError::new(404).add("widget");
    assert_eq!(error.try_message_with(&catalog())?, "resource widget not found");

    let german = Catalog::builder("sheaf")
        .add_source(Locale::German, "sheaf-404 = Ressource { $arg0 } nicht gefunden")
        .locale(Locale::German)
        .build()?;
    assert_eq!(error.try_message_with(&german)?, "Ressource widget nicht gefunden");
    Ok(())
}

#[test]
fn test_arguments_keep_insertion_order() {
    let error = CodedError::new(500).add("first").add("second");
    assert_eq!(error.message_with(&catalog()), "failed: first / second");

    let error = CodedError::new(500).add("second").add("first");
    assert_eq!(error.message_with(&catalog()), "failed: second / first");
}

fn argument_strategy() -> impl Strategy<Value = Argument> {
    prop_oneof![
        "[a-z]{0,12}".prop_map(Argument::from),
        any::<i64>().prop_map(Argument::from),
        any::<u64>().prop_map(Argument::from),
        any::<bool>().prop_map(Argument::from),
    ]
}

fn numeric_strategy() -> impl Strategy<Value = Argument> {
    prop_oneof![
        any::<i64>().prop_map(Argument::from),
        any::<u64>().prop_map(Argument::from),
        (-1e15..1e15f64).prop_map(Argument::from),
    ]
}

fn any_argument_strategy() -> impl Strategy<Value = Argument> {
    prop_oneof![
        "[ -~]{0,12}".prop_map(Argument::from),
        numeric_strategy(),
        any::<bool>().prop_map(Argument::from),
        any::<char>().prop_map(Argument::from),
    ]
}

proptest! {
    #[test]
    fn prop_code_is_unaffected_by_arguments(
        code in any::<i32>(),
        args in prop::collection::vec(argument_strategy(), 0..8),
    ) {
        let mut error = CodedError::new(code);
        for arg in args {
            error.push(arg);
        }
        prop_assert_eq!(error.code(), code);
    }

    #[test]
    fn prop_absent_codes_format_as_decimal(
        code in any::<i32>().prop_filter("code has a template", |c| ![404, 500, 202, 700, 701].contains(c)),
        args in prop::collection::vec(argument_strategy(), 0..8),
    ) {
        let mut error = CodedError::new(code);
        for arg in args {
            error.push(arg);
        }
        prop_assert_eq!(error.message_with(&catalog()), code.to_string());
    }

    #[test]
    fn prop_add_chain_matches_sequential_push(
        x in argument_strategy(),
        y in argument_strategy(),
    ) {
        let chained = CodedError::new(1).add(x.clone()).add(y.clone());
        let mut sequential = CodedError::new(1);
        sequential.push(x.clone());
        sequential.push(y.clone());
        prop_assert_eq!(chained.arguments(), sequential.arguments());
        prop_assert_eq!(chained.arguments(), &[x, y][..]);
    }

    #[test]
    fn prop_template_substitutes_in_order(a in "[a-z]{1,10}", b in "[a-z]{1,10}") {
        let message = CodedError::new(500).add(a.clone()).add(b.clone()).message_with(&catalog());
        prop_assert_eq!(message, format!("failed: {a} / {b}"));
    }

    #[test]
    fn prop_every_argument_kind_substitutes_as_displayed(
        a in any_argument_strategy(),
        b in any_argument_strategy(),
    ) {
        let message = CodedError::new(700).add(a.clone()).add(b.clone()).message_with(&catalog());
        prop_assert_eq!(message, format!("[{a}] at {b}"));
    }

    #[test]
    fn prop_numbers_substitute_as_displayed(a in numeric_strategy(), b in numeric_strategy()) {
        let message = CodedError::new(701).add(a.clone()).add(b.clone()).message_with(&catalog());
        prop_assert_eq!(message, format!("<{a}> at {b}"));
    }
}
