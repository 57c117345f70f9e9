//! Property-based tests for diagnostics_logger using proptest

use diagnostics_logger::prelude::*;
use diagnostics_logger::{format_duration_ms, resolve_template};
use proptest::prelude::*;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop::sample::select(LogLevel::ALL.to_vec())
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// Test that LogLevel string conversions roundtrip correctly
    #[test]
    fn test_log_level_str_roundtrip(level in any_level()) {
        let parsed: LogLevel = level.to_str().parse().unwrap();
        prop_assert_eq!(level, parsed);
        prop_assert_eq!(LogLevel::from_name(level.name()).unwrap(), level);
        prop_assert_eq!(LogLevel::from_name(level.as_lower()).unwrap(), level);
    }

    /// Test that ordering follows the numeric weights
    #[test]
    fn test_log_level_ordering(level1 in any_level(), level2 in any_level()) {
        prop_assert_eq!(level1 <= level2, level1.value() <= level2.value());
        prop_assert_eq!(level1 < level2, level1.value() < level2.value());
    }

    /// Test that weights roundtrip through TryFrom
    #[test]
    fn test_log_level_value_roundtrip(level in any_level()) {
        prop_assert_eq!(LogLevel::try_from(level.value()).unwrap(), level);
        prop_assert_eq!(level.is_error_or_worse(), level.value() >= 400);
    }

    /// Test that names outside the eight canonical ones are rejected
    #[test]
    fn test_log_level_rejects_unknown(name in "[a-z]{1,10}") {
        let known = LogLevel::ALL.iter().any(|l| l.as_lower() == name);
        prop_assert_eq!(LogLevel::from_name(&name).is_ok(), known);
    }
}

// ============================================================================
// Template Tests
// ============================================================================

proptest! {
    /// Templates without tags resolve to themselves
    #[test]
    fn test_template_without_tags_is_unchanged(
        template in "[^{}]{0,64}",
        value in "[a-z]{0,8}",
    ) {
        let ctx = LogContext::new().with_field("key", value);
        prop_assert_eq!(resolve_template(&template, &ctx, ResolveOptions::PLAIN), template);
    }

    /// Unknown placeholders stay literal
    #[test]
    fn test_unknown_placeholder_stays_literal(key in "[a-z]{1,12}") {
        let ctx = LogContext::new().with_field("other_key_", "x");
        let template = format!("before {{{}}} after", key);
        prop_assert_eq!(resolve_template(&template, &ctx, ResolveOptions::PLAIN), template);
    }

    /// A known placeholder is replaced by the value, never rescanned
    #[test]
    fn test_placeholder_substitution(key in "[a-z]{1,12}", value in "[ -~]{0,24}") {
        let ctx = LogContext::new().with_field(key.clone(), value.clone());
        let template = format!("<{{{}}}>", key);
        prop_assert_eq!(
            resolve_template(&template, &ctx, ResolveOptions::PLAIN),
            format!("<{}>", value)
        );
    }

    /// Integer values coerce to their decimal form
    #[test]
    fn test_integer_coercion(n in any::<i64>()) {
        let ctx = LogContext::new().with_field("n", n);
        prop_assert_eq!(
            resolve_template("n={n}", &ctx, ResolveOptions::PLAIN),
            format!("n={}", n)
        );
    }
}

// ============================================================================
// Precision Formatting Tests
// ============================================================================

proptest! {
    /// Formatted durations parse back to roughly the same milliseconds
    #[test]
    fn test_duration_format_parses(nanos in 1u64..10_000_000_000) {
        let formatted = format_duration_ms(Some(nanos)).unwrap();
        prop_assert!(formatted.ends_with("ms"));

        let millis: f64 = formatted.trim_end_matches("ms").parse().unwrap();
        let expected = nanos as f64 / 1_000_000.0;
        prop_assert!((millis - expected).abs() <= 0.005 + expected * 1e-9);
    }

    /// Sub-millisecond durations use at most four decimals
    #[test]
    fn test_sub_millisecond_decimals_capped(nanos in 1u64..1_000_000) {
        let formatted = format_duration_ms(Some(nanos)).unwrap();
        let number = formatted.trim_end_matches("ms");
        let decimals = number.split('.').nth(1).map_or(0, str::len);
        prop_assert!((2..=4).contains(&decimals), "{} has {} decimals", formatted, decimals);
    }

    /// Sub-millisecond durations of 100ns or more never collapse to zero
    #[test]
    fn test_sub_millisecond_is_nonzero(nanos in 100u64..1_000_000) {
        let formatted = format_duration_ms(Some(nanos)).unwrap();
        let millis: f64 = formatted.trim_end_matches("ms").parse().unwrap();
        prop_assert!(millis > 0.0);
    }
}

// ============================================================================
// Buffer Tests
// ============================================================================

proptest! {
    /// Draining returns entries in the order they were logged
    #[test]
    fn test_drain_preserves_order(messages in prop::collection::vec("[a-z]{1,16}", 0..32)) {
        let logger = Logger::new();
        for message in &messages {
            logger.info(message.as_str());
        }

        let drained: Vec<String> = logger.drain().into_iter().map(|e| e.message).collect();
        prop_assert_eq!(drained, messages);
        prop_assert!(logger.is_empty());
    }

    /// Importing appends the source after the destination
    #[test]
    fn test_import_concatenates(
        own in prop::collection::vec("[a-z]{1,8}", 0..8),
        other in prop::collection::vec("[a-z]{1,8}", 0..8),
    ) {
        let logger = Logger::new();
        let source = Logger::new();
        for m in &own {
            logger.debug(m.as_str());
        }
        for m in &other {
            source.debug(m.as_str());
        }

        logger.import(&mut source.clone());

        let expected: Vec<String> = own.iter().chain(other.iter()).cloned().collect();
        prop_assert_eq!(logger.messages(ResolveOptions::PLAIN), expected);
        prop_assert_eq!(source.count(), 0);
    }
}
