use super::*;

// =============================================================================
// VALUE ENUM ROUND-TRIPS
// =============================================================================

macro_rules! test_enum_completeness {
    ($enum_type:ty, $test_name:ident) => {
        #[test]
        fn $test_name() {
            // Test all variants are constructible and round-trip correctly
            for variant in <$enum_type>::value_variants() {
                let debug_str = format!("{:?}", variant);
                assert!(!debug_str.is_empty(), "Debug output should not be empty");

                let possible_value = variant.to_possible_value();
                assert!(
                    possible_value.is_some(),
                    "PossibleValue should exist for all variants"
                );

                let possible_val = possible_value.unwrap();
                let primary_name = possible_val.get_name();
                let parsed: Result<$enum_type, _> = primary_name.parse();
                assert!(
                    parsed.is_ok(),
                    "Primary name '{}' should parse correctly",
                    primary_name
                );
                assert_eq!(
                    parsed.unwrap(),
                    *variant,
                    "Round-trip should preserve variant"
                );
            }
        }
    };
}

macro_rules! test_fromstr_aliases {
    ($enum_type:ty, $test_name:ident, $expected_mappings:expr) => {
        #[test]
        fn $test_name() {
            let mappings: &[(&str, $enum_type)] = &$expected_mappings;

            for (input, expected) in mappings {
                let parsed: Result<$enum_type, _> = input.parse();
                assert!(
                    parsed.is_ok(),
                    "Failed to parse '{}' for {}",
                    input,
                    stringify!($enum_type)
                );
                assert_eq!(
                    parsed.unwrap(),
                    *expected,
                    "Wrong variant for input '{}', expected {:?}",
                    input,
                    expected
                );
            }
        }
    };
}

test_enum_completeness!(LogLevel, test_log_level_completeness);
test_enum_completeness!(LogFormat, test_log_format_completeness);
test_enum_completeness!(LogOutput, test_log_output_completeness);
test_enum_completeness!(ColorMode, test_color_mode_completeness);

test_fromstr_aliases!(
    LogLevel,
    test_log_level_aliases,
    [
        ("error", LogLevel::Error),
        ("err", LogLevel::Error),
        ("fatal", LogLevel::Error),
        ("warn", LogLevel::Warning),
        ("warning", LogLevel::Warning),
        ("info", LogLevel::Info),
        ("debug", LogLevel::Debug),
        ("trace", LogLevel::Trace),
        ("verbose", LogLevel::Trace),
    ]
);

test_fromstr_aliases!(
    LogFormat,
    test_log_format_aliases,
    [
        ("text", LogFormat::Text),
        ("txt", LogFormat::Text),
        ("plain", LogFormat::Text),
        ("json", LogFormat::Json),
    ]
);

test_fromstr_aliases!(
    ColorMode,
    test_color_mode_aliases,
    [
        ("auto", ColorMode::Auto),
        ("always", ColorMode::Always),
        ("on", ColorMode::Always),
        ("never", ColorMode::Never),
        ("off", ColorMode::Never),
    ]
);

// =============================================================================
// BEHAVIOR
// =============================================================================

#[test]
fn test_log_level_from_verbosity_boundary_conditions() {
    assert_eq!(LogLevel::from_verbosity(0), LogLevel::Error);
    assert_eq!(LogLevel::from_verbosity(1), LogLevel::Warning);
    assert_eq!(LogLevel::from_verbosity(2), LogLevel::Info);
    assert_eq!(LogLevel::from_verbosity(3), LogLevel::Debug);
    assert_eq!(LogLevel::from_verbosity(4), LogLevel::Trace);

    // Saturation: anything past 4 stays Trace
    assert_eq!(LogLevel::from_verbosity(5), LogLevel::Trace);
    assert_eq!(LogLevel::from_verbosity(u8::MAX), LogLevel::Trace);
}

#[test]
fn test_log_level_should_log_matrix() {
    let levels = [
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
    ];

    for (i, message_level) in levels.iter().enumerate() {
        for (j, current_level) in levels.iter().enumerate() {
            let should_display = message_level.should_log(*current_level);
            let expected = i <= j;
            assert_eq!(
                should_display, expected,
                "message_level: {:?}, current_level: {:?}",
                message_level, current_level
            );
        }
    }
}

#[test]
fn test_color_mode_forced_resolution() {
    // Auto depends on the ambient terminal; the forced modes must not
    assert!(ColorMode::Always.resolve());
    assert!(!ColorMode::Never.resolve());
}

#[test]
fn test_config_error_display() {
    let error = ConfigError::AlreadyInitialized;
    assert_eq!(error.to_string(), "Global configuration already initialized");

    let error = ConfigError::InvalidWorkDir {
        path: "/invalid/path".to_string(),
    };
    assert_eq!(error.to_string(), "Invalid working directory: /invalid/path");

    let error = ConfigError::ValidationFailed {
        reason: "fetch timeout must be greater than zero".to_string(),
    };
    assert!(error.to_string().contains("fetch timeout"));
}
