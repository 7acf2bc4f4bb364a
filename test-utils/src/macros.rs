//! Test macros for common testing patterns

/// Macro to test serde round-trip serialization
#[macro_export]
macro_rules! test_serde_round_trip {
    ($value:expr) => {{
        let serialized = serde_json::to_string(&$value).expect("Failed to serialize");
        let deserialized = serde_json::from_str(&serialized).expect("Failed to deserialize");
        assert_eq!($value, deserialized, "Serde round-trip failed");
    }};
}

/// Macro to assert an error contains a specific substring
#[macro_export]
macro_rules! assert_error_contains {
    ($result:expr, $expected:expr) => {{
        match $result {
            Ok(_) => panic!("Expected error containing '{}', but got Ok", $expected),
            Err(e) => {
                let error_str = format!("{}", e);
                if !error_str.contains($expected) {
                    panic!("Expected error to contain '{}', but got '{}'", $expected, error_str);
                }
            }
        }
    }};
}

/// Macro to compare a byte buffer against a hex fixture with a readable failure
#[macro_export]
macro_rules! assert_hex_eq {
    ($bytes:expr, $expected_hex:expr) => {{
        let actual = $crate::fixtures::to_hex(&$bytes);
        assert_eq!(actual, $expected_hex, "hex mismatch");
    }};
}
