//! Unit tests for intake error types.
//!
//! Tests verify:
//! - Error variant creation
//! - Display formatting
//! - Clone and `PartialEq` derives (`SchemaError`)
//! - Helper methods
//! - Result type alias

use intake::{Result, SchemaError, SubmitError};
use std::error::Error as StdError;

mod creation_tests {
    use super::*;

    #[test]
    fn test_empty_name_variant() {
        let e = SchemaError::EmptyName;
        assert!(matches!(e, SchemaError::EmptyName));
    }

    #[test]
    fn test_duplicate_name_variant() {
        let e = SchemaError::DuplicateName("price".into());
        assert!(matches!(e, SchemaError::DuplicateName(_)));
    }

    #[test]
    fn test_missing_submit_handler_variant() {
        let e = SubmitError::MissingSubmitHandler;
        assert!(matches!(e, SubmitError::MissingSubmitHandler));
    }

    #[test]
    fn test_missing_edit_handler_variant() {
        let e = SubmitError::MissingEditHandler;
        assert!(matches!(e, SubmitError::MissingEditHandler));
    }

    #[test]
    fn test_handler_variant_from_anyhow() {
        let e = SubmitError::from(anyhow::anyhow!("connection refused"));
        assert!(matches!(e, SubmitError::Handler(_)));
    }
}

mod display_tests {
    use super::*;

    #[test]
    fn test_empty_name_display() {
        let e = SchemaError::EmptyName;
        assert_eq!(format!("{e}"), "field name must not be empty");
    }

    #[test]
    fn test_duplicate_name_display() {
        let e = SchemaError::DuplicateName("price".into());
        let msg = format!("{e}");
        assert!(msg.contains("duplicate field name"));
        assert!(msg.contains("price"));
    }

    #[test]
    fn test_missing_handler_display() {
        assert_eq!(
            format!("{}", SubmitError::MissingSubmitHandler),
            "no submit handler is configured"
        );
        assert_eq!(
            format!("{}", SubmitError::MissingEditHandler),
            "no edit handler is configured"
        );
    }

    #[test]
    fn test_handler_display_is_transparent() {
        let e = SubmitError::from(anyhow::anyhow!("connection refused"));
        assert_eq!(format!("{e}"), "connection refused");
    }

    #[test]
    fn test_debug_impl() {
        let e = SchemaError::DuplicateName("sku".into());
        let debug = format!("{e:?}");
        assert!(debug.contains("DuplicateName"));
    }
}

mod derives_tests {
    use super::*;

    #[test]
    fn test_schema_error_clone() {
        let e1 = SchemaError::DuplicateName("name".into());
        let e2 = e1.clone();
        assert_eq!(e1, e2);
    }

    #[test]
    fn test_schema_error_partial_eq() {
        assert_eq!(SchemaError::EmptyName, SchemaError::EmptyName);
        assert_eq!(
            SchemaError::DuplicateName("a".into()),
            SchemaError::DuplicateName("a".into())
        );
        assert_ne!(
            SchemaError::DuplicateName("a".into()),
            SchemaError::DuplicateName("b".into())
        );
        assert_ne!(SchemaError::EmptyName, SchemaError::DuplicateName("a".into()));
    }
}

mod helper_methods_tests {
    use super::*;

    #[test]
    fn test_is_handler() {
        assert!(SubmitError::from(anyhow::anyhow!("x")).is_handler());
        assert!(!SubmitError::MissingSubmitHandler.is_handler());
        assert!(!SubmitError::MissingEditHandler.is_handler());
    }

    #[test]
    fn test_is_missing_handler() {
        assert!(SubmitError::MissingSubmitHandler.is_missing_handler());
        assert!(SubmitError::MissingEditHandler.is_missing_handler());
        assert!(!SubmitError::from(anyhow::anyhow!("x")).is_missing_handler());
    }
}

mod chaining_tests {
    use super::*;

    #[test]
    fn test_no_source_for_config_variants() {
        let e = SubmitError::MissingEditHandler;
        assert!(e.source().is_none());
    }
}

mod result_tests {
    use super::*;

    #[test]
    #[allow(clippy::unnecessary_wraps)]
    fn test_result_alias_ok() {
        fn do_something() -> Result<String> {
            Ok("success".into())
        }

        assert_eq!(do_something().unwrap(), "success");
    }

    #[test]
    fn test_result_alias_err() {
        fn do_something() -> Result<()> {
            Err(SubmitError::MissingEditHandler)
        }

        assert!(do_something().is_err());
    }

    #[test]
    fn test_result_error_propagation() {
        fn outer() -> Result<()> {
            inner()?;
            Ok(())
        }

        fn inner() -> Result<()> {
            Err(SubmitError::MissingSubmitHandler)
        }

        let result = outer();
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), SubmitError::MissingSubmitHandler));
    }
}
