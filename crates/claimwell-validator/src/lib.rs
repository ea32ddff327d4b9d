//! Claimwell Validator
//!
//! Cross-document consistency checks over one claim's extracted
//! documents.
//!
//! The battery is fixed: completeness of the required type set, patient
//! name agreement, discharge/admission date ordering, bill amount sanity,
//! and ID card field sanity. Checks are independent and order-insensitive;
//! their findings land in one `ValidationResult` in a fixed order. The
//! validator never mutates a document and never fails; it is a pure
//! function of its input.
//!
//! # Examples
//!
//! ```
//! use claimwell_validator::validate;
//!
//! let result = validate(&[]);
//! assert_eq!(result.missing_documents.len(), 3);
//! assert!(result.is_consistent());
//! ```

#![warn(missing_docs)]

mod validator;

pub use validator::validate;
