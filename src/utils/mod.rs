//! Utility functions for code generation, tokens and URL validation.
//!
//! - [`code_generator`] - Short code generation and custom code validation
//! - [`session_token`] - Opaque session token generation
//! - [`url_validator`] - Target URL validation

pub mod code_generator;
pub mod session_token;
pub mod url_validator;
