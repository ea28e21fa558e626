//! Structured logging facility for IdentX
//!
//! - Single initialization point via `init(profile)`
//! - Boundary macros (`log_op_start!`, `log_op_end!`, `log_op_error!`) that
//!   emit the canonical fields from `identx_core_types::schema`
//! - Test capture mode for asserting on emitted events
//!
//! ```rust
//! use identx_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
