//! Core types shared by the IdentX error and logging facilities
//!
//! - **Correlation types**: RequestId, TraceId, RequestContext
//! - **Schema constants**: canonical field keys and event names used by
//!   structured log events

pub mod correlation;
pub mod schema;

pub use correlation::{RequestContext, RequestId, TraceId};
