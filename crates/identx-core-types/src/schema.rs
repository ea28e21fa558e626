//! Canonical schema constants for structured logging
//!
//! Every log event emitted through the logging facility uses these keys, so
//! dashboards and test assertions can rely on them.

// Boundary fields
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Correlation
pub const FIELD_REQUEST_ID: &str = "request_id";
pub const FIELD_TRACE_ID: &str = "trace_id";

// Identity entities
pub const FIELD_TENANT_ID: &str = "tenant_id";

// Query shape and outcome
pub const FIELD_PREDICATE_COUNT: &str = "predicates";
pub const FIELD_ORDER_KEY_COUNT: &str = "order_keys";
pub const FIELD_RESULT_COUNT: &str = "results";
pub const FIELD_FILTERS: &str = "filters";
pub const FIELD_ORDERING: &str = "ordering";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
