//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_MONITOR_ID: &str = "monitor_id";
pub const FIELD_CYCLE_ID: &str = "cycle_id";

// Snapshot sizes
pub const FIELD_MAIN_LINES: &str = "main_lines";
pub const FIELD_OTHER_LINES: &str = "other_lines";

// Config
pub const FIELD_CONFIG_PATH: &str = "config_path";
pub const FIELD_DELAY: &str = "delay";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
