//! The stable preference keys. Four entries, each an opaque string: the
//! preferred schedule name, the alert-setting list as one JSON blob, the
//! default lead time as a string-encoded integer, and the theme choice.

pub const PREFERRED_SCHEDULE: &str = "preferred_schedule";
pub const ALERT_SETTINGS: &str = "alert_settings";
pub const DEFAULT_MINUTES_BEFORE: &str = "default_minutes_before";
pub const THEME: &str = "theme";
