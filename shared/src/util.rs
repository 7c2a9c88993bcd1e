//! Small shared helpers

use chrono::Utc;
use uuid::Uuid;

/// Current time as Unix milliseconds, the timestamp unit used throughout
/// the remote tree.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Fresh identifier for generated records (losses, testimonials, ...).
pub fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_ids_are_unique() {
        assert_ne!(new_record_id(), new_record_id());
    }

    #[test]
    fn now_is_millisecond_scale() {
        // sanity: after 2020-01-01 in millis
        assert!(now_millis() > 1_577_836_800_000);
    }
}
