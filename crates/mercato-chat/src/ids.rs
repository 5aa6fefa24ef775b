use uuid::Uuid;

/// Milliseconds since the Unix epoch.
pub fn now_ms() -> u64 {
    chrono::Utc::now().timestamp_millis() as u64
}

/// Generate a session-unique temp id. Collisions break confirm/fail
/// correlation, so the timestamp prefix is paired with a random suffix.
pub fn new_temp_id() -> String {
    format!("tmp-{}-{}", now_ms(), Uuid::new_v4().simple())
}
