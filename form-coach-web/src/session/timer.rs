//! Elapsed-time labels for the workout timer and history list

/// "MM:SS" for the live timer (minutes zero-padded)
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// "M:SS" for a finished session
pub fn format_duration(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
