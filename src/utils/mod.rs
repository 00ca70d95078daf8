/// Renders a length in minutes as `m:ss`, or `h:mm:ss` from one hour up.
pub fn format_minutes(minutes: f64) -> String {
    let total_seconds = (minutes.max(0.0) * 60.0).round() as u64;
    let hours = total_seconds / 3600;
    let mins = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{hours}:{mins:02}:{secs:02}")
    } else {
        format!("{mins}:{secs:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(0.0), "0:00");
        assert_eq!(format_minutes(0.75), "0:45");
        assert_eq!(format_minutes(4.5), "4:30");
        assert_eq!(format_minutes(59.0 + 59.0 / 60.0), "59:59");
        assert_eq!(format_minutes(60.0), "1:00:00");
        assert_eq!(format_minutes(62.5), "1:02:30");
        assert_eq!(format_minutes(-3.0), "0:00");
    }
}
