/// Render a duration in seconds as `mm:ss`, or `hh:mm:ss` once an hour is
/// reached (or always, with `show_hours`).
pub fn format_duration(seconds: u32, show_hours: bool) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 || show_hours {
        format!("{hours:02}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes:02}:{secs:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::format_duration;

    #[test]
    fn short_durations_omit_hours() {
        assert_eq!(format_duration(0, false), "00:00");
        assert_eq!(format_duration(215, false), "03:35");
    }

    #[test]
    fn hours_are_shown_when_needed_or_forced() {
        assert_eq!(format_duration(3661, false), "01:01:01");
        assert_eq!(format_duration(59, true), "00:00:59");
    }
}
