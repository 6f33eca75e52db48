//! Time formatting helpers.

const UNITS: [(u64, &str); 4] = [(86_400, "d"), (3_600, "h"), (60, "m"), (1, "s")];

/// Format a duration in seconds as its two largest units, e.g. `"3h 2m"`.
pub fn format_duration(secs: u64) -> String {
    let Some(i) = UNITS.iter().position(|(size, _)| secs >= *size) else {
        return "0s".to_string();
    };
    let (major, major_unit) = UNITS[i];
    match UNITS.get(i + 1) {
        Some(&(minor, minor_unit)) => format!(
            "{}{} {}{}",
            secs / major,
            major_unit,
            (secs % major) / minor,
            minor_unit
        ),
        None => format!("{}{}", secs, major_unit),
    }
}
