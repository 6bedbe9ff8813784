// SPDX-License-Identifier: MPL-2.0
//! Time display helpers for renderers.
//!
//! Renderers draw the elapsed/total label and the progress and buffer bars
//! from these, so every skin formats time the same way.

/// Seconds per minute as f64 for calculations.
const SECS_PER_MINUTE: f64 = 60.0;

/// Seconds per hour as f64 for calculations.
const SECS_PER_HOUR: f64 = 3600.0;

/// Formats seconds as `m:ss`, or `h:mm:ss` from one hour on.
///
/// Negative and non-finite input formats as `0:00`.
///
/// # Examples
///
/// ```
/// use touchplay::domain::video::timecode::format_timestamp;
///
/// assert_eq!(format_timestamp(0.0), "0:00");
/// assert_eq!(format_timestamp(75.9), "1:15");
/// assert_eq!(format_timestamp(3725.0), "1:02:05");
/// ```
#[must_use]
pub fn format_timestamp(seconds: f64) -> String {
    let seconds = if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    };
    let hours = (seconds / SECS_PER_HOUR).floor() as u64;
    let minutes = ((seconds % SECS_PER_HOUR) / SECS_PER_MINUTE).floor() as u64;
    let secs = (seconds % SECS_PER_MINUTE).floor() as u64;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

/// Fraction of `duration` covered by `position`, in `[0, 1]`.
///
/// Returns 0 while the duration is unknown.
///
/// # Examples
///
/// ```
/// use touchplay::domain::video::timecode::fraction_of;
///
/// assert_eq!(fraction_of(30.0, 120.0), 0.25);
/// assert_eq!(fraction_of(30.0, 0.0), 0.0);
/// ```
#[must_use]
pub fn fraction_of(position: f64, duration: f64) -> f64 {
    if !(duration.is_finite() && duration > 0.0) || !position.is_finite() {
        return 0.0;
    }
    (position / duration).clamp(0.0, 1.0)
}

/// Percentage variant of [`fraction_of`] for CSS widths.
#[inline]
#[must_use]
pub fn percent_of(position: f64, duration: f64) -> f64 {
    fraction_of(position, duration) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_timestamp(5.0), "0:05");
        assert_eq!(format_timestamp(59.99), "0:59");
        assert_eq!(format_timestamp(600.0), "10:00");
    }

    #[test]
    fn formats_hours() {
        assert_eq!(format_timestamp(3600.0), "1:00:00");
        assert_eq!(format_timestamp(7322.0), "2:02:02");
    }

    #[test]
    fn invalid_input_formats_as_zero() {
        assert_eq!(format_timestamp(-4.0), "0:00");
        assert_eq!(format_timestamp(f64::NAN), "0:00");
    }

    #[test]
    fn percent_clamps_and_handles_unknown_duration() {
        assert_abs_diff_eq!(percent_of(60.0, 120.0), 50.0);
        assert_abs_diff_eq!(percent_of(500.0, 120.0), 100.0);
        assert_abs_diff_eq!(percent_of(10.0, 0.0), 0.0);
        assert_abs_diff_eq!(percent_of(10.0, f64::NAN), 0.0);
    }
}
