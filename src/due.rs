//! Departure countdown classification.

use chrono::{DateTime, Utc};

/// Urgency bucket for an upcoming (or past) departure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    /// Already departed or long gone
    Muted,
    /// Departing within 30 minutes
    Urgent,
    /// Departing within 90 minutes
    Warning,
    /// Comfortably in the future
    Normal,
}

/// A human-readable countdown with its urgency bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueTime {
    pub label: String,
    pub urgency: Urgency,
}

/// Classify a departure instant relative to `now`.
///
/// `diff` is the whole-minute distance from now to departure (rounded):
/// below -60 the flight is simply "departed"; [-60, 0) renders as minutes
/// ago; [0, 30) is urgent, [30, 90) a warning; beyond that an `h`/`m`
/// countdown with the minutes component omitted when zero.
pub fn classify_due(departure: DateTime<Utc>, now: DateTime<Utc>) -> DueTime {
    let diff = ((departure - now).num_seconds() as f64 / 60.0).round() as i64;

    if diff < -60 {
        return DueTime {
            label: "departed".to_string(),
            urgency: Urgency::Muted,
        };
    }
    if diff < 0 {
        return DueTime {
            label: format!("{}m ago", -diff),
            urgency: Urgency::Muted,
        };
    }
    if diff < 30 {
        return DueTime {
            label: format!("in {}m", diff),
            urgency: Urgency::Urgent,
        };
    }
    if diff < 90 {
        return DueTime {
            label: format!("in {}m", diff),
            urgency: Urgency::Warning,
        };
    }

    let h = diff / 60;
    let m = diff % 60;
    DueTime {
        label: if m > 0 {
            format!("in {}h {}m", h, m)
        } else {
            format!("in {}h", h)
        },
        urgency: Urgency::Normal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn dep() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 23, 21, 10, 0).unwrap()
    }

    #[test]
    fn test_warning_bucket() {
        let due = classify_due(dep(), dep() - Duration::minutes(45));
        assert_eq!(due.label, "in 45m");
        assert_eq!(due.urgency, Urgency::Warning);
    }

    #[test]
    fn test_urgent_bucket() {
        let due = classify_due(dep(), dep() - Duration::minutes(10));
        assert_eq!(due.label, "in 10m");
        assert_eq!(due.urgency, Urgency::Urgent);

        // Boundary: exactly 30 minutes out is a warning, not urgent
        let due = classify_due(dep(), dep() - Duration::minutes(30));
        assert_eq!(due.urgency, Urgency::Warning);
    }

    #[test]
    fn test_recently_departed() {
        let due = classify_due(dep(), dep() + Duration::minutes(30));
        assert_eq!(due.label, "30m ago");
        assert_eq!(due.urgency, Urgency::Muted);

        // Exactly an hour ago is still a countdown, not "departed"
        let due = classify_due(dep(), dep() + Duration::minutes(60));
        assert_eq!(due.label, "60m ago");
    }

    #[test]
    fn test_long_departed() {
        let due = classify_due(dep(), dep() + Duration::minutes(90));
        assert_eq!(due.label, "departed");
        assert_eq!(due.urgency, Urgency::Muted);
    }

    #[test]
    fn test_hours_label() {
        let due = classify_due(dep(), dep() - Duration::minutes(95));
        assert_eq!(due.label, "in 1h 35m");
        assert_eq!(due.urgency, Urgency::Normal);

        // Minutes component omitted when zero
        let due = classify_due(dep(), dep() - Duration::minutes(120));
        assert_eq!(due.label, "in 2h");
    }
}
