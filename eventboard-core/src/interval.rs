//! Time windows and the rule deciding when two of them collide.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EventBoardError, EventBoardResult};

/// How shared endpoints are treated when comparing two windows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoundaryPolicy {
    /// `[start, end)`: an event ending at 11:00 does not collide with one
    /// starting at 11:00, so back-to-back events are allowed.
    #[default]
    HalfOpen,
    /// `[start, end]`: touching endpoints count as a collision.
    Closed,
}

impl FromStr for BoundaryPolicy {
    type Err = EventBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "half-open" | "halfopen" => Ok(BoundaryPolicy::HalfOpen),
            "closed" => Ok(BoundaryPolicy::Closed),
            _ => Err(EventBoardError::Config(format!(
                "Unknown overlap policy '{}'. Expected 'half-open' or 'closed'",
                s
            ))),
        }
    }
}

impl fmt::Display for BoundaryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BoundaryPolicy::HalfOpen => write!(f, "half-open"),
            BoundaryPolicy::Closed => write!(f, "closed"),
        }
    }
}

/// A span of time between two instants.
///
/// Fields are public so stored events can always be viewed as a window;
/// use [`Interval::new`] when the bounds come from user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    /// Build a window, rejecting `start >= end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> EventBoardResult<Self> {
        let interval = Interval { start, end };
        if !interval.is_valid() {
            return Err(EventBoardError::InvalidWindow { start, end });
        }
        Ok(interval)
    }

    /// True when the window has a positive length.
    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Whether `instant` falls inside the window (start inclusive, end exclusive).
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Overlap under the default half-open policy.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.overlaps_with(other, BoundaryPolicy::HalfOpen)
    }

    pub fn overlaps_with(&self, other: &Interval, policy: BoundaryPolicy) -> bool {
        match policy {
            BoundaryPolicy::HalfOpen => self.start < other.end && self.end > other.start,
            BoundaryPolicy::Closed => self.start <= other.end && self.end >= other.start,
        }
    }
}

/// Free-function form of [`Interval::overlaps`].
pub fn overlaps(a: &Interval, b: &Interval) -> bool {
    a.overlaps(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, hour, min, 0).unwrap()
    }

    fn window(from: (u32, u32), to: (u32, u32)) -> Interval {
        Interval::new(at(from.0, from.1), at(to.0, to.1)).unwrap()
    }

    #[test]
    fn test_new_rejects_empty_and_reversed_windows() {
        assert!(matches!(
            Interval::new(at(10, 0), at(10, 0)),
            Err(EventBoardError::InvalidWindow { .. })
        ));
        assert!(Interval::new(at(11, 0), at(10, 0)).is_err());
    }

    #[test]
    fn test_touching_windows_do_not_overlap() {
        let a = window((10, 0), (11, 0));
        let b = window((11, 0), (12, 0));
        assert!(!overlaps(&a, &b));
        assert!(!overlaps(&b, &a));
    }

    #[test]
    fn test_disjoint_windows_do_not_overlap() {
        let a = window((8, 0), (9, 0));
        let b = window((10, 0), (11, 0));
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_intersecting_windows_overlap() {
        let cases = [
            (window((10, 0), (11, 0)), window((10, 30), (10, 45))), // contained
            (window((10, 0), (11, 0)), window((9, 0), (12, 0))),    // containing
            (window((10, 0), (11, 0)), window((10, 59), (12, 0))),  // tail
            (window((10, 0), (11, 0)), window((9, 0), (10, 1))),    // head
            (window((10, 0), (11, 0)), window((10, 0), (11, 0))),   // identical
        ];
        for (a, b) in cases {
            assert!(a.overlaps(&b), "{:?} should overlap {:?}", a, b);
            assert!(b.overlaps(&a), "{:?} should overlap {:?}", b, a);
        }
    }

    #[test]
    fn test_closed_policy_treats_touching_as_overlap() {
        let a = window((10, 0), (11, 0));
        let b = window((11, 0), (12, 0));
        assert!(a.overlaps_with(&b, BoundaryPolicy::Closed));
        assert!(!a.overlaps_with(&window((11, 1), (12, 0)), BoundaryPolicy::Closed));
    }

    #[test]
    fn test_contains_is_end_exclusive() {
        let a = window((10, 0), (11, 0));
        assert!(a.contains(at(10, 0)));
        assert!(a.contains(at(10, 59)));
        assert!(!a.contains(at(11, 0)));
        assert_eq!(a.duration(), Duration::hours(1));
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("half-open".parse::<BoundaryPolicy>().unwrap(), BoundaryPolicy::HalfOpen);
        assert_eq!("Closed".parse::<BoundaryPolicy>().unwrap(), BoundaryPolicy::Closed);
        assert!("strict".parse::<BoundaryPolicy>().is_err());
    }
}
