//! Reservation state machine
//!
//! Transitions: `active -> ready -> {fulfilled | expired}`, and manual
//! cancellation from either open state. Encoded as an explicit table so
//! every call site goes through the same check instead of mutating
//! status fields ad hoc.

use chrono::{DateTime, Duration, Utc};

use crate::error::{AppError, AppResult};
use crate::models::ReservationStatus;

/// Whether `from -> to` is a legal reservation transition.
pub fn can_transition(from: ReservationStatus, to: ReservationStatus) -> bool {
    use ReservationStatus::*;
    matches!(
        (from, to),
        (Active, Ready) | (Active, Cancelled) | (Ready, Fulfilled) | (Ready, Expired) | (Ready, Cancelled)
    )
}

/// Validate a transition, failing with a policy violation otherwise.
pub fn validate_transition(from: ReservationStatus, to: ReservationStatus) -> AppResult<()> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(AppError::PolicyViolation(format!(
            "reservation cannot go from {} to {}",
            from, to
        )))
    }
}

/// Pickup deadline for a hold promoted at `ready_at`.
pub fn hold_deadline(ready_at: DateTime<Utc>, window_days: i64) -> DateTime<Utc> {
    ready_at + Duration::days(window_days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ReservationStatus::*;

    const ALL: [ReservationStatus; 5] = [Active, Ready, Cancelled, Expired, Fulfilled];

    #[test]
    fn test_transition_table_is_exactly_the_legal_set() {
        let legal = [
            (Active, Ready),
            (Active, Cancelled),
            (Ready, Fulfilled),
            (Ready, Expired),
            (Ready, Cancelled),
        ];
        for from in ALL {
            for to in ALL {
                assert_eq!(
                    can_transition(from, to),
                    legal.contains(&(from, to)),
                    "unexpected verdict for {} -> {}",
                    from,
                    to
                );
            }
        }
    }

    #[test]
    fn test_terminal_states_have_no_exits() {
        for from in [Cancelled, Expired, Fulfilled] {
            assert!(from.is_terminal());
            for to in ALL {
                assert!(!can_transition(from, to));
            }
        }
    }

    #[test]
    fn test_validate_transition_reports_states() {
        let err = validate_transition(Expired, Ready).unwrap_err();
        assert!(err.to_string().contains("expired"));
        assert!(err.to_string().contains("ready"));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_hold_deadline() {
        let ready_at = DateTime::parse_from_rfc3339("2025-03-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(hold_deadline(ready_at, 2), ready_at + Duration::days(2));
    }
}
