//! crates/planner_core/src/slot_id.rs
//!
//! Derives the stable 32-bit notification identifiers used to address a
//! single activity's reminders at the platform notification facility.
//!
//! The facility keys pending notifications by a signed 32-bit integer, and
//! nothing about a prior scheduling is persisted. Cancellation therefore has
//! to be able to re-derive the exact ids a previous run used, which is why
//! this must be a pure function of `(activity_id, kind)`.

use crate::domain::ReminderKind;

/// Headroom below `i32::MAX` so the per-kind offsets can never overflow.
const SLOT_RANGE: u32 = 1_000_000_000;

/// 32-bit polynomial rolling hash over the id's code points (multiply by 31,
/// wrap at each step). Equivalent to Java's `String.hashCode`, spelled out
/// explicitly so the algorithm is portable and testable on its own.
fn hash_code(s: &str) -> i32 {
    let mut h: i32 = 0;
    for c in s.chars() {
        h = h.wrapping_mul(31).wrapping_add(c as i32);
    }
    h
}

/// Maps an opaque activity id plus a notification kind to its slot id.
///
/// The three kinds of one activity always land on three distinct consecutive
/// integers. Collision between *different* activity ids is possible (hash
/// plus modulo) and accepted: the concurrently-scheduled reminder set of a
/// single user is tiny relative to the id space.
pub fn derive_slot_id(activity_id: &str, kind: ReminderKind) -> i32 {
    // unsigned_abs avoids the i32::MIN negation overflow.
    let base = hash_code(activity_id).unsigned_abs() % SLOT_RANGE;
    let offset = match kind {
        ReminderKind::Start => 1,
        ReminderKind::End => 2,
        ReminderKind::Reminder => 3,
    };
    base as i32 + offset
}

/// The three slot ids an activity can ever occupy, in kind order.
pub fn all_slot_ids(activity_id: &str) -> [i32; 3] {
    [
        derive_slot_id(activity_id, ReminderKind::Start),
        derive_slot_id(activity_id, ReminderKind::End),
        derive_slot_id(activity_id, ReminderKind::Reminder),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_across_calls() {
        let id = "4f2d9c1e-8b47-4a11-9d3a-1c2b3d4e5f60";
        for kind in ReminderKind::ALL {
            assert_eq!(derive_slot_id(id, kind), derive_slot_id(id, kind));
        }
    }

    #[test]
    fn kinds_never_collide_for_one_activity() {
        let id = "some-activity";
        let start = derive_slot_id(id, ReminderKind::Start);
        let end = derive_slot_id(id, ReminderKind::End);
        let reminder = derive_slot_id(id, ReminderKind::Reminder);
        assert_ne!(start, end);
        assert_ne!(start, reminder);
        assert_ne!(end, reminder);
        // Consecutive offsets from a shared base.
        assert_eq!(end, start + 1);
        assert_eq!(reminder, start + 2);
    }

    #[test]
    fn matches_java_string_hash_code() {
        // Known `String.hashCode` values.
        assert_eq!(hash_code(""), 0);
        assert_eq!(hash_code("a"), 97);
        assert_eq!(hash_code("abc"), 96354);
        assert_eq!(hash_code("hello"), 99162322);
    }

    #[test]
    fn ids_stay_within_platform_range() {
        for id in ["", "x", "a-very-long-identifier-that-hashes-negative-🙂"] {
            for kind in ReminderKind::ALL {
                let slot = derive_slot_id(id, kind);
                assert!(slot > 0);
                assert!(slot <= SLOT_RANGE as i32 + 3);
            }
        }
    }

    #[test]
    fn all_slot_ids_matches_per_kind_derivation() {
        let id = "abc-123";
        let [s, e, r] = all_slot_ids(id);
        assert_eq!(s, derive_slot_id(id, ReminderKind::Start));
        assert_eq!(e, derive_slot_id(id, ReminderKind::End));
        assert_eq!(r, derive_slot_id(id, ReminderKind::Reminder));
    }
}
