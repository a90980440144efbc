// model = "claude-opus-4-5"
// created = "2026-10-16"
// modified = "2026-10-16"
// driver = "Isaac Clayton"

//! Operation identities and their total order.
//!
//! # Design Decisions
//!
//! An `Id` names one operation and the element that operation introduces.
//! IDs are:
//! - Globally unique: (clock, site) pairs never repeat, since a site stamps
//!   each operation with a clock past everything it has seen
//! - Totally ordered: clock first, then site bytes, with no ties
//! - Copy + Hash: used directly as arena and seen-set keys
//!
//! Clock 0 is reserved for the two sentinels that anchor the document tree.
//! `u64::MAX` is reserved as well: nothing could be stamped after it.

use std::cmp::Ordering;

use serde::Deserialize;
use serde::Serialize;

use crate::key::KeyPub;

/// An operation identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Id {
    /// Lamport time at which the operation was authored.
    pub clock: u64,
    /// The site that authored the operation; breaks clock ties.
    pub site: KeyPub,
}

impl Id {
    /// The virtual container holding the document root slot.
    pub const ROOT_PARENT: Id = Id {
        clock: 0,
        site: KeyPub([0x00; 32]),
    };

    /// The placeholder identity of the (initially absent) document root.
    pub const ROOT: Id = Id {
        clock: 0,
        site: KeyPub([0xff; 32]),
    };

    /// Create a new operation ID.
    pub fn new(clock: u64, site: KeyPub) -> Id {
        return Id { clock, site };
    }

    /// Whether this identity uses a clock operations may not carry.
    #[inline]
    pub fn is_reserved(&self) -> bool {
        return self.clock == 0 || self.clock == u64::MAX;
    }
}

impl PartialOrd for Id {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        return Some(self.cmp(other));
    }
}

impl Ord for Id {
    fn cmp(&self, other: &Self) -> Ordering {
        // Compare by clock first, then by site
        match self.clock.cmp(&other.clock) {
            Ordering::Equal => self.site.cmp(&other.site),
            other => other,
        }
    }
}

impl std::fmt::Debug for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if *self == Id::ROOT_PARENT {
            return write!(f, "Id(ROOT_PARENT)");
        }
        if *self == Id::ROOT {
            return write!(f, "Id(ROOT)");
        }
        return write!(f, "Id({}, {:?})", self.clock, self.site);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(byte: u8) -> KeyPub {
        return KeyPub([byte; 32]);
    }

    #[test]
    fn clock_dominates_site() {
        let a = Id::new(1, site(9));
        let b = Id::new(2, site(1));
        assert!(a < b);
    }

    #[test]
    fn site_breaks_ties() {
        let a = Id::new(5, site(1));
        let b = Id::new(5, site(2));
        assert!(a < b);
        assert_ne!(a, b);
    }

    #[test]
    fn sentinels_sort_before_operations() {
        let first = Id::new(1, site(0));
        assert!(Id::ROOT_PARENT < first);
        assert!(Id::ROOT < first);
        assert!(Id::ROOT_PARENT < Id::ROOT);
    }

    #[test]
    fn sentinels_are_reserved() {
        assert!(Id::ROOT.is_reserved());
        assert!(Id::ROOT_PARENT.is_reserved());
        assert!(!Id::new(1, site(0)).is_reserved());
        assert!(Id::new(u64::MAX, site(1)).is_reserved());
        assert!(!Id::new(u64::MAX - 1, site(1)).is_reserved());
    }

    #[test]
    fn sorting_is_total() {
        let mut ids = vec![
            Id::new(3, site(1)),
            Id::new(1, site(2)),
            Id::new(1, site(1)),
            Id::new(2, site(7)),
        ];
        ids.sort();
        assert_eq!(
            ids,
            vec![
                Id::new(1, site(1)),
                Id::new(1, site(2)),
                Id::new(2, site(7)),
                Id::new(3, site(1)),
            ]
        );
    }
}
