#![forbid(unsafe_code)]

//! Subscription handles.
//!
//! A [`SubscriberHandle`] is the opaque token returned by every subscribe
//! call. It is `Copy`, totally ordered and hashable so callers can keep it in
//! any container.
//!
//! # Invariants
//!
//! 1. [`SubscriberHandle::UNSUBSCRIBED`] never denotes a live subscription.
//! 2. A handle is the pair (owner, id). Two handles are equal iff both parts
//!    are equal, so handles from different properties never collide even
//!    though every property counts ids from zero.
//! 3. `is_subscribed()` means "was issued", not "is still registered". Use
//!    the issuing property's `is_valid` for the latter.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identity of one subscriber storage instance.
///
/// Allocated from a process-wide counter; only used to tag handles, never
/// to share id space between properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OwnerId(u64);

impl OwnerId {
    /// Allocate a fresh, process-unique owner id.
    #[must_use]
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw value, for diagnostics.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct HandleKey {
    owner: OwnerId,
    id: u64,
}

/// Opaque token identifying one subscription on one property.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SubscriberHandle {
    key: Option<HandleKey>,
}

impl SubscriberHandle {
    /// The sentinel handle. Never denotes a live subscription.
    pub const UNSUBSCRIBED: Self = Self { key: None };

    /// Build a handle for subscription `id` issued by `owner`.
    ///
    /// Only storage strategies should need this.
    #[must_use]
    pub const fn new(owner: OwnerId, id: u64) -> Self {
        Self {
            key: Some(HandleKey { owner, id }),
        }
    }

    /// Whether this handle was issued by some property (i.e. is not the
    /// sentinel).
    #[must_use]
    pub const fn is_subscribed(self) -> bool {
        self.key.is_some()
    }

    /// Id within the issuing property, `None` for the sentinel.
    #[must_use]
    pub fn id(self) -> Option<u64> {
        self.key.map(|k| k.id)
    }

    /// Issuing property, `None` for the sentinel.
    #[must_use]
    pub fn owner(self) -> Option<OwnerId> {
        self.key.map(|k| k.owner)
    }

    /// Whether this handle was issued by `owner`.
    #[must_use]
    pub fn is_owned_by(self, owner: OwnerId) -> bool {
        self.owner() == Some(owner)
    }
}

impl fmt::Debug for SubscriberHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.key {
            Some(HandleKey { owner, id }) => f
                .debug_struct("SubscriberHandle")
                .field("owner", &owner.0)
                .field("id", &id)
                .finish(),
            None => f.write_str("SubscriberHandle::UNSUBSCRIBED"),
        }
    }
}

impl fmt::Display for SubscriberHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.key {
            Some(HandleKey { owner, id }) => write!(f, "subscriber #{id} of property {}", owner.0),
            None => f.write_str("unsubscribed handle"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn sentinel_is_not_subscribed() {
        assert!(!SubscriberHandle::UNSUBSCRIBED.is_subscribed());
        assert_eq!(SubscriberHandle::default(), SubscriberHandle::UNSUBSCRIBED);
        assert_eq!(SubscriberHandle::UNSUBSCRIBED.id(), None);
        assert_eq!(SubscriberHandle::UNSUBSCRIBED.owner(), None);
    }

    #[test]
    fn issued_handle_is_subscribed() {
        let owner = OwnerId::next();
        let h = SubscriberHandle::new(owner, 0);
        assert!(h.is_subscribed());
        assert_eq!(h.id(), Some(0));
        assert!(h.is_owned_by(owner));
    }

    #[test]
    fn owner_ids_are_unique() {
        let a = OwnerId::next();
        let b = OwnerId::next();
        assert_ne!(a, b);
    }

    #[test]
    fn equality_needs_same_owner_and_id() {
        let a = OwnerId::next();
        let b = OwnerId::next();
        assert_eq!(SubscriberHandle::new(a, 3), SubscriberHandle::new(a, 3));
        assert_ne!(SubscriberHandle::new(a, 3), SubscriberHandle::new(a, 4));
        assert_ne!(SubscriberHandle::new(a, 3), SubscriberHandle::new(b, 3));
    }

    #[test]
    fn handles_are_totally_ordered() {
        let owner = OwnerId::next();
        let set: BTreeSet<_> = [2, 0, 1, 0]
            .into_iter()
            .map(|id| SubscriberHandle::new(owner, id))
            .chain(std::iter::once(SubscriberHandle::UNSUBSCRIBED))
            .collect();
        let ids: Vec<_> = set.iter().map(|h| h.id()).collect();
        assert_eq!(ids, vec![None, Some(0), Some(1), Some(2)]);
    }

    #[test]
    fn display_format() {
        let owner = OwnerId::next();
        let shown = SubscriberHandle::new(owner, 7).to_string();
        assert!(shown.contains("#7"));
        assert_eq!(
            SubscriberHandle::UNSUBSCRIBED.to_string(),
            "unsubscribed handle"
        );
        assert!(format!("{:?}", SubscriberHandle::UNSUBSCRIBED).contains("UNSUBSCRIBED"));
    }
}
