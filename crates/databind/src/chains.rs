#![forbid(unsafe_code)]

//! Subscriber storage strategies.
//!
//! [`SubscriberChains`] is the extension point behind a
//! [`Property`](crate::Property): it stores the pre- and post-transform
//! chains, allocates handles and runs one chain at a time. The command state
//! machine itself lives in the property and is the same for every strategy.
//!
//! [`OrderedChains`] is the default strategy: two insertion-ordered vectors
//! and a private id counter.
//!
//! # Invariants
//!
//! 1. Chains run in insertion order.
//! 2. A chain stops at the first subscriber that returns `false`.
//! 3. No two live subscriptions in one storage instance share a handle; the
//!    id space spans both chains.
//! 4. Removing a subscription preserves the relative order of the rest.
//!
//! # Performance
//!
//! | Operation       | Complexity                  |
//! |-----------------|-----------------------------|
//! | `subscribe()`   | O(P + Q) per probed id      |
//! | `unsubscribe()` | O(P + Q)                    |
//! | `contains()`    | O(P + Q)                    |
//! | `run()`         | O(chain length)             |
//!
//! where P and Q are the pre and post chain lengths.

use std::fmt;
use std::ops::ControlFlow;

use crate::error::BindingError;
use crate::handle::{OwnerId, SubscriberHandle};
use crate::status::TransformPhase;
use crate::transformer::{BoxedTransformer, Transformer};

/// Storage and invocation of the two subscriber chains.
pub trait SubscriberChains<'a, S: ?Sized, C: ?Sized> {
    /// Append `transformer` to the chain for `phase` and return its handle.
    fn subscribe(
        &mut self,
        phase: TransformPhase,
        transformer: BoxedTransformer<'a, S, C>,
    ) -> SubscriberHandle;

    /// Remove the subscription for `handle`.
    ///
    /// Returns `Ok(false)` for [`SubscriberHandle::UNSUBSCRIBED`] and
    /// `Ok(true)` when a live subscription was removed.
    ///
    /// # Errors
    ///
    /// [`BindingError::AlreadyUnsubscribed`] when the handle was issued here
    /// but is no longer registered, [`BindingError::ForeignHandle`] when it
    /// was issued elsewhere.
    fn unsubscribe(&mut self, handle: SubscriberHandle) -> Result<bool, BindingError>;

    /// Drop every subscription in both chains.
    fn clear(&mut self);

    /// Whether `handle` is live in either chain.
    fn contains(&self, handle: SubscriberHandle) -> bool;

    /// Number of subscriptions in the chain for `phase`.
    fn len(&self, phase: TransformPhase) -> usize;

    /// Run the chain for `phase` in order.
    ///
    /// Breaks with the handle of the first subscriber that returned `false`;
    /// later subscribers are not invoked.
    fn run(
        &mut self,
        phase: TransformPhase,
        state: &mut S,
        context: &mut C,
    ) -> ControlFlow<SubscriberHandle>;
}

struct Entry<'a, S: ?Sized, C: ?Sized> {
    handle: SubscriberHandle,
    transformer: BoxedTransformer<'a, S, C>,
}

/// Two insertion-ordered chains with a per-instance id counter.
pub struct OrderedChains<'a, S: ?Sized, C: ?Sized = ()> {
    owner: OwnerId,
    next_id: u64,
    pre: Vec<Entry<'a, S, C>>,
    post: Vec<Entry<'a, S, C>>,
}

impl<S: ?Sized, C: ?Sized> Default for OrderedChains<'_, S, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ?Sized, C: ?Sized> fmt::Debug for OrderedChains<'_, S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedChains")
            .field("owner", &self.owner.get())
            .field("next_id", &self.next_id)
            .field("pre", &self.pre.len())
            .field("post", &self.post.len())
            .finish()
    }
}

impl<'a, S: ?Sized, C: ?Sized> OrderedChains<'a, S, C> {
    /// Empty chains with a fresh owner id; ids start at zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            owner: OwnerId::next(),
            next_id: 0,
            pre: Vec::new(),
            post: Vec::new(),
        }
    }

    /// Identity stamped into every handle issued here.
    #[must_use]
    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    fn chain(&self, phase: TransformPhase) -> &[Entry<'a, S, C>] {
        match phase {
            TransformPhase::Pre => &self.pre,
            TransformPhase::Post => &self.post,
        }
    }

    fn chain_mut(&mut self, phase: TransformPhase) -> &mut Vec<Entry<'a, S, C>> {
        match phase {
            TransformPhase::Pre => &mut self.pre,
            TransformPhase::Post => &mut self.post,
        }
    }

    fn position(&self, phase: TransformPhase, handle: SubscriberHandle) -> Option<usize> {
        self.chain(phase).iter().position(|e| e.handle == handle)
    }

    fn allocate(&mut self) -> SubscriberHandle {
        let mut candidate = SubscriberHandle::new(self.owner, self.next_id);
        while self.contains(candidate) {
            self.next_id = self.next_id.wrapping_add(1);
            candidate = SubscriberHandle::new(self.owner, self.next_id);
        }
        self.next_id = self.next_id.wrapping_add(1);
        candidate
    }
}

impl<'a, S: ?Sized, C: ?Sized> SubscriberChains<'a, S, C> for OrderedChains<'a, S, C> {
    fn subscribe(
        &mut self,
        phase: TransformPhase,
        transformer: BoxedTransformer<'a, S, C>,
    ) -> SubscriberHandle {
        let handle = self.allocate();
        self.chain_mut(phase).push(Entry {
            handle,
            transformer,
        });
        tracing::trace!(%handle, phase = phase.as_str(), "subscribed");
        handle
    }

    fn unsubscribe(&mut self, handle: SubscriberHandle) -> Result<bool, BindingError> {
        if !handle.is_subscribed() {
            return Ok(false);
        }
        if !handle.is_owned_by(self.owner) {
            return Err(BindingError::ForeignHandle { handle });
        }
        // Post chain first, then pre.
        for phase in [TransformPhase::Post, TransformPhase::Pre] {
            if let Some(idx) = self.position(phase, handle) {
                self.chain_mut(phase).remove(idx);
                tracing::trace!(%handle, phase = phase.as_str(), "unsubscribed");
                return Ok(true);
            }
        }
        Err(BindingError::AlreadyUnsubscribed { handle })
    }

    fn clear(&mut self) {
        tracing::trace!(
            pre = self.pre.len(),
            post = self.post.len(),
            "unsubscribed all"
        );
        self.pre.clear();
        self.post.clear();
    }

    fn contains(&self, handle: SubscriberHandle) -> bool {
        handle.is_owned_by(self.owner)
            && (self.position(TransformPhase::Pre, handle).is_some()
                || self.position(TransformPhase::Post, handle).is_some())
    }

    fn len(&self, phase: TransformPhase) -> usize {
        self.chain(phase).len()
    }

    fn run(
        &mut self,
        phase: TransformPhase,
        state: &mut S,
        context: &mut C,
    ) -> ControlFlow<SubscriberHandle> {
        for entry in self.chain_mut(phase).iter_mut() {
            if !entry.transformer.transform(state, context) {
                return ControlFlow::Break(entry.handle);
            }
        }
        ControlFlow::Continue(())
    }
}
