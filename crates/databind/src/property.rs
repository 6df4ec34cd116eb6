#![forbid(unsafe_code)]

//! Bindable property and its command pipeline.
//!
//! # Design
//!
//! [`Property`] borrows externally owned state (`&'a mut S`) and mediates
//! every mutation through three phases:
//!
//! ```text
//! run_command(cmd, ctx)
//!   │
//!   ├─ unbound?              → Unbound
//!   ├─ pre chain vetoes?     → PreTransformFailure   (cmd not run)
//!   ├─ cmd returns false?    → TransformFailure      (post chain not run)
//!   ├─ post chain vetoes?    → PostTransformFailure
//!   └─                       → Success
//! ```
//!
//! Storage of the two chains is delegated to a [`SubscriberChains`]
//! strategy; [`OrderedProperty`] uses [`OrderedChains`].
//!
//! # Failure Modes
//!
//! - **Re-entrant use**: every mutating operation takes `&mut self`, so a
//!   transformer cannot reach the property that is running it. Attempts are
//!   rejected by the borrow checker.
//! - **Misuse**: double unsubscribe and foreign handles surface as
//!   [`BindingError`] and a `warn!` event.

use std::fmt;
use std::ops::ControlFlow;

use crate::chains::{OrderedChains, SubscriberChains};
use crate::error::BindingError;
use crate::handle::SubscriberHandle;
use crate::status::{CommandStatus, TransformPhase};
use crate::transformer::Transformer;

/// A property using insertion-ordered chains.
pub type OrderedProperty<'a, S, C = ()> = Property<'a, S, C, OrderedChains<'a, S, C>>;

/// Mediates mutations of borrowed state through pre/post subscriber chains.
///
/// # Invariants
///
/// 1. The command runs only if every pre-transform subscriber continued.
/// 2. Post-transform subscribers run only if the command continued.
/// 3. Each chain runs in subscription order and stops at the first veto.
/// 4. Dropping the property discards every subscription.
pub struct Property<'a, S: ?Sized, C: ?Sized = (), B = OrderedChains<'a, S, C>> {
    state: Option<&'a mut S>,
    chains: B,
    _context: std::marker::PhantomData<fn(&mut C)>,
}

impl<'a, S, C, B> Property<'a, S, C, B>
where
    S: ?Sized,
    C: ?Sized,
    B: SubscriberChains<'a, S, C> + Default,
{
    /// Bind to `state` with empty chains.
    #[must_use]
    pub fn new(state: &'a mut S) -> Self {
        Self::with_chains(state, B::default())
    }

    /// A property with no state. Every command returns
    /// [`CommandStatus::Unbound`].
    #[must_use]
    pub fn unbound() -> Self {
        Self {
            state: None,
            chains: B::default(),
            _context: std::marker::PhantomData,
        }
    }
}

impl<'a, S, C, B> Property<'a, S, C, B>
where
    S: ?Sized,
    C: ?Sized,
    B: SubscriberChains<'a, S, C>,
{
    /// Bind to `state` using a caller-supplied storage strategy.
    #[must_use]
    pub fn with_chains(state: &'a mut S, chains: B) -> Self {
        Self {
            state: Some(state),
            chains,
            _context: std::marker::PhantomData,
        }
    }

    /// Whether the property holds state.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.state.is_some()
    }

    /// Shared view of the bound state.
    #[must_use]
    pub fn state(&self) -> Option<&S> {
        self.state.as_deref()
    }

    /// Read the bound state through a closure.
    pub fn with<R>(&self, f: impl FnOnce(&S) -> R) -> Option<R> {
        self.state().map(f)
    }

    /// Register `transformer` at the end of the pre-transform chain.
    pub fn subscribe_pre_transform<T>(&mut self, transformer: T) -> SubscriberHandle
    where
        T: Transformer<S, C> + 'a,
    {
        self.chains.subscribe(TransformPhase::Pre, Box::new(transformer))
    }

    /// Register `transformer` at the end of the post-transform chain.
    pub fn subscribe_post_transform<T>(&mut self, transformer: T) -> SubscriberHandle
    where
        T: Transformer<S, C> + 'a,
    {
        self.chains.subscribe(TransformPhase::Post, Box::new(transformer))
    }

    /// Run `transformer` once against the current state, then register it
    /// in the pre-transform chain.
    ///
    /// The priming call's return value is ignored. An unbound property
    /// skips the priming call.
    pub fn execute_and_subscribe_pre_transform<T>(
        &mut self,
        transformer: T,
        context: &mut C,
    ) -> SubscriberHandle
    where
        T: Transformer<S, C> + 'a,
    {
        self.execute_and_subscribe(TransformPhase::Pre, transformer, context)
    }

    /// Run `transformer` once against the current state, then register it
    /// in the post-transform chain.
    ///
    /// The priming call's return value is ignored. An unbound property
    /// skips the priming call.
    pub fn execute_and_subscribe_post_transform<T>(
        &mut self,
        transformer: T,
        context: &mut C,
    ) -> SubscriberHandle
    where
        T: Transformer<S, C> + 'a,
    {
        self.execute_and_subscribe(TransformPhase::Post, transformer, context)
    }

    fn execute_and_subscribe<T>(
        &mut self,
        phase: TransformPhase,
        mut transformer: T,
        context: &mut C,
    ) -> SubscriberHandle
    where
        T: Transformer<S, C> + 'a,
    {
        match self.state.as_deref_mut() {
            Some(state) => {
                let primed = transformer.transform(state, context);
                tracing::trace!(phase = phase.as_str(), primed, "primed subscriber");
            }
            None => tracing::trace!(phase = phase.as_str(), "unbound, priming skipped"),
        }
        self.chains.subscribe(phase, Box::new(transformer))
    }

    /// Remove the subscription for `handle`.
    ///
    /// Returns `Ok(false)` for [`SubscriberHandle::UNSUBSCRIBED`] and
    /// `Ok(true)` when a live subscription was removed.
    ///
    /// # Errors
    ///
    /// [`BindingError::AlreadyUnsubscribed`] on a double unsubscribe,
    /// [`BindingError::ForeignHandle`] for a handle issued by another
    /// property. Both indicate a bug at the call site.
    pub fn unsubscribe(&mut self, handle: SubscriberHandle) -> Result<bool, BindingError> {
        self.chains.unsubscribe(handle).inspect_err(|err| {
            tracing::warn!(%handle, error = %err, "invalid unsubscribe");
        })
    }

    /// Drop every subscription in both chains.
    pub fn unsubscribe_all(&mut self) {
        self.chains.clear();
    }

    /// Whether `handle` denotes a live subscription on this property.
    ///
    /// Linear in the number of subscriptions; intended for assertions.
    #[must_use]
    pub fn is_valid(&self, handle: SubscriberHandle) -> bool {
        handle.is_subscribed() && self.chains.contains(handle)
    }

    /// Number of subscriptions in the chain for `phase`.
    #[must_use]
    pub fn subscriber_count(&self, phase: TransformPhase) -> usize {
        self.chains.len(phase)
    }

    /// Whether both chains are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriber_count(TransformPhase::Pre) == 0
            && self.subscriber_count(TransformPhase::Post) == 0
    }

    /// Run `command` through the pre-chain → command → post-chain pipeline.
    pub fn run_command<T>(&mut self, mut command: T, context: &mut C) -> CommandStatus
    where
        T: Transformer<S, C>,
    {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "property_command",
            pre = self.chains.len(TransformPhase::Pre),
            post = self.chains.len(TransformPhase::Post),
        )
        .entered();

        let Some(state) = self.state.as_deref_mut() else {
            tracing::debug!("command on unbound property");
            return CommandStatus::Unbound;
        };

        if let ControlFlow::Break(handle) = self.chains.run(TransformPhase::Pre, state, context) {
            tracing::debug!(%handle, "pre-transform subscriber vetoed command");
            return CommandStatus::PreTransformFailure;
        }
        if !command.transform(state, context) {
            tracing::debug!("command transformer failed");
            return CommandStatus::TransformFailure;
        }
        if let ControlFlow::Break(handle) = self.chains.run(TransformPhase::Post, state, context) {
            tracing::debug!(%handle, "post-transform subscriber vetoed command");
            return CommandStatus::PostTransformFailure;
        }
        CommandStatus::Success
    }
}

impl<'a, S, B> Property<'a, S, (), B>
where
    S: ?Sized,
    B: SubscriberChains<'a, S, ()>,
{
    /// [`run_command`](Self::run_command) with the unit context.
    pub fn run<T>(&mut self, command: T) -> CommandStatus
    where
        T: Transformer<S, ()>,
    {
        self.run_command(command, &mut ())
    }
}

impl<'a, S, C, B> fmt::Debug for Property<'a, S, C, B>
where
    S: ?Sized,
    C: ?Sized,
    B: SubscriberChains<'a, S, C>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("bound", &self.is_bound())
            .field("pre", &self.chains.len(TransformPhase::Pre))
            .field("post", &self.chains.len(TransformPhase::Post))
            .finish()
    }
}
