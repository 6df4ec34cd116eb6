#![forbid(unsafe_code)]

//! The transformer contract and its combinators.
//!
//! A transformer receives the bound state and the command context and
//! returns whether processing should continue. Any
//! `FnMut(&mut S, &mut C) -> bool` closure is a transformer; the adapters in
//! this module cover the common shapes:
//!
//! | Adapter       | Closure shape                  | Returns            |
//! |---------------|--------------------------------|--------------------|
//! | [`always`]    | `FnMut(&mut S, &mut C)`        | always `true`      |
//! | [`inspect`]   | `FnMut(&S, &C)`                | always `true`      |
//! | [`guard`]     | `FnMut(&S, &C) -> bool`        | the predicate      |
//!
//! Closures passed directly to a property should annotate their parameter
//! types (`|name: &mut String, _: &mut ()| ...`) so the compiler picks the
//! higher-ranked signature.

use std::fmt;
use std::marker::PhantomData;

/// Callback invoked with the bound state and the context.
///
/// Returning `false` stops the chain it belongs to.
pub trait Transformer<S: ?Sized, C: ?Sized = ()> {
    /// Run against `state`; return whether processing should continue.
    fn transform(&mut self, state: &mut S, context: &mut C) -> bool;
}

impl<S, C, F> Transformer<S, C> for F
where
    S: ?Sized,
    C: ?Sized,
    F: FnMut(&mut S, &mut C) -> bool,
{
    fn transform(&mut self, state: &mut S, context: &mut C) -> bool {
        self(state, context)
    }
}

/// Type-erased transformer as stored in subscriber chains.
pub type BoxedTransformer<'a, S, C = ()> = Box<dyn Transformer<S, C> + 'a>;

/// Combinators available on every transformer.
pub trait TransformerExt<S: ?Sized, C: ?Sized>: Transformer<S, C> + Sized {
    /// Run `self`, then `next` only if `self` continued.
    fn and_then<T>(self, next: T) -> AndThen<Self, T>
    where
        T: Transformer<S, C>,
    {
        AndThen {
            first: self,
            second: next,
        }
    }

    /// Erase the concrete type.
    fn boxed<'a>(self) -> BoxedTransformer<'a, S, C>
    where
        Self: 'a,
    {
        Box::new(self)
    }
}

impl<S: ?Sized, C: ?Sized, T: Transformer<S, C>> TransformerExt<S, C> for T {}

/// Sequential composition; see [`TransformerExt::and_then`].
#[derive(Clone)]
pub struct AndThen<A, B> {
    first: A,
    second: B,
}

impl<S, C, A, B> Transformer<S, C> for AndThen<A, B>
where
    S: ?Sized,
    C: ?Sized,
    A: Transformer<S, C>,
    B: Transformer<S, C>,
{
    fn transform(&mut self, state: &mut S, context: &mut C) -> bool {
        self.first.transform(state, context) && self.second.transform(state, context)
    }
}

impl<A, B> fmt::Debug for AndThen<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AndThen").finish_non_exhaustive()
    }
}

/// Mutating transformer that never vetoes.
pub struct Always<F, S: ?Sized, C: ?Sized> {
    f: F,
    _marker: PhantomData<fn(&mut S, &mut C)>,
}

/// Wrap a mutation that cannot fail.
pub fn always<S, C, F>(f: F) -> Always<F, S, C>
where
    S: ?Sized,
    C: ?Sized,
    F: FnMut(&mut S, &mut C),
{
    Always {
        f,
        _marker: PhantomData,
    }
}

impl<S, C, F> Transformer<S, C> for Always<F, S, C>
where
    S: ?Sized,
    C: ?Sized,
    F: FnMut(&mut S, &mut C),
{
    fn transform(&mut self, state: &mut S, context: &mut C) -> bool {
        (self.f)(state, context);
        true
    }
}

/// Read-only observer that never vetoes.
pub struct Inspect<F, S: ?Sized, C: ?Sized> {
    f: F,
    _marker: PhantomData<fn(&S, &C)>,
}

/// Wrap a read-only observer, the usual shape of a view's handler.
pub fn inspect<S, C, F>(f: F) -> Inspect<F, S, C>
where
    S: ?Sized,
    C: ?Sized,
    F: FnMut(&S, &C),
{
    Inspect {
        f,
        _marker: PhantomData,
    }
}

impl<S, C, F> Transformer<S, C> for Inspect<F, S, C>
where
    S: ?Sized,
    C: ?Sized,
    F: FnMut(&S, &C),
{
    fn transform(&mut self, state: &mut S, context: &mut C) -> bool {
        (self.f)(state, context);
        true
    }
}

/// Read-only predicate; vetoes when it returns `false`.
pub struct Guard<F, S: ?Sized, C: ?Sized> {
    pred: F,
    _marker: PhantomData<fn(&S, &C) -> bool>,
}

/// Wrap a validator, the usual shape of a pre-transform subscriber.
pub fn guard<S, C, F>(pred: F) -> Guard<F, S, C>
where
    S: ?Sized,
    C: ?Sized,
    F: FnMut(&S, &C) -> bool,
{
    Guard {
        pred,
        _marker: PhantomData,
    }
}

impl<S, C, F> Transformer<S, C> for Guard<F, S, C>
where
    S: ?Sized,
    C: ?Sized,
    F: FnMut(&S, &C) -> bool,
{
    fn transform(&mut self, state: &mut S, context: &mut C) -> bool {
        (self.pred)(state, context)
    }
}
