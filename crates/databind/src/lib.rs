#![forbid(unsafe_code)]

//! Bindable properties for model / view / view-model data binding.
//!
//! A [`Property`] borrows a piece of externally owned state and routes every
//! mutation through a three-phase pipeline:
//!
//! 1. the **pre-transform** chain, whose subscribers may veto the change,
//! 2. the **command** transformer, which performs the mutation,
//! 3. the **post-transform** chain, notified after a successful mutation.
//!
//! Views subscribe [`Transformer`]s into either chain and receive a
//! [`SubscriberHandle`] for later removal; view-models issue commands with
//! [`Property::run_command`] and inspect the returned [`CommandStatus`].
//!
//! # Example
//!
//! ```
//! use databind::{CommandStatus, OrderedProperty, Property, always, inspect};
//!
//! let mut name = String::from("Old Old");
//! let mut prop: OrderedProperty<'_, String> = Property::new(&mut name);
//!
//! let pre = prop.subscribe_pre_transform(|name: &mut String, _: &mut ()| !name.is_empty());
//! prop.execute_and_subscribe_post_transform(inspect(|name: &String, _: &()| {
//!     println!("name is now {name}");
//! }), &mut ());
//!
//! let status = prop.run(always(|name: &mut String, _: &mut ()| *name = "New New".into()));
//! assert_eq!(status, CommandStatus::Success);
//!
//! assert_eq!(prop.unsubscribe(pre), Ok(true));
//! assert_eq!(prop.state().map(String::as_str), Some("New New"));
//! ```
//!
//! # Threading
//!
//! Properties are single-threaded. Every subscriber runs synchronously on
//! the calling thread inside the call that triggered it.

pub mod chains;
pub mod error;
pub mod handle;
pub mod property;
pub mod status;
pub mod transformer;

pub use chains::{OrderedChains, SubscriberChains};
pub use error::BindingError;
pub use handle::{OwnerId, SubscriberHandle};
pub use property::{OrderedProperty, Property};
pub use status::{CommandStatus, TransformPhase};
pub use transformer::{
    AndThen, Always, BoxedTransformer, Guard, Inspect, Transformer, TransformerExt, always, guard,
    inspect,
};
