#![forbid(unsafe_code)]

//! Model / view / view-model walkthrough for `databind`.
//!
//! - [`model`]: the bound [`model::PersonModel`] and the
//!   [`model::NameChange`] command context.
//! - [`view`]: logging handlers and a blank-name validator.
//! - [`view_model`]: owns the property and issues rename commands.
//! - [`cli`]: command-line and environment options for the binary.

pub mod cli;
pub mod model;
pub mod view;
pub mod view_model;
