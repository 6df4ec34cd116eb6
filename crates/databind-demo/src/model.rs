#![forbid(unsafe_code)]

//! The person model bound by the demo.

use std::fmt;

/// A person's name. Owned by `main`; the view-model only borrows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonModel {
    first_name: String,
    last_name: String,
}

impl Default for PersonModel {
    fn default() -> Self {
        Self::new("OldFirstName", "OldLastName")
    }
}

impl PersonModel {
    #[must_use]
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// "First Last".
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn set_first_name(&mut self, first_name: &str) {
        first_name.clone_into(&mut self.first_name);
    }

    pub fn set_last_name(&mut self, last_name: &str) {
        last_name.clone_into(&mut self.last_name);
    }
}

impl fmt::Display for PersonModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

/// A requested rename, threaded through every transformer as the command
/// context so pre-transform validators can see the proposed value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameChange {
    pub first_name: String,
    pub last_name: String,
}

impl NameChange {
    #[must_use]
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Whether either part is blank.
    #[must_use]
    pub fn has_blank_part(&self) -> bool {
        self.first_name.trim().is_empty() || self.last_name.trim().is_empty()
    }
}
