#![forbid(unsafe_code)]

//! Misuse errors.
//!
//! Pipeline rejections are not errors; they are reported through
//! [`CommandStatus`](crate::CommandStatus). The variants here indicate a bug
//! at the call site. Callers decide whether that is fatal.

use crate::handle::SubscriberHandle;

/// Programming error detected by a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BindingError {
    /// The handle was issued by this property but is no longer registered.
    #[error("double unsubscribe: {handle} is no longer registered")]
    AlreadyUnsubscribed {
        /// The offending handle.
        handle: SubscriberHandle,
    },
    /// The handle was issued by a different property.
    #[error("{handle} does not belong to this property")]
    ForeignHandle {
        /// The offending handle.
        handle: SubscriberHandle,
    },
}

impl BindingError {
    /// The handle that triggered the error.
    #[must_use]
    pub const fn handle(&self) -> SubscriberHandle {
        match *self {
            Self::AlreadyUnsubscribed { handle } | Self::ForeignHandle { handle } => handle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::OwnerId;

    #[test]
    fn messages_name_the_handle() {
        let handle = SubscriberHandle::new(OwnerId::next(), 4);
        let err = BindingError::AlreadyUnsubscribed { handle };
        assert!(err.to_string().starts_with("double unsubscribe"));
        assert!(err.to_string().contains("#4"));
        assert_eq!(err.handle(), handle);

        let err = BindingError::ForeignHandle { handle };
        assert!(err.to_string().contains("does not belong"));
    }
}
