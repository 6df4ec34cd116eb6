#![forbid(unsafe_code)]

//! Command outcomes and transform phases.

use std::fmt;

/// Which subscriber chain a subscription lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformPhase {
    /// Invoked before the command's own transformer.
    Pre,
    /// Invoked after the command's own transformer succeeded.
    Post,
}

impl TransformPhase {
    /// Stable lowercase name, used in log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pre => "pre",
            Self::Post => "post",
        }
    }
}

impl fmt::Display for TransformPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal outcome of a single `run_command` call.
///
/// Variants are ordered by how far the pipeline got.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CommandStatus {
    /// The property holds no state.
    Unbound,
    /// A pre-transform subscriber vetoed; the command did not run.
    PreTransformFailure,
    /// The command's own transformer returned `false`.
    TransformFailure,
    /// A post-transform subscriber returned `false` after the command ran.
    PostTransformFailure,
    /// Every phase continued.
    Success,
}

impl CommandStatus {
    /// Whether every phase continued.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Whether a transformer vetoed (as opposed to the property being
    /// unbound).
    #[must_use]
    pub const fn is_rejection(self) -> bool {
        matches!(
            self,
            Self::PreTransformFailure | Self::TransformFailure | Self::PostTransformFailure
        )
    }

    /// The subscriber chain that vetoed, if any.
    #[must_use]
    pub const fn rejected_phase(self) -> Option<TransformPhase> {
        match self {
            Self::PreTransformFailure => Some(TransformPhase::Pre),
            Self::PostTransformFailure => Some(TransformPhase::Post),
            _ => None,
        }
    }

    /// Whether the command's own transformer was invoked.
    #[must_use]
    pub const fn command_ran(self) -> bool {
        matches!(
            self,
            Self::TransformFailure | Self::PostTransformFailure | Self::Success
        )
    }

    /// `Ok(())` on success, the status otherwise.
    ///
    /// # Errors
    ///
    /// Returns `self` for every status other than [`CommandStatus::Success`].
    pub const fn into_result(self) -> Result<(), CommandStatus> {
        match self {
            Self::Success => Ok(()),
            other => Err(other),
        }
    }

    /// Stable uppercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unbound => "UNBOUND",
            Self::PreTransformFailure => "PRE_TRANSFORM_FAILURE",
            Self::TransformFailure => "TRANSFORM_FAILURE",
            Self::PostTransformFailure => "POST_TRANSFORM_FAILURE",
            Self::Success => "SUCCESS",
        }
    }
}

impl fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [CommandStatus; 5] = [
        CommandStatus::Unbound,
        CommandStatus::PreTransformFailure,
        CommandStatus::TransformFailure,
        CommandStatus::PostTransformFailure,
        CommandStatus::Success,
    ];

    #[test]
    fn only_success_is_success() {
        let successes: Vec<_> = ALL.iter().filter(|s| s.is_success()).collect();
        assert_eq!(successes, vec![&CommandStatus::Success]);
        assert_eq!(CommandStatus::Success.into_result(), Ok(()));
        assert_eq!(
            CommandStatus::TransformFailure.into_result(),
            Err(CommandStatus::TransformFailure)
        );
    }

    #[test]
    fn unbound_is_not_a_rejection() {
        assert!(!CommandStatus::Unbound.is_rejection());
        assert!(!CommandStatus::Success.is_rejection());
        assert!(CommandStatus::PreTransformFailure.is_rejection());
        assert!(CommandStatus::TransformFailure.is_rejection());
        assert!(CommandStatus::PostTransformFailure.is_rejection());
    }

    #[test]
    fn rejected_phase_maps_chain_failures() {
        assert_eq!(
            CommandStatus::PreTransformFailure.rejected_phase(),
            Some(TransformPhase::Pre)
        );
        assert_eq!(
            CommandStatus::PostTransformFailure.rejected_phase(),
            Some(TransformPhase::Post)
        );
        assert_eq!(CommandStatus::TransformFailure.rejected_phase(), None);
    }

    #[test]
    fn command_ran_only_past_pre_chain() {
        assert!(!CommandStatus::Unbound.command_ran());
        assert!(!CommandStatus::PreTransformFailure.command_ran());
        assert!(CommandStatus::TransformFailure.command_ran());
        assert!(CommandStatus::Success.command_ran());
    }

    #[test]
    fn ordering_follows_pipeline_progress() {
        let mut sorted = ALL;
        sorted.sort();
        assert_eq!(sorted, ALL);
    }

    #[test]
    fn display_names() {
        assert_eq!(CommandStatus::Success.to_string(), "SUCCESS");
        assert_eq!(
            CommandStatus::PostTransformFailure.to_string(),
            "POST_TRANSFORM_FAILURE"
        );
        assert_eq!(TransformPhase::Pre.to_string(), "pre");
    }
}
