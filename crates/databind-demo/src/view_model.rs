#![forbid(unsafe_code)]

//! The person view-model: owns the binding and issues rename commands.

use databind::{BindingError, CommandStatus, OrderedProperty, Property, SubscriberHandle, Transformer};
use tracing::info;

use crate::model::{NameChange, PersonModel};

/// Binds one [`PersonModel`] and exposes the "change name" command.
///
/// One property covers the whole model here; binding one property per field
/// works the same way.
pub struct PersonViewModel<'a> {
    person: OrderedProperty<'a, PersonModel, NameChange>,
}

impl std::fmt::Debug for PersonViewModel<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersonViewModel")
            .field("person", &self.person)
            .finish()
    }
}

impl<'a> PersonViewModel<'a> {
    #[must_use]
    pub fn new(person: &'a mut PersonModel) -> Self {
        Self {
            person: Property::new(person),
        }
    }

    /// Subscribe to the pre-transform chain, optionally syncing the
    /// subscriber to the current state first.
    pub fn subscribe_pre<T>(&mut self, transformer: T, execute_on_subscribe: bool) -> SubscriberHandle
    where
        T: Transformer<PersonModel, NameChange> + 'a,
    {
        if execute_on_subscribe {
            self.person
                .execute_and_subscribe_pre_transform(transformer, &mut NameChange::default())
        } else {
            self.person.subscribe_pre_transform(transformer)
        }
    }

    /// Subscribe to the post-transform chain, optionally syncing the
    /// subscriber to the current state first.
    pub fn subscribe_post<T>(&mut self, transformer: T, execute_on_subscribe: bool) -> SubscriberHandle
    where
        T: Transformer<PersonModel, NameChange> + 'a,
    {
        if execute_on_subscribe {
            self.person
                .execute_and_subscribe_post_transform(transformer, &mut NameChange::default())
        } else {
            self.person.subscribe_post_transform(transformer)
        }
    }

    /// # Errors
    ///
    /// Propagates [`BindingError`] for handles this view-model never issued
    /// or already released.
    pub fn unsubscribe(&mut self, handle: SubscriberHandle) -> Result<bool, BindingError> {
        self.person.unsubscribe(handle)
    }

    /// Rename the person through the binding pipeline.
    pub fn change_name(&mut self, first_name: &str, last_name: &str) -> CommandStatus {
        let mut change = NameChange::new(first_name, last_name);
        let status = self.person.run_command(
            |person: &mut PersonModel, change: &mut NameChange| {
                person.set_first_name(&change.first_name);
                person.set_last_name(&change.last_name);
                true
            },
            &mut change,
        );
        info!("Command status : {status}");
        status
    }

    /// Current full name, if bound.
    #[must_use]
    pub fn full_name(&self) -> Option<String> {
        self.person.with(PersonModel::full_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{PersonView, reject_blank_names};

    #[test]
    fn rename_flow_journals_pre_and_post_lines() {
        let view = PersonView::default();
        let mut person = PersonModel::default();
        {
            let mut bindings = PersonViewModel::new(&mut person);
            let pre = bindings.subscribe_pre(view.on_pre_name_change(), true);
            bindings.subscribe_post(view.on_post_name_change(), false);

            assert_eq!(
                bindings.change_name("NewFirstName", "NewLastName"),
                CommandStatus::Success
            );
            assert_eq!(bindings.unsubscribe(pre), Ok(true));
            assert_eq!(
                bindings.change_name("NewestFirstName", "NewestLastName"),
                CommandStatus::Success
            );
            assert_eq!(
                bindings.full_name().as_deref(),
                Some("NewestFirstName NewestLastName")
            );
        }

        assert_eq!(
            view.journal().lines(),
            vec![
                "Pre name change : OldFirstName OldLastName",
                "Pre name change : OldFirstName OldLastName",
                "Post name change : NewFirstName NewLastName",
                "Post name change : NewestFirstName NewestLastName",
            ]
        );
        assert_eq!(person.full_name(), "NewestFirstName NewestLastName");
    }

    #[test]
    fn blank_name_is_vetoed_before_views_run() {
        let view = PersonView::default();
        let mut person = PersonModel::default();
        {
            let mut bindings = PersonViewModel::new(&mut person);
            bindings.subscribe_pre(reject_blank_names(), false);
            bindings.subscribe_pre(view.on_pre_name_change(), false);
            bindings.subscribe_post(view.on_post_name_change(), false);

            assert_eq!(
                bindings.change_name("", "Nobody"),
                CommandStatus::PreTransformFailure
            );
        }
        assert!(view.journal().lines().is_empty());
        assert_eq!(person, PersonModel::default());
    }

    #[test]
    fn double_unsubscribe_surfaces_error() {
        let view = PersonView::default();
        let mut person = PersonModel::default();
        let mut bindings = PersonViewModel::new(&mut person);
        let h = bindings.subscribe_post(view.on_post_name_change(), false);
        assert_eq!(bindings.unsubscribe(h), Ok(true));
        assert!(matches!(
            bindings.unsubscribe(h),
            Err(BindingError::AlreadyUnsubscribed { .. })
        ));
    }
}
