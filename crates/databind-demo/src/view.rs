#![forbid(unsafe_code)]

//! The person view: logs every name change it is told about.

use std::cell::RefCell;
use std::rc::Rc;

use databind::{Guard, Inspect, guard, inspect};
use tracing::{debug, info};

use crate::model::{NameChange, PersonModel};

/// Shared, append-only record of the lines a view has emitted.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    lines: Rc<RefCell<Vec<String>>>,
}

impl Journal {
    pub fn push(&self, line: String) {
        self.lines.borrow_mut().push(line);
    }

    /// Snapshot of every line so far.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

type Handler = Inspect<Box<dyn FnMut(&PersonModel, &NameChange)>, PersonModel, NameChange>;

/// Observes the person model through the view-model's property.
#[derive(Debug, Clone, Default)]
pub struct PersonView {
    journal: Journal,
}

impl PersonView {
    #[must_use]
    pub fn new(journal: Journal) -> Self {
        Self { journal }
    }

    #[must_use]
    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Pre-transform handler: reports the name about to be replaced.
    #[must_use]
    pub fn on_pre_name_change(&self) -> Handler {
        self.handler("Pre name change")
    }

    /// Post-transform handler: reports the name after the change.
    #[must_use]
    pub fn on_post_name_change(&self) -> Handler {
        self.handler("Post name change")
    }

    fn handler(&self, label: &'static str) -> Handler {
        let journal = self.journal.clone();
        let log: Box<dyn FnMut(&PersonModel, &NameChange)> =
            Box::new(move |person: &PersonModel, _: &NameChange| {
                let line = format!("{label} : {}", person.full_name());
                info!("{line}");
                journal.push(line);
            });
        inspect(log)
    }
}

/// Pre-transform validator vetoing renames with a blank part.
pub fn reject_blank_names()
-> Guard<impl FnMut(&PersonModel, &NameChange) -> bool, PersonModel, NameChange> {
    guard(|_: &PersonModel, change: &NameChange| {
        let ok = !change.has_blank_part();
        if !ok {
            debug!(?change, "rejecting blank name");
        }
        ok
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use databind::Transformer;

    #[test]
    fn handlers_log_full_name() {
        let view = PersonView::default();
        let mut person = PersonModel::default();
        let mut change = NameChange::default();

        assert!(view.on_pre_name_change().transform(&mut person, &mut change));
        person.set_first_name("A");
        assert!(view.on_post_name_change().transform(&mut person, &mut change));

        assert_eq!(
            view.journal().lines(),
            vec![
                "Pre name change : OldFirstName OldLastName",
                "Post name change : A OldLastName",
            ]
        );
    }

    #[test]
    fn cloned_views_share_a_journal() {
        let view = PersonView::default();
        let other = view.clone();
        other.journal().push("x".into());
        assert_eq!(view.journal().lines(), vec!["x"]);
    }

    #[test]
    fn validator_checks_the_proposed_name() {
        let mut person = PersonModel::default();
        let mut v = reject_blank_names();
        assert!(v.transform(&mut person, &mut NameChange::new("A", "B")));
        assert!(!v.transform(&mut person, &mut NameChange::new("", "B")));
    }
}
