use log::debug;

use pakform_types::deployment::completion::{
    CompletionStrategy, CriteriaCompletion, InstallCompletion, ScriptCompletion,
};
use pakform_types::deployment::criteria::{CriteriaKind, Criterion};
use pakform_types::PackagingDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("criterion index {index} is out of range for a list of {len}")]
pub struct IndexOutOfRange {
    pub index: usize,
    pub len: usize,
}

/// Sets `IdentifyApplicationBy`. Switching away from a variant drops its
/// payload entirely; reselecting the active variant is a no-op, so payload
/// edits survive redundant selections.
pub fn select_completion_strategy(
    document: &mut PackagingDescriptor,
    strategy: CompletionStrategy,
) {
    let completion = &mut document.deployment_options.when_to_call_install_complete;
    if completion.strategy() == strategy {
        return;
    }

    debug!("switching completion strategy to {:?}", strategy);
    *completion = match strategy {
        CompletionStrategy::DefiningCriteria => {
            InstallCompletion::DefiningCriteria(CriteriaCompletion::default())
        }
        CompletionStrategy::UseCustomScript => {
            InstallCompletion::UseCustomScript(ScriptCompletion::default())
        }
    };
}

/// Appends a fresh `AppExists` entry combining with `End`. The previous
/// last entry's logical condition is deliberately left untouched.
pub fn add_criterion(list: &mut Vec<Criterion>) {
    list.push(Criterion::new(CriteriaKind::AppExists));
}

/// Removes and returns the entry at `index`, leaving the list untouched
/// when the index is out of range.
pub fn remove_criterion(
    list: &mut Vec<Criterion>,
    index: usize,
) -> Result<Criterion, IndexOutOfRange> {
    if index >= list.len() {
        return Err(IndexOutOfRange {
            index,
            len: list.len(),
        });
    }
    Ok(list.remove(index))
}

/// Replaces the entry's payload with a freshly-initialized one for `kind`.
/// Any previous payload is discarded, even on a same-kind retype.
pub fn retype_criterion(entry: &mut Criterion, kind: CriteriaKind) {
    entry.retype(kind);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pakform_types::deployment::criteria::{
        AppCriteria, CriterionCheck, LogicalCondition, VersionCondition,
    };

    fn document_with_criteria(count: usize) -> PackagingDescriptor {
        let mut document = PackagingDescriptor::default();
        let criteria = document
            .deployment_options
            .when_to_call_install_complete
            .criteria_mut()
            .unwrap();
        for _ in 0..count {
            add_criterion(&mut criteria.defining_criteria);
        }
        document
    }

    #[test]
    fn switching_strategy_and_back_discards_the_criteria_list() {
        let mut document = document_with_criteria(3);

        select_completion_strategy(&mut document, CompletionStrategy::UseCustomScript);
        assert!(document
            .deployment_options
            .when_to_call_install_complete
            .criteria()
            .is_none());

        select_completion_strategy(&mut document, CompletionStrategy::DefiningCriteria);
        let criteria = document
            .deployment_options
            .when_to_call_install_complete
            .criteria()
            .unwrap();
        assert_eq!(criteria.defining_criteria, vec![]);
        assert_eq!(criteria.use_additional_criteria, false);
    }

    #[test]
    fn reselecting_the_active_strategy_keeps_the_payload() {
        let mut document = document_with_criteria(2);

        select_completion_strategy(&mut document, CompletionStrategy::DefiningCriteria);
        let criteria = document
            .deployment_options
            .when_to_call_install_complete
            .criteria()
            .unwrap();
        assert_eq!(criteria.defining_criteria.len(), 2);
    }

    #[test]
    fn added_entries_are_fresh_app_exists_and_leave_predecessors_alone() {
        let mut list = vec![Criterion {
            logical_condition: LogicalCondition::And,
            check: CriterionCheck::fresh(CriteriaKind::RegistryExists),
        }];

        add_criterion(&mut list);

        assert_eq!(list.len(), 2);
        assert_eq!(list[0].logical_condition, LogicalCondition::And);
        assert_eq!(list[1].logical_condition, LogicalCondition::End);
        match &list[1].check {
            CriterionCheck::AppExists { app_criteria } => {
                assert_eq!(*app_criteria, AppCriteria::default());
                assert_eq!(app_criteria.version_condition, VersionCondition::Any);
            }
            other => panic!("unexpected payload: {:?}", other),
        }
    }

    #[test]
    fn out_of_range_removal_reports_and_leaves_the_list_unchanged() {
        let mut list = Vec::new();
        add_criterion(&mut list);
        add_criterion(&mut list);

        let err = remove_criterion(&mut list, 2).unwrap_err();
        assert_eq!(err, IndexOutOfRange { index: 2, len: 2 });
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn removal_returns_the_entry_and_preserves_order() {
        let mut list = Vec::new();
        add_criterion(&mut list);
        add_criterion(&mut list);
        add_criterion(&mut list);
        list[1].retype(CriteriaKind::FileExists);
        list[2].retype(CriteriaKind::RegistryExists);

        let removed = remove_criterion(&mut list, 1).unwrap();
        assert_eq!(removed.kind(), CriteriaKind::FileExists);
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].kind(), CriteriaKind::AppExists);
        assert_eq!(list[1].kind(), CriteriaKind::RegistryExists);
    }

    #[test]
    fn retype_resets_even_for_the_same_kind() {
        let mut entry = Criterion {
            logical_condition: LogicalCondition::End,
            check: CriterionCheck::AppExists {
                app_criteria: AppCriteria::builder()
                    .application_identifier("com.example.app".into())
                    .build(),
            },
        };

        retype_criterion(&mut entry, CriteriaKind::AppExists);
        match &entry.check {
            CriterionCheck::AppExists { app_criteria } => {
                assert_eq!(*app_criteria, AppCriteria::default());
            }
            other => panic!("unexpected payload: {:?}", other),
        }
    }
}
