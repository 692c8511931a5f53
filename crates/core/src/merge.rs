//! Merge-list planning for the bulk upsert endpoints.
//!
//! Staffing, phases and task assignments are edited as whole lists: the client
//! sends every row it knows about, new rows without an id. The planners here
//! decide, per incoming item, whether it becomes an insert or an update. The
//! repositories then apply the plan inside a single transaction.

use std::collections::{HashMap, HashSet};

use crate::types::DbId;

/// What to do with one incoming item of an id-merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeAction {
    /// Insert `incoming[item]` under the parent.
    Insert { item: usize },
    /// Overwrite row `id` with `incoming[item]`.
    Update { id: DbId, item: usize },
    /// `incoming[item]` names a row that does not belong to the parent.
    Skip { id: DbId, item: usize },
}

/// How [`plan_id_merge`] treats an id that does not belong to the parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForeignIds {
    /// Leave the item out of the merge.
    Skip,
    /// Treat the item as new and insert it under the parent.
    Insert,
}

/// Plan a merge keyed purely on row id.
///
/// Items without an id are inserted; items whose id is among `existing_ids`
/// update that row. Any other id never touches the row it names: depending
/// on `foreign` the item is skipped or inserted as a fresh row.
pub fn plan_id_merge(
    existing_ids: &[DbId],
    incoming_ids: &[Option<DbId>],
    foreign: ForeignIds,
) -> Vec<MergeAction> {
    let known: HashSet<DbId> = existing_ids.iter().copied().collect();
    incoming_ids
        .iter()
        .enumerate()
        .map(|(item, id)| match (id, foreign) {
            (None, _) => MergeAction::Insert { item },
            (Some(id), _) if known.contains(id) => MergeAction::Update { id: *id, item },
            (Some(id), ForeignIds::Skip) => MergeAction::Skip { id: *id, item },
            (Some(_), ForeignIds::Insert) => MergeAction::Insert { item },
        })
        .collect()
}

/// An existing child row as seen by [`plan_keyed_merge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyedRow {
    pub id: DbId,
    pub key: DbId,
}

/// An incoming item as seen by [`plan_keyed_merge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyedItem {
    pub id: Option<DbId>,
    pub key: DbId,
}

/// What to do with one incoming item of a keyed merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyedAction {
    Insert { item: usize },
    Update { id: DbId, item: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Existing(DbId),
    Pending(usize),
}

/// Plan a merge that matches by id first and by a secondary key second.
///
/// Used for task assignments, where the secondary key is the user: resending
/// a user without an assignment id updates that user's existing row instead
/// of creating a duplicate. Items later in the batch see earlier ones, so two
/// new items for the same key collapse into a single insert carrying the last
/// payload. An update by id that changes the key re-homes the row under the
/// new key.
pub fn plan_keyed_merge(existing: &[KeyedRow], incoming: &[KeyedItem]) -> Vec<KeyedAction> {
    let known: HashSet<DbId> = existing.iter().map(|row| row.id).collect();
    let mut by_key: HashMap<DbId, Target> = existing
        .iter()
        .map(|row| (row.key, Target::Existing(row.id)))
        .collect();
    let mut actions: Vec<KeyedAction> = Vec::with_capacity(incoming.len());

    for (item, incoming) in incoming.iter().enumerate() {
        if let Some(id) = incoming.id.filter(|id| known.contains(id)) {
            by_key.retain(|_, target| *target != Target::Existing(id));
            by_key.insert(incoming.key, Target::Existing(id));
            actions.push(KeyedAction::Update { id, item });
            continue;
        }

        match by_key.get(&incoming.key).copied() {
            Some(Target::Existing(id)) => actions.push(KeyedAction::Update { id, item }),
            Some(Target::Pending(slot)) => {
                if let Some(KeyedAction::Insert { item: pending }) = actions.get_mut(slot) {
                    *pending = item;
                }
            }
            None => {
                by_key.insert(incoming.key, Target::Pending(actions.len()));
                actions.push(KeyedAction::Insert { item });
            }
        }
    }

    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: DbId, key: DbId) -> KeyedRow {
        KeyedRow { id, key }
    }

    fn item(id: Option<DbId>, key: DbId) -> KeyedItem {
        KeyedItem { id, key }
    }

    // -- plan_id_merge --

    #[test]
    fn id_merge_inserts_updates_and_skips() {
        let plan = plan_id_merge(&[10, 11], &[None, Some(11), Some(99)], ForeignIds::Skip);
        assert_eq!(
            plan,
            vec![
                MergeAction::Insert { item: 0 },
                MergeAction::Update { id: 11, item: 1 },
                MergeAction::Skip { id: 99, item: 2 },
            ]
        );
    }

    #[test]
    fn id_merge_on_empty_parent_only_inserts() {
        let plan = plan_id_merge(&[], &[None, None, Some(3)], ForeignIds::Skip);
        assert_eq!(plan[0], MergeAction::Insert { item: 0 });
        assert_eq!(plan[1], MergeAction::Insert { item: 1 });
        assert_eq!(plan[2], MergeAction::Skip { id: 3, item: 2 });
    }

    #[test]
    fn id_merge_empty_batch_is_noop() {
        assert!(plan_id_merge(&[1, 2], &[], ForeignIds::Skip).is_empty());
    }

    #[test]
    fn id_merge_can_insert_foreign_ids() {
        let plan = plan_id_merge(&[10], &[Some(10), Some(99), None], ForeignIds::Insert);
        assert_eq!(
            plan,
            vec![
                MergeAction::Update { id: 10, item: 0 },
                MergeAction::Insert { item: 1 },
                MergeAction::Insert { item: 2 },
            ]
        );
    }

    // -- plan_keyed_merge --

    #[test]
    fn keyed_merge_matches_by_id() {
        let plan = plan_keyed_merge(&[row(1, 100)], &[item(Some(1), 100)]);
        assert_eq!(plan, vec![KeyedAction::Update { id: 1, item: 0 }]);
    }

    #[test]
    fn keyed_merge_falls_back_to_key() {
        let plan = plan_keyed_merge(&[row(1, 100), row(2, 200)], &[item(None, 200)]);
        assert_eq!(plan, vec![KeyedAction::Update { id: 2, item: 0 }]);
    }

    #[test]
    fn keyed_merge_unknown_id_uses_key() {
        // An id from another task is ignored; the user key still matches.
        let plan = plan_keyed_merge(&[row(1, 100)], &[item(Some(42), 100)]);
        assert_eq!(plan, vec![KeyedAction::Update { id: 1, item: 0 }]);
    }

    #[test]
    fn keyed_merge_inserts_new_key() {
        let plan = plan_keyed_merge(&[row(1, 100)], &[item(None, 300)]);
        assert_eq!(plan, vec![KeyedAction::Insert { item: 0 }]);
    }

    #[test]
    fn keyed_merge_collapses_duplicate_new_keys() {
        let plan = plan_keyed_merge(&[], &[item(None, 300), item(None, 301), item(None, 300)]);
        assert_eq!(
            plan,
            vec![KeyedAction::Insert { item: 2 }, KeyedAction::Insert { item: 1 }]
        );
    }

    #[test]
    fn keyed_merge_rekeys_on_update_by_id() {
        // Row 1 moves from user 100 to user 500; a later item for user 100
        // no longer matches it and becomes an insert.
        let plan = plan_keyed_merge(
            &[row(1, 100)],
            &[item(Some(1), 500), item(None, 100), item(None, 500)],
        );
        assert_eq!(
            plan,
            vec![
                KeyedAction::Update { id: 1, item: 0 },
                KeyedAction::Insert { item: 1 },
                KeyedAction::Update { id: 1, item: 2 },
            ]
        );
    }
}
