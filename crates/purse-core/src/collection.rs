//! Replace/remove-by-identifier helpers shared by the ledger and the registry.

use purse_domain::Identifiable;
use uuid::Uuid;

/// Swaps in `record` at the position of the entry with the same id.
/// Returns `false` and leaves `items` untouched when no entry matches.
pub(crate) fn replace_by_id<T: Identifiable>(items: &mut [T], record: T) -> bool {
    match items.iter_mut().find(|item| item.id() == record.id()) {
        Some(slot) => {
            *slot = record;
            true
        }
        None => false,
    }
}

/// Removes every entry carrying `id`, returning the first one removed.
pub(crate) fn remove_by_id<T: Identifiable>(items: &mut Vec<T>, id: Uuid) -> Option<T> {
    let position = items.iter().position(|item| item.id() == id)?;
    let removed = items.remove(position);
    items.retain(|item| item.id() != id);
    Some(removed)
}
