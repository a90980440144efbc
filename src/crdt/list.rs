// model = "claude-opus-4-5"
// created = "2026-10-16"
// modified = "2026-10-16"
// driver = "Isaac Clayton"

//! Tombstone-aware indexing over a list container's slots.
//!
//! A list keeps every entry it ever held, live or tombstoned, in one
//! physical sequence. Callers address it by *logical* position, which
//! counts live entries only. These helpers translate between the two and
//! pick where a new element goes.
//!
//! ```text
//! physical:  0    1     2    3
//! entries:  [A]  [B†]  [C]  [D]      († = tombstone)
//! logical:   0          1    2
//! ```
//!
//! # Insertion order
//!
//! An insert names an anchor: the element it goes after, or the head. From
//! just past the anchor we walk forward over every entry whose identity
//! sorts before the new one. Concurrent inserts at one anchor therefore end
//! up in identity order, whichever arrives first.
//!
//! Complexity: every helper is O(n) in the physical length.

use super::primitives::Id;
use super::store::Entry;

/// Map a logical position to its physical slot.
///
/// Returns `None` if there are not enough live entries.
pub fn logical_to_physical(entries: &[Entry], logical: usize) -> Option<usize> {
    let mut seen = 0;
    for (physical, entry) in entries.iter().enumerate() {
        if !entry.is_live() {
            continue;
        }
        if seen == logical {
            return Some(physical);
        }
        seen += 1;
    }
    return None;
}

/// The live entry at a logical position.
pub fn live_at(entries: &[Entry], logical: usize) -> Option<&Entry> {
    return logical_to_physical(entries, logical).map(|physical| &entries[physical]);
}

/// Number of live entries.
pub fn live_len(entries: &[Entry]) -> usize {
    return entries.iter().filter(|e| e.is_live()).count();
}

/// Iterate live entries in order.
pub fn live(entries: &[Entry]) -> impl Iterator<Item = &Entry> {
    return entries.iter().filter(|e| e.is_live());
}

/// Physical slot of the entry with the given identity, tombstoned or not.
pub fn position_of(entries: &[Entry], id: &Id) -> Option<usize> {
    return entries.iter().position(|e| e.id == *id);
}

/// Where an element with identity `id`, inserted after `anchor`, belongs.
///
/// Returns `None` when the anchor is not in the list.
pub fn insertion_point(entries: &[Entry], anchor: Option<&Id>, id: &Id) -> Option<usize> {
    let mut index = match anchor {
        Some(anchor) => position_of(entries, anchor)? + 1,
        None => 0,
    };
    while index < entries.len() && entries[index].id < *id {
        index += 1;
    }
    return Some(index);
}

/// Splice an entry in at a physical slot.
pub fn splice_insert(entries: &mut Vec<Entry>, physical: usize, entry: Entry) {
    entries.insert(physical, entry);
}

/// Replace the live entry at a logical position.
///
/// Returns the replaced entry, or `None` (leaving the list untouched) when
/// the position is past the live end.
pub fn overwrite_at(entries: &mut [Entry], logical: usize, entry: Entry) -> Option<Entry> {
    let physical = logical_to_physical(entries, logical)?;
    return Some(std::mem::replace(&mut entries[physical], entry));
}
