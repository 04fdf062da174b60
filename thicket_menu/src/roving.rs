// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Roving focus over a menu roster.
//!
//! Candidates are the non-hidden roster entries in registration order.
//! Disabled entries stay in the candidate list — a disabled menu item is
//! focusable, just not activatable. The current position is tracked by the
//! last-focused element's identity rather than a stored index, so the walk
//! tolerates out-of-band focus changes: when the tracked element is no longer
//! a candidate, `ArrowDown` restarts from the first slot and `ArrowUp` from
//! the last before stepping.

use crate::roster::ItemEntry;
use thicket_events::types::Key;

/// Focus target for a roving-focus key, or `None` for unhandled keys and
/// empty rosters.
pub fn focus_target<K: Copy + Eq>(
    entries: &[ItemEntry<K>],
    active: Option<K>,
    key: Key,
) -> Option<K> {
    let focusable: smallvec::SmallVec<[K; 8]> = entries
        .iter()
        .filter(|entry| !entry.is_hidden())
        .map(|entry| entry.element)
        .collect();
    let last = focusable.len().checked_sub(1)?;

    let position = |active: Option<K>| -> Option<usize> {
        active.and_then(|el| focusable.iter().position(|&candidate| candidate == el))
    };

    let index = match key {
        Key::Home => 0,
        Key::End => last,
        Key::ArrowUp => {
            let i = position(active).unwrap_or(last);
            if i == 0 { last } else { i - 1 }
        }
        Key::ArrowDown => {
            let i = position(active).unwrap_or(0);
            if i >= last { 0 } else { i + 1 }
        }
        _ => return None,
    };

    Some(focusable[index])
}

/// Initial focus target when the menu opens from a keyboard event.
///
/// `ArrowUp` lands on the last non-hidden entry; `Space`, `Enter`, and
/// `ArrowDown` on the first; every other key leaves focus alone.
pub fn initial_focus<K: Copy + Eq>(entries: &[ItemEntry<K>], key: Key) -> Option<K> {
    let mut focusable = entries.iter().filter(|entry| !entry.is_hidden());
    match key {
        Key::ArrowUp => focusable.last().map(|entry| entry.element),
        Key::Space | Key::Enter | Key::ArrowDown => focusable.next().map(|entry| entry.element),
        _ => None,
    }
}
