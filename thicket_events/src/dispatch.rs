// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Command dispatch: cancelable fan-out to registered listeners.
//!
//! The dropdown owns the listener set; menu items submit their activations
//! through it. Dispatch is deliberately simple:
//!
//! - Listeners run synchronously, in registration order, and **all of them**
//!   run — cancellation does not short-circuit the fan-out, it only changes
//!   the return value.
//! - [`dispatch_command`] returns `false` iff any listener answered
//!   [`EventStatus::Canceled`]. The caller must then abandon the interaction:
//!   no checked-state mutation, no close request, and no `commanded`.
//! - [`dispatch_commanded`] is the non-cancelable counterpart and always runs
//!   to completion.
//!
//! The ordering contract between the two is the caller's: `command` must be
//! fully settled — including the cancellation decision — before any state is
//! mutated, and `commanded` fires only afterwards.
//!
//! ## Minimal example
//!
//! ```rust
//! use thicket_events::dispatch::{dispatch_command, dispatch_commanded, CommandListener};
//! use thicket_events::types::{CommandDetail, EventStatus};
//!
//! #[derive(Default)]
//! struct Recorder {
//!     commands: usize,
//!     commanded: usize,
//! }
//!
//! impl CommandListener<u32, u32> for Recorder {
//!     fn command(&mut self, _detail: &CommandDetail<u32, u32>) -> EventStatus {
//!         self.commands += 1;
//!         EventStatus::Propagate
//!     }
//!     fn commanded(&mut self, _detail: &CommandDetail<u32, u32>) {
//!         self.commanded += 1;
//!     }
//! }
//!
//! let detail = CommandDetail { command: Some(1), related_target: Some(9_u32) };
//! let mut recorder = Recorder::default();
//! let mut listeners: [&mut dyn CommandListener<u32, u32>; 1] = [&mut recorder];
//!
//! assert!(dispatch_command(&mut listeners, &detail));
//! dispatch_commanded(&mut listeners, &detail);
//! assert_eq!((recorder.commands, recorder.commanded), (1, 1));
//! ```

use crate::types::{CommandDetail, EventStatus};

/// A registered observer of dropdown command events.
///
/// Both methods default to no-ops so hosts only implement what they care
/// about. To emulate per-event listener lists, proxy them inside a single
/// implementation.
pub trait CommandListener<C, K> {
    /// Cancelable activation notice, fired before any state change.
    fn command(&mut self, detail: &CommandDetail<C, K>) -> EventStatus {
        let _ = detail;
        EventStatus::Propagate
    }

    /// Non-cancelable completion notice, fired after the interaction settled.
    fn commanded(&mut self, detail: &CommandDetail<C, K>) {
        let _ = detail;
    }
}

/// Fan a cancelable `command` event out to every listener.
///
/// Returns `true` when no listener canceled; `false` tells the caller to
/// abandon the interaction.
pub fn dispatch_command<C, K>(
    listeners: &mut [&mut dyn CommandListener<C, K>],
    detail: &CommandDetail<C, K>,
) -> bool {
    let mut proceed = true;
    for listener in listeners.iter_mut() {
        if listener.command(detail) == EventStatus::Canceled {
            proceed = false;
        }
    }
    proceed
}

/// Fan a non-cancelable `commanded` event out to every listener.
pub fn dispatch_commanded<C, K>(
    listeners: &mut [&mut dyn CommandListener<C, K>],
    detail: &CommandDetail<C, K>,
) {
    for listener in listeners.iter_mut() {
        listener.commanded(detail);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    struct Tap {
        log: Vec<&'static str>,
        cancel: bool,
    }

    impl Tap {
        fn new(cancel: bool) -> Self {
            Self {
                log: Vec::new(),
                cancel,
            }
        }
    }

    impl CommandListener<u8, u32> for Tap {
        fn command(&mut self, _detail: &CommandDetail<u8, u32>) -> EventStatus {
            self.log.push("command");
            if self.cancel {
                EventStatus::Canceled
            } else {
                EventStatus::Propagate
            }
        }

        fn commanded(&mut self, _detail: &CommandDetail<u8, u32>) {
            self.log.push("commanded");
        }
    }

    fn detail() -> CommandDetail<u8, u32> {
        CommandDetail {
            command: Some(1),
            related_target: Some(42),
        }
    }

    #[test]
    fn uncanceled_dispatch_returns_true() {
        let mut a = Tap::new(false);
        let mut b = Tap::new(false);
        let mut listeners: [&mut dyn CommandListener<u8, u32>; 2] = [&mut a, &mut b];
        assert!(dispatch_command(&mut listeners, &detail()));
        assert_eq!(a.log, ["command"]);
        assert_eq!(b.log, ["command"]);
    }

    #[test]
    fn any_cancel_vetoes_but_all_listeners_run() {
        let mut a = Tap::new(true);
        let mut b = Tap::new(false);
        let mut listeners: [&mut dyn CommandListener<u8, u32>; 2] = [&mut a, &mut b];
        assert!(!dispatch_command(&mut listeners, &detail()));
        // The second listener still observed the event.
        assert_eq!(b.log, ["command"]);
    }

    #[test]
    fn commanded_reaches_every_listener() {
        let mut a = Tap::new(false);
        let mut b = Tap::new(true);
        let mut listeners: [&mut dyn CommandListener<u8, u32>; 2] = [&mut a, &mut b];
        dispatch_commanded(&mut listeners, &detail());
        assert_eq!(a.log, ["commanded"]);
        assert_eq!(b.log, ["commanded"]);
    }
}
