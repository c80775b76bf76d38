//! Arbitration between transient hover previews and sticky selections.
//!
//! The machine starts in `Hovering` and moves to `Locked` the first time a
//! click resolves to a BPOU, a search succeeds, or a geolocation read
//! succeeds. `Locked` is terminal for the session: hover events are
//! suppressed from then on, while later clicks re-run full resolution
//! without ever unlocking.

/// Current machine state. There is no transition out of `Locked`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InteractionState {
    Hovering,
    Locked,
}

/// What a completed hover resolution should do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HoverOutcome {
    /// The resolved BPOU differs from the last hovered one: update the
    /// preview display.
    Update(Option<String>),
    /// Same BPOU as before; skip the redraw.
    Unchanged,
    /// An older in-flight hover finished after a newer one; discard it.
    Stale,
    /// The machine is locked; hover no longer drives the display.
    Suppressed,
}

/// Tracks hover/lock state for one widget session.
///
/// Hover resolutions may overlap in flight; the last *completed* one is
/// authoritative. Sequence numbers from [`begin_hover`] make discarding
/// stale completions a cheap comparison instead of serializing hovers.
///
/// [`begin_hover`]: InteractionTracker::begin_hover
#[derive(Debug, Default)]
pub struct InteractionTracker {
    locked: bool,
    last_hovered: Option<String>,
    issued: u64,
    completed: u64,
}

impl InteractionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> InteractionState {
        if self.locked {
            InteractionState::Locked
        } else {
            InteractionState::Hovering
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// The BPOU name from the newest completed hover, if any.
    pub fn last_hovered(&self) -> Option<&str> {
        self.last_hovered.as_deref()
    }

    /// Issues a sequence number for a hover resolution about to start.
    pub fn begin_hover(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Reports a completed hover resolution of the point under `seq`.
    pub fn finish_hover(&mut self, seq: u64, bpou_name: Option<&str>) -> HoverOutcome {
        if self.locked {
            return HoverOutcome::Suppressed;
        }
        if seq < self.completed {
            return HoverOutcome::Stale;
        }
        self.completed = seq;

        if self.last_hovered.as_deref() == bpou_name {
            return HoverOutcome::Unchanged;
        }
        self.last_hovered = bpou_name.map(str::to_string);
        HoverOutcome::Update(self.last_hovered.clone())
    }

    /// Enters `Locked`. Called on click-with-BPOU, successful search, or
    /// successful geolocation. Idempotent; never reversed.
    pub fn lock(&mut self) {
        self.locked = true;
    }
}
