//! Deck controller
//!
//! Owns the aggregated items and the circular `current_index`. A swipe is
//! committed in two phases: [`DeckController::commit_swipe`] makes the
//! decision (and opens the URL for a right swipe) synchronously, and the
//! index moves later in [`DeckController::apply_advance`] when the delayed
//! advance for that commit is delivered.

use std::collections::HashMap;

use log::{debug, info, warn};
use swipedeck_model::{AccentColor, Project};

use crate::domains::gesture::SwipeDirection;
use crate::error::{DeckError, DeckResult};
use crate::infra::scheduler::TaskHandle;
use crate::infra::services::NavigationSink;

/// Identifies one swipe commit and its single pending advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommitId(u64);

/// The two cards a renderer shows.
#[derive(Debug, Clone, PartialEq)]
pub struct CardPair {
    pub current: Project,
    /// Card peeking out behind; `None` when the deck has a single project
    pub next: Option<Project>,
    /// Background theme for the current card
    pub accent: AccentColor,
}

#[derive(Debug, Default)]
pub struct DeckController {
    items: Vec<Project>,
    current_index: usize,
    pending: HashMap<CommitId, Option<TaskHandle>>,
    next_commit: u64,
}

impl DeckController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the deck and return to the first card. Advances still in
    /// flight for the previous deck are cancelled.
    pub fn initialize(&mut self, items: Vec<Project>) {
        self.cancel_pending();
        info!("[Deck] Initialized with {} projects", items.len());
        self.items = items;
        self.current_index = 0;
    }

    /// Drop all cards, as on disconnect.
    pub fn clear(&mut self) {
        self.initialize(Vec::new());
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Project] {
        &self.items
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current(&self) -> DeckResult<&Project> {
        self.items
            .get(self.current_index)
            .ok_or(DeckError::NoProjects)
    }

    /// The card after the current one, wrapping. With a single project this
    /// is the current project again.
    pub fn next(&self) -> DeckResult<&Project> {
        if self.items.is_empty() {
            return Err(DeckError::NoProjects);
        }
        let index = (self.current_index + 1) % self.items.len();
        Ok(&self.items[index])
    }

    pub fn cards(&self) -> Option<CardPair> {
        let current = self.current().ok()?.clone();
        let next = if self.items.len() > 1 {
            self.next().ok().cloned()
        } else {
            None
        };
        Some(CardPair {
            accent: current.accent_color(),
            current,
            next,
        })
    }

    pub fn theme_color(&self) -> AccentColor {
        self.current()
            .map(Project::accent_color)
            .unwrap_or(AccentColor::BACKDROP)
    }

    /// Decide a swipe on the current card.
    ///
    /// A right swipe opens the current URL first. Failing to open it is
    /// logged and does not stop the commit. The returned id must be
    /// delivered back to [`DeckController::apply_advance`] once the advance
    /// delay has elapsed.
    pub fn commit_swipe(
        &mut self,
        direction: SwipeDirection,
        navigator: &dyn NavigationSink,
    ) -> DeckResult<CommitId> {
        let current = self.current()?;
        if direction == SwipeDirection::Right {
            debug!("[Deck] Opening {}", current.url());
            if let Err(e) = navigator.open_external(current.url()) {
                warn!("[Deck] {}", e);
            }
        }

        self.next_commit += 1;
        let commit = CommitId(self.next_commit);
        self.pending.insert(commit, None);
        debug!(
            "[Deck] Committed {:?} on index {} as {:?}",
            direction, self.current_index, commit
        );
        Ok(commit)
    }

    /// Associate the scheduled advance with its commit so a later
    /// [`DeckController::initialize`] can cancel it.
    pub fn track_advance(&mut self, commit: CommitId, handle: TaskHandle) {
        match self.pending.get_mut(&commit) {
            Some(slot) => *slot = Some(handle),
            None => handle.cancel(),
        }
    }

    pub fn has_pending_advance(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Move to the next card for `commit`. Returns `false` when the commit
    /// has already advanced or belongs to a replaced deck.
    pub fn apply_advance(&mut self, commit: CommitId) -> bool {
        if self.pending.remove(&commit).is_none() {
            debug!("[Deck] Ignoring advance for settled {:?}", commit);
            return false;
        }
        if self.items.is_empty() {
            return false;
        }
        self.current_index = (self.current_index + 1) % self.items.len();
        debug!("[Deck] Advanced to index {}", self.current_index);
        true
    }

    fn cancel_pending(&mut self) {
        for handle in self.pending.drain().filter_map(|(_, h)| h) {
            handle.cancel();
        }
    }
}
