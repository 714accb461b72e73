use crate::model::Track;
use crate::reorder;
use log::debug;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("index {index} is out of range for a queue of {len}")]
    OutOfRange { index: usize, len: usize },
}

/// Emitted to subscribers after a mutation commits. Subscribers never
/// observe intermediate state: the queue and pointer are already
/// consistent when the event fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueEvent {
    Enqueued { index: usize },
    Removed { index: usize },
    Cleared,
    HistoryCleared,
    CurrentChanged { index: Option<usize> },
    Moved { from: usize, to: usize },
    Shuffled,
}

type Listener = Box<dyn FnMut(&QueueEvent)>;

/// Sole owner of the play queue, the current-position pointer, and the
/// append-only history log. All mutation goes through this type; reads
/// are recomputed from the latest committed state on every call.
///
/// Single-threaded by design: callers on multiple threads must
/// serialize access themselves.
pub struct QueueStore {
    items: Vec<Track>,
    current: Option<usize>,
    history: Vec<Track>,
    rng: SmallRng,
    listeners: Vec<Listener>,
}

impl QueueStore {
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_os_rng())
    }

    /// Same store with a caller-supplied RNG, so shuffle behavior can
    /// be pinned down with a seed in tests.
    pub fn with_rng(rng: SmallRng) -> Self {
        Self {
            items: Vec::new(),
            current: None,
            history: Vec::new(),
            rng,
            listeners: Vec::new(),
        }
    }

    pub fn queue(&self) -> &[Track] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.items.get(self.current?)
    }

    pub fn history(&self) -> &[Track] {
        &self.history
    }

    /// Most-recent-first view of the last `n` history entries. The log
    /// itself is unbounded; limiting is the reader's concern.
    pub fn recent_history(&self, n: usize) -> Vec<&Track> {
        self.history.iter().rev().take(n).collect()
    }

    /// Number of items strictly after the current one. With no active
    /// item the whole queue is upcoming.
    pub fn upcoming_count(&self) -> usize {
        match self.current {
            Some(current) => self.items.len().saturating_sub(current + 1),
            None => self.items.len(),
        }
    }

    /// Registers a listener called after every committed mutation.
    pub fn subscribe(&mut self, listener: impl FnMut(&QueueEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn enqueue(&mut self, track: Track) {
        self.items.push(track);
        let index = self.items.len() - 1;
        self.notify(QueueEvent::Enqueued { index });
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Track, QueueError> {
        self.check_index(index)?;
        let removed = self.items.remove(index);
        self.current = match self.current {
            Some(current) if index < current => Some(current - 1),
            Some(current) if index == current => {
                if self.items.is_empty() {
                    None
                } else {
                    Some(current.min(self.items.len() - 1))
                }
            }
            other => other,
        };
        self.notify(QueueEvent::Removed { index });
        Ok(removed)
    }

    /// Empties the queue and deactivates the pointer. History is kept;
    /// clearing it is a separate, explicit call.
    pub fn clear(&mut self) {
        if self.items.is_empty() && self.current.is_none() {
            return;
        }
        self.items.clear();
        self.current = None;
        debug!("queue cleared");
        self.notify(QueueEvent::Cleared);
    }

    pub fn clear_history(&mut self) {
        if self.history.is_empty() {
            return;
        }
        self.history.clear();
        self.notify(QueueEvent::HistoryCleared);
    }

    /// Activates the item at `index`. The outgoing current item, if
    /// any, is logged to history; re-selecting the already-current
    /// index is a no-op and logs nothing.
    pub fn set_current(&mut self, index: usize) -> Result<(), QueueError> {
        self.check_index(index)?;
        if self.current == Some(index) {
            return Ok(());
        }
        if let Some(previous) = self.current {
            self.history.push(self.items[previous].clone());
        }
        self.current = Some(index);
        self.notify(QueueEvent::CurrentChanged { index: Some(index) });
        Ok(())
    }

    /// Relocates the item at `from` to `to`, keeping the relative order
    /// of everything else. The pointer follows the moved item when it
    /// was current, and shifts by one when it sits inside the displaced
    /// span.
    pub fn move_in_queue(&mut self, from: usize, to: usize) -> Result<(), QueueError> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from == to {
            return Ok(());
        }
        reorder::relocate(&mut self.items, from, to);
        self.current = self.current.map(|current| {
            if current == from {
                to
            } else if from < current && current <= to {
                current - 1
            } else if to <= current && current < from {
                current + 1
            } else {
                current
            }
        });
        self.notify(QueueEvent::Moved { from, to });
        Ok(())
    }

    /// Uniform reshuffle of the entire queue. The currently active item
    /// is not pinned; the pointer follows it to wherever it lands.
    /// Queues of fewer than two items are left untouched.
    pub fn shuffle(&mut self) {
        if self.items.len() < 2 {
            return;
        }
        self.current = reorder::shuffle_tracking(&mut self.items, self.current, &mut self.rng);
        debug!("shuffled {} queued tracks", self.items.len());
        self.notify(QueueEvent::Shuffled);
    }

    fn check_index(&self, index: usize) -> Result<(), QueueError> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(QueueError::OutOfRange {
                index,
                len: self.items.len(),
            })
        }
    }

    fn notify(&mut self, event: QueueEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}

impl Default for QueueStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for QueueStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueueStore")
            .field("items", &self.items)
            .field("current", &self.current)
            .field("history_len", &self.history.len())
            .finish_non_exhaustive()
    }
}
