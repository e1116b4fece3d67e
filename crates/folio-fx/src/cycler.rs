//! Typewriter text cycler.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use folio_core::{Scheduler, TickControl, TimerGuard};

/// Where the cycler is in its type/hold/delete loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclerPhase {
    /// Appending one character per tick.
    Typing,
    /// Full phrase on screen, waiting before deleting.
    Holding,
    /// Removing one character per tick.
    Deleting,
}

/// Tick delays of a [`TextCycler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CyclerTiming {
    pub type_delay: Duration,
    pub delete_delay: Duration,
    pub hold_delay: Duration,
}

impl Default for CyclerTiming {
    fn default() -> Self {
        Self {
            type_delay: Duration::from_millis(100),
            delete_delay: Duration::from_millis(50),
            hold_delay: Duration::from_millis(1500),
        }
    }
}

/// Types a phrase, holds it, deletes it, then moves on to the next one,
/// forever.
#[derive(Debug, Clone)]
pub struct TextCycler {
    phrases: Vec<String>,
    timing: CyclerTiming,
    index: usize,
    /// Number of characters of the current phrase on screen.
    shown: usize,
    phase: CyclerPhase,
}

impl TextCycler {
    pub fn new<I, S>(phrases: I, timing: CyclerTiming) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            phrases: phrases.into_iter().map(Into::into).collect(),
            timing,
            index: 0,
            shown: 0,
            phase: CyclerPhase::Typing,
        }
    }

    pub fn phase(&self) -> CyclerPhase {
        self.phase
    }

    pub fn phrase_index(&self) -> usize {
        self.index
    }

    pub fn timing(&self) -> CyclerTiming {
        self.timing
    }

    /// The full phrase currently being typed or deleted.
    pub fn phrase(&self) -> &str {
        self.phrases.get(self.index).map(String::as_str).unwrap_or("")
    }

    /// The visible prefix of the current phrase.
    pub fn text(&self) -> &str {
        let phrase = self.phrase();
        match phrase.char_indices().nth(self.shown) {
            Some((byte, _)) => &phrase[..byte],
            None => phrase,
        }
    }

    /// Back to an empty line on the first phrase.
    pub fn restart(&mut self) {
        self.index = 0;
        self.shown = 0;
        self.phase = CyclerPhase::Typing;
    }

    /// Perform one step and return the delay before the next one.
    pub fn tick(&mut self) -> Duration {
        if self.phrases.is_empty() {
            return self.timing.type_delay;
        }
        let len = self.phrase().chars().count();

        match self.phase {
            CyclerPhase::Typing => {
                if self.shown < len {
                    self.shown += 1;
                }
                if self.shown >= len {
                    self.phase = CyclerPhase::Holding;
                    self.timing.hold_delay
                } else {
                    self.timing.type_delay
                }
            }
            CyclerPhase::Holding => {
                self.phase = CyclerPhase::Deleting;
                self.timing.delete_delay
            }
            CyclerPhase::Deleting => {
                self.shown = self.shown.saturating_sub(1);
                if self.shown == 0 {
                    self.index = (self.index + 1) % self.phrases.len();
                    self.phase = CyclerPhase::Typing;
                    self.timing.type_delay
                } else {
                    self.timing.delete_delay
                }
            }
        }
    }
}

impl Iterator for TextCycler {
    type Item = (String, Duration);

    /// Never returns `None`.
    fn next(&mut self) -> Option<Self::Item> {
        let delay = self.tick();
        Some((self.text().to_string(), delay))
    }
}

/// A [`TextCycler`] mounted on a scheduler.
#[derive(Debug)]
pub struct TypewriterHandle {
    cycler: Rc<RefCell<TextCycler>>,
    _guard: TimerGuard,
}

impl TypewriterHandle {
    /// Start ticking `cycler`; the first character appears after one type
    /// delay.
    pub fn mount(scheduler: &dyn Scheduler, cycler: TextCycler) -> Self {
        let first = cycler.timing().type_delay;
        let cycler = Rc::new(RefCell::new(cycler));
        let state = Rc::clone(&cycler);
        let token = scheduler.schedule(
            first,
            Box::new(move || TickControl::After(state.borrow_mut().tick())),
        );
        Self {
            cycler,
            _guard: token.into_guard(),
        }
    }

    pub fn text(&self) -> String {
        self.cycler.borrow().text().to_string()
    }

    pub fn phase(&self) -> CyclerPhase {
        self.cycler.borrow().phase()
    }

    pub fn phrase_index(&self) -> usize {
        self.cycler.borrow().phrase_index()
    }
}
