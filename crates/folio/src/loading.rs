//! The splash shown before the page mounts.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use folio_core::{ColorTheme, Scheduler, TickControl, TimerGuard};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};
use tracing::debug;

use crate::text::progress_bar;

const TITLE: &str = "INITIALIZING...";
const SPINNER: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
const SPINNER_FRAME: Duration = Duration::from_millis(80);
const LETTER_STAGGER: Duration = Duration::from_millis(60);
const BAR_WIDTH: usize = 30;

/// One-shot gate that opens after a fixed delay, or early on a key press.
#[derive(Debug)]
pub struct LoadingGate {
    done: Rc<Cell<bool>>,
    guard: Option<TimerGuard>,
    started: Duration,
    delay: Duration,
}

impl LoadingGate {
    /// Start the delay at scheduler time `now`. A zero delay opens at once.
    pub fn mount(scheduler: &dyn Scheduler, now: Duration, delay: Duration) -> Self {
        let done = Rc::new(Cell::new(delay.is_zero()));
        let guard = (!delay.is_zero()).then(|| {
            let flag = Rc::clone(&done);
            scheduler
                .schedule(
                    delay,
                    Box::new(move || {
                        flag.set(true);
                        TickControl::Stop
                    }),
                )
                .into_guard()
        });
        Self {
            done,
            guard,
            started: now,
            delay,
        }
    }

    pub fn is_done(&self) -> bool {
        self.done.get()
    }

    /// Open the gate now and cancel the pending timer.
    pub fn skip(&mut self) {
        if !self.is_done() {
            debug!("loading splash skipped");
        }
        self.done.set(true);
        self.guard = None;
    }

    /// Fraction of the delay elapsed at `now`.
    pub fn progress(&self, now: Duration) -> f32 {
        if self.is_done() || self.delay.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.started);
        (elapsed.as_secs_f32() / self.delay.as_secs_f32()).min(1.0)
    }

    pub fn render(&self, frame: &mut Frame, now: Duration, theme: ColorTheme) {
        let elapsed = now.saturating_sub(self.started);
        let shown = (elapsed.as_millis() / LETTER_STAGGER.as_millis()) as usize + 1;
        let title: String = TITLE.chars().take(shown).collect();
        let spinner =
            SPINNER[(elapsed.as_millis() / SPINNER_FRAME.as_millis()) as usize % SPINNER.len()];
        let percent = (self.progress(now) * 100.0).round() as u32;

        let chunks = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .split(frame.area());

        let spinner = Line::from(Span::styled(
            spinner.to_string(),
            Style::new().fg(theme.highlight()),
        ))
        .centered();
        frame.render_widget(spinner, chunks[1]);

        let title = Paragraph::new(
            Line::from(Span::styled(title, Style::new().fg(theme.accent()).bold())).centered(),
        );
        frame.render_widget(title, chunks[3]);

        let mut bar = progress_bar(
            percent,
            BAR_WIDTH,
            Style::new().fg(theme.accent()),
            Style::new().fg(theme.muted()),
        );
        bar.push(Span::styled(
            format!(" {percent:>3}%"),
            Style::new().fg(theme.muted()),
        ));
        frame.render_widget(Line::from(bar).centered(), chunks[5]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::FrameScheduler;

    #[test]
    fn test_opens_after_delay() {
        let scheduler = FrameScheduler::new();
        let gate = LoadingGate::mount(&scheduler, scheduler.now(), Duration::from_millis(2000));
        scheduler.advance(Duration::from_millis(1000));
        assert!(!gate.is_done());
        assert!((gate.progress(scheduler.now()) - 0.5).abs() < 1e-6);
        scheduler.advance(Duration::from_millis(1000));
        assert!(gate.is_done());
        assert_eq!(scheduler.active_count(), 0);
    }

    #[test]
    fn test_skip_cancels_timer() {
        let scheduler = FrameScheduler::new();
        let mut gate = LoadingGate::mount(&scheduler, scheduler.now(), Duration::from_millis(2000));
        gate.skip();
        assert!(gate.is_done());
        assert_eq!(scheduler.active_count(), 0);
    }

    #[test]
    fn test_zero_delay_is_open() {
        let scheduler = FrameScheduler::new();
        let gate = LoadingGate::mount(&scheduler, scheduler.now(), Duration::ZERO);
        assert!(gate.is_done());
        assert_eq!(scheduler.active_count(), 0);
        assert_eq!(gate.progress(Duration::ZERO), 1.0);
    }
}
