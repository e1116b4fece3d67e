use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use folio_config::{Config, Profile};
use folio_core::{ColorTheme, FrameScheduler};
use ratatui::{DefaultTerminal, Frame, layout::Rect};
use tracing::{debug, info};

use crate::form::Field;
use crate::loading::LoadingGate;
use crate::page::Page;
use crate::section::SectionId;

/// Shortest wait between frames while something moves.
const FRAME: Duration = Duration::from_millis(16);
/// Longest wait between frames when idle.
const IDLE_FRAME: Duration = Duration::from_millis(50);

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    config: Config,
    /// Kept until the page mounts.
    profile: Option<Profile>,
    theme: ColorTheme,
    scheduler: Rc<FrameScheduler>,
    loading: LoadingGate,
    page: Option<Page>,
}

impl App {
    pub fn new(config: Config, profile: Profile) -> Self {
        let scheduler = Rc::new(FrameScheduler::new());
        let loading = LoadingGate::mount(
            scheduler.as_ref(),
            scheduler.now(),
            Duration::from_millis(config.loading.delay_ms),
        );
        Self {
            running: false,
            theme: config.theme,
            config,
            profile: Some(profile),
            scheduler,
            loading,
            page: None,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        let mut last = Instant::now();
        while self.running {
            let now = Instant::now();
            let elapsed = now - last;
            last = now;

            self.scheduler.advance(elapsed);
            if let Some(page) = &mut self.page {
                page.step(elapsed);
            }
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        info!("shutting down");
        Ok(())
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        if self.page.is_none() && self.loading.is_done() {
            if let Some(profile) = self.profile.take() {
                self.page = Some(Page::mount(
                    Rc::clone(&self.scheduler),
                    &self.config,
                    profile,
                    self.theme,
                    area,
                ));
            }
        }
        match &mut self.page {
            Some(page) => {
                page.sync(area);
                page.render(frame);
            }
            None => self.loading.render(frame, self.scheduler.now(), self.theme),
        }
    }

    /// Wait for the next timer or input, whichever comes first.
    fn poll_timeout(&self) -> Duration {
        if self.page.as_ref().is_some_and(Page::is_animating) {
            return FRAME;
        }
        self.scheduler
            .next_deadline()
            .unwrap_or(IDLE_FRAME)
            .clamp(FRAME, IDLE_FRAME)
    }

    /// Reads the crossterm events and updates the state of [`App`].
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(self.poll_timeout())? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(width, height) => debug!(width, height, "terminal resized"),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        if key.modifiers == KeyModifiers::CONTROL
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        {
            self.quit();
            return;
        }

        if !self.loading.is_done() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                self.quit();
            } else if self.config.loading.skip_on_key {
                self.loading.skip();
            }
            return;
        }

        if let Some(page) = self.page.as_mut().filter(|p| p.form().is_editing()) {
            Self::on_form_key(page, key);
            return;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.quit(),
            KeyCode::Char('t') => self.cycle_color_theme(),
            KeyCode::Char('s') => self.cycle_speed(),
            KeyCode::Char('r') => self.toggle_rain(),
            _ => {
                if let Some(page) = self.page.as_mut() {
                    Self::on_page_key(page, key);
                }
            }
        }
    }

    fn on_page_key(page: &mut Page, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => page.scroll_by(1),
            KeyCode::Char('k') | KeyCode::Up => page.scroll_by(-1),
            KeyCode::PageDown | KeyCode::Char(' ') => page.page_down(),
            KeyCode::PageUp => page.page_up(),
            KeyCode::Char('g') | KeyCode::Home => page.jump_to(SectionId::Hero),
            KeyCode::Char('G') | KeyCode::End => page.scroll_to_end(),
            KeyCode::Char(digit @ '1'..='6') => {
                if let Some(id) = SectionId::from_digit(digit) {
                    page.jump_to(id);
                }
            }
            KeyCode::Tab => page.next_section(),
            KeyCode::BackTab => page.prev_section(),
            KeyCode::Enter if page.active_section() == SectionId::Hero => {
                page.jump_to(SectionId::About)
            }
            KeyCode::Char('f') => page.cycle_skill_filter(),
            KeyCode::Char('p') => page.cycle_project_filter(),
            KeyCode::Char('c') => page.start_message(),
            _ => {}
        }
    }

    fn on_form_key(page: &mut Page, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => page.form_mut().end_edit(),
            KeyCode::Tab | KeyCode::Down => page.form_mut().focus_next(),
            KeyCode::BackTab | KeyCode::Up => page.form_mut().focus_prev(),
            KeyCode::Enter if page.form().focus() == Field::Message => page.submit_form(),
            KeyCode::Enter => page.form_mut().focus_next(),
            KeyCode::Backspace => page.form_mut().backspace(),
            KeyCode::Char(c) => page.form_mut().insert(c),
            _ => {}
        }
    }

    /// Cycle through available color themes.
    fn cycle_color_theme(&mut self) {
        self.theme = self.theme.next();
        if let Some(page) = &mut self.page {
            page.set_theme(self.theme);
        }
        debug!(theme = self.theme.label(), "theme changed");
    }

    /// Cycle through animation speed presets.
    fn cycle_speed(&mut self) {
        self.config.speed = self.config.speed.next();
        if let Some(page) = &mut self.page {
            page.set_speed(self.config.speed);
        }
        debug!(speed = self.config.speed.label(), "speed changed");
    }

    fn toggle_rain(&mut self) {
        let Some(page) = &mut self.page else {
            return;
        };
        // The next sync resizes the rain to the real terminal size.
        page.toggle_rain(Rect::default());
        info!(on = page.has_rain(), "rain toggled");
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::AnimationSpeed;

    fn new_app() -> App {
        let config = Config {
            seed: Some(3),
            ..Default::default()
        };
        App::new(config, Profile::builtin().unwrap())
    }

    fn press(app: &mut App, code: KeyCode) {
        app.on_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_any_key_skips_loading() {
        let mut app = new_app();
        app.running = true;
        assert!(!app.loading.is_done());
        press(&mut app, KeyCode::Char('x'));
        assert!(app.loading.is_done());
        assert!(app.running);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = new_app();
        app.running = true;
        app.on_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);

        let mut app = new_app();
        app.running = true;
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn test_theme_cycles() {
        let mut app = new_app();
        app.loading.skip();
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.theme, ColorTheme::Cyan);
    }

    #[test]
    fn test_speed_cycles() {
        let mut app = new_app();
        app.loading.skip();
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.config.speed, AnimationSpeed::Fast);
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.config.speed, AnimationSpeed::Slow);
    }

    #[test]
    fn test_form_captures_letters() {
        let mut app = new_app();
        app.loading.skip();
        let area = Rect::new(0, 0, 100, 30);
        app.page = Some(Page::mount(
            Rc::clone(&app.scheduler),
            &app.config,
            Profile::builtin().unwrap(),
            app.theme,
            area,
        ));
        app.running = true;
        press(&mut app, KeyCode::Char('c'));
        for c in "quit".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        assert!(app.running);
        let page = app.page.as_ref().unwrap();
        assert_eq!(page.form().value(Field::Name), "quit");
        assert_eq!(app.theme, ColorTheme::default());

        press(&mut app, KeyCode::Esc);
        assert!(!app.page.as_ref().unwrap().form().is_editing());
    }
}
