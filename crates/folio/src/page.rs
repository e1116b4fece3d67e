//! The mounted page: section layout, visibility wiring and every timer the
//! page owns. Dropping a [`Page`] tears all of them down.

use std::rc::Rc;
use std::time::Duration;

use folio_config::{Config, Profile};
use folio_core::{AnimationSpeed, ColorTheme, FrameScheduler, XorShift64};
use folio_fx::{
    GeometryObserver, RainLoop, Region, RevealStore, StatCounter, TextCycler, TypewriterHandle,
    Viewport, VisibilityTrigger,
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};
use tracing::{debug, info};

use crate::form::ContactForm;
use crate::overlay::overlay;
use crate::scroll::ScrollState;
use crate::section::SectionId;
use crate::sections::{self, Row, View};
use crate::tabs::FilterTabs;
use crate::text::fade_line;

/// A section placed on the page.
#[derive(Debug)]
struct Placed {
    id: SectionId,
    top: u32,
    rows: Vec<Row>,
}

impl Placed {
    fn height(&self) -> u32 {
        self.rows.len() as u32
    }
}

#[derive(Debug)]
pub struct Page {
    scheduler: Rc<FrameScheduler>,
    profile: Profile,
    config: Config,
    theme: ColorTheme,
    typewriter: TypewriterHandle,
    rain: Option<RainLoop>,
    stats: Vec<StatCounter>,
    skills: Vec<StatCounter>,
    triggers: [VisibilityTrigger; 6],
    reveal: RevealStore<SectionId>,
    observer: GeometryObserver,
    skill_tabs: FilterTabs,
    project_tabs: FilterTabs,
    form: ContactForm,
    scroll: ScrollState,
    layout: Vec<Placed>,
    body: Rect,
}

impl Page {
    /// Mount every animation on `scheduler`, sized for `area`.
    pub fn mount(
        scheduler: Rc<FrameScheduler>,
        config: &Config,
        profile: Profile,
        theme: ColorTheme,
        area: Rect,
    ) -> Self {
        let speed = config.speed;
        let cycler = TextCycler::new(profile.roles.iter(), config.typewriter.timing(speed));
        let typewriter = TypewriterHandle::mount(scheduler.as_ref(), cycler);

        let counters = &config.counters;
        let stats = profile
            .stats
            .iter()
            .map(|s| StatCounter::new(s.value, counters.stat_steps))
            .collect();
        let skills = profile
            .skills
            .iter()
            .map(|s| StatCounter::new(s.percentage, counters.skill_steps))
            .collect();

        let reveal = &config.reveal;
        let triggers = SectionId::ALL.map(|id| {
            VisibilityTrigger::new(match id {
                SectionId::Projects => reveal.projects_threshold,
                _ => reveal.threshold,
            })
        });

        info!(
            name = %profile.name,
            sections = SectionId::ALL.len(),
            rain = config.rain.enabled,
            "page mounted"
        );

        let mut page = Self {
            rain: None,
            stats,
            skills,
            triggers,
            reveal: RevealStore::new(
                Duration::from_millis(reveal.stagger_ms),
                Duration::from_millis(reveal.fade_ms),
            ),
            observer: GeometryObserver::new(Viewport::default()),
            skill_tabs: FilterTabs::new(&profile.skills),
            project_tabs: FilterTabs::new(&profile.projects),
            form: ContactForm::new(Duration::from_millis(config.contact.confirmation_ms)),
            scroll: ScrollState::default(),
            layout: Vec::new(),
            body: Rect::default(),
            scheduler,
            typewriter,
            profile,
            config: config.clone(),
            theme,
        };
        if config.rain.enabled {
            page.mount_rain(area);
        }
        page.sync(area);
        page
    }

    fn mount_rain(&mut self, area: Rect) {
        let rng = match self.config.seed {
            Some(seed) => XorShift64::new(seed),
            None => XorShift64::from_time(),
        };
        let settings = self.config.rain.settings(self.config.speed);
        self.rain = Some(RainLoop::mount(
            self.scheduler.as_ref(),
            area.width,
            area.height,
            settings,
            Box::new(rng),
        ));
    }

    /// Header, scrolling body and help bar.
    fn split(area: Rect) -> [Rect; 3] {
        Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area)
    }

    /// Rebuild the layout for `area` and feed the visibility triggers.
    pub fn sync(&mut self, area: Rect) {
        if let Some(rain) = &self.rain {
            rain.resize(area.width, area.height);
        }
        let [_, body, _] = Self::split(area);
        self.body = body;
        self.layout = self.build_layout(body.width, body.height);

        let total: u32 = self.layout.iter().map(Placed::height).sum();
        self.scroll.set_max(total.saturating_sub(body.height as u32));

        let viewport = Viewport::new(self.scroll.offset(), body.height as u32);
        self.observer.set_viewport(viewport);

        // Sections taller than the screen are judged by their first
        // screenful, or they could never reach the threshold.
        let mut fired = Vec::new();
        for placed in &self.layout {
            let region = Region::new(placed.top, placed.height().min(body.height as u32));
            if self.triggers[placed.id.index()].poll(&self.observer, region) {
                fired.push(placed.id);
            }
        }
        for id in fired {
            self.on_visible(id);
        }
    }

    fn on_visible(&mut self, id: SectionId) {
        let now = self.scheduler.now();
        let speed = self.config.speed;
        self.reveal.reveal(id, now);
        debug!(section = id.nav_label(), "section revealed");

        let counters = &self.config.counters;
        let (list, tick) = match id {
            SectionId::About => (&mut self.stats, counters.stat_tick_ms),
            SectionId::Skills => (&mut self.skills, counters.skill_tick_ms),
            _ => return,
        };
        let interval = speed.scale(Duration::from_millis(tick));
        for counter in list.iter_mut() {
            counter.start(self.scheduler.as_ref(), interval);
        }
    }

    fn build_layout(&self, width: u16, height: u16) -> Vec<Placed> {
        let view = View {
            profile: &self.profile,
            theme: self.theme,
            width,
            height,
            now: self.scheduler.now(),
        };
        let typed = self.typewriter.text();
        let mut top = 0;
        SectionId::ALL
            .iter()
            .map(|&id| {
                let rows = match id {
                    SectionId::Hero => sections::hero::rows(&view, &typed),
                    SectionId::About => sections::about::rows(&view, &self.stats),
                    SectionId::Skills => {
                        sections::skills::rows(&view, &self.skill_tabs, &self.skills)
                    }
                    SectionId::Projects => sections::projects::rows(&view, &self.project_tabs),
                    SectionId::Education => sections::education::rows(&view),
                    SectionId::Contact => sections::contact::rows(&view, &self.form),
                };
                let placed = Placed { id, top, rows };
                top += placed.height();
                placed
            })
            .collect()
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        if let Some(rain) = &self.rain {
            rain.render(frame, area);
        }
        let [header, body, help] = Self::split(area);

        let now = self.scheduler.now();
        let start = self.scroll.offset();
        let end = start + body.height as u32;
        let lines: Vec<Line<'static>> = self
            .layout
            .iter()
            .flat_map(|placed| {
                placed
                    .rows
                    .iter()
                    .enumerate()
                    .map(move |(i, row)| (placed.id, placed.top + i as u32, row))
            })
            .filter(|(_, y, _)| (start..end).contains(y))
            .map(|(id, _, (item, line))| {
                fade_line(line.clone(), self.reveal.item_progress(id, *item, now))
            })
            .collect();
        overlay(frame.buffer_mut(), body, lines);

        self.render_header(frame, header);
        self.render_help(frame, help);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let active = self.active_section();
        let brand = vec![
            Span::styled("<", Style::new().fg(self.theme.muted())),
            Span::styled(
                self.profile.handle.clone(),
                Style::new().fg(self.theme.accent()).bold(),
            ),
            Span::styled("/>", Style::new().fg(self.theme.muted())),
        ];
        let mut nav = Vec::new();
        for id in SectionId::ALL {
            let style = if id == active {
                Style::new().fg(self.theme.accent()).bold().underlined()
            } else {
                Style::new().fg(self.theme.text())
            };
            nav.push(Span::styled(
                format!("{} ", id.index() + 1),
                Style::new().fg(self.theme.muted()),
            ));
            nav.push(Span::styled(id.nav_label(), style));
            nav.push(Span::raw("  "));
        }

        let used = brand.iter().chain(&nav).map(Span::width).sum::<usize>() + 1;
        let mut spans = vec![Span::raw(" ")];
        spans.extend(brand);
        if used <= area.width as usize {
            spans.push(Span::raw(" ".repeat(area.width as usize - used)));
            spans.extend(nav);
        }
        let line = Line::from(spans);

        if self.scroll.is_scrolled() {
            let bar = Block::new().style(Style::new().bg(Color::Rgb(12, 12, 16)));
            frame.render_widget(Paragraph::new(line).block(bar), area);
        } else {
            overlay(frame.buffer_mut(), area, vec![line]);
        }
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        let key = |k: &'static str| Span::styled(k, Style::new().fg(self.theme.accent()).bold());
        let desc = |d: &'static str| Span::styled(d, Style::new().fg(Color::DarkGray));
        let spans = if self.form.is_editing() {
            vec![
                key("esc"),
                desc(" done  "),
                key("tab"),
                desc(" next field  "),
                key("enter"),
                desc(" next/send"),
            ]
        } else {
            vec![
                key("q"),
                desc(" quit  "),
                key("j/k"),
                desc(" scroll  "),
                key("1-6"),
                desc(" jump  "),
                key("f/p"),
                desc(" filter  "),
                key("c"),
                desc(" message  "),
                key("t"),
                desc(" theme  "),
                key("s"),
                desc(" speed  "),
                key("r"),
                desc(" rain"),
            ]
        };
        overlay(frame.buffer_mut(), area, vec![Line::from(spans).centered()]);
    }

    /// Advance smooth scrolling.
    pub fn step(&mut self, elapsed: Duration) {
        self.scroll.step(elapsed);
    }

    pub fn is_animating(&self) -> bool {
        self.scroll.is_animating()
    }

    /// The section under the upper third of the screen.
    pub fn active_section(&self) -> SectionId {
        let probe = self.scroll.offset() + self.body.height as u32 / 3;
        self.layout
            .iter()
            .take_while(|p| p.top <= probe)
            .last()
            .map_or(SectionId::Hero, |p| p.id)
    }

    fn section_top(&self, id: SectionId) -> u32 {
        self.layout
            .iter()
            .find(|p| p.id == id)
            .map_or(0, |p| p.top)
    }

    pub fn jump_to(&mut self, id: SectionId) {
        debug!(section = id.nav_label(), "navigate");
        self.scroll.scroll_to(self.section_top(id));
    }

    pub fn next_section(&mut self) {
        self.jump_to(self.active_section().next());
    }

    pub fn prev_section(&mut self) {
        self.jump_to(self.active_section().prev());
    }

    pub fn scroll_by(&mut self, rows: i32) {
        self.scroll.scroll_by(rows);
    }

    pub fn page_down(&mut self) {
        self.scroll.scroll_by(self.body.height.saturating_sub(2) as i32);
    }

    pub fn page_up(&mut self) {
        self.scroll.scroll_by(-(self.body.height.saturating_sub(2) as i32));
    }

    pub fn scroll_to_end(&mut self) {
        self.scroll.scroll_to(u32::MAX);
    }

    pub fn cycle_skill_filter(&mut self) {
        self.skill_tabs.next();
    }

    pub fn cycle_project_filter(&mut self) {
        self.project_tabs.next();
    }

    pub fn set_theme(&mut self, theme: ColorTheme) {
        self.theme = theme;
    }

    /// Retime the typewriter and the rain. Counters already running keep
    /// their pace; counters started later use the new one.
    pub fn set_speed(&mut self, speed: AnimationSpeed) {
        self.config.speed = speed;
        let cycler = TextCycler::new(
            self.profile.roles.iter(),
            self.config.typewriter.timing(speed),
        );
        self.typewriter = TypewriterHandle::mount(self.scheduler.as_ref(), cycler);
        if let Some(rain) = self.rain.take() {
            let (width, height) = rain.field().size();
            drop(rain);
            self.mount_rain(Rect::new(0, 0, width, height));
        }
    }

    pub fn speed(&self) -> AnimationSpeed {
        self.config.speed
    }

    /// Turn the rain off, or remount it fresh.
    pub fn toggle_rain(&mut self, area: Rect) {
        if self.rain.take().is_none() {
            self.mount_rain(area);
        }
    }

    pub fn has_rain(&self) -> bool {
        self.rain.is_some()
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ContactForm {
        &mut self.form
    }

    /// Scroll to the form and start typing.
    pub fn start_message(&mut self) {
        self.jump_to(SectionId::Contact);
        self.form.begin_edit();
    }

    /// Send the message. A rejection stays on the form to be shown.
    pub fn submit_form(&mut self) {
        if let Err(err) = self.form.submit(self.scheduler.as_ref()) {
            debug!(%err, "contact form rejected");
        }
    }
}
