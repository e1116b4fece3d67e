//! Matrix rain background (stateful).

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use folio_core::{RandomSource, Scheduler, TickControl, TimerGuard};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tracing::debug;

use crate::chars::RAIN_CHARS;
use crate::color::{brighten, hex, scale_rgb};

/// Row a column restarts from once it has fallen off the surface.
pub const RESET_ROW: i32 = -2;

/// Cells dimmer than this are cleared.
const MIN_INTENSITY: f32 = 0.06;

/// Color class of a rain column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RainColor {
    Primary,
    Secondary,
}

impl RainColor {
    fn random(rng: &mut dyn RandomSource, primary_share: f32) -> Self {
        if rng.chance(primary_share) {
            RainColor::Primary
        } else {
            RainColor::Secondary
        }
    }

    pub fn color(self) -> Color {
        match self {
            RainColor::Primary => hex(0x4facfe),
            RainColor::Secondary => hex(0x00f2fe),
        }
    }
}

/// Tunables of the rain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RainSettings {
    /// Terminal cells per column.
    pub cell_width: u16,
    /// Interval between frames.
    pub tick: Duration,
    /// Fraction of intensity lost by every cell each frame.
    pub fade: f32,
    /// Chance a freshly drawn glyph glows.
    pub glow_probability: f32,
    /// Chance per frame that an off-surface column restarts.
    pub reset_probability: f32,
    /// Share of columns drawn in the primary color.
    pub primary_share: f32,
    /// Columns start up to this many rows above the surface.
    pub stagger_rows: f32,
    /// Overall brightness, so the rain stays behind the text.
    pub brightness: f32,
}

impl Default for RainSettings {
    fn default() -> Self {
        Self {
            cell_width: 2,
            tick: Duration::from_millis(50),
            fade: 0.05,
            glow_probability: 0.05,
            reset_probability: 0.025,
            primary_share: 0.3,
            stagger_rows: 100.0,
            brightness: 0.4,
        }
    }
}

/// One falling column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RainColumn {
    /// Row of the next glyph; negative while waiting above the surface.
    pub drop: i32,
    pub color: RainColor,
}

/// A painted cell of the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceCell {
    pub glyph: char,
    pub intensity: f32,
    pub color: RainColor,
    pub glow: bool,
}

impl SurfaceCell {
    const EMPTY: SurfaceCell = SurfaceCell {
        glyph: ' ',
        intensity: 0.0,
        color: RainColor::Secondary,
        glow: false,
    };

    pub fn is_empty(&self) -> bool {
        self.intensity <= 0.0
    }
}

/// Columns of falling glyphs painted onto a fading surface.
#[derive(Debug, Clone)]
pub struct RainField {
    settings: RainSettings,
    width: u16,
    height: u16,
    columns: Vec<RainColumn>,
    /// Row-major, `columns.len()` cells per row.
    surface: Vec<SurfaceCell>,
}

impl RainField {
    pub fn new(width: u16, height: u16, settings: RainSettings, rng: &mut dyn RandomSource) -> Self {
        let mut field = Self {
            settings,
            width: 0,
            height: 0,
            columns: Vec::new(),
            surface: Vec::new(),
        };
        field.resize(width, height, rng);
        field
    }

    /// Resize the surface. Columns and trails start over.
    pub fn resize(&mut self, width: u16, height: u16, rng: &mut dyn RandomSource) {
        let cols = (width / self.settings.cell_width.max(1)) as usize;
        self.width = width;
        self.height = height;
        self.columns = (0..cols)
            .map(|_| RainColumn {
                drop: -(rng.next_f32() * self.settings.stagger_rows) as i32,
                color: RainColor::random(rng, self.settings.primary_share),
            })
            .collect();
        self.surface = vec![SurfaceCell::EMPTY; cols * height as usize];
        debug!(width, height, columns = cols, "rain surface sized");
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn settings(&self) -> &RainSettings {
        &self.settings
    }

    pub fn columns(&self) -> &[RainColumn] {
        &self.columns
    }

    /// The painted cell at `column`, `row`, if on the surface.
    pub fn cell(&self, column: usize, row: u16) -> Option<&SurfaceCell> {
        if column >= self.columns.len() || row >= self.height {
            return None;
        }
        self.surface.get(row as usize * self.columns.len() + column)
    }

    /// Advance one frame.
    pub fn tick(&mut self, rng: &mut dyn RandomSource) {
        let keep = 1.0 - self.settings.fade.clamp(0.0, 1.0);
        for cell in &mut self.surface {
            cell.intensity *= keep;
            if cell.intensity < MIN_INTENSITY {
                *cell = SurfaceCell::EMPTY;
            }
        }

        let cols = self.columns.len();
        let height = i32::from(self.height);
        for (x, col) in self.columns.iter_mut().enumerate() {
            if (0..height).contains(&col.drop) {
                let glyph = RAIN_CHARS[rng.pick(RAIN_CHARS.len())];
                let glow = rng.chance(self.settings.glow_probability);
                self.surface[col.drop as usize * cols + x] = SurfaceCell {
                    glyph,
                    intensity: 1.0,
                    color: col.color,
                    glow,
                };
            }

            col.drop = col.drop.saturating_add(1);

            // Off-surface columns restart at random so they drift apart.
            if col.drop >= height && rng.chance(self.settings.reset_probability) {
                col.drop = RESET_ROW;
                col.color = RainColor::random(rng, self.settings.primary_share);
            }
        }
    }

    /// Render the surface into `area` of the frame.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let rows = area.height.min(self.height);
        let lines: Vec<Line> = (0..rows)
            .map(|y| {
                let spans: Vec<Span> = (0..self.columns.len())
                    .map(|x| self.render_cell(x, y))
                    .collect();
                Line::from(spans)
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), area);
    }

    /// Render a single column cell as a span of `cell_width` terminal cells.
    pub fn render_cell(&self, column: usize, row: u16) -> Span<'static> {
        let blank = " ".repeat(self.settings.cell_width as usize);
        let Some(cell) = self.cell(column, row).filter(|c| !c.is_empty()) else {
            return Span::raw(blank);
        };

        let base = cell.color.color();
        let fresh = cell.intensity >= 1.0;
        let style = match (fresh, cell.glow) {
            // Glow only lasts for the frame the glyph was drawn in.
            (true, true) => Style::new()
                .fg(brighten(base, 0.6))
                .add_modifier(Modifier::BOLD),
            (true, false) => {
                Style::new().fg(scale_rgb(brighten(base, 0.3), self.settings.brightness * 1.5))
            }
            _ => Style::new().fg(scale_rgb(base, cell.intensity * self.settings.brightness)),
        };
        let mut text = cell.glyph.to_string();
        // Double-width glyphs fill two cells; pad anything wider cells need.
        if self.settings.cell_width > 2 {
            text.push_str(&" ".repeat(self.settings.cell_width as usize - 2));
        }
        Span::styled(text, style)
    }
}

struct RainState {
    field: RainField,
    rng: Box<dyn RandomSource>,
}

/// A [`RainField`] mounted on a scheduler.
pub struct RainLoop {
    state: Rc<RefCell<RainState>>,
    _guard: TimerGuard,
}

impl fmt::Debug for RainLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RainLoop")
            .field("size", &self.state.borrow().field.size())
            .finish_non_exhaustive()
    }
}

impl RainLoop {
    /// Size a new field to `width` x `height` and tick it at the settings'
    /// interval.
    pub fn mount(
        scheduler: &dyn Scheduler,
        width: u16,
        height: u16,
        settings: RainSettings,
        mut rng: Box<dyn RandomSource>,
    ) -> Self {
        let field = RainField::new(width, height, settings, rng.as_mut());
        let state = Rc::new(RefCell::new(RainState { field, rng }));
        let ticking = Rc::clone(&state);
        let token = scheduler.schedule(
            settings.tick,
            Box::new(move || {
                let state = &mut *ticking.borrow_mut();
                state.field.tick(state.rng.as_mut());
                TickControl::Continue
            }),
        );
        Self {
            state,
            _guard: token.into_guard(),
        }
    }

    /// Follow a terminal resize. No-op when the size is unchanged.
    pub fn resize(&self, width: u16, height: u16) {
        let state = &mut *self.state.borrow_mut();
        if state.field.size() != (width, height) {
            state.field.resize(width, height, state.rng.as_mut());
        }
    }

    pub fn field(&self) -> Ref<'_, RainField> {
        Ref::map(self.state.borrow(), |s| &s.field)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        self.field().render(frame, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::{FrameScheduler, SequenceRandom, XorShift64};

    fn settings() -> RainSettings {
        RainSettings::default()
    }

    #[test]
    fn test_column_count_from_cell_width() {
        let mut rng = SequenceRandom::constant(0.5);
        let field = RainField::new(81, 20, settings(), &mut rng);
        assert_eq!(field.columns().len(), 40);
        assert!(field.columns().iter().all(|c| c.drop <= 0));
    }

    #[test]
    fn test_colors_split_by_share() {
        let mut rng = SequenceRandom::new(vec![0.0, 0.1, 0.0, 0.9]);
        let field = RainField::new(4, 10, settings(), &mut rng);
        assert_eq!(field.columns()[0].color, RainColor::Primary);
        assert_eq!(field.columns()[1].color, RainColor::Secondary);
    }

    #[test]
    fn test_drop_advances_and_draws() {
        let mut rng = SequenceRandom::constant(0.0);
        let mut field = RainField::new(2, 5, settings(), &mut rng);
        assert_eq!(field.columns()[0].drop, 0);

        field.tick(&mut rng);
        assert_eq!(field.columns()[0].drop, 1);
        let cell = field.cell(0, 0).copied().unwrap();
        assert_eq!(cell.intensity, 1.0);
        assert_eq!(cell.glyph, RAIN_CHARS[0]);

        field.tick(&mut rng);
        let faded = field.cell(0, 0).unwrap().intensity;
        assert!(faded < 1.0 && faded > 0.9);
        assert_eq!(field.cell(0, 1).unwrap().intensity, 1.0);
    }

    #[test]
    fn test_glow_lasts_one_frame() {
        let mut rng = SequenceRandom::constant(0.5);
        let mut field = RainField::new(4, 5, settings(), &mut rng);
        field.columns[0].drop = 0;
        field.columns[1].drop = 0;

        // Glyph then glow draw for each column: the first glows, the second does not.
        let mut rng = SequenceRandom::new(vec![0.0, 0.01, 0.0, 0.5]);
        field.tick(&mut rng);
        assert!(field.cell(0, 0).unwrap().glow);
        assert!(!field.cell(1, 0).unwrap().glow);

        let bold = |span: Span<'static>| span.style.add_modifier.contains(Modifier::BOLD);
        assert!(bold(field.render_cell(0, 0)));
        assert!(!bold(field.render_cell(1, 0)));

        field.tick(&mut rng);
        assert!(field.cell(0, 0).unwrap().intensity < 1.0);
        assert!(!bold(field.render_cell(0, 0)));
    }

    #[test]
    fn test_trail_fades_out() {
        let mut rng = SequenceRandom::constant(0.9);
        let mut field = RainField::new(2, 3, settings(), &mut rng);
        // One pass down a short surface, then nothing new is drawn.
        field.columns[0].drop = 0;
        field.tick(&mut rng);
        for _ in 0..200 {
            field.tick(&mut rng);
        }
        assert!(field.cell(0, 0).unwrap().is_empty());
    }

    #[test]
    fn test_off_surface_column_waits_without_reset() {
        let mut rng = SequenceRandom::constant(0.5);
        let mut field = RainField::new(2, 4, settings(), &mut rng);
        field.columns[0].drop = 4;
        for _ in 0..50 {
            field.tick(&mut rng);
        }
        assert_eq!(field.columns()[0].drop, 54);
    }

    #[test]
    fn test_reset_clamps_to_negative_offset() {
        let mut rng = SequenceRandom::constant(0.01);
        let mut field = RainField::new(2, 4, settings(), &mut rng);
        field.columns[0].drop = 3;
        field.tick(&mut rng);
        assert_eq!(field.columns()[0].drop, RESET_ROW);
        assert_eq!(field.columns()[0].color, RainColor::Primary);
    }

    #[test]
    fn test_draws_stay_in_bounds() {
        let mut rng = XorShift64::new(7);
        let mut field = RainField::new(30, 6, settings(), &mut rng);
        for _ in 0..2000 {
            field.tick(&mut rng);
            assert_eq!(field.surface.len(), 15 * 6);
        }
    }

    #[test]
    fn test_mean_ticks_until_reset() {
        let mut rng = XorShift64::new(0xC0FFEE);
        let mut field = RainField::new(2, 1, settings(), &mut rng);
        let trials = 2000;
        let mut total = 0u64;
        for _ in 0..trials {
            field.columns[0].drop = 1;
            let mut ticks = 0u64;
            loop {
                field.tick(&mut rng);
                ticks += 1;
                if field.columns[0].drop == RESET_ROW {
                    break;
                }
            }
            total += ticks;
        }
        let mean = total as f64 / trials as f64;
        assert!((35.0..45.0).contains(&mean), "mean {mean}");
    }

    #[test]
    fn test_resize_recomputes_columns() {
        let mut rng = SequenceRandom::constant(0.5);
        let mut field = RainField::new(20, 10, settings(), &mut rng);
        field.resize(41, 5, &mut rng);
        assert_eq!(field.columns().len(), 20);
        assert_eq!(field.size(), (41, 5));
        assert!(field.cell(19, 4).is_some());
        assert!(field.cell(20, 0).is_none());
    }

    #[test]
    fn test_loop_ticks_and_stops_on_drop() {
        let scheduler = FrameScheduler::new();
        let rain = RainLoop::mount(
            &scheduler,
            10,
            5,
            settings(),
            Box::new(SequenceRandom::constant(0.0)),
        );
        scheduler.advance(Duration::from_millis(50));
        assert_eq!(rain.field().columns()[0].drop, 1);

        rain.resize(10, 5);
        assert_eq!(rain.field().columns()[0].drop, 1);
        rain.resize(12, 5);
        assert_eq!(rain.field().columns().len(), 6);

        drop(rain);
        assert_eq!(scheduler.active_count(), 0);
    }
}
