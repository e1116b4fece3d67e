//! One-shot visibility detection for page regions.

use std::cell::RefCell;
use std::collections::HashMap;

use tracing::debug;

/// Vertical span of a page region, in page rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    pub top: u32,
    pub height: u32,
}

impl Region {
    pub fn new(top: u32, height: u32) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> u32 {
        self.top.saturating_add(self.height)
    }
}

/// The currently visible slice of the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub top: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(top: u32, height: u32) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> u32 {
        self.top.saturating_add(self.height)
    }
}

/// Fraction of `region` that lies inside `viewport`, in `[0, 1]`.
///
/// Empty regions are never visible.
pub fn intersection_ratio(region: Region, viewport: Viewport) -> f32 {
    if region.height == 0 {
        return 0.0;
    }
    let top = region.top.max(viewport.top);
    let bottom = region.bottom().min(viewport.bottom());
    let overlap = bottom.saturating_sub(top);
    overlap as f32 / region.height as f32
}

/// Capability that reports how much of a region is on screen.
pub trait VisibilityObserver {
    /// Intersection ratio of `region`, or `None` when observation is not
    /// available.
    fn ratio(&self, region: Region) -> Option<f32>;
}

/// Computes ratios from the live viewport geometry.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeometryObserver {
    viewport: Option<Viewport>,
}

impl GeometryObserver {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport: Some(viewport),
        }
    }

    /// An observer with no viewport yet; reports nothing.
    pub fn unavailable() -> Self {
        Self { viewport: None }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }
}

impl VisibilityObserver for GeometryObserver {
    fn ratio(&self, region: Region) -> Option<f32> {
        self.viewport.map(|v| intersection_ratio(region, v))
    }
}

/// Reports whatever ratios were injected, per region.
#[derive(Debug, Default)]
pub struct ManualObserver {
    ratios: RefCell<HashMap<Region, f32>>,
}

impl ManualObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, region: Region, ratio: f32) {
        self.ratios.borrow_mut().insert(region, ratio);
    }
}

impl VisibilityObserver for ManualObserver {
    fn ratio(&self, region: Region) -> Option<f32> {
        self.ratios.borrow().get(&region).copied()
    }
}

/// Latches true the first time a region reaches its visibility threshold.
#[derive(Debug, Clone)]
pub struct VisibilityTrigger {
    threshold: f32,
    has_fired: bool,
    connected: bool,
}

impl VisibilityTrigger {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            has_fired: false,
            connected: true,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Whether the trigger has fired. Never reverts once true.
    pub fn has_fired(&self) -> bool {
        self.has_fired
    }

    /// Whether the trigger still accepts observations.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Feed one intersection ratio. Returns true only on the call that
    /// flips the latch.
    pub fn observe(&mut self, ratio: f32) -> bool {
        if !self.connected || self.has_fired {
            return false;
        }
        if ratio >= self.threshold {
            self.has_fired = true;
            // Nothing left to detect.
            self.connected = false;
            debug!(ratio, threshold = self.threshold, "visibility trigger fired");
            return true;
        }
        false
    }

    /// Query `observer` for `region` and feed the result. An unavailable
    /// observer leaves the trigger untouched.
    pub fn poll(&mut self, observer: &dyn VisibilityObserver, region: Region) -> bool {
        match observer.ratio(region) {
            Some(ratio) => self.observe(ratio),
            None => false,
        }
    }

    /// Stop observing. The latched value is kept.
    pub fn disconnect(&mut self) {
        self.connected = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersection_ratio() {
        let region = Region::new(10, 10);
        assert_eq!(intersection_ratio(region, Viewport::new(0, 5)), 0.0);
        assert_eq!(intersection_ratio(region, Viewport::new(0, 13)), 0.3);
        assert_eq!(intersection_ratio(region, Viewport::new(15, 40)), 0.5);
        assert_eq!(intersection_ratio(region, Viewport::new(0, 100)), 1.0);
        assert_eq!(intersection_ratio(Region::new(3, 0), Viewport::new(0, 100)), 0.0);
    }

    #[test]
    fn test_latch_never_reverts() {
        let mut trigger = VisibilityTrigger::new(0.3);
        let fired: Vec<bool> = [0.1, 0.35, 0.1]
            .into_iter()
            .map(|ratio| {
                trigger.observe(ratio);
                trigger.has_fired()
            })
            .collect();
        assert_eq!(fired, vec![false, true, true]);
    }

    #[test]
    fn test_observe_reports_transition_once() {
        let mut trigger = VisibilityTrigger::new(0.2);
        assert!(!trigger.observe(0.0));
        assert!(trigger.observe(0.2));
        assert!(!trigger.observe(1.0));
        assert!(!trigger.is_connected());
    }

    #[test]
    fn test_manual_observer() {
        let observer = ManualObserver::new();
        let region = Region::new(0, 20);
        let mut trigger = VisibilityTrigger::new(0.3);

        assert!(!trigger.poll(&observer, region));
        observer.set(region, 0.1);
        assert!(!trigger.poll(&observer, region));
        observer.set(region, 0.35);
        assert!(trigger.poll(&observer, region));
        observer.set(region, 0.1);
        assert!(!trigger.poll(&observer, region));
        assert!(trigger.has_fired());
    }

    #[test]
    fn test_unavailable_observer_never_fires() {
        let observer = GeometryObserver::unavailable();
        let mut trigger = VisibilityTrigger::new(0.0);
        assert!(!trigger.poll(&observer, Region::new(0, 10)));
        assert!(!trigger.has_fired());
    }

    #[test]
    fn test_geometry_observer_follows_scroll() {
        let region = Region::new(40, 20);
        let mut observer = GeometryObserver::new(Viewport::new(0, 30));
        let mut trigger = VisibilityTrigger::new(0.3);
        assert!(!trigger.poll(&observer, region));

        observer.set_viewport(Viewport::new(20, 30));
        assert!(trigger.poll(&observer, region));
    }

    #[test]
    fn test_disconnected_trigger_ignores_input() {
        let mut trigger = VisibilityTrigger::new(0.3);
        trigger.disconnect();
        assert!(!trigger.observe(1.0));
        assert!(!trigger.has_fired());
    }
}
