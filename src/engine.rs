use crate::{
    animator::{FlowAnimator, FlowMarker},
    clock::PlaybackClock,
    processor::{FrameProcessor, GaugeUpdate},
    registry::BlockRegistry,
    trace::Trace,
    visibility::{Layer, VisibilityFilter},
};

/// Everything the rendering surface needs for one drawn frame.
#[derive(Clone, Debug, Default, serde::Serialize)]
pub struct Scene {
    pub gauges: Vec<GaugeUpdate>,
    pub markers: Vec<FlowMarker>,
}

/// Hover/tooltip answer for one unit.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct HoverStats {
    pub occupancy_pct: f64,
    pub stall_pct: f64,
}

/// The playback engine: owns the trace, the clock, the per-unit visual
/// state, the live animations and the visibility flags for one session.
///
/// All methods take an explicit logical `now_ms`; the engine schedules
/// nothing itself. A host pumps [`Engine::tick`] as often as it likes and
/// reads [`Engine::sample`] whenever it draws.
pub struct Engine {
    trace: Trace,
    registry: BlockRegistry,
    clock: PlaybackClock,
    processor: FrameProcessor,
    animator: FlowAnimator,
    visibility: VisibilityFilter,
}

impl Engine {
    pub fn new(trace: Trace, registry: BlockRegistry, speed_ms: u64) -> Self {
        Self {
            trace,
            registry,
            clock: PlaybackClock::new(speed_ms),
            processor: FrameProcessor::new(),
            animator: FlowAnimator::new(),
            visibility: VisibilityFilter::new(),
        }
    }

    pub fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    pub fn trace_len(&self) -> usize {
        self.trace.len()
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn speed_ms(&self) -> u64 {
        self.clock.speed_ms()
    }

    pub fn cursor(&self) -> u64 {
        self.clock.cursor()
    }

    pub fn start(&mut self, now_ms: u64) {
        self.clock.start(now_ms);
    }

    /// Stop future ticks. In-flight animations are deliberately left
    /// running to completion: pause stops new events, it does not freeze
    /// or clear what is already on screen.
    pub fn pause(&mut self) {
        self.clock.pause();
    }

    /// Flip play/pause; returns the new running state.
    pub fn toggle_playback(&mut self, now_ms: u64) -> bool {
        self.clock.toggle(now_ms)
    }

    pub fn set_speed(&mut self, speed_ms: u64, now_ms: u64) {
        self.clock.set_speed(speed_ms, now_ms);
    }

    pub fn set_layer_visible(&mut self, layer: Layer, visible: bool) {
        self.visibility.set_visible(layer, visible);
    }

    /// Poll the clock and, when a tick is due, apply the frame under the
    /// cursor. Returns whether a frame was applied.
    ///
    /// With an empty trace a due tick fires but has no visible effect and
    /// leaves the cursor untouched.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if !self.clock.poll(now_ms) {
            return false;
        }
        let Some(frame) = self.trace.frame_at(self.clock.cursor()) else {
            return false;
        };
        self.processor
            .apply(frame, &self.registry, &mut self.animator, now_ms);
        self.clock.advance_cursor();
        true
    }

    /// Sample the scene at `now_ms`, filtered by layer visibility.
    ///
    /// Hidden layers keep evolving underneath; animations are pruned here
    /// even while the flow layer is hidden, so re-enabling it shows exactly
    /// the markers that would still be alive.
    pub fn sample(&mut self, now_ms: u64) -> Scene {
        let markers = self.animator.sample(now_ms);
        Scene {
            gauges: if self.visibility.is_visible(Layer::ComputeGauges) {
                self.processor.gauges(&self.registry)
            } else {
                Vec::new()
            },
            markers: if self.visibility.is_visible(Layer::MemoryFlows) {
                markers
            } else {
                Vec::new()
            },
        }
    }

    /// Tooltip stats for a unit, regardless of layer visibility.
    ///
    /// `None` only for units the layout does not know; known units that
    /// have never been updated answer zeros.
    pub fn hover(&self, unit: u32) -> Option<HoverStats> {
        if !self.registry.has_gauge(unit) {
            return None;
        }
        let state = self.processor.state(unit).unwrap_or_default();
        Some(HoverStats {
            occupancy_pct: state.occupancy.clamp(0.0, 1.0) * 100.0,
            stall_pct: state.stall_pct,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::{Frame, UnitStat};
    use kurbo::Point;

    fn engine_with(frames: Vec<Frame>) -> Engine {
        let mut registry = BlockRegistry::new();
        registry.set_anchor("SM0", Point::new(0.0, 0.0));
        registry.set_anchor("DRAM0", Point::new(100.0, 0.0));
        registry.add_gauge_unit(0, "SM0");
        Engine::new(Trace(frames), registry, 100)
    }

    fn stat_frame(occupancy: f64) -> Frame {
        Frame {
            sm_stats: vec![UnitStat {
                id: 0,
                occupancy,
                stall_pct: 0.0,
            }],
            flows: vec![],
        }
    }

    #[test]
    fn paused_engine_never_applies_frames() {
        let mut engine = engine_with(vec![stat_frame(0.5)]);
        assert!(!engine.tick(10_000));
        assert_eq!(engine.hover(0).unwrap().occupancy_pct, 0.0);
    }

    #[test]
    fn hover_distinguishes_unknown_units_from_idle_ones() {
        let engine = engine_with(vec![]);
        assert!(engine.hover(0).is_some());
        assert!(engine.hover(42).is_none());
    }

    #[test]
    fn hidden_layers_return_empty_but_state_survives() {
        let mut engine = engine_with(vec![stat_frame(0.7)]);
        engine.start(0);
        engine.tick(100);

        engine.set_layer_visible(Layer::ComputeGauges, false);
        assert!(engine.sample(100).gauges.is_empty());

        engine.set_layer_visible(Layer::ComputeGauges, true);
        let scene = engine.sample(100);
        assert_eq!(scene.gauges.len(), 1);
        assert_eq!(scene.gauges[0].fill_frac, 0.7);
    }
}
