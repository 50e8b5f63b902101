use std::collections::BTreeMap;

use crate::{
    animator::FlowAnimator,
    color::{self, Rgba8},
    registry::BlockRegistry,
    trace::Frame,
};

/// Stall percentage above which a gauge gets the alert outline.
pub const STALL_ALERT_THRESHOLD: f64 = 40.0;

/// Most recent stats applied for one unit.
///
/// Kept only to answer hover queries between ticks; not part of the trace.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct UnitVisualState {
    pub occupancy: f64,
    pub stall_pct: f64,
}

/// Per-unit gauge descriptor handed to the rendering surface.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct GaugeUpdate {
    pub unit: u32,
    /// Fill as a fraction of the gauge's full width, clamped to `[0, 1]`.
    pub fill_frac: f64,
    pub color: Rgba8,
    /// True when the unit is stalled past [`STALL_ALERT_THRESHOLD`].
    pub alert: bool,
}

/// Applies one frame per tick: unit stats first (overwriting the visual
/// state), then every flow is handed to the animator. The ordering means a
/// gauge always reflects the same frame as any marker leaving its unit.
#[derive(Debug, Default)]
pub struct FrameProcessor {
    states: BTreeMap<u32, UnitVisualState>,
}

impl FrameProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    #[tracing::instrument(skip_all, fields(stats = frame.sm_stats.len(), flows = frame.flows.len()))]
    pub fn apply(
        &mut self,
        frame: &Frame,
        registry: &BlockRegistry,
        animator: &mut FlowAnimator,
        now_ms: u64,
    ) {
        for stat in &frame.sm_stats {
            // Stats for units the layout omits are ignored, not errors.
            if !registry.has_gauge(stat.id) {
                continue;
            }
            self.states.insert(
                stat.id,
                UnitVisualState {
                    occupancy: stat.occupancy,
                    stall_pct: stat.stall_pct,
                },
            );
        }

        for flow in &frame.flows {
            animator.spawn(flow, registry, now_ms);
        }
    }

    pub fn state(&self, unit: u32) -> Option<UnitVisualState> {
        self.states.get(&unit).copied()
    }

    /// One gauge descriptor per unit the layout knows, in unit order.
    /// Units never updated read as empty gauges.
    pub fn gauges(&self, registry: &BlockRegistry) -> Vec<GaugeUpdate> {
        registry
            .gauge_units()
            .map(|unit| {
                let state = self.states.get(&unit).copied().unwrap_or_default();
                let fill = state.occupancy.clamp(0.0, 1.0);
                GaugeUpdate {
                    unit,
                    fill_frac: fill,
                    color: color::blues(fill),
                    alert: state.stall_pct > STALL_ALERT_THRESHOLD,
                }
            })
            .collect()
    }
}
