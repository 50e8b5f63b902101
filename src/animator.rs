use kurbo::Point;

use crate::{ease::Ease, registry::BlockRegistry, trace::Flow};

/// Travel phase length: marker moves from source anchor to destination.
pub const TRAVEL_MS: u64 = 800;

/// Fade phase length: marker dissolves in place at the destination.
pub const FADE_MS: u64 = 200;

/// Bound on concurrently live animations. Flows arriving while the set is
/// full are dropped; a marker that never appears is less jarring than one
/// evicted mid-flight.
pub const MAX_LIVE: usize = 512;

const MAX_RADIUS: f64 = 10.0;

/// One transient marker in flight, sampled by the rendering surface.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FlowMarker {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub opacity: f64,
}

/// A single in-flight transfer: ease-in-out travel between two anchors at
/// full opacity, then a linear fade-out in place. Lifetime is exactly
/// `travel_ms + fade_ms` from creation; never reused or reset.
#[derive(Clone, Debug)]
struct Animation {
    start: Point,
    end: Point,
    start_ms: u64,
    travel_ms: u64,
    fade_ms: u64,
    radius: f64,
}

impl Animation {
    fn expires_at(&self) -> u64 {
        self.start_ms + self.travel_ms + self.fade_ms
    }

    fn sample(&self, now_ms: u64) -> FlowMarker {
        let elapsed = now_ms.saturating_sub(self.start_ms);
        if elapsed < self.travel_ms {
            let t = Ease::InOutCubic.apply(elapsed as f64 / self.travel_ms as f64);
            FlowMarker {
                x: self.start.x + (self.end.x - self.start.x) * t,
                y: self.start.y + (self.end.y - self.start.y) * t,
                radius: self.radius,
                opacity: 1.0,
            }
        } else {
            let t = Ease::Linear.apply((elapsed - self.travel_ms) as f64 / self.fade_ms as f64);
            FlowMarker {
                x: self.end.x,
                y: self.end.y,
                radius: self.radius,
                opacity: 1.0 - t,
            }
        }
    }
}

/// Owns every live [`Animation`]; each proceeds independently of the clock
/// and of the frame that spawned it.
#[derive(Debug, Default)]
pub struct FlowAnimator {
    live: Vec<Animation>,
}

impl FlowAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Start animating one flow.
    ///
    /// Flows whose endpoints are absent from the registry are dropped
    /// silently; trace data may reference blocks the current layout omits.
    pub fn spawn(&mut self, flow: &Flow, registry: &BlockRegistry, now_ms: u64) {
        let (Some(start), Some(end)) = (registry.anchor(&flow.src), registry.anchor(&flow.dst))
        else {
            tracing::debug!(src = %flow.src, dst = %flow.dst, "flow endpoint not in layout, dropped");
            return;
        };

        if self.live.len() >= MAX_LIVE {
            tracing::debug!(live = self.live.len(), "live animation set full, flow dropped");
            return;
        }

        self.live.push(Animation {
            start,
            end,
            start_ms: now_ms,
            travel_ms: TRAVEL_MS,
            fade_ms: FADE_MS,
            radius: (4.0 + flow.bytes / 4096.0).min(MAX_RADIUS),
        });
    }

    /// Sample every live marker at `now_ms`, pruning the ones whose fade has
    /// completed.
    pub fn sample(&mut self, now_ms: u64) -> Vec<FlowMarker> {
        self.live.retain(|anim| now_ms < anim.expires_at());
        self.live.iter().map(|anim| anim.sample(now_ms)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_block_registry() -> BlockRegistry {
        let mut registry = BlockRegistry::new();
        registry.set_anchor("SM0", Point::new(100.0, 100.0));
        registry.set_anchor("DRAM0", Point::new(500.0, 100.0));
        registry
    }

    fn load(bytes: f64) -> Flow {
        Flow {
            src: "SM0".into(),
            dst: "DRAM0".into(),
            kind: "load".into(),
            bytes,
        }
    }

    #[test]
    fn unknown_endpoint_spawns_nothing() {
        let registry = two_block_registry();
        let mut animator = FlowAnimator::new();
        let mut flow = load(4096.0);
        flow.dst = "DRAM9".into();
        animator.spawn(&flow, &registry, 0);
        assert_eq!(animator.live_count(), 0);
    }

    #[test]
    fn radius_encodes_bytes_and_caps() {
        let registry = two_block_registry();
        let mut animator = FlowAnimator::new();
        animator.spawn(&load(4096.0), &registry, 0);
        animator.spawn(&load((1u32 << 20) as f64), &registry, 0);
        let markers = animator.sample(0);
        assert_eq!(markers[0].radius, 5.0);
        assert_eq!(markers[1].radius, 10.0);
    }

    #[test]
    fn opacity_is_full_through_travel_then_fades_linearly() {
        let registry = two_block_registry();
        let mut animator = FlowAnimator::new();
        animator.spawn(&load(0.0), &registry, 1000);

        for now in [1000, 1400, 1799, 1800] {
            assert_eq!(animator.sample(now)[0].opacity, 1.0, "at {now}");
        }
        assert_eq!(animator.sample(1900)[0].opacity, 0.5);
        assert!((animator.sample(1950)[0].opacity - 0.25).abs() < 1e-12);
    }

    #[test]
    fn marker_travels_from_src_to_dst_and_parks_during_fade() {
        let registry = two_block_registry();
        let mut animator = FlowAnimator::new();
        animator.spawn(&load(0.0), &registry, 0);

        let at_start = animator.sample(0)[0];
        assert_eq!((at_start.x, at_start.y), (100.0, 100.0));

        // Ease-in-out crosses the midpoint exactly at half the travel phase.
        let mid = animator.sample(400)[0];
        assert_eq!(mid.x, 300.0);

        let fading = animator.sample(900)[0];
        assert_eq!((fading.x, fading.y), (500.0, 100.0));
    }

    #[test]
    fn lifetime_is_exactly_travel_plus_fade() {
        let registry = two_block_registry();
        let mut animator = FlowAnimator::new();
        animator.spawn(&load(0.0), &registry, 0);

        assert_eq!(animator.sample(TRAVEL_MS + FADE_MS - 1).len(), 1);
        assert_eq!(animator.sample(TRAVEL_MS + FADE_MS).len(), 0);
        assert_eq!(animator.live_count(), 0);
    }

    #[test]
    fn live_set_is_bounded() {
        let registry = two_block_registry();
        let mut animator = FlowAnimator::new();
        for _ in 0..(MAX_LIVE + 50) {
            animator.spawn(&load(1024.0), &registry, 0);
        }
        assert_eq!(animator.live_count(), MAX_LIVE);
    }
}
