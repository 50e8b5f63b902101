/// A category of visual output that can be shown or hidden independently of
/// playback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Layer {
    /// In-flight flow markers.
    MemoryFlows,
    /// Per-unit occupancy gauges.
    ComputeGauges,
}

/// Gates which layers reach the rendering surface.
///
/// Toggling only filters output; it never discards the state behind it, so
/// re-enabling a layer mid-animation picks up exactly where the engine is.
#[derive(Clone, Copy, Debug)]
pub struct VisibilityFilter {
    memory_flows: bool,
    compute_gauges: bool,
}

impl Default for VisibilityFilter {
    fn default() -> Self {
        Self {
            memory_flows: true,
            compute_gauges: true,
        }
    }
}

impl VisibilityFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self, layer: Layer) -> bool {
        match layer {
            Layer::MemoryFlows => self.memory_flows,
            Layer::ComputeGauges => self.compute_gauges,
        }
    }

    pub fn set_visible(&mut self, layer: Layer, visible: bool) {
        match layer {
            Layer::MemoryFlows => self.memory_flows = visible,
            Layer::ComputeGauges => self.compute_gauges = visible,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_layers_default_to_visible() {
        let filter = VisibilityFilter::new();
        assert!(filter.is_visible(Layer::MemoryFlows));
        assert!(filter.is_visible(Layer::ComputeGauges));
    }

    #[test]
    fn toggles_are_independent() {
        let mut filter = VisibilityFilter::new();
        filter.set_visible(Layer::MemoryFlows, false);
        assert!(!filter.is_visible(Layer::MemoryFlows));
        assert!(filter.is_visible(Layer::ComputeGauges));
        filter.set_visible(Layer::MemoryFlows, true);
        assert!(filter.is_visible(Layer::MemoryFlows));
    }
}
