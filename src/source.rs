use std::path::Path;

use rand::{Rng as _, SeedableRng as _};
use rand_chacha::ChaCha8Rng;

use crate::{
    registry::{BlockRegistry, FloorPlan},
    trace::{Flow, Frame, Trace, TraceArtifact, UnitStat},
};

/// Shape of the synthetic fallback trace.
#[derive(Clone, Copy, Debug)]
pub struct SyntheticConfig {
    pub frames: usize,
    pub flows_per_frame: usize,
    pub dram_ctrls: u32,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            frames: 120,
            flows_per_frame: 4,
            dram_ctrls: FloorPlan::DRAM_UNITS,
        }
    }
}

/// Produces the session's trace: from an artifact on disk when possible,
/// from the seeded synthetic generator otherwise.
///
/// All randomness (fallback generation, occupancy filled into legacy
/// frames) comes from one injected ChaCha8 stream, so the output is a pure
/// function of the seed and tests can assert it exactly. Load failure is
/// never surfaced as an error; the visualization degrades to synthetic data
/// behind a warning.
#[derive(Clone, Debug)]
pub struct TraceSource {
    rng: ChaCha8Rng,
    config: SyntheticConfig,
}

impl TraceSource {
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, SyntheticConfig::default())
    }

    pub fn with_config(seed: u64, config: SyntheticConfig) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            config,
        }
    }

    /// Load a trace artifact, falling back to synthetic generation on any
    /// read or parse failure.
    #[tracing::instrument(skip(self, registry))]
    pub fn load(&mut self, path: &Path, registry: &BlockRegistry) -> Trace {
        let artifact = std::fs::read_to_string(path)
            .map_err(anyhow::Error::from)
            .and_then(|s| TraceArtifact::from_json(&s).map_err(anyhow::Error::from));

        match artifact {
            Ok(artifact) => self.normalize(artifact, registry),
            Err(err) => {
                tracing::warn!(error = %err, "trace load failed, generating synthetic trace");
                self.synthetic(registry)
            }
        }
    }

    /// Turn either wire shape into a playable trace.
    ///
    /// The legacy flat shape becomes one frame per flow record; legacy data
    /// carries no occupancy, so every known unit gets a random fill and
    /// zero stall, same as the original visualization did.
    pub fn normalize(&mut self, artifact: TraceArtifact, registry: &BlockRegistry) -> Trace {
        match artifact {
            TraceArtifact::Framed(frames) => Trace(frames),
            TraceArtifact::LegacyFlows(flows) => Trace(
                flows
                    .into_iter()
                    .map(|flow| Frame {
                        sm_stats: self.random_stats(registry),
                        flows: vec![flow],
                    })
                    .collect(),
            ),
        }
    }

    /// Deterministic fallback trace: `frames` frames, each with one stat
    /// per known unit and `flows_per_frame` random unit-to-DRAM loads.
    ///
    /// Flow sources come from the registry's gauge-unit block names, so
    /// generated flows resolve in any layout, not only SM-named ones.
    pub fn synthetic(&mut self, registry: &BlockRegistry) -> Trace {
        let sources: Vec<String> = registry
            .gauge_units()
            .filter_map(|id| registry.gauge_block(id).map(str::to_owned))
            .collect();
        let frames = (0..self.config.frames)
            .map(|_| {
                let sm_stats = self.random_stats(registry);
                let flows = if sources.is_empty() {
                    Vec::new()
                } else {
                    (0..self.config.flows_per_frame)
                        .map(|_| {
                            let src = sources[self.rng.gen_range(0..sources.len())].clone();
                            let dst = self.rng.gen_range(0..self.config.dram_ctrls.max(1));
                            Flow {
                                src,
                                dst: format!("DRAM{dst}"),
                                kind: "load".into(),
                                bytes: 1024.0 + self.rng.gen_range(0.0..8192.0),
                            }
                        })
                        .collect()
                };
                Frame { sm_stats, flows }
            })
            .collect();
        Trace(frames)
    }

    fn random_stats(&mut self, registry: &BlockRegistry) -> Vec<UnitStat> {
        registry
            .gauge_units()
            .map(|id| UnitStat {
                id,
                occupancy: self.rng.gen_range(0.0..1.0),
                stall_pct: 0.0,
            })
            .collect()
    }
}
