use crate::error::{FloorplayError, FloorplayResult};

/// One `sm_stats` entry: the sampled activity of a single compute unit.
///
/// `occupancy` is nominally in `[0, 1]` and `stall_pct` in `[0, 100]`;
/// out-of-range values are tolerated here and clamped by rendering-facing
/// consumers, never rejected.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UnitStat {
    pub id: u32,
    pub occupancy: f64,
    pub stall_pct: f64,
}

/// One data-transfer event between two named die blocks.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Flow {
    pub src: String,
    pub dst: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub bytes: f64,
}

/// One playback snapshot: per-unit stats plus the transfers that occurred
/// in this slice of the trace. Immutable once produced.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Frame {
    pub sm_stats: Vec<UnitStat>,
    pub flows: Vec<Flow>,
}

/// A finite ordered sequence of frames, replayed cyclically.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Trace(pub Vec<Frame>);

impl Trace {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Frame at `cursor % len`, or `None` for an empty trace.
    pub fn frame_at(&self, cursor: u64) -> Option<&Frame> {
        if self.0.is_empty() {
            return None;
        }
        let idx = (cursor % self.0.len() as u64) as usize;
        Some(&self.0[idx])
    }

    pub fn validate(&self) -> FloorplayResult<()> {
        for (i, frame) in self.0.iter().enumerate() {
            for flow in &frame.flows {
                if flow.bytes < 0.0 {
                    return Err(FloorplayError::validation(format!(
                        "frame {i}: flow {} -> {} has negative bytes",
                        flow.src, flow.dst
                    )));
                }
                if flow.src.is_empty() || flow.dst.is_empty() {
                    return Err(FloorplayError::validation(format!(
                        "frame {i}: flow endpoints must be non-empty"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// The two wire shapes a trace artifact can take.
///
/// The framed shape is the current format; the legacy shape is a flat list
/// of flow records from before per-frame stats existed and is wrapped into
/// one frame per record by [`TraceSource`](crate::source::TraceSource).
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(untagged)]
pub enum TraceArtifact {
    Framed(Vec<Frame>),
    LegacyFlows(Vec<Flow>),
}

impl TraceArtifact {
    pub fn from_json(s: &str) -> FloorplayResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| FloorplayError::trace(format!("trace artifact parse failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_at_wraps_modulo_length() {
        let trace = Trace(vec![Frame::default(), Frame::default(), Frame::default()]);
        assert!(trace.frame_at(0).is_some());
        assert_eq!(trace.frame_at(4), trace.frame_at(1));
        assert_eq!(trace.frame_at(300), trace.frame_at(0));
    }

    #[test]
    fn empty_trace_has_no_frames() {
        let trace = Trace::default();
        assert!(trace.frame_at(0).is_none());
        assert!(trace.frame_at(7).is_none());
    }

    #[test]
    fn artifact_distinguishes_framed_and_legacy() {
        let framed = r#"[{"sm_stats":[{"id":0,"occupancy":0.5,"stall_pct":10.0}],"flows":[]}]"#;
        match TraceArtifact::from_json(framed).unwrap() {
            TraceArtifact::Framed(frames) => assert_eq!(frames.len(), 1),
            TraceArtifact::LegacyFlows(_) => panic!("parsed framed artifact as legacy"),
        }

        let legacy = r#"[{"src":"SM0","dst":"DRAM1","type":"load","bytes":2048}]"#;
        match TraceArtifact::from_json(legacy).unwrap() {
            TraceArtifact::LegacyFlows(flows) => {
                assert_eq!(flows[0].kind, "load");
                assert_eq!(flows[0].dst, "DRAM1");
            }
            TraceArtifact::Framed(_) => panic!("parsed legacy artifact as framed"),
        }
    }

    #[test]
    fn validate_rejects_negative_bytes() {
        let trace = Trace(vec![Frame {
            sm_stats: vec![],
            flows: vec![Flow {
                src: "SM0".into(),
                dst: "DRAM0".into(),
                kind: "load".into(),
                bytes: -1.0,
            }],
        }]);
        assert!(trace.validate().is_err());
    }
}
