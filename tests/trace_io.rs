use floorplay::{FloorPlan, TraceArtifact, TraceSource};

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "floorplay_{name}_{}_{}.json",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

#[test]
fn framed_fixture_parses_with_wire_names() {
    let registry = FloorPlan::standard(900.0, 520.0).unwrap();
    let artifact = TraceArtifact::from_json(include_str!("data/framed_trace.json")).unwrap();
    let trace = TraceSource::new(0).normalize(artifact, &registry);

    assert_eq!(trace.len(), 2);
    assert_eq!(trace.0[0].sm_stats[0].stall_pct, 50.0);
    assert_eq!(trace.0[1].flows[1].kind, "writeback");
    assert_eq!(trace.0[1].flows[0].dst, "L2_0");
    trace.validate().unwrap();
}

#[test]
fn legacy_fixture_wraps_each_record_into_a_frame() {
    let registry = FloorPlan::standard(900.0, 520.0).unwrap();
    let artifact = TraceArtifact::from_json(include_str!("data/legacy_trace.json")).unwrap();
    let trace = TraceSource::new(5).normalize(artifact, &registry);

    assert_eq!(trace.len(), 3);
    for frame in &trace.0 {
        assert_eq!(frame.flows.len(), 1);
        // Legacy records carry no occupancy: every known unit is filled in
        // with a generated value and zero stall.
        assert_eq!(frame.sm_stats.len(), 8);
        assert!(frame.sm_stats.iter().all(|s| s.stall_pct == 0.0));
        assert!(frame
            .sm_stats
            .iter()
            .all(|s| (0.0..1.0).contains(&s.occupancy)));
    }
    assert_eq!(trace.0[2].flows[0].kind, "store");
}

#[test]
fn malformed_artifact_is_a_trace_error() {
    assert!(TraceArtifact::from_json("{not json").is_err());
    // Valid JSON in neither wire shape is also rejected.
    assert!(TraceArtifact::from_json(r#"{"frames": 3}"#).is_err());
}

#[test]
fn synthetic_trace_round_trips_through_disk() {
    let registry = FloorPlan::standard(900.0, 520.0).unwrap();
    let generated = TraceSource::new(21).synthetic(&registry);

    let path = temp_path("roundtrip");
    std::fs::write(&path, serde_json::to_string_pretty(&generated.0).unwrap()).unwrap();

    let loaded = TraceSource::new(99).load(&path, &registry);
    std::fs::remove_file(&path).ok();

    // The loader takes the framed path, so the fallback seed is irrelevant.
    assert_eq!(loaded, generated);
}
