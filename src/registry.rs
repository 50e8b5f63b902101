use std::collections::BTreeMap;

use kurbo::Point;

use crate::error::{FloorplayError, FloorplayResult};

/// Static lookup from block identifier to its anchor (center) coordinate.
///
/// Built once by the layout layer before playback starts and read-only
/// afterwards. Also records which unit ids carry an occupancy gauge, so the
/// frame processor can ignore stats for units the current layout omits.
#[derive(Clone, Debug, Default)]
pub struct BlockRegistry {
    anchors: BTreeMap<String, Point>,
    gauges: BTreeMap<u32, String>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Anchor for a named block, or `None` when the layout omits it.
    pub fn anchor(&self, block: &str) -> Option<Point> {
        self.anchors.get(block).copied()
    }

    pub fn contains(&self, block: &str) -> bool {
        self.anchors.contains_key(block)
    }

    /// Unit ids that have a gauge in this layout, ascending.
    pub fn gauge_units(&self) -> impl Iterator<Item = u32> + '_ {
        self.gauges.keys().copied()
    }

    pub fn has_gauge(&self, unit: u32) -> bool {
        self.gauges.contains_key(&unit)
    }

    /// Block name a gauge unit belongs to.
    pub fn gauge_block(&self, unit: u32) -> Option<&str> {
        self.gauges.get(&unit).map(String::as_str)
    }

    pub fn set_anchor(&mut self, block: impl Into<String>, anchor: Point) {
        self.anchors.insert(block.into(), anchor);
    }

    /// Register a gauge for `unit` on the named block. Re-registering a
    /// unit replaces its block.
    pub fn add_gauge_unit(&mut self, unit: u32, block: impl Into<String>) {
        self.gauges.insert(unit, block.into());
    }
}

/// The standard die floor plan: a 2x4 grid of streaming multiprocessors,
/// two double-width L2 cache slices below them, and two DRAM controllers
/// along the right edge. Block names are `SM0..SM7`, `L2_0..L2_1`,
/// `DRAM0..DRAM1`.
pub struct FloorPlan;

const PADDING: f64 = 30.0;
const SM_ROWS: u32 = 2;
const SM_COLS: u32 = 4;
const SM_GAP: f64 = 8.0;
const SM_BLOCK_H: f64 = 100.0;
const L2_SLICES: u32 = 2;
const L2_GAP: f64 = 10.0;
const L2_BLOCK_H: f64 = 60.0;
const DRAM_CTRLS: u32 = 2;
const DRAM_GAP: f64 = 10.0;
const DRAM_BLOCK_H: f64 = 60.0;

impl FloorPlan {
    /// Number of SM gauge units in the standard plan.
    pub const SM_UNITS: u32 = SM_ROWS * SM_COLS;

    /// Number of DRAM controllers in the standard plan.
    pub const DRAM_UNITS: u32 = DRAM_CTRLS;

    /// Build the standard registry for a die outline of `width` x `height`.
    ///
    /// Fails when the outline is too small to hold the SM grid with
    /// positive block widths.
    pub fn standard(width: f64, height: f64) -> FloorplayResult<BlockRegistry> {
        let sm_block_w =
            (width - 2.0 * PADDING - f64::from(SM_COLS + 1) * SM_GAP) / f64::from(SM_COLS);
        if sm_block_w <= 0.0 || height <= 2.0 * PADDING {
            return Err(FloorplayError::validation(format!(
                "floor plan {width}x{height} is too small for the SM grid"
            )));
        }

        let mut registry = BlockRegistry::new();

        for row in 0..SM_ROWS {
            for col in 0..SM_COLS {
                let id = row * SM_COLS + col;
                let x = PADDING + SM_GAP + f64::from(col) * (sm_block_w + SM_GAP);
                let y = PADDING + SM_GAP + f64::from(row) * (SM_BLOCK_H + SM_GAP);
                let name = format!("SM{id}");
                registry.set_anchor(
                    name.clone(),
                    Point::new(x + sm_block_w / 2.0, y + SM_BLOCK_H / 2.0),
                );
                registry.add_gauge_unit(id, name);
            }
        }

        let l2_block_w = sm_block_w * 2.0 + SM_GAP;
        for i in 0..L2_SLICES {
            let x = PADDING + SM_GAP;
            let y = PADDING
                + f64::from(SM_ROWS) * (SM_BLOCK_H + SM_GAP)
                + L2_GAP
                + f64::from(i) * (L2_BLOCK_H + L2_GAP);
            registry.set_anchor(
                format!("L2_{i}"),
                Point::new(x + l2_block_w / 2.0, y + L2_BLOCK_H / 2.0),
            );
        }

        let dram_block_w = sm_block_w;
        for i in 0..DRAM_CTRLS {
            let x = width - PADDING - dram_block_w - SM_GAP;
            let y = PADDING + SM_GAP + f64::from(i) * (DRAM_BLOCK_H + DRAM_GAP);
            registry.set_anchor(
                format!("DRAM{i}"),
                Point::new(x + dram_block_w / 2.0, y + DRAM_BLOCK_H / 2.0),
            );
        }

        Ok(registry)
    }
}
