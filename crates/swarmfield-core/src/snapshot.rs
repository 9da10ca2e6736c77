use glam::DVec2;

use crate::engine::Engine;

/// Read-only view of engine state for external drivers: simulated time,
/// the full `K x N` field array, and per-agent position/state/reservoir/
/// sensor readout. Captured by value so it outlives the next `step`.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub t: f64,
    pub fields: Vec<Vec<f64>>,
    pub agents: Vec<AgentSnapshot>,
}

#[derive(Debug, Clone)]
pub struct AgentSnapshot {
    pub pos: DVec2,
    pub fsm_state: usize,
    pub reservoir: Vec<f64>,
    pub sensors: Vec<bool>,
}

impl Snapshot {
    pub fn capture(engine: &Engine) -> Self {
        let fields = engine.fields();
        let rows = (0..fields.k()).map(|k| fields.row(k).to_vec()).collect();

        let agents = engine
            .agents()
            .iter()
            .map(|(_, state)| AgentSnapshot {
                pos: state.pos,
                fsm_state: state.fsm_state,
                reservoir: state.reservoir.clone(),
                sensors: state.sensors.clone(),
            })
            .collect();

        Self {
            t: engine.t(),
            fields: rows,
            agents,
        }
    }
}
