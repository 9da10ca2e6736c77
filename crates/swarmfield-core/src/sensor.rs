use crate::agent::{AgentClass, SensorKind};
use crate::agent_state::AgentState;
use crate::error::Result;
use crate::fields::FieldState;
use crate::grid::Grid;

/// True on the first step of each clock interval.
pub fn clock_fires(t: f64, clock: f64, dt: f64) -> bool {
    t % clock <= dt
}

/// Reads each declared sensor against the field at the agent's current
/// cell or its reservoir, in declaration order, and writes the resulting
/// truths into `agent.sensors`. Does not gate on the clock itself —
/// callers (`FSMDriver`) decide when to invoke this.
pub struct SensorEvaluator;

impl SensorEvaluator {
    pub fn evaluate(grid: &Grid, fields: &FieldState, class: &AgentClass, agent: &mut AgentState) -> Result<()> {
        let p = grid.pos_to_index_vec(agent.pos)?;
        for (i, sensor) in class.sensors.iter().enumerate() {
            let value = match sensor.kind {
                SensorKind::Field(species_idx) => fields.get(species_idx, p) >= sensor.threshold,
                SensorKind::Reservoir(species_idx) => agent.reservoir[species_idx] >= sensor.threshold,
            };
            agent.sensors[i] = value;
        }
        Ok(())
    }
}
