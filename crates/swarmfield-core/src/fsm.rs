use crate::agent::AgentClass;
use crate::agent_state::AgentState;
use crate::error::{EngineError, Result};
use crate::fields::FieldState;
use crate::grid::Grid;
use crate::sensor::{clock_fires, SensorEvaluator};

/// Clock-gated sensor evaluation and canonical transition lookup. A no-op
/// on steps where the agent's clock hasn't fired.
pub struct FSMDriver;

impl FSMDriver {
    pub fn step(grid: &Grid, fields: &FieldState, class: &AgentClass, agent: &mut AgentState, t: f64, dt: f64) -> Result<()> {
        if !clock_fires(t, class.clock, dt) {
            return Ok(());
        }

        SensorEvaluator::evaluate(grid, fields, class, agent)?;

        if class.transitions.is_empty() {
            return Ok(());
        }

        let mut bits: u64 = 0;
        for (i, &value) in agent.sensors.iter().enumerate() {
            if value {
                bits |= 1 << i;
            }
        }

        let key = (agent.fsm_state, bits);
        let next = class
            .transitions
            .get(&key)
            .ok_or_else(|| EngineError::TransitionUndefined {
                class: class.name.clone(),
                state: class.states[agent.fsm_state].clone(),
                sensors: agent.sensors.clone(),
            })?;
        agent.fsm_state = *next;
        Ok(())
    }
}
