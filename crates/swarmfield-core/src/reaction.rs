use std::collections::HashMap;

use crate::agent::{AgentClass, ReactionInputs};
use crate::agent_state::AgentState;
use crate::error::Result;
use crate::fields::FieldState;
use crate::grid::Grid;

/// Injects each agent's `reaction`/`exchange` terms into the field at the
/// agent's current cell and accumulates `exchange` into its reservoir.
/// Runs for every agent every step, independent of the FSM clock.
pub struct ReactionCoupler;

impl ReactionCoupler {
    pub fn step(grid: &Grid, fields: &mut FieldState, class: &AgentClass, agent: &mut AgentState, dt: f64) -> Result<()> {
        let p = grid.pos_to_index_vec(agent.pos)?;
        let k = fields.k();
        let scale = dt / (grid.h * grid.h);

        let mut helpers: HashMap<String, f64> = HashMap::new();
        for (name, param) in &class.behavior.reaction_helpers {
            let value = crate::actuation::resolve(param, &class.actuators, agent.fsm_state, &class.name)?;
            helpers.insert(name.clone(), value);
        }

        let conc = fields.cell(p);
        let inputs = ReactionInputs {
            conc: &conc,
            reservoir: &agent.reservoir,
            helpers: &helpers,
        };

        let r = (class.behavior.reaction)(&inputs).resolve(k, &class.name)?;
        for (kk, r_kk) in r.iter().enumerate() {
            let v = fields.get(kk, p) + scale * r_kk;
            fields.set(kk, p, v);
        }

        // exchange reads the field state after reaction has already been
        // applied, within the same agent's coupling step.
        let conc_after_reaction = fields.cell(p);
        let inputs = ReactionInputs {
            conc: &conc_after_reaction,
            reservoir: &agent.reservoir,
            helpers: &helpers,
        };
        let e = (class.behavior.exchange)(&inputs).resolve(k, &class.name)?;
        for (kk, e_kk) in e.iter().enumerate() {
            let v = fields.get(kk, p) - scale * e_kk;
            fields.set(kk, p, v);
            agent.reservoir[kk] += scale * e_kk;
        }

        Ok(())
    }
}
