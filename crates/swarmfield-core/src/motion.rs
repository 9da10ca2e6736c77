use glam::DVec2;
use rand::Rng;

use crate::actuation;
use crate::agent::AgentClass;
use crate::agent_state::AgentState;
use crate::error::Result;
use crate::fields::FieldState;
use crate::gradient::gradient;
use crate::grid::Grid;

/// Brownian displacement plus chemotactic ascent, clipped to keep the agent
/// inside the domain. Agents with a fixed position are skipped entirely.
pub struct MotionModel;

impl MotionModel {
    pub fn step(
        grid: &Grid,
        fields: &FieldState,
        class: &AgentClass,
        agent: &mut AgentState,
        dt: f64,
        rng: &mut impl Rng,
    ) -> Result<()> {
        if class.fixed_pos.is_some() {
            return Ok(());
        }

        let displacement = actuation::resolve(&class.displacement, &class.actuators, agent.fsm_state, &class.name)?;

        let xi = DVec2::new(rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0));
        let mut d = xi * (displacement * dt.powf(-0.5));

        for &(species_idx, ref speed_param) in &class.ascent {
            let speed = actuation::resolve(speed_param, &class.actuators, agent.fsm_state, &class.name)?;
            let (gx, gy) = gradient(grid, fields.row(species_idx), agent.pos.x, agent.pos.y)?;
            let g = DVec2::new(gx, gy);
            if g != DVec2::ZERO {
                d += g.normalize() * (dt * speed);
            }
        }

        let d = grid.clip(agent.pos, d);
        agent.pos += d;
        Ok(())
    }
}
