use glam::DVec2;
use rand::Rng;

use crate::agent::AgentClass;
use crate::grid::Grid;

/// Runtime per-agent record. Shared `AgentClass` descriptors are held
/// separately (one per instance, behind an `Arc`, in `Engine`); this type
/// carries only what actually varies per agent.
#[derive(Debug, Clone)]
pub struct AgentState {
    pub pos: DVec2,
    pub fsm_state: usize,
    pub reservoir: Vec<f64>,
    pub sensors: Vec<bool>,
}

impl AgentState {
    /// `pos` is the class's fixed position if declared, else uniform-random
    /// within the grid domain. `fsm_state` starts at `states[0]`. The
    /// reservoir has one slot per species in the program (`species_count`,
    /// i.e. `K`) — reaction/exchange and reservoir sensors may reference
    /// any species, not just the ones this class mentions in `ascent`.
    pub fn init(class: &AgentClass, grid: &Grid, species_count: usize, rng: &mut impl Rng) -> Self {
        let pos = match class.fixed_pos {
            Some((x, y)) => DVec2::new(x, y),
            None => DVec2::new(
                rng.gen_range(grid.x_lo..grid.x_hi),
                rng.gen_range(grid.y_lo..grid.y_hi),
            ),
        };

        Self {
            pos,
            fsm_state: class.initial_state(),
            reservoir: vec![0.0; species_count],
            sensors: vec![false; class.sensors.len()],
        }
    }
}
