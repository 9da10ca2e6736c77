use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::agent::AgentClass;
use crate::agent_state::AgentState;
use crate::error::Result;
use crate::fields::FieldState;
use crate::fsm::FSMDriver;
use crate::grid::Grid;
use crate::motion::MotionModel;
use crate::program::Program;
use crate::reaction::ReactionCoupler;
use crate::snapshot::Snapshot;
use crate::solver::FieldSolver;
use crate::sparse::CsrMatrix;
use crate::species::Species;

/// Owns `U` and the agent list and composes the five components into a
/// single `step(dt)` in the fixed order: field solve, motion, reaction
/// coupling, sensor/FSM, then advance `t`.
pub struct Engine {
    t: f64,
    grid: Grid,
    laplacian: CsrMatrix,
    species: Vec<Species>,
    fields: FieldState,
    agents: Vec<(Arc<AgentClass>, AgentState)>,
    rng: ChaCha8Rng,
}

impl Engine {
    /// Allocates fields to each species' initial concentration and
    /// instantiates one agent per entry in the flat swarm list, seeding
    /// `pos` and `fsm_state`. Must be called once before the first `step`.
    pub fn init(program: Program, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let laplacian = program.grid.five_point_laplacian();
        let initial: Vec<f64> = program.species.iter().map(|s| s.initial).collect();
        let fields = FieldState::new(program.grid.n(), &initial);
        let species_count = program.species.len();
        log::info!(
            "engine init: {} cells, {} species, {} agents, seed {seed}",
            program.grid.n(),
            species_count,
            program.agent_slots.len()
        );

        let agents = program
            .agent_slots
            .into_iter()
            .map(|slot| {
                let state = AgentState::init(&slot.class, &program.grid, species_count, &mut rng);
                (slot.class, state)
            })
            .collect();

        Self {
            t: 0.0,
            grid: program.grid,
            laplacian,
            species: program.species,
            fields,
            agents,
            rng,
        }
    }

    pub fn t(&self) -> f64 {
        self.t
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn fields(&self) -> &FieldState {
        &self.fields
    }

    pub fn agents(&self) -> &[(Arc<AgentClass>, AgentState)] {
        &self.agents
    }

    pub fn agents_mut(&mut self) -> &mut [(Arc<AgentClass>, AgentState)] {
        &mut self.agents
    }

    /// Overwrites species `k`'s entire field row. Exists for tests that
    /// need to seed a non-uniform initial field (a ramp, a pulse) that
    /// `init()`'s per-species uniform fill can't express; not part of the
    /// driver contract.
    pub fn set_field_row(&mut self, k: usize, values: &[f64]) {
        self.fields.row_mut(k).copy_from_slice(values);
    }

    /// Advances the joint state by exactly `dt`. Completes atomically or
    /// raises; the engine is considered poisoned after a raised error.
    pub fn step(&mut self, dt: f64) -> Result<()> {
        let solver = FieldSolver::new(&self.laplacian);
        solver.step(&self.species, &mut self.fields, dt)?;

        for (class, agent) in &mut self.agents {
            MotionModel::step(&self.grid, &self.fields, class, agent, dt, &mut self.rng)?;
        }

        for (class, agent) in &mut self.agents {
            ReactionCoupler::step(&self.grid, &mut self.fields, class, agent, dt)?;
        }

        for (class, agent) in &mut self.agents {
            FSMDriver::step(&self.grid, &self.fields, class, agent, self.t, dt)?;
        }

        self.t += dt;
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }
}
