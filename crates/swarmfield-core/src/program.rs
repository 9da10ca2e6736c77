use std::collections::HashMap;
use std::sync::Arc;

use swarmfield_params::ProgramSpec;

use crate::agent::{AgentBehavior, AgentClass};
use crate::error::{EngineError, Result};
use crate::grid::Grid;
use crate::species::Species;

/// One flat entry in the instantiation order: which class to build an
/// agent of. Order is the concatenation of the declared swarm groups,
/// which is also the fixed agent iteration order for the whole run.
pub struct AgentSlot {
    pub class: Arc<AgentClass>,
}

/// Resolved, ready-to-run program: grid, ordered species, and the flat
/// agent instantiation list. `ProgramSpec` alone can't carry this because
/// `reaction`/`exchange` closures aren't serializable data; callers supply
/// them here, keyed by agent class name.
pub struct Program {
    pub grid: Grid,
    pub species: Vec<Species>,
    pub agent_slots: Vec<AgentSlot>,
}

impl Program {
    pub fn build(spec: ProgramSpec, mut behaviors: HashMap<String, AgentBehavior>) -> Result<Self> {
        let grid = Grid::new(spec.grid)?;
        let species: Vec<Species> = spec.species.into_iter().map(Species::from).collect();

        let mut classes: HashMap<String, Arc<AgentClass>> = HashMap::new();
        for class_spec in spec.agent_classes {
            let name = class_spec.name.clone();
            let behavior = behaviors.remove(&name).unwrap_or_default();
            let class = AgentClass::build(class_spec, &species, behavior)?;
            classes.insert(name, Arc::new(class));
        }

        let mut agent_slots = Vec::new();
        for swarm in spec.swarms {
            let class = classes
                .get(&swarm.class)
                .ok_or_else(|| EngineError::UnknownAgentClass(swarm.class.clone()))?
                .clone();
            for _ in 0..swarm.count {
                agent_slots.push(AgentSlot {
                    class: class.clone(),
                });
            }
        }

        Ok(Self {
            grid,
            species,
            agent_slots,
        })
    }
}
