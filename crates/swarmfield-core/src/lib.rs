//! Swarmfield Core Engine
//!
//! Simulation engine for chemical swarm programs: reaction-diffusion
//! fields coupled to finite-state-machine agents with Brownian motion,
//! chemotaxis, and local reaction/exchange terms.

pub mod actuation;
pub mod agent;
pub mod agent_state;
pub mod engine;
pub mod error;
pub mod fields;
pub mod fsm;
pub mod gradient;
pub mod grid;
pub mod motion;
pub mod program;
pub mod reaction;
pub mod sensor;
pub mod snapshot;
pub mod solver;
pub mod sparse;
pub mod species;

pub use agent::{AgentBehavior, AgentClass, ReactionInputs, ReactionValue, SensorDescriptor, SensorKind};
pub use agent_state::AgentState;
pub use engine::Engine;
pub use error::{EngineError, Result};
pub use fields::FieldState;
pub use grid::Grid;
pub use program::{AgentSlot, Program};
pub use snapshot::{AgentSnapshot, Snapshot};
pub use species::Species;

pub use swarmfield_params::*;
