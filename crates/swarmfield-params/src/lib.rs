//! Swarmfield parameter types
//!
//! Declarative, serializable description of a chemical swarm program: the
//! grid, the species list, and the agent classes that populate it. This
//! crate holds pure data only — reaction/exchange behavior (which is not
//! serializable) is attached on the engine side in `swarmfield-core`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A scalar that may depend on whether a named actuator is active on the
/// reading agent. Resolved at read time against `(AgentClass, fsm_state)`;
/// never cached across a transition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Param<T> {
    Const(T),
    Actuated {
        actuator: String,
        true_val: T,
        false_val: T,
    },
}

impl<T: Copy> Param<T> {
    pub fn constant(value: T) -> Self {
        Param::Const(value)
    }

    pub fn actuated(actuator: impl Into<String>, true_val: T, false_val: T) -> Self {
        Param::Actuated {
            actuator: actuator.into(),
            true_val,
            false_val,
        }
    }
}

/// Grid configuration: domain bounds and resolution. `mx`/`my` are derived
/// at construction time in `swarmfield-core::Grid`, not carried here.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridSpec {
    pub x_lo: f64,
    pub x_hi: f64,
    pub y_lo: f64,
    pub y_hi: f64,
    pub h: f64,
}

/// Chemical species descriptor: diffusion/decay constants and uniform
/// initial concentration. `name` is the author-facing handle used by
/// sensors and ascent maps; the engine resolves it to a canonical index
/// once, at `Program` construction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpeciesSpec {
    pub name: String,
    pub diffusion: f64,
    pub decay: f64,
    pub initial: f64,
}

impl SpeciesSpec {
    pub fn new(name: impl Into<String>, diffusion: f64, decay: f64, initial: f64) -> Self {
        Self {
            name: name.into(),
            diffusion,
            decay,
            initial,
        }
    }
}

/// Whether a sensor reads the field at the agent's cell or the agent's own
/// reservoir accumulator for the referenced species.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SensorKind {
    Field,
    Reservoir,
}

/// A named threshold read. Declaration order within an `AgentClassSpec`
/// fixes the sensor's position in the canonical transition-table bitvector.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorSpec {
    pub name: String,
    pub species: String,
    pub kind: SensorKind,
    pub threshold: f64,
}

/// A named subset of FSM states in which an actuator is active.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActuatorSpec {
    pub name: String,
    pub active_states: Vec<String>,
}

/// Author-facing transition key: a state name plus a mention of every
/// declared sensor, each either plain (true) or `^`-prefixed (false).
/// `swarmfield-core` rewrites this into the canonical `(state_id,
/// bitvector)` form at `AgentClass` construction and enforces totality
/// over the full `|states| * 2^|sensors|` key space.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TransitionRule {
    pub state: String,
    /// One entry per declared sensor, e.g. `"at_start"` or `"^at_target"`.
    pub sensors: Vec<String>,
    pub next: String,
}

impl TransitionRule {
    pub fn new(
        state: impl Into<String>,
        sensors: impl IntoIterator<Item = impl Into<String>>,
        next: impl Into<String>,
    ) -> Self {
        Self {
            state: state.into(),
            sensors: sensors.into_iter().map(Into::into).collect(),
            next: next.into(),
        }
    }
}

/// Declarative description of one agent class. Reaction/exchange behavior
/// is not part of this type (closures aren't data); it is supplied
/// alongside this spec when the engine builds the class.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AgentClassSpec {
    pub name: String,
    pub clock: f64,
    /// Element 0 is the initial state.
    pub states: Vec<String>,
    pub sensors: Vec<SensorSpec>,
    pub actuators: Vec<ActuatorSpec>,
    pub transitions: Vec<TransitionRule>,
    pub displacement: Param<f64>,
    /// Species name -> chemotactic ascent speed.
    pub ascent: Vec<(String, Param<f64>)>,
    /// Makes the agent stationary when present.
    pub fixed_pos: Option<(f64, f64)>,
}

impl AgentClassSpec {
    pub fn new(name: impl Into<String>, clock: f64, states: Vec<String>) -> Self {
        Self {
            name: name.into(),
            clock,
            states,
            sensors: Vec::new(),
            actuators: Vec::new(),
            transitions: Vec::new(),
            displacement: Param::Const(0.0),
            ascent: Vec::new(),
            fixed_pos: None,
        }
    }
}

/// One entry in the flat `swarms` list: an agent class plus multiplicity.
/// Instantiation order (concatenation of these entries, in order) is the
/// agent iteration order for the whole simulation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SwarmSpec {
    pub class: String,
    pub count: usize,
}

impl SwarmSpec {
    pub fn new(class: impl Into<String>, count: usize) -> Self {
        Self {
            class: class.into(),
            count,
        }
    }
}

/// The full declarative bundle: grid, ordered species, ordered swarms.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProgramSpec {
    pub grid: GridSpec,
    pub species: Vec<SpeciesSpec>,
    pub agent_classes: Vec<AgentClassSpec>,
    pub swarms: Vec<SwarmSpec>,
}
