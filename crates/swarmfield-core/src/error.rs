use thiserror::Error;

/// Fatal engine errors. A step either completes or raises one of these;
/// partial state after a raised error is undefined (the engine is
/// considered poisoned from that point on).
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("grid misconfigured: ({0:.6}, {1:.6}) is not an integer number of cells of size h={2:.6}")]
    GridMisconfigured(f64, f64, f64),

    #[error("position ({x:.6}, {y:.6}) is out of bounds")]
    OutOfBounds { x: f64, y: f64 },

    #[error("field solver produced a non-finite value for species {species}")]
    SolverDivergence { species: usize },

    #[error("malformed transition table for agent class '{class}': {reason}")]
    MalformedTransitionTable { class: String, reason: String },

    #[error("undefined transition for agent class '{class}' from state '{state}' with sensors {sensors:?}")]
    TransitionUndefined {
        class: String,
        state: String,
        sensors: Vec<bool>,
    },

    #[error("reaction/exchange for agent class '{class}' returned {got} values, expected {expected}")]
    ReactionShapeMismatch {
        class: String,
        expected: usize,
        got: usize,
    },

    #[error("unknown species name '{0}' referenced in program")]
    UnknownSpecies(String),

    #[error("unknown agent class '{0}' referenced in swarm list")]
    UnknownAgentClass(String),

    #[error("unknown actuator '{actuator}' referenced in agent class '{class}'")]
    UnknownActuator { class: String, actuator: String },

    #[error("unknown state '{state}' referenced in agent class '{class}'")]
    UnknownState { class: String, state: String },
}

pub type Result<T> = std::result::Result<T, EngineError>;
