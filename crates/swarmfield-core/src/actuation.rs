use std::collections::{HashMap, HashSet};

use swarmfield_params::Param;

use crate::error::{EngineError, Result};

/// Resolves a `Param<T>` against an agent class's actuator map and an
/// agent's current FSM state. Pure function of `(actuators, fsm_state)` —
/// callers must re-resolve after any FSM transition rather than caching
/// the result.
pub fn resolve<T: Copy>(
    param: &Param<T>,
    actuators: &HashMap<String, HashSet<usize>>,
    fsm_state: usize,
    class_name: &str,
) -> Result<T> {
    match param {
        Param::Const(value) => Ok(*value),
        Param::Actuated {
            actuator,
            true_val,
            false_val,
        } => {
            let active = actuators
                .get(actuator)
                .ok_or_else(|| EngineError::UnknownActuator {
                    class: class_name.to_string(),
                    actuator: actuator.clone(),
                })?;
            Ok(if active.contains(&fsm_state) {
                *true_val
            } else {
                *false_val
            })
        }
    }
}
