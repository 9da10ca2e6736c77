use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use swarmfield_params::{AgentClassSpec, Param, SensorKind as SpecSensorKind};

use crate::error::{EngineError, Result};
use crate::species::{index_of, Species};

/// What a sensor reads, resolved to a canonical species index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    Field(usize),
    Reservoir(usize),
}

#[derive(Debug, Clone)]
pub struct SensorDescriptor {
    pub name: String,
    pub kind: SensorKind,
    pub threshold: f64,
}

/// Inputs available to a `reaction`/`exchange` closure: the field
/// concentration vector at the agent's cell, the agent's reservoir, and
/// any named actuated helper scalars the class declared — named,
/// freshly-resolved scalars a closure can reference instead of storing
/// its own per-agent actuated state.
pub struct ReactionInputs<'a> {
    pub conc: &'a [f64],
    pub reservoir: &'a [f64],
    pub helpers: &'a HashMap<String, f64>,
}

/// Result of a `reaction`/`exchange` call. `Zero` is shorthand for "no
/// effect on any species"; `Vector` must have length `K` or the engine
/// raises `ReactionShapeMismatch`.
pub enum ReactionValue {
    Zero,
    Vector(Vec<f64>),
}

impl ReactionValue {
    pub fn resolve(self, k: usize, class: &str) -> Result<Vec<f64>> {
        match self {
            ReactionValue::Zero => Ok(vec![0.0; k]),
            ReactionValue::Vector(v) => {
                if v.len() != k {
                    Err(EngineError::ReactionShapeMismatch {
                        class: class.to_string(),
                        expected: k,
                        got: v.len(),
                    })
                } else {
                    Ok(v)
                }
            }
        }
    }
}

pub type ReactionFn = Arc<dyn Fn(&ReactionInputs) -> ReactionValue + Send + Sync>;

/// Behavior attached to an agent class: not data, so it lives outside
/// `AgentClassSpec`. `reaction_helpers` are named actuated scalars
/// resolved fresh each call and handed to `reaction`/`exchange` through
/// `ReactionInputs::helpers`.
pub struct AgentBehavior {
    pub reaction: ReactionFn,
    pub exchange: ReactionFn,
    pub reaction_helpers: Vec<(String, Param<f64>)>,
}

impl Default for AgentBehavior {
    fn default() -> Self {
        Self {
            reaction: Arc::new(|_| ReactionValue::Zero),
            exchange: Arc::new(|_| ReactionValue::Zero),
            reaction_helpers: Vec::new(),
        }
    }
}

/// Fully resolved, immutable agent class descriptor. Shared read-only
/// across every agent instance of this class.
pub struct AgentClass {
    pub name: String,
    pub clock: f64,
    pub states: Vec<String>,
    pub sensors: Vec<SensorDescriptor>,
    pub actuators: HashMap<String, HashSet<usize>>,
    /// Canonical transition table: `(state_idx, sensor bitvector)` ->
    /// next state index. Bit `i` of the bitvector is sensor `i`'s truth
    /// value, in declaration order.
    pub transitions: HashMap<(usize, u64), usize>,
    pub displacement: Param<f64>,
    pub ascent: Vec<(usize, Param<f64>)>,
    pub fixed_pos: Option<(f64, f64)>,
    pub behavior: AgentBehavior,
}

impl AgentClass {
    pub fn build(spec: AgentClassSpec, species: &[Species], behavior: AgentBehavior) -> Result<Self> {
        if spec.states.is_empty() {
            return Err(EngineError::MalformedTransitionTable {
                class: spec.name.clone(),
                reason: "agent class must declare at least one state".to_string(),
            });
        }

        let state_index = |name: &str| -> Result<usize> {
            spec.states
                .iter()
                .position(|s| s == name)
                .ok_or_else(|| EngineError::UnknownState {
                    class: spec.name.clone(),
                    state: name.to_string(),
                })
        };

        let sensors: Vec<SensorDescriptor> = spec
            .sensors
            .iter()
            .map(|s| {
                let species_idx = index_of(species, &s.species)
                    .ok_or_else(|| EngineError::UnknownSpecies(s.species.clone()))?;
                let kind = match s.kind {
                    SpecSensorKind::Field => SensorKind::Field(species_idx),
                    SpecSensorKind::Reservoir => SensorKind::Reservoir(species_idx),
                };
                Ok(SensorDescriptor {
                    name: s.name.clone(),
                    kind,
                    threshold: s.threshold,
                })
            })
            .collect::<Result<_>>()?;

        let mut actuators: HashMap<String, HashSet<usize>> = HashMap::new();
        for a in &spec.actuators {
            let active = a
                .active_states
                .iter()
                .map(|s| state_index(s))
                .collect::<Result<HashSet<usize>>>()?;
            actuators.insert(a.name.clone(), active);
        }

        let transitions = canonicalize_transitions(&spec, &sensors, &state_index)?;

        let ascent = spec
            .ascent
            .iter()
            .map(|(name, param)| {
                let idx = index_of(species, name).ok_or_else(|| EngineError::UnknownSpecies(name.clone()))?;
                Ok((idx, param.clone()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: spec.name,
            clock: spec.clock,
            states: spec.states,
            sensors,
            actuators,
            transitions,
            displacement: spec.displacement,
            ascent,
            fixed_pos: spec.fixed_pos,
            behavior,
        })
    }

    pub fn initial_state(&self) -> usize {
        0
    }
}

fn canonicalize_transitions(
    spec: &AgentClassSpec,
    sensors: &[SensorDescriptor],
    state_index: &impl Fn(&str) -> Result<usize>,
) -> Result<HashMap<(usize, u64), usize>> {
    let malformed = |reason: String| EngineError::MalformedTransitionTable {
        class: spec.name.clone(),
        reason,
    };

    if sensors.len() > 63 {
        return Err(malformed("more than 63 sensors is not supported".to_string()));
    }

    let mut table = HashMap::new();
    for rule in &spec.transitions {
        let state_idx = state_index(&rule.state)?;
        let next_idx = state_index(&rule.next)?;

        let mut mentioned = vec![false; sensors.len()];
        let mut bits: u64 = 0;
        for mention in &rule.sensors {
            let (name, truth) = match mention.strip_prefix('^') {
                Some(rest) => (rest, false),
                None => (mention.as_str(), true),
            };
            let idx = sensors
                .iter()
                .position(|s| s.name == name)
                .ok_or_else(|| malformed(format!("unknown sensor '{}' in transition rule", name)))?;
            if mentioned[idx] {
                return Err(malformed(format!("sensor '{}' mentioned twice in one rule", name)));
            }
            mentioned[idx] = true;
            if truth {
                bits |= 1 << idx;
            }
        }

        if !mentioned.iter().all(|&m| m) {
            return Err(malformed(format!(
                "transition rule for state '{}' does not mention every declared sensor exactly once",
                rule.state
            )));
        }

        let key = (state_idx, bits);
        if table.insert(key, next_idx).is_some() {
            return Err(malformed(format!(
                "duplicate transition entry for state '{}' with this sensor combination",
                rule.state
            )));
        }
    }

    if !spec.transitions.is_empty() {
        let expected = spec.states.len() * (1usize << sensors.len());
        if table.len() != expected {
            return Err(malformed(format!(
                "transition table is not total: expected {} entries, got {}",
                expected,
                table.len()
            )));
        }
    }

    Ok(table)
}
