//! Programmatic builders for a handful of complete chemical swarm
//! programs, used as integration-test fixtures. Each mirrors one of the
//! worked examples this engine's behavior was checked against: a
//! pheromone-gated docking swarm, a pure chemotactic flock, a two-point
//! line generator, and a start/target transport loop with a loaded/full
//! reservoir gate.

use std::collections::HashMap;
use std::sync::Arc;

use swarmfield_core::{AgentBehavior, ReactionValue};
use swarmfield_params::{
    ActuatorSpec, AgentClassSpec, GridSpec, Param, ProgramSpec, SensorKind, SensorSpec, SpeciesSpec, SwarmSpec,
    TransitionRule,
};

const SCALAR_REACTION: f64 = 0.4;

fn grid_100() -> GridSpec {
    GridSpec {
        x_lo: 0.0,
        x_hi: 100.0,
        y_lo: 0.0,
        y_hi: 100.0,
        h: 1.0,
    }
}

/// A swarm of agents that dock onto a pheromone trail above threshold and
/// detach again when it fades, immobilizing their own displacement while
/// docked.
pub fn selective_flocking() -> (ProgramSpec, HashMap<String, AgentBehavior>) {
    let mut flocker = AgentClassSpec::new("Flocker", 0.1, vec!["free".into(), "docked".into()]);
    flocker.sensors.push(SensorSpec {
        name: "pheromone".into(),
        species: "Pheromone".into(),
        kind: SensorKind::Field,
        threshold: 0.5,
    });
    flocker.actuators.push(ActuatorSpec {
        name: "immobilize".into(),
        active_states: vec!["docked".into()],
    });
    flocker.transitions = vec![
        TransitionRule::new("free", ["pheromone"], "docked"),
        TransitionRule::new("free", ["^pheromone"], "free"),
        TransitionRule::new("docked", ["pheromone"], "docked"),
        TransitionRule::new("docked", ["^pheromone"], "free"),
    ];
    flocker.displacement = Param::actuated("immobilize", 0.1, 1.0);

    let spec = ProgramSpec {
        grid: grid_100(),
        species: vec![SpeciesSpec::new("Pheromone", 1.0, 0.01, 0.0)],
        agent_classes: vec![flocker],
        swarms: vec![SwarmSpec::new("Flocker", 50)],
    };

    let mut behaviors = HashMap::new();
    behaviors.insert(
        "Flocker".to_string(),
        AgentBehavior {
            reaction: Arc::new(|_| ReactionValue::Vector(vec![SCALAR_REACTION])),
            ..AgentBehavior::default()
        },
    );

    (spec, behaviors)
}

/// A single-state flock climbing a pheromone gradient with no FSM or
/// sensors at all — the minimal chemotaxis-only program.
pub fn gradient_flocking() -> (ProgramSpec, HashMap<String, AgentBehavior>) {
    let mut flocker = AgentClassSpec::new("Flocker", 0.1, vec!["free".into()]);
    flocker.ascent = vec![("Pheromone".into(), Param::constant(0.5))];
    flocker.displacement = Param::constant(1.0);

    let spec = ProgramSpec {
        grid: grid_100(),
        species: vec![SpeciesSpec::new("Pheromone", 1.0, 0.01, 0.0)],
        agent_classes: vec![flocker],
        swarms: vec![SwarmSpec::new("Flocker", 50)],
    };

    let mut behaviors = HashMap::new();
    behaviors.insert(
        "Flocker".to_string(),
        AgentBehavior {
            reaction: Arc::new(|_| ReactionValue::Vector(vec![SCALAR_REACTION])),
            ..AgentBehavior::default()
        },
    );

    (spec, behaviors)
}

/// Two stationary emitters (`Start`, `Finish`) laying down pheromone
/// trails, plus a swarm of workers that explore toward `Start`'s trail
/// and, once clear of it, deposit a third species to trace a line toward
/// `Finish`.
pub fn line_generation() -> (ProgramSpec, HashMap<String, AgentBehavior>) {
    let mut start = AgentClassSpec::new("Start", 1.0, vec!["emitting".into()]);
    start.fixed_pos = Some((10.0, 50.0));

    let mut finish = AgentClassSpec::new("Finish", 1.0, vec!["emitting".into()]);
    finish.fixed_pos = Some((90.0, 50.0));

    let mut worker = AgentClassSpec::new("Worker", 0.1, vec!["free".into(), "ascending".into()]);
    worker.sensors.push(SensorSpec {
        name: "near_start".into(),
        species: "Pheromone_A".into(),
        kind: SensorKind::Field,
        threshold: 0.5,
    });
    worker.sensors.push(SensorSpec {
        name: "near_finish".into(),
        species: "Pheromone_B".into(),
        kind: SensorKind::Field,
        threshold: 0.5,
    });
    worker.actuators.push(ActuatorSpec {
        name: "explore".into(),
        active_states: vec!["free".into()],
    });
    worker.actuators.push(ActuatorSpec {
        name: "generate".into(),
        active_states: vec!["ascending".into()],
    });
    worker.transitions = vec![
        TransitionRule::new("free", ["near_start", "near_finish"], "free"),
        TransitionRule::new("free", ["near_start", "^near_finish"], "ascending"),
        TransitionRule::new("free", ["^near_start", "near_finish"], "free"),
        TransitionRule::new("free", ["^near_start", "^near_finish"], "free"),
        TransitionRule::new("ascending", ["near_start", "near_finish"], "ascending"),
        TransitionRule::new("ascending", ["near_start", "^near_finish"], "ascending"),
        TransitionRule::new("ascending", ["^near_start", "near_finish"], "free"),
        TransitionRule::new("ascending", ["^near_start", "^near_finish"], "ascending"),
    ];
    worker.ascent = vec![
        ("Pheromone_A".into(), Param::actuated("explore", 1.0, 0.0)),
        ("Pheromone_B".into(), Param::actuated("generate", 1.0, 0.0)),
    ];
    worker.displacement = Param::constant(0.5);

    let spec = ProgramSpec {
        grid: grid_100(),
        species: vec![
            SpeciesSpec::new("Pheromone_A", 1.0, 0.01, 0.0),
            SpeciesSpec::new("Pheromone_B", 1.0, 0.01, 0.0),
            SpeciesSpec::new("Material", 0.0, 0.001, 0.0),
        ],
        agent_classes: vec![start, finish, worker],
        swarms: vec![
            SwarmSpec::new("Start", 1),
            SwarmSpec::new("Finish", 1),
            SwarmSpec::new("Worker", 48),
        ],
    };

    let mut behaviors = HashMap::new();
    behaviors.insert(
        "Start".to_string(),
        AgentBehavior {
            reaction: Arc::new(|_| ReactionValue::Vector(vec![1.0, 0.0, 0.0])),
            ..AgentBehavior::default()
        },
    );
    behaviors.insert(
        "Finish".to_string(),
        AgentBehavior {
            reaction: Arc::new(|_| ReactionValue::Vector(vec![0.0, 1.0, 0.0])),
            ..AgentBehavior::default()
        },
    );
    behaviors.insert(
        "Worker".to_string(),
        AgentBehavior {
            reaction: Arc::new(|inputs| ReactionValue::Vector(vec![0.0, 0.0, inputs.helpers["r"]])),
            reaction_helpers: vec![("r".to_string(), Param::actuated("generate", 0.1, 0.0))],
            ..AgentBehavior::default()
        },
    );

    (spec, behaviors)
}

/// Two stationary endpoints (`Start`, `Target`) and a swarm of workers
/// that shuttle a third species between them: explore toward `Start`'s
/// trail while empty, load material, transport toward `Target`'s trail
/// while loaded, then release into the reservoir-gated `release` state.
pub fn transport() -> (ProgramSpec, HashMap<String, AgentBehavior>) {
    let mut start = AgentClassSpec::new("Start", 1.0, vec!["emitting".into()]);
    start.fixed_pos = Some((25.0, 75.0));

    let mut target = AgentClassSpec::new("Target", 1.0, vec!["emitting".into()]);
    target.fixed_pos = Some((90.0, 10.0));

    let mut worker = AgentClassSpec::new(
        "Worker",
        0.1,
        vec!["empty".into(), "free".into(), "transport".into(), "release".into()],
    );
    worker.sensors.push(SensorSpec {
        name: "at_start".into(),
        species: "Pheromone_A".into(),
        kind: SensorKind::Field,
        threshold: 0.5,
    });
    worker.sensors.push(SensorSpec {
        name: "at_target".into(),
        species: "Pheromone_B".into(),
        kind: SensorKind::Field,
        threshold: 0.5,
    });
    worker.sensors.push(SensorSpec {
        name: "loaded".into(),
        species: "Material".into(),
        kind: SensorKind::Reservoir,
        threshold: 0.1,
    });
    worker.sensors.push(SensorSpec {
        name: "full".into(),
        species: "Material".into(),
        kind: SensorKind::Reservoir,
        threshold: 10.0,
    });
    worker.actuators = vec![
        ActuatorSpec {
            name: "return".into(),
            active_states: vec!["empty".into()],
        },
        ActuatorSpec {
            name: "explore".into(),
            active_states: vec!["free".into()],
        },
        ActuatorSpec {
            name: "move".into(),
            active_states: vec!["transport".into()],
        },
        ActuatorSpec {
            name: "dispose".into(),
            active_states: vec!["release".into()],
        },
    ];

    // A hand-picked subset of sensor combinations (e.g. mentioning `full`
    // only alongside `loaded`, never both `Start` and `Target` at once)
    // would fall short of the total table this engine requires. Generate
    // all 16 combinations per state instead, via the same qualitative
    // explore/load/transport/release cycle.
    let mut transitions = Vec::new();
    for state in ["empty", "free", "transport", "release"] {
        for &loaded in &[true, false] {
            for &full in &[true, false] {
                for &at_start in &[true, false] {
                    for &at_target in &[true, false] {
                        let next = transport_next_state(state, loaded, full, at_start, at_target);
                        let mention = |name: &str, truth: bool| {
                            if truth {
                                name.to_string()
                            } else {
                                format!("^{name}")
                            }
                        };
                        transitions.push(TransitionRule::new(
                            state,
                            [
                                mention("loaded", loaded),
                                mention("full", full),
                                mention("at_start", at_start),
                                mention("at_target", at_target),
                            ],
                            next,
                        ));
                    }
                }
            }
        }
    }
    worker.transitions = transitions;

    worker.ascent = vec![
        ("Pheromone_A".into(), Param::actuated("return", 2.0, 0.0)),
        ("Pheromone_B".into(), Param::actuated("move", 2.0, 0.0)),
    ];
    worker.displacement = Param::actuated("move", 0.1, 1.0);

    let spec = ProgramSpec {
        grid: grid_100(),
        species: vec![
            SpeciesSpec::new("Pheromone_A", 1.0, 0.01, 0.0),
            SpeciesSpec::new("Pheromone_B", 1.0, 0.01, 0.0),
            SpeciesSpec::new("Material", 0.01, 0.0, 0.5),
        ],
        agent_classes: vec![start, target, worker],
        swarms: vec![
            SwarmSpec::new("Start", 1),
            SwarmSpec::new("Target", 1),
            SwarmSpec::new("Worker", 50),
        ],
    };

    let mut behaviors = HashMap::new();
    behaviors.insert(
        "Start".to_string(),
        AgentBehavior {
            reaction: Arc::new(|_| ReactionValue::Vector(vec![10.0, 0.0, 0.0])),
            ..AgentBehavior::default()
        },
    );
    behaviors.insert(
        "Target".to_string(),
        AgentBehavior {
            reaction: Arc::new(|_| ReactionValue::Vector(vec![0.0, 10.0, 0.0])),
            ..AgentBehavior::default()
        },
    );
    behaviors.insert(
        "Worker".to_string(),
        AgentBehavior {
            exchange: Arc::new(|inputs| {
                let r1 = inputs.helpers["r1"];
                let r2 = inputs.helpers["r2"];
                ReactionValue::Vector(vec![0.0, 0.0, r1 * inputs.conc[2] - r2 * inputs.reservoir[2]])
            }),
            reaction_helpers: vec![
                ("r1".to_string(), Param::actuated("explore", 1.0, 0.0)),
                ("r2".to_string(), Param::actuated("dispose", 0.1, 0.0)),
            ],
            ..AgentBehavior::default()
        },
    );

    (spec, behaviors)
}

/// The qualitative explore/load/transport/release cycle the source's
/// (non-total) table implements: wait at `Start` until loaded, head for
/// `Target`, release once full, then head back. `full`/`at_target` are
/// immaterial outside the `transport`/`release` states and `loaded`/
/// `at_start` outside `empty`/`free`, which is why this is total without
/// every sensor mattering in every state.
fn transport_next_state(state: &str, loaded: bool, full: bool, at_start: bool, at_target: bool) -> &'static str {
    match state {
        "empty" => {
            if at_start {
                "free"
            } else {
                "empty"
            }
        }
        "free" => {
            if loaded {
                "transport"
            } else if at_start {
                "free"
            } else {
                "empty"
            }
        }
        "transport" => {
            if at_target {
                "release"
            } else {
                "transport"
            }
        }
        "release" => {
            if full {
                "release"
            } else {
                "empty"
            }
        }
        _ => unreachable!("unknown worker state '{state}'"),
    }
}
