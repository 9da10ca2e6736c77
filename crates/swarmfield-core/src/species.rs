use swarmfield_params::SpeciesSpec;

/// Resolved, immutable species descriptor. Canonical index is this
/// species' position in the program's ordered species list, used
/// everywhere a field row, reaction vector, exchange vector, or reservoir
/// slot is addressed.
#[derive(Debug, Clone, PartialEq)]
pub struct Species {
    pub name: String,
    pub diffusion: f64,
    pub decay: f64,
    pub initial: f64,
}

impl From<SpeciesSpec> for Species {
    fn from(spec: SpeciesSpec) -> Self {
        Self {
            name: spec.name,
            diffusion: spec.diffusion,
            decay: spec.decay,
            initial: spec.initial,
        }
    }
}

/// Resolves species names to their canonical index once, at program
/// construction, instead of keying by name (or a class object, as the
/// source does) on every access.
pub fn index_of(species: &[Species], name: &str) -> Option<usize> {
    species.iter().position(|s| s.name == name)
}
