use serde::{Deserialize, Serialize};

/// Target lens powers in diopters: sphere and cylinder. Negative sphere is
/// myopic, negative cylinder is the astigmatism convention used throughout.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Prescription {
    pub sphere: f64,
    pub cylinder: f64,
}

impl Prescription {
    pub fn new(sphere: f64, cylinder: f64) -> Self {
        Self { sphere, cylinder }
    }
}
