/// Surface and mass properties of a body
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Bounciness (0.0 = no bounce, 1.0 = full elastic)
    pub restitution: f64,
    /// Coulomb friction coefficient
    pub friction: f64,
    /// Fraction of velocity lost per reference step (air drag)
    pub friction_air: f64,
    /// Mass per px²
    pub density: f64,
}

impl Material {
    /// Light, draggy "paper debris" used for exploded page elements
    pub const PAPER: Material = Material {
        restitution: 0.2,
        friction: 0.5,
        friction_air: 0.05,
        density: 0.002,
    };

    /// Static colliders (floor and walls)
    pub const BOUNDARY: Material = Material {
        restitution: 0.0,
        friction: 0.1,
        friction_air: 0.0,
        density: 0.0,
    };

    /// Combined restitution for a contact: the bouncier surface wins
    pub fn mix_restitution(a: &Material, b: &Material) -> f64 {
        a.restitution.max(b.restitution)
    }

    /// Combined friction for a contact: the slicker surface wins
    pub fn mix_friction(a: &Material, b: &Material) -> f64 {
        a.friction.min(b.friction)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::PAPER
    }
}
