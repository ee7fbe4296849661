use crate::engine::KineticSystem;

/// Advance concentrations by dt using explicit Euler integration.
///
/// Each new value is floored at zero. The floor keeps the explicit scheme
/// from producing negative concentrations when dt is too coarse for a fast
/// reaction; it is not mass conserving when it triggers.
pub fn step(system: &KineticSystem, concentrations: &mut [f64], derivatives: &mut [f64], dt: f64) {
    system.derivatives_into(concentrations, derivatives);

    for (c, d) in concentrations.iter_mut().zip(derivatives.iter()) {
        *c = (*c + dt * d).max(0.0);
    }
}
