//! Authoring API for the declarative Gay-Berne parameter set.

use compute::{
    ConfigurationError, ExceptionParameters, GayBerneParameters, NonbondedMethod,
    ParticleParameters,
};

/// A declared, not-yet-bound Gay-Berne force.
///
/// Nothing here touches a compute backend; this is pure bookkeeping
/// over the parameter set plus the force-group tag. Validation happens
/// when the force is bound to a context.
#[derive(Clone, Debug, Default)]
pub struct GayBerneForce {
    pub(crate) params: GayBerneParameters,
    pub(crate) force_group: u32,
}

impl GayBerneForce {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a particle record; returns its index.
    pub fn add_particle(&mut self, particle: ParticleParameters) -> usize {
        self.params.particles.push(particle);
        self.params.particles.len() - 1
    }

    #[must_use]
    pub fn num_particles(&self) -> usize {
        self.params.particles.len()
    }

    #[must_use]
    pub fn particle_parameters(&self, index: usize) -> Option<&ParticleParameters> {
        self.params.particles.get(index)
    }

    /// Replace the record for one particle.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if `index` is out of range.
    pub fn set_particle_parameters(
        &mut self,
        index: usize,
        particle: ParticleParameters,
    ) -> Result<(), ConfigurationError> {
        let slot = self
            .params
            .particles
            .get_mut(index)
            .ok_or(ConfigurationError::ShapeMismatch("particle index out of range"))?;
        *slot = particle;
        Ok(())
    }

    /// Append a pairwise exception; returns its index.
    pub fn add_exception(&mut self, exception: ExceptionParameters) -> usize {
        self.params.exceptions.push(exception);
        self.params.exceptions.len() - 1
    }

    #[must_use]
    pub fn num_exceptions(&self) -> usize {
        self.params.exceptions.len()
    }

    #[must_use]
    pub fn exception_parameters(&self, index: usize) -> Option<&ExceptionParameters> {
        self.params.exceptions.get(index)
    }

    /// Replace one exception record.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if `index` is out of range.
    pub fn set_exception_parameters(
        &mut self,
        index: usize,
        exception: ExceptionParameters,
    ) -> Result<(), ConfigurationError> {
        let slot = self
            .params
            .exceptions
            .get_mut(index)
            .ok_or(ConfigurationError::ShapeMismatch("exception index out of range"))?;
        *slot = exception;
        Ok(())
    }

    #[must_use]
    pub fn nonbonded_method(&self) -> NonbondedMethod {
        self.params.method
    }

    pub fn set_nonbonded_method(&mut self, method: NonbondedMethod) {
        self.params.method = method;
    }

    #[must_use]
    pub fn cutoff_distance(&self) -> f64 {
        self.params.cutoff_distance
    }

    pub fn set_cutoff_distance(&mut self, cutoff: f64) {
        self.params.cutoff_distance = cutoff;
    }

    #[must_use]
    pub fn use_switching_function(&self) -> bool {
        self.params.use_switching_function
    }

    pub fn set_use_switching_function(&mut self, use_switching: bool) {
        self.params.use_switching_function = use_switching;
    }

    #[must_use]
    pub fn switching_distance(&self) -> f64 {
        self.params.switching_distance
    }

    pub fn set_switching_distance(&mut self, switching: f64) {
        self.params.switching_distance = switching;
    }

    #[must_use]
    pub fn force_group(&self) -> u32 {
        self.force_group
    }

    /// Assign this force to a group bit for selective evaluation.
    ///
    /// # Panics
    ///
    /// Panics if `group` is not in `0..32`.
    pub fn set_force_group(&mut self, group: u32) {
        assert!(group < 32, "force group must be between 0 and 31");
        self.force_group = group;
    }

    /// The full parameter set as the validator and kernels see it.
    #[must_use]
    pub fn parameters(&self) -> &GayBerneParameters {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_assigned_in_order() {
        let mut force = GayBerneForce::new();
        assert_eq!(force.add_particle(ParticleParameters::spherical(0.3, 1.0)), 0);
        assert_eq!(force.add_particle(ParticleParameters::spherical(0.2, 0.5)), 1);
        assert_eq!(force.num_particles(), 2);
        assert!(force.particle_parameters(1).is_some());
        assert!(force.particle_parameters(2).is_none());
    }

    #[test]
    fn setters_reject_out_of_range_indices() {
        let mut force = GayBerneForce::new();
        let result = force.set_particle_parameters(0, ParticleParameters::spherical(0.3, 1.0));
        assert!(matches!(result, Err(ConfigurationError::ShapeMismatch(_))));
        let result = force.set_exception_parameters(
            0,
            ExceptionParameters {
                particle_a: 0,
                particle_b: 1,
                sigma: 0.3,
                epsilon: 1.0,
            },
        );
        assert!(matches!(result, Err(ConfigurationError::ShapeMismatch(_))));
    }

    #[test]
    #[should_panic(expected = "force group must be between 0 and 31")]
    fn force_group_is_limited_to_32_bits() {
        let mut force = GayBerneForce::new();
        force.set_force_group(32);
    }
}
