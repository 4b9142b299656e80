//! Host-side handles: the read-only system description and the mutable
//! simulation context every operation receives explicitly.

use crate::{ConfigurationError, Platform, Vec3};

/// Read-only description of the host system a force belongs to.
#[derive(Clone, Debug)]
pub struct System {
    num_particles: usize,
    box_vectors: [Vec3; 3],
}

impl System {
    /// A system of `num_particles` with the default 2x2x2 periodic box.
    #[must_use]
    pub fn new(num_particles: usize) -> Self {
        Self {
            num_particles,
            box_vectors: [
                Vec3::new(2.0, 0.0, 0.0),
                Vec3::new(0.0, 2.0, 0.0),
                Vec3::new(0.0, 0.0, 2.0),
            ],
        }
    }

    #[must_use]
    pub fn num_particles(&self) -> usize {
        self.num_particles
    }

    pub fn set_default_periodic_box_vectors(&mut self, vectors: [Vec3; 3]) {
        self.box_vectors = vectors;
    }

    #[must_use]
    pub fn default_periodic_box_vectors(&self) -> [Vec3; 3] {
        self.box_vectors
    }
}

/// Mutable per-simulation state shared by all force modules bound to
/// it: particle positions, the force accumulation buffer, the active
/// platform, and a version counter collaborators poll instead of
/// relying on implicit invalidation.
///
/// The context serializes calls into its force modules; nothing here
/// takes locks.
pub struct SimulationContext {
    system: System,
    platform: Platform,
    positions: Vec<Vec3>,
    forces: Vec<Vec3>,
    state_version: u64,
}

impl SimulationContext {
    #[must_use]
    pub fn new(system: System, platform: Platform) -> Self {
        let n = system.num_particles();
        Self {
            system,
            platform,
            positions: vec![Vec3::ZERO; n],
            forces: vec![Vec3::ZERO; n],
            state_version: 0,
        }
    }

    #[must_use]
    pub fn system(&self) -> &System {
        &self.system
    }

    #[must_use]
    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Replace all particle positions.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::ShapeMismatch`] if the length does
    /// not match the system's particle count.
    pub fn set_positions(&mut self, positions: Vec<Vec3>) -> Result<(), ConfigurationError> {
        if positions.len() != self.system.num_particles() {
            return Err(ConfigurationError::ShapeMismatch(
                "position count does not match system particle count",
            ));
        }
        self.positions = positions;
        Ok(())
    }

    /// The shared force accumulation buffer. Kernels add into it during
    /// `execute`; integrators read it afterwards.
    #[must_use]
    pub fn forces(&self) -> &[Vec3] {
        &self.forces
    }

    #[must_use]
    pub fn forces_mut(&mut self) -> &mut [Vec3] {
        &mut self.forces
    }

    pub fn zero_forces(&mut self) {
        self.forces.fill(Vec3::ZERO);
    }

    /// Monotonic counter bumped by [`Self::mark_changed`]. A collaborator
    /// caching derived quantities compares this against the value it
    /// last observed.
    #[must_use]
    pub fn state_version(&self) -> u64 {
        self.state_version
    }

    pub fn mark_changed(&mut self) {
        self.state_version += 1;
    }
}
