//! Kernel binding and per-step orchestration.
//!
//! The unbound -> bound transition is a type change, not a flag:
//! [`GayBerneForce::bind`] is the only way to obtain a
//! [`BoundGayBerneForce`], so evaluating or updating a force that was
//! never initialized cannot be written at all.

use compute::{
    ConfigurationError, GayBerneKernel, GayBerneParameters, SimulationContext,
    CALC_GAY_BERNE_FORCE,
};

use crate::force::GayBerneForce;
use crate::validation::validate;

impl GayBerneForce {
    /// The capability name this force needs from a platform. Usable by
    /// platform-selection logic before any binding exists.
    #[must_use]
    pub fn required_kernels() -> &'static str {
        CALC_GAY_BERNE_FORCE
    }

    /// Validate the parameter set against the context's system and bind
    /// a compute kernel to it.
    ///
    /// Atomic: validation runs before any kernel is created, so a
    /// failure leaves no partial state behind. The caller may fix the
    /// declaration and bind again.
    ///
    /// # Errors
    ///
    /// Any validator rule violation, a platform with no registered
    /// Gay-Berne kernel, or a backend that rejects the parameter
    /// shapes; all as [`ConfigurationError`].
    pub fn bind(
        &self,
        ctx: &mut SimulationContext,
    ) -> Result<BoundGayBerneForce, ConfigurationError> {
        validate(&self.params, ctx.system())?;
        let mut kernel = ctx.platform().create_kernel(Self::required_kernels())?;
        kernel.initialize(ctx.system(), &self.params)?;
        tracing::debug!(
            particles = self.params.particles.len(),
            exceptions = self.params.exceptions.len(),
            force_group = self.force_group,
            "Gay-Berne force bound"
        );
        Ok(BoundGayBerneForce {
            kernel,
            force_group: self.force_group,
        })
    }
}

/// A force bound to one simulation context for the lifetime of that
/// binding. Owns its kernel exclusively.
pub struct BoundGayBerneForce {
    kernel: Box<dyn GayBerneKernel>,
    force_group: u32,
}

impl BoundGayBerneForce {
    #[must_use]
    pub fn force_group(&self) -> u32 {
        self.force_group
    }

    /// Run one evaluation pass.
    ///
    /// If this force's group bit is not set in `groups` the call is a
    /// no-op contribution: it returns `0.0` and touches neither the
    /// force buffer nor the kernel. Otherwise the kernel's energy is
    /// returned and forces are accumulated into the context's shared
    /// buffer as a side effect of execution.
    ///
    /// # Errors
    ///
    /// Backend errors propagate unchanged.
    pub fn evaluate(
        &mut self,
        ctx: &mut SimulationContext,
        include_forces: bool,
        include_energy: bool,
        groups: u32,
    ) -> Result<f64, ConfigurationError> {
        if groups & (1 << self.force_group) == 0 {
            return Ok(0.0);
        }
        self.kernel.execute(ctx, include_forces, include_energy)
    }

    /// Push a replacement parameter set into the bound kernel.
    ///
    /// Deliberately does NOT re-run the structural validator: only the
    /// backend's own shape check applies, matching the original
    /// engine's asymmetry between initialize and update. On success the
    /// context is marked changed so collaborators drop cached derived
    /// quantities.
    ///
    /// # Errors
    ///
    /// Backend shape-check failures propagate unchanged; the context
    /// version is not bumped on failure.
    pub fn update_parameters(
        &mut self,
        ctx: &mut SimulationContext,
        params: &GayBerneParameters,
    ) -> Result<(), ConfigurationError> {
        self.kernel.copy_parameters_to_context(ctx, params)?;
        ctx.mark_changed();
        Ok(())
    }
}
