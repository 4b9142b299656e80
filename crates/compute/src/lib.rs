#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Kernel-contract layer for the Gay-Berne force module.
//!
//! This crate defines everything a compute backend and the force layer
//! share: the declarative parameter model ([`GayBerneParameters`]), the
//! host [`System`] and [`SimulationContext`] handles, the
//! [`GayBerneKernel`] contract every backend must satisfy identically,
//! and the [`Platform`] registry that maps capability names to kernel
//! factories.
//!
//! A reference CPU kernel is provided behind the default-on `cpu`
//! feature. It exists to make the contract testable; optimized backends
//! (vectorized, GPU) register their own factories under the same
//! capability name.

use std::collections::HashMap;

use thiserror::Error;

pub mod context;
pub mod types;

#[cfg(feature = "cpu")]
pub mod reference;

pub use context::{SimulationContext, System};
pub use types::{
    ExceptionParameters, GayBerneParameters, Mat3, NonbondedMethod, ParticleParameters, Vec3,
};

#[cfg(feature = "cpu")]
pub use reference::ReferenceGayBerneKernel;

/// Capability name identifying the Gay-Berne force kernel. Platform
/// selection matches this string against registered factories before a
/// force is ever bound.
pub const CALC_GAY_BERNE_FORCE: &str = "CalcGayBerneForce";

/// The single error kind of this layer. Every variant names the rule
/// that was violated and the index or value that triggered it.
/// Configuration errors are deterministic, never transient.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("force must have exactly as many particles as the system it belongs to ({declared} vs {system})")]
    ParticleCountMismatch { declared: usize, system: usize },
    #[error("switching distance must satisfy 0 <= r_switch < r_cutoff (got {switching} with cutoff {cutoff})")]
    InvalidSwitchingDistance { switching: f64, cutoff: f64 },
    #[error("illegal {axis} particle index {index} for particle {particle}")]
    IllegalAxisParticle {
        particle: usize,
        axis: &'static str,
        index: usize,
    },
    #[error("sigma for particle {particle} cannot be negative")]
    NegativeSigma { particle: usize },
    #[error("epsilon for particle {particle} cannot be negative")]
    NegativeEpsilon { particle: usize },
    #[error("radii for particle {particle} must be positive")]
    NonPositiveRadii { particle: usize },
    #[error("scale factors for particle {particle} must be positive")]
    NonPositiveScaleFactors { particle: usize },
    #[error("illegal particle index {index} in exception {exception}")]
    IllegalExceptionParticle { exception: usize, index: usize },
    #[error("multiple exceptions are specified for particles {particle_a} and {particle_b}")]
    DuplicateException {
        particle_a: usize,
        particle_b: usize,
    },
    #[error("sigma for exception {exception} cannot be negative")]
    NegativeExceptionSigma { exception: usize },
    #[error("epsilon for exception {exception} cannot be negative")]
    NegativeExceptionEpsilon { exception: usize },
    #[error("cutoff distance {cutoff} cannot exceed half the periodic box size ({half_box})")]
    CutoffTooLarge { cutoff: f64, half_box: f64 },
    #[error("no registered kernel implements {name}")]
    MissingKernel { name: String },
    #[error("parameter shape mismatch: {0}")]
    ShapeMismatch(&'static str),
}

/// Contract every Gay-Berne compute backend satisfies identically.
///
/// A kernel is created by a [`Platform`] factory, initialized exactly
/// once with validated data, then driven by the force layer for the
/// lifetime of the context binding. The owning context serializes all
/// calls; `&mut self` encodes the exclusive-call-site requirement.
pub trait GayBerneKernel: Send {
    /// Bind the kernel to a system and a validated parameter set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::ShapeMismatch`] if the backend
    /// cannot represent the given parameter shapes.
    fn initialize(
        &mut self,
        system: &System,
        params: &GayBerneParameters,
    ) -> Result<(), ConfigurationError>;

    /// Run one force/energy evaluation pass.
    ///
    /// Returns the potential energy. When `include_forces` is set,
    /// forces are accumulated into the context's shared force buffer as
    /// a side effect; they are never returned.
    ///
    /// # Errors
    ///
    /// Backend errors propagate unchanged to the caller.
    fn execute(
        &mut self,
        ctx: &mut SimulationContext,
        include_forces: bool,
        include_energy: bool,
    ) -> Result<f64, ConfigurationError>;

    /// Replace the kernel's parameter data without rebinding.
    ///
    /// Only the backend's own shape check runs here; structural
    /// validation happens once, at bind time.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::ShapeMismatch`] if the new set
    /// changes the particle or exception count.
    fn copy_parameters_to_context(
        &mut self,
        ctx: &mut SimulationContext,
        params: &GayBerneParameters,
    ) -> Result<(), ConfigurationError>;
}

/// Factory producing a fresh, uninitialized kernel.
pub type KernelFactory = fn() -> Box<dyn GayBerneKernel>;

/// Registry of compute-backend factories keyed by capability name.
///
/// No inheritance hierarchy: a backend is just an entry in this map,
/// selected at bind time.
#[derive(Default)]
pub struct Platform {
    factories: HashMap<&'static str, KernelFactory>,
}

impl Platform {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A platform with the reference CPU kernel pre-registered.
    #[cfg(feature = "cpu")]
    #[must_use]
    pub fn reference() -> Self {
        let mut platform = Self::new();
        platform.register(CALC_GAY_BERNE_FORCE, || {
            Box::new(ReferenceGayBerneKernel::default())
        });
        platform
    }

    /// Register a kernel factory, replacing any previous entry for the
    /// same capability name.
    pub fn register(&mut self, name: &'static str, factory: KernelFactory) {
        self.factories.insert(name, factory);
    }

    #[must_use]
    pub fn supports(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Instantiate the kernel registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingKernel`] if no factory is
    /// registered for the capability name.
    pub fn create_kernel(&self, name: &str) -> Result<Box<dyn GayBerneKernel>, ConfigurationError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| ConfigurationError::MissingKernel {
                name: name.to_owned(),
            })?;
        tracing::debug!(kernel = name, "creating compute kernel");
        Ok(factory())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_capability_name_is_rejected() {
        let platform = Platform::new();
        let result = platform.create_kernel("CalcNoSuchForce");
        assert!(
            matches!(result, Err(ConfigurationError::MissingKernel { .. })),
            "Expected MissingKernel, got {:?}",
            result.err()
        );
    }

    #[cfg(feature = "cpu")]
    #[test]
    fn reference_platform_provides_gay_berne_kernel() {
        let platform = Platform::reference();
        assert!(platform.supports(CALC_GAY_BERNE_FORCE));
        assert!(platform.create_kernel(CALC_GAY_BERNE_FORCE).is_ok());
    }

    #[test]
    fn registration_overrides_previous_factory() {
        #[derive(Default)]
        struct Inert;
        impl GayBerneKernel for Inert {
            fn initialize(
                &mut self,
                _system: &System,
                _params: &GayBerneParameters,
            ) -> Result<(), ConfigurationError> {
                Ok(())
            }
            fn execute(
                &mut self,
                _ctx: &mut SimulationContext,
                _include_forces: bool,
                _include_energy: bool,
            ) -> Result<f64, ConfigurationError> {
                Ok(0.0)
            }
            fn copy_parameters_to_context(
                &mut self,
                _ctx: &mut SimulationContext,
                _params: &GayBerneParameters,
            ) -> Result<(), ConfigurationError> {
                Ok(())
            }
        }

        let mut platform = Platform::new();
        platform.register(CALC_GAY_BERNE_FORCE, || Box::new(Inert));
        platform.register(CALC_GAY_BERNE_FORCE, || Box::new(Inert));
        assert!(platform.supports(CALC_GAY_BERNE_FORCE));
    }

    #[test]
    fn error_messages_name_the_offending_index() {
        let err = ConfigurationError::NegativeSigma { particle: 7 };
        let msg = err.to_string();
        assert!(msg.contains("sigma"), "message was: {msg}");
        assert!(msg.contains('7'), "message was: {msg}");

        let err = ConfigurationError::DuplicateException {
            particle_a: 2,
            particle_b: 5,
        };
        let msg = err.to_string();
        assert!(msg.contains('2') && msg.contains('5'), "message was: {msg}");
    }
}
