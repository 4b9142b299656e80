#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # Gay-Berne force module
//!
//! Force-model validation and kernel binding for an anisotropic
//! pairwise potential between rigid ellipsoidal particles.
//!
//! The layer is narrow by design: it proves a user-declared parameter
//! set is self-consistent against the host system, then delegates every
//! numerically intensive step to a swappable compute backend through
//! the [`compute::GayBerneKernel`] contract. It never computes forces
//! itself and never integrates anything.
//!
//! ## Key Components
//!
//! -   **Authoring:** [`GayBerneForce`] owns the declarative parameter
//!     set — per-particle geometry/energetics, pairwise exceptions, and
//!     the nonbonded configuration.
//! -   **Validation:** [`validation::validate`] checks the whole set
//!     against a particle-count universe and, for periodic geometry,
//!     the box/cutoff constraint. Every violation is a
//!     [`ConfigurationError`] naming the rule and the offending index.
//! -   **Binding:** [`GayBerneForce::bind`] runs the validator, asks the
//!     context's platform for a kernel by capability name, and returns
//!     a [`BoundGayBerneForce`] whose `evaluate` / `update_parameters`
//!     entry points drive the backend per step. The unbound/bound
//!     distinction lives in the type system: there is no way to
//!     evaluate a force that was never initialized.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use compute::{ParticleParameters, Platform, SimulationContext, System};
//! use forces::GayBerneForce;
//!
//! let mut force = GayBerneForce::new();
//! force.add_particle(ParticleParameters::spherical(0.3, 1.0));
//! force.add_particle(ParticleParameters::spherical(0.3, 1.0));
//!
//! let mut ctx = SimulationContext::new(System::new(2), Platform::reference());
//! let mut bound = force.bind(&mut ctx)?;
//! let energy = bound.evaluate(&mut ctx, true, true, u32::MAX)?;
//! ```

pub mod force;
pub mod module;
pub mod validation;

pub use compute::ConfigurationError;
pub use force::GayBerneForce;
pub use module::BoundGayBerneForce;
pub use validation::validate;
