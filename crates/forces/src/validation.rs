//! Structural validation of a Gay-Berne parameter set.
//!
//! Pure checks, no mutation. The check order is fixed so the same
//! malformed set always surfaces the same first error: particle count,
//! switching window, per-particle ranges, exceptions, periodic cutoff.

use std::collections::HashSet;

use compute::{ConfigurationError, GayBerneParameters, NonbondedMethod, System};

/// Check a parameter set against the host system.
///
/// # Errors
///
/// Returns the first violated rule as a [`ConfigurationError`] naming
/// the offending index or value. The set is untouched either way.
pub fn validate(params: &GayBerneParameters, system: &System) -> Result<(), ConfigurationError> {
    let n = system.num_particles();
    if params.particles.len() != n {
        return Err(ConfigurationError::ParticleCountMismatch {
            declared: params.particles.len(),
            system: n,
        });
    }
    if params.use_switching_function
        && (params.switching_distance < 0.0 || params.switching_distance >= params.cutoff_distance)
    {
        return Err(ConfigurationError::InvalidSwitchingDistance {
            switching: params.switching_distance,
            cutoff: params.cutoff_distance,
        });
    }
    for (i, p) in params.particles.iter().enumerate() {
        for (axis, reference) in [("x", p.x_particle), ("y", p.y_particle)] {
            if let Some(index) = reference {
                if index >= n {
                    return Err(ConfigurationError::IllegalAxisParticle {
                        particle: i,
                        axis,
                        index,
                    });
                }
            }
        }
        if p.sigma < 0.0 {
            return Err(ConfigurationError::NegativeSigma { particle: i });
        }
        if p.epsilon < 0.0 {
            return Err(ConfigurationError::NegativeEpsilon { particle: i });
        }
        if p.rx <= 0.0 || p.ry <= 0.0 || p.rz <= 0.0 {
            return Err(ConfigurationError::NonPositiveRadii { particle: i });
        }
        if p.ex <= 0.0 || p.ey <= 0.0 || p.ez <= 0.0 {
            return Err(ConfigurationError::NonPositiveScaleFactors { particle: i });
        }
    }
    // Per-particle neighbor sets catch a duplicate pair in either
    // order: (2,5) after (5,2) is the same exception.
    let mut seen: Vec<HashSet<usize>> = vec![HashSet::new(); n];
    for (i, e) in params.exceptions.iter().enumerate() {
        for index in [e.particle_a, e.particle_b] {
            if index >= n {
                return Err(ConfigurationError::IllegalExceptionParticle {
                    exception: i,
                    index,
                });
            }
        }
        if seen[e.particle_a].contains(&e.particle_b) || seen[e.particle_b].contains(&e.particle_a)
        {
            return Err(ConfigurationError::DuplicateException {
                particle_a: e.particle_a,
                particle_b: e.particle_b,
            });
        }
        if e.sigma < 0.0 {
            return Err(ConfigurationError::NegativeExceptionSigma { exception: i });
        }
        if e.epsilon < 0.0 {
            return Err(ConfigurationError::NegativeExceptionEpsilon { exception: i });
        }
        seen[e.particle_a].insert(e.particle_b);
        seen[e.particle_b].insert(e.particle_a);
    }
    if params.method == NonbondedMethod::CutoffPeriodic {
        let box_vectors = system.default_periodic_box_vectors();
        for (axis, edge) in [
            box_vectors[0].x,
            box_vectors[1].y,
            box_vectors[2].z,
        ]
        .into_iter()
        .enumerate()
        {
            let half_box = 0.5 * edge;
            if params.cutoff_distance > half_box {
                tracing::debug!(axis, half_box, "cutoff exceeds half the box edge");
                return Err(ConfigurationError::CutoffTooLarge {
                    cutoff: params.cutoff_distance,
                    half_box,
                });
            }
        }
    }
    Ok(())
}
