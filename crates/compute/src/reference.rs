//! Reference CPU kernel for the Gay-Berne contract.
//!
//! Single-site anisotropic potential in the Everaers-Ejtehadi form:
//! `U = eta * chi * U_r` with `U_r = 4 eps (rho^12 - rho^6)` and
//! `rho = sigma / (h + sigma)`, where `h` is the anisotropic
//! surface-to-surface distance derived from the pair overlap matrix.
//! With equal semi-axes and unit scale factors both `eta` and `chi`
//! collapse to 1 and the pair reduces to plain Lennard-Jones.
//!
//! Forces come from a central finite difference of the total energy
//! over particle coordinates. Orientation frames are rebuilt from the
//! axis-particle positions inside every energy call, so the forces on
//! axis particles carry the torque contribution for free. Optimized
//! backends are expected to use analytic derivatives; this kernel
//! trades speed for being obviously right.

use std::collections::HashMap;

use crate::{
    ConfigurationError, GayBerneKernel, GayBerneParameters, Mat3, NonbondedMethod,
    ParticleParameters, SimulationContext, System, Vec3,
};

/// Displacement for central-difference forces, in the same length unit
/// as positions.
const FORCE_DELTA: f64 = 1e-5;

/// Reference implementation of [`GayBerneKernel`]. Holds a snapshot of
/// the validated parameter set; no other state survives between calls.
#[derive(Default)]
pub struct ReferenceGayBerneKernel {
    params: Option<GayBerneParameters>,
}

impl GayBerneKernel for ReferenceGayBerneKernel {
    fn initialize(
        &mut self,
        system: &System,
        params: &GayBerneParameters,
    ) -> Result<(), ConfigurationError> {
        if params.particles.len() != system.num_particles() {
            return Err(ConfigurationError::ShapeMismatch(
                "parameter set does not match system particle count",
            ));
        }
        tracing::debug!(
            particles = params.particles.len(),
            exceptions = params.exceptions.len(),
            "reference Gay-Berne kernel initialized"
        );
        self.params = Some(params.clone());
        Ok(())
    }

    fn execute(
        &mut self,
        ctx: &mut SimulationContext,
        include_forces: bool,
        include_energy: bool,
    ) -> Result<f64, ConfigurationError> {
        let params = self.params.as_ref().ok_or(ConfigurationError::ShapeMismatch(
            "kernel executed before initialize",
        ))?;
        let box_vectors = ctx.system().default_periodic_box_vectors();
        let box_diag = Vec3::new(box_vectors[0].x, box_vectors[1].y, box_vectors[2].z);
        let positions = ctx.positions().to_vec();
        if include_forces {
            accumulate_forces(params, &positions, box_diag, ctx.forces_mut());
        }
        let energy = if include_energy {
            total_energy(params, &positions, box_diag)
        } else {
            0.0
        };
        tracing::trace!(energy, include_forces, "reference Gay-Berne pass");
        Ok(energy)
    }

    fn copy_parameters_to_context(
        &mut self,
        _ctx: &mut SimulationContext,
        params: &GayBerneParameters,
    ) -> Result<(), ConfigurationError> {
        let current = self.params.as_ref().ok_or(ConfigurationError::ShapeMismatch(
            "kernel updated before initialize",
        ))?;
        if params.particles.len() != current.particles.len() {
            return Err(ConfigurationError::ShapeMismatch(
                "updated parameter set changes the particle count",
            ));
        }
        if params.exceptions.len() != current.exceptions.len() {
            return Err(ConfigurationError::ShapeMismatch(
                "updated parameter set changes the exception count",
            ));
        }
        self.params = Some(params.clone());
        Ok(())
    }
}

fn ordered_pair(a: usize, b: usize) -> (usize, usize) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

fn pair_overrides(params: &GayBerneParameters) -> HashMap<(usize, usize), (f64, f64)> {
    params
        .exceptions
        .iter()
        .map(|e| {
            (
                ordered_pair(e.particle_a, e.particle_b),
                (e.sigma, e.epsilon),
            )
        })
        .collect()
}

/// Lab-to-body rotation for particle `i`: rows are the body axes.
/// Without an x axis particle the frame stays axis-aligned.
fn orientation_frame(i: usize, p: &ParticleParameters, positions: &[Vec3]) -> Mat3 {
    let Some(xp) = p.x_particle else {
        return Mat3::IDENTITY;
    };
    let x_axis = (positions[xp] - positions[i]).normalized();
    let y_hint = match p.y_particle {
        Some(yp) => positions[yp] - positions[i],
        // Any direction not parallel to the x axis works.
        None => {
            if x_axis.x.abs() < 0.5 {
                Vec3::new(1.0, 0.0, 0.0)
            } else {
                Vec3::new(0.0, 1.0, 0.0)
            }
        }
    };
    let y_axis = (y_hint - x_axis * y_hint.dot(x_axis)).normalized();
    let z_axis = x_axis.cross(y_axis);
    Mat3::from_rows(x_axis, y_axis, z_axis)
}

/// Per-particle matrices entering the pair formulas: the shape overlap
/// term `A^T diag(r^2) A`, the well-depth term `A^T diag(e^-1/2) A`,
/// and the scalar entering `eta`.
fn particle_terms(params: &GayBerneParameters, positions: &[Vec3]) -> (Vec<Mat3>, Vec<Mat3>, Vec<f64>) {
    let n = params.particles.len();
    let mut shape = Vec::with_capacity(n);
    let mut well = Vec::with_capacity(n);
    let mut eta_scalar = Vec::with_capacity(n);
    for (i, p) in params.particles.iter().enumerate() {
        let a = orientation_frame(i, p, positions);
        let at = a.transpose();
        shape.push(at * Mat3::diagonal(p.rx * p.rx, p.ry * p.ry, p.rz * p.rz) * a);
        well.push(at * Mat3::diagonal(p.ex.powf(-0.5), p.ey.powf(-0.5), p.ez.powf(-0.5)) * a);
        eta_scalar.push((p.rx * p.ry + p.rz * p.rz) * (p.rx * p.ry).sqrt());
    }
    (shape, well, eta_scalar)
}

fn minimum_image(mut dr: Vec3, box_diag: Vec3) -> Vec3 {
    for axis in 0..3 {
        dr[axis] -= (dr[axis] / box_diag[axis]).round() * box_diag[axis];
    }
    dr
}

/// Quintic switch, 1 at `r_switch` falling smoothly to 0 at `r_cutoff`.
fn switch_value(r: f64, r_switch: f64, r_cutoff: f64) -> f64 {
    let t = (r - r_switch) / (r_cutoff - r_switch);
    1.0 + t * t * t * (-10.0 + t * (15.0 - t * 6.0))
}

fn pair_energy(g: Mat3, b: Mat3, s_product: f64, sigma: f64, epsilon: f64, dr: Vec3, r: f64) -> f64 {
    let rhat = dr / r;
    let sigma12 = (0.5 * g.inverse().quadratic_form(rhat)).powf(-0.5);
    let h = r - sigma12;
    let rho = sigma / (h + sigma);
    let rho6 = rho.powi(6);
    let u_r = 4.0 * epsilon * (rho6 * rho6 - rho6);
    let eta = (2.0 * s_product / g.determinant()).sqrt();
    let chi_half = 2.0 * b.inverse().quadratic_form(rhat);
    eta * chi_half * chi_half * u_r
}

fn total_energy(params: &GayBerneParameters, positions: &[Vec3], box_diag: Vec3) -> f64 {
    let n = params.particles.len();
    let overrides = pair_overrides(params);
    let (shape, well, eta_scalar) = particle_terms(params, positions);
    let periodic = params.method == NonbondedMethod::CutoffPeriodic;
    let cutoff_sq = params.cutoff_distance * params.cutoff_distance;
    let mut energy = 0.0;
    for i in 0..n {
        for j in (i + 1)..n {
            let (sigma, epsilon) = overrides.get(&ordered_pair(i, j)).copied().unwrap_or_else(|| {
                let (pi, pj) = (&params.particles[i], &params.particles[j]);
                (
                    0.5 * (pi.sigma + pj.sigma),
                    (pi.epsilon * pj.epsilon).sqrt(),
                )
            });
            if epsilon <= 0.0 {
                continue;
            }
            let mut dr = positions[j] - positions[i];
            if periodic {
                dr = minimum_image(dr, box_diag);
            }
            let r_sq = dr.length_squared();
            if params.method != NonbondedMethod::NoCutoff && r_sq > cutoff_sq {
                continue;
            }
            let r = r_sq.sqrt();
            if r < 1e-12 {
                continue;
            }
            let mut u = pair_energy(
                shape[i] + shape[j],
                well[i] + well[j],
                eta_scalar[i] * eta_scalar[j],
                sigma,
                epsilon,
                dr,
                r,
            );
            if params.use_switching_function
                && params.method != NonbondedMethod::NoCutoff
                && r > params.switching_distance
            {
                u *= switch_value(r, params.switching_distance, params.cutoff_distance);
            }
            energy += u;
        }
    }
    energy
}

fn accumulate_forces(
    params: &GayBerneParameters,
    positions: &[Vec3],
    box_diag: Vec3,
    forces: &mut [Vec3],
) {
    let mut work = positions.to_vec();
    for i in 0..work.len() {
        for axis in 0..3 {
            let original = work[i][axis];
            work[i][axis] = original + FORCE_DELTA;
            let energy_plus = total_energy(params, &work, box_diag);
            work[i][axis] = original - FORCE_DELTA;
            let energy_minus = total_energy(params, &work, box_diag);
            work[i][axis] = original;
            forces[i][axis] -= (energy_plus - energy_minus) / (2.0 * FORCE_DELTA);
        }
    }
}
