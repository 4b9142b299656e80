//! Value types shared between the force layer and compute backends.

use std::ops::{Add, Div, Index, IndexMut, Mul, Neg, Sub};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[must_use]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    #[must_use]
    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    #[must_use]
    pub fn normalized(self) -> Self {
        self / self.length()
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<f64> for Vec3 {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Index<usize> for Vec3 {
    type Output = f64;
    fn index(&self, axis: usize) -> &f64 {
        match axis {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Vec3 axis index out of range: {axis}"),
        }
    }
}

impl IndexMut<usize> for Vec3 {
    fn index_mut(&mut self, axis: usize) -> &mut f64 {
        match axis {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("Vec3 axis index out of range: {axis}"),
        }
    }
}

/// Row-major 3x3 matrix. Just enough linear algebra for the
/// anisotropic overlap math; not a general-purpose type.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Mat3(pub [[f64; 3]; 3]);

impl Mat3 {
    pub const IDENTITY: Self = Self::diagonal(1.0, 1.0, 1.0);

    #[must_use]
    pub const fn diagonal(x: f64, y: f64, z: f64) -> Self {
        Self([[x, 0.0, 0.0], [0.0, y, 0.0], [0.0, 0.0, z]])
    }

    #[must_use]
    pub const fn from_rows(r0: Vec3, r1: Vec3, r2: Vec3) -> Self {
        Self([[r0.x, r0.y, r0.z], [r1.x, r1.y, r1.z], [r2.x, r2.y, r2.z]])
    }

    #[must_use]
    pub fn transpose(self) -> Self {
        let m = self.0;
        Self([
            [m[0][0], m[1][0], m[2][0]],
            [m[0][1], m[1][1], m[2][1]],
            [m[0][2], m[1][2], m[2][2]],
        ])
    }

    #[must_use]
    pub fn determinant(self) -> f64 {
        let m = self.0;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Inverse via the adjugate. The overlap matrices this crate builds
    /// are sums of positive-definite terms, so a singular input here
    /// means the parameters were never validated; the division then
    /// produces non-finite entries that surface as a non-finite energy.
    #[must_use]
    pub fn inverse(self) -> Self {
        let m = self.0;
        let det = self.determinant();
        let cof = |r1: usize, c1: usize, r2: usize, c2: usize| {
            m[r1][c1] * m[r2][c2] - m[r1][c2] * m[r2][c1]
        };
        Self([
            [
                cof(1, 1, 2, 2) / det,
                -cof(0, 1, 2, 2) / det,
                cof(0, 1, 1, 2) / det,
            ],
            [
                -cof(1, 0, 2, 2) / det,
                cof(0, 0, 2, 2) / det,
                -cof(0, 0, 1, 2) / det,
            ],
            [
                cof(1, 0, 2, 1) / det,
                -cof(0, 0, 2, 1) / det,
                cof(0, 0, 1, 1) / det,
            ],
        ])
    }

    #[must_use]
    pub fn mul_vec(self, v: Vec3) -> Vec3 {
        let m = self.0;
        Vec3::new(
            m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
            m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
            m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
        )
    }

    /// `v^T M v`.
    #[must_use]
    pub fn quadratic_form(self, v: Vec3) -> f64 {
        v.dot(self.mul_vec(v))
    }
}

impl Add for Mat3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        let mut out = [[0.0; 3]; 3];
        for (row, out_row) in out.iter_mut().enumerate() {
            for (col, value) in out_row.iter_mut().enumerate() {
                *value = self.0[row][col] + rhs.0[row][col];
            }
        }
        Self(out)
    }
}

impl Mul for Mat3 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        let mut out = [[0.0; 3]; 3];
        for (row, out_row) in out.iter_mut().enumerate() {
            for (col, value) in out_row.iter_mut().enumerate() {
                *value = (0..3).map(|k| self.0[row][k] * rhs.0[k][col]).sum();
            }
        }
        Self(out)
    }
}

/// How nonbonded interactions beyond a distance are treated.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NonbondedMethod {
    NoCutoff,
    CutoffNonPeriodic,
    CutoffPeriodic,
}

/// Per-particle Gay-Berne record.
///
/// `x_particle`/`y_particle` name the neighbors whose positions define
/// the particle's orientation frame; `None` leaves the frame axis-
/// aligned (the original encodes "unset" as -1). Radii are semi-axes
/// along the frame axes; `ex`/`ey`/`ez` scale the well depth along
/// them.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ParticleParameters {
    pub sigma: f64,
    pub epsilon: f64,
    pub x_particle: Option<usize>,
    pub y_particle: Option<usize>,
    pub rx: f64,
    pub ry: f64,
    pub rz: f64,
    pub ex: f64,
    pub ey: f64,
    pub ez: f64,
}

impl ParticleParameters {
    /// An isotropic particle: no orientation frame, equal semi-axes of
    /// `sigma / 2`, unit well-depth scale factors.
    #[must_use]
    pub fn spherical(sigma: f64, epsilon: f64) -> Self {
        Self {
            sigma,
            epsilon,
            x_particle: None,
            y_particle: None,
            rx: sigma / 2.0,
            ry: sigma / 2.0,
            rz: sigma / 2.0,
            ex: 1.0,
            ey: 1.0,
            ez: 1.0,
        }
    }
}

/// Pairwise override of the combined `sigma`/`epsilon` for one
/// unordered particle pair. `epsilon == 0` excludes the pair.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ExceptionParameters {
    pub particle_a: usize,
    pub particle_b: usize,
    pub sigma: f64,
    pub epsilon: f64,
}

/// The full declarative parameter set a force carries: one record per
/// particle, pairwise exceptions, and the nonbonded configuration.
/// Authored by the caller, validated once at bind time, replaced
/// wholesale on update.
#[derive(Clone, Debug, PartialEq)]
pub struct GayBerneParameters {
    pub particles: Vec<ParticleParameters>,
    pub exceptions: Vec<ExceptionParameters>,
    pub method: NonbondedMethod,
    pub cutoff_distance: f64,
    pub use_switching_function: bool,
    pub switching_distance: f64,
}

impl Default for GayBerneParameters {
    fn default() -> Self {
        Self {
            particles: Vec::new(),
            exceptions: Vec::new(),
            method: NonbondedMethod::NoCutoff,
            cutoff_distance: 1.0,
            use_switching_function: false,
            switching_distance: 0.0,
        }
    }
}
