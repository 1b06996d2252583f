use crate::Vector3d;
use std::{fmt, ops};

/// A 3×3 matrix of double precision floats, stored row-major.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix3d {
    rows: [Vector3d; 3],
}

impl Matrix3d {
    /// Initializes a new matrix from its components, row by row.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub const fn new(
        m00: f64,
        m01: f64,
        m02: f64,
        m10: f64,
        m11: f64,
        m12: f64,
        m20: f64,
        m21: f64,
        m22: f64,
    ) -> Self {
        Self {
            rows: [
                Vector3d::new(m00, m01, m02),
                Vector3d::new(m10, m11, m12),
                Vector3d::new(m20, m21, m22),
            ],
        }
    }

    /// Initializes a new scaling matrix `s·I`.
    #[must_use]
    pub const fn scaling(s: f64) -> Self {
        Self::new(s, 0., 0., 0., s, 0., 0., 0., s)
    }

    /// The identity matrix.
    #[must_use]
    pub const fn identity() -> Self {
        Self::scaling(1.0)
    }

    /// The matrix with the components of `v` on the diagonal.
    #[must_use]
    pub const fn diagonal(v: &Vector3d) -> Self {
        Self::new(v.x, 0., 0., 0., v.y, 0., 0., 0., v.z)
    }

    /// Row `r` of the matrix, for `r` in `[0, 3)`.
    #[must_use]
    pub fn row(&self, r: usize) -> Vector3d {
        self.rows[r]
    }

    /// Column `c` of the matrix, for `c` in `[0, 3)`.
    #[must_use]
    pub fn column(&self, c: usize) -> Vector3d {
        Vector3d::new(
            self.component(0, c),
            self.component(1, c),
            self.component(2, c),
        )
    }

    /// The component at row `r`, column `c`.
    #[must_use]
    pub fn component(&self, r: usize, c: usize) -> f64 {
        let row = self.rows[r];
        match c {
            0 => row.x,
            1 => row.y,
            2 => row.z,
            _ => panic!("column index out of range"),
        }
    }

    /// The Frobenius inner product of this matrix and `other`.
    #[must_use]
    pub fn inner(&self, other: &Self) -> f64 {
        self.rows[0].dot(&other.rows[0])
            + self.rows[1].dot(&other.rows[1])
            + self.rows[2].dot(&other.rows[2])
    }

    /// The squared Frobenius norm of this matrix.
    #[must_use]
    pub fn squared_norm(&self) -> f64 {
        self.inner(self)
    }

    /// The Frobenius norm of this matrix.
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.squared_norm().sqrt()
    }

    /// The transpose of this matrix.
    #[must_use]
    pub fn transpose(&self) -> Self {
        Self {
            rows: [self.column(0), self.column(1), self.column(2)],
        }
    }

    /// The inverse of this matrix, via the adjugate.
    ///
    /// Singular matrices produce non-finite components rather than an error.
    #[must_use]
    pub fn inverse(&self) -> Self {
        // Rows of the inverse are the cross products of matrix columns,
        // scaled by the inverse determinant.
        let c0 = self.column(0);
        let c1 = self.column(1);
        let c2 = self.column(2);
        let det = c0.dot(&c1.cross(&c2));
        Self {
            rows: [
                c1.cross(&c2) / det,
                c2.cross(&c0) / det,
                c0.cross(&c1) / det,
            ],
        }
    }

    /// The component-wise product of this matrix and `other`.
    #[must_use]
    pub fn cwise_product(&self, other: &Self) -> Self {
        Self {
            rows: [
                self.rows[0].cwise_product(&other.rows[0]),
                self.rows[1].cwise_product(&other.rows[1]),
                self.rows[2].cwise_product(&other.rows[2]),
            ],
        }
    }
}

impl ops::Mul<Vector3d> for Matrix3d {
    type Output = Vector3d;

    fn mul(self, rhs: Vector3d) -> Vector3d {
        Vector3d::new(
            self.rows[0].dot(&rhs),
            self.rows[1].dot(&rhs),
            self.rows[2].dot(&rhs),
        )
    }
}

impl ops::Mul for Matrix3d {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let c0 = self * rhs.column(0);
        let c1 = self * rhs.column(1);
        let c2 = self * rhs.column(2);
        Self {
            rows: [
                Vector3d::new(c0.x, c1.x, c2.x),
                Vector3d::new(c0.y, c1.y, c2.y),
                Vector3d::new(c0.z, c1.z, c2.z),
            ],
        }
    }
}

impl ops::Add for Matrix3d {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            rows: [
                self.rows[0] + rhs.rows[0],
                self.rows[1] + rhs.rows[1],
                self.rows[2] + rhs.rows[2],
            ],
        }
    }
}

impl ops::Sub for Matrix3d {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            rows: [
                self.rows[0] - rhs.rows[0],
                self.rows[1] - rhs.rows[1],
                self.rows[2] - rhs.rows[2],
            ],
        }
    }
}

impl fmt::Display for Matrix3d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{},\n {},\n {}]",
            self.rows[0], self.rows[1], self.rows[2]
        )
    }
}

#[cfg(test)]
#[path = "./matrix3d_tests.rs"]
mod tests;
