use nalgebra::{Matrix3, Point3, Vector3};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConformerError {
    #[error("Conformers differ in atom count: {left} vs {right}")]
    AtomCountMismatch { left: usize, right: usize },
    #[error("Conformers differ in element order at atom {index}: '{left}' vs '{right}'")]
    ElementMismatch {
        index: usize,
        left: String,
        right: String,
    },
    #[error("Alignment needs at least 3 atoms, got {0}")]
    TooFewAtoms(usize),
    #[error("No conformers supplied")]
    Empty,
}

/// One 3-D arrangement of a molecule's atoms.
#[derive(Debug, Clone, PartialEq)]
pub struct Conformer {
    /// Free-form title, usually the comment line of the source file.
    pub label: String,
    pub symbols: Vec<String>,
    /// Cartesian coordinates in Angstroms, one per entry of `symbols`.
    pub positions: Vec<Point3<f64>>,
    /// Potential energy reported by the generating program, if any.
    pub energy: Option<f64>,
}

impl Conformer {
    pub fn new(label: &str, symbols: Vec<String>, positions: Vec<Point3<f64>>) -> Self {
        Self {
            label: label.to_string(),
            symbols,
            positions,
            energy: None,
        }
    }

    pub fn with_energy(mut self, energy: f64) -> Self {
        self.energy = Some(energy);
        self
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn centroid(&self) -> Point3<f64> {
        centroid(&self.positions)
    }

    fn check_compatible(&self, other: &Conformer) -> Result<(), ConformerError> {
        if self.len() != other.len() {
            return Err(ConformerError::AtomCountMismatch {
                left: self.len(),
                right: other.len(),
            });
        }
        if let Some((index, (left, right))) = self
            .symbols
            .iter()
            .zip(&other.symbols)
            .enumerate()
            .find(|(_, (a, b))| a != b)
        {
            return Err(ConformerError::ElementMismatch {
                index,
                left: left.clone(),
                right: right.clone(),
            });
        }
        Ok(())
    }
}

fn centroid(points: &[Point3<f64>]) -> Point3<f64> {
    if points.is_empty() {
        return Point3::origin();
    }
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Point3::from(sum / points.len() as f64)
}

/// Root-mean-square deviation without any superposition.
pub fn rmsd(a: &Conformer, b: &Conformer) -> Result<f64, ConformerError> {
    a.check_compatible(b)?;
    if a.is_empty() {
        return Ok(0.0);
    }
    let sum: f64 = a
        .positions
        .iter()
        .zip(&b.positions)
        .map(|(p, q)| (p - q).norm_squared())
        .sum();
    Ok((sum / a.len() as f64).sqrt())
}

/// Optimal rotation that superimposes `mobile` onto `reference` after both are centered.
///
/// Kabsch algorithm on the 3x3 cross-covariance matrix, with the sign of the
/// last singular vector flipped when the best orthogonal transform would be a
/// reflection.
fn kabsch_rotation(reference: &[Vector3<f64>], mobile: &[Vector3<f64>]) -> Matrix3<f64> {
    let covariance = mobile
        .iter()
        .zip(reference)
        .fold(Matrix3::zeros(), |acc, (p, q)| acc + p * q.transpose());

    let svd = covariance.svd(true, true);
    let (Some(u), Some(v_t)) = (svd.u, svd.v_t) else {
        return Matrix3::identity();
    };
    let v = v_t.transpose();
    let u_t = u.transpose();

    let d = (v * u_t).determinant().signum();
    let correction = Matrix3::from_diagonal(&Vector3::new(1.0, 1.0, d));
    v * correction * u_t
}

/// Superimposes `mobile` onto `reference` and returns the transformed coordinates.
pub fn superimpose(
    reference: &Conformer,
    mobile: &Conformer,
) -> Result<Vec<Point3<f64>>, ConformerError> {
    reference.check_compatible(mobile)?;
    if reference.len() < 3 {
        return Err(ConformerError::TooFewAtoms(reference.len()));
    }
    let ref_center = reference.centroid();
    let mob_center = mobile.centroid();
    let ref_centered: Vec<Vector3<f64>> =
        reference.positions.iter().map(|p| p - ref_center).collect();
    let mob_centered: Vec<Vector3<f64>> =
        mobile.positions.iter().map(|p| p - mob_center).collect();

    let rotation = kabsch_rotation(&ref_centered, &mob_centered);
    Ok(mob_centered
        .iter()
        .map(|v| ref_center + rotation * v)
        .collect())
}

/// RMSD after optimal rigid-body superposition of `mobile` onto `reference`.
pub fn aligned_rmsd(reference: &Conformer, mobile: &Conformer) -> Result<f64, ConformerError> {
    let aligned = superimpose(reference, mobile)?;
    let sum: f64 = reference
        .positions
        .iter()
        .zip(&aligned)
        .map(|(p, q)| (p - q).norm_squared())
        .sum();
    Ok((sum / reference.len() as f64).sqrt())
}

/// Symmetric matrix of pairwise RMSD values; `matrix[i][j]` compares conformer `i` and `j`.
///
/// With `align` set, each pair is superimposed first.
pub fn rmsd_matrix(conformers: &[Conformer], align: bool) -> Result<Vec<Vec<f64>>, ConformerError> {
    if conformers.is_empty() {
        return Err(ConformerError::Empty);
    }
    let n = conformers.len();
    let mut matrix = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let value = if align {
                aligned_rmsd(&conformers[i], &conformers[j])?
            } else {
                rmsd(&conformers[i], &conformers[j])?
            };
            matrix[i][j] = value;
            matrix[j][i] = value;
        }
    }
    Ok(matrix)
}

/// Conformer indices ordered by ascending energy, paired with the energy relative
/// to the lowest one. Conformers without an energy are left out.
pub fn rank_by_energy(conformers: &[Conformer]) -> Vec<(usize, f64)> {
    let mut ranked: Vec<(usize, f64)> = conformers
        .iter()
        .enumerate()
        .filter_map(|(i, c)| c.energy.filter(|e| e.is_finite()).map(|e| (i, e)))
        .collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    let Some(&(_, lowest)) = ranked.first() else {
        return ranked;
    };
    ranked
        .into_iter()
        .map(|(i, e)| (i, e - lowest))
        .collect()
}
