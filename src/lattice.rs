// SPDX-License-Identifier: LGPL-2.1-or-later
// See Notices.txt for copyright information

//! LLL reduction of integer lattice bases using exact rational arithmetic.
//!
//! ```
//! # use olll::lattice::reduce;
//! # use num_bigint::BigInt;
//! # use num_rational::BigRational;
//! let delta = BigRational::new(3.into(), 4.into());
//! let reduced = reduce(&[[1, 1, 1], [-1, 0, 2], [3, 5, 6]], &delta).unwrap();
//! let expected: Vec<Vec<BigInt>> = vec![
//!     vec![0.into(), 1.into(), 0.into()],
//!     vec![1.into(), 0.into(), 1.into()],
//!     vec![(-1).into(), 0.into(), 2.into()],
//! ];
//! assert_eq!(reduced, expected);
//! ```

use crate::rational_vector::RationalVector;
use lazy_static::lazy_static;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;
use thiserror::Error;

pub mod gram_schmidt;
pub mod properties;
pub mod reducer;

pub use self::gram_schmidt::gram_schmidt;
pub use self::gram_schmidt::GramSchmidt;
pub use self::properties::gram_determinant;
pub use self::properties::is_lll_reduced;
pub use self::properties::is_size_reduced;
pub use self::properties::lattice_coordinates;
pub use self::properties::satisfies_lovasz_condition;
pub use self::reducer::ReducedBasis;
pub use self::reducer::Reducer;
pub use self::reducer::ReductionStats;

lazy_static! {
    pub(crate) static ref ONE_HALF: BigRational =
        BigRational::new(BigInt::one(), BigInt::from(2));
    static ref ONE_QUARTER: BigRational = BigRational::new(BigInt::one(), BigInt::from(4));
    static ref DEFAULT_DELTA: BigRational = BigRational::new(BigInt::from(3), BigInt::from(4));
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LatticeError {
    #[error("lattice basis has no vectors")]
    EmptyBasis,
    #[error("basis vector {index} has dimension {actual}, expected {expected}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },
    #[error("{vectors} vectors of dimension {dimension} can't be linearly independent")]
    TooManyVectors { vectors: usize, dimension: usize },
    #[error("lattice basis is linearly dependent: orthogonal vector {index} is zero")]
    DegenerateBasis { index: usize },
    #[error("invalid reduction parameter delta: {0}")]
    InvalidDelta(String),
    #[error("lattice reduction didn't finish within {limit} iterations")]
    IterationLimitExceeded { limit: usize },
}

impl From<LatticeError> for std::io::Error {
    fn from(err: LatticeError) -> Self {
        Self::new(std::io::ErrorKind::InvalidInput, err)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReductionParameters {
    /// Lovász condition parameter, conventionally in `(1/4, 1)`
    pub delta: BigRational,
    /// only recompute the orthogonal vectors at and after the changed basis index
    pub incremental_gram_schmidt: bool,
    /// give up with [`LatticeError::IterationLimitExceeded`] after this many
    /// main-loop iterations
    pub max_iterations: Option<usize>,
}

impl Default for ReductionParameters {
    fn default() -> Self {
        Self {
            delta: DEFAULT_DELTA.clone(),
            incremental_gram_schmidt: false,
            max_iterations: None,
        }
    }
}

impl ReductionParameters {
    pub fn new(delta: BigRational) -> Self {
        Self {
            delta,
            ..Self::default()
        }
    }
    pub fn with_delta(self, delta: BigRational) -> Self {
        Self { delta, ..self }
    }
    /// converts `delta` exactly; fails for NaN and infinities
    pub fn with_delta_f64(self, delta: f64) -> Result<Self, LatticeError> {
        let delta = BigRational::from_float(delta)
            .ok_or_else(|| LatticeError::InvalidDelta(format!("{} is not finite", delta)))?;
        Ok(self.with_delta(delta))
    }
    pub fn with_incremental_gram_schmidt(self, incremental_gram_schmidt: bool) -> Self {
        Self {
            incremental_gram_schmidt,
            ..self
        }
    }
    pub fn with_max_iterations(self, max_iterations: Option<usize>) -> Self {
        Self {
            max_iterations,
            ..self
        }
    }
    /// `true` if `1/4 < delta < 1`, the range where termination and the
    /// usual quality bounds are guaranteed
    pub fn is_delta_conventional(&self) -> bool {
        self.delta > *ONE_QUARTER && self.delta < BigRational::one()
    }
}

/// checks that `basis` is a non-empty list of equal-length vectors and
/// converts it to rationals
pub(crate) fn to_rational_basis<T: Clone + Into<BigInt>, V: AsRef<[T]>>(
    basis: &[V],
) -> Result<Vec<RationalVector>, LatticeError> {
    let dimension = basis.first().ok_or(LatticeError::EmptyBasis)?.as_ref().len();
    basis
        .iter()
        .enumerate()
        .map(|(index, vector)| {
            let vector = vector.as_ref();
            if vector.len() != dimension {
                return Err(LatticeError::DimensionMismatch {
                    index,
                    expected: dimension,
                    actual: vector.len(),
                });
            }
            Ok(RationalVector::from_integers(vector.iter().cloned()))
        })
        .collect()
}

/// rejects bases that can't be linearly independent before any
/// orthogonalization is attempted
pub(crate) fn check_full_rank_shape(basis: &[RationalVector]) -> Result<(), LatticeError> {
    let dimension = basis.first().map_or(0, RationalVector::len);
    if basis.len() > dimension {
        return Err(LatticeError::TooManyVectors {
            vectors: basis.len(),
            dimension,
        });
    }
    if let Some(index) = basis.iter().position(RationalVector::is_zero) {
        return Err(LatticeError::DegenerateBasis { index });
    }
    Ok(())
}

/// LLL-reduces the integer lattice basis `basis` (one vector per entry)
/// with Lovász parameter `delta`, returning the reduced basis.
pub fn reduce<T: Clone + Into<BigInt>, V: AsRef<[T]>>(
    basis: &[V],
    delta: &BigRational,
) -> Result<Vec<Vec<BigInt>>, LatticeError> {
    let parameters = ReductionParameters::new(delta.clone());
    Ok(reduce_with_parameters(basis, &parameters)?.basis)
}

pub fn reduce_with_parameters<T: Clone + Into<BigInt>, V: AsRef<[T]>>(
    basis: &[V],
    parameters: &ReductionParameters,
) -> Result<ReducedBasis, LatticeError> {
    Reducer::new(basis, parameters.clone())?.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(numer: i64, denom: i64) -> BigRational {
        BigRational::new(numer.into(), denom.into())
    }

    fn int_basis(basis: &[&[i64]]) -> Vec<Vec<BigInt>> {
        basis
            .iter()
            .map(|vector| vector.iter().copied().map(BigInt::from).collect())
            .collect()
    }

    #[test]
    fn test_reduce() {
        fn test_case(basis: &[&[i64]], delta: BigRational, expected: &[&[i64]]) {
            println!("basis: {:?}", basis);
            println!("delta: {}", delta);
            let reduced = reduce(basis, &delta).unwrap();
            println!("reduced: {:?}", reduced);
            assert_eq!(reduced, int_basis(expected));
        }
        test_case(
            &[&[1, 1, 1], &[-1, 0, 2], &[3, 5, 6]],
            r(3, 4),
            &[&[0, 1, 0], &[1, 0, 1], &[-1, 0, 2]],
        );
        test_case(
            &[&[4, 1, 2], &[4, 7, 2], &[3, 1, 7]],
            r(9, 10),
            &[&[4, 1, 2], &[-1, 0, 5], &[0, 6, 0]],
        );
        test_case(&[&[1, 2], &[3, 4]], r(3, 4), &[&[1, 0], &[0, 2]]);
        test_case(&[&[3, 1], &[2, 2]], r(3, 4), &[&[-1, 1], &[2, 2]]);
        test_case(&[&[5]], r(3, 4), &[&[5]]);
        test_case(&[&[7, 2], &[3, 8]], r(1, 100), &[&[7, 2], &[-4, 6]]);
        test_case(&[&[7, 2], &[3, 8]], r(1, 1), &[&[-4, 6], &[7, 2]]);
        test_case(
            &[&[1, 0, 0], &[0, 1, 0], &[0, 0, 1]],
            r(3, 4),
            &[&[1, 0, 0], &[0, 1, 0], &[0, 0, 1]],
        );
    }

    #[test]
    fn test_rounding_ties_away_from_zero() {
        // mu = 5/2 on the first size reduction; rounding half to even would
        // end at [[1, 1], [1, -1]]
        assert_eq!(
            reduce(&[[2, 0], [5, 1]], &r(3, 4)).unwrap(),
            int_basis(&[&[-1, 1], &[1, 1]])
        );
        assert_eq!(
            reduce(&[[2, 0], [-5, 1]], &r(3, 4)).unwrap(),
            int_basis(&[&[1, 1], &[1, -1]])
        );
    }

    #[test]
    fn test_malformed_input() {
        let delta = r(3, 4);
        let empty: &[Vec<i32>] = &[];
        assert_eq!(reduce(empty, &delta), Err(LatticeError::EmptyBasis));
        assert_eq!(
            reduce(&[vec![1, 2, 3], vec![4, 5]], &delta),
            Err(LatticeError::DimensionMismatch {
                index: 1,
                expected: 3,
                actual: 2
            })
        );
        assert_eq!(
            reduce(&[[1, 2], [3, 4], [5, 6]], &delta),
            Err(LatticeError::TooManyVectors {
                vectors: 3,
                dimension: 2
            })
        );
        let no_dimensions: &[Vec<i32>] = &[vec![]];
        assert_eq!(
            reduce(no_dimensions, &delta),
            Err(LatticeError::TooManyVectors {
                vectors: 1,
                dimension: 0
            })
        );
    }

    #[test]
    fn test_degenerate_basis() {
        let delta = r(3, 4);
        assert_eq!(
            reduce(&[[1, 2, 3], [0, 0, 0]], &delta),
            Err(LatticeError::DegenerateBasis { index: 1 })
        );
        assert_eq!(
            reduce(&[[0, 0]], &delta),
            Err(LatticeError::DegenerateBasis { index: 0 })
        );
        // third vector is the sum of the first two
        assert_eq!(
            reduce(&[[1, 0, 0, 0], [0, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 1]], &delta),
            Err(LatticeError::DegenerateBasis { index: 2 })
        );
        assert_eq!(
            reduce(&[[1, 2, 3], [2, 4, 6]], &delta),
            Err(LatticeError::DegenerateBasis { index: 1 })
        );
        // orthogonalizing integer input rejects the same bases
        let orthogonalize = |basis: &[[i32; 2]]| -> Result<Vec<RationalVector>, LatticeError> {
            gram_schmidt(&to_rational_basis(basis)?)
        };
        assert_eq!(
            orthogonalize(&[[1, 2], [2, 4]]),
            Err(LatticeError::DegenerateBasis { index: 1 })
        );
        assert_eq!(
            orthogonalize(&[[0, 0], [1, 1]]),
            Err(LatticeError::DegenerateBasis { index: 0 })
        );
        assert!(orthogonalize(&[[3, 1], [2, 2]]).is_ok());
    }

    #[test]
    fn test_parameters() {
        let parameters = ReductionParameters::default();
        assert_eq!(parameters.delta, r(3, 4));
        assert!(!parameters.incremental_gram_schmidt);
        assert_eq!(parameters.max_iterations, None);
        assert!(parameters.is_delta_conventional());
        let parameters = parameters.with_delta_f64(0.99).unwrap();
        assert!(parameters.is_delta_conventional());
        assert_eq!(
            ReductionParameters::default()
                .with_delta_f64(0.75)
                .unwrap()
                .delta,
            r(3, 4)
        );
        assert!(!ReductionParameters::new(r(1, 4)).is_delta_conventional());
        assert!(!ReductionParameters::new(r(1, 1)).is_delta_conventional());
        assert!(matches!(
            ReductionParameters::default().with_delta_f64(f64::NAN),
            Err(LatticeError::InvalidDelta(_))
        ));
        assert!(matches!(
            ReductionParameters::default().with_delta_f64(f64::INFINITY),
            Err(LatticeError::InvalidDelta(_))
        ));
    }

    #[test]
    fn test_error_conversion() {
        let err: std::io::Error = LatticeError::EmptyBasis.into();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
        assert_eq!(err.to_string(), "lattice basis has no vectors");
        assert_eq!(
            LatticeError::DimensionMismatch {
                index: 2,
                expected: 3,
                actual: 4
            }
            .to_string(),
            "basis vector 2 has dimension 4, expected 3"
        );
    }
}
