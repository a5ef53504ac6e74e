// SPDX-License-Identifier: LGPL-2.1-or-later
// See Notices.txt for copyright information

use super::LatticeError;
use crate::rational_vector::RationalVector;
use num_rational::BigRational;
use num_traits::Zero;

/// unnormalized Gram–Schmidt orthogonalization of a basis, together with
/// the squared norms of the orthogonal vectors
///
/// `vectors()[i]` is `basis[i]` minus its projections onto
/// `vectors()[0..i]`. The orthogonal vectors are only valid for the basis
/// they were computed from; after changing `basis[i]` call
/// [`recompute_from`](Self::recompute_from) with an index `<= i`.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct GramSchmidt {
    vectors: Vec<RationalVector>,
    squared_norms: Vec<BigRational>,
}

impl GramSchmidt {
    pub fn new(basis: &[RationalVector]) -> Result<Self, LatticeError> {
        let mut retval = Self {
            vectors: Vec::with_capacity(basis.len()),
            squared_norms: Vec::with_capacity(basis.len()),
        };
        retval.recompute_from(basis, 0)?;
        Ok(retval)
    }
    /// recomputes the orthogonal vectors from index `start` onwards, keeping
    /// `vectors()[..start]`
    ///
    /// Fails with [`LatticeError::DegenerateBasis`] if a zero orthogonal
    /// vector has to be projected onto; `self` then holds only the vectors
    /// computed before the failure.
    pub fn recompute_from(
        &mut self,
        basis: &[RationalVector],
        start: usize,
    ) -> Result<(), LatticeError> {
        let start = start.min(self.vectors.len());
        self.vectors.truncate(start);
        self.squared_norms.truncate(start);
        for basis_vector in &basis[start..] {
            let mut orthogonal = basis_vector.clone();
            for j in 0..self.vectors.len() {
                let projection = self.vectors[j].scale(&self.mu(basis_vector, j)?);
                orthogonal = orthogonal - projection;
            }
            self.squared_norms.push(orthogonal.sdot());
            self.vectors.push(orthogonal);
        }
        Ok(())
    }
    /// projection coefficient of `vector` onto orthogonal vector `j`
    pub fn mu(&self, vector: &RationalVector, j: usize) -> Result<BigRational, LatticeError> {
        self.vectors[j]
            .projection_coefficient_with_sdot(vector, &self.squared_norms[j])
            .map_err(|_| LatticeError::DegenerateBasis { index: j })
    }
    pub fn len(&self) -> usize {
        self.vectors.len()
    }
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
    pub fn vectors(&self) -> &[RationalVector] {
        &self.vectors
    }
    pub fn into_vectors(self) -> Vec<RationalVector> {
        self.vectors
    }
    pub fn squared_norm(&self, index: usize) -> &BigRational {
        &self.squared_norms[index]
    }
    pub fn squared_norms(&self) -> &[BigRational] {
        &self.squared_norms
    }
    /// index of the first zero orthogonal vector, if the basis is linearly dependent
    pub fn first_zero_index(&self) -> Option<usize> {
        self.squared_norms.iter().position(Zero::is_zero)
    }
}

/// unnormalized Gram–Schmidt orthogonalization of `basis`
///
/// Fails with [`LatticeError::DegenerateBasis`] if any orthogonal vector is
/// zero, including the last one.
pub fn gram_schmidt(basis: &[RationalVector]) -> Result<Vec<RationalVector>, LatticeError> {
    let ortho = GramSchmidt::new(basis)?;
    if let Some(index) = ortho.first_zero_index() {
        return Err(LatticeError::DegenerateBasis { index });
    }
    Ok(ortho.into_vectors())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(numer: i64, denom: i64) -> BigRational {
        BigRational::new(numer.into(), denom.into())
    }

    fn ri(value: i64) -> BigRational {
        BigRational::from_integer(value.into())
    }

    fn basis(vectors: &[&[i64]]) -> Vec<RationalVector> {
        vectors
            .iter()
            .map(|vector| RationalVector::from_integers(vector.iter().copied()))
            .collect()
    }

    #[test]
    fn test_gram_schmidt() {
        fn test_case(input: &[&[i64]], expected: Vec<Vec<BigRational>>) {
            let input = basis(input);
            let expected: Vec<RationalVector> =
                expected.into_iter().map(RationalVector::new).collect();
            println!("input: {:?}", input);
            let ortho = gram_schmidt(&input).unwrap();
            println!("ortho: {:?}", ortho);
            assert_eq!(ortho, expected);
        }
        test_case(
            &[&[3, 1], &[2, 2]],
            vec![vec![ri(3), ri(1)], vec![r(-2, 5), r(6, 5)]],
        );
        test_case(
            &[&[4, 1, 2], &[4, 7, 2], &[3, 1, 7]],
            vec![
                vec![ri(4), ri(1), ri(2)],
                vec![r(-8, 7), r(40, 7), r(-4, 7)],
                vec![r(-11, 5), ri(0), r(22, 5)],
            ],
        );
        test_case(&[&[0, 5]], vec![vec![ri(0), ri(5)]]);
        test_case(
            &[&[1, 0, 0], &[0, 1, 0]],
            vec![vec![ri(1), ri(0), ri(0)], vec![ri(0), ri(1), ri(0)]],
        );
    }

    #[test]
    fn test_orthogonality_and_squared_norms() {
        let input = basis(&[
            &[105, 821, 404, 328],
            &[881, 667, 644, 927],
            &[181, 483, 87, 500],
            &[893, 834, 732, 441],
        ]);
        let ortho = GramSchmidt::new(&input).unwrap();
        assert_eq!(ortho.len(), 4);
        for i in 0..ortho.len() {
            assert_eq!(*ortho.squared_norm(i), ortho.vectors()[i].sdot());
            for j in 0..i {
                assert!(ortho.vectors()[i].dot(&ortho.vectors()[j]).is_zero());
            }
        }
        assert_eq!(ortho.first_zero_index(), None);
    }

    #[test]
    fn test_recompute_from() {
        let mut input = basis(&[&[4, 1, 2], &[4, 7, 2], &[3, 1, 7]]);
        let mut ortho = GramSchmidt::new(&input).unwrap();
        input.swap(1, 2);
        ortho.recompute_from(&input, 1).unwrap();
        assert_eq!(ortho, GramSchmidt::new(&input).unwrap());
        input[2] = &input[2] - &input[0];
        ortho.recompute_from(&input, 2).unwrap();
        assert_eq!(ortho, GramSchmidt::new(&input).unwrap());
        // start past the computed prefix recomputes everything after it
        ortho.recompute_from(&input, 10).unwrap();
        assert_eq!(ortho.len(), 3);
    }

    #[test]
    fn test_degenerate() {
        // the zero vector is only divided by when a later vector is projected onto it
        let trailing_zero = GramSchmidt::new(&basis(&[&[1, 2], &[2, 4]])).unwrap();
        assert_eq!(trailing_zero.first_zero_index(), Some(1));
        assert_eq!(
            gram_schmidt(&basis(&[&[1, 2, 0], &[2, 4, 0], &[0, 0, 1]])),
            Err(LatticeError::DegenerateBasis { index: 1 })
        );
        assert_eq!(
            gram_schmidt(&basis(&[&[0, 0], &[1, 0]])),
            Err(LatticeError::DegenerateBasis { index: 0 })
        );
        // trailing zero vectors are reported too
        assert_eq!(
            gram_schmidt(&basis(&[&[1, 2], &[2, 4]])),
            Err(LatticeError::DegenerateBasis { index: 1 })
        );
        assert_eq!(
            gram_schmidt(&basis(&[&[1, 2], &[0, 0]])),
            Err(LatticeError::DegenerateBasis { index: 1 })
        );
        assert_eq!(
            gram_schmidt(&basis(&[&[0, 0]])),
            Err(LatticeError::DegenerateBasis { index: 0 })
        );
        assert_eq!(
            gram_schmidt(&basis(&[&[1, 0], &[0, 1], &[1, 1]])),
            Err(LatticeError::DegenerateBasis { index: 2 })
        );
    }

    #[test]
    fn test_empty() {
        let ortho = GramSchmidt::new(&[]).unwrap();
        assert!(ortho.is_empty());
        assert_eq!(ortho.first_zero_index(), None);
    }
}
