// SPDX-License-Identifier: LGPL-2.1-or-later
// See Notices.txt for copyright information

//! Checks for the properties an LLL-reduced basis has.

use super::check_full_rank_shape;
use super::to_rational_basis;
use super::GramSchmidt;
use super::LatticeError;
use super::ONE_HALF;
use crate::rational_vector::RationalVector;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;
use num_traits::Signed;
use num_traits::Zero;

fn orthogonalize<T: Clone + Into<BigInt>, V: AsRef<[T]>>(
    basis: &[V],
) -> Result<(Vec<RationalVector>, GramSchmidt), LatticeError> {
    let basis = to_rational_basis(basis)?;
    check_full_rank_shape(&basis)?;
    let ortho = GramSchmidt::new(&basis)?;
    if let Some(index) = ortho.first_zero_index() {
        return Err(LatticeError::DegenerateBasis { index });
    }
    Ok((basis, ortho))
}

/// `true` if `|mu(i, j)| <= 1/2` for all `j < i`
pub fn is_size_reduced<T: Clone + Into<BigInt>, V: AsRef<[T]>>(
    basis: &[V],
) -> Result<bool, LatticeError> {
    let (basis, ortho) = orthogonalize(basis)?;
    for (i, vector) in basis.iter().enumerate() {
        for j in 0..i {
            if ortho.mu(vector, j)?.abs() > *ONE_HALF {
                return Ok(false);
            }
        }
    }
    Ok(true)
}

/// `true` if `sdot(ortho[i]) >= (delta - mu(i, i - 1)^2) * sdot(ortho[i - 1])`
/// for all `i >= 1`
pub fn satisfies_lovasz_condition<T: Clone + Into<BigInt>, V: AsRef<[T]>>(
    basis: &[V],
    delta: &BigRational,
) -> Result<bool, LatticeError> {
    let (basis, ortho) = orthogonalize(basis)?;
    for i in 1..basis.len() {
        let mu = ortho.mu(&basis[i], i - 1)?;
        let bound = (delta - &mu * &mu) * ortho.squared_norm(i - 1);
        if *ortho.squared_norm(i) < bound {
            return Ok(false);
        }
    }
    Ok(true)
}

pub fn is_lll_reduced<T: Clone + Into<BigInt>, V: AsRef<[T]>>(
    basis: &[V],
    delta: &BigRational,
) -> Result<bool, LatticeError> {
    Ok(is_size_reduced(basis)? && satisfies_lovasz_condition(basis, delta)?)
}

/// determinant of the Gram matrix `B * B^T`, the squared volume of the lattice
///
/// Unimodular basis changes don't change it, so equal results are a
/// necessary condition for two bases to span the same lattice. Linearly
/// dependent bases give zero.
pub fn gram_determinant<T: Clone + Into<BigInt>, V: AsRef<[T]>>(
    basis: &[V],
) -> Result<BigInt, LatticeError> {
    let (_, ortho) = match orthogonalize(basis) {
        Ok(v) => v,
        Err(LatticeError::DegenerateBasis { .. }) | Err(LatticeError::TooManyVectors { .. }) => {
            return Ok(BigInt::zero())
        }
        Err(err) => return Err(err),
    };
    let product = ortho
        .squared_norms()
        .iter()
        .fold(BigRational::one(), |product, squared_norm| {
            product * squared_norm
        });
    debug_assert!(product.is_integer());
    Ok(product.to_integer())
}

/// integer coordinates `x` with `vector = Σ x[i] * basis[i]`, or `None` if
/// `vector` isn't in the lattice spanned by `basis`
///
/// A `vector` of the wrong dimension is reported as
/// [`LatticeError::DimensionMismatch`] with `index` set to `basis.len()`.
pub fn lattice_coordinates<T: Clone + Into<BigInt>, V: AsRef<[T]>, U: Clone + Into<BigInt>>(
    basis: &[V],
    vector: &[U],
) -> Result<Option<Vec<BigInt>>, LatticeError> {
    let (basis, ortho) = orthogonalize(basis)?;
    let vector = RationalVector::from_integers(vector.iter().cloned());
    if vector.len() != basis[0].len() {
        return Err(LatticeError::DimensionMismatch {
            index: basis.len(),
            expected: basis[0].len(),
            actual: vector.len(),
        });
    }
    // coefficients of `vector` along each orthogonal vector
    let mut residual = vector.clone();
    let mut coefficients = Vec::with_capacity(basis.len());
    for j in 0..basis.len() {
        let coefficient = ortho.mu(&vector, j)?;
        residual = residual - ortho.vectors()[j].scale(&coefficient);
        coefficients.push(coefficient);
    }
    if !residual.is_zero() {
        return Ok(None);
    }
    // basis[i] = ortho[i] + Σ_{j<i} mu(i, j) * ortho[j], solve the
    // triangular system from the last coordinate down
    let mut coordinates = vec![BigRational::zero(); basis.len()];
    for j in (0..basis.len()).rev() {
        let mut coordinate = coefficients[j].clone();
        for i in j + 1..basis.len() {
            coordinate -= &coordinates[i] * ortho.mu(&basis[i], j)?;
        }
        coordinates[j] = coordinate;
    }
    if !coordinates.iter().all(BigRational::is_integer) {
        return Ok(None);
    }
    Ok(Some(
        coordinates
            .iter()
            .map(BigRational::to_integer)
            .collect(),
    ))
}
