// SPDX-License-Identifier: LGPL-2.1-or-later
// See Notices.txt for copyright information

use super::check_full_rank_shape;
use super::to_rational_basis;
use super::GramSchmidt;
use super::LatticeError;
use super::ReductionParameters;
use super::ONE_HALF;
use crate::rational_vector::RationalVector;
use crate::util::round_half_away_from_zero;
use log::debug;
use log::trace;
use log::warn;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Signed;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ReductionStats {
    /// main-loop iterations, one per size-reduction pass and Lovász test
    pub iterations: usize,
    /// `basis[k] -= round(mu) * basis[j]` steps
    pub size_reductions: usize,
    pub swaps: usize,
    pub gram_schmidt_updates: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReducedBasis {
    pub basis: Vec<Vec<BigInt>>,
    pub stats: ReductionStats,
}

/// LLL reduction state for one basis
///
/// The basis is only ever changed by subtracting an integer multiple of an
/// earlier basis vector or by swapping adjacent vectors, so it always spans
/// the input lattice.
#[derive(Clone, Debug)]
pub struct Reducer {
    basis: Vec<RationalVector>,
    ortho: GramSchmidt,
    parameters: ReductionParameters,
    /// index of the vector being reduced, `1 <= k <= basis.len()`
    k: usize,
    stats: ReductionStats,
}

impl Reducer {
    /// validates `basis` and computes its initial orthogonalization
    pub fn new<T: Clone + Into<BigInt>, V: AsRef<[T]>>(
        basis: &[V],
        parameters: ReductionParameters,
    ) -> Result<Self, LatticeError> {
        let basis = to_rational_basis(basis)?;
        check_full_rank_shape(&basis)?;
        if !parameters.is_delta_conventional() {
            warn!(
                "delta = {} is outside (1/4, 1): termination and reduction quality aren't guaranteed",
                parameters.delta
            );
        }
        let ortho = GramSchmidt::new(&basis)?;
        if let Some(index) = ortho.first_zero_index() {
            return Err(LatticeError::DegenerateBasis { index });
        }
        Ok(Self {
            basis,
            ortho,
            parameters,
            k: 1,
            stats: ReductionStats {
                gram_schmidt_updates: 1,
                ..ReductionStats::default()
            },
        })
    }
    pub fn basis(&self) -> &[RationalVector] {
        &self.basis
    }
    pub fn orthogonal_basis(&self) -> &GramSchmidt {
        &self.ortho
    }
    pub fn parameters(&self) -> &ReductionParameters {
        &self.parameters
    }
    pub fn stats(&self) -> ReductionStats {
        self.stats
    }
    pub fn is_finished(&self) -> bool {
        self.k >= self.basis.len()
    }
    fn mu(&self, i: usize, j: usize) -> Result<BigRational, LatticeError> {
        debug_assert!(j < i);
        self.ortho.mu(&self.basis[i], j)
    }
    fn basis_changed(&mut self, index: usize) -> Result<(), LatticeError> {
        let start = if self.parameters.incremental_gram_schmidt {
            index
        } else {
            0
        };
        self.stats.gram_schmidt_updates += 1;
        self.ortho.recompute_from(&self.basis, start)
    }
    /// size-reduces `basis[k]` against `basis[k - 1]`, ..., `basis[0]`, in
    /// that order
    fn size_reduce(&mut self) -> Result<(), LatticeError> {
        let k = self.k;
        for j in (0..k).rev() {
            let mu = self.mu(k, j)?;
            if mu.abs() > *ONE_HALF {
                let multiplier = BigRational::from_integer(round_half_away_from_zero(&mu));
                trace!("k={} j={} mu={} multiplier={}", k, j, mu, multiplier);
                let reduced = &self.basis[k] - self.basis[j].scale(&multiplier);
                self.basis[k] = reduced;
                self.stats.size_reductions += 1;
                self.basis_changed(k)?;
            }
        }
        Ok(())
    }
    fn lovasz_condition_holds(&self) -> Result<bool, LatticeError> {
        let k = self.k;
        let mu = self.mu(k, k - 1)?;
        let bound = (&self.parameters.delta - &mu * &mu) * self.ortho.squared_norm(k - 1);
        Ok(*self.ortho.squared_norm(k) >= bound)
    }
    /// runs one size-reduction pass and Lovász test; returns `true` once the
    /// basis is reduced
    pub fn step(&mut self) -> Result<bool, LatticeError> {
        if self.is_finished() {
            return Ok(true);
        }
        if let Some(limit) = self.parameters.max_iterations {
            if self.stats.iterations >= limit {
                return Err(LatticeError::IterationLimitExceeded { limit });
            }
        }
        self.stats.iterations += 1;
        self.size_reduce()?;
        let k = self.k;
        if self.lovasz_condition_holds()? {
            self.k = k + 1;
        } else {
            trace!("k={} swapping basis vectors {} and {}", k, k - 1, k);
            self.basis.swap(k - 1, k);
            self.stats.swaps += 1;
            self.basis_changed(k - 1)?;
            self.k = (k - 1).max(1);
        }
        Ok(self.is_finished())
    }
    pub fn run(mut self) -> Result<ReducedBasis, LatticeError> {
        debug!(
            "reducing {} vectors of dimension {} with delta = {}",
            self.basis.len(),
            self.basis[0].len(),
            self.parameters.delta
        );
        while !self.step()? {}
        debug!("reduction finished: {:?}", self.stats);
        Ok(self.into_reduced_basis())
    }
    fn into_reduced_basis(self) -> ReducedBasis {
        let basis = self
            .basis
            .iter()
            .map(|vector| {
                vector.to_integers().unwrap_or_else(|err| {
                    unreachable!("unimodular reduction produced a non-integer: {}", err)
                })
            })
            .collect();
        ReducedBasis {
            basis,
            stats: self.stats,
        }
    }
}
