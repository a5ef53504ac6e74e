// SPDX-License-Identifier: LGPL-2.1-or-later
// See Notices.txt for copyright information

#![cfg(feature = "python")]

use crate::lattice::gram_schmidt;
use crate::lattice::reduce_with_parameters;
use crate::lattice::to_rational_basis;
use crate::lattice::LatticeError;
use crate::lattice::ReductionParameters;
use num_bigint::BigInt;
use pyo3::exceptions::PyValueError;
use pyo3::exceptions::PyZeroDivisionError;
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

impl From<LatticeError> for PyErr {
    fn from(err: LatticeError) -> PyErr {
        match err {
            LatticeError::DegenerateBasis { .. } => PyZeroDivisionError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

/// LLL-reduces `basis`, returning the reduced basis as lists of ints
#[pyfunction]
#[pyo3(text_signature = "(basis, delta)")]
fn reduction(py: Python, basis: Vec<Vec<BigInt>>, delta: f64) -> PyResult<Vec<Vec<BigInt>>> {
    let parameters = ReductionParameters::default().with_delta_f64(delta)?;
    let reduced = py.allow_threads(|| reduce_with_parameters(&basis, &parameters))?;
    Ok(reduced.basis)
}

/// unnormalized Gram–Schmidt orthogonalization of `basis`, each element as
/// a `(numerator, denominator)` pair
#[pyfunction]
#[pyo3(text_signature = "(basis)")]
fn gramschmidt(py: Python, basis: Vec<Vec<BigInt>>) -> PyResult<Vec<Vec<(BigInt, BigInt)>>> {
    let ortho = py.allow_threads(|| -> Result<_, LatticeError> {
        gram_schmidt(&to_rational_basis(&basis)?)
    })?;
    Ok(ortho
        .into_iter()
        .map(|vector| vector.into_iter().map(Into::into).collect())
        .collect())
}

#[pymodule]
fn olll(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(reduction, m)?)?;
    m.add_function(wrap_pyfunction!(gramschmidt, m)?)?;
    Ok(())
}
