// SPDX-License-Identifier: LGPL-2.1-or-later
// See Notices.txt for copyright information

//! Lenstra–Lenstra–Lovász lattice basis reduction with exact rational
//! arithmetic.
//!
//! The input basis is a list of linearly independent integer vectors. The
//! result spans the same lattice, with shorter and more nearly orthogonal
//! vectors. All intermediate values are arbitrary-precision rationals, so
//! results don't depend on the size of the input entries.

pub mod lattice;
pub mod prelude;
mod python;
pub mod rational_vector;
pub mod util;

pub use crate::lattice::reduce;
pub use crate::lattice::reduce_with_parameters;
pub use crate::lattice::LatticeError;
pub use crate::lattice::ReductionParameters;
pub use crate::rational_vector::RationalVector;
