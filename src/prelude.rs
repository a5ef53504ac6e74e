// SPDX-License-Identifier: LGPL-2.1-or-later
// See Notices.txt for copyright information
pub use crate::{
    lattice::{
        gram_schmidt, reduce, reduce_with_parameters, GramSchmidt, LatticeError, ReducedBasis,
        ReductionParameters, Reducer,
    },
    rational_vector::RationalVector,
};
pub use num_traits::{One as _, Signed as _, Zero as _};
