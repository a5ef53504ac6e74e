// SPDX-License-Identifier: LGPL-2.1-or-later
// See Notices.txt for copyright information

use crate::util::DebugAsDisplay;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;
use std::error::Error;
use std::fmt;
use std::iter::FromIterator;
use std::ops::Index;
use std::ops::Mul;
use std::ops::Neg;
use std::ops::Sub;
use std::slice;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DivisionByZero;

impl fmt::Display for DivisionByZero {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "can't project onto the zero vector")
    }
}

impl Error for DivisionByZero {}

impl From<DivisionByZero> for std::io::Error {
    fn from(err: DivisionByZero) -> Self {
        Self::new(std::io::ErrorKind::InvalidInput, err)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NonIntegralValue {
    /// index of the first element that isn't an integer
    pub index: usize,
    pub value: BigRational,
}

impl fmt::Display for NonIntegralValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "vector element {} is not an integer: {}",
            self.index, self.value
        )
    }
}

impl Error for NonIntegralValue {}

impl From<NonIntegralValue> for std::io::Error {
    fn from(err: NonIntegralValue) -> Self {
        Self::new(std::io::ErrorKind::InvalidData, err)
    }
}

/// fixed-length vector of exact rational numbers
///
/// Arithmetic never mutates its operands, it always produces a new vector.
/// Combining two vectors of different lengths is a precondition violation
/// and panics.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct RationalVector {
    elements: Vec<BigRational>,
}

impl RationalVector {
    pub fn new(elements: Vec<BigRational>) -> Self {
        Self { elements }
    }
    pub fn zeros(len: usize) -> Self {
        Self {
            elements: vec![BigRational::zero(); len],
        }
    }
    pub fn from_integers<T: Into<BigInt>, I: IntoIterator<Item = T>>(elements: I) -> Self {
        elements
            .into_iter()
            .map(|element| BigRational::from_integer(element.into()))
            .collect()
    }
    pub fn len(&self) -> usize {
        self.elements.len()
    }
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
    pub fn iter(&self) -> slice::Iter<'_, BigRational> {
        self.elements.iter()
    }
    pub fn elements(&self) -> &[BigRational] {
        &self.elements
    }
    pub fn into_elements(self) -> Vec<BigRational> {
        self.elements
    }
    fn require_matching_len(&self, rhs: &Self) {
        assert_eq!(self.len(), rhs.len(), "vector dimensions don't match");
    }
    /// exact inner product `Σ self[i] * rhs[i]`
    pub fn dot(&self, rhs: &Self) -> BigRational {
        self.require_matching_len(rhs);
        self.iter()
            .zip(rhs.iter())
            .fold(BigRational::zero(), |sum, (l, r)| sum + l * r)
    }
    /// squared norm, `self.dot(self)`
    pub fn sdot(&self) -> BigRational {
        self.dot(self)
    }
    pub fn is_zero(&self) -> bool {
        self.iter().all(Zero::is_zero)
    }
    pub fn scale(&self, factor: &BigRational) -> Self {
        self.iter().map(|element| element * factor).collect()
    }
    /// coefficient `c` such that `c * self` is the projection of `rhs` onto `self`
    pub fn projection_coefficient(&self, rhs: &Self) -> Result<BigRational, DivisionByZero> {
        self.projection_coefficient_with_sdot(rhs, &self.sdot())
    }
    /// same as [`projection_coefficient`](Self::projection_coefficient), but
    /// with `self.sdot()` supplied by the caller
    pub fn projection_coefficient_with_sdot(
        &self,
        rhs: &Self,
        self_sdot: &BigRational,
    ) -> Result<BigRational, DivisionByZero> {
        debug_assert_eq!(*self_sdot, self.sdot());
        if self_sdot.is_zero() {
            return Err(DivisionByZero);
        }
        Ok(self.dot(rhs) / self_sdot)
    }
    /// projection of `rhs` onto `self`
    pub fn project(&self, rhs: &Self) -> Result<Self, DivisionByZero> {
        Ok(self.scale(&self.projection_coefficient(rhs)?))
    }
    /// converts to integers, failing if any element has a denominator other than 1
    pub fn to_integers(&self) -> Result<Vec<BigInt>, NonIntegralValue> {
        self.iter()
            .enumerate()
            .map(|(index, element)| {
                if element.is_integer() {
                    Ok(element.to_integer())
                } else {
                    Err(NonIntegralValue {
                        index,
                        value: element.clone(),
                    })
                }
            })
            .collect()
    }
}

impl fmt::Debug for RationalVector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list()
            .entries(self.iter().map(DebugAsDisplay))
            .finish()
    }
}

impl fmt::Display for RationalVector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;
        for (index, element) in self.iter().enumerate() {
            if index != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", element)?;
        }
        write!(f, "]")
    }
}

impl From<Vec<BigRational>> for RationalVector {
    fn from(elements: Vec<BigRational>) -> Self {
        Self { elements }
    }
}

impl From<RationalVector> for Vec<BigRational> {
    fn from(vector: RationalVector) -> Self {
        vector.elements
    }
}

impl FromIterator<BigRational> for RationalVector {
    fn from_iter<I: IntoIterator<Item = BigRational>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RationalVector {
    type Item = &'a BigRational;
    type IntoIter = slice::Iter<'a, BigRational>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for RationalVector {
    type Item = BigRational;
    type IntoIter = std::vec::IntoIter<BigRational>;
    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl Index<usize> for RationalVector {
    type Output = BigRational;
    fn index(&self, index: usize) -> &BigRational {
        &self.elements[index]
    }
}

impl Neg for &'_ RationalVector {
    type Output = RationalVector;
    fn neg(self) -> RationalVector {
        self.iter().map(|element| -element).collect()
    }
}

impl Neg for RationalVector {
    type Output = RationalVector;
    fn neg(self) -> RationalVector {
        -&self
    }
}

fn sub_impl(lhs: &RationalVector, rhs: &RationalVector) -> RationalVector {
    lhs.require_matching_len(rhs);
    lhs.iter().zip(rhs.iter()).map(|(l, r)| l - r).collect()
}

macro_rules! impl_vector_sub {
    ($lhs:ty, $rhs:ty) => {
        impl Sub<$rhs> for $lhs {
            type Output = RationalVector;
            #[allow(clippy::needless_borrow)]
            fn sub(self, rhs: $rhs) -> RationalVector {
                sub_impl(&self, &rhs)
            }
        }
    };
}

impl_vector_sub!(RationalVector, RationalVector);
impl_vector_sub!(RationalVector, &'_ RationalVector);
impl_vector_sub!(&'_ RationalVector, RationalVector);
impl_vector_sub!(&'_ RationalVector, &'_ RationalVector);

macro_rules! impl_vector_scale {
    ($vector:ty, $scalar:ty) => {
        impl Mul<$scalar> for $vector {
            type Output = RationalVector;
            #[allow(clippy::needless_borrow)]
            fn mul(self, rhs: $scalar) -> RationalVector {
                RationalVector::scale(&self, &rhs)
            }
        }

        impl Mul<$vector> for $scalar {
            type Output = RationalVector;
            #[allow(clippy::needless_borrow)]
            fn mul(self, rhs: $vector) -> RationalVector {
                RationalVector::scale(&rhs, &self)
            }
        }
    };
}

impl_vector_scale!(RationalVector, BigRational);
impl_vector_scale!(RationalVector, &'_ BigRational);
impl_vector_scale!(&'_ RationalVector, BigRational);
impl_vector_scale!(&'_ RationalVector, &'_ BigRational);
