//! Dense univariate polynomials with non-negative integer coefficients
//!
//! Coefficients are kept in ascending degree order internally; the store and
//! the recurrence work with descending lists, so every conversion names its
//! [`Orientation`] explicitly.

use crate::{IndPolyError, Result};
use serde::{Deserialize, Serialize};

/// Direction of a coefficient list
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// Constant term first
    Ascending,
    /// Highest-degree term first
    Descending,
}

/// A polynomial in one indeterminate
///
/// Invariant: no zero coefficient above the leading term, except that the
/// zero polynomial is stored as `[0]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<u64>", into = "Vec<u64>")]
pub struct Polynomial {
    coeffs: Vec<u64>,
}

impl Polynomial {
    /// The multiplicative identity `1`
    pub fn one() -> Self {
        Polynomial { coeffs: vec![1] }
    }

    /// A constant polynomial
    pub fn constant(c: u64) -> Self {
        Polynomial { coeffs: vec![c] }
    }

    /// Build from coefficients listed constant term first
    pub fn from_ascending(mut coeffs: Vec<u64>) -> Self {
        while coeffs.len() > 1 && coeffs.last() == Some(&0) {
            coeffs.pop();
        }
        if coeffs.is_empty() {
            coeffs.push(0);
        }
        Polynomial { coeffs }
    }

    /// Build from coefficients listed highest degree first
    pub fn from_descending(coeffs: &[u64]) -> Self {
        Self::from_ascending(coeffs.iter().rev().copied().collect())
    }

    /// Degree (0 for constants, including zero)
    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    /// Check for the zero polynomial
    pub fn is_zero(&self) -> bool {
        self.coeffs == [0]
    }

    /// Coefficient of `x^0`
    pub fn constant_term(&self) -> u64 {
        self.coeffs[0]
    }

    /// Coefficient of `x^k` (zero beyond the degree)
    pub fn coefficient(&self, k: usize) -> u64 {
        self.coeffs.get(k).copied().unwrap_or(0)
    }

    /// Coefficients, constant term first
    pub fn coefficients_ascending(&self) -> &[u64] {
        &self.coeffs
    }

    /// Coefficients, highest degree first, with explicit zeros for gaps
    pub fn coefficients_descending(&self) -> Vec<u64> {
        self.coeffs.iter().rev().copied().collect()
    }

    /// Value at a non-negative integer point; at 1 this counts all independent sets
    pub fn evaluate(&self, at: u64) -> Option<u64> {
        self.coeffs
            .iter()
            .rev()
            .try_fold(0u64, |acc, &c| acc.checked_mul(at)?.checked_add(c))
    }

    /// Product, or `None` on overflow
    pub fn checked_mul(&self, other: &Polynomial) -> Option<Polynomial> {
        let mut coeffs = vec![0u64; self.coeffs.len() + other.coeffs.len() - 1];
        for (i, &a) in self.coeffs.iter().enumerate() {
            for (j, &b) in other.coeffs.iter().enumerate() {
                coeffs[i + j] = coeffs[i + j].checked_add(a.checked_mul(b)?)?;
            }
        }
        Some(Self::from_ascending(coeffs))
    }
}

impl From<Vec<u64>> for Polynomial {
    fn from(coeffs: Vec<u64>) -> Self {
        Self::from_ascending(coeffs)
    }
}

impl From<Polynomial> for Vec<u64> {
    fn from(poly: Polynomial) -> Self {
        poly.coeffs
    }
}

impl Default for Polynomial {
    fn default() -> Self {
        Self::one()
    }
}

/// Branch coefficient lists after the fixed shifts and left-padding
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlignedBranches {
    /// `I(T - v)` with a zero prepended, then padded
    pub vertex_deleted: Vec<u64>,
    /// `I(T - N[v])` with a zero appended, then padded
    pub neighborhood_deleted: Vec<u64>,
}

/// Polynomial arithmetic and text form over a fixed indeterminate
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolynomialAlgebra {
    indeterminate: String,
}

impl PolynomialAlgebra {
    /// Create an algebra over the given indeterminate name
    pub fn new(indeterminate: impl Into<String>) -> Self {
        PolynomialAlgebra {
            indeterminate: indeterminate.into(),
        }
    }

    /// Name of the indeterminate
    pub fn indeterminate(&self) -> &str {
        &self.indeterminate
    }

    /// Multiply all factors together
    ///
    /// There is no implicit identity: an empty input is an error.
    pub fn multiply(&self, polys: &[Polynomial]) -> Result<Polynomial> {
        let (first, rest) = polys.split_first().ok_or_else(|| {
            IndPolyError::AlgebraError("Cannot multiply an empty list of polynomials".to_string())
        })?;

        rest.iter().try_fold(first.clone(), |acc, p| {
            acc.checked_mul(p).ok_or_else(overflow)
        })
    }

    /// Coefficients from the highest-degree term down to the constant
    pub fn coefficients_desc(&self, poly: &Polynomial) -> Vec<u64> {
        poly.coefficients_descending()
    }

    /// Rebuild a polynomial from a coefficient list in the given orientation
    pub fn rebuild_from_coefficients(
        &self,
        coeffs: &[u64],
        orientation: Orientation,
    ) -> Polynomial {
        match orientation {
            Orientation::Ascending => Polynomial::from_ascending(coeffs.to_vec()),
            Orientation::Descending => Polynomial::from_descending(coeffs),
        }
    }

    /// Apply the recurrence's degree alignment to the two descending branch lists
    ///
    /// The vertex-deleted list gets a zero at its highest-degree end, the
    /// neighborhood-deleted list a zero at its constant end (the `x *`
    /// multiplier), then the shorter list is left-padded with zeros.
    pub fn align_branches(
        &self,
        vertex_deleted: &[u64],
        neighborhood_deleted: &[u64],
    ) -> AlignedBranches {
        let mut a = Vec::with_capacity(vertex_deleted.len() + 1);
        a.push(0);
        a.extend_from_slice(vertex_deleted);

        let mut b = neighborhood_deleted.to_vec();
        b.push(0);

        let width = a.len().max(b.len());
        AlignedBranches {
            vertex_deleted: left_pad(a, width),
            neighborhood_deleted: left_pad(b, width),
        }
    }

    /// Element-wise sum of two aligned descending lists
    pub fn sum_aligned(&self, aligned: &AlignedBranches) -> Result<Vec<u64>> {
        let a = &aligned.vertex_deleted;
        let b = &aligned.neighborhood_deleted;
        if a.len() != b.len() {
            return Err(IndPolyError::AlgebraError(format!(
                "Branch lists misaligned: {} vs {} coefficients",
                a.len(),
                b.len()
            )));
        }

        a.iter()
            .zip(b)
            .map(|(x, y)| x.checked_add(*y).ok_or_else(overflow))
            .collect()
    }

    /// Text form in descending degree, e.g. `3*x**2 + 4*x + 1`
    pub fn render(&self, poly: &Polynomial) -> String {
        if poly.is_zero() {
            return "0".to_string();
        }

        let x = &self.indeterminate;
        let terms: Vec<String> = poly
            .coefficients_ascending()
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, c)| **c != 0)
            .map(|(k, &c)| match (k, c) {
                (0, c) => c.to_string(),
                (1, 1) => x.clone(),
                (1, c) => format!("{}*{}", c, x),
                (k, 1) => format!("{}**{}", x, k),
                (k, c) => format!("{}*{}**{}", c, x, k),
            })
            .collect();

        terms.join(" + ")
    }

    /// Parse the text form produced by [`render`](Self::render)
    pub fn parse(&self, text: &str) -> Result<Polynomial> {
        let text = text.trim();
        if text.is_empty() {
            return Err(malformed(text, "empty expression"));
        }

        let mut coeffs: Vec<u64> = Vec::new();
        for term in text.split('+') {
            let (coeff, degree) = self.parse_term(term.trim(), text)?;
            if coeffs.len() <= degree {
                coeffs.resize(degree + 1, 0);
            }
            coeffs[degree] = coeffs[degree].checked_add(coeff).ok_or_else(overflow)?;
        }

        Ok(Polynomial::from_ascending(coeffs))
    }

    fn parse_term(&self, term: &str, whole: &str) -> Result<(u64, usize)> {
        let x = self.indeterminate.as_str();
        let (coeff_text, power_text) = match term.split_once('*') {
            // `x**k` splits at the first `*` into ("x", "*k")
            Some((head, tail)) if head == x => ("1", Some(format!("{}*{}", head, tail))),
            Some((head, tail)) => (head, Some(tail.to_string())),
            None if term == x => ("1", Some(x.to_string())),
            None => (term, None),
        };

        let coeff: u64 = coeff_text
            .trim()
            .parse()
            .map_err(|_| malformed(whole, &format!("bad coefficient '{}'", coeff_text)))?;

        let degree = match power_text {
            None => 0,
            Some(power) => {
                let power = power.trim();
                match power.strip_prefix(x) {
                    Some("") => 1,
                    Some(rest) => rest
                        .strip_prefix("**")
                        .and_then(|k| k.trim().parse().ok())
                        .ok_or_else(|| malformed(whole, &format!("bad power '{}'", power)))?,
                    None => {
                        return Err(malformed(whole, &format!("unknown factor '{}'", power)));
                    }
                }
            }
        };

        Ok((coeff, degree))
    }
}

impl Default for PolynomialAlgebra {
    fn default() -> Self {
        Self::new("x")
    }
}

fn left_pad(mut coeffs: Vec<u64>, width: usize) -> Vec<u64> {
    if coeffs.len() < width {
        let mut padded = vec![0; width - coeffs.len()];
        padded.append(&mut coeffs);
        padded
    } else {
        coeffs
    }
}

fn overflow() -> IndPolyError {
    IndPolyError::AlgebraError("Coefficient overflow".to_string())
}

fn malformed(text: &str, reason: &str) -> IndPolyError {
    IndPolyError::AlgebraError(format!("Cannot parse polynomial '{}': {}", text, reason))
}
