//! Persisted record layout and its validation

use crate::algebra::{Orientation, Polynomial, PolynomialAlgebra, Tree};
use crate::{IndPolyError, Result};
use serde::{Deserialize, Serialize};

/// One stored tree: canonical edge set and its independence polynomial
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedPolynomialRecord {
    /// Auto-assigned primary key
    pub id: u64,
    /// JSON list of vertex pairs of the canonical tree; unique
    pub edge_set: String,
    /// Text form of the polynomial, e.g. `3*x**2 + 4*x + 1`
    pub polynomial: String,
    /// JSON list of coefficients, highest degree first
    pub coefficients: String,
    /// Polynomial degree, the tree's independence number
    pub degree: usize,
    /// Number of vertices of the tree
    pub order: usize,
}

/// A record before the store assigns its id
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewRecord {
    /// JSON list of vertex pairs
    pub edge_set: String,
    /// Text form of the polynomial
    pub polynomial: String,
    /// JSON list of descending coefficients
    pub coefficients: String,
    /// Polynomial degree
    pub degree: usize,
    /// Number of vertices
    pub order: usize,
}

impl NewRecord {
    /// Describe a canonical tree and its polynomial
    pub fn new(tree: &Tree, polynomial: &Polynomial, algebra: &PolynomialAlgebra) -> Result<Self> {
        let coefficients = algebra.coefficients_desc(polynomial);
        Ok(NewRecord {
            edge_set: tree.edge_set_key(),
            polynomial: algebra.render(polynomial),
            coefficients: serde_json::to_string(&coefficients)?,
            degree: polynomial.degree(),
            order: tree.order(),
        })
    }

    pub(crate) fn with_id(self, id: u64) -> CachedPolynomialRecord {
        CachedPolynomialRecord {
            id,
            edge_set: self.edge_set,
            polynomial: self.polynomial,
            coefficients: self.coefficients,
            degree: self.degree,
            order: self.order,
        }
    }
}

impl CachedPolynomialRecord {
    /// Descending coefficient list, checked against `degree`
    pub fn coefficient_list(&self) -> Result<Vec<u64>> {
        let coeffs: Vec<u64> = serde_json::from_str(&self.coefficients)
            .map_err(|e| self.malformed(format!("coefficients '{}': {}", self.coefficients, e)))?;

        if coeffs.len() != self.degree + 1 {
            return Err(self.malformed(format!(
                "{} coefficients for degree {}",
                coeffs.len(),
                self.degree
            )));
        }
        if coeffs.len() > 1 && coeffs[0] == 0 {
            return Err(self.malformed("leading coefficient is zero".to_string()));
        }

        Ok(coeffs)
    }

    /// Validate the record and return its polynomial
    ///
    /// The polynomial text must agree with the coefficient list.
    pub fn decode(&self, algebra: &PolynomialAlgebra) -> Result<Polynomial> {
        let coeffs = self.coefficient_list()?;
        let from_coeffs = algebra.rebuild_from_coefficients(&coeffs, Orientation::Descending);

        let from_text = algebra
            .parse(&self.polynomial)
            .map_err(|e| self.malformed(e.to_string()))?;
        if from_text != from_coeffs {
            return Err(self.malformed(format!(
                "polynomial '{}' disagrees with coefficients {}",
                self.polynomial, self.coefficients
            )));
        }

        Ok(from_coeffs)
    }

    /// The stored edge set as vertex pairs
    pub fn edge_pairs(&self) -> Result<Vec<(usize, usize)>> {
        serde_json::from_str(&self.edge_set)
            .map_err(|e| self.malformed(format!("edge set '{}': {}", self.edge_set, e)))
    }

    fn malformed(&self, reason: String) -> IndPolyError {
        IndPolyError::MalformedRecord { id: self.id, reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p4_record() -> CachedPolynomialRecord {
        let alg = PolynomialAlgebra::default();
        let tree = Tree::from_edges(4, vec![(0, 1), (1, 2), (2, 3)]).unwrap();
        let poly = Polynomial::from_descending(&[3, 4, 1]);
        NewRecord::new(&tree, &poly, &alg).unwrap().with_id(7)
    }

    #[test]
    fn test_new_record_fields() {
        let record = p4_record();
        assert_eq!(record.edge_set, "[[0,1],[1,2],[2,3]]");
        assert_eq!(record.polynomial, "3*x**2 + 4*x + 1");
        assert_eq!(record.coefficients, "[3,4,1]");
        assert_eq!(record.degree, 2);
        assert_eq!(record.order, 4);
        assert_eq!(record.edge_pairs().unwrap(), vec![(0, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn test_decode_roundtrip() {
        let alg = PolynomialAlgebra::default();
        let record = p4_record();
        let poly = record.decode(&alg).unwrap();
        assert_eq!(alg.coefficients_desc(&poly), record.coefficient_list().unwrap());
    }

    #[test]
    fn test_decode_accepts_spaced_coefficients() {
        let alg = PolynomialAlgebra::default();
        let mut record = p4_record();
        record.coefficients = "[3, 4, 1]".to_string();
        assert!(record.decode(&alg).is_ok());
    }

    #[test]
    fn test_malformed_coefficients() {
        let alg = PolynomialAlgebra::default();

        let mut garbage = p4_record();
        garbage.coefficients = "[3, four, 1]".to_string();
        assert!(matches!(garbage.decode(&alg), Err(IndPolyError::MalformedRecord { id: 7, .. })));

        let mut short = p4_record();
        short.degree = 3;
        assert!(matches!(short.decode(&alg), Err(IndPolyError::MalformedRecord { .. })));

        let mut leading_zero = p4_record();
        leading_zero.coefficients = "[0,3,4,1]".to_string();
        leading_zero.degree = 3;
        assert!(leading_zero.decode(&alg).is_err());
    }

    #[test]
    fn test_polynomial_text_must_agree() {
        let alg = PolynomialAlgebra::default();
        let mut record = p4_record();
        record.polynomial = "3*x**2 + 5*x + 1".to_string();
        assert!(matches!(record.decode(&alg), Err(IndPolyError::MalformedRecord { .. })));

        record.polynomial = "not a polynomial".to_string();
        assert!(record.decode(&alg).is_err());
    }
}
