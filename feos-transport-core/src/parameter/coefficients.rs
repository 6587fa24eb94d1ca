use super::{InteractionCoefficient, InteractionRecord};
use crate::errors::{TransportError, TransportResult};
use crate::si::RGAS;
use crate::state::MixtureState;
use ndarray::Array2;
use tracing::debug;

/// Interaction matrices of a polynomial coefficient, indexed by polynomial order.
///
/// The family grows on demand: requesting an order beyond the current length
/// appends zero-filled matrices. All matrices share the same dimension.
#[derive(Clone, Debug, PartialEq)]
pub struct CoefficientFamily {
    components: usize,
    orders: Vec<Array2<f64>>,
}

impl CoefficientFamily {
    pub fn new(components: usize) -> Self {
        Self {
            components,
            orders: Vec::new(),
        }
    }

    pub fn components(&self) -> usize {
        self.components
    }

    /// Number of polynomial orders.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Interaction matrix of order `k`.
    pub fn order(&self, k: usize) -> Option<&Array2<f64>> {
        self.orders.get(k)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Array2<f64>> {
        self.orders.iter()
    }

    /// Extend the family with zero matrices up to `orders` polynomial orders.
    pub fn grow(&mut self, orders: usize) {
        let n = self.components;
        while self.orders.len() < orders {
            self.orders.push(Array2::zeros((n, n)));
        }
    }

    /// Set the polynomial coefficients of the pair `(i, j)`.
    ///
    /// Coefficients are multiplied by `scale`. Only the entry `[i, j]` is
    /// written.
    pub fn insert(&mut self, i: usize, j: usize, coefficients: &[f64], scale: f64) {
        self.grow(coefficients.len());
        for (m, c) in self.orders.iter_mut().zip(coefficients) {
            m[[i, j]] = c * scale;
        }
    }

    /// Evaluate `sum_k M_k[i, j] x^k`.
    pub fn polynomial(&self, i: usize, j: usize, x: f64) -> f64 {
        self.orders
            .iter()
            .enumerate()
            .map(|(k, m)| m[[i, j]] * x.powi(k as i32))
            .sum()
    }

    /// Check that all matrices of the family have the expected dimension.
    pub fn check_dimensions(&self) -> TransportResult<()> {
        let n = self.components;
        match self.orders.iter().find(|m| m.dim() != (n, n)) {
            Some(m) => Err(TransportError::IncompatibleComponents(n, m.nrows())),
            None => Ok(()),
        }
    }
}

/// Pairwise interaction parameters of a mixing rule.
///
/// `a_ij`, `b_ij`, `h_ij` and `s_ij` are polynomial families that are stored
/// as given for the ordered pair (speciesA, speciesB). `d_ij` and `e_ij` are
/// single matrices that are filled symmetrically. Energy-valued coefficients
/// (`e_ij`, `h_ij`, `s_ij`) are stored divided by the gas constant.
#[derive(Clone, Debug, PartialEq)]
pub struct InteractionCoefficients {
    pub a_ij: CoefficientFamily,
    pub b_ij: CoefficientFamily,
    pub h_ij: CoefficientFamily,
    pub s_ij: CoefficientFamily,
    pub d_ij: Array2<f64>,
    pub e_ij: Array2<f64>,
}

impl InteractionCoefficients {
    /// Interaction parameters without any interactions.
    pub fn new(components: usize) -> Self {
        Self {
            a_ij: CoefficientFamily::new(components),
            b_ij: CoefficientFamily::new(components),
            h_ij: CoefficientFamily::new(components),
            s_ij: CoefficientFamily::new(components),
            d_ij: Array2::zeros((components, components)),
            e_ij: Array2::zeros((components, components)),
        }
    }

    /// Build the interaction parameters from a list of interaction records.
    ///
    /// Species names are resolved with the given state.
    pub fn from_records(
        state: &dyn MixtureState,
        records: &[InteractionRecord],
    ) -> TransportResult<Self> {
        let mut coefficients = Self::new(state.components());
        for record in records {
            if record.element.to_lowercase() != "interaction" {
                return Err(TransportError::Configuration(format!(
                    "expected <interaction> element and got <{}>",
                    record.element
                )));
            }
            let i = species_index(state, &record.species_a)?;
            let j = species_index(state, &record.species_b)?;
            for (coefficient, value) in record.parse_coefficients()? {
                let poly = value.to_si(coefficient.conversion())?;
                coefficients.insert(coefficient, i, j, &poly);
            }
        }
        Ok(coefficients)
    }

    pub fn components(&self) -> usize {
        self.d_ij.nrows()
    }

    /// Insert coefficients in SI units for the pair `(i, j)`.
    pub fn insert(
        &mut self,
        coefficient: InteractionCoefficient,
        i: usize,
        j: usize,
        poly: &[f64],
    ) {
        let scale = if coefficient.is_energy() {
            1.0 / RGAS
        } else {
            1.0
        };
        if coefficient.is_symmetric() {
            let m = match coefficient {
                InteractionCoefficient::D => &mut self.d_ij,
                _ => &mut self.e_ij,
            };
            let value = poly.first().copied().unwrap_or(0.0) * scale;
            m[[i, j]] = value;
            m[[j, i]] = value;
            return;
        }
        let family = match coefficient {
            InteractionCoefficient::A => &mut self.a_ij,
            InteractionCoefficient::B => &mut self.b_ij,
            InteractionCoefficient::H => &mut self.h_ij,
            _ => &mut self.s_ij,
        };
        let len = family.len();
        family.insert(i, j, poly, scale);
        if family.len() > len {
            debug!(
                "{} coefficients extended to polynomial order {}",
                coefficient,
                family.len() - 1
            );
        }
    }

    /// Check that all stored matrices match the number of components.
    pub fn check_dimensions(&self, components: usize) -> TransportResult<()> {
        if self.components() != components {
            return Err(TransportError::IncompatibleComponents(
                self.components(),
                components,
            ));
        }
        self.a_ij.check_dimensions()?;
        self.b_ij.check_dimensions()?;
        self.h_ij.check_dimensions()?;
        self.s_ij.check_dimensions()
    }
}

fn species_index(state: &dyn MixtureState, name: &str) -> TransportResult<usize> {
    state
        .species_index(name)
        .ok_or_else(|| TransportError::Configuration(format!("Unknown species {name}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameter::CoefficientRecord;
    use crate::state::LiquidMixture;
    use approx::assert_relative_eq;
    use ndarray::arr1;
    use proptest::prelude::*;
    use serde_json::json;

    fn mixture() -> LiquidMixture {
        LiquidMixture::new(
            vec!["a".into(), "b".into(), "c".into()],
            arr1(&[18.0, 46.0, 32.0]),
            None,
            300.0,
            &arr1(&[0.2, 0.3, 0.5]),
            2e-5,
        )
        .unwrap()
    }

    #[test]
    fn family_growth() {
        let state = mixture();
        let records = vec![
            InteractionRecord::new("a", "b").with(InteractionCoefficient::A, 1.0),
            InteractionRecord::new("b", "c")
                .with(InteractionCoefficient::A, vec![1.0, 2.0, 3.0]),
        ];
        let c = InteractionCoefficients::from_records(&state, &records).unwrap();
        assert_eq!(c.a_ij.len(), 3);
        assert!(c.b_ij.is_empty());
        assert_eq!(c.a_ij.order(0).unwrap()[[0, 1]], 1.0);
        // higher orders of the first pair are zero-filled
        assert_eq!(c.a_ij.order(2).unwrap()[[0, 1]], 0.0);
        assert_eq!(c.a_ij.order(2).unwrap()[[1, 2]], 3.0);
        // polynomial families are stored one-sided
        assert_eq!(c.a_ij.order(0).unwrap()[[1, 0]], 0.0);
        assert_relative_eq!(c.a_ij.polynomial(1, 2, 0.5), 1.0 + 1.0 + 0.75);
        assert!(c.check_dimensions(3).is_ok());
        assert!(matches!(
            c.check_dimensions(2),
            Err(TransportError::IncompatibleComponents(3, 2))
        ));
    }

    #[test]
    fn energies_are_normalized() {
        let state = mixture();
        let records = vec![InteractionRecord::new("a", "c")
            .with(
                InteractionCoefficient::E,
                CoefficientRecord::scalar(2.0).with_units("kJ/mol"),
            )
            .with(InteractionCoefficient::H, vec![RGAS, 2.0 * RGAS])
            .with(InteractionCoefficient::D, 1e-9)];
        let c = InteractionCoefficients::from_records(&state, &records).unwrap();
        assert_relative_eq!(c.e_ij[[0, 2]], 2000.0 / RGAS);
        assert_relative_eq!(c.e_ij[[2, 0]], 2000.0 / RGAS);
        assert_relative_eq!(c.h_ij.order(1).unwrap()[[0, 2]], 2.0);
        assert_eq!(c.d_ij[[2, 0]], 1e-9);
    }

    #[test]
    fn unknown_species() {
        let state = mixture();
        let records = vec![InteractionRecord::new("a", "x").with(InteractionCoefficient::A, 1.0)];
        assert!(matches!(
            InteractionCoefficients::from_records(&state, &records),
            Err(TransportError::Configuration(msg)) if msg == "Unknown species x"
        ));
    }

    #[test]
    fn unknown_element() {
        let state = mixture();
        let mut record = InteractionRecord::new("a", "b");
        record.element = "reaction".into();
        assert!(matches!(
            InteractionCoefficients::from_records(&state, &[record]),
            Err(TransportError::Configuration(msg))
            if msg == "expected <interaction> element and got <reaction>"
        ));

        for (name, value) in [("Xij", json!(1.0)), ("note", json!("typo"))] {
            let mut record = InteractionRecord::new("a", "b");
            record.coefficients.insert(name.into(), value);
            assert!(matches!(
                InteractionCoefficients::from_records(&state, &[record]),
                Err(TransportError::Configuration(msg))
                if msg == format!("unknown interaction coefficient <{name}>")
            ));
        }
    }

    #[test]
    fn scalar_equals_single_coefficient_polynomial() {
        let state = mixture();
        for coefficient in [
            InteractionCoefficient::A,
            InteractionCoefficient::B,
            InteractionCoefficient::H,
            InteractionCoefficient::S,
            InteractionCoefficient::D,
            InteractionCoefficient::E,
        ] {
            let scalar = vec![InteractionRecord::new("b", "a").with(coefficient, 0.7)];
            let poly = vec![InteractionRecord::new("b", "a").with(coefficient, vec![0.7])];
            assert_eq!(
                InteractionCoefficients::from_records(&state, &scalar).unwrap(),
                InteractionCoefficients::from_records(&state, &poly).unwrap()
            );
        }
    }

    #[test]
    fn empty_polynomial_defaults_to_zero() {
        let state = mixture();
        let records = vec![InteractionRecord::new("a", "b").with(InteractionCoefficient::S, vec![])];
        let c = InteractionCoefficients::from_records(&state, &records).unwrap();
        assert_eq!(c.s_ij.len(), 1);
        assert_eq!(c.s_ij.order(0).unwrap().sum(), 0.0);
    }

    proptest! {
        #[test]
        fn symmetric_fill(i in 0usize..3, j in 0usize..3, d in 1e-12f64..1e-6, e in -1e4f64..1e4) {
            let state = mixture();
            let names = state.species_names();
            let records = vec![InteractionRecord::new(&names[i], &names[j])
                .with(InteractionCoefficient::D, d)
                .with(InteractionCoefficient::E, e)];
            let c = InteractionCoefficients::from_records(&state, &records).unwrap();
            prop_assert_eq!(c.d_ij.clone(), c.d_ij.t().to_owned());
            prop_assert_eq!(c.e_ij.clone(), c.e_ij.t().to_owned());
            prop_assert_eq!(c.d_ij[[i, j]], d);
        }
    }
}
