//! Temperature-dependent transport properties of pure species.
use crate::errors::{TransportError, TransportResult};
use crate::parameter::{SpeciesPropertyRecord, TransportProperty, UnitConversion};
use crate::si::RGAS;
use std::fmt;
use std::sync::Arc;

/// Evaluation of a transport property of a single species.
pub trait SpeciesProperty: Send + Sync + fmt::Display {
    /// Value of the property at the given temperature in K.
    fn value(&self, temperature: f64) -> f64;

    /// Weight of the species in a mixing rule.
    fn mix_weight(&self) -> f64 {
        1.0
    }
}

/// Temperature independent property.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstantProperty {
    pub value: f64,
    pub weight: f64,
}

impl SpeciesProperty for ConstantProperty {
    fn value(&self, _: f64) -> f64 {
        self.value
    }

    fn mix_weight(&self) -> f64 {
        self.weight
    }
}

impl fmt::Display for ConstantProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Constant(value={})", self.value)
    }
}

/// Arrhenius-type property `a T^b exp(theta / T)`.
///
/// The activation temperature `theta` is `+E/R` for viscosities, which
/// increase on cooling, and `-E/R` for all other properties.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrheniusProperty {
    pub a: f64,
    pub b: f64,
    pub theta: f64,
    pub weight: f64,
}

impl ArrheniusProperty {
    /// Create the property from an activation energy in J/mol.
    pub fn new(property: TransportProperty, a: f64, b: f64, e: f64, weight: f64) -> Self {
        let theta = match property {
            TransportProperty::Viscosity => e / RGAS,
            _ => -e / RGAS,
        };
        Self {
            a,
            b,
            theta,
            weight,
        }
    }
}

impl SpeciesProperty for ArrheniusProperty {
    fn value(&self, temperature: f64) -> f64 {
        self.a * (self.b * temperature.ln() + self.theta / temperature).exp()
    }

    fn mix_weight(&self) -> f64 {
        self.weight
    }
}

impl fmt::Display for ArrheniusProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Arrhenius(a={}, b={}, theta={})",
            self.a, self.b, self.theta
        )
    }
}

/// Polynomial in temperature `sum_k c_k T^k`.
#[derive(Clone, Debug, PartialEq)]
pub struct PolynomialProperty {
    pub coefficients: Vec<f64>,
    pub weight: f64,
}

fn horner(coefficients: &[f64], t: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, c| acc * t + c)
}

impl SpeciesProperty for PolynomialProperty {
    fn value(&self, temperature: f64) -> f64 {
        horner(&self.coefficients, temperature)
    }

    fn mix_weight(&self) -> f64 {
        self.weight
    }
}

impl fmt::Display for PolynomialProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Polynomial(coefficients={:?})", self.coefficients)
    }
}

/// Exponential of a polynomial in temperature `exp(sum_k c_k T^k)`.
#[derive(Clone, Debug, PartialEq)]
pub struct ExponentialPolynomialProperty {
    pub coefficients: Vec<f64>,
    pub weight: f64,
}

impl SpeciesProperty for ExponentialPolynomialProperty {
    fn value(&self, temperature: f64) -> f64 {
        horner(&self.coefficients, temperature).exp()
    }

    fn mix_weight(&self) -> f64 {
        self.weight
    }
}

impl fmt::Display for ExponentialPolynomialProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ExponentialPolynomial(coefficients={:?})",
            self.coefficients
        )
    }
}

/// Build the evaluator of a species property from its record.
pub fn species_property(
    record: &SpeciesPropertyRecord,
    property: TransportProperty,
) -> TransportResult<Arc<dyn SpeciesProperty>> {
    Ok(match record {
        SpeciesPropertyRecord::Constant { value, weight } => Arc::new(ConstantProperty {
            value: *value,
            weight: *weight,
        }),
        SpeciesPropertyRecord::Arrhenius {
            a,
            b,
            e,
            units,
            weight,
        } => {
            let e = e * UnitConversion::ActivationEnergy.factor(units.as_deref())?;
            Arc::new(ArrheniusProperty::new(property, *a, *b, e, *weight))
        }
        SpeciesPropertyRecord::Polynomial {
            coefficients,
            weight,
        } => Arc::new(PolynomialProperty {
            coefficients: non_empty(coefficients, property)?,
            weight: *weight,
        }),
        SpeciesPropertyRecord::ExponentialPolynomial {
            coefficients,
            weight,
        } => Arc::new(ExponentialPolynomialProperty {
            coefficients: non_empty(coefficients, property)?,
            weight: *weight,
        }),
    })
}

fn non_empty(coefficients: &[f64], property: TransportProperty) -> TransportResult<Vec<f64>> {
    if coefficients.is_empty() {
        return Err(TransportError::Configuration(format!(
            "no polynomial coefficients given for {property}"
        )));
    }
    Ok(coefficients.to_vec())
}
