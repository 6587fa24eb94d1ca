use super::{MixingModel, UnitConversion};
use crate::errors::{TransportError, TransportResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

/// Value of an interaction coefficient: a scalar or polynomial coefficients.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum CoefficientValue {
    Scalar(f64),
    Polynomial(Vec<f64>),
}

/// An interaction coefficient, optionally annotated with units.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum CoefficientRecord {
    Plain(CoefficientValue),
    WithUnits {
        value: CoefficientValue,
        units: String,
    },
}

impl CoefficientRecord {
    pub fn scalar(value: f64) -> Self {
        Self::Plain(CoefficientValue::Scalar(value))
    }

    pub fn polynomial(coefficients: Vec<f64>) -> Self {
        Self::Plain(CoefficientValue::Polynomial(coefficients))
    }

    /// Attach units to the coefficient.
    pub fn with_units(self, units: &str) -> Self {
        let value = match self {
            Self::Plain(value) | Self::WithUnits { value, .. } => value,
        };
        Self::WithUnits {
            value,
            units: units.into(),
        }
    }

    pub fn units(&self) -> Option<&str> {
        match self {
            Self::Plain(_) => None,
            Self::WithUnits { units, .. } => Some(units),
        }
    }

    /// Polynomial coefficients in the given units.
    ///
    /// A scalar is read as a polynomial of order zero, a missing polynomial
    /// as a single zero coefficient.
    pub fn coefficients(&self) -> Vec<f64> {
        let value = match self {
            Self::Plain(value) | Self::WithUnits { value, .. } => value,
        };
        match value {
            CoefficientValue::Scalar(c) => vec![*c],
            CoefficientValue::Polynomial(p) if p.is_empty() => vec![0.0],
            CoefficientValue::Polynomial(p) => p.clone(),
        }
    }

    /// Polynomial coefficients converted to SI units.
    pub fn to_si(&self, conversion: UnitConversion) -> TransportResult<Vec<f64>> {
        let factor = conversion.factor(self.units())?;
        Ok(self.coefficients().into_iter().map(|c| c * factor).collect())
    }
}

impl From<f64> for CoefficientRecord {
    fn from(value: f64) -> Self {
        Self::scalar(value)
    }
}

impl From<Vec<f64>> for CoefficientRecord {
    fn from(coefficients: Vec<f64>) -> Self {
        Self::polynomial(coefficients)
    }
}

impl From<CoefficientValue> for Value {
    fn from(value: CoefficientValue) -> Self {
        match value {
            CoefficientValue::Scalar(c) => c.into(),
            CoefficientValue::Polynomial(p) => p.into(),
        }
    }
}

impl From<CoefficientRecord> for Value {
    fn from(record: CoefficientRecord) -> Self {
        match record {
            CoefficientRecord::Plain(value) => value.into(),
            CoefficientRecord::WithUnits { value, units } => {
                json!({"value": Value::from(value), "units": units})
            }
        }
    }
}

/// Names of the pairwise interaction coefficients.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionCoefficient {
    #[serde(rename = "Aij")]
    A,
    #[serde(rename = "Bij")]
    B,
    #[serde(rename = "Dij")]
    D,
    #[serde(rename = "Eij")]
    E,
    #[serde(rename = "Hij")]
    H,
    #[serde(rename = "Sij")]
    S,
}

impl InteractionCoefficient {
    /// Unit conversion applied when the coefficient is read.
    pub fn conversion(&self) -> UnitConversion {
        match self {
            Self::A | Self::B | Self::D => UnitConversion::ToSi,
            Self::E | Self::H | Self::S => UnitConversion::ActivationEnergy,
        }
    }

    /// Energy-valued coefficients are stored divided by the gas constant.
    pub fn is_energy(&self) -> bool {
        matches!(self, Self::E | Self::H | Self::S)
    }

    /// Coefficients that are mirrored to `[j, i]` when set at `[i, j]`.
    pub fn is_symmetric(&self) -> bool {
        matches!(self, Self::D | Self::E)
    }
}

impl fmt::Display for InteractionCoefficient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::A => "Aij",
            Self::B => "Bij",
            Self::D => "Dij",
            Self::E => "Eij",
            Self::H => "Hij",
            Self::S => "Sij",
        };
        write!(f, "{s}")
    }
}

impl FromStr for InteractionCoefficient {
    type Err = TransportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Aij" => Ok(Self::A),
            "Bij" => Ok(Self::B),
            "Dij" => Ok(Self::D),
            "Eij" => Ok(Self::E),
            "Hij" => Ok(Self::H),
            "Sij" => Ok(Self::S),
            _ => Err(TransportError::Configuration(format!(
                "unknown interaction coefficient <{s}>"
            ))),
        }
    }
}

fn interaction_element() -> String {
    "interaction".into()
}

/// Pairwise interaction parameters of two species.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct InteractionRecord {
    /// Element name; only `interaction` elements are accepted.
    #[serde(default = "interaction_element")]
    pub element: String,
    #[serde(rename = "speciesA")]
    pub species_a: String,
    #[serde(rename = "speciesB")]
    pub species_b: String,
    /// Remaining children by name. Only `Aij`, `Bij`, `Dij`, `Eij`, `Hij`
    /// and `Sij` are valid; names are checked by [`Self::parse_coefficients`].
    #[serde(flatten)]
    pub coefficients: IndexMap<String, Value>,
}

impl InteractionRecord {
    pub fn new(species_a: &str, species_b: &str) -> Self {
        Self {
            element: interaction_element(),
            species_a: species_a.into(),
            species_b: species_b.into(),
            coefficients: IndexMap::new(),
        }
    }

    /// Add a coefficient to the record.
    pub fn with<C: Into<CoefficientRecord>>(
        mut self,
        coefficient: InteractionCoefficient,
        value: C,
    ) -> Self {
        let record: CoefficientRecord = value.into();
        self.coefficients
            .insert(coefficient.to_string(), record.into());
        self
    }

    /// Coefficients of the record in input order.
    ///
    /// The name of each child is checked before its value is read.
    pub fn parse_coefficients(
        &self,
    ) -> TransportResult<Vec<(InteractionCoefficient, CoefficientRecord)>> {
        self.coefficients
            .iter()
            .map(|(name, value)| {
                let coefficient: InteractionCoefficient = name.parse()?;
                let record = CoefficientRecord::deserialize(value).map_err(|e| {
                    TransportError::Configuration(format!(
                        "invalid value of interaction coefficient <{name}>: {e}"
                    ))
                })?;
                Ok((coefficient, record))
            })
            .collect()
    }
}

impl fmt::Display for InteractionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InteractionRecord(")?;
        write!(f, "\n\tspeciesA={},", self.species_a)?;
        write!(f, "\n\tspeciesB={},", self.species_b)?;
        for (name, value) in &self.coefficients {
            write!(f, "\n\t{name}={value},")?;
        }
        write!(f, "\n)")
    }
}

fn unit_weight() -> f64 {
    1.0
}

/// Temperature dependence of a pure-species transport property.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "model")]
pub enum SpeciesPropertyRecord {
    /// Temperature independent value.
    Constant {
        value: f64,
        #[serde(default = "unit_weight")]
        weight: f64,
    },
    /// `a * T^b * exp(-+e / (R T))`.
    Arrhenius {
        a: f64,
        #[serde(default)]
        b: f64,
        e: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        units: Option<String>,
        #[serde(default = "unit_weight")]
        weight: f64,
    },
    /// `sum_k c_k T^k`.
    Polynomial {
        coefficients: Vec<f64>,
        #[serde(default = "unit_weight")]
        weight: f64,
    },
    /// `exp(sum_k c_k T^k)`.
    ExponentialPolynomial {
        coefficients: Vec<f64>,
        #[serde(default = "unit_weight")]
        weight: f64,
    },
}

impl SpeciesPropertyRecord {
    pub fn constant(value: f64) -> Self {
        Self::Constant { value, weight: 1.0 }
    }

    /// Return the record with the given mixing weight.
    pub fn weighted(mut self, w: f64) -> Self {
        match &mut self {
            Self::Constant { weight, .. }
            | Self::Arrhenius { weight, .. }
            | Self::Polynomial { weight, .. }
            | Self::ExponentialPolynomial { weight, .. } => *weight = w,
        }
        self
    }

    pub fn weight(&self) -> f64 {
        match self {
            Self::Constant { weight, .. }
            | Self::Arrhenius { weight, .. }
            | Self::Polynomial { weight, .. }
            | Self::ExponentialPolynomial { weight, .. } => *weight,
        }
    }
}

impl fmt::Display for SpeciesPropertyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant { value, weight } => {
                write!(f, "Constant(value={value}, weight={weight})")
            }
            Self::Arrhenius {
                a, b, e, weight, ..
            } => write!(f, "Arrhenius(a={a}, b={b}, e={e}, weight={weight})"),
            Self::Polynomial {
                coefficients,
                weight,
            } => write!(f, "Polynomial(coefficients={coefficients:?}, weight={weight})"),
            Self::ExponentialPolynomial {
                coefficients,
                weight,
            } => write!(
                f,
                "ExponentialPolynomial(coefficients={coefficients:?}, weight={weight})"
            ),
        }
    }
}

/// Transport data of a single species.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SpeciesTransportRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viscosity: Option<SpeciesPropertyRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ionic_conductivity: Option<SpeciesPropertyRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thermal_conductivity: Option<SpeciesPropertyRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub electrical_conductivity: Option<SpeciesPropertyRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species_diffusivity: Option<SpeciesPropertyRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hydrodynamic_radius: Option<SpeciesPropertyRecord>,
    /// Mobility ratios keyed by species pair (`"A:B"`).
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub mobility_ratio: IndexMap<String, SpeciesPropertyRecord>,
    /// Self-diffusion coefficients keyed by species name.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub self_diffusion: IndexMap<String, SpeciesPropertyRecord>,
}

impl SpeciesTransportRecord {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Mixing rule of a single transport property and its interaction parameters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MixingRecord {
    pub model: MixingModel,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interactions: Vec<InteractionRecord>,
}

impl MixingRecord {
    pub fn new(model: MixingModel, interactions: Vec<InteractionRecord>) -> Self {
        Self {
            model,
            interactions,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn deserialize_interaction() {
        let r = r#"
        {
            "speciesA": "LiCl",
            "speciesB": "KCl",
            "Aij": 0.1,
            "Hij": {"value": [-1.0, 2.0], "units": "kJ/mol"},
            "Dij": []
        }
        "#;
        let record: InteractionRecord = serde_json::from_str(r).expect("Unable to parse json.");
        assert_eq!(record.element, "interaction");
        let coefficients = record.parse_coefficients().unwrap();
        assert_eq!(coefficients.len(), 3);
        assert_eq!(coefficients[0].0, InteractionCoefficient::A);
        assert_eq!(coefficients[0].1.coefficients(), vec![0.1]);
        assert_eq!(coefficients[1].1.units(), Some("kJ/mol"));
        assert_eq!(
            coefficients[1]
                .1
                .to_si(UnitConversion::ActivationEnergy)
                .unwrap(),
            vec![-1000.0, 2000.0]
        );
        assert_eq!(coefficients[2].0, InteractionCoefficient::D);
        assert_eq!(coefficients[2].1.coefficients(), vec![0.0]);
    }

    #[test]
    fn unknown_children_are_reported_by_name() {
        let r = r#"{"speciesA": "LiCl", "speciesB": "KCl", "Aij": 0.1, "note": "typo"}"#;
        let record: InteractionRecord = serde_json::from_str(r).expect("Unable to parse json.");
        assert!(matches!(
            record.parse_coefficients(),
            Err(TransportError::Configuration(msg))
            if msg == "unknown interaction coefficient <note>"
        ));

        let r = r#"{"speciesA": "LiCl", "speciesB": "KCl", "Aij": "fast"}"#;
        let record: InteractionRecord = serde_json::from_str(r).expect("Unable to parse json.");
        assert!(matches!(
            record.parse_coefficients(),
            Err(TransportError::Configuration(msg))
            if msg.starts_with("invalid value of interaction coefficient <Aij>")
        ));
    }

    #[test]
    fn deserialize_species() {
        let r = r#"
        {
            "name": "Li+",
            "viscosity": {"model": "Arrhenius", "a": 1e-3, "e": 15.0, "units": "kJ/mol"},
            "ionic_conductivity": {"model": "Constant", "value": 2.0, "weight": 0.5},
            "mobility_ratio": {"Li+:K+": {"model": "Constant", "value": 1.3}}
        }
        "#;
        let record: SpeciesTransportRecord =
            serde_json::from_str(r).expect("Unable to parse json.");
        assert_eq!(record.name, "Li+");
        assert!(matches!(
            record.viscosity,
            Some(SpeciesPropertyRecord::Arrhenius { b, weight, .. }) if b == 0.0 && weight == 1.0
        ));
        assert_eq!(record.ionic_conductivity.as_ref().unwrap().weight(), 0.5);
        assert_eq!(record.mobility_ratio.len(), 1);
        assert!(record.self_diffusion.is_empty());
    }

    #[test]
    fn coefficient_names() {
        assert_eq!("Eij".parse::<InteractionCoefficient>().unwrap(), InteractionCoefficient::E);
        assert!("Xij".parse::<InteractionCoefficient>().is_err());
        assert!(InteractionCoefficient::D.is_symmetric());
        assert!(!InteractionCoefficient::A.is_symmetric());
        assert!(InteractionCoefficient::S.is_energy());
    }
}
