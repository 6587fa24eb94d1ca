use crate::errors::{TransportError, TransportResult};
use crate::si::{FARADAY, RGAS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unit conversion applied to a coefficient when it is read.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitConversion {
    /// Conversion of transport quantities to SI units.
    #[serde(rename = "toSI")]
    ToSi,
    /// Conversion of activation energies and entropies to J/mol.
    #[serde(rename = "actEnergy")]
    ActivationEnergy,
}

impl UnitConversion {
    /// Factor that converts a value given in `units` to the SI value.
    ///
    /// Values without units are assumed to be given in SI units already.
    pub fn factor(&self, units: Option<&str>) -> TransportResult<f64> {
        let units = match units.map(str::trim) {
            None | Some("") => return Ok(1.0),
            Some(u) => u,
        };
        let factor = match self {
            Self::ToSi => match units {
                "SI" | "Pa*s" | "Pa s" | "kg/m/s" => 1.0,
                "mPa*s" | "mPa s" | "cP" => 1e-3,
                "P" => 0.1,
                "m2/s" | "m^2/s" => 1.0,
                "cm2/s" | "cm^2/s" => 1e-4,
                "S/m" => 1.0,
                "mS/cm" => 0.1,
                "S/cm" => 100.0,
                "W/m/K" | "W/(m*K)" => 1.0,
                "mW/m/K" => 1e-3,
                "m" => 1.0,
                "nm" => 1e-9,
                "A" | "Angstrom" => 1e-10,
                "1/K" => 1.0,
                "m3/mol" | "m^3/mol" => 1.0,
                "cm3/mol" | "cm^3/mol" => 1e-6,
                _ => return Err(unknown_units(*self, units)),
            },
            Self::ActivationEnergy => match units {
                "SI" | "J/mol" => 1.0,
                "kJ/mol" => 1e3,
                "J/kmol" => 1e-3,
                "cal/mol" => 4.184,
                "kcal/mol" => 4184.0,
                "K" | "Kelvin" => RGAS,
                "eV" => FARADAY,
                _ => return Err(unknown_units(*self, units)),
            },
        };
        Ok(factor)
    }
}

fn unknown_units(conversion: UnitConversion, units: &str) -> TransportError {
    TransportError::Configuration(format!(
        "unknown units '{units}' for conversion {conversion}"
    ))
}

impl fmt::Display for UnitConversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ToSi => write!(f, "toSI"),
            Self::ActivationEnergy => write!(f, "actEnergy"),
        }
    }
}

impl FromStr for UnitConversion {
    type Err = TransportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "toSI" => Ok(Self::ToSi),
            "actEnergy" => Ok(Self::ActivationEnergy),
            _ => Err(TransportError::Configuration(format!(
                "unknown unit conversion '{s}', expected 'toSI' or 'actEnergy'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn activation_energy() {
        let c = UnitConversion::ActivationEnergy;
        assert_eq!(c.factor(None).unwrap(), 1.0);
        assert_eq!(c.factor(Some("kJ/mol")).unwrap(), 1000.0);
        assert_relative_eq!(c.factor(Some("K")).unwrap() / RGAS, 1.0);
        assert!(matches!(
            c.factor(Some("furlong")),
            Err(TransportError::Configuration(_))
        ));
    }

    #[test]
    fn to_si() {
        let c: UnitConversion = "toSI".parse().unwrap();
        assert_eq!(c, UnitConversion::ToSi);
        assert_eq!(c.factor(Some("cP")).unwrap(), 1e-3);
        assert_eq!(c.factor(Some(" cm2/s ")).unwrap(), 1e-4);
        assert!("toCGS".parse::<UnitConversion>().is_err());
    }
}
