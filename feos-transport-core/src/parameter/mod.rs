//! Records and coefficient storage used to build transport models.
//!
//! Transport data is provided as already-parsed records: one
//! [SpeciesTransportRecord] per species and one [MixingRecord] per
//! transport property, collected in [TransportRecords]. The pairwise
//! parameters of a mixing rule are stored in [InteractionCoefficients].
use crate::errors::TransportResult;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

mod coefficients;
mod model_record;
mod units;

pub use coefficients::{CoefficientFamily, InteractionCoefficients};
pub use model_record::{
    CoefficientRecord, CoefficientValue, InteractionCoefficient, InteractionRecord, MixingRecord,
    SpeciesPropertyRecord, SpeciesTransportRecord,
};
pub use units::UnitConversion;

/// Transport properties for which mixing rules can be configured.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TransportProperty {
    Viscosity,
    IonicConductivity,
    MobilityRatio,
    SelfDiffusion,
    ThermalConductivity,
    SpeciesDiffusivity,
    HydrodynamicRadius,
    ElectricalConductivity,
}

impl fmt::Display for TransportProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Viscosity => "viscosity",
            Self::IonicConductivity => "ionic conductivity",
            Self::MobilityRatio => "mobility ratio",
            Self::SelfDiffusion => "self diffusion",
            Self::ThermalConductivity => "thermal conductivity",
            Self::SpeciesDiffusivity => "species diffusivity",
            Self::HydrodynamicRadius => "hydrodynamic radius",
            Self::ElectricalConductivity => "electrical conductivity",
        };
        write!(f, "{s}")
    }
}

/// Available mixing rules.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MixingModel {
    Solvent,
    MoleFractions,
    MassFractions,
    LogMoleFractions,
    MoleFractionsExpT,
    PairwiseInteraction,
    StefanMaxwellPpn,
    StokesEinstein,
}

impl MixingModel {
    /// Returns `true` for mixing rules that only produce matrices of
    /// pairwise properties.
    pub fn is_pairwise(&self) -> bool {
        matches!(
            self,
            Self::PairwiseInteraction | Self::StefanMaxwellPpn | Self::StokesEinstein
        )
    }
}

impl fmt::Display for MixingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Complete transport data of a liquid phase.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TransportRecords {
    pub species: Vec<SpeciesTransportRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viscosity: Option<MixingRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ionic_conductivity: Option<MixingRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thermal_conductivity: Option<MixingRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species_diffusivity: Option<MixingRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub electrical_conductivity: Option<MixingRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hydrodynamic_radius: Option<MixingRecord>,
    /// Mixing rules for mobility ratios keyed by species pair (`"A:B"`).
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub mobility_ratio: IndexMap<String, MixingRecord>,
    /// Mixing rules for self-diffusion coefficients keyed by species name.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub self_diffusion: IndexMap<String, MixingRecord>,
}

impl TransportRecords {
    /// Read transport records from a json file.
    pub fn from_json<P: AsRef<Path>>(file: P) -> TransportResult<Self> {
        Ok(serde_json::from_reader(BufReader::new(File::open(file)?))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TransportError;

    #[test]
    fn deserialize_records() {
        let r = r#"
        {
            "species": [{"name": "water"}, {"name": "ethanol"}],
            "viscosity": {
                "model": "LogMoleFractions",
                "interactions": [{"speciesA": "water", "speciesB": "ethanol", "Hij": 1.0}]
            },
            "self_diffusion": {"water": {"model": "MoleFractions"}}
        }
        "#;
        let records: TransportRecords = serde_json::from_str(r).expect("Unable to parse json.");
        assert_eq!(records.species.len(), 2);
        let viscosity = records.viscosity.as_ref().unwrap();
        assert_eq!(viscosity.model, MixingModel::LogMoleFractions);
        assert_eq!(viscosity.interactions.len(), 1);
        assert!(records.thermal_conductivity.is_none());
        assert!(records.self_diffusion["water"].interactions.is_empty());
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            TransportRecords::from_json("does_not_exist.json"),
            Err(TransportError::FileIO(_))
        ));
    }

    #[test]
    fn pairwise_models() {
        assert!(MixingModel::StokesEinstein.is_pairwise());
        assert!(!MixingModel::Solvent.is_pairwise());
        assert_eq!(MixingModel::MoleFractionsExpT.to_string(), "MoleFractionsExpT");
    }
}
