//! Transport parameters of a liquid phase.
//!
//! [LiquidTransportParams] collects the mixing rules of all configured
//! transport properties together with the species data they are evaluated
//! with. It is built from [TransportRecords] and a shared handle to the
//! thermodynamic state of the phase.
use crate::mixing::{
    scalar_mixing_rule, MixingRule, PairwiseInteraction, SpeciesSubModel, StefanMaxwellPpn,
    StokesEinstein,
};
use feos_transport_core::parameter::{
    InteractionCoefficients, MixingModel, MixingRecord, SpeciesPropertyRecord,
    SpeciesTransportRecord, TransportProperty, TransportRecords,
};
use feos_transport_core::species::species_property;
use feos_transport_core::{MixtureState, SpeciesProperty, TransportError, TransportResult};
use indexmap::IndexMap;
use ndarray::Array2;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

type Handle = Arc<dyn SpeciesProperty>;

/// Evaluators of the transport properties of a single species.
#[derive(Clone, Default)]
pub struct LiquidTransportData {
    pub name: String,
    pub viscosity: Option<Handle>,
    pub ionic_conductivity: Option<Handle>,
    pub thermal_conductivity: Option<Handle>,
    pub electrical_conductivity: Option<Handle>,
    pub species_diffusivity: Option<Handle>,
    pub hydrodynamic_radius: Option<Handle>,
    /// Mobility ratios keyed by species pair (`"A:B"`).
    pub mobility_ratio: IndexMap<String, Handle>,
    /// Self-diffusion coefficients keyed by species name.
    pub self_diffusion: IndexMap<String, Handle>,
}

impl LiquidTransportData {
    /// Species without any transport data.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn from_record(record: &SpeciesTransportRecord) -> TransportResult<Self> {
        let handle = |r: &Option<SpeciesPropertyRecord>, property: TransportProperty| {
            r.as_ref()
                .map(|r| species_property(r, property))
                .transpose()
        };
        let keyed = |records: &IndexMap<String, SpeciesPropertyRecord>,
                     property: TransportProperty| {
            records
                .iter()
                .map(|(key, r)| Ok((key.clone(), species_property(r, property)?)))
                .collect::<TransportResult<IndexMap<_, _>>>()
        };
        Ok(Self {
            name: record.name.clone(),
            viscosity: handle(&record.viscosity, TransportProperty::Viscosity)?,
            ionic_conductivity: handle(
                &record.ionic_conductivity,
                TransportProperty::IonicConductivity,
            )?,
            thermal_conductivity: handle(
                &record.thermal_conductivity,
                TransportProperty::ThermalConductivity,
            )?,
            electrical_conductivity: handle(
                &record.electrical_conductivity,
                TransportProperty::ElectricalConductivity,
            )?,
            species_diffusivity: handle(
                &record.species_diffusivity,
                TransportProperty::SpeciesDiffusivity,
            )?,
            hydrodynamic_radius: handle(
                &record.hydrodynamic_radius,
                TransportProperty::HydrodynamicRadius,
            )?,
            mobility_ratio: keyed(&record.mobility_ratio, TransportProperty::MobilityRatio)?,
            self_diffusion: keyed(&record.self_diffusion, TransportProperty::SelfDiffusion)?,
        })
    }

    /// Evaluator of a transport property that is not keyed by species.
    pub fn property(&self, property: TransportProperty) -> Option<&Handle> {
        match property {
            TransportProperty::Viscosity => self.viscosity.as_ref(),
            TransportProperty::IonicConductivity => self.ionic_conductivity.as_ref(),
            TransportProperty::ThermalConductivity => self.thermal_conductivity.as_ref(),
            TransportProperty::ElectricalConductivity => self.electrical_conductivity.as_ref(),
            TransportProperty::SpeciesDiffusivity => self.species_diffusivity.as_ref(),
            TransportProperty::HydrodynamicRadius => self.hydrodynamic_radius.as_ref(),
            TransportProperty::MobilityRatio | TransportProperty::SelfDiffusion => None,
        }
    }
}

impl fmt::Display for LiquidTransportData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LiquidTransportData(name={}", self.name)?;
        for property in [
            TransportProperty::Viscosity,
            TransportProperty::IonicConductivity,
            TransportProperty::ThermalConductivity,
            TransportProperty::ElectricalConductivity,
            TransportProperty::SpeciesDiffusivity,
            TransportProperty::HydrodynamicRadius,
        ] {
            if let Some(p) = self.property(property) {
                write!(f, ", {property}={p}")?;
            }
        }
        for (key, p) in &self.mobility_ratio {
            write!(f, ", mobility ratio {key}={p}")?;
        }
        for (key, p) in &self.self_diffusion {
            write!(f, ", self diffusion {key}={p}")?;
        }
        write!(f, ")")
    }
}

/// Mixing rules and species data of all transport properties of a liquid phase.
///
/// The parameters cannot be copied; [LiquidTransportParams::try_clone]
/// always fails.
pub struct LiquidTransportParams {
    state: Arc<dyn MixtureState>,
    data: Vec<LiquidTransportData>,
    viscosity: Option<Box<dyn MixingRule>>,
    ionic_conductivity: Option<Arc<dyn MixingRule>>,
    thermal_conductivity: Option<Box<dyn MixingRule>>,
    electrical_conductivity: Option<Box<dyn MixingRule>>,
    species_diffusivity: Option<Box<dyn MixingRule>>,
    hydrodynamic_radius: Option<Box<dyn MixingRule>>,
}

impl LiquidTransportParams {
    /// Build all mixing rules from the transport records.
    ///
    /// Species records are matched to the species of the phase by name.
    /// Species without a record have no transport data.
    pub fn new(state: Arc<dyn MixtureState>, records: &TransportRecords) -> TransportResult<Self> {
        let data = species_data(state.as_ref(), &records.species)?;
        let mut params = Self {
            state,
            data,
            viscosity: None,
            ionic_conductivity: None,
            thermal_conductivity: None,
            electrical_conductivity: None,
            species_diffusivity: None,
            hydrodynamic_radius: None,
        };

        params.viscosity = params.scalar_rule(TransportProperty::Viscosity, &records.viscosity)?;
        params.ionic_conductivity = params
            .scalar_rule(
                TransportProperty::IonicConductivity,
                &records.ionic_conductivity,
            )?
            .map(Arc::from);
        params.thermal_conductivity = params.scalar_rule(
            TransportProperty::ThermalConductivity,
            &records.thermal_conductivity,
        )?;
        params.electrical_conductivity = params.scalar_rule(
            TransportProperty::ElectricalConductivity,
            &records.electrical_conductivity,
        )?;
        params.hydrodynamic_radius = match &records.hydrodynamic_radius {
            Some(r) if r.model == MixingModel::PairwiseInteraction => Some(
                params.pairwise_interaction(TransportProperty::HydrodynamicRadius, r)?,
            ),
            r => params.scalar_rule(TransportProperty::HydrodynamicRadius, r)?,
        };
        params.species_diffusivity = records
            .species_diffusivity
            .as_ref()
            .map(|r| params.species_diffusivity_rule(r, records))
            .transpose()?;
        Ok(params)
    }

    /// Read the transport records from a json file and build all mixing rules.
    pub fn from_json<P: AsRef<Path>>(
        state: Arc<dyn MixtureState>,
        file: P,
    ) -> TransportResult<Self> {
        Self::new(state, &TransportRecords::from_json(file)?)
    }

    /// Copies of the parameters are not supported.
    pub fn try_clone(&self) -> TransportResult<Self> {
        Err(TransportError::UnsupportedOperation(
            "LiquidTransportParams cannot be copied".into(),
        ))
    }

    pub fn state(&self) -> &Arc<dyn MixtureState> {
        &self.state
    }

    /// Transport data of all species ordered by species index.
    pub fn species_data(&self) -> &[LiquidTransportData] {
        &self.data
    }

    /// Mixing rule configured for a transport property.
    pub fn mixing_rule(&self, property: TransportProperty) -> Option<&dyn MixingRule> {
        match property {
            TransportProperty::Viscosity => self.viscosity.as_deref(),
            TransportProperty::IonicConductivity => self.ionic_conductivity.as_deref(),
            TransportProperty::ThermalConductivity => self.thermal_conductivity.as_deref(),
            TransportProperty::ElectricalConductivity => self.electrical_conductivity.as_deref(),
            TransportProperty::SpeciesDiffusivity => self.species_diffusivity.as_deref(),
            TransportProperty::HydrodynamicRadius => self.hydrodynamic_radius.as_deref(),
            TransportProperty::MobilityRatio | TransportProperty::SelfDiffusion => None,
        }
    }

    /// Viscosity of the mixture.
    pub fn viscosity(&self) -> TransportResult<f64> {
        self.scalar(TransportProperty::Viscosity)
    }

    /// Ionic conductivity of the mixture.
    pub fn ionic_conductivity(&self) -> TransportResult<f64> {
        self.scalar(TransportProperty::IonicConductivity)
    }

    /// Thermal conductivity of the mixture.
    pub fn thermal_conductivity(&self) -> TransportResult<f64> {
        self.scalar(TransportProperty::ThermalConductivity)
    }

    /// Electrical conductivity of the mixture.
    pub fn electrical_conductivity(&self) -> TransportResult<f64> {
        self.scalar(TransportProperty::ElectricalConductivity)
    }

    /// Hydrodynamic radius of the mixture.
    pub fn hydrodynamic_radius(&self) -> TransportResult<f64> {
        self.scalar(TransportProperty::HydrodynamicRadius)
    }

    /// Matrix of pairwise species diffusion properties.
    pub fn species_diffusivity_matrix(&self) -> TransportResult<Array2<f64>> {
        self.rule(TransportProperty::SpeciesDiffusivity)?.matrix(&[])
    }

    /// Matrix of pairwise hydrodynamic radii.
    pub fn hydrodynamic_radius_matrix(&self) -> TransportResult<Array2<f64>> {
        self.rule(TransportProperty::HydrodynamicRadius)?.matrix(&[])
    }

    fn rule(&self, property: TransportProperty) -> TransportResult<&dyn MixingRule> {
        self.mixing_rule(property).ok_or_else(|| {
            TransportError::Model(format!("no mixing rule is specified for {property}"))
        })
    }

    fn scalar(&self, property: TransportProperty) -> TransportResult<f64> {
        let rule = self.rule(property)?;
        rule.mix_species(&self.handles(property)?)
    }

    /// Evaluators of a property for all species.
    fn handles(&self, property: TransportProperty) -> TransportResult<Vec<Handle>> {
        self.data
            .iter()
            .map(|d| {
                d.property(property).cloned().ok_or_else(|| {
                    TransportError::Configuration(format!(
                        "missing {property} data for species {}",
                        d.name
                    ))
                })
            })
            .collect()
    }

    fn keyed_handles(
        &self,
        property: TransportProperty,
        key: &str,
    ) -> TransportResult<Vec<Handle>> {
        self.data
            .iter()
            .map(|d| {
                let map = match property {
                    TransportProperty::MobilityRatio => &d.mobility_ratio,
                    _ => &d.self_diffusion,
                };
                map.get(key).cloned().ok_or_else(|| {
                    TransportError::Configuration(format!(
                        "missing {property} data {key} for species {}",
                        d.name
                    ))
                })
            })
            .collect()
    }

    fn scalar_rule(
        &self,
        property: TransportProperty,
        record: &Option<MixingRecord>,
    ) -> TransportResult<Option<Box<dyn MixingRule>>> {
        record
            .as_ref()
            .map(|r| -> TransportResult<Box<dyn MixingRule>> {
                let rule = scalar_mixing_rule(property, &self.state, r)?;
                self.handles(property)?;
                Ok(rule)
            })
            .transpose()
    }

    fn pairwise_interaction(
        &self,
        property: TransportProperty,
        record: &MixingRecord,
    ) -> TransportResult<Box<dyn MixingRule>> {
        let coefficients =
            InteractionCoefficients::from_records(self.state.as_ref(), &record.interactions)?;
        let diagonals = self
            .data
            .iter()
            .map(|d| d.species_diffusivity.clone())
            .collect();
        debug!(
            "{} mixing rule for {} with {} interaction(s)",
            record.model,
            property,
            record.interactions.len()
        );
        Ok(Box::new(PairwiseInteraction::new(
            property,
            self.state.clone(),
            coefficients,
            diagonals,
        )?))
    }

    fn species_diffusivity_rule(
        &self,
        record: &MixingRecord,
        records: &TransportRecords,
    ) -> TransportResult<Box<dyn MixingRule>> {
        let property = TransportProperty::SpeciesDiffusivity;
        match record.model {
            MixingModel::PairwiseInteraction => self.pairwise_interaction(property, record),
            MixingModel::StokesEinstein => {
                debug!("{} mixing rule for {}", record.model, property);
                Ok(Box::new(StokesEinstein::new(
                    property,
                    self.state.clone(),
                    self.handles(TransportProperty::Viscosity)?,
                    self.handles(TransportProperty::HydrodynamicRadius)?,
                )?))
            }
            MixingModel::StefanMaxwellPpn => {
                let ionic_conductivity = self.ionic_conductivity.clone().ok_or_else(|| {
                    TransportError::Configuration(format!(
                        "the {} mixing rule requires a mixing rule for ionic conductivity",
                        record.model
                    ))
                })?;
                let mobility_ratio = self.sub_models(
                    TransportProperty::MobilityRatio,
                    &records.mobility_ratio,
                )?;
                let self_diffusion = self.sub_models(
                    TransportProperty::SelfDiffusion,
                    &records.self_diffusion,
                )?;
                debug!(
                    "{} mixing rule for {} with {} mobility ratio(s) and {} self diffusion coefficient(s)",
                    record.model,
                    property,
                    mobility_ratio.len(),
                    self_diffusion.len()
                );
                Ok(Box::new(StefanMaxwellPpn::new(
                    property,
                    self.state.clone(),
                    ionic_conductivity,
                    self.handles(TransportProperty::IonicConductivity)?,
                    mobility_ratio,
                    self_diffusion,
                )?))
            }
            model => Err(TransportError::Configuration(format!(
                "the {model} mixing rule cannot be used for {property}"
            ))),
        }
    }

    fn sub_models(
        &self,
        property: TransportProperty,
        records: &IndexMap<String, MixingRecord>,
    ) -> TransportResult<Vec<SpeciesSubModel>> {
        records
            .iter()
            .map(|(key, r)| -> TransportResult<SpeciesSubModel> {
                let rule = scalar_mixing_rule(property, &self.state, r)?;
                let species = self.keyed_handles(property, key)?;
                Ok(SpeciesSubModel::new(key, rule, species))
            })
            .collect()
    }
}

/// Species data ordered by species index.
fn species_data(
    state: &dyn MixtureState,
    records: &[SpeciesTransportRecord],
) -> TransportResult<Vec<LiquidTransportData>> {
    let mut data: Vec<Option<LiquidTransportData>> = vec![None; state.components()];
    for record in records {
        let i = state.species_index(&record.name).ok_or_else(|| {
            TransportError::Configuration(format!("Unknown species {}", record.name))
        })?;
        if data[i].is_some() {
            return Err(TransportError::Configuration(format!(
                "duplicate transport data for species {}",
                record.name
            )));
        }
        data[i] = Some(LiquidTransportData::from_record(record)?);
    }
    let names = state.species_names();
    Ok(data
        .into_iter()
        .zip(names)
        .map(|(d, name)| d.unwrap_or_else(|| LiquidTransportData::new(&name)))
        .collect())
}

impl fmt::Display for LiquidTransportParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LiquidTransportParams(")?;
        for d in &self.data {
            write!(f, "\n\t{d}")?;
        }
        for property in [
            TransportProperty::Viscosity,
            TransportProperty::IonicConductivity,
            TransportProperty::ThermalConductivity,
            TransportProperty::ElectricalConductivity,
            TransportProperty::SpeciesDiffusivity,
            TransportProperty::HydrodynamicRadius,
        ] {
            if let Some(rule) = self.mixing_rule(property) {
                write!(f, "\n\t{property}: {rule}")?;
            }
        }
        write!(f, "\n)")
    }
}
