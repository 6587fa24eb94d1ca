//! Mixing rules for transport properties of liquid mixtures.
//!
//! A mixing rule combines pure-species values of a transport property into
//! a mixture value (scalar rules) or into a matrix of pairwise properties
//! (pairwise rules). Every rule keeps a read-only handle to the
//! thermodynamic state and reads temperature and composition on each call.
use feos_transport_core::parameter::{
    InteractionCoefficients, MixingModel, MixingRecord, TransportProperty,
};
use feos_transport_core::{MixtureState, SpeciesProperty, TransportError, TransportResult};
use ndarray::{Array1, Array2};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Constructor, coefficient accessor and `Display` of rules that wrap a
/// [RuleBase] and are named like their [MixingModel] variant.
macro_rules! impl_rule_common {
    ($rule:ident) => {
        impl $rule {
            pub fn new(
                property: TransportProperty,
                state: Arc<dyn MixtureState>,
                coefficients: InteractionCoefficients,
            ) -> TransportResult<Self> {
                Ok(Self(RuleBase::new(property, state, coefficients)?))
            }

            /// Interaction parameters of the rule.
            pub fn coefficients(&self) -> &InteractionCoefficients {
                &self.0.coefficients
            }
        }

        impl fmt::Display for $rule {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", MixingModel::$rule, self.0.property)
            }
        }
    };
}

mod linear;
mod logarithmic;
mod pairwise;
mod stefan_maxwell;
mod stokes_einstein;

pub use linear::{MassFractions, MoleFractions, MoleFractionsExpT, Solvent};
pub use logarithmic::LogMoleFractions;
pub use pairwise::PairwiseInteraction;
pub use stefan_maxwell::{SpeciesSubModel, StefanMaxwellPpn};
pub use stokes_einstein::StokesEinstein;

/// Capabilities shared by all mixing rules.
pub trait MixingRule: Send + Sync + fmt::Display {
    /// The mixing model implemented by the rule.
    fn model(&self) -> MixingModel;

    /// The transport property the rule is configured for.
    fn property(&self) -> TransportProperty;

    /// Mixture value from pure-species values and mixing weights.
    fn mix_values(&self, values: &[f64], weights: Option<&[f64]>) -> TransportResult<f64>;

    /// Mixture value from the pure-species property evaluators.
    fn mix_species(&self, species: &[Arc<dyn SpeciesProperty>]) -> TransportResult<f64>;

    /// Matrix of pairwise properties.
    fn matrix(&self, _values: &[f64]) -> TransportResult<Array2<f64>> {
        Err(TransportError::Model(format!(
            "{} mixing of {} does not provide pairwise properties.",
            self.model(),
            self.property()
        )))
    }
}

/// Error returned by pairwise rules for any scalar query.
pub(crate) fn scalar_not_supported(model: MixingModel) -> TransportError {
    TransportError::Model(format!(
        "Calling {model}::mix does not make sense for a pairwise mixing rule."
    ))
}

pub(crate) fn check_components(components: usize, len: usize) -> TransportResult<()> {
    if components != len {
        return Err(TransportError::IncompatibleComponents(components, len));
    }
    Ok(())
}

/// Values and mixing weights of all species at the given temperature.
pub(crate) fn species_values(
    components: usize,
    species: &[Arc<dyn SpeciesProperty>],
    temperature: f64,
) -> TransportResult<(Array1<f64>, Array1<f64>)> {
    check_components(components, species.len())?;
    let values = species.iter().map(|s| s.value(temperature)).collect();
    let weights = species.iter().map(|s| s.mix_weight()).collect();
    Ok((values, weights))
}

/// Shared configuration of all mixing rules.
pub(crate) struct RuleBase {
    pub property: TransportProperty,
    pub state: Arc<dyn MixtureState>,
    pub coefficients: InteractionCoefficients,
}

impl RuleBase {
    pub fn new(
        property: TransportProperty,
        state: Arc<dyn MixtureState>,
        coefficients: InteractionCoefficients,
    ) -> TransportResult<Self> {
        coefficients.check_dimensions(state.components())?;
        Ok(Self {
            property,
            state,
            coefficients,
        })
    }

    pub fn components(&self) -> usize {
        self.state.components()
    }
}

/// Validated values and mandatory weights of a scalar query.
pub(crate) fn weighted_values(
    components: usize,
    model: MixingModel,
    values: &[f64],
    weights: Option<&[f64]>,
) -> TransportResult<(Array1<f64>, Array1<f64>)> {
    let weights = weights.ok_or_else(|| {
        TransportError::Usage(format!(
            "{model} mixing requires species weights to be specified."
        ))
    })?;
    check_components(components, values.len())?;
    check_components(components, weights.len())?;
    Ok((Array1::from(values.to_vec()), Array1::from(weights.to_vec())))
}

/// Build a mixing rule that produces scalar mixture values.
///
/// Pairwise models are rejected because they require per-species data that
/// is only available when building the complete parameter set.
pub fn scalar_mixing_rule(
    property: TransportProperty,
    state: &Arc<dyn MixtureState>,
    record: &MixingRecord,
) -> TransportResult<Box<dyn MixingRule>> {
    let unsupported = || {
        TransportError::Configuration(format!(
            "the {} mixing rule cannot be used for {property}",
            record.model
        ))
    };
    if record.model.is_pairwise() {
        return Err(unsupported());
    }
    let coefficients = InteractionCoefficients::from_records(state.as_ref(), &record.interactions)?;
    let state = Arc::clone(state);
    let rule: Box<dyn MixingRule> = match record.model {
        MixingModel::Solvent => Box::new(Solvent::new(property, state, coefficients)?),
        MixingModel::MoleFractions => Box::new(MoleFractions::new(property, state, coefficients)?),
        MixingModel::MassFractions => Box::new(MassFractions::new(property, state, coefficients)?),
        MixingModel::LogMoleFractions => {
            Box::new(LogMoleFractions::new(property, state, coefficients)?)
        }
        MixingModel::MoleFractionsExpT => {
            Box::new(MoleFractionsExpT::new(property, state, coefficients)?)
        }
        _ => return Err(unsupported()),
    };
    debug!(
        "{} mixing rule for {} with {} interaction(s)",
        record.model,
        property,
        record.interactions.len()
    );
    Ok(rule)
}
