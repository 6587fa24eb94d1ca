use super::{check_components, scalar_not_supported, MixingRule, RuleBase};
use feos_transport_core::parameter::{InteractionCoefficients, MixingModel, TransportProperty};
use feos_transport_core::si::RGAS;
use feos_transport_core::{MixtureState, SpeciesProperty, TransportResult};
use ndarray::Array2;
use std::f64::consts::PI;
use std::fmt;
use std::sync::Arc;

/// Stokes-Einstein friction coefficients.
///
/// Element `[i, j]` is `6 pi r_i eta_j / (R T)` with the hydrodynamic
/// radius `r_i` of species `i` and the viscosity `eta_j` of species `j`.
/// The matrix is not symmetric in general.
pub struct StokesEinstein {
    base: RuleBase,
    viscosity: Vec<Arc<dyn SpeciesProperty>>,
    hydrodynamic_radius: Vec<Arc<dyn SpeciesProperty>>,
}

impl StokesEinstein {
    pub fn new(
        property: TransportProperty,
        state: Arc<dyn MixtureState>,
        viscosity: Vec<Arc<dyn SpeciesProperty>>,
        hydrodynamic_radius: Vec<Arc<dyn SpeciesProperty>>,
    ) -> TransportResult<Self> {
        let n = state.components();
        let base = RuleBase::new(property, state, InteractionCoefficients::new(n))?;
        check_components(n, viscosity.len())?;
        check_components(n, hydrodynamic_radius.len())?;
        Ok(Self {
            base,
            viscosity,
            hydrodynamic_radius,
        })
    }
}

impl MixingRule for StokesEinstein {
    fn model(&self) -> MixingModel {
        MixingModel::StokesEinstein
    }

    fn property(&self) -> TransportProperty {
        self.base.property
    }

    fn mix_values(&self, _: &[f64], _: Option<&[f64]>) -> TransportResult<f64> {
        Err(scalar_not_supported(self.model()))
    }

    fn mix_species(&self, _: &[Arc<dyn SpeciesProperty>]) -> TransportResult<f64> {
        Err(scalar_not_supported(self.model()))
    }

    fn matrix(&self, _: &[f64]) -> TransportResult<Array2<f64>> {
        let n = self.base.components();
        let t = self.base.state.temperature();
        let eta: Vec<_> = self.viscosity.iter().map(|v| v.value(t)).collect();
        let r: Vec<_> = self.hydrodynamic_radius.iter().map(|r| r.value(t)).collect();
        Ok(Array2::from_shape_fn((n, n), |(i, j)| {
            6.0 * PI * r[i] * eta[j] / (RGAS * t)
        }))
    }
}

impl fmt::Display for StokesEinstein {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.model(), self.base.property)
    }
}
