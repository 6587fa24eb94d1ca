use super::{check_components, scalar_not_supported, MixingRule, RuleBase};
use feos_transport_core::parameter::{InteractionCoefficients, MixingModel, TransportProperty};
use feos_transport_core::{MixtureState, SpeciesProperty, TransportResult};
use ndarray::Array2;
use std::fmt;
use std::sync::Arc;

/// Matrix of pairwise interactions `exp(E_ij / T) / D_ij`.
///
/// Diagonal elements are the inverse of the species diffusivities for all
/// species that provide one.
pub struct PairwiseInteraction {
    base: RuleBase,
    diagonals: Vec<Option<Arc<dyn SpeciesProperty>>>,
}

impl PairwiseInteraction {
    pub fn new(
        property: TransportProperty,
        state: Arc<dyn MixtureState>,
        coefficients: InteractionCoefficients,
        diagonals: Vec<Option<Arc<dyn SpeciesProperty>>>,
    ) -> TransportResult<Self> {
        let base = RuleBase::new(property, state, coefficients)?;
        check_components(base.components(), diagonals.len())?;
        Ok(Self { base, diagonals })
    }

    pub fn coefficients(&self) -> &InteractionCoefficients {
        &self.base.coefficients
    }
}

impl MixingRule for PairwiseInteraction {
    fn model(&self) -> MixingModel {
        MixingModel::PairwiseInteraction
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
        let c = &self.base.coefficients;
        let mut m = Array2::zeros((n, n));
        for i in 0..n {
            for j in 0..i {
                let mij = (c.e_ij[[i, j]] / t).exp() / c.d_ij[[i, j]];
                m[[i, j]] = mij;
                m[[j, i]] = mij;
            }
        }
        for (i, d) in self.diagonals.iter().enumerate() {
            if let Some(d) = d {
                if m[[i, i]] == 0.0 {
                    m[[i, i]] = 1.0 / d.value(t);
                }
            }
        }
        Ok(m)
    }
}

impl fmt::Display for PairwiseInteraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.model(), self.base.property)
    }
}
