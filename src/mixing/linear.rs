use super::{species_values, weighted_values, MixingRule, RuleBase};
use feos_transport_core::parameter::{
    CoefficientFamily, InteractionCoefficients, MixingModel, TransportProperty,
};
use feos_transport_core::{MixtureState, SpeciesProperty, TransportResult};
use ndarray::Array1;
use std::fmt;
use std::sync::Arc;

/// `sum_ij x_i x_j sum_k M_k[i, j] x_i^k`
fn interaction_sum(family: &CoefficientFamily, x: &Array1<f64>) -> f64 {
    if family.is_empty() {
        return 0.0;
    }
    let n = x.len();
    let mut sum = 0.0;
    for i in 0..n {
        for j in 0..n {
            sum += x[i] * x[j] * family.polynomial(i, j, x[i]);
        }
    }
    sum
}

/// Linear mixing with polynomial excess terms.
///
/// `values` are combined with `linear` fractions and the `A_ij` and `B_ij`
/// interactions are evaluated with the `excess` fractions.
fn linear_mixing(
    coefficients: &InteractionCoefficients,
    temperature: f64,
    values: &Array1<f64>,
    linear: &Array1<f64>,
    excess: &Array1<f64>,
) -> f64 {
    values.dot(linear)
        + interaction_sum(&coefficients.a_ij, excess)
        + temperature * interaction_sum(&coefficients.b_ij, excess)
}

/// Solvent-dominated mixing.
///
/// The pure-species values are weighted by the species weights (typically 1
/// for the solvent and 0 for all solutes) while the interaction terms use
/// the plain mole fractions.
pub struct Solvent(RuleBase);
impl_rule_common!(Solvent);

impl Solvent {
    fn mix(&self, values: Array1<f64>, weights: Array1<f64>) -> f64 {
        let x = self.0.state.molefracs();
        linear_mixing(
            &self.0.coefficients,
            self.0.state.temperature(),
            &values,
            &weights,
            &x,
        )
    }
}

impl MixingRule for Solvent {
    fn model(&self) -> MixingModel {
        MixingModel::Solvent
    }

    fn property(&self) -> TransportProperty {
        self.0.property
    }

    fn mix_values(&self, values: &[f64], weights: Option<&[f64]>) -> TransportResult<f64> {
        let (values, weights) =
            weighted_values(self.0.components(), self.model(), values, weights)?;
        Ok(self.mix(values, weights))
    }

    fn mix_species(&self, species: &[Arc<dyn SpeciesProperty>]) -> TransportResult<f64> {
        let (values, weights) =
            species_values(self.0.components(), species, self.0.state.temperature())?;
        Ok(self.mix(values, weights))
    }
}

/// Mixing weighted by mole fractions.
pub struct MoleFractions(RuleBase);
impl_rule_common!(MoleFractions);

impl MoleFractions {
    fn mix(&self, values: Array1<f64>, weights: Array1<f64>) -> f64 {
        let x = self.0.state.molefracs() * &weights;
        linear_mixing(
            &self.0.coefficients,
            self.0.state.temperature(),
            &values,
            &x,
            &x,
        )
    }
}

impl MixingRule for MoleFractions {
    fn model(&self) -> MixingModel {
        MixingModel::MoleFractions
    }

    fn property(&self) -> TransportProperty {
        self.0.property
    }

    fn mix_values(&self, values: &[f64], weights: Option<&[f64]>) -> TransportResult<f64> {
        let (values, weights) =
            weighted_values(self.0.components(), self.model(), values, weights)?;
        Ok(self.mix(values, weights))
    }

    fn mix_species(&self, species: &[Arc<dyn SpeciesProperty>]) -> TransportResult<f64> {
        let (values, weights) =
            species_values(self.0.components(), species, self.0.state.temperature())?;
        Ok(self.mix(values, weights))
    }
}

/// Mixing weighted by mass fractions.
pub struct MassFractions(RuleBase);
impl_rule_common!(MassFractions);

impl MassFractions {
    fn mix(&self, values: Array1<f64>, weights: Array1<f64>) -> f64 {
        let w = self.0.state.massfracs() * &weights;
        linear_mixing(
            &self.0.coefficients,
            self.0.state.temperature(),
            &values,
            &w,
            &w,
        )
    }
}

impl MixingRule for MassFractions {
    fn model(&self) -> MixingModel {
        MixingModel::MassFractions
    }

    fn property(&self) -> TransportProperty {
        self.0.property
    }

    fn mix_values(&self, values: &[f64], weights: Option<&[f64]>) -> TransportResult<f64> {
        let (values, weights) =
            weighted_values(self.0.components(), self.model(), values, weights)?;
        Ok(self.mix(values, weights))
    }

    fn mix_species(&self, species: &[Arc<dyn SpeciesProperty>]) -> TransportResult<f64> {
        let (values, weights) =
            species_values(self.0.components(), species, self.0.state.temperature())?;
        Ok(self.mix(values, weights))
    }
}

/// Mixing weighted by mole fractions with interaction terms
/// `A_ij exp(B_ij T)`.
pub struct MoleFractionsExpT(RuleBase);
impl_rule_common!(MoleFractionsExpT);

impl MoleFractionsExpT {
    fn mix(&self, values: Array1<f64>, weights: Array1<f64>) -> f64 {
        let t = self.0.state.temperature();
        let x = self.0.state.molefracs() * &weights;
        let c = &self.0.coefficients;
        let n = x.len();
        let mut excess = 0.0;
        for (k, a) in c.a_ij.iter().enumerate() {
            let b = c.b_ij.order(k);
            for i in 0..n {
                let xik = x[i].powi(k as i32);
                for j in 0..n {
                    let bt = b.map_or(0.0, |b| b[[i, j]] * t);
                    excess += x[i] * x[j] * a[[i, j]] * xik * bt.exp();
                }
            }
        }
        values.dot(&x) + excess
    }
}

impl MixingRule for MoleFractionsExpT {
    fn model(&self) -> MixingModel {
        MixingModel::MoleFractionsExpT
    }

    fn property(&self) -> TransportProperty {
        self.0.property
    }

    fn mix_values(&self, values: &[f64], weights: Option<&[f64]>) -> TransportResult<f64> {
        let (values, weights) =
            weighted_values(self.0.components(), self.model(), values, weights)?;
        Ok(self.mix(values, weights))
    }

    fn mix_species(&self, species: &[Arc<dyn SpeciesProperty>]) -> TransportResult<f64> {
        let (values, weights) =
            species_values(self.0.components(), species, self.0.state.temperature())?;
        Ok(self.mix(values, weights))
    }
}
