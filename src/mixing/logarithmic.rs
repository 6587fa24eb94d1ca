use super::{species_values, weighted_values, MixingRule, RuleBase};
use feos_transport_core::parameter::{InteractionCoefficients, MixingModel, TransportProperty};
use feos_transport_core::{MixtureState, SpeciesProperty, TransportResult};
use ndarray::Array1;
use std::fmt;
use std::sync::Arc;

/// Logarithmic mixing weighted by mole fractions.
///
/// The logarithm of the mixture property is the mole fraction weighted sum
/// of the logarithms of the species properties plus an excess term built
/// from the enthalpic `H_ij` and entropic `S_ij` interactions:
///
/// `ln p = sum_i x_i ln p_i + sum_ij x_i x_j sum_k (H_k[i, j] / T - S_k[i, j]) x_i^k`
pub struct LogMoleFractions(RuleBase);
impl_rule_common!(LogMoleFractions);

impl LogMoleFractions {
    fn mix(&self, values: Array1<f64>, weights: Array1<f64>) -> f64 {
        let t = self.0.state.temperature();
        let x = self.0.state.molefracs() * &weights;
        let c = &self.0.coefficients;
        let n = x.len();
        let mut ln_p = values.mapv(f64::ln).dot(&x);
        for i in 0..n {
            for j in 0..n {
                let h = c.h_ij.polynomial(i, j, x[i]);
                let s = c.s_ij.polynomial(i, j, x[i]);
                ln_p += x[i] * x[j] * (h / t - s);
            }
        }
        ln_p.exp()
    }
}

impl MixingRule for LogMoleFractions {
    fn model(&self) -> MixingModel {
        MixingModel::LogMoleFractions
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

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use feos_transport_core::parameter::InteractionCoefficient;
    use feos_transport_core::si::RGAS;
    use feos_transport_core::LiquidMixture;
    use ndarray::arr1;
    use proptest::prelude::*;

    fn mixture(x0: f64, temperature: f64) -> Arc<LiquidMixture> {
        Arc::new(
            LiquidMixture::new(
                vec!["LiCl".into(), "KCl".into()],
                arr1(&[42.39, 74.55]),
                None,
                temperature,
                &arr1(&[x0, 1.0 - x0]),
                3e-5,
            )
            .unwrap(),
        )
    }

    #[test]
    fn excess_term() {
        let mut c = InteractionCoefficients::new(2);
        c.insert(InteractionCoefficient::H, 0, 1, &[1000.0 * RGAS]);
        c.insert(InteractionCoefficient::S, 0, 1, &[0.5 * RGAS, 1.0 * RGAS]);
        let rule = LogMoleFractions::new(TransportProperty::Viscosity, mixture(0.4, 500.0), c)
            .unwrap();
        let value = rule.mix_values(&[1.0, 1.0], Some(&[1.0, 1.0])).unwrap();
        let expected = (0.24_f64 * (2.0 - 0.5 - 0.4)).exp();
        assert_relative_eq!(value, expected, max_relative = 1e-12);
    }

    proptest! {
        #[test]
        fn geometric_mean(x0 in 0.01f64..0.99, p0 in 1e-4f64..10.0, p1 in 1e-4f64..10.0) {
            let rule = LogMoleFractions::new(
                TransportProperty::Viscosity,
                mixture(x0, 600.0),
                InteractionCoefficients::new(2),
            )
            .unwrap();
            let value = rule.mix_values(&[p0, p1], Some(&[1.0, 1.0])).unwrap();
            let expected = p0.powf(x0) * p1.powf(1.0 - x0);
            prop_assert!((value - expected).abs() <= 1e-10 * expected);
        }
    }
}
