//! Stefan-Maxwell diffusion coefficients of a ternary molten salt.
//!
//! The system consists of two cations of equal charge and a common anion,
//! formed by dissociation of two neutral salts (e.g. LiCl and KCl). The
//! inverse diffusion coefficients follow from the ionic conductivity, the
//! mobility ratio of the cations and the self-diffusion coefficients of the
//! neutral salts.
use super::{check_components, scalar_not_supported, MixingRule, RuleBase};
use feos_transport_core::parameter::{InteractionCoefficients, MixingModel, TransportProperty};
use feos_transport_core::si::{FARADAY, RGAS};
use feos_transport_core::{
    IonicMixtureState, MixtureState, SpeciesProperty, TransportError, TransportResult,
};
use ndarray::{Array1, Array2};
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// A mixing rule together with the species data it is evaluated with.
///
/// Used for the mobility ratios (keyed by a species pair `"A:B"`) and the
/// self-diffusion coefficients (keyed by a species name).
pub struct SpeciesSubModel {
    pub key: String,
    pub rule: Box<dyn MixingRule>,
    pub species: Vec<Arc<dyn SpeciesProperty>>,
}

impl SpeciesSubModel {
    pub fn new(
        key: &str,
        rule: Box<dyn MixingRule>,
        species: Vec<Arc<dyn SpeciesProperty>>,
    ) -> Self {
        Self {
            key: key.into(),
            rule,
            species,
        }
    }

    /// Current mixture value of the sub-model.
    pub fn value(&self) -> TransportResult<f64> {
        self.rule.mix_species(&self.species)
    }
}

impl fmt::Display for SpeciesSubModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.rule)
    }
}

/// Stefan-Maxwell interaction matrix of a three-ion system.
pub struct StefanMaxwellPpn {
    base: RuleBase,
    ionic_conductivity: Arc<dyn MixingRule>,
    ionic_conductivity_species: Vec<Arc<dyn SpeciesProperty>>,
    mobility_ratio: Vec<SpeciesSubModel>,
    self_diffusion: Vec<SpeciesSubModel>,
}

impl StefanMaxwellPpn {
    pub fn new(
        property: TransportProperty,
        state: Arc<dyn MixtureState>,
        ionic_conductivity: Arc<dyn MixingRule>,
        ionic_conductivity_species: Vec<Arc<dyn SpeciesProperty>>,
        mobility_ratio: Vec<SpeciesSubModel>,
        self_diffusion: Vec<SpeciesSubModel>,
    ) -> TransportResult<Self> {
        let n = state.components();
        let base = RuleBase::new(property, state, InteractionCoefficients::new(n))?;
        check_components(n, ionic_conductivity_species.len())?;
        for sub_model in mobility_ratio.iter().chain(&self_diffusion) {
            check_components(n, sub_model.species.len())?;
        }
        Ok(Self {
            base,
            ionic_conductivity,
            ionic_conductivity_species,
            mobility_ratio,
            self_diffusion,
        })
    }

    /// Mixing rule of the ionic conductivity.
    pub fn ionic_conductivity(&self) -> &Arc<dyn MixingRule> {
        &self.ionic_conductivity
    }

    /// Mobility ratios `r[i, j]` of all species pairs with a sub-model.
    ///
    /// A pair `"A:B"` sets `r[A, B]` and, if the value is positive, the
    /// reciprocal `r[B, A]`.
    pub fn mobility_ratios(&self) -> TransportResult<Array2<f64>> {
        let names = self.base.state.species_names();
        let n = names.len();
        let mut r = Array2::zeros((n, n));
        for sub_model in &self.mobility_ratio {
            let (i, j) = pair_index(&names, &sub_model.key).ok_or_else(|| {
                TransportError::Configuration(format!(
                    "Incorrect names for mobility ratio of {} rather than i.e. {}",
                    sub_model.key,
                    example_pair(&names)
                ))
            })?;
            let value = sub_model.value()?;
            r[[i, j]] = value;
            if value > 0.0 {
                r[[j, i]] = 1.0 / value;
            }
        }
        Ok(r)
    }

    /// Self-diffusion coefficients of all species with a sub-model.
    pub fn self_diffusion_coefficients(&self) -> TransportResult<Array1<f64>> {
        let names = self.base.state.species_names();
        let mut d = Array1::zeros(names.len());
        for sub_model in &self.self_diffusion {
            let k = names.iter().position(|n| *n == sub_model.key).ok_or_else(|| {
                TransportError::Configuration(format!(
                    "Incorrect names for self diffusion of {} rather than i.e. {}",
                    sub_model.key,
                    names.first().map_or("", String::as_str)
                ))
            })?;
            d[k] = sub_model.value()?;
        }
        Ok(d)
    }

    fn ionic_state(&self) -> TransportResult<&dyn IonicMixtureState> {
        self.base.state.ionic().ok_or_else(|| {
            TransportError::Model(format!(
                "{} requires a phase of ions formed from neutral molecules.",
                self.model()
            ))
        })
    }
}

/// Indices `(i, j)` of the species pair `"name_i:name_j"`.
fn pair_index(names: &[String], key: &str) -> Option<(usize, usize)> {
    let (a, b) = key.split_once(':')?;
    let i = names.iter().position(|n| n == a)?;
    let j = names.iter().position(|n| n == b)?;
    (i != j).then_some((i, j))
}

fn example_pair(names: &[String]) -> String {
    match names {
        [a, b, ..] => format!("{a}:{b}"),
        _ => String::new(),
    }
}

/// Neutral molecules producing the first and the second cation.
///
/// The dissociation pattern has bit `2 i + j` set if neutral molecule `i`
/// produces cation `j`. Each neutral molecule has to produce exactly one of
/// the two cations. Neutral mole fractions and activity derivatives of each
/// cation are read at its producer, also for the swapped pattern `"0110"`.
fn cation_producers(nu: &Array2<f64>, cations: &[usize]) -> TransportResult<[usize; 2]> {
    if nu.nrows() < 2 {
        return Err(TransportError::Model(format!(
            "Dissociation of two neutral molecules required, got {}",
            nu.nrows()
        )));
    }
    let pattern: String = (0..2)
        .flat_map(|i| (0..2).map(move |j| (i, j)))
        .map(|(i, j)| if nu[[i, cations[j]]] > 0.0 { '1' } else { '0' })
        .collect();
    match pattern.as_str() {
        "1001" => Ok([0, 1]),
        "0110" => Ok([1, 0]),
        _ => Err(TransportError::Model(format!(
            "Dissociation reactions don't make sense: cationIndex = {pattern}"
        ))),
    }
}

impl MixingRule for StefanMaxwellPpn {
    fn model(&self) -> MixingModel {
        MixingModel::StefanMaxwellPpn
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
        let state = &self.base.state;
        let n = state.components();
        if n != 3 {
            return Err(TransportError::Validation(format!(
                "{} may only be used for a 3-ion system, got {n} species",
                self.model()
            )));
        }
        let ionic = self.ionic_state()?;
        let cations = ionic.cations();
        let anions = ionic.anions();
        if anions.len() != 1 {
            return Err(TransportError::Validation(format!(
                "{} requires exactly one anion, got {}",
                self.model(),
                anions.len()
            )));
        }
        if cations.len() != 2 {
            return Err(TransportError::Validation(format!(
                "{} requires two cations of equal charge, got {} cation(s)",
                self.model(),
                cations.len()
            )));
        }
        let charges = state.charges();
        let (c0, c1, a) = (cations[0], cations[1], anions[0]);
        if charges[c0] != charges[c1] {
            return Err(TransportError::Validation(format!(
                "{} requires cations of equal charge, got {} and {}",
                self.model(),
                charges[c0],
                charges[c1]
            )));
        }

        let sigma = self
            .ionic_conductivity
            .mix_species(&self.ionic_conductivity_species)?;
        let ratio = self.mobility_ratios()?;
        let d_self = self.self_diffusion_coefficients()?;

        let nu = ionic.dissociation_coefficients();
        check_components(n, nu.ncols())?;
        let [p0, p1] = cation_producers(&nu, &cations)?;
        let v_p = nu[[0, c0]].max(nu[[0, c1]]);
        let v_m = nu[[0, a]];
        let z_p = charges[c0];
        let z_m = charges[a];

        let x_neutral = ionic.neutral_molefracs();
        let dlngamma = ionic.dln_activity_coefficient_dln_n();
        check_components(nu.nrows(), x_neutral.len())?;
        check_components(nu.nrows(), dlngamma.len())?;
        let x_a = x_neutral[p0];
        let x_b = x_neutral[p1];
        let r10 = ratio[[c1, c0]];
        let eps = (1.0 - r10) / (x_a + x_b * r10);
        let inv_d = x_a * (1.0 + dlngamma[p1]) / d_self[c1]
            + x_b * (1.0 + dlngamma[p0]) / d_self[c0];

        let t = state.temperature();
        let q = FARADAY * FARADAY / (RGAS * t * sigma * state.molar_volume());
        trace!(sigma, eps, inv_d, q, "Stefan-Maxwell coefficients");

        let mut m = Array2::zeros((n, n));
        let m_cc = (1.0 + v_m / v_p) * (1.0 + eps * x_b) * (1.0 - eps * x_a) * inv_d - z_p * z_p * q;
        let m_c0a = (1.0 + v_p / v_m) * (-eps * x_b * (1.0 - eps * x_a) * inv_d) - z_p * z_m * q;
        let m_c1a = (1.0 + v_p / v_m) * (eps * x_a * (1.0 + eps * x_b) * inv_d) - z_p * z_m * q;
        for (i, j, v) in [(c0, c1, m_cc), (c0, a, m_c0a), (c1, a, m_c1a)] {
            m[[i, j]] = v;
            m[[j, i]] = v;
        }
        Ok(m)
    }
}

impl fmt::Display for StefanMaxwellPpn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}, ionic conductivity: {})",
            self.model(),
            self.base.property,
            self.ionic_conductivity
        )
    }
}
