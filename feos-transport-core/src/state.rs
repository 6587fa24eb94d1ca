//! Access to the thermodynamic state of a liquid phase.
//!
//! Mixing rules never own the thermodynamic state. They hold a shared,
//! read-only handle to a [MixtureState] and query temperature and
//! composition on every evaluation, so results always reflect the current
//! state of the phase.
use crate::errors::{TransportError, TransportResult};
use ndarray::{Array1, Array2};
use std::sync::{PoisonError, RwLock};

/// Thermodynamic state of a liquid mixture as seen by the transport models.
pub trait MixtureState: Send + Sync {
    /// Return the number of species in the phase.
    fn components(&self) -> usize;

    /// Return the names of all species, ordered by species index.
    fn species_names(&self) -> Vec<String>;

    /// Return the index of the species with the given name.
    fn species_index(&self, name: &str) -> Option<usize> {
        self.species_names().iter().position(|n| n == name)
    }

    /// Temperature in K.
    fn temperature(&self) -> f64;

    /// Mole fractions of all species.
    fn molefracs(&self) -> Array1<f64>;

    /// Mass fractions of all species.
    fn massfracs(&self) -> Array1<f64>;

    /// Charge numbers of all species.
    fn charges(&self) -> Array1<f64>;

    /// Molar volume in m³/mol.
    fn molar_volume(&self) -> f64;

    /// Access the ion-specific extension, if the phase describes ions that
    /// are formed by dissociation of neutral molecules.
    fn ionic(&self) -> Option<&dyn IonicMixtureState> {
        None
    }
}

/// State of an ionic liquid phase built from dissociating neutral molecules.
pub trait IonicMixtureState: MixtureState {
    /// Mole fractions of the underlying neutral molecules.
    fn neutral_molefracs(&self) -> Array1<f64>;

    /// Indices of all positively charged species.
    fn cations(&self) -> Vec<usize> {
        let charges = self.charges();
        (0..charges.len()).filter(|&k| charges[k] > 0.0).collect()
    }

    /// Indices of all negatively charged species.
    fn anions(&self) -> Vec<usize> {
        let charges = self.charges();
        (0..charges.len()).filter(|&k| charges[k] < 0.0).collect()
    }

    /// Stoichiometric coefficients of the dissociation reactions.
    ///
    /// Element `[i, k]` is the number of species `k` produced by dissociating
    /// one neutral molecule `i`.
    fn dissociation_coefficients(&self) -> Array2<f64>;

    /// Derivatives of the logarithmic activity coefficients of the neutral
    /// molecules with respect to the logarithm of their mole numbers.
    fn dln_activity_coefficient_dln_n(&self) -> Array1<f64>;
}

#[derive(Clone, Debug)]
struct Conditions {
    temperature: f64,
    molefracs: Array1<f64>,
    molar_volume: f64,
}

/// A plain liquid mixture with externally controlled state.
///
/// The temperature, composition and molar volume can be changed through a
/// shared reference, so a single `Arc<LiquidMixture>` can be handed to all
/// mixing rules of a phase and updated afterwards.
#[derive(Debug)]
pub struct LiquidMixture {
    names: Vec<String>,
    molarweight: Array1<f64>,
    charges: Array1<f64>,
    conditions: RwLock<Conditions>,
}

impl LiquidMixture {
    /// Create a new mixture.
    ///
    /// `molarweight` is given in g/mol, `molar_volume` in m³/mol. Mole
    /// fractions are normalized.
    pub fn new(
        names: Vec<String>,
        molarweight: Array1<f64>,
        charges: Option<Array1<f64>>,
        temperature: f64,
        molefracs: &Array1<f64>,
        molar_volume: f64,
    ) -> TransportResult<Self> {
        let n = names.len();
        if molarweight.len() != n {
            return Err(TransportError::IncompatibleComponents(n, molarweight.len()));
        }
        let charges = charges.unwrap_or_else(|| Array1::zeros(n));
        if charges.len() != n {
            return Err(TransportError::IncompatibleComponents(n, charges.len()));
        }
        let conditions = Conditions {
            temperature,
            molefracs: normalize(n, molefracs)?,
            molar_volume,
        };
        Ok(Self {
            names,
            molarweight,
            charges,
            conditions: RwLock::new(conditions),
        })
    }

    /// Molar weights in g/mol.
    pub fn molarweight(&self) -> &Array1<f64> {
        &self.molarweight
    }

    pub fn set_temperature(&self, temperature: f64) {
        self.conditions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .temperature = temperature;
    }

    /// Set the composition; the mole fractions are normalized.
    pub fn set_molefracs(&self, molefracs: &Array1<f64>) -> TransportResult<()> {
        let x = normalize(self.names.len(), molefracs)?;
        self.conditions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .molefracs = x;
        Ok(())
    }

    pub fn set_molar_volume(&self, molar_volume: f64) {
        self.conditions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .molar_volume = molar_volume;
    }

    fn conditions(&self) -> Conditions {
        self.conditions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

fn normalize(n: usize, molefracs: &Array1<f64>) -> TransportResult<Array1<f64>> {
    if molefracs.len() != n {
        return Err(TransportError::IncompatibleComponents(n, molefracs.len()));
    }
    if molefracs.iter().any(|x| !x.is_finite() || *x < 0.0) {
        return Err(TransportError::Validation(
            "mole fractions must be finite and non-negative".into(),
        ));
    }
    let sum = molefracs.sum();
    if sum <= 0.0 {
        return Err(TransportError::Validation(
            "mole fractions sum to zero".into(),
        ));
    }
    Ok(molefracs / sum)
}

impl MixtureState for LiquidMixture {
    fn components(&self) -> usize {
        self.names.len()
    }

    fn species_names(&self) -> Vec<String> {
        self.names.clone()
    }

    fn temperature(&self) -> f64 {
        self.conditions().temperature
    }

    fn molefracs(&self) -> Array1<f64> {
        self.conditions().molefracs
    }

    fn massfracs(&self) -> Array1<f64> {
        let w = self.conditions().molefracs * &self.molarweight;
        let sum = w.sum();
        w / sum
    }

    fn charges(&self) -> Array1<f64> {
        self.charges.clone()
    }

    fn molar_volume(&self) -> f64 {
        self.conditions().molar_volume
    }
}
