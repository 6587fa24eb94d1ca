use approx::assert_relative_eq;
use feos_transport::parameter::TransportProperty;
use feos_transport::si::{FARADAY, RGAS};
use feos_transport::{
    IonicMixtureState, LiquidTransportParams, MixtureState, TransportError, TransportResult,
};
use ndarray::{arr1, arr2, Array1, Array2};
use std::error::Error;
use std::sync::{Arc, RwLock};

const MOLAR_VOLUME: f64 = 3e-5;
const DLN_GAMMA: [f64; 2] = [0.05, -0.05];

/// LiCl/KCl melt with ions Li+, K+ and Cl-.
struct LiClKCl {
    state: RwLock<(f64, f64)>,
}

impl LiClKCl {
    fn new(temperature: f64, x_licl: f64) -> Arc<Self> {
        Arc::new(Self {
            state: RwLock::new((temperature, x_licl)),
        })
    }

    fn set(&self, temperature: f64, x_licl: f64) {
        *self.state.write().unwrap() = (temperature, x_licl);
    }

    fn x_licl(&self) -> f64 {
        self.state.read().unwrap().1
    }
}

impl MixtureState for LiClKCl {
    fn components(&self) -> usize {
        3
    }

    fn species_names(&self) -> Vec<String> {
        vec!["Li+".into(), "K+".into(), "Cl-".into()]
    }

    fn temperature(&self) -> f64 {
        self.state.read().unwrap().0
    }

    fn molefracs(&self) -> Array1<f64> {
        let x = self.x_licl();
        arr1(&[0.5 * x, 0.5 * (1.0 - x), 0.5])
    }

    fn massfracs(&self) -> Array1<f64> {
        let x = self.molefracs();
        let mw = arr1(&[6.94, 39.10, 35.45]);
        let w = &x * &mw;
        &w / w.sum()
    }

    fn charges(&self) -> Array1<f64> {
        arr1(&[1.0, 1.0, -1.0])
    }

    fn molar_volume(&self) -> f64 {
        MOLAR_VOLUME
    }

    fn ionic(&self) -> Option<&dyn IonicMixtureState> {
        Some(self)
    }
}

impl IonicMixtureState for LiClKCl {
    fn neutral_molefracs(&self) -> Array1<f64> {
        let x = self.x_licl();
        arr1(&[x, 1.0 - x])
    }

    fn dissociation_coefficients(&self) -> Array2<f64> {
        arr2(&[[1.0, 0.0, 1.0], [0.0, 1.0, 1.0]])
    }

    fn dln_activity_coefficient_dln_n(&self) -> Array1<f64> {
        arr1(&DLN_GAMMA)
    }
}

fn params(state: &Arc<LiClKCl>) -> TransportResult<LiquidTransportParams> {
    LiquidTransportParams::from_json(state.clone(), "tests/data/molten_salt.json")
}

fn expected_viscosity(t: f64, x_licl: f64) -> f64 {
    let x = [0.5 * x_licl, 0.5 * (1.0 - x_licl), 0.5];
    let eta = [
        1e-4 * (20e3 / (RGAS * t)).exp(),
        1.5e-4 * (18e3 / (RGAS * t)).exp(),
        1e-3,
    ];
    let ln_eta: f64 = x.iter().zip(eta).map(|(x, e)| x * e.ln()).sum();
    let excess = x[0] * x[1] * (-2e3 / (RGAS * t) - x[0] / RGAS);
    (ln_eta + excess).exp()
}

fn expected_matrix(t: f64, x_licl: f64) -> [f64; 3] {
    let (x_a, x_b) = (x_licl, 1.0 - x_licl);
    let sigma = 450.0 * 0.5 * x_a + 250.0 * 0.5 * x_b;
    let r = 0.8;
    let eps = (1.0 - r) / (x_a + x_b * r);
    let inv_d = x_a * (1.0 + DLN_GAMMA[1]) / 2e-9 + x_b * (1.0 + DLN_GAMMA[0]) / 3e-9;
    let q = FARADAY * FARADAY / (RGAS * t * sigma * MOLAR_VOLUME);
    [
        2.0 * (1.0 + eps * x_b) * (1.0 - eps * x_a) * inv_d - q,
        2.0 * (-eps * x_b * (1.0 - eps * x_a) * inv_d) + q,
        2.0 * (eps * x_a * (1.0 + eps * x_b) * inv_d) + q,
    ]
}

#[test]
fn test_viscosity() -> Result<(), Box<dyn Error>> {
    let state = LiClKCl::new(700.0, 0.6);
    let params = params(&state)?;
    assert_relative_eq!(
        params.viscosity()?,
        expected_viscosity(700.0, 0.6),
        max_relative = 1e-12
    );

    state.set(800.0, 0.45);
    assert_relative_eq!(
        params.viscosity()?,
        expected_viscosity(800.0, 0.45),
        max_relative = 1e-12
    );
    Ok(())
}

#[test]
fn test_ionic_conductivity() -> Result<(), Box<dyn Error>> {
    let state = LiClKCl::new(700.0, 0.6);
    let params = params(&state)?;
    assert_relative_eq!(
        params.ionic_conductivity()?,
        450.0 * 0.3 + 250.0 * 0.2,
        max_relative = 1e-14
    );
    Ok(())
}

#[test]
fn test_stefan_maxwell_matrix() -> Result<(), Box<dyn Error>> {
    let state = LiClKCl::new(700.0, 0.6);
    let params = params(&state)?;
    for (t, x) in [(700.0, 0.6), (750.0, 0.3), (900.0, 0.9)] {
        state.set(t, x);
        let m = params.species_diffusivity_matrix()?;
        let [m_cc, m_c0a, m_c1a] = expected_matrix(t, x);
        assert_relative_eq!(m[[0, 1]], m_cc, max_relative = 1e-12);
        assert_relative_eq!(m[[0, 2]], m_c0a, max_relative = 1e-12);
        assert_relative_eq!(m[[1, 2]], m_c1a, max_relative = 1e-12);
        assert_eq!(m, m.t());
        for i in 0..3 {
            assert_eq!(m[[i, i]], 0.0);
        }
    }
    Ok(())
}

#[test]
fn test_unset_properties() -> Result<(), Box<dyn Error>> {
    let params = params(&LiClKCl::new(700.0, 0.5))?;
    assert!(matches!(
        params.thermal_conductivity(),
        Err(TransportError::Model(_))
    ));
    assert!(matches!(
        params.electrical_conductivity(),
        Err(TransportError::Model(_))
    ));
    assert!(params
        .mixing_rule(TransportProperty::SpeciesDiffusivity)
        .is_some());
    assert!(matches!(
        params.try_clone(),
        Err(TransportError::UnsupportedOperation(_))
    ));
    Ok(())
}

#[test]
fn test_missing_file() {
    assert!(matches!(
        LiquidTransportParams::from_json(LiClKCl::new(700.0, 0.5), "tests/data/missing.json"),
        Err(TransportError::FileIO(_))
    ));
}
