use approx::assert_relative_eq;
use feos_transport_core::parameter::*;
use feos_transport_core::si::RGAS;
use feos_transport_core::species::species_property;
use feos_transport_core::{LiquidMixture, MixtureState, TransportError};
use ndarray::arr1;

fn molten_salt() -> LiquidMixture {
    LiquidMixture::new(
        vec!["Li+".into(), "K+".into(), "Cl-".into()],
        arr1(&[6.94, 39.10, 35.45]),
        Some(arr1(&[1.0, 1.0, -1.0])),
        700.0,
        &arr1(&[0.3, 0.2, 0.5]),
        3e-5,
    )
    .unwrap()
}

#[test]
fn from_json() {
    let r = r#"
    {
        "species": [
            {
                "name": "Li+",
                "viscosity": {"model": "Arrhenius", "a": 2.0e-4, "b": 0.0, "e": 2.5, "units": "kcal/mol"},
                "self_diffusion": {"Li+": {"model": "Polynomial", "coefficients": [1.0e-9, 1.0e-12]}}
            },
            {"name": "K+"},
            {"name": "Cl-"}
        ],
        "viscosity": {
            "model": "MoleFractionsExpT",
            "interactions": [
                {"speciesA": "Li+", "speciesB": "K+", "Aij": [0.1, 0.2, 0.3], "Bij": -0.001},
                {"speciesA": "K+", "speciesB": "Cl-", "Dij": 1.0e-9, "Eij": {"value": 1.0, "units": "kJ/mol"}}
            ]
        }
    }
    "#;
    let records: TransportRecords = serde_json::from_str(r).expect("Unable to parse json.");
    let state = molten_salt();
    let viscosity = records.viscosity.as_ref().unwrap();
    assert_eq!(viscosity.model, MixingModel::MoleFractionsExpT);

    let c = InteractionCoefficients::from_records(&state, &viscosity.interactions).unwrap();
    assert_eq!(c.components(), state.components());
    assert_eq!(c.a_ij.len(), 3);
    assert_eq!(c.b_ij.len(), 1);
    assert_eq!(c.a_ij.order(2).unwrap()[[0, 1]], 0.3);
    assert_eq!(c.b_ij.order(0).unwrap()[[0, 1]], -0.001);
    assert_eq!(c.d_ij[[2, 1]], 1e-9);
    assert_relative_eq!(c.e_ij[[1, 2]], 1000.0 / RGAS);

    let li = &records.species[0];
    let eta = species_property(li.viscosity.as_ref().unwrap(), TransportProperty::Viscosity)
        .unwrap();
    assert_relative_eq!(
        eta.value(700.0),
        2e-4 * (2.5 * 4184.0 / (RGAS * 700.0)).exp(),
        max_relative = 1e-14
    );
    let d = species_property(
        &li.self_diffusion["Li+"],
        TransportProperty::SelfDiffusion,
    )
    .unwrap();
    assert_relative_eq!(d.value(700.0), 1e-9 + 7e-10, max_relative = 1e-14);
}

#[test]
fn serialize_roundtrip_of_interaction() {
    let record = InteractionRecord::new("Li+", "Cl-")
        .with(InteractionCoefficient::H, vec![1.0, 2.0])
        .with(
            InteractionCoefficient::S,
            CoefficientRecord::scalar(0.5).with_units("cal/mol"),
        );
    let json = serde_json::to_string(&record).unwrap();
    let parsed: InteractionRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, record);
}

#[test]
fn unknown_units() {
    let state = molten_salt();
    let records = vec![InteractionRecord::new("Li+", "K+").with(
        InteractionCoefficient::D,
        CoefficientRecord::scalar(1.0).with_units("furlongs/fortnight"),
    )];
    assert!(matches!(
        InteractionCoefficients::from_records(&state, &records),
        Err(TransportError::Configuration(_))
    ));
}
