//! Mixture-averaged transport properties of multicomponent liquids.
//!
//! Transport properties (viscosity, conductivities, diffusivities and
//! hydrodynamic radii) of liquid mixtures and molten salts are combined from
//! temperature-dependent pure-species data with one of several mixing rules.
//! The rules read temperature and composition from a shared
//! [MixtureState](feos_transport_core::MixtureState) on every evaluation.
#![warn(clippy::all)]
#![allow(clippy::too_many_arguments)]

pub mod mixing;
mod parameters;

pub use feos_transport_core::{
    parameter, si, species, IonicMixtureState, LiquidMixture, MixtureState, SpeciesProperty,
    TransportError, TransportResult,
};
pub use mixing::{scalar_mixing_rule, MixingRule};
pub use parameters::{LiquidTransportData, LiquidTransportParams};
