//! Core traits and data structures of `feos-transport`.
//!
//! This crate defines the interface to the thermodynamic state of a liquid
//! phase ([MixtureState], [IonicMixtureState]), the records that describe
//! transport data, the storage of pairwise interaction coefficients and the
//! evaluators of pure-species transport properties.
#![warn(clippy::all)]
#![allow(clippy::too_many_arguments)]

mod errors;
pub mod parameter;
pub mod si;
pub mod species;
mod state;

pub use errors::{TransportError, TransportResult};
pub use species::SpeciesProperty;
pub use state::{IonicMixtureState, LiquidMixture, MixtureState};
