//! Physical constants in SI units on a molar basis.
//!
//! All quantities handled by this crate are plain `f64` values in SI units
//! with amounts in mol (e.g. molar volumes in m³/mol, activation energies in
//! J/mol).

/// Molar gas constant in J/(mol K).
pub const RGAS: f64 = 8.314_462_618;

/// Faraday constant in C/mol.
pub const FARADAY: f64 = 96_485.332_12;
