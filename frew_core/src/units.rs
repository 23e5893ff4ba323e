//! # Unit Types
//!
//! Type-safe wrappers for the units crossing the engine boundary. These
//! provide compile-time safety against unit confusion while remaining
//! lightweight (just f64 wrappers).
//!
//! ## Design Philosophy
//!
//! We use simple newtype wrappers rather than a full units library because:
//! - The engine emits a small, fixed set of units
//! - We want JSON serialization to be clean (just numbers)
//! - Minimal runtime overhead
//!
//! ## Engine-native vs reported units
//!
//! The engine writes raw SI values into the model document; reports use the
//! conventional retaining-wall units:
//! - Shear: N/m (engine) → kN/m (reported)
//! - Bending moment: N·m/m (engine) → kN·m/m (reported)
//! - Displacement: m (engine) → mm (reported)
//! - Pressure: Pa (engine) → kPa (reported)
//! - Wall stiffness EI: N·m²/m (engine) → kN·m²/m (reported)
//!
//! All conversions happen once, at the extraction boundary — downstream
//! aggregation and reporting only ever see reported units.
//!
//! ## Example
//!
//! ```rust
//! use frew_core::units::{KnPerM, Metres, Millimetres, NPerM};
//!
//! let raw = NPerM(152_400.0);
//! let shear: KnPerM = raw.into();
//! assert_eq!(shear.0, 152.4);
//!
//! let disp: Millimetres = Metres(0.0034).into();
//! assert!((disp.0 - 3.4).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metres(pub f64);

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimetres(pub f64);

impl From<Metres> for Millimetres {
    fn from(m: Metres) -> Self {
        Millimetres(m.0 * 1000.0)
    }
}

impl From<Millimetres> for Metres {
    fn from(mm: Millimetres) -> Self {
        Metres(mm.0 / 1000.0)
    }
}

// ============================================================================
// Shear (force per metre run of wall)
// ============================================================================

/// Shear in newtons per metre
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NPerM(pub f64);

/// Shear in kilonewtons per metre
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnPerM(pub f64);

impl From<NPerM> for KnPerM {
    fn from(n: NPerM) -> Self {
        KnPerM(n.0 / 1000.0)
    }
}

impl From<KnPerM> for NPerM {
    fn from(kn: KnPerM) -> Self {
        NPerM(kn.0 * 1000.0)
    }
}

// ============================================================================
// Bending Moment (per metre run of wall)
// ============================================================================

/// Bending moment in newton-metres per metre
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NmPerM(pub f64);

/// Bending moment in kilonewton-metres per metre
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnmPerM(pub f64);

impl From<NmPerM> for KnmPerM {
    fn from(nm: NmPerM) -> Self {
        KnmPerM(nm.0 / 1000.0)
    }
}

impl From<KnmPerM> for NmPerM {
    fn from(knm: KnmPerM) -> Self {
        NmPerM(knm.0 * 1000.0)
    }
}

// ============================================================================
// Pressure Units
// ============================================================================

/// Pressure in pascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pascals(pub f64);

/// Pressure in kilopascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilopascals(pub f64);

impl From<Pascals> for Kilopascals {
    fn from(pa: Pascals) -> Self {
        Kilopascals(pa.0 / 1000.0)
    }
}

impl From<Kilopascals> for Pascals {
    fn from(kpa: Kilopascals) -> Self {
        Pascals(kpa.0 * 1000.0)
    }
}

// ============================================================================
// Wall Stiffness (EI per metre run of wall)
// ============================================================================

/// Wall stiffness in newton-square-metres per metre
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Nm2PerM(pub f64);

/// Wall stiffness in kilonewton-square-metres per metre
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Knm2PerM(pub f64);

impl From<Nm2PerM> for Knm2PerM {
    fn from(nm2: Nm2PerM) -> Self {
        Knm2PerM(nm2.0 / 1000.0)
    }
}

impl From<Knm2PerM> for Nm2PerM {
    fn from(knm2: Knm2PerM) -> Self {
        Nm2PerM(knm2.0 * 1000.0)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Metres);
impl_arithmetic!(Millimetres);
impl_arithmetic!(NPerM);
impl_arithmetic!(KnPerM);
impl_arithmetic!(NmPerM);
impl_arithmetic!(KnmPerM);
impl_arithmetic!(Pascals);
impl_arithmetic!(Kilopascals);
impl_arithmetic!(Nm2PerM);
impl_arithmetic!(Knm2PerM);
