//! Deterministic fixed-point arithmetic.
//!
//! Every peer in a lockstep session must produce bit-identical state, so the
//! tick path never touches `f32`/`f64`. All quantities are Q48.16 values.

use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub};

use serde::{Deserialize, Serialize};

/// Fixed-point number used throughout the simulation.
///
/// 48 integer bits, 16 fractional bits (precision ~0.000015).
pub type Fixed = ::fixed::types::I48F16;

/// Number of fractional bits in [`Fixed`].
pub const FRAC_BITS: u32 = 16;

/// Build a [`Fixed`] from an integer in const context.
pub const fn fx(value: i64) -> Fixed {
    Fixed::from_bits(value << FRAC_BITS)
}

/// pi / 180, rounded to the nearest representable value.
pub const DEG_TO_RAD: Fixed = Fixed::from_bits(1144);

const FULL_TURN: Fixed = fx(360);
const HALF_TURN: Fixed = fx(180);
const QUARTER_TURN: Fixed = fx(90);

/// Sine of an angle given in degrees.
///
/// Reduces the angle to [0, 90] by symmetry and evaluates the odd Taylor
/// polynomial up to x^7 in Horner form.
pub fn sin_deg(degrees: Fixed) -> Fixed {
    let mut d = degrees % FULL_TURN;
    if d.is_negative() {
        d += FULL_TURN;
    }

    let negate = d >= HALF_TURN;
    if negate {
        d -= HALF_TURN;
    }
    if d > QUARTER_TURN {
        d = HALF_TURN - d;
    }

    let x = d * DEG_TO_RAD;
    let x2 = x * x;
    let inner = Fixed::ONE - x2 / fx(42);
    let inner = Fixed::ONE - x2 / fx(20) * inner;
    let inner = Fixed::ONE - x2 / fx(6) * inner;
    let sin = x * inner;

    if negate {
        -sin
    } else {
        sin
    }
}

/// 2D vector of fixed-point components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FixedVec2 {
    pub x: Fixed,
    pub y: Fixed,
}

impl FixedVec2 {
    pub const ZERO: Self = Self {
        x: Fixed::ZERO,
        y: Fixed::ZERO,
    };

    pub const fn new(x: Fixed, y: Fixed) -> Self {
        Self { x, y }
    }

    /// Vector from integer components.
    pub const fn from_ints(x: i64, y: i64) -> Self {
        Self { x: fx(x), y: fx(y) }
    }
}

impl Add for FixedVec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for FixedVec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for FixedVec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for FixedVec2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Mul<Fixed> for FixedVec2 {
    type Output = Self;

    fn mul(self, rhs: Fixed) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl MulAssign<Fixed> for FixedVec2 {
    fn mul_assign(&mut self, rhs: Fixed) {
        self.x *= rhs;
        self.y *= rhs;
    }
}
