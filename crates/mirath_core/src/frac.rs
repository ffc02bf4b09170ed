//! Exact fraction arithmetic for estate shares.
//!
//! Shares move through the engine as reduced `i128` rationals, so the
//! Awal/Radd decisions compare exactly against the whole (no epsilons).

use crate::errors::CoreError;

/// Exact fraction with normalized sign and positive denominator.
///
/// Constructors keep `den > 0` and reduce by GCD; arithmetic is checked and
/// re-reduces, so denominators stay small for the 24th-based share table.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frac {
    pub num: i128,
    pub den: i128,
}

pub const ZERO: Frac = Frac { num: 0, den: 1 };
pub const ONE: Frac = Frac { num: 1, den: 1 };

#[inline]
fn abs_i128(x: i128) -> i128 {
    if x < 0 {
        -x
    } else {
        x
    }
}

fn gcd_i128(mut a: i128, mut b: i128) -> i128 {
    a = abs_i128(a);
    b = abs_i128(b);
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    if a == 0 {
        1
    } else {
        a
    }
}

impl Frac {
    /// Construct a fraction, ensuring `den > 0` and reducing by GCD.
    pub fn new(num: i128, den: i128) -> Result<Self, CoreError> {
        if den == 0 {
            return Err(CoreError::InvalidFraction);
        }
        let (mut n, mut d) = (num, den);
        if d < 0 {
            n = -n;
            d = -d;
        }
        let g = gcd_i128(n, d);
        Ok(Frac { num: n / g, den: d / g })
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.num == 0
    }

    #[inline]
    pub fn is_positive(self) -> bool {
        self.num > 0
    }

    /// Exactly greater than 1 (the Awal trigger). `den > 0` makes this a
    /// plain numerator/denominator comparison.
    #[inline]
    pub fn exceeds_whole(self) -> bool {
        self.num > self.den
    }

    /// Exactly less than 1 (the Radd precondition).
    #[inline]
    pub fn below_whole(self) -> bool {
        self.num < self.den
    }

    pub fn checked_add(self, rhs: Frac) -> Result<Frac, CoreError> {
        let l = self
            .num
            .checked_mul(rhs.den)
            .ok_or(CoreError::Overflow("frac add"))?;
        let r = rhs
            .num
            .checked_mul(self.den)
            .ok_or(CoreError::Overflow("frac add"))?;
        let num = l.checked_add(r).ok_or(CoreError::Overflow("frac add"))?;
        let den = self
            .den
            .checked_mul(rhs.den)
            .ok_or(CoreError::Overflow("frac add"))?;
        Frac::new(num, den)
    }

    pub fn checked_sub(self, rhs: Frac) -> Result<Frac, CoreError> {
        self.checked_add(Frac { num: -rhs.num, den: rhs.den })
    }

    pub fn checked_mul(self, rhs: Frac) -> Result<Frac, CoreError> {
        // Cross-reduce first to keep the intermediate products small.
        let g1 = gcd_i128(self.num, rhs.den);
        let g2 = gcd_i128(rhs.num, self.den);
        let num = (self.num / g1)
            .checked_mul(rhs.num / g2)
            .ok_or(CoreError::Overflow("frac mul"))?;
        let den = (self.den / g2)
            .checked_mul(rhs.den / g1)
            .ok_or(CoreError::Overflow("frac mul"))?;
        Frac::new(num, den)
    }

    /// Divide by a non-zero fraction.
    pub fn checked_div(self, rhs: Frac) -> Result<Frac, CoreError> {
        if rhs.num == 0 {
            return Err(CoreError::InvalidFraction);
        }
        self.checked_mul(Frac { num: rhs.den, den: rhs.num })
    }

    /// Multiply by a unit count (2:1 split arithmetic).
    pub fn checked_mul_int(self, k: u32) -> Result<Frac, CoreError> {
        let num = self
            .num
            .checked_mul(k as i128)
            .ok_or(CoreError::Overflow("frac mul int"))?;
        Frac::new(num, self.den)
    }

    /// Divide by a non-zero unit count (2:1 split arithmetic).
    pub fn checked_div_int(self, k: u32) -> Result<Frac, CoreError> {
        if k == 0 {
            return Err(CoreError::InvalidFraction);
        }
        let den = self
            .den
            .checked_mul(k as i128)
            .ok_or(CoreError::Overflow("frac div int"))?;
        Frac::new(self.num, den)
    }

    /// Value in tenths of a percent, rounded half-even, for non-negative
    /// fractions. `1/8` → `125` (rendered "12.5%").
    pub fn percent_tenths(self) -> Result<i128, CoreError> {
        if self.num < 0 {
            return Err(CoreError::DomainOutOfRange("percent of negative fraction"));
        }
        let scaled = self
            .num
            .checked_mul(1000)
            .ok_or(CoreError::Overflow("percent tenths"))?;
        let q = scaled / self.den;
        let r = scaled % self.den;
        let twice = r.checked_mul(2).ok_or(CoreError::Overflow("percent tenths"))?;
        let up = match twice.cmp(&self.den) {
            core::cmp::Ordering::Less => false,
            core::cmp::Ordering::Greater => true,
            core::cmp::Ordering::Equal => q % 2 != 0, // half-even
        };
        Ok(if up { q + 1 } else { q })
    }
}
