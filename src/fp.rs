//! Arithmetic in the P-256 base field, p = 2²⁵⁶ − 2²²⁴ + 2¹⁹² + 2⁹⁶ − 1.

use core::fmt;
use core::ops::{Add, Mul, Neg, Sub};

use fiat_crypto::p256_64::*;
use subtle::{Choice, ConstantTimeEq};

/// The field modulus, least significant limb first.
const P: [u64; 4] = [
    0xffff_ffff_ffff_ffff,
    0x0000_0000_ffff_ffff,
    0x0000_0000_0000_0000,
    0xffff_ffff_0000_0001,
];

/// An element of the P-256 base field, held in Montgomery form.
///
/// The newtype keeps Montgomery-form limbs from being confused with canonical
/// integers; bytes only enter and leave via [FieldElement::from_bytes] and
/// [FieldElement::to_bytes].
#[derive(Copy, Clone)]
pub struct FieldElement(fiat_p256_montgomery_domain_field_element);

impl FieldElement {
    /// The value `0`.
    pub const ZERO: FieldElement = FieldElement::from_montgomery_limbs([0, 0, 0, 0]);

    /// The value `1`.
    pub const ONE: FieldElement = FieldElement::from_montgomery_limbs([
        0x0000_0000_0000_0001,
        0xffff_ffff_0000_0000,
        0xffff_ffff_ffff_ffff,
        0x0000_0000_ffff_fffe,
    ]);

    /// The value `2`.
    pub const TWO: FieldElement = FieldElement::from_montgomery_limbs([
        0x0000_0000_0000_0002,
        0xffff_fffe_0000_0000,
        0xffff_ffff_ffff_ffff,
        0x0000_0001_ffff_fffd,
    ]);

    /// The value `4`.
    pub const FOUR: FieldElement = FieldElement::from_montgomery_limbs([
        0x0000_0000_0000_0004,
        0xffff_fffc_0000_0000,
        0xffff_ffff_ffff_ffff,
        0x0000_0003_ffff_fffb,
    ]);

    /// The value `-1` i.e. `p - 1`.
    pub const MINUS_ONE: FieldElement = FieldElement::from_montgomery_limbs([
        0xffff_ffff_ffff_fffe,
        0x0000_0001_ffff_ffff,
        0x0000_0000_0000_0000,
        0xffff_fffe_0000_0002,
    ]);

    pub(crate) const fn from_montgomery_limbs(limbs: [u64; 4]) -> FieldElement {
        FieldElement(fiat_p256_montgomery_domain_field_element(limbs))
    }

    /// Parses a big-endian byte string of up to 32 bytes, reducing it mod p.
    /// Shorter inputs are left-padded with zeros.
    ///
    /// Panics if given more than 32 bytes.
    pub fn from_bytes(b: &[u8]) -> FieldElement {
        assert!(b.len() <= 32, "field elements are at most 32 bytes");

        let mut le = [0u8; 32];
        for (v, &byte) in le.iter_mut().zip(b.iter().rev()) {
            *v = byte;
        }

        let mut limbs = [0u64; 4];
        fiat_p256_from_bytes(&mut limbs, &le);

        // The bytes may encode a value in [p, 2²⁵⁶), and 2²⁵⁶ < 2p, so a single
        // conditional subtraction brings it into canonical range.
        let mut diff = [0u64; 4];
        let mut borrow = 0u8;
        for (d, (&l, &m)) in diff.iter_mut().zip(limbs.iter().zip(P.iter())) {
            let (v, b0) = l.overflowing_sub(m);
            let (v, b1) = v.overflowing_sub(borrow as u64);
            *d = v;
            borrow = (b0 | b1) as u8;
        }
        let mut reduced = [0u64; 4];
        fiat_p256_selectznz(&mut reduced, borrow, &diff, &limbs);

        let mut ret = fiat_p256_montgomery_domain_field_element([0; 4]);
        fiat_p256_to_montgomery(&mut ret, &fiat_p256_non_montgomery_domain_field_element(reduced));
        FieldElement(ret)
    }

    /// Returns the canonical 32-byte big-endian representation of the element.
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut limbs = fiat_p256_non_montgomery_domain_field_element([0; 4]);
        fiat_p256_from_montgomery(&mut limbs, &self.0);

        let mut b = [0u8; 32];
        fiat_p256_to_bytes(&mut b, &limbs.0);
        b.reverse();
        b
    }

    /// Returns the square of the element.
    pub fn square(&self) -> FieldElement {
        let mut ret = fiat_p256_montgomery_domain_field_element([0; 4]);
        fiat_p256_square(&mut ret, &self.0);
        FieldElement(ret)
    }

    /// Returns the multiplicative inverse of the element. The inverse of zero
    /// is zero; callers must not rely on it.
    pub fn invert(&self) -> FieldElement {
        // Inversion is implemented as exponentiation with exponent p − 2.
        // The sequence of 12 multiplications and 255 squarings is derived from the
        // following addition chain generated with github.com/mmcloughlin/addchain v0.4.0.
        //
        //	_10     = 2*1
        //	_11     = 1 + _10
        //	_110    = 2*_11
        //	_111    = 1 + _110
        //	_111000 = _111 << 3
        //	_111111 = _111 + _111000
        //	x12     = _111111 << 6 + _111111
        //	x15     = x12 << 3 + _111
        //	x16     = 2*x15 + 1
        //	x32     = x16 << 16 + x16
        //	i53     = x32 << 15
        //	x47     = x15 + i53
        //	i263    = ((i53 << 17 + 1) << 143 + x47) << 47
        //	return    (x47 + i263) << 2 + 1
        //
        let mut y = self.square();
        y = self * &y;
        y = y.square();
        y = self * &y;
        let mut t0 = y.square();
        for _ in 1..3 {
            t0 = t0.square();
        }
        t0 = &y * &t0;
        let mut t1 = t0.square();
        for _ in 1..6 {
            t1 = t1.square();
        }
        t0 = &t0 * &t1;
        for _ in 0..3 {
            t0 = t0.square();
        }
        y = &y * &t0;
        t0 = y.square();
        t0 = self * &t0;
        t1 = t0.square();
        for _ in 1..16 {
            t1 = t1.square();
        }
        t0 = &t0 * &t1;
        for _ in 0..15 {
            t0 = t0.square();
        }
        y = &y * &t0;
        for _ in 0..17 {
            t0 = t0.square();
        }
        t0 = self * &t0;
        for _ in 0..143 {
            t0 = t0.square();
        }
        t0 = &y * &t0;
        for _ in 0..47 {
            t0 = t0.square();
        }
        y = &y * &t0;
        for _ in 0..2 {
            y = y.square();
        }
        self * &y
    }

    /// Returns a square root of the element, or `None` if the element is not a
    /// quadratic residue. The returned root is the one produced by raising to
    /// (p + 1) / 4; the complementary root is its negation.
    pub fn sqrt(&self) -> Option<FieldElement> {
        // Since p = 3 mod 4, exponentiation by (p + 1) / 4 yields a square root
        // candidate. The sequence of 7 multiplications and 253 squarings is
        // derived from the following addition chain generated with
        // github.com/mmcloughlin/addchain v0.4.0.
        //
        //	_10       = 2*1
        //	_11       = 1 + _10
        //	_1100     = _11 << 2
        //	_1111     = _11 + _1100
        //	_11110000 = _1111 << 4
        //	_11111111 = _1111 + _11110000
        //	x16       = _11111111 << 8 + _11111111
        //	x32       = x16 << 16 + x16
        //	return      ((x32 << 32 + 1) << 96 + 1) << 94
        //
        let mut z = self.square();
        z = self * &z;
        let mut t0 = z.square();
        for _ in 1..2 {
            t0 = t0.square();
        }
        z = &z * &t0;
        t0 = z.square();
        for _ in 1..4 {
            t0 = t0.square();
        }
        z = &z * &t0;
        t0 = z.square();
        for _ in 1..8 {
            t0 = t0.square();
        }
        z = &z * &t0;
        t0 = z.square();
        for _ in 1..16 {
            t0 = t0.square();
        }
        z = &z * &t0;
        for _ in 0..32 {
            z = z.square();
        }
        z = self * &z;
        for _ in 0..96 {
            z = z.square();
        }
        z = self * &z;
        for _ in 0..94 {
            z = z.square();
        }

        // The candidate is only a root if squaring it returns the element.
        if &z.square() == self {
            Some(z)
        } else {
            None
        }
    }
}

impl Add for &FieldElement {
    type Output = FieldElement;

    fn add(self, rhs: &FieldElement) -> FieldElement {
        let mut ret = fiat_p256_montgomery_domain_field_element([0; 4]);
        fiat_p256_add(&mut ret, &self.0, &rhs.0);
        FieldElement(ret)
    }
}

impl Sub for &FieldElement {
    type Output = FieldElement;

    fn sub(self, rhs: &FieldElement) -> FieldElement {
        let mut ret = fiat_p256_montgomery_domain_field_element([0; 4]);
        fiat_p256_sub(&mut ret, &self.0, &rhs.0);
        FieldElement(ret)
    }
}

impl Mul for &FieldElement {
    type Output = FieldElement;

    fn mul(self, rhs: &FieldElement) -> FieldElement {
        let mut ret = fiat_p256_montgomery_domain_field_element([0; 4]);
        fiat_p256_mul(&mut ret, &self.0, &rhs.0);
        FieldElement(ret)
    }
}

impl Neg for &FieldElement {
    type Output = FieldElement;

    fn neg(self) -> FieldElement {
        let mut ret = fiat_p256_montgomery_domain_field_element([0; 4]);
        fiat_p256_opp(&mut ret, &self.0);
        FieldElement(ret)
    }
}

impl ConstantTimeEq for FieldElement {
    fn ct_eq(&self, other: &FieldElement) -> Choice {
        // fiat keeps values fully reduced, so the limbs are canonical.
        self.0 .0.ct_eq(&other.0 .0)
    }
}

impl Eq for FieldElement {}

impl PartialEq for FieldElement {
    fn eq(&self, other: &FieldElement) -> bool {
        self.ct_eq(other).into()
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.to_bytes() {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}
