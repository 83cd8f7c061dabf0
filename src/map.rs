//! The Shallue–van de Woestijne map from field elements to curve points, and
//! its per-branch inverse.
//!
//! `f` maps any field element outside {−1, 0, 1} to a point on the curve, by
//! trying the two candidate abscissas X₀(u) and X₁(u); exactly one of them has
//! a square g value. `r` inverts `f` one biquadratic root at a time: a point
//! has up to four preimages per branch, selected by two sign bits.

use crate::fp::FieldElement;
use crate::point::{AffinePoint, CURVE_A, CURVE_B};

/// g(x) = x³ − 3x + b, the right-hand side of the curve equation.
pub fn g(x: &FieldElement) -> FieldElement {
    // x^3
    let mut y = x.square();
    y = &y * x;

    // -3x
    y = &y - x;
    y = &y - x;
    y = &y - x;

    // b
    &y + &CURVE_B
}

/// X₀(u) = −(b/a) · (1 + 1/(u⁴ − u²)). Not defined for u ∈ {−1, 0, 1}.
fn x_0(u: &FieldElement) -> FieldElement {
    let mut neg_b_div_a = CURVE_A.invert();
    neg_b_div_a = &CURVE_B * &neg_b_div_a;
    neg_b_div_a = -&neg_b_div_a;

    let u2 = u.square();
    let u4 = u2.square();
    let i = &(&u4 - &u2).invert() + &FieldElement::ONE;

    &neg_b_div_a * &i
}

/// X₁(u) = −u² · X₀(u).
fn x_1(u: &FieldElement) -> FieldElement {
    let neg_u2 = -&u.square();
    &neg_u2 * &x_0(u)
}

/// Maps a field element to a point on the curve.
pub fn f(u: &FieldElement) -> AffinePoint {
    // Case 1: u \in {-1, 0, 1}
    // return: infinity
    if u == &FieldElement::ONE || u == &FieldElement::ZERO || u == &FieldElement::MINUS_ONE {
        return AffinePoint::IDENTITY;
    }

    // Case 2: u \not\in {-1, 0, 1} and g(X_0(u)) is a square
    // return: (X_0(u), \sqrt{g(X_0(u))})
    let x = x_0(u);
    if let Some(y) = g(&x).sqrt() {
        return AffinePoint { x, y };
    }

    // Case 3: u \not\in {-1, 0, 1} and g(X_0(u)) is not a square
    // return: (X_1(u), -\sqrt{g(X_1(u))})
    let x = x_1(u);
    let y = g(&x)
        .sqrt()
        .expect("one of g(X_0(u)) and g(X_1(u)) must be a square");
    AffinePoint { x, y: -&y }
}

/// Returns the `j`-th preimage of the point (x, y) under [f], or `None` if
/// that biquadratic root does not exist. The point must be on the curve and
/// must not be the identity; `j` selects among the four roots of the branch
/// the point belongs to.
pub fn r(x: &FieldElement, y: &FieldElement, j: u8) -> Option<FieldElement> {
    // Inverting `f` requires two branches, one for X_0 and one for X_1, each of
    // which has four roots. omega is constant across all of them.
    let mut omega = CURVE_B.invert();
    omega = &CURVE_A * &omega;
    omega = &omega * x;
    omega = &omega + &FieldElement::ONE;

    let mut a = (&omega.square() - &(&omega * &FieldElement::FOUR)).sqrt()?;

    // The first division in roots comes at \sqrt{\omega^2 - 4 \omega}. The
    // first and second roots have positive values, the third and fourth roots
    // have negative values.
    if j == 2 || j == 3 {
        a = -&a;
    }

    // If y is square, then x=X_0(u); otherwise x=X_1(u).
    let b = if y.sqrt().is_some() {
        // If x=X_0(u), then we divide by 2 \omega.
        (&FieldElement::TWO * &omega).invert()
    } else {
        // If x=X_1(u), then we divide by 2.
        FieldElement::TWO.invert()
    };

    let mut c = (&(&omega + &a) * &b).sqrt()?;

    // The second division in roots comes here. The first and third roots have
    // positive values, the second and fourth roots have negative values.
    if j == 1 || j == 3 {
        c = -&c;
    }

    Some(c)
}
