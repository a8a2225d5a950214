//! Evaluators of the trigonometric functions.
//!
//! The forward functions reduce their argument into a small interval before calling into `std`,
//! and snap results that are within [`SNAP_EPSILON`] of 0 or ±1 onto the exact value, so that
//! `\sin\frac{\pi}{2}` is exactly `1`. The inverse functions return exact fractions of `\pi` at
//! the boundaries of their domain.
//!
//! Every evaluator returns [`None`] when the result is not a finite number.

use super::symbol::PI as PI_SYMBOL;
use crate::tree::Node;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Distance under which a reduced argument is considered to be exactly on a multiple of `π/2`.
pub const SNAP_EPSILON: f64 = 1e-14;

fn near(a: f64, b: f64) -> bool {
    (a - b).abs() < SNAP_EPSILON
}

/// Sine, with the argument reduced into `[-π/2, π/2]`.
pub fn sin(x: f64) -> f64 {
    let turns = (x / PI).round();
    let reduced = x - turns * PI;
    // every half turn flips the sign
    let sign = if turns % 2.0 == 0.0 { 1.0 } else { -1.0 };

    if near(reduced, 0.0) {
        0.0
    } else if near(reduced, FRAC_PI_2) {
        sign
    } else if near(reduced, -FRAC_PI_2) {
        -sign
    } else {
        sign * reduced.sin()
    }
}

/// Cosine, with the argument reduced into `[0, π]`.
pub fn cos(x: f64) -> f64 {
    let mut reduced = x.rem_euclid(TAU);
    if reduced > PI {
        reduced = TAU - reduced;
    }

    if near(reduced, 0.0) {
        1.0
    } else if near(reduced, FRAC_PI_2) {
        0.0
    } else if near(reduced, PI) {
        -1.0
    } else {
        reduced.cos()
    }
}

fn finite(value: f64) -> Option<Node> {
    value.is_finite().then(|| Node::num(value))
}

/// `π / denominator`, as a fraction.
fn pi_over(denominator: f64) -> Node {
    Node::fraction(Node::constant(PI_SYMBOL), Node::num(denominator))
}

pub fn eval_sin(x: f64) -> Option<Node> {
    finite(sin(x))
}

pub fn eval_cos(x: f64) -> Option<Node> {
    finite(cos(x))
}

pub fn eval_tan(x: f64) -> Option<Node> {
    finite(sin(x) / cos(x))
}

pub fn eval_csc(x: f64) -> Option<Node> {
    finite(1.0 / sin(x))
}

pub fn eval_sec(x: f64) -> Option<Node> {
    finite(1.0 / cos(x))
}

pub fn eval_cot(x: f64) -> Option<Node> {
    finite(cos(x) / sin(x))
}

pub fn eval_arcsin(x: f64) -> Option<Node> {
    if x == 1.0 {
        Some(pi_over(2.0))
    } else if x == -1.0 {
        Some(Node::negation(pi_over(2.0)))
    } else {
        finite(x.asin())
    }
}

pub fn eval_arccos(x: f64) -> Option<Node> {
    if x == 1.0 {
        Some(Node::num(0.0))
    } else if x == 0.0 {
        Some(pi_over(2.0))
    } else if x == -1.0 {
        Some(Node::constant(PI_SYMBOL))
    } else {
        finite(x.acos())
    }
}

pub fn eval_arctan(x: f64) -> Option<Node> {
    if x == 1.0 {
        Some(pi_over(4.0))
    } else if x == -1.0 {
        Some(Node::negation(pi_over(4.0)))
    } else if x == f64::INFINITY {
        Some(pi_over(2.0))
    } else if x == f64::NEG_INFINITY {
        Some(Node::negation(pi_over(2.0)))
    } else {
        finite(x.atan())
    }
}

pub fn eval_arccsc(x: f64) -> Option<Node> {
    eval_arcsin(1.0 / x)
}

pub fn eval_arcsec(x: f64) -> Option<Node> {
    eval_arccos(1.0 / x)
}

pub fn eval_arccot(x: f64) -> Option<Node> {
    eval_arctan(1.0 / x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn exact_sine() {
        assert_eq!(sin(FRAC_PI_2), 1.0);
        assert_eq!(sin(PI), 0.0);
        assert_eq!(sin(-FRAC_PI_2), -1.0);
        assert_eq!(sin(3.0 * FRAC_PI_2), -1.0);
        assert_eq!(sin(2.0 * PI), 0.0);
    }

    #[test]
    fn exact_cosine() {
        assert_eq!(cos(PI), -1.0);
        assert_eq!(cos(FRAC_PI_2), 0.0);
        assert_eq!(cos(2.0 * PI), 1.0);
        assert_eq!(cos(-PI), -1.0);
    }

    #[test]
    fn inexact_values() {
        assert_float_absolute_eq!(sin(1.0), 1.0f64.sin(), 1e-15);
        assert_float_absolute_eq!(sin(3.0 * PI / 4.0), (PI / 4.0).sin(), 1e-15);
        assert_float_absolute_eq!(cos(-2.0), 2.0f64.cos(), 1e-15);
    }

    #[test]
    fn poles_are_refused() {
        assert_eq!(eval_tan(FRAC_PI_2), None);
        assert_eq!(eval_csc(0.0), None);
        assert_eq!(eval_cot(PI), None);
        assert_eq!(eval_cot(FRAC_PI_2), Some(Node::num(0.0)));
    }

    #[test]
    fn inverse_boundaries() {
        assert_eq!(eval_arcsin(1.0), Some(pi_over(2.0)));
        assert_eq!(eval_arccos(-1.0), Some(Node::constant("\\pi")));
        assert_eq!(eval_arctan(-1.0), Some(Node::negation(pi_over(4.0))));
        assert_eq!(eval_arccot(0.0), Some(pi_over(2.0)));
        assert_eq!(eval_arcsin(2.0), None);
        assert_eq!(eval_arcsec(0.5), None);
    }
}
