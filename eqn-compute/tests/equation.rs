use assert_float_eq::assert_float_absolute_eq;
use eqn_compute::{Action, Config, Equation, Rewrite, Step};
use eqn_parser::{error::{TooManyComparisons, UnrecognizedExpression}, token::TokenKind};
use pretty_assertions::assert_eq;

fn rewrites(steps: &[Step]) -> Vec<Rewrite> {
    steps.iter().filter_map(|step| step.rewrite.clone()).collect()
}

fn result(steps: &[Step]) -> f64 {
    steps.last()
        .and_then(|step| step.tree.child())
        .and_then(|node| node.as_number())
        .unwrap()
}

#[test]
fn parenthesized_difference() {
    let steps = Equation::parse("2+\\left(8-9\\right)\\cdot4").unwrap().steps();
    assert_eq!(steps.last().unwrap().render(), "-2");
    assert_eq!(steps[0].render(), "2+ \\left(8-9\\right)\\cdot 4\\approx-2");
    assert_eq!(steps.last().unwrap().prefix(), Some("\\approx"));
    assert!(steps[1..steps.len() - 1].iter().all(|step| step.prefix() == Some("=")));
}

#[test]
fn negated_sum_collapses() {
    let steps = Equation::parse("-\\left(2+3\\right)").unwrap().steps();
    assert_eq!(steps[0].render(), "-\\left(2+ 3\\right)\\approx-5");
    assert_eq!(result(&steps), -5.0);
}

#[test]
fn folding_order_does_not_matter() {
    for input in ["2+3+4", "4+3+2"] {
        let steps = Equation::parse(input).unwrap().steps();
        assert_float_absolute_eq!(result(&steps), 9.0);
    }
}

#[test]
fn reduces_fraction() {
    let steps = Equation::parse("\\frac{6}{8}").unwrap().steps();
    assert_eq!(steps[1].rewrite, Some(Rewrite::ReduceFraction { numerator: 6.0, denominator: 8.0 }));
    assert_eq!(steps[1].render(), "\\frac{3}{4}");
    assert_eq!(
        steps[1].message(),
        "Simplify by dividing the numbers 6 and 8 by their GCD (Greatest Common Divisor).",
    );
    assert_float_absolute_eq!(result(&steps), 0.75);
}

#[test]
fn constants_before_division() {
    let steps = Equation::parse("\\frac{2\\pi}{2e}").unwrap().steps();
    assert_eq!(
        rewrites(&steps),
        vec![
            Rewrite::CancelFactors,
            Rewrite::ConvertConstants(vec!["\\pi".to_string(), "e".to_string()]),
            Rewrite::Construct { name: "fraction" },
            Rewrite::Round { decimals: 2 },
        ],
    );

    let exact = &steps[steps.len() - 2];
    assert!(exact.precise);
    assert_float_absolute_eq!(
        exact.tree.child().unwrap().as_number().unwrap(),
        std::f64::consts::PI / std::f64::consts::E
    );

    let rounded = steps.last().unwrap();
    assert_eq!(rounded.prefix(), Some("\\approx"));
    assert_eq!(rounded.render(), "1.16");
}

#[test]
fn trigonometry_is_exact() {
    let steps = Equation::parse("\\sin\\frac{\\pi}{2}").unwrap().steps();
    assert_eq!(result(&steps), 1.0);
    assert_eq!(rewrites(&steps), vec![Rewrite::Trig { name: "sine" }]);

    let steps = Equation::parse("\\cos\\pi").unwrap().steps();
    assert_eq!(result(&steps), -1.0);
}

#[test]
fn undefined_function_stays() {
    let steps = Equation::parse("\\arcsin 2").unwrap().steps();
    assert_eq!(steps.len(), 1);
    assert!(steps[0].tree.child().unwrap().is(TokenKind::TrigFun));
}

#[test]
fn zero_denominator_stays() {
    let steps = Equation::parse("\\frac{1}{0}").unwrap().steps();
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].render(), "\\frac{1}{0}");
    assert_eq!(steps[0].rewrite, None);
}

#[test]
fn zero_divided_by_zero_is_zero() {
    let steps = Equation::parse("0\\div0").unwrap().steps();
    assert_eq!(rewrites(&steps), vec![Rewrite::MultiplyZero]);
    assert_eq!(steps[0].render(), "0\\cdot \\div0\\approx0");
    assert_eq!(result(&steps), 0.0);
}

#[test]
fn undefined_function_keeps_exact_argument() {
    let steps = Equation::parse("\\tan\\left(\\frac{\\pi}{2}\\right)").unwrap().steps();
    let last = steps.last().unwrap();
    assert!(last.tree.child().unwrap().is(TokenKind::TrigFun));
    assert_eq!(last.render(), "\\tan1.5707963267948966");
}

#[test]
fn comparisons() {
    let equation = Equation::parse("2=3").unwrap();
    assert_eq!(equation.classify(), Action::Compare);
    let steps = equation.steps();
    assert_eq!(steps[0].render(), "2=3 \\implies {\\text{False}}");
    assert_eq!(steps.last().unwrap().rewrite, Some(Rewrite::EvaluateComparison(false)));

    let steps = Equation::parse("2=2").unwrap().steps();
    assert_eq!(steps.last().unwrap().render(), "{\\text{True}}");
    assert_eq!(steps.last().unwrap().prefix(), Some("\\implies"));

    let steps = Equation::parse("1+1>3").unwrap().steps();
    assert_eq!(steps.last().unwrap().render(), "{\\text{False}}");
}

#[test]
fn solves_linear_equation() {
    let equation = Equation::parse("2x+3=7").unwrap();
    assert_eq!(equation.classify(), Action::Solve);
    let steps = equation.steps();
    assert_eq!(steps.last().unwrap().render(), "x=2");
    assert_eq!(steps[0].render(), "2\\cdot x+ 3=7 \\implies x=2");
    assert!(steps[1..].iter().all(|step| step.prefix() == Some("\\implies")));
}

#[test]
fn variable_cancels_out() {
    let steps = Equation::parse("x+1=x+2").unwrap().steps();
    assert_eq!(steps.last().unwrap().render(), "{\\text{False}}");
}

#[test]
fn no_consecutive_identical_steps() {
    let inputs = [
        "2+\\left(8-9\\right)\\cdot 4",
        "\\frac{1}{2}+\\frac{1}{3}",
        "\\frac{2\\pi}{2e}\\cdot 3",
        "6\\div 4-\\left|-2\\right|",
        "3x+2-x=10",
    ];
    for input in inputs {
        let steps = Equation::parse(input).unwrap().steps();
        for pair in steps[1..].windows(2) {
            assert_ne!(pair[0].tree, pair[1].tree, "in the steps of `{}`", input);
        }
    }
}

#[test]
fn configured_bound() {
    let config = Config { max_cycles: 1, ..Config::default() };
    let steps = Equation::parse("1+2+3\\cdot 4").unwrap().with_config(config).simplify();
    assert_eq!(steps.len(), 2);
}

#[test]
fn errors() {
    let err = Equation::parse("1=2=3").unwrap_err();
    assert!(err.is::<TooManyComparisons>());
    assert_eq!(err.spans.len(), 2);

    let err = Equation::parse("\\cso x").unwrap_err();
    let kind = err.downcast_ref::<UnrecognizedExpression>().unwrap();
    assert_eq!(kind.suggestion, Some("\\csc"));
}
