//! End-to-end properties of the tree variants.
//!
//! Convergence to the closed forms, barrier parity, early-exercise
//! monotonicity, lattice shape, and determinism.

use approx::assert_abs_diff_eq;
use proptest::prelude::*;
use tp_analytic::{analytic_barrier_price, black_scholes_price};
use tp_core::{BarrierKind, BarrierType, ExerciseStyle, OptionType, TreeParams};
use tp_lattice::{AdditiveTrinomial, BarrierTree, OptionTree, Trigeorgis};

fn dividend_params(steps: usize) -> TreeParams {
    TreeParams::new(100.0, 100.0, 1.0, 0.06, 0.2, steps).with_dividend(0.03)
}

fn barrier_params(steps: usize) -> TreeParams {
    TreeParams::new(10.0, 10.0, 0.3, 0.01, 0.2, steps)
}

// ─── Convergence ──────────────────────────────────────────────────────────────

#[test]
fn trigeorgis_european_converges_to_black_scholes() {
    for option_type in [OptionType::Call, OptionType::Put] {
        let bs = black_scholes_price(option_type, 100.0, 100.0, 0.06, 0.03, 0.2, 1.0);
        let errors: Vec<f64> = [50, 100, 200, 400]
            .into_iter()
            .map(|steps| {
                let p = dividend_params(steps);
                let tree = Trigeorgis::new(&p, option_type, ExerciseStyle::European).unwrap();
                (tree.instrument_value() - bs).abs()
            })
            .collect();
        for pair in errors.windows(2) {
            assert!(pair[1] < pair[0], "{option_type}: errors {errors:?}");
        }
        // O(1/n): eight times the steps leaves well under a quarter of the error.
        assert!(
            errors[3] < errors[0] / 4.0,
            "{option_type}: errors {errors:?}"
        );
        assert!(errors[3] < 0.01, "{option_type}: errors {errors:?}");
    }
}

#[test]
fn trinomial_and_binomial_agree() {
    let p = dividend_params(400);
    for option_type in [OptionType::Call, OptionType::Put] {
        for exercise in [ExerciseStyle::European, ExerciseStyle::American] {
            let bin = Trigeorgis::new(&p, option_type, exercise).unwrap();
            let tri = AdditiveTrinomial::new(&p, option_type, exercise).unwrap();
            assert_abs_diff_eq!(
                bin.instrument_value(),
                tri.instrument_value(),
                epsilon = 0.01
            );
        }
    }
}

// ─── Barrier consistency ──────────────────────────────────────────────────────

#[test]
fn up_barrier_call_parity_and_closed_form() {
    let p = barrier_params(200);
    let build = |kind| {
        BarrierTree::new(&p, 11.0, kind, OptionType::Call, ExerciseStyle::European).unwrap()
    };
    let up_in = build(BarrierKind::In);
    let up_out = build(BarrierKind::Out);
    let vanilla = Trigeorgis::new(&p, OptionType::Call, ExerciseStyle::European).unwrap();

    assert_eq!(up_in.barrier_type(), BarrierType::UpIn);
    assert_abs_diff_eq!(
        up_in.instrument_value() + up_out.instrument_value(),
        vanilla.instrument_value(),
        epsilon = 1e-9
    );

    let closed_form = |barrier_type| {
        analytic_barrier_price(
            OptionType::Call,
            barrier_type,
            10.0,
            10.0,
            11.0,
            0.0,
            0.01,
            0.0,
            0.2,
            0.3,
        )
    };
    assert_abs_diff_eq!(
        up_in.instrument_value(),
        closed_form(BarrierType::UpIn),
        epsilon = 0.02
    );
    assert_abs_diff_eq!(
        up_out.instrument_value(),
        closed_form(BarrierType::UpOut),
        epsilon = 0.02
    );
    assert_abs_diff_eq!(
        vanilla.instrument_value(),
        black_scholes_price(OptionType::Call, 10.0, 10.0, 0.01, 0.0, 0.2, 0.3),
        epsilon = 0.005
    );
}

#[test]
fn down_barrier_put_parity() {
    let p = barrier_params(200);
    let build = |kind| {
        BarrierTree::new(&p, 9.0, kind, OptionType::Put, ExerciseStyle::European).unwrap()
    };
    let vanilla = Trigeorgis::new(&p, OptionType::Put, ExerciseStyle::European).unwrap();
    let sum =
        build(BarrierKind::In).instrument_value() + build(BarrierKind::Out).instrument_value();
    assert_abs_diff_eq!(sum, vanilla.instrument_value(), epsilon = 1e-9);
}

#[test]
fn barrier_price_tree_is_in_real_units() {
    let tree = BarrierTree::new(
        &barrier_params(20),
        11.0,
        BarrierKind::Out,
        OptionType::Call,
        ExerciseStyle::European,
    )
    .unwrap();
    let prices = tree.price_tree();
    assert_abs_diff_eq!(prices[(20, 0)], 10.0, epsilon = 1e-12);
    for col in 0..prices.cols() {
        for value in prices.column(col) {
            assert!(
                value == 0.0 || (value > 0.0 && value < 11.0),
                "price {value}"
            );
        }
    }
}

// ─── Early exercise ───────────────────────────────────────────────────────────

#[test]
fn american_is_never_worth_less_than_european() {
    let p = dividend_params(150);
    for option_type in [OptionType::Call, OptionType::Put] {
        let eu = Trigeorgis::new(&p, option_type, ExerciseStyle::European).unwrap();
        let am = Trigeorgis::new(&p, option_type, ExerciseStyle::American).unwrap();
        assert!(
            am.instrument_value() >= eu.instrument_value(),
            "{option_type}"
        );
        let am_values = am.value_tree();
        let eu_values = eu.value_tree();
        for row in 0..am_values.rows() {
            for col in 0..am_values.cols() {
                assert!(am_values[(row, col)] >= eu_values[(row, col)]);
            }
        }
    }
}

#[test]
fn other_style_equals_a_fresh_trinomial_tree() {
    let p = dividend_params(120);
    for option_type in [OptionType::Call, OptionType::Put] {
        let am = AdditiveTrinomial::new(&p, option_type, ExerciseStyle::American).unwrap();
        let eu = AdditiveTrinomial::new(&p, option_type, ExerciseStyle::European).unwrap();
        assert_eq!(
            am.compute_other_style_price(ExerciseStyle::European).unwrap(),
            eu.instrument_value()
        );
        assert_eq!(
            eu.compute_other_style_price(ExerciseStyle::American).unwrap(),
            am.instrument_value()
        );
    }
}

// ─── Boundary ─────────────────────────────────────────────────────────────────

#[test]
fn one_step_tree_is_minimal() {
    let p = dividend_params(1);
    let tree = Trigeorgis::new(&p, OptionType::Put, ExerciseStyle::European).unwrap();
    let values = tree.value_tree();
    assert_eq!((values.rows(), values.cols()), (3, 2));
    let x0 = 100.0_f64.ln();
    let up = (x0 + tree.dx_up()).exp();
    let down = (x0 - tree.dx_up()).exp();
    let expected = tree.discount()
        * (tree.p_up() * (100.0 - up).max(0.0) + tree.p_down() * (100.0 - down).max(0.0));
    assert_abs_diff_eq!(tree.instrument_value(), expected, epsilon = 1e-12);
}

// ─── Properties ───────────────────────────────────────────────────────────────

fn tree_params() -> impl Strategy<Value = TreeParams> {
    (
        1usize..40,
        50.0f64..150.0,
        50.0f64..150.0,
        0.1f64..2.0,
        0.0f64..0.1,
        0.1f64..0.5,
    )
        .prop_map(|(steps, current, strike, ttm, rf, vol)| {
            TreeParams::new(current, strike, ttm, rf, vol, steps)
        })
}

fn trinomial_params() -> impl Strategy<Value = TreeParams> {
    tree_params().prop_map(|p| p.with_steps(p.steps.max(10)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn trinomial_fills_the_triangle(p in trinomial_params()) {
        let tree = AdditiveTrinomial::new(&p, OptionType::Call, ExerciseStyle::European).unwrap();
        let lattice = tree.lattice().price_lattice().unwrap();
        let indexer = lattice.indexer();
        for col in 0..=p.steps {
            prop_assert_eq!(indexer.band_width(col), 2 * col + 1);
            prop_assert_eq!(lattice.populated_count(col), 2 * col + 1);
            let rows = indexer.reachable_rows(col);
            prop_assert_eq!(
                indexer.mid_row() - rows.start,
                rows.end - 1 - indexer.mid_row()
            );
        }
    }

    #[test]
    fn binomial_columns_are_symmetric(p in tree_params()) {
        let tree = Trigeorgis::new(&p, OptionType::Put, ExerciseStyle::American).unwrap();
        let lattice = tree.lattice().price_lattice().unwrap();
        let mid = lattice.indexer().mid_row();
        for col in 0..=p.steps {
            let rows: Vec<usize> = lattice.populated(col).map(|(row, _)| row).collect();
            prop_assert_eq!(rows.len(), col + 1);
            prop_assert_eq!(rows[0], mid - col);
            prop_assert_eq!(rows[rows.len() - 1], mid + col);
        }
    }

    #[test]
    fn root_holds_the_log_spot(p in tree_params()) {
        let tree = Trigeorgis::new(&p, OptionType::Call, ExerciseStyle::European).unwrap();
        prop_assert_eq!(tree.log_price_tree()[(p.steps, 0)], p.current.ln());
        let q = p.with_steps(p.steps.max(10));
        let tri = AdditiveTrinomial::new(&q, OptionType::Call, ExerciseStyle::European).unwrap();
        prop_assert_eq!(tri.log_price_tree()[(q.steps, 0)], p.current.ln());
    }

    #[test]
    fn early_exercise_never_hurts(p in tree_params()) {
        for option_type in [OptionType::Call, OptionType::Put] {
            let eu = Trigeorgis::new(&p, option_type, ExerciseStyle::European).unwrap();
            let am = Trigeorgis::new(&p, option_type, ExerciseStyle::American).unwrap();
            prop_assert!(am.instrument_value() >= eu.instrument_value());
        }
    }

    #[test]
    fn construction_is_deterministic(p in tree_params(), barrier_offset in 1.05f64..1.5) {
        let a = Trigeorgis::new(&p, OptionType::Put, ExerciseStyle::American).unwrap();
        let b = Trigeorgis::new(&p, OptionType::Put, ExerciseStyle::American).unwrap();
        prop_assert_eq!(a.price_tree(), b.price_tree());
        prop_assert_eq!(a.value_tree(), b.value_tree());

        let barrier = p.current * barrier_offset;
        let european = ExerciseStyle::European;
        let knock_in = || {
            BarrierTree::new(&p, barrier, BarrierKind::In, OptionType::Call, european).unwrap()
        };
        let (c, d) = (knock_in(), knock_in());
        prop_assert_eq!(c.price_tree(), d.price_tree());
        prop_assert_eq!(c.value_tree(), d.value_tree());
    }

    #[test]
    fn knock_in_plus_knock_out_is_vanilla(p in tree_params(), barrier_ratio in 0.7f64..1.3) {
        let barrier = p.current * barrier_ratio;
        for option_type in [OptionType::Call, OptionType::Put] {
            let european = ExerciseStyle::European;
            let vanilla = Trigeorgis::new(&p, option_type, european).unwrap().instrument_value();
            let barrier_value = |kind| {
                BarrierTree::new(&p, barrier, kind, option_type, european)
                    .unwrap()
                    .instrument_value()
            };
            let knock_in = barrier_value(BarrierKind::In);
            let knock_out = barrier_value(BarrierKind::Out);
            prop_assert!(
                (knock_in + knock_out - vanilla).abs() <= 1e-9 * vanilla.max(1.0)
            );
        }
    }
}
