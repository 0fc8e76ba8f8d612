mod support;

use hedgebook::application::{Engine, EngineSettings};
use hedgebook::domain::convergence::{self, ConvergencePolicy};
use hedgebook::domain::lay;
use hedgebook::domain::{DomainError, Granularity, HouseCount, HouseEdit};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use support::assertions::assert_decimal_near;

fn house_count(count: usize) -> HouseCount {
    HouseCount::try_from(count).unwrap()
}

fn back_pair(granularity: Granularity) -> Engine {
    let mut engine = Engine::new(EngineSettings {
        granularity,
        ..EngineSettings::default()
    });
    engine
        .edit_house(0, HouseEdit::new().odd("2.00").stake("100"))
        .unwrap();
    engine.edit_house(1, HouseEdit::new().odd("2.10")).unwrap();
    engine
}

#[test]
fn back_back_without_commission() {
    let engine = back_pair(Granularity::Cent);
    let results = engine.results();

    assert_eq!(engine.state().house(1).unwrap().stake, dec!(95.24));
    assert_eq!(results.total_stake, dec!(195.24));
    assert_eq!(results.profit_per_house[0], dec!(4.76));
    assert_eq!(results.profit_per_house[1], dec!(4.764));
    assert_eq!(results.worst_case_profit, dec!(4.76));
    assert_decimal_near(results.roi, dec!(2.44), dec!(0.005));
    assert!(engine.report().converged);
}

#[test]
fn lay_stake_derives_liability() {
    let mut engine = Engine::default();
    engine
        .edit_house(0, HouseEdit::new().odd("2.00").stake("50").lay(true))
        .unwrap();

    let house = engine.state().house(0).unwrap();
    assert!(house.is_lay);
    assert_eq!(house.liability, Some(dec!(50.00)));
}

#[test]
fn freebet_reduces_effective_odd() {
    let mut engine = Engine::default();
    engine
        .edit_house(1, HouseEdit::new().odd("3.00").freebet(true))
        .unwrap();
    assert_eq!(engine.state().house(1).unwrap().final_odd, dec!(2.00));
}

#[test]
fn unit_granularity_rounds_back_stakes() {
    let engine = back_pair(Granularity::Unit);
    assert_eq!(engine.state().house(1).unwrap().stake, dec!(95.00));
}

#[test]
fn without_anchor_stored_values_are_kept() {
    let mut engine = Engine::default();
    engine.set_anchor(0).unwrap();
    assert_eq!(engine.state().anchor_index(), None);

    engine
        .edit_house(0, HouseEdit::new().odd("2.00").stake("100"))
        .unwrap();
    engine
        .edit_house(1, HouseEdit::new().odd("2.10").stake("50"))
        .unwrap();

    let results = engine.results();
    assert_eq!(engine.state().house(1).unwrap().stake, dec!(50));
    assert_eq!(results.total_stake, dec!(150));
    assert_eq!(results.profit_per_house, vec![dec!(50), dec!(-45)]);
}

#[test]
fn settled_state_is_a_fixed_point() {
    let mut engine = back_pair(Granularity::Cent);
    engine
        .edit_house(1, HouseEdit::new().commission("5"))
        .unwrap();

    let (next, changed) = convergence::pass(engine.state(), dec!(0.01));
    assert!(!changed);
    assert_eq!(&next, engine.state());
}

#[test]
fn lay_liability_round_trip() {
    let mut engine = Engine::default();
    engine
        .edit_house(1, HouseEdit::new().odd("3.00").lay(true).liability("100"))
        .unwrap();
    let stake = engine.state().house(1).unwrap().stake;
    assert_eq!(stake, dec!(50.00));

    engine
        .edit_house(1, HouseEdit::new().stake(stake))
        .unwrap();
    let liability = engine.state().house(1).unwrap().liability.unwrap();
    assert_decimal_near(liability, dec!(100), dec!(0.01));
}

#[test]
fn lay_round_trip_holds_across_odds() {
    for odd in [dec!(1.25), dec!(1.9), dec!(2.5), dec!(4.2), dec!(11)] {
        let liability = dec!(137.45);
        let stake = lay::stake_for(liability, odd).unwrap();
        let back = lay::liability_for(stake, odd).unwrap();
        // One cent of stake error scales by odd - 1.
        let tolerance = dec!(0.01) * (odd - Decimal::ONE) + dec!(0.01);
        assert_decimal_near(back, liability, tolerance);
    }
}

#[test]
fn worst_case_is_the_least_favorable_outcome() {
    let mut engine = Engine::default();
    engine.configure(house_count(3), Granularity::HalfUnit);
    engine
        .edit_house(0, HouseEdit::new().odd("2.80").stake("100"))
        .unwrap();
    engine.edit_house(1, HouseEdit::new().odd("3.40")).unwrap();
    engine
        .edit_house(2, HouseEdit::new().odd("4.10").commission("2"))
        .unwrap();

    let results = engine.results();
    let minimum = results.profit_per_house.iter().copied().min().unwrap();
    assert_eq!(results.worst_case_profit, minimum);
    assert_eq!(
        results.roi,
        results.worst_case_profit / results.total_stake * Decimal::ONE_HUNDRED
    );
}

#[test]
fn direct_stake_edit_is_not_overwritten() {
    let mut engine = back_pair(Granularity::Cent);
    engine.edit_house(1, HouseEdit::new().stake("80")).unwrap();
    engine.edit_house(0, HouseEdit::new().stake("200")).unwrap();

    assert_eq!(engine.state().house(1).unwrap().stake, dec!(80));
    assert!(engine.state().overrides(1).stake);
}

#[test]
fn lay_with_commission_is_balanced() {
    let mut engine = Engine::default();
    engine
        .edit_house(0, HouseEdit::new().odd("2.00").stake("100"))
        .unwrap();
    engine
        .edit_house(
            1,
            HouseEdit::new().odd("2.10").lay(true).commission("5"),
        )
        .unwrap();

    let house = engine.state().house(1).unwrap();
    assert_eq!(house.stake, dec!(97.56));
    assert_eq!(house.liability, Some(dec!(107.32)));
}

#[test]
fn shrinking_house_count_keeps_inactive_values() {
    let mut engine = back_pair(Granularity::Cent);
    engine.configure(house_count(3), Granularity::Cent);
    engine.edit_house(2, HouseEdit::new().odd("4.00")).unwrap();
    assert_eq!(engine.state().house(2).unwrap().stake, dec!(50.00));

    engine.configure(house_count(2), Granularity::Cent);
    assert_eq!(engine.results().profit_per_house.len(), 2);
    assert_eq!(engine.state().house(2).unwrap().raw_odd, dec!(4.00));

    engine.configure(house_count(3), Granularity::Cent);
    assert_eq!(engine.state().house(2).unwrap().stake, dec!(50.00));
    assert_eq!(engine.results().profit_per_house.len(), 3);
}

#[test]
fn moving_the_anchor_resolves_from_the_new_house() {
    let mut engine = back_pair(Granularity::Cent);
    engine.configure(house_count(3), Granularity::Cent);
    engine.edit_house(2, HouseEdit::new().odd("4.00")).unwrap();

    engine.set_anchor(1).unwrap();
    assert_eq!(engine.state().anchor_index(), Some(1));
    engine.edit_house(1, HouseEdit::new().stake("100")).unwrap();

    // House 2 follows the new pool; house 0 keeps its typed stake.
    assert_eq!(engine.state().house(2).unwrap().stake, dec!(52.50));
    assert_eq!(engine.state().house(0).unwrap().stake, dec!(100));
}

#[test]
fn negative_inputs_clamp_to_zero() {
    let mut engine = Engine::default();
    engine
        .edit_house(1, HouseEdit::new().odd("-2").stake("-10"))
        .unwrap();
    let house = engine.state().house(1).unwrap();
    assert_eq!(house.raw_odd, Decimal::ZERO);
    assert_eq!(house.final_odd, Decimal::ZERO);
    assert_eq!(house.stake, Decimal::ZERO);
}

#[test]
fn inactive_houses_accept_edits() {
    let mut engine = back_pair(Granularity::Cent);
    engine
        .edit_house(5, HouseEdit::new().odd("9.00").stake("10"))
        .unwrap();
    assert_eq!(engine.state().house(5).unwrap().raw_odd, dec!(9.00));
    assert_eq!(engine.results().total_stake, dec!(195.24));
}

#[test]
fn out_of_pool_edit_is_rejected() {
    let mut engine = Engine::default();
    assert_eq!(
        engine.edit_house(6, HouseEdit::new().odd("2")).unwrap_err(),
        DomainError::HouseOutOfRange { index: 6, pool: 6 }
    );
    assert!(engine.set_anchor(9).is_err());
}

#[test]
fn iteration_cap_reports_non_convergence() {
    let mut engine = Engine::new(EngineSettings {
        policy: ConvergencePolicy {
            epsilon: dec!(0.01),
            max_iterations: 1,
        },
        ..EngineSettings::default()
    });
    engine
        .edit_house(0, HouseEdit::new().odd("2.00").stake("100"))
        .unwrap();
    engine.edit_house(1, HouseEdit::new().odd("2.10")).unwrap();

    let report = engine.report();
    assert!(!report.converged);
    assert_eq!(report.iterations, 1);
    // The last computed state is still stored.
    assert_eq!(engine.state().house(1).unwrap().stake, dec!(95.24));
}

#[test]
fn flagged_liability_survives_anchor_changes() {
    let mut engine = back_pair(Granularity::Cent);
    engine
        .edit_house(1, HouseEdit::new().odd("3.00").lay(true).liability("100"))
        .unwrap();
    engine.edit_house(0, HouseEdit::new().stake("200")).unwrap();

    let house = engine.state().house(1).unwrap();
    assert_eq!(house.liability, Some(dec!(100)));
    assert_eq!(house.stake, lay::stake_for(dec!(100), dec!(3.00)).unwrap());
    assert_eq!(house.stake, dec!(50.00));
    assert!(engine.report().converged);
}

#[test]
fn freebet_anchor_hedges_its_winnings() {
    let mut engine = Engine::default();
    engine
        .edit_house(0, HouseEdit::new().odd("3.00").stake("50").freebet(true))
        .unwrap();
    engine.edit_house(1, HouseEdit::new().odd("2.00")).unwrap();

    assert_eq!(engine.state().house(0).unwrap().final_odd, dec!(2.00));
    // Pool is 50 * 2.00 = 100.
    assert_eq!(engine.state().house(1).unwrap().stake, dec!(50.00));

    let results = engine.results();
    assert_eq!(results.total_stake, dec!(50));
    assert_eq!(results.total_freebet_value, dec!(50));
    assert_eq!(results.profit_per_house, vec![dec!(50), dec!(50)]);
    assert_eq!(results.worst_case_profit, dec!(50));
    assert_eq!(results.roi, dec!(100));
}

#[test]
fn huge_anchor_stake_does_not_overflow() {
    let mut engine = Engine::default();
    engine
        .edit_house(0, HouseEdit::new().odd("100").stake("1e27"))
        .unwrap();
    engine.edit_house(1, HouseEdit::new().odd("2.10")).unwrap();

    assert!(engine.state().house(1).unwrap().stake > Decimal::ZERO);
    let results = engine.results();
    assert!(results.total_stake > Decimal::ZERO);
    assert_eq!(results.profit_per_house.len(), 2);
}

#[test]
fn huge_boost_saturates_the_odd() {
    let mut engine = Engine::default();
    engine
        .edit_house(1, HouseEdit::new().odd("1e27").boost("1e27"))
        .unwrap();

    assert_eq!(engine.state().house(1).unwrap().final_odd, Decimal::MAX);
    assert_eq!(engine.results().total_stake, Decimal::ZERO);
}

#[test]
fn huge_proposed_stake_keeps_cent_precision() {
    let mut engine = Engine::default();
    engine
        .edit_house(0, HouseEdit::new().odd("2.00").stake("5e26"))
        .unwrap();
    engine.edit_house(1, HouseEdit::new().odd("1.01")).unwrap();

    let stake = engine.state().house(1).unwrap().stake;
    assert!(stake > Decimal::from_scientific("5e26").unwrap());
    assert_eq!(stake, stake.round_dp(2));
}
