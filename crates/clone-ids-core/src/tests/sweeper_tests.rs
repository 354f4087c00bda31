use super::*;
use crate::test_support::MockTarget;
use crate::CloneTarget;
use std::rc::Rc;

#[test]
fn default_cadence_sweeps_every_fifth_tick() {
    let mut sweeper = Sweeper::new(5);
    let due = (1..=15).filter(|_| sweeper.tick()).count();
    assert_eq!(due, 3);
    assert_eq!(sweeper.ticks(), 15);
}

#[test]
fn cadence_fires_on_multiples_of_the_interval() {
    let mut sweeper = Sweeper::new(3);
    let pattern: Vec<bool> = (0..7).map(|_| sweeper.tick()).collect();
    assert_eq!(pattern, vec![false, false, true, false, false, true, false]);
}

#[test]
fn zero_interval_sweeps_every_tick() {
    let mut sweeper = Sweeper::new(0);
    assert_eq!(sweeper.interval(), 1);
    assert!(sweeper.tick());
    assert!(sweeper.tick());
}

#[test]
fn reset_restarts_the_cadence() {
    let mut sweeper = Sweeper::new(2);
    assert!(!sweeper.tick());
    sweeper.reset();
    assert!(!sweeper.tick());
    assert!(sweeper.tick());
}

#[test]
fn sweep_reclaims_only_dead_entries() {
    let mut registry = Registry::new();
    let alive: Rc<dyn CloneTarget> = MockTarget::clone_target();
    let detached = MockTarget::at(10.0, 20.0);
    let detached_dyn: Rc<dyn CloneTarget> = detached.clone();
    let dropped = MockTarget::clone_target();

    let alive_id = registry.assign(&alive).unwrap();
    let detached_id = registry.assign(&detached_dyn).unwrap();
    let dropped_id = registry.assign(&dropped).unwrap();

    detached.detached.set(true);
    drop(dropped);

    let report = sweep(&mut registry);
    assert_eq!(report.scanned, 3);
    assert_eq!(report.reclaimed, vec![detached_id, dropped_id]);
    assert!(!report.is_clean());

    assert_eq!(registry.ids().collect::<Vec<_>>(), vec![alive_id]);
    assert!(registry.pool().is_free(detached_id));
    assert!(registry.pool().is_free(dropped_id));
    assert_eq!(detached.clone_id(), None);
}

#[test]
fn sweep_does_not_run_teardown_hooks() {
    let mut registry = Registry::new();
    let target = MockTarget::at(0.0, 0.0);
    let target_dyn: Rc<dyn CloneTarget> = target.clone();
    registry.assign(&target_dyn).unwrap();
    let fired = Rc::new(std::cell::Cell::new(false));
    {
        let fired = Rc::clone(&fired);
        target.hooks.register(move || fired.set(true));
    }
    target.detached.set(true);

    sweep(&mut registry);
    assert!(!fired.get());
    assert_eq!(target.hooks.len(), 1);
}

#[test]
fn clean_registry_produces_clean_report() {
    let mut registry = Registry::new();
    let target = MockTarget::clone_target();
    registry.assign(&target).unwrap();
    let report = sweep(&mut registry);
    assert_eq!(
        report,
        SweepReport {
            scanned: 1,
            reclaimed: Vec::new()
        }
    );
    assert!(report.is_clean());
}
