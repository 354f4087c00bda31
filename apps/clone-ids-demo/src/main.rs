use clone_ids_core::{CloneIds, CloneIdsConfig, CloneTarget, HostEvent};
use clone_ids_testing::{CloneIdsTestRule, TestStage};

fn main() {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .format_timestamp_millis()
        .init();

    let info = CloneIds::info();
    println!("=== {} ({}) ===", info.name, info.id);
    for block in info.blocks {
        println!("  {:<16} {}", block.opcode, block);
    }
    println!();

    let mut rule = CloneIdsTestRule::with_stage(TestStage::new(), CloneIdsConfig::default());
    let cat = rule.stage().add_sprite("Cat");

    let clones: Vec<_> = (0..3).map(|_| rule.spawn_with_id(&cat)).collect();
    for (index, clone) in clones.iter().enumerate() {
        clone.go_to(index as f64 * 50.0, 0.0);
        rule.ids().set_data(&**clone, "health", &format!("{}", 100 - index * 10));
    }
    report(&rule, "three clones spawned");

    rule.ids().delete_clone_by_id(2.0);
    report(&rule, "clone 2 deleted by id");

    let late = rule.spawn_with_id(&cat);
    println!(
        "new clone received id {} at x = {}",
        rule.ids().my_id(&*late),
        rule.ids().property_of_id(2.0, "x")
    );

    rule.stage().remove_without_teardown(&clones[0]);
    report(&rule, "clone 1 removed without teardown");

    let sweeps = rule.advance_frames(CloneIdsConfig::DEFAULT_SWEEP_INTERVAL as usize);
    for sweep in &sweeps {
        println!(
            "sweep after frame {}: scanned {}, reclaimed {:?}",
            rule.frames(),
            sweep.scanned,
            sweep.reclaimed
        );
    }
    report(&rule, "after sweep cadence");

    if let Err(err) = rule.ids().handle_event_named("PROJECT_PAUSE") {
        log::warn!("{err}");
    }
    rule.ids().handle_event(HostEvent::ProjectStopAll);
    report(&rule, "project stopped");
    println!("cat keeps no id: {}", cat.clone_id().is_none());
}

fn report(rule: &CloneIdsTestRule, label: &str) {
    let ids = rule.ids();
    println!("{label}: all ids = {}", ids.all_ids());
    for id in ids.live_ids() {
        let raw = f64::from(id.get());
        println!(
            "  #{id}: x = {:>6}, health = {:?}",
            ids.property_of_id(raw, "x"),
            ids.data_of_id("health", raw)
        );
    }
}
