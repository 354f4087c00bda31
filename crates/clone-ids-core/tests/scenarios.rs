use clone_ids_core::{CloneId, CloneIdsConfig, CloneTarget};
use clone_ids_testing::{as_target, CloneIdsTestRule, DisposeMode, TestStage};

#[test]
fn delete_then_respawn_fills_the_gap() {
    let rule = CloneIdsTestRule::new();
    let cat = rule.stage().add_sprite("Cat");
    let clones: Vec<_> = (0..3).map(|_| rule.spawn_with_id(&cat)).collect();
    let ids = rule.ids();
    assert_eq!(ids.all_ids(), "[1,2,3]");

    ids.delete_clone_by_id(2.0);
    assert_eq!(rule.stage().clone_count(), 2);
    assert_eq!(clones[1].teardown_count(), 1);
    assert!(!clones[1].is_on_stage());

    let replacement = rule.spawn_with_id(&cat);
    assert_eq!(ids.my_id(&*replacement), 2);
    assert_eq!(ids.all_ids(), "[1,2,3]");
}

#[test]
fn reuse_follows_release_order() {
    let rule = CloneIdsTestRule::new();
    let cat = rule.stage().add_sprite("Cat");
    let clones: Vec<_> = (0..3).map(|_| rule.spawn_with_id(&cat)).collect();

    rule.stage().delete_clone(&clones[0]);
    rule.stage().delete_clone(&clones[2]);
    assert_eq!(rule.ids().all_ids(), "[2]");

    let a = rule.spawn_with_id(&cat);
    let b = rule.spawn_with_id(&cat);
    assert_eq!(a.clone_id(), CloneId::new(1));
    assert_eq!(b.clone_id(), CloneId::new(3));
}

#[test]
fn per_clone_data_round_trip() {
    let rule = CloneIdsTestRule::new();
    let cat = rule.stage().add_sprite("Cat");
    let _first = rule.spawn_with_id(&cat);
    let second = rule.spawn_with_id(&cat);
    let ids = rule.ids();

    ids.set_data(&*second, "health", "50");
    assert_eq!(ids.data_of_id("health", 2.0), "50");
    assert_eq!(ids.data_of_id("mana", 2.0), "");

    // The original sprite has no ID, so its writes go nowhere.
    ids.set_data(&*cat, "health", "999");
    assert_eq!(ids.data_of_id("health", 1.0), "");
}

#[test]
fn unknown_ids_read_as_zero_values() {
    let rule = CloneIdsTestRule::new();
    let ids = rule.ids();
    assert!(!ids.id_exists(99.0));
    assert_eq!(ids.property_of_id(99.0, "x"), 0.0);
    assert_eq!(ids.data_of_id("health", 99.0), "");
    assert_eq!(ids.my_id(&*rule.stage().add_sprite("Stage")), 0);
}

#[test]
fn clone_properties_track_the_sprite() {
    let rule = CloneIdsTestRule::new();
    let cat = rule.stage().add_sprite("Cat");
    cat.go_to(40.0, -15.0);
    cat.switch_costume(1);
    let clone = rule.spawn_with_id(&cat);
    let ids = rule.ids();

    assert_eq!(ids.property_of_id(1.0, "x"), 40.0);
    assert_eq!(ids.property_of_id(1.0, "costume number"), 2.0);

    clone.point_in_direction(-90.0);
    clone.set_size(250.0);
    clone.go_to(0.0, 100.0);
    assert_eq!(ids.property_of_id(1.0, "direction"), -90.0);
    assert_eq!(ids.property_of_id(1.0, "size"), 250.0);
    assert_eq!(ids.property_of_id(1.0, "y"), 100.0);
}

#[test]
fn bypassed_destruction_is_reclaimed_on_the_next_sweep() {
    let mut rule = CloneIdsTestRule::new();
    let cat = rule.stage().add_sprite("Cat");
    let doomed = rule.spawn_with_id(&cat);
    let _survivor = rule.spawn_with_id(&cat);

    rule.stage().remove_without_teardown(&doomed);
    drop(doomed);
    assert!(rule.ids().id_exists(1.0));

    assert!(rule.advance_frames(4).is_empty());
    let reports = rule.advance_frames(1);
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].scanned, 2);
    assert_eq!(reports[0].reclaimed, vec![CloneId::FIRST]);
    assert_eq!(rule.frames(), 5);

    assert!(!rule.ids().id_exists(1.0));
    let next = rule.spawn_with_id(&cat);
    assert_eq!(rule.ids().my_id(&*next), 1);
}

#[test]
fn bulk_clear_is_reclaimed_in_one_sweep() {
    let mut rule = CloneIdsTestRule::with_stage(
        TestStage::new(),
        CloneIdsConfig::default().with_sweep_interval(1),
    );
    let cat = rule.stage().add_sprite("Cat");
    for _ in 0..4 {
        rule.spawn_with_id(&cat);
    }
    rule.stage().clear_clones_without_teardown();
    let reports = rule.advance_frames(1);
    assert_eq!(reports[0].reclaimed.len(), 4);
    assert_eq!(rule.ids().all_ids(), "[]");
    assert_eq!(rule.ids().free_id_count(), 4);
}

#[test]
fn stop_mid_run_restarts_numbering() {
    let mut rule = CloneIdsTestRule::new();
    let cat = rule.stage().add_sprite("Cat");
    let clones: Vec<_> = (0..3).map(|_| rule.spawn_with_id(&cat)).collect();
    rule.ids().delete_clone_by_id(3.0);
    rule.advance_frames(3);

    rule.stop_all();
    assert_eq!(rule.ids().all_ids(), "[]");
    assert!(clones.iter().all(|clone| clone.clone_id().is_none()));

    let fresh = rule.spawn_with_id(&cat);
    assert_eq!(rule.ids().my_id(&*fresh), 1);

    // Cadence restarted with the session.
    assert!(rule.advance_frames(4).is_empty());
    assert_eq!(rule.advance_frames(1).len(), 1);
}

#[test]
fn deferred_host_destroy_is_visible_immediately() {
    let rule = CloneIdsTestRule::with_stage(
        TestStage::with_mode(DisposeMode::Deferred),
        CloneIdsConfig::default(),
    );
    let cat = rule.stage().add_sprite("Cat");
    let first = rule.spawn_with_id(&cat);
    let ids = rule.ids();

    ids.delete_clone_by_id(1.0);
    assert!(!ids.id_exists(1.0));
    assert!(first.is_on_stage(), "host has not acted yet");

    // Its scripts still run until the host acts, but cannot revive an ID.
    assert_eq!(ids.assign_clone_id(&as_target(&first)), Some(CloneId::FIRST));
    assert!(!ids.id_exists(1.0));
    assert_eq!(ids.all_ids(), "[]");

    let second = rule.spawn_with_id(&cat);
    assert_eq!(ids.my_id(&*second), 1);

    assert_eq!(rule.stage().flush_disposals(), 1);
    assert!(!first.is_on_stage());
    assert_eq!(ids.my_id(&*second), 1);
    assert!(ids.id_exists(1.0));
    assert_eq!(ids.free_id_count(), 0);
}

#[test]
fn deleting_a_dropped_clone_frees_its_id_without_a_destroy_request() {
    let rule = CloneIdsTestRule::new();
    let cat = rule.stage().add_sprite("Cat");
    let ghost = rule.spawn_with_id(&cat);
    let _kept = rule.spawn_with_id(&cat);
    rule.stage().remove_without_teardown(&ghost);
    drop(ghost);

    rule.ids().delete_clone_by_id(1.0);
    assert!(!rule.ids().id_exists(1.0));
    assert_eq!(rule.ids().free_id_count(), 1);
    assert_eq!(rule.stage().dispose_requests(), 0);
    assert_eq!(rule.ids().all_ids(), "[2]");
}

#[test]
fn text_ids_address_the_same_clones() {
    let rule = CloneIdsTestRule::new();
    let cat = rule.stage().add_sprite("Cat");
    cat.go_to(12.0, 0.0);
    let clone = rule.spawn_with_id(&cat);
    rule.ids().set_data(&*clone, "name", "scout");

    assert_eq!(rule.ids().data_of_id("name", "1"), "scout");
    assert_eq!(rule.ids().property_of_id(" 1 ", "x"), 12.0);
    rule.ids().delete_clone_by_id("1");
    assert_eq!(rule.stage().clone_count(), 0);
    assert_eq!(clone.teardown_count(), 1);
}

#[test]
fn deleting_twice_requests_one_destroy() {
    let rule = CloneIdsTestRule::new();
    let cat = rule.stage().add_sprite("Cat");
    let _clone = rule.spawn_with_id(&cat);
    rule.ids().delete_clone_by_id(1.0);
    rule.ids().delete_clone_by_id(1.0);
    assert_eq!(rule.stage().dispose_requests(), 1);
    assert_eq!(rule.ids().free_id_count(), 1);
}

#[test]
fn assigning_every_frame_is_harmless() {
    let mut rule = CloneIdsTestRule::new();
    let cat = rule.stage().add_sprite("Cat");
    let clone = rule.stage().create_clone(&cat);
    let target = as_target(&clone);
    for _ in 0..10 {
        rule.ids().assign_clone_id(&target);
        rule.ids().assign_clone_id(&as_target(&cat));
        rule.advance_frames(1);
    }
    assert_eq!(rule.ids().all_ids(), "[1]");
    assert_eq!(cat.clone_id(), None);
}
