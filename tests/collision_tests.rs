use gridnav::collision::{
    aabb_aabb_test, area_cells, forward_collision_test, moving_aabb_aabb_test, ray_aabb_test,
};
use gridnav::{Bounds, CollisionWorld, GameMap, Vec2};

#[test]
fn scenario_d_swept_test_does_not_reach() {
    // self at (0,0)-(10,10) moving (10,0), other at (20,0)-(30,10):
    // the swept bounds stop at x=20, exactly touching nothing mid-flight
    let self_bounds = Bounds::from_coords(0.0, 0.0, 10.0, 10.0);
    let other = Bounds::from_coords(20.0, 0.0, 30.0, 10.0);
    // contact begins exactly at the end of the step: still a miss
    assert!(moving_aabb_aabb_test(&self_bounds, Vec2::new(10.0, 0.0), &other, 0).is_none());
    // anything short of closing the gap is a miss too
    assert!(moving_aabb_aabb_test(&self_bounds, Vec2::new(9.0, 0.0), &other, 0).is_none());
    // overshooting the gap makes contact mid-step
    let hit = moving_aabb_aabb_test(&self_bounds, Vec2::new(20.0, 0.0), &other, 0).unwrap();
    assert!((hit.fraction - 0.5).abs() < 1e-5);
}

#[test]
fn scenario_e_touching_reports_fraction_zero() {
    let self_bounds = Bounds::from_coords(0.0, 0.0, 10.0, 10.0);
    let other = Bounds::from_coords(10.0, 0.0, 20.0, 10.0);
    assert!(aabb_aabb_test(&self_bounds, &other));

    let hit = moving_aabb_aabb_test(&self_bounds, Vec2::new(10.0, 0.0), &other, 0)
        .expect("touching boxes must collide");
    assert_eq!(hit.fraction, 0.0);
    assert_eq!(hit.normal, Vec2::new(-1.0, 0.0));
}

#[test]
fn swept_consistent_with_static_overlap() {
    let self_bounds = Bounds::from_coords(0.0, 0.0, 10.0, 10.0);
    let others = [
        Bounds::from_coords(5.0, 5.0, 15.0, 15.0),
        Bounds::from_coords(-3.0, -3.0, 1.0, 1.0),
        Bounds::from_coords(0.0, 10.0, 10.0, 20.0),
    ];
    for other in &others {
        assert!(aabb_aabb_test(&self_bounds, other));
        let hit = moving_aabb_aabb_test(&self_bounds, Vec2::new(4.0, -2.0), other, 0).unwrap();
        assert_eq!(hit.fraction, 0.0);
    }
}

#[test]
fn fraction_grows_as_approach_slows() {
    let self_bounds = Bounds::from_coords(0.0, 0.0, 10.0, 10.0);
    let other = Bounds::from_coords(40.0, 0.0, 50.0, 10.0);
    let mut previous = 0.0f32;
    for speed in [120.0f32, 90.0, 60.0, 40.0, 31.0] {
        let hit = moving_aabb_aabb_test(&self_bounds, Vec2::new(speed, 0.0), &other, 0)
            .expect("still fast enough to reach");
        assert!(hit.fraction >= previous);
        previous = hit.fraction;
    }
    assert!(moving_aabb_aabb_test(&self_bounds, Vec2::new(29.0, 0.0), &other, 0).is_none());
}

#[test]
fn normal_resolution_prefers_x_axis_on_ties() {
    let self_bounds = Bounds::from_coords(0.0, 0.0, 10.0, 10.0);
    // perfectly diagonal corner approach: both axes touch at the same time
    let other = Bounds::from_coords(15.0, 15.0, 25.0, 25.0);
    let hit = moving_aabb_aabb_test(&self_bounds, Vec2::new(10.0, 10.0), &other, 0).unwrap();
    assert_eq!(hit.normal, Vec2::new(-1.0, 0.0));

    // y contact strictly later than x: the y face wins
    let other = Bounds::from_coords(2.0, 15.0, 12.0, 25.0);
    let hit = moving_aabb_aabb_test(&self_bounds, Vec2::new(1.0, 10.0), &other, 0).unwrap();
    assert_eq!(hit.normal, Vec2::new(0.0, -1.0));
}

#[test]
fn ray_test_matches_slab_geometry() {
    let bounds = Bounds::from_coords(30.0, 10.0, 50.0, 30.0);
    let (t, normal) =
        ray_aabb_test(Vec2::new(0.0, 20.0), Vec2::new(1.0, 0.0), 100.0, &bounds).unwrap();
    assert!((t - 30.0).abs() < 1e-4);
    assert_eq!(normal, Vec2::new(-1.0, 0.0));

    // too short to reach
    assert!(ray_aabb_test(Vec2::new(0.0, 20.0), Vec2::new(1.0, 0.0), 29.0, &bounds).is_none());
    // parallel miss
    assert!(ray_aabb_test(Vec2::new(0.0, 40.0), Vec2::new(1.0, 0.0), 100.0, &bounds).is_none());
}

#[test]
fn area_cells_cover_overlapped_region() {
    let map = GameMap::new(10, 10, 20.0, 20.0);
    let cells = area_cells(&map, &Bounds::from_coords(25.0, 25.0, 55.0, 35.0));
    assert!(cells.contains(&(1, 1)));
    assert!(cells.contains(&(1, 2)));
    assert!(!cells.contains(&(3, 3)));
    // clamped when the area hangs off the map
    let cells = area_cells(&map, &Bounds::from_coords(-50.0, -50.0, 5.0, 5.0));
    assert_eq!(cells, vec![(0, 0)]);
}

#[test]
fn forward_test_sorted_and_deduplicated() {
    let map = GameMap::new(20, 20, 20.0, 20.0);
    let mut world = CollisionWorld::new(map);
    let mover = world.insert_model(Bounds::centered(5.0), Vec2::new(30.0, 30.0));
    // three blockers at increasing distance along +x, one off to the side
    world.insert_model(Bounds::centered(5.0), Vec2::new(70.0, 30.0));
    world.insert_model(Bounds::centered(5.0), Vec2::new(110.0, 30.0));
    world.insert_model(Bounds::centered(5.0), Vec2::new(150.0, 30.0));
    world.insert_model(Bounds::centered(5.0), Vec2::new(30.0, 300.0));

    world.model_mut(mover).velocity = Vec2::new(130.0, 0.0);
    let hits = forward_collision_test(&world, mover);

    assert_eq!(hits.len(), 3);
    for pair in hits.windows(2) {
        assert!(pair[0].fraction <= pair[1].fraction);
    }
    let mut seen: Vec<usize> = hits.iter().map(|h| h.collider).collect();
    seen.dedup();
    assert_eq!(seen.len(), 3);
}

#[test]
fn registration_matches_overlap_everywhere() {
    let map = GameMap::new(10, 10, 20.0, 20.0);
    let mut world = CollisionWorld::new(map);
    let id = world.insert_model(Bounds::centered(7.0), Vec2::new(35.0, 35.0));

    for origin in [
        Vec2::new(35.0, 35.0),
        Vec2::new(40.0, 40.0),
        Vec2::new(10.0, 190.0),
        Vec2::new(199.0, 1.0),
    ] {
        world.set_origin(id, origin);
        let abs_bounds = world.model(id).abs_bounds;
        for row in 0..world.map().rows() {
            for col in 0..world.map().cols() {
                let cell = world.map().grid().cell(row, col);
                let registered = cell.contents().contains(&id);
                let overlapping = cell.bounds.overlaps(&abs_bounds);
                assert_eq!(
                    registered, overlapping,
                    "cell ({}, {}) registration out of sync at origin {:?}",
                    row, col, origin
                );
            }
        }
    }
}
