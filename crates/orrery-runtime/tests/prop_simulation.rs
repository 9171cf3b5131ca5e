use orrery_runtime::Simulation;
use orrery_scene::{DrawItem, WorldFile, build_world};
use proptest::prelude::*;

const WORLD: &str = r#"
    length = 1
    tick = 60

    [start]
    z = 5000

    [bodies.star]
    model = "star.obj"
    radius = 50

    [bodies.star.satellites.planet]
    texture = "planet.png"
    radius = 5
    sma = 1000
    eccentricity = 0.2
    orbit_speed = 0.5

    [bodies.star.satellites.planet.satellites.moon]
    texture = "moon.png"
    radius = 1
    sma = 40
    orbit_speed = 3

    [belts.rocks]
    radius = 2000
    cross = 50
    count = 20
"#;

fn sim() -> Simulation {
    let world = build_world(&WorldFile::from_toml_str(WORLD).unwrap());
    assert!(world.report.is_clean(), "{:?}", world.report);
    let s = Simulation::new(world);
    assert_eq!(s.scene().len(), 3);
    assert_eq!(s.scene().belts().len(), 1);
    s
}

proptest! {
    // Every body is current after any frame that advanced the clock
    #[test]
    fn tree_tracks_clock(frames in prop::collection::vec(0.0f64..0.2, 1..40)) {
        let mut s = sim();
        let mut total = 0u64;
        for dt in frames {
            let report = s.step(dt, false);
            total += report.ticks;
            prop_assert_eq!(report.update.is_some(), report.ticks > 0);
            let tick = s.clock().tick();
            for (_, body) in s.scene().bodies() {
                prop_assert!(body.is_fresh(tick));
            }
        }
        prop_assert_eq!(total, s.clock().tick());
    }

    // Frame splitting does not change the simulated time reached
    #[test]
    fn frame_split_is_invisible(parts in 1usize..20) {
        let mut whole = sim();
        whole.step(1.0, false);
        let mut split = sim();
        for _ in 0..parts {
            split.step(1.0 / parts as f64, false);
        }
        prop_assert_eq!(whole.clock().tick(), split.clock().tick());
        let a = whole.scene().find("moon").unwrap();
        let b = split.scene().find("moon").unwrap();
        prop_assert!((whole.scene()[a].location - split.scene()[b].location).length() < 1e-9);
    }

    #[test]
    fn draw_list_covers_scene(launches in 0usize..8, dt in 0.0f64..0.5) {
        let mut s = sim();
        for _ in 0..launches {
            s.launch_asteroid();
        }
        s.step(dt, false);
        let bodies = s.scene().len();
        let items = s.ordered_drawables();
        prop_assert_eq!(items.len(), bodies + 1 + launches);
        let asteroids = items.iter().filter(|i| matches!(i, DrawItem::Asteroid(_))).count();
        prop_assert_eq!(asteroids, launches);
    }
}
