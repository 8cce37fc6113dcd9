use super::*;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn pages_add_trailing_space() {
    let cfg = ScrollConfig::default();
    assert!(approx(cfg.pages(20.0, 10.0).unwrap(), 7.5));
    assert!(cfg.pages(20.0, 0.0).is_err());
}

#[test]
fn threshold_has_a_floor() {
    let cfg = ScrollConfig::default();
    assert_eq!(cfg.sticky_threshold(&[1.0, 2.0]), 4.0);
    let tall = [40.0, 40.0, 40.0];
    assert!(approx(
        cfg.sticky_threshold(&tall),
        4.0 / (15.8 * 3.0) * 120.0
    ));
}

#[test]
fn fade_starts_past_the_threshold() {
    let cfg = ScrollConfig::default();
    assert_eq!(cfg.fade(6.0, 4.0), 1.0);
    assert!(approx(cfg.fade(7.2, 4.0), 0.6));
    assert_eq!(cfg.fade(20.0, 4.0), 0.0);
}

#[test]
fn rig_follows_scroll_then_sticks() {
    let mut rig = ScrollRig::new(ScrollConfig::default(), 1.0);
    let p = rig.step(500.0, 1000.0, 10.0).unwrap();
    assert!(approx(rig.page(), 0.1));
    assert!(approx(p.y, 0.1 * (0.1 * 10.0)));
    assert_eq!(p.z, 0.0);

    for _ in 0..200 {
        rig.step(3000.0, 1000.0, 10.0).unwrap();
    }
    assert!(approx(rig.page(), 3.0));
    let p = rig.position();
    assert!(approx(p.y, 10.0));
    assert!(approx(p.z, 3.0 * 1.25));
    assert!(rig.step(0.0, 0.0, 10.0).is_err());
}

#[test]
fn config_deserializes_with_defaults() {
    let cfg: ScrollConfig = serde_json::from_str(r#"{ "extra_pages": 2 }"#).unwrap();
    assert_eq!(cfg.extra_pages, 2.0);
    assert_eq!(cfg.depth_speed, 1.25);
}
