use rstest::rstest;
use std::collections::HashSet;
use std::str::FromStr;
use swipe_core::direction::{pick_random, Direction, SwipeGesture};
use swipe_core::GameError;

use Direction::*;

#[rstest]
#[case(30.0, 5.0, Right)]
#[case(-30.0, 5.0, Left)]
#[case(3.0, 40.0, Down)]
#[case(3.0, -40.0, Up)]
#[case(25.0, 25.0, Down)] // Equal magnitude resolves vertically
#[case(-25.0, -25.0, Up)]
#[case(-25.0, 25.0, Down)]
#[case(0.0, 0.0, Up)]
fn test_displacement_resolution(#[case] dx: f32, #[case] dy: f32, #[case] expected: Direction) {
    assert_eq!(Direction::from_displacement(dx, dy), expected);
}

#[test]
fn test_gesture_below_min_distance_is_dropped() {
    let short = SwipeGesture::new((100.0, 100.0), (110.0, 105.0));
    assert_eq!(short.resolve(20.0), None);

    let long = SwipeGesture::new((100.0, 100.0), (160.0, 90.0));
    assert_eq!(long.resolve(20.0), Some(Right));
}

#[test]
fn test_pick_random_respects_exclusion() {
    let mut rng = fastrand::Rng::with_seed(7);
    let mut seen = HashSet::new();
    for _ in 0..500 {
        let d = pick_random(&mut rng, &[Left]).unwrap();
        assert_ne!(d, Left);
        seen.insert(d);
    }
    assert_eq!(seen.len(), 3, "every remaining direction should come up");
}

#[test]
fn test_pick_random_without_exclusion_covers_all() {
    let mut rng = fastrand::Rng::with_seed(11);
    let seen: HashSet<_> = (0..500)
        .map(|_| pick_random(&mut rng, &[]).unwrap())
        .collect();
    assert_eq!(seen.len(), 4);
}

#[test]
fn test_pick_random_fails_when_everything_is_excluded() {
    let mut rng = fastrand::Rng::with_seed(1);
    let err = pick_random(&mut rng, &[Up, Down, Left, Right]).unwrap_err();
    assert!(matches!(err, GameError::NoDirectionAvailable(4)));
}

#[test]
fn test_direction_parses_case_insensitively() {
    assert_eq!(Direction::from_str("up").unwrap(), Up);
    assert_eq!(Direction::from_str("RIGHT").unwrap(), Right);
    assert!(Direction::from_str("sideways").is_err());
}
