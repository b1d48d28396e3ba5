use inkdigit_base::Vec2;

#[test]
fn test_vec2_arithmetic() {
    let a = Vec2::new(1.0f32, 2.0);
    let b = Vec2::new(3.0f32, 5.0);
    assert_eq!(a + b, Vec2::new(4.0, 7.0));
    assert_eq!(b - a, Vec2::new(2.0, 3.0));
    assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));
    assert_eq!(b / 2.0, Vec2::new(1.5, 2.5));
}

#[test]
fn test_vec2_length() {
    assert_eq!(Vec2::new(3.0f32, 4.0).length(), 5.0);
}

#[test]
fn test_distance_to_segment_interior() {
    let p = Vec2::new(5.0f32, 3.0);
    let d = p.distance_to_segment(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0));
    assert!((d - 3.0).abs() < 1e-6);
}

#[test]
fn test_distance_to_segment_past_end() {
    let p = Vec2::new(13.0f32, 4.0);
    let d = p.distance_to_segment(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0));
    assert!((d - 5.0).abs() < 1e-6);
}

#[test]
fn test_distance_to_degenerate_segment() {
    let a = Vec2::new(1.0f32, 1.0);
    let d = Vec2::new(4.0f32, 5.0).distance_to_segment(a, a);
    assert!((d - 5.0).abs() < 1e-6);
}
