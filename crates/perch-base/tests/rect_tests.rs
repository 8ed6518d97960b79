use perch_base::{Rect, Vec2};

#[test]
fn test_new_and_minmax() {
    let r = Rect::new(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0));
    assert_eq!(r.min(), Vec2::new(1.0, 2.0));
    assert_eq!(r.max(), Vec2::new(4.0, 6.0));
}

#[test]
fn test_area() {
    let r = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0));
    assert_eq!(r.area(), 12.0);
}

#[test]
fn test_intersects_overlapping() {
    let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(4.0, 4.0));
    let b = Rect::new(Vec2::new(2.0, 2.0), Vec2::new(4.0, 4.0));
    assert!(a.intersects(b));
    assert!(b.intersects(a));
}

#[test]
fn test_intersects_disjoint() {
    let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(2.0, 2.0));
    let b = Rect::new(Vec2::new(5.0, 5.0), Vec2::new(2.0, 2.0));
    assert!(!a.intersects(b));
}

#[test]
fn test_intersection_overlapping() {
    let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(4.0, 4.0));
    let b = Rect::new(Vec2::new(2.0, 1.0), Vec2::new(4.0, 4.0));
    let i = a.intersection(b).unwrap();
    assert_eq!(i.min(), Vec2::new(2.0, 1.0));
    assert_eq!(i.max(), Vec2::new(4.0, 4.0));
}

#[test]
fn test_intersection_disjoint() {
    let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0));
    let b = Rect::new(Vec2::new(3.0, 3.0), Vec2::new(1.0, 1.0));
    assert!(a.intersection(b).is_none());
}

#[test]
fn test_intersection_contained() {
    let outer = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
    let inner = Rect::new(Vec2::new(3.0, 3.0), Vec2::new(2.0, 2.0));
    let i = outer.intersection(inner).unwrap();
    assert_eq!(i, inner);
}
