use perch_base::TensorError;
use perch_pipeline::FramePool;

#[test]
fn test_pool_hands_out_zeroed_tensors() {
    let pool = FramePool::new(1, vec![2, 4, 3]).unwrap();
    let tensor = pool.get().unwrap();
    assert_eq!(tensor.shape, vec![2, 4, 3]);
    assert_eq!(tensor.len(), 24);
    assert!(tensor.data.iter().all(|&b| b == 0));
}

#[test]
fn test_pool_never_grows() {
    let pool = FramePool::new(2, vec![2, 2, 3]).unwrap();
    let first = pool.get().unwrap();
    let _second = pool.get().unwrap();
    assert!(pool.get().is_none());

    pool.put(first);
    assert!(pool.get().is_some());
}

#[test]
fn test_available_tracks_checkouts() {
    let pool = FramePool::new(3, vec![1, 1, 3]).unwrap();
    assert_eq!(pool.available(), 3);
    let tensor = pool.get().unwrap();
    assert_eq!(pool.available(), 2);
    pool.put(tensor);
    assert_eq!(pool.available(), 3);
}

#[test]
fn test_oversized_shape_fails_at_construction() {
    let result = FramePool::new(1, vec![usize::MAX, 4]);
    assert!(matches!(result, Err(TensorError::ShapeOverflow)));
}
