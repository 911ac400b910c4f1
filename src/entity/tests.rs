use std::hash;

use super::ealloc::Monotonic;
use super::Entity;

static_assertions::assert_impl_all!(Entity: Copy, Send, Sync, Eq, Ord, hash::Hash);

#[test]
fn test_allocate_increasing() {
    let mut ealloc = Monotonic::default();

    let ids: Vec<_> = (0..4).map(|_| ealloc.allocate().index()).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    assert_eq!(ealloc.allocated(), 4);
}

#[test]
fn test_is_allocated() {
    let mut ealloc = Monotonic::default();
    let mut other = Monotonic::default();

    let first = ealloc.allocate();
    other.allocate();
    let foreign = other.allocate();

    assert!(ealloc.is_allocated(first));
    assert!(!ealloc.is_allocated(foreign), "#2 was only allocated by the other allocator");
}

#[test]
fn test_display() {
    let mut ealloc = Monotonic::default();
    let entity = ealloc.allocate();
    assert_eq!(entity.to_string(), "#1");
}
