use super::*;

#[test]
fn overflow_keeps_latest_in_order() {
    let mut t = TrailBuffer::new(4);
    for i in 0..10 {
        t.push(i);
    }
    assert_eq!(t.len(), 4);
    assert_eq!(t.iter().collect::<Vec<_>>(), vec![6, 7, 8, 9]);
    assert_eq!(t.last(), Some(9));
}

#[test]
fn partial_fill_iterates_in_push_order() {
    let mut t = TrailBuffer::new(5);
    t.push(1);
    t.push(2);
    assert_eq!(t.iter().collect::<Vec<_>>(), vec![1, 2]);
}

#[test]
fn zero_capacity_stores_nothing() {
    let mut t = TrailBuffer::new(0);
    t.push(1);
    assert!(t.is_empty());
    assert_eq!(t.last(), None);
}

#[test]
fn clear_then_reuse() {
    let mut t = TrailBuffer::new(2);
    t.push(1);
    t.push(2);
    t.push(3);
    t.clear();
    t.push(4);
    assert_eq!(t.iter().collect::<Vec<_>>(), vec![4]);
}
