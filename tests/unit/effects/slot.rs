use super::*;

#[test]
fn same_line_keeps_state() {
    let mut s = LineSlot::new();
    *s.get_or_insert_with("a", || 1) += 1;
    assert_eq!(*s.get_or_insert_with("a", || 100), 2);
    assert_eq!(s.generation(), 1);
}

#[test]
fn new_line_rebuilds_state() {
    let mut s = LineSlot::new();
    s.get_or_insert_with("a", || 1);
    assert_eq!(*s.get_or_insert_with("b", || 5), 5);
    assert_eq!(s.generation(), 2);
    assert!(s.get("a").is_none());
    assert_eq!(s.get("b"), Some(&5));
}

#[test]
fn clear_empties_and_next_access_rebuilds() {
    let mut s = LineSlot::new();
    s.get_or_insert_with("a", || 1);
    s.clear();
    assert!(s.is_empty());
    assert_eq!(s.key(), None);
    assert_eq!(*s.get_or_insert_with("a", || 9), 9);
}

#[test]
fn take_hands_out_state_once() {
    let mut s = LineSlot::new();
    s.get_or_insert_with("a", || 3);
    assert_eq!(s.take(), Some(("a".to_owned(), 3)));
    assert_eq!(s.take(), None);
}
