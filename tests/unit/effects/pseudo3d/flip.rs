use super::*;
use crate::effects::fixture::{Fixture, canvas};

#[test]
fn angle_starts_at_the_back_and_rests_at_zero() {
    assert!((Flip::angle(PI, 0.0) - PI).abs() < 1e-9);
    assert!(Flip::angle(PI, 1.0).abs() < 1e-9);
}

#[test]
fn settled_characters_are_unsquashed() {
    let input = Fixture::new("CARD");
    let mut fx = Flip::new(&EngineConfig::default());
    fx.init();
    let mut c = canvas();
    fx.render_lyric(&mut c, &input.at_progress(1.0, 0.0));
    let ops: Vec<_> = c.list().texts().collect();
    assert_eq!(ops.len(), 4);
    let flat = ops.iter()
        .all(|(_, op)| (op.transform.determinant() - 1.0).abs() < 1e-9);
    assert!(flat);
    assert_eq!(c.depth(), 0);
}
