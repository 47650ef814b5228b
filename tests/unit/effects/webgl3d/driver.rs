use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::canvas::RecordingCanvas;
use crate::effects::fixture::{Fixture, canvas};
use crate::foundation::error::{FxError, FxResult};
use crate::params::ParamValue;

static FAILED_CALLS: AtomicUsize = AtomicUsize::new(0);
static LOST_CALLS: AtomicUsize = AtomicUsize::new(0);

fn failing_factory(_: u32, _: u32) -> FxResult<Box<dyn Scene3D>> {
    FAILED_CALLS.fetch_add(1, Ordering::SeqCst);
    Err(FxError::scene("no device"))
}

fn lost_context_factory(_: u32, _: u32) -> FxResult<Box<dyn Scene3D>> {
    LOST_CALLS.fetch_add(1, Ordering::SeqCst);
    Err(FxError::scene("context lost"))
}

fn wave() -> Wave3d {
    let mut fx = Wave3d::new(&EngineConfig::default());
    fx.init();
    fx
}

#[test]
fn composites_one_glyph_per_visible_character() {
    let input = Fixture::new("3D TEXT");
    let mut fx = wave();
    let mut c = canvas();
    fx.render_lyric(&mut c, &input.at_progress(0.5, 1.0 / 60.0));
    assert_eq!(fx.scene().map(|s| s.mesh_count()), Some(6));
    assert_eq!(c.list().texts().count(), 6);
    assert_eq!(c.depth(), 0);
}

#[test]
fn factory_failure_disables_after_one_attempt() {
    let input = Fixture::new("NOPE");
    let mut fx = Wave3d::with_factory(&EngineConfig::default(), failing_factory);
    fx.init();
    let mut c = canvas();
    let before = FAILED_CALLS.load(Ordering::SeqCst);
    for k in 0..5 {
        fx.render_lyric(&mut c, &input.at_progress(k as f64 * 0.1, 0.016));
    }
    assert!(fx.is_disabled());
    assert_eq!(FAILED_CALLS.load(Ordering::SeqCst) - before, 1);
    assert!(c.list().is_empty());
    assert_eq!(c.depth(), 0);
}

#[test]
fn factory_failure_disables_every_3d_effect_sharing_it() {
    let input = Fixture::new("NOPE");
    let config = EngineConfig::default();
    let mut wave = Wave3d::with_factory(&config, lost_context_factory);
    let mut orbit = Orbit3d::with_factory(&config, lost_context_factory);
    wave.init();
    orbit.init();
    let mut c = canvas();
    let ctx = input.at_progress(0.5, 0.016);
    wave.render_lyric(&mut c, &ctx);
    orbit.render_lyric(&mut c, &ctx);
    assert!(wave.is_disabled());
    assert!(orbit.is_disabled());
    assert_eq!(LOST_CALLS.load(Ordering::SeqCst), 1);
    assert!(c.list().is_empty());

    let mut healthy = Orbit3d::new(&config);
    healthy.init();
    healthy.render_lyric(&mut c, &ctx);
    assert!(!healthy.is_disabled());
    assert_eq!(c.depth(), 0);
}

#[test]
fn resize_rebuilds_meshes() {
    let input = Fixture::new("AB");
    let mut fx = wave();
    let mut c = canvas();
    fx.render_lyric(&mut c, &input.at_progress(0.5, 0.0));
    let first = fx.line_meshes("line-1").to_vec();

    let mut big = RecordingCanvas::new(1280, 720);
    let mut ctx = input.at_progress(0.5, 0.0);
    ctx.frame.width = 1280.0;
    ctx.frame.height = 720.0;
    fx.render_lyric(&mut big, &ctx);
    assert_eq!(fx.scene().map(|s| s.size()), Some((1280, 720)));
    let second = fx.line_meshes("line-1").to_vec();
    assert_eq!(second.len(), 2);
    assert_ne!(first, second);
    assert_eq!(fx.scene().map(|s| s.mesh_count()), Some(2));
}

#[test]
fn line_change_and_reset_dispose_meshes() {
    let a = Fixture::new("ONE");
    let b = Fixture::new("TWO!").with_id("line-2");
    let mut fx = wave();
    let mut c = canvas();
    fx.render_lyric(&mut c, &a.at_progress(0.5, 0.0));
    fx.render_lyric(&mut c, &b.at_progress(0.5, 0.0));
    assert_eq!(fx.scene().map(|s| s.mesh_count()), Some(4));
    assert!(fx.line_meshes("line-1").is_empty());

    fx.reset();
    assert_eq!(fx.scene().map(|s| s.mesh_count()), Some(0));

    fx.on_activate();
    fx.on_deactivate();
    assert!(fx.scene().is_none());
}

#[test]
fn extrusion_layers_follow_the_line_lifecycle() {
    let a = Fixture::new("AB");
    let b = Fixture::new("C").with_id("line-2");
    let mut fx = Extrude3d::new(&EngineConfig::default());
    fx.init();
    fx.set_parameter("layers", ParamValue::Number(4.0)).unwrap();
    let mut c = canvas();

    fx.render_lyric(&mut c, &a.at_progress(0.5, 0.0));
    assert_eq!(fx.animator().layers().len(), 8);
    assert_eq!(fx.scene().map(|s| s.mesh_count()), Some(10));

    fx.render_lyric(&mut c, &b.at_progress(0.5, 0.0));
    assert_eq!(fx.animator().layers().len(), 4);
    assert_eq!(fx.scene().map(|s| s.mesh_count()), Some(5));

    fx.reset();
    assert!(fx.animator().layers().is_empty());
    assert_eq!(fx.scene().map(|s| s.mesh_count()), Some(0));
}

#[test]
fn explode_3d_detonates_once_and_fades() {
    let input = Fixture::new("BANG");
    let mut fx = Explode3d::new(&EngineConfig::default());
    fx.init();
    let mut c = canvas();
    fx.render_lyric(&mut c, &input.at_progress(0.5, 1.0 / 60.0));
    assert!(!fx.animator().triggered());

    fx.render_lyric(&mut c, &input.at_progress(0.7, 1.0 / 60.0));
    assert!(fx.animator().triggered());
    let shards = fx.animator().shards().to_vec();
    assert_eq!(shards.len(), 4);

    let ids = fx.line_meshes("line-1").to_vec();
    let opacity = |fx: &Explode3d| {
        ids.iter()
            .filter_map(|id| fx.scene().and_then(|s| s.mesh(*id)).map(|m| m.opacity))
            .sum::<f64>()
    };
    let mut prev = opacity(&fx);
    for k in 1..20 {
        fx.render_lyric(
            &mut c,
            &input.at_progress(0.7 + k as f64 * 0.005, 1.0 / 60.0),
        );
        let now = opacity(&fx);
        assert!(now < prev);
        prev = now;
    }
}
