//! Surface lifecycle scenarios: register, focus, pause/resume, teardown

use super::test_utils::{host, registry_with_app};
use std::sync::Arc;
use surface_context::{ApiError, SurfaceKind};

#[test]
fn test_construct_registers_app_but_resolves_nothing() {
    let (registry, app) = registry_with_app();

    assert!(Arc::ptr_eq(&registry.get_context(SurfaceKind::App).unwrap(), &app));
    assert_eq!(registry.current(), SurfaceKind::None);
    assert!(matches!(
        registry.current_context(),
        Err(ApiError::NoContextAvailable { .. })
    ));
}

#[test]
fn test_primary_becomes_current() {
    let (registry, _app) = registry_with_app();
    let primary = host("primary");

    registry.register(SurfaceKind::Primary, &primary);
    registry.set_current(SurfaceKind::Primary);

    assert!(Arc::ptr_eq(&registry.current_context().unwrap(), &primary));
}

#[test]
fn test_graphics_teardown_falls_back_to_primary() {
    let (registry, _app) = registry_with_app();
    let primary = host("primary");
    let graphics = host("graphics");

    registry.register(SurfaceKind::Primary, &primary);
    registry.register(SurfaceKind::Graphics, &graphics);
    registry.set_current(SurfaceKind::Graphics);
    assert_eq!(registry.current_context().unwrap().name, "graphics");

    assert!(registry.unregister(SurfaceKind::Graphics, &graphics));
    assert_eq!(registry.current(), SurfaceKind::None);
    assert!(Arc::ptr_eq(&registry.current_context().unwrap(), &primary));
}

#[test]
fn test_graphics_teardown_without_primary_fails() {
    let (registry, _app) = registry_with_app();
    let graphics = host("graphics");

    registry.register(SurfaceKind::Graphics, &graphics);
    registry.set_current(SurfaceKind::Graphics);
    registry.unregister(SurfaceKind::Graphics, &graphics);

    let err = registry.current_context().unwrap_err();
    assert!(err.to_string().contains("No context available"));
}

#[test]
fn test_stale_unregister_is_ignored() {
    let (registry, _app) = registry_with_app();
    let old_graphics = host("graphics");
    let new_graphics = host("graphics");

    registry.register(SurfaceKind::Graphics, &old_graphics);
    registry.register(SurfaceKind::Graphics, &new_graphics);
    registry.set_current(SurfaceKind::Graphics);

    // The old instance tears down after its replacement registered.
    assert!(!registry.unregister(SurfaceKind::Graphics, &old_graphics));
    assert!(Arc::ptr_eq(
        &registry.get_context(SurfaceKind::Graphics).unwrap(),
        &new_graphics
    ));
    assert_eq!(registry.current(), SurfaceKind::Graphics);
}

#[test]
fn test_resume_moves_focus() {
    let (registry, _app) = registry_with_app();
    let graphics = host("graphics");
    let web = host("web");
    registry.register(SurfaceKind::Graphics, &graphics);
    registry.register(SurfaceKind::Web, &web);
    registry.set_current(SurfaceKind::Graphics);

    registry.on_pause(SurfaceKind::Web);
    assert_eq!(registry.current(), SurfaceKind::Graphics);
    registry.on_resume(SurfaceKind::Web);

    assert_eq!(registry.current(), SurfaceKind::Web);
    assert_eq!(registry.current_context().unwrap().name, "web");
}

#[test]
fn test_pause_resume_leave_contexts_alone() {
    let (registry, app) = registry_with_app();
    let before = registry.snapshot();

    registry.on_pause(SurfaceKind::App);
    registry.on_pause(SurfaceKind::Web);
    let paused = registry.snapshot();
    assert_eq!(paused.current, before.current);
    for kind in SurfaceKind::ALL {
        assert_eq!(paused.slot(kind).registered, before.slot(kind).registered);
    }

    registry.on_resume(SurfaceKind::App);
    assert!(Arc::ptr_eq(&registry.get_context(SurfaceKind::App).unwrap(), &app));
    assert_eq!(registry.current(), SurfaceKind::App);
    assert!(registry.is_paused(SurfaceKind::Web));
}

#[test]
fn test_clear_after_activity() {
    let (registry, _app) = registry_with_app();
    let primary = host("primary");
    let web = host("web");
    registry.register(SurfaceKind::Primary, &primary);
    registry.register(SurfaceKind::Web, &web);
    registry.on_resume(SurfaceKind::Web);
    registry.on_pause(SurfaceKind::Primary);

    registry.clear();

    for kind in SurfaceKind::ALL {
        assert!(registry.get_context(kind).is_none());
    }
    assert_eq!(registry.current(), SurfaceKind::None);
    assert!(registry.current_context().is_err());

    // Re-registration after teardown works as on a fresh registry.
    registry.register(SurfaceKind::Primary, &primary);
    assert_eq!(registry.current_context().unwrap().name, "primary");
}

#[test]
fn test_snapshot_serializes() {
    let (registry, _app) = registry_with_app();
    registry.set_current(SurfaceKind::Web);
    registry.on_pause(SurfaceKind::Graphics);

    let json = serde_json::to_value(registry.snapshot()).unwrap();
    assert_eq!(json["current"], "web");
    assert_eq!(json["fallback"], "primary");
    assert_eq!(json["slots"][1]["kind"], "app");
    assert_eq!(json["slots"][1]["registered"], true);
    assert_eq!(json["slots"][3]["paused"], true);
}
