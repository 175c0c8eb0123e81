use crate::*;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

static INITIAL_OFFSET_PROVIDER_CALLED: AtomicU64 = AtomicU64::new(0);

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_i64(&mut self, start: i64, end_exclusive: i64) -> i64 {
        debug_assert!(start < end_exclusive);
        let span = (end_exclusive - start) as u64;
        start + (self.next_u64() % span) as i64
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        start + self.next_u64() % (end_exclusive - start)
    }

    fn gen_range_u32(&mut self, start: u32, end_exclusive: u32) -> u32 {
        self.gen_range_u64(start as u64, end_exclusive as u64) as u32
    }

    fn gen_bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

fn node(id: u64) -> NodeId {
    NodeId(id)
}

fn engine_with_viewport(height: u32) -> Engine {
    Engine::new(EngineOptions::new().with_initial_viewport(Some(ViewportState { height })))
}

fn drain(engine: &mut Engine) -> Vec<Effect> {
    let mut out = Vec::new();
    engine.collect_effects(&mut out);
    out
}

/// Sequence of `on` flags of class effects targeting `target`.
fn class_ops(effects: &[Effect], target: NodeId) -> Vec<bool> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::SetClass { target: t, on, .. } if *t == target => Some(*on),
            _ => None,
        })
        .collect()
}

/// Reference model: the zone state implied by where the trigger line sits in
/// the document, written as a direct comparison rather than the engine's
/// precomputed-start form.
fn expected_state(
    element_top: i64,
    offset: i64,
    duration: u64,
    hook: TriggerHook,
    scroll: u64,
    viewport_height: u32,
) -> ZoneState {
    let line = scroll as i64
        + match hook {
            TriggerHook::OnEnter => viewport_height as i64,
            TriggerHook::OnCenter => (viewport_height / 2) as i64,
            TriggerHook::OnLeave => 0,
        };
    let start = element_top + offset;
    if line < start {
        ZoneState::Before
    } else if duration == 0 || line < start + duration as i64 {
        ZoneState::Active
    } else {
        ZoneState::After
    }
}

#[test]
fn zone_class_toggles_on_enter_and_leave() {
    let mut engine = engine_with_viewport(600);
    let zone = engine.register_zone(
        ZoneOptions::new(1000)
            .with_duration(500)
            .with_class(node(1), "active", ClassMode::AddWhileActive),
    );

    assert!(drain(&mut engine).is_empty());
    assert_eq!(engine.zone_state(zone), Some(ZoneState::Before));

    engine.set_scroll_offset(1200);
    let effects = drain(&mut engine);
    assert_eq!(
        effects,
        [Effect::SetClass {
            target: node(1),
            class: String::from("active"),
            on: true,
        }]
    );
    assert_eq!(engine.zone_state(zone), Some(ZoneState::Active));

    engine.set_scroll_offset(1600);
    let effects = drain(&mut engine);
    assert_eq!(
        effects,
        [Effect::SetClass {
            target: node(1),
            class: String::from("active"),
            on: false,
        }]
    );
    assert_eq!(engine.zone_state(zone), Some(ZoneState::After));
}

#[test]
fn curtain_install_emits_setup_effects_in_order() {
    let mut engine = engine_with_viewport(600);
    let zones = engine
        .install_curtain(
            CurtainSpec::new(node(10), 2000)
                .with_image(node(11), "bg.jpg")
                .with_title(node(12)),
        )
        .unwrap();
    assert!(zones.title.is_some());

    let effects = drain(&mut engine);
    assert_eq!(
        effects,
        [
            Effect::SetClass {
                target: node(10),
                class: String::from("fixed"),
                on: true,
            },
            Effect::SetMinHeight {
                target: node(10),
                height: 600,
            },
            Effect::SetBackgroundImage {
                target: node(10),
                url: String::from("bg.jpg"),
            },
            Effect::RemoveElement { target: node(11) },
        ]
    );
}

#[test]
fn curtain_without_image_skips_background_effects() {
    let mut engine = engine_with_viewport(600);
    engine
        .install_curtain(CurtainSpec::new(node(10), 2000))
        .unwrap();

    let effects = drain(&mut engine);
    assert!(!effects
        .iter()
        .any(|e| matches!(e, Effect::SetBackgroundImage { .. } | Effect::RemoveElement { .. })));
}

#[test]
fn curtain_min_height_tracks_resize() {
    let mut engine = engine_with_viewport(600);
    engine
        .install_curtain(CurtainSpec::new(node(10), 2000))
        .unwrap();
    engine
        .install_curtain(CurtainSpec::new(node(20), 4000))
        .unwrap();
    drain(&mut engine);

    engine.apply_resize_event(720);
    let effects = drain(&mut engine);
    assert_eq!(
        effects,
        [
            Effect::SetMinHeight {
                target: node(10),
                height: 720,
            },
            Effect::SetMinHeight {
                target: node(20),
                height: 720,
            },
        ]
    );

    // Same height again: nothing to re-emit.
    engine.apply_resize_event(720);
    assert!(drain(&mut engine).is_empty());
}

#[test]
fn fixed_class_toggles_exactly_twice_across_sweep() {
    let mut engine = engine_with_viewport(600);
    engine
        .install_curtain(CurtainSpec::new(node(10), 800))
        .unwrap();
    drain(&mut engine);

    let mut toggles = Vec::new();
    let mut scroll = 0u64;
    while scroll <= 2000 {
        engine.set_scroll_offset(scroll);
        toggles.extend(class_ops(&drain(&mut engine), node(10)));
        scroll += 25;
    }

    // Unfixed on enter (RemoveWhileActive), refixed on leave: exactly twice.
    assert_eq!(toggles, [false, true]);
}

#[test]
fn title_pin_follows_active_window_both_directions() {
    let mut engine = engine_with_viewport(600);
    let zone = engine.register_zone(ZoneOptions::new(1000).with_duration(500).with_pin(node(7)));

    engine.set_scroll_offset(1000);
    assert_eq!(drain(&mut engine), [Effect::Pin { target: node(7) }]);

    engine.set_scroll_offset(1499);
    assert!(drain(&mut engine).is_empty());

    engine.set_scroll_offset(1500);
    assert_eq!(drain(&mut engine), [Effect::Unpin { target: node(7) }]);

    // Scrolling back re-enters the zone from the other side.
    engine.set_scroll_offset(1200);
    assert_eq!(drain(&mut engine), [Effect::Pin { target: node(7) }]);

    engine.set_scroll_offset(500);
    assert_eq!(drain(&mut engine), [Effect::Unpin { target: node(7) }]);
    assert_eq!(engine.zone_state(zone), Some(ZoneState::Before));
}

#[test]
fn before_to_after_jump_emits_no_effects() {
    let mut engine = engine_with_viewport(600);
    let zone = engine.register_zone(
        ZoneOptions::new(1000)
            .with_duration(500)
            .with_class(node(1), "active", ClassMode::AddWhileActive)
            .with_pin(node(2)),
    );
    drain(&mut engine);

    engine.set_scroll_offset(5000);
    assert!(drain(&mut engine).is_empty());
    assert_eq!(engine.zone_state(zone), Some(ZoneState::After));
}

#[test]
fn open_ended_zone_stays_active_until_scrolled_back() {
    let mut engine = engine_with_viewport(600);
    let zone = engine.register_zone(ZoneOptions::new(1000).with_pin(node(7)));

    engine.set_scroll_offset(u64::MAX);
    drain(&mut engine);
    assert_eq!(engine.zone_state(zone), Some(ZoneState::Active));

    engine.set_scroll_offset(999);
    drain(&mut engine);
    assert_eq!(engine.zone_state(zone), Some(ZoneState::Before));
}

#[test]
fn hook_shifts_trigger_by_viewport_height() {
    let mut engine = engine_with_viewport(600);
    let zone = engine.register_zone(ZoneOptions::new(1000).with_hook(TriggerHook::OnEnter));
    assert_eq!(engine.zone_start(zone), Some(400));

    engine.set_scroll_offset(399);
    drain(&mut engine);
    assert_eq!(engine.zone_state(zone), Some(ZoneState::Before));

    engine.set_scroll_offset(400);
    drain(&mut engine);
    assert_eq!(engine.zone_state(zone), Some(ZoneState::Active));
}

#[test]
fn negative_offset_triggers_early() {
    let mut engine = engine_with_viewport(600);
    let zone = engine.register_zone(ZoneOptions::new(1000).with_offset(-200).with_duration(500));
    assert_eq!(engine.zone_start(zone), Some(800));

    engine.set_scroll_offset(800);
    drain(&mut engine);
    assert_eq!(engine.zone_state(zone), Some(ZoneState::Active));
}

#[test]
fn double_install_is_a_noop() {
    let mut engine = engine_with_viewport(600);
    engine
        .install_curtain(CurtainSpec::new(node(10), 2000).with_image(node(11), "bg.jpg"))
        .unwrap();
    drain(&mut engine);
    let zones_before = engine.zone_count();

    let again = engine.install_curtain(CurtainSpec::new(node(10), 2000).with_image(node(11), "bg.jpg"));
    assert!(again.is_none());
    assert_eq!(engine.zone_count(), zones_before);
    assert_eq!(engine.curtain_count(), 1);
    // No repeated setup effects, no second image removal.
    assert!(drain(&mut engine).is_empty());
}

#[test]
fn uninstall_restores_active_curtain() {
    let mut engine = engine_with_viewport(600);
    engine
        .install_curtain(CurtainSpec::new(node(10), 1000).with_title(node(12)))
        .unwrap();
    drain(&mut engine);

    // Both zones active: background at 1000, title zone at 800 (offset -200).
    engine.set_scroll_offset(1100);
    drain(&mut engine);

    assert!(engine.uninstall_curtain(node(10)));
    let effects = drain(&mut engine);
    assert_eq!(
        effects,
        [
            Effect::SetClass {
                target: node(10),
                class: String::from("fixed"),
                on: true,
            },
            Effect::Unpin { target: node(12) },
        ]
    );
    assert_eq!(engine.zone_count(), 0);
    assert!(!engine.uninstall_curtain(node(10)));
}

#[test]
fn detached_zone_is_skipped_until_reattached() {
    let mut engine = engine_with_viewport(600);
    let zone = engine.register_zone(ZoneOptions::new(1000).with_duration(500).with_pin(node(7)));
    assert!(engine.set_zone_detached(zone, true));

    engine.set_scroll_offset(1200);
    assert!(drain(&mut engine).is_empty());
    assert_eq!(engine.zone_state(zone), Some(ZoneState::Before));

    assert!(engine.set_zone_detached(zone, false));
    assert_eq!(drain(&mut engine), [Effect::Pin { target: node(7) }]);
}

#[test]
fn element_top_updates_shift_the_zone() {
    let mut engine = engine_with_viewport(600);
    let zone = engine.register_zone(ZoneOptions::new(1000).with_duration(500).with_pin(node(7)));

    engine.set_scroll_offset(700);
    drain(&mut engine);
    assert_eq!(engine.zone_state(zone), Some(ZoneState::Before));

    // Relayout moved the element up; the zone now covers the current offset.
    assert!(engine.set_zone_element_top(zone, 600));
    assert_eq!(drain(&mut engine), [Effect::Pin { target: node(7) }]);
}

#[test]
fn flush_is_idempotent_at_fixed_offset() {
    let mut engine = engine_with_viewport(600);
    engine
        .install_curtain(CurtainSpec::new(node(10), 800).with_title(node(12)))
        .unwrap();

    engine.set_scroll_offset(900);
    assert!(!drain(&mut engine).is_empty());
    assert!(drain(&mut engine).is_empty());
    assert!(drain(&mut engine).is_empty());
}

#[test]
fn unregister_unknown_zone_returns_false() {
    let mut engine = engine_with_viewport(600);
    assert!(!engine.unregister_zone(ZoneId(42)));
    assert!(!engine.set_zone_detached(ZoneId(42), true));
    assert!(!engine.set_zone_element_top(ZoneId(42), 0));
    assert_eq!(engine.zone_state(ZoneId(42)), None);
}

#[test]
fn registration_order_orders_conflicting_effects() {
    let mut engine = engine_with_viewport(600);
    engine.register_zone(
        ZoneOptions::new(1000)
            .with_duration(500)
            .with_class(node(1), "fixed", ClassMode::AddWhileActive),
    );
    engine.register_zone(
        ZoneOptions::new(1000)
            .with_duration(500)
            .with_class(node(1), "fixed", ClassMode::RemoveWhileActive),
    );

    engine.set_scroll_offset(1200);
    let ops = class_ops(&drain(&mut engine), node(1));
    // Both zones fire; the last-registered one wins the final class state.
    assert_eq!(ops, [true, false]);
}

#[test]
fn batch_update_coalesces_notifications() {
    let notified = Arc::new(AtomicUsize::new(0));
    let mut engine = Engine::new(EngineOptions::new().with_on_change(Some({
        let notified = Arc::clone(&notified);
        move |_: &Engine, _| {
            notified.fetch_add(1, Ordering::Relaxed);
        }
    })));

    engine.batch_update(|e| {
        e.set_viewport_height(600);
        e.set_scroll_offset(10);
        e.notify_scroll_event(0);
    });
    assert_eq!(notified.load(Ordering::Relaxed), 1);

    engine.set_scroll_offset(20);
    assert_eq!(notified.load(Ordering::Relaxed), 2);
}

#[test]
fn is_scrolling_resets_after_delay_without_scrollend_event() {
    let mut engine = Engine::new(EngineOptions::new().with_is_scrolling_reset_delay_ms(10));
    engine.notify_scroll_event(0);
    assert!(engine.is_scrolling());
    engine.update_scrolling(9);
    assert!(engine.is_scrolling());
    engine.update_scrolling(10);
    assert!(!engine.is_scrolling());
}

#[test]
fn scrollend_event_mode_disables_the_debounce() {
    let mut engine = Engine::new(EngineOptions::new().with_use_scrollend_event(true));
    engine.notify_scroll_event(0);
    engine.update_scrolling(1_000);
    assert!(engine.is_scrolling());
    engine.set_is_scrolling(false);
    assert!(!engine.is_scrolling());
}

#[test]
fn scroll_direction_tracks_movement() {
    let mut engine = engine_with_viewport(600);
    assert_eq!(engine.scroll_direction(), None);
    engine.set_scroll_offset(100);
    assert_eq!(engine.scroll_direction(), Some(ScrollDirection::Forward));
    engine.set_scroll_offset(50);
    assert_eq!(engine.scroll_direction(), Some(ScrollDirection::Backward));
    engine.notify_scroll_event(0);
    engine.set_is_scrolling(false);
    assert_eq!(engine.scroll_direction(), None);
}

#[test]
fn initial_offset_provider_is_used() {
    INITIAL_OFFSET_PROVIDER_CALLED.store(0, Ordering::Relaxed);
    let engine = Engine::new(EngineOptions::new().with_initial_offset(InitialOffset::Provider(
        Arc::new(|| {
            INITIAL_OFFSET_PROVIDER_CALLED.fetch_add(1, Ordering::Relaxed);
            42
        }),
    )));
    assert_eq!(engine.scroll_offset(), 42);
    assert!(INITIAL_OFFSET_PROVIDER_CALLED.load(Ordering::Relaxed) >= 1);
}

#[test]
fn disabled_engine_holds_effects_until_enabled() {
    let mut engine = Engine::new(
        EngineOptions::new()
            .with_enabled(false)
            .with_initial_viewport(Some(ViewportState { height: 600 })),
    );
    engine
        .install_curtain(CurtainSpec::new(node(10), 2000))
        .unwrap();
    assert!(drain(&mut engine).is_empty());

    engine.set_enabled(true);
    let effects = drain(&mut engine);
    assert!(effects
        .iter()
        .any(|e| matches!(e, Effect::SetMinHeight { target, .. } if *target == node(10))));
}

#[test]
fn resize_reevaluates_hooked_zones() {
    let mut engine = engine_with_viewport(400);
    let zone = engine.register_zone(ZoneOptions::new(1000).with_hook(TriggerHook::OnEnter));

    engine.set_scroll_offset(500);
    drain(&mut engine);
    assert_eq!(engine.zone_state(zone), Some(ZoneState::Before));

    // A taller viewport moves the OnEnter line past the element.
    engine.apply_resize_event(800);
    drain(&mut engine);
    assert_eq!(engine.zone_state(zone), Some(ZoneState::Active));
}

#[test]
fn randomized_sweep_matches_reference_model() {
    let mut rng = Lcg::new(0x5eed_5eed);

    for _ in 0..20 {
        let viewport_height = rng.gen_range_u32(100, 1000);
        let mut engine = engine_with_viewport(viewport_height);

        struct ModelZone {
            id: ZoneId,
            target: NodeId,
            element_top: i64,
            offset: i64,
            duration: u64,
            hook: TriggerHook,
        }

        let zone_count = rng.gen_range_u64(1, 6) as usize;
        let mut zones = Vec::with_capacity(zone_count);
        for i in 0..zone_count {
            let element_top = rng.gen_range_i64(0, 5000);
            let offset = rng.gen_range_i64(-300, 300);
            let duration = if rng.gen_bool() {
                0
            } else {
                rng.gen_range_u64(100, 800)
            };
            let hook = match rng.gen_range_u64(0, 3) {
                0 => TriggerHook::OnEnter,
                1 => TriggerHook::OnCenter,
                _ => TriggerHook::OnLeave,
            };
            let target = node(100 + i as u64);
            let id = engine.register_zone(
                ZoneOptions::new(element_top)
                    .with_offset(offset)
                    .with_duration(duration)
                    .with_hook(hook)
                    .with_class(target, "active", ClassMode::AddWhileActive),
            );
            zones.push(ModelZone {
                id,
                target,
                element_top,
                offset,
                duration,
                hook,
            });
        }

        let mut class_on = alloc::vec![false; zone_count];
        let mut effects = Vec::new();
        for _ in 0..40 {
            engine.set_scroll_offset(rng.gen_range_u64(0, 6000));
            engine.collect_effects(&mut effects);

            for (i, zone) in zones.iter().enumerate() {
                for on in class_ops(&effects, zone.target) {
                    class_on[i] = on;
                }
            }

            for (i, zone) in zones.iter().enumerate() {
                let expected = expected_state(
                    zone.element_top,
                    zone.offset,
                    zone.duration,
                    zone.hook,
                    engine.scroll_offset(),
                    viewport_height,
                );
                assert_eq!(engine.zone_state(zone.id), Some(expected));
                assert_eq!(class_on[i], expected.is_active());
            }
        }
    }
}
