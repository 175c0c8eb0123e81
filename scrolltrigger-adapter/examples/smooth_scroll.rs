//! Drives a curtain page with tweened navigation: a click on a nav entry
//! animates the scroll offset to that curtain's zone while effects stream
//! into an in-memory document. Run with:
//!
//! ```sh
//! cargo run -p scrolltrigger-adapter --example smooth_scroll
//! ```

use scrolltrigger::{CurtainSpec, EngineOptions, NodeId, ViewportState};
use scrolltrigger_adapter::{Controller, Easing, MemoryDom};

fn main() {
    let mut controller = Controller::new(
        EngineOptions::new().with_initial_viewport(Some(ViewportState { height: 900 })),
    );
    let mut dom = MemoryDom::new();

    let zones: Vec<_> = (0..3i64)
        .map(|i| {
            let base = i as u64 * 10;
            controller
                .engine_mut()
                .install_curtain(
                    CurtainSpec::new(NodeId(base + 1), i * 900)
                        .with_image(NodeId(base + 2), format!("section-{i}.jpg"))
                        .with_title(NodeId(base + 3)),
                )
                .unwrap()
        })
        .collect();

    // Navigate to the last curtain with a 600ms ease-out tween at 60fps.
    controller.start_tween_to_zone(zones[2].background, 0, 600, Easing::EaseOutQuad);

    let mut now_ms = 0;
    loop {
        let offset = controller.tick(now_ms);
        let mut applied = 0;
        controller.flush_into(|effect| {
            dom.apply(&effect);
            applied += 1;
        });
        match offset {
            Some(offset) => {
                if applied > 0 {
                    println!("t={now_ms:>4}ms offset={offset:>5} ({applied} effects)");
                }
            }
            None => break,
        }
        now_ms += 16;
    }

    println!(
        "arrived at {}; pinned titles: {}",
        controller.engine().scroll_offset(),
        (0..3u64)
            .filter(|i| dom.is_pinned(NodeId(i * 10 + 3)))
            .count()
    );
}
