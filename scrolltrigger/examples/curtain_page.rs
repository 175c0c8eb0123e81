//! Simulates a curtain page: three full-height background sections with
//! pinned titles, driven by a scripted scroll sweep. Run with:
//!
//! ```sh
//! cargo run -p scrolltrigger --example curtain_page
//! ```

use scrolltrigger::{CurtainSpec, Effect, Engine, EngineOptions, NodeId, ViewportState};

fn describe(effect: &Effect) -> String {
    match effect {
        Effect::SetClass { target, class, on } => {
            if *on {
                format!("add class {class:?} to #{}", target.0)
            } else {
                format!("remove class {class:?} from #{}", target.0)
            }
        }
        Effect::Pin { target } => format!("pin #{}", target.0),
        Effect::Unpin { target } => format!("unpin #{}", target.0),
        Effect::SetMinHeight { target, height } => {
            format!("set min-height of #{} to {height}px", target.0)
        }
        Effect::SetBackgroundImage { target, url } => {
            format!("set background of #{} to {url:?}", target.0)
        }
        Effect::RemoveElement { target } => format!("remove #{}", target.0),
    }
}

fn main() {
    let viewport_height = 900;
    let mut engine = Engine::new(EngineOptions::new().with_initial_viewport(Some(ViewportState {
        height: viewport_height,
    })));

    // Each section is one viewport tall; ids are container/image/title.
    let sections = [
        (NodeId(1), NodeId(2), NodeId(3), "mountains.jpg"),
        (NodeId(4), NodeId(5), NodeId(6), "forest.jpg"),
        (NodeId(7), NodeId(8), NodeId(9), "sea.jpg"),
    ];
    for (i, (container, image, title, url)) in sections.into_iter().enumerate() {
        let top = i as i64 * viewport_height as i64;
        engine
            .install_curtain(
                CurtainSpec::new(container, top)
                    .with_image(image, url)
                    .with_title(title),
            )
            .unwrap();
    }

    let mut effects = Vec::new();
    let mut now_ms = 0;
    let mut offset = 0;
    while offset <= 2 * viewport_height as u64 {
        engine.apply_scroll_event(offset, now_ms);
        engine.collect_effects(&mut effects);
        if !effects.is_empty() {
            println!("scroll {offset:>5}:");
            for effect in &effects {
                println!("    {}", describe(effect));
            }
        }
        offset += 50;
        now_ms += 16;
    }

    // Mid-session resize re-emits every curtain's min-height.
    engine.apply_resize_event(1080);
    engine.collect_effects(&mut effects);
    println!("resize to 1080:");
    for effect in &effects {
        println!("    {}", describe(effect));
    }
}
