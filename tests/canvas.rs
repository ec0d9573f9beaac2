use std::path::Path;
use std::sync::Arc;

use paintpad::{
    Config,
    backend::{HeadlessState, ScriptStep},
    draw::{BLUE, Rgba, WHITE},
    input::{DisplayRect, PointerEvent, Tool},
    notification::CollectingNotifier,
    persist::FileSaveConfig,
};
use tempfile::TempDir;

fn headless(
    runtime: &tokio::runtime::Runtime,
    viewport_width: u32,
    output: &Path,
) -> (HeadlessState, Arc<CollectingNotifier>) {
    let notifier = Arc::new(CollectingNotifier::new());
    let mut state = HeadlessState::new(
        Config::default(),
        viewport_width,
        runtime.handle(),
        Box::new(notifier.clone()),
    )
    .unwrap();
    state.set_save_config(FileSaveConfig {
        save_directory: output.to_path_buf(),
        filename: "my-painting.png".to_string(),
    });
    (state, notifier)
}

fn mouse(x: f64, y: f64) -> PointerEvent {
    PointerEvent::mouse(x, y)
}

#[test]
fn saved_painting_reloads_pixel_exact() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let temp = TempDir::new().unwrap();
    let (mut first, _) = headless(&runtime, 1280, temp.path());

    first.run_steps(&[
        ScriptStep::SetBrushSize { size: 9 },
        ScriptStep::PointerDown {
            event: mouse(100.0, 100.0),
        },
        ScriptStep::PointerMove {
            event: mouse(600.0, 300.0),
        },
        ScriptStep::PointerUp,
        ScriptStep::SetTool { tool: Tool::Eraser },
        ScriptStep::PointerDown {
            event: mouse(300.0, 100.0),
        },
        ScriptStep::PointerMove {
            event: mouse(300.0, 400.0),
        },
        ScriptStep::PointerUp,
    ]);
    let path = first.save().unwrap();
    let exported = image::open(&path).unwrap().to_rgba8();

    let (mut second, notifier) = headless(&runtime, 1280, temp.path());
    second.open(Some(path.as_path())).unwrap();
    assert_eq!(second.wait_for_loads(), 1);

    let store = &mut second.input_state_mut().store;
    for (x, y) in [(100, 100), (350, 200), (300, 250), (900, 450), (0, 0)] {
        let [r, g, b, a] = exported.get_pixel(x, y).0;
        assert_eq!(store.pixel(x, y).unwrap(), Some(Rgba { r, g, b, a }));
    }
    assert_eq!(notifier.count(), 0);
}

#[test]
fn open_without_file_alerts_exactly_once() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let temp = TempDir::new().unwrap();
    let (mut state, notifier) = headless(&runtime, 375, temp.path());
    state.run_steps(&[
        ScriptStep::PointerDown {
            event: mouse(10.0, 10.0),
        },
        ScriptStep::PointerUp,
    ]);
    let before = state.input_state_mut().store.snapshot().unwrap();

    state.run_steps(&[ScriptStep::Open { path: None }]);

    assert_eq!(notifier.count(), 1);
    assert_eq!(state.input_state_mut().store.snapshot().unwrap(), before);
}

#[test]
fn small_image_is_stretched_over_whole_canvas() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("blue.png");
    image::RgbaImage::from_pixel(10, 10, image::Rgba([0, 0, 255, 255]))
        .save(&source)
        .unwrap();
    let (mut state, _) = headless(&runtime, 375, temp.path());

    state.run_steps(&[
        ScriptStep::Open {
            path: Some(source.clone()),
        },
        ScriptStep::WaitForLoads,
    ]);

    let store = &mut state.input_state_mut().store;
    assert_eq!(store.pixel(0, 0).unwrap(), Some(Rgba::opaque(BLUE)));
    assert_eq!(store.pixel(339, 519).unwrap(), Some(Rgba::opaque(BLUE)));
}

#[test]
fn scaled_display_maps_strokes_into_backing_pixels() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let temp = TempDir::new().unwrap();
    let (mut state, _) = headless(&runtime, 1280, temp.path());

    // 1000x500 canvas shown at half size, offset inside its container
    state.run_steps(&[
        ScriptStep::Resize {
            canvas: DisplayRect::new(50.0, 30.0, 500.0, 250.0),
            parent: DisplayRect::new(0.0, 0.0, 800.0, 600.0),
        },
        ScriptStep::PointerDown {
            event: mouse(100.0, 80.0),
        },
        ScriptStep::PointerUp,
    ]);

    let store = &mut state.input_state_mut().store;
    assert_eq!(store.pixel(100, 100).unwrap(), Some(Rgba::opaque(paintpad::draw::BLACK)));
    assert_eq!(store.pixel(50, 50).unwrap(), Some(Rgba::TRANSPARENT));
}

#[test]
fn eraser_output_matches_untouched_background() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let temp = TempDir::new().unwrap();
    let (mut state, _) = headless(&runtime, 375, temp.path());

    state.run_steps(&[
        ScriptStep::PointerDown {
            event: mouse(20.0, 50.0),
        },
        ScriptStep::PointerMove {
            event: mouse(200.0, 50.0),
        },
        ScriptStep::PointerUp,
        ScriptStep::SetTool { tool: Tool::Eraser },
        ScriptStep::SetBrushSize { size: 30 },
        ScriptStep::PointerDown {
            event: mouse(10.0, 50.0),
        },
        ScriptStep::PointerMove {
            event: mouse(210.0, 50.0),
        },
        ScriptStep::PointerUp,
    ]);

    let store = &mut state.input_state_mut().store;
    assert_eq!(store.pixel(100, 50).unwrap(), Some(Rgba::opaque(WHITE)));
}
