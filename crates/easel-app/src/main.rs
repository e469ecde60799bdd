//! Headless demo: a paddle-and-ball game driven by a scripted input stream.
//!
//! Usage: `easel-demo [snapshot.png]`. Set `RUST_LOG=debug` for detail and
//! `EASEL_CONFIG` to a JSON file to override toolkit defaults.

use easel_core::prelude::*;
use easel_core::{Button, HostEvent, ToolkitConfig};
use easel_render::{FileImageStore, export_png};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

const WIDTH: i32 = 320;
const HEIGHT: i32 = 240;
const TICK_MS: i64 = 30;
const MAX_TICKS: u32 = 2000;

type DemoResult<T> = Result<T, Box<dyn std::error::Error>>;

fn required<T>(shape: Option<T>) -> DemoResult<T> {
    shape.ok_or_else(|| "window closed while building the scene".into())
}

fn main() {
    env_logger::init();
    log::info!("Starting easel demo");

    let snapshot = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "easel-demo.png".to_string());
    if let Err(e) = run(&snapshot) {
        log::error!("Demo failed: {e}");
        std::process::exit(1);
    }
}

fn run(snapshot: &str) -> DemoResult<()> {
    let host = HeadlessHost::new();
    let images = Rc::new(FileImageStore::new(std::env::current_dir()?));
    let manager = WindowManager::with_config(host.clone(), ToolkitConfig::from_env()).with_image_store(images);
    let window = Window::new(&manager, WIDTH, HEIGHT)?;
    window.fill((235, 245, 255))?;

    let paddle = required(window.rectangle(130, 220, 60, 8)?)?;
    paddle.fill("navy")?;
    paddle.group("solid")?;
    let ball = required(window.oval(150, 20, 12, 12)?)?;
    ball.fill("orange")?;
    ball.border(0, "black")?;
    let score = required(window.text(8, 8, "score: 0")?)?;
    let reset = required(window.button(240, 4, "Reset")?)?;
    let name = required(window.field(8, 200, "player")?)?;
    let floor = required(window.line([(0, HEIGHT - 1), (WIDTH, HEIGHT - 1)])?)?;
    floor.border(2, "darkred")?;

    let velocity = Rc::new(Cell::new((3, 4)));
    let points = Rc::new(Cell::new(0u32));
    let ticks = Rc::new(Cell::new(0u32));

    {
        let paddle = paddle.clone();
        window.on_key_press(Rc::new(move |key: &str| {
            let dx = match key {
                "Left" => -12,
                "Right" => 12,
                _ => return,
            };
            let x = (paddle.x() + dx).clamp(0, WIDTH - paddle.width());
            if let Err(e) = paddle.relocate(x, paddle.y()) {
                log::warn!("Paddle move failed: {e}");
            }
        }));
    }

    {
        let paddle = paddle.clone();
        window.on_left_click(Rc::new(move |x: i32, _y: i32| {
            let x = (x - paddle.width() / 2).clamp(0, WIDTH - paddle.width());
            if let Err(e) = paddle.relocate(x, paddle.y()) {
                log::warn!("Paddle move failed: {e}");
            }
        }));
    }

    {
        let (ball, score, points, velocity) = (ball.clone(), score.clone(), points.clone(), velocity.clone());
        reset.on_activate(ActivateHandler::with_source(move |button| {
            log::info!("'{}' pressed", button.label());
            points.set(0);
            velocity.set((3, 4));
            score.rewrite("score: 0");
            if let Err(e) = ball.relocate(150, 20) {
                log::warn!("Ball reset failed: {e}");
            }
        }));
    }

    {
        let window_ref = window.clone();
        let host = host.clone();
        let snapshot = snapshot.to_string();
        let tick: TimerHandler = Rc::new(move || {
            ticks.set(ticks.get() + 1);
            let (mut vx, mut vy) = velocity.get();
            if let Err(e) = ball.move_by(vx, vy) {
                log::warn!("Ball move failed: {e}");
            }
            if ball.left() <= 0 || ball.right() >= WIDTH {
                vx = -vx;
            }
            if ball.top() <= 0 {
                vy = -vy;
            }
            let hit = window_ref
                .all(Some("solid"))
                .iter()
                .any(|solid| ball.overlaps(solid));
            if hit && vy > 0 {
                vy = -vy;
                points.set(points.get() + 1);
                score.rewrite(format!("score: {}", points.get()));
            }
            velocity.set((vx, vy));

            if ball.bottom() >= HEIGHT || ticks.get() >= MAX_TICKS {
                if let Some(scene) = host.scene(window_ref.surface_id()) {
                    match export_png(&scene, &snapshot) {
                        Ok(bytes) => log::info!("Wrote {bytes} byte snapshot to {snapshot}"),
                        Err(e) => log::error!("Snapshot failed: {e}"),
                    }
                }
                let player = name.contents();
                window_ref.close(&format!("{player}: final score {}", points.get()));
                return TimerControl::Stop;
            }
            TimerControl::Continue
        });
        window.on_timer(TICK_MS, tick)?;
    }

    script(&host, &window, &reset, &manager);

    match window.open(Some("easel demo")) {
        Some(output) => println!("{output}"),
        None => log::warn!("Event loop ended without closing the window"),
    }
    Ok(())
}

/// Queue the input a player would produce.
fn script(host: &HeadlessHost, window: &Window, reset: &Button, manager: &WindowManager) {
    let id = window.surface_id();
    let at = |ms: u64| manager.now() + Duration::from_millis(ms);
    let name = window
        .all(None)
        .iter()
        .find_map(|shape| shape.as_field())
        .map(|field| field.item());

    if let Some(item) = name {
        host.push_event_at(at(10), HostEvent::new(id, InputEvent::FieldFocused { item }));
        host.push_event_at(
            at(20),
            HostEvent::new(id, InputEvent::FieldEdited { item, text: "Ada".into() }),
        );
    }
    for (i, key) in ["Right", "Right", "Left", "Right"].iter().enumerate() {
        host.push_event_at(
            at(100 + 150 * i as u64),
            HostEvent::new(id, InputEvent::KeyPress { key: key.to_string() }),
        );
    }
    host.push_event_at(at(900), HostEvent::new(id, InputEvent::LeftClick { x: 200, y: 230 }));
    host.push_event_at(at(1500), HostEvent::new(id, InputEvent::ButtonActivated { item: reset.item() }));
}
