//! Browser runtime: canvas bootstrap, keyboard listeners and the
//! `requestAnimationFrame` loop driving the party game and the fireworks.

use std::cell::RefCell;
use std::rc::Rc;

use rand::{Rng, SeedableRng};
use rand::rngs::SmallRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, window};

use crate::clock::FrameClock;
use crate::config::GameConfig;
use crate::error::AppError;
use crate::fireworks::{FireworksConfig, FireworksEngine};
use crate::hud;
use crate::input::{KeyboardInput, poll_gamepads};
use crate::party::{HighScoreStore, LocalStorageStore, MemoryStore, PartyEvent, PartyGame};
use crate::vec2::Vec2;

const DEFAULT_CANVAS_SIZE: u32 = 640;

/// Runtime state for the running page.
struct App {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    game: PartyGame<Box<dyn HighScoreStore>>,
    fireworks: FireworksEngine,
    keyboard: KeyboardInput,
    clock: FrameClock,
    rng: SmallRng,
}

impl App {
    fn size(&self) -> (f64, f64) {
        (self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn on_event(&mut self, event: PartyEvent) {
        let (w, h) = self.size();
        match event {
            PartyEvent::Tap { player } => {
                let origin = Vec2::new(
                    self.rng.gen_range(0.0..w.max(1.0)),
                    self.rng.gen_range(0.0..h.max(1.0)),
                );
                let cfg = &self.game.config().tap_fireworks;
                if let Err(e) = self.fireworks.spawn_burst(origin, cfg, &mut self.rng) {
                    log::warn!("tap burst for player {player} dropped: {e}");
                }
            }
            PartyEvent::Finished { winner, new_high_score } => {
                let (anchor, _) = hud::player_anchor(winner, w, h);
                let cfg = &self.game.config().celebration;
                if let Err(e) = self.fireworks.spawn_burst(anchor, cfg, &mut self.rng) {
                    log::warn!("celebration dropped: {e}");
                }
                if new_high_score {
                    log::info!("new high score: {}", self.game.high_score());
                }
            }
            PartyEvent::Second { remaining } => log::debug!("{remaining}s left"),
            PartyEvent::Started => log::debug!("round started"),
        }
    }

    fn frame(&mut self, now: f64) {
        let steps = self.clock.steps(now);
        if steps > 0 {
            let pads = window()
                .map(|w| poll_gamepads(&w.navigator()))
                .unwrap_or_default();
            let input = pads.merge(self.keyboard.snapshot());
            let dt = self.clock.step_ms();
            for _ in 0..steps {
                for event in self.game.update(&input, dt) {
                    self.on_event(event);
                }
                self.fireworks.advance();
            }
        }
        let (w, h) = self.size();
        hud::draw(&self.ctx, &hud::layout(&self.game, w, h), w, h);
        self.fireworks.render(&mut self.ctx);
    }
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

/// Boot the game on the configured canvas, creating the canvas when the page
/// does not provide one. A second call swaps in a fresh game and config and
/// keeps the existing listeners and loop.
pub fn start(config: GameConfig) -> Result<(), AppError> {
    config.validate()?;
    let win = window().ok_or(AppError::NoWindow)?;
    let doc = win.document().ok_or(AppError::NoDocument)?;

    let not_canvas = |_| AppError::NotCanvas(config.canvas_id.clone());
    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id(&config.canvas_id) {
        el.dyn_into().map_err(not_canvas)?
    } else {
        let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into().map_err(not_canvas)?;
        c.set_id(&config.canvas_id);
        c.set_width(DEFAULT_CANVAS_SIZE);
        c.set_height(DEFAULT_CANVAS_SIZE);
        doc.body().ok_or(AppError::NoDocument)?.append_child(&c)?;
        c
    };
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .and_then(|ctx| ctx.dyn_into().ok())
        .ok_or_else(|| AppError::NoContext(config.canvas_id.clone()))?;

    let store: Box<dyn HighScoreStore> = match LocalStorageStore::from_window(&win) {
        Some(s) => Box::new(s),
        None => {
            log::warn!("localStorage unavailable; high scores last for this page only");
            Box::new(MemoryStore::new())
        }
    };

    let clock = FrameClock::new(config.frame_ms);
    let app = App {
        canvas,
        ctx,
        game: PartyGame::new(config, store)?,
        fireworks: FireworksEngine::new(),
        keyboard: KeyboardInput::default(),
        clock,
        rng: SmallRng::from_entropy(),
    };

    let already_running = APP.with(|cell| cell.replace(Some(app)).is_some());
    if !already_running {
        install_keyboard_listeners(&win)?;
        start_loop();
    }
    log::info!("tap party ready");
    Ok(())
}

/// Spawn a tap-style burst of `count` particles at (x, y).
pub fn launch(x: f64, y: f64, count: i64) -> Result<usize, AppError> {
    let count = crate::fireworks::particle_count(count)?;
    APP.with(|cell| {
        let mut guard = cell.borrow_mut();
        let app = guard.as_mut().ok_or(AppError::NotRunning)?;
        let cfg = FireworksConfig {
            particle_count: count,
            ..app.game.config().tap_fireworks.clone()
        };
        Ok(app.fireworks.spawn_burst(Vec2::new(x, y), &cfg, &mut app.rng)?)
    })
}

fn with_keyboard(f: impl FnOnce(&mut KeyboardInput) -> bool) -> bool {
    APP.with(|cell| cell.borrow_mut().as_mut().is_some_and(|app| f(&mut app.keyboard)))
}

fn install_keyboard_listeners(win: &web_sys::Window) -> Result<(), AppError> {
    let down = Closure::<dyn FnMut(KeyboardEvent)>::new(|e: KeyboardEvent| {
        if with_keyboard(|kb| kb.key_down(&e.code())) {
            e.prevent_default();
        }
    });
    let up = Closure::<dyn FnMut(KeyboardEvent)>::new(|e: KeyboardEvent| {
        with_keyboard(|kb| kb.key_up(&e.code()));
    });
    let blur = Closure::<dyn FnMut()>::new(|| {
        with_keyboard(|kb| {
            kb.release_all();
            true
        });
    });
    win.add_event_listener_with_callback("keydown", down.as_ref().unchecked_ref())?;
    win.add_event_listener_with_callback("keyup", up.as_ref().unchecked_ref())?;
    win.add_event_listener_with_callback("blur", blur.as_ref().unchecked_ref())?;
    // Listeners live for the page.
    down.forget();
    up.forget();
    blur.forget();
    Ok(())
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        APP.with(|cell| {
            if let Some(app) = cell.borrow_mut().as_mut() {
                app.frame(ts);
            }
        });
        request_frame(&f);
    }) as Box<dyn FnMut(f64)>));
    request_frame(&g);
}

fn request_frame(f: &FrameCallback) {
    if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
