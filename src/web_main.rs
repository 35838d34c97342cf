use crate::{Game, GameLoop, Input, Renderer, WebRenderer};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

struct App {
    game_loop: GameLoop,
    renderer: WebRenderer,
}

impl App {
    fn new(canvas_id: &str) -> Result<Self, JsValue> {
        let mut renderer = WebRenderer::new(canvas_id)?;
        renderer
            .init()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        // The canvas element decides how big the playfield is
        let (width, height) = renderer.surface_size();
        let game_loop = GameLoop::new(Game::new(width, height));

        Ok(Self {
            game_loop,
            renderer,
        })
    }

    /// One animation frame: apply pending input, advance, paint. The ball
    /// moves a fixed distance per call, so the browser's callback rate sets
    /// the game speed, exactly like the terminal tick does.
    fn update_frame(&mut self) -> Result<(), JsValue> {
        if let Some(input) = self
            .renderer
            .poll_input()
            .map_err(|e| JsValue::from_str(&e.to_string()))?
        {
            match input {
                Input::PointerMove(y) => {
                    self.game_loop.game_mut().track_pointer(y);
                }
                Input::Quit => {
                    // No teardown path in a browser tab; stop stepping
                    web_sys::console::log_1(&"Game stopped".into());
                    self.game_loop.stop();
                }
            }
        }

        self.game_loop.step();

        self.renderer
            .render(self.game_loop.game())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(())
    }

    fn is_running(&self) -> bool {
        self.game_loop.is_running()
    }
}

#[wasm_bindgen]
pub fn start_game(canvas_id: &str) -> Result<(), JsValue> {
    // Set panic hook for better error messages
    console_error_panic_hook::set_once();

    web_sys::console::log_1(&"[WASM] Starting game initialization...".into());

    let app = match App::new(canvas_id) {
        Ok(app) => {
            web_sys::console::log_1(&"[WASM] Game created successfully!".into());
            Rc::new(RefCell::new(app))
        }
        Err(e) => {
            web_sys::console::error_1(&format!("[WASM] Failed to create game: {:?}", e).into());
            return Err(e);
        }
    };

    // Setup requestAnimationFrame loop
    let window = web_sys::window().ok_or("no window")?;

    // Create closure for animation frame
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();

    let app_clone = app.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        // Update game frame
        if let Err(e) = app_clone.borrow_mut().update_frame() {
            web_sys::console::error_1(&e);
            return; // Stop loop on error
        }

        // A stopped loop lets the closure chain end
        if !app_clone.borrow().is_running() {
            return;
        }

        // Schedule next frame
        let window = web_sys::window().unwrap();
        window
            .request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref())
            .unwrap();
    }) as Box<dyn FnMut()>));

    // Start the loop
    window
        .request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref())
        .unwrap();

    web_sys::console::log_1(&"[WASM] Game loop started!".into());

    Ok(())
}
