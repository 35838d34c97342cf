use crate::entity::{Ball, Paddle};
use crate::game::Game;
use crate::renderer::{Input, Renderer, BACKGROUND_COLOR, UI_COLOR};
use js_sys::Array;
use std::cell::RefCell;
use std::f64::consts::PI;
use std::io;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

const SCORE_FONT: &str = "32px Arial";
const SCORE_BASELINE: f64 = 50.0;
const CENTER_LINE_WIDTH: f64 = 2.0;
const CENTER_LINE_DASH: f64 = 10.0;

pub struct WebRenderer {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,

    // Latest pointer position, written by the mousemove listener and
    // consumed by the frame loop
    pending_input: Rc<RefCell<Option<Input>>>,
}

impl WebRenderer {
    pub fn new(canvas_id: &str) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or("canvas not found")?
            .dyn_into::<HtmlCanvasElement>()?;

        let context = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let renderer = Self {
            canvas,
            context,
            pending_input: Rc::new(RefCell::new(None)),
        };
        renderer.setup_mouse_listener()?;

        Ok(renderer)
    }

    /// Playfield size, taken from the canvas element's pixel dimensions.
    pub fn surface_size(&self) -> (f32, f32) {
        (self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn setup_mouse_listener(&self) -> Result<(), JsValue> {
        let pending_input = self.pending_input.clone();
        let canvas = self.canvas.clone();

        let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
            // Pointer position relative to the canvas top edge, in canvas
            // coordinates
            let rect = canvas.get_bounding_client_rect();
            let y = event.client_y() as f64 - rect.top();
            *pending_input.borrow_mut() = Some(Input::PointerMove(y as f32));
        }) as Box<dyn FnMut(MouseEvent)>);

        self.canvas
            .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;

        closure.forget(); // Keep listener alive
        Ok(())
    }

    fn draw_background(&self, game: &Game) {
        self.context.set_fill_style_str(BACKGROUND_COLOR);
        self.context
            .fill_rect(0.0, 0.0, game.width as f64, game.height as f64);
    }

    fn draw_center_line(&self, game: &Game) {
        let x = game.width as f64 / 2.0;
        self.context.begin_path();
        self.context
            .set_line_dash(&Array::of2(
                &JsValue::from_f64(CENTER_LINE_DASH),
                &JsValue::from_f64(CENTER_LINE_DASH),
            ))
            .unwrap();
        self.context.move_to(x, 0.0);
        self.context.line_to(x, game.height as f64);
        self.context.set_stroke_style_str(UI_COLOR);
        self.context.set_line_width(CENTER_LINE_WIDTH);
        self.context.stroke();
        // Back to solid strokes for anyone drawing after us
        self.context.set_line_dash(&Array::new()).unwrap();
    }

    fn draw_paddle(&self, paddle: &Paddle) {
        self.context.set_fill_style_str(paddle.color);
        self.context.fill_rect(
            paddle.x as f64,
            paddle.y as f64,
            paddle.width as f64,
            paddle.height as f64,
        );
    }

    fn draw_ball(&self, ball: &Ball) {
        self.context.set_fill_style_str(ball.color);
        self.context.begin_path();
        self.context
            .arc(ball.x as f64, ball.y as f64, ball.radius as f64, 0.0, PI * 2.0)
            .unwrap();
        self.context.close_path();
        self.context.fill();
    }

    fn draw_scores(&self, game: &Game) {
        let width = game.width as f64;
        self.context.set_fill_style_str(UI_COLOR);
        self.context.set_font(SCORE_FONT);
        self.context.set_text_align("center");
        self.context
            .fill_text(&game.left_score.to_string(), width / 4.0, SCORE_BASELINE)
            .unwrap();
        self.context
            .fill_text(
                &game.right_score.to_string(),
                width * 3.0 / 4.0,
                SCORE_BASELINE,
            )
            .unwrap();
    }
}

impl Renderer for WebRenderer {
    fn init(&mut self) -> io::Result<()> {
        // Input listeners are wired in the constructor, where DOM failures
        // can surface as JsValue
        Ok(())
    }

    fn render(&mut self, game: &Game) -> io::Result<()> {
        self.draw_background(game);
        self.draw_center_line(game);
        self.draw_paddle(&game.left_paddle);
        self.draw_paddle(&game.right_paddle);
        self.draw_ball(&game.ball);
        self.draw_scores(game);
        Ok(())
    }

    fn cleanup(&mut self) -> io::Result<()> {
        // No cleanup needed for web
        Ok(())
    }

    fn poll_input(&mut self) -> io::Result<Option<Input>> {
        Ok(self.pending_input.borrow_mut().take())
    }
}
