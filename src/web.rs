use std::cell::RefCell;
use std::rc::Rc;

use log::{error, warn};
use rand::rngs::SmallRng;
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{
  CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, Window,
};

use crate::config::GameConfig;
use crate::error::SetupError;
use crate::game_logic::Phase;
use crate::input::KeyCommand;
use crate::render::Surface;
use crate::seed::food_rng;
use crate::session::{Session, Ticker};

type WebSession = Session<IntervalTicker, CanvasSurface, SmallRng>;

#[wasm_bindgen(start)]
pub fn main() {
  #[cfg(feature = "console_error_panic_hook")]
  console_error_panic_hook::set_once();
  // A host page may have installed a logger already.
  let _ = console_log::init_with_level(log::Level::Info);
}

/// The canvas the board is painted on, plus the optional HUD elements.
struct CanvasSurface {
  context: CanvasRenderingContext2d,
  score: Option<HtmlElement>,
  overlay: Option<HtmlElement>,
  hint: Option<HtmlElement>,
}

fn find_element(document:&Document, id:&str) -> Result<HtmlElement, SetupError> {
  document
    .get_element_by_id(id).ok_or_else(|| SetupError::MissingElement(id.to_string()))?
    .dyn_into::<HtmlElement>().map_err(|_| SetupError::MissingElement(id.to_string()))
}

impl CanvasSurface {
  fn bind(document:&Document, config:&GameConfig) -> Result<Self, SetupError> {
    let id = config.canvas_id.as_str();
    let canvas = document
      .get_element_by_id(id).ok_or_else(|| SetupError::MissingElement(id.to_string()))?
      .dyn_into::<HtmlCanvasElement>().map_err(|_| SetupError::NotACanvas(id.to_string()))?;
    canvas.set_width(config.arena_size);
    canvas.set_height(config.arena_size);
    let context = canvas
      .get_context("2d").map_err(|_| SetupError::ContextUnavailable)?
      .ok_or(SetupError::ContextUnavailable)?
      .dyn_into::<CanvasRenderingContext2d>().map_err(|_| SetupError::ContextUnavailable)?;
    let lookup = |id:&Option<String>| {
      id.as_deref().map(|id| find_element(document,id)).transpose()
    };
    Ok(CanvasSurface {
      context,
      score: lookup(&config.score_element_id)?,
      overlay: lookup(&config.overlay_element_id)?,
      hint: lookup(&config.hint_element_id)?,
    })
  }
}

#[allow(deprecated)]
impl Surface for CanvasSurface {
  fn clear(&mut self, colour:&str, extent:f64) {
    self.context.set_fill_style(&JsValue::from_str(colour));
    self.context.fill_rect(0f64,0f64,extent,extent);
  }

  fn fill_cell(&mut self, x:f64, y:f64, size:f64, colour:&str) {
    self.context.set_fill_style(&JsValue::from_str(colour));
    self.context.fill_rect(x,y,size,size);
  }

  fn stroke_cell(&mut self, x:f64, y:f64, size:f64, colour:&str) {
    self.context.set_stroke_style(&JsValue::from_str(colour));
    self.context.stroke_rect(x,y,size,size);
  }

  fn show_status(&mut self, score:u32, phase:Phase) {
    if let Some(el) = &self.score {
      el.set_inner_text(&format!("Score: {score}"));
    }
    if let Some(el) = &self.overlay {
      el.set_hidden(phase != Phase::GameOver);
    }
    if let Some(el) = &self.hint {
      el.set_hidden(phase != Phase::Idle);
    }
  }
}

/// `setInterval` wrapper. Holds at most one live interval.
struct IntervalTicker {
  window: Window,
  callback: Option<Closure<dyn FnMut()>>,
  handle: Option<i32>,
}

impl IntervalTicker {
  fn new(window:Window) -> Self {
    IntervalTicker {window,callback:None,handle:None}
  }

  /// The callback needs a handle to the session that owns this ticker, so
  /// it is attached after the session exists.
  fn bind(&mut self, callback:Closure<dyn FnMut()>) {
    self.stop();
    self.callback = Some(callback);
  }
}

impl Ticker for IntervalTicker {
  fn start(&mut self, interval_ms:u32) -> Result<(), SetupError> {
    self.stop();
    let callback = self.callback.as_ref()
      .ok_or_else(|| SetupError::Timer("no tick callback bound".to_string()))?;
    let interval = i32::try_from(interval_ms)
      .map_err(|_| SetupError::Timer(format!("interval of {interval_ms}ms is too long")))?;
    let handle = self.window
      .set_interval_with_callback_and_timeout_and_arguments_0(
        callback.as_ref().unchecked_ref(),
        interval,
      )
      .map_err(|err| SetupError::Timer(format!("{err:?}")))?;
    self.handle = Some(handle);
    Ok(())
  }

  fn stop(&mut self) {
    if let Some(handle) = self.handle.take() {
      self.window.clear_interval_with_handle(handle);
    }
  }

  fn is_running(&self) -> bool {
    self.handle.is_some()
  }
}

impl Drop for IntervalTicker {
  fn drop(&mut self) {
    self.stop();
  }
}

fn read_config(value:JsValue) -> Result<GameConfig, SetupError> {
  let config = if value.is_undefined() || value.is_null() {
    GameConfig::default()
  } else {
    serde_wasm_bindgen::from_value(value)
      .map_err(|err| SetupError::InvalidConfig(err.to_string()))?
  };
  config.validate().map_err(|err| {
    warn!("{err}");
    err
  })
}

/// A snake game bound to a canvas on the current page.
#[wasm_bindgen]
pub struct SnakeGame {
  inner: Rc<RefCell<WebSession>>,
  document: Document,
  on_keydown: Closure<dyn FnMut(KeyboardEvent)>,
}

#[wasm_bindgen]
impl SnakeGame {
  #[wasm_bindgen(constructor)]
  pub fn new(config:JsValue) -> Result<SnakeGame, JsValue> {
    let config = read_config(config)?;
    let window = web_sys::window().ok_or(SetupError::MissingWindow)?;
    let document = window.document().ok_or(SetupError::MissingDocument)?;
    let surface = CanvasSurface::bind(&document,&config)?;
    let rng = food_rng(config.seed);

    let session = Session::new(config,IntervalTicker::new(window),surface,rng)?;
    let inner = Rc::new(RefCell::new(session));

    let on_tick = {
      let weak = Rc::downgrade(&inner);
      Closure::wrap(Box::new(move || {
        let Some(session) = weak.upgrade() else {return};
        match session.try_borrow_mut() {
          Ok(mut session) => {session.on_tick();}
          Err(_) => warn!("tick skipped, session busy"),
        };
      }) as Box<dyn FnMut()>)
    };
    inner.borrow_mut().ticker_mut().bind(on_tick);

    let on_keydown = {
      let weak = Rc::downgrade(&inner);
      Closure::wrap(Box::new(move |event:KeyboardEvent| {
        let Some(session) = weak.upgrade() else {return};
        let Ok(mut session) = session.try_borrow_mut() else {return};
        match session.on_key(&event.key()) {
          Ok(KeyCommand::Ignored) => {}
          Ok(_) => event.prevent_default(),
          Err(err) => error!("{err}"),
        }
      }) as Box<dyn FnMut(KeyboardEvent)>)
    };
    document
      .add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref())?;

    Ok(SnakeGame {inner,document,on_keydown})
  }

  pub fn start(&self) -> Result<(), JsValue> {
    self.inner.borrow_mut().start()?;
    Ok(())
  }

  pub fn reset(&self) -> Result<(), JsValue> {
    self.inner.borrow_mut().reset()?;
    Ok(())
  }

  pub fn score(&self) -> u32 {
    self.inner.borrow().score()
  }

  #[wasm_bindgen(js_name = isGameOver)]
  pub fn is_game_over(&self) -> bool {
    self.inner.borrow().is_game_over()
  }

  pub fn phase(&self) -> String {
    self.inner.borrow().phase().as_str().to_string()
  }

  #[wasm_bindgen(js_name = tickIntervalMs)]
  pub fn tick_interval_ms(&self) -> u32 {
    self.inner.borrow().config().tick_interval_ms
  }
}

impl Drop for SnakeGame {
  fn drop(&mut self) {
    let _ = self.document
      .remove_event_listener_with_callback("keydown", self.on_keydown.as_ref().unchecked_ref());
  }
}
