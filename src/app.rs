//! Wiring between the page and the scene.
//!
//! [`start`] builds the surface, the renderer and the scene, hooks the document's mouse
//! movement to the scene, and drives rendering from `requestAnimationFrame`. The scene is
//! shared by the two callbacks through an `Rc<RefCell<_>>`; both run on the page's single
//! event loop, and neither keeps a borrow across a callback boundary.

use std::{cell::RefCell, rc::Rc};

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue, closure::Closure, prelude::wasm_bindgen};
use web_sys::{Element, MouseEvent, Window};

use crate::{
    abs::App,
    config::Config,
    error::{Error, Result},
    input::MouseState,
    logging,
    render::{DEFAULT_FRAGMENT_SHADER, DEFAULT_VERTEX_SHADER, TriangleRenderer},
    scene::Scene,
};

type FrameCallback = Closure<dyn FnMut(f64)>;

/// Adds a canvas to `parent` and starts rendering the scene.
///
/// `vert` and `frag` provide the shader sources; they are each called once.
pub fn start(
    parent: &Element,
    vert: impl FnOnce() -> String,
    frag: impl FnOnce() -> String,
    config: Config,
) -> Result<()> {
    config.validate()?;
    let window = web_sys::window().ok_or_else(|| Error::Dom("no global window".into()))?;

    let app = App::new(parent, config.width, config.height)?;
    let renderer = TriangleRenderer::new(&app.gl, &vert(), &frag(), config.projection())
        .inspect_err(|e| log::error!("{e}"))?;
    let scene = Rc::new(RefCell::new(Scene::new(&config)));

    attach_mouse_listener(&app, Rc::clone(&scene));
    run_frame_loop(window, renderer, scene)?;

    log::info!("scene started");
    Ok(())
}

/// Steers the scene from every mouse move on the document. Replaces any previous handler.
fn attach_mouse_listener(app: &App, scene: Rc<RefCell<Scene>>) {
    let mut mouse = MouseState::new(app.width, app.height);
    let on_move = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
        let position = Vec2::new(event.client_x() as f32, event.client_y() as f32);
        let rotation = mouse.move_to(position);
        scene.borrow_mut().steer(rotation);
    });
    app.document
        .set_onmousemove(Some(on_move.as_ref().unchecked_ref()));
    // Lives as long as the page.
    on_move.forget();
}

fn request_animation_frame(window: &Window, callback: &FrameCallback) -> Result<i32> {
    window
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .map_err(Error::dom)
}

/// Advances and renders the scene once per animation frame, each frame requesting the next.
fn run_frame_loop(
    window: Window,
    renderer: TriangleRenderer,
    scene: Rc<RefCell<Scene>>,
) -> Result<()> {
    let callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
    let next = Rc::clone(&callback);
    let loop_window = window.clone();

    *callback.borrow_mut() = Some(Closure::new(move |_timestamp: f64| {
        scene.borrow_mut().advance();
        renderer.render(&scene.borrow());

        if let Some(next) = next.borrow().as_ref()
            && let Err(e) = request_animation_frame(&loop_window, next)
        {
            log::error!("stopping frame loop: {e}");
        }
    }));

    let first = callback.borrow();
    if let Some(first) = first.as_ref() {
        request_animation_frame(&window, first)?;
    }
    Ok(())
}

fn install_hooks(config: &Config) {
    console_error_panic_hook::set_once();
    logging::init(config.log_level);
}

fn source_from(provider: &js_sys::Function, stage: &str) -> Result<String> {
    provider
        .call0(&JsValue::NULL)
        .map_err(Error::dom)?
        .as_string()
        .ok_or_else(|| Error::Dom(format!("{stage} shader provider did not return a string")))
}

fn start_with_providers(
    parent: &Element,
    vert: &js_sys::Function,
    frag: &js_sys::Function,
    config: Config,
) -> Result<()> {
    let vert = source_from(vert, "vertex")?;
    let frag = source_from(frag, "fragment")?;
    start(parent, || vert, || frag, config)
}

/// Adds a canvas to `parent` and renders the scene with shaders from `vert` and `frag`,
/// zero-argument functions returning GLSL source.
#[wasm_bindgen]
pub fn add(
    parent: &Element,
    vert: &js_sys::Function,
    frag: &js_sys::Function,
) -> Result<(), JsValue> {
    let config = Config::default();
    install_hooks(&config);
    Ok(start_with_providers(parent, vert, frag, config)?)
}

/// Like [`add`], overriding settings from a JSON object.
#[wasm_bindgen(js_name = addWithConfig)]
pub fn add_with_config(
    parent: &Element,
    vert: &js_sys::Function,
    frag: &js_sys::Function,
    config: &str,
) -> Result<(), JsValue> {
    let config = Config::from_json(config)?;
    install_hooks(&config);
    Ok(start_with_providers(parent, vert, frag, config)?)
}

/// Like [`add`], using the bundled shaders.
#[wasm_bindgen(js_name = addDefault)]
pub fn add_default(parent: &Element) -> Result<(), JsValue> {
    let config = Config::default();
    install_hooks(&config);
    Ok(start(
        parent,
        || DEFAULT_VERTEX_SHADER.to_string(),
        || DEFAULT_FRAGMENT_SHADER.to_string(),
        config,
    )?)
}
