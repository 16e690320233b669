//! Canvas and WebGL context management.
//!
//! This module defines the [`App`] struct which creates the canvas element and holds the
//! WebGL context necessary for rendering into a page.

use std::rc::Rc;

use glow::HasContext;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlCanvasElement, WebGlRenderingContext};

use crate::error::{Error, Result};

/// Id of the wrapper element the canvas is placed in.
pub const WRAPPER_ID: &str = "glcanvas";
/// Id of the canvas element itself.
pub const CANVAS_ID: &str = "mycanvas";

/// The [`App`] struct encapsulates the document and the WebGL context of the canvas placed in it.
pub struct App {
    pub document: Document,
    pub gl: Rc<glow::Context>,
    pub width: u32,
    pub height: u32,
}

impl App {
    /// Creates a canvas of the given size inside a new wrapper appended to `parent`, and
    /// sets up a depth-tested WebGL context on it.
    pub fn new(parent: &Element, width: u32, height: u32) -> Result<Self> {
        let document = parent
            .owner_document()
            .ok_or_else(|| Error::Dom("parent element is not attached to a document".into()))?;

        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(Error::dom)?
            .dyn_into()
            .map_err(|element: Element| Error::Dom(format!("{} is not a canvas", element.tag_name())))?;
        canvas.set_width(width);
        canvas.set_height(height);
        canvas.set_id(CANVAS_ID);

        let wrapper = document.create_element("div").map_err(Error::dom)?;
        wrapper.set_id(WRAPPER_ID);
        parent.append_child(&wrapper).map_err(Error::dom)?;
        wrapper.append_child(&canvas).map_err(Error::dom)?;

        let context: WebGlRenderingContext = canvas
            .get_context("webgl")
            .map_err(Error::dom)?
            .ok_or(Error::Context)?
            .dyn_into()
            .map_err(|_| Error::Context)?;

        let (viewport_width, viewport_height) = viewport_size(width, height)?;
        let gl = Rc::new(glow::Context::from_webgl1_context(context));
        unsafe {
            gl.viewport(0, 0, viewport_width, viewport_height);
            gl.enable(glow::DEPTH_TEST);
        }

        log::info!("created {width}x{height} webgl canvas #{CANVAS_ID}");

        Ok(Self {
            document,
            gl,
            width,
            height,
        })
    }
}

/// Converts the canvas size to the signed sizes GL expects.
fn viewport_size(width: u32, height: u32) -> Result<(i32, i32)> {
    let convert = |side: u32| {
        i32::try_from(side)
            .map_err(|_| Error::InvalidConfig(format!("canvas side {side} overflows a gl size")))
    };
    Ok((convert(width)?, convert(height)?))
}
