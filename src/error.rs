//! Error type shared by every fallible operation in the crate.

use wasm_bindgen::JsValue;

/// Shader stage, used to tell apart compile failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Vertex,
    Fragment,
}

impl Stage {
    /// The matching GL shader type constant.
    pub fn gl_type(self) -> u32 {
        match self {
            Stage::Vertex => glow::VERTEX_SHADER,
            Stage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Vertex => f.write_str("vertex"),
            Stage::Fragment => f.write_str("fragment"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A DOM call failed; carries the debug form of the thrown value.
    #[error("dom error: {0}")]
    Dom(String),

    #[error("canvas did not provide a webgl context")]
    Context,

    #[error("{stage} shader failed to compile: {log}")]
    Compile { stage: Stage, log: String },

    #[error("shader program failed to link: {0}")]
    Link(String),

    /// A GL object could not be allocated.
    #[error("gl resource allocation failed: {0}")]
    Resource(String),

    #[error("malformed config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Wraps a value thrown by a `web_sys` call.
    pub fn dom(value: JsValue) -> Self {
        Error::Dom(format!("{value:?}"))
    }
}

impl From<Error> for JsValue {
    fn from(error: Error) -> Self {
        js_sys::Error::new(&error.to_string()).into()
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
