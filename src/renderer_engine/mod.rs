pub mod r#trait;
pub use r#trait::RendererEngine;

pub mod ascii_renderer;
pub use self::ascii_renderer::AsciiRenderer;

pub mod null_renderer;
pub use self::null_renderer::NullRenderer;
