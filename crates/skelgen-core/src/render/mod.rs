pub mod context;
pub mod filters;
pub mod renderer;
pub mod report;

pub use context::{build_context, globals};
pub use renderer::Renderer;
pub use report::{render_brief, render_errors};
