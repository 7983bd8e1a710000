pub use display::{Display, DisplayError};
pub use text::{render as render_text, TextDisplay};

mod display;
mod text;
