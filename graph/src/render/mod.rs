pub mod ascii;
pub mod text;

pub use ascii::{AsciiRenderer, RenderConfig, DEFAULT_NAME_WIDTH, MIN_NAME_WIDTH};
pub use text::{display_width, name_field, truncate_to_width};
