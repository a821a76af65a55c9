mod parse;
mod render;

pub use parse::{ParseError, parse_document};
pub use render::{FRONT_MATTER_DELIMITER, render_contents, render_document};
