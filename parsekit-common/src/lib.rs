//! Common pieces shared by parsekit-lexer and parsekit-parser.

pub mod diagnostic;
pub mod position;

pub use diagnostic::render_pointer;
pub use position::Position;
