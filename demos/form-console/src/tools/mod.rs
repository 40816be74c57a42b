//! Example tools shipped with the console.

mod calc;
mod text;

use kfunc::tools::catalog::ToolCatalog;

pub use calc::CalcTool;
pub use text::TextTool;

/// Registers every example tool into `catalog`.
pub fn register_all(catalog: &ToolCatalog) {
    catalog.register(TextTool);
    catalog.register(CalcTool);
}
