//! Report JSON renderer. Struct declaration order is the wire order, so the
//! output is deterministic without any map juggling.

use crate::{ReportError, ReportModel};

/// Pretty-printed JSON for stdout consumption.
pub fn render_json(model: &ReportModel) -> Result<String, ReportError> {
    serde_json::to_string_pretty(model).map_err(|_| ReportError::Render("json_serialize"))
}
