//! Rendering of interpretations.

use anyhow::Result;
use callsig_evm::Interpretation;
use serde::Serialize;

/// Pretty JSON with 4-space indentation.
pub fn to_json_pretty<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}

/// The root object alone, or with every ranked candidate when `all` is set.
pub fn render(out: &Interpretation, all: bool) -> Result<String> {
    if all {
        to_json_pretty(&serde_json::json!({
            "root": out.root,
            "candidates": out.ranked_summary(),
        }))
    } else {
        to_json_pretty(&out.root)
    }
}
