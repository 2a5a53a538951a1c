//! Human-readable function signature parsing.
//!
//! Signatures come from a database (`transfer(address,uint256)`) or from a
//! user (`transfer(address to, uint256 amount)`, `f((uint256 a, address b) s)`).
//! alloy's parser rejects names on tuple members, so the parameter list is
//! walked here first: names are collected into a [`Shape`] and the name-free
//! canonical signature is handed to alloy for type resolution and the
//! selector.

use alloy_dyn_abi::Specifier;
use alloy_core::dyn_abi::DynSolType;
use alloy_json_abi::Function;
use callsig_core::{error::AbiError, Selector};

/// Naming layout of a parameter, mirroring its `DynSolType`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// Scalar or a value whose layout carries no names
    Leaf,
    /// Array (fixed or dynamic) of the inner shape
    Array(Box<Shape>),
    /// Tuple members with their declared names ("" when unnamed)
    Tuple(Vec<(String, Shape)>),
}

/// One parameter after the name-collecting pass.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ParamSpec {
    /// Canonical type text, names stripped, e.g. `(uint256,address)[]`
    ty: String,
    name: String,
    shape: Shape,
}

/// Data-location and event keywords that may sit between type and name.
const MODIFIERS: &[&str] = &["memory", "calldata", "storage", "indexed", "payable"];

/// Split `s` at commas outside any parentheses.
fn split_top_level(s: &str) -> Result<Vec<&str>, String> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.checked_sub(1).ok_or("unbalanced ')'")?,
            ',' if depth == 0 => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err("unbalanced '('".into());
    }
    parts.push(&s[start..]);
    Ok(parts)
}

/// Byte index of the `)` closing the `(` at `open`.
fn matching_paren(s: &str, open: usize) -> Result<usize, String> {
    let mut depth = 0usize;
    for (i, c) in s[open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(open + i);
                }
            }
            _ => {}
        }
    }
    Err("unbalanced '('".into())
}

/// Parse a comma-separated parameter list; empty text is zero parameters.
fn parse_params(list: &str) -> Result<Vec<ParamSpec>, String> {
    if list.trim().is_empty() {
        return Ok(Vec::new());
    }
    split_top_level(list)?.into_iter().map(parse_param).collect()
}

fn parse_param(text: &str) -> Result<ParamSpec, String> {
    let s = text.trim();
    if s.is_empty() {
        return Err("empty parameter".into());
    }

    let tuple_body = s.strip_prefix("tuple").unwrap_or(s);
    let (mut ty, mut shape, rest) = if tuple_body.starts_with('(') {
        let offset = s.len() - tuple_body.len();
        let close = matching_paren(s, offset)?;
        let members = parse_params(&s[offset + 1..close])?;
        let ty = format!(
            "({})",
            members.iter().map(|m| m.ty.as_str()).collect::<Vec<_>>().join(",")
        );
        let shape = Shape::Tuple(members.into_iter().map(|m| (m.name, m.shape)).collect());
        (ty, shape, &s[close + 1..])
    } else {
        let end = s
            .find(|c: char| c.is_whitespace() || c == '[')
            .unwrap_or(s.len());
        (s[..end].to_string(), Shape::Leaf, &s[end..])
    };

    let mut rest = rest.trim_start();
    while let Some(after) = rest.strip_prefix('[') {
        let close = after.find(']').ok_or("unclosed '['")?;
        ty.push('[');
        ty.push_str(after[..close].trim());
        ty.push(']');
        shape = Shape::Array(Box::new(shape));
        rest = after[close + 1..].trim_start();
    }

    let words: Vec<&str> = rest
        .split_whitespace()
        .filter(|w| !MODIFIERS.contains(w))
        .collect();
    let name = match words.as_slice() {
        [] => String::new(),
        [name] => (*name).to_string(),
        _ => return Err(format!("unexpected '{rest}' after type '{ty}'")),
    };
    Ok(ParamSpec { ty, name, shape })
}

/// A parsed signature with resolved parameter types.
#[derive(Debug, Clone)]
pub struct ParsedSignature {
    pub name: String,
    /// Name-free form the selector is computed from
    pub canonical: String,
    pub selector: Selector,
    pub types: Vec<DynSolType>,
    pub shapes: Vec<Shape>,
}

impl ParsedSignature {
    /// Parse a function signature, with or without parameter names and the
    /// leading `function` keyword.
    pub fn parse(signature: &str) -> Result<Self, AbiError> {
        let invalid = |reason: String| AbiError::InvalidSignature {
            signature: signature.to_string(),
            reason,
        };

        let text = signature.trim();
        let text = text.strip_prefix("function ").unwrap_or(text).trim_start();
        let open = text
            .find('(')
            .ok_or_else(|| invalid("missing '('".into()))?;
        let close = matching_paren(text, open).map_err(invalid)?;
        if !text[close + 1..].trim().is_empty() {
            return Err(invalid(format!("trailing text '{}'", text[close + 1..].trim())));
        }
        let name = text[..open].trim();
        if name.is_empty() {
            return Err(invalid("missing function name".into()));
        }

        let params = parse_params(&text[open + 1..close]).map_err(invalid)?;
        let canonical = format!(
            "{name}({})",
            params.iter().map(|p| p.ty.as_str()).collect::<Vec<_>>().join(",")
        );

        let func = Function::parse(&canonical).map_err(|e| invalid(e.to_string()))?;
        let types = func
            .inputs
            .iter()
            .map(|p| p.resolve())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            name: func.name.clone(),
            selector: Selector(func.selector().0),
            canonical,
            types,
            shapes: params.into_iter().map(|p| p.shape).collect(),
        })
    }

    /// The parameter list as one tuple type.
    pub fn params_type(&self) -> DynSolType {
        DynSolType::Tuple(self.types.clone())
    }
}
