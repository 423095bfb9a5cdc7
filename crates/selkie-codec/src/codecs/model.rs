//! Whole-model codec.
//!
//! Encoding flattens the ownership tree: every cell becomes one element
//! under `<root>`, in pre-order, with tree and terminal relationships
//! carried as id attributes. Decoding is two-pass: pass 1 instantiates one
//! object per element into an id-indexed set without touching references
//! (forward references are common — an edge may be listed before its target
//! vertex); pass 2 replaces the target model's root and performs every
//! structural insertion through the model's own mutating API inside one
//! transaction, so the usual invariants and notification batching apply.

use selkie_model::{Cell, GraphDataModel};

use super::unexpected;
use crate::element::Element;
use crate::error::{CodecError, Result};
use crate::registry::{DecodeContext, EncodeContext, ObjectCodec};
use crate::value::CodecValue;

pub struct GraphDataModelCodec;

impl GraphDataModelCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GraphDataModelCodec {
    fn default() -> Self {
        Self::new()
    }
}

struct PendingCell {
    cell: Box<Cell>,
    parent: Option<String>,
    source: Option<String>,
    target: Option<String>,
}

impl ObjectCodec for GraphDataModelCodec {
    fn tag(&self) -> &str {
        "GraphDataModel"
    }

    fn encode(&self, value: &CodecValue, ctx: &EncodeContext<'_>) -> Result<Element> {
        let Some(model) = ctx.model else {
            return Err(unexpected(value, "GraphDataModel (no model in context)"));
        };
        let mut root_el = Element::new("root");
        for id in model.descendants(model.root()) {
            if let Some(cell) = model.cell(&id) {
                let cell_el = ctx.encode_value(&CodecValue::Cell(Box::new(cell.clone())))?;
                root_el.children.push(cell_el);
            }
        }
        let mut el = Element::new("GraphDataModel");
        el.children.push(root_el);
        Ok(el)
    }

    fn decode(&self, element: &Element, ctx: &mut DecodeContext<'_>) -> Result<CodecValue> {
        let Some(model) = ctx.model.take() else {
            return Err(CodecError::UnexpectedElement {
                element: element.tag.clone(),
                context: "a context without a target model".to_string(),
            });
        };
        let root_el = element
            .child_by_tag("root")
            .ok_or_else(|| CodecError::MissingChild {
                element: element.tag.clone(),
                child: "root".to_string(),
            })?;

        // Pass 1: instantiate cells, capturing reference attributes raw.
        let mut pending: Vec<PendingCell> = Vec::new();
        for child in &root_el.children {
            let parent = child.attr("parent").map(str::to_string);
            let source = child.attr("source").map(str::to_string);
            let target = child.attr("target").map(str::to_string);
            match ctx.decode_element(child)? {
                CodecValue::Cell(cell) => pending.push(PendingCell {
                    cell,
                    parent,
                    source,
                    target,
                }),
                other => {
                    tracing::debug!(tag = %child.tag, ?other, "non-cell element under <root> skipped");
                }
            }
        }

        // Pass 2: wire everything through the model API in one transaction.
        let root_pos = pending
            .iter()
            .position(|p| p.parent.is_none())
            .ok_or_else(|| CodecError::MissingChild {
                element: "root".to_string(),
                child: "Cell".to_string(),
            })?;
        let new_root = pending.remove(root_pos).cell;

        model.begin_update();
        let result = wire_cells(model, *new_root, pending);
        model.end_update();
        result?;
        Ok(CodecValue::Null)
    }
}

fn wire_cells(model: &mut GraphDataModel, root: Cell, pending: Vec<PendingCell>) -> Result<()> {
    model.set_root(root);

    // Insert cells whose parent is already present, repeating until the
    // remainder stops shrinking; a parent may legally appear later in the
    // document than its child.
    let mut remaining = pending;
    let mut wired: Vec<(String, Option<String>, Option<String>)> = Vec::new();
    loop {
        let mut next = Vec::new();
        let before = remaining.len();
        for p in remaining {
            match &p.parent {
                Some(parent_id) if model.contains(parent_id) => {
                    let parent_id = parent_id.clone();
                    let id = model.add(&parent_id, *p.cell, None)?;
                    wired.push((id, p.source, p.target));
                }
                _ => next.push(p),
            }
        }
        if next.is_empty() {
            break;
        }
        if next.len() == before {
            for p in &next {
                tracing::debug!(
                    id = p.cell.id().unwrap_or("<none>"),
                    parent = p.parent.as_deref().unwrap_or("<none>"),
                    "cell with unresolvable parent dropped during decode"
                );
            }
            break;
        }
        remaining = next;
    }

    for (id, source, target) in wired {
        if let Some(s) = source {
            if model.contains(&s) {
                model.set_terminal(&id, Some(&s), true)?;
            } else {
                tracing::debug!(edge = %id, terminal = %s, "unresolvable source reference left unset");
            }
        }
        if let Some(t) = target {
            if model.contains(&t) {
                model.set_terminal(&id, Some(&t), false)?;
            } else {
                tracing::debug!(edge = %id, terminal = %t, "unresolvable target reference left unset");
            }
        }
    }
    Ok(())
}
