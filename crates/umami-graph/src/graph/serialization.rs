//! Export formats for external renderers.

use serde::Serialize;

use super::CooccurrenceGraph;
use crate::{Error, Ingredient, Result};

fn escape_label(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

#[derive(Serialize)]
struct EdgeJson<'a> {
    source: &'a Ingredient,
    target: &'a Ingredient,
    weight: u32,
}

#[derive(Serialize)]
struct GraphJson<'a> {
    nodes: Vec<&'a Ingredient>,
    edges: Vec<EdgeJson<'a>>,
}

impl CooccurrenceGraph {
    /// Undirected DOT with a `weight` attribute on every edge.
    pub fn to_dot(&self) -> String {
        let mut output = String::from("graph Cooccurrence {\n");

        for node in self.nodes() {
            output.push_str("    \"");
            output.push_str(&escape_label(node.as_str()));
            output.push_str("\";\n");
        }

        for (a, b, weight) in self.edges() {
            output.push_str("    \"");
            output.push_str(&escape_label(a.as_str()));
            output.push_str("\" -- \"");
            output.push_str(&escape_label(b.as_str()));
            output.push_str(&format!("\" [weight={weight}];\n"));
        }

        output.push_str("}\n");
        output
    }

    /// Pretty JSON document: `{"nodes": [...], "edges": [{source, target, weight}]}`.
    pub fn to_json(&self) -> Result<String> {
        let document = GraphJson {
            nodes: self.nodes(),
            edges: self
                .edges()
                .into_iter()
                .map(|(source, target, weight)| EdgeJson {
                    source,
                    target,
                    weight,
                })
                .collect(),
        };

        serde_json::to_string_pretty(&document)
            .map_err(|e| Error::Serialization(format!("failed to serialize graph: {e}")))
    }
}
