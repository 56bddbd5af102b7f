//! SVG serialization of a [`MemoryStage`].

use std::fmt::Write;

use scrolly_core::element::ElementId;

use crate::memory_stage::MemoryStage;

impl MemoryStage {
    /// Renders every root element and its subtree as SVG markup.
    #[must_use]
    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        for root in &self.roots {
            self.write_element(&mut out, root, 0);
        }
        out
    }

    fn write_element(&self, out: &mut String, id: &ElementId, depth: usize) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let indent = "  ".repeat(depth);
        let _ = write!(out, "{indent}<{} id=\"{}\"", node.tag, escape(id.as_str()));
        for (name, value) in node.attributes.iter() {
            let _ = write!(out, " {name}=\"{}\"", escape(value));
        }

        if node.children.is_empty() && node.text.is_none() {
            out.push_str("/>\n");
            return;
        }

        out.push('>');
        if let Some(text) = &node.text {
            out.push_str(&escape(text));
        }
        if !node.children.is_empty() {
            out.push('\n');
            for child in &node.children {
                self.write_element(out, child, depth + 1);
            }
            out.push_str(&indent);
        }
        let _ = writeln!(out, "</{}>", node.tag);
    }
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
