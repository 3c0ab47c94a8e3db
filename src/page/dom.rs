//! Minimal element tree and HTML encoder for server-side rendering.

use std::fmt::{self, Write};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// A node of the rendered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Escaped text content.
    Text(String),
    /// Markup written as-is (user supplied raw headers).
    Raw(String),
}

impl From<Element> for Node {
    fn from(e: Element) -> Self {
        Node::Element(e)
    }
}

/// An HTML element with ordered attributes.
///
/// An attribute with an empty value is written as a bare boolean attribute
/// (`defer`, `crossorigin`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Set an attribute, replacing a previous value for the same name.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
        self
    }

    /// Set a boolean attribute.
    pub fn flag(self, name: impl Into<String>) -> Self {
        self.attr(name, "")
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn children_ref(&self) -> &[Node] {
        &self.children
    }

    fn is_void(&self) -> bool {
        VOID_ELEMENTS.contains(&self.tag.as_str())
    }

    /// Write the element and its subtree, indented by `depth` levels.
    pub fn encode<W: Write>(&self, w: &mut W, depth: usize) -> fmt::Result {
        indent(w, depth)?;
        write!(w, "<{}", self.tag)?;
        for (name, value) in &self.attrs {
            if value.is_empty() {
                write!(w, " {}", name)?;
            } else {
                write!(w, " {}=\"", name)?;
                escape(w, value)?;
                w.write_char('"')?;
            }
        }
        w.write_char('>')?;

        if self.is_void() {
            return Ok(());
        }

        match self.children.as_slice() {
            [] => {}
            [Node::Text(text)] => escape(w, text)?,
            children => {
                for child in children {
                    w.write_char('\n')?;
                    match child {
                        Node::Element(e) => e.encode(w, depth + 1)?,
                        Node::Text(text) => {
                            indent(w, depth + 1)?;
                            escape(w, text)?;
                        }
                        Node::Raw(raw) => {
                            indent(w, depth + 1)?;
                            w.write_str(raw)?;
                        }
                    }
                }
                w.write_char('\n')?;
                indent(w, depth)?;
            }
        }
        write!(w, "</{}>", self.tag)
    }
}

/// Encode a full document, doctype included.
pub fn encode_document(root: &Element) -> Result<String, fmt::Error> {
    let mut out = String::with_capacity(4096);
    out.write_str("<!DOCTYPE html>\n")?;
    root.encode(&mut out, 0)?;
    Ok(out)
}

fn indent<W: Write>(w: &mut W, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        w.write_str("  ")?;
    }
    Ok(())
}

fn escape<W: Write>(w: &mut W, s: &str) -> fmt::Result {
    for c in s.chars() {
        match c {
            '&' => w.write_str("&amp;")?,
            '<' => w.write_str("&lt;")?,
            '>' => w.write_str("&gt;")?,
            '"' => w.write_str("&#34;")?,
            '\'' => w.write_str("&#39;")?,
            c => w.write_char(c)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_nested() {
        let doc = Element::new("html").attr("lang", "en").child(
            Element::new("head")
                .child(Element::new("meta").attr("charset", "UTF-8"))
                .child(Element::new("title").text("Hello")),
        );

        let html = encode_document(&doc).unwrap();
        assert_eq!(
            html,
            concat!(
                "<!DOCTYPE html>\n<html lang=\"en\">\n  <head>\n",
                "    <meta charset=\"UTF-8\">\n    <title>Hello</title>\n",
                "  </head>\n</html>"
            )
        );
    }

    #[test]
    fn test_escaping() {
        let el = Element::new("p")
            .attr("title", "a \"quoted\" <value>")
            .text("Tom & Jerry <3");
        let mut out = String::new();
        el.encode(&mut out, 0).unwrap();
        assert_eq!(
            out,
            "<p title=\"a &#34;quoted&#34; &lt;value&gt;\">Tom &amp; Jerry &lt;3</p>"
        );
    }

    #[test]
    fn test_boolean_and_raw() {
        let el = Element::new("head")
            .child(Element::new("script").flag("defer").attr("src", "/app.js"))
            .child(Node::Raw("<!-- raw & untouched -->".into()));
        let mut out = String::new();
        el.encode(&mut out, 0).unwrap();
        assert!(out.contains("<script defer src=\"/app.js\"></script>"));
        assert!(out.contains("<!-- raw & untouched -->"));
    }

    #[test]
    fn test_attr_replaces() {
        let el = Element::new("a").attr("href", "/a").attr("href", "/b");
        assert_eq!(el.get_attr("href"), Some("/b"));
    }
}
