//! A minimal owned SVG element tree.
//!
//! The dial keeps handles to the elements it mutates (the slice and the label)
//! and serializes the whole tree with [`Display`](fmt::Display).
use std::fmt::{self, Write as _};

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Format a number the way it should appear in an attribute value.
///
/// Uses the shortest representation that round-trips, and never writes `-0`.
pub fn fmt_num(n: f64) -> String {
    if n == 0.0 {
        "0".to_string()
    } else {
        format!("{}", n)
    }
}

/// A single SVG element with ordered attributes, children and optional text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    name: &'static str,
    attributes: Vec<(&'static str, String)>,
    children: Vec<Element>,
    text: Option<String>,
}

impl Element {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    /// Set an attribute and return the element.
    #[must_use = "method moves the value of self and returns the modified value"]
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Append a child and return the element.
    #[must_use = "method moves the value of self and returns the modified value"]
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Set the text content and return the element.
    #[must_use = "method moves the value of self and returns the modified value"]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    /// Replace an attribute in place, keeping its position, or append it.
    pub fn set_attr(&mut self, name: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn text_content(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Depth-first search for the first element with the given `id`.
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        if self.get_attr("id") == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_id(id))
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.name)?;
        for (name, value) in &self.attributes {
            write!(f, " {}=\"{}\"", name, escape_xml(value))?;
        }
        if self.children.is_empty() && self.text.is_none() {
            return f.write_str("/>");
        }
        f.write_char('>')?;
        if let Some(text) = &self.text {
            f.write_str(&escape_xml(text))?;
        }
        for child in &self.children {
            write!(f, "{}", child)?;
        }
        write!(f, "</{}>", self.name)
    }
}

fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(175.0), "175");
        assert_eq!(fmt_num(87.5), "87.5");
        assert_eq!(fmt_num(-0.0), "0");
        assert_eq!(fmt_num(-12.25), "-12.25");
    }

    #[test]
    fn test_empty_element_self_closes() {
        let e = Element::new("path").attr("d", "M 0 0");
        assert_eq!(e.to_string(), "<path d=\"M 0 0\"/>");
    }

    #[test]
    fn test_nested_elements_and_text() {
        let e = Element::new("svg")
            .attr("width", "10px")
            .child(Element::new("text").text("42%"));
        assert_eq!(e.to_string(), "<svg width=\"10px\"><text>42%</text></svg>");
    }

    #[test]
    fn test_set_attr_replaces_in_place() {
        let mut e = Element::new("path").attr("fill", "none").attr("d", "a");
        e.set_attr("fill", "red");
        assert_eq!(e.get_attr("fill"), Some("red"));
        assert_eq!(e.to_string(), "<path fill=\"red\" d=\"a\"/>");
    }

    #[test]
    fn test_escaping() {
        let e = Element::new("text").attr("font-family", "\"A&B\"").text("<1>");
        assert_eq!(
            e.to_string(),
            "<text font-family=\"&quot;A&amp;B&quot;\">&lt;1&gt;</text>"
        );
    }

    #[test]
    fn test_find_by_id() {
        let e = Element::new("svg").child(
            Element::new("defs").child(Element::new("linearGradient").attr("id", "g")),
        );
        assert_eq!(e.find_by_id("g").map(Element::name), Some("linearGradient"));
        assert!(e.find_by_id("missing").is_none());
    }
}
