//! Tag renderer.
//!
//! A [`ProtoTag`] is the shape of an element minus its URL: element name,
//! the attribute carrying the URL, whether a closing tag follows, and the
//! extra attributes in insertion order.
//!
//! ```text
//! <name src_attr="url" extra1="v1" extra2>[</name>]
//! ```

/// Element shape used to render one asset reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtoTag {
    name: String,
    src_attr: String,
    closing: bool,
    attributes: Vec<(String, Option<String>)>,
}

impl ProtoTag {
    pub fn new(name: impl Into<String>, src_attr: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            src_attr: src_attr.into(),
            closing: false,
            attributes: Vec::new(),
        }
    }

    /// Emit a matching `</name>` after the opening tag.
    pub fn closing(mut self) -> Self {
        self.closing = true;
        self
    }

    /// Append an attribute. `None` renders the bare name (`async`).
    ///
    /// Setting an existing attribute replaces its value in place.
    pub fn attr(mut self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        let name = name.into();
        let value = value.map(Into::into);
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
        self
    }

    pub fn attributes(&self) -> &[(String, Option<String>)] {
        &self.attributes
    }

    /// Render the element around `src`.
    pub fn render(&self, src: &str) -> String {
        let mut out = format!("<{} {}=\"{}\"", self.name, self.src_attr, src);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            if let Some(value) = value {
                out.push_str("=\"");
                out.push_str(value);
                out.push('"');
            }
        }
        out.push('>');
        if self.closing {
            out.push_str("</");
            out.push_str(&self.name);
            out.push('>');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_plain() {
        let tag = ProtoTag::new("img", "src");
        assert_eq!(tag.render("/a.png"), r#"<img src="/a.png">"#);
    }

    #[test]
    fn test_render_attributes_in_order() {
        let tag = ProtoTag::new("link", "href")
            .attr("rel", Some("stylesheet"))
            .attr("media", Some("print"))
            .attr("crossorigin", None::<String>);
        assert_eq!(
            tag.render("//cdn/a.css"),
            r#"<link href="//cdn/a.css" rel="stylesheet" media="print" crossorigin>"#
        );
    }

    #[test]
    fn test_render_empty_value_is_not_bare() {
        let tag = ProtoTag::new("script", "src").attr("data-x", Some(""));
        assert_eq!(tag.render("a.js"), r#"<script src="a.js" data-x="">"#);
    }

    #[test]
    fn test_render_closing() {
        let tag = ProtoTag::new("script", "src")
            .closing()
            .attr("async", None::<String>);
        assert_eq!(tag.render("a.js"), r#"<script src="a.js" async></script>"#);
    }

    #[test]
    fn test_attr_overrides_existing() {
        let tag = ProtoTag::new("link", "href")
            .attr("rel", Some("stylesheet"))
            .attr("rel", Some("preload"));
        assert_eq!(tag.attributes().len(), 1);
        assert_eq!(tag.render("a"), r#"<link href="a" rel="preload">"#);
    }
}
