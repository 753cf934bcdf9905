//! Markup descriptor: one renderable asset reference.
//!
//! # Example
//!
//! ```
//! use assetpress::tag::{Descriptor, TagKind};
//!
//! let css = Descriptor::builder(TagKind::Stylesheet, ["css/reset.css", "css/site.css"])
//!     .minimize()
//!     .attr("media", "screen")
//!     .build();
//!
//! assert_eq!(css.primary(), "css/reset.css");
//! ```

use super::{ProtoTag, TagKind};

/// Immutable description of one asset reference.
///
/// With several sources, everything is merged into a single output stored
/// under the first source's path; the others are never published on their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    kind: TagKind,
    sources: Vec<String>,
    remote: bool,
    relative: bool,
    minimize: bool,
    with_timestamp: bool,
    attributes: Vec<(String, Option<String>)>,
}

impl Descriptor {
    pub fn builder<I, S>(kind: TagKind, sources: I) -> DescriptorBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        DescriptorBuilder {
            inner: Self {
                kind,
                sources: sources.into_iter().map(Into::into).collect(),
                remote: false,
                relative: false,
                minimize: false,
                with_timestamp: false,
                attributes: Vec::new(),
            },
        }
    }

    /// Shorthand for a stylesheet builder.
    pub fn stylesheet<I, S>(sources: I) -> DescriptorBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::builder(TagKind::Stylesheet, sources)
    }

    /// Shorthand for a script builder.
    pub fn script<I, S>(sources: I) -> DescriptorBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::builder(TagKind::Script, sources)
    }

    pub const fn kind(&self) -> TagKind {
        self.kind
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// The source whose path names the published output.
    pub fn primary(&self) -> &str {
        self.sources.first().map(String::as_str).unwrap_or_default()
    }

    pub const fn is_remote(&self) -> bool {
        self.remote
    }

    pub const fn is_relative(&self) -> bool {
        self.relative
    }

    pub const fn is_minimize(&self) -> bool {
        self.minimize
    }

    pub const fn is_with_timestamp(&self) -> bool {
        self.with_timestamp
    }

    pub fn attributes(&self) -> &[(String, Option<String>)] {
        &self.attributes
    }

    /// Tag shape for this descriptor: the kind's base shape plus extra attributes.
    pub fn proto(&self) -> ProtoTag {
        self.attributes
            .iter()
            .fold(self.kind.proto(), |tag, (name, value)| {
                tag.attr(name.as_str(), value.as_deref())
            })
    }

    /// Render this descriptor pointing at `url`.
    pub fn render(&self, url: &str) -> String {
        self.proto().render(url)
    }
}

/// Builder for [`Descriptor`]. Flags default to off.
#[derive(Debug, Clone)]
#[must_use]
pub struct DescriptorBuilder {
    inner: Descriptor,
}

impl DescriptorBuilder {
    /// Source is an absolute URL: no local processing, rendered as-is.
    pub fn remote(mut self) -> Self {
        self.inner.remote = true;
        self
    }

    /// Render the URL without the `//host` prefix.
    pub fn relative(mut self) -> Self {
        self.inner.relative = true;
        self
    }

    /// Apply the optimizer instead of plain merging.
    pub fn minimize(mut self) -> Self {
        self.inner.minimize = true;
        self
    }

    /// Append `?ts=<unixtime>` to the rendered URL.
    pub fn with_timestamp(mut self) -> Self {
        self.inner.with_timestamp = true;
        self
    }

    /// Add an attribute with a value: `name="value"`.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.inner.attributes.push((name.into(), Some(value.into())));
        self
    }

    /// Add a bare attribute: `name`.
    pub fn flag(mut self, name: impl Into<String>) -> Self {
        self.inner.attributes.push((name.into(), None));
        self
    }

    pub fn build(self) -> Descriptor {
        self.inner
    }
}

impl From<DescriptorBuilder> for Descriptor {
    fn from(builder: DescriptorBuilder) -> Self {
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let d = Descriptor::stylesheet(["a.css"]).build();
        assert_eq!(d.kind(), TagKind::Stylesheet);
        assert!(!d.is_remote());
        assert!(!d.is_relative());
        assert!(!d.is_minimize());
        assert!(!d.is_with_timestamp());
        assert!(d.attributes().is_empty());
    }

    #[test]
    fn test_primary_is_first_source() {
        let d = Descriptor::script(["a.js", "b.js"]).build();
        assert_eq!(d.primary(), "a.js");
        assert_eq!(d.sources().len(), 2);
    }

    #[test]
    fn test_primary_of_empty_descriptor() {
        let d = Descriptor::script(Vec::<String>::new()).build();
        assert_eq!(d.primary(), "");
    }

    #[test]
    fn test_render_with_attributes() {
        let d = Descriptor::stylesheet(["a.css"]).attr("media", "print").build();
        assert_eq!(
            d.render("//localhost/x/a.css"),
            r#"<link href="//localhost/x/a.css" rel="stylesheet" media="print">"#
        );

        let d = Descriptor::script(["https://cdn/app.js"])
            .remote()
            .flag("async")
            .build();
        assert_eq!(
            d.render("https://cdn/app.js"),
            r#"<script src="https://cdn/app.js" async></script>"#
        );
    }
}
