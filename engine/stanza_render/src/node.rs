//! The render tree.
//!
//! Rendering is split in two: the evaluator lowers entities into a
//! [`RenderNode`] tree, and [`write_text`](RenderNode::write_text) serializes
//! that tree to HTML in one pass. Keeping the tree around between the two
//! steps is what lets text transforms attach lazily: a transform recorded on
//! an [`Escaped`](RenderNode::Escaped) leaf runs against the escaped text at
//! serialization time, after every enclosing wrapper has had its say.

use std::fmt;
use std::rc::Rc;

use crate::escape::escape_html;
use crate::transform::TextTransform;

/// A node of the lazy HTML output tree.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderNode {
    /// Markup emitted verbatim.
    Raw(Rc<str>),
    /// Text content, escaped at serialization time, with the accumulated
    /// transform to run on the escaped result.
    Escaped {
        text: Rc<str>,
        pending: TextTransform,
    },
    /// An element with children.
    Tag {
        tag: Rc<str>,
        attrs: Rc<str>,
        children: Vec<RenderNode>,
    },
    /// A childless element.
    ClosedTag {
        tag: Rc<str>,
        attrs: Rc<str>,
        self_closing: bool,
    },
    /// Adjacent siblings with no wrapper of their own.
    Sequence(Vec<RenderNode>),
}

impl RenderNode {
    pub fn raw(markup: impl Into<Rc<str>>) -> Self {
        RenderNode::Raw(markup.into())
    }

    pub fn escaped(text: impl Into<Rc<str>>) -> Self {
        RenderNode::Escaped {
            text: text.into(),
            pending: TextTransform::identity(),
        }
    }

    pub fn tag(
        tag: impl Into<Rc<str>>,
        attrs: impl Into<Rc<str>>,
        children: Vec<RenderNode>,
    ) -> Self {
        RenderNode::Tag {
            tag: tag.into(),
            attrs: attrs.into(),
            children,
        }
    }

    pub fn closed_tag(
        tag: impl Into<Rc<str>>,
        attrs: impl Into<Rc<str>>,
        self_closing: bool,
    ) -> Self {
        RenderNode::ClosedTag {
            tag: tag.into(),
            attrs: attrs.into(),
            self_closing,
        }
    }

    pub fn sequence(children: Vec<RenderNode>) -> Self {
        RenderNode::Sequence(children)
    }

    /// Attach a transform to every text leaf of this subtree.
    ///
    /// Transforms accumulate outside-in: a leaf already carrying a transform
    /// runs its own first, then `next`. Raw markup and tag structure are
    /// unaffected.
    #[must_use]
    pub fn transform(&self, next: &TextTransform) -> RenderNode {
        if next.is_identity() {
            return self.clone();
        }
        match self {
            RenderNode::Raw(_) | RenderNode::ClosedTag { .. } => self.clone(),
            RenderNode::Escaped { text, pending } => RenderNode::Escaped {
                text: Rc::clone(text),
                pending: pending.then(next),
            },
            RenderNode::Tag {
                tag,
                attrs,
                children,
            } => RenderNode::Tag {
                tag: Rc::clone(tag),
                attrs: Rc::clone(attrs),
                children: children.iter().map(|child| child.transform(next)).collect(),
            },
            RenderNode::Sequence(children) => RenderNode::Sequence(
                children.iter().map(|child| child.transform(next)).collect(),
            ),
        }
    }

    /// Serialize this subtree as HTML.
    pub fn write_text(&self, out: &mut impl fmt::Write) -> fmt::Result {
        match self {
            RenderNode::Raw(markup) => out.write_str(markup),
            RenderNode::Escaped { text, pending } => {
                if pending.is_identity() {
                    out.write_str(&escape_html(text))
                } else {
                    out.write_str(&pending.apply(escape_html(text).into_owned()))
                }
            }
            RenderNode::Tag {
                tag,
                attrs,
                children,
            } => {
                write_open_tag(out, tag, attrs)?;
                for child in children {
                    child.write_text(out)?;
                }
                write!(out, "</{tag}>")
            }
            RenderNode::ClosedTag {
                tag,
                attrs,
                self_closing,
            } => {
                if attrs.is_empty() {
                    write!(out, "<{tag}")?;
                } else {
                    write!(out, "<{tag} {attrs}")?;
                }
                if *self_closing {
                    out.write_str(" /")?;
                }
                out.write_str(">")
            }
            RenderNode::Sequence(children) => {
                for child in children {
                    child.write_text(out)?;
                }
                Ok(())
            }
        }
    }

    /// Serialize to an owned string.
    pub fn as_text(&self) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = self.write_text(&mut out);
        out
    }
}

fn write_open_tag(out: &mut impl fmt::Write, tag: &str, attrs: &str) -> fmt::Result {
    if attrs.is_empty() {
        write!(out, "<{tag}>")
    } else {
        write!(out, "<{tag} {attrs}>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn escaped_text_is_escaped_once() {
        let node = RenderNode::tag("b", "", vec![RenderNode::escaped("a < b")]);
        assert_eq!(node.as_text(), "<b>a &lt; b</b>");
    }

    #[test]
    fn attributes_are_separated_by_a_space() {
        let node = RenderNode::tag(
            "a",
            "href=\"https://example.org\"",
            vec![RenderNode::escaped("link")],
        );
        assert_eq!(
            node.as_text(),
            "<a href=\"https://example.org\">link</a>"
        );
    }

    #[test]
    fn closed_tags_render_both_styles() {
        assert_eq!(RenderNode::closed_tag("hr", "", true).as_text(), "<hr />");
        assert_eq!(RenderNode::closed_tag("br", "", false).as_text(), "<br>");
    }

    #[test]
    fn transform_runs_on_escaped_text_only() {
        let node = RenderNode::sequence(vec![
            RenderNode::escaped("a b"),
            RenderNode::raw("&mdash;"),
            RenderNode::tag("i", "", vec![RenderNode::escaped("c d")]),
        ]);
        let nbsp = TextTransform::new(|s| s.replace(' ', "&nbsp;"));

        assert_eq!(
            node.transform(&nbsp).as_text(),
            "a&nbsp;b&mdash;<i>c&nbsp;d</i>"
        );
        // The original tree is untouched.
        assert_eq!(node.as_text(), "a b&mdash;<i>c d</i>");
    }

    #[test]
    fn transforms_apply_after_escaping() {
        let node = RenderNode::escaped("x<y");
        let swap = TextTransform::new(|s| s.replace("&lt;", "&le;"));
        assert_eq!(node.transform(&swap).as_text(), "x&le;y");
    }

    #[test]
    fn stacked_transforms_run_inner_first() {
        let node = RenderNode::escaped("a b");
        let nbsp = TextTransform::new(|s| s.replace(' ', "&nbsp;"));
        let bang = TextTransform::new(|s| format!("{s}!"));
        assert_eq!(
            node.transform(&nbsp).transform(&bang).as_text(),
            "a&nbsp;b!"
        );
    }
}
