//! Markup binding: XML-style documents made of tags, attributes and text.

use crate::model::{Element, Node, NodeKind};
use crate::renderer::{DependencyManager, Generator, RenderContext, Transform, TransformFactory};

pub fn escape(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            c => output.push(c),
        }
    }
    output
}

pub struct DocumentTransform;

impl Transform for DocumentTransform {
    fn transform(&self, ctx: &mut RenderContext<'_>, node: Node<'_>) -> Option<String> {
        let Node::Document(document) = node else {
            return None;
        };
        let elements: Vec<_> = ctx.render_each(&document.elements).collect();
        let fmt = ctx.format();
        let output = fmt.lines(&elements);
        if output.is_empty() {
            return Some(output);
        }
        Some(format!("{}{}", output, fmt.nl()))
    }
}

pub struct DeclarationTransform;

impl Transform for DeclarationTransform {
    fn transform(&self, _ctx: &mut RenderContext<'_>, node: Node<'_>) -> Option<String> {
        let Node::Declaration(declaration) = node else {
            return None;
        };
        let mut output = format!("<?xml version=\"{}\"", escape(&declaration.version));
        if let Some(encoding) = &declaration.encoding {
            output.push_str(&format!(" encoding=\"{}\"", escape(encoding)));
        }
        if let Some(standalone) = declaration.standalone {
            let standalone = if standalone { "yes" } else { "no" };
            output.push_str(&format!(" standalone=\"{}\"", standalone));
        }
        output.push_str("?>");
        Some(output)
    }
}

/// Empty tags self-close and a lone text child stays on the tag's line;
/// anything else puts one child per indented line.
pub struct TagTransform;

impl Transform for TagTransform {
    fn transform(&self, ctx: &mut RenderContext<'_>, node: Node<'_>) -> Option<String> {
        let Node::Tag(tag) = node else {
            return None;
        };
        let mut open = format!("<{}", tag.name);
        for attribute in ctx.render_each(&tag.attributes) {
            open.push(' ');
            open.push_str(&attribute);
        }

        match tag.children.as_slice() {
            [] => Some(format!("{}/>", open)),
            [Element::Text(text)] => {
                let text = ctx.render(text).unwrap_or_default();
                Some(format!("{}>{}</{}>", open, text, tag.name))
            }
            children => {
                let children: Vec<_> = ctx.render_each(children).collect();
                let fmt = ctx.format();
                Some(fmt.lines([
                    format!("{}>", open),
                    fmt.indent(&fmt.lines(&children)),
                    format!("</{}>", tag.name),
                ]))
            }
        }
    }
}

pub struct AttributeTransform;

impl Transform for AttributeTransform {
    fn transform(&self, _ctx: &mut RenderContext<'_>, node: Node<'_>) -> Option<String> {
        let Node::Attribute(attribute) = node else {
            return None;
        };
        match &attribute.value {
            Some(value) => Some(format!("{}=\"{}\"", attribute.name, escape(value))),
            None => Some(attribute.name.clone()),
        }
    }
}

pub struct TextTransform;

impl Transform for TextTransform {
    fn transform(&self, _ctx: &mut RenderContext<'_>, node: Node<'_>) -> Option<String> {
        let Node::Text(text) = node else {
            return None;
        };
        Some(escape(&text.value))
    }
}

pub fn transform_factory() -> TransformFactory {
    let mut factory = TransformFactory::new("markup");
    factory
        .install(NodeKind::Document, DocumentTransform)
        .install(NodeKind::Declaration, DeclarationTransform)
        .install(NodeKind::Tag, TagTransform)
        .install(NodeKind::Attribute, AttributeTransform)
        .install(NodeKind::Text, TextTransform);
    factory
}

/// Markup has no imports, so the dependency manager stays empty.
pub fn generator() -> Generator {
    Generator::new(transform_factory(), DependencyManager::default())
}
