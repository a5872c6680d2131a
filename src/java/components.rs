use crate::model::{
    ClassOrInterface, Constructor, Family, Field, Generic, Initializer, Method, Modifier,
    Modifiers, Node, NodeKind, Type, Value,
};
use crate::renderer::{RenderContext, RenderStack};

/// Modifiers the directly enclosing declaration already implies for the node
/// on top of `stack`, and which are therefore left out.
pub fn implicit_modifiers(stack: &RenderStack<'_>) -> &'static [Modifier] {
    let (Some(node), Some(parent)) = (stack.top(), stack.parent()) else {
        return &[];
    };
    let nested = node.is_class_or_interface();
    match (parent.kind(), node.kind()) {
        (NodeKind::Interface, NodeKind::Method) => &[Modifier::Public, Modifier::Abstract],
        (NodeKind::Interface, NodeKind::Field) => {
            &[Modifier::Public, Modifier::Static, Modifier::Final]
        }
        (NodeKind::Interface, _) if nested => &[Modifier::Public, Modifier::Static],
        (NodeKind::Annotation, NodeKind::Field | NodeKind::Method) => {
            &[Modifier::Public, Modifier::Abstract]
        }
        (NodeKind::Enum, NodeKind::Constructor) => &[Modifier::Private],
        (parent, NodeKind::Interface | NodeKind::Enum | NodeKind::Annotation)
            if parent.family() == Some(Family::ClassOrInterface) =>
        {
            &[Modifier::Static]
        }
        _ => &[],
    }
}

/// Written modifiers followed by a space, or nothing.
pub fn modifier_prefix(stack: &RenderStack<'_>, modifiers: &Modifiers) -> String {
    let implicit = implicit_modifiers(stack);
    modifiers
        .iter()
        .filter(|modifier| !implicit.contains(modifier))
        .map(|modifier| format!("{} ", modifier.keyword()))
        .collect()
}

/// Javadoc and annotation lines that precede a declaration.
pub fn preamble(ctx: &mut RenderContext<'_>, node: Node<'_>) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(javadoc) = node.javadoc() {
        lines.extend(ctx.render(javadoc));
    }
    if let Some(annotations) = node.annotations() {
        lines.extend(ctx.render_each(annotations));
    }
    lines
}

/// `signature` below its preamble.
pub fn declaration(ctx: &mut RenderContext<'_>, node: Node<'_>, signature: String) -> String {
    let mut lines = preamble(ctx, node);
    lines.push(signature);
    ctx.format().lines(&lines)
}

/// `<A, B extends C>`, or nothing.
pub fn generic_list(ctx: &mut RenderContext<'_>, generics: &[Generic]) -> String {
    let rendered: Vec<_> = ctx.render_each(generics).collect();
    if rendered.is_empty() {
        return String::new();
    }
    format!("<{}>", rendered.join(", "))
}

pub fn type_list(ctx: &mut RenderContext<'_>, types: &[Type]) -> String {
    ctx.render_each(types).collect::<Vec<_>>().join(", ")
}

pub fn arguments(ctx: &mut RenderContext<'_>, values: &[Value]) -> String {
    ctx.render_each(values).collect::<Vec<_>>().join(", ")
}

/// Member groups of a type body, written in this order with a blank line
/// between non-empty groups.
#[derive(Debug, Default, Clone, Copy)]
pub struct Members<'a> {
    pub fields: &'a [Field],
    pub initializers: &'a [Initializer],
    pub constructors: &'a [Constructor],
    pub methods: &'a [Method],
    pub classes: &'a [ClassOrInterface],
}

impl<'a> Members<'a> {
    pub fn render(self, ctx: &mut RenderContext<'_>) -> String {
        let fields: Vec<_> = ctx.render_each(self.fields).collect();
        let initializers: Vec<_> = ctx.render_each(self.initializers).collect();
        let constructors: Vec<_> = ctx.render_each(self.constructors).collect();
        let methods: Vec<_> = ctx.render_each(self.methods).collect();
        let classes: Vec<_> = ctx.render_each(self.classes).collect();

        let fmt = ctx.format();
        fmt.separate([
            fmt.lines(&fields),
            fmt.separate(&initializers),
            fmt.separate(&constructors),
            fmt.separate(&methods),
            fmt.separate(&classes),
        ])
    }
}
