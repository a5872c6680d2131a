use crate::java::components::{declaration, generic_list, modifier_prefix, type_list};
use crate::model::{Field, Modifier, Node, NodeKind, Type};
use crate::renderer::{RenderContext, RenderStack, Transform};

fn throws_clause(ctx: &mut RenderContext<'_>, exceptions: &[Type]) -> String {
    if exceptions.is_empty() {
        return String::new();
    }
    format!(" throws {}", type_list(ctx, exceptions))
}

fn parameters(ctx: &mut RenderContext<'_>, fields: &[Field]) -> String {
    ctx.render_each(fields).collect::<Vec<_>>().join(", ")
}

pub struct MethodTransform;

impl Transform for MethodTransform {
    fn transform(&self, ctx: &mut RenderContext<'_>, node: Node<'_>) -> Option<String> {
        let Node::Method(method) = node else {
            return None;
        };
        let stack = ctx.stack();
        let in_interface = stack.parent().map(|p| p.kind()) == Some(NodeKind::Interface);
        let has_body = if in_interface {
            [Modifier::Default, Modifier::Static, Modifier::Private]
                .iter()
                .any(|m| method.modifiers.contains(m))
        } else {
            !method.modifiers.contains(&Modifier::Abstract)
                && !method.modifiers.contains(&Modifier::Native)
        };

        let mut signature = modifier_prefix(&stack, &method.modifiers);
        let generics = generic_list(ctx, &method.generics);
        if !generics.is_empty() {
            signature.push_str(&generics);
            signature.push(' ');
        }
        signature.push_str(&ctx.render(&method.ty)?);
        signature.push(' ');
        signature.push_str(&method.name);
        signature.push('(');
        signature.push_str(&parameters(ctx, &method.fields));
        signature.push(')');
        signature.push_str(&throws_clause(ctx, &method.exceptions));

        if has_body {
            let fmt = ctx.format();
            let body = fmt.block(&fmt.code(&method.code));
            signature.push(' ');
            signature.push_str(&body);
        } else {
            signature.push(';');
        }
        Some(declaration(ctx, node, signature))
    }
}

/// Constructors borrow their name from the enclosing declaration and render
/// nothing outside one.
pub struct ConstructorTransform;

impl Transform for ConstructorTransform {
    fn transform(&self, ctx: &mut RenderContext<'_>, node: Node<'_>) -> Option<String> {
        let Node::Constructor(constructor) = node else {
            return None;
        };
        let stack = ctx.stack();
        let name = stack.enclosing_declaration()?.name()?;

        let mut signature = modifier_prefix(&stack, &constructor.modifiers);
        signature.push_str(name);
        signature.push('(');
        signature.push_str(&parameters(ctx, &constructor.fields));
        signature.push(')');
        signature.push_str(&throws_clause(ctx, &constructor.exceptions));

        let fmt = ctx.format();
        let body = fmt.block(&fmt.code(&constructor.code));
        signature.push(' ');
        signature.push_str(&body);
        Some(declaration(ctx, node, signature))
    }
}

/// Member variable, parameter or annotation element depending on the parent.
pub struct FieldTransform;

impl Transform for FieldTransform {
    fn transform(&self, ctx: &mut RenderContext<'_>, node: Node<'_>) -> Option<String> {
        let Node::Field(field) = node else {
            return None;
        };
        let stack = ctx.stack();
        let mut ty = ctx.render(&field.ty)?;
        let prefix = modifier_prefix(&stack, &field.modifiers);

        match stack.parent().map(|p| p.kind()) {
            Some(NodeKind::Method | NodeKind::Constructor) => {
                if is_varargs(&stack, node) {
                    if let Some(element) = ty.strip_suffix("[]") {
                        ty = format!("{}...", element);
                    }
                }
                let mut parts: Vec<_> = ctx.render_each(&field.annotations).collect();
                parts.push(format!("{}{} {}", prefix, ty, field.name));
                Some(parts.join(" "))
            }
            Some(NodeKind::Annotation) => {
                let default = match &field.value {
                    Some(value) => format!(" default {}", ctx.render(value)?),
                    None => String::new(),
                };
                let signature = format!("{}{} {}(){};", prefix, ty, field.name, default);
                Some(declaration(ctx, node, signature))
            }
            _ => {
                let initializer = match &field.value {
                    Some(value) => format!(" = {}", ctx.render(value)?),
                    None => String::new(),
                };
                let signature = format!("{}{} {}{};", prefix, ty, field.name, initializer);
                Some(declaration(ctx, node, signature))
            }
        }
    }
}

// Last parameter of a method or constructor that opted into `...`.
fn is_varargs(stack: &RenderStack<'_>, node: Node<'_>) -> bool {
    let Node::Field(field) = node else {
        return false;
    };
    let (fields, enabled) = match stack.parent() {
        Some(Node::Method(method)) => (&method.fields, method.use_triple_dot),
        Some(Node::Constructor(constructor)) => (&constructor.fields, constructor.use_triple_dot),
        _ => return false,
    };
    enabled
        && field.ty.dimensions > 0
        && fields.last().is_some_and(|last| node.same(&Node::from(last)))
}
