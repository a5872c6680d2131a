use crate::java::components::arguments;
use crate::model::{BoundKind, Node};
use crate::renderer::{RenderContext, Transform};

/// Type references, resolved against the file's imports as they are met.
///
/// A name whose short form already belongs to another type is written fully
/// qualified. Ignored and same-package names claim their short form and are
/// written short; any other name is loaded as a dependency and written short.
pub struct TypeTransform;

impl Transform for TypeTransform {
    fn transform(&self, ctx: &mut RenderContext<'_>, node: Node<'_>) -> Option<String> {
        let Node::Type(ty) = node else {
            return None;
        };
        let name = ty.name.as_str();
        let deps = ctx.dependencies();
        let mut output = if deps.conflicts(name) {
            name.to_string()
        } else if deps.is_ignored(name) || deps.is_same_package(name) {
            ctx.dependencies_mut().reserve(name);
            ty.short_name().to_string()
        } else {
            ctx.dependencies_mut().load(name);
            ty.short_name().to_string()
        };

        if !ty.generics.is_empty() {
            output.push('<');
            let arguments: Vec<_> = ctx.render_each(&ty.generics).collect();
            output.push_str(&arguments.join(", "));
            output.push('>');
        }
        output.push_str(&"[]".repeat(ty.dimensions));
        Some(output)
    }
}

pub struct GenericTransform;

impl Transform for GenericTransform {
    fn transform(&self, ctx: &mut RenderContext<'_>, node: Node<'_>) -> Option<String> {
        let Node::Generic(generic) = node else {
            return None;
        };
        let name = generic.name.as_deref().unwrap_or("?");
        if generic.bounds.is_empty() {
            return Some(name.to_string());
        }
        let keyword = match generic.kind {
            BoundKind::Extends => "extends",
            BoundKind::Super => "super",
        };
        let bounds: Vec<_> = ctx.render_each(&generic.bounds).collect();
        Some(format!("{} {} {}", name, keyword, bounds.join(" & ")))
    }
}

/// One import statement. Names that need no import render nothing.
pub struct ImportTransform;

impl Transform for ImportTransform {
    fn transform(&self, ctx: &mut RenderContext<'_>, node: Node<'_>) -> Option<String> {
        let Node::Import(import) = node else {
            return None;
        };
        let name = &import.ty.name;
        if let Some(member) = &import.member {
            return Some(format!("import static {}.{};", name, member));
        }
        let deps = ctx.dependencies();
        if deps.is_ignored(name) || deps.is_same_package(name) {
            return None;
        }
        Some(format!("import {};", name))
    }
}

pub struct AnnotationUsageTransform;

impl Transform for AnnotationUsageTransform {
    fn transform(&self, ctx: &mut RenderContext<'_>, node: Node<'_>) -> Option<String> {
        let Node::AnnotationUsage(usage) = node else {
            return None;
        };
        let ty = ctx.render(&usage.ty)?;
        if !usage.values.is_empty() {
            let mut pairs = Vec::with_capacity(usage.values.len());
            for named in &usage.values {
                let value = ctx.render(&named.value)?;
                pairs.push(format!("{} = {}", named.name, value));
            }
            return Some(format!("@{}({})", ty, pairs.join(", ")));
        }
        match &usage.value {
            Some(value) => Some(format!(
                "@{}({})",
                ty,
                arguments(ctx, std::slice::from_ref(value))
            )),
            None => Some(format!("@{}", ty)),
        }
    }
}
