use tracing::warn;

use crate::java::components::{
    arguments, declaration, generic_list, modifier_prefix, type_list, Members,
};
use crate::model::{declared_names, Import, Node, Type};
use crate::renderer::{RenderContext, Transform};

/// A complete compilation unit.
///
/// The body is rendered first so that every type it references has been
/// loaded by the time the import block is written.
pub struct FileTransform;

impl Transform for FileTransform {
    fn transform(&self, ctx: &mut RenderContext<'_>, node: Node<'_>) -> Option<String> {
        let Node::File(file) = node else {
            return None;
        };
        let package = file.package();
        let owns_package = match &package {
            Some(package) if ctx.dependencies_mut().set_current_package(package) => true,
            Some(package) => {
                warn!(
                    file = %file.name,
                    %package,
                    current = ?ctx.dependencies().current_package(),
                    "current package already set"
                );
                false
            }
            None => false,
        };
        for name in declared_names(package.as_deref(), &file.classes) {
            ctx.dependencies_mut().reserve(&name);
        }

        let mut static_imports = Vec::new();
        for import in &file.imports {
            if import.is_static() {
                static_imports.push(import);
                continue;
            }
            let name = import.ty.name.as_str();
            let deps = ctx.dependencies();
            if deps.is_ignored(name) || deps.is_same_package(name) {
                continue;
            }
            if deps.conflicts(name) {
                warn!(file = %file.name, name, "import conflicts with a type already in scope");
                continue;
            }
            ctx.dependencies_mut().load(name);
        }

        let classes: Vec<_> = ctx.render_each(&file.classes).collect();

        let imports: Vec<_> = ctx
            .dependencies()
            .loaded()
            .map(|name| Import::of(Type::of(name)))
            .collect();
        let mut import_lines: Vec<_> = ctx.render_each(&imports).collect();
        import_lines.extend(ctx.render_each(static_imports));

        let javadoc = file.javadoc.as_ref().and_then(|javadoc| ctx.render(javadoc));

        if owns_package {
            if let Some(package) = &package {
                ctx.dependencies_mut().unset_current_package(package);
            }
        }

        let fmt = ctx.format();
        let output = fmt.separate([
            javadoc.unwrap_or_default(),
            package.map(|package| format!("package {};", package)).unwrap_or_default(),
            fmt.lines(&import_lines),
            fmt.separate(&classes),
        ]);
        if output.is_empty() {
            return Some(output);
        }
        Some(format!("{}{}", output, fmt.nl()))
    }
}

pub struct ClassTransform;

impl Transform for ClassTransform {
    fn transform(&self, ctx: &mut RenderContext<'_>, node: Node<'_>) -> Option<String> {
        let Node::Class(class) = node else {
            return None;
        };
        let mut signature = modifier_prefix(&ctx.stack(), &class.modifiers);
        signature.push_str("class ");
        signature.push_str(&class.name);
        signature.push_str(&generic_list(ctx, &class.generics));
        if let Some(supertype) = &class.supertype {
            signature.push_str(" extends ");
            signature.push_str(&ctx.render(supertype)?);
        }
        if !class.interfaces.is_empty() {
            signature.push_str(" implements ");
            signature.push_str(&type_list(ctx, &class.interfaces));
        }

        let body = Members {
            fields: &class.fields,
            initializers: &class.initializers,
            constructors: &class.constructors,
            methods: &class.methods,
            classes: &class.classes,
        }
        .render(ctx);
        signature.push(' ');
        signature.push_str(&ctx.format().block(&body));
        Some(declaration(ctx, node, signature))
    }
}

pub struct InterfaceTransform;

impl Transform for InterfaceTransform {
    fn transform(&self, ctx: &mut RenderContext<'_>, node: Node<'_>) -> Option<String> {
        let Node::Interface(interface) = node else {
            return None;
        };
        let mut signature = modifier_prefix(&ctx.stack(), &interface.modifiers);
        signature.push_str("interface ");
        signature.push_str(&interface.name);
        signature.push_str(&generic_list(ctx, &interface.generics));
        if !interface.interfaces.is_empty() {
            signature.push_str(" extends ");
            signature.push_str(&type_list(ctx, &interface.interfaces));
        }

        let body = Members {
            fields: &interface.fields,
            methods: &interface.methods,
            classes: &interface.classes,
            ..Members::default()
        }
        .render(ctx);
        signature.push(' ');
        signature.push_str(&ctx.format().block(&body));
        Some(declaration(ctx, node, signature))
    }
}

/// Constants come first, separated by commas; a `;` closes them whenever
/// other members follow.
pub struct EnumTransform;

impl Transform for EnumTransform {
    fn transform(&self, ctx: &mut RenderContext<'_>, node: Node<'_>) -> Option<String> {
        let Node::Enum(enum_) = node else {
            return None;
        };
        let mut signature = modifier_prefix(&ctx.stack(), &enum_.modifiers);
        signature.push_str("enum ");
        signature.push_str(&enum_.name);
        if !enum_.interfaces.is_empty() {
            signature.push_str(" implements ");
            signature.push_str(&type_list(ctx, &enum_.interfaces));
        }

        let constants: Vec<_> = ctx.render_each(&enum_.constants).collect();
        let members = Members {
            fields: &enum_.fields,
            initializers: &enum_.initializers,
            constructors: &enum_.constructors,
            methods: &enum_.methods,
            classes: &enum_.classes,
        }
        .render(ctx);

        let fmt = ctx.format();
        let mut constants = fmt.join(&constants, &format!(",{}", fmt.nl()));
        if !members.is_empty() {
            constants.push(';');
        }
        let body = fmt.separate([constants, members]);
        signature.push(' ');
        signature.push_str(&fmt.block(&body));
        Some(declaration(ctx, node, signature))
    }
}

/// `@interface` declarations; their fields render as elements.
pub struct AnnotationTransform;

impl Transform for AnnotationTransform {
    fn transform(&self, ctx: &mut RenderContext<'_>, node: Node<'_>) -> Option<String> {
        let Node::Annotation(annotation) = node else {
            return None;
        };
        let mut signature = modifier_prefix(&ctx.stack(), &annotation.modifiers);
        signature.push_str("@interface ");
        signature.push_str(&annotation.name);

        let elements: Vec<_> = ctx.render_each(&annotation.fields).collect();
        let fmt = ctx.format();
        let body = fmt.lines(&elements);
        signature.push(' ');
        signature.push_str(&fmt.block(&body));
        Some(declaration(ctx, node, signature))
    }
}

pub struct EnumConstantTransform;

impl Transform for EnumConstantTransform {
    fn transform(&self, ctx: &mut RenderContext<'_>, node: Node<'_>) -> Option<String> {
        let Node::EnumConstant(constant) = node else {
            return None;
        };
        let mut signature = constant.name.clone();
        if !constant.values.is_empty() {
            signature.push('(');
            signature.push_str(&arguments(ctx, &constant.values));
            signature.push(')');
        }
        if !constant.fields.is_empty() || !constant.methods.is_empty() {
            let body = Members {
                fields: &constant.fields,
                methods: &constant.methods,
                ..Members::default()
            }
            .render(ctx);
            signature.push(' ');
            signature.push_str(&ctx.format().block(&body));
        }
        Some(declaration(ctx, node, signature))
    }
}

pub struct InitializerTransform;

impl Transform for InitializerTransform {
    fn transform(&self, ctx: &mut RenderContext<'_>, node: Node<'_>) -> Option<String> {
        let Node::Initializer(initializer) = node else {
            return None;
        };
        let fmt = ctx.format();
        let block = fmt.block(&fmt.code(&initializer.code));
        if initializer.is_static {
            Some(format!("static {}", block))
        } else {
            Some(block)
        }
    }
}
