//! Reference binding that renders the model as Java source.

pub mod components;
pub mod declarations;
pub mod docs;
pub mod members;
pub mod types;
pub mod values;

use crate::model::{Family, NodeKind};
use crate::renderer::{DependencyManager, Generator, IgnorePattern, TransformFactory};

use declarations::*;
use docs::*;
use members::*;
use types::*;
use values::*;

const PRIMITIVES: [&str; 9] = [
    "byte", "short", "int", "long", "float", "double", "boolean", "char", "void",
];

/// Names that never need an import: primitives, `java.lang` and anything
/// without a package.
pub fn ignore_patterns() -> Vec<IgnorePattern> {
    PRIMITIVES
        .iter()
        .map(|name| IgnorePattern::exact(*name))
        .chain([IgnorePattern::members("java.lang"), IgnorePattern::Unqualified])
        .collect()
}

pub fn transform_factory() -> TransformFactory {
    let mut factory = TransformFactory::new("java");
    factory
        .install(NodeKind::File, FileTransform)
        .install(NodeKind::Class, ClassTransform)
        .install(NodeKind::Interface, InterfaceTransform)
        .install(NodeKind::Enum, EnumTransform)
        .install(NodeKind::Annotation, AnnotationTransform)
        .install(NodeKind::EnumConstant, EnumConstantTransform)
        .install(NodeKind::Method, MethodTransform)
        .install(NodeKind::Constructor, ConstructorTransform)
        .install(NodeKind::Field, FieldTransform)
        .install(NodeKind::Initializer, InitializerTransform)
        .install(NodeKind::Type, TypeTransform)
        .install(NodeKind::Generic, GenericTransform)
        .install(NodeKind::Import, ImportTransform)
        .install(NodeKind::AnnotationUsage, AnnotationUsageTransform)
        .install(NodeKind::Javadoc, JavadocTransform)
        .install(NodeKind::JavadocTag, JavadocTagTransform)
        .install(Family::Value, ValueTransform);
    factory
}

pub fn dependency_manager() -> DependencyManager {
    DependencyManager::new(ignore_patterns())
}

/// A session ready to render one Java file.
pub fn generator() -> Generator {
    Generator::new(transform_factory(), dependency_manager())
}
