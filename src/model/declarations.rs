use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::model::types::check_identifier;
use crate::model::*;

// Builder methods shared by every declaration that carries documentation,
// annotations and modifiers.
macro_rules! declaration_builders {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $ty {
                pub fn javadoc(mut self, javadoc: Javadoc) -> Self {
                    self.javadoc = Some(javadoc);
                    self
                }

                pub fn annotate(mut self, annotation: AnnotationUsage) -> Self {
                    self.annotations.push(annotation);
                    self
                }

                pub fn modifier(mut self, modifier: Modifier) -> Self {
                    self.modifiers.insert(modifier);
                    self
                }

                pub fn modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
                    self.modifiers.extend(modifiers);
                    self
                }

                pub fn public(self) -> Self {
                    self.modifier(Modifier::Public)
                }

                pub fn protected(self) -> Self {
                    self.modifier(Modifier::Protected)
                }

                pub fn private(self) -> Self {
                    self.modifier(Modifier::Private)
                }
            }
        )*
    };
}

declaration_builders!(Class, Interface, Enum, AnnotationDecl, Method, Constructor, Field);

/// One output file. The package is derived from the directory part of the
/// name: `com/acme/Widget.java` lives in `com.acme`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub javadoc: Option<Javadoc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<Import>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<ClassOrInterface>,
}

impl File {
    pub fn of(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            javadoc: None,
            imports: Vec::new(),
            classes: Vec::new(),
        }
    }

    pub fn try_of(name: impl Into<String>) -> Result<Self, ModelError> {
        let file = Self::of(name);
        file.check_name()?;
        Ok(file)
    }

    pub fn javadoc(mut self, javadoc: Javadoc) -> Self {
        self.javadoc = Some(javadoc);
        self
    }

    pub fn import(mut self, import: Import) -> Self {
        self.imports.push(import);
        self
    }

    pub fn add(mut self, class: impl Into<ClassOrInterface>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn package(&self) -> Option<String> {
        let (directory, _) = self.name.rsplit_once('/')?;
        Some(directory.replace('/', "."))
    }

    /// Checks every name in the tree before rendering.
    pub fn validate(&self) -> Result<(), ModelError> {
        self.check_name()?;
        for import in &self.imports {
            import.ty.validate()?;
            if let Some(member) = &import.member {
                check_identifier(NodeKind::Import, member)?;
            }
        }
        self.classes.iter().try_for_each(ClassOrInterface::validate)
    }

    fn check_name(&self) -> Result<(), ModelError> {
        if self.name.trim().is_empty() {
            return Err(ModelError::MissingName {
                kind: NodeKind::File,
            });
        }
        Ok(())
    }
}

/// Any type declaration that can appear at file level or nested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassOrInterface {
    Class(Class),
    Interface(Interface),
    Enum(Enum),
    Annotation(AnnotationDecl),
}

impl ClassOrInterface {
    pub fn name(&self) -> &str {
        match self {
            ClassOrInterface::Class(class) => &class.name,
            ClassOrInterface::Interface(interface) => &interface.name,
            ClassOrInterface::Enum(enum_) => &enum_.name,
            ClassOrInterface::Annotation(annotation) => &annotation.name,
        }
    }

    /// Declarations nested directly inside this one.
    pub fn classes(&self) -> &[ClassOrInterface] {
        match self {
            ClassOrInterface::Class(class) => &class.classes,
            ClassOrInterface::Interface(interface) => &interface.classes,
            ClassOrInterface::Enum(enum_) => &enum_.classes,
            ClassOrInterface::Annotation(_) => &[],
        }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        match self {
            ClassOrInterface::Class(class) => class.validate(),
            ClassOrInterface::Interface(interface) => interface.validate(),
            ClassOrInterface::Enum(enum_) => enum_.validate(),
            ClassOrInterface::Annotation(annotation) => annotation.validate(),
        }
    }
}

impl From<Class> for ClassOrInterface {
    fn from(class: Class) -> Self {
        ClassOrInterface::Class(class)
    }
}

impl From<Interface> for ClassOrInterface {
    fn from(interface: Interface) -> Self {
        ClassOrInterface::Interface(interface)
    }
}

impl From<Enum> for ClassOrInterface {
    fn from(enum_: Enum) -> Self {
        ClassOrInterface::Enum(enum_)
    }
}

impl From<AnnotationDecl> for ClassOrInterface {
    fn from(annotation: AnnotationDecl) -> Self {
        ClassOrInterface::Annotation(annotation)
    }
}

fn validate_members(
    annotations: &[AnnotationUsage],
    fields: &[Field],
    methods: &[Method],
    classes: &[ClassOrInterface],
) -> Result<(), ModelError> {
    annotations.iter().try_for_each(|a| a.ty.validate())?;
    fields.iter().try_for_each(Field::validate)?;
    methods.iter().try_for_each(Method::validate)?;
    classes.iter().try_for_each(ClassOrInterface::validate)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Class {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub javadoc: Option<Javadoc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<AnnotationUsage>,
    #[serde(default, skip_serializing_if = "Modifiers::is_empty")]
    pub modifiers: Modifiers,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub generics: Vec<Generic>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supertype: Option<Type>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<Type>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub initializers: Vec<Initializer>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constructors: Vec<Constructor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<Method>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<ClassOrInterface>,
}

impl Class {
    pub fn of(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            javadoc: None,
            annotations: Vec::new(),
            modifiers: Modifiers::new(),
            generics: Vec::new(),
            supertype: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            initializers: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
            classes: Vec::new(),
        }
    }

    pub fn try_of(name: impl Into<String>) -> Result<Self, ModelError> {
        let class = Self::of(name);
        check_identifier(NodeKind::Class, &class.name)?;
        Ok(class)
    }

    pub fn generic(mut self, generic: Generic) -> Self {
        self.generics.push(generic);
        self
    }

    pub fn extends(mut self, supertype: Type) -> Self {
        self.supertype = Some(supertype);
        self
    }

    pub fn implements(mut self, interface: Type) -> Self {
        self.interfaces.push(interface);
        self
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn initializer(mut self, initializer: Initializer) -> Self {
        self.initializers.push(initializer);
        self
    }

    pub fn constructor(mut self, constructor: Constructor) -> Self {
        self.constructors.push(constructor);
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    pub fn nested(mut self, class: impl Into<ClassOrInterface>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        check_identifier(NodeKind::Class, &self.name)?;
        if let Some(supertype) = &self.supertype {
            supertype.validate()?;
        }
        self.interfaces.iter().try_for_each(Type::validate)?;
        self.constructors.iter().try_for_each(Constructor::validate)?;
        validate_members(&self.annotations, &self.fields, &self.methods, &self.classes)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interface {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub javadoc: Option<Javadoc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<AnnotationUsage>,
    #[serde(default, skip_serializing_if = "Modifiers::is_empty")]
    pub modifiers: Modifiers,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub generics: Vec<Generic>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<Type>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<Method>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<ClassOrInterface>,
}

impl Interface {
    pub fn of(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            javadoc: None,
            annotations: Vec::new(),
            modifiers: Modifiers::new(),
            generics: Vec::new(),
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            classes: Vec::new(),
        }
    }

    pub fn generic(mut self, generic: Generic) -> Self {
        self.generics.push(generic);
        self
    }

    pub fn extends(mut self, interface: Type) -> Self {
        self.interfaces.push(interface);
        self
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    pub fn nested(mut self, class: impl Into<ClassOrInterface>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        check_identifier(NodeKind::Interface, &self.name)?;
        self.interfaces.iter().try_for_each(Type::validate)?;
        validate_members(&self.annotations, &self.fields, &self.methods, &self.classes)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enum {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub javadoc: Option<Javadoc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<AnnotationUsage>,
    #[serde(default, skip_serializing_if = "Modifiers::is_empty")]
    pub modifiers: Modifiers,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<Type>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constants: Vec<EnumConstant>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub initializers: Vec<Initializer>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constructors: Vec<Constructor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<Method>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<ClassOrInterface>,
}

impl Enum {
    pub fn of(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            javadoc: None,
            annotations: Vec::new(),
            modifiers: Modifiers::new(),
            interfaces: Vec::new(),
            constants: Vec::new(),
            fields: Vec::new(),
            initializers: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
            classes: Vec::new(),
        }
    }

    pub fn implements(mut self, interface: Type) -> Self {
        self.interfaces.push(interface);
        self
    }

    pub fn constant(mut self, constant: EnumConstant) -> Self {
        self.constants.push(constant);
        self
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn constructor(mut self, constructor: Constructor) -> Self {
        self.constructors.push(constructor);
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        check_identifier(NodeKind::Enum, &self.name)?;
        self.interfaces.iter().try_for_each(Type::validate)?;
        self.constants.iter().try_for_each(EnumConstant::validate)?;
        self.constructors.iter().try_for_each(Constructor::validate)?;
        validate_members(&self.annotations, &self.fields, &self.methods, &self.classes)
    }
}

/// `@interface` declaration. Its fields are the annotation elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationDecl {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub javadoc: Option<Javadoc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<AnnotationUsage>,
    #[serde(default, skip_serializing_if = "Modifiers::is_empty")]
    pub modifiers: Modifiers,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
}

impl AnnotationDecl {
    pub fn of(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            javadoc: None,
            annotations: Vec::new(),
            modifiers: Modifiers::new(),
            fields: Vec::new(),
        }
    }

    pub fn element(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        check_identifier(NodeKind::Annotation, &self.name)?;
        validate_members(&self.annotations, &self.fields, &[], &[])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumConstant {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub javadoc: Option<Javadoc>,
    /// Constructor arguments.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<Method>,
}

impl EnumConstant {
    pub fn of(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            javadoc: None,
            values: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn javadoc(mut self, javadoc: Javadoc) -> Self {
        self.javadoc = Some(javadoc);
        self
    }

    pub fn value(mut self, value: Value) -> Self {
        self.values.push(value);
        self
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        check_identifier(NodeKind::EnumConstant, &self.name)?;
        self.values.iter().try_for_each(Value::validate)?;
        validate_members(&[], &self.fields, &self.methods, &[])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub javadoc: Option<Javadoc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<AnnotationUsage>,
    #[serde(default, skip_serializing_if = "Modifiers::is_empty")]
    pub modifiers: Modifiers,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub generics: Vec<Generic>,
    #[serde(rename = "type")]
    pub ty: Type,
    /// Parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exceptions: Vec<Type>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub code: Vec<String>,
    /// Render a trailing array parameter as `T... name`.
    #[serde(default)]
    pub use_triple_dot: bool,
}

impl Method {
    pub fn of(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            javadoc: None,
            annotations: Vec::new(),
            modifiers: Modifiers::new(),
            generics: Vec::new(),
            ty,
            fields: Vec::new(),
            exceptions: Vec::new(),
            code: Vec::new(),
            use_triple_dot: false,
        }
    }

    pub fn try_of(name: impl Into<String>, ty: Type) -> Result<Self, ModelError> {
        let method = Self::of(name, ty);
        check_identifier(NodeKind::Method, &method.name)?;
        method.ty.validate()?;
        Ok(method)
    }

    pub fn generic(mut self, generic: Generic) -> Self {
        self.generics.push(generic);
        self
    }

    pub fn param(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn throws(mut self, exception: Type) -> Self {
        self.exceptions.push(exception);
        self
    }

    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.code.push(line.into());
        self
    }

    pub fn use_triple_dot(mut self) -> Self {
        self.use_triple_dot = true;
        self
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        check_identifier(NodeKind::Method, &self.name)?;
        self.ty.validate()?;
        self.exceptions.iter().try_for_each(Type::validate)?;
        validate_members(&self.annotations, &self.fields, &[], &[])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Constructor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub javadoc: Option<Javadoc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<AnnotationUsage>,
    #[serde(default, skip_serializing_if = "Modifiers::is_empty")]
    pub modifiers: Modifiers,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exceptions: Vec<Type>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub code: Vec<String>,
    #[serde(default)]
    pub use_triple_dot: bool,
}

impl Constructor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn throws(mut self, exception: Type) -> Self {
        self.exceptions.push(exception);
        self
    }

    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.code.push(line.into());
        self
    }

    pub fn use_triple_dot(mut self) -> Self {
        self.use_triple_dot = true;
        self
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        self.exceptions.iter().try_for_each(Type::validate)?;
        validate_members(&self.annotations, &self.fields, &[], &[])
    }
}

/// Member variable, method parameter or annotation element, depending on
/// where it appears.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Type,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub javadoc: Option<Javadoc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<AnnotationUsage>,
    #[serde(default, skip_serializing_if = "Modifiers::is_empty")]
    pub modifiers: Modifiers,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl Field {
    pub fn of(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            javadoc: None,
            annotations: Vec::new(),
            modifiers: Modifiers::new(),
            value: None,
        }
    }

    pub fn try_of(name: impl Into<String>, ty: Type) -> Result<Self, ModelError> {
        let field = Self::of(name, ty);
        field.validate()?;
        Ok(field)
    }

    pub fn set(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        check_identifier(NodeKind::Field, &self.name)?;
        self.ty.validate()?;
        self.annotations.iter().try_for_each(|a| a.ty.validate())?;
        if let Some(value) = &self.value {
            value.validate()?;
        }
        Ok(())
    }
}

/// `static { ... }` or an instance initializer `{ ... }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Initializer {
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub code: Vec<String>,
}

impl Initializer {
    pub fn instance() -> Self {
        Self::default()
    }

    pub fn static_block() -> Self {
        Self {
            is_static: true,
            code: Vec::new(),
        }
    }

    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.code.push(line.into());
        self
    }
}

/// Qualified names of every declaration in `classes`, nested ones included.
pub fn declared_names(package: Option<&str>, classes: &[ClassOrInterface]) -> Vec<String> {
    let mut names = Vec::new();
    for class in classes {
        let name = match package {
            Some(package) => format!("{}.{}", package, class.name()),
            None => class.name().to_string(),
        };
        names.extend(declared_names(Some(&name), class.classes()));
        names.push(name);
    }
    names
}
