use std::fmt;

use crate::model::*;

/// Discriminant of every node kind the engine can dispatch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    File,
    Class,
    Interface,
    Enum,
    Annotation,
    EnumConstant,
    Method,
    Constructor,
    Field,
    Generic,
    Import,
    Javadoc,
    JavadocTag,
    AnnotationUsage,
    Initializer,
    Type,
    ArrayValue,
    BooleanValue,
    EnumValue,
    NumberValue,
    ReferenceValue,
    TextValue,
    NullValue,
    InvocationValue,
    AnonymousValue,
    Document,
    Declaration,
    Tag,
    Attribute,
    Text,
}

impl NodeKind {
    pub const ALL: [NodeKind; 30] = [
        NodeKind::File,
        NodeKind::Class,
        NodeKind::Interface,
        NodeKind::Enum,
        NodeKind::Annotation,
        NodeKind::EnumConstant,
        NodeKind::Method,
        NodeKind::Constructor,
        NodeKind::Field,
        NodeKind::Generic,
        NodeKind::Import,
        NodeKind::Javadoc,
        NodeKind::JavadocTag,
        NodeKind::AnnotationUsage,
        NodeKind::Initializer,
        NodeKind::Type,
        NodeKind::ArrayValue,
        NodeKind::BooleanValue,
        NodeKind::EnumValue,
        NodeKind::NumberValue,
        NodeKind::ReferenceValue,
        NodeKind::TextValue,
        NodeKind::NullValue,
        NodeKind::InvocationValue,
        NodeKind::AnonymousValue,
        NodeKind::Document,
        NodeKind::Declaration,
        NodeKind::Tag,
        NodeKind::Attribute,
        NodeKind::Text,
    ];

    /// Stable index of this kind, usable as a table slot.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The closed supertype this kind belongs to, if any.
    pub fn family(self) -> Option<Family> {
        use NodeKind::*;
        match self {
            Class | Interface | Enum | Annotation => Some(Family::ClassOrInterface),
            ArrayValue | BooleanValue | EnumValue | NumberValue | ReferenceValue | TextValue
            | NullValue | InvocationValue | AnonymousValue => Some(Family::Value),
            Declaration | Tag | Text => Some(Family::Element),
            _ => None,
        }
    }

    /// Capabilities of this kind in declaration order. The order is the
    /// tie-break between equally distant bridge registrations.
    pub fn capabilities(self) -> &'static [Capability] {
        use Capability::*;
        match self {
            NodeKind::File => &[HasName, HasJavadoc, HasImports, HasClasses],
            NodeKind::Class => &[
                HasName,
                HasModifiers,
                HasJavadoc,
                HasAnnotationUsages,
                HasGenerics,
                HasSupertype,
                HasInterfaces,
                HasFields,
                HasInitializers,
                HasConstructors,
                HasMethods,
                HasClasses,
            ],
            NodeKind::Interface => &[
                HasName,
                HasModifiers,
                HasJavadoc,
                HasAnnotationUsages,
                HasGenerics,
                HasInterfaces,
                HasFields,
                HasMethods,
                HasClasses,
            ],
            NodeKind::Enum => &[
                HasName,
                HasModifiers,
                HasJavadoc,
                HasAnnotationUsages,
                HasInterfaces,
                HasFields,
                HasInitializers,
                HasConstructors,
                HasMethods,
                HasClasses,
            ],
            NodeKind::Annotation => &[
                HasName,
                HasModifiers,
                HasJavadoc,
                HasAnnotationUsages,
                HasFields,
            ],
            NodeKind::EnumConstant => &[HasName, HasJavadoc, HasFields, HasMethods],
            NodeKind::Method => &[
                HasName,
                HasModifiers,
                HasJavadoc,
                HasAnnotationUsages,
                HasGenerics,
                HasType,
                HasFields,
                HasThrows,
                HasCode,
            ],
            NodeKind::Constructor => &[
                HasModifiers,
                HasJavadoc,
                HasAnnotationUsages,
                HasFields,
                HasThrows,
                HasCode,
            ],
            NodeKind::Field => &[
                HasName,
                HasModifiers,
                HasJavadoc,
                HasAnnotationUsages,
                HasType,
                HasValue,
            ],
            NodeKind::Generic => &[HasName],
            NodeKind::Import => &[HasType],
            NodeKind::Javadoc => &[HasJavadocTags],
            NodeKind::JavadocTag => &[HasName],
            NodeKind::AnnotationUsage => &[HasType, HasValue],
            NodeKind::Initializer => &[HasCode],
            NodeKind::Type => &[HasName],
            NodeKind::EnumValue => &[HasType],
            NodeKind::InvocationValue => &[HasName],
            NodeKind::AnonymousValue => &[HasType, HasFields, HasMethods],
            NodeKind::Document => &[HasChildren],
            NodeKind::Tag => &[HasName, HasAttributes, HasChildren],
            NodeKind::Attribute => &[HasName, HasValue],
            NodeKind::ArrayValue
            | NodeKind::BooleanValue
            | NodeKind::NumberValue
            | NodeKind::ReferenceValue
            | NodeKind::TextValue
            | NodeKind::NullValue
            | NodeKind::Declaration
            | NodeKind::Text => &[],
        }
    }

    pub fn has(self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Closed supertype shared by a group of kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    ClassOrInterface,
    Value,
    Element,
}

/// Orthogonal traits a node kind may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    HasName,
    HasModifiers,
    HasJavadoc,
    HasJavadocTags,
    HasAnnotationUsages,
    HasGenerics,
    HasSupertype,
    HasInterfaces,
    HasFields,
    HasInitializers,
    HasConstructors,
    HasMethods,
    HasClasses,
    HasImports,
    HasType,
    HasValue,
    HasThrows,
    HasCode,
    HasAttributes,
    HasChildren,
}

/// Borrowed view of one model node, the unit of dispatch.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    File(&'a File),
    Class(&'a Class),
    Interface(&'a Interface),
    Enum(&'a Enum),
    Annotation(&'a AnnotationDecl),
    EnumConstant(&'a EnumConstant),
    Method(&'a Method),
    Constructor(&'a Constructor),
    Field(&'a Field),
    Generic(&'a Generic),
    Import(&'a Import),
    Javadoc(&'a Javadoc),
    JavadocTag(&'a JavadocTag),
    AnnotationUsage(&'a AnnotationUsage),
    Initializer(&'a Initializer),
    Type(&'a Type),
    Value(&'a Value),
    Document(&'a Document),
    Declaration(&'a Declaration),
    Tag(&'a Tag),
    Attribute(&'a Attribute),
    Text(&'a Text),
}

impl<'a> Node<'a> {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::File(_) => NodeKind::File,
            Node::Class(_) => NodeKind::Class,
            Node::Interface(_) => NodeKind::Interface,
            Node::Enum(_) => NodeKind::Enum,
            Node::Annotation(_) => NodeKind::Annotation,
            Node::EnumConstant(_) => NodeKind::EnumConstant,
            Node::Method(_) => NodeKind::Method,
            Node::Constructor(_) => NodeKind::Constructor,
            Node::Field(_) => NodeKind::Field,
            Node::Generic(_) => NodeKind::Generic,
            Node::Import(_) => NodeKind::Import,
            Node::Javadoc(_) => NodeKind::Javadoc,
            Node::JavadocTag(_) => NodeKind::JavadocTag,
            Node::AnnotationUsage(_) => NodeKind::AnnotationUsage,
            Node::Initializer(_) => NodeKind::Initializer,
            Node::Type(_) => NodeKind::Type,
            Node::Value(value) => value.kind(),
            Node::Document(_) => NodeKind::Document,
            Node::Declaration(_) => NodeKind::Declaration,
            Node::Tag(_) => NodeKind::Tag,
            Node::Attribute(_) => NodeKind::Attribute,
            Node::Text(_) => NodeKind::Text,
        }
    }

    pub fn is_class_or_interface(&self) -> bool {
        self.kind().family() == Some(Family::ClassOrInterface)
    }

    pub fn name(&self) -> Option<&'a str> {
        match *self {
            Node::File(file) => Some(&file.name),
            Node::Class(class) => Some(&class.name),
            Node::Interface(interface) => Some(&interface.name),
            Node::Enum(enum_) => Some(&enum_.name),
            Node::Annotation(annotation) => Some(&annotation.name),
            Node::EnumConstant(constant) => Some(&constant.name),
            Node::Method(method) => Some(&method.name),
            Node::Field(field) => Some(&field.name),
            Node::Generic(generic) => generic.name.as_deref(),
            Node::JavadocTag(tag) => Some(&tag.name),
            Node::Type(ty) => Some(&ty.name),
            Node::Value(Value::Invocation { name, .. }) => Some(name),
            Node::Tag(tag) => Some(&tag.name),
            Node::Attribute(attribute) => Some(&attribute.name),
            _ => None,
        }
    }

    pub fn javadoc(&self) -> Option<&'a Javadoc> {
        match *self {
            Node::File(file) => file.javadoc.as_ref(),
            Node::Class(class) => class.javadoc.as_ref(),
            Node::Interface(interface) => interface.javadoc.as_ref(),
            Node::Enum(enum_) => enum_.javadoc.as_ref(),
            Node::Annotation(annotation) => annotation.javadoc.as_ref(),
            Node::EnumConstant(constant) => constant.javadoc.as_ref(),
            Node::Method(method) => method.javadoc.as_ref(),
            Node::Constructor(constructor) => constructor.javadoc.as_ref(),
            Node::Field(field) => field.javadoc.as_ref(),
            _ => None,
        }
    }

    pub fn modifiers(&self) -> Option<&'a Modifiers> {
        match *self {
            Node::Class(class) => Some(&class.modifiers),
            Node::Interface(interface) => Some(&interface.modifiers),
            Node::Enum(enum_) => Some(&enum_.modifiers),
            Node::Annotation(annotation) => Some(&annotation.modifiers),
            Node::Method(method) => Some(&method.modifiers),
            Node::Constructor(constructor) => Some(&constructor.modifiers),
            Node::Field(field) => Some(&field.modifiers),
            _ => None,
        }
    }

    pub fn annotations(&self) -> Option<&'a [AnnotationUsage]> {
        match *self {
            Node::Class(class) => Some(&class.annotations),
            Node::Interface(interface) => Some(&interface.annotations),
            Node::Enum(enum_) => Some(&enum_.annotations),
            Node::Annotation(annotation) => Some(&annotation.annotations),
            Node::Method(method) => Some(&method.annotations),
            Node::Constructor(constructor) => Some(&constructor.annotations),
            Node::Field(field) => Some(&field.annotations),
            _ => None,
        }
    }

    pub fn fields(&self) -> Option<&'a [Field]> {
        match *self {
            Node::Class(class) => Some(&class.fields),
            Node::Interface(interface) => Some(&interface.fields),
            Node::Enum(enum_) => Some(&enum_.fields),
            Node::Annotation(annotation) => Some(&annotation.fields),
            Node::EnumConstant(constant) => Some(&constant.fields),
            Node::Method(method) => Some(&method.fields),
            Node::Constructor(constructor) => Some(&constructor.fields),
            Node::Value(Value::Anonymous(anonymous)) => Some(&anonymous.fields),
            _ => None,
        }
    }

    pub fn methods(&self) -> Option<&'a [Method]> {
        match *self {
            Node::Class(class) => Some(&class.methods),
            Node::Interface(interface) => Some(&interface.methods),
            Node::Enum(enum_) => Some(&enum_.methods),
            Node::EnumConstant(constant) => Some(&constant.methods),
            Node::Value(Value::Anonymous(anonymous)) => Some(&anonymous.methods),
            _ => None,
        }
    }

    pub fn code(&self) -> Option<&'a [String]> {
        match *self {
            Node::Method(method) => Some(&method.code),
            Node::Constructor(constructor) => Some(&constructor.code),
            Node::Initializer(initializer) => Some(&initializer.code),
            _ => None,
        }
    }

    /// Identity comparison: both views point at the same model value.
    pub fn same(&self, other: &Node<'_>) -> bool {
        self.address() == other.address()
    }

    fn address(&self) -> *const () {
        match *self {
            Node::File(n) => n as *const File as *const (),
            Node::Class(n) => n as *const Class as *const (),
            Node::Interface(n) => n as *const Interface as *const (),
            Node::Enum(n) => n as *const Enum as *const (),
            Node::Annotation(n) => n as *const AnnotationDecl as *const (),
            Node::EnumConstant(n) => n as *const EnumConstant as *const (),
            Node::Method(n) => n as *const Method as *const (),
            Node::Constructor(n) => n as *const Constructor as *const (),
            Node::Field(n) => n as *const Field as *const (),
            Node::Generic(n) => n as *const Generic as *const (),
            Node::Import(n) => n as *const Import as *const (),
            Node::Javadoc(n) => n as *const Javadoc as *const (),
            Node::JavadocTag(n) => n as *const JavadocTag as *const (),
            Node::AnnotationUsage(n) => n as *const AnnotationUsage as *const (),
            Node::Initializer(n) => n as *const Initializer as *const (),
            Node::Type(n) => n as *const Type as *const (),
            Node::Value(n) => n as *const Value as *const (),
            Node::Document(n) => n as *const Document as *const (),
            Node::Declaration(n) => n as *const Declaration as *const (),
            Node::Tag(n) => n as *const Tag as *const (),
            Node::Attribute(n) => n as *const Attribute as *const (),
            Node::Text(n) => n as *const Text as *const (),
        }
    }
}

macro_rules! node_from {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl<'a> From<&'a $ty> for Node<'a> {
                fn from(value: &'a $ty) -> Self {
                    Node::$variant(value)
                }
            }
        )*
    };
}

node_from! {
    File => File,
    Class => Class,
    Interface => Interface,
    Enum => Enum,
    Annotation => AnnotationDecl,
    EnumConstant => EnumConstant,
    Method => Method,
    Constructor => Constructor,
    Field => Field,
    Generic => Generic,
    Import => Import,
    Javadoc => Javadoc,
    JavadocTag => JavadocTag,
    AnnotationUsage => AnnotationUsage,
    Initializer => Initializer,
    Type => Type,
    Value => Value,
    Document => Document,
    Declaration => Declaration,
    Tag => Tag,
    Attribute => Attribute,
    Text => Text,
}

impl<'a> From<&'a ClassOrInterface> for Node<'a> {
    fn from(value: &'a ClassOrInterface) -> Self {
        match value {
            ClassOrInterface::Class(class) => Node::Class(class),
            ClassOrInterface::Interface(interface) => Node::Interface(interface),
            ClassOrInterface::Enum(enum_) => Node::Enum(enum_),
            ClassOrInterface::Annotation(annotation) => Node::Annotation(annotation),
        }
    }
}

impl<'a> From<&'a TypeArgument> for Node<'a> {
    fn from(value: &'a TypeArgument) -> Self {
        match value {
            TypeArgument::Type(ty) => Node::Type(ty),
            TypeArgument::Wildcard(wildcard) => Node::Generic(wildcard),
        }
    }
}

impl<'a> From<&'a Element> for Node<'a> {
    fn from(value: &'a Element) -> Self {
        match value {
            Element::Declaration(declaration) => Node::Declaration(declaration),
            Element::Tag(tag) => Node::Tag(tag),
            Element::Text(text) => Node::Text(text),
        }
    }
}
