use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::model::{Field, Method, NodeKind};

fn is_zero(value: &usize) -> bool {
    *value == 0
}

/// Reference to a type by its fully-qualified name.
///
/// Primitive names (`int`) and type variables (`T`) are written without a
/// package. Generic arguments and array dimensions are kept apart from the
/// name so the name itself is always importable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "TypeRepr")]
pub struct Type {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub generics: Vec<TypeArgument>,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub dimensions: usize,
}

// A type may be written as a bare name in serialized models.
#[derive(Deserialize)]
#[serde(untagged)]
enum TypeRepr {
    Name(String),
    Full {
        name: String,
        #[serde(default)]
        generics: Vec<TypeArgument>,
        #[serde(default)]
        dimensions: usize,
    },
}

impl From<TypeRepr> for Type {
    fn from(repr: TypeRepr) -> Self {
        match repr {
            TypeRepr::Name(name) => Type::of(name),
            TypeRepr::Full {
                name,
                generics,
                dimensions,
            } => Type {
                name,
                generics,
                dimensions,
            },
        }
    }
}

impl Type {
    pub fn of(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            generics: Vec::new(),
            dimensions: 0,
        }
    }

    /// Like [`Type::of`] but rejects names that are not dotted identifiers.
    pub fn try_of(name: impl Into<String>) -> Result<Self, ModelError> {
        let ty = Self::of(name);
        ty.validate()?;
        Ok(ty)
    }

    /// Appends a type argument: a type or a [`Generic::wildcard`].
    pub fn with_generic(mut self, argument: impl Into<TypeArgument>) -> Self {
        self.generics.push(argument.into());
        self
    }

    /// One more array dimension: `int` becomes `int[]`.
    pub fn array(mut self) -> Self {
        self.dimensions += 1;
        self
    }

    pub fn short_name(&self) -> &str {
        short_name(&self.name)
    }

    pub fn package(&self) -> Option<&str> {
        package_of(&self.name)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if !is_qualified_name(&self.name) {
            return Err(ModelError::InvalidTypeName(self.name.clone()));
        }
        self.generics.iter().try_for_each(TypeArgument::validate)
    }
}

/// Argument of a parameterized type: `String` in `List<String>` or
/// `? extends Number` in `List<? extends Number>`.
///
/// Serialized as a type, or as an object without a `name` for a wildcard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeArgument {
    Type(Type),
    Wildcard(Generic),
}

impl TypeArgument {
    pub fn validate(&self) -> Result<(), ModelError> {
        match self {
            TypeArgument::Type(ty) => ty.validate(),
            TypeArgument::Wildcard(wildcard) => {
                if let Some(name) = &wildcard.name {
                    return Err(ModelError::InvalidTypeName(name.clone()));
                }
                wildcard.bounds.iter().try_for_each(Type::validate)
            }
        }
    }
}

impl From<Type> for TypeArgument {
    fn from(ty: Type) -> Self {
        TypeArgument::Type(ty)
    }
}

impl From<Generic> for TypeArgument {
    fn from(wildcard: Generic) -> Self {
        TypeArgument::Wildcard(wildcard)
    }
}

/// Last segment of a dotted name.
pub fn short_name(name: &str) -> &str {
    name.rsplit_once('.').map_or(name, |(_, short)| short)
}

/// Everything before the last segment of a dotted name.
pub fn package_of(name: &str) -> Option<&str> {
    name.rsplit_once('.').map(|(package, _)| package)
}

pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

pub(crate) fn is_qualified_name(name: &str) -> bool {
    name.split('.').all(is_identifier)
}

pub(crate) fn check_identifier(kind: NodeKind, name: &str) -> Result<(), ModelError> {
    if name.is_empty() {
        return Err(ModelError::MissingName { kind });
    }
    if !is_identifier(name) {
        return Err(ModelError::InvalidIdentifier {
            kind,
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Declaration modifiers, ordered the way they are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Abstract,
    Default,
    Static,
    Final,
    Transient,
    Volatile,
    Synchronized,
    Native,
    Strictfp,
}

impl Modifier {
    pub fn keyword(self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Protected => "protected",
            Modifier::Private => "private",
            Modifier::Abstract => "abstract",
            Modifier::Default => "default",
            Modifier::Static => "static",
            Modifier::Final => "final",
            Modifier::Transient => "transient",
            Modifier::Volatile => "volatile",
            Modifier::Synchronized => "synchronized",
            Modifier::Native => "native",
            Modifier::Strictfp => "strictfp",
        }
    }
}

pub type Modifiers = BTreeSet<Modifier>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundKind {
    #[default]
    Extends,
    Super,
}

/// Generic parameter or wildcard with its bounds: `T extends Comparable<T>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Generic {
    /// `None` renders as the wildcard `?`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bounds: Vec<Type>,
    #[serde(default)]
    pub kind: BoundKind,
}

impl Generic {
    pub fn of(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            bounds: Vec::new(),
            kind: BoundKind::Extends,
        }
    }

    /// `?`, used as a type argument through [`Type::with_generic`].
    pub fn wildcard() -> Self {
        Self {
            name: None,
            bounds: Vec::new(),
            kind: BoundKind::Extends,
        }
    }

    pub fn extends(mut self, bound: Type) -> Self {
        self.kind = BoundKind::Extends;
        self.bounds.push(bound);
        self
    }

    pub fn super_bound(mut self, bound: Type) -> Self {
        self.kind = BoundKind::Super;
        self.bounds.push(bound);
        self
    }
}

/// `import a.b.C;` or, with a member, `import static a.b.C.member;`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Import {
    #[serde(rename = "type")]
    pub ty: Type,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<String>,
}

impl Import {
    pub fn of(ty: Type) -> Self {
        Self { ty, member: None }
    }

    pub fn static_member(ty: Type, member: impl Into<String>) -> Self {
        Self {
            ty,
            member: Some(member.into()),
        }
    }

    pub fn is_static(&self) -> bool {
        self.member.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Javadoc {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<JavadocTag>,
}

impl Javadoc {
    pub fn of(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tags: Vec::new(),
        }
    }

    pub fn tag(mut self, tag: JavadocTag) -> Self {
        self.tags.push(tag);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.tags.is_empty()
    }
}

/// Block tag such as `@param name text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JavadocTag {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl JavadocTag {
    pub fn of(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            text: None,
        }
    }

    pub fn param(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::of("param").with_value(name).with_text(text)
    }

    pub fn returns(text: impl Into<String>) -> Self {
        Self::of("return").with_text(text)
    }

    pub fn throws(exception: impl Into<String>, text: impl Into<String>) -> Self {
        Self::of("throws").with_value(exception).with_text(text)
    }

    pub fn author(name: impl Into<String>) -> Self {
        Self::of("author").with_value(name)
    }

    pub fn see(target: impl Into<String>) -> Self {
        Self::of("see").with_value(target)
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedValue {
    pub name: String,
    pub value: Value,
}

/// Use of an annotation: `@Foo`, `@Foo(value)` or `@Foo(a = 1, b = 2)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationUsage {
    #[serde(rename = "type")]
    pub ty: Type,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<NamedValue>,
}

impl AnnotationUsage {
    pub fn of(ty: Type) -> Self {
        Self {
            ty,
            value: None,
            values: Vec::new(),
        }
    }

    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_named(mut self, name: impl Into<String>, value: Value) -> Self {
        self.values.push(NamedValue {
            name: name.into(),
            value,
        });
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Number {
    Int(i64),
    Long(i64),
    Float(f32),
    Double(f64),
}

/// Literal value or expression used as an initializer or argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Array(Vec<Value>),
    Boolean(bool),
    Enum {
        #[serde(rename = "type")]
        ty: Type,
        constant: String,
    },
    Number(Number),
    /// Verbatim expression such as `this.name`.
    Reference(String),
    Text(String),
    Null,
    Invocation {
        #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
        ty: Option<Type>,
        name: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        args: Vec<Value>,
    },
    Anonymous(Box<Anonymous>),
}

impl Value {
    pub fn text(text: impl Into<String>) -> Self {
        Value::Text(text.into())
    }

    pub fn int(value: i64) -> Self {
        Value::Number(Number::Int(value))
    }

    pub fn reference(expression: impl Into<String>) -> Self {
        Value::Reference(expression.into())
    }

    pub fn enum_constant(ty: Type, constant: impl Into<String>) -> Self {
        Value::Enum {
            ty,
            constant: constant.into(),
        }
    }

    pub fn invocation(ty: Option<Type>, name: impl Into<String>, args: Vec<Value>) -> Self {
        Value::Invocation {
            ty,
            name: name.into(),
            args,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Value::Array(_) => NodeKind::ArrayValue,
            Value::Boolean(_) => NodeKind::BooleanValue,
            Value::Enum { .. } => NodeKind::EnumValue,
            Value::Number(_) => NodeKind::NumberValue,
            Value::Reference(_) => NodeKind::ReferenceValue,
            Value::Text(_) => NodeKind::TextValue,
            Value::Null => NodeKind::NullValue,
            Value::Invocation { .. } => NodeKind::InvocationValue,
            Value::Anonymous(_) => NodeKind::AnonymousValue,
        }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        match self {
            Value::Array(values) => values.iter().try_for_each(Value::validate),
            Value::Enum { ty, constant } => {
                ty.validate()?;
                check_identifier(NodeKind::EnumValue, constant)
            }
            Value::Invocation { ty, name, args } => {
                if let Some(ty) = ty {
                    ty.validate()?;
                }
                check_identifier(NodeKind::InvocationValue, name)?;
                args.iter().try_for_each(Value::validate)
            }
            Value::Anonymous(anonymous) => anonymous.validate(),
            Value::Boolean(_)
            | Value::Number(_)
            | Value::Reference(_)
            | Value::Text(_)
            | Value::Null => Ok(()),
        }
    }
}

/// `new Type(args) { fields; methods }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anonymous {
    #[serde(rename = "type")]
    pub ty: Type,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<Method>,
}

impl Anonymous {
    pub fn of(ty: Type) -> Self {
        Self {
            ty,
            args: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn arg(mut self, value: Value) -> Self {
        self.args.push(value);
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
        self.ty.validate()?;
        self.args.iter().try_for_each(Value::validate)?;
        self.fields.iter().try_for_each(Field::validate)?;
        self.methods.iter().try_for_each(Method::validate)
    }
}

impl From<Anonymous> for Value {
    fn from(anonymous: Anonymous) -> Self {
        Value::Anonymous(Box::new(anonymous))
    }
}
