use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::model::NodeKind;

fn is_markup_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'))
}

fn check_markup_name(kind: NodeKind, name: &str) -> Result<(), ModelError> {
    if name.is_empty() {
        return Err(ModelError::MissingName { kind });
    }
    if !is_markup_name(name) {
        return Err(ModelError::InvalidIdentifier {
            kind,
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Root of a markup output: a sequence of top-level elements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, element: impl Into<Element>) -> Self {
        self.elements.push(element.into());
        self
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        self.elements.iter().try_for_each(Element::validate)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Declaration(Declaration),
    Tag(Tag),
    Text(Text),
}

impl Element {
    pub fn validate(&self) -> Result<(), ModelError> {
        match self {
            Element::Tag(tag) => tag.validate(),
            Element::Declaration(_) | Element::Text(_) => Ok(()),
        }
    }
}

impl From<Declaration> for Element {
    fn from(declaration: Declaration) -> Self {
        Element::Declaration(declaration)
    }
}

impl From<Tag> for Element {
    fn from(tag: Tag) -> Self {
        Element::Tag(tag)
    }
}

impl From<Text> for Element {
    fn from(text: Text) -> Self {
        Element::Text(text)
    }
}

/// `<?xml version="1.0" encoding="UTF-8"?>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standalone: Option<bool>,
}

impl Declaration {
    pub fn xml() -> Self {
        Self {
            version: "1.0".to_string(),
            encoding: Some("UTF-8".to_string()),
            standalone: None,
        }
    }
}

impl Default for Declaration {
    fn default() -> Self {
        Self::xml()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Element>,
}

impl Tag {
    pub fn of(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn child(mut self, child: impl Into<Element>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Text::of(text))
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        check_markup_name(NodeKind::Tag, &self.name)?;
        for attribute in &self.attributes {
            check_markup_name(NodeKind::Attribute, &attribute.name)?;
        }
        self.children.iter().try_for_each(Element::validate)
    }
}

/// `name="value"`, or a bare `name` when there is no value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Attribute {
    pub fn of(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// Character data between tags; escaped when rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Text {
    pub value: String,
}

impl Text {
    pub fn of(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}
