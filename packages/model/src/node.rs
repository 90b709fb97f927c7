//! # Template Nodes
//!
//! A template body is an ordered list of [`Node`]s. A node is either a
//! leaf field (input or content) or a layout container owning its own
//! ordered children. Children are owned, never shared, so the tree can
//! not contain cycles.

use crate::id_generator::IdGenerator;
use crate::style::FieldStyle;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Language code → translated text
pub type TranslationMap = BTreeMap<String, String>;

/// Leaf field kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Phone,
    Number,
    Date,
    Textarea,
    Select,
    Radio,
    Checkbox,
    Paragraph,
    Divider,
    Heading,
}

impl FieldType {
    pub const ALL: [FieldType; 11] = [
        FieldType::Text,
        FieldType::Phone,
        FieldType::Number,
        FieldType::Date,
        FieldType::Textarea,
        FieldType::Select,
        FieldType::Radio,
        FieldType::Checkbox,
        FieldType::Paragraph,
        FieldType::Divider,
        FieldType::Heading,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Phone => "phone",
            FieldType::Number => "number",
            FieldType::Date => "date",
            FieldType::Textarea => "textarea",
            FieldType::Select => "select",
            FieldType::Radio => "radio",
            FieldType::Checkbox => "checkbox",
            FieldType::Paragraph => "paragraph",
            FieldType::Divider => "divider",
            FieldType::Heading => "heading",
        }
    }

    /// Label shown in the palette and used as the default field label
    pub fn display_name(&self) -> &'static str {
        match self {
            FieldType::Text => "Text Field",
            FieldType::Phone => "Phone Number",
            FieldType::Number => "Number",
            FieldType::Date => "Date",
            FieldType::Textarea => "Text Area",
            FieldType::Select => "Dropdown",
            FieldType::Radio => "Multiple Choice",
            FieldType::Checkbox => "Checkbox",
            FieldType::Paragraph => "Paragraph",
            FieldType::Divider => "Divider",
            FieldType::Heading => "Heading",
        }
    }

    /// Paragraph and heading carry free text in `content`
    pub fn is_content(&self) -> bool {
        matches!(self, FieldType::Paragraph | FieldType::Heading)
    }

    /// Types a recipient fills in
    pub fn is_input(&self) -> bool {
        !matches!(
            self,
            FieldType::Paragraph | FieldType::Divider | FieldType::Heading
        )
    }

    pub fn has_options(&self) -> bool {
        matches!(self, FieldType::Select | FieldType::Radio)
    }
}

/// Layout container kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerType {
    Container,
    Row,
    Column,
}

impl ContainerType {
    pub const ALL: [ContainerType; 3] = [
        ContainerType::Container,
        ContainerType::Row,
        ContainerType::Column,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerType::Container => "container",
            ContainerType::Row => "row",
            ContainerType::Column => "column",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ContainerType::Container => "Container",
            ContainerType::Row => "Row",
            ContainerType::Column => "Column",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Justify {
    Start,
    Center,
    End,
    SpaceBetween,
    SpaceAround,
}

impl Justify {
    pub fn as_css(&self) -> &'static str {
        match self {
            Justify::Start => "flex-start",
            Justify::Center => "center",
            Justify::End => "flex-end",
            Justify::SpaceBetween => "space-between",
            Justify::SpaceAround => "space-around",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Align {
    Start,
    Center,
    End,
    Stretch,
}

impl Align {
    pub fn as_css(&self) -> &'static str {
        match self {
            Align::Start => "flex-start",
            Align::Center => "center",
            Align::End => "flex-end",
            Align::Stretch => "stretch",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    Vertical,
    Horizontal,
}

impl Direction {
    pub fn as_css(&self) -> &'static str {
        match self {
            Direction::Vertical => "column",
            Direction::Horizontal => "row",
        }
    }
}

/// Flex layout settings of a container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutProps {
    /// Pixels between children
    pub gap: u32,
    /// Inner padding in pixels
    pub padding: u32,
    pub justify: Justify,
    pub align: Align,
    pub direction: Direction,
    pub wrap: bool,
}

impl LayoutProps {
    pub fn for_container(container_type: ContainerType) -> Self {
        match container_type {
            ContainerType::Container => Self {
                gap: 16,
                padding: 16,
                justify: Justify::Start,
                align: Align::Stretch,
                direction: Direction::Vertical,
                wrap: false,
            },
            ContainerType::Row => Self {
                gap: 16,
                padding: 8,
                justify: Justify::Start,
                align: Align::Center,
                direction: Direction::Horizontal,
                wrap: true,
            },
            ContainerType::Column => Self {
                gap: 12,
                padding: 8,
                justify: Justify::Start,
                align: Align::Stretch,
                direction: Direction::Vertical,
                wrap: false,
            },
        }
    }
}

/// One choice of a select or radio field. `value` is the option's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub label: String,
    pub value: String,
}

impl FieldOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

fn default_visible() -> bool {
    true
}

fn is_true(value: &bool) -> bool {
    *value
}

/// Content or input-bearing node with no children
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeafField {
    pub id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub name: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading_level: Option<u8>,
    #[serde(default = "default_visible", skip_serializing_if = "is_true")]
    pub visible: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub label_translations: TranslationMap,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub placeholder_translations: TranslationMap,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub content_translations: TranslationMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_style: Option<FieldStyle>,
}

impl LeafField {
    /// Build a field of the given type with its type-specific defaults
    pub fn with_defaults(field_type: FieldType, id: String, name: String) -> Self {
        let (placeholder, options, content, heading_level) = match field_type {
            FieldType::Text | FieldType::Textarea => {
                (Some("Enter text".to_string()), vec![], None, None)
            }
            FieldType::Phone => (Some("Enter phone number".to_string()), vec![], None, None),
            FieldType::Number => (Some("Enter a number".to_string()), vec![], None, None),
            FieldType::Date => (Some("Select a date".to_string()), vec![], None, None),
            FieldType::Select => (
                Some("Select an option".to_string()),
                vec![FieldOption::new("Option 1", "option_1")],
                None,
                None,
            ),
            FieldType::Radio => (None, vec![FieldOption::new("Option 1", "option_1")], None, None),
            FieldType::Checkbox => (None, vec![], None, None),
            FieldType::Paragraph => (None, vec![], Some("Enter your text here".to_string()), None),
            FieldType::Heading => (None, vec![], Some("Heading".to_string()), Some(3)),
            FieldType::Divider => (None, vec![], None, None),
        };

        let label = match field_type {
            FieldType::Divider => String::new(),
            other => other.display_name().to_string(),
        };

        Self {
            id,
            field_type,
            name,
            label,
            placeholder,
            required: false,
            options,
            min: None,
            max: None,
            content,
            heading_level,
            visible: true,
            label_translations: TranslationMap::new(),
            placeholder_translations: TranslationMap::new(),
            content_translations: TranslationMap::new(),
            field_style: None,
        }
    }
}

/// Node owning an ordered child list and flex layout settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutContainer {
    pub id: String,
    pub container_type: ContainerType,
    pub label: String,
    #[serde(default = "default_visible", skip_serializing_if = "is_true")]
    pub visible: bool,
    pub layout_props: LayoutProps,
    #[serde(default)]
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_style: Option<FieldStyle>,
}

impl LayoutContainer {
    pub fn with_defaults(container_type: ContainerType, id: String) -> Self {
        Self {
            id,
            container_type,
            label: container_type.display_name().to_string(),
            visible: true,
            layout_props: LayoutProps::for_container(container_type),
            children: Vec::new(),
            field_style: None,
        }
    }
}

/// Entry of the template tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
    Field(LeafField),
    Layout(LayoutContainer),
}

impl Node {
    pub fn id(&self) -> &str {
        match self {
            Node::Field(field) => &field.id,
            Node::Layout(layout) => &layout.id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Node::Field(field) => &field.label,
            Node::Layout(layout) => &layout.label,
        }
    }

    pub fn visible(&self) -> bool {
        match self {
            Node::Field(field) => field.visible,
            Node::Layout(layout) => layout.visible,
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        match self {
            Node::Field(field) => field.visible = visible,
            Node::Layout(layout) => layout.visible = visible,
        }
    }

    pub fn field_style(&self) -> Option<&FieldStyle> {
        match self {
            Node::Field(field) => field.field_style.as_ref(),
            Node::Layout(layout) => layout.field_style.as_ref(),
        }
    }

    pub fn field_style_mut(&mut self) -> &mut Option<FieldStyle> {
        match self {
            Node::Field(field) => &mut field.field_style,
            Node::Layout(layout) => &mut layout.field_style,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Node::Layout(_))
    }

    pub fn as_field(&self) -> Option<&LeafField> {
        match self {
            Node::Field(field) => Some(field),
            Node::Layout(_) => None,
        }
    }

    pub fn as_field_mut(&mut self) -> Option<&mut LeafField> {
        match self {
            Node::Field(field) => Some(field),
            Node::Layout(_) => None,
        }
    }

    pub fn as_layout(&self) -> Option<&LayoutContainer> {
        match self {
            Node::Layout(layout) => Some(layout),
            Node::Field(_) => None,
        }
    }

    pub fn as_layout_mut(&mut self) -> Option<&mut LayoutContainer> {
        match self {
            Node::Layout(layout) => Some(layout),
            Node::Field(_) => None,
        }
    }

    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Layout(layout) => Some(&layout.children),
            Node::Field(_) => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Layout(layout) => Some(&mut layout.children),
            Node::Field(_) => None,
        }
    }
}

impl From<LeafField> for Node {
    fn from(field: LeafField) -> Self {
        Node::Field(field)
    }
}

impl From<LayoutContainer> for Node {
    fn from(layout: LayoutContainer) -> Self {
        Node::Layout(layout)
    }
}

/// Construct a fresh leaf field with a newly generated id
pub fn create_field(field_type: FieldType, ids: &mut IdGenerator) -> LeafField {
    let id = ids.new_id("field");
    let name = format!("{}_{}", field_type.as_str(), ids.count());
    LeafField::with_defaults(field_type, id, name)
}

/// Construct an empty layout container with a newly generated id
pub fn create_container(container_type: ContainerType, ids: &mut IdGenerator) -> LayoutContainer {
    let id = ids.new_id("container");
    LayoutContainer::with_defaults(container_type, id)
}
