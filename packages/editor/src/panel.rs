//! # Field Config / Styling Panel
//!
//! Read-modify-write surface for one node. Opening the panel stages a copy
//! of the node; setters only touch that copy. Nothing reaches the tree
//! until [`FieldConfigPanel::commit`] hands back a replace mutation.

use crate::Mutation;
use rsvpkit_model::{FieldOption, FieldStyle, FieldType, LayoutProps, LeafField, Node};

#[derive(Debug, Clone)]
pub struct FieldConfigPanel {
    original: Node,
    staged: Node,
}

impl FieldConfigPanel {
    pub fn open(node: &Node) -> Self {
        Self {
            original: node.clone(),
            staged: node.clone(),
        }
    }

    pub fn node_id(&self) -> &str {
        self.original.id()
    }

    pub fn staged(&self) -> &Node {
        &self.staged
    }

    /// Whether anything was edited since the panel opened
    pub fn is_modified(&self) -> bool {
        self.original != self.staged
    }

    fn field_mut(&mut self) -> Option<&mut LeafField> {
        self.staged.as_field_mut()
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        let label = label.into();
        match &mut self.staged {
            Node::Field(field) => field.label = label,
            Node::Layout(layout) => layout.label = label,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        if let Some(field) = self.field_mut() {
            field.name = name.into();
        }
    }

    pub fn set_placeholder(&mut self, placeholder: Option<String>) {
        if let Some(field) = self.field_mut() {
            field.placeholder = placeholder;
        }
    }

    pub fn set_required(&mut self, required: bool) {
        if let Some(field) = self.field_mut() {
            field.required = required;
        }
    }

    pub fn set_min(&mut self, min: Option<f64>) {
        if let Some(field) = self.field_mut() {
            field.min = min;
        }
    }

    pub fn set_max(&mut self, max: Option<f64>) {
        if let Some(field) = self.field_mut() {
            field.max = max;
        }
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        if let Some(field) = self.field_mut() {
            if field.field_type.is_content() {
                field.content = Some(content.into());
            }
        }
    }

    /// Headings only, clamped to 1-6
    pub fn set_heading_level(&mut self, level: u8) {
        if let Some(field) = self.field_mut() {
            if field.field_type == FieldType::Heading {
                field.heading_level = Some(level.clamp(1, 6));
            }
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.staged.set_visible(visible);
    }

    /// Merge `patch` into the staged style
    pub fn set_style(&mut self, patch: &FieldStyle) {
        self.staged
            .field_style_mut()
            .get_or_insert_with(FieldStyle::default)
            .merge(patch);
    }

    /// Drop every style override so the node follows the theme again
    pub fn reset_style(&mut self) {
        *self.staged.field_style_mut() = None;
    }

    pub fn set_layout_props(&mut self, props: LayoutProps) {
        if let Some(layout) = self.staged.as_layout_mut() {
            layout.layout_props = props;
        }
    }

    pub fn options(&self) -> &[FieldOption] {
        self.staged
            .as_field()
            .map(|field| field.options.as_slice())
            .unwrap_or(&[])
    }

    /// Append `Option N` / `option_N` using the smallest N whose value is
    /// free. Returns the new option's index.
    pub fn add_option(&mut self) -> Option<usize> {
        let field = self.field_mut().filter(|f| f.field_type.has_options())?;

        let n = (1..)
            .find(|n| {
                let value = format!("option_{}", n);
                !field.options.iter().any(|option| option.value == value)
            })
            .unwrap_or(1);
        field
            .options
            .push(FieldOption::new(format!("Option {}", n), format!("option_{}", n)));
        Some(field.options.len() - 1)
    }

    /// Out-of-range indices are ignored
    pub fn update_option(&mut self, index: usize, label: impl Into<String>, value: impl Into<String>) {
        if let Some(option) = self
            .field_mut()
            .and_then(|field| field.options.get_mut(index))
        {
            option.label = label.into();
            option.value = value.into();
        }
    }

    /// Remove one option; the others keep their values
    pub fn remove_option(&mut self, index: usize) -> Option<FieldOption> {
        let field = self.field_mut()?;
        if index < field.options.len() {
            Some(field.options.remove(index))
        } else {
            None
        }
    }

    /// Consume the panel into the mutation that writes the staged node back
    pub fn commit(self) -> Mutation {
        Mutation::ReplaceNode { node: self.staged }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsvpkit_model::{create_container, create_field, ContainerType, IdGenerator};

    fn select_panel() -> FieldConfigPanel {
        let mut ids = IdGenerator::new("panel");
        let select: Node = create_field(FieldType::Select, &mut ids).into();
        FieldConfigPanel::open(&select)
    }

    fn values(panel: &FieldConfigPanel) -> Vec<&str> {
        panel
            .options()
            .iter()
            .map(|option| option.value.as_str())
            .collect()
    }

    #[test]
    fn test_add_option_uses_smallest_free_number() {
        let mut panel = select_panel();
        assert_eq!(panel.add_option(), Some(1));
        assert_eq!(panel.add_option(), Some(2));
        assert_eq!(values(&panel), vec!["option_1", "option_2", "option_3"]);

        panel.remove_option(1);
        panel.add_option();
        assert_eq!(values(&panel), vec!["option_1", "option_3", "option_2"]);
        assert_eq!(panel.options()[2].label, "Option 2");
    }

    #[test]
    fn test_remove_option_keeps_other_values() {
        let mut panel = select_panel();
        panel.add_option();
        panel.add_option();
        panel.update_option(2, "Vegan", "vegan");

        let removed = panel.remove_option(0).unwrap();
        assert_eq!(removed.value, "option_1");
        assert_eq!(values(&panel), vec!["option_2", "vegan"]);

        assert!(panel.remove_option(9).is_none());
        panel.update_option(9, "x", "y");
        assert_eq!(values(&panel), vec!["option_2", "vegan"]);
    }

    #[test]
    fn test_options_only_for_select_and_radio() {
        let mut ids = IdGenerator::new("panel");
        let text: Node = create_field(FieldType::Text, &mut ids).into();
        let mut panel = FieldConfigPanel::open(&text);

        assert_eq!(panel.add_option(), None);
        assert!(panel.options().is_empty());
        assert!(!panel.is_modified());
    }

    #[test]
    fn test_edits_are_staged_until_commit() {
        let mut panel = select_panel();
        let id = panel.node_id().to_string();

        panel.set_label("Meal");
        panel.set_required(true);
        panel.set_heading_level(2);
        panel.set_style(&FieldStyle {
            border_radius: Some(2),
            ..Default::default()
        });
        assert!(panel.is_modified());

        let Mutation::ReplaceNode { node } = panel.commit() else {
            panic!("expected replace");
        };
        let field = node.as_field().unwrap();
        assert_eq!(field.id, id);
        assert_eq!(field.label, "Meal");
        assert!(field.required);
        assert_eq!(field.heading_level, None);
        assert_eq!(field.field_style.as_ref().unwrap().border_radius, Some(2));
    }

    #[test]
    fn test_heading_level_is_clamped() {
        let mut ids = IdGenerator::new("panel");
        let heading: Node = create_field(FieldType::Heading, &mut ids).into();
        let mut panel = FieldConfigPanel::open(&heading);

        panel.set_heading_level(0);
        assert_eq!(panel.staged().as_field().unwrap().heading_level, Some(1));
        panel.set_heading_level(12);
        assert_eq!(panel.staged().as_field().unwrap().heading_level, Some(6));

        panel.set_content("Welcome");
        assert_eq!(
            panel.staged().as_field().unwrap().content.as_deref(),
            Some("Welcome")
        );
    }

    #[test]
    fn test_container_panel() {
        let mut ids = IdGenerator::new("panel");
        let row: Node = create_container(ContainerType::Row, &mut ids).into();
        let mut panel = FieldConfigPanel::open(&row);

        panel.set_label("Names");
        panel.set_required(true);
        let mut props = LayoutProps::for_container(ContainerType::Column);
        props.gap = 4;
        panel.set_layout_props(props);

        let layout = panel.staged().as_layout().unwrap();
        assert_eq!(layout.label, "Names");
        assert_eq!(layout.layout_props.gap, 4);
    }
}
