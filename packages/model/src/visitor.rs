use crate::node::{LayoutContainer, LeafField, Node};

/// Visitor pattern for traversing template nodes immutably
///
/// Default implementations walk the entire tree in render order.
/// Override specific visit_* methods to act on particular nodes.
pub trait Visitor: Sized {
    fn visit_nodes(&mut self, nodes: &[Node]) {
        walk_nodes(self, nodes);
    }

    fn visit_node(&mut self, node: &Node) {
        walk_node(self, node);
    }

    fn visit_field(&mut self, _field: &LeafField) {
        // Leaf node, no children to walk
    }

    fn visit_layout(&mut self, layout: &LayoutContainer) {
        walk_layout(self, layout);
    }
}

pub fn walk_nodes<V: Visitor>(visitor: &mut V, nodes: &[Node]) {
    for node in nodes {
        visitor.visit_node(node);
    }
}

pub fn walk_node<V: Visitor>(visitor: &mut V, node: &Node) {
    match node {
        Node::Field(field) => visitor.visit_field(field),
        Node::Layout(layout) => visitor.visit_layout(layout),
    }
}

pub fn walk_layout<V: Visitor>(visitor: &mut V, layout: &LayoutContainer) {
    for child in &layout.children {
        visitor.visit_node(child);
    }
}

/// Collects every node id in pre-order
#[derive(Default)]
pub struct IdCollector {
    pub ids: Vec<String>,
}

impl Visitor for IdCollector {
    fn visit_node(&mut self, node: &Node) {
        self.ids.push(node.id().to_string());
        walk_node(self, node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id_generator::IdGenerator;
    use crate::node::{create_container, create_field, ContainerType, FieldType};

    struct FieldCounter {
        fields: usize,
        layouts: usize,
    }

    impl Visitor for FieldCounter {
        fn visit_field(&mut self, _field: &LeafField) {
            self.fields += 1;
        }

        fn visit_layout(&mut self, layout: &LayoutContainer) {
            self.layouts += 1;
            walk_layout(self, layout);
        }
    }

    #[test]
    fn test_visitor_reaches_nested_nodes() {
        let mut ids = IdGenerator::new("visitor");
        let mut row = create_container(ContainerType::Row, &mut ids);
        let mut column = create_container(ContainerType::Column, &mut ids);
        column
            .children
            .push(create_field(FieldType::Text, &mut ids).into());
        row.children.push(column.into());
        row.children
            .push(create_field(FieldType::Phone, &mut ids).into());

        let nodes = vec![
            create_field(FieldType::Heading, &mut ids).into(),
            Node::Layout(row),
        ];

        let mut counter = FieldCounter {
            fields: 0,
            layouts: 0,
        };
        counter.visit_nodes(&nodes);
        assert_eq!(counter.fields, 3);
        assert_eq!(counter.layouts, 2);

        let mut collector = IdCollector::default();
        collector.visit_nodes(&nodes);
        assert_eq!(collector.ids.len(), 5);
        assert_eq!(collector.ids[0], nodes[0].id());
    }
}
