//! html5ever serialization for ArenaDom.

use std::io;

use html5ever::serialize::{Serialize, Serializer, TraversalScope};

use super::arena::{ArenaDom, ArenaNodeData, ArenaNodeId};

/// A node of an [`ArenaDom`] that html5ever can serialize.
pub struct SerializableNode<'a> {
    pub dom: &'a ArenaDom,
    pub id: ArenaNodeId,
}

impl<'a> SerializableNode<'a> {
    pub fn new(dom: &'a ArenaDom, id: ArenaNodeId) -> Self {
        Self { dom, id }
    }

    fn write_children<S: Serializer>(&self, serializer: &mut S, id: ArenaNodeId) -> io::Result<()> {
        for child in self.dom.children(id) {
            self.write_node(serializer, child)?;
        }
        Ok(())
    }

    fn write_node<S: Serializer>(&self, serializer: &mut S, id: ArenaNodeId) -> io::Result<()> {
        let Some(node) = self.dom.get(id) else {
            return Ok(());
        };

        match &node.data {
            ArenaNodeData::Document => self.write_children(serializer, id),
            ArenaNodeData::Element { name, attrs, .. } => {
                serializer.start_elem(
                    name.clone(),
                    attrs.iter().map(|a| (&a.name, a.value.as_str())),
                )?;
                self.write_children(serializer, id)?;
                serializer.end_elem(name.clone())
            }
            ArenaNodeData::Text(text) => serializer.write_text(text),
            ArenaNodeData::Comment(text) => serializer.write_comment(text),
            ArenaNodeData::Doctype { name } => serializer.write_doctype(name),
        }
    }
}

impl Serialize for SerializableNode<'_> {
    fn serialize<S: Serializer>(
        &self,
        serializer: &mut S,
        traversal_scope: TraversalScope,
    ) -> io::Result<()> {
        match traversal_scope {
            TraversalScope::IncludeNode => self.write_node(serializer, self.id),
            TraversalScope::ChildrenOnly(_) => self.write_children(serializer, self.id),
        }
    }
}
