//! DOM Tree (arena-based allocation)

use crate::{DOMTokenList, DomError, ElementData, InlineStyle, Node, NodeData, NodeId};

/// Arena-based DOM tree
///
/// Slot 0 is always the document node. Removed nodes are unlinked but keep
/// their slot, so a stale `NodeId` never aliases a different node.
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self { nodes: vec![Node::document()] }
    }

    /// Document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes in the arena (including unlinked ones)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the document node is never removed
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::element(tag))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(Node::text(text))
    }

    /// Append `child` as the last child of `parent`, detaching it first.
    /// Ignored when `child` is `parent` or one of its ancestors.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.get(parent).is_none() || self.get(child).is_none() {
            return;
        }
        if self.contains(child, parent) {
            tracing::debug!("refusing to append {} under its own descendant {}", child, parent);
            return;
        }
        self.detach(child);

        let last = self.nodes[parent.index()].last_child;
        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = last;
            node.next_sibling = NodeId::NONE;
        }
        if last.is_valid() {
            self.nodes[last.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        self.nodes[parent.index()].last_child = child;
    }

    /// Unlink a node from its parent and siblings
    pub fn detach(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else { return };
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);
        if !parent.is_valid() {
            return;
        }

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else {
            self.nodes[parent.index()].last_child = prev;
        }

        let node = &mut self.nodes[id.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    /// Unlink every child of `id`
    pub fn remove_children(&mut self, id: NodeId) {
        let children: Vec<NodeId> = self.children(id).collect();
        for child in children {
            self.detach(child);
        }
    }

    /// Parent of a node, if attached
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|n| n.parent).filter(|p| p.is_valid())
    }

    /// Iterate direct children
    pub fn children(&self, id: NodeId) -> Children<'_> {
        let next = self.get(id).map_or(NodeId::NONE, |n| n.first_child);
        Children { tree: self, next }
    }

    /// Iterate ancestors, nearest first
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), |&p| self.parent(p))
    }

    /// All descendants of `id` in document (pre-)order, excluding `id`
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).collect();
        stack.reverse();
        while let Some(node) = stack.pop() {
            out.push(node);
            let start = stack.len();
            stack.extend(self.children(node));
            stack[start..].reverse();
        }
        out
    }

    /// Inclusive descendant check
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        node == ancestor || self.ancestors(node).any(|a| a == ancestor)
    }

    /// Element data, or an error for text/document/unknown nodes
    pub fn element(&self, id: NodeId) -> Result<&ElementData, DomError> {
        self.get(id)
            .ok_or(DomError::UnknownNode(id))?
            .as_element()
            .ok_or(DomError::NotAnElement(id))
    }

    /// Mutable element data
    pub fn element_mut(&mut self, id: NodeId) -> Result<&mut ElementData, DomError> {
        self.get_mut(id)
            .ok_or(DomError::UnknownNode(id))?
            .as_element_mut()
            .ok_or(DomError::NotAnElement(id))
    }

    /// Lowercase tag name
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).ok().map(|e| e.tag.as_str())
    }

    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).ok()?.get_attr(name)
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        self.element_mut(id)?.set_attr(name, value);
        Ok(())
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<Option<String>, DomError> {
        Ok(self.element_mut(id)?.remove_attr(name))
    }

    /// `data-*` value by camelCase key
    pub fn data(&self, id: NodeId, key: &str) -> Option<&str> {
        self.element(id).ok()?.data(key)
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_ok_and(|e| e.class_list.contains(class))
    }

    pub fn class_list_mut(&mut self, id: NodeId) -> Result<&mut DOMTokenList, DomError> {
        Ok(&mut self.element_mut(id)?.class_list)
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(text) = self.get(id).and_then(Node::as_text) {
            return text.to_string();
        }
        self.descendants(id)
            .into_iter()
            .filter_map(|d| self.get(d).and_then(Node::as_text))
            .collect()
    }

    /// Replace all children with a single text node.
    ///
    /// A lone text child is rewritten in place, so repeated updates of the
    /// same label do not grow the arena.
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> Result<(), DomError> {
        self.element(id)?;
        let node = &self.nodes[id.index()];
        let (first, last) = (node.first_child, node.last_child);
        if !text.is_empty() && first.is_valid() && first == last {
            if let NodeData::Text(current) = &mut self.nodes[first.index()].data {
                current.clear();
                current.push_str(text);
                return Ok(());
            }
        }
        self.remove_children(id);
        if !text.is_empty() {
            let node = self.create_text(text);
            self.append_child(id, node);
        }
        Ok(())
    }

    /// Parsed `style` attribute
    pub fn style(&self, id: NodeId) -> InlineStyle {
        self.get_attribute(id, "style")
            .map(InlineStyle::parse)
            .unwrap_or_default()
    }

    /// Set one inline style property; empty value clears it
    pub fn set_style_property(
        &mut self,
        id: NodeId,
        prop: &str,
        value: &str,
    ) -> Result<(), DomError> {
        let mut style = self.style(id);
        style.set(prop, value);
        if style.is_empty() {
            self.remove_attribute(id, "style")?;
        } else {
            self.set_attribute(id, "style", &style.to_string())?;
        }
        Ok(())
    }

    pub fn is_disabled(&self, id: NodeId) -> bool {
        self.element(id).is_ok_and(|e| e.has_attr("disabled"))
    }

    /// Toggle the `disabled` boolean attribute
    pub fn set_disabled(&mut self, id: NodeId, disabled: bool) -> Result<(), DomError> {
        let elem = self.element_mut(id)?;
        if disabled {
            elem.set_attr("disabled", "");
        } else {
            elem.remove_attr("disabled");
        }
        Ok(())
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Child iterator
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if !self.next.is_valid() {
            return None;
        }
        let current = self.next;
        self.next = self.tree.get(current).map_or(NodeId::NONE, |n| n.next_sibling);
        Some(current)
    }
}
