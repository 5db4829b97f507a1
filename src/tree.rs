//! Arena DOM Tree
//!
//! The extraction passes detach, unwrap and move subtrees between parents.
//! Nodes live in a `Vec` and refer to each other through [`NodeId`] indices,
//! so moving a subtree is a matter of rewriting two index lists.
//!
//! Parsing is delegated to `dom_query` (html5ever); its output is copied into
//! the arena once. Serialization back to markup is a plain tree walk.

use dom_query::{Document, NodeRef};

use crate::error::{Error, Result};
use crate::tags;

/// Identity of a node inside a [`Tree`].
///
/// Two structurally identical elements have distinct ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena. Creation order, which for parsed
    /// nodes is document order.
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Tag name and ordered attributes of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// Lowercase tag name.
    pub name: String,
    /// Attributes in source order.
    pub attrs: Vec<(String, String)>,
}

/// Payload of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    /// The document root. Exactly one per tree, at index 0.
    Document,
    /// An element.
    Element(ElementData),
    /// A text run.
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: NodeData,
}

/// Ordered, mutable n-ary tree of elements and text runs.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// Create an empty tree holding only the document root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                data: NodeData::Document,
            }],
        }
    }

    /// Parse markup into a tree.
    ///
    /// Comments, doctypes and processing instructions are not carried over.
    pub fn parse(html: &str) -> Result<Self> {
        let document = Document::from(html);
        let html_sel = document.select("html");
        let Some(html_node) = html_sel.nodes().first().copied() else {
            return Err(Error::Parse("parser produced no <html> element".to_string()));
        };

        let mut tree = Self::new();
        let root = tree.root();
        tree.import(root, html_node);
        Ok(tree)
    }

    /// Copy a `dom_query` subtree under `parent`.
    ///
    /// Iterative so that pathologically nested pages cannot overflow the stack.
    fn import(&mut self, parent: NodeId, node: NodeRef<'_>) {
        let mut stack = vec![(parent, node)];
        while let Some((parent, node)) = stack.pop() {
            if node.is_element() {
                let name = node
                    .node_name()
                    .map(|n| n.to_ascii_lowercase())
                    .unwrap_or_default();
                let attrs = node
                    .attrs()
                    .iter()
                    .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                    .collect();
                let id = self.push(NodeData::Element(ElementData { name, attrs }));
                self.append_child(parent, id);
                for child in node.children().into_iter().rev() {
                    stack.push((id, child));
                }
            } else if node.is_text() {
                let text = node.text();
                if !text.is_empty() {
                    let id = self.push(NodeData::Text(text.to_string()));
                    self.append_child(parent, id);
                }
            }
        }
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            data,
        });
        id
    }

    // === Node Creation ===

    /// The document root.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Create a detached element.
    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.push(NodeData::Element(ElementData {
            name: name.to_ascii_lowercase(),
            attrs: Vec::new(),
        }))
    }

    /// Create a detached text run.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Text(text.to_string()))
    }

    // === Node Information ===

    /// Payload of a node.
    #[inline]
    #[must_use]
    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0].data
    }

    /// Lowercase tag name, `None` for text runs and the document root.
    #[must_use]
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].data {
            NodeData::Element(el) => Some(el.name.as_str()),
            _ => None,
        }
    }

    /// Check if the node is an element.
    #[inline]
    #[must_use]
    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.nodes[id.0].data, NodeData::Element(_))
    }

    /// Check if the node is an element with the given tag.
    #[inline]
    #[must_use]
    pub fn is_tag(&self, id: NodeId, name: &str) -> bool {
        self.tag_name(id) == Some(name)
    }

    /// Text of a text run, `None` for other nodes.
    #[must_use]
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].data {
            NodeData::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Replace the text of a text run. No-op on other nodes.
    pub fn set_text(&mut self, id: NodeId, value: String) {
        if let NodeData::Text(text) = &mut self.nodes[id.0].data {
            *text = value;
        }
    }

    /// Rename an element.
    pub fn rename(&mut self, id: NodeId, name: &str) {
        if let NodeData::Element(el) = &mut self.nodes[id.0].data {
            el.name = name.to_ascii_lowercase();
        }
    }

    // === Attributes ===

    /// All attributes of an element (empty for other nodes).
    #[must_use]
    pub fn attrs(&self, id: NodeId) -> &[(String, String)] {
        match &self.nodes[id.0].data {
            NodeData::Element(el) => &el.attrs,
            _ => &[],
        }
    }

    /// Get an attribute value.
    #[must_use]
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.attrs(id)
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, keeping its position when it already exists.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let NodeData::Element(el) = &mut self.nodes[id.0].data {
            if let Some(slot) = el.attrs.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
                slot.1 = value.to_string();
            } else {
                el.attrs.push((name.to_string(), value.to_string()));
            }
        }
    }

    /// Remove an attribute.
    pub fn remove_attr(&mut self, id: NodeId, name: &str) {
        self.retain_attrs(id, |k, _| !k.eq_ignore_ascii_case(name));
    }

    /// Keep only the attributes for which `keep` returns true.
    pub fn retain_attrs<F>(&mut self, id: NodeId, mut keep: F)
    where
        F: FnMut(&str, &str) -> bool,
    {
        if let NodeData::Element(el) = &mut self.nodes[id.0].data {
            el.attrs.retain(|(k, v)| keep(k, v));
        }
    }

    /// `class` and `id` joined by a space, the string keyword patterns run against.
    #[must_use]
    pub fn class_and_id(&self, id: NodeId) -> String {
        let class = self.attr(id, "class").unwrap_or_default();
        let ident = self.attr(id, "id").unwrap_or_default();
        format!("{class} {ident}").trim().to_string()
    }

    // === Navigation ===

    /// Parent of a node, `None` for the root and detached subtrees.
    #[inline]
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Children in order.
    #[inline]
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Element children in order, skipping text runs.
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes[id.0]
            .children
            .iter()
            .copied()
            .filter(|c| self.is_element(*c))
    }

    /// Ancestors from the parent upwards.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), |n| self.parent(*n))
    }

    /// Number of ancestors.
    #[must_use]
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).count()
    }

    /// Check if `node` sits inside the subtree rooted at `ancestor` (or is it).
    #[must_use]
    pub fn is_inclusive_descendant(&self, node: NodeId, ancestor: NodeId) -> bool {
        node == ancestor || self.ancestors(node).any(|a| a == ancestor)
    }

    /// Following element sibling.
    #[must_use]
    pub fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let siblings = self.children(parent);
        let pos = siblings.iter().position(|c| *c == id)?;
        siblings[pos + 1..].iter().copied().find(|c| self.is_element(*c))
    }

    /// Preceding element sibling.
    #[must_use]
    pub fn prev_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let siblings = self.children(parent);
        let pos = siblings.iter().position(|c| *c == id)?;
        siblings[..pos].iter().rev().copied().find(|c| self.is_element(*c))
    }

    /// Snapshot of the subtree in pre-order (document order), `id` first.
    ///
    /// A `Vec` rather than a lazy iterator so callers may mutate while walking.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.children(n).iter().rev().copied());
        }
        out
    }

    /// Snapshot of the element subtree in post-order (children before parents).
    #[must_use]
    pub fn post_order_elements(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![(id, false)];
        while let Some((n, expanded)) = stack.pop() {
            if !self.is_element(n) {
                continue;
            }
            if expanded {
                out.push(n);
            } else {
                stack.push((n, true));
                for child in self.children(n).iter().rev() {
                    stack.push((*child, false));
                }
            }
        }
        out
    }

    /// Elements below `id` (excluding it) whose tag is in `names`, document order.
    #[must_use]
    pub fn select(&self, id: NodeId, names: &[&str]) -> Vec<NodeId> {
        self.descendants(id)
            .into_iter()
            .skip(1)
            .filter(|n| self.tag_name(*n).is_some_and(|t| names.contains(&t)))
            .collect()
    }

    /// First element below `id` (excluding it) with the given tag.
    #[must_use]
    pub fn find_first(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.descendants(id)
            .into_iter()
            .skip(1)
            .find(|n| self.is_tag(*n, name))
    }

    /// Count elements below `id` with the given tag.
    #[must_use]
    pub fn count_tag(&self, id: NodeId, name: &str) -> usize {
        self.descendants(id)
            .into_iter()
            .skip(1)
            .filter(|n| self.is_tag(*n, name))
            .count()
    }

    // === Mutation ===

    /// Unlink a node (and its subtree) from its parent.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != id);
        }
    }

    /// Move `child` to the end of `parent`'s children.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(
            !self.is_inclusive_descendant(parent, child),
            "appending a node into its own subtree"
        );
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Move `node` right before `reference` under the same parent.
    pub fn insert_before(&mut self, reference: NodeId, node: NodeId) {
        let Some(parent) = self.parent(reference) else {
            return;
        };
        self.detach(node);
        let pos = self.nodes[parent.0]
            .children
            .iter()
            .position(|c| *c == reference)
            .unwrap_or(0);
        self.nodes[parent.0].children.insert(pos, node);
        self.nodes[node.0].parent = Some(parent);
    }

    /// Replace an element by its children, in place.
    pub fn unwrap(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        let children = std::mem::take(&mut self.nodes[id.0].children);
        let Some(pos) = self.nodes[parent.0].children.iter().position(|c| *c == id) else {
            return;
        };
        for child in &children {
            self.nodes[child.0].parent = Some(parent);
        }
        self.nodes[parent.0].children.splice(pos..=pos, children);
        self.nodes[id.0].parent = None;
    }

    // === Text Content ===

    /// Concatenated text of all text runs in the subtree.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        for n in self.descendants(id) {
            if let Some(text) = self.text(n) {
                out.push_str(text);
            }
        }
        out
    }

    /// Text content with whitespace collapsed and trimmed.
    #[must_use]
    pub fn inner_text(&self, id: NodeId) -> String {
        normalize_spaces(&self.text_content(id))
    }

    /// Plain text with one line per block element and `<br>`.
    #[must_use]
    pub fn block_text(&self, id: NodeId) -> String {
        let mut raw = String::new();
        let mut stack = vec![(id, false)];
        while let Some((n, closing)) = stack.pop() {
            match &self.nodes[n.0].data {
                NodeData::Text(text) => raw.push_str(text),
                NodeData::Element(el) => {
                    if el.name == "br" || !tags::is_inline(&el.name) {
                        raw.push('\n');
                    }
                    if !closing {
                        stack.push((n, true));
                        stack.extend(self.children(n).iter().rev().map(|c| (*c, false)));
                    }
                }
                NodeData::Document => {
                    stack.extend(self.children(n).iter().rev().map(|c| (*c, false)));
                }
            }
        }
        raw.lines()
            .map(normalize_spaces)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Character count of [`Tree::inner_text`].
    #[must_use]
    pub fn text_len(&self, id: NodeId) -> usize {
        self.inner_text(id).chars().count()
    }

    /// Text that belongs to this element rather than to a block-level child:
    /// its own text runs plus everything inside phrasing children.
    #[must_use]
    pub fn direct_text(&self, id: NodeId) -> String {
        let mut out = String::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(n) = stack.pop() {
            match &self.nodes[n.0].data {
                NodeData::Text(text) => out.push_str(text),
                NodeData::Element(el) if tags::is_inline(&el.name) => {
                    stack.extend(self.children(n).iter().rev().copied());
                }
                _ => {}
            }
        }
        normalize_spaces(&out)
    }

    /// Check for embedded media at or below `id`.
    #[must_use]
    pub fn has_media(&self, id: NodeId) -> bool {
        self.descendants(id)
            .into_iter()
            .any(|n| self.tag_name(n).is_some_and(tags::is_media))
    }

    // === Serialization ===

    /// Markup of the node including its own tag.
    #[must_use]
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, &mut out);
        out
    }

    /// Markup of the node's children.
    #[must_use]
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(id) {
            self.write_node(*child, &mut out);
        }
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        // (node, closing) pairs; closing entries emit the end tag
        let mut stack = vec![(id, false)];
        while let Some((n, closing)) = stack.pop() {
            match &self.nodes[n.0].data {
                NodeData::Document => {
                    for child in self.children(n).iter().rev() {
                        stack.push((*child, false));
                    }
                }
                NodeData::Text(text) => escape_text(text, out),
                NodeData::Element(el) if closing => {
                    out.push_str("</");
                    out.push_str(&el.name);
                    out.push('>');
                }
                NodeData::Element(el) => {
                    out.push('<');
                    out.push_str(&el.name);
                    for (k, v) in &el.attrs {
                        out.push(' ');
                        out.push_str(k);
                        out.push_str("=\"");
                        escape_attr(v, out);
                        out.push('"');
                    }
                    out.push('>');
                    if !tags::is_void(&el.name) {
                        stack.push((n, true));
                        for child in self.children(n).iter().rev() {
                            stack.push((*child, false));
                        }
                    }
                }
            }
        }
    }
}

/// Collapse whitespace runs to single spaces and trim.
#[must_use]
pub fn normalize_spaces(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}

fn escape_attr(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}
