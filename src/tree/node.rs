use std::fmt::{self, Display};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::tree::TreeStyle;

/// A vertex of the rendered tree.
///
/// Children are appended under a per-node lock, so tasks expanding different
/// directories never contend with each other. A node is a leaf when it has no
/// children and a branch otherwise; there is no separate type for either.
#[derive(Debug)]
pub struct Node {
    value: String,
    meta: Option<String>,
    children: Mutex<Vec<Arc<Node>>>,
    parent: Mutex<Weak<Node>>,
}

impl Node {
    /// Creates a parentless node.
    pub fn root(value: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::detached(None, value.into()))
    }

    /// Creates a parentless node rendered as `[meta]  value`.
    pub fn annotated_root(meta: impl Display, value: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::detached(Some(meta.to_string()), value.into()))
    }

    fn detached(meta: Option<String>, value: String) -> Self {
        Self {
            value,
            meta,
            children: Mutex::new(Vec::new()),
            parent: Mutex::new(Weak::new()),
        }
    }

    /// Appends a leaf and returns `self` so calls can be chained.
    pub fn add_leaf(self: &Arc<Self>, value: impl Into<String>) -> &Arc<Self> {
        self.attach(None, value.into());
        self
    }

    pub fn add_annotated_leaf(
        self: &Arc<Self>,
        meta: impl Display,
        value: impl Into<String>,
    ) -> &Arc<Self> {
        self.attach(Some(meta.to_string()), value.into());
        self
    }

    /// Appends a child and returns it, so the caller can keep growing it.
    pub fn add_branch(self: &Arc<Self>, value: impl Into<String>) -> Arc<Self> {
        self.attach(None, value.into())
    }

    pub fn add_annotated_branch(
        self: &Arc<Self>,
        meta: impl Display,
        value: impl Into<String>,
    ) -> Arc<Self> {
        self.attach(Some(meta.to_string()), value.into())
    }

    fn attach(self: &Arc<Self>, meta: Option<String>, value: String) -> Arc<Self> {
        let child = Arc::new(Self {
            value,
            meta,
            children: Mutex::new(Vec::new()),
            parent: Mutex::new(Arc::downgrade(self)),
        });
        lock(&self.children).push(Arc::clone(&child));
        child
    }

    /// Forgets the parent so this subtree renders as an independent root.
    ///
    /// The parent still lists this node among its children.
    pub fn detach(&self) -> &Self {
        *lock(&self.parent) = Weak::new();
        self
    }

    pub fn is_root(&self) -> bool {
        lock(&self.parent).upgrade().is_none()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn meta(&self) -> Option<&str> {
        self.meta.as_deref()
    }

    /// Snapshot of the current children.
    pub fn children(&self) -> Vec<Arc<Node>> {
        lock(&self.children).clone()
    }

    pub fn is_leaf(&self) -> bool {
        lock(&self.children).is_empty()
    }

    /// Renders with the default unicode glyphs.
    pub fn render(&self) -> String {
        self.render_with(&TreeStyle::default())
    }

    /// Renders this node and everything below it, depth-first.
    ///
    /// Must only be called once every task that can append to this subtree has
    /// been joined. A node that still has a parent is drawn as the last child
    /// of an invisible root.
    pub fn render_with(&self, style: &TreeStyle) -> String {
        let mut out = String::new();
        let mut ended = Vec::new();
        if self.is_root() {
            self.write_label(&mut out);
            out.push('\n');
            self.write_children(&mut out, style, &mut ended);
        } else {
            self.write_line(&mut out, style, &mut ended, true);
        }
        out
    }

    fn write_children(&self, out: &mut String, style: &TreeStyle, ended: &mut Vec<bool>) {
        let children = self.children();
        let count = children.len();
        for (index, child) in children.iter().enumerate() {
            child.write_line(out, style, ended, index + 1 == count);
        }
    }

    fn write_line(&self, out: &mut String, style: &TreeStyle, ended: &mut Vec<bool>, last: bool) {
        for closed in ended.iter() {
            out.push_str(if *closed { &style.blank } else { &style.link });
        }
        out.push_str(if last { &style.end } else { &style.mid });
        out.push(' ');
        self.write_label(out);
        out.push('\n');

        ended.push(last);
        self.write_children(out, style, ended);
        ended.pop();
    }

    fn write_label(&self, out: &mut String) {
        if let Some(meta) = self.meta() {
            out.push('[');
            out.push_str(meta);
            out.push_str("]  ");
        }
        out.push_str(&self.value);
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

// A panicking writer can only have failed before or after a `push`, so the
// guarded data is still consistent.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn sample() -> Arc<Node> {
        let root = Node::root("root");
        root.add_leaf("a.txt");
        let b = root.add_branch("b");
        b.add_leaf("c.txt").add_leaf("d.txt");
        let e = b.add_branch("e");
        e.add_leaf("f.txt");
        root.add_leaf("g.txt");
        root
    }

    #[test]
    fn renders_bare_root() {
        assert_eq!(Node::root(".").render(), ".\n");
    }

    #[test]
    fn renders_nested_tree_with_unicode_glyphs() {
        let expected = "\
root
├── a.txt
├── b
│   ├── c.txt
│   ├── d.txt
│   └── e
│       └── f.txt
└── g.txt
";
        assert_eq!(sample().render(), expected);
    }

    #[test]
    fn closed_ancestor_columns_are_blank() {
        let root = Node::root("root");
        let a = root.add_branch("a");
        let b = a.add_branch("b");
        b.add_leaf("c");
        let expected = "\
root
└── a
    └── b
        └── c
";
        assert_eq!(root.render(), expected);
    }

    #[test]
    fn renders_annotations_in_brackets() {
        let root = Node::annotated_root("drwx", "root");
        root.add_annotated_leaf(42, "file");
        root.add_annotated_branch("dir", "sub").add_leaf("inner");
        let expected = "\
[drwx]  root
├── [42]  file
└── [dir]  sub
    └── inner
";
        assert_eq!(root.render(), expected);
    }

    #[test]
    fn renders_with_ascii_style() {
        let root = Node::root("root");
        root.add_branch("b").add_leaf("c");
        root.add_leaf("d");
        let expected = "\
root
|-- b
|   `-- c
`-- d
";
        assert_eq!(root.render_with(&TreeStyle::ascii()), expected);
    }

    #[test]
    fn add_leaf_chains_on_the_same_node() {
        let root = Node::root("root");
        root.add_leaf("x").add_leaf("y").add_leaf("z");
        let values: Vec<_> = root
            .children()
            .iter()
            .map(|child| child.value().to_string())
            .collect();
        assert_eq!(values, ["x", "y", "z"]);
        assert!(root.children().iter().all(|child| child.is_leaf()));
    }

    #[test]
    fn attached_subtree_renders_with_an_edge() {
        let root = Node::root("root");
        let sub = root.add_branch("sub");
        sub.add_leaf("leaf");
        assert!(!sub.is_root());
        assert_eq!(sub.render(), "└── sub\n    └── leaf\n");
    }

    #[test]
    fn detach_makes_a_subtree_a_root() {
        let root = Node::root("root");
        let sub = root.add_branch("sub");
        sub.add_leaf("leaf");

        assert!(sub.detach().is_root());
        assert_eq!(sub.render(), "sub\n└── leaf\n");
        assert_eq!(root.children().len(), 1);
    }

    #[test]
    fn root_has_no_parent() {
        let root = Node::root("root");
        assert!(root.is_root());
        assert!(root.is_leaf());
        assert_eq!(root.meta(), None);
    }

    #[test]
    fn concurrent_appends_are_not_lost() {
        let root = Node::root("root");
        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let root = Arc::clone(&root);
                thread::spawn(move || {
                    for item in 0..100 {
                        root.add_leaf(format!("{worker}-{item}"));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("worker panicked");
        }

        let mut values: Vec<_> = root
            .children()
            .iter()
            .map(|child| child.value().to_string())
            .collect();
        assert_eq!(values.len(), 800);
        values.sort();
        values.dedup();
        assert_eq!(values.len(), 800);
    }
}
