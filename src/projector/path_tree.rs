use crate::config::FieldPath;
use crate::value::Key;

/// `select`/`ignore` paths compiled into a tree of segments.
///
/// A node is `terminal` when some path ends exactly at it. A terminal node without
/// children names a whole subtree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathTree {
    terminal: bool,
    children: Vec<(Key, PathTree)>,
}

impl PathTree {
    pub fn from_paths<'a, I>(paths: I) -> Self
    where
        I: IntoIterator<Item = &'a FieldPath>,
    {
        let mut root = PathTree::default();
        for path in paths {
            root.insert(path.segments());
        }
        root
    }

    fn insert(&mut self, segments: &[Key]) {
        let Some((head, rest)) = segments.split_first() else {
            self.terminal = true;
            return;
        };

        let idx = match self.children.iter().position(|(key, _)| key == head) {
            Some(idx) => idx,
            None => {
                self.children.push((head.clone(), PathTree::default()));
                self.children.len() - 1
            }
        };
        self.children[idx].1.insert(rest);
    }

    pub fn child(&self, key: &Key) -> Option<&PathTree> {
        self.children
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, node)| node)
    }

    /// True when a path names `key` directly at this level
    pub fn names_exactly(&self, key: &Key) -> bool {
        self.child(key).is_some_and(|node| node.terminal)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
