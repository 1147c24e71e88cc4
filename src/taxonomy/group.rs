use serde::de::{Deserializer, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use std::marker::PhantomData;

/// A node in a nested vocabulary group.
///
/// Taxonomy authors group names purely for their own organisation, e.g.
/// constructors split into `ingredients` and `utensils`, or actions split by the
/// utensil they apply to. Group keys carry no meaning for highlighting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenGroup {
    /// A flat list of names.
    Leaf(Vec<String>),
    /// Named child groups, in document order.
    Group(Vec<(String, TokenGroup)>),
}

impl Default for TokenGroup {
    fn default() -> Self {
        TokenGroup::Group(Vec::new())
    }
}

impl TokenGroup {
    /// Collects every leaf name under this node, in traversal order.
    pub fn flatten(&self) -> Vec<String> {
        let mut names = Vec::new();
        collect_leaves(self, &mut names);
        names
    }

    /// Returns `true` if no leaf below this node holds a name.
    pub fn is_empty(&self) -> bool {
        match self {
            TokenGroup::Leaf(names) => names.is_empty(),
            TokenGroup::Group(children) => children.iter().all(|(_, child)| child.is_empty()),
        }
    }

    /// Counts the leaf names below this node without allocating.
    pub fn len(&self) -> usize {
        match self {
            TokenGroup::Leaf(names) => names.len(),
            TokenGroup::Group(children) => children.iter().map(|(_, child)| child.len()).sum(),
        }
    }
}

/// Flattens a nested group into the sequence of its leaf names.
///
/// Leaves are returned unchanged; groups are flattened recursively and their
/// results concatenated in document order. Keys are discarded.
pub fn flatten(node: &TokenGroup) -> Vec<String> {
    node.flatten()
}

fn collect_leaves(node: &TokenGroup, out: &mut Vec<String>) {
    match node {
        TokenGroup::Leaf(names) => out.extend(names.iter().cloned()),
        TokenGroup::Group(children) => {
            for (_, child) in children {
                collect_leaves(child, out);
            }
        }
    }
}

impl<'de> Deserialize<'de> for TokenGroup {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TokenGroupVisitor)
    }
}

struct TokenGroupVisitor;

impl<'de> Visitor<'de> for TokenGroupVisitor {
    type Value = TokenGroup;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a list of names or a map of nested groups")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut names = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(name) = seq.next_element::<String>()? {
            names.push(name);
        }
        Ok(TokenGroup::Leaf(names))
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        OrderedEntriesVisitor::<TokenGroup>(PhantomData)
            .visit_map(map)
            .map(TokenGroup::Group)
    }
}

/// Deserializes a JSON object into `(key, value)` pairs, keeping document order.
pub(crate) fn ordered_entries<'de, D, V>(deserializer: D) -> Result<Vec<(String, V)>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    deserializer.deserialize_map(OrderedEntriesVisitor(PhantomData))
}

struct OrderedEntriesVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedEntriesVisitor<V> {
    type Value = Vec<(String, V)>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of named categories")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, V>()? {
            entries.push((key, value));
        }
        Ok(entries)
    }
}
