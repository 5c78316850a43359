use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::word::CategoryId;

/// A boolean expression over named semantic categories, attached to a
/// noun-phrase slot of a verb frame.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum SelRestr {
    #[default]
    Empty,
    Singleton {
        name: String,
        positive: bool,
    },
    Group {
        or_logic: bool,
        children: Vec<SelRestr>,
    },
}

impl SelRestr {
    pub fn singleton(name: &str, positive: bool) -> Self {
        Self::Singleton {
            name: name.to_string(),
            positive,
        }
    }

    pub fn all(children: Vec<SelRestr>) -> Self {
        Self::Group {
            or_logic: false,
            children,
        }
    }

    pub fn any(children: Vec<SelRestr>) -> Self {
        Self::Group {
            or_logic: true,
            children,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Every category name mentioned anywhere in the tree.
    pub fn names(&self) -> Vec<&str> {
        match self {
            Self::Empty => Vec::new(),
            Self::Singleton { name, .. } => vec![name.as_str()],
            Self::Group { children, .. } => children.iter().flat_map(|c| c.names()).collect(),
        }
    }
}

/// Maps semantic category names to taxonomy anchors.
///
/// An entry satisfies a category when its hypernym closure contains any
/// of the category's anchors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTable {
    anchors: HashMap<String, Vec<CategoryId>>,
}

impl CategoryTable {
    pub fn new() -> Self {
        Self {
            anchors: HashMap::new(),
        }
    }

    pub fn insert(&mut self, name: &str, anchors: &[u64]) {
        self.anchors.insert(
            name.to_string(),
            anchors.iter().map(|id| CategoryId(*id)).collect(),
        );
    }

    pub fn anchors(&self, name: &str) -> Option<&[CategoryId]> {
        self.anchors.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.anchors.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.anchors.keys().map(String::as_str)
    }

    /// The VerbNet selectional-restriction vocabulary mapped onto WordNet.
    pub fn standard() -> Self {
        const ENTRIES: &[(&str, &[u64])] = &[
            ("concrete", &[100001930]),
            ("time", &[100028270]),
            ("state", &[100024720]),
            ("abstract", &[100002137]),
            ("scalar", &[103835412]),
            ("currency", &[105050379]),
            ("location", &[100027167]),
            ("organization", &[100237078]),
            ("int_control", &[100007347]),
            ("natural", &[100019128]),
            ("phys_obj", &[100002684]),
            ("solid", &[113860793]),
            ("shape", &[100027807]),
            ("substance", &[100019613]),
            ("idea", &[105803379]),
            ("sound", &[107111047]),
            ("communication", &[100033020]),
            ("region", &[105221895]),
            ("place", &[100586262]),
            ("machine", &[102958343]),
            ("animate", &[100004258]),
            ("plant", &[103956922]),
            ("comestible", &[100021265]),
            ("artifact", &[100021939]),
            ("vehicle", &[104524313]),
            ("human", &[100007846]),
            ("animal", &[100015388]),
            ("body_part", &[105220461]),
            ("garment", &[103051540]),
            ("tool", &[104451818]),
            ("concrete_inanimate", &[100021939, 100019128]),
            ("inanimate", &[100021939, 100019128]),
            ("non_region_location", &[102913152]),
            ("non_solid_food", &[107881800]),
            ("solid_food", &[107555863]),
            ("slinky", &[103670849]),
        ];

        let mut table = Self::new();
        for (name, anchors) in ENTRIES {
            table.insert(name, anchors);
        }
        table
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::standard()
    }
}
