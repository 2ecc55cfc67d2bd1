use std::fmt;

use serde::{Serialize, Serializer};

use crate::model::{Hierarchy, NodeKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

/// ColorBrewer "Set3", twelve pastel qualitative colors.
pub const SET3: [Color; 12] = [
    Color::rgb(0x8d, 0xd3, 0xc7),
    Color::rgb(0xff, 0xff, 0xb3),
    Color::rgb(0xbe, 0xba, 0xda),
    Color::rgb(0xfb, 0x80, 0x72),
    Color::rgb(0x80, 0xb1, 0xd3),
    Color::rgb(0xfd, 0xb4, 0x62),
    Color::rgb(0xb3, 0xde, 0x69),
    Color::rgb(0xfc, 0xcd, 0xe5),
    Color::rgb(0xd9, 0xd9, 0xd9),
    Color::rgb(0xbc, 0x80, 0xbd),
    Color::rgb(0xcc, 0xeb, 0xc5),
    Color::rgb(0xff, 0xed, 0x6f),
];

/// Ordinal mapping from category name to palette color.
///
/// Colors are handed out in the order categories are registered and wrap
/// around once the palette is exhausted. The map is frozen after construction.
#[derive(Clone, Debug)]
pub struct ColorMap {
    palette: Vec<Color>,
    domain: Vec<String>,
}

impl ColorMap {
    pub fn new<I, S>(palette: &[Color], categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = Self {
            palette: if palette.is_empty() { SET3.to_vec() } else { palette.to_vec() },
            domain: Vec::new(),
        };
        for c in categories {
            map.register(c.as_ref());
        }
        map
    }

    /// Top-level names first, then any leaf category missing from them in
    /// leaf order.
    pub fn from_hierarchy(palette: &[Color], tree: &Hierarchy) -> Self {
        let mut map = Self::new(palette, tree.categories());
        for id in tree.leaves() {
            let node = tree.node(id);
            if node.kind == NodeKind::Leaf {
                if let Some(category) = &node.category {
                    map.register(category);
                }
            }
        }
        map
    }

    fn register(&mut self, category: &str) {
        if !self.domain.iter().any(|c| c == category) {
            self.domain.push(category.to_string());
        }
    }

    pub fn get(&self, category: &str) -> Option<Color> {
        self.domain
            .iter()
            .position(|c| c == category)
            .map(|i| self.palette[i % self.palette.len()])
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }
}
