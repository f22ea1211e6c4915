//! Page tree construction and attribute inheritance.
//!
//! Pages form a rooted, ordered tree below the document's pages-root
//! object. Nodes own their children; the parent link is an arena index
//! used only for attribute lookups, so tearing down a subtree never
//! touches its ancestors.

use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::fonts::FontId;
use crate::image::ImageId;
use crate::object::ObjectRef;
use crate::writer::content_stream::ContentStreamBuilder;

/// Index of a page node in the document's page tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(pub(crate) usize);

/// Inheritable page attributes.
///
/// An attribute left unset on a node is resolved by walking parent links
/// upward at serialization time; nothing is copied at page creation.
#[derive(Debug, Clone, Default)]
pub struct PageAttributes {
    /// Page boundaries in default user space ([llx lly urx ury])
    pub media_box: Option<[f64; 4]>,
    /// Visible region clip ([llx lly urx ury])
    pub crop_box: Option<[f64; 4]>,
    /// Display rotation, a multiple of 90 degrees
    pub rotate: Option<i32>,
}

impl PageAttributes {
    /// Create an empty attribute set (everything inherited).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the media box.
    pub fn with_media_box(mut self, llx: f64, lly: f64, urx: f64, ury: f64) -> Self {
        self.media_box = Some([llx, lly, urx, ury]);
        self
    }

    /// Set the crop box.
    pub fn with_crop_box(mut self, llx: f64, lly: f64, urx: f64, ury: f64) -> Self {
        self.crop_box = Some([llx, lly, urx, ury]);
        self
    }

    /// Set the display rotation. Rejects values that are not multiples of 90.
    pub fn with_rotate(mut self, degrees: i32) -> Result<Self> {
        if degrees % 90 != 0 {
            return Err(Error::InvalidConfigValue {
                key: "Rotate",
                value: degrees.to_string(),
            });
        }
        self.rotate = Some(degrees.rem_euclid(360));
        Ok(self)
    }

    /// US Letter media box (8.5" x 11").
    pub fn letter() -> Self {
        Self::new().with_media_box(0.0, 0.0, 612.0, 792.0)
    }

    /// A4 media box (210mm x 297mm).
    pub fn a4() -> Self {
        Self::new().with_media_box(0.0, 0.0, 595.0, 842.0)
    }
}

/// Fonts and images actually referenced by one page's content stream.
///
/// Populated as a side effect of the text and image operations; consumed
/// when the page's resource dictionary is built.
#[derive(Debug, Clone, Default)]
pub struct ResourceBinder {
    fonts: BTreeSet<FontId>,
    images: BTreeSet<ImageId>,
}

impl ResourceBinder {
    /// Record a font reference.
    pub fn use_font(&mut self, font: FontId) {
        self.fonts.insert(font);
    }

    /// Record an image reference.
    pub fn use_image(&mut self, image: ImageId) {
        self.images.insert(image);
    }

    /// Fonts referenced by this page, in id order.
    pub fn fonts(&self) -> impl Iterator<Item = FontId> + '_ {
        self.fonts.iter().copied()
    }

    /// Images referenced by this page, in id order.
    pub fn images(&self) -> impl Iterator<Item = ImageId> + '_ {
        self.images.iter().copied()
    }

    /// Whether any image is referenced.
    pub fn has_images(&self) -> bool {
        !self.images.is_empty()
    }
}

/// Cursor state carried between `printnl` calls on one page.
#[derive(Debug, Clone, Default)]
pub(crate) struct PrintCursor {
    pub(crate) font: Option<FontId>,
    pub(crate) size: Option<f64>,
    pub(crate) x: Option<f64>,
    pub(crate) y: Option<f64>,
}

/// One node of the page tree.
#[derive(Debug)]
pub(crate) struct PageNode {
    /// Indirect object number of the page itself
    pub(crate) object: ObjectRef,
    /// Indirect object number of the page's content stream
    pub(crate) contents: ObjectRef,
    /// Lookup-only back-reference; never implies ownership
    pub(crate) parent: Option<PageId>,
    /// Owned children, in creation order
    pub(crate) children: Vec<PageId>,
    /// Attributes set directly on this node
    pub(crate) attrs: PageAttributes,
    /// Accumulated drawing operators
    pub(crate) content: ContentStreamBuilder,
    /// Fonts/images referenced by this page
    pub(crate) resources: ResourceBinder,
    /// printnl cursor
    pub(crate) cursor: PrintCursor,
}

/// The page tree: an arena of nodes hanging off the pages-root object.
#[derive(Debug, Default)]
pub struct PageTree {
    nodes: Vec<PageNode>,
    /// Children of the pages-root, in creation order
    top: Vec<PageId>,
}

impl PageTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Id the next inserted node will receive.
    pub(crate) fn next_id(&self) -> PageId {
        PageId(self.nodes.len())
    }

    /// Insert a node under `parent` (or under the pages-root when `None`).
    ///
    /// Attributes are stored as given; nothing is copied from the parent.
    pub(crate) fn insert(
        &mut self,
        parent: Option<PageId>,
        attrs: PageAttributes,
        object: ObjectRef,
        contents: ObjectRef,
    ) -> PageId {
        let id = PageId(self.nodes.len());
        self.nodes.push(PageNode {
            object,
            contents,
            parent,
            children: Vec::new(),
            attrs,
            content: ContentStreamBuilder::new(),
            resources: ResourceBinder::default(),
            cursor: PrintCursor::default(),
        });
        match parent {
            Some(p) => self.nodes[p.0].children.push(id),
            None => self.top.push(id),
        }
        id
    }

    pub(crate) fn node(&self, id: PageId) -> &PageNode {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: PageId) -> &mut PageNode {
        &mut self.nodes[id.0]
    }

    /// Ids of all nodes, in creation order.
    pub(crate) fn ids(&self) -> impl Iterator<Item = PageId> {
        (0..self.nodes.len()).map(PageId)
    }

    /// Immediate children of the pages-root.
    pub fn top_level(&self) -> &[PageId] {
        &self.top
    }

    /// Number of leaf pages at or below `id`.
    ///
    /// A node with no children counts as one leaf; a node with children
    /// contributes only the sum over its children, never one for itself.
    pub fn count(&self, id: PageId) -> usize {
        let node = &self.nodes[id.0];
        if node.children.is_empty() {
            1
        } else {
            node.children.iter().map(|&c| self.count(c)).sum()
        }
    }

    /// Number of leaf pages in the whole tree.
    pub fn total_count(&self) -> usize {
        self.top.iter().map(|&c| self.count(c)).sum()
    }

    /// Ordered ids of the immediate children of `id`.
    pub fn kids(&self, id: PageId) -> Vec<PageId> {
        self.nodes[id.0].children.clone()
    }

    /// Pre-order traversal of the descendants of `id`, excluding `id` itself.
    pub fn list(&self, id: PageId) -> Vec<PageId> {
        let mut out = Vec::new();
        for &child in &self.nodes[id.0].children {
            out.push(child);
            out.extend(self.list(child));
        }
        out
    }

    /// Resolve an attribute on `id` by walking the parent chain.
    fn resolve<T>(&self, id: PageId, get: impl Fn(&PageAttributes) -> Option<T>) -> Option<T> {
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = &self.nodes[node_id.0];
            if let Some(value) = get(&node.attrs) {
                return Some(value);
            }
            current = node.parent;
        }
        None
    }

    /// Media box for `id`, inherited if unset locally.
    pub fn resolve_media_box(&self, id: PageId) -> Option<[f64; 4]> {
        self.resolve(id, |a| a.media_box)
    }

    /// Crop box for `id`, inherited if unset locally.
    pub fn resolve_crop_box(&self, id: PageId) -> Option<[f64; 4]> {
        self.resolve(id, |a| a.crop_box)
    }

    /// Rotation for `id`, inherited if unset locally.
    pub fn resolve_rotate(&self, id: PageId) -> Option<i32> {
        self.resolve(id, |a| a.rotate)
    }

    /// Verify that every leaf resolves a media box through its chain.
    pub(crate) fn check_mandatory_attributes(&self) -> Result<()> {
        for id in self.ids() {
            if self.nodes[id.0].children.is_empty() && self.resolve_media_box(id).is_none() {
                return Err(Error::MissingAttribute("MediaBox"));
            }
        }
        Ok(())
    }
}
