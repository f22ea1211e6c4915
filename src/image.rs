//! Image descriptors and placement.
//!
//! Images arrive already encoded; this module only carries the
//! descriptor into an XObject and positions it on a page. Decoding raw
//! pixel data is a concern of the caller.

use std::collections::HashMap;

use crate::object::Object;

/// Index of an image registered on a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(pub(crate) usize);

impl ImageId {
    /// Resource-dictionary name for this image (Im1, Im2, ...).
    pub(crate) fn resource_name(&self) -> String {
        format!("Im{}", self.0 + 1)
    }
}

/// Color space for image data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorSpace {
    /// Grayscale (1 component per pixel)
    DeviceGray,
    /// RGB color (3 components per pixel, default)
    #[default]
    DeviceRGB,
    /// CMYK color (4 components per pixel)
    DeviceCMYK,
}

impl ColorSpace {
    /// Get the number of color components.
    pub fn components(&self) -> u8 {
        match self {
            ColorSpace::DeviceGray => 1,
            ColorSpace::DeviceRGB => 3,
            ColorSpace::DeviceCMYK => 4,
        }
    }

    /// Get the PDF name for this color space.
    pub fn as_pdf_name(&self) -> &'static str {
        match self {
            ColorSpace::DeviceGray => "DeviceGray",
            ColorSpace::DeviceRGB => "DeviceRGB",
            ColorSpace::DeviceCMYK => "DeviceCMYK",
        }
    }
}

/// Filter already applied to the descriptor's data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFilter {
    /// JPEG-compressed data
    DctDecode,
    /// Deflate-compressed data
    FlateDecode,
}

impl ImageFilter {
    /// Get the PDF name for this filter.
    pub fn as_pdf_name(&self) -> &'static str {
        match self {
            ImageFilter::DctDecode => "DCTDecode",
            ImageFilter::FlateDecode => "FlateDecode",
        }
    }
}

/// An already-encoded image ready for embedding.
#[derive(Debug, Clone)]
pub struct ImageDescriptor {
    /// Native pixel width
    pub width: u32,
    /// Native pixel height
    pub height: u32,
    /// Color space of the samples
    pub color_space: ColorSpace,
    /// Filter the data is already encoded with, if any
    pub filter: Option<ImageFilter>,
    /// Bits per color component
    pub bits_per_component: u8,
    /// Encoded sample data
    pub data: bytes::Bytes,
}

impl ImageDescriptor {
    /// Create a descriptor for raw (unfiltered) 8-bit samples.
    pub fn new(width: u32, height: u32, color_space: ColorSpace, data: impl Into<bytes::Bytes>) -> Self {
        Self {
            width,
            height,
            color_space,
            filter: None,
            bits_per_component: 8,
            data: data.into(),
        }
    }

    /// Declare the filter the data is already encoded with.
    pub fn with_filter(mut self, filter: ImageFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Set bits per component (8 for all common cases).
    pub fn with_bits_per_component(mut self, bits: u8) -> Self {
        self.bits_per_component = bits;
        self
    }

    /// Build the Image XObject for this descriptor.
    pub(crate) fn to_object(&self) -> Object {
        let mut dict = HashMap::new();
        dict.insert("Type".to_string(), Object::name("XObject"));
        dict.insert("Subtype".to_string(), Object::name("Image"));
        dict.insert("Width".to_string(), Object::Integer(i64::from(self.width)));
        dict.insert("Height".to_string(), Object::Integer(i64::from(self.height)));
        dict.insert(
            "ColorSpace".to_string(),
            Object::name(self.color_space.as_pdf_name()),
        );
        dict.insert(
            "BitsPerComponent".to_string(),
            Object::Integer(i64::from(self.bits_per_component)),
        );
        if let Some(filter) = self.filter {
            dict.insert("Filter".to_string(), Object::name(filter.as_pdf_name()));
        }
        Object::Stream {
            dict,
            data: self.data.clone(),
        }
    }
}

/// Anchor of the placed image along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    /// Left/bottom edge at the given position (default)
    #[default]
    Start,
    /// Centered on the given position
    Center,
    /// Right/top edge at the given position
    End,
}

impl Anchor {
    /// Fraction of the placed size the position moves back by.
    pub(crate) fn offset_factor(&self) -> f64 {
        match self {
            Anchor::Start => 0.0,
            Anchor::Center => 0.5,
            Anchor::End => 1.0,
        }
    }
}

/// Where and how an image is placed on a page.
///
/// Scale factors multiply the image's native pixel size. The rotation
/// angle is in radians (the text rotation parameter, by contrast, takes
/// degrees); skew angles are radians as well.
#[derive(Debug, Clone)]
pub struct ImagePlacement {
    /// Horizontal anchor position
    pub x: f64,
    /// Vertical anchor position
    pub y: f64,
    /// Horizontal anchor interpretation
    pub x_anchor: Anchor,
    /// Vertical anchor interpretation
    pub y_anchor: Anchor,
    /// Horizontal scale applied to the native width
    pub x_scale: f64,
    /// Vertical scale applied to the native height
    pub y_scale: f64,
    /// Rotation in radians
    pub rotate: f64,
    /// Horizontal skew angle in radians
    pub x_skew: f64,
    /// Vertical skew angle in radians
    pub y_skew: f64,
}

impl Default for ImagePlacement {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            x_anchor: Anchor::Start,
            y_anchor: Anchor::Start,
            x_scale: 1.0,
            y_scale: 1.0,
            rotate: 0.0,
            x_skew: 0.0,
            y_skew: 0.0,
        }
    }
}

impl ImagePlacement {
    /// Placement at a position with all other fields default.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    /// Set the per-axis anchors.
    pub fn with_anchors(mut self, x_anchor: Anchor, y_anchor: Anchor) -> Self {
        self.x_anchor = x_anchor;
        self.y_anchor = y_anchor;
        self
    }

    /// Set the scale factors.
    pub fn with_scale(mut self, x_scale: f64, y_scale: f64) -> Self {
        self.x_scale = x_scale;
        self.y_scale = y_scale;
        self
    }

    /// Set the rotation in radians.
    pub fn with_rotation(mut self, radians: f64) -> Self {
        self.rotate = radians;
        self
    }

    /// Set the skew angles in radians.
    pub fn with_skew(mut self, x_skew: f64, y_skew: f64) -> Self {
        self.x_skew = x_skew;
        self.y_skew = y_skew;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xobject_dict_shape() {
        let desc = ImageDescriptor::new(64, 32, ColorSpace::DeviceRGB, vec![0u8; 10])
            .with_filter(ImageFilter::DctDecode);
        let obj = desc.to_object();
        let dict = obj.as_dict().unwrap();
        assert_eq!(dict.get("Subtype").unwrap().as_name(), Some("Image"));
        assert_eq!(dict.get("Width").unwrap().as_integer(), Some(64));
        assert_eq!(dict.get("Height").unwrap().as_integer(), Some(32));
        assert_eq!(dict.get("ColorSpace").unwrap().as_name(), Some("DeviceRGB"));
        assert_eq!(dict.get("Filter").unwrap().as_name(), Some("DCTDecode"));
    }

    #[test]
    fn test_no_filter_entry_for_raw_data() {
        let desc = ImageDescriptor::new(2, 2, ColorSpace::DeviceGray, vec![0u8; 4]);
        let obj = desc.to_object();
        assert!(obj.as_dict().unwrap().get("Filter").is_none());
    }

    #[test]
    fn test_anchor_offsets() {
        assert_eq!(Anchor::Start.offset_factor(), 0.0);
        assert_eq!(Anchor::Center.offset_factor(), 0.5);
        assert_eq!(Anchor::End.offset_factor(), 1.0);
    }

    #[test]
    fn test_placement_defaults() {
        let p = ImagePlacement::at(100.0, 200.0);
        assert_eq!(p.x_scale, 1.0);
        assert_eq!(p.rotate, 0.0);
        assert_eq!(p.x_anchor, Anchor::Start);
    }

    #[test]
    fn test_resource_names_are_sequential() {
        assert_eq!(ImageId(0).resource_name(), "Im1");
        assert_eq!(ImageId(2).resource_name(), "Im3");
    }
}
