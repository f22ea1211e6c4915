//! Object syntax emission and whole-file serialization.
//!
//! Offsets recorded in the cross-reference table must point at the
//! first byte of each object's `N 0 obj` marker, so the file pass
//! accounts for every byte written, line terminators included.

use std::collections::HashMap;
use std::io::Write;

use crate::config::PdfVersion;
use crate::error::Result;
use crate::object::{Object, ObjectRef};
use crate::registry::ObjectRegistry;
use crate::writer::content_stream::fmt_number;

/// Serializer for PDF objects.
///
/// Converts [`Object`] values to their byte representation. Dictionary
/// keys are emitted in sorted order so equivalent documents serialize
/// byte-identically.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectSerializer;

impl ObjectSerializer {
    /// Create a serializer.
    pub fn new() -> Self {
        Self
    }

    /// Serialize an object to bytes.
    pub fn serialize(&self, obj: &Object) -> Vec<u8> {
        let mut buf = Vec::new();
        self.write_object(&mut buf, obj).expect("in-memory write");
        buf
    }

    /// Serialize an object to a string (for debugging and tests).
    pub fn serialize_to_string(&self, obj: &Object) -> String {
        String::from_utf8_lossy(&self.serialize(obj)).to_string()
    }

    /// Serialize an indirect object definition.
    ///
    /// Format: `{id} 0 obj\n{object}\nendobj\n`
    pub fn serialize_indirect(&self, r: ObjectRef, obj: &Object) -> Vec<u8> {
        let mut buf = Vec::new();
        writeln!(buf, "{} 0 obj", r.id).expect("in-memory write");
        self.write_object(&mut buf, obj).expect("in-memory write");
        write!(buf, "\nendobj\n").expect("in-memory write");
        buf
    }

    /// Write an object to a buffer.
    fn write_object<W: Write>(&self, w: &mut W, obj: &Object) -> std::io::Result<()> {
        match obj {
            Object::Null => write!(w, "null"),
            Object::Boolean(b) => write!(w, "{}", if *b { "true" } else { "false" }),
            Object::Integer(i) => write!(w, "{}", i),
            Object::Real(r) => write!(w, "{}", fmt_number(*r)),
            Object::String(s) => self.write_string(w, s),
            Object::Name(n) => self.write_name(w, n),
            Object::Array(arr) => self.write_array(w, arr),
            Object::Dictionary(dict) => self.write_dictionary(w, dict),
            Object::Stream { dict, data } => self.write_stream(w, dict, data),
            Object::Reference(r) => write!(w, "{} 0 R", r.id),
        }
    }

    /// Write a PDF string.
    ///
    /// Uses literal string syntax `(...)` with escaping, or hex string
    /// syntax `<...>` for binary data.
    fn write_string<W: Write>(&self, w: &mut W, data: &[u8]) -> std::io::Result<()> {
        let is_printable = data
            .iter()
            .all(|&b| b == b'\n' || b == b'\r' || b == b'\t' || (0x20..=0x7E).contains(&b));

        if is_printable {
            write!(w, "(")?;
            for &byte in data {
                match byte {
                    b'(' => write!(w, "\\(")?,
                    b')' => write!(w, "\\)")?,
                    b'\\' => write!(w, "\\\\")?,
                    b'\n' => write!(w, "\\n")?,
                    b'\r' => write!(w, "\\r")?,
                    b'\t' => write!(w, "\\t")?,
                    _ => w.write_all(&[byte])?,
                }
            }
            write!(w, ")")
        } else {
            write!(w, "<")?;
            for byte in data {
                write!(w, "{:02X}", byte)?;
            }
            write!(w, ">")
        }
    }

    /// Write a PDF name, escaping delimiters as `#xx`.
    fn write_name<W: Write>(&self, w: &mut W, name: &str) -> std::io::Result<()> {
        write!(w, "/")?;
        for byte in name.bytes() {
            match byte {
                b'!'
                | b'"'
                | b'$'..=b'&'
                | b'\''..=b'.'
                | b'0'..=b'9'
                | b';'
                | b'<'
                | b'>'
                | b'?'
                | b'@'
                | b'A'..=b'Z'
                | b'^'..=b'z'
                | b'|'
                | b'~' => {
                    w.write_all(&[byte])?;
                },
                _ => {
                    write!(w, "#{:02X}", byte)?;
                },
            }
        }
        Ok(())
    }

    /// Write a PDF array.
    fn write_array<W: Write>(&self, w: &mut W, arr: &[Object]) -> std::io::Result<()> {
        write!(w, "[")?;
        for (i, obj) in arr.iter().enumerate() {
            if i > 0 {
                write!(w, " ")?;
            }
            self.write_object(w, obj)?;
        }
        write!(w, "]")
    }

    /// Write a PDF dictionary with sorted keys.
    fn write_dictionary<W: Write>(
        &self,
        w: &mut W,
        dict: &HashMap<String, Object>,
    ) -> std::io::Result<()> {
        write!(w, "<<")?;

        let mut keys: Vec<_> = dict.keys().collect();
        keys.sort();

        for (i, key) in keys.iter().enumerate() {
            if let Some(value) = dict.get(*key) {
                if i > 0 {
                    write!(w, " ")?;
                }
                self.write_name(w, key)?;
                write!(w, " ")?;
                self.write_object(w, value)?;
            }
        }
        write!(w, ">>")
    }

    /// Write a PDF stream, adding /Length if absent.
    fn write_stream<W: Write>(
        &self,
        w: &mut W,
        dict: &HashMap<String, Object>,
        data: &[u8],
    ) -> std::io::Result<()> {
        let mut dict_with_length = dict.clone();
        dict_with_length
            .entry("Length".to_string())
            .or_insert(Object::Integer(data.len() as i64));

        self.write_dictionary(w, &dict_with_length)?;
        write!(w, "\nstream\n")?;
        w.write_all(data)?;
        write!(w, "\nendstream")
    }
}

/// Verify that every reference inside `obj` points at a registered object.
fn check_references(obj: &Object, registry: &ObjectRegistry) -> Result<()> {
    match obj {
        Object::Reference(r) => registry.ensure_registered(*r),
        Object::Array(arr) => arr.iter().try_for_each(|o| check_references(o, registry)),
        Object::Dictionary(dict) => dict
            .values()
            .try_for_each(|o| check_references(o, registry)),
        Object::Stream { dict, .. } => dict
            .values()
            .try_for_each(|o| check_references(o, registry)),
        _ => Ok(()),
    }
}

/// Emit the complete file: header, body, cross-reference table, trailer.
///
/// `objects` must hold one entry per registered object, in ascending
/// number order; the registry receives each object's byte offset as it
/// is emitted.
pub fn write_document(
    out: &mut Vec<u8>,
    version: PdfVersion,
    objects: &[(ObjectRef, Object)],
    registry: &mut ObjectRegistry,
    root: ObjectRef,
    info: ObjectRef,
) -> Result<()> {
    let serializer = ObjectSerializer::new();

    writeln!(out, "%PDF-{}", version.as_str())?;
    // Marks the file as binary for transfer agents.
    out.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");

    for (r, obj) in objects {
        check_references(obj, registry)?;
        let offset = out.len();
        registry.record_offset(*r, offset);
        log::debug!("object {} at offset {}", r.id, offset);
        out.extend_from_slice(&serializer.serialize_indirect(*r, obj));
    }

    let xref_start = out.len();
    writeln!(out, "xref")?;
    writeln!(out, "0 {}", registry.xref_size())?;
    writeln!(out, "0000000000 65535 f ")?;
    for (r, _) in objects {
        let offset = registry
            .resolve(*r)
            .ok_or(crate::error::Error::UnregisteredObject(*r))?;
        writeln!(out, "{:010} 00000 n ", offset)?;
    }

    let trailer = Object::dict(vec![
        ("Size", Object::Integer(i64::from(registry.xref_size()))),
        ("Root", Object::Reference(root)),
        ("Info", Object::Reference(info)),
    ]);
    writeln!(out, "trailer")?;
    out.extend_from_slice(&serializer.serialize(&trailer));
    writeln!(out)?;
    writeln!(out, "startxref")?;
    writeln!(out, "{}", xref_start)?;
    write!(out, "%%EOF")?;

    Ok(())
}
