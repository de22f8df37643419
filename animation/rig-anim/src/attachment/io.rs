//! Binary persistence for attachment mappings
//!
//! Layout (little-endian, no version tag):
//!
//! ```text
//! i32                 mapping count
//! per mapping:
//!   u32 + bytes       root model
//!   u32 + bytes       root animation
//!   u32 + bytes       attached model
//!   u32 + bytes       attached animation
//!   i32               node index (-1 = none)
//!   f32 x3            position
//!   f32 x4            rotation (x, y, z, w)
//! ```

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use glam::{Quat, Vec3};
use std::io::{Read, Write};

use super::mapping::BoneAttachmentMapping;
use crate::error::{AnimError, Result};

/// Upper bound on a single persisted string
const MAX_STRING_LEN: u32 = 1 << 16;

/// Write the mapping count header
pub(crate) fn write_count<W: Write>(writer: &mut W, count: usize) -> Result<()> {
    let count = i32::try_from(count)
        .map_err(|_| AnimError::MalformedMapping(format!("too many mappings: {count}")))?;
    writer.write_i32::<LittleEndian>(count)?;
    Ok(())
}

/// Read the mapping count header
pub(crate) fn read_count<R: Read>(reader: &mut R) -> Result<usize> {
    let count = reader.read_i32::<LittleEndian>()?;
    usize::try_from(count)
        .map_err(|_| AnimError::MalformedMapping(format!("negative mapping count: {count}")))
}

fn write_string<W: Write>(writer: &mut W, value: &str) -> Result<()> {
    let len = u32::try_from(value.len())
        .ok()
        .filter(|len| *len <= MAX_STRING_LEN)
        .ok_or_else(|| {
            AnimError::MalformedMapping(format!(
                "string length {} exceeds {MAX_STRING_LEN}",
                value.len()
            ))
        })?;
    writer.write_u32::<LittleEndian>(len)?;
    writer.write_all(value.as_bytes())?;
    Ok(())
}

fn read_string<R: Read>(reader: &mut R) -> Result<String> {
    let len = reader.read_u32::<LittleEndian>()?;
    if len > MAX_STRING_LEN {
        return Err(AnimError::MalformedMapping(format!(
            "string length {len} exceeds {MAX_STRING_LEN}"
        )));
    }
    let mut bytes = vec![0u8; len as usize];
    reader.read_exact(&mut bytes)?;
    String::from_utf8(bytes)
        .map_err(|e| AnimError::MalformedMapping(format!("invalid UTF-8 in name: {e}")))
}

/// Write one mapping record
pub(crate) fn write_mapping<W: Write>(
    writer: &mut W,
    mapping: &BoneAttachmentMapping,
) -> Result<()> {
    write_string(writer, &mapping.root_model)?;
    write_string(writer, &mapping.root_animation)?;
    write_string(writer, &mapping.attached_model)?;
    write_string(writer, &mapping.attached_animation)?;

    let node = match mapping.attach_to_node {
        Some(node) => i32::try_from(node)
            .map_err(|_| AnimError::MalformedMapping(format!("node index {node} too large")))?,
        None => -1,
    };
    writer.write_i32::<LittleEndian>(node)?;

    for value in mapping.position.to_array() {
        writer.write_f32::<LittleEndian>(value)?;
    }
    for value in mapping.rotation.to_array() {
        writer.write_f32::<LittleEndian>(value)?;
    }
    Ok(())
}

/// Read one mapping record
pub(crate) fn read_mapping<R: Read>(reader: &mut R) -> Result<BoneAttachmentMapping> {
    let root_model = read_string(reader)?;
    let root_animation = read_string(reader)?;
    let attached_model = read_string(reader)?;
    let attached_animation = read_string(reader)?;

    let node = reader.read_i32::<LittleEndian>()?;
    let attach_to_node = usize::try_from(node).ok();

    let mut position = [0.0f32; 3];
    reader.read_f32_into::<LittleEndian>(&mut position)?;
    let mut rotation = [0.0f32; 4];
    reader.read_f32_into::<LittleEndian>(&mut rotation)?;

    Ok(BoneAttachmentMapping {
        root_model,
        root_animation,
        attached_model,
        attached_animation,
        attach_to_node,
        position: Vec3::from_array(position),
        rotation: Quat::from_array(rotation),
    })
}
