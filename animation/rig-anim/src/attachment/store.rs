//! Persisted list of bone attachment mappings
//!
//! Editor tooling loads the list at start, edits it and saves it back.
//! The game applies it at runtime through [`MappingStore::update`]. The
//! store is plain single-threaded state.

use log::{debug, warn};
use std::fs;
use std::io::{self, BufWriter, Cursor, Read, Write};
use std::path::Path;

use super::bone::BoneAttachment;
use super::io::{read_count, read_mapping, write_count, write_mapping};
use super::mapping::BoneAttachmentMapping;
use crate::error::Result;
use crate::skeleton::Skeleton;

/// Ordered list of attachment mappings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappingStore {
    mappings: Vec<BoneAttachmentMapping>,
}

impl MappingStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from disk
    ///
    /// Never fails: a missing, unreadable, empty, truncated or malformed
    /// file gives an empty store. Use [`read_from`](Self::read_from) to
    /// detect damage.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let data = match fs::read(path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No mapping file at {}, starting empty", path.display());
                return Self::new();
            }
            Err(e) => {
                warn!("Ignoring unreadable mapping file {}: {e}", path.display());
                return Self::new();
            }
        };

        match Self::read_from(&mut data.as_slice()) {
            Ok(store) => {
                debug!(
                    "Loaded {} attachment mappings from {}",
                    store.len(),
                    path.display()
                );
                store
            }
            Err(e) => {
                warn!("Ignoring malformed mapping file {}: {e}", path.display());
                Self::new()
            }
        }
    }

    /// Read a store from a stream, failing on any malformed record
    ///
    /// An empty stream gives an empty store.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        if data.is_empty() {
            return Ok(Self::new());
        }

        let mut cursor = Cursor::new(data.as_slice());
        let count = read_count(&mut cursor)?;
        let mut mappings = Vec::with_capacity(count.min(1024));
        for _ in 0..count {
            mappings.push(read_mapping(&mut cursor)?);
        }
        Ok(Self { mappings })
    }

    /// Write the store to a stream
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        write_count(writer, self.mappings.len())?;
        for mapping in &self.mappings {
            write_mapping(writer, mapping)?;
        }
        Ok(())
    }

    /// Save the store to disk, creating parent directories as needed
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        // Encode fully before truncating the file
        let mut data = Vec::new();
        self.write_to(&mut data)?;

        let mut writer = BufWriter::new(fs::File::create(path)?);
        writer.write_all(&data)?;
        writer.flush()?;

        debug!(
            "Saved {} attachment mappings to {}",
            self.len(),
            path.display()
        );
        Ok(())
    }

    /// Check if a mapping for the same root, attachment and attachment
    /// animation already exists, whatever its root animation
    pub fn exists(&self, candidate: &BoneAttachmentMapping) -> bool {
        self.mappings.iter().any(|m| m.is_same_mapping(candidate))
    }

    /// Insert a mapping unless an equivalent one exists
    ///
    /// Returns whether the mapping was inserted.
    pub fn add(&mut self, mapping: BoneAttachmentMapping) -> bool {
        if self.exists(&mapping) {
            debug!("Skipping duplicate mapping {mapping}");
            return false;
        }
        self.mappings.push(mapping);
        true
    }

    /// Apply the mapping for `root` playing clip `animation_index` to `attachment`
    ///
    /// Fills in the parent node, the parent bone matrix and the offset, then
    /// recomputes the offset matrix. Returns false if no mapping matches, in
    /// which case `attachment` is left untouched.
    pub fn update(
        &self,
        root: &Skeleton,
        animation_index: usize,
        attached_model: &str,
        attachment: &mut BoneAttachment,
    ) -> bool {
        let Some(root_animation) = root.animation(animation_index) else {
            return false;
        };

        let Some(mapping) = self.mappings.iter().find(|m| {
            m.root_model == root.name()
                && m.root_animation == root_animation.name
                && m.attached_model == attached_model
        }) else {
            return false;
        };

        attachment.parent = mapping.attach_to_node;
        if let Some(bone) = mapping
            .attach_to_node
            .and_then(|node| root.node(node))
            .and_then(|node| node.bone)
        {
            attachment.parent_bone = root.bone(bone);
        }
        attachment.position = mapping.position;
        attachment.rotation = mapping.rotation;
        attachment.update();
        true
    }

    /// Find the root animation an attachment animation is already mapped under
    pub fn find_root_animation(
        &self,
        root_model: &str,
        attached_model: &str,
        attached_animation: &str,
    ) -> Option<&str> {
        self.mappings
            .iter()
            .find(|m| {
                m.root_model == root_model
                    && m.attached_model == attached_model
                    && m.attached_animation == attached_animation
            })
            .map(|m| m.root_animation.as_str())
    }

    /// Visit mappings in order until `handler` returns false
    pub fn for_each(&mut self, mut handler: impl FnMut(&mut BoneAttachmentMapping) -> bool) {
        for mapping in &mut self.mappings {
            if !handler(mapping) {
                break;
            }
        }
    }

    /// Remove every mapping matching `predicate`, returning how many went
    pub fn remove_if(&mut self, mut predicate: impl FnMut(&BoneAttachmentMapping) -> bool) -> usize {
        let before = self.mappings.len();
        self.mappings.retain(|m| !predicate(m));
        before - self.mappings.len()
    }

    /// Iterate mappings in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &BoneAttachmentMapping> {
        self.mappings.iter()
    }

    /// Get a mapping by position
    pub fn get(&self, index: usize) -> Option<&BoneAttachmentMapping> {
        self.mappings.get(index)
    }

    /// Number of mappings
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    /// Check if the store holds no mappings
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

impl<'a> IntoIterator for &'a MappingStore {
    type Item = &'a BoneAttachmentMapping;
    type IntoIter = std::slice::Iter<'a, BoneAttachmentMapping>;

    fn into_iter(self) -> Self::IntoIter {
        self.mappings.iter()
    }
}
