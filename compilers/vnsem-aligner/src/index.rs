use std::collections::HashMap;
use std::fs;
use std::path::Path;

use rkyv::AlignedVec;
use tracing::{info, warn};
use vnsem_protocol::{ClassId, FrameArchive, VerbClass};

use crate::error::ResourceError;

/// Read-only access to the verb-class resource.
pub trait FrameResource {
    fn class_by_id(&self, id: &ClassId) -> Option<&VerbClass>;

    /// Verb-specific features of `lemma` within class `id`. `None` when the
    /// class does not list the lemma.
    fn lexical_entry(&self, id: &ClassId, lemma: &str) -> Option<&[String]> {
        self.class_by_id(id)?
            .member(lemma)
            .map(|member| member.features.as_slice())
    }
}

impl<T: FrameResource + ?Sized> FrameResource for &T {
    fn class_by_id(&self, id: &ClassId) -> Option<&VerbClass> {
        (**self).class_by_id(id)
    }

    fn lexical_entry(&self, id: &ClassId, lemma: &str) -> Option<&[String]> {
        (**self).lexical_entry(id, lemma)
    }
}

/// In-memory class table built once from a compiled archive.
#[derive(Debug, Clone, Default)]
pub struct ClassIndex {
    version: u32,
    classes: HashMap<ClassId, VerbClass>,
}

impl ClassIndex {
    pub fn from_archive(archive: FrameArchive) -> Self {
        let mut classes = HashMap::with_capacity(archive.classes.len());
        for mut class in archive.classes {
            // Frame order decides alignment ties, so never trust storage order
            class.frames.sort_by_key(|frame| frame.index);
            if classes.contains_key(&class.id) {
                warn!(class = %class.id, "duplicate class id, keeping the first definition");
                continue;
            }
            classes.insert(class.id.clone(), class);
        }
        Self { version: archive.version, classes }
    }

    /// Validate and load an rkyv archive produced by the resource compiler.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ResourceError> {
        // Archived data must be aligned for validation
        let mut aligned = AlignedVec::with_capacity(bytes.len());
        aligned.extend_from_slice(bytes);

        let archive = rkyv::from_bytes::<FrameArchive>(&aligned)
            .map_err(|e| ResourceError::Archive(e.to_string()))?;
        Ok(Self::from_archive(archive))
    }

    /// Compile a JSON class source directly, skipping the archive step.
    pub fn from_source(json: &str) -> Result<Self, ResourceError> {
        Ok(Self::from_archive(vnsem_notation::compile_source(json)?))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ResourceError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| ResourceError::Io { path: path.to_path_buf(), source })?;
        let index = Self::from_bytes(&bytes)?;
        info!(path = %path.display(), classes = index.len(), version = index.version, "loaded frame archive");
        Ok(index)
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn classes(&self) -> impl Iterator<Item = &VerbClass> {
        self.classes.values()
    }
}

impl FrameResource for ClassIndex {
    fn class_by_id(&self, id: &ClassId) -> Option<&VerbClass> {
        self.classes.get(id)
    }
}
