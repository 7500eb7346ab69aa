use serde::Deserialize;
use tracing::debug;
use vnsem_protocol::{ClassId, Frame, FrameArchive, FrameIndex, Member, VerbClass};

use crate::{parse_frame_syntax, parse_template, NotationError};

fn default_version() -> u32 {
    1
}

/// Authoring format of the frame resource, one JSON document per resource.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceSource {
    #[serde(default = "default_version")]
    pub version: u32,
    pub classes: Vec<ClassSource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassSource {
    pub id: String,
    #[serde(default)]
    pub members: Vec<MemberSource>,
    #[serde(default)]
    pub frames: Vec<FrameSource>,
}

/// A member is either a bare lemma or a lemma with verb-specific features.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MemberSource {
    Lemma(String),
    Entry {
        lemma: String,
        #[serde(default)]
        features: Vec<String>,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct FrameSource {
    #[serde(default)]
    pub description: String,
    /// Pattern in slot notation: `NP.Agent V NP.Theme`
    pub syntax: String,
    /// Templates in call notation: `cause(Agent, E)`
    #[serde(default)]
    pub semantics: Vec<String>,
}

impl From<&MemberSource> for Member {
    fn from(source: &MemberSource) -> Self {
        match source {
            MemberSource::Lemma(lemma) => Member { lemma: lemma.clone(), features: Vec::new() },
            MemberSource::Entry { lemma, features } => Member {
                lemma: lemma.clone(),
                features: features.clone(),
            },
        }
    }
}

fn compile_frame(position: usize, source: &FrameSource) -> Result<Frame, NotationError> {
    let syntax = parse_frame_syntax(&source.syntax)?;
    let semantics = source
        .semantics
        .iter()
        .map(|template| parse_template(template))
        .collect::<Result<Vec<_>, _>>()?;

    let description = if source.description.is_empty() {
        source.syntax.clone()
    } else {
        source.description.clone()
    };

    Ok(Frame {
        index: FrameIndex::new(position as u32),
        description,
        syntax,
        semantics,
    })
}

/// Compile one class. Frame indices follow declaration order.
pub fn compile_class(source: &ClassSource) -> Result<VerbClass, NotationError> {
    let frames = source
        .frames
        .iter()
        .enumerate()
        .map(|(position, frame)| {
            compile_frame(position, frame).map_err(|e| NotationError::Frame {
                class: source.id.clone(),
                frame: position,
                source: Box::new(e),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(class = %source.id, frames = frames.len(), "compiled class");

    Ok(VerbClass {
        id: ClassId::new(source.id.trim()),
        members: source.members.iter().map(Member::from).collect(),
        frames,
    })
}

/// Compile a JSON resource document into the archive model.
pub fn compile_source(json: &str) -> Result<FrameArchive, NotationError> {
    let source: ResourceSource = serde_json::from_str(json)?;
    let classes = source
        .classes
        .iter()
        .map(compile_class)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FrameArchive { version: source.version, classes })
}
