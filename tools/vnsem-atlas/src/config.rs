use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::warn;
use vnsem_aligner::{Aligner, ChildFilter, ClassIndex, LightVerbMapper, PredicateDetector, RoleMappings, SemanticParser};

#[derive(Parser, Debug)]
#[command(author, version, about = "Compiles verb-class resources and maps propositions onto their frames")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile a JSON class source into a validated rkyv archive
    Compile {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        #[arg(short, long, value_name = "FILE", default_value = "frames.rkyv")]
        output: PathBuf,
    },
    /// Map labeled sentences onto frames and bind their semantic predicates
    Parse(ParseArgs),
}

#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Sentences JSON (tokens with heads, labeled propositions)
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Write here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Json)]
    pub format: Format,

    #[command(flatten)]
    pub resources: ResourcePaths,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Json,
    Text,
}

/// Locations of the frame archive and the mapping tables.
#[derive(Args, Debug, Clone)]
pub struct ResourcePaths {
    /// Compiled archive, or a JSON class source when the extension is `.json`
    #[arg(long, env = "VNSEM_FRAMES", default_value = "frames.rkyv")]
    pub frames: PathBuf,

    #[arg(long, env = "VNSEM_ROLE_MAPPINGS", default_value = "mappings/pbvn-mappings.tsv")]
    pub role_mappings: PathBuf,

    #[arg(long, env = "VNSEM_LIGHT_VERBS", default_value = "mappings/lvm.tsv")]
    pub light_verbs: PathBuf,

    #[arg(long, env = "VNSEM_NOMINAL_MAPPINGS", default_value = "mappings/nominal-mappings.tsv")]
    pub nominal: PathBuf,

    #[arg(long, env = "VNSEM_ADJECTIVAL_MAPPINGS", default_value = "mappings/adjectival-mappings.tsv")]
    pub adjectival: PathBuf,
}

impl ResourcePaths {
    /// Load everything and assemble the parser. The frame archive and role
    /// correspondences are required; predicate mapping tables may be absent.
    pub fn parser(&self) -> Result<SemanticParser<ClassIndex>> {
        let index = self.frames()?;
        let mappings = RoleMappings::load(&self.role_mappings, &index)
            .with_context(|| format!("loading role correspondences {}", self.role_mappings.display()))?;

        let mut detector = PredicateDetector::default();
        let tables = [
            (&self.light_verbs, ChildFilter::Any),
            (&self.nominal, ChildFilter::Nominal),
            (&self.adjectival, ChildFilter::Adjectival),
        ];
        for (path, filter) in tables {
            if let Some(mapper) = optional_mapper(path, &index, filter)? {
                detector.push(mapper);
            }
        }

        Ok(SemanticParser::new(index, detector, Aligner::new(mappings)))
    }

    fn frames(&self) -> Result<ClassIndex> {
        let path = &self.frames;
        let is_json = path.extension().is_some_and(|extension| extension.eq_ignore_ascii_case("json"));
        if is_json {
            let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            return ClassIndex::from_source(&json).with_context(|| format!("compiling {}", path.display()));
        }
        ClassIndex::load(path).with_context(|| format!("loading frame archive {}", path.display()))
    }
}

fn optional_mapper(path: &Path, index: &ClassIndex, filter: ChildFilter) -> Result<Option<LightVerbMapper>> {
    if !path.exists() {
        warn!(path = %path.display(), "mapping table not found, skipping");
        return Ok(None);
    }
    let mapper = LightVerbMapper::load(path, index, filter)
        .with_context(|| format!("loading mapping table {}", path.display()))?;
    Ok(Some(mapper))
}
