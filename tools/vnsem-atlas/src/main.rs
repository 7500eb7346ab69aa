mod config;
mod input;

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use rkyv::ser::{serializers::AllocSerializer, Serializer};
use tracing::info;
use tracing_subscriber::EnvFilter;
use vnsem_aligner::ClassIndex;
use vnsem_protocol::SentenceId;

use config::{Cli, Command, Format, ParseArgs};
use input::SentenceInput;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Compile { input, output } => compile(&input, &output),
        Command::Parse(args) => parse(&args),
    }
}

fn compile(input: &Path, output: &Path) -> Result<()> {
    info!(input = %input.display(), "reading class source");
    let json = fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?;

    // 1. Parse the notation into model types
    let archive = vnsem_notation::compile_source(&json)?;
    info!(version = archive.version, classes = archive.classes.len(), "compiling frame archive");

    // 2. Serialize to rkyv
    let mut serializer = AllocSerializer::<1024>::default();
    serializer
        .serialize_value(&archive)
        .map_err(|e| anyhow!("failed to serialize frame archive: {:?}", e))?;
    let bytes = serializer.into_serializer().into_inner();

    // 3. Validate before writing
    let index = ClassIndex::from_bytes(&bytes)?;

    fs::write(output, &bytes).with_context(|| format!("writing {}", output.display()))?;
    info!(output = %output.display(), bytes = bytes.len(), classes = index.len(), "archive written");
    Ok(())
}

fn parse(args: &ParseArgs) -> Result<()> {
    let parser = args.resources.parser()?;

    let json = fs::read_to_string(&args.input).with_context(|| format!("reading {}", args.input.display()))?;
    let sentences: Vec<SentenceInput> = serde_json::from_str(&json)?;

    let mut parses = Vec::with_capacity(sentences.len());
    for (i, sentence) in sentences.iter().enumerate() {
        let tree = sentence.tree().with_context(|| format!("sentence {}", i))?;
        let propositions = sentence.propositions().with_context(|| format!("sentence {}", i))?;
        parses.push(parser.parse_labeled(SentenceId(i as u32), &tree, propositions));
    }
    let aligned: usize = parses
        .iter()
        .map(|parse| parse.propositions.iter().filter(|proposition| proposition.is_aligned()).count())
        .sum();
    info!(sentences = parses.len(), aligned, "parsed");

    let rendered = match args.format {
        Format::Json => serde_json::to_string_pretty(&parses)?,
        Format::Text => parses.iter().map(|parse| parse.render()).collect::<Vec<_>>().join("\n"),
    };
    match &args.output {
        Some(path) => fs::write(path, rendered).with_context(|| format!("writing {}", path.display()))?,
        None => println!("{}", rendered),
    }
    Ok(())
}
