use crate::config::Config;
use anyhow::{Result, anyhow};
use clap::{Args, Parser, Subcommand, ValueEnum};
use gmlgen::{GenerateRequest, dialogue::DEFAULT_LANG, schema::types::UnknownTypePolicy};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(author, version, about = "Generate GameMaker entity scripts from a schema", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Debug, Subcommand)]
pub enum Cmd {
    /// Generate entity scripts into an existing GameMaker project
    Entities(EntitiesArgs),

    /// Normalize a dialogue designer export into a node graph
    Dialogue(DialogueArgs),
}

///
/// EntitiesArgs
/// Flags override the values read from the config file.
///

#[derive(Debug, Args)]
pub struct EntitiesArgs {
    /// Config file (defaults to ./gmlgen.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Entity model JSON
    #[arg(long, env = "GMLGEN_MODEL")]
    pub model: Option<PathBuf>,

    /// GameMaker project root (the directory holding `scripts/`)
    #[arg(long, env = "GMLGEN_PROJECT")]
    pub project: Option<PathBuf>,

    /// Restrict generation to these entities (repeatable)
    #[arg(long = "entity", value_name = "NAME")]
    pub entities: Vec<String>,

    /// How to treat type names that are neither primitives nor enums
    #[arg(long, value_enum)]
    pub unknown_types: Option<UnknownTypes>,

    /// Write the merged label map to this file
    #[arg(long)]
    pub labels: Option<PathBuf>,
}

impl EntitiesArgs {
    /// Merge flags over `config` into a pipeline request and label path.
    pub fn resolve(self, config: Config) -> Result<(GenerateRequest, Option<PathBuf>)> {
        let model = self
            .model
            .or(config.model)
            .ok_or_else(|| anyhow!("no model given (use --model or `model` in the config)"))?;
        let project = self
            .project
            .or(config.project)
            .ok_or_else(|| anyhow!("no project given (use --project or `project` in the config)"))?;

        let entities = if self.entities.is_empty() {
            config.entities
        } else {
            self.entities
        };
        let policy = self
            .unknown_types
            .map(UnknownTypePolicy::from)
            .or(config.unknown_types)
            .unwrap_or_default();

        let request = GenerateRequest::new(model, project)
            .entities(entities)
            .unknown_types(policy);

        Ok((request, self.labels.or(config.labels)))
    }
}

///
/// UnknownTypes
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum UnknownTypes {
    Permissive,
    Reject,
}

impl From<UnknownTypes> for UnknownTypePolicy {
    fn from(value: UnknownTypes) -> Self {
        match value {
            UnknownTypes::Permissive => Self::Permissive,
            UnknownTypes::Reject => Self::Reject,
        }
    }
}

///
/// DialogueArgs
///

#[derive(Debug, Args)]
pub struct DialogueArgs {
    /// Dialogue name stored in the graph
    #[arg(long)]
    pub name: String,

    /// Designer export (JSON)
    #[arg(long)]
    pub input: PathBuf,

    /// Language code used to pick localized text
    #[arg(long, default_value = DEFAULT_LANG)]
    pub lang: String,

    /// Output file; printed to stdout when absent
    #[arg(long)]
    pub output: Option<PathBuf>,
}

///
/// TESTS
///
