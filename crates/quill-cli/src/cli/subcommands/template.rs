use clap::{Args, Subcommand};
use quill_core::enums::{Platform, TemplateCategory};

#[derive(Clone, Debug, Subcommand)]
pub enum TemplateCommands {
    List {
        #[arg(long)]
        category: Option<TemplateCategory>,
    },
    Get {
        id: String,
    },
    Create(TemplateCreateArgs),
    Delete {
        id: String,
    },
}

#[derive(Clone, Debug, Args)]
pub struct TemplateCreateArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long)]
    pub content: String,
    #[arg(long)]
    pub category: TemplateCategory,
    #[arg(long, default_value = "blog")]
    pub platform: Platform,
}
