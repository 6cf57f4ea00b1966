use clap::{Args, Subcommand};
use quill_core::enums::{Platform, ProjectStatus};

#[derive(Clone, Debug, Subcommand)]
pub enum ProjectCommands {
    List {
        #[arg(long)]
        status: Option<ProjectStatus>,
    },
    Get {
        id: String,
    },
    Create(ProjectCreateArgs),
    Update(ProjectUpdateArgs),
    Delete {
        id: String,
    },
}

#[derive(Clone, Debug, Args)]
pub struct ProjectCreateArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub content: String,
    #[arg(long, default_value = "draft")]
    pub status: ProjectStatus,
    #[arg(long, default_value = "blog")]
    pub platform: Platform,
    /// Comma-separated keywords.
    #[arg(long, value_delimiter = ',')]
    pub keywords: Vec<String>,
}

#[derive(Clone, Debug, Args)]
pub struct ProjectUpdateArgs {
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub content: Option<String>,
    #[arg(long)]
    pub status: Option<ProjectStatus>,
    #[arg(long)]
    pub platform: Option<Platform>,
    #[arg(long, value_delimiter = ',')]
    pub keywords: Option<Vec<String>>,
}
