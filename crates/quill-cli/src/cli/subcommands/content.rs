use clap::{Args, Subcommand};
use quill_core::enums::Platform;

#[derive(Clone, Debug, Subcommand)]
pub enum ContentCommands {
    List,
    Get {
        id: String,
    },
    Create(ContentCreateArgs),
    Delete {
        id: String,
    },
    /// Draft new content from a prompt.
    Generate {
        prompt: String,
        #[arg(long, default_value = "blog")]
        platform: Platform,
        #[arg(long, value_delimiter = ',')]
        keywords: Vec<String>,
    },
    /// Rewrite content towards a goal such as `seo` or `engagement`.
    Enhance {
        content: String,
        #[arg(long, default_value = "clarity")]
        goal: String,
    },
    /// Score content for search visibility.
    Seo {
        content: String,
        #[arg(long, value_delimiter = ',')]
        keywords: Vec<String>,
    },
}

#[derive(Clone, Debug, Args)]
pub struct ContentCreateArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub body: String,
    #[arg(long, default_value = "blog")]
    pub platform: Platform,
    #[arg(long, value_delimiter = ',')]
    pub keywords: Vec<String>,
}
