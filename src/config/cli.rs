use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, builder::BoolishValueParser};

use crate::application::views::PostSelector;

/// Command-line arguments for the storyline binary.
#[derive(Debug, Parser)]
#[command(name = "storyline", version, about = "Read and manage blog posts from the terminal")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "STORYLINE_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: GlobalOverrides,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args, Default, Clone)]
pub struct GlobalOverrides {
    /// Override the record store base URL, e.g. <https://project.supabase.co>
    #[arg(long = "store-url", value_name = "URL", global = true)]
    pub store_url: Option<String>,

    /// Override the posts table name.
    #[arg(long = "store-table", value_name = "TABLE", global = true)]
    pub store_table: Option<String>,

    /// Path to a file containing the store API key (takes precedence over config)
    #[arg(
        long = "api-key-file",
        env = "STORYLINE_API_KEY_FILE",
        value_name = "PATH",
        global = true
    )]
    pub api_key_file: Option<PathBuf>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Public reading view.
    Blog(BlogArgs),
    /// Admin view: create, edit and delete posts.
    Admin(AdminArgs),
    /// Interactive session that switches between both views.
    Shell,
}

#[derive(Debug, Args, Clone)]
pub struct BlogArgs {
    #[command(subcommand)]
    pub action: BlogCmd,
}

#[derive(Debug, Subcommand, Clone)]
pub enum BlogCmd {
    /// List posts, newest first
    List,
    /// Show one post in full
    Show {
        /// Position in the list (1 = newest) or post id
        post: PostSelector,
    },
}

#[derive(Debug, Args, Clone)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub action: AdminCmd,
}

#[derive(Debug, Subcommand, Clone)]
pub enum AdminCmd {
    /// List posts with their ids
    List,
    /// Create a post
    Create {
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        author: String,
        #[arg(long, conflicts_with = "content_file")]
        content: Option<String>,
        #[arg(long, value_name = "PATH")]
        content_file: Option<PathBuf>,
    },
    /// Edit a post; omitted fields keep their current value
    Edit {
        /// Position in the list (1 = newest) or post id
        post: PostSelector,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long, conflicts_with = "content_file")]
        content: Option<String>,
        #[arg(long, value_name = "PATH")]
        content_file: Option<PathBuf>,
    },
    /// Delete a post after confirmation
    Delete {
        /// Position in the list (1 = newest) or post id
        post: PostSelector,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y', default_value_t = false)]
        yes: bool,
    },
}
