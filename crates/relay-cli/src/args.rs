//! Command-line argument surface

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "relay")]
#[command(about = "relay - conversational orchestration over a local or remote model backend")]
#[command(version)]
pub struct Cli {
    /// User input for a single turn (omit when using a REPL mode or a
    /// listing flag)
    pub prompt: Option<String>,

    /// Backend model id, as provider/model (bare names mean local Ollama)
    #[arg(short, long, default_value = "ollama/llama3.2")]
    pub model: String,

    /// Stream the response token by token
    #[arg(short, long)]
    pub stream: bool,

    /// Verbose diagnostics (routing decisions, timings)
    #[arg(short, long)]
    pub verbose: bool,

    /// Stateless REPL: no history is kept between turns
    #[arg(short, long)]
    pub interactive: bool,

    /// Conversational REPL: history grows turn by turn
    #[arg(short, long)]
    pub conversational: bool,

    /// Save the session under this name after each turn
    #[arg(long, value_name = "NAME")]
    pub save_session: Option<String>,

    /// Resume a previously saved session
    #[arg(long, value_name = "NAME")]
    pub resume_session: Option<String>,

    /// List saved sessions and exit
    #[arg(long)]
    pub list_sessions: bool,

    /// List available tools and exit
    #[arg(long)]
    pub list_tools: bool,

    /// List discovered skills and exit
    #[arg(long)]
    pub list_skills: bool,

    /// Grant a permission to this invocation (repeatable), e.g.
    /// --grant filesystem-read
    #[arg(long = "grant", value_name = "PERMISSION")]
    pub grants: Vec<String>,

    /// Skip intent routing; always reason over the raw prompt
    #[arg(long)]
    pub no_route: bool,

    /// Write the turn's execution artifact to this path as JSON
    #[arg(long, value_name = "PATH")]
    pub artifact: Option<PathBuf>,

    /// Use the deterministic offline mock backend (demo/testing)
    #[arg(long)]
    pub mock: bool,
}

impl Cli {
    /// Enforce the mode exclusivity rules
    ///
    /// `-i` and `-c` are mutually exclusive; the stateless REPL cannot save
    /// or resume sessions; a prompt is required unless a REPL mode or
    /// listing flag is given.
    pub fn validate(&self) -> Result<(), String> {
        if self.interactive && self.conversational {
            return Err("--interactive and --conversational are mutually exclusive".to_string());
        }
        if self.interactive && (self.save_session.is_some() || self.resume_session.is_some()) {
            return Err(
                "--interactive keeps no history; use --conversational with sessions".to_string(),
            );
        }
        let listing = self.list_sessions || self.list_tools || self.list_skills;
        if self.prompt.is_none() && !self.interactive && !self.conversational && !listing {
            return Err("prompt is required (or use -i, -c, or a --list-* flag)".to_string());
        }
        Ok(())
    }
}
