//! CLI application logic: listings, single turns, and REPL loops

use std::io::{BufRead, Write};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use futures::StreamExt;

use relay_core::{
    parse_grants, EngineError, ExecutionArtifact, FileSessionStore, Gate, GateError,
    GenaiReasoner, MockReasoner, Orchestrator, Reasoner, Session, SessionStore, SharedLogger,
    SkillRegistry, StreamEvent,
};

use crate::args::Cli;

pub struct App {
    cli: Cli,
    engine: Orchestrator,
    store: FileSessionStore,
}

impl App {
    /// Wire up the engine from the parsed arguments
    ///
    /// Fails fast on unknown permission strings and missing API keys,
    /// before any turn runs.
    pub fn build(cli: Cli, logger: SharedLogger) -> Result<Self> {
        let granted = parse_grants(&cli.grants)?;
        let gate = Gate::new(granted);

        let reasoner: Box<dyn Reasoner> = if cli.mock {
            Box::new(MockReasoner::echo().with_model_id("mock"))
        } else {
            let backend = GenaiReasoner::new(&cli.model, Arc::clone(&logger));
            backend.check_api_key()?;
            Box::new(backend)
        };

        let skills = SkillRegistry::discover(&SkillRegistry::default_root(), logger.as_ref());
        let engine = Orchestrator::new(reasoner, gate, logger).with_skills(skills);

        Ok(Self {
            cli,
            engine,
            store: FileSessionStore::default_root(),
        })
    }

    pub async fn run(&self) -> Result<()> {
        if self.cli.list_tools {
            return self.list_tools();
        }
        if self.cli.list_skills {
            return self.list_skills();
        }
        if self.cli.list_sessions {
            return self.list_sessions();
        }

        if self.cli.interactive {
            return self.repl(false).await;
        }
        if self.cli.conversational {
            return self.repl(true).await;
        }

        let prompt = self.cli.prompt.as_deref().expect("validated");
        let mut session = self.load_or_new_session()?;
        self.one_turn(prompt, session.as_mut()).await?;
        self.save_session(session.as_ref())?;
        Ok(())
    }

    fn list_tools(&self) -> Result<()> {
        println!("Available tools:");
        for tool in self.engine.tools().iter() {
            let perms: Vec<&str> = tool
                .required_permissions()
                .iter()
                .map(|p| p.as_str())
                .collect();
            let perms = if perms.is_empty() {
                "none".to_string()
            } else {
                perms.join(", ")
            };
            println!("  {:<12} {} (permissions: {})", tool.name(), tool.description(), perms);
        }
        Ok(())
    }

    fn list_skills(&self) -> Result<()> {
        let skills = self.engine.skills();
        if skills.is_empty() {
            println!(
                "No skills found under {}",
                SkillRegistry::default_root().display()
            );
            return Ok(());
        }
        println!("Discovered skills:");
        for meta in skills.iter() {
            println!("  {:<16} {}", meta.name, meta.description);
        }
        Ok(())
    }

    fn list_sessions(&self) -> Result<()> {
        let names = self.store.list()?;
        if names.is_empty() {
            println!("No saved sessions in {}", self.store.root().display());
            return Ok(());
        }
        println!("Saved sessions:");
        for name in names {
            println!("  {}", name);
        }
        Ok(())
    }

    /// Session for this invocation: resumed, fresh (when saving), or none
    fn load_or_new_session(&self) -> Result<Option<Session>> {
        if let Some(name) = &self.cli.resume_session {
            let session = self
                .store
                .load(name)
                .with_context(|| format!("cannot resume session '{}'", name))?;
            return Ok(Some(session));
        }
        if self.cli.save_session.is_some() || self.cli.conversational {
            return Ok(Some(Session::new()));
        }
        Ok(None)
    }

    fn save_session(&self, session: Option<&Session>) -> Result<()> {
        if let (Some(name), Some(session)) = (&self.cli.save_session, session) {
            self.store.save(session, name)?;
        }
        Ok(())
    }

    /// Run one turn and print the outcome
    async fn one_turn(&self, prompt: &str, session: Option<&mut Session>) -> Result<()> {
        if self.cli.no_route {
            return self.plain_turn(prompt, session).await;
        }

        let artifact = match self.engine.run_turn(prompt, session).await {
            Ok(artifact) => artifact,
            Err(EngineError::PermissionDenied(err)) => {
                self.explain_denial(&err);
                bail!("turn aborted: {}", err);
            }
            Err(err) => return Err(err.into()),
        };

        if self.cli.verbose {
            if let Some(decision) = &artifact.decision {
                eprintln!(
                    "[route] {} -> {} ({:.2}): {}",
                    decision.target_type,
                    decision.target.as_deref().unwrap_or("-"),
                    decision.confidence,
                    decision.reasoning
                );
            }
            if let Some(result) = &artifact.tool_result {
                eprintln!("[tool] {} status={:?}", result.tool_name, result.status);
            }
        }

        println!("{}", artifact.response.content);
        self.write_artifact(&artifact)?;
        Ok(())
    }

    /// Unrouted turn, optionally streamed
    async fn plain_turn(&self, prompt: &str, session: Option<&mut Session>) -> Result<()> {
        if self.cli.stream {
            let mut stream = self.engine.execute_stream(prompt, session.as_deref()).await?;
            let mut done = None;
            while let Some(event) = stream.next().await {
                match event? {
                    StreamEvent::Token(token) => {
                        print!("{}", token);
                        std::io::stdout().flush().ok();
                    }
                    StreamEvent::Done(response) => done = Some(response),
                }
            }
            println!();
            if let Some(response) = done {
                if let Some(session) = session {
                    session.record_exchange(prompt, &response.content);
                }
                self.write_artifact(&ExecutionArtifact::new(prompt, response))?;
            }
            return Ok(());
        }

        let response = self.engine.execute(prompt, session).await?;
        println!("{}", response.content);
        self.write_artifact(&ExecutionArtifact::new(prompt, response))?;
        Ok(())
    }

    /// Tell the operator exactly which grants would allow the action
    fn explain_denial(&self, err: &GateError) {
        let GateError::PermissionDenied { action, missing } = err;
        eprintln!("permission denied: tool '{}' needs:", action);
        for permission in missing {
            eprintln!("  --grant {}", permission);
        }
    }

    fn write_artifact(&self, artifact: &ExecutionArtifact) -> Result<()> {
        if let Some(path) = &self.cli.artifact {
            let json = artifact.to_json()?;
            std::fs::write(path, json)
                .with_context(|| format!("cannot write artifact to {}", path.display()))?;
            if self.cli.verbose {
                eprintln!("[artifact] wrote {}", path.display());
            }
        }
        Ok(())
    }

    /// Read-eval-print loop; `with_history` keeps a growing session
    async fn repl(&self, with_history: bool) -> Result<()> {
        let mut session = if with_history {
            Some(self.load_or_new_session()?.unwrap_or_default())
        } else {
            None
        };

        let mode = if with_history { "conversational" } else { "stateless" };
        println!("relay {} REPL - model {} (exit to quit)", mode, self.model_label());

        let stdin = std::io::stdin();
        loop {
            print!("> ");
            std::io::stdout().flush().ok();

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                break; // EOF
            }
            let prompt = line.trim();
            if prompt.is_empty() {
                continue;
            }
            if prompt == "exit" || prompt == "quit" {
                break;
            }

            // A failed turn (denial, backend error) ends neither the loop
            // nor the session
            if let Err(err) = self.one_turn(prompt, session.as_mut()).await {
                eprintln!("{}", err);
                continue;
            }
            self.save_session(session.as_ref())?;
        }
        Ok(())
    }

    fn model_label(&self) -> &str {
        if self.cli.mock {
            "mock"
        } else {
            &self.cli.model
        }
    }
}
