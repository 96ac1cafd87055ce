//! Interactive prompt session for the Makai Directory Manager.
//!
//! A synchronous line loop over stdin/stdout: read a command, record it in
//! the in-memory history, dispatch it, report errors at the prompt and keep
//! going. EOF and `exit` both leave the loop cleanly.

use crate::commands::{CommandContext, CommandOutcome, CommandRegistry};
use crate::config::MakaiConfig;
use crate::error::command::CommandError;
use crate::error::{report_error, ErrorContext, MakaiResult};
use crate::tree::DirectoryTree;
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// Upper bound on `!` chains, so a history entry repeating itself cannot
/// wedge the session.
const MAX_REPEAT_CHAIN: usize = 32;

/// Interactive session state: the index, the command table, and history.
pub struct Repl {
    registry: CommandRegistry,
    tree: DirectoryTree,
    history: Vec<String>,
    config: MakaiConfig,
}

impl Repl {
    /// Creates a session from the effective configuration.
    pub fn new(config: MakaiConfig) -> Self {
        Self {
            registry: CommandRegistry::new(),
            tree: DirectoryTree::with_config(config.scan.clone()),
            history: Vec::new(),
            config,
        }
    }

    /// Runs the prompt loop until `exit` or EOF.
    pub fn run(&mut self, input: &mut dyn BufRead, output: &mut dyn Write) -> MakaiResult<()> {
        info!("Starting interactive session");

        loop {
            write!(output, "{}", self.config.repl.prompt)?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(output)?;
                break;
            }

            match self.execute_line(line.trim_end(), output) {
                Ok(CommandOutcome::Exit) => break,
                Ok(_) => {}
                Err(err) => {
                    // Command failures are prompt-level events, not session
                    // enders.
                    writeln!(output, "{err}")?;
                    report_error(ErrorContext::new(err, "repl"));
                }
            }
        }

        info!("Interactive session ended");
        Ok(())
    }

    /// Records and executes one command line, following `!` repeats.
    pub fn execute_line(
        &mut self,
        line: &str,
        output: &mut dyn Write,
    ) -> MakaiResult<CommandOutcome> {
        if !line.trim().is_empty() {
            self.record(line);
        }

        let mut current = line.to_string();
        for _ in 0..MAX_REPEAT_CHAIN {
            let mut ctx = CommandContext {
                tree: &mut self.tree,
                history: &self.history,
                config: &self.config,
                out: output,
            };
            match self.registry.dispatch(&mut ctx, &current)? {
                CommandOutcome::Repeat(index) => {
                    debug!(index, "Repeating history entry");
                    current = self.history[index - 1].clone();
                }
                outcome => return Ok(outcome),
            }
        }

        Err(CommandError::InvalidHistoryIndex(format!(
            "repeat chain longer than {MAX_REPEAT_CHAIN}"
        ))
        .into())
    }

    fn record(&mut self, line: &str) {
        self.history.push(line.to_string());
        if self.history.len() > self.config.repl.history_limit {
            let overflow = self.history.len() - self.config.repl.history_limit;
            self.history.drain(..overflow);
        }
    }

    /// Commands entered so far, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repl() -> Repl {
        Repl::new(MakaiConfig::default())
    }

    #[test]
    fn test_execute_records_history() {
        let mut repl = repl();
        let mut out = Vec::new();

        repl.execute_line("help", &mut out).unwrap();
        repl.execute_line("   ", &mut out).unwrap();
        repl.execute_line("view", &mut out).unwrap();

        assert_eq!(repl.history(), ["help".to_string(), "view".to_string()]);
    }

    #[test]
    fn test_history_limit_drops_oldest() {
        let mut config = MakaiConfig::default();
        config.repl.history_limit = 2;
        let mut repl = Repl::new(config);
        let mut out = Vec::new();

        repl.execute_line("help", &mut out).unwrap();
        repl.execute_line("view", &mut out).unwrap();
        repl.execute_line("history", &mut out).unwrap();

        assert_eq!(repl.history(), ["view".to_string(), "history".to_string()]);
    }

    #[test]
    fn test_repeat_executes_earlier_command() {
        let mut repl = repl();
        let mut out = Vec::new();

        repl.execute_line("help", &mut out).unwrap();
        out.clear();
        let outcome = repl.execute_line("! 1", &mut out).unwrap();

        assert_eq!(outcome, CommandOutcome::Continue);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Available commands:"));
    }

    #[test]
    fn test_self_repeat_is_cut_off() {
        let mut repl = repl();
        let mut out = Vec::new();

        let err = repl.execute_line("! 1", &mut out).unwrap_err();
        assert!(err.to_string().contains("repeat chain"));
    }

    #[test]
    fn test_run_exits_on_eof() {
        let mut repl = repl();
        let mut input = std::io::Cursor::new(b"help\n".to_vec());
        let mut out = Vec::new();

        repl.run(&mut input, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Available commands:"));
    }

    #[test]
    fn test_run_exits_on_exit_command() {
        let mut repl = repl();
        let mut input = std::io::Cursor::new(b"exit\nhelp\n".to_vec());
        let mut out = Vec::new();

        repl.run(&mut input, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Goodbye!"));
        assert!(!text.contains("Available commands:"));
    }
}
