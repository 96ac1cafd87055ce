//! Interactive command layer for the Makai Directory Manager.
//!
//! Commands are registered by name in a [`CommandRegistry`] and dispatched
//! against a [`CommandContext`] holding the directory tree, the session
//! history, and the output sink. Handlers never terminate the session on
//! error; failures surface as [`CommandError`]s the prompt loop reports.

pub mod parser;

use crate::config::display::SortKey;
use crate::config::MakaiConfig;
use crate::error::command::CommandError;
use crate::error::MakaiResult;
use crate::tree::info::{FileKind, TreeEntry};
use crate::tree::{DirectoryTree, EntryFilter};
use parser::ParsedCommand;
use std::collections::HashMap;
use std::io::Write;
use tracing::debug;

/// ANSI sequence clearing the screen and homing the cursor.
const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

/// What the prompt loop should do after a command completes.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Keep prompting
    Continue,

    /// Leave the session
    Exit,

    /// Re-execute the 1-based history entry
    Repeat(usize),
}

/// Everything a command handler may touch.
pub struct CommandContext<'a> {
    /// The directory index
    pub tree: &'a mut DirectoryTree,

    /// Commands entered so far, oldest first
    pub history: &'a [String],

    /// Effective configuration
    pub config: &'a MakaiConfig,

    /// Sink for user-facing output
    pub out: &'a mut dyn Write,
}

/// A command handler: the registry is passed in so handlers like `help`
/// can enumerate their peers.
type CommandHandler =
    fn(&CommandRegistry, &mut CommandContext<'_>, &ParsedCommand) -> MakaiResult<CommandOutcome>;

struct RegisteredCommand {
    handler: CommandHandler,
    usage: &'static str,
}

/// Name-to-handler table for the interactive session.
pub struct CommandRegistry {
    handlers: HashMap<&'static str, RegisteredCommand>,
}

impl CommandRegistry {
    /// Creates a registry with every built-in command registered.
    pub fn new() -> Self {
        let mut registry = Self {
            handlers: HashMap::new(),
        };

        registry.register("add", "add <directory>", add);
        registry.register("delete", "delete <path>", delete);
        registry.register("view", "view [directory] [-sort name|size|time] [-r]", view);
        registry.register(
            "filter",
            "filter <directory> [-prefix p] [-ftype kind] [-gt size] [-lt size]",
            filter,
        );
        registry.register("glob", "glob <pattern>", glob);
        registry.register("history", "history", history);
        registry.register("!", "! <index>", repeat);
        registry.register("help", "help", help);
        registry.register("clear", "clear", clear);
        registry.register("exit", "exit", exit);

        registry
    }

    fn register(&mut self, name: &'static str, usage: &'static str, handler: CommandHandler) {
        self.handlers
            .insert(name, RegisteredCommand { handler, usage });
    }

    /// Parses and executes one command line.
    ///
    /// Blank lines are a no-op. Unknown command names are a
    /// [`CommandError::UnknownCommand`].
    pub fn dispatch(
        &self,
        ctx: &mut CommandContext<'_>,
        line: &str,
    ) -> MakaiResult<CommandOutcome> {
        let parsed = match parser::parse_line(line) {
            Some(parsed) => parsed,
            None => return Ok(CommandOutcome::Continue),
        };

        let command = self
            .handlers
            .get(parsed.name.as_str())
            .ok_or_else(|| CommandError::UnknownCommand(parsed.name.clone()))?;

        debug!(command = %parsed.name, "Dispatching command");
        (command.handler)(self, ctx, &parsed)
    }

    /// Usage lines for every registered command, sorted by name.
    pub fn usage_lines(&self) -> Vec<&'static str> {
        let mut lines: Vec<_> = self
            .handlers
            .values()
            .map(|command| command.usage)
            .collect();
        lines.sort_unstable();
        lines
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn add(
    _registry: &CommandRegistry,
    ctx: &mut CommandContext<'_>,
    parsed: &ParsedCommand,
) -> MakaiResult<CommandOutcome> {
    let directory = parsed.require_positional(0, "directory")?;
    let report = ctx.tree.add(directory)?;
    writeln!(
        ctx.out,
        "Indexed {} directories and {} files ({})",
        report.directories,
        report.files,
        crate::tree::info::human_size(report.total_bytes)
    )?;
    Ok(CommandOutcome::Continue)
}

fn delete(
    _registry: &CommandRegistry,
    ctx: &mut CommandContext<'_>,
    parsed: &ParsedCommand,
) -> MakaiResult<CommandOutcome> {
    let path = parsed.require_positional(0, "path")?;
    writeln!(ctx.out, "Deleting: {path}")?;
    if !ctx.tree.delete(path)? {
        writeln!(ctx.out, "Nothing stored at: {path}")?;
    }
    Ok(CommandOutcome::Continue)
}

fn view(
    _registry: &CommandRegistry,
    ctx: &mut CommandContext<'_>,
    parsed: &ParsedCommand,
) -> MakaiResult<CommandOutcome> {
    match parsed.positionals.first() {
        Some(directory) => {
            writeln!(ctx.out, "Viewing: {directory}")?;
            let entries = ctx.tree.view(directory)?;
            write_entries(ctx, &entries)?;
        }
        None => {
            let sort_by = match parsed.option("sort") {
                Some(name) => {
                    SortKey::parse(name).ok_or_else(|| CommandError::InvalidArgument {
                        what: "sort".to_string(),
                        value: name.to_string(),
                        message: "valid columns: name, size, time".to_string(),
                    })?
                }
                None => ctx.config.display.sort_by,
            };
            let reverse = parsed.flag("r") || ctx.config.display.reverse;
            let entries = ctx.tree.table_view(sort_by, reverse);
            write_entries(ctx, &entries)?;
        }
    }
    Ok(CommandOutcome::Continue)
}

fn filter(
    _registry: &CommandRegistry,
    ctx: &mut CommandContext<'_>,
    parsed: &ParsedCommand,
) -> MakaiResult<CommandOutcome> {
    let directory = parsed.require_positional(0, "directory")?;
    writeln!(ctx.out, "Filtering: {directory}")?;

    let kind = match parsed.option("ftype") {
        Some(name) => Some(FileKind::parse(name).ok_or_else(|| {
            CommandError::InvalidArgument {
                what: "ftype".to_string(),
                value: name.to_string(),
                message: format!("valid types: {}", FileKind::names().join(", ")),
            }
        })?),
        None => None,
    };
    let gt = match parsed.option("gt") {
        Some(value) => Some(parser::parse_size("gt", value)?),
        None => None,
    };
    let lt = match parsed.option("lt") {
        Some(value) => Some(parser::parse_size("lt", value)?),
        None => None,
    };

    let entry_filter = EntryFilter {
        prefix: parsed.option("prefix").map(str::to_string),
        kind,
        gt,
        lt,
    };
    let entries = ctx.tree.filter(directory, &entry_filter)?;
    write_entries(ctx, &entries)?;
    Ok(CommandOutcome::Continue)
}

fn glob(
    _registry: &CommandRegistry,
    ctx: &mut CommandContext<'_>,
    parsed: &ParsedCommand,
) -> MakaiResult<CommandOutcome> {
    let pattern = parsed.require_positional(0, "pattern")?;
    let entries = ctx.tree.glob(pattern)?;
    write_entries(ctx, &entries)?;
    Ok(CommandOutcome::Continue)
}

fn history(
    _registry: &CommandRegistry,
    ctx: &mut CommandContext<'_>,
    _parsed: &ParsedCommand,
) -> MakaiResult<CommandOutcome> {
    let width = ctx.history.len().to_string().len();
    for (index, line) in ctx.history.iter().enumerate() {
        writeln!(ctx.out, "{:>width$}  {line}", index + 1)?;
    }
    Ok(CommandOutcome::Continue)
}

fn repeat(
    _registry: &CommandRegistry,
    ctx: &mut CommandContext<'_>,
    parsed: &ParsedCommand,
) -> MakaiResult<CommandOutcome> {
    let raw = parsed.require_positional(0, "index")?;
    let index: usize = raw
        .parse()
        .map_err(|_| CommandError::InvalidHistoryIndex(raw.to_string()))?;
    if index < 1 || index > ctx.history.len() {
        return Err(CommandError::InvalidHistoryIndex(raw.to_string()).into());
    }
    writeln!(ctx.out, "{}", ctx.history[index - 1])?;
    Ok(CommandOutcome::Repeat(index))
}

fn help(
    registry: &CommandRegistry,
    ctx: &mut CommandContext<'_>,
    _parsed: &ParsedCommand,
) -> MakaiResult<CommandOutcome> {
    writeln!(ctx.out, "Available commands:")?;
    for usage in registry.usage_lines() {
        writeln!(ctx.out, " - {usage}")?;
    }
    Ok(CommandOutcome::Continue)
}

fn clear(
    _registry: &CommandRegistry,
    ctx: &mut CommandContext<'_>,
    _parsed: &ParsedCommand,
) -> MakaiResult<CommandOutcome> {
    write!(ctx.out, "{CLEAR_SCREEN}")?;
    Ok(CommandOutcome::Continue)
}

fn exit(
    _registry: &CommandRegistry,
    ctx: &mut CommandContext<'_>,
    _parsed: &ParsedCommand,
) -> MakaiResult<CommandOutcome> {
    writeln!(ctx.out, "Exiting makai_dirman... Goodbye!")?;
    Ok(CommandOutcome::Exit)
}

/// Writes one listing row per entry: path, kind, size, upload time.
fn write_entries(ctx: &mut CommandContext<'_>, entries: &[TreeEntry]) -> MakaiResult<()> {
    if entries.is_empty() {
        writeln!(ctx.out, "(no entries)")?;
        return Ok(());
    }

    let path_width = entries
        .iter()
        .map(|entry| entry.path.len())
        .max()
        .unwrap_or(0);
    for entry in entries {
        let size = if ctx.config.display.human_sizes {
            entry.human_size()
        } else {
            match entry.size {
                Some(size) => size.to_string(),
                None => "?".to_string(),
            }
        };
        writeln!(
            ctx.out,
            "{:<path_width$}  {:<11}  {:>10}  {}",
            entry.path,
            entry.kind.to_string(),
            size,
            entry.uploaded_display()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_parts() -> (DirectoryTree, Vec<String>, MakaiConfig, Vec<u8>) {
        (
            DirectoryTree::new(),
            Vec::new(),
            MakaiConfig::default(),
            Vec::new(),
        )
    }

    fn dispatch_line(
        line: &str,
        tree: &mut DirectoryTree,
        history: &[String],
        config: &MakaiConfig,
        out: &mut Vec<u8>,
    ) -> MakaiResult<CommandOutcome> {
        let registry = CommandRegistry::new();
        let mut ctx = CommandContext {
            tree,
            history,
            config,
            out,
        };
        registry.dispatch(&mut ctx, line)
    }

    #[test]
    fn test_blank_line_is_noop() {
        let (mut tree, history, config, mut out) = context_parts();
        let outcome = dispatch_line("   ", &mut tree, &history, &config, &mut out).unwrap();
        assert_eq!(outcome, CommandOutcome::Continue);
        assert!(out.is_empty());
    }

    #[test]
    fn test_unknown_command_errors() {
        let (mut tree, history, config, mut out) = context_parts();
        let err = dispatch_line("sync now", &mut tree, &history, &config, &mut out).unwrap_err();
        assert!(err.to_string().contains("Unknown command: sync"));
    }

    #[test]
    fn test_exit_outcome() {
        let (mut tree, history, config, mut out) = context_parts();
        let outcome = dispatch_line("exit", &mut tree, &history, &config, &mut out).unwrap();
        assert_eq!(outcome, CommandOutcome::Exit);
    }

    #[test]
    fn test_help_lists_commands() {
        let (mut tree, history, config, mut out) = context_parts();
        dispatch_line("help", &mut tree, &history, &config, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Available commands:"));
        assert!(text.contains("add <directory>"));
        assert!(text.contains("! <index>"));
    }

    #[test]
    fn test_repeat_validates_index() {
        let (mut tree, history, config, mut out) = context_parts();
        let err = dispatch_line("! 3", &mut tree, &history, &config, &mut out).unwrap_err();
        assert!(err.to_string().contains("Invalid history index"));

        let err = dispatch_line("! soon", &mut tree, &history, &config, &mut out).unwrap_err();
        assert!(err.to_string().contains("Invalid history index"));
    }

    #[test]
    fn test_repeat_returns_target() {
        let (mut tree, _, config, mut out) = context_parts();
        let history = vec!["help".to_string(), "view".to_string()];
        let outcome = dispatch_line("! 2", &mut tree, &history, &config, &mut out).unwrap();
        assert_eq!(outcome, CommandOutcome::Repeat(2));
        assert_eq!(String::from_utf8(out).unwrap(), "view\n");
    }

    #[test]
    fn test_view_missing_directory_lists_nothing() {
        let (mut tree, history, config, mut out) = context_parts();
        dispatch_line("view ghost", &mut tree, &history, &config, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Viewing: ghost"));
        assert!(text.contains("(no entries)"));
    }

    #[test]
    fn test_filter_rejects_bad_ftype() {
        let (mut tree, history, config, mut out) = context_parts();
        let err = dispatch_line(
            "filter data -ftype spreadsheet",
            &mut tree,
            &history,
            &config,
            &mut out,
        )
        .unwrap_err();
        assert!(err.to_string().contains("valid types"));
    }

    #[test]
    fn test_add_missing_argument() {
        let (mut tree, history, config, mut out) = context_parts();
        let err = dispatch_line("add", &mut tree, &history, &config, &mut out).unwrap_err();
        assert!(err.to_string().contains("missing required argument"));
    }
}
