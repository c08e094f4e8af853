use std::io::{self, Write};
use std::sync::Arc;
use anyhow::Context;
use crossterm::cursor::MoveTo;
use crossterm::terminal::{Clear, ClearType};
use crossterm::queue;
use td_core::{Result, Weight};
use td_view::CatalogView;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;
use crate::render::Renderer;

pub const HELP: &str = "\
Commands:
  tag <name>            select the tag to query
  score <0-100>         minimum score threshold
  models [a, b, ...]    restrict to models (empty clears)
  sources [a, b, ...]   restrict to sources (empty clears)
  apply                 fetch articles for the current filters
  search [text]         narrow the list locally (also: /text)
  open <n>              show article n of the list
  close                 close the article view
  reset                 clear filters and results
  reload                fetch the tag list again
  help                  show this text
  quit                  leave";

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Tag(String),
    Score(Weight),
    Models(Vec<String>),
    Sources(Vec<String>),
    Apply,
    Search(String),
    Open(usize),
    Close,
    Reset,
    Reload,
    Help,
    Quit,
    Noop,
}

fn split_list(args: &str) -> Vec<String> {
    args.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl ShellCommand {
    pub fn parse(line: &str) -> std::result::Result<Self, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(ShellCommand::Noop);
        }
        if let Some(query) = line.strip_prefix('/') {
            return Ok(ShellCommand::Search(query.to_string()));
        }

        let (word, args) = match line.split_once(char::is_whitespace) {
            Some((word, args)) => (word, args.trim()),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            "tag" if args.is_empty() => Err("Usage: tag <name>".to_string()),
            "tag" => Ok(ShellCommand::Tag(args.to_string())),
            "score" => args
                .parse::<Weight>()
                .ok()
                .filter(|score| *score <= td_core::filter::MAX_SCORE)
                .map(ShellCommand::Score)
                .ok_or_else(|| "Usage: score <0-100>".to_string()),
            "models" | "model" => Ok(ShellCommand::Models(split_list(args))),
            "sources" | "source" => Ok(ShellCommand::Sources(split_list(args))),
            "apply" => Ok(ShellCommand::Apply),
            "search" => Ok(ShellCommand::Search(args.to_string())),
            "open" => args
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .map(ShellCommand::Open)
                .ok_or_else(|| "Usage: open <n>, counting from 1".to_string()),
            "close" => Ok(ShellCommand::Close),
            "reset" => Ok(ShellCommand::Reset),
            "reload" => Ok(ShellCommand::Reload),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
            other => Err(format!("Unknown command: {} (try help)", other)),
        }
    }
}

fn redraw(renderer: &Renderer, state: &td_view::ViewState) -> io::Result<()> {
    let mut out = io::stdout().lock();
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    renderer.screen(&mut out, state)?;
    write!(out, "\n> ")?;
    out.flush()
}

/// Runs one command. Fetches are spawned so the prompt stays responsive.
/// Returns false once the user asked to leave.
async fn execute(view: &Arc<CatalogView>, command: ShellCommand) -> bool {
    match command {
        ShellCommand::Tag(name) => view.select_tag(name).await,
        ShellCommand::Score(score) => view.set_min_score(score).await,
        ShellCommand::Models(models) => view.set_models(models).await,
        ShellCommand::Sources(sources) => view.set_sources(sources).await,
        ShellCommand::Apply => {
            let view = view.clone();
            tokio::spawn(async move {
                let _ = view.apply_filters().await;
            });
        }
        ShellCommand::Search(query) => view.set_search_query(query).await,
        ShellCommand::Open(position) => {
            let view = view.clone();
            tokio::spawn(async move {
                // Out-of-range positions land in the view's error line
                let _ = view.open_detail_at(position - 1).await;
            });
        }
        ShellCommand::Close => view.close_detail().await,
        ShellCommand::Reset => view.reset().await,
        ShellCommand::Reload => {
            let view = view.clone();
            tokio::spawn(async move {
                let _ = view.load_tags().await;
            });
        }
        ShellCommand::Help => println!("{}", HELP),
        ShellCommand::Quit => return false,
        ShellCommand::Noop => {}
    }
    true
}

/// Interactive browser: commands come from stdin, the screen is redrawn on every state change
pub async fn run_browse(view: CatalogView, renderer: Renderer) -> Result<()> {
    let view = Arc::new(view);

    let mut changes = view.subscribe();
    let render_view = view.clone();
    let render_loop = tokio::spawn(async move {
        while changes.changed().await.is_ok() {
            let state = render_view.snapshot().await;
            if let Err(err) = redraw(&renderer, &state) {
                debug!("Redraw failed: {}", err);
                break;
            }
        }
    });

    let tags_view = view.clone();
    tokio::spawn(async move {
        let _ = tags_view.load_tags().await;
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("reading command")? {
        match ShellCommand::parse(&line) {
            Ok(command) => {
                debug!("Command: {:?}", command);
                if !execute(&view, command).await {
                    break;
                }
            }
            Err(message) => eprintln!("{}", message),
        }
    }

    render_loop.abort();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(ShellCommand::parse("tag ai"), Ok(ShellCommand::Tag("ai".to_string())));
        assert_eq!(ShellCommand::parse("  score 70 "), Ok(ShellCommand::Score(70)));
        assert_eq!(ShellCommand::parse("APPLY"), Ok(ShellCommand::Apply));
        assert_eq!(ShellCommand::parse("open 2"), Ok(ShellCommand::Open(2)));
        assert_eq!(ShellCommand::parse("q"), Ok(ShellCommand::Quit));
        assert_eq!(ShellCommand::parse(""), Ok(ShellCommand::Noop));
    }

    #[test]
    fn test_parse_lists() {
        assert_eq!(
            ShellCommand::parse("models bert, gpt ,"),
            Ok(ShellCommand::Models(vec!["bert".to_string(), "gpt".to_string()]))
        );
        assert_eq!(ShellCommand::parse("sources"), Ok(ShellCommand::Sources(vec![])));
    }

    #[test]
    fn test_parse_search_forms() {
        assert_eq!(ShellCommand::parse("/rust async"), Ok(ShellCommand::Search("rust async".to_string())));
        assert_eq!(ShellCommand::parse("search"), Ok(ShellCommand::Search(String::new())));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(ShellCommand::parse("score 101").is_err());
        assert!(ShellCommand::parse("score high").is_err());
        assert!(ShellCommand::parse("open 0").is_err());
        assert!(ShellCommand::parse("tag").is_err());
        assert!(ShellCommand::parse("frobnicate").is_err());
    }
}
