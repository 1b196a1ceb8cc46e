//! Interactive journal screen.
//!
//! A line-oriented terminal screen with two views: `write`, where the entry
//! is composed, and `results`, where result cards are shown. Lines starting
//! with `:` are commands, everything else is appended to the entry.

use crate::client::AnalysisBackend;
use crate::models::AnalysisKind;
use crate::orchestrator::{AnalysisError, AnalysisOrchestrator};
use crate::render;
use anyhow::{Context, Result};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

/// Which view the screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Write,
    Results,
}

/// A parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Append a line to the journal entry.
    Append(String),
    Analyze(AnalysisKind),
    AnalyzeAll,
    Show(View),
    Clear,
    Health,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    /// Parse one input line.
    pub fn parse(line: &str) -> Self {
        let Some(command) = line.trim().strip_prefix(':') else {
            return Command::Append(line.to_string());
        };

        match command.trim().to_lowercase().as_str() {
            "summarize" | "summary" => Command::Analyze(AnalysisKind::Summarize),
            "sentiment" => Command::Analyze(AnalysisKind::Sentiment),
            "insights" => Command::Analyze(AnalysisKind::Insights),
            "all" => Command::AnalyzeAll,
            "write" | "w" => Command::Show(View::Write),
            "results" | "r" => Command::Show(View::Results),
            "clear" => Command::Clear,
            "health" => Command::Health,
            "help" | "h" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            other => Command::Unknown(other.to_string()),
        }
    }
}

/// How urgently a notification should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    /// Must be acknowledged before continuing (input problems).
    Blocking,
    /// Reported alongside the current view.
    NonBlocking,
    Info,
}

/// A message for the user, shown once on the next render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub urgency: Urgency,
    pub title: String,
    pub message: String,
}

impl Notification {
    fn info(title: &str, message: impl Into<String>) -> Self {
        Self {
            urgency: Urgency::Info,
            title: title.to_string(),
            message: message.into(),
        }
    }

    fn render(&self) -> String {
        let icon = match self.urgency {
            Urgency::Blocking => "⛔",
            Urgency::NonBlocking => "⚠️ ",
            Urgency::Info => "ℹ️ ",
        };
        format!("{} {}: {}\n", icon, self.title, self.message)
    }
}

impl From<&AnalysisError> for Notification {
    fn from(error: &AnalysisError) -> Self {
        match error {
            AnalysisError::Validation => Self {
                urgency: Urgency::Blocking,
                title: "Input Required".to_string(),
                message: error.to_string(),
            },
            AnalysisError::RequestFailed { kind, source } => Self {
                urgency: Urgency::NonBlocking,
                title: "Error".to_string(),
                message: format!("{} ({})", source.user_message(), kind),
            },
        }
    }
}

/// Whether the input loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

const HELP: &str = "Type your journal entry line by line. Commands: \
:summarize :sentiment :insights :all :write :results :clear :health :help :quit";

/// The journal screen: entry buffer, view selector and notifications.
pub struct Screen<B> {
    orchestrator: AnalysisOrchestrator<B>,
    view: View,
    entry: String,
    notifications: Vec<Notification>,
    show_metadata: bool,
}

impl<B: AnalysisBackend> Screen<B> {
    /// Create a screen in the write view with an empty entry.
    pub fn new(orchestrator: AnalysisOrchestrator<B>, show_metadata: bool) -> Self {
        Self {
            orchestrator,
            view: View::Write,
            entry: String::new(),
            notifications: Vec::new(),
            show_metadata,
        }
    }

    /// Apply one command.
    pub async fn dispatch(&mut self, command: Command) -> Flow {
        debug!("Screen command: {:?}", command);

        match command {
            Command::Append(line) => {
                self.entry.push_str(&line);
                self.entry.push('\n');
            }
            Command::Analyze(kind) => {
                let from_write = self.view == View::Write;
                match self.orchestrator.analyze(&self.entry, kind).await {
                    Ok(()) if from_write => self.view = View::Results,
                    Ok(()) => {}
                    Err(e) => self.notifications.push(Notification::from(&e)),
                }
            }
            Command::AnalyzeAll => match self.orchestrator.analyze_all(&self.entry).await {
                Ok(report) => {
                    for failure in report.failures() {
                        self.notifications.push(Notification::from(failure));
                    }
                    self.view = View::Results;
                }
                Err(e) => self.notifications.push(Notification::from(&e)),
            },
            Command::Show(view) => self.view = view,
            Command::Clear => self.entry.clear(),
            Command::Health => {
                let notification = match self.orchestrator.backend().health().await {
                    Ok(health) if health.is_healthy() => {
                        Notification::info("Backend", "AI service is healthy")
                    }
                    Ok(health) => Notification {
                        urgency: Urgency::NonBlocking,
                        title: "Backend".to_string(),
                        message: format!("AI service reports status '{}'", health.status),
                    },
                    Err(e) => Notification {
                        urgency: Urgency::NonBlocking,
                        title: "Backend".to_string(),
                        message: e.user_message().to_string(),
                    },
                };
                self.notifications.push(notification);
            }
            Command::Help => self.notifications.push(Notification::info("Help", HELP)),
            Command::Quit => return Flow::Quit,
            Command::Unknown(name) => self.notifications.push(Notification {
                urgency: Urgency::NonBlocking,
                title: "Unknown command".to_string(),
                message: format!(":{} (type :help)", name),
            }),
        }

        Flow::Continue
    }

    /// Render pending notifications and the current view, then clear the
    /// notifications.
    pub fn render(&mut self) -> String {
        let mut output = String::new();

        for notification in self.notifications.drain(..) {
            output.push_str(&notification.render());
        }
        if !output.is_empty() {
            output.push('\n');
        }

        let state = self.orchestrator.state();
        match self.view {
            View::Write => output.push_str(&render::render_write_view(&self.entry, state)),
            View::Results => {
                output.push_str(&render::render_results(state.results(), self.show_metadata))
            }
        }

        output
    }

    /// Run the input loop until `:quit` or end of input.
    pub async fn run<R, W>(&mut self, input: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        writeln!(out, "🤖 AI Journal Summarizer\n{}\n", HELP)?;
        write!(out, "{}", self.render())?;
        out.flush()?;

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await.context("Failed to read input")? {
            let command = Command::parse(&line);
            let redraw = !matches!(command, Command::Append(_));

            if self.dispatch(command).await == Flow::Quit {
                break;
            }
            if redraw {
                write!(out, "\n{}", self.render())?;
                out.flush()?;
            }
        }

        writeln!(out, "👋 Goodbye")?;
        Ok(())
    }
}
