use std::io::BufRead;

use deepenglish_core::display::{WordSpan, render};
use deepenglish_types::{AppEvent, Direction, UiEvent};
use kanal::{AsyncReceiver, AsyncSender};
use tokio_util::sync::CancellationToken;

const HELP: &str = "\
Type a word to look it up.
  :p / :n           previous / next word
  :a [word]         play pronunciation (current word by default)
  :w <n>            look up the n-th word of the example sentence
  :settings         show settings
  :key <api key>    set the DeepSeek API key
  :system <text>    set the system prompt
  :template <text>  set the prompt template (must contain {word})
  :q                quit";

#[derive(Debug)]
pub enum Command {
    Send(Vec<AppEvent>),
    Help,
    Unknown(String),
}

/// Terminal stand-in for the app's screen: remembers what is displayed
/// so commands can refer to it.
#[derive(Default)]
pub struct TerminalUi {
    current_word: Option<String>,
    spans: Vec<WordSpan>,
}

impl TerminalUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn command(&self, line: &str) -> Command {
        let line = line.trim();

        let Some(rest) = line.strip_prefix(':') else {
            return Command::Send(vec![AppEvent::Lookup(line.to_string())]);
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        match name {
            "q" | "quit" => Command::Send(vec![AppEvent::Shutdown]),
            "p" | "prev" => Command::Send(vec![AppEvent::Navigate(Direction::Previous)]),
            "n" | "next" => Command::Send(vec![AppEvent::Navigate(Direction::Next)]),
            "a" | "audio" => {
                let word = if arg.is_empty() {
                    self.current_word.clone().unwrap_or_default()
                } else {
                    arg.to_string()
                };
                Command::Send(vec![AppEvent::PlayAudio(word)])
            }
            "w" | "word" => match arg.parse::<usize>().ok().and_then(|n| self.span(n)) {
                Some(word) => Command::Send(vec![
                    AppEvent::PlayAudio(word.clone()),
                    AppEvent::Lookup(word),
                ]),
                None => Command::Unknown(format!("No word #{arg} in the sentence")),
            },
            "settings" => Command::Send(vec![AppEvent::UiEvent(UiEvent::ShowSettings)]),
            "key" => Command::Send(vec![AppEvent::UiEvent(UiEvent::SetApiKey(arg.to_string()))]),
            "system" => Command::Send(vec![AppEvent::UiEvent(UiEvent::SetSystemPrompt(
                arg.to_string(),
            ))]),
            "template" => Command::Send(vec![AppEvent::UiEvent(UiEvent::SetPromptTemplate(
                arg.to_string(),
            ))]),
            "h" | "help" => Command::Help,
            other => Command::Unknown(format!("Unknown command :{other}")),
        }
    }

    /// 1-based word of the displayed sentence
    fn span(&self, n: usize) -> Option<String> {
        n.checked_sub(1)
            .and_then(|i| self.spans.get(i))
            .map(|s| s.text.clone())
    }

    /// Text to print for an event from the app, if any
    pub fn show(&mut self, event: AppEvent) -> Option<String> {
        match event {
            AppEvent::ShowRecord {
                record,
                can_previous,
                can_next,
                ..
            } => {
                let rendered = render(&record);
                self.current_word = Some(record.word);
                self.spans = rendered.spans;

                let words: Vec<String> = self
                    .spans
                    .iter()
                    .enumerate()
                    .map(|(i, s)| format!("{}:{}", i + 1, s.text))
                    .collect();

                let mut out = rendered.text;
                if !words.is_empty() {
                    out.push_str(&format!("\n\n[{}]", words.join(" ")));
                }
                out.push_str(&format!(
                    "\n{} {}",
                    if can_previous { "<:p" } else { "   " },
                    if can_next { ":n>" } else { "" }
                ));
                Some(out)
            }
            AppEvent::Notice(message) => Some(format!("> {message}")),
            AppEvent::BackendReady => Some(HELP.to_string()),
            _ => None,
        }
    }
}

/// Line-oriented front end on stdin/stdout
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    // Plain thread so a blocked stdin read never holds up runtime shutdown
    let (line_tx, line_rx) = kanal::bounded::<String>(16);
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });
    let line_rx = line_rx.to_async();

    let mut ui = TerminalUi::new();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            line = line_rx.recv() => {
                let Ok(line) = line else {
                    // stdin closed
                    let _ = ui_to_app_tx.send(AppEvent::Shutdown).await;
                    break;
                };

                match ui.command(&line) {
                    Command::Send(events) => {
                        for event in events {
                            ui_to_app_tx.send(event).await?;
                        }
                    }
                    Command::Help => println!("{HELP}"),
                    Command::Unknown(message) => println!("> {message}"),
                }
            }
            event = app_to_ui_rx.recv() => {
                let Ok(event) = event else { break };
                if let Some(text) = ui.show(event) {
                    println!("{text}\n");
                }
            }
        }
    }

    tracing::info!("UI loop stopped");
    Ok(())
}
