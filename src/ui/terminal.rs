use super::binder::{Binder, ClickOutcome, TextKind, TextTarget};
use super::commands::{Command, ProviderKind, COMMAND_BOX};
use crate::config::Config;
use crate::models::{Error, Result};
use crate::providers::{CozeProvider, DeepSeekProvider};
use crate::transport::HttpTransport;
use crate::ChatClient;
use colored::*;
use rustyline::{config::Configurer, error::ReadlineError, DefaultEditor};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use terminal_size::{terminal_size, Width};
use textwrap::{wrap, Options};

/// The line under the prompt. A placeholder is overwritten in place by
/// whatever text follows it.
struct TerminalLine {
    width: usize,
    pending: AtomicBool,
}

impl TerminalLine {
    fn write(&self, text: &str, kind: TextKind) -> io::Result<()> {
        let mut out = io::stdout().lock();
        if self.pending.swap(false, Ordering::SeqCst) {
            write!(out, "\r{}\r", " ".repeat(self.width))?;
        }

        match kind {
            TextKind::Placeholder => {
                write!(out, "{}", text.yellow())?;
                self.pending.store(true, Ordering::SeqCst);
            }
            TextKind::Error => {
                let options = Options::new(self.width).initial_indent("  ").subsequent_indent("  ");
                for line in wrap(text, &options) {
                    writeln!(out, "{}", line.red())?;
                }
                writeln!(out)?;
            }
            TextKind::Reply => {
                writeln!(out, "{}", text.cyan())?;
                writeln!(out)?;
            }
        }
        out.flush()
    }
}

impl TextTarget for TerminalLine {
    fn set_text(&self, text: &str, kind: TextKind) {
        if let Err(e) = self.write(text, kind) {
            log::error!("failed to write to terminal: {}", e);
        }
    }
}

pub struct TerminalUI {
    deepseek: Option<Binder<DeepSeekProvider>>,
    coze: Option<Binder<CozeProvider>>,
    active: ProviderKind,
    line: TerminalLine,
    editor: DefaultEditor,
    history_file: PathBuf,
}

impl TerminalUI {
    pub fn new(config: &Config) -> Result<Self> {
        let width = match terminal_size() {
            Some((Width(w), _)) => (w as usize).saturating_sub(2).max(20),
            None => 80,
        };

        let deepseek = config.deepseek.as_ref().map(|c| {
            let client = ChatClient::with_transport(c.build(), HttpTransport::with_timeout(config.timeout));
            Binder::new(Arc::new(client))
                .with_placeholder(config.placeholder.as_str())
                .with_error_prefix(config.error_prefix.as_str())
        });
        let coze = config.coze.as_ref().map(|c| {
            let client = ChatClient::with_transport(c.build(), HttpTransport::with_timeout(config.timeout));
            Binder::new(Arc::new(client))
                .with_placeholder(config.placeholder.as_str())
                .with_error_prefix(config.error_prefix.as_str())
        });

        let active = if deepseek.is_some() {
            ProviderKind::DeepSeek
        } else {
            ProviderKind::Coze
        };

        let mut editor = DefaultEditor::new()?;
        editor.set_max_history_size(100)?;

        let history_file = dirs::home_dir()
            .map(|mut path| {
                path.push(".oneshot_chat_history");
                path
            })
            .unwrap_or_else(|| ".oneshot_chat_history".into());

        if history_file.exists() {
            let _ = editor.load_history(&history_file);
        }

        Ok(Self {
            deepseek,
            coze,
            active,
            line: TerminalLine {
                width,
                pending: AtomicBool::new(false),
            },
            editor,
            history_file,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        clearscreen::clear()?;
        self.show_command_box();
        self.show_providers();

        loop {
            let prompt = format!("{} ", format!("{:?}>", self.active).blue().bold());
            match self.editor.readline(&prompt) {
                Ok(line) => match line.parse::<Command>() {
                    Ok(Command::Exit) => {
                        let _ = self.editor.save_history(&self.history_file);
                        break;
                    }
                    Ok(Command::Clear) => {
                        clearscreen::clear()?;
                        self.show_command_box();
                    }
                    Ok(Command::Providers) => self.show_providers(),
                    Ok(Command::Use(kind)) => {
                        if self.is_configured(kind) {
                            self.active = kind;
                            println!("{}", format!("Using {:?}", kind).green());
                        } else {
                            println!("{}", format!("{:?} has no credentials configured", kind).red());
                        }
                    }
                    Ok(Command::Message(input)) => {
                        if !input.is_empty() {
                            self.editor.add_history_entry(&input)?;
                            self.handle_message(&input).await;
                        }
                    }
                    Err(e) => println!("{}", e.red()),
                },
                Err(ReadlineError::Interrupted) => {
                    println!("Use 'exit' to quit");
                    continue;
                }
                Err(ReadlineError::Eof) => break,
                Err(err) => return Err(Error::from(err)),
            }
        }

        Ok(())
    }

    fn is_configured(&self, kind: ProviderKind) -> bool {
        match kind {
            ProviderKind::DeepSeek => self.deepseek.is_some(),
            ProviderKind::Coze => self.coze.is_some(),
        }
    }

    fn show_command_box(&self) {
        println!("{}", COMMAND_BOX.green());
        println!();
    }

    fn show_providers(&self) {
        for kind in [ProviderKind::DeepSeek, ProviderKind::Coze] {
            let marker = if kind == self.active { "*" } else { " " };
            let state = if self.is_configured(kind) {
                "configured".green()
            } else {
                "missing credentials".red()
            };
            println!("{} {:<10} {}", marker, format!("{:?}", kind), state);
        }
        println!();
    }

    async fn handle_message(&self, input: &str) {
        let outcome = match self.active {
            ProviderKind::DeepSeek => match &self.deepseek {
                Some(binder) => binder.click(input, &self.line).await,
                None => return,
            },
            ProviderKind::Coze => match &self.coze {
                Some(binder) => binder.click(input, &self.line).await,
                None => return,
            },
        };

        if let ClickOutcome::Stale = outcome {
            log::debug!("reply superseded before it could be shown");
        }
    }
}
