/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint:

- `chat`  — Interactive chat with the scheduling assistant
- `ask`   — One-shot question to the assistant
- `auth`  — Login, registration, logout and profile
- `tasks` — Task CRUD and the month calendar

Handlers stay small and delegate to the library: `api`, `chat` and
`calendar`.
*/

use crate::api::ApiClient;
use crate::chat::{ChatSession, ReplyPacing};
use crate::config::Config;
use crate::credentials::KeyringTokenStore;
use crate::error::Result;
use std::sync::Arc;

// Special commands parser for the chat REPL
pub mod special_commands;

// Task management and calendar commands
pub mod tasks;

/// Build an API client whose token lives in the system keyring
pub fn build_client(config: &Config) -> Result<Arc<ApiClient>> {
    let tokens = Arc::new(KeyringTokenStore::from_config(&config.auth));
    Ok(Arc::new(ApiClient::new(&config.api, tokens)?))
}

/// Build a chat session backed by the configured suggestion endpoint
pub fn build_session(config: &Config, no_delay: bool) -> Result<ChatSession> {
    let client = build_client(config)?;
    let pacing = if no_delay {
        ReplyPacing::none()
    } else {
        ReplyPacing::from(&config.chat)
    };
    Ok(ChatSession::new(client, pacing))
}

// Chat command handler
pub mod chat {
    //! Interactive chat mode handler.
    //!
    //! Runs a readline loop: special commands act on the session, anything
    //! else is submitted to the assistant and its reply is rendered.

    use super::special_commands::{parse_special_command, print_help, SpecialCommand};
    use super::*;
    use crate::chat::render::paint_message;
    use colored::Colorize;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    /// Start interactive chat mode
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration
    /// * `no_delay` - Skip the artificial reply delay
    pub async fn run_chat(config: Config, no_delay: bool) -> Result<()> {
        tracing::info!("Starting interactive chat mode");

        let mut session = build_session(&config, no_delay)?;
        let mut rl = DefaultEditor::new()?;

        print_welcome_banner();
        for message in session.transcript() {
            println!("{}", paint_message(message));
        }

        loop {
            match rl.readline(&format!("{} ", "›".cyan())) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    match parse_special_command(trimmed) {
                        Ok(SpecialCommand::Help) => {
                            print_help();
                            continue;
                        }
                        Ok(SpecialCommand::History) => {
                            for message in session.transcript() {
                                println!("{}", paint_message(message));
                            }
                            continue;
                        }
                        Ok(SpecialCommand::ShowStatus) => {
                            println!(
                                "Messages: {}\nBackend:  {}\n",
                                session.transcript().len(),
                                config.api.base_url
                            );
                            continue;
                        }
                        Ok(SpecialCommand::Exit) => break,
                        Ok(SpecialCommand::None) => {}
                        Err(e) => {
                            eprintln!("{}", e.to_string().red());
                            continue;
                        }
                    }

                    rl.add_history_entry(trimmed)?;

                    println!("{}", "thinking...".dimmed());
                    if let Some((reply, state)) = session.submit(trimmed).await {
                        tracing::debug!("Submission finished: {:?}", state);
                        println!("{}", paint_message(reply));
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    break;
                }
                Err(e) => {
                    tracing::error!("Readline error: {}", e);
                    return Err(e.into());
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    fn print_welcome_banner() {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║              taskmate assistant - Welcome!                   ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("Type '/help' for available commands, 'exit' to quit\n");
    }
}

// One-shot question handler
pub mod ask {
    //! Submit a single message and print the assistant's reply.

    use super::*;
    use crate::chat::render::paint_message;

    /// Ask the assistant one question
    pub async fn run_ask(config: Config, message: String, no_delay: bool) -> Result<()> {
        let mut session = build_session(&config, no_delay)?;
        match session.submit(&message).await {
            Some((reply, state)) => {
                tracing::debug!("Submission finished: {:?}", state);
                print!("{}", paint_message(reply));
            }
            None => {
                tracing::warn!("Empty message, nothing to ask");
            }
        }
        Ok(())
    }
}

// Authentication handlers
pub mod auth {
    //! Login, registration, logout and profile display.

    use super::*;
    use colored::Colorize;
    use rustyline::completion::Completer;
    use rustyline::config::{ColorMode, Configurer};
    use rustyline::highlight::Highlighter;
    use rustyline::hint::Hinter;
    use rustyline::history::DefaultHistory;
    use rustyline::validate::Validator;
    use rustyline::{Editor, Helper};
    use std::borrow::Cow;

    /// Readline helper that draws every typed character as `*`
    pub(crate) struct MaskingHelper;

    impl Highlighter for MaskingHelper {
        fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
            Cow::Owned("*".repeat(line.chars().count()))
        }

        fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
            true
        }
    }

    impl Completer for MaskingHelper {
        type Candidate = String;
    }

    impl Hinter for MaskingHelper {
        type Hint = String;
    }

    impl Validator for MaskingHelper {}

    impl Helper for MaskingHelper {}

    fn prompt_password() -> Result<String> {
        let mut rl: Editor<MaskingHelper, DefaultHistory> = Editor::new()?;
        rl.set_helper(Some(MaskingHelper));
        // Masking is done by the highlighter, so it must run even without colors
        rl.set_color_mode(ColorMode::Forced);
        rl.set_auto_add_history(false);
        Ok(rl.readline("Password: ")?)
    }

    /// Use the password from `--password`/`TASKMATE_PASSWORD`, prompting only
    /// when neither was given
    pub(crate) fn resolve_password(password: Option<String>) -> Result<String> {
        match password {
            Some(p) => Ok(p),
            None => prompt_password(),
        }
    }

    /// Log in and keep the token for later commands
    pub async fn login(config: &Config, email: &str, password: Option<String>) -> Result<()> {
        let password = resolve_password(password)?;
        let client = build_client(config)?;
        let auth = client.login(email, &password).await?;
        let name = auth
            .user
            .map(|u| u.fullname)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| email.to_string());
        println!("{}", format!("Logged in as {}", name).green());
        Ok(())
    }

    /// Create an account and keep the token for later commands
    pub async fn register(
        config: &Config,
        fullname: &str,
        email: &str,
        password: Option<String>,
    ) -> Result<()> {
        let password = resolve_password(password)?;
        let client = build_client(config)?;
        client.register(fullname, email, &password).await?;
        println!("{}", format!("Registered {}", email).green());
        Ok(())
    }

    /// Forget the stored token
    pub fn logout(config: &Config) -> Result<()> {
        build_client(config)?.logout()?;
        println!("{}", "Logged out.".green());
        Ok(())
    }

    /// Print the signed-in user
    pub async fn whoami(config: &Config) -> Result<()> {
        let user = build_client(config)?.profile().await?;
        println!("{} <{}> (id {})", user.fullname.bold(), user.email, user.id);
        Ok(())
    }

}
