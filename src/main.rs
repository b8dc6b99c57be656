#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::assigning_clones,
    clippy::bool_to_int_with_if,
    clippy::case_sensitive_file_extension_comparisons,
    clippy::cast_possible_wrap,
    clippy::doc_markdown,
    clippy::field_reassign_with_default,
    clippy::float_cmp,
    clippy::implicit_clone,
    clippy::items_after_statements,
    clippy::map_unwrap_or,
    clippy::manual_let_else,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::needless_pass_by_value,
    clippy::needless_raw_string_hashes,
    clippy::redundant_closure_for_method_calls,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::struct_field_names,
    clippy::too_many_lines,
    clippy::uninlined_format_args,
    clippy::unused_self,
    clippy::cast_precision_loss,
    clippy::unnecessary_cast,
    clippy::unnecessary_lazy_evaluations,
    clippy::unnecessary_literal_bound,
    clippy::unnecessary_map_or,
    clippy::unnecessary_wraps,
    dead_code
)]

use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::BufReader;
use tracing_subscriber::{fmt, EnvFilter};

use chessbot::{agent, config::Config, providers, repl};

fn parse_temperature(s: &str) -> std::result::Result<f64, String> {
    let t: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if !(0.0..=2.0).contains(&t) {
        return Err("temperature must be between 0.0 and 2.0".to_string());
    }
    Ok(t)
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CompletionShell {
    #[value(name = "bash")]
    Bash,
    #[value(name = "fish")]
    Fish,
    #[value(name = "zsh")]
    Zsh,
    #[value(name = "powershell")]
    PowerShell,
    #[value(name = "elvish")]
    Elvish,
}

/// `chessbot` - a chess-only Q&A assistant for the terminal.
#[derive(Parser, Debug)]
#[command(name = "chessbot")]
#[command(version)]
#[command(about = "Ask anything about chess: rules, openings, strategy, players and history.", long_about = None)]
struct Cli {
    /// Directory holding config.toml (default: ~/.chessbot)
    #[arg(long, global = true)]
    config_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start a chess Q&A session
    #[command(long_about = "\
Start a chess Q&A session.

Launches an interactive chat with the configured model provider. Only \
chess questions are forwarded to the model; anything else gets a polite \
redirect. Use --message for a single question without entering \
interactive mode.

Inside the session: /reset, /export [path], /stats, /history, /help, /quit.

Examples:
  chessbot chat                                   # interactive session
  chessbot chat -m \"What is the Sicilian Defense?\" # single question
  chessbot chat -p openai --model gpt-4o-mini")]
    Chat {
        /// Single message mode (don't enter interactive mode)
        #[arg(short, long)]
        message: Option<String>,

        /// Provider to use (groq, openai, custom:<URL>)
        #[arg(short, long)]
        provider: Option<String>,

        /// Model to use
        #[arg(long)]
        model: Option<String>,

        /// Temperature (0.0 - 2.0); defaults to config default_temperature
        #[arg(short, long, value_parser = parse_temperature)]
        temperature: Option<f64>,
    },

    /// Show configuration status
    Status,

    /// List supported AI providers
    Providers,

    /// Manage configuration
    #[command(long_about = "\
Manage chessbot configuration.

Use 'schema' to dump the full JSON Schema for the config file, which \
documents every available key, type, and default value.

Examples:
  chessbot config schema              # print JSON Schema to stdout
  chessbot config schema > schema.json")]
    Config {
        #[command(subcommand)]
        config_command: ConfigCommands,
    },

    /// Generate shell completion script to stdout
    #[command(long_about = "\
Generate shell completion scripts for `chessbot`.

The script is printed to stdout so it can be sourced directly:

Examples:
  source <(chessbot completions bash)
  chessbot completions zsh > ~/.zfunc/_chessbot
  chessbot completions fish > ~/.config/fish/completions/chessbot.fish")]
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Dump the full configuration JSON Schema to stdout
    Schema,
}

/// Log filter used when `RUST_LOG` is unset. The interactive chat stays quiet
/// so log lines do not interleave with the conversation.
fn default_log_filter(command: &Commands) -> &'static str {
    match command {
        Commands::Chat { .. } => "warn",
        _ => "info",
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; keys may come from config.toml or the shell.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Some(config_dir) = &cli.config_dir {
        if config_dir.trim().is_empty() {
            bail!("--config-dir cannot be empty");
        }
        std::env::set_var("CHESSBOT_CONFIG_DIR", config_dir);
    }

    // Completions must remain stdout-only and should not load config or initialize logging.
    if let Commands::Completions { shell } = &cli.command {
        let mut stdout = std::io::stdout().lock();
        write_shell_completion(*shell, &mut stdout)?;
        return Ok(());
    }

    let subscriber = fmt::Subscriber::builder()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_log_filter(&cli.command))),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let mut config = Config::load_or_init().await?;

    match cli.command {
        Commands::Completions { .. } => unreachable!(),

        Commands::Chat {
            message,
            provider,
            model,
            temperature,
        } => {
            if let Some(provider) = provider {
                config.default_provider = Some(provider);
            }
            if let Some(model) = model {
                config.default_model = Some(model);
            }
            if let Some(temperature) = temperature {
                config.default_temperature = temperature;
            }
            run_chat(&config, message).await
        }

        Commands::Status => {
            print_status(&config);
            Ok(())
        }

        Commands::Providers => {
            let providers = providers::list_providers();
            let current = config.provider_name().trim().to_ascii_lowercase();
            println!("Supported providers ({} total):\n", providers.len());
            println!("  ID (use in config)  DESCRIPTION");
            println!("  ─────────────────── ───────────");
            for p in &providers {
                let marker = if p.name.eq_ignore_ascii_case(&current) {
                    " (active)"
                } else {
                    ""
                };
                println!(
                    "  {:<19} {}{}  [{}, key: {}]",
                    p.name, p.display_name, marker, p.base_url, p.key_env
                );
            }
            println!("\n  custom:<URL>        Any OpenAI-compatible endpoint");
            Ok(())
        }

        Commands::Config { config_command } => match config_command {
            ConfigCommands::Schema => {
                let schema = schemars::schema_for!(Config);
                println!(
                    "{}",
                    serde_json::to_string_pretty(&schema)
                        .context("Failed to serialize JSON Schema")?
                );
                Ok(())
            }
        },
    }
}

async fn run_chat(config: &Config, message: Option<String>) -> Result<()> {
    let mut controller = agent::create_controller(config)?;

    if let Some(message) = message {
        let outcome = controller.handle_message(&message).await;
        println!("{}", outcome.text());
        if outcome.is_failure() {
            bail!("model call failed");
        }
        return Ok(());
    }

    let export_dir = config.chat.export_dir.as_deref().map(PathBuf::from);
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    repl::run(&mut controller, export_dir.as_deref(), stdin, &mut stdout).await
}

fn print_status(config: &Config) {
    println!("♟️  chessbot Status");
    println!();
    println!("Version:     {}", env!("CARGO_PKG_VERSION"));
    println!("Config:      {}", config.config_path.display());
    println!();
    println!("🤖 Provider:      {}", config.provider_name());
    println!("   Model:         {}", config.model_name());
    println!(
        "   API key:       {}",
        if config.api_key.is_some() {
            "set"
        } else {
            "not set (checks provider env vars at call time)"
        }
    );
    if let Some(url) = &config.api_url {
        println!("   API URL:       {url}");
    }
    println!("   Temperature:   {}", config.default_temperature);
    println!("   Max tokens:    {}", config.max_tokens);
    println!("   Timeout:       {}s", config.request_timeout_secs);
    println!();
    println!("🧠 Memory:         last {} messages", config.memory.capacity);
    println!(
        "🛡️  Guard:          built-in vocabulary + {} extra keyword(s)",
        config.guard.extra_keywords.len()
    );
    println!(
        "👋 Local greetings: {}",
        if config.chat.local_greetings {
            "on"
        } else {
            "off"
        }
    );
    println!(
        "📥 Export dir:     {}",
        config.chat.export_dir.as_deref().unwrap_or("(current directory)")
    );
}

fn write_shell_completion<W: Write>(shell: CompletionShell, writer: &mut W) -> Result<()> {
    use clap_complete::generate;
    use clap_complete::shells;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    match shell {
        CompletionShell::Bash => generate(shells::Bash, &mut cmd, bin_name.clone(), writer),
        CompletionShell::Fish => generate(shells::Fish, &mut cmd, bin_name.clone(), writer),
        CompletionShell::Zsh => generate(shells::Zsh, &mut cmd, bin_name.clone(), writer),
        CompletionShell::PowerShell => {
            generate(shells::PowerShell, &mut cmd, bin_name.clone(), writer);
        }
        CompletionShell::Elvish => generate(shells::Elvish, &mut cmd, bin_name, writer),
    }

    writer.flush()?;
    Ok(())
}
