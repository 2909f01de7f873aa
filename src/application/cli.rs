use std::env;
use std::io;
use std::path;
use std::sync::Arc;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::DealOutcome;
use crate::domain::models::SalesRep;
use crate::domain::services::help_text;
use crate::domain::services::ConversationLogger;
use crate::domain::services::Markdown;
use crate::domain::services::SYNTAX_SET;
use crate::infrastructure::backends::BackendManager;
use crate::infrastructure::log_sinks::LogSinkManager;
use crate::infrastructure::log_sinks::LogSinkName;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

pub fn log_path() -> path::PathBuf {
    let log_dir = env::var("SALESDESK_LOG_DIR").unwrap_or_else(|_| {
        return dirs::cache_dir()
            .unwrap_or_else(env::temp_dir)
            .join("salesdesk")
            .to_string_lossy()
            .to_string();
    });

    return path::PathBuf::from(log_dir).join("debug.log");
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(config_file_path.clone()).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

async fn ask_question(question: &str) -> Result<()> {
    let question = question.trim();
    if question.is_empty() {
        bail!("A question is required");
    }

    let backend = BackendManager::get()?;
    let logger = Arc::new(ConversationLogger::new(LogSinkManager::get(
        &Config::get(ConfigKey::LogSink),
    )?));

    match backend.ask(question).await {
        Ok(res) => {
            let answer = Markdown::normalize(&res.answer.unwrap_or_default());
            logger.log_conversation(question, &answer).await;
            println!("{answer}");
            if let Some(route_type) = res.route_type {
                eprintln!("\n{}", Paint::new(format!("Route: {route_type}")).dimmed());
            }
        }
        Err(err) => {
            logger.log_error(&err.to_string(), question).await;
            bail!(err);
        }
    }

    return Ok(());
}

fn format_sales_rep(rep: &SalesRep) -> String {
    let mut lines = vec![Paint::new(rep.headline()).bold().to_string()];

    if !rep.skills.is_empty() {
        lines.push(format!("  Skills: {}", rep.skills.join(", ")));
    }

    if rep.won_value() > 0.0 {
        lines.push(format!("  Won: ${}", rep.won_value()));
    }

    for deal in rep.deals.iter() {
        let text = format!("  Deal: {}", deal.format());
        match deal.outcome() {
            DealOutcome::Won => lines.push(Paint::green(text).to_string()),
            DealOutcome::Pending => lines.push(Paint::yellow(text).to_string()),
            DealOutcome::Lost => lines.push(Paint::red(text).to_string()),
        }
    }

    for client in rep.clients.iter() {
        lines.push(format!(
            "  Client: {} ({}) {}",
            client.name, client.industry, client.contact.email
        ));
    }

    return lines.join("\n");
}

async fn print_sales_reps() -> Result<()> {
    let reps = BackendManager::get()?.list_sales_reps().await?;
    if reps.is_empty() {
        println!("There are no sales reps available.");
        return Ok(());
    }

    let output = reps
        .iter()
        .map(|rep| return format_sales_rep(rep))
        .collect::<Vec<String>>()
        .join("\n\n");
    println!("{output}");

    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for SalesDesk")
        .hide(true)
        .subcommand(
            Command::new("syntaxes").about("List all supported code highlighting languages."),
        )
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running SalesDesk with environment variable RUST_LOG=salesdesk")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );
}

fn subcommand_ask() -> Command {
    return Command::new("ask")
        .about("Ask the AI assistant a single question and print the answer.")
        .arg(
            Arg::new("question")
                .help("The question to ask.")
                .num_args(1..)
                .required(true),
        );
}

fn arg_api_url() -> Arg {
    return Arg::new(ConfigKey::ApiURL.to_string())
        .short('u')
        .long(ConfigKey::ApiURL.to_string())
        .env("SALESDESK_API_URL")
        .num_args(1)
        .help(format!(
            "Base URL of the sales API serving the AI and sales rep endpoints. [default: {}]",
            Config::default(ConfigKey::ApiURL)
        ))
        .global(true);
}

fn arg_api_session_id() -> Arg {
    return Arg::new(ConfigKey::ApiSessionID.to_string())
        .long(ConfigKey::ApiSessionID.to_string())
        .env("SALESDESK_API_SESSION_ID")
        .num_args(1)
        .help(format!(
            "Session identifier sent to the AI endpoint in the X-Session-ID header. [default: {}]",
            Config::default(ConfigKey::ApiSessionID)
        ))
        .global(true);
}

fn arg_api_timeout() -> Arg {
    return Arg::new(ConfigKey::ApiTimeout.to_string())
        .long(ConfigKey::ApiTimeout.to_string())
        .env("SALESDESK_API_TIMEOUT")
        .num_args(1)
        .help(format!(
            "Time to wait in milliseconds for the AI endpoint to answer. [default: {}]",
            Config::default(ConfigKey::ApiTimeout)
        ))
        .global(true);
}

fn arg_health_check_timeout() -> Arg {
    return Arg::new(ConfigKey::HealthCheckTimeout.to_string())
        .long(ConfigKey::HealthCheckTimeout.to_string())
        .env("SALESDESK_HEALTH_CHECK_TIMEOUT")
        .num_args(1)
        .help(format!(
            "Time to wait in milliseconds before timing out when checking the sales API is reachable. [default: {}]",
            Config::default(ConfigKey::HealthCheckTimeout)
        ))
        .global(true);
}

fn arg_log_sink() -> Arg {
    return Arg::new(ConfigKey::LogSink.to_string())
        .long(ConfigKey::LogSink.to_string())
        .env("SALESDESK_LOG_SINK")
        .num_args(1)
        .help(format!(
            "Where conversation logs are written. [default: {}]",
            Config::default(ConfigKey::LogSink)
        ))
        .value_parser(PossibleValuesParser::new(LogSinkName::VARIANTS))
        .global(true);
}

fn arg_log_file() -> Arg {
    return Arg::new(ConfigKey::LogFile.to_string())
        .long(ConfigKey::LogFile.to_string())
        .env("SALESDESK_LOG_FILE")
        .num_args(1)
        .help(format!(
            "Conversation log file when using the file log sink. [default: {}]",
            Config::default(ConfigKey::LogFile)
        ))
        .global(true);
}

fn arg_log_url() -> Arg {
    return Arg::new(ConfigKey::LogURL.to_string())
        .long(ConfigKey::LogURL.to_string())
        .env("SALESDESK_LOG_URL")
        .num_args(1)
        .help(format!(
            "Log-conversation endpoint when using the http log sink. [default: {}]",
            Config::default(ConfigKey::LogURL)
        ))
        .global(true);
}

fn arg_preferences_file() -> Arg {
    return Arg::new(ConfigKey::PreferencesFile.to_string())
        .long(ConfigKey::PreferencesFile.to_string())
        .env("SALESDESK_PREFERENCES_FILE")
        .num_args(1)
        .help(format!(
            "File storing the sound and theme preferences. [default: {}]",
            Config::default(ConfigKey::PreferencesFile)
        ))
        .global(true);
}

fn arg_username() -> Arg {
    return Arg::new(ConfigKey::Username.to_string())
        .long(ConfigKey::Username.to_string())
        .env("SALESDESK_USERNAME")
        .num_args(1)
        .help("Your user name displayed on your chat bubbles. [default: $USER]")
        .global(true);
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:") || line.starts_with("HOTKEYS:") {
                return Paint::new(format!("CHAT {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    );

    return Command::new("salesdesk")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(Command::new("chat").about("Open the dashboard and start chatting. This is the default command."))
        .subcommand(subcommand_ask())
        .subcommand(Command::new("reps").about("Print every sales rep with their deals and clients."))
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .subcommand(Command::new("manpages").about("Generates manpages and outputs to stdout."))
        .arg(arg_api_url())
        .arg(arg_api_session_id())
        .arg(arg_api_timeout())
        .arg(arg_health_check_timeout())
        .arg(arg_log_sink())
        .arg(arg_log_file())
        .arg(arg_log_url())
        .arg(arg_preferences_file())
        .arg(arg_username())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("SALESDESK_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        );
}

/// Returns true when the dashboard should be started.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("syntaxes", _)) => {
                    let syntaxes = SYNTAX_SET
                        .syntaxes()
                        .iter()
                        .map(|syntax| return syntax.name.to_string())
                        .collect::<Vec<String>>();
                    println!("{}", syntaxes.join("\n"));
                }
                Some(("log-path", _)) => {
                    println!("{}", log_path().to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("chat", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
        }
        Some(("ask", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            let question = subcmd_matches
                .get_many::<String>("question")
                .map(|words| return words.cloned().collect::<Vec<String>>().join(" "))
                .unwrap_or_default();
            ask_question(&question).await?;
            return Ok(false);
        }
        Some(("reps", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            print_sales_reps().await?;
            return Ok(false);
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("manpages", _)) => {
            clap_mangen::Man::new(build()).render(&mut io::stdout())?;
            return Ok(false);
        }
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(true);
}
