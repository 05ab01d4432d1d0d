mod app;
mod config;
mod constants;
mod input;
mod mail;
mod ui;

use anyhow::Result;
use std::env;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::App;
use crate::config::{Config, KeybindingMode};
use crate::mail::ApiClient;

fn setup_logging() {
    use std::fs::{self, OpenOptions};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,mailpane=debug"));

    // Log next to the config file; the TUI owns the terminal
    let log_file = Config::config_dir()
        .ok()
        .and_then(|dir| fs::create_dir_all(&dir).ok().map(|_| dir.join("mailpane.log")))
        .and_then(|path| {
            OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&path)
                .ok()
        });

    if let Some(file) = log_file {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::sync::Mutex::new(file))
                    .with_ansi(false),
            )
            .init();
    } else {
        // Fallback to stderr if file logging fails
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn print_usage() {
    eprintln!(
        r#"mailpane - Terminal client for a webmail server

Usage: mailpane [command]

Commands:
    (none)      Start the client
    setup       Configure the server URL and session cookie
    help        Show this help message

Environment:
    MAILPANE_SERVER   Override the configured server URL
    MAILPANE_SESSION  Override the configured session cookie
    RUST_LOG          Log filter (default: info,mailpane=debug)

Configuration file: ~/.config/mailpane/config.toml
Log file:           ~/.config/mailpane/mailpane.log
"#
    );
}

fn prompt(label: &str) -> Result<String> {
    use std::io::{self, Write};

    print!("{}", label);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn run_setup() -> Result<()> {
    println!("mailpane setup");
    println!("==============\n");

    let config_path = Config::config_path()?;
    if config_path.exists() {
        let answer = prompt("Configuration already exists. Overwrite? [y/N]: ")?;
        if !answer.eq_ignore_ascii_case("y") {
            println!("Setup cancelled.");
            return Ok(());
        }
    }

    let url = loop {
        let url = prompt("Server URL [http://127.0.0.1:8000]: ")?;
        let url = if url.is_empty() {
            "http://127.0.0.1:8000".to_string()
        } else {
            url
        };
        match ApiClient::new(&url, None) {
            Ok(_) => break url,
            Err(e) => println!("{}. Please enter a URL such as http://127.0.0.1:8000", e),
        }
    };

    println!("Session cookie, as sent by your browser (e.g. sessionid=...).");
    print!("Leave empty to connect without one: ");
    std::io::Write::flush(&mut std::io::stdout())?;
    let session = read_secret()?;
    println!();
    let session = (!session.is_empty()).then_some(session);

    let mut config = Config::new(url, session);
    let mode = prompt("Keybindings [vim/arrows] (vim): ")?;
    if mode.eq_ignore_ascii_case("arrows") {
        config.ui.keybinding_mode = KeybindingMode::Arrows;
    }

    config.ensure_dirs()?;
    config.save()?;
    println!("Configuration saved to {}", config_path.display());
    println!("\nSetup complete! Run 'mailpane' to start.");
    Ok(())
}

/// Read a line from stdin without echoing it
fn read_secret() -> Result<String> {
    let _guard = DisableEcho::new()?;

    let mut secret = String::new();
    std::io::stdin().read_line(&mut secret)?;
    Ok(secret.trim().to_string())
}

struct DisableEcho {
    #[cfg(unix)]
    original: libc::termios,
}

impl DisableEcho {
    #[cfg(unix)]
    fn new() -> Result<Self> {
        use std::mem::MaybeUninit;
        use std::os::unix::io::AsRawFd;

        let fd = std::io::stdin().as_raw_fd();
        let mut termios = MaybeUninit::<libc::termios>::uninit();

        // SAFETY: tcgetattr fills the struct before it is read
        unsafe {
            if libc::tcgetattr(fd, termios.as_mut_ptr()) != 0 {
                anyhow::bail!("Failed to get terminal attributes");
            }
            let original = termios.assume_init();
            let mut silent = original;
            silent.c_lflag &= !libc::ECHO;
            if libc::tcsetattr(fd, libc::TCSANOW, &silent) != 0 {
                anyhow::bail!("Failed to set terminal attributes");
            }
            Ok(Self { original })
        }
    }

    #[cfg(not(unix))]
    fn new() -> Result<Self> {
        Ok(Self {})
    }
}

#[cfg(unix)]
impl Drop for DisableEcho {
    fn drop(&mut self) {
        use std::os::unix::io::AsRawFd;
        let fd = std::io::stdin().as_raw_fd();
        // SAFETY: restores the attributes captured in new()
        unsafe {
            libc::tcsetattr(fd, libc::TCSANOW, &self.original);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        Some("help") | Some("--help") | Some("-h") => {
            print_usage();
            Ok(())
        }
        Some("setup") => run_setup(),
        Some(cmd) => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            std::process::exit(1);
        }
        None => {
            setup_logging();

            let config = Config::load()?;
            config.ensure_dirs()?;

            crate::ui::theme::init_theme(config.ui.theme);
            tracing::info!(
                "Starting mailpane with {:?} keybindings",
                config.ui.keybinding_mode
            );

            let mut app = App::new(&config)?;
            app.run().await
        }
    }
}
