use clap::{
    Args, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use matterdl::{cli, config, config::Credentials, error};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Extract metadata from a track, album, playlist, artist or library URL
    Extract(ExtractOptions),

    /// Check that the configured account can log in
    Login(AccountOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Args, Debug, Clone)]
pub struct AccountOptions {
    /// Account email (defaults to MATTER_EMAIL)
    #[clap(long, short = 'u', requires = "password")]
    pub username: Option<String>,

    /// Account password (defaults to MATTER_PASSWORD)
    #[clap(long, short = 'p', requires = "username")]
    pub password: Option<String>,
}

impl AccountOptions {
    fn credentials(self) -> Option<Credentials> {
        match (self.username, self.password) {
            (Some(username), Some(password)) => Some(Credentials::new(username, password)),
            _ => None,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct ExtractOptions {
    /// Page URL, e.g. https://app.matter.online/tracks/3079
    pub url: String,

    /// Print a table of entries instead of JSON
    #[clap(long)]
    pub table: bool,

    #[command(flatten)]
    pub account: AccountOptions,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Extract(opt) => cli::extract(opt.url, opt.table, opt.account.credentials()).await,
        Command::Login(opt) => cli::login(opt.credentials()).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
