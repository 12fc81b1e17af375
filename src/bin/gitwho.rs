use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use gitwho::{
    cli,
    commands::{lookup_organization, lookup_user},
    error::Error,
    output::{present, Format},
    GitHub,
};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    let opts: Opts = Opts::parse();
    let _ = cli::init_logging(opts.verbose);
    let github = match opts.api_url {
        Some(url) => GitHub::with_base_url(&url, opts.token),
        None => GitHub::new(opts.token),
    }
    .context("Failed to initialize the GitHub client")?;

    let format = if opts.json { Format::Json } else { Format::Text };
    // JSON exports are written to the working directory
    let export_dir = Path::new(".");
    let mut stdout = std::io::stdout();

    match opts.command {
        Command::User {
            username,
            open: open_profile,
        } => match lookup_user(&github, &username).await {
            Ok(user) => {
                present(&mut stdout, &user, format, export_dir)?;

                if open_profile {
                    if let Err(error) = open::that(&user.account.profile_url) {
                        log::error!("Failed to open {}: {}", user.account.profile_url, error);
                        println!(
                            "{} {}",
                            "Error: Could not open Github URL:".red().bold(),
                            user.account.profile_url
                        );
                    }
                }
            }
            Err(Error::NotFound(_)) => println!("Error: User not found."),
            Err(other) => return Err(other).context("User lookup failed"),
        },
        Command::Org { orgname, users } => {
            match lookup_organization(&github, &orgname, users).await {
                Ok(org) => present(&mut stdout, &org, format, export_dir)?,
                Err(Error::NotFound(_)) => println!("Error: Could not find Github Organization."),
                Err(other) => return Err(other).context("Organization lookup failed"),
            }
        }
    }

    Ok(())
}

#[derive(Parser)]
#[clap(name = "gitwho", version, author)]
/// Get in depth GitHub information about users and organizations
struct Opts {
    /// Print the result as JSON and also write it to <name>.json
    #[clap(short, long, global = true)]
    json: bool,
    /// A GitHub personal access token (raises the rate limit and shows concealed members)
    #[clap(short, long, global = true, env = "GITHUB_TOKEN")]
    token: Option<String>,
    /// API root to query instead of https://api.github.com (e.g. a GitHub Enterprise server)
    #[clap(long, global = true, env = "GITHUB_API_URL")]
    api_url: Option<String>,
    #[clap(short, long, global = true, parse(from_occurrences))]
    /// Logging verbosity
    verbose: i32,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Get information about a specific GitHub user
    User {
        /// The user's login, e.g. `tempor1s`
        username: String,
        /// Open their GitHub profile after printing
        #[clap(short, long)]
        open: bool,
    },
    /// Get information about a specific GitHub organization
    Org {
        /// The organization's login, e.g. `google`
        orgname: String,
        /// Collect every member and their profiles (may take a while for large organizations)
        #[clap(short, long)]
        users: bool,
    },
}
