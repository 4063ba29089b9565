use anyhow::Result;
use clap::{Parser, Subcommand};
use record::areas::repository::Repository;
use record::artifacts::objects::commit::{Identity, Timestamp};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives
const LOG_ENV: &str = "RECORD_LOG";

#[derive(Parser)]
#[command(
    name = "record",
    version = "0.1.0",
    about = "A minimal content-addressed version control engine",
    long_about = "Snapshots a working directory into content-addressed objects, \
    records commits on branches and restores any commit back into the working directory.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(
        name = "commit",
        about = "Record the working directory as a new commit",
        long_about = "This command snapshots every visible file in the working directory \
        and records it as a commit on top of HEAD."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
        #[arg(long, env = "GIT_COMMITTER_NAME", help = "The author and committer name")]
        author_name: String,
        #[arg(long, env = "GIT_COMMITTER_EMAIL", help = "The author and committer email")]
        author_email: String,
        #[arg(
            long,
            env = "GIT_COMMITTER_DATE",
            help = "The commit time as \"<unix-seconds> <+HHMM>\", defaults to now"
        )]
        date: Option<Timestamp>,
    },
    #[command(
        name = "branch",
        about = "Create a branch at the current commit"
    )]
    Branch {
        #[arg(index = 1, help = "The new branch name")]
        name: String,
    },
    #[command(
        name = "checkout",
        about = "Switch to a branch or detach HEAD at a commit",
        long_about = "This command replaces the visible working directory with the tree of \
        the given branch or commit. Hidden files are left untouched."
    )]
    Checkout {
        #[arg(index = 1, help = "A branch name or a full commit id")]
        target: String,
    },
    #[command(
        name = "cat-file",
        about = "Print the content of an object",
        long_about = "This command prints the content of an object in the repository. \
        It requires the SHA of the object to be specified."
    )]
    CatFile {
        #[arg(short = 'p', long, help = "The object SHA to print")]
        sha: String,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn open_current() -> Result<Repository> {
    let pwd = std::env::current_dir()?;
    Repository::discover(&pwd, Box::new(std::io::stdout()))
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { path } => {
            let repository = match path {
                Some(path) => Repository::new(&path, Box::new(std::io::stdout()))?,
                None => {
                    let pwd = std::env::current_dir()?;
                    Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?
                }
            };

            repository.init()?
        }
        Commands::Commit {
            message,
            author_name,
            author_email,
            date,
        } => {
            let repository = open_current()?;
            let identity = Identity::new(author_name, author_email);
            let timestamp = date.unwrap_or_else(Timestamp::now);

            repository.commit(&identity, timestamp, &message)?;
        }
        Commands::Branch { name } => {
            let repository = open_current()?;

            repository.branch(&name)?
        }
        Commands::Checkout { target } => {
            let repository = open_current()?;

            repository.checkout(&target)?
        }
        Commands::CatFile { sha } => {
            let repository = open_current()?;

            repository.cat_file(&sha)?
        }
    }

    Ok(())
}
