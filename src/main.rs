use anyhow::Result;
use clap::Parser;
use git_cursor_log::areas::repository::Repository;
use git_cursor_log::artifacts::core::config::Config;
use git_cursor_log::artifacts::core::logging::init_logging;
use git_cursor_log::artifacts::log::cursor::Cursor;
use git_cursor_log::commands::porcelain::cursor_log::LogStart;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "git-cursor-log",
    version,
    about = "Print commit history with resumable cursors",
    long_about = "Walks the history reachable from a revision, newest commit first, and prints \
    each commit next to a cursor <root>+<offset>. Passing a cursor's root and offset back \
    (or the whole cursor with --resume) continues the walk without replaying it. \
    The repository is read from the git directory named by GIT_DIR.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[arg(
        index = 1,
        required_unless_present = "resume",
        conflicts_with = "resume",
        help = "The revision to start from (branch, tag, HEAD, commit id, rev^, rev~n)"
    )]
    reference: Option<String>,
    #[arg(
        index = 2,
        default_value_t = 0,
        conflicts_with = "resume",
        help = "Number of leading commits to discard"
    )]
    skip: usize,
    #[arg(
        long,
        value_name = "CURSOR",
        help = "Continue after the commit printed with this <root>+<offset> cursor"
    )]
    resume: Option<Cursor>,
}

impl Cli {
    fn log_start(self) -> LogStart {
        match (self.resume, self.reference) {
            (Some(cursor), _) => LogStart::Resume(cursor),
            (None, reference) => LogStart::Revision {
                reference: reference.unwrap_or_default(),
                skip: self.skip,
            },
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load_from_env()?;
    let stdout = std::io::BufWriter::new(std::io::stdout().lock());
    let repository = Repository::open(config.git_dir(), Box::new(stdout))?;

    repository.cursor_log(&cli.log_start())
}

fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<std::io::Error>()
            .is_some_and(|io_err| io_err.kind() == std::io::ErrorKind::BrokenPipe)
    })
}

fn main() -> ExitCode {
    init_logging();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // --help and --version are not failures
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        // the reader went away, e.g. `git-cursor-log main | head`
        Err(err) if is_broken_pipe(&err) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
