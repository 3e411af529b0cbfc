use crate::report::{run_align, run_score, run_skill, AlignArgs, ScoreArgs, SkillArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use resume_ats::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "resume-ats",
    about = "Score resumes for ATS compatibility from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a plain-text, markdown or HTML resume
    Score(ScoreArgs),
    /// Rate CV content items against a job context
    Align(AlignArgs),
    /// Look up a skill and its related skills in the taxonomy
    Skill(SkillArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
        Command::Align(args) => run_align(args),
        Command::Skill(args) => run_skill(args),
    }
}
