use clap::{Parser as ClapParser, Subcommand, ValueEnum};
use condition_lang::cli::{self, CheckOptions, CheckResult, CliError, Show};
use std::io::{self, Read};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(ClapParser)]
#[command(name = "cond")]
#[command(about = "cond - Validate JSON condition expressions for SQL WHERE/ON clauses")]
#[command(version)]
struct Cli {
    /// Log parser activity to stderr
    #[arg(short, long, global = true, env = "COND_VERBOSE")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ShowArg {
    Summary,
    Tokens,
    Tree,
    Json,
}

impl From<ShowArg> for Show {
    fn from(arg: ShowArg) -> Self {
        match arg {
            ShowArg::Summary => Show::Summary,
            ShowArg::Tokens => Show::Tokens,
            ShowArg::Tree => Show::Tree,
            ShowArg::Json => Show::Json,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a condition
    Check {
        /// The condition as JSON (reads from stdin if not provided)
        condition: Option<String>,

        /// What to print once the condition is valid
        #[arg(short, long, value_enum, default_value = "summary")]
        show: ShowArg,

        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'cond docs' to list categories)
        category: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Check {
            condition,
            show,
            pretty,
        } => run_check(condition, show.into(), pretty),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => cli::get_doc_category(&category).map(|content| {
            print!("{}", content);
        }),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install logger: {}", e);
    }
}

fn run_check(condition: Option<String>, show: Show, pretty: bool) -> Result<(), CliError> {
    let condition = match condition {
        Some(s) => s,
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
        None => return Err(CliError::NoInput),
    };

    let options = CheckOptions {
        condition,
        show,
        pretty,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid { nodes } => println!("Condition is valid ({} nodes)", nodes),
        CheckResult::Tokens(tokens) => {
            for (index, token) in tokens.iter().enumerate() {
                println!("{:>4}  {}", index, token);
            }
        }
        CheckResult::Tree(outline) => print!("{}", outline),
        CheckResult::Json(json) => println!("{}", json),
    }
    Ok(())
}
