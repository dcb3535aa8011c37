use std::fs;

use clap::{Parser, Subcommand};
use plural_expression::{BackendType, Evaluator, compile_expression_with, parser};

#[derive(Parser)]
#[command(name = "plural-expr")]
#[command(about = "Compiles and evaluates plural-selection expressions", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate an expression for the given values of n
    Eval {
        /// Expression, e.g. "n != 1"
        expression: String,

        /// Values of n
        #[arg(allow_negative_numbers = true)]
        values: Vec<i64>,

        /// Backend used to compile the expression
        #[arg(short, long, default_value = "closure")]
        target: String,
    },

    /// Print the value for every n in a range
    Table {
        expression: String,

        /// First n (inclusive)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        from: i64,

        /// Last n (exclusive)
        #[arg(long, default_value_t = 100, allow_negative_numbers = true)]
        to: i64,

        #[arg(short, long, default_value = "closure")]
        target: String,
    },

    /// Show the token stream of an expression
    Tokens { expression: String },

    /// Parse an expression and show its tree
    Parse {
        expression: String,

        /// Show the raw syntax tree instead of the bracketed form
        #[arg(long)]
        debug: bool,
    },

    /// Check every non-empty line of a file; lines starting with '#' are skipped
    File { input: String },

    /// List the available backends
    Targets,
}

fn compile(expression: &str, target: &str) -> Result<Evaluator, Box<dyn std::error::Error>> {
    let backend = BackendType::from_name(target).ok_or_else(|| format!("Unknown target: {}", target))?;
    Ok(compile_expression_with(expression, backend)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    use tracing_subscriber::{EnvFilter, fmt};

    // RUST_LOG controls the log level, WARN when unset
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Eval { expression, values, target } => {
            let evaluator = compile(&expression, &target)?;
            for n in values {
                println!("{} -> {}", n, evaluator.eval(n));
            }
        }
        Commands::Table { expression, from, to, target } => {
            let evaluator = compile(&expression, &target)?;
            for n in from..to {
                println!("{:>6}  {}", n, evaluator.eval(n));
            }
        }
        Commands::Tokens { expression } => {
            for (token, span) in parser::lexer::tokenize(&expression)? {
                println!("{:>5}  {}", span.to_string(), token);
            }
        }
        Commands::Parse { expression, debug } => {
            let expr = parser::parse(&expression)?;
            if debug {
                println!("{:#?}", expr);
            } else {
                println!("{}", expr);
            }
        }
        Commands::File { input } => {
            let source = fs::read_to_string(&input)?;
            let mut failures = 0;

            for (index, line) in source.lines().enumerate() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                match parser::parse(line) {
                    Ok(expr) => println!("{}:{}: ok  {}", input, index + 1, expr),
                    Err(e) => {
                        failures += 1;
                        println!("{}:{}: error  {}", input, index + 1, e);
                    }
                }
            }

            if failures > 0 {
                return Err(format!("{} expression(s) failed to compile", failures).into());
            }
        }
        Commands::Targets => {
            println!("Supported targets:");
            for backend in BackendType::all() {
                println!("  {:8} - {}", backend.name(), backend.description());
            }
        }
    }

    Ok(())
}
