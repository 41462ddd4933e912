use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use utm::encoder::machine_details;
use utm::{
    binary_transition_table, transition_table, DescriptionLoader, MachineDescription,
    ProgramManager, Step, TuringMachine, UniversalTuringMachine, UtmError,
};

/// Bundled machine used when neither `--machine` nor `--program` is given.
const DEFAULT_PROGRAM: &str = "erase-then-copy";

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TableFormat {
    /// States and symbols as written in the description
    Plain,
    /// States `Qn` as binary `n`; symbols 0, 1, and blank as 0, 1, 10
    Binary,
}

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Machine description file in interchange JSON
    #[clap(short, long, conflicts_with = "program")]
    machine: Option<PathBuf>,

    /// Name of a bundled machine
    #[clap(short, long)]
    program: Option<String>,

    /// The initial tape contents
    #[clap(short, long, default_value = "")]
    input: String,

    /// Print each step of the execution
    #[clap(short = 'd', long)]
    debug: bool,

    /// Give up after this many steps instead of running until the machine halts
    #[clap(long)]
    max_steps: Option<usize>,

    /// Print the description in interchange JSON before running
    #[clap(long)]
    encode: bool,

    /// Print the transition table before running
    #[clap(long, value_enum)]
    table: Option<TableFormat>,

    /// List the bundled machines and exit
    #[clap(long)]
    list: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.list {
        for name in ProgramManager::list_program_names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let description = load(&cli)?;
    info!(input = %cli.input, "Starting machine");

    if cli.encode {
        let utm = UniversalTuringMachine::new(description.clone(), cli.input.clone());
        println!("{}", utm.encode_description()?);
    }

    match cli.table {
        Some(TableFormat::Plain) => {
            println!("{}", machine_details(&description));
            for line in transition_table(&description) {
                println!("{}", line);
            }
        }
        Some(TableFormat::Binary) => {
            for line in binary_transition_table(&description)? {
                println!("{}", line);
            }
        }
        None => {}
    }

    let mut machine = TuringMachine::new(&description, &cli.input);
    let accepted = if cli.debug {
        run_debug(&mut machine, cli.max_steps)?
    } else if let Some(max_steps) = cli.max_steps {
        machine.run_with_limit(max_steps)?
    } else {
        machine.run()
    };

    println!("{}", if accepted { "Accepted" } else { "Rejected" });
    println!("Tape: {}", machine.tape().contents());

    Ok(())
}

fn load(cli: &Cli) -> Result<MachineDescription> {
    if let Some(path) = &cli.machine {
        return DescriptionLoader::load_description(path)
            .with_context(|| format!("Failed to load {}", path.display()));
    }

    let name = cli.program.as_deref().unwrap_or(DEFAULT_PROGRAM);
    Ok(ProgramManager::get_program_by_name(name)?)
}

fn run_debug(machine: &mut TuringMachine<'_>, max_steps: Option<usize>) -> Result<bool> {
    print_state(machine);

    loop {
        if let Some(max) = max_steps {
            if machine.step_count() >= max && machine.transition().is_some() {
                return Err(UtmError::StepLimitExceeded(max).into());
            }
        }

        match machine.step() {
            Step::Continue => print_state(machine),
            Step::Halt(status) => {
                print_state(machine);
                println!("\nMachine halted: {:?}", status);
                return Ok(status.is_accepted());
            }
        }
    }
}

fn print_state(machine: &TuringMachine<'_>) {
    println!(
        "Step: {}, State: {}, Tape: {}",
        machine.step_count(),
        machine.state(),
        machine.tape()
    );
}
