//! Sliding-Block Puzzle Solver
//!
//! Solves the classic 5x4 Klotski layout, where ten rectangular blocks
//! shuffle around a cramped grid until the 2x2 block escapes through the
//! bottom row. The solver finds either every shortest solution (exhaustive
//! breadth-first search) or a single solution (backtracking).

use clap::{Parser, Subcommand};

use klotski::{Move, Puzzle};

/// Solves the classic sliding-block puzzle.
#[derive(Parser)]
#[command(name = "klotski")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Print every board along each reported path.
    #[arg(long, global = true)]
    trace: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Find every shortest solution via exhaustive breadth-first search.
    Shortest,
    /// Find one solution via depth-first backtracking (not the shortest).
    Explore,
    /// Summarize every reachable goal position and its distance.
    Goals,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let puzzle = Puzzle::classic();

    match cli.command {
        Some(Command::Shortest) | None => run_shortest(&puzzle, cli.trace),
        Some(Command::Explore) => run_explore(&puzzle, cli.trace),
        Some(Command::Goals) => run_goals(&puzzle),
    }
}

/// Solves exhaustively and prints each shortest path.
fn run_shortest(puzzle: &Puzzle, trace: bool) {
    let paths = puzzle.solve_all_shortest();
    if paths.is_empty() {
        println!("No solution found");
        return;
    }

    println!(
        "Found {} shortest solution path(s) of {} moves",
        paths.len(),
        paths[0].len()
    );
    for (i, path) in paths.iter().enumerate() {
        println!("\nSolution {}:", i + 1);
        print_path(puzzle, path, trace);
    }
}

/// Finds one solution by backtracking and prints it.
fn run_explore(puzzle: &Puzzle, trace: bool) {
    match puzzle.solve_one() {
        Some(path) => {
            println!("Found a solution with {} moves", path.len());
            print_path(puzzle, &path, trace);
        }
        None => println!("No solution found"),
    }
}

/// Prints the distance to every distinct reachable goal position.
fn run_goals(puzzle: &Puzzle) {
    let paths = puzzle.goal_paths();
    if paths.is_empty() {
        println!("No goal position is reachable");
        return;
    }

    println!("Reached {} distinct goal position(s):", paths.len());
    for (i, path) in paths.iter().enumerate() {
        println!("  goal position {}: {} moves", i + 1, path.len());
    }
}

/// Prints a move sequence, and optionally every board along it.
fn print_path(puzzle: &Puzzle, path: &[Move], trace: bool) {
    let rendered: Vec<String> = path.iter().map(Move::to_string).collect();
    println!("{}", rendered.join(", "));

    if trace {
        match puzzle.replay(path) {
            Ok(boards) => {
                for board in boards {
                    println!("\n{board}");
                }
            }
            Err(e) => eprintln!("solver returned an invalid path: {e}"),
        }
    }
}
