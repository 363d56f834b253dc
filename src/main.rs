use std::fmt::Write;
use std::fs;
use std::num::ParseIntError;
use std::process;

use clap::{App, Arg};

use npuzzle_solver::{run_search, SolverOk, Strategy};

fn main() {
    env_logger::init();

    let matches = App::new("npuzzle-solver")
        .about("Solves the sliding tile puzzle with BFS, DFS or A*")
        .arg(
            Arg::with_name("strategy")
                .required(true)
                .help("search strategy: bfs, dfs or ast"),
        )
        .arg(
            Arg::with_name("tiles")
                .required(true)
                .help("comma-separated tile values, 0 is the blank, e.g. 1,2,5,3,4,0,6,7,8"),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .value_name("FILE")
                .help("write the report to a file instead of stdout"),
        )
        .get_matches();

    let strategy: Strategy = matches
        .value_of("strategy")
        .unwrap()
        .parse()
        .unwrap_or_else(|err| {
            eprintln!("{}", err);
            process::exit(1);
        });

    let tiles = parse_tiles(matches.value_of("tiles").unwrap()).unwrap_or_else(|err| {
        eprintln!("Bad tile list: {}", err);
        process::exit(1);
    });

    // the board dimension comes from the tile count
    let n = integer_sqrt(tiles.len());

    let solution = run_search(strategy, tiles, n).unwrap_or_else(|err| {
        eprintln!("{}", err);
        process::exit(1);
    });

    let report = report(&solution);
    match matches.value_of("output") {
        Some(path) => {
            fs::write(path, &report).unwrap_or_else(|err| {
                eprintln!("Can't write {}: {}", path, err);
                process::exit(1);
            });
            print!("{}", solution.stats);
        }
        None => print!("{}", report),
    }
}

fn parse_tiles(s: &str) -> Result<Vec<u8>, ParseIntError> {
    s.split(',').map(|tile| tile.trim().parse()).collect()
}

fn integer_sqrt(len: usize) -> usize {
    let mut n = 0;
    while (n + 1) * (n + 1) <= len {
        n += 1;
    }
    n
}

fn report(solution: &SolverOk) -> String {
    let mut out = String::new();
    match solution.path_to_goal {
        Some(ref path) => {
            let actions: Vec<String> = path.iter().map(|action| action.to_string()).collect();
            writeln!(out, "path_to_goal: [{}]", actions.join(", ")).unwrap();
            writeln!(out, "cost_of_path: {}", path.len()).unwrap();
        }
        None => {
            writeln!(out, "path_to_goal: none (frontier exhausted)").unwrap();
        }
    }
    writeln!(out, "nodes_expanded: {}", solution.stats.nodes_expanded).unwrap();
    if let Some(depth) = solution.search_depth() {
        writeln!(out, "search_depth: {}", depth).unwrap();
    }
    writeln!(out, "max_search_depth: {}", solution.stats.max_search_depth).unwrap();
    writeln!(
        out,
        "running_time: {:.8}",
        solution.stats.running_time.as_secs_f64()
    )
    .unwrap();
    out
}
