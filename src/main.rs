use {
    sabre::{
        cnf::CnfFormula,
        config::{Config, InputFormat},
        sexpr,
        solver::{Certificate, Solver},
        types::SolverError,
    },
    std::{
        env,
        fs::File,
        io::Read,
        process::exit,
        time::Instant,
    },
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|a| a == "--version") {
        println!("sabre-{VERSION}");
        return;
    }
    if args.iter().any(|a| a == "--help") {
        usage();
        return;
    }
    let config = match Config::from_args(args.into_iter()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Argument format error: {e}");
            exit(1);
        }
    };
    if let Err(e) = run(&config) {
        eprintln!("Error: {e}");
        exit(1);
    }
}

fn run(config: &Config) -> Result<(), SolverError> {
    let format = config.input_format()?;
    let mut input = String::new();
    match &config.input {
        Some(path) => {
            File::open(path)
                .and_then(|mut f| f.read_to_string(&mut input))
                .map_err(|_| SolverError::IOError)?;
        }
        None => {
            std::io::stdin()
                .read_to_string(&mut input)
                .map_err(|_| SolverError::IOError)?;
        }
    }
    let cnf = match format {
        InputFormat::Dimacs => CnfFormula::parse_dimacs(&input)?,
        InputFormat::Sexpr => sexpr::parse_to_cnf(&input, config.implication_encoding)?,
    };

    let mut solver = Solver::build(config, &cnf)?;
    let started = Instant::now();
    let result = solver.solve()?;
    let elapsed = started.elapsed().as_secs_f64();

    match result {
        Certificate::SAT(model) => {
            println!("SATISFIABLE");
            print_assignment(&model, &cnf);
        }
        Certificate::UNSAT => println!("UNSATISFIABLE"),
    }
    solver.stats().report(elapsed);
    Ok(())
}

fn print_assignment(model: &[i32], cnf: &CnfFormula) {
    let mut rendered: Vec<String> = Vec::with_capacity(model.len());
    for l in model {
        let vi = l.unsigned_abs() as usize;
        let name = cnf
            .var_names
            .get(&vi)
            .cloned()
            .unwrap_or_else(|| vi.to_string());
        rendered.push(if *l < 0 { format!("-{name}") } else { name });
    }
    println!("Assignment: {{ {} }}", rendered.join(", "));
}

fn usage() {
    println!("sabre [flags] [FILE]");
    println!("  input:     --dimacs | --sexpr (inferred from .cnf/.sat; stdin needs a flag)");
    println!("             --implication | --equivalence   Tseitin encoder for --sexpr");
    println!("  backend:   --adjacency-list | --watched | --eager [--short-clauses]");
    println!("  strategy:  --dpll | --dpll-look-ahead | --cdcl");
    println!("  decisions: --random-decisions | --static-jw | --vsids");
    println!("  look-ahead scoring: --crh | --bsh | --wbh");
    println!("  CDCL tuning: --luby-reset-base N --cache-run-coef F --cache-variable-coef F");
    println!("  assumptions: --assumptions [l1,l2,...]");
    println!("  --version | --help");
}
