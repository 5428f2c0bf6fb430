mod cli;
mod run;

fn main() {
    let args = cli::parse();
    if let Err(err) = run::run(args) {
        eprintln!("quadshade: {err:#}");
        std::process::exit(-1);
    }
}
