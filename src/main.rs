use std::path::PathBuf;

use clap::Parser;
use mock_test::Exam;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON catalog of tests
    #[arg(short, long)]
    catalog: PathBuf,

    /// Id of the test to take; defaults to the first one in the catalog
    #[arg(short, long)]
    test_id: Option<String>,
}

fn main() {
    pretty_env_logger::init();
    let args = Args::parse();

    let exam = match Exam::from_catalog(&args.catalog, args.test_id.as_deref()) {
        Ok(exam) => exam,
        Err(e) => {
            eprintln!("Cannot start test: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = exam.run() {
        eprintln!("Error running exam: {}", e);
        std::process::exit(1);
    }
}
