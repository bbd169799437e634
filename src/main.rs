use clap::{App, Arg};
use std::path::Path;

use stele::build::build_site;
use stele::config::Config;

fn main() {
    let matches = App::new("stele")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Builds the portfolio site: post pages, the JSON post index, a sitemap, and feeds")
        .arg(
            Arg::with_name("project")
                .short("p")
                .long("project")
                .value_name("DIR")
                .help("The project directory; ancestors are searched for stele.yaml (defaults to the current directory)")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .value_name("DIR")
                .help("The output directory")
                .required(true)
                .takes_value(true),
        )
        .get_matches();

    let project = Path::new(matches.value_of("project").unwrap_or("."));
    // `output` is required, so value_of can't return None.
    let output = Path::new(matches.value_of("output").unwrap());

    if let Err(err) = run(project, output) {
        eprintln!("stele: {}", err);
        std::process::exit(1);
    }
}

fn run(project: &Path, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_directory(project, output)?;
    let count = build_site(&config)?;
    println!("built {} posts", count);
    Ok(())
}
