use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of build_cli() in src/main.rs; build scripts can't reach src/ modules.
fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("casebook")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Annotate card text and build the casebook dataset")
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .global(true)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("rules")
                .long("rules")
                .value_name("PATH")
                .global(true)
                .value_hint(ValueHint::FilePath),
        )
        .subcommand(
            Command::new("annotate").arg(
                Arg::new("input")
                    .index(1)
                    .value_hint(ValueHint::FilePath),
            ),
        )
        .subcommand(
            Command::new("card").arg(
                Arg::new("input")
                    .required(true)
                    .index(1)
                    .value_hint(ValueHint::FilePath),
            ),
        )
        .subcommand(
            Command::new("build-data")
                .arg(
                    Arg::new("source")
                        .long("source")
                        .value_hint(ValueHint::DirPath),
                )
                .arg(Arg::new("out").long("out").value_hint(ValueHint::DirPath))
                .arg(
                    Arg::new("compact")
                        .long("compact")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("rules"));

    generate_to(Bash, &mut cmd, "casebook", &outdir)?;
    generate_to(Zsh, &mut cmd, "casebook", &outdir)?;
    generate_to(Fish, &mut cmd, "casebook", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
