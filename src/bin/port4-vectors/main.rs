mod args;

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use anyhow::Context as _;
use args::Args;
use clap::Parser as _;
use embassy_futures::block_on;
use port4_core::EncoderBridge;
use port4_vectors::{logger, ConsoleInputSource, HexDumpSink};

const PROMPT: &str = "Input one or more lines of name/value tuples, ended by '.'";

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init(args.log_level()).context("failed to install logger")?;

    let mut stdout = io::stdout().lock();
    if !args.no_prompt {
        writeln!(stdout, "{}", PROMPT).context("failed to write prompt")?;
    }

    let sent = match &args.input {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("failed to open file: {:?}", path))?;
            generate(BufReader::new(file), stdout, !args.no_echo)?
        }
        None => generate(io::stdin().lock(), stdout, !args.no_echo)?,
    };

    log::info!("encoded {} messages", sent);
    Ok(())
}

fn generate<R: BufRead, W: Write>(reader: R, writer: W, echo: bool) -> anyhow::Result<usize> {
    let input = ConsoleInputSource::new(reader);
    let output = HexDumpSink::new(writer).with_echo(echo);
    let mut bridge = EncoderBridge::new(input, output);

    block_on(bridge.run_until_closed()).context("failed to generate test vectors")
}
