//! # wikt2dict
//!
//! Compiles wiktextract dumps into lemma and deinflection dictionaries.
//!
//! ## Getting started
//!
//! ```sh
//! wikt2dict compile dump.jsonl data/tidy --source-lang sq --target-lang en
//! ```
use log::debug;
use structopt::StructOpt;

use wikt2dict::error;
use wikt2dict::pipelines::{LemmaForms, Pipeline};

mod cli;

fn main() -> Result<(), error::Error> {
    env_logger::init();

    let opt = cli::Wikt2Dict::from_args();
    debug!("cli args\n{:#?}", opt);

    match opt {
        cli::Wikt2Dict::Compile(c) => {
            let p = LemmaForms::new(c.src, c.dst, c.source_lang, c.target_lang);
            p.run()?;
        }
    };
    Ok(())
}
