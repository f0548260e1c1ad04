//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "wikt2dict", about = "dictionary compilation tool.")]
/// Holds every command that is callable by the `wikt2dict` command.
pub enum Wikt2Dict {
    #[structopt(about = "Compile lemma and deinflection dictionaries")]
    Compile(Compile),
}

#[derive(Debug, StructOpt)]
/// Compile command and parameters.
pub struct Compile {
    #[structopt(parse(from_os_str), help = "wiktextract JSONL dump (plain or .gz)")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "destination folder for the dictionaries")]
    pub dst: PathBuf,
    #[structopt(
        long = "source-lang",
        help = "ISO code of the language the entries describe"
    )]
    pub source_lang: String,
    #[structopt(long = "target-lang", help = "ISO code of the glosses' language")]
    pub target_lang: String,
}
