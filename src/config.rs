use clap::Parser;
use clap_num::maybe_hex;
use lazy_static::lazy_static;

#[derive(Parser, Debug)]
#[command(author,version,about,long_about=None)]
pub struct Args {
    /// Local copy of the official instruction reference (HTML with one named anchor per mnemonic)
    pub official: String,

    /// Local copy of the undocumented opcode reference (plain text with pipe-delimited tables)
    pub unofficial: String,

    /// Write the generated opcode table to this file instead of stdout
    #[arg(short, long)]
    pub out: Option<String>,

    /// Load emission templates from this file ('%% <section>' lines start each section)
    #[arg(short, long)]
    pub templates: Option<String>,

    /// Print every merged opcode record as a table
    #[arg(short, long)]
    pub list: bool,

    /// Print the record for a single opcode (hex ok with '0x')
    #[arg(long,value_parser=maybe_hex::<u8>)]
    pub show: Option<u8>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

lazy_static! {
    pub static ref ARGS: Args = if cfg!(test) {
        // manually set parameters for running tests; verbose so every log path runs
        Args::parse_from(["test", "-v", "test/official.html", "test/unofficial.txt"])
    } else {
        Args::parse()
    };
}

pub fn init() { lazy_static::initialize(&ARGS); }
