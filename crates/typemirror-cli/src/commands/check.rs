//! Check command - validate configuration.
//!
//! Only the configuration is checked. With a raw escape template (`r#{field}`)
//! a reserved name that is also a path keyword still fails, but only once a
//! model produces it, so `check` cannot catch that case.

use clap::Args;
use std::path::PathBuf;
use typemirror::naming::{PATH_KEYWORDS, is_raw_template};
use typemirror::{Config, Generator};

/// Check command arguments
#[derive(Args)]
pub struct CheckArgs {
    /// Config file (defaults to ./typemirror.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Run the check command
pub fn run(args: CheckArgs) -> i32 {
    let config = match super::load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            return 1;
        }
    };

    match Generator::new(config) {
        Ok(generator) => {
            println!("{}", summary(generator.config()));
            0
        }
        Err(e) => {
            eprintln!("{}", e);
            1
        }
    }
}

fn summary(config: &Config) -> String {
    let mut out = format!(
        "config ok: {} marker(s), {} discriminator(s), escape template `{}`",
        config.markers.len(),
        config.discriminators.len(),
        config.escape_template
    );
    if is_raw_template(&config.escape_template) {
        out.push_str(&format!(
            "\nnote: raw identifiers cannot be {}; models producing them fail at generation",
            PATH_KEYWORDS.join(", ")
        ));
    }
    out
}
