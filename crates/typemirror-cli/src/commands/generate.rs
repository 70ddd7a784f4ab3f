//! Generate command - Rust types from a declaration model.

use clap::Args;
use std::path::{Path, PathBuf};
use typemirror::ir::Declaration;
use typemirror::{DirectorySink, Generator};

/// Generate command arguments
#[derive(Args)]
pub struct GenerateArgs {
    /// Declaration model (JSON array of declarations), use - for stdin
    pub model: PathBuf,

    /// Config file (defaults to ./typemirror.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output directory (overrides `output_dir` from the config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print generated files to stdout instead of writing them
    #[arg(long)]
    pub dry_run: bool,
}

/// Run the generate command
pub fn run(args: GenerateArgs) -> i32 {
    let mut config = match super::load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            return 1;
        }
    };
    if let Some(output) = args.output {
        config.output_dir = output;
    }

    let generator = match Generator::new(config) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("{}", e);
            return 1;
        }
    };

    let decls = match read_model(&args.model) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("{}", e);
            return 1;
        }
    };
    tracing::debug!("read {} declarations", decls.len());

    if args.dry_run {
        return match generator.generate(&decls) {
            Ok(files) => {
                for file in files {
                    println!("// ==> {}\n{}", file.file_name, file.content);
                }
                0
            }
            Err(e) => {
                eprintln!("{}", e);
                1
            }
        };
    }

    let output_dir = generator.config().output_dir.clone();
    let mut sink = DirectorySink::new(&output_dir);
    match generator.run(&decls, &mut sink) {
        Ok(count) => {
            eprintln!("Generated {} files in {}", count, output_dir.display());
            0
        }
        Err(e) => {
            eprintln!("{}", e);
            1
        }
    }
}

/// Read the declaration model from a file, or stdin for `-`.
fn read_model(path: &Path) -> Result<Vec<Declaration>, String> {
    let content = if path.as_os_str() == "-" {
        use std::io::Read;
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("Failed to read stdin: {}", e))?;
        buf
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?
    };

    serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse declaration model: {}", e))
}
