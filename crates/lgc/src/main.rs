use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Parser;
use lgc_db::{File, FileParse as _, RootDatabase, check_file};
use lgc_errors::Renderer;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
enum Options {
    /// Check a file and report its syntax errors.
    Check { path: Utf8PathBuf },
    /// Print the syntax tree of a file.
    Dump { path: Utf8PathBuf },
}

fn main() -> anyhow::Result<()> {
    match Options::parse() {
        Options::Check { path } => {
            let db = RootDatabase::default();
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read `{path}`"))?;

            let renderer = Renderer::styled();

            let file = File::new(&db, path, text);
            let diagnostics = check_file(&db, file);

            let path = file.path(&db).as_str();
            let text = file.text(&db);

            for diagnostic in diagnostics {
                eprintln!("{}", diagnostic.render(&renderer, path, text));
            }

            if !diagnostics.is_empty() {
                anyhow::bail!("{} syntax error(s) in `{path}`", diagnostics.len());
            }

            Ok(())
        }
        Options::Dump { path } => {
            let db = RootDatabase::default();
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read `{path}`"))?;

            let file = File::new(&db, path, text);
            print!("{}", file.parse(&db).debug_tree());

            Ok(())
        }
    }
}
