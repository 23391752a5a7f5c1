use anyhow::Result;

fn main() -> Result<()> {
    let args = filesort::cli::parse();
    filesort::app::run(args)
}
