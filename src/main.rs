use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = ext_sort::cli::parse();
    app::run(args)
}
