fn main() -> anyhow::Result<()> {
    glyphrip::cli::run_cli()
}
