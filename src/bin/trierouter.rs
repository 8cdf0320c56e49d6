fn main() -> anyhow::Result<()> {
    trierouter::cli::run_cli()
}
