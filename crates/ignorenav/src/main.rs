fn main() -> anyhow::Result<()> {
    ignorenav::init();

    ignorenav::cli::run()
}
