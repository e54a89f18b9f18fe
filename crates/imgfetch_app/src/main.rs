mod repl;

fn main() -> anyhow::Result<()> {
    engine_logging::initialize(engine_logging::LogDestination::File);
    repl::run()
}
