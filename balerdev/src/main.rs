mod application;

mod presentation {
    pub mod cli;
}

fn main() -> baler_core::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    application::run()
}
