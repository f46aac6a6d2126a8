use clap::Parser;

/// Arguments for the build command (experimental stub)
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Application definition to build
    pub app_name: Option<String>,
}
