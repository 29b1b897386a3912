//! CLI domain: parse, route and output only.
//! No resolution logic here; the route table hands off to the config and bench modules.

mod output;
mod parse;
mod route;

pub use output::{render, OutputFormat};
pub use parse::{Cli, Commands};
pub use route::RunContext;
