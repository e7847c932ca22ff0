pub mod commands;
pub mod render;
pub mod tokens;

use clap::ValueEnum;

#[derive(ValueEnum, Clone, Debug, Copy, PartialEq, Eq, Default)]
pub enum CliOutput {
    /// Draw each screen as text.
    #[default]
    Text,
    /// Print each screen's display fields as JSON.
    Json,
}
