// Presentation helpers shared by the CLI: score prompt and report rendering.

pub mod prompt;
pub mod report;
