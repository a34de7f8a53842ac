use std::path::PathBuf;

use clap::Args;
use oefen_core::OefenError;
use oefen_walk::{walk, PackWalk, WalkOptions, DEFAULT_LOCALE, PACK_FILE_NAME};

/// Content root selection shared by every corpus-wide command.
#[derive(Args, Debug, Clone)]
pub struct ContentArgs {
    /// Root of the exercise content tree.
    #[arg(long)]
    pub content_root: PathBuf,
    /// Locale segment whose successor names the domain.
    #[arg(long, default_value = DEFAULT_LOCALE)]
    pub locale: String,
}

/// Everything a command threads through one pipeline run: the loaded canons
/// and where and how to find packs.
#[derive(Debug)]
pub struct PipelineContext<C> {
    pub canons: C,
    pub content_root: PathBuf,
    pub walk: WalkOptions,
}

impl<C> PipelineContext<C> {
    pub fn new(canons: C, content: &ContentArgs) -> Self {
        Self {
            canons,
            content_root: content.content_root.clone(),
            walk: WalkOptions {
                locale: content.locale.clone(),
                file_name: PACK_FILE_NAME.to_string(),
            },
        }
    }

    /// Streams the packs under the content root in path order.
    pub fn packs(&self) -> Result<PackWalk, OefenError> {
        walk(&self.content_root, &self.walk)
    }
}
