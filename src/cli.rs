//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser, ValueHint};
use token_build::{BuildOptions, Manifest};

/// Compile design-token documents into `tokens.css` and `tokens.ts`
#[derive(Debug, Parser)]
#[command(name = "token-build", author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// JSON manifest listing the token documents
    #[arg(short, long, env = "TOKEN_BUILD_MANIFEST", value_hint = ValueHint::FilePath)]
    pub manifest: Option<PathBuf>,

    /// Directory containing the token documents
    #[arg(long, env = "TOKEN_BUILD_TOKENS_DIR", value_hint = ValueHint::DirPath)]
    pub tokens_dir: Option<PathBuf>,

    /// Directory receiving the generated files
    #[arg(long, env = "TOKEN_BUILD_OUT_DIR", value_hint = ValueHint::DirPath)]
    pub out_dir: Option<PathBuf>,

    /// Fail when a token node is neither a token nor a group
    #[arg(long)]
    pub strict: bool,
}

impl Cli {
    /// Resolve the manifest: file (or built-in default), then flag overrides
    pub fn load_manifest(&self) -> anyhow::Result<Manifest> {
        let mut manifest = match &self.manifest {
            Some(path) => Manifest::from_file(path)
                .map_err(token_build::BuildError::from)
                .with_context(|| format!("failed to load manifest {}", path.display()))?,
            None => Manifest::default(),
        };

        if let Some(dir) = &self.tokens_dir {
            manifest = manifest.tokens_dir(dir);
        }
        if let Some(dir) = &self.out_dir {
            manifest = manifest.out_dir(dir);
        }

        Ok(manifest)
    }

    /// Build options derived from flags
    pub fn options(&self) -> BuildOptions {
        BuildOptions { strict: self.strict }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["token-build"]).unwrap();
        assert_eq!(cli.verbose, 0);
        assert!(!cli.strict);
        assert!(cli.manifest.is_none());
    }

    #[test]
    fn test_cli_overrides_directories() {
        let cli = Cli::try_parse_from([
            "token-build",
            "--tokens-dir",
            "design",
            "--out-dir",
            "dist",
            "--strict",
            "-vv",
        ])
        .unwrap();

        let manifest = cli.load_manifest().unwrap();
        assert_eq!(manifest.tokens_dir, PathBuf::from("design"));
        assert_eq!(manifest.out_dir, PathBuf::from("dist"));
        assert_eq!(manifest.documents.len(), 6);
        assert!(cli.options().strict);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["token-build", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_missing_manifest_file() {
        let cli = Cli::try_parse_from(["token-build", "--manifest", "does/not/exist.json"]).unwrap();
        let err = cli.load_manifest().unwrap_err();
        assert!(err.to_string().contains("does/not/exist.json"));
    }
}
